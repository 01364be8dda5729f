//! Recut Playback Engine
//!
//! Everything between a scene snapshot and a rendered frame:
//! - **Event index:** immutable, sorted queries over recorded input
//! - **Cursor smoother:** a critically-damped spring over raw samples
//! - **Layout resolution:** output-time lookup and pixel rects
//! - **Resolver:** the per-tick orchestrator publishing `FrameState`
//! - **Frame enumeration:** deterministic headless replay for export

pub mod event_index;
pub mod frames;
pub mod layout;
pub mod resolver;
pub mod smoother;

pub use event_index::InputEventIndex;
pub use resolver::{FrameState, MediaClock, MediaMetadata, Resolver, VirtualClock};
pub use smoother::CursorSmoother;
