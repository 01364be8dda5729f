//! Recut Timeline Engine
//!
//! The deterministic heart of the editor:
//! - **Time algebra:** pure mappings between output time and per-slice
//!   source time
//! - **Edit model:** mutations that preserve the timeline invariants or
//!   refuse atomically
//! - **Snapshot store:** single-writer project state with immutable,
//!   structurally-shared snapshots
//! - **Edit decisions:** the per-track concatenation plan exporters consume
//!
//! This crate is pure computation — no I/O, no playback state.

pub mod edit;
pub mod edl;
pub mod store;
pub mod time;

pub use edit::EditError;
pub use store::ProjectStore;
