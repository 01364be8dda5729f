//! Time algebra: pure, stateless mappings over slice sequences.
//!
//! Positions are integer output/source milliseconds. Intermediate
//! arithmetic runs in `f64` and is rounded half-to-even only at result
//! boundaries, so repeated mappings accumulate no drift.

use recut_project_model::Slice;

/// Output duration of a single slice in fractional milliseconds.
pub fn slice_output_duration(slice: &Slice) -> f64 {
    slice.source_duration_ms() as f64 / slice.time_scale
}

/// Total output duration of a slice sequence, rounded to integer ms.
pub fn total_output_duration(slices: &[Slice]) -> u64 {
    round_half_even(slices.iter().map(slice_output_duration).sum())
}

/// Round a non-negative fractional millisecond value half-to-even.
pub fn round_half_even(value: f64) -> u64 {
    if value <= 0.0 {
        return 0;
    }
    let floor = value.floor();
    let frac = value - floor;
    let base = floor as u64;
    if frac > 0.5 {
        base + 1
    } else if frac < 0.5 {
        base
    } else if base % 2 == 0 {
        base
    } else {
        base + 1
    }
}

/// Map an output time to `(slice_index, source_time_ms)`.
///
/// `t_out` is clamped to `[0, total_output_duration]`; times at or past
/// the end map to the last slice's `source_end_ms`. Returns `None` only
/// for an empty sequence.
pub fn output_to_source(slices: &[Slice], t_out: u64) -> Option<(usize, u64)> {
    if slices.is_empty() {
        return None;
    }

    let t = t_out.min(total_output_duration(slices));
    let mut acc = 0.0f64;
    for (i, slice) in slices.iter().enumerate() {
        let d = slice_output_duration(slice);
        if (t as f64) < acc + d {
            let src = slice.source_start_ms as f64 + (t as f64 - acc) * slice.time_scale;
            let src = round_half_even(src).clamp(slice.source_start_ms, slice.source_end_ms);
            return Some((i, src));
        }
        acc += d;
    }

    let last = slices.len() - 1;
    Some((last, slices[last].source_end_ms))
}

/// Inverse of [`output_to_source`] within a single slice: the output
/// time at which `source_ms` of slice `index` plays. `None` if `index`
/// is out of bounds.
pub fn source_to_output(slices: &[Slice], index: usize, source_ms: u64) -> Option<u64> {
    let slice = slices.get(index)?;
    let source = source_ms.clamp(slice.source_start_ms, slice.source_end_ms);
    let acc: f64 = slices[..index].iter().map(slice_output_duration).sum();
    let within = (source - slice.source_start_ms) as f64 / slice.time_scale;
    Some(round_half_even(acc + within))
}

/// Output placement of one slice, for timeline rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRenderInfo {
    pub index: usize,
    pub output_start: u64,
    pub output_end: u64,
    pub output_duration: u64,
}

/// Output placement of every slice in one pass.
///
/// Boundaries are rounded cumulatively, so the per-slice durations sum
/// exactly to [`total_output_duration`].
pub fn render_infos(slices: &[Slice]) -> Vec<SliceRenderInfo> {
    let mut infos = Vec::with_capacity(slices.len());
    let mut acc = 0.0f64;
    let mut prev_end = 0u64;
    for (index, slice) in slices.iter().enumerate() {
        acc += slice_output_duration(slice);
        let output_end = round_half_even(acc);
        infos.push(SliceRenderInfo {
            index,
            output_start: prev_end,
            output_end,
            output_duration: output_end - prev_end,
        });
        prev_end = output_end;
    }
    infos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(start: u64, end: u64, scale: f64) -> Slice {
        let mut s = Slice::over(start, end);
        s.time_scale = scale;
        s
    }

    #[test]
    fn test_round_half_even_ties() {
        assert_eq!(round_half_even(2.5), 2);
        assert_eq!(round_half_even(3.5), 4);
        assert_eq!(round_half_even(2.4), 2);
        assert_eq!(round_half_even(2.6), 3);
        assert_eq!(round_half_even(0.0), 0);
    }

    #[test]
    fn test_total_output_duration_with_speed() {
        let slices = vec![slice(0, 10_000, 2.0)];
        assert_eq!(total_output_duration(&slices), 5_000);
    }

    #[test]
    fn test_output_to_source_real_time() {
        let slices = vec![slice(1_000, 5_000, 1.0)];
        assert_eq!(output_to_source(&slices, 0), Some((0, 1_000)));
        assert_eq!(output_to_source(&slices, 2_000), Some((0, 3_000)));
    }

    #[test]
    fn test_output_to_source_double_speed() {
        let slices = vec![slice(0, 10_000, 2.0)];
        assert_eq!(output_to_source(&slices, 2_500), Some((0, 5_000)));
    }

    #[test]
    fn test_output_to_source_past_end_clamps_to_last_slice_end() {
        let slices = vec![slice(0, 4_000, 1.0), slice(6_000, 10_000, 1.0)];
        assert_eq!(output_to_source(&slices, 99_999), Some((1, 10_000)));
    }

    #[test]
    fn test_output_to_source_empty() {
        assert_eq!(output_to_source(&[], 1_000), None);
    }

    #[test]
    fn test_second_slice_mapping() {
        let slices = vec![slice(0, 4_000, 1.0), slice(6_000, 10_000, 2.0)];
        // slice 0 covers [0, 4000), slice 1 covers [4000, 6000)
        assert_eq!(output_to_source(&slices, 3_999), Some((0, 3_999)));
        assert_eq!(output_to_source(&slices, 4_000), Some((1, 6_000)));
        assert_eq!(output_to_source(&slices, 5_000), Some((1, 8_000)));
    }

    #[test]
    fn test_roundtrip_within_slices() {
        // Mapping out and back is the identity inside a slice
        let slices = vec![
            slice(500, 4_000, 1.0),
            slice(4_000, 10_000, 2.0),
            slice(0, 3_000, 0.5),
        ];
        let total = total_output_duration(&slices);
        for t_out in (0..total).step_by(7) {
            let (i, src) = output_to_source(&slices, t_out).unwrap();
            let back = source_to_output(&slices, i, src).unwrap();
            assert!(
                back.abs_diff(t_out) <= 1,
                "t_out={t_out} src={src} back={back}"
            );
        }
    }

    #[test]
    fn test_mapped_source_stays_in_slice_bounds() {
        // Every mapped source time lands inside its slice
        let slices = vec![slice(100, 900, 3.0), slice(900, 1_400, 0.25)];
        let total = total_output_duration(&slices);
        for t_out in 0..=total {
            let (i, src) = output_to_source(&slices, t_out).unwrap();
            assert!(i < slices.len());
            assert!(src >= slices[i].source_start_ms && src <= slices[i].source_end_ms);
        }
    }

    #[test]
    fn test_render_infos_sum_exactly() {
        // Rendered durations telescope to the exact total
        let slices = vec![
            slice(0, 1_000, 3.0),
            slice(1_000, 2_000, 3.0),
            slice(2_000, 3_000, 3.0),
            slice(3_000, 4_000, 7.0),
        ];
        let infos = render_infos(&slices);
        let sum: u64 = infos.iter().map(|ri| ri.output_duration).sum();
        assert_eq!(sum, total_output_duration(&slices));
        assert_eq!(infos.last().unwrap().output_end, sum);

        for pair in infos.windows(2) {
            assert_eq!(pair[0].output_end, pair[1].output_start);
        }
    }

    #[test]
    fn test_source_to_output_out_of_bounds_index() {
        let slices = vec![slice(0, 1_000, 1.0)];
        assert_eq!(source_to_output(&slices, 3, 500), None);
    }
}
