use crate::raster::{OPAQUE_BLACK, Raster};

/// Row spacing for an intensity: its integer part, at least 1. This truncates
/// rather than rounds, so 2.7 gives a step of 2, not 3.
pub fn scan_line_step(intensity: f32) -> usize {
    intensity.max(1.0) as usize
}

/// Paint every `step`-th row (starting at row 0) opaque black.
pub fn apply_scan_lines(raster: &mut Raster, intensity: f32) {
    let step = scan_line_step(intensity);
    for y in (0..raster.height()).step_by(step) {
        for px in raster.row_mut(y).chunks_exact_mut(4) {
            px.copy_from_slice(&OPAQUE_BLACK);
        }
    }
}
