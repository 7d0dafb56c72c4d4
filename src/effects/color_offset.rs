use rand::Rng;

use crate::raster::Raster;

/// Copy one randomly chosen color channel from a wrapped `(dx, dy)` neighbour.
///
/// Draws, in order: `dx`, `dy` (both in `[-floor(f), floor(f)]`) and the channel
/// index (R, G or B).
pub fn apply_color_offset<R: Rng>(raster: &mut Raster, intensity: f32, rng: &mut R) {
    let (dx, dy, channel) = draw_offsets(intensity, rng);
    offset_channel(raster, dx, dy, channel);
}

/// `(dx, dy, channel)` with `|dx|, |dy| <= floor(f)` and `channel` in `0..3`.
pub fn draw_offsets<R: Rng>(intensity: f32, rng: &mut R) -> (i64, i64, usize) {
    let reach = intensity.max(0.0) as i64;
    let dx = rng.random_range(-reach..=reach);
    let dy = rng.random_range(-reach..=reach);
    let channel = rng.random_range(0..3usize);
    (dx, dy, channel)
}

/// Reads and writes the same buffer in row-major order, so later pixels see
/// channel values already overwritten earlier in the pass.
pub fn offset_channel(raster: &mut Raster, dx: i64, dy: i64, channel: usize) {
    let w = raster.width() as i64;
    let h = raster.height() as i64;
    for y in 0..h {
        let src_y = (y + dy).rem_euclid(h);
        for x in 0..w {
            let src_x = (x + dx).rem_euclid(w);
            let src = ((src_y * w + src_x) as usize) * 4 + channel;
            let dst = ((y * w + x) as usize) * 4 + channel;
            raster.data[dst] = raster.data[src];
        }
    }
}
