use rand::Rng;

use crate::raster::{Raster, extract_chunk, place_chunk};

/// Horizontally displace `floor(2f)` random bands, wrapping at the edges.
///
/// Each iteration draws the offset in `[-maxOffset, maxOffset]` with
/// `maxOffset = floor(f * W / 10)`. A zero offset skips the iteration without
/// further draws; otherwise the band start row and height are drawn next.
pub fn apply_random_shift<R: Rng>(raster: &mut Raster, intensity: f32, rng: &mut R) {
    let max_offset = (intensity * raster.width() as f32 / 10.0).max(0.0) as i64;
    let iterations = (intensity * 2.0).max(0.0) as usize;

    for _ in 0..iterations {
        let offset = rng.random_range(-max_offset..=max_offset);
        if offset == 0 {
            continue;
        }
        let (start_y, stop_y) = random_band(raster.height(), rng);
        let magnitude = offset.unsigned_abs() as usize;
        if offset < 0 {
            shift_band_left(raster, start_y, stop_y, magnitude);
        } else {
            shift_band_right(raster, start_y, stop_y, magnitude);
        }
    }
}

/// `[start, stop)` rows: start uniform in `[0, H)`, height uniform in
/// `[1, max(1, H/4)]`, clipped at the bottom edge.
pub(crate) fn random_band<R: Rng>(height: usize, rng: &mut R) -> (usize, usize) {
    let start_y = rng.random_range(0..height);
    let max_band = (height / 4).max(1);
    let band = rng.random_range(1..=max_band).min(height - start_y);
    (start_y, start_y + band)
}

/// Columns `[o, W)` move to `[0, W-o)` and `[0, o)` wrap to `[W-o, W)`.
pub fn shift_band_left(raster: &mut Raster, start_y: usize, stop_y: usize, offset: usize) {
    let w = raster.width();
    let offset = offset % w;
    if offset == 0 {
        return;
    }
    let stop_x = w - offset;
    let body = extract_chunk(raster, start_y, stop_y, offset, w);
    let wrap = extract_chunk(raster, start_y, stop_y, 0, offset);
    place_chunk(raster, &body, start_y, stop_y, 0, stop_x);
    place_chunk(raster, &wrap, start_y, stop_y, stop_x, w);
}

/// Mirror of [`shift_band_left`]: `[0, W-o)` moves to `[o, W)` and `[W-o, W)`
/// wraps to `[0, o)`.
pub fn shift_band_right(raster: &mut Raster, start_y: usize, stop_y: usize, offset: usize) {
    let w = raster.width();
    let offset = offset % w;
    if offset == 0 {
        return;
    }
    let stop_x = w - offset;
    let body = extract_chunk(raster, start_y, stop_y, 0, stop_x);
    let wrap = extract_chunk(raster, start_y, stop_y, stop_x, w);
    place_chunk(raster, &body, start_y, stop_y, offset, w);
    place_chunk(raster, &wrap, start_y, stop_y, 0, offset);
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use super::*;
    use crate::raster::Rgba8;

    fn numbered(width: u32, height: u32) -> Raster {
        let mut r = Raster::filled(width, height, [0, 0, 0, 255]).unwrap();
        for y in 0..r.height() {
            for x in 0..r.width() {
                r.set_pixel(x, y, [x as u8, y as u8, (x * 7 + y) as u8, 255]);
            }
        }
        r
    }

    fn reds(r: &Raster, y: usize) -> Vec<u8> {
        (0..r.width()).map(|x| r.pixel(x, y)[0]).collect()
    }

    fn sorted_pixels(r: &Raster) -> Vec<Rgba8> {
        let mut px: Vec<Rgba8> = r.pixels().collect();
        px.sort();
        px
    }

    #[test]
    fn left_shift_wraps_leading_columns_to_the_end() {
        let mut r = numbered(5, 3);
        shift_band_left(&mut r, 1, 2, 2);
        assert_eq!(reds(&r, 1), vec![2, 3, 4, 0, 1]);
        assert_eq!(reds(&r, 0), vec![0, 1, 2, 3, 4]);
        assert_eq!(reds(&r, 2), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn right_shift_wraps_trailing_columns_to_the_start() {
        let mut r = numbered(5, 2);
        shift_band_right(&mut r, 0, 2, 1);
        assert_eq!(reds(&r, 0), vec![4, 0, 1, 2, 3]);
        assert_eq!(reds(&r, 1), vec![4, 0, 1, 2, 3]);
    }

    #[test]
    fn left_then_right_restores_the_band() {
        let mut r = numbered(7, 4);
        let before = r.clone();
        shift_band_left(&mut r, 0, 4, 3);
        shift_band_right(&mut r, 0, 4, 3);
        assert_eq!(r, before);
    }

    #[test]
    fn random_shift_only_permutes_pixels_within_rows() {
        let mut r = numbered(20, 16);
        let before = r.clone();
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        apply_random_shift(&mut r, 9.0, &mut rng);

        assert_eq!(sorted_pixels(&r), sorted_pixels(&before));
        for y in 0..r.height() {
            let mut a = r.row(y).chunks_exact(4).map(|p| p.to_vec()).collect::<Vec<_>>();
            let mut b = before.row(y).chunks_exact(4).map(|p| p.to_vec()).collect::<Vec<_>>();
            a.sort();
            b.sort();
            assert_eq!(a, b, "row {y}");
        }
    }

    #[test]
    fn bands_respect_height_limits() {
        for height in [1usize, 3, 4, 17, 64] {
            let max_band = (height / 4).max(1);
            let mut seen_heights = std::collections::BTreeSet::new();
            let mut seen_start = std::collections::BTreeSet::new();
            for seed in 0..2000u64 {
                let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
                let (start, stop) = random_band(height, &mut rng);
                assert!(start < height, "height {height}");
                assert!(stop <= height, "height {height}");
                let band = stop - start;
                assert!((1..=max_band).contains(&band), "height {height}: band {band}");
                seen_heights.insert(band);
                seen_start.insert(start);
            }
            assert!(seen_heights.contains(&1));
            assert_eq!(seen_start.len(), height, "height {height}");
            if height >= 17 {
                // Tall bands are clipped near the bottom, but the cap itself is reached.
                assert!(seen_heights.contains(&max_band), "height {height}");
            }
        }
    }

    #[test]
    fn tiny_rasters_do_not_panic() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(99);
        let mut one = numbered(1, 1);
        apply_random_shift(&mut one, 9.0, &mut rng);
        assert_eq!(one.pixel(0, 0), [0, 0, 0, 255]);

        let mut short = numbered(10, 3);
        apply_random_shift(&mut short, 9.0, &mut rng);
        assert_eq!(sorted_pixels(&short), sorted_pixels(&numbered(10, 3)));
    }

    #[test]
    fn low_intensity_on_narrow_raster_never_moves_anything() {
        // floor(0.5 * 4 / 10) == 0, so every drawn offset is zero.
        let mut r = numbered(4, 4);
        let before = r.clone();
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        apply_random_shift(&mut r, 0.5, &mut rng);
        assert_eq!(r, before);
    }
}
