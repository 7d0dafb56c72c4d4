use crate::raster::{Raster, Rgba8};

fn brightness(px: &Rgba8) -> u16 {
    px[0] as u16 + px[1] as u16 + px[2] as u16
}

/// Sort each row by ascending R+G+B. Alpha travels with its pixel but does not
/// take part in the ordering.
pub fn apply_pixel_sort(raster: &mut Raster) {
    let mut row_px: Vec<Rgba8> = Vec::with_capacity(raster.width());
    for y in 0..raster.height() {
        let row = raster.row_mut(y);
        row_px.clear();
        row_px.extend(row.chunks_exact(4).map(|px| [px[0], px[1], px[2], px[3]]));
        row_px.sort_by_key(brightness);
        for (dst, px) in row.chunks_exact_mut(4).zip(&row_px) {
            dst.copy_from_slice(px);
        }
    }
}
