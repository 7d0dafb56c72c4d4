use crate::raster::Raster;

/// True only when every channel of every pixel, alpha included, is zero.
/// Opaque black (`[0, 0, 0, 255]`) does not count.
pub fn is_black(raster: &Raster) -> bool {
    raster.data.iter().all(|&c| c == 0)
}
