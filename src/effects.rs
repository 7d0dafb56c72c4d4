//! In-place glitch primitives operating on a [`Raster`](crate::Raster).
//!
//! Primitives that consume randomness take the caller's RNG so that one seeded
//! stream drives a whole run in a fixed order.

pub mod black_guard;
pub mod color_offset;
pub mod pixel_sort;
pub mod scan_lines;
pub mod wrap_shift;

pub use black_guard::is_black;
pub use color_offset::apply_color_offset;
pub use pixel_sort::apply_pixel_sort;
pub use scan_lines::apply_scan_lines;
pub use wrap_shift::{apply_random_shift, shift_band_left, shift_band_right};
