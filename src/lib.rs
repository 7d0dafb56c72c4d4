#![forbid(unsafe_code)]

pub mod codec;
pub mod effects;
pub mod engine;
pub mod error;
pub mod palette;
pub mod params;
pub mod raster;
pub mod sequence;

pub use codec::{StillFormat, generated_output_path, load_raster, save_gif, save_still};
pub use engine::GlitchEngine;
pub use error::{GlitchError, GlitchResult};
pub use palette::Plan9Palette;
pub use params::{EffectParameters, EffectToggles, SequenceParameters, time_seed};
pub use raster::{Chunk, Raster, Rgba8, extract_chunk, place_chunk};
pub use sequence::{Frame, FrameSequence, build_sequence};
