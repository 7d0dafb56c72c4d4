//! Decode/encode adapters around the `image` crate. The glitch core never calls
//! into this module; it only sees [`Raster`]s.

use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::{
    Delay, Frame,
    codecs::{
        gif::{GifEncoder, Repeat},
        jpeg::JpegEncoder,
    },
};
use rand::Rng;

use crate::{
    error::{GlitchError, GlitchResult},
    palette::Plan9Palette,
    raster::Raster,
    sequence::FrameSequence,
};

pub const JPEG_QUALITY: u8 = 75;

/// Still-image encodings, chosen by output file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StillFormat {
    /// Lossless.
    Png,
    /// Lossy; alpha is dropped.
    Jpeg,
}

impl StillFormat {
    pub fn from_path(path: &Path) -> GlitchResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(GlitchError::unsupported_format(format!(".{ext}"))),
        }
    }
}

pub fn load_raster(path: &Path) -> GlitchResult<Raster> {
    let img = image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    Raster::from_rgba_image(img.to_rgba8())
}

pub fn ensure_parent_dir(path: &Path) -> GlitchResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

fn create_writer(path: &Path) -> GlitchResult<BufWriter<File>> {
    ensure_parent_dir(path)?;
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(BufWriter::new(f))
}

pub fn save_still(raster: &Raster, path: &Path) -> GlitchResult<()> {
    let format = StillFormat::from_path(path)?;
    match format {
        StillFormat::Png => {
            ensure_parent_dir(path)?;
            image::save_buffer_with_format(
                path,
                &raster.data,
                raster.width,
                raster.height,
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            )
            .with_context(|| format!("write png '{}'", path.display()))?;
        }
        StillFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(raster.to_rgba_image()?).to_rgb8();
            let mut w = create_writer(path)?;
            JpegEncoder::new_with_quality(&mut w, JPEG_QUALITY)
                .encode_image(&rgb)
                .with_context(|| format!("write jpeg '{}'", path.display()))?;
            w.flush().with_context(|| format!("write jpeg '{}'", path.display()))?;
        }
    }
    tracing::info!(path = %path.display(), ?format, "wrote still image");
    Ok(())
}

/// Encode `seq` as a looping GIF. Frames are dithered (Floyd-Steinberg) down to
/// the Plan 9 palette before encoding.
pub fn save_gif(seq: &FrameSequence, path: &Path) -> GlitchResult<()> {
    if seq.is_empty() {
        return Err(GlitchError::invalid_parameter(
            "cannot encode an empty frame sequence",
        ));
    }
    let palette = Plan9Palette::new();

    // The encoder writes its trailer on drop, so encode into memory and
    // write the file in one checked call.
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        encoder
            .set_repeat(Repeat::Infinite)
            .with_context(|| format!("encode gif '{}'", path.display()))?;

        for frame in seq {
            let mut img = frame.raster.to_rgba_image()?;
            image::imageops::dither(&mut img, &palette);
            let delay = Delay::from_numer_denom_ms(u32::from(frame.delay) * 10, 1);
            encoder
                .encode_frame(Frame::from_parts(img, 0, 0, delay))
                .with_context(|| format!("encode gif '{}'", path.display()))?;
        }
    }

    ensure_parent_dir(path)?;
    std::fs::write(path, &buf).with_context(|| format!("write gif '{}'", path.display()))?;
    tracing::info!(path = %path.display(), frames = seq.len(), "wrote gif");
    Ok(())
}

/// `glitched-image-NNNNN.<extension>` in the working directory.
pub fn generated_output_path(extension: &str) -> PathBuf {
    let n: u32 = rand::rng().random_range(0..100_000);
    let ext = extension.trim_start_matches('.');
    if ext.is_empty() {
        PathBuf::from(format!("glitched-image-{n:05}"))
    } else {
        PathBuf::from(format!("glitched-image-{n:05}.{ext}"))
    }
}
