use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "glitcher", version, about = "Apply seeded glitch effects to an image")]
struct Cli {
    /// Input image (any format the `image` crate can decode).
    input: PathBuf,

    /// Output path (.png/.jpg/.jpeg, or .gif with --gif). Generated when omitted.
    output: Option<PathBuf>,

    /// JSON preset supplying base effect parameters; explicit flags win.
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Intensity of the glitch effect (0.1-9.0) [default: 5.0].
    #[arg(long)]
    glitch_intensity: Option<f32>,

    /// Apply the scan lines effect.
    #[arg(long)]
    scan_lines: bool,

    /// Apply the row pixel sort effect.
    #[arg(long)]
    pixel_sort: bool,

    /// Apply the color channel offset effect.
    #[arg(long)]
    color_offset: bool,

    /// Random seed for reproducibility [default: time based].
    #[arg(long)]
    seed: Option<u64>,

    /// Create an animated GIF instead of a single image.
    #[arg(long)]
    gif: bool,

    /// Number of frames for the GIF.
    #[arg(long, default_value_t = 10)]
    frames: u32,

    /// Delay between GIF frames, in hundredths of a second.
    #[arg(long, default_value_t = 10)]
    delay: u16,

    /// Number of glitch cycles per image or frame [default: 1].
    #[arg(long)]
    cycle: Option<u32>,

    /// Step size between frames [default: 1].
    #[arg(long)]
    step: Option<u32>,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let params = effect_params(&cli)?;
    let seed = cli.seed.unwrap_or_else(glitcher::time_seed);
    let engine = glitcher::GlitchEngine::new(params, seed)?;

    let raster = glitcher::load_raster(&cli.input)?;
    tracing::info!(
        input = %cli.input.display(),
        width = raster.width,
        height = raster.height,
        seed,
        "loaded input"
    );

    let out = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input, cli.gif));

    if cli.gif {
        let seq_params = glitcher::SequenceParameters {
            frames: cli.frames,
            delay: cli.delay,
        };
        let seq = glitcher::build_sequence(&engine, raster, &seq_params)
            .context("glitch frame sequence")?;
        glitcher::save_gif(&seq, &out)?;
    } else {
        let glitched = engine.run(raster).context("glitch image")?;
        glitcher::save_still(&glitched, &out)?;
    }

    eprintln!("wrote {} (seed {seed})", out.display());
    Ok(())
}

fn effect_params(cli: &Cli) -> anyhow::Result<glitcher::EffectParameters> {
    let mut params = match &cli.preset {
        Some(path) => glitcher::EffectParameters::from_json_file(path)?,
        None => glitcher::EffectParameters::default(),
    };
    if let Some(intensity) = cli.glitch_intensity {
        params.intensity = intensity;
    }
    if let Some(cycles) = cli.cycle {
        params.cycles = cycles;
    }
    if let Some(step) = cli.step {
        params.step = step;
    }
    params.effects.scan_lines |= cli.scan_lines;
    params.effects.pixel_sort |= cli.pixel_sort;
    params.effects.color_offset |= cli.color_offset;
    params.validate()?;
    Ok(params)
}

fn default_output(input: &Path, gif: bool) -> PathBuf {
    if gif {
        return glitcher::generated_output_path("gif");
    }
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    glitcher::generated_output_path(ext)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
