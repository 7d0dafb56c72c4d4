use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::{
    effects::{
        apply_color_offset, apply_pixel_sort, apply_random_shift, apply_scan_lines, is_black,
    },
    error::{GlitchError, GlitchResult},
    params::EffectParameters,
    raster::Raster,
};

/// Seeded glitch pipeline.
///
/// Every call to [`GlitchEngine::apply`] (or [`GlitchEngine::run`]) seeds its own
/// generator from `seed`, so the same seed, parameters and input always produce
/// the same bytes. Cycles run in order; within a cycle the order is fixed:
/// 1. scan lines (if enabled)
/// 2. pixel sort (if enabled)
/// 3. color offset (if enabled)
/// 4. random wrap-shift (always)
#[derive(Clone, Debug)]
pub struct GlitchEngine {
    params: EffectParameters,
    seed: u64,
}

impl GlitchEngine {
    pub fn new(params: EffectParameters, seed: u64) -> GlitchResult<Self> {
        params.validate()?;
        Ok(Self { params, seed })
    }

    pub fn params(&self) -> &EffectParameters {
        &self.params
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Glitch `raster` and hand it back, or drop it if the result is all black.
    pub fn run(&self, mut raster: Raster) -> GlitchResult<Raster> {
        self.apply(&mut raster)?;
        Ok(raster)
    }

    /// Glitch `raster` in place. A malformed raster is refused with
    /// [`GlitchError::InvalidParameter`] before any pixel is touched. On
    /// [`GlitchError::AllBlack`] the raster is left fully mutated and must not be
    /// used as output.
    #[tracing::instrument(skip(self, raster), fields(seed = self.seed, width = raster.width, height = raster.height))]
    pub fn apply(&self, raster: &mut Raster) -> GlitchResult<()> {
        raster.validate()?;
        let mut rng = Xoshiro256StarStar::seed_from_u64(self.seed);
        let p = &self.params;

        for cycle in 0..p.cycles {
            tracing::debug!(cycle, "glitch cycle");
            if p.effects.scan_lines {
                apply_scan_lines(raster, p.intensity);
            }
            if p.effects.pixel_sort {
                apply_pixel_sort(raster);
            }
            if p.effects.color_offset {
                apply_color_offset(raster, p.intensity, &mut rng);
            }
            apply_random_shift(raster, p.intensity, &mut rng);
        }

        if is_black(raster) {
            tracing::warn!("glitched raster is entirely transparent black");
            return Err(GlitchError::AllBlack);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::EffectToggles;

    #[test]
    fn new_rejects_invalid_parameters_up_front() {
        let err = GlitchEngine::new(EffectParameters::default().with_intensity(0.0), 1).unwrap_err();
        assert!(matches!(err, GlitchError::InvalidParameter(_)));
        let err = GlitchEngine::new(EffectParameters::default().with_cycles(0), 1).unwrap_err();
        assert!(matches!(err, GlitchError::InvalidParameter(_)));
    }

    #[test]
    fn malformed_rasters_are_refused_without_panicking() {
        let engine = GlitchEngine::new(EffectParameters::default().with_intensity(9.0), 1).unwrap();

        let err = engine
            .run(Raster {
                width: 4,
                height: 0,
                data: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, GlitchError::InvalidParameter(_)));

        let mut short = Raster {
            width: 4,
            height: 4,
            data: vec![1; 8],
        };
        let err = engine.apply(&mut short).unwrap_err();
        assert!(matches!(err, GlitchError::InvalidParameter(_)));
        assert_eq!(short.data, vec![1; 8]);
    }

    #[test]
    fn scan_lines_run_before_the_shift() {
        // A 1px wide raster cannot shift, so only the scan lines leave a mark.
        let params = EffectParameters::default()
            .with_intensity(2.0)
            .with_effects(EffectToggles {
                scan_lines: true,
                ..EffectToggles::default()
            });
        let engine = GlitchEngine::new(params, 5).unwrap();
        let out = engine
            .run(Raster::filled(1, 6, [10, 20, 30, 255]).unwrap())
            .unwrap();
        for y in 0..6 {
            let expected = if y % 2 == 0 {
                [0, 0, 0, 255]
            } else {
                [10, 20, 30, 255]
            };
            assert_eq!(out.pixel(0, y), expected, "row {y}");
        }
    }

    #[test]
    fn apply_reseeds_on_every_call() {
        let engine = GlitchEngine::new(EffectParameters::default().with_intensity(6.0), 77).unwrap();
        let mut src = Raster::filled(16, 16, [0, 0, 0, 255]).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                src.set_pixel(x, y, [(x * 16) as u8, (y * 16) as u8, 0, 255]);
            }
        }
        let a = engine.run(src.clone()).unwrap();
        let b = engine.run(src).unwrap();
        assert_eq!(a, b);
    }
}
