use crate::{
    engine::GlitchEngine,
    error::GlitchResult,
    params::SequenceParameters,
    raster::Raster,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub raster: Raster,
    /// Hundredths of a second.
    pub delay: u16,
}

/// Frames in playback order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameSequence {
    pub frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Frame> {
        self.frames.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }
}

impl IntoIterator for FrameSequence {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Number of frames a sequence of `frames` stepped by `step` produces.
pub fn sequence_len(frames: u32, step: u32) -> usize {
    frames.div_ceil(step.max(1)) as usize
}

/// Glitch the same raster `ceil(frames / step)` times, snapshotting after each pass.
///
/// Frames compound: each pass starts from the previous frame's pixels. Any
/// engine error aborts the whole sequence.
#[tracing::instrument(skip(engine, raster), fields(seed = engine.seed()))]
pub fn build_sequence(
    engine: &GlitchEngine,
    mut raster: Raster,
    seq: &SequenceParameters,
) -> GlitchResult<FrameSequence> {
    seq.validate()?;
    let step = engine.params().step;
    let count = sequence_len(seq.frames, step);

    let mut frames = Vec::with_capacity(count);
    for index in 0..count {
        engine.apply(&mut raster)?;
        tracing::debug!(frame = index, "captured frame");
        frames.push(Frame {
            raster: raster.clone(),
            delay: seq.delay,
        });
    }
    Ok(FrameSequence { frames })
}
