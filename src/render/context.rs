//! Raster output contexts: replay into a [`CpuBackend`], then encode.
//!
//! Both contexts own their backend, so a replay that fails part-way releases every surface when
//! the context is dropped.

use std::time::Duration;

use crate::encode::gif::encode_gif;
use crate::encode::png::encode_png;
use crate::foundation::core::Canvas;
use crate::foundation::error::{SketchError, SketchResult};
use crate::record::log::InstructionLog;
use crate::render::backend::FrameRGBA;
use crate::render::cpu::{CpuBackend, CpuBackendOpts};
use crate::render::replay::replay;

/// Single-image output: the last page of the log.
#[derive(Debug, Default)]
pub struct ImageContext {
    backend: CpuBackend,
}

impl ImageContext {
    /// Context rendering with `opts`.
    pub fn new(opts: CpuBackendOpts) -> Self {
        Self {
            backend: CpuBackend::new(opts),
        }
    }

    /// Replay `log` and return the last page.
    #[tracing::instrument(skip(self, log))]
    pub fn render(&mut self, log: &InstructionLog, leading: Canvas) -> SketchResult<FrameRGBA> {
        replay(&mut self.backend, log, leading)?;
        let mut frames = self.backend.take_frames();
        if frames.len() > 1 {
            tracing::debug!(dropped = frames.len() - 1, "image keeps the last page only");
        }
        frames
            .pop()
            .ok_or_else(|| SketchError::render("replay produced no page"))
    }

    /// Replay `log` and encode the last page as PNG.
    pub fn image_data(mut self, log: &InstructionLog, leading: Canvas) -> SketchResult<Vec<u8>> {
        let frame = self.render(log, leading)?;
        encode_png(&frame)
    }
}

/// Multi-frame output: one frame per page.
#[derive(Debug)]
pub struct AnimationContext {
    backend: CpuBackend,
    frame_duration: Duration,
}

impl AnimationContext {
    /// Context rendering with `opts`, showing each frame for `frame_duration`.
    pub fn new(opts: CpuBackendOpts, frame_duration: Duration) -> Self {
        Self {
            backend: CpuBackend::new(opts),
            frame_duration,
        }
    }

    /// Per-frame display time.
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Replay `log` and return every page in order.
    #[tracing::instrument(skip(self, log))]
    pub fn render(
        &mut self,
        log: &InstructionLog,
        leading: Canvas,
    ) -> SketchResult<Vec<FrameRGBA>> {
        replay(&mut self.backend, log, leading)?;
        let frames = self.backend.take_frames();
        tracing::debug!(frames = frames.len(), "animation assembled");
        Ok(frames)
    }

    /// Replay `log` and encode a looping GIF; a single page is encoded as PNG instead.
    pub fn image_data(mut self, log: &InstructionLog, leading: Canvas) -> SketchResult<Vec<u8>> {
        let frames = self.render(log, leading)?;
        match frames.as_slice() {
            [] => Err(SketchError::render("replay produced no page")),
            [only] => {
                tracing::debug!("single frame, encoding png");
                encode_png(only)
            }
            many => encode_gif(many, self.frame_duration),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
