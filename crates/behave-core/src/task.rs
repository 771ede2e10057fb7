//! The render task: one frame of motion plus one draw per tick, until its
//! token is cancelled.
//!
//! The platform loop (`requestAnimationFrame` on the web) only has to call
//! [`RenderTask::step`] and stop rescheduling once it returns
//! [`Step::Stopped`].

use crate::camera::Viewport;
use crate::constants::FRAME_ERROR_LOG_EVERY;
use crate::error::FieldError;
use crate::field::{FrameUniforms, PointField};
use instant::Instant;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag handed to a render task at start.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Whatever turns [`FrameUniforms`] into pixels.
pub trait FrameSink {
    /// Match the surface to a new backing-store size (physical pixels).
    fn resize(&mut self, width: u32, height: u32);
    fn draw(&mut self, uniforms: &FrameUniforms) -> Result<(), FieldError>;
    /// Free GPU/DOM resources. Called exactly once, by [`RenderTask::teardown`].
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Stopped,
}

pub struct RenderTask<S: FrameSink> {
    field: PointField,
    sink: Option<S>,
    token: CancelToken,
    frames: u64,
    dropped_frames: u64,
}

impl<S: FrameSink> RenderTask<S> {
    pub fn new(field: PointField, sink: S, token: CancelToken) -> Self {
        Self {
            field,
            sink: Some(sink),
            token,
            frames: 0,
            dropped_frames: 0,
        }
    }

    /// Advance one frame and draw it. A fatal draw error tears the task down
    /// on the spot; anything else drops the frame and the loop goes on.
    pub fn step(&mut self, elapsed_secs: f32) -> Step {
        if self.token.is_cancelled() {
            return Step::Stopped;
        }
        let Some(sink) = self.sink.as_mut() else {
            return Step::Stopped;
        };
        self.field.advance(elapsed_secs);
        if let Err(e) = sink.draw(&self.field.uniforms()) {
            if e.is_fatal() {
                log::error!("[loop] frame {}: {}, stopping", self.frames, e);
                self.teardown();
                return Step::Stopped;
            }
            self.dropped_frames += 1;
            if reports_dropped_frame(self.dropped_frames) {
                log::warn!(
                    "[loop] frame {}: {} ({} dropped so far)",
                    self.frames,
                    e,
                    self.dropped_frames
                );
            }
        }
        self.frames += 1;
        Step::Continue
    }

    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32) {
        if self.token.is_cancelled() {
            return;
        }
        self.field.pointer_moved(client_x, client_y);
    }

    pub fn resized(&mut self, viewport: Viewport) {
        if self.token.is_cancelled() {
            return;
        }
        let (w, h) = self.field.resized(viewport);
        if let Some(sink) = self.sink.as_mut() {
            sink.resize(w, h);
        }
    }

    /// Cancel and release. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.token.cancel();
        if let Some(mut sink) = self.sink.take() {
            sink.release();
            log::info!("[loop] released after {} frames", self.frames);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled() && self.sink.is_some()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames whose draw failed without ending the task.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

impl<S: FrameSink> Drop for RenderTask<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// The first dropped frame is reported, then every `FRAME_ERROR_LOG_EVERY`th.
pub fn reports_dropped_frame(dropped: u64) -> bool {
    dropped > 0 && (dropped - 1) % FRAME_ERROR_LOG_EVERY == 0
}

/// Seconds since construction; feeds the shader's time uniform.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}
