//! Capture engine
//!
//! Implements [`DecodeEngine`] over anything that hands out finished
//! captures. On the device that is a single-slot signal filled by the edge
//! timing task; in tests it is a queue.

use irscope_core::event::DecodedEvent;
use irscope_core::traits::DecodeEngine;

use crate::decoder::{self, DecoderConfig, RawCapture};
use crate::render;

/// Source of complete pulse trains
pub trait CaptureSource {
    /// Take the pending capture, if any, without blocking
    fn try_take(&mut self) -> Option<RawCapture>;
}

/// Decode engine over a capture source
pub struct CaptureEngine<S: CaptureSource> {
    source: S,
    config: DecoderConfig,
    dropped: u32,
}

impl<S: CaptureSource> CaptureEngine<S> {
    /// Create an engine
    pub fn new(source: S, config: DecoderConfig) -> Self {
        Self {
            source,
            config,
            dropped: 0,
        }
    }

    /// Captures discarded as noise
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<S: CaptureSource> DecodeEngine for CaptureEngine<S> {
    fn try_decode(&mut self) -> Option<DecodedEvent> {
        let capture = self.source.try_take()?;
        match decoder::decode(&capture, &self.config) {
            Some(decoded) => Some(render::to_event(&decoded, &capture)),
            None => {
                self.dropped = self.dropped.wrapping_add(1);
                None
            }
        }
    }
}
