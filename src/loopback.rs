//! Software transmission channel
//!
//! Drives an encoder to completion synchronously and captures the emitted
//! waveform, standing in for a hardware peripheral in host tests and
//! simulations. The bounded scratch slot reproduces the chunked pull a real
//! channel applies, so resumption paths run even off-target.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::encoder::{Encoder, SymbolSlot};
use crate::symbol::{Level, PulseSymbol};
use crate::{ChannelState, PulseChannel};

/// Scratch slot size per encoder pull, a typical hardware block size
pub const DEFAULT_SLOT_SYMBOLS: usize = 64;

/// The capture buffer ran out of room for the waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOverflow;

/// Captures transmitted symbols instead of driving a wire
///
/// `CAP` bounds the captured waveform; size it with
/// [`crate::encoder::frame_symbols`] times the frames kept.
#[derive(Debug, Clone)]
pub struct LoopbackChannel<const CAP: usize> {
    captured: Vec<PulseSymbol, CAP>,
    slot_symbols: usize,
    enabled: bool,
    frames: usize,
}

impl<const CAP: usize> LoopbackChannel<CAP> {
    pub const fn new() -> Self {
        Self {
            captured: Vec::new(),
            slot_symbols: DEFAULT_SLOT_SYMBOLS,
            enabled: false,
            frames: 0,
        }
    }

    /// Channel with a smaller scratch slot, to force resumption mid-frame
    pub fn with_slot(slot_symbols: usize) -> Self {
        let mut channel = Self::new();
        channel.slot_symbols = slot_symbols.clamp(1, DEFAULT_SLOT_SYMBOLS);
        channel
    }

    /// All captured symbols, in emission order
    pub fn captured(&self) -> &[PulseSymbol] {
        &self.captured
    }

    /// Transmissions completed since the last clear
    pub const fn frames(&self) -> usize {
        self.frames
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn clear(&mut self) {
        self.captured.clear();
        self.frames = 0;
    }
}

impl<const CAP: usize> Default for LoopbackChannel<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> PulseChannel for LoopbackChannel<CAP> {
    type Error = CaptureOverflow;

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.enabled = true;
        Ok(())
    }

    fn transmit(&mut self, encoder: &mut dyn Encoder, data: &[u8]) -> Result<(), Self::Error> {
        let idle = PulseSymbol::new(Level::Low, 0, Level::Low, 0);
        let mut scratch = [idle; DEFAULT_SLOT_SYMBOLS];
        loop {
            let mut slot = SymbolSlot::new(&mut scratch[..self.slot_symbols]);
            let result = encoder.encode(data, &mut slot);
            let written = slot.written();
            self.captured
                .extend_from_slice(&scratch[..written])
                .map_err(|()| CaptureOverflow)?;
            if result.complete {
                break;
            }
        }
        self.frames += 1;
        Ok(())
    }

    fn wait_done(&mut self, _timeout: Duration) -> Result<ChannelState, Self::Error> {
        // Transmission happens inside `transmit`, so the channel never
        // stays busy across calls.
        Ok(ChannelState::Idle)
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.enabled = false;
        Ok(())
    }
}

/// `DelayNs` that returns immediately, for host tests and simulation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
