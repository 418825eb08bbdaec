//! Strip lifecycle over an abstract transmission channel

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{LumaFn, Rgb};
use crate::encoder::{StripEncoder, frame_symbols};
use crate::error::StripError;
use crate::pixel::PixelBuffer;
use crate::symbol::SymbolTable;
use crate::timing::ChipVariant;
use crate::{ChannelState, PulseChannel};

/// Default bound on waiting out the previous transmission
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

/// Default idle gap between consecutive frames
pub const DEFAULT_INTERFRAME_PAUSE: Duration = Duration::from_micros(50);

/// Strip construction parameters
#[derive(Debug, Clone, Copy)]
pub struct StripConfig {
    /// Chip variant on the wire
    pub variant: ChipVariant,
    /// Pixel count
    pub length: usize,
    /// White channel derivation for RGBW chips, `None` for plain RGB
    pub white: Option<LumaFn>,
    /// Bound on waiting out the previous transmission during flush
    pub flush_timeout: Duration,
    /// Idle gap inserted before each frame
    pub interframe_pause: Duration,
}

impl StripConfig {
    pub const fn new(variant: ChipVariant, length: usize) -> Self {
        Self {
            variant,
            length,
            white: None,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            interframe_pause: DEFAULT_INTERFRAME_PAUSE,
        }
    }
}

/// One LED strip bound to a transmission channel
///
/// `CAP` is the pixel buffer capacity in bytes; size it with
/// [`crate::pixel::buffer_size`]. The strip owns its channel and delay
/// provider until [`LedStrip::free`] hands them back.
pub struct LedStrip<C: PulseChannel, D: DelayNs, const CAP: usize> {
    // Peripherals
    channel: C,
    delay: D,

    // Frame state
    buffer: PixelBuffer<CAP>,
    encoder: StripEncoder,

    // Timing policy
    flush_timeout: Duration,
    interframe_pause: Duration,
}

impl<C: PulseChannel, D: DelayNs, const CAP: usize> LedStrip<C, D, CAP> {
    /// Build a strip and enable its channel.
    ///
    /// # Errors
    /// Buffer sizing errors pass through; channel enable failures surface as
    /// `Channel`.
    pub fn new(
        mut channel: C,
        delay: D,
        symbols: &SymbolTable,
        config: &StripConfig,
    ) -> Result<Self, StripError<C::Error>> {
        let buffer = PixelBuffer::new(config.length, config.variant.order(), config.white)
            .map_err(StripError::widen)?;
        let encoder = StripEncoder::new(symbols.get(config.variant));
        channel.enable().map_err(StripError::Channel)?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[LedStrip.new] {} strip, {} pixels",
            config.variant.as_str(),
            config.length
        );

        Ok(Self {
            channel,
            delay,
            buffer,
            encoder,
            flush_timeout: config.flush_timeout,
            interframe_pause: config.interframe_pause,
        })
    }

    /// Pixel count
    pub const fn length(&self) -> usize {
        self.buffer.length()
    }

    /// Wire-order byte image of the current frame
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Symbols one flush produces, for sizing channel storage
    pub fn frame_symbols(&self) -> usize {
        frame_symbols(self.buffer.as_bytes().len())
    }

    pub fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), StripError<C::Error>> {
        self.buffer.set_pixel(index, color).map_err(StripError::widen)
    }

    pub fn set_pixels(
        &mut self,
        start: usize,
        colors: &[Rgb],
    ) -> Result<(), StripError<C::Error>> {
        self.buffer.set_pixels(start, colors).map_err(StripError::widen)
    }

    pub fn fill(
        &mut self,
        start: usize,
        len: usize,
        color: Rgb,
    ) -> Result<(), StripError<C::Error>> {
        self.buffer.fill(start, len, color).map_err(StripError::widen)
    }

    /// Transmit the current frame.
    ///
    /// Waits out the previous transmission (bounded by the flush timeout),
    /// inserts the inter-frame pause, then starts the new frame. Returns as
    /// soon as the channel has accepted it.
    pub fn flush(&mut self) -> Result<(), StripError<C::Error>> {
        match self.wait(self.flush_timeout) {
            Ok(()) => {}
            Err(e) => {
                #[cfg(feature = "esp32-log")]
                println!("[LedStrip.flush] previous frame not done: {:?}", e);
                return Err(e);
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        let pause_us = self.interframe_pause.as_micros().min(u64::from(u32::MAX)) as u32;
        if pause_us > 0 {
            self.delay.delay_us(pause_us);
        }

        self.channel
            .transmit(&mut self.encoder, self.buffer.as_bytes())
            .map_err(StripError::Channel)
    }

    /// Whether the previous transmission is still in flight
    pub fn busy(&mut self) -> Result<bool, StripError<C::Error>> {
        let state = self
            .channel
            .wait_done(Duration::from_ticks(0))
            .map_err(StripError::Channel)?;
        Ok(state == ChannelState::Busy)
    }

    /// Block until the channel goes idle, up to `timeout`.
    ///
    /// # Errors
    /// `Timeout` when the channel is still busy at the deadline.
    pub fn wait(&mut self, timeout: Duration) -> Result<(), StripError<C::Error>> {
        match self.channel.wait_done(timeout).map_err(StripError::Channel)? {
            ChannelState::Idle => Ok(()),
            ChannelState::Busy => Err(StripError::Timeout),
        }
    }

    /// Disable the channel and hand the peripherals back.
    ///
    /// Does not wait for an in-flight transmission; call [`LedStrip::wait`]
    /// first when that matters.
    ///
    /// # Errors
    /// A disable failure carries the peripherals alongside the error, so the
    /// caller can still reclaim them.
    pub fn free(mut self) -> Result<(C, D), (StripError<C::Error>, C, D)> {
        match self.channel.disable() {
            Ok(()) => Ok((self.channel, self.delay)),
            Err(e) => Err((StripError::Channel(e), self.channel, self.delay)),
        }
    }
}
