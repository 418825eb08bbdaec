#![no_std]

pub mod color;
pub mod encoder;
pub mod error;
pub mod loopback;
pub mod pixel;
pub mod strip;
pub mod symbol;
pub mod timing;

pub use strip::{DEFAULT_FLUSH_TIMEOUT, DEFAULT_INTERFRAME_PAUSE, LedStrip, StripConfig};
pub use encoder::{
    ByteEncoder, CopyEncoder, EncodeResult, Encoder, SlotFull, StripEncoder, SymbolSlot,
    frame_symbols,
};
pub use symbol::{
    DEFAULT_RESOLUTION_HZ, Level, MAX_DURATION_TICKS, PulseSymbol, SymbolSet, SymbolTable,
};
pub use timing::{ChipVariant, ColorOrder, TimingProfile};
pub use pixel::{PixelBuffer, buffer_size};
pub use error::StripError;
pub use loopback::{LoopbackChannel, NoopDelay};

pub use color::{LumaFn, Rgb, luma8};
pub use embassy_time::Duration;

/// Transmission state reported by [`PulseChannel::wait_done`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Idle,
    Busy,
}

/// Abstract one-wire transmission channel
///
/// Implement this trait to support different transmit peripherals.
/// The strip is generic over this trait.
pub trait PulseChannel {
    /// Channel-specific failure type
    type Error: core::fmt::Debug;

    /// Power the channel up before first use
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Start transmitting `data`, pulling symbols through `encoder`
    fn transmit(&mut self, encoder: &mut dyn Encoder, data: &[u8]) -> Result<(), Self::Error>;

    /// Wait up to `timeout` for an in-flight transmission to finish
    fn wait_done(&mut self, timeout: Duration) -> Result<ChannelState, Self::Error>;

    /// Power the channel down
    fn disable(&mut self) -> Result<(), Self::Error>;
}
