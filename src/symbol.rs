//! Pulse symbol compiler
//!
//! Turns a nanosecond [`TimingProfile`] into hardware-ready pulse symbols at
//! a fixed tick resolution. Compilation is pure integer math, so the same
//! profile and resolution always produce the same symbols.

use crate::error::StripError;
use crate::timing::{ChipVariant, TimingProfile};

/// Default symbol clock, 10 MHz (0.1 µs per tick)
pub const DEFAULT_RESOLUTION_HZ: u32 = 10_000_000;

/// Largest duration one half-period can carry (15-bit hardware field)
pub const MAX_DURATION_TICKS: u16 = 0x7FFF;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

const VARIANT_COUNT: usize = ChipVariant::ALL.len();

/// Output line level during one half-period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Level {
    Low = 0,
    High = 1,
}

/// One pulse symbol: two consecutive half-periods of `(level, ticks)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseSymbol {
    pub level0: Level,
    pub duration0: u16,
    pub level1: Level,
    pub duration1: u16,
}

impl PulseSymbol {
    pub const fn new(level0: Level, duration0: u16, level1: Level, duration1: u16) -> Self {
        Self {
            level0,
            duration0,
            level1,
            duration1,
        }
    }

    /// Pack into the 32-bit wire layout: `duration0[14:0]`, `level0[15]`,
    /// `duration1[30:16]`, `level1[31]`.
    #[allow(clippy::cast_lossless)]
    pub const fn word(self) -> u32 {
        (self.duration0 as u32 & MAX_DURATION_TICKS as u32)
            | ((self.level0 as u32) << 15)
            | ((self.duration1 as u32 & MAX_DURATION_TICKS as u32) << 16)
            | ((self.level1 as u32) << 31)
    }
}

/// Compiled symbols for one chip variant at one resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolSet {
    /// Symbol emitted for a 0-bit
    pub bit0: PulseSymbol,
    /// Symbol emitted for a 1-bit
    pub bit1: PulseSymbol,
    /// Reset gap, two equal low half-periods
    pub reset: PulseSymbol,
}

impl SymbolSet {
    /// Compile a profile at `resolution_hz` ticks per second.
    ///
    /// Durations round to the nearest tick and clamp to
    /// `1..=MAX_DURATION_TICKS`. The reset gap lands in a single symbol as
    /// two equal low halves; an odd total loses one tick.
    pub const fn compile(profile: &TimingProfile, resolution_hz: u32) -> Self {
        let reset_half = clamp_duration(scale_ticks(profile.t_reset, resolution_hz) / 2);
        Self {
            bit0: PulseSymbol::new(
                Level::High,
                clamp_duration(scale_ticks(profile.t0_high, resolution_hz)),
                Level::Low,
                clamp_duration(scale_ticks(profile.t0_low, resolution_hz)),
            ),
            bit1: PulseSymbol::new(
                Level::High,
                clamp_duration(scale_ticks(profile.t1_high, resolution_hz)),
                Level::Low,
                clamp_duration(scale_ticks(profile.t1_low, resolution_hz)),
            ),
            reset: PulseSymbol::new(Level::Low, reset_half, Level::Low, reset_half),
        }
    }
}

/// Symbols for every known chip variant, compiled once at one resolution.
///
/// Immutable after construction; strips borrow their variant's set from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    sets: [SymbolSet; VARIANT_COUNT],
    resolution_hz: u32,
}

impl SymbolTable {
    /// Compile the full table at `resolution_hz`.
    ///
    /// # Errors
    /// `InvalidArgument` when `resolution_hz` is zero.
    pub fn new(resolution_hz: u32) -> Result<Self, StripError> {
        if resolution_hz == 0 {
            return Err(StripError::InvalidArgument);
        }
        Ok(Self::build(resolution_hz))
    }

    fn build(resolution_hz: u32) -> Self {
        let sets =
            ChipVariant::ALL.map(|variant| SymbolSet::compile(variant.profile(), resolution_hz));
        Self {
            sets,
            resolution_hz,
        }
    }

    /// Compiled set for one variant
    pub const fn get(&self, variant: ChipVariant) -> &SymbolSet {
        &self.sets[variant as usize]
    }

    pub const fn resolution_hz(&self) -> u32 {
        self.resolution_hz
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::build(DEFAULT_RESOLUTION_HZ)
    }
}

#[allow(clippy::cast_lossless)]
const fn scale_ticks(nanos: u32, resolution_hz: u32) -> u64 {
    (nanos as u64 * resolution_hz as u64 + NANOS_PER_SECOND / 2) / NANOS_PER_SECOND
}

#[allow(clippy::cast_possible_truncation)]
const fn clamp_duration(ticks: u64) -> u16 {
    if ticks > MAX_DURATION_TICKS as u64 {
        MAX_DURATION_TICKS
    } else if ticks == 0 {
        1
    } else {
        ticks as u16
    }
}
