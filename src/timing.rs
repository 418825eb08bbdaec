//! Per-chip timing profiles
//!
//! Every supported one-wire LED chip encodes bits as a high/low pulse pair
//! with chip-specific durations, followed by a long low reset gap that
//! latches the frame. The table below carries the datasheet values; the
//! symbol compiler scales them to ticks at a given resolution.

const VARIANT_ID_WS2812: u8 = 0;
const VARIANT_ID_SK6812: u8 = 1;
const VARIANT_ID_APA106: u8 = 2;
const VARIANT_ID_SM16703: u8 = 3;
const VARIANT_ID_PI33TB: u8 = 4;

const VARIANT_NAME_WS2812: &str = "ws2812";
const VARIANT_NAME_SK6812: &str = "sk6812";
const VARIANT_NAME_APA106: &str = "apa106";
const VARIANT_NAME_SM16703: &str = "sm16703";
const VARIANT_NAME_PI33TB: &str = "pi33tb";

/// Byte order of the color channels on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOrder {
    /// Green, red, blue (WS2812 family)
    Grb,
    /// Red, green, blue (APA106 family)
    Rgb,
}

/// Pulse durations for one chip variant
///
/// All fields are nanoseconds. `t_reset` is the full idle gap between
/// frames, not a per-bit duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingProfile {
    /// High half-period of a 0-bit
    pub t0_high: u32,
    /// Low half-period of a 0-bit
    pub t0_low: u32,
    /// High half-period of a 1-bit
    pub t1_high: u32,
    /// Low half-period of a 1-bit
    pub t1_low: u32,
    /// Reset (latch) gap after a frame
    pub t_reset: u32,
    /// Channel byte order
    pub order: ColorOrder,
}

/// Known chip variants that can be driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ChipVariant {
    Ws2812 = VARIANT_ID_WS2812,
    Sk6812 = VARIANT_ID_SK6812,
    Apa106 = VARIANT_ID_APA106,
    Sm16703 = VARIANT_ID_SM16703,
    Pi33Tb = VARIANT_ID_PI33TB,
}

const WS2812_PROFILE: TimingProfile = TimingProfile {
    t0_high: 400,
    t0_low: 1000,
    t1_high: 1000,
    t1_low: 400,
    t_reset: 50_000,
    order: ColorOrder::Grb,
};

const SK6812_PROFILE: TimingProfile = TimingProfile {
    t0_high: 300,
    t0_low: 900,
    t1_high: 600,
    t1_low: 600,
    t_reset: 80_000,
    order: ColorOrder::Grb,
};

const APA106_PROFILE: TimingProfile = TimingProfile {
    t0_high: 350,
    t0_low: 1360,
    t1_high: 1360,
    t1_low: 350,
    t_reset: 50_000,
    order: ColorOrder::Rgb,
};

const SM16703_PROFILE: TimingProfile = TimingProfile {
    t0_high: 300,
    t0_low: 900,
    t1_high: 1360,
    t1_low: 350,
    t_reset: 80_000,
    order: ColorOrder::Rgb,
};

const PI33TB_PROFILE: TimingProfile = TimingProfile {
    t0_high: 300,
    t0_low: 900,
    t1_high: 900,
    t1_low: 300,
    t_reset: 80_000,
    order: ColorOrder::Grb,
};

impl ChipVariant {
    /// Every supported variant, in raw-id order
    pub const ALL: [Self; 5] = [
        Self::Ws2812,
        Self::Sk6812,
        Self::Apa106,
        Self::Sm16703,
        Self::Pi33Tb,
    ];

    /// Parse a variant from its raw id (untyped configuration sources)
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            VARIANT_ID_WS2812 => Self::Ws2812,
            VARIANT_ID_SK6812 => Self::Sk6812,
            VARIANT_ID_APA106 => Self::Apa106,
            VARIANT_ID_SM16703 => Self::Sm16703,
            VARIANT_ID_PI33TB => Self::Pi33Tb,
            _ => return None,
        })
    }

    /// Timing profile for this variant
    pub const fn profile(self) -> &'static TimingProfile {
        match self {
            Self::Ws2812 => &WS2812_PROFILE,
            Self::Sk6812 => &SK6812_PROFILE,
            Self::Apa106 => &APA106_PROFILE,
            Self::Sm16703 => &SM16703_PROFILE,
            Self::Pi33Tb => &PI33TB_PROFILE,
        }
    }

    /// Channel byte order for this variant
    pub const fn order(self) -> ColorOrder {
        self.profile().order
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ws2812 => VARIANT_NAME_WS2812,
            Self::Sk6812 => VARIANT_NAME_SK6812,
            Self::Apa106 => VARIANT_NAME_APA106,
            Self::Sm16703 => VARIANT_NAME_SM16703,
            Self::Pi33Tb => VARIANT_NAME_PI33TB,
        }
    }
}
