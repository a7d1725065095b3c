//! Range-checked scalar values carried by light payloads.

use std::fmt;

use crate::convert::{scale_from_wire, scale_to_wire};
use crate::error::{FrameError, Result};

/// Hue in whole degrees, 0 to 360.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hue(u16);

impl Hue {
    pub const MIN: u16 = 0;
    pub const MAX: u16 = 360;

    pub fn new(degrees: u16) -> Result<Self> {
        if degrees > Self::MAX {
            return Err(out_of_range("hue", degrees, Self::MIN, Self::MAX));
        }
        Ok(Self(degrees))
    }

    pub fn degrees(self) -> u16 {
        self.0
    }

    pub fn to_wire(self) -> u16 {
        scale_to_wire(f64::from(self.0), f64::from(Self::MAX))
    }

    /// Nearest whole degree for a wire value.
    pub fn from_wire(wire: u16) -> Self {
        let degrees = scale_from_wire(wire, f64::from(Self::MAX)).round();
        Self(degrees as u16)
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fraction from 0.0 to 1.0, used for saturation and brightness.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Percentage(f64);

impl Percentage {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;

    pub fn new(value: f64) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(out_of_range("percentage", value, Self::MIN, Self::MAX));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn to_wire(self) -> u16 {
        scale_to_wire(self.0, Self::MAX)
    }

    pub fn from_wire(wire: u16) -> Self {
        Self(scale_from_wire(wire, Self::MAX))
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Color temperature in kelvin, 2500 to 9000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Temperature(u16);

impl Temperature {
    pub const MIN: u16 = 2500;
    pub const MAX: u16 = 9000;

    pub const ULTRA_WARM: Self = Self(2500);
    pub const INCANDESCENT: Self = Self(2750);
    pub const WARM: Self = Self(3000);
    pub const NEUTRAL_WARM: Self = Self(3200);
    pub const NEUTRAL: Self = Self(3500);
    pub const COOL: Self = Self(4000);
    pub const COOL_DAYLIGHT: Self = Self(4500);
    pub const SOFT_DAYLIGHT: Self = Self(5000);
    pub const DAYLIGHT: Self = Self(5500);
    pub const NOON_DAYLIGHT: Self = Self(6000);
    pub const BRIGHT_DAYLIGHT: Self = Self(6500);
    pub const CLOUDY_DAYLIGHT: Self = Self(7000);
    pub const BLUE_DAYLIGHT: Self = Self(7500);
    pub const BLUE_OVERCAST: Self = Self(8000);
    pub const BLUE_WATER: Self = Self(8500);
    pub const BLUE_ICE: Self = Self(9000);

    pub fn new(kelvin: u16) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&kelvin) {
            return Err(out_of_range("temperature", kelvin, Self::MIN, Self::MAX));
        }
        Ok(Self(kelvin))
    }

    pub fn kelvin(self) -> u16 {
        self.0
    }

    pub fn to_wire(self) -> u16 {
        self.0
    }

    /// Device-reported kelvin, clamped into the supported range.
    pub fn from_wire(wire: u16) -> Self {
        Self(wire.clamp(Self::MIN, Self::MAX))
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self::ULTRA_WARM
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

/// Device label; at most 32 bytes of UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Label(String);

impl Label {
    /// Size of the label field on the device.
    pub const MAX_LEN: usize = 32;

    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.len() > Self::MAX_LEN {
            return Err(FrameError::LabelTooLong {
                len: value.len(),
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Decode a fixed, NUL-padded label field.
    ///
    /// A multi-byte character cut off by the device is dropped rather than
    /// replaced, so the result always fits in [`Label::MAX_LEN`].
    pub fn from_wire(field: &[u8]) -> Self {
        let field = &field[..field.len().min(Self::MAX_LEN)];
        let text = match std::str::from_utf8(field) {
            Ok(text) => text,
            Err(err) => std::str::from_utf8(&field[..err.valid_up_to()]).unwrap_or_default(),
        };
        Self(text.trim_end_matches('\0').to_string())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Label {
    type Error = FrameError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

/// Hue and saturation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub hue: Hue,
    pub saturation: Percentage,
}

impl Color {
    /// Zero saturation; the light shows its white temperature.
    pub const WHITE: Self = Self {
        hue: Hue(0),
        saturation: Percentage(0.0),
    };

    pub fn new(hue: Hue, saturation: Percentage) -> Self {
        Self { hue, saturation }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[hue: {}; saturation: {}]", self.hue, self.saturation)
    }
}

/// Power level. The protocol only uses the two extremes of the 16-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Power {
    #[default]
    Off,
    On,
}

impl Power {
    pub fn to_wire(self) -> u16 {
        match self {
            Power::Off => 0,
            Power::On => u16::MAX,
        }
    }

    /// Any non-zero level reads as on.
    pub fn from_wire(wire: u16) -> Self {
        if wire == 0 {
            Power::Off
        } else {
            Power::On
        }
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Power::Off => f.write_str("off"),
            Power::On => f.write_str("on"),
        }
    }
}

/// Hardware product reported by a version probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Product {
    #[default]
    Unknown = 0,
    Original1000 = 1,
    Color650 = 3,
    White800LowVoltage = 10,
    White800HighVoltage = 11,
    White900Br30 = 18,
    Color1000Br30 = 20,
    Color1000 = 22,
    LifxPlusA19 = 29,
    LifxPlusBr30 = 30,
    LifxZ = 31,
}

impl Product {
    /// Map a product code; codes outside the catalogue become `Unknown`.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Product::Original1000,
            3 => Product::Color650,
            10 => Product::White800LowVoltage,
            11 => Product::White800HighVoltage,
            18 => Product::White900Br30,
            20 => Product::Color1000Br30,
            22 => Product::Color1000,
            29 => Product::LifxPlusA19,
            30 => Product::LifxPlusBr30,
            31 => Product::LifxZ,
            _ => Product::Unknown,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// White-only models reject hue and saturation. Unknown products are
    /// assumed to support color.
    pub fn supports_color(self) -> bool {
        !matches!(
            self,
            Product::White800LowVoltage | Product::White800HighVoltage | Product::White900Br30
        )
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn out_of_range<T: fmt::Display>(field: &'static str, value: T, min: T, max: T) -> FrameError {
    FrameError::OutOfRange {
        field,
        value: value.to_string(),
        min: min.to_string(),
        max: max.to_string(),
    }
}
