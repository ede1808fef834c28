//! Core types for button maps and peripheral errors.

use crate::time::TimeDuration;
use palette::Srgb;

/// Position of a button in the poller's fixed, ordered button set.
///
/// Index 0 is the MagTag's button A, index 3 is button D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(pub usize);

impl ButtonId {
    /// Letter printed next to the button on the board (`'A'`, `'B'`, ...).
    pub fn label(&self) -> char {
        if self.0 < 26 {
            (b'A' + self.0 as u8) as char
        } else {
            '?'
        }
    }

    /// Zero-based index of the button.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ButtonId {
    fn from(index: usize) -> Self {
        ButtonId(index)
    }
}

impl From<ButtonId> for usize {
    fn from(id: ButtonId) -> Self {
        id.0
    }
}

impl core::fmt::Display for ButtonId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "button {}", self.label())
    }
}

/// An audio cue: a square-ish tone of a given pitch and length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone<D: TimeDuration> {
    /// Pitch in hertz.
    pub frequency_hz: u32,

    /// How long the tone plays.
    pub duration: D,
}

impl<D: TimeDuration> Tone<D> {
    /// Creates a new tone.
    #[inline]
    pub fn new(frequency_hz: u32, duration: D) -> Self {
        Self {
            frequency_hz,
            duration,
        }
    }

    /// Duration in milliseconds, saturated to `u32`.
    pub fn duration_ms(&self) -> u32 {
        u32::try_from(self.duration.as_millis()).unwrap_or(u32::MAX)
    }
}

/// What a single button does when it is held: light the indicator and beep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonBinding<D: TimeDuration> {
    /// Indicator color while the button is held.
    pub color: Srgb<u8>,

    /// Tone played on every poll that sees the button held.
    pub tone: Tone<D>,
}

impl<D: TimeDuration> ButtonBinding<D> {
    /// Creates a new binding.
    #[inline]
    pub fn new(color: Srgb<u8>, tone: Tone<D>) -> Self {
        Self { color, tone }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No bindings provided.
    EmptyButtonMap,

    /// Fewer bindings than buttons; the first unbound button is reported.
    MissingBinding(ButtonId),

    /// Button map capacity exceeded.
    CapacityExceeded,

    /// Tone with a frequency of zero.
    ZeroFrequency,

    /// Poll interval of zero would busy-spin.
    ZeroPollInterval,

    /// Brightness outside 0.0-1.0.
    BrightnessOutOfRange,

    /// Report period of zero.
    ZeroReportInterval,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyButtonMap => {
                write!(f, "button map must bind at least one button")
            }
            ConfigError::MissingBinding(id) => {
                write!(f, "button map has no binding for {}", id)
            }
            ConfigError::CapacityExceeded => {
                write!(f, "button map capacity exceeded")
            }
            ConfigError::ZeroFrequency => {
                write!(f, "tone frequency must be non-zero")
            }
            ConfigError::ZeroPollInterval => {
                write!(f, "poll interval must be non-zero")
            }
            ConfigError::BrightnessOutOfRange => {
                write!(f, "brightness must be within 0.0 and 1.0")
            }
            ConfigError::ZeroReportInterval => {
                write!(f, "report interval must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Faults reported by the hardware behind a capability.
///
/// Driver-specific error types are dropped at the seam; only the failing
/// capability is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralError {
    /// Reading a button pin failed.
    ButtonRead(ButtonId),

    /// Switching the NeoPixel power line failed.
    IndicatorPower,

    /// Writing colors to the NeoPixel strip failed.
    IndicatorWrite,

    /// Switching the speaker amplifier failed.
    SpeakerEnable,

    /// Driving the tone output failed.
    ToneOutput,

    /// Reading an analog sensor failed.
    SensorRead,
}

impl core::fmt::Display for PeripheralError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PeripheralError::ButtonRead(id) => write!(f, "failed to read {}", id),
            PeripheralError::IndicatorPower => write!(f, "failed to switch NeoPixel power"),
            PeripheralError::IndicatorWrite => write!(f, "failed to write NeoPixel colors"),
            PeripheralError::SpeakerEnable => write!(f, "failed to switch speaker amplifier"),
            PeripheralError::ToneOutput => write!(f, "failed to drive tone output"),
            PeripheralError::SensorRead => write!(f, "failed to read analog sensor"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PeripheralError {}
