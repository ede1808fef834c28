#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ButtonPoller`**: Polls the buttons and drives the indicator and speaker from a single loop
//! - **`ButtonMap`**: One color and one tone per button, validated by `ButtonMapBuilder`
//! - **`IndicatorState`**: Whether the indicator is off, or lit for a given button and color
//! - **`Indicator`**: Trait to implement for your indicator light (or use `NeoPixels`)
//! - **`AudioOutput`**: Trait to implement for your tone output (or use `Speaker`)
//! - **`BatteryMonitor`** / **`BatteryReporter`**: Battery voltage, on demand or periodically
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Buttons are any `embedded_hal::digital::InputPin`, read active-low: a pin
//! that reads low is a held button. Colors are `Srgb<u8>`; brightness scaling
//! happens in the `NeoPixels` adapter, not in the button map.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod audio;
pub mod battery;
pub mod button_map;
pub mod indicator;
pub mod poller;
pub mod time;
pub mod types;

pub use audio::{AudioOutput, Speaker, SquareWaveTone, ToneGenerator};
pub use battery::{AnalogSensor, BatteryMonitor, BatteryReporter};
pub use button_map::{ButtonMap, ButtonMapBuilder};
pub use indicator::{DEFAULT_BRIGHTNESS, Indicator, MAGTAG_NEOPIXEL_COUNT, NeoPixels};
pub use poller::{ButtonPoller, DEFAULT_POLL_INTERVAL_MS, IndicatorState, PollOutcome};
pub use time::{Interval, TimeDuration, TimeInstant, TimeSource};
pub use types::{ButtonBinding, ButtonId, ConfigError, PeripheralError, Tone};

#[cfg(feature = "std")]
pub use time::StdTimeSource;

/// Number of user buttons on the MagTag (A-D).
pub const MAGTAG_BUTTON_COUNT: usize = 4;

pub const COLOR_OFF: Srgb<u8> = Srgb::new(0, 0, 0);
