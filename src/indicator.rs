//! Indicator capability and the MagTag NeoPixel adapter.
//!
//! The poll loop only needs to switch the indicator on or off and paint it a
//! single color; [`Indicator`] is that seam. [`NeoPixels`] implements it for
//! the MagTag's four-pixel strip, which sits behind an active-low power line.

use crate::types::{ConfigError, PeripheralError};
use embedded_hal::digital::OutputPin;
use palette::Srgb;
use smart_leds_trait::{RGB8, SmartLedsWrite};

/// Number of NeoPixels along the MagTag's top edge.
pub const MAGTAG_NEOPIXEL_COUNT: usize = 4;

/// Brightness the MagTag library drives its NeoPixels at.
pub const DEFAULT_BRIGHTNESS: f32 = 0.3;

/// Trait for abstracting a multi-color indicator light.
pub trait Indicator {
    /// Powers the indicator on or off.
    fn set_enabled(&mut self, enabled: bool) -> Result<(), PeripheralError>;

    /// Paints the whole indicator one color.
    fn fill(&mut self, color: Srgb<u8>) -> Result<(), PeripheralError>;
}

/// A strip of `COUNT` NeoPixels with a switchable power rail.
///
/// The power pin is active-low: driving it low powers the strip, driving it
/// high cuts power (`neopixel_disable = True` on the MagTag).
pub struct NeoPixels<S, P, const COUNT: usize>
where
    S: SmartLedsWrite<Color = RGB8>,
    P: OutputPin,
{
    strip: S,
    power: P,
    brightness: f32,
}

impl<S, P, const COUNT: usize> NeoPixels<S, P, COUNT>
where
    S: SmartLedsWrite<Color = RGB8>,
    P: OutputPin,
{
    /// Wraps a strip and its power pin at [`DEFAULT_BRIGHTNESS`].
    ///
    /// The power pin is left as configured by the caller.
    pub fn new(strip: S, power: P) -> Self {
        Self {
            strip,
            power,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    /// Sets the global brightness applied to every fill.
    ///
    /// # Errors
    /// * `BrightnessOutOfRange` - Value is not within 0.0-1.0 (NaN included)
    pub fn set_brightness(&mut self, brightness: f32) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&brightness) {
            return Err(ConfigError::BrightnessOutOfRange);
        }
        self.brightness = brightness;
        Ok(())
    }

    /// Returns the current brightness.
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Number of pixels written by each fill.
    pub fn len(&self) -> usize {
        COUNT
    }

    /// True for a zero-length strip.
    pub fn is_empty(&self) -> bool {
        COUNT == 0
    }

    /// Scales a color by the current brightness.
    pub fn scale(&self, color: Srgb<u8>) -> RGB8 {
        let linear: Srgb<f32> = color.into_format();
        let dimmed: Srgb<u8> = Srgb::new(
            linear.red * self.brightness,
            linear.green * self.brightness,
            linear.blue * self.brightness,
        )
        .into_format();
        RGB8::new(dimmed.red, dimmed.green, dimmed.blue)
    }

    /// Releases the strip and power pin.
    pub fn release(self) -> (S, P) {
        (self.strip, self.power)
    }
}

impl<S, P, const COUNT: usize> Indicator for NeoPixels<S, P, COUNT>
where
    S: SmartLedsWrite<Color = RGB8>,
    P: OutputPin,
{
    fn set_enabled(&mut self, enabled: bool) -> Result<(), PeripheralError> {
        let result = if enabled {
            self.power.set_low()
        } else {
            self.power.set_high()
        };
        result.map_err(|_| PeripheralError::IndicatorPower)
    }

    fn fill(&mut self, color: Srgb<u8>) -> Result<(), PeripheralError> {
        let pixel = self.scale(color);
        self.strip
            .write(core::iter::repeat_n(pixel, COUNT))
            .map_err(|_| PeripheralError::IndicatorWrite)
    }
}
