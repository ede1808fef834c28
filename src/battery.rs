//! Battery voltage monitoring.

use crate::time::{Interval, TimeDuration, TimeInstant, TimeSource};
use crate::types::{ConfigError, PeripheralError};

/// ADC reference voltage on the MagTag.
pub const ADC_REFERENCE_VOLTS: f32 = 2.6;

/// The battery is measured through a divide-by-two resistor divider.
pub const BATTERY_DIVIDER: f32 = 2.0;

/// Trait for abstracting a 16-bit analog input.
pub trait AnalogSensor {
    /// Reads the raw value, scaled to the full `u16` range.
    fn read_raw(&mut self) -> Result<u16, PeripheralError>;
}

/// Converts raw battery ADC readings into volts.
pub struct BatteryMonitor<S: AnalogSensor> {
    sensor: S,
}

impl<S: AnalogSensor> BatteryMonitor<S> {
    /// Wraps the battery sense input.
    pub fn new(sensor: S) -> Self {
        Self { sensor }
    }

    /// Reads the battery voltage.
    pub fn voltage(&mut self) -> Result<f32, PeripheralError> {
        let raw = self.sensor.read_raw()?;
        Ok(raw_to_volts(raw))
    }

    /// Releases the sensor.
    pub fn release(self) -> S {
        self.sensor
    }
}

/// Maps a raw reading onto the battery voltage.
#[inline]
pub fn raw_to_volts(raw: u16) -> f32 {
    (f32::from(raw) / 65535.0) * ADC_REFERENCE_VOLTS * BATTERY_DIVIDER
}

/// Reads the battery once per period.
///
/// Meant to be serviced from the poll loop hook; [`BatteryReporter::service`]
/// is cheap when the period has not elapsed.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `S` - Analog sensor implementation type
pub struct BatteryReporter<'t, I: TimeInstant, T: TimeSource<I>, S: AnalogSensor> {
    monitor: BatteryMonitor<S>,
    time_source: &'t T,
    interval: Interval<I>,
    last_voltage: Option<f32>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>, S: AnalogSensor> BatteryReporter<'t, I, T, S> {
    /// Creates a reporter firing every `period`.
    ///
    /// # Errors
    /// * `ZeroReportInterval` - `period` is zero
    pub fn new(
        monitor: BatteryMonitor<S>,
        time_source: &'t T,
        period: I::Duration,
    ) -> Result<Self, ConfigError> {
        if period.as_millis() == 0 {
            return Err(ConfigError::ZeroReportInterval);
        }

        let mut interval = Interval::new(period);
        interval.is_due(time_source.now());

        Ok(Self {
            monitor,
            time_source,
            interval,
            last_voltage: None,
        })
    }

    /// Returns a fresh voltage reading if the period has elapsed.
    pub fn service(&mut self) -> Result<Option<f32>, PeripheralError> {
        if !self.interval.is_due(self.time_source.now()) {
            return Ok(None);
        }

        let volts = self.monitor.voltage()?;
        self.last_voltage = Some(volts);

        #[cfg(feature = "defmt")]
        defmt::info!("Battery voltage: {} V", volts);

        Ok(Some(volts))
    }

    /// The most recent reading, if any.
    pub fn last_voltage(&self) -> Option<f32> {
        self.last_voltage
    }
}
