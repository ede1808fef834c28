//! Audio capability: blocking tones through a gated speaker.

use crate::types::PeripheralError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Trait for abstracting a tone-capable audio output.
pub trait AudioOutput {
    /// Plays a tone and returns once it has finished.
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), PeripheralError>;
}

/// Trait for the raw tone source behind a speaker (PWM, DAC, bit-banged pin).
///
/// Implementations block for `duration_ms`. A frequency of zero is silence.
pub trait ToneGenerator {
    /// Generates a tone for the given duration.
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), PeripheralError>;
}

/// Speaker behind an amplifier enable line.
///
/// The amplifier is switched on (enable high) only while a tone plays, which
/// keeps the speaker from hissing between cues.
pub struct Speaker<T: ToneGenerator, E: OutputPin> {
    generator: T,
    enable: E,
}

impl<T: ToneGenerator, E: OutputPin> Speaker<T, E> {
    /// Wraps a tone generator and the amplifier enable pin.
    pub fn new(generator: T, enable: E) -> Self {
        Self { generator, enable }
    }

    /// Releases the generator and enable pin.
    pub fn release(self) -> (T, E) {
        (self.generator, self.enable)
    }
}

impl<T: ToneGenerator, E: OutputPin> AudioOutput for Speaker<T, E> {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), PeripheralError> {
        self.enable
            .set_high()
            .map_err(|_| PeripheralError::SpeakerEnable)?;

        let played = self.generator.tone(frequency_hz, duration_ms);

        // Amplifier goes off even when the tone failed; the tone error wins.
        let disabled = self
            .enable
            .set_low()
            .map_err(|_| PeripheralError::SpeakerEnable);

        played.and(disabled)
    }
}

/// Square wave on a plain GPIO pin, timed with a blocking delay.
///
/// Good enough for piezo beeps; pitch accuracy depends on the delay provider.
/// The half period is whole microseconds, so anything above 500 kHz plays at
/// 500 kHz. The cycle count is derived from that half period, which keeps the
/// tone within the requested duration. The pin is left low on return, on the
/// error path too when the pin still accepts writes.
pub struct SquareWaveTone<P: OutputPin, D: DelayNs> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> SquareWaveTone<P, D> {
    /// Creates a generator driving `pin`.
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Releases the pin and delay.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    fn cycle(&mut self, half_period_us: u32) -> Result<(), PeripheralError> {
        self.pin.set_high().map_err(|_| PeripheralError::ToneOutput)?;
        self.delay.delay_us(half_period_us);
        self.pin.set_low().map_err(|_| PeripheralError::ToneOutput)?;
        self.delay.delay_us(half_period_us);
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs> ToneGenerator for SquareWaveTone<P, D> {
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), PeripheralError> {
        if frequency_hz == 0 {
            self.delay.delay_ms(duration_ms);
            return Ok(());
        }

        let half_period_us = (500_000 / frequency_hz).max(1);
        let cycles = u64::from(duration_ms) * 1000 / (2 * u64::from(half_period_us));

        for _ in 0..cycles {
            if let Err(err) = self.cycle(half_period_us) {
                let _ = self.pin.set_low();
                return Err(err);
            }
        }

        Ok(())
    }
}
