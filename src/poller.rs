//! Button poll loop driving the indicator and speaker.
//!
//! Provides [`ButtonPoller`], which samples a fixed, ordered set of buttons on
//! every iteration. The lowest-index held button lights the indicator in its
//! color and plays its tone; with no button held the indicator is switched off.

use core::convert::Infallible;

use crate::audio::AudioOutput;
use crate::button_map::ButtonMap;
use crate::indicator::Indicator;
use crate::time::TimeDuration;
use crate::types::{ButtonId, ConfigError, PeripheralError};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use palette::Srgb;

/// Pause between poll iterations, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 10;

/// What the indicator is showing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorState {
    /// Indicator powered down.
    Off,
    /// Indicator lit for a held button.
    On {
        /// The button that lit it.
        button: ButtonId,
        /// The color it shows.
        color: Srgb<u8>,
    },
}

impl IndicatorState {
    /// Returns true if the indicator is lit.
    pub fn is_on(&self) -> bool {
        matches!(self, IndicatorState::On { .. })
    }

    /// Returns the button holding the indicator on, if any.
    pub fn button(&self) -> Option<ButtonId> {
        match self {
            IndicatorState::On { button, .. } => Some(*button),
            IndicatorState::Off => None,
        }
    }

    /// Returns the displayed color, if any.
    pub fn color(&self) -> Option<Srgb<u8>> {
        match self {
            IndicatorState::On { color, .. } => Some(*color),
            IndicatorState::Off => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IndicatorState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            IndicatorState::Off => defmt::write!(fmt, "Off"),
            IndicatorState::On { button, color } => defmt::write!(
                fmt,
                "On {{ button: {}, rgb: ({}, {}, {}) }}",
                button,
                color.red,
                color.green,
                color.blue
            ),
        }
    }
}

/// Result of a single poll iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// A button was held; its color is shown and its tone has played.
    Pressed(ButtonId),
    /// No button was held; the indicator is off.
    Idle,
}

/// Polls `N` active-low buttons and drives an indicator and audio output.
///
/// The poller owns every capability it touches, so the indicator state it
/// tracks is the only writer of the hardware. Tones block, which serializes
/// them with polling exactly like the MagTag demo loop.
///
/// # Type Parameters
/// * `B` - Button pin type
/// * `L` - Indicator implementation type
/// * `A` - Audio output implementation type
/// * `D` - Duration type of the tones in the button map
/// * `N` - Number of buttons
pub struct ButtonPoller<B, L, A, D, const N: usize>
where
    B: InputPin,
    L: Indicator,
    A: AudioOutput,
    D: TimeDuration,
{
    buttons: [B; N],
    indicator: L,
    audio: A,
    map: ButtonMap<D, N>,
    interval_ms: u32,
    state: IndicatorState,
    // False until the hardware has been written, and again after a failed write.
    synced: bool,
}

impl<B, L, A, D, const N: usize> ButtonPoller<B, L, A, D, N>
where
    B: InputPin,
    L: Indicator,
    A: AudioOutput,
    D: TimeDuration,
{
    /// Creates a poller with the indicator considered off.
    ///
    /// No hardware is touched until the first [`poll`](Self::poll).
    pub fn new(buttons: [B; N], indicator: L, audio: A, map: ButtonMap<D, N>) -> Self {
        Self {
            buttons,
            indicator,
            audio,
            map,
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            state: IndicatorState::Off,
            synced: false,
        }
    }

    /// Sets the pause between iterations of [`run`](Self::run).
    ///
    /// # Errors
    /// * `ZeroPollInterval` - `interval_ms` is zero
    pub fn with_interval_ms(mut self, interval_ms: u32) -> Result<Self, ConfigError> {
        if interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        self.interval_ms = interval_ms;
        Ok(self)
    }

    /// Returns the first held button in index order, without side effects.
    ///
    /// Stops reading at the first held button.
    pub fn scan(&mut self) -> Result<Option<ButtonId>, PeripheralError> {
        for (index, button) in self.buttons.iter_mut().enumerate() {
            let held = button
                .is_low()
                .map_err(|_| PeripheralError::ButtonRead(ButtonId(index)))?;
            if held {
                return Ok(Some(ButtonId(index)));
            }
        }
        Ok(None)
    }

    /// Runs one poll iteration.
    ///
    /// The held button with the lowest index lights the indicator in its color
    /// and plays its tone, blocking for the tone's duration. With no button
    /// held the indicator is switched off. The indicator is only rewritten
    /// when its state changes; the tone repeats on every iteration a button
    /// stays held.
    pub fn poll(&mut self) -> Result<PollOutcome, PeripheralError> {
        match self.scan()? {
            Some(button) => {
                let binding = self.map.bindings()[button.0];

                #[cfg(feature = "defmt")]
                defmt::info!("Button {} pressed", button.label());

                self.show(button, binding.color)?;
                self.audio
                    .play_tone(binding.tone.frequency_hz, binding.tone.duration_ms())?;
                Ok(PollOutcome::Pressed(button))
            }
            None => {
                self.hide()?;
                Ok(PollOutcome::Idle)
            }
        }
    }

    /// Polls forever, sleeping the configured interval between iterations.
    ///
    /// Only returns when a capability fails.
    pub fn run<T: DelayNs>(&mut self, delay: &mut T) -> Result<Infallible, PeripheralError> {
        self.run_with(delay, |_| Ok(()))
    }

    /// Polls forever, calling `hook` after each iteration and before sleeping.
    ///
    /// Use the hook for periodic side work such as battery reports. An error
    /// from the hook ends the loop like any capability error.
    pub fn run_with<T, F>(
        &mut self,
        delay: &mut T,
        mut hook: F,
    ) -> Result<Infallible, PeripheralError>
    where
        T: DelayNs,
        F: FnMut(PollOutcome) -> Result<(), PeripheralError>,
    {
        loop {
            let outcome = self.poll()?;
            hook(outcome)?;
            delay.delay_ms(self.interval_ms);
        }
    }

    fn show(&mut self, button: ButtonId, color: Srgb<u8>) -> Result<(), PeripheralError> {
        let next = IndicatorState::On { button, color };
        if self.synced && self.state == next {
            return Ok(());
        }

        let power_on = !self.synced || !self.state.is_on();
        // Hardware no longer matches `state` until both writes succeed.
        self.synced = false;
        if power_on {
            self.indicator.set_enabled(true)?;
        }
        self.indicator.fill(color)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Indicator {} -> {}", self.state, next);

        self.state = next;
        self.synced = true;
        Ok(())
    }

    fn hide(&mut self) -> Result<(), PeripheralError> {
        if self.synced && self.state == IndicatorState::Off {
            return Ok(());
        }

        self.synced = false;
        self.indicator.set_enabled(false)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Indicator {} -> Off", self.state);

        self.state = IndicatorState::Off;
        self.synced = true;
        Ok(())
    }

    /// Returns what the indicator is showing.
    pub fn indicator_state(&self) -> IndicatorState {
        self.state
    }

    /// Returns the pause between iterations of [`run`](Self::run).
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Returns the button map.
    pub fn button_map(&self) -> &ButtonMap<D, N> {
        &self.map
    }

    /// Returns the indicator.
    pub fn indicator(&self) -> &L {
        &self.indicator
    }

    /// Returns the audio output.
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Releases the buttons, indicator and audio output.
    pub fn release(self) -> ([B; N], L, A) {
        (self.buttons, self.indicator, self.audio)
    }
}
