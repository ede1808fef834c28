//! Shared test infrastructure for magtag-peripherals integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use magtag_peripherals::{
    AnalogSensor, AudioOutput, Indicator, PeripheralError, Srgb, TimeDuration, TimeInstant,
    TimeSource, ToneGenerator,
};
use smart_leds_trait::{RGB8, SmartLedsWrite};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }
}

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Pins
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Button levels shared with the pins handed to a poller
pub struct ButtonBank<const N: usize> {
    pressed: [Cell<bool>; N],
    faulty: [Cell<bool>; N],
    reads: [Cell<u32>; N],
}

impl<const N: usize> ButtonBank<N> {
    pub fn new() -> Self {
        Self {
            pressed: core::array::from_fn(|_| Cell::new(false)),
            faulty: core::array::from_fn(|_| Cell::new(false)),
            reads: core::array::from_fn(|_| Cell::new(0)),
        }
    }

    /// Pins reading this bank; pressed buttons read low.
    pub fn buttons(&self) -> [MockButton<'_>; N] {
        core::array::from_fn(|i| MockButton {
            pressed: &self.pressed[i],
            faulty: &self.faulty[i],
            reads: &self.reads[i],
        })
    }

    pub fn set(&self, pressed: [bool; N]) {
        for (cell, value) in self.pressed.iter().zip(pressed) {
            cell.set(value);
        }
    }

    pub fn press(&self, index: usize) {
        self.pressed[index].set(true);
    }

    pub fn release(&self, index: usize) {
        self.pressed[index].set(false);
    }

    pub fn release_all(&self) {
        self.set([false; N]);
    }

    pub fn fail(&self, index: usize) {
        self.faulty[index].set(true);
    }

    pub fn reads(&self, index: usize) -> u32 {
        self.reads[index].get()
    }
}

/// Active-low button pin backed by a [`ButtonBank`]
pub struct MockButton<'a> {
    pressed: &'a Cell<bool>,
    faulty: &'a Cell<bool>,
    reads: &'a Cell<u32>,
}

impl ErrorType for MockButton<'_> {
    type Error = MockPinError;
}

impl InputPin for MockButton<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.reads.set(self.reads.get() + 1);
        if self.faulty.get() {
            return Err(MockPinError);
        }
        Ok(!self.pressed.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Output pin that records every level written to it
pub struct MockOutputPin {
    high: Option<bool>,
    history: heapless::Vec<bool, 64>,
    writes: usize,
    pub fail_next: bool,
    /// Fails the write with this zero-based index, once
    pub fail_at: Option<usize>,
}

impl MockOutputPin {
    pub fn new() -> Self {
        Self {
            high: None,
            history: heapless::Vec::new(),
            writes: 0,
            fail_next: false,
            fail_at: None,
        }
    }

    /// Current level, `None` if never driven
    pub fn is_high(&self) -> Option<bool> {
        self.high
    }

    pub fn history(&self) -> &[bool] {
        &self.history
    }

    fn drive(&mut self, high: bool) -> Result<(), MockPinError> {
        let index = self.writes;
        self.writes += 1;
        if self.fail_next {
            self.fail_next = false;
            return Err(MockPinError);
        }
        if self.fail_at == Some(index) {
            self.fail_at = None;
            return Err(MockPinError);
        }
        self.high = Some(high);
        let _ = self.history.push(high);
        Ok(())
    }
}

impl ErrorType for MockOutputPin {
    type Error = MockPinError;
}

impl OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that records requested time instead of sleeping
pub struct MockDelay {
    pub total_ns: u64,
    pub ms_calls: heapless::Vec<u32, 64>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            total_ns: 0,
            ms_calls: heapless::Vec::new(),
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        let _ = self.ms_calls.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

// ============================================================================
// Mock Capabilities
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorEvent {
    Enabled(bool),
    Fill(Srgb<u8>),
}

/// Indicator that records every call for testing
pub struct MockIndicator {
    pub enabled: Option<bool>,
    pub color: Option<Srgb<u8>>,
    events: heapless::Vec<IndicatorEvent, 64>,
    pub fail_next_enable: bool,
    pub fail_next_fill: bool,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self {
            enabled: None,
            color: None,
            events: heapless::Vec::new(),
            fail_next_enable: false,
            fail_next_fill: false,
        }
    }

    pub fn events(&self) -> &[IndicatorEvent] {
        &self.events
    }

    pub fn fill_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, IndicatorEvent::Fill(_)))
            .count()
    }
}

impl Indicator for MockIndicator {
    fn set_enabled(&mut self, enabled: bool) -> Result<(), PeripheralError> {
        if self.fail_next_enable {
            self.fail_next_enable = false;
            return Err(PeripheralError::IndicatorPower);
        }
        self.enabled = Some(enabled);
        let _ = self.events.push(IndicatorEvent::Enabled(enabled));
        Ok(())
    }

    fn fill(&mut self, color: Srgb<u8>) -> Result<(), PeripheralError> {
        if self.fail_next_fill {
            self.fail_next_fill = false;
            return Err(PeripheralError::IndicatorWrite);
        }
        self.color = Some(color);
        let _ = self.events.push(IndicatorEvent::Fill(color));
        Ok(())
    }
}

/// Audio output that records (frequency, duration) pairs
pub struct MockAudio {
    tones: heapless::Vec<(u32, u32), 64>,
    pub fail_next: bool,
}

impl MockAudio {
    pub fn new() -> Self {
        Self {
            tones: heapless::Vec::new(),
            fail_next: false,
        }
    }

    pub fn tones(&self) -> &[(u32, u32)] {
        &self.tones
    }

    pub fn last_tone(&self) -> Option<(u32, u32)> {
        self.tones.last().copied()
    }
}

impl AudioOutput for MockAudio {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), PeripheralError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(PeripheralError::ToneOutput);
        }
        let _ = self.tones.push((frequency_hz, duration_ms));
        Ok(())
    }
}

/// Tone generator that records requests instead of making noise
pub struct MockToneGenerator {
    tones: heapless::Vec<(u32, u32), 16>,
    pub fail_next: bool,
}

impl MockToneGenerator {
    pub fn new() -> Self {
        Self {
            tones: heapless::Vec::new(),
            fail_next: false,
        }
    }

    pub fn tones(&self) -> &[(u32, u32)] {
        &self.tones
    }
}

impl ToneGenerator for MockToneGenerator {
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), PeripheralError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(PeripheralError::ToneOutput);
        }
        let _ = self.tones.push((frequency_hz, duration_ms));
        Ok(())
    }
}

/// NeoPixel strip that keeps the last frame written
pub struct MockStrip {
    frame: heapless::Vec<RGB8, 16>,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl MockStrip {
    pub fn new() -> Self {
        Self {
            frame: heapless::Vec::new(),
            write_count: 0,
            fail_next_write: false,
        }
    }

    pub fn frame(&self) -> &[RGB8] {
        &self.frame
    }
}

impl SmartLedsWrite for MockStrip {
    type Error = MockPinError;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(MockPinError);
        }
        self.frame.clear();
        for pixel in iterator {
            let _ = self.frame.push(pixel.into());
        }
        self.write_count += 1;
        Ok(())
    }
}

/// Analog input returning a settable raw value
pub struct MockSensor {
    pub raw: u16,
    pub reads: u32,
    pub fail_next: bool,
}

impl MockSensor {
    pub fn new(raw: u16) -> Self {
        Self {
            raw,
            reads: 0,
            fail_next: false,
        }
    }
}

impl AnalogSensor for MockSensor {
    fn read_raw(&mut self) -> Result<u16, PeripheralError> {
        self.reads += 1;
        if self.fail_next {
            self.fail_next = false;
            return Err(PeripheralError::SensorRead);
        }
        Ok(self.raw)
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub const RED: Srgb<u8> = Srgb::new(255, 0, 0);
pub const GREEN: Srgb<u8> = Srgb::new(0, 255, 0);
pub const BLUE: Srgb<u8> = Srgb::new(0, 0, 255);
pub const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);
