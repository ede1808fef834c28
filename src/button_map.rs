use crate::time::TimeDuration;
use crate::types::{ButtonBinding, ButtonId, ConfigError, Tone};
use heapless::Vec;
use palette::Srgb;

/// Indicator colors of the stock MagTag button map, A through D.
pub const MAGTAG_BUTTON_COLORS: [Srgb<u8>; 4] = [
    Srgb::new(255, 0, 0),
    Srgb::new(255, 150, 0),
    Srgb::new(0, 255, 255),
    Srgb::new(180, 0, 255),
];

/// Tone frequencies of the stock MagTag button map (C6, E6, G6, C7).
pub const MAGTAG_BUTTON_TONES_HZ: [u32; 4] = [1047, 1318, 1568, 2093];

/// Length of each stock button tone.
pub const MAGTAG_TONE_DURATION_MS: u64 = 250;

/// Per-button colors and tones, one binding for each of the `N` buttons.
///
/// Bindings are indexed by [`ButtonId`]; binding `i` belongs to button `i`.
/// A built map always holds exactly `N` bindings.
///
/// # Type Parameters
/// * `D` - The duration type used for tone lengths
/// * `N` - Number of buttons
#[derive(Debug, Clone)]
pub struct ButtonMap<D: TimeDuration, const N: usize> {
    bindings: [ButtonBinding<D>; N],
}

impl<D: TimeDuration, const N: usize> ButtonMap<D, N> {
    /// Creates a new button map builder.
    pub fn builder() -> ButtonMapBuilder<D, N> {
        ButtonMapBuilder::new()
    }

    /// Returns the binding for a button, if the id is in range.
    pub fn get(&self, id: ButtonId) -> Option<&ButtonBinding<D>> {
        self.bindings.get(id.0)
    }

    /// Returns all bindings in button order.
    pub fn bindings(&self) -> &[ButtonBinding<D>] {
        &self.bindings
    }

    /// Returns the number of bound buttons.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True only for a zero-button map.
    pub fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<D: TimeDuration> ButtonMap<D, 4> {
    /// The button map used by the MagTag demos: red, orange, cyan and purple
    /// with a rising C major arpeggio, 250 ms per tone.
    pub fn magtag() -> Self {
        let duration = D::from_millis(MAGTAG_TONE_DURATION_MS);
        Self {
            bindings: core::array::from_fn(|i| {
                ButtonBinding::new(
                    MAGTAG_BUTTON_COLORS[i],
                    Tone::new(MAGTAG_BUTTON_TONES_HZ[i], duration),
                )
            }),
        }
    }
}

/// Builder for constructing validated button maps.
#[derive(Debug)]
pub struct ButtonMapBuilder<D: TimeDuration, const N: usize> {
    bindings: Vec<ButtonBinding<D>, N>,
}

impl<D: TimeDuration, const N: usize> ButtonMapBuilder<D, N> {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds the next button, in button order.
    ///
    /// # Errors
    /// * `ZeroFrequency` - The tone frequency is zero
    /// * `CapacityExceeded` - All `N` buttons are already bound
    pub fn bind(mut self, color: Srgb<u8>, tone: Tone<D>) -> Result<Self, ConfigError> {
        if tone.frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }

        self.bindings
            .push(ButtonBinding::new(color, tone))
            .map_err(|_| ConfigError::CapacityExceeded)?;
        Ok(self)
    }

    /// Builds and validates the map.
    ///
    /// # Errors
    /// * `EmptyButtonMap` - No bindings were added
    /// * `MissingBinding` - Fewer than `N` bindings were added
    pub fn build(self) -> Result<ButtonMap<D, N>, ConfigError> {
        if self.bindings.is_empty() {
            return Err(ConfigError::EmptyButtonMap);
        }

        if self.bindings.len() < N {
            return Err(ConfigError::MissingBinding(ButtonId(self.bindings.len())));
        }

        Ok(ButtonMap {
            bindings: core::array::from_fn(|i| self.bindings[i]),
        })
    }
}

impl<D: TimeDuration, const N: usize> Default for ButtonMapBuilder<D, N> {
    fn default() -> Self {
        Self::new()
    }
}
