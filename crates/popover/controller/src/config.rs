//! Page-wide popover defaults.
//!
//! Values can be given programmatically or read from the environment; per
//! popover [`PopoverOptions`](crate::PopoverOptions) override them.

use core::time::Duration;
use std::env;

/// Exit transition length when nothing else is configured.
pub const DEFAULT_TRANSITION_MS: u64 = 200;

/// Stacking order of the portal container when nothing else is configured.
pub const DEFAULT_Z_INDEX: i32 = 800;

/// Layout regions padded while scrolling is locked.
pub const DEFAULT_PADDING_SELECTORS: [&str; 3] = [".page-header", ".page-content", ".page-footer"];

/// Defaults shared by every popover on a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopoverConfig {
    /// Fade duration in milliseconds
    pub transition_duration_ms: u64,
    /// z-index of the portal container
    pub z_index: i32,
    /// Selectors of the regions that receive scrollbar padding compensation
    pub padding_selectors: Vec<String>,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_TRANSITION_MS,
            DEFAULT_Z_INDEX,
            DEFAULT_PADDING_SELECTORS
                .iter()
                .map(|selector| (*selector).to_owned())
                .collect(),
        )
    }
}

impl PopoverConfig {
    /// Construct a config with explicit values.
    #[inline]
    #[must_use]
    pub const fn new(transition_duration_ms: u64, z_index: i32, padding_selectors: Vec<String>) -> Self {
        Self {
            transition_duration_ms,
            z_index,
            padding_selectors,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `POPOVER_TRANSITION_MS`: fade duration in milliseconds (default: 200)
    /// - `POPOVER_Z_INDEX`: portal z-index (default: 800)
    /// - `POPOVER_PADDING_SELECTORS`: comma separated selectors
    ///   (default: `.page-header,.page-content,.page-footer`)
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset or unparsable
    /// values fall back to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let transition_duration_ms = lookup("POPOVER_TRANSITION_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(defaults.transition_duration_ms);
        let z_index = lookup("POPOVER_Z_INDEX")
            .and_then(|val| val.trim().parse::<i32>().ok())
            .unwrap_or(defaults.z_index);
        let padding_selectors = lookup("POPOVER_PADDING_SELECTORS")
            .map(|val| {
                val.split(',')
                    .map(str::trim)
                    .filter(|selector| !selector.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or(defaults.padding_selectors);
        Self {
            transition_duration_ms,
            z_index,
            padding_selectors,
        }
    }

    /// The fade duration as a `Duration`.
    #[inline]
    #[must_use]
    pub const fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }
}
