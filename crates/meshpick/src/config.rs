//! Picker options.

use serde::{Deserialize, Serialize};

use crate::error::{PickError, Result};

/// Tunables for [`ObjectPicker`](crate::ObjectPicker).
///
/// Loadable from TOML; missing keys take their defaults.
///
/// ```toml
/// early_termination = true
/// max_distance = 250.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickOptions {
    /// Stop the narrow phase once the next candidate's bounds entry lies
    /// beyond the best confirmed hit.
    pub early_termination: bool,
    /// Ignore candidates whose bounds are entered beyond this ray parameter,
    /// and hits beyond it.
    pub max_distance: Option<f64>,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            early_termination: true,
            max_distance: None,
        }
    }
}

impl PickOptions {
    /// Parse and validate options from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let options: Self = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Check option ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(d) = self.max_distance {
            if !d.is_finite() || d <= 0.0 {
                return Err(PickError::InvalidOption {
                    name: "max_distance",
                    reason: format!("must be finite and positive, got {d}"),
                });
            }
        }
        Ok(())
    }

    /// The distance limit as a plain bound, infinite when unset.
    pub(crate) fn distance_limit(&self) -> f64 {
        self.max_distance.unwrap_or(f64::INFINITY)
    }
}
