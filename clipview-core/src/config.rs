/// Tunable parameters for clipping and scaling
use crate::error::{ClipViewError, Result};

/// Parameters for the clip range controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipConfig {
    /// Padding added on each side of the mesh extent, in mesh units.
    pub epsilon: f64,

    /// Smallest allowed gap between the min and max field of an axis.
    pub min_separation: f64,

    /// Number of steps on the range slider (its maximum position).
    pub slider_steps: u32,

    /// Resolution the extent is snapped outward to before padding.
    pub snap_resolution: f64,

    /// Whether every intermediate bounds change recomputes the clip.
    pub live_update: bool,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            min_separation: 0.1,
            slider_steps: 100,
            snap_resolution: 0.01,
            live_update: false,
        }
    }
}

impl ClipConfig {
    /// Set the extent padding.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the minimum field separation.
    #[must_use]
    pub const fn with_min_separation(mut self, separation: f64) -> Self {
        self.min_separation = separation;
        self
    }

    /// Start with live updates on or off.
    #[must_use]
    pub const fn with_live_update(mut self, live: bool) -> Self {
        self.live_update = live;
        self
    }

    /// Check the parameters are usable.
    ///
    /// The padded range of a degenerate axis is `2 * epsilon` wide, so it
    /// must still fit one minimum separation.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.0) {
            return Err(ClipViewError::InvalidConfig {
                field: "epsilon",
                value: self.epsilon,
                reason: "must be > 0",
            });
        }
        if !(self.min_separation > 0.0) {
            return Err(ClipViewError::InvalidConfig {
                field: "min_separation",
                value: self.min_separation,
                reason: "must be > 0",
            });
        }
        if 2.0 * self.epsilon < self.min_separation {
            return Err(ClipViewError::InvalidConfig {
                field: "epsilon",
                value: self.epsilon,
                reason: "must be at least half of min_separation",
            });
        }
        if self.slider_steps < 2 {
            return Err(ClipViewError::InvalidConfig {
                field: "slider_steps",
                value: f64::from(self.slider_steps),
                reason: "must be >= 2",
            });
        }
        if !(self.snap_resolution > 0.0) {
            return Err(ClipViewError::InvalidConfig {
                field: "snap_resolution",
                value: self.snap_resolution,
                reason: "must be > 0",
            });
        }
        Ok(())
    }
}

/// Parameters for the per-axis scale controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConfig {
    /// Smallest scale factor.
    pub min: f64,

    /// Largest scale factor.
    pub max: f64,

    /// Factor restored on reset.
    pub default: f64,

    /// Slider positions per unit of scale (slider = factor * this).
    pub slider_per_unit: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 10.0,
            default: 1.0,
            slider_per_unit: 10.0,
        }
    }
}

impl ScaleConfig {
    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.min > 0.0) {
            return Err(ClipViewError::InvalidConfig {
                field: "min",
                value: self.min,
                reason: "must be > 0",
            });
        }
        if !(self.min < self.max) {
            return Err(ClipViewError::InvalidConfig {
                field: "max",
                value: self.max,
                reason: "must be greater than min",
            });
        }
        if self.default < self.min || self.default > self.max {
            return Err(ClipViewError::InvalidConfig {
                field: "default",
                value: self.default,
                reason: "must lie within [min, max]",
            });
        }
        if !(self.slider_per_unit > 0.0) {
            return Err(ClipViewError::InvalidConfig {
                field: "slider_per_unit",
                value: self.slider_per_unit,
                reason: "must be > 0",
            });
        }
        Ok(())
    }

    /// Clamp a factor into `[min, max]`. NaN falls back to the default.
    pub fn clamp(&self, factor: f64) -> f64 {
        if factor.is_nan() {
            return self.default;
        }
        factor.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_are_valid() {
        assert!(ClipConfig::default().validate().is_ok());
        assert!(ScaleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_epsilon_must_cover_separation() {
        let config = ClipConfig::default().with_epsilon(0.01);
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ClipViewError::InvalidConfig {
                field: "epsilon",
                ..
            }
        ));
    }

    #[test]
    fn test_separation_wider_than_padding_rejected() {
        let err = ClipConfig::default()
            .with_min_separation(0.5)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ClipViewError::InvalidConfig {
                field: "epsilon",
                ..
            }
        ));
        assert!(ClipConfig::default()
            .with_min_separation(0.2)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_nan_epsilon_rejected() {
        assert!(ClipConfig::default().with_epsilon(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_scale_clamp() {
        let config = ScaleConfig::default();
        assert!((config.clamp(0.0) - 0.1).abs() < 1e-12);
        assert!((config.clamp(42.0) - 10.0).abs() < 1e-12);
        assert!((config.clamp(f64::NAN) - 1.0).abs() < 1e-12);
        assert!((config.clamp(2.5) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_scale_default_outside_range_rejected() {
        let config = ScaleConfig {
            default: 20.0,
            ..ScaleConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
