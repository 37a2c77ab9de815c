use std::path::PathBuf;

use anyhow::{Result, ensure};

use crate::viewport::ZoomBounds;

/// Start-up settings of the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub diagram: PathBuf,
    /// Derived from the diagram's edges when absent.
    pub reachability: Option<PathBuf>,
    pub export_reachability: Option<PathBuf>,
    pub zoom_bounds: ZoomBounds,
    pub animate: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            diagram: PathBuf::from("dot.svg"),
            reachability: None,
            export_reachability: None,
            zoom_bounds: ZoomBounds::default(),
            animate: false,
        }
    }
}

impl ViewerConfig {
    /// The load-time view has a zoom factor of 1, so the bounds must include it.
    pub fn validate(self) -> Result<Self> {
        let ZoomBounds { min, max } = self.zoom_bounds;
        ensure!(
            min.is_finite() && max.is_finite() && min > 0.0,
            "zoom bounds must be positive and finite (got {min}..{max})"
        );
        ensure!(
            min <= 1.0 && 1.0 <= max,
            "zoom bounds {min}..{max} must include the initial zoom of 1"
        );
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ViewerConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case(0.0, 8.0)]
    #[case(-1.0, 8.0)]
    #[case(0.5, f64::INFINITY)]
    #[case(1.5, 8.0)]
    #[case(0.5, 0.9)]
    fn rejects_bad_bounds(#[case] min: f64, #[case] max: f64) {
        let config = ViewerConfig {
            zoom_bounds: ZoomBounds::new(min, max),
            ..ViewerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
