use thiserror::Error;

use crate::shared::color::Color;
use crate::shared::constants::{
    DEFAULT_BOX_COLOR, DEFAULT_MIN_NEIGHBORS, DEFAULT_SCALE_FACTOR,
};

#[derive(Error, Debug, PartialEq)]
pub enum ParamsError {
    #[error("scale factor must be in (1.0, 2.0], got {0}")]
    ScaleFactor(f64),
    #[error("min neighbors must be at least 1")]
    MinNeighbors,
}

/// Tunable knobs for one detection run.
///
/// Supplied once per run by the caller and immutable while the loop is
/// running; adjusting a knob means stopping and starting a new run.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionParams {
    pub scale_factor: f64,
    pub min_neighbors: u32,
    pub box_color: Color,
    pub save_on_detect: bool,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            box_color: DEFAULT_BOX_COLOR,
            save_on_detect: false,
        }
    }
}

impl DetectionParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.scale_factor > 1.0 && self.scale_factor <= 2.0) {
            return Err(ParamsError::ScaleFactor(self.scale_factor));
        }
        if self.min_neighbors < 1 {
            return Err(ParamsError::MinNeighbors);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_are_valid() {
        let params = DetectionParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.scale_factor, 1.3);
        assert_eq!(params.min_neighbors, 5);
        assert!(!params.save_on_detect);
    }

    #[rstest]
    #[case::just_above_one(1.01)]
    #[case::default(1.3)]
    #[case::upper_bound(2.0)]
    fn test_valid_scale_factors(#[case] scale_factor: f64) {
        let params = DetectionParams {
            scale_factor,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[rstest]
    #[case::exactly_one(1.0)]
    #[case::below_one(0.5)]
    #[case::above_upper_bound(2.01)]
    #[case::nan(f64::NAN)]
    fn test_invalid_scale_factors(#[case] scale_factor: f64) {
        let params = DetectionParams {
            scale_factor,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::ScaleFactor(_))
        ));
    }

    #[test]
    fn test_zero_min_neighbors_rejected() {
        let params = DetectionParams {
            min_neighbors: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::MinNeighbors));
    }

    #[test]
    fn test_one_min_neighbor_accepted() {
        let params = DetectionParams {
            min_neighbors: 1,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }
}
