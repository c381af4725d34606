use uom::si::{f64::Ratio, ratio::percent};

use crate::support::hx::NtuSearchConfig;

/// Configuration shared by the rating methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingConfig {
    /// Largest disagreement tolerated between a redundant supplied value and
    /// the resolved operating point, relative to the resolved duty.
    pub consistency_tolerance: Ratio,

    /// Search used when an effectiveness must be inverted numerically.
    pub ntu_search: NtuSearchConfig,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            consistency_tolerance: Ratio::new::<percent>(1.0),
            ntu_search: NtuSearchConfig::default(),
        }
    }
}
