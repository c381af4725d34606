use std::cmp::Ordering;

use crate::support::constraint::{Constrained, ConstraintError, StrictlyPositive};
use uom::{ConstZero, si::f64::Power};

/// Heat crossing into or out of one stream of an exchanger.
///
/// The hot stream of a rated exchanger reports [`HeatFlow::Out`], the cold
/// stream [`HeatFlow::In`], and both report [`HeatFlow::None`] when nothing is
/// transferred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatFlow {
    /// The stream gains heat.
    In(Constrained<Power, StrictlyPositive>),
    /// The stream loses heat.
    Out(Constrained<Power, StrictlyPositive>),
    /// No heat is transferred.
    None,
}

impl HeatFlow {
    /// Heat gained at `heat_rate`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `heat_rate` is not strictly positive.
    pub fn incoming(heat_rate: Power) -> Result<Self, ConstraintError> {
        Ok(Self::In(Constrained::new(heat_rate)?))
    }

    /// Heat lost at `heat_rate`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `heat_rate` is not strictly positive.
    pub fn outgoing(heat_rate: Power) -> Result<Self, ConstraintError> {
        Ok(Self::Out(Constrained::new(heat_rate)?))
    }

    /// Classify a heat rate that is positive into the stream.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::NotANumber`] for `NaN`.
    pub fn from_signed(heat_rate: Power) -> Result<Self, ConstraintError> {
        match heat_rate.partial_cmp(&Power::ZERO) {
            Some(Ordering::Greater) => Self::incoming(heat_rate),
            Some(Ordering::Less) => Self::outgoing(-heat_rate),
            Some(Ordering::Equal) => Ok(Self::None),
            None => Err(ConstraintError::NotANumber),
        }
    }

    /// Heat rate into the stream, negative when the stream loses heat.
    #[must_use]
    pub fn signed(&self) -> Power {
        match self {
            Self::In(heat_rate) => heat_rate.into_inner(),
            Self::Out(heat_rate) => -heat_rate.into_inner(),
            Self::None => Power::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::power::watt;

    use super::*;

    #[test]
    fn sign_selects_direction() -> Result<(), ConstraintError> {
        let gained = HeatFlow::from_signed(Power::new::<watt>(192_850.0))?;
        let lost = HeatFlow::from_signed(Power::new::<watt>(-192_850.0))?;

        assert!(matches!(gained, HeatFlow::In(_)));
        assert!(matches!(lost, HeatFlow::Out(_)));
        assert_relative_eq!(lost.signed().get::<watt>(), -192_850.0);
        assert_eq!(HeatFlow::from_signed(Power::ZERO)?, HeatFlow::None);
        Ok(())
    }

    #[test]
    fn magnitudes_must_be_positive() {
        assert_eq!(
            HeatFlow::outgoing(Power::ZERO),
            Err(ConstraintError::Zero)
        );
        assert_eq!(
            HeatFlow::incoming(Power::new::<watt>(-1.0)),
            Err(ConstraintError::Negative)
        );
        assert_eq!(
            HeatFlow::from_signed(Power::new::<watt>(f64::NAN)),
            Err(ConstraintError::NotANumber)
        );
    }
}
