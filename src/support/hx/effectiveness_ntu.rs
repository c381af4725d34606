use std::{fmt::Display, ops::Deref};

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative, UnitInterval};
use uom::si::{
    f64::{Ratio, ThermalConductance},
    ratio::ratio,
};

use super::{CapacitanceRate, CapacityRatio, HxError, NtuSearchConfig};

/// Trait for computing heat exchanger effectiveness from NTU.
pub trait EffectivenessRelation {
    /// Calculate the effectiveness for an arrangement given the [NTU](Ntu) and
    /// [capacity ratio](CapacityRatio).
    fn effectiveness(&self, ntu: Ntu, capacity_ratio: CapacityRatio) -> Effectiveness;
}

/// Trait for computing NTU from heat exchanger effectiveness.
pub trait NtuRelation {
    /// Calculate the [NTU](Ntu) for an arrangement given the
    /// [effectiveness](Effectiveness) and [capacity ratio](CapacityRatio),
    /// using `search` wherever the relation has no closed-form inverse.
    ///
    /// # Errors
    ///
    /// Returns [`HxError::DomainViolation`] when the effectiveness is at or
    /// above the maximum the arrangement can reach, and
    /// [`HxError::Convergence`] when a numeric inversion does not converge.
    fn ntu_with_search(
        &self,
        effectiveness: Effectiveness,
        capacity_ratio: CapacityRatio,
        search: &NtuSearchConfig,
    ) -> Result<Ntu, HxError>;

    /// Calculate the [NTU](Ntu) with the default [`NtuSearchConfig`].
    ///
    /// # Errors
    ///
    /// See [`NtuRelation::ntu_with_search`].
    fn ntu(
        &self,
        effectiveness: Effectiveness,
        capacity_ratio: CapacityRatio,
    ) -> Result<Ntu, HxError> {
        self.ntu_with_search(effectiveness, capacity_ratio, &NtuSearchConfig::default())
    }
}

/// The effectiveness of a heat exchanger.
///
/// The effectiveness is the ratio of the actual amount of heat transferred to
/// the maximum possible amount of heat transferred in the heat exchanger.
/// Temperature effectiveness (P) uses the same type, referenced to one stream's
/// capacitance rate instead of the minimum one.
///
/// The effectiveness must be in the interval [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Effectiveness(Constrained<Ratio, UnitInterval>);

impl Effectiveness {
    /// Create an [`Effectiveness`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside the interval [0, 1].
    pub fn new(value: f64) -> ConstraintResult<Self> {
        let quantity = Ratio::new::<ratio>(value);
        Self::from_quantity(quantity)
    }

    /// Create an [`Effectiveness`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity lies outside the interval [0, 1].
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(quantity)?))
    }

    /// Clamp a raw relation value into [0, 1].
    ///
    /// Closed forms can land a few ulps outside the interval near their limits.
    pub(crate) fn from_raw(value: f64) -> ConstraintResult<Self> {
        Self::new(if value.is_nan() { value } else { value.clamp(0., 1.) })
    }
}

impl Deref for Effectiveness {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// The number of transfer units for a heat exchanger.
///
/// The number of transfer units represents the dimensionless size of a heat
/// exchanger.
///
/// The number of transfer units must be >= 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ntu(Constrained<Ratio, NonNegative>);

impl Ntu {
    /// Create an [`Ntu`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        let quantity = Ratio::new::<ratio>(value);
        Self::from_quantity(quantity)
    }

    /// Create an [`Ntu`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is negative.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(quantity)?))
    }

    /// Create an [`Ntu`] from a heat exchanger conductance and
    /// [capacitance rates](CapacitanceRate).
    ///
    /// The [capacitance rates](CapacitanceRate) of both streams are required so
    /// that the minimum of the two can be used in the calculation.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the resulting NTU would be negative (for example, when
    /// `ua` is negative).
    pub fn from_conductance_and_capacitance_rates(
        ua: ThermalConductance,
        capacitance_rates: [CapacitanceRate; 2],
    ) -> ConstraintResult<Self> {
        Self::from_quantity(ua / capacitance_rates[0].min(*capacitance_rates[1]))
    }

    /// Create an [`Ntu`] referenced to a single stream, `NTU = UA / C`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `ua` is negative or not a number.
    pub fn from_conductance_and_capacitance_rate(
        ua: ThermalConductance,
        capacitance_rate: CapacitanceRate,
    ) -> ConstraintResult<Self> {
        Self::from_quantity(ua / *capacitance_rate)
    }
}

impl Deref for Ntu {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[inline]
pub(crate) fn effectiveness_via(
    ntu: Ntu,
    capacity_ratio: CapacityRatio,
    fn_raw: impl Fn(f64, f64) -> f64,
) -> Effectiveness {
    let cr = capacity_ratio.get::<ratio>();
    let ntu = ntu.get::<ratio>();
    let raw = if cr == 0.0 {
        -(-ntu).exp_m1()
    } else {
        fn_raw(ntu, cr)
    };
    Effectiveness::from_raw(raw).expect("ntu should always yield valid effectiveness")
}

/// Invert a relation after checking the effectiveness against the
/// arrangement's maximum for the capacity ratio.
///
/// A zero effectiveness always maps to zero NTU, and the `Cr = 0` limit is
/// shared by every arrangement.
#[inline]
pub(crate) fn ntu_via(
    arrangement: &impl Display,
    effectiveness: Effectiveness,
    capacity_ratio: CapacityRatio,
    maximum: impl Fn(f64) -> f64,
    fn_raw: impl Fn(f64, f64) -> Result<f64, HxError>,
) -> Result<Ntu, HxError> {
    let cr = capacity_ratio.get::<ratio>();
    let eff = effectiveness.get::<ratio>();

    if eff == 0.0 {
        return Ok(Ntu::new(0.0)?);
    }

    let maximum = if cr == 0.0 { 1.0 } else { maximum(cr) };
    if eff >= maximum {
        return Err(HxError::domain_violation(arrangement, "effectiveness", eff, maximum));
    }

    let ntu = if cr == 0.0 {
        -(-eff).ln_1p()
    } else {
        fn_raw(eff, cr)?
    };
    Ok(Ntu::new(ntu)?)
}

/// Evaluate a closed form near a removable singularity at `x = at`.
///
/// Outside `at ± width` the general expression is used as is. Inside the band
/// the result is interpolated linearly between the analytic limit at `at` and
/// the general expression at the band edge on the same side, so the value is
/// continuous on both sides and exact at the singular point.
pub(crate) fn across_singularity(
    x: f64,
    at: f64,
    width: f64,
    limit: impl Fn() -> f64,
    general: impl Fn(f64) -> f64,
) -> f64 {
    let offset = x - at;
    if offset.abs() >= width {
        return general(x);
    }

    let limit = limit();
    if offset == 0.0 {
        return limit;
    }

    let edge = at + width.copysign(offset);
    limit + (general(edge) - limit) * (offset.abs() / width)
}
