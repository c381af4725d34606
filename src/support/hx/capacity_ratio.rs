use std::ops::Deref;

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative, UnitInterval};
use uom::si::{f64::Ratio, ratio::ratio};

use super::CapacitanceRate;

/// Capacity ratio (`C_min` / `C_max`) for a heat exchanger.
///
/// The ratio quantifies how evenly the stream capacitance rates are matched and
/// must fall in the closed interval [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityRatio(Constrained<Ratio, UnitInterval>);

impl CapacityRatio {
    /// Create a [`CapacityRatio`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside the interval [0, 1].
    pub fn new(value: f64) -> ConstraintResult<Self> {
        let quantity = Ratio::new::<ratio>(value);
        Self::from_quantity(quantity)
    }

    /// Create a [`CapacityRatio`] from a quantity with ratio units.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity lies outside the interval [0, 1].
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(quantity)?))
    }

    /// Create a [`CapacityRatio`] from the [capacitance rates](CapacitanceRate)
    /// of the two streams.
    ///
    /// An infinite capacitance rate (an isothermal stream) yields zero.
    #[must_use]
    pub fn from_capacitance_rates(capacitance_rates: [CapacitanceRate; 2]) -> Self {
        let [first, second] = capacitance_rates;

        Self::from_quantity(first.min(*second) / first.max(*second))
            .expect("capacitance rates should always be positive")
    }
}

impl Deref for CapacityRatio {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Capacity ratio of stream 1 to stream 2 (`R1 = C1 / C2`).
///
/// Unlike [`CapacityRatio`], the ratio is referenced to a chosen stream and may
/// exceed one. Temperature effectiveness relations use it together with an
/// [NTU](super::Ntu) referenced to the same stream.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct StreamCapacityRatio(Constrained<Ratio, NonNegative>);

impl StreamCapacityRatio {
    /// Create a [`StreamCapacityRatio`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative or not a number.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Create a [`StreamCapacityRatio`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is negative or not a number.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(quantity)?))
    }

    /// Ratio of the first capacitance rate to the second.
    #[must_use]
    pub fn from_capacitance_rates(capacitance_rates: [CapacitanceRate; 2]) -> Self {
        let [first, second] = capacitance_rates;

        Self::from_quantity(*first / *second)
            .expect("capacitance rates should always be positive")
    }

    /// The ratio referenced to the other stream (`R2 = 1 / R1`).
    #[must_use]
    pub fn inverse(self) -> Ratio {
        Ratio::new::<ratio>(1.) / *self
    }
}

impl Deref for StreamCapacityRatio {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::thermal_conductance::watt_per_kelvin;

    use super::*;

    #[test]
    fn from_capacitance_rates() -> ConstraintResult<()> {
        let capacitance_rates = [
            CapacitanceRate::new::<watt_per_kelvin>(10.)?,
            CapacitanceRate::new::<watt_per_kelvin>(20.)?,
        ];

        let capacity_ratio = CapacityRatio::from_capacitance_rates(capacitance_rates);
        assert_relative_eq!(capacity_ratio.get::<ratio>(), 0.5);

        let flipped = CapacityRatio::from_capacitance_rates([
            capacitance_rates[1],
            capacitance_rates[0],
        ]);
        assert_relative_eq!(flipped.get::<ratio>(), 0.5);
        Ok(())
    }

    #[test]
    fn stream_ratio_keeps_order() -> ConstraintResult<()> {
        let capacitance_rates = [
            CapacitanceRate::new::<watt_per_kelvin>(9672.)?,
            CapacitanceRate::new::<watt_per_kelvin>(2755.)?,
        ];

        let r1 = StreamCapacityRatio::from_capacitance_rates(capacitance_rates);

        assert_relative_eq!(r1.get::<ratio>(), 3.510_707_803_992_740_4, max_relative = 1e-15);
        assert_relative_eq!(r1.inverse().get::<ratio>(), 2755. / 9672.);
        Ok(())
    }

    #[test]
    fn isothermal_stream_gives_zero_ratio() -> ConstraintResult<()> {
        let capacitance_rates = [
            CapacitanceRate::new::<watt_per_kelvin>(1.)?,
            CapacitanceRate::new::<watt_per_kelvin>(f64::INFINITY)?,
        ];

        assert_relative_eq!(
            CapacityRatio::from_capacitance_rates(capacitance_rates).get::<ratio>(),
            0.
        );
        assert_relative_eq!(
            StreamCapacityRatio::from_capacitance_rates(capacitance_rates).get::<ratio>(),
            0.
        );
        Ok(())
    }

    #[test]
    fn rejects_ratio_above_one() {
        assert!(CapacityRatio::new(1.01).is_err());
        assert!(StreamCapacityRatio::new(1.01).is_ok());
        assert!(StreamCapacityRatio::new(-0.1).is_err());
    }
}
