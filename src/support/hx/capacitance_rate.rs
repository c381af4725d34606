use std::ops::Deref;

use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};
use uom::si::f64::{MassRate, SpecificHeatCapacity, ThermalConductance};

/// Capacitance rate `C = m_dot * c_p` of one stream, strictly positive.
///
/// Rates are constant through the exchanger: every relation in this crate
/// assumes a constant specific heat on both sides.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CapacitanceRate(Constrained<ThermalConductance, StrictlyPositive>);

impl CapacitanceRate {
    /// Create a [`CapacitanceRate`] from a value in unit `U`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not strictly positive.
    pub fn new<U>(value: f64) -> ConstraintResult<Self>
    where
        U: uom::si::thermal_conductance::Unit + uom::Conversion<f64, T = f64>,
    {
        Self::from_quantity(ThermalConductance::new::<U>(value))
    }

    /// Create a [`CapacitanceRate`] from a thermal conductance quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is not strictly positive.
    pub fn from_quantity(quantity: ThermalConductance) -> ConstraintResult<Self> {
        Ok(Self(StrictlyPositive::new(quantity)?))
    }

    /// Create a [`CapacitanceRate`] from a stream's mass flow and specific heat.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the product is not strictly positive.
    pub fn from_mass_rate_and_specific_heat(
        mass_rate: MassRate,
        specific_heat: SpecificHeatCapacity,
    ) -> ConstraintResult<Self> {
        Self::from_quantity(mass_rate * specific_heat)
    }
}

impl Deref for CapacitanceRate {
    type Target = ThermalConductance;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{
        mass_rate::kilogram_per_second, specific_heat_capacity::joule_per_kilogram_kelvin,
        thermal_conductance::watt_per_kelvin,
    };

    use super::*;
    use crate::support::constraint::ConstraintError;

    #[test]
    fn product_of_mass_rate_and_specific_heat() -> ConstraintResult<()> {
        let shell_side = CapacitanceRate::from_mass_rate_and_specific_heat(
            MassRate::new::<kilogram_per_second>(5.2),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1860.),
        )?;

        assert_relative_eq!(shell_side.get::<watt_per_kelvin>(), 9672., max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn stagnant_stream_is_rejected() {
        let stagnant = CapacitanceRate::from_mass_rate_and_specific_heat(
            MassRate::new::<kilogram_per_second>(0.),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4180.),
        );
        assert_eq!(stagnant, Err(ConstraintError::Zero));
    }
}
