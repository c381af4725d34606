use crate::support::{constraint::ConstraintResult, units::TemperatureDifference};
use uom::si::f64::{Power, TemperatureInterval, ThermodynamicTemperature};

use super::{CapacitanceRate, HeatFlow};

/// One fully-resolved side of a rated heat exchanger.
///
/// Assumes the fluid's specific heat remains constant through the exchanger,
/// so `Q = C * (T_out - T_in)` holds with heat flow measured into the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stream {
    /// Capacitance rate of the stream.
    pub capacitance_rate: CapacitanceRate,
    /// Temperature at the exchanger inlet.
    pub inlet_temperature: ThermodynamicTemperature,
    /// Temperature after the stream leaves the exchanger.
    pub outlet_temperature: ThermodynamicTemperature,
    /// Net heat flow direction and magnitude for the stream.
    pub heat_flow: HeatFlow,
}

impl Stream {
    /// Resolve the outlet of a stream that receives `heat_flow`.
    #[must_use]
    pub fn from_heat_flow(
        capacitance_rate: CapacitanceRate,
        inlet_temperature: ThermodynamicTemperature,
        heat_flow: HeatFlow,
    ) -> Self {
        Self {
            capacitance_rate,
            inlet_temperature,
            outlet_temperature: inlet_temperature + heat_flow.signed() / *capacitance_rate,
            heat_flow,
        }
    }

    /// Resolve the heat flow of a stream from both of its temperatures.
    ///
    /// The direction follows the temperature change: a warming stream gains
    /// heat ([`HeatFlow::In`]) and a cooling stream loses it ([`HeatFlow::Out`]).
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::NotANumber`] if either temperature is not a
    /// number.
    ///
    /// [`ConstraintError::NotANumber`]: crate::support::constraint::ConstraintError::NotANumber
    pub fn from_temperatures(
        capacitance_rate: CapacitanceRate,
        inlet_temperature: ThermodynamicTemperature,
        outlet_temperature: ThermodynamicTemperature,
    ) -> ConstraintResult<Self> {
        let heat_rate: Power = *capacitance_rate * outlet_temperature.minus(inlet_temperature);

        Ok(Self {
            capacitance_rate,
            inlet_temperature,
            outlet_temperature,
            heat_flow: HeatFlow::from_signed(heat_rate)?,
        })
    }

    /// Temperature rise from inlet to outlet, negative for a cooling stream.
    #[must_use]
    pub fn temperature_change(&self) -> TemperatureInterval {
        self.outlet_temperature.minus(self.inlet_temperature)
    }
}

#[cfg(test)]
mod tests {
    use crate::support::constraint::{ConstraintError, ConstraintResult};
    use approx::assert_relative_eq;
    use uom::si::{
        power::watt, temperature_interval::kelvin as delta_kelvin,
        thermal_conductance::watt_per_kelvin, thermodynamic_temperature::degree_celsius,
    };

    use super::*;

    #[test]
    fn heat_flow_sets_the_outlet() -> ConstraintResult<()> {
        let capacitance_rate = CapacitanceRate::new::<watt_per_kelvin>(2755.)?;
        let inlet = ThermodynamicTemperature::new::<degree_celsius>(15.);

        let warmed = Stream::from_heat_flow(
            capacitance_rate,
            inlet,
            HeatFlow::incoming(Power::new::<watt>(192_850.))?,
        );
        let idle = Stream::from_heat_flow(capacitance_rate, inlet, HeatFlow::None);

        assert_relative_eq!(
            warmed.outlet_temperature.get::<degree_celsius>(),
            85.,
            max_relative = 1e-12
        );
        assert_eq!(idle.outlet_temperature, inlet);
        Ok(())
    }

    #[test]
    fn temperatures_set_the_heat_flow() -> ConstraintResult<()> {
        let capacitance_rate = CapacitanceRate::new::<watt_per_kelvin>(9672.)?;

        let cooled = Stream::from_temperatures(
            capacitance_rate,
            ThermodynamicTemperature::new::<degree_celsius>(130.),
            ThermodynamicTemperature::new::<degree_celsius>(110.),
        )?;

        assert!(matches!(cooled.heat_flow, HeatFlow::Out(_)));
        assert_relative_eq!(
            cooled.heat_flow.signed().get::<watt>(),
            -193_440.,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            cooled.temperature_change().get::<delta_kelvin>(),
            -20.,
            max_relative = 1e-12
        );

        let same = ThermodynamicTemperature::new::<degree_celsius>(40.);
        let idle = Stream::from_temperatures(capacitance_rate, same, same)?;
        assert_eq!(idle.heat_flow, HeatFlow::None);
        Ok(())
    }

    #[test]
    fn nan_temperature_is_rejected() -> ConstraintResult<()> {
        let capacitance_rate = CapacitanceRate::new::<watt_per_kelvin>(1.)?;
        let result = Stream::from_temperatures(
            capacitance_rate,
            ThermodynamicTemperature::new::<degree_celsius>(f64::NAN),
            ThermodynamicTemperature::new::<degree_celsius>(20.),
        );

        assert_eq!(result, Err(ConstraintError::NotANumber));
        Ok(())
    }
}
