//! Extensions to [`uom`].
//!
//! Subtracting two [`ThermodynamicTemperature`]s in [`uom`] yields another
//! absolute temperature, which is rarely what exchanger calculations want.
//! [`TemperatureDifference::minus`] returns a [`TemperatureInterval`] instead:
//!
//! ```
//! use twine_hx::support::units::TemperatureDifference;
//! use uom::si::{
//!     f64::ThermodynamicTemperature, temperature_interval::kelvin,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! let inlet = ThermodynamicTemperature::new::<degree_celsius>(130.0);
//! let outlet = ThermodynamicTemperature::new::<degree_celsius>(110.0);
//! assert!((outlet.minus(inlet).get::<kelvin>() + 20.0).abs() < 1e-12);
//! ```
//!
//! See [uom#380](https://github.com/iliekturtles/uom/issues/380) for background.

use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval, thermodynamic_temperature,
};

/// Difference of two absolute temperatures.
pub trait TemperatureDifference {
    /// Returns `self - other` as a temperature interval.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<temperature_interval::kelvin>(
            self.get::<thermodynamic_temperature::kelvin>()
                - other.get::<thermodynamic_temperature::kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit};

    use super::*;

    #[test]
    fn interval_is_independent_of_input_units() {
        let cold = ThermodynamicTemperature::new::<degree_celsius>(15.0);
        let hot = ThermodynamicTemperature::new::<degree_fahrenheit>(266.0);

        assert_relative_eq!(
            hot.minus(cold).get::<temperature_interval::degree_celsius>(),
            115.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            cold.minus(hot).get::<temperature_interval::kelvin>(),
            -115.0,
            max_relative = 1e-12
        );
    }
}
