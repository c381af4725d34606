//! Rating with the effectiveness-NTU method.

use std::fmt;

use uom::si::{ratio::ratio, thermal_conductance::watt_per_kelvin};

use crate::support::hx::{
    CapacityRatio, Effectiveness, EffectivenessRelation, Ntu, NtuRelation, NtuSearchConfig,
};

use super::{
    EffectivenessNtuResults, RatingConfig, RatingError, RatingInput,
    resolve::{Exchanger, ReferenceRelation},
};

/// An effectiveness-NTU relation viewed from the `Cmin` stream.
struct CminRelation<'a, A> {
    arrangement: &'a A,
    capacity_ratio: CapacityRatio,
    search: &'a NtuSearchConfig,
}

impl<A: fmt::Display> fmt::Display for CminRelation<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.arrangement, f)
    }
}

impl<A> ReferenceRelation for CminRelation<'_, A>
where
    A: EffectivenessRelation + NtuRelation + fmt::Display,
{
    fn effectiveness(&self, ntu: f64) -> Result<f64, RatingError> {
        let effectiveness = self
            .arrangement
            .effectiveness(Ntu::new(ntu)?, self.capacity_ratio);
        Ok(effectiveness.get::<ratio>())
    }

    fn ntu(&self, effectiveness: f64) -> Result<f64, RatingError> {
        let ntu = self.arrangement.ntu_with_search(
            Effectiveness::new(effectiveness)?,
            self.capacity_ratio,
            self.search,
        )?;
        Ok(ntu.get::<ratio>())
    }
}

/// Rate a heat exchanger whose streams are given as `[hot, cold]`.
///
/// # Errors
///
/// Returns [`RatingError`] if the knowns do not determine the exchanger,
/// disagree with each other, or fall outside what the arrangement can reach.
pub fn effectiveness_ntu_method<A>(
    arrangement: &A,
    input: &RatingInput,
    config: &RatingConfig,
) -> Result<EffectivenessNtuResults, RatingError>
where
    A: EffectivenessRelation + NtuRelation + fmt::Display,
{
    let capacitance_rates = input.capacitance_rates;
    let c_min_index = usize::from(capacitance_rates[1] < capacitance_rates[0]);

    let relation = CminRelation {
        arrangement,
        capacity_ratio: CapacityRatio::from_capacitance_rates(capacitance_rates),
        search: &config.ntu_search,
    };
    let exchanger = Exchanger {
        relation: &relation,
        rates: capacitance_rates.map(|rate| rate.get::<watt_per_kelvin>()),
        reference: c_min_index,
        single_stream_with_ua: false,
        tolerance: config.consistency_tolerance.get::<ratio>(),
    };

    let resolved = exchanger.resolve(&input.known)?;
    Ok(EffectivenessNtuResults::new(
        capacitance_rates,
        c_min_index,
        &resolved,
    )?)
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;
    use uom::si::{
        f64::{ThermalConductance, ThermodynamicTemperature},
        power::watt,
        thermodynamic_temperature::kelvin,
    };

    use super::*;
    use crate::{
        models::thermal::hx::core::{Known, StreamTemperatures},
        support::hx::{CapacitanceRate, CounterFlow},
    };

    proptest! {
        #[test]
        fn results_satisfy_both_energy_balances(
            c_hot in 100.0..10_000.0_f64,
            c_cold in 100.0..10_000.0_f64,
            t_hot in 320.0..500.0_f64,
            t_cold in 250.0..310.0_f64,
            ua in 0.0..20_000.0_f64,
        ) {
            let known = Known::temperatures(
                StreamTemperatures::inlet(ThermodynamicTemperature::new::<kelvin>(t_hot)),
                StreamTemperatures::inlet(ThermodynamicTemperature::new::<kelvin>(t_cold)),
            )
            .with_ua(ThermalConductance::new::<watt_per_kelvin>(ua));
            let input = RatingInput::new(
                [
                    CapacitanceRate::new::<watt_per_kelvin>(c_hot).unwrap(),
                    CapacitanceRate::new::<watt_per_kelvin>(c_cold).unwrap(),
                ],
                known,
            );

            let results = effectiveness_ntu_method(&CounterFlow, &input, &RatingConfig::default())
                .unwrap();

            let q = results.q.get::<watt>();
            let [hot, cold] = results.streams;
            let hot_drop =
                hot.inlet_temperature.get::<kelvin>() - hot.outlet_temperature.get::<kelvin>();
            let cold_rise =
                cold.outlet_temperature.get::<kelvin>() - cold.inlet_temperature.get::<kelvin>();
            let scale = c_hot.min(c_cold) * (t_hot - t_cold);

            prop_assert!((q - c_hot * hot_drop).abs() <= 1e-9 * scale);
            prop_assert!((q - c_cold * cold_rise).abs() <= 1e-9 * scale);
            prop_assert!(q >= 0.0 && q <= scale * (1.0 + 1e-12));
        }
    }
}
