//! Rating with the P-NTU (temperature effectiveness) method.

use std::fmt;

use uom::si::{ratio::ratio, thermal_conductance::watt_per_kelvin};

use crate::support::hx::{
    Effectiveness, Ntu, NtuSearchConfig, StreamCapacityRatio, TemperatureEffectivenessRelation,
};

use super::{
    PNtuResults, RatingConfig, RatingError, RatingInput,
    resolve::{Exchanger, ReferenceRelation},
};

struct StreamOneRelation<'a, A> {
    arrangement: &'a A,
    r1: StreamCapacityRatio,
    search: &'a NtuSearchConfig,
}

impl<A: fmt::Display> fmt::Display for StreamOneRelation<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.arrangement, f)
    }
}

impl<A> ReferenceRelation for StreamOneRelation<'_, A>
where
    A: TemperatureEffectivenessRelation + fmt::Display,
{
    fn effectiveness(&self, ntu: f64) -> Result<f64, RatingError> {
        let p1 = self
            .arrangement
            .temperature_effectiveness(Ntu::new(ntu)?, self.r1)?;
        Ok(p1.get::<ratio>())
    }

    fn ntu(&self, effectiveness: f64) -> Result<f64, RatingError> {
        let ntu1 = self.arrangement.ntu_from_temperature_effectiveness(
            Effectiveness::new(effectiveness)?,
            self.r1,
            self.search,
        )?;
        Ok(ntu1.get::<ratio>())
    }
}

/// Rate a heat exchanger whose streams are given as `[stream 1, stream 2]`.
///
/// For TEMA shells stream 1 is the shell-side fluid. Besides the cases the
/// effectiveness-NTU method accepts, UA with both temperatures of a single
/// stream is enough here.
///
/// # Errors
///
/// Returns [`RatingError`] if the knowns do not determine the exchanger,
/// disagree with each other, or fall outside what the arrangement can reach.
pub fn p_ntu_method<A>(
    arrangement: &A,
    input: &RatingInput,
    config: &RatingConfig,
) -> Result<PNtuResults, RatingError>
where
    A: TemperatureEffectivenessRelation + fmt::Display,
{
    let capacitance_rates = input.capacitance_rates;

    let relation = StreamOneRelation {
        arrangement,
        r1: StreamCapacityRatio::from_capacitance_rates(capacitance_rates),
        search: &config.ntu_search,
    };
    let exchanger = Exchanger {
        relation: &relation,
        rates: capacitance_rates.map(|rate| rate.get::<watt_per_kelvin>()),
        reference: 0,
        single_stream_with_ua: true,
        tolerance: config.consistency_tolerance.get::<ratio>(),
    };

    let resolved = exchanger.resolve(&input.known)?;
    Ok(PNtuResults::new(capacitance_rates, &resolved)?)
}
