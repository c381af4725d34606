//! Parallel-flow effectiveness-NTU relationships.

use std::fmt;

use crate::support::hx::{
    CapacityRatio, Effectiveness, HxError, Ntu, NtuSearchConfig, StreamCapacityRatio,
    effectiveness_ntu::{EffectivenessRelation, NtuRelation, effectiveness_via, ntu_via},
    temperature_effectiveness::{TemperatureEffectivenessRelation, temperature_effectiveness_via},
};

/// Parallel-flow heat exchanger arrangement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParallelFlow;

pub(crate) fn relation(ntu: f64, r: f64) -> f64 {
    -(-ntu * (1. + r)).exp_m1() / (1. + r)
}

impl EffectivenessRelation for ParallelFlow {
    fn effectiveness(&self, ntu: Ntu, capacity_ratio: CapacityRatio) -> Effectiveness {
        effectiveness_via(ntu, capacity_ratio, relation)
    }
}

impl NtuRelation for ParallelFlow {
    fn ntu_with_search(
        &self,
        effectiveness: Effectiveness,
        capacity_ratio: CapacityRatio,
        _search: &NtuSearchConfig,
    ) -> Result<Ntu, HxError> {
        ntu_via(
            self,
            effectiveness,
            capacity_ratio,
            |cr| 1. / (1. + cr),
            |eff, cr| Ok(-(-eff * (1. + cr)).ln_1p() / (1. + cr)),
        )
    }
}

impl TemperatureEffectivenessRelation for ParallelFlow {
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError> {
        temperature_effectiveness_via(ntu, capacity_ratio, |ntu, r1| Ok(relation(ntu, r1)))
    }
}

impl fmt::Display for ParallelFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("parallel")
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::ratio::ratio;

    use super::*;

    #[test]
    fn roundtrip() -> Result<(), HxError> {
        let ntus = [0., 0.1, 0.5, 1., 5.];
        let capacity_ratios = [0., 0.25, 0.5, 1.];

        for ntu in ntus {
            for cr in capacity_ratios {
                let cr = CapacityRatio::new(cr)?;

                let eff = ParallelFlow.effectiveness(Ntu::new(ntu)?, cr);
                let back = ParallelFlow.ntu(eff, cr)?;

                assert_relative_eq!(back.get::<ratio>(), ntu, max_relative = 1e-9);
            }
        }

        Ok(())
    }

    #[test]
    fn maximum_effectiveness() -> Result<(), HxError> {
        let cr = CapacityRatio::new(0.6)?;

        let result = ParallelFlow.ntu(Effectiveness::new(0.625_000_01)?, cr);
        assert!(matches!(
            result,
            Err(HxError::DomainViolation { maximum, .. }) if (maximum - 0.625).abs() < 1e-12
        ));

        let just_below = ParallelFlow.ntu(Effectiveness::new(0.62)?, cr)?;
        assert!(just_below.get::<ratio>() > 1.);
        Ok(())
    }

    #[test]
    fn temperature_effectiveness_above_unit_ratio() -> Result<(), HxError> {
        let p1 = ParallelFlow.temperature_effectiveness(
            Ntu::new(0.297_866_724_492_486_63)?,
            StreamCapacityRatio::new(3.510_707_803_992_740_4)?,
        )?;
        assert_relative_eq!(p1.get::<ratio>(), 0.163_852_912_049, max_relative = 1e-10);
        Ok(())
    }
}
