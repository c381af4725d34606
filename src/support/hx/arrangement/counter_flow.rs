//! Counter-flow effectiveness-NTU relationships.

use std::fmt;

use crate::support::hx::{
    CapacityRatio, Effectiveness, HxError, Ntu, NtuSearchConfig, StreamCapacityRatio,
    effectiveness_ntu::{
        EffectivenessRelation, NtuRelation, across_singularity, effectiveness_via, ntu_via,
    },
    temperature_effectiveness::{TemperatureEffectivenessRelation, temperature_effectiveness_via},
};

/// Counter-flow heat exchanger arrangement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CounterFlow;

/// Counter-flow effectiveness referenced to a stream with ratio `r`.
///
/// Ratios above one are evaluated through the other stream so the exponential
/// never grows.
pub(crate) fn relation(ntu: f64, r: f64) -> f64 {
    if r > 1. {
        return relation(ntu * r, 1. / r) / r;
    }

    across_singularity(
        r,
        1.,
        1e-6,
        || 1. / (1. + 1. / ntu),
        |r| {
            let decay = (-ntu * (1. - r)).exp();
            (1. - decay) / (1. - r * decay)
        },
    )
}

impl EffectivenessRelation for CounterFlow {
    fn effectiveness(&self, ntu: Ntu, capacity_ratio: CapacityRatio) -> Effectiveness {
        effectiveness_via(ntu, capacity_ratio, relation)
    }
}

impl NtuRelation for CounterFlow {
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
            |_| 1.,
            |eff, cr| {
                Ok(across_singularity(
                    cr,
                    1.,
                    1e-6,
                    || eff / (1. - eff),
                    |cr| (eff * (1. - cr) / (1. - eff)).ln_1p() / (1. - cr),
                ))
            },
        )
    }
}

impl TemperatureEffectivenessRelation for CounterFlow {
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError> {
        temperature_effectiveness_via(ntu, capacity_ratio, |ntu, r1| Ok(relation(ntu, r1)))
    }
}

impl fmt::Display for CounterFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("counterflow")
    }
}

#[cfg(test)]
mod tests {
    use crate::support::constraint::ConstraintResult;
    use approx::assert_relative_eq;
    use uom::si::ratio::ratio;

    use super::*;

    #[test]
    fn roundtrip() -> Result<(), HxError> {
        let ntus = [0., 0.1, 0.5, 1., 5.];
        let capacity_ratios = [0., 0.25, 0.5, 1. - 1e-7, 1.];

        for ntu in ntus {
            for cr in capacity_ratios {
                let cr = CapacityRatio::new(cr)?;

                let eff = CounterFlow.effectiveness(Ntu::new(ntu)?, cr);
                let back = CounterFlow.ntu(eff, cr)?;

                assert_relative_eq!(back.get::<ratio>(), ntu, max_relative = 1e-9);
            }
        }

        Ok(())
    }

    #[test]
    fn balanced_streams() -> Result<(), HxError> {
        let cr = CapacityRatio::new(1.)?;

        let eff = CounterFlow.effectiveness(Ntu::new(9.)?, cr);
        assert_relative_eq!(eff.get::<ratio>(), 0.9);

        let ntu = CounterFlow.ntu(Effectiveness::new(0.9)?, cr)?;
        assert_relative_eq!(ntu.get::<ratio>(), 9., max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn continuous_as_ratio_approaches_one() -> ConstraintResult<()> {
        let ntu = Ntu::new(2.)?;
        let at_one = CounterFlow.effectiveness(ntu, CapacityRatio::new(1.)?);

        for cr in [1. - 1e-9, 1. - 1e-7, 1. - 1e-6] {
            let near = CounterFlow.effectiveness(ntu, CapacityRatio::new(cr)?);
            assert_relative_eq!(near.get::<ratio>(), at_one.get::<ratio>(), max_relative = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn infinite_ntu_is_fully_effective() -> ConstraintResult<()> {
        for cr in [0.5, 1. - 1e-7, 1.] {
            let eff = CounterFlow.effectiveness(Ntu::new(f64::INFINITY)?, CapacityRatio::new(cr)?);
            assert_relative_eq!(eff.get::<ratio>(), 1.);
        }
        Ok(())
    }

    #[test]
    fn complete_effectiveness_is_out_of_reach() -> ConstraintResult<()> {
        let result = CounterFlow.ntu(Effectiveness::new(1.)?, CapacityRatio::new(0.5)?);
        assert!(matches!(result, Err(HxError::DomainViolation { .. })));
        Ok(())
    }

    #[test]
    fn temperature_effectiveness_above_unit_ratio() -> Result<(), HxError> {
        let p1 = CounterFlow.temperature_effectiveness(
            Ntu::new(0.297_866_724_492_486_63)?,
            StreamCapacityRatio::new(3.510_707_803_992_740_4)?,
        )?;
        assert_relative_eq!(p1.get::<ratio>(), 0.173_382_601_503, max_relative = 1e-10);

        // Referenced to the other stream, P2 = P1 R1 with NTU2 = NTU1 R1.
        let p2 = CounterFlow.temperature_effectiveness(
            Ntu::new(0.297_866_724_492_486_63 * 3.510_707_803_992_740_4)?,
            StreamCapacityRatio::new(1. / 3.510_707_803_992_740_4)?,
        )?;
        assert_relative_eq!(
            p2.get::<ratio>(),
            p1.get::<ratio>() * 3.510_707_803_992_740_4,
            max_relative = 1e-12
        );
        Ok(())
    }
}
