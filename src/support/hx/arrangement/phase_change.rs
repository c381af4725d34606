//! Effectiveness-NTU relationships with one isothermal stream.

use std::fmt;

use uom::si::ratio::ratio;

use crate::support::hx::{
    CapacityRatio, Effectiveness, HxError, Ntu, NtuSearchConfig,
    effectiveness_ntu::{EffectivenessRelation, NtuRelation},
};

/// An exchanger in which one stream boils or condenses.
///
/// The phase-changing stream stays at constant temperature, so its capacitance
/// rate is effectively infinite and the capacity ratio is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PhaseChange;

impl EffectivenessRelation for PhaseChange {
    fn effectiveness(&self, ntu: Ntu, _capacity_ratio: CapacityRatio) -> Effectiveness {
        Effectiveness::from_raw(-(-ntu.get::<ratio>()).exp_m1())
            .expect("ntu should always yield valid effectiveness")
    }
}

impl NtuRelation for PhaseChange {
    fn ntu_with_search(
        &self,
        effectiveness: Effectiveness,
        _capacity_ratio: CapacityRatio,
        _search: &NtuSearchConfig,
    ) -> Result<Ntu, HxError> {
        let eff = effectiveness.get::<ratio>();
        if eff >= 1. {
            return Err(HxError::domain_violation(self, "effectiveness", eff, 1.));
        }
        Ok(Ntu::new(-(-eff).ln_1p())?)
    }
}

impl fmt::Display for PhaseChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("phase change")
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn capacity_ratio_is_ignored() -> Result<(), HxError> {
        let ntu = Ntu::new(5.)?;

        for cr in [0., 0.7, 1.] {
            let eff = PhaseChange.effectiveness(ntu, CapacityRatio::new(cr)?);
            assert_relative_eq!(eff.get::<ratio>(), 0.993_262_053_000_914_5, max_relative = 1e-14);

            let back = PhaseChange.ntu(eff, CapacityRatio::new(cr)?)?;
            assert_relative_eq!(back.get::<ratio>(), 5., max_relative = 1e-12);
        }
        Ok(())
    }
}
