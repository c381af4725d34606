//! Runtime selection of a temperature effectiveness relation.

use std::fmt;

use crate::support::hx::{
    CounterFlow, CrossFlow, Effectiveness, HxError, Mixed, Ntu, ParallelFlow, ShellAndTube,
    StreamCapacityRatio, Unmixed,
};

use super::{PassArrangement, TemaE, TemaG, TemaH, TemaJ, TemperatureEffectivenessRelation};

/// P-NTU arrangement selected at runtime.
///
/// Crossflow variants name the mixed stream by number, stream 1 being the
/// reference stream of `P1`, `R1`, and `NTU1`. TEMA shells carry stream 1 on
/// the shell side.
///
/// ```
/// use twine_hx::support::hx::{PNtuArrangement, PassArrangement};
///
/// let shell = PNtuArrangement::from_subtype("G", 2, PassArrangement::Optimal).unwrap();
/// assert_eq!(shell.to_string(), "TEMA G (2 tube passes)");
///
/// assert!(PNtuArrangement::from_subtype("J", 3, PassArrangement::Optimal).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PNtuArrangement {
    /// Counterflow.
    CounterFlow,
    /// Parallel flow.
    ParallelFlow,
    /// Crossflow with both streams unmixed.
    CrossFlow,
    /// Crossflow with stream 1 mixed.
    CrossFlowMixed1,
    /// Crossflow with stream 2 mixed.
    CrossFlowMixed2,
    /// Crossflow with both streams mixed.
    CrossFlowMixedBoth,
    /// TEMA E shell.
    E(TemaE),
    /// TEMA G shell.
    G(TemaG),
    /// TEMA H shell.
    H(TemaH),
    /// TEMA J shell.
    J(TemaJ),
    /// Two-pass E shells in series, in overall counterflow.
    ShellAndTube(ShellAndTube),
}

impl PNtuArrangement {
    /// Every subtype accepted by [`PNtuArrangement::from_subtype`].
    #[must_use]
    pub const fn names() -> &'static [&'static str] {
        &[
            "counterflow",
            "parallel",
            "crossflow",
            "crossflow, mixed 1",
            "crossflow, mixed 2",
            "crossflow, mixed 1&2",
            "E",
            "G",
            "H",
            "J",
            "1S&T",
            "2S&T",
            "3S&T",
            "4S&T",
            "5S&T",
            "6S&T",
            "7S&T",
            "8S&T",
            "9S&T",
            "10S&T",
        ]
    }

    /// Select an arrangement by subtype name.
    ///
    /// `tube_passes` and `pass_arrangement` only apply to the TEMA shells.
    ///
    /// # Errors
    ///
    /// Returns [`HxError::UnsupportedConfiguration`] for an unknown subtype or
    /// a pass count the shell does not support.
    pub fn from_subtype(
        subtype: &str,
        tube_passes: u16,
        pass_arrangement: PassArrangement,
    ) -> Result<Self, HxError> {
        Ok(match subtype {
            "counterflow" => Self::CounterFlow,
            "parallel" => Self::ParallelFlow,
            "crossflow" => Self::CrossFlow,
            "crossflow, mixed 1" => Self::CrossFlowMixed1,
            "crossflow, mixed 2" => Self::CrossFlowMixed2,
            "crossflow, mixed 1&2" => Self::CrossFlowMixedBoth,
            "E" => Self::E(TemaE::new(tube_passes, pass_arrangement)?),
            "G" => Self::G(TemaG::new(tube_passes, pass_arrangement)?),
            "H" => Self::H(TemaH::new(tube_passes, pass_arrangement)?),
            "J" => Self::J(TemaJ::new(tube_passes)?),
            other => other
                .strip_suffix("S&T")
                .and_then(|shells| shells.parse::<u16>().ok())
                .filter(|shells| (1..=10).contains(shells))
                .and_then(|shells| ShellAndTube::with_shells(shells).ok())
                .map(Self::ShellAndTube)
                .ok_or_else(|| HxError::unsupported("P-NTU subtype", other, Self::names()))?,
        })
    }
}

impl fmt::Display for PNtuArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CounterFlow => fmt::Display::fmt(&CounterFlow, f),
            Self::ParallelFlow => fmt::Display::fmt(&ParallelFlow, f),
            Self::CrossFlow => f.write_str("crossflow"),
            Self::CrossFlowMixed1 => f.write_str("crossflow, mixed 1"),
            Self::CrossFlowMixed2 => f.write_str("crossflow, mixed 2"),
            Self::CrossFlowMixedBoth => f.write_str("crossflow, mixed 1&2"),
            Self::E(shell) => fmt::Display::fmt(shell, f),
            Self::G(shell) => fmt::Display::fmt(shell, f),
            Self::H(shell) => fmt::Display::fmt(shell, f),
            Self::J(shell) => fmt::Display::fmt(shell, f),
            Self::ShellAndTube(shells) => fmt::Display::fmt(shells, f),
        }
    }
}

impl TemperatureEffectivenessRelation for PNtuArrangement {
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError> {
        match self {
            Self::CounterFlow => CounterFlow.temperature_effectiveness(ntu, capacity_ratio),
            Self::ParallelFlow => ParallelFlow.temperature_effectiveness(ntu, capacity_ratio),
            Self::CrossFlow => CrossFlow::<Unmixed, Unmixed>::new()
                .temperature_effectiveness(ntu, capacity_ratio),
            Self::CrossFlowMixed1 => {
                CrossFlow::<Mixed, Unmixed>::new().temperature_effectiveness(ntu, capacity_ratio)
            }
            Self::CrossFlowMixed2 => {
                CrossFlow::<Unmixed, Mixed>::new().temperature_effectiveness(ntu, capacity_ratio)
            }
            Self::CrossFlowMixedBoth => {
                CrossFlow::<Mixed, Mixed>::new().temperature_effectiveness(ntu, capacity_ratio)
            }
            Self::E(shell) => shell.temperature_effectiveness(ntu, capacity_ratio),
            Self::G(shell) => shell.temperature_effectiveness(ntu, capacity_ratio),
            Self::H(shell) => shell.temperature_effectiveness(ntu, capacity_ratio),
            Self::J(shell) => shell.temperature_effectiveness(ntu, capacity_ratio),
            Self::ShellAndTube(shells) => shells.temperature_effectiveness(ntu, capacity_ratio),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::ratio::ratio;

    use super::*;

    /// Duty of the reference rating, `m1 cp1 = 9672 W/K`, `m2 cp2 = 2755 W/K`,
    /// `UA = 300 W/K`, inlets at 130 and 15.
    fn duty(arrangement: PNtuArrangement) -> Result<f64, HxError> {
        let c1 = 5.2 * 1860.;
        let c2 = 1.45 * 1900.;
        let p1 = arrangement.temperature_effectiveness(
            Ntu::new(300. / c1)?,
            StreamCapacityRatio::new(c1 / c2)?,
        )?;
        Ok(p1.get::<ratio>() * c1 * (130. - 15.))
    }

    #[test]
    fn shell_duties() -> Result<(), HxError> {
        let optimal = PassArrangement::Optimal;
        let cases = [
            ("E", 10, 32_212.185_563_086_336),
            ("G", 2, 32_224.887_885_700_08),
            ("H", 2, 32_224.888_572_366_734),
            ("J", 2, 32_212.185_699_719_837),
        ];

        for (subtype, passes, expected) in cases {
            let arrangement = PNtuArrangement::from_subtype(subtype, passes, optimal)?;
            assert_relative_eq!(duty(arrangement)?, expected, max_relative = 1e-10);
        }
        Ok(())
    }

    #[test]
    fn every_name_is_accepted() -> Result<(), HxError> {
        for name in PNtuArrangement::names() {
            let arrangement = PNtuArrangement::from_subtype(name, 2, PassArrangement::Optimal)?;
            let p1 = arrangement
                .temperature_effectiveness(Ntu::new(0.8)?, StreamCapacityRatio::new(1.4)?)?;
            assert!(p1.get::<ratio>() > 0. && p1.get::<ratio>() < 1. / 1.4);
        }
        Ok(())
    }

    #[test]
    fn unknown_subtype_lists_every_choice() {
        match PNtuArrangement::from_subtype("BADTYPE", 2, PassArrangement::Optimal) {
            Err(HxError::UnsupportedConfiguration {
                requested, valid, ..
            }) => {
                assert_eq!(requested, "BADTYPE");
                assert!(valid.contains("`crossflow, mixed 2`"));
                assert!(valid.contains("`J`"));
            }
            other => panic!("expected an unsupported configuration, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_pass_counts() {
        let optimal = PassArrangement::Optimal;
        for (subtype, passes) in [("E", 7), ("G", 5), ("H", 5), ("J", 3)] {
            assert!(matches!(
                PNtuArrangement::from_subtype(subtype, passes, optimal),
                Err(HxError::UnsupportedConfiguration { .. })
            ));
        }
    }

    #[test]
    fn shells_in_series_extend_the_two_pass_shell() -> Result<(), HxError> {
        let optimal = PassArrangement::Optimal;
        let one = PNtuArrangement::from_subtype("1S&T", 0, optimal)?;
        let e2 = PNtuArrangement::from_subtype("E", 2, optimal)?;
        let ntu = Ntu::new(1.)?;
        let r1 = StreamCapacityRatio::new(1. / 3.)?;

        assert_relative_eq!(
            one.temperature_effectiveness(ntu, r1)?.get::<ratio>(),
            e2.temperature_effectiveness(ntu, r1)?.get::<ratio>(),
            max_relative = 1e-14
        );
        assert_eq!(one.to_string(), "1S&T");
        Ok(())
    }
}
