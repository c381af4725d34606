//! Flow arrangements supported by the heat exchanger utilities.
//!
//! Each arrangement is a small value type implementing the relations it
//! supports. [`Arrangement`] selects one of them at runtime by name.

mod counter_flow;
mod cross_flow;
mod parallel_flow;
mod phase_change;
mod shell_and_tube;

use std::{fmt, str::FromStr};

pub use counter_flow::CounterFlow;
pub use cross_flow::{CrossFlow, MixState, Mixed, Unmixed};
pub use parallel_flow::ParallelFlow;
pub use phase_change::PhaseChange;
pub use shell_and_tube::{ShellAndTube, ShellAndTubeConfigError};

pub(crate) use counter_flow::relation as counter_flow_effectiveness;
pub(crate) use parallel_flow::relation as parallel_flow_effectiveness;

use super::{
    CapacityRatio, Effectiveness, HxError, Ntu, NtuSearchConfig,
    effectiveness_ntu::{EffectivenessRelation, NtuRelation},
};

/// Effectiveness-NTU arrangement selected at runtime.
///
/// Parses and displays the conventional subtype names:
///
/// ```
/// use twine_hx::support::hx::{Arrangement, ShellAndTube};
///
/// let arrangement: Arrangement = "crossflow, mixed Cmax".parse().unwrap();
/// assert_eq!(arrangement, Arrangement::CrossFlowMixedCmax);
///
/// let shells: Arrangement = "3S&T".parse().unwrap();
/// assert_eq!(shells, Arrangement::ShellAndTube(ShellAndTube::with_shells(3).unwrap()));
/// assert_eq!(shells.to_string(), "3S&T");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrangement {
    /// Counterflow.
    CounterFlow,
    /// Parallel flow.
    ParallelFlow,
    /// Crossflow with both streams unmixed.
    CrossFlow,
    /// Crossflow with the minimum-capacitance stream mixed.
    CrossFlowMixedCmin,
    /// Crossflow with the maximum-capacitance stream mixed.
    CrossFlowMixedCmax,
    /// Crossflow with both streams mixed.
    CrossFlowMixedBoth,
    /// Boiling on one side.
    Boiler,
    /// Condensing on one side.
    Condenser,
    /// One or more shells with two tube passes each.
    ShellAndTube(ShellAndTube),
}

impl Arrangement {
    /// Largest shell count accepted by name.
    pub const MAX_SHELLS: u16 = 10;

    /// Every name accepted by [`FromStr`].
    #[must_use]
    pub const fn names() -> &'static [&'static str] {
        &[
            "counterflow",
            "parallel",
            "crossflow",
            "crossflow, mixed Cmin",
            "crossflow, mixed Cmax",
            "crossflow, mixed 1&2",
            "boiler",
            "condenser",
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
}

impl FromStr for Arrangement {
    type Err = HxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "counterflow" => Self::CounterFlow,
            "parallel" => Self::ParallelFlow,
            "crossflow" => Self::CrossFlow,
            "crossflow, mixed Cmin" => Self::CrossFlowMixedCmin,
            "crossflow, mixed Cmax" => Self::CrossFlowMixedCmax,
            "crossflow, mixed 1&2" => Self::CrossFlowMixedBoth,
            "boiler" => Self::Boiler,
            "condenser" => Self::Condenser,
            other => other
                .strip_suffix("S&T")
                .and_then(|shells| shells.parse::<u16>().ok())
                .filter(|shells| (1..=Self::MAX_SHELLS).contains(shells))
                .and_then(|shells| ShellAndTube::with_shells(shells).ok())
                .map(Self::ShellAndTube)
                .ok_or_else(|| HxError::unsupported("arrangement", other, Self::names()))?,
        })
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CounterFlow => fmt::Display::fmt(&CounterFlow, f),
            Self::ParallelFlow => fmt::Display::fmt(&ParallelFlow, f),
            Self::CrossFlow => fmt::Display::fmt(&CrossFlow::<Unmixed, Unmixed>::new(), f),
            Self::CrossFlowMixedCmin => {
                fmt::Display::fmt(&CrossFlow::<Mixed, Unmixed>::new(), f)
            }
            Self::CrossFlowMixedCmax => {
                fmt::Display::fmt(&CrossFlow::<Unmixed, Mixed>::new(), f)
            }
            Self::CrossFlowMixedBoth => fmt::Display::fmt(&CrossFlow::<Mixed, Mixed>::new(), f),
            Self::Boiler => f.write_str("boiler"),
            Self::Condenser => f.write_str("condenser"),
            Self::ShellAndTube(shell_and_tube) => fmt::Display::fmt(shell_and_tube, f),
        }
    }
}

impl EffectivenessRelation for Arrangement {
    fn effectiveness(&self, ntu: Ntu, capacity_ratio: CapacityRatio) -> Effectiveness {
        match self {
            Self::CounterFlow => CounterFlow.effectiveness(ntu, capacity_ratio),
            Self::ParallelFlow => ParallelFlow.effectiveness(ntu, capacity_ratio),
            Self::CrossFlow => {
                CrossFlow::<Unmixed, Unmixed>::new().effectiveness(ntu, capacity_ratio)
            }
            Self::CrossFlowMixedCmin => {
                CrossFlow::<Mixed, Unmixed>::new().effectiveness(ntu, capacity_ratio)
            }
            Self::CrossFlowMixedCmax => {
                CrossFlow::<Unmixed, Mixed>::new().effectiveness(ntu, capacity_ratio)
            }
            Self::CrossFlowMixedBoth => {
                CrossFlow::<Mixed, Mixed>::new().effectiveness(ntu, capacity_ratio)
            }
            Self::Boiler | Self::Condenser => PhaseChange.effectiveness(ntu, capacity_ratio),
            Self::ShellAndTube(shell_and_tube) => shell_and_tube.effectiveness(ntu, capacity_ratio),
        }
    }
}

impl NtuRelation for Arrangement {
    fn ntu_with_search(
        &self,
        effectiveness: Effectiveness,
        capacity_ratio: CapacityRatio,
        search: &NtuSearchConfig,
    ) -> Result<Ntu, HxError> {
        match self {
            Self::CounterFlow => {
                CounterFlow.ntu_with_search(effectiveness, capacity_ratio, search)
            }
            Self::ParallelFlow => {
                ParallelFlow.ntu_with_search(effectiveness, capacity_ratio, search)
            }
            Self::CrossFlow => CrossFlow::<Unmixed, Unmixed>::new()
                .ntu_with_search(effectiveness, capacity_ratio, search),
            Self::CrossFlowMixedCmin => CrossFlow::<Mixed, Unmixed>::new()
                .ntu_with_search(effectiveness, capacity_ratio, search),
            Self::CrossFlowMixedCmax => CrossFlow::<Unmixed, Mixed>::new()
                .ntu_with_search(effectiveness, capacity_ratio, search),
            Self::CrossFlowMixedBoth => CrossFlow::<Mixed, Mixed>::new()
                .ntu_with_search(effectiveness, capacity_ratio, search),
            Self::Boiler | Self::Condenser => {
                PhaseChange.ntu_with_search(effectiveness, capacity_ratio, search)
            }
            Self::ShellAndTube(shell_and_tube) => {
                shell_and_tube.ntu_with_search(effectiveness, capacity_ratio, search)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::ratio::ratio;

    use super::*;

    #[test]
    fn names_roundtrip_through_parsing() -> Result<(), HxError> {
        for name in Arrangement::names() {
            let arrangement: Arrangement = name.parse()?;
            assert_eq!(arrangement.to_string(), *name);
        }
        Ok(())
    }

    #[test]
    fn unknown_names_list_every_choice() {
        for name in ["FAIL", "0S&T", "11S&T", "S&T", "Counterflow"] {
            match name.parse::<Arrangement>() {
                Err(HxError::UnsupportedConfiguration {
                    requested, valid, ..
                }) => {
                    assert_eq!(requested, name);
                    assert!(valid.contains("`crossflow, mixed 1&2`"));
                    assert!(valid.contains("`10S&T`"));
                }
                other => panic!("expected an unsupported configuration, got {other:?}"),
            }
        }
    }

    #[test]
    fn every_arrangement_roundtrips() -> Result<(), HxError> {
        let cr = CapacityRatio::new(0.7)?;
        let ntu = Ntu::new(0.8)?;

        for name in Arrangement::names() {
            let arrangement: Arrangement = name.parse()?;
            let eff = arrangement.effectiveness(ntu, cr);
            let back = arrangement.ntu(eff, cr)?;
            assert_relative_eq!(back.get::<ratio>(), 0.8, max_relative = 1e-8);
        }
        Ok(())
    }

    #[test]
    fn capacity_ratio_above_one_is_rejected() {
        assert!(CapacityRatio::new(1.01).is_err());
    }
}
