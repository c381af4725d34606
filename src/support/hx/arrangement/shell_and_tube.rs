//! Shell-and-tube effectiveness-NTU relationships.

use std::fmt;

use thiserror::Error;

use crate::support::hx::{
    CapacityRatio, Effectiveness, HxError, Ntu, NtuSearchConfig, StreamCapacityRatio,
    effectiveness_ntu::{
        EffectivenessRelation, NtuRelation, across_singularity, effectiveness_via, ntu_via,
    },
    temperature_effectiveness::{TemperatureEffectivenessRelation, temperature_effectiveness_via},
};

/// Shell-and-tube heat exchanger arrangement.
///
/// Each shell carries one shell pass and an even number of tube passes, and the
/// shells are connected in overall counterflow. The total NTU is split evenly
/// over the shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShellAndTube {
    shells: u16,
    tube_passes: u16,
}

impl ShellAndTube {
    /// Construct a validated shell-and-tube arrangement configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ShellAndTubeConfigError`] when the pass counts violate the supported
    /// shell-and-tube families (one shell pass with any even number of tube passes, or
    /// `N` shell passes with a tube pass count that is an even multiple of `N`).
    pub const fn new(shells: u16, tube_passes: u16) -> Result<Self, ShellAndTubeConfigError> {
        if shells == 0 {
            return Err(ShellAndTubeConfigError::ZeroShellPasses);
        }
        if shells > u16::MAX / 2 {
            return Err(ShellAndTubeConfigError::ShellPassOverflow);
        }
        if tube_passes < 2 * shells {
            return Err(ShellAndTubeConfigError::InsufficientTubePasses);
        }
        if !tube_passes.is_multiple_of(2 * shells) {
            return Err(ShellAndTubeConfigError::TubePassesNotMultiple);
        }
        Ok(Self {
            shells,
            tube_passes,
        })
    }

    /// Construct `shells` shells with two tube passes each.
    ///
    /// # Errors
    ///
    /// Returns [`ShellAndTubeConfigError`] when `shells` is zero or too large.
    pub const fn with_shells(shells: u16) -> Result<Self, ShellAndTubeConfigError> {
        if shells > u16::MAX / 2 {
            return Err(ShellAndTubeConfigError::ShellPassOverflow);
        }
        Self::new(shells, 2 * shells)
    }

    /// Number of shells (shell passes).
    #[must_use]
    pub const fn shells(&self) -> u16 {
        self.shells
    }

    /// Total number of tube passes.
    #[must_use]
    pub const fn tube_passes(&self) -> u16 {
        self.tube_passes
    }

    /// Highest effectiveness reachable for the capacity ratio, approached as
    /// NTU grows without bound.
    #[must_use]
    pub fn maximum_effectiveness(&self, capacity_ratio: CapacityRatio) -> f64 {
        let cr = capacity_ratio.get::<uom::si::ratio::ratio>();
        if cr == 0. {
            return 1.;
        }
        let single = 2. / (1. + cr + cr.hypot(1.));
        in_series(single, cr, self.shells)
    }
}

/// Temperature effectiveness of one shell with two tube passes.
fn single_shell(ntu: f64, r: f64) -> f64 {
    let root = r.hypot(1.);
    let decay = (-ntu * root).exp();
    2. / (1. + r + root * (1. + decay) / (1. - decay))
}

/// Combine identical shells connected in overall counterflow.
fn in_series(single: f64, r: f64, shells: u16) -> f64 {
    if shells == 1 {
        return single;
    }
    let n = f64::from(shells);
    across_singularity(
        r,
        1.,
        1e-6,
        || n * single / (1. + single * (n - 1.)),
        |r| {
            let x = ((1. - single * r) / (1. - single)).powf(n);
            (x - 1.) / (x - r)
        },
    )
}

/// Effectiveness of `shells` shells sharing `ntu` with ratio `r` (any value).
pub(crate) fn relation(ntu: f64, r: f64, shells: u16) -> f64 {
    if ntu == 0. {
        return 0.;
    }
    in_series(single_shell(ntu / f64::from(shells), r), r, shells)
}

impl EffectivenessRelation for ShellAndTube {
    fn effectiveness(&self, ntu: Ntu, capacity_ratio: CapacityRatio) -> Effectiveness {
        effectiveness_via(ntu, capacity_ratio, |ntu, cr| relation(ntu, cr, self.shells))
    }
}

impl NtuRelation for ShellAndTube {
    fn ntu_with_search(
        &self,
        effectiveness: Effectiveness,
        capacity_ratio: CapacityRatio,
        _search: &NtuSearchConfig,
    ) -> Result<Ntu, HxError> {
        let shells = f64::from(self.shells);

        let single_ntu = |eff_1: f64, cr: f64| {
            let root = cr.hypot(1.);
            let e = (2. - eff_1 * (1. + cr)) / (eff_1 * root);
            ((e + 1.) / (e - 1.)).ln() / root
        };

        ntu_via(
            self,
            effectiveness,
            capacity_ratio,
            |_| self.maximum_effectiveness(capacity_ratio),
            |eff, cr| {
                let eff_1 = if self.shells == 1 {
                    eff
                } else {
                    across_singularity(
                        cr,
                        1.,
                        1e-6,
                        || eff / (shells - eff * (shells - 1.)),
                        |cr| {
                            let f = ((eff * cr - 1.) / (eff - 1.)).powf(1. / shells);
                            (f - 1.) / (f - cr)
                        },
                    )
                };
                Ok(single_ntu(eff_1, cr) * shells)
            },
        )
    }
}

impl TemperatureEffectivenessRelation for ShellAndTube {
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError> {
        temperature_effectiveness_via(ntu, capacity_ratio, |ntu, r1| {
            Ok(relation(ntu, r1, self.shells))
        })
    }
}

impl fmt::Display for ShellAndTube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}S&T", self.shells)
    }
}

/// Errors returned when constructing a [`ShellAndTube`] arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShellAndTubeConfigError {
    /// No shell passes were configured.
    #[error("at least one shell pass is required")]
    ZeroShellPasses,
    /// The requested shell pass count is too large to validate.
    #[error("shell pass count is too large")]
    ShellPassOverflow,
    /// Tube passes are fewer than twice the shell passes.
    #[error("tube passes must be at least twice the shell passes")]
    InsufficientTubePasses,
    /// Tube passes are not an even multiple of shell passes.
    #[error("tube passes must be an even multiple of the shell passes")]
    TubePassesNotMultiple,
}

#[cfg(test)]
mod tests {
    use crate::support::constraint::ConstraintResult;
    use approx::assert_relative_eq;
    use uom::si::ratio::ratio;

    use super::*;

    fn roundtrip_for(arrangement: ShellAndTube) -> Result<(), HxError> {
        let ntus = [0.1, 0.5, 1., 5.];
        let capacity_ratios = [0., 0.25, 0.5, 1.];

        for ntu in ntus {
            for cr in capacity_ratios {
                let cr = CapacityRatio::new(cr)?;

                let eff = arrangement.effectiveness(Ntu::new(ntu)?, cr);
                let back = arrangement.ntu(eff, cr)?;

                assert_relative_eq!(back.get::<ratio>(), ntu, max_relative = 1e-8);
            }
        }

        Ok(())
    }

    #[test]
    fn validation_outcomes() {
        assert_eq!(
            ShellAndTube::new(0, 2),
            Err(ShellAndTubeConfigError::ZeroShellPasses)
        );

        assert_eq!(
            ShellAndTube::new(u16::MAX, 2),
            Err(ShellAndTubeConfigError::ShellPassOverflow)
        );

        assert_eq!(
            ShellAndTube::new(3, 4),
            Err(ShellAndTubeConfigError::InsufficientTubePasses)
        );

        assert_eq!(
            ShellAndTube::new(3, 8),
            Err(ShellAndTubeConfigError::TubePassesNotMultiple)
        );

        assert!(ShellAndTube::new(1, 2).is_ok());
        assert_eq!(ShellAndTube::with_shells(4).map(|s| s.tube_passes()), Ok(8));
    }

    #[test]
    fn roundtrip() -> Result<(), HxError> {
        roundtrip_for(ShellAndTube::new(1, 2).expect("valid configuration"))?;
        roundtrip_for(ShellAndTube::new(1, 4).expect("valid configuration"))?;
        roundtrip_for(ShellAndTube::new(2, 4).expect("valid configuration"))?;
        roundtrip_for(ShellAndTube::new(3, 12).expect("valid configuration"))?;

        Ok(())
    }

    #[test]
    fn maximum_effectiveness() -> Result<(), HxError> {
        let five_shells = ShellAndTube::with_shells(5).expect("valid configuration");
        let cr = CapacityRatio::new(0.7)?;

        assert_relative_eq!(
            five_shells.maximum_effectiveness(cr),
            0.974_122_977_755_022_8,
            max_relative = 1e-12
        );

        let result = five_shells.ntu(Effectiveness::new(0.99)?, cr);
        assert!(matches!(result, Err(HxError::DomainViolation { .. })));
        Ok(())
    }

    #[test]
    fn shells_share_ntu() -> ConstraintResult<()> {
        let one = ShellAndTube::with_shells(1).expect("valid configuration");
        let two = ShellAndTube::with_shells(2).expect("valid configuration");
        let cr = CapacityRatio::new(0.5)?;

        // Two shells at NTU 2 each behave as one shell at NTU 1 twice in series.
        let single = one.effectiveness(Ntu::new(1.)?, cr).get::<ratio>();
        let x = ((1. - single * 0.5) / (1. - single)).powi(2);
        let expected = (x - 1.) / (x - 0.5);

        assert_relative_eq!(
            two.effectiveness(Ntu::new(2.)?, cr).get::<ratio>(),
            expected,
            max_relative = 1e-14
        );
        Ok(())
    }

    #[test]
    fn continuous_as_ratio_approaches_one() -> ConstraintResult<()> {
        let three = ShellAndTube::with_shells(3).expect("valid configuration");
        let ntu = Ntu::new(1.5)?;
        let at_one = three.effectiveness(ntu, CapacityRatio::new(1.)?).get::<ratio>();
        let near = three.effectiveness(ntu, CapacityRatio::new(1. - 1e-9)?).get::<ratio>();

        assert_relative_eq!(near, at_one, max_relative = 1e-6);
        assert_eq!(three.to_string(), "3S&T");
        Ok(())
    }
}
