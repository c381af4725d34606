//! TEMA J (divided-flow) shells.

use std::fmt;

use crate::support::hx::{
    Effectiveness, HxError, Ntu, StreamCapacityRatio, effectiveness_ntu::across_singularity,
};

use super::{TemperatureEffectivenessRelation, modal, temperature_effectiveness_via};

/// A TEMA J shell: the shell fluid enters at the middle and leaves at both ends.
///
/// Stream 1 is the shell fluid. One, two, or four tube passes are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemaJ {
    tube_passes: u16,
}

impl TemaJ {
    const TUBE_PASSES: [u16; 3] = [1, 2, 4];

    /// Create a J shell with the given number of tube passes.
    ///
    /// # Errors
    ///
    /// Returns [`HxError::UnsupportedConfiguration`] unless `tube_passes` is 1, 2, or 4.
    pub fn new(tube_passes: u16) -> Result<Self, HxError> {
        if Self::TUBE_PASSES.contains(&tube_passes) {
            Ok(Self { tube_passes })
        } else {
            Err(HxError::unsupported(
                "TEMA J tube pass count",
                tube_passes,
                Self::TUBE_PASSES.map(|passes| passes.to_string()),
            ))
        }
    }

    /// Number of tube passes.
    #[must_use]
    pub const fn tube_passes(&self) -> u16 {
        self.tube_passes
    }
}

/// Divided-flow shell with a single tube pass.
///
/// The same expression describes a TEMA E shell with two tube passes in the
/// non-optimal arrangement.
pub(super) fn one_pass(ntu: f64, r: f64) -> f64 {
    across_singularity(
        r,
        2.,
        1e-6,
        || 0.5 * (1. - (1. + (-2. * ntu).exp()) / (2. * (1. + ntu))),
        |r| {
            let slow = (-ntu * (1. + r / 2.)).exp();
            let fast = (-ntu * (1. - r / 2.)).exp();
            (1. - (2. - r) * (2. + r * slow) / ((2. + r) * (2. - r * fast))) / r
        },
    )
}

impl TemperatureEffectivenessRelation for TemaJ {
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError> {
        temperature_effectiveness_via(ntu, capacity_ratio, |ntu, r1| {
            if ntu == 0. {
                return Ok(0.);
            }
            if self.tube_passes == 1 {
                return Ok(one_pass(ntu, r1));
            }
            modal::j_shell(ntu, r1, self.tube_passes.into()).ok_or_else(|| {
                HxError::SingularBalance {
                    arrangement: self.to_string(),
                    r1,
                    ntu1: ntu,
                }
            })
        })
    }
}

impl fmt::Display for TemaJ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tube_passes {
            1 => f.write_str("TEMA J (1 tube pass)"),
            n => write!(f, "TEMA J ({n} tube passes)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::ratio::ratio;

    use super::*;

    fn p1(shell: TemaJ, r1: f64, ntu1: f64) -> Result<f64, HxError> {
        let p = shell.temperature_effectiveness(Ntu::new(ntu1)?, StreamCapacityRatio::new(r1)?)?;
        Ok(p.get::<ratio>())
    }

    #[test]
    fn published_values() -> Result<(), HxError> {
        let one = TemaJ::new(1)?;
        assert_relative_eq!(p1(one, 1. / 3., 1.)?, 0.569_908_519_365_129_5, max_relative = 1e-12);
        assert_relative_eq!(p1(one, 2., 1.)?, 0.358_083_089_595_423_4, max_relative = 1e-12);

        assert_relative_eq!(
            p1(TemaJ::new(2)?, 1. / 3., 1.)?,
            0.568_887_823_231_569_3,
            max_relative = 1e-10
        );
        assert_relative_eq!(
            p1(TemaJ::new(4)?, 1. / 3., 1.)?,
            0.568_871_184_656_824_7,
            max_relative = 1e-10
        );
        Ok(())
    }

    #[test]
    fn continuous_at_ratio_two() -> Result<(), HxError> {
        let one = TemaJ::new(1)?;
        let at = p1(one, 2., 1.)?;
        assert_relative_eq!(p1(one, 2. - 1e-9, 1.)?, at, max_relative = 1e-6);
        assert_relative_eq!(p1(one, 2. + 1e-9, 1.)?, at, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn four_passes_stay_bounded_at_high_ntu() -> Result<(), HxError> {
        let p = p1(TemaJ::new(4)?, 1., 200.)?;
        assert_relative_eq!(p, 0.365_763_052_370_531_4, max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn unsupported_pass_counts() {
        for passes in [0, 3, 5, 6] {
            assert!(matches!(
                TemaJ::new(passes),
                Err(HxError::UnsupportedConfiguration { .. })
            ));
        }
    }

    #[test]
    fn display() -> Result<(), HxError> {
        assert_eq!(TemaJ::new(1)?.to_string(), "TEMA J (1 tube pass)");
        assert_eq!(TemaJ::new(4)?.to_string(), "TEMA J (4 tube passes)");
        Ok(())
    }
}
