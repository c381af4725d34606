//! TEMA E (single-pass shell) temperature effectiveness.

use std::fmt;

use crate::support::hx::{
    Effectiveness, HxError, Ntu, StreamCapacityRatio,
    arrangement::{counter_flow_effectiveness, parallel_flow_effectiveness},
    effectiveness_ntu::across_singularity,
};

use super::{
    PassArrangement, TemperatureEffectivenessRelation,
    modal::{self, Pass},
    temperature_effectiveness_via, tema_j,
};

/// A TEMA E shell: one shell pass over one or more tube passes.
///
/// Stream 1 is the shell fluid. One to four tube passes use published closed
/// forms; any larger even count is solved exactly from the shell differential
/// equations. With one tube pass the optimal arrangement is counterflow and
/// the non-optimal one is parallel flow.
///
/// ```
/// use twine_hx::support::hx::{
///     Ntu, PassArrangement, StreamCapacityRatio, TemaE, TemperatureEffectivenessRelation,
/// };
/// use uom::si::ratio::ratio;
///
/// let shell = TemaE::new(2, PassArrangement::Optimal).unwrap();
/// let ntu1 = Ntu::new(1.0).unwrap();
/// let r1 = StreamCapacityRatio::new(1.0 / 3.0).unwrap();
/// let p1 = shell.temperature_effectiveness(ntu1, r1).unwrap();
///
/// assert!((p1.get::<ratio>() - 0.568_961_321_766_463_4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemaE {
    tube_passes: u16,
    pass_arrangement: PassArrangement,
}

impl TemaE {
    /// Create an E shell.
    ///
    /// # Errors
    ///
    /// Returns [`HxError::UnsupportedConfiguration`] unless `tube_passes` is
    /// 1, 2, 3, 4, or an even number.
    pub fn new(tube_passes: u16, pass_arrangement: PassArrangement) -> Result<Self, HxError> {
        if matches!(tube_passes, 1..=4) || (tube_passes > 4 && tube_passes.is_multiple_of(2)) {
            Ok(Self {
                tube_passes,
                pass_arrangement,
            })
        } else {
            Err(HxError::unsupported(
                "TEMA E tube pass count",
                tube_passes,
                ["1", "2", "3", "4", "any even count"],
            ))
        }
    }

    /// Number of tube passes.
    #[must_use]
    pub const fn tube_passes(&self) -> u16 {
        self.tube_passes
    }

    /// Arrangement of the tube passes.
    #[must_use]
    pub const fn pass_arrangement(&self) -> PassArrangement {
        self.pass_arrangement
    }

    fn modal(&self, ntu: f64, r: f64, passes: &[Pass]) -> Result<f64, HxError> {
        modal::e_shell(ntu, r, passes).ok_or_else(|| HxError::SingularBalance {
            arrangement: self.to_string(),
            r1: r,
            ntu1: ntu,
        })
    }
}

fn two_passes(ntu: f64, r: f64) -> f64 {
    let root = r.hypot(1.);
    let decay = (-ntu * root).exp();
    2. / (1. + r + root * (1. + decay) / (1. - decay))
}

/// Whether the three-pass closed form keeps its precision.
///
/// Its terms grow like `exp(ntu * max(|λ1|, r) / 3)` and cancel, losing about
/// `ε exp(x)` in absolute accuracy.
fn three_passes_is_accurate(ntu: f64, r: f64) -> bool {
    let l1 = -1.5 + (9. / 4. + r * (r - 1.)).sqrt();
    ntu * l1.abs().max(r) / 3. <= 10.
}

/// Three passes with two of them against the shell flow.
fn three_passes(ntu: f64, r: f64) -> f64 {
    across_singularity(
        r,
        1.,
        1e-4,
        || {
            let (grow, decay) = ((ntu / 3.).exp(), (-ntu).exp());
            let a = ntu / 9. + 5. / 9. - grow / 2. - decay / 18.;
            let b = grow / 2. + 2. / 3. - decay / 6.;
            let c = (grow + decay) / 2.;
            1. - c / (a * c + b * b)
        },
        |r| {
            let s = (9. / 4. + r * (r - 1.)).sqrt();
            let (l1, l2) = (-1.5 + s, -1.5 - s);
            let d = l1 - l2;
            let x1 = (l1 * ntu / 3.).exp() / (2. * d);
            let x2 = (l2 * ntu / 3.).exp() / (2. * d);
            let x3 = (r * ntu / 3.).exp() / (2. * d);

            let a = x1 * (r + l1) * (r - l2) / (2. * l1) - x3 * d
                - x2 * (r + l2) * (r - l1) / (2. * l2)
                + 1. / (1. - r);
            let b = x1 * (r - l2) - x2 * (r - l1) + x3 * d;
            let c = x2 * (3. * r + l1) - x1 * (3. * r + l2) + x3 * d;
            (1. - c / (a * c + b * b)) / r
        },
    )
}

fn four_passes(ntu: f64, r: f64) -> f64 {
    let d = r.hypot(2.);
    4. / (2. * (1. + r) + d / (d * ntu / 4.).tanh() + r * (r * ntu / 4.).tanh())
}

impl TemperatureEffectivenessRelation for TemaE {
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError> {
        temperature_effectiveness_via(ntu, capacity_ratio, |ntu, r1| {
            if ntu == 0. {
                return Ok(0.);
            }
            match (self.tube_passes, self.pass_arrangement) {
                (1, PassArrangement::Optimal) => Ok(counter_flow_effectiveness(ntu, r1)),
                (1, PassArrangement::NonOptimal) => Ok(parallel_flow_effectiveness(ntu, r1)),
                (2, PassArrangement::Optimal) => Ok(two_passes(ntu, r1)),
                (2, PassArrangement::NonOptimal) => Ok(tema_j::one_pass(ntu, r1)),
                (3, PassArrangement::Optimal) if three_passes_is_accurate(ntu, r1) => {
                    Ok(three_passes(ntu, r1))
                }
                (3, PassArrangement::Optimal) => {
                    self.modal(ntu, r1, &[Pass::Against, Pass::With, Pass::Against])
                }
                (3, PassArrangement::NonOptimal) => {
                    self.modal(ntu, r1, &[Pass::With, Pass::Against, Pass::With])
                }
                (4, _) => Ok(four_passes(ntu, r1)),
                (n, _) => self.modal(ntu, r1, &Pass::alternating(Pass::With, n.into())),
            }
        })
    }
}

impl fmt::Display for TemaE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passes = self.tube_passes;
        let plural = if passes == 1 { "pass" } else { "passes" };
        match self.pass_arrangement {
            PassArrangement::Optimal => write!(f, "TEMA E ({passes} tube {plural})"),
            PassArrangement::NonOptimal => {
                write!(f, "TEMA E ({passes} tube {plural}, non-optimal)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Matrix4;
    use uom::si::ratio::ratio;

    use super::*;
    use crate::support::hx::NtuSearchConfig;

    fn p1(passes: u16, arrangement: PassArrangement, r1: f64, ntu1: f64) -> Result<f64, HxError> {
        let shell = TemaE::new(passes, arrangement)?;
        let p = shell.temperature_effectiveness(Ntu::new(ntu1)?, StreamCapacityRatio::new(r1)?)?;
        Ok(p.get::<ratio>())
    }

    #[test]
    fn published_values() -> Result<(), HxError> {
        use PassArrangement::{NonOptimal, Optimal};

        let cases = [
            (1, Optimal, 1. / 3., 1., 0.587_050_065_403_131_4),
            (1, Optimal, 1., 7., 0.875),
            (2, Optimal, 1. / 3., 1., 0.568_961_321_766_463_4),
            (2, Optimal, 1., 7., 0.585_762_076_277_608_2),
            (2, NonOptimal, 1. / 3., 1., 0.569_908_519_365_129_5),
            (2, NonOptimal, 2., 1., 0.358_083_089_595_423_4),
            (3, Optimal, 1. / 3., 1., 0.570_862_488_899_060_3),
            (3, Optimal, 1., 7., 0.636_613_206_479_246_1),
            (4, Optimal, 1. / 3., 1., 0.568_889_338_657_56),
            (4, Optimal, 1., 7., 0.557_162_880_207_590_2),
        ];

        for (passes, arrangement, r1, ntu1, expected) in cases {
            assert_relative_eq!(
                p1(passes, arrangement, r1, ntu1)?,
                expected,
                max_relative = 1e-12
            );
        }
        Ok(())
    }

    #[test]
    fn four_passes_match_the_tanh_form() -> Result<(), HxError> {
        let r1: f64 = 1. / 3.;
        let d = (4. + r1 * r1).sqrt();
        let expected = 4. / (2. * (1. + r1) + d / (d / 4.).tanh() + r1 * (r1 / 4.).tanh());

        let p = p1(4, PassArrangement::Optimal, r1, 1.)?;
        assert_relative_eq!(p, expected, max_relative = 1e-14);
        Ok(())
    }

    #[test]
    fn three_passes_non_optimal_is_solved_exactly() -> Result<(), HxError> {
        let p = p1(3, PassArrangement::NonOptimal, 3., 1.)?;
        assert_relative_eq!(p, 0.262_454_906_854_539_1, max_relative = 1e-10);

        // Fewer passes against the shell flow lose effectiveness.
        assert!(p < p1(3, PassArrangement::Optimal, 3., 1.)?);
        Ok(())
    }

    /// Transfer matrix of `[shell, pass 1, pass 2, pass 3]` temperatures from
    /// the shell inlet to the shell outlet, integrated with RK4.
    ///
    /// `directions` is +1 for a pass flowing with the shell fluid.
    fn integrated_transfer(ntu1: f64, r1: f64, directions: [f64; 3]) -> Matrix4<f64> {
        let k = ntu1 / 3.;
        let mut a = Matrix4::<f64>::zeros();
        a[(0, 0)] = -3. * k;
        for (i, direction) in directions.into_iter().enumerate() {
            a[(0, i + 1)] = k;
            a[(i + 1, 0)] = direction * k * r1;
            a[(i + 1, i + 1)] = -direction * k * r1;
        }

        let steps = 400;
        let h = 1. / f64::from(steps);
        let mut transfer = Matrix4::<f64>::identity();
        for _ in 0..steps {
            let k1 = a * transfer;
            let k2 = a * (transfer + k1 * (h / 2.));
            let k3 = a * (transfer + k2 * (h / 2.));
            let k4 = a * (transfer + k3 * h);
            transfer += (k1 + k2 * 2. + k3 * 2. + k4) * (h / 6.);
        }
        transfer
    }

    #[test]
    fn three_passes_non_optimal_matches_direct_integration() -> Result<(), HxError> {
        // Pass 1 enters at the shell inlet at zero, pass 2 takes it over at the
        // far end and hands it to pass 3 back at the shell inlet.
        let m = integrated_transfer(1., 3., [1., -1., 1.]);
        let handover = (m[(2, 0)] - m[(1, 0)]) / (m[(1, 2)] + m[(1, 3)] - m[(2, 2)] - m[(2, 3)]);
        let expected = 1. - (m[(0, 0)] + handover * (m[(0, 2)] + m[(0, 3)]));

        let p = p1(3, PassArrangement::NonOptimal, 3., 1.)?;
        assert_relative_eq!(p, expected, max_relative = 1e-10);
        Ok(())
    }

    #[test]
    fn three_passes_stay_accurate_at_large_ntu() -> Result<(), HxError> {
        let p = p1(3, PassArrangement::Optimal, 0.5, 160.)?;
        assert_relative_eq!(p, 0.997_417_485_776_378, max_relative = 1e-9);

        // The closed form has drifted by 1e-5 here.
        assert!((three_passes(160., 0.5) - p).abs() > 5e-6);
        Ok(())
    }

    #[test]
    fn three_passes_fall_back_when_the_closed_form_overflows() -> Result<(), HxError> {
        // Stream 2 cannot change temperature by more than the inlet difference.
        let p = p1(3, PassArrangement::Optimal, 2., 3000.)?;
        assert_relative_eq!(p, 0.5, max_relative = 1e-9);
        Ok(())
    }

    #[test]
    fn three_passes_continuous_at_ratio_one() -> Result<(), HxError> {
        let exact = p1(3, PassArrangement::Optimal, 1., 7.)?;
        let near = p1(3, PassArrangement::Optimal, 1. - 1e-9, 7.)?;
        assert_relative_eq!(near, exact, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn three_passes_invert_past_a_dip() -> Result<(), HxError> {
        // At R1 = 0.1, P1 falls from 0.9530 at NTU1 = 8 to 0.9510 at 32 before
        // rising to 0.9774 at 128.
        let shell = TemaE::new(3, PassArrangement::Optimal)?;
        let r1 = StreamCapacityRatio::new(0.1)?;

        let ntu = shell.ntu_from_temperature_effectiveness(
            Effectiveness::new(0.96)?,
            r1,
            &NtuSearchConfig::default(),
        )?;

        assert_relative_eq!(ntu.get::<ratio>(), 67.514_956_120_276, max_relative = 1e-8);
        assert_relative_eq!(
            shell.temperature_effectiveness(ntu, r1)?.get::<ratio>(),
            0.96,
            max_relative = 1e-10
        );
        Ok(())
    }

    #[test]
    fn many_even_passes() -> Result<(), HxError> {
        let p = p1(8, PassArrangement::Optimal, 1., 200.)?;
        assert_relative_eq!(p, 0.528_991_874_952_487_7, max_relative = 1e-9);

        // Arrangement does not matter with an even pass count.
        let r1 = 9672. / 2755.;
        let ntu1 = 300. / 9672.;
        let better = p1(10, PassArrangement::Optimal, r1, ntu1)?;
        let worse = p1(10, PassArrangement::NonOptimal, r1, ntu1)?;
        assert_relative_eq!(better, worse, max_relative = 1e-14);
        assert_relative_eq!(better * 9672. * 115., 32_212.185_563_086_336, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn unsupported_pass_counts() {
        for passes in [0, 5, 7, 9] {
            assert!(matches!(
                TemaE::new(passes, PassArrangement::Optimal),
                Err(HxError::UnsupportedConfiguration { .. })
            ));
        }
    }

    #[test]
    fn display() -> Result<(), HxError> {
        assert_eq!(
            TemaE::new(1, PassArrangement::Optimal)?.to_string(),
            "TEMA E (1 tube pass)"
        );
        assert_eq!(
            TemaE::new(2, PassArrangement::NonOptimal)?.to_string(),
            "TEMA E (2 tube passes, non-optimal)"
        );
        Ok(())
    }
}
