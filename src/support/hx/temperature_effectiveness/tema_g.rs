//! TEMA G (split-flow) shells.

use std::fmt;

use crate::support::hx::{
    Effectiveness, HxError, Ntu, StreamCapacityRatio,
    arrangement::{counter_flow_effectiveness, parallel_flow_effectiveness},
    effectiveness_ntu::across_singularity,
};

use super::{
    PassArrangement, TemperatureEffectivenessRelation, section, temperature_effectiveness_via,
};

/// A TEMA G shell with a single longitudinal baffle and a central shell inlet.
///
/// Stream 1 is the shell fluid. One or two tube passes are supported, and the
/// two-pass shell distinguishes its optimal and non-optimal arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemaG {
    tube_passes: u16,
    pass_arrangement: PassArrangement,
}

impl TemaG {
    /// Create a G shell.
    ///
    /// # Errors
    ///
    /// Returns [`HxError::UnsupportedConfiguration`] unless `tube_passes` is 1 or 2.
    pub fn new(tube_passes: u16, pass_arrangement: PassArrangement) -> Result<Self, HxError> {
        match tube_passes {
            1 | 2 => Ok(Self {
                tube_passes,
                pass_arrangement,
            }),
            other => Err(HxError::unsupported(
                "TEMA G tube pass count",
                other,
                ["1", "2"],
            )),
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
}

fn one_pass(ntu: f64, r: f64) -> f64 {
    let a = -(-ntu * (1. + r) / 2.).exp_m1() / (1. + r);
    let b = counter_flow_effectiveness(ntu / 2., r);
    a + b - a * b * (1. + r) + r * a * b * b
}

fn two_passes_optimal(ntu: f64, r: f64) -> f64 {
    let alpha = (-ntu * (2. + r) / 4.).exp();

    // Reciprocal of the tube-side growth term, which is unbounded above r = 2.
    let b_inv = across_singularity(
        r,
        2.,
        1e-6,
        || 1. / (1. + ntu * (2. + r) / 2.),
        |r| {
            let beta = (-ntu * (2. - r).abs() / 2.).exp();
            if r < 2. {
                (2. - r) / (4. - beta * (2. + r))
            } else {
                (r - 2.) * beta / (2. + r - 4. * beta)
            }
        },
    );
    let a = -2. * r * (1. - alpha).powi(2) / (2. + r);
    (1. - alpha * alpha * b_inv) / ((a + 2.) * b_inv + r)
}

/// Both tube passes enter on the same side of the baffle.
///
/// Each half of the shell is split into quarter sections evaluated in the
/// order the tube fluid visits them.
fn two_passes_non_optimal(ntu: f64, r: f64) -> f64 {
    let (ntu, r) = (ntu / 2., r / 2.);
    let counter = counter_flow_effectiveness(ntu, r);
    let parallel = parallel_flow_effectiveness(ntu, r);

    let (top_left, t) = section(counter, r, 1., 0.);
    let (top_right, t) = section(parallel, r, 1., t);
    let (bottom_right, t) = section(parallel, r, top_right, t);
    let (bottom_left, _) = section(counter, r, top_left, t);

    1. - (bottom_right + bottom_left) / 2.
}

impl TemperatureEffectivenessRelation for TemaG {
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError> {
        temperature_effectiveness_via(ntu, capacity_ratio, |ntu, r1| {
            if ntu == 0. {
                return Ok(0.);
            }
            Ok(match (self.tube_passes, self.pass_arrangement) {
                (1, _) => one_pass(ntu, r1),
                (_, PassArrangement::Optimal) => two_passes_optimal(ntu, r1),
                (_, PassArrangement::NonOptimal) => two_passes_non_optimal(ntu, r1),
            })
        })
    }
}

impl fmt::Display for TemaG {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tube_passes, self.pass_arrangement) {
            (1, _) => f.write_str("TEMA G (1 tube pass)"),
            (n, PassArrangement::Optimal) => write!(f, "TEMA G ({n} tube passes)"),
            (n, PassArrangement::NonOptimal) => write!(f, "TEMA G ({n} tube passes, non-optimal)"),
        }
    }
}
