//! TEMA H (double split-flow) shells.

use std::fmt;

use crate::support::hx::{
    Effectiveness, HxError, Ntu, StreamCapacityRatio,
    arrangement::{counter_flow_effectiveness, parallel_flow_effectiveness},
    effectiveness_ntu::across_singularity,
};

use super::{
    PassArrangement, TemperatureEffectivenessRelation, section, temperature_effectiveness_via,
};

/// A TEMA H shell with two longitudinal baffles and two shell inlets.
///
/// Stream 1 is the shell fluid. One or two tube passes are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemaH {
    tube_passes: u16,
    pass_arrangement: PassArrangement,
}

impl TemaH {
    /// Create an H shell.
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
                "TEMA H tube pass count",
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
    let half = r / 2.;
    let a = -(-ntu * (1. + half) / 2.).exp_m1() / (1. + half);
    let b = counter_flow_effectiveness(ntu / 2., half);
    let e = (a + b - a * b * half) / 2.;
    e * (1. + (1. - b * half) * (1. - a * half + a * b * r)) - a * b * (1. - b * half)
}

fn two_passes_optimal(ntu: f64, r: f64) -> f64 {
    let d = -(-ntu * (4. + r) / 8.).exp_m1() / (4. / r + 1.);

    // Both terms share the removable singularity at r = 4 and grow without
    // bound above it.
    let beta = |r: f64| ntu * (4. - r) / 8.;
    let e = across_singularity(r, 4., 1e-6, || ntu / 2., |r| {
        -(-beta(r)).exp_m1() / (4. / r - 1.)
    });
    let h = across_singularity(r, 4., 1e-6, || ntu, |r| {
        -(-2. * beta(r)).exp_m1() / (4. / r - 1.)
    });

    // Everything is scaled by (1 + e)^2 so an infinite e leaves P1 = 1 / r.
    let scale = (1. + e).powi(2);
    let share = 1. / (1. + 1. / e);
    let g = (1. - d).powi(2) * (d * d / scale + share * share) + d * d;
    let denominator = scale * ((1. + h) - 4. * g / r);
    (1. - (1. - d).powi(4) / denominator) / r
}

/// Both tube passes enter on the same side of the baffles.
fn two_passes_non_optimal(ntu: f64, r: f64) -> f64 {
    let (ntu, r) = (ntu / 2., r / 4.);
    let counter = counter_flow_effectiveness(ntu, r);
    let parallel = parallel_flow_effectiveness(ntu, r);

    let (first_top_left, t) = section(counter, r, 1., 0.);
    let (first_top_right, t) = section(parallel, r, 1., t);
    let (second_top_left, t) = section(counter, r, 1., t);
    let (second_top_right, t) = section(parallel, r, 1., t);
    let (second_bottom_right, t) = section(parallel, r, second_top_right, t);
    let (second_bottom_left, t) = section(counter, r, second_top_left, t);
    let (first_bottom_right, t) = section(parallel, r, first_top_right, t);
    let (first_bottom_left, _) = section(counter, r, first_top_left, t);

    1. - (first_bottom_right + first_bottom_left + second_bottom_right + second_bottom_left) / 4.
}

impl TemperatureEffectivenessRelation for TemaH {
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

impl fmt::Display for TemaH {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tube_passes, self.pass_arrangement) {
            (1, _) => f.write_str("TEMA H (1 tube pass)"),
            (n, PassArrangement::Optimal) => write!(f, "TEMA H ({n} tube passes)"),
            (n, PassArrangement::NonOptimal) => write!(f, "TEMA H ({n} tube passes, non-optimal)"),
        }
    }
}
