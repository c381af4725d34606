//! Numeric inversion of effectiveness relations.

use std::{convert::Infallible, fmt::Display};

use thiserror::Error;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;

use super::HxError;

/// Configuration for the numeric NTU search.
///
/// The search grows a bracket `[0, 1], [1, 2], [2, 4], ...` until the
/// effectiveness curve reaches the target, then bisects inside it. A step
/// where the curve falls is searched for the interior peak it passed over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NtuSearchConfig {
    /// Maximum number of bisection iterations.
    pub max_iters: usize,
    /// Absolute NTU tolerance.
    pub ntu_abs_tol: f64,
    /// Relative NTU tolerance.
    pub ntu_rel_tol: f64,
    /// Effectiveness residual tolerance.
    pub residual_tol: f64,
    /// Largest NTU the bracket may grow to.
    pub max_ntu: f64,
}

impl Default for NtuSearchConfig {
    fn default() -> Self {
        Self {
            max_iters: 200,
            ntu_abs_tol: 1e-12,
            ntu_rel_tol: 1e-12,
            residual_tol: 1e-14,
            max_ntu: 1e6,
        }
    }
}

impl NtuSearchConfig {
    pub(crate) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.ntu_abs_tol,
            x_rel_tol: self.ntu_rel_tol,
            residual_tol: self.residual_tol,
        }
    }

    fn peak_bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.ntu_abs_tol.max(1e-10),
            x_rel_tol: self.ntu_rel_tol.max(1e-10),
            residual_tol: 0.0,
        }
    }
}

/// Find the smallest NTU at which `relation` reaches `target`.
///
/// `relation` maps NTU to effectiveness and must be continuous with
/// `relation(0) = 0`. Curves with an interior peak, or that dip before rising
/// again, are followed up to `max_ntu`. Targets above everything the curve
/// reaches fail with [`HxError::DomainViolation`], reporting the largest
/// effectiveness found as the maximum.
pub(crate) fn invert(
    arrangement: &impl Display,
    target: f64,
    search: &NtuSearchConfig,
    relation: impl Fn(f64) -> f64,
) -> Result<f64, HxError> {
    if target <= 0.0 {
        return Ok(0.0);
    }

    let curve = EffectivenessCurve { relation };
    let origin = Evaluation {
        ntu: 0.0,
        effectiveness: 0.0,
    };
    let (mut before, mut lower) = (origin, origin);
    let mut upper = 1.0_f64.min(search.max_ntu);
    let mut falling = false;
    let mut highest = 0.0_f64;

    let bracket = loop {
        let reached = (curve.relation)(upper);
        if reached == target {
            return Ok(upper);
        }
        if reached > target {
            break [lower.ntu, upper];
        }
        highest = highest.max(reached);

        if reached < lower.effectiveness {
            if !falling {
                if let Some(peak) = peak(&curve, [before.ntu, upper], search) {
                    highest = highest.max(peak.effectiveness);
                    if peak.effectiveness >= target {
                        let rising_from = if peak.ntu > lower.ntu { lower } else { before };
                        break [rising_from.ntu, peak.ntu];
                    }
                }
            }
            falling = true;
        } else {
            falling = false;
        }

        if upper >= search.max_ntu {
            return Err(HxError::domain_violation(
                arrangement,
                "effectiveness",
                target,
                highest,
            ));
        }
        before = lower;
        lower = Evaluation {
            ntu: upper,
            effectiveness: reached,
        };
        upper = (upper * 2.0).min(search.max_ntu);
    };

    tracing::trace!(target, lower = bracket[0], upper = bracket[1], "bracketed NTU search");

    let problem = TargetEffectiveness { target };
    let solution = bisection::solve(
        &curve,
        &problem,
        bracket,
        &search.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(HxError::Convergence {
            target,
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    let Evaluation { ntu, .. } = solution.snapshot.output;
    tracing::trace!(target, ntu, iters = solution.iters, "converged");

    Ok(ntu)
}

/// Locate the interior maximum of a curve that rises then falls on `bracket`.
///
/// Bisects on the sign of the local slope. Returns `None` when the slope does
/// not change sign on the bracket or the curve cannot be evaluated there.
fn peak<F: Fn(f64) -> f64>(
    curve: &EffectivenessCurve<F>,
    bracket: [f64; 2],
    search: &NtuSearchConfig,
) -> Option<Evaluation> {
    let solution = bisection::solve(
        &CurveSlope { curve },
        &LevelSlope,
        bracket,
        &search.peak_bisection(),
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_negative());
            }
            None
        },
    )
    .ok()?;

    let peak = solution.snapshot.output.at;
    tracing::trace!(ntu = peak.ntu, effectiveness = peak.effectiveness, "curve peak");
    Some(peak)
}

struct EffectivenessCurve<F> {
    relation: F,
}

#[derive(Debug, Clone, Copy)]
struct Evaluation {
    ntu: f64,
    effectiveness: f64,
}

#[derive(Debug, Error)]
#[error("effectiveness is not finite at NTU {ntu}")]
struct NonFiniteEffectiveness {
    ntu: f64,
}

impl<F: Fn(f64) -> f64> Model for EffectivenessCurve<F> {
    type Input = f64;
    type Output = Evaluation;
    type Error = NonFiniteEffectiveness;

    fn call(&self, ntu: &f64) -> Result<Evaluation, Self::Error> {
        let effectiveness = (self.relation)(*ntu);
        if effectiveness.is_finite() {
            Ok(Evaluation {
                ntu: *ntu,
                effectiveness,
            })
        } else {
            Err(NonFiniteEffectiveness { ntu: *ntu })
        }
    }
}

/// Central-difference slope of an effectiveness curve.
struct CurveSlope<'a, F> {
    curve: &'a EffectivenessCurve<F>,
}

#[derive(Debug, Clone, Copy)]
struct Slope {
    at: Evaluation,
    rise: f64,
}

impl<F: Fn(f64) -> f64> Model for CurveSlope<'_, F> {
    type Input = f64;
    type Output = Slope;
    type Error = NonFiniteEffectiveness;

    fn call(&self, ntu: &f64) -> Result<Slope, Self::Error> {
        let step = 1e-7 * ntu.max(1.0);
        let ahead = self.curve.call(&(ntu + step))?;
        let behind = self.curve.call(&(ntu - step).max(0.0))?;
        Ok(Slope {
            at: self.curve.call(ntu)?,
            rise: ahead.effectiveness - behind.effectiveness,
        })
    }
}

/// Zero slope marks the peak.
struct LevelSlope;

impl EquationProblem<1> for LevelSlope {
    type Input = f64;
    type Output = Slope;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.rise])
    }
}

struct TargetEffectiveness {
    target: f64,
}

impl EquationProblem<1> for TargetEffectiveness {
    type Input = f64;
    type Output = Evaluation;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.effectiveness - self.target])
    }
}
