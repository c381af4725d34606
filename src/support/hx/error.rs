use thiserror::Error;
use twine_solvers::equation::bisection;

use crate::support::constraint::ConstraintError;

/// Errors returned by heat exchanger relations and their inversions.
///
/// This enum is marked `#[non_exhaustive]` and may include additional variants
/// in future releases.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HxError {
    /// An arrangement name or pass count is not supported.
    #[error("unsupported {family} `{requested}`; valid choices: {valid}")]
    UnsupportedConfiguration {
        /// What was being selected (for example, "arrangement").
        family: &'static str,
        /// The rejected request.
        requested: String,
        /// Every accepted choice.
        valid: String,
    },

    /// A quantity lies outside the range the arrangement can reach.
    #[error("{quantity} of {value} is not reachable by {arrangement} (maximum {maximum})")]
    DomainViolation {
        /// Arrangement whose bound was violated.
        arrangement: String,
        /// Name of the offending quantity.
        quantity: &'static str,
        /// The requested value.
        value: f64,
        /// The bound for the current capacity ratio.
        maximum: f64,
    },

    /// A numeric NTU search hit its iteration limit.
    #[error(
        "NTU search for effectiveness {target} did not converge: \
         residual={residual}, iters={iters}"
    )]
    Convergence {
        /// Effectiveness being matched.
        target: f64,
        /// Best residual achieved.
        residual: f64,
        /// Iteration count performed by the solver.
        iters: usize,
    },

    /// The shell energy balance could not be solved.
    #[error("{arrangement} energy balance is singular at R1={r1}, NTU1={ntu1}")]
    SingularBalance {
        /// Shell arrangement being evaluated.
        arrangement: String,
        /// Capacity ratio referenced to stream 1.
        r1: f64,
        /// Number of transfer units referenced to stream 1.
        ntu1: f64,
    },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// A value violated its numeric constraint.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

impl HxError {
    pub(crate) fn domain_violation(
        arrangement: &impl std::fmt::Display,
        quantity: &'static str,
        value: f64,
        maximum: f64,
    ) -> Self {
        Self::DomainViolation {
            arrangement: arrangement.to_string(),
            quantity,
            value,
            maximum,
        }
    }

    pub(crate) fn unsupported(
        family: &'static str,
        requested: impl ToString,
        valid: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        Self::UnsupportedConfiguration {
            family,
            requested: requested.to_string(),
            valid: valid
                .into_iter()
                .map(|choice| format!("`{}`", choice.as_ref()))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
