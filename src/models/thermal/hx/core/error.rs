use thiserror::Error;

use crate::support::{constraint::ConstraintError, hx::HxError};

/// Errors that can occur while rating a heat exchanger.
#[derive(Debug, Error)]
pub enum RatingError {
    /// The supplied values do not determine the exchanger.
    #[error("insufficient specification: {0}")]
    InsufficientSpecification(String),

    /// A redundant supplied value disagrees with the resolved operating point.
    ///
    /// Temperatures are reported in kelvin and heat rates in watts.
    #[error("{quantity} of {supplied} disagrees with the resolved value {resolved}")]
    InconsistentSpecification {
        /// The offending quantity.
        quantity: &'static str,

        /// The value that was supplied.
        supplied: f64,

        /// The value implied by the rest of the specification.
        resolved: f64,
    },

    /// An effectiveness relation or its inversion failed.
    #[error("heat exchanger relation failed")]
    Hx(#[from] HxError),

    /// A value violated its numeric constraint.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

impl RatingError {
    pub(super) fn insufficient(message: impl Into<String>) -> Self {
        Self::InsufficientSpecification(message.into())
    }
}
