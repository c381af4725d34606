mod known;
mod stream_temperatures;

pub use known::Known;
pub use stream_temperatures::StreamTemperatures;

use crate::support::hx::CapacitanceRate;

/// Inputs for rating a heat exchanger.
///
/// The stream order depends on the method: the effectiveness-NTU method
/// expects `[hot, cold]`, the P-NTU method `[stream 1, stream 2]` with
/// stream 1 on the shell side of TEMA shells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingInput {
    /// Capacitance rates of the two streams.
    pub capacitance_rates: [CapacitanceRate; 2],

    /// Whatever else is known about the exchanger.
    pub known: Known,
}

impl RatingInput {
    /// Pair capacitance rates with a partial specification.
    #[must_use]
    pub fn new(capacitance_rates: [CapacitanceRate; 2], known: Known) -> Self {
        Self {
            capacitance_rates,
            known,
        }
    }
}
