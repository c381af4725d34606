use uom::si::f64::{Power, ThermalConductance};

use super::StreamTemperatures;

/// A partial specification of a heat exchanger's operating point.
///
/// Any combination of values may be supplied; the rating methods pick the
/// first combination that determines the exchanger and check the rest for
/// consistency.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Known {
    /// Known temperatures of the two streams, in the input's stream order.
    pub temperatures: [StreamTemperatures; 2],

    /// Heat rate leaving the first stream, `Q = C1 * (T1_in - T1_out)`.
    ///
    /// Negative when the first stream is heated.
    pub heat_rate: Option<Power>,

    /// Overall conductance (UA) of the exchanger.
    pub ua: Option<ThermalConductance>,
}

impl Known {
    /// Start from known stream temperatures.
    #[must_use]
    pub fn temperatures(first: StreamTemperatures, second: StreamTemperatures) -> Self {
        Self {
            temperatures: [first, second],
            ..Self::default()
        }
    }

    /// Add a known conductance.
    #[must_use]
    pub fn with_ua(self, ua: ThermalConductance) -> Self {
        Self {
            ua: Some(ua),
            ..self
        }
    }

    /// Add a known heat rate leaving the first stream.
    #[must_use]
    pub fn with_heat_rate(self, heat_rate: Power) -> Self {
        Self {
            heat_rate: Some(heat_rate),
            ..self
        }
    }
}
