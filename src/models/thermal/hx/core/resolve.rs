//! Resolution of a partially specified operating point.
//!
//! Both rating methods reduce to the same problem once the exchanger relation
//! is referenced to one of the streams: two capacitance rates, a relation
//! between the reference stream's NTU and temperature effectiveness, and some
//! subset of the four temperatures, the heat rate, and UA. Everything here
//! works on SI values (kelvin, watts, watts per kelvin).

use std::fmt::Display;

use uom::si::{
    f64::{Power, ThermalConductance, ThermodynamicTemperature},
    power::watt,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::hx::HxError;

use super::{Known, RatingError};

/// Denominators smaller than this leave the temperature scale undetermined.
const DEGENERATE: f64 = 1e-12;

/// Deviations below this fraction of a value are treated as round-off.
const ROUND_OFF: f64 = 1e-9;

const TEMPERATURE_NAMES: [[&str; 2]; 2] = [
    ["stream 1 inlet temperature", "stream 1 outlet temperature"],
    ["stream 2 inlet temperature", "stream 2 outlet temperature"],
];

/// An exchanger relation referenced to one of the two streams.
pub(super) trait ReferenceRelation: Display {
    /// Temperature effectiveness of the reference stream at its NTU.
    fn effectiveness(&self, ntu: f64) -> Result<f64, RatingError>;

    /// NTU of the reference stream for a temperature effectiveness.
    fn ntu(&self, effectiveness: f64) -> Result<f64, RatingError>;
}

/// The fixed part of a rating problem.
#[derive(Debug, Clone, Copy)]
pub(super) struct Exchanger<'a, R> {
    pub relation: &'a R,
    /// Capacitance rates in W/K.
    pub rates: [f64; 2],
    /// Index of the stream the relation is referenced to.
    pub reference: usize,
    /// Whether UA plus the temperatures of a single stream is accepted.
    pub single_stream_with_ua: bool,
    /// Allowed disagreement of redundant values, as a fraction of the duty.
    pub tolerance: f64,
}

/// Which combination of knowns determined the operating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    BothInlets,
    BothOutlets,
    FirstInletSecondOutlet,
    FirstOutletSecondInlet,
    FirstStream,
    SecondStream,
    HeatRate,
    DutyFromFirstStream,
    DutyFromSecondStream,
    DutyFromHeatRate,
}

/// A fully resolved operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Resolved {
    /// Inlet temperatures in K.
    pub inlets: [f64; 2],
    /// Outlet temperatures in K.
    pub outlets: [f64; 2],
    /// Heat leaving the first stream in W.
    pub q: f64,
    /// NTU of the reference stream.
    pub ntu: f64,
    /// Temperature effectiveness of each stream.
    pub effectiveness: [f64; 2],
    /// Conductance in W/K.
    pub ua: f64,
}

impl<R: ReferenceRelation> Exchanger<'_, R> {
    /// Resolve every unknown of the operating point described by `known`.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::InsufficientSpecification`] when `known` does
    /// not determine the exchanger, [`RatingError::InconsistentSpecification`]
    /// when a redundant value disagrees with the rest, or the relation's error.
    pub fn resolve(&self, known: &Known) -> Result<Resolved, RatingError> {
        let temperatures = known
            .temperatures
            .map(|stream| [stream.inlet.map(in_kelvin), stream.outlet.map(in_kelvin)]);
        let heat_rate = known.heat_rate.map(|q| q.get::<watt>());

        let (case, resolved) = match known.ua {
            Some(ua) => self.with_ua(ua.get::<watt_per_kelvin>(), temperatures, heat_rate)?,
            None => self.without_ua(temperatures, heat_rate)?,
        };

        tracing::debug!(
            ?case,
            q = resolved.q,
            ntu = resolved.ntu,
            ua = resolved.ua,
            "resolved operating point"
        );

        self.check_consistency(&resolved, temperatures, heat_rate)?;
        Ok(resolved)
    }

    fn stream_effectivenesses(&self, reference_effectiveness: f64) -> [f64; 2] {
        let [c0, c1] = self.rates;
        let p0 = if self.reference == 0 {
            reference_effectiveness
        } else {
            reference_effectiveness * c1 / c0
        };
        [p0, p0 * c0 / c1]
    }

    fn with_ua(
        &self,
        ua: f64,
        [[t0i, t0o], [t1i, t1o]]: [[Option<f64>; 2]; 2],
        heat_rate: Option<f64>,
    ) -> Result<(Case, Resolved), RatingError> {
        if !ua.is_finite() || ua < 0.0 {
            return Err(RatingError::insufficient(format!(
                "UA must be finite and non-negative, got {ua} W/K"
            )));
        }

        let ntu = ua / self.rates[self.reference];
        let [p0, p1] = self.stream_effectivenesses(self.relation.effectiveness(ntu)?);

        // Each case gives the inlet temperature difference and the first inlet.
        let (case, delta, first_inlet) = if let Some((t0i, t1i)) = t0i.zip(t1i) {
            (Case::BothInlets, t0i - t1i, t0i)
        } else if let Some((t0o, t1o)) = t0o.zip(t1o) {
            let delta = scale(t0o - t1o, 1.0 - p0 - p1, "both outlet temperatures")?;
            (Case::BothOutlets, delta, t0o + p0 * delta)
        } else if let Some((t0i, t1o)) = t0i.zip(t1o) {
            let delta = scale(t0i - t1o, 1.0 - p1, "stream 1 inlet and stream 2 outlet")?;
            (Case::FirstInletSecondOutlet, delta, t0i)
        } else if let Some((t0o, t1i)) = t0o.zip(t1i) {
            let delta = scale(t0o - t1i, 1.0 - p0, "stream 1 outlet and stream 2 inlet")?;
            (Case::FirstOutletSecondInlet, delta, t1i + delta)
        } else if let Some((t0i, t0o)) = t0i.zip(t0o).filter(|_| self.single_stream_with_ua) {
            let delta = scale(t0i - t0o, p0, "the stream 1 temperatures")?;
            (Case::FirstStream, delta, t0i)
        } else if let Some((t1i, t1o)) = t1i.zip(t1o).filter(|_| self.single_stream_with_ua) {
            let delta = scale(t1o - t1i, p1, "the stream 2 temperatures")?;
            (Case::SecondStream, delta, t1i + delta)
        } else if let Some(q) = heat_rate {
            let delta = scale(q, self.rates[0] * p0, "the heat rate")?;
            let first_inlet = t0i
                .or(t0o.map(|t0o| t0o + p0 * delta))
                .or(t1i.map(|t1i| t1i + delta))
                .or(t1o.map(|t1o| t1o - p1 * delta + delta))
                .ok_or_else(|| {
                    RatingError::insufficient("a heat rate and UA also need one temperature")
                })?;
            (Case::HeatRate, delta, first_inlet)
        } else if self.single_stream_with_ua {
            return Err(RatingError::insufficient(
                "UA needs two temperatures, or one temperature and the heat rate",
            ));
        } else {
            return Err(RatingError::insufficient(
                "UA needs a temperature on each stream, or one temperature and the heat rate",
            ));
        };

        let second_inlet = first_inlet - delta;
        Ok((
            case,
            Resolved {
                inlets: [first_inlet, second_inlet],
                outlets: [first_inlet - p0 * delta, second_inlet + p1 * delta],
                q: self.rates[0] * p0 * delta,
                ntu,
                effectiveness: [p0, p1],
                ua,
            },
        ))
    }

    fn without_ua(
        &self,
        [[t0i, t0o], [t1i, t1o]]: [[Option<f64>; 2]; 2],
        heat_rate: Option<f64>,
    ) -> Result<(Case, Resolved), RatingError> {
        let [c0, c1] = self.rates;

        let (case, q) = if let Some((t0i, t0o)) = t0i.zip(t0o) {
            (Case::DutyFromFirstStream, c0 * (t0i - t0o))
        } else if let Some((t1i, t1o)) = t1i.zip(t1o) {
            (Case::DutyFromSecondStream, c1 * (t1o - t1i))
        } else if let Some(q) = heat_rate {
            (Case::DutyFromHeatRate, q)
        } else {
            return Err(RatingError::insufficient(
                "without UA, both temperatures of one stream or the heat rate are required",
            ));
        };

        let first_inlet = t0i
            .or(t0o.map(|t0o| t0o + q / c0))
            .ok_or_else(|| RatingError::insufficient("stream 1 needs a temperature"))?;
        let second_inlet = t1i
            .or(t1o.map(|t1o| t1o - q / c1))
            .ok_or_else(|| RatingError::insufficient("stream 2 needs a temperature"))?;

        let delta = first_inlet - second_inlet;
        let (effectiveness, ntu) = if q == 0.0 {
            ([0.0; 2], 0.0)
        } else if delta == 0.0 {
            return Err(HxError::domain_violation(
                self.relation,
                "temperature effectiveness",
                f64::INFINITY,
                1.0,
            )
            .into());
        } else {
            let effectiveness = [q / (c0 * delta), q / (c1 * delta)];
            let ntu = self.relation.ntu(effectiveness[self.reference])?;
            (effectiveness, ntu)
        };

        Ok((
            case,
            Resolved {
                inlets: [first_inlet, second_inlet],
                outlets: [first_inlet - q / c0, second_inlet + q / c1],
                q,
                ntu,
                effectiveness,
                ua: ntu * self.rates[self.reference],
            },
        ))
    }

    fn check_consistency(
        &self,
        resolved: &Resolved,
        temperatures: [[Option<f64>; 2]; 2],
        heat_rate: Option<f64>,
    ) -> Result<(), RatingError> {
        let allowed = self.tolerance * resolved.q.abs();

        for (stream, [inlet, outlet]) in temperatures.into_iter().enumerate() {
            let resolved_values = [resolved.inlets[stream], resolved.outlets[stream]];
            for (end, supplied) in [inlet, outlet].into_iter().enumerate() {
                let Some(supplied) = supplied else { continue };
                let resolved_value = resolved_values[end];
                let deviation = supplied - resolved_value;
                if self.rates[stream] * deviation.abs() > allowed
                    && !is_round_off(deviation, resolved_value)
                {
                    return Err(RatingError::InconsistentSpecification {
                        quantity: TEMPERATURE_NAMES[stream][end],
                        supplied,
                        resolved: resolved_value,
                    });
                }
            }
        }

        if let Some(supplied) = heat_rate {
            let deviation = supplied - resolved.q;
            if deviation.abs() > allowed && !is_round_off(deviation, resolved.q) {
                return Err(RatingError::InconsistentSpecification {
                    quantity: "heat rate",
                    supplied,
                    resolved: resolved.q,
                });
            }
        }

        Ok(())
    }
}

impl Resolved {
    pub fn inlet_temperatures(&self) -> [ThermodynamicTemperature; 2] {
        self.inlets.map(ThermodynamicTemperature::new::<kelvin>)
    }

    pub fn outlet_temperatures(&self) -> [ThermodynamicTemperature; 2] {
        self.outlets.map(ThermodynamicTemperature::new::<kelvin>)
    }

    pub fn heat_rate(&self) -> Power {
        Power::new::<watt>(self.q)
    }

    pub fn conductance(&self) -> ThermalConductance {
        ThermalConductance::new::<watt_per_kelvin>(self.ua)
    }
}

fn in_kelvin(temperature: ThermodynamicTemperature) -> f64 {
    temperature.get::<kelvin>()
}

/// Divide `numerator` by `denominator`, failing when the quotient is undetermined.
fn scale(numerator: f64, denominator: f64, from: &str) -> Result<f64, RatingError> {
    if denominator.abs() <= DEGENERATE {
        return Err(RatingError::insufficient(format!(
            "the inlet temperature difference cannot be recovered from {from} at this UA"
        )));
    }
    Ok(numerator / denominator)
}

fn is_round_off(deviation: f64, value: f64) -> bool {
    deviation.abs() <= ROUND_OFF * value.abs().max(1.0)
}
