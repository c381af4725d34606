//! Results types for rated heat exchangers.

use uom::si::f64::{Power, ThermalConductance};

use crate::support::{
    constraint::ConstraintResult,
    hx::{
        CapacitanceRate, CapacityRatio, Effectiveness, Ntu, Stream, StreamCapacityRatio,
    },
};

use super::resolve::Resolved;

/// A heat exchanger rated with the effectiveness-NTU method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectivenessNtuResults {
    /// Heat leaving the hot stream.
    pub q: Power,

    /// The hot and cold streams, in input order.
    pub streams: [Stream; 2],

    /// Smaller of the two capacitance rates.
    pub c_min: CapacitanceRate,

    /// Larger of the two capacitance rates.
    pub c_max: CapacitanceRate,

    /// `Cmin / Cmax`.
    pub capacity_ratio: CapacityRatio,

    /// NTU referenced to `Cmin`.
    pub ntu: Ntu,

    /// Overall conductance.
    pub ua: ThermalConductance,

    /// Heat transferred over the maximum possible.
    pub effectiveness: Effectiveness,
}

/// A heat exchanger rated with the P-NTU method.
///
/// Each dimensionless group is reported for both streams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PNtuResults {
    /// Heat leaving stream 1.
    pub q: Power,

    /// Streams 1 and 2, in input order.
    pub streams: [Stream; 2],

    /// Temperature effectiveness of stream 1.
    pub p1: Effectiveness,

    /// Temperature effectiveness of stream 2.
    pub p2: Effectiveness,

    /// `C1 / C2`.
    pub r1: StreamCapacityRatio,

    /// `C2 / C1`.
    pub r2: StreamCapacityRatio,

    /// `UA / C1`.
    pub ntu1: Ntu,

    /// `UA / C2`.
    pub ntu2: Ntu,

    /// Overall conductance.
    pub ua: ThermalConductance,
}

fn streams(
    capacitance_rates: [CapacitanceRate; 2],
    resolved: &Resolved,
) -> ConstraintResult<[Stream; 2]> {
    let inlets = resolved.inlet_temperatures();
    let outlets = resolved.outlet_temperatures();
    Ok([
        Stream::from_temperatures(capacitance_rates[0], inlets[0], outlets[0])?,
        Stream::from_temperatures(capacitance_rates[1], inlets[1], outlets[1])?,
    ])
}

impl EffectivenessNtuResults {
    pub(super) fn new(
        capacitance_rates: [CapacitanceRate; 2],
        c_min_index: usize,
        resolved: &Resolved,
    ) -> ConstraintResult<Self> {
        let c_min = capacitance_rates[c_min_index];
        let c_max = capacitance_rates[1 - c_min_index];
        Ok(Self {
            q: resolved.heat_rate(),
            streams: streams(capacitance_rates, resolved)?,
            c_min,
            c_max,
            capacity_ratio: CapacityRatio::from_capacitance_rates(capacitance_rates),
            ntu: Ntu::new(resolved.ntu)?,
            ua: resolved.conductance(),
            effectiveness: Effectiveness::from_raw(resolved.effectiveness[c_min_index])?,
        })
    }
}

impl PNtuResults {
    pub(super) fn new(
        capacitance_rates: [CapacitanceRate; 2],
        resolved: &Resolved,
    ) -> ConstraintResult<Self> {
        let [c1, c2] = capacitance_rates;
        let ua = resolved.conductance();
        Ok(Self {
            q: resolved.heat_rate(),
            streams: streams(capacitance_rates, resolved)?,
            p1: Effectiveness::from_raw(resolved.effectiveness[0])?,
            p2: Effectiveness::from_raw(resolved.effectiveness[1])?,
            r1: StreamCapacityRatio::from_capacitance_rates([c1, c2]),
            r2: StreamCapacityRatio::from_capacitance_rates([c2, c1]),
            ntu1: Ntu::from_conductance_and_capacitance_rate(ua, c1)?,
            ntu2: Ntu::from_conductance_and_capacitance_rate(ua, c2)?,
            ua,
        })
    }
}
