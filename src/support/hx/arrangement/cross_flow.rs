//! Cross-flow effectiveness-NTU relationships.

use std::{fmt, marker::PhantomData};

use crate::support::hx::{
    CapacityRatio, Effectiveness, HxError, Ntu, NtuSearchConfig, StreamCapacityRatio,
    effectiveness_ntu::{EffectivenessRelation, NtuRelation, effectiveness_via, ntu_via},
    ntu_search,
    temperature_effectiveness::{TemperatureEffectivenessRelation, temperature_effectiveness_via},
};

/// Cross-flow heat exchanger arrangement.
///
/// `T` is the mixing state of the reference stream and `U` that of the other
/// stream. For effectiveness-NTU relations the reference stream is the one with
/// the minimum capacitance rate; for temperature effectiveness it is stream 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CrossFlow<T: MixState, U: MixState> {
    _marker: PhantomData<(T, U)>,
}

impl<T: MixState, U: MixState> CrossFlow<T, U> {
    /// Construct a cross-flow arrangement with the given mixing states.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

/// Marker type for a cross-flow stream that is mixed across the flow channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Mixed;
/// Marker type for a cross-flow stream that remains unmixed across the flow channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unmixed;

/// Trait for marker types representing the mixing state of a cross-flow stream.
pub trait MixState {
    /// Whether the stream is mixed across the flow channel.
    const MIXED: bool;
}
impl MixState for Mixed {
    const MIXED: bool = true;
}
impl MixState for Unmixed {
    const MIXED: bool = false;
}

/// Both streams unmixed (approximation).
pub(crate) fn unmixed(ntu: f64, r: f64) -> f64 {
    -((ntu.powf(0.22) / r) * (-r * ntu.powf(0.78)).exp_m1()).exp_m1()
}

/// Reference stream mixed, other stream unmixed.
pub(crate) fn reference_mixed(ntu: f64, r: f64) -> f64 {
    -(-(-(-r * ntu).exp_m1()) / r).exp_m1()
}

/// Reference stream unmixed, other stream mixed.
pub(crate) fn other_mixed(ntu: f64, r: f64) -> f64 {
    -(-r * -(-ntu).exp_m1()).exp_m1() / r
}

/// Both streams mixed.
pub(crate) fn both_mixed(ntu: f64, r: f64) -> f64 {
    if ntu == 0. {
        return 0.;
    }
    let k1 = -(-ntu).exp_m1();
    let k2 = -(-r * ntu).exp_m1();
    1. / (1. / k1 + r / k2 - 1. / ntu)
}

impl EffectivenessRelation for CrossFlow<Unmixed, Unmixed> {
    fn effectiveness(&self, ntu: Ntu, capacity_ratio: CapacityRatio) -> Effectiveness {
        effectiveness_via(ntu, capacity_ratio, unmixed)
    }
}

impl EffectivenessRelation for CrossFlow<Mixed, Unmixed> {
    fn effectiveness(&self, ntu: Ntu, capacity_ratio: CapacityRatio) -> Effectiveness {
        effectiveness_via(ntu, capacity_ratio, reference_mixed)
    }
}

impl EffectivenessRelation for CrossFlow<Unmixed, Mixed> {
    fn effectiveness(&self, ntu: Ntu, capacity_ratio: CapacityRatio) -> Effectiveness {
        effectiveness_via(ntu, capacity_ratio, other_mixed)
    }
}

impl EffectivenessRelation for CrossFlow<Mixed, Mixed> {
    fn effectiveness(&self, ntu: Ntu, capacity_ratio: CapacityRatio) -> Effectiveness {
        effectiveness_via(ntu, capacity_ratio, both_mixed)
    }
}

impl NtuRelation for CrossFlow<Unmixed, Unmixed> {
    fn ntu_with_search(
        &self,
        effectiveness: Effectiveness,
        capacity_ratio: CapacityRatio,
        search: &NtuSearchConfig,
    ) -> Result<Ntu, HxError> {
        ntu_via(
            self,
            effectiveness,
            capacity_ratio,
            |_| 1.,
            |eff, cr| ntu_search::invert(self, eff, search, |ntu| unmixed(ntu, cr)),
        )
    }
}

impl NtuRelation for CrossFlow<Mixed, Unmixed> {
    fn ntu_with_search(
        &self,
        effectiveness: Effectiveness,
        capacity_ratio: CapacityRatio,
        _search: &NtuSearchConfig,
    ) -> Result<Ntu, HxError> {
        ntu_via(
            self,
            effectiveness,
            capacity_ratio,
            |cr| -(-1. / cr).exp_m1(),
            |eff, cr| Ok(-(cr * (-eff).ln_1p()).ln_1p() / cr),
        )
    }
}

impl NtuRelation for CrossFlow<Unmixed, Mixed> {
    fn ntu_with_search(
        &self,
        effectiveness: Effectiveness,
        capacity_ratio: CapacityRatio,
        _search: &NtuSearchConfig,
    ) -> Result<Ntu, HxError> {
        ntu_via(
            self,
            effectiveness,
            capacity_ratio,
            |cr| -(-cr).exp_m1() / cr,
            |eff, cr| Ok(-((-eff * cr).ln_1p() / cr).ln_1p()),
        )
    }
}

impl NtuRelation for CrossFlow<Mixed, Mixed> {
    fn ntu_with_search(
        &self,
        effectiveness: Effectiveness,
        capacity_ratio: CapacityRatio,
        search: &NtuSearchConfig,
    ) -> Result<Ntu, HxError> {
        ntu_via(
            self,
            effectiveness,
            capacity_ratio,
            |_| 1.,
            |eff, cr| ntu_search::invert(self, eff, search, |ntu| both_mixed(ntu, cr)),
        )
    }
}

impl TemperatureEffectivenessRelation for CrossFlow<Unmixed, Unmixed> {
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError> {
        temperature_effectiveness_via(ntu, capacity_ratio, |ntu, r1| Ok(unmixed(ntu, r1)))
    }
}

impl TemperatureEffectivenessRelation for CrossFlow<Mixed, Unmixed> {
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError> {
        temperature_effectiveness_via(ntu, capacity_ratio, |ntu, r1| {
            Ok(reference_mixed(ntu, r1))
        })
    }
}

impl TemperatureEffectivenessRelation for CrossFlow<Unmixed, Mixed> {
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError> {
        temperature_effectiveness_via(ntu, capacity_ratio, |ntu, r1| Ok(other_mixed(ntu, r1)))
    }
}

impl TemperatureEffectivenessRelation for CrossFlow<Mixed, Mixed> {
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError> {
        temperature_effectiveness_via(ntu, capacity_ratio, |ntu, r1| Ok(both_mixed(ntu, r1)))
    }
}

impl<T: MixState, U: MixState> fmt::Display for CrossFlow<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match (T::MIXED, U::MIXED) {
            (false, false) => "crossflow",
            (true, false) => "crossflow, mixed Cmin",
            (false, true) => "crossflow, mixed Cmax",
            (true, true) => "crossflow, mixed 1&2",
        })
    }
}
