//! Heat exchanger rating toolkit.
//!
//! Two families of relations describe how well an exchanger of a given
//! thermal size transfers heat between two streams:
//!
//! - **Effectiveness-NTU**: `ε = f(NTU, Cr)` with `NTU = UA / C_min` and
//!   `Cr = C_min / C_max`. Implemented by the types in [`arrangement`] through
//!   [`EffectivenessRelation`] and [`NtuRelation`], and selected by name with
//!   [`Arrangement`].
//! - **P-NTU (temperature effectiveness)**: `P1 = f(NTU1, R1)` referenced to
//!   stream 1, with `R1 = C1 / C2` free to exceed one. Implemented through
//!   [`TemperatureEffectivenessRelation`] by the basic arrangements and the
//!   TEMA [`TemaE`], [`TemaG`], [`TemaH`], and [`TemaJ`] shells, and selected
//!   by subtype with [`PNtuArrangement`].
//!
//! Relations that cannot be inverted in closed form use a bracketed bisection
//! search configured by [`NtuSearchConfig`].
//!
//! # Example
//!
//! ```
//! use twine_hx::support::hx::{
//!     CapacityRatio, EffectivenessRelation, HxError, Ntu, NtuRelation, PNtuArrangement,
//!     PassArrangement, StreamCapacityRatio, TemperatureEffectivenessRelation,
//!     arrangement::CounterFlow,
//! };
//! use uom::si::ratio::ratio;
//!
//! fn main() -> Result<(), HxError> {
//!     let cr = CapacityRatio::new(0.5)?;
//!     let eff = CounterFlow.effectiveness(Ntu::new(2.0)?, cr);
//!     let ntu = CounterFlow.ntu(eff, cr)?;
//!     assert!((ntu.get::<ratio>() - 2.0).abs() < 1e-10);
//!
//!     let shell = PNtuArrangement::from_subtype("H", 2, PassArrangement::Optimal)?;
//!     let p1 = shell.temperature_effectiveness(Ntu::new(1.0)?, StreamCapacityRatio::new(4.0)?)?;
//!     assert!((p1.get::<ratio>() - 0.236_695_335_246_219_1).abs() < 1e-12);
//!
//!     Ok(())
//! }
//! ```

pub mod arrangement;
mod capacitance_rate;
mod capacity_ratio;
mod effectiveness_ntu;
mod error;
mod flow;
mod ntu_search;
mod stream;
mod temperature_effectiveness;

pub use arrangement::{
    Arrangement, CounterFlow, CrossFlow, MixState, Mixed, ParallelFlow, PhaseChange,
    ShellAndTube, ShellAndTubeConfigError, Unmixed,
};
pub use capacitance_rate::CapacitanceRate;
pub use capacity_ratio::{CapacityRatio, StreamCapacityRatio};
pub use effectiveness_ntu::{Effectiveness, EffectivenessRelation, Ntu, NtuRelation};
pub use error::HxError;
pub use flow::HeatFlow;
pub use ntu_search::NtuSearchConfig;
pub use stream::Stream;
pub use temperature_effectiveness::{
    PNtuArrangement, PassArrangement, TemaE, TemaG, TemaH, TemaJ,
    TemperatureEffectivenessRelation,
};
