//! Temperature effectiveness (P-NTU) relations.
//!
//! A temperature effectiveness `P1 = (T1i - T1o) / (T1i - T2i)` is referenced
//! to stream 1 together with `R1 = C1 / C2` and `NTU1 = UA / C1`. Because the
//! reference stream need not be the one with the smaller capacitance rate,
//! `R1` may exceed one, which lets a single relation describe an exchanger
//! whose tube-side and shell-side roles are fixed by its geometry.
//!
//! The basic arrangements ([`CounterFlow`](super::CounterFlow),
//! [`ParallelFlow`](super::ParallelFlow), and [`CrossFlow`](super::CrossFlow))
//! implement [`TemperatureEffectivenessRelation`] with stream 1 as their
//! reference stream. TEMA shells live here, with stream 1 on the shell side.

mod chart;
mod modal;
mod tema_e;
mod tema_g;
mod tema_h;
mod tema_j;

use std::fmt::Display;

use uom::si::ratio::ratio;

use super::{
    Effectiveness, HxError, Ntu, NtuSearchConfig, StreamCapacityRatio, ntu_search,
};

pub use chart::PNtuArrangement;
pub use tema_e::TemaE;
pub use tema_g::TemaG;
pub use tema_h::TemaH;
pub use tema_j::TemaJ;

/// Trait for computing temperature effectiveness from NTU.
pub trait TemperatureEffectivenessRelation {
    /// Calculate the temperature effectiveness `P1` given `NTU1` and `R1`.
    ///
    /// # Errors
    ///
    /// Returns [`HxError`] if the shell energy balance cannot be solved.
    fn temperature_effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: StreamCapacityRatio,
    ) -> Result<Effectiveness, HxError>;

    /// Calculate `NTU1` for a temperature effectiveness by numeric inversion.
    ///
    /// Relations that peak at a finite NTU return the smallest NTU reaching
    /// the target.
    ///
    /// # Errors
    ///
    /// Returns [`HxError::DomainViolation`] if the arrangement cannot reach
    /// `effectiveness` for this capacity ratio, or [`HxError::Convergence`]
    /// if the search does not converge.
    fn ntu_from_temperature_effectiveness(
        &self,
        effectiveness: Effectiveness,
        capacity_ratio: StreamCapacityRatio,
        search: &NtuSearchConfig,
    ) -> Result<Ntu, HxError>
    where
        Self: Display + Sized,
    {
        let target = effectiveness.get::<ratio>();
        let ntu = ntu_search::invert(self, target, search, |ntu| {
            Ntu::new(ntu)
                .map_err(HxError::from)
                .and_then(|ntu| self.temperature_effectiveness(ntu, capacity_ratio))
                .map_or(f64::NAN, |p| p.get::<ratio>())
        })?;
        Ok(Ntu::new(ntu)?)
    }
}

/// Choice between the two published arrangements of a multi-pass shell.
///
/// In the optimal arrangement the tube fluid leaves through a pass flowing
/// against the shell fluid, which gives the higher temperature effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PassArrangement {
    /// The better of the two arrangements.
    #[default]
    Optimal,
    /// The worse of the two arrangements.
    NonOptimal,
}

/// Evaluate a relation with the `R1 = 0` limit shared by every arrangement.
#[inline]
pub(crate) fn temperature_effectiveness_via(
    ntu: Ntu,
    capacity_ratio: StreamCapacityRatio,
    fn_raw: impl Fn(f64, f64) -> Result<f64, HxError>,
) -> Result<Effectiveness, HxError> {
    let r1 = capacity_ratio.get::<ratio>();
    let ntu = ntu.get::<ratio>();
    let raw = if r1 == 0.0 {
        -(-ntu).exp_m1()
    } else {
        fn_raw(ntu, r1)?
    };
    Ok(Effectiveness::from_raw(raw)?)
}

/// Mixing-cup outlet of one elementary section.
///
/// A section with temperature effectiveness `p` and ratio `r` takes the
/// reference stream in at `s` and the other stream in at `t`, both made
/// dimensionless on the overall inlet temperature difference, and returns
/// their outlet temperatures.
#[inline]
pub(crate) fn section(p: f64, r: f64, s: f64, t: f64) -> (f64, f64) {
    let difference = s - t;
    (s - p * difference, t + r * p * difference)
}
