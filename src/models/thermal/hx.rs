//! Heat exchanger rating models.
//!
//! This module provides [`twine_core::Model`] implementations for rating a
//! heat exchanger from a partial specification. The computational core is in
//! the internal [`core`] module.
//!
//! ```
//! use twine_core::Model;
//! use twine_hx::{
//!     models::thermal::hx::{Known, PNtuMethod, RatingInput, StreamTemperatures},
//!     support::hx::{CapacitanceRate, PNtuArrangement, PassArrangement},
//! };
//! use uom::si::{
//!     f64::{ThermalConductance, ThermodynamicTemperature},
//!     power::watt,
//!     thermal_conductance::watt_per_kelvin,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! let shell = PNtuArrangement::from_subtype("E", 10, PassArrangement::Optimal)?;
//! let model = PNtuMethod::new(shell);
//!
//! let input = RatingInput::new(
//!     [
//!         CapacitanceRate::new::<watt_per_kelvin>(5.2 * 1860.)?,
//!         CapacitanceRate::new::<watt_per_kelvin>(1.45 * 1900.)?,
//!     ],
//!     Known::temperatures(
//!         StreamTemperatures::inlet(ThermodynamicTemperature::new::<degree_celsius>(130.)),
//!         StreamTemperatures::inlet(ThermodynamicTemperature::new::<degree_celsius>(15.)),
//!     )
//!     .with_ua(ThermalConductance::new::<watt_per_kelvin>(300.)),
//! );
//!
//! let results = model.call(&input)?;
//! assert!((results.q.get::<watt>() - 32_212.185_563_086_336).abs() < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub(crate) mod core;

pub use core::{
    EffectivenessNtuResults, Known, PNtuResults, RatingConfig, RatingError, RatingInput,
    StreamTemperatures,
};

use twine_core::Model;

use crate::support::hx::{Arrangement, PNtuArrangement};

/// Rates a heat exchanger with the effectiveness-NTU method.
///
/// Streams are ordered `[hot, cold]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectivenessNtuMethod {
    /// Flow arrangement of the exchanger.
    pub arrangement: Arrangement,

    /// Tolerances and search settings.
    pub config: RatingConfig,
}

impl EffectivenessNtuMethod {
    /// Rate `arrangement` with the default [`RatingConfig`].
    #[must_use]
    pub fn new(arrangement: Arrangement) -> Self {
        Self {
            arrangement,
            config: RatingConfig::default(),
        }
    }
}

impl Model for EffectivenessNtuMethod {
    type Input = RatingInput;
    type Output = EffectivenessNtuResults;
    type Error = RatingError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        core::effectiveness_ntu_method(&self.arrangement, input, &self.config)
    }
}

/// Rates a heat exchanger with the P-NTU method.
///
/// Streams are ordered `[stream 1, stream 2]`, stream 1 being the shell side
/// of TEMA shells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PNtuMethod {
    /// Flow arrangement or shell type of the exchanger.
    pub arrangement: PNtuArrangement,

    /// Tolerances and search settings.
    pub config: RatingConfig,
}

impl PNtuMethod {
    /// Rate `arrangement` with the default [`RatingConfig`].
    #[must_use]
    pub fn new(arrangement: PNtuArrangement) -> Self {
        Self {
            arrangement,
            config: RatingConfig::default(),
        }
    }
}

impl Model for PNtuMethod {
    type Input = RatingInput;
    type Output = PNtuResults;
    type Error = RatingError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        core::p_ntu_method(&self.arrangement, input, &self.config)
    }
}
