//! # Twine HX
//!
//! Thermal rating of shell-and-tube heat exchangers for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! The crate covers the effectiveness-NTU and P-NTU (temperature
//! effectiveness) methods: closed-form and numerically inverted relations for
//! counterflow, parallel flow, crossflow variants, multi-shell exchangers, and
//! TEMA E, G, H, and J shells, plus rating solvers that resolve the unknown
//! temperatures, duty, and conductance from a partial specification.
//!
//! ## Crate layout
//!
//! - [`models`]: [`twine_core::Model`] implementations of the rating solvers.
//! - [`support`]: The heat exchanger toolkit the models are built on.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Model-specific utility code starts in a model's internal `core` module and
//! moves to [`support`] once it is useful outside that model.

pub mod models;
pub mod support;
