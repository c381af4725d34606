//! Rating of heat exchangers from a partial specification.
//!
//! A rating problem fixes both capacitance rates and the arrangement, and
//! supplies some combination of the four terminal temperatures, the heat
//! rate, and the overall conductance (UA). The solvers find the first
//! combination that determines the exchanger, resolve everything else with
//! the stream energy balances, and reject redundant values that disagree.

mod config;
mod effectiveness_ntu;
mod error;
mod input;
mod p_ntu;
mod resolve;
mod results;

pub use config::RatingConfig;
pub use effectiveness_ntu::effectiveness_ntu_method;
pub use error::RatingError;
pub use input::{Known, RatingInput, StreamTemperatures};
pub use p_ntu::p_ntu_method;
pub use results::{EffectivenessNtuResults, PNtuResults};
