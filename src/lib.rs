//! Life-cycle impact estimation for metal production.
//!
//! [`assessment::estimate_missing`] fills unknown inputs from the
//! [`reference`] tables, [`assessment::calc_phase1`] turns a filled input
//! into GWP, energy, water and hotspot shares.

pub mod assessment;
pub mod config;
pub mod error;
pub mod output;
pub mod reference;

pub use assessment::{
    calc_phase1, check_readiness, estimate_missing, validate_percent_sum, AssessmentInput,
    AssessmentResult,
};
pub use error::ConfigurationError;
