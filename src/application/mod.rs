//! Application layer: Use cases and services.
//!
//! Services validate caller input, run the domain calculations against the
//! chart set provided by a store, and assemble the results the presentation
//! layer displays.

mod cardio;
mod renal;

pub use cardio::{CardioAssessment, CardioService};
pub use renal::{GfrAssessment, RenalService};
