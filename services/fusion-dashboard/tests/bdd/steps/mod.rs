//! BDD step definitions for the fusion dashboard

pub mod alerts_steps;
pub mod stats_steps;
