//! GCapricorn - Human Protein Atlas prognostics dashboard
//!
//! Loads the protein atlas table, derives per-protein prognostic summaries and
//! prioritized protein classes, and renders cross-filterable views.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
