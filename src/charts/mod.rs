//! Charts module - Chart rendering

mod plotter;

pub use plotter::{ChartData, ChartPlotter, BOTH_COLOR, FAVORABLE_COLOR, UNFAVORABLE_COLOR};
