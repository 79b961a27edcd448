//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;

pub use app::GCapricornApp;
pub use chart_viewer::{ChartViewer, ViewData};
pub use control_panel::{toggle_class, ControlPanel, ControlPanelAction};
