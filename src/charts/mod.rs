//! Charts module - chart geometry and SVG rendering

mod plotter;
mod renderer;

pub use plotter::{ChartPlotter, PieSlice};
pub use renderer::{RenderError, StaticChartRenderer};
