//! Charts module - pair-grid construction and rendering

mod pair;
mod plotter;
mod renderer;

pub use pair::{build_pair_grid, PairGrid};
pub use plotter::{series_color, PairPlotter};
pub use renderer::StaticPairRenderer;
