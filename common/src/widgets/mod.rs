//! Widget components for the home monitor display.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` for platform independence.

mod controls;
mod icons;
mod labels;
mod log_panel;
mod primitives;

pub use controls::{calibration_corner, draw_calibration_done, draw_calibration_prompt, draw_toggle_button};
pub use icons::{draw_heating_element, draw_house, draw_pylon, draw_sun, draw_tank};
pub use labels::{draw_value_labels, format_watts};
pub use log_panel::LogPanel;
pub use primitives::{draw_arrow_glyph, draw_track_tile, glyph_cell};
