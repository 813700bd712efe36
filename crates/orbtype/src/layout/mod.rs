pub mod model;
pub mod view;

pub use model::{
    CenterBlock, CircularLayout, CircularTextRequest, GlyphPlacement, GroupLayout, GroupReadout,
    GroupState, GuideGeometry, PathId, PathLayout, PathState, PathVariant, Segment, WeightState,
    layout_circular_text,
};
pub use view::{RenderStyle, draw};

pub const VIEWBOX_MARGIN: f64 = 40.0; // added to the diameter of the largest circle
pub const MAX_RADIUS: f64 = 5000.0;
pub const MAX_GROUPS: usize = 3;
pub const CENTER_LINE_SLOTS: usize = 4;
pub const CENTER_LINE_HEIGHT: f64 = 40.0;
pub const DEFAULT_FONT_SIZE: f64 = 20.0;
pub const GUIDE_STROKE_WIDTH: f64 = 1.0;
pub const DEFAULT_FONT_FAMILY: &str = "Courier New, monospace";
