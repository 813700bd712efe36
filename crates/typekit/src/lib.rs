pub mod features;
pub mod geometry;
pub mod language;
pub mod macros;
pub mod weight;

pub use features::{Alternate, AlternateRegistry, AlternateSet, ElementId};
pub use geometry::Point;
pub use language::{LanguageCode, TesterId, TranslationTable};
pub use weight::{SliderScale, StrokeError, StrokeTable, Weight, WeightSlider};
