use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::collections::BTreeMap;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

/// The five named instances of the weight axis.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
#[repr(u16)]
pub enum Weight {
    #[strum(to_string = "Thin", serialize = "100")]
    Thin = 100,
    #[strum(to_string = "Light", serialize = "300")]
    Light = 300,
    #[default]
    #[strum(to_string = "Regular", serialize = "400")]
    Regular = 400,
    #[strum(to_string = "Medium", serialize = "500")]
    Medium = 500,
    #[strum(to_string = "Bold", serialize = "700")]
    Bold = 700,
}

impl Weight {
    pub fn value(&self) -> u16 {
        *self as u16
    }

    /// Position of this weight on the five-point slider scale.
    pub fn position(&self) -> usize {
        Self::iter().position(|w| w == *self).unwrap_or(2)
    }

    /// Maps a five-point slider position to its weight. Positions outside the
    /// table resolve to `Regular`.
    pub fn from_position(position: i64) -> Self {
        usize::try_from(position)
            .ok()
            .and_then(|p| Self::iter().nth(p))
            .unwrap_or_default()
    }

    /// Nearest weight by absolute distance. Equidistant values resolve to the
    /// lower weight (200 -> Thin).
    pub fn snap(value: i64) -> Self {
        Self::iter()
            .min_by_key(|w| i64::from(w.value()).abs_diff(value))
            .unwrap_or_default()
    }

    /// Value of the `font-variation-settings` property for this weight.
    pub fn variation_settings(&self) -> String {
        format!("'wght' {}", self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SliderScale {
    /// Slider positions 0..=4 map through the weight table.
    #[default]
    Positional,
    /// Slider values are weights (100..=700, step 100).
    Raw,
}

impl SliderScale {
    pub fn bounds(&self) -> (i64, i64) {
        match self {
            Self::Positional => (0, 4),
            Self::Raw => (100, 700),
        }
    }
}

/// A weight control. Values are clamped to the control's range the way a
/// range input would clamp them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightSlider {
    scale: SliderScale,
    value: i64,
}

impl WeightSlider {
    pub fn new(scale: SliderScale, value: i64) -> Self {
        let mut slider = Self { scale, value: 0 };
        slider.set(value);
        slider
    }

    pub fn from_weight(scale: SliderScale, weight: Weight) -> Self {
        let value = match scale {
            SliderScale::Positional => weight.position() as i64,
            SliderScale::Raw => i64::from(weight.value()),
        };
        Self { scale, value }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Raw sliders write the snapped weight back into the control.
    pub fn set(&mut self, value: i64) {
        let (min, max) = self.scale.bounds();
        let clamped = value.clamp(min, max);
        self.value = match self.scale {
            SliderScale::Positional => clamped,
            SliderScale::Raw => i64::from(Weight::snap(clamped).value()),
        };
    }

    pub fn weight(&self) -> Weight {
        match self.scale {
            SliderScale::Positional => Weight::from_position(self.value),
            SliderScale::Raw => Weight::snap(self.value),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum StrokeError {
    #[error("Stroke width for {weight} must be a positive number, got {width}")]
    InvalidWidth { weight: Weight, width: f64 },
}

/// Weight to stroke-width lookup for outline artwork drawn alongside text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeTable {
    overrides: BTreeMap<Weight, f64>,
}

impl StrokeTable {
    pub fn preset(weight: Weight) -> f64 {
        match weight {
            Weight::Thin => 0.8,
            Weight::Light => 1.542,
            Weight::Regular => 2.25,
            Weight::Medium => 3.125,
            Weight::Bold => 4.75,
        }
    }

    pub fn set_override(&mut self, weight: Weight, width: f64) -> Result<(), StrokeError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(StrokeError::InvalidWidth { weight, width });
        }
        self.overrides.insert(weight, width);
        Ok(())
    }

    pub fn clear_override(&mut self, weight: Weight) {
        self.overrides.remove(&weight);
    }

    /// Unusable overrides (non-finite or not positive) can still arrive from
    /// a config file; they fall back to the Regular preset.
    pub fn width(&self, weight: Weight) -> f64 {
        match self.overrides.get(&weight) {
            Some(&w) if w.is_finite() && w > 0.0 => w,
            Some(&w) => {
                log::warn!("Ignoring stroke width override {} for {}", w, weight);
                Self::preset(Weight::Regular)
            }
            None => Self::preset(weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_mapping() {
        let weights: Vec<u16> = (0..5).map(|p| Weight::from_position(p).value()).collect();
        assert_eq!(weights, vec![100, 300, 400, 500, 700]);
        assert_eq!(Weight::from_position(5), Weight::Regular);
        assert_eq!(Weight::from_position(-1), Weight::Regular);

        for w in Weight::iter() {
            assert_eq!(Weight::from_position(w.position() as i64), w);
        }
    }

    #[test]
    fn test_snap_to_nearest() {
        assert_eq!(Weight::snap(250), Weight::Light);
        assert_eq!(Weight::snap(640), Weight::Bold);
        assert_eq!(Weight::snap(0), Weight::Thin);
        assert_eq!(Weight::snap(9000), Weight::Bold);
        assert_eq!(Weight::snap(450), Weight::Regular);
    }

    #[test]
    fn test_snap_ties_go_lower() {
        assert_eq!(Weight::snap(200), Weight::Thin);
        assert_eq!(Weight::snap(600), Weight::Medium);
        assert_eq!(Weight::snap(350), Weight::Light);
    }

    #[test]
    fn test_weight_deserialization() {
        let cases = vec![
            ("\"bold\"", Weight::Bold),
            ("\"Bold\"", Weight::Bold),
            ("\"700\"", Weight::Bold),
            ("\"thin\"", Weight::Thin),
            ("\"REGULAR\"", Weight::Regular),
            ("\"300\"", Weight::Light),
        ];

        for (json, expected) in cases {
            let deserialized: Weight = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<Weight>("\"250\"").is_err());
    }

    #[test]
    fn test_weight_names() {
        assert_eq!(Weight::Thin.to_string(), "Thin");
        assert_eq!(Weight::Medium.to_string(), "Medium");
        assert_eq!(Weight::Bold.variation_settings(), "'wght' 700");
    }

    #[test]
    fn test_raw_slider_clamps_and_snaps() {
        let mut slider = WeightSlider::new(SliderScale::Raw, 400);
        assert_eq!(slider.weight(), Weight::Regular);

        slider.set(260);
        assert_eq!(slider.value(), 300);
        assert_eq!(slider.weight(), Weight::Light);

        slider.set(5000);
        assert_eq!(slider.value(), 700);

        slider.set(-20);
        assert_eq!(slider.weight(), Weight::Thin);
    }

    #[test]
    fn test_positional_slider() {
        let mut slider = WeightSlider::from_weight(SliderScale::Positional, Weight::Light);
        assert_eq!(slider.value(), 1);

        slider.set(3);
        assert_eq!(slider.weight(), Weight::Medium);

        slider.set(12);
        assert_eq!(slider.value(), 4);
        assert_eq!(slider.weight(), Weight::Bold);
    }

    #[test]
    fn test_stroke_table() {
        let mut table = StrokeTable::default();
        assert_eq!(table.width(Weight::Light), 1.542);

        table.set_override(Weight::Light, 1.7).unwrap();
        assert_eq!(table.width(Weight::Light), 1.7);

        table.clear_override(Weight::Light);
        assert_eq!(table.width(Weight::Light), 1.542);
    }

    #[test]
    fn test_stroke_override_rejects_unusable_widths() {
        let mut table = StrokeTable::default();
        table.set_override(Weight::Bold, 6.0).unwrap();

        for width in [f64::NAN, f64::INFINITY, 0.0, -1.0] {
            assert!(matches!(
                table.set_override(Weight::Bold, width),
                Err(StrokeError::InvalidWidth { weight: Weight::Bold, .. })
            ));
        }
        assert_eq!(table.width(Weight::Bold), 6.0);
    }

    #[test]
    fn test_stroke_table_deserialization() {
        let table: StrokeTable = serde_json::from_str(r#"{"thin": 1.0, "700": 5.5}"#).unwrap();
        assert_eq!(table.width(Weight::Thin), 1.0);
        assert_eq!(table.width(Weight::Bold), 5.5);
        assert_eq!(table.width(Weight::Medium), 3.125);

        let broken: StrokeTable = serde_json::from_str(r#"{"bold": -2.0}"#).unwrap();
        assert_eq!(broken.width(Weight::Bold), 2.25);
    }
}
