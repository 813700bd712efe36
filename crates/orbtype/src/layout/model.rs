use super::{CENTER_LINE_HEIGHT, CENTER_LINE_SLOTS, VIEWBOX_MARGIN};
use crate::theme::Color;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::collections::BTreeMap;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use typekit::geometry::{self, Point};
use typekit::{Weight, WeightSlider};

#[derive(Debug, Clone, PartialEq)]
pub struct CircularTextRequest {
    pub text: String,
    pub radius: f64,
    pub center: Point,
    /// Clock degrees; an `end_angle` below `start_angle` wraps through 360.
    pub start_angle: f64,
    pub end_angle: f64,
    pub reversed: bool,
    pub font_size: f64,
    pub color: Color,
    pub weight: Weight,
    pub show_guide: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub character: char,
    pub position: Point,
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    /// Radial tick starting on the circle and extending `length` outwards.
    fn radial(center: Point, radius: f64, length: f64, degrees: f64) -> Self {
        Self {
            from: center.on_circle(radius, degrees),
            to: center.on_circle(radius + length, degrees),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideGeometry {
    pub center: Point,
    pub radius: f64,
    pub start_marker: Segment,
    pub end_marker: Segment,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircularLayout {
    pub guide: Option<GuideGeometry>,
    /// In placement order, which is the reversed string order for reversed
    /// layouts.
    pub glyphs: Vec<GlyphPlacement>,
}

/// Distributes the characters of `req.text` at equal angular steps over
/// `[start_angle, end_angle)`.
pub fn layout_circular_text(req: &CircularTextRequest) -> CircularLayout {
    let guide = req.show_guide.then(|| GuideGeometry {
        center: req.center,
        radius: req.radius,
        start_marker: Segment::radial(req.center, req.radius, req.font_size, req.start_angle),
        end_marker: Segment::radial(req.center, req.radius, req.font_size, req.end_angle),
    });

    let mut chars: Vec<char> = req.text.chars().collect();
    if chars.is_empty() {
        return CircularLayout {
            guide,
            glyphs: Vec::new(),
        };
    }
    if req.reversed {
        chars.reverse();
    }

    let (start, end) = geometry::normalize_arc(req.start_angle, req.end_angle);
    let step = (end - start) / chars.len() as f64;

    let glyphs = chars
        .into_iter()
        .enumerate()
        .map(|(i, character)| {
            let angle = start + step * i as f64;
            GlyphPlacement {
                character,
                position: req.center.on_circle(req.radius, angle),
                // flipped so text along the bottom reads left to right
                rotation: if req.reversed { angle + 180.0 } else { angle },
            }
        })
        .collect();

    CircularLayout { guide, glyphs }
}

#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum PathId {
    #[strum(to_string = "path1", serialize = "1")]
    Path1,
    #[strum(to_string = "path2", serialize = "2")]
    Path2,
    #[strum(to_string = "path3", serialize = "3")]
    Path3,
}

impl PathId {
    /// Weight used when the path has no weight control.
    pub fn default_weight(&self) -> Weight {
        match self {
            Self::Path3 => Weight::Bold,
            _ => Weight::Regular,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathVariant {
    /// Each group spans its own start/end arc.
    #[default]
    Arc,
    /// Concentric groups over a full turn, never reversed.
    FullCircle,
    /// `Arc` plus a block of static lines around the shared center.
    ArcWithCenterBlock,
}

impl PathVariant {
    pub fn has_markers(&self) -> bool {
        !matches!(self, Self::FullCircle)
    }

    pub fn has_center_block(&self) -> bool {
        matches!(self, Self::ArcWithCenterBlock)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupState {
    pub text: String,
    pub radius: f64,
    pub font_size: f64,
    pub color: Color,
    pub show_guide: bool,
    pub start_angle: f64,
    pub end_angle: f64,
    pub reversed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupReadout {
    pub radius: f64,
    pub circumference: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl GroupReadout {
    fn new(group: &GroupState) -> Self {
        Self {
            radius: group.radius,
            circumference: geometry::circumference(group.radius),
            start_angle: group.start_angle,
            end_angle: group.end_angle,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupLayout {
    pub request: CircularTextRequest,
    pub layout: CircularLayout,
    pub readout: GroupReadout,
    pub markers: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CenterLine {
    pub text: String,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CenterBlock {
    pub lines: Vec<CenterLine>,
    pub font_size: f64,
    pub weight: Weight,
}

impl CenterBlock {
    /// The block is centred as though every slot held a line.
    fn new(lines: &[String], center: Point, font_size: f64, weight: Weight) -> Self {
        let total_height = CENTER_LINE_HEIGHT * (CENTER_LINE_SLOTS - 1) as f64;
        let start_y = center.y - total_height / 2.0;

        let lines = lines
            .iter()
            .take(CENTER_LINE_SLOTS)
            .enumerate()
            .map(|(i, text)| CenterLine {
                text: text.clone(),
                position: Point::new(center.x, start_y + i as f64 * CENTER_LINE_HEIGHT),
            })
            .collect();

        Self {
            lines,
            font_size,
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathLayout {
    pub id: PathId,
    /// Width and height of the square viewport.
    pub size: f64,
    pub center: Point,
    pub weight: Weight,
    pub groups: Vec<GroupLayout>,
    pub center_block: Option<CenterBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathState {
    pub id: PathId,
    pub variant: PathVariant,
    pub groups: Vec<GroupState>,
    pub center_lines: Vec<String>,
    pub center_font_size: f64,
    pub stroke_paths: Vec<String>,
}

impl PathState {
    pub fn max_radius(&self) -> f64 {
        self.groups.iter().map(|g| g.radius).fold(0.0, f64::max)
    }

    pub fn size(&self) -> f64 {
        self.max_radius() * 2.0 + VIEWBOX_MARGIN
    }

    pub fn center(&self) -> Point {
        let half = self.size() / 2.0;
        Point::new(half, half)
    }

    pub fn group_mut(&mut self, number: usize) -> Option<&mut GroupState> {
        number.checked_sub(1).and_then(|i| self.groups.get_mut(i))
    }

    fn request(&self, group: &GroupState, center: Point, weight: Weight) -> CircularTextRequest {
        let (start_angle, end_angle, reversed) = match self.variant {
            PathVariant::FullCircle => (0.0, 360.0, false),
            _ => (group.start_angle, group.end_angle, group.reversed),
        };

        CircularTextRequest {
            text: group.text.clone(),
            radius: group.radius,
            center,
            start_angle,
            end_angle,
            reversed,
            font_size: group.font_size,
            color: group.color,
            weight,
            show_guide: group.show_guide,
        }
    }

    /// Lays out every group around the shared center. The center depends on
    /// all radii, so there is no partial update.
    pub fn layout(&self, weight: Weight) -> PathLayout {
        let center = self.center();

        let groups = self
            .groups
            .iter()
            .map(|group| {
                let request = self.request(group, center, weight);
                let layout = layout_circular_text(&request);
                GroupLayout {
                    request,
                    layout,
                    readout: GroupReadout::new(group),
                    markers: self.variant.has_markers(),
                }
            })
            .collect();

        let center_block = self.variant.has_center_block().then(|| {
            CenterBlock::new(&self.center_lines, center, self.center_font_size, weight)
        });

        PathLayout {
            id: self.id,
            size: self.size(),
            center,
            weight,
            groups,
            center_block,
        }
    }
}

/// Current weight of each path, read from that path's weight control.
#[derive(Debug, Clone, Default)]
pub struct WeightState {
    sliders: BTreeMap<PathId, WeightSlider>,
}

impl WeightState {
    pub fn insert(&mut self, path: PathId, slider: WeightSlider) {
        self.sliders.insert(path, slider);
    }

    pub fn slider(&self, path: PathId) -> Option<&WeightSlider> {
        self.sliders.get(&path)
    }

    /// Moves the control of `path`. Returns `None` when the path has no
    /// control.
    pub fn set(&mut self, path: PathId, value: i64) -> Option<Weight> {
        self.sliders.get_mut(&path).map(|slider| {
            slider.set(value);
            slider.weight()
        })
    }

    pub fn resolve(&self, path: PathId) -> Weight {
        self.sliders
            .get(&path)
            .map(WeightSlider::weight)
            .unwrap_or_else(|| path.default_weight())
    }
}
