use crate::config::Config;
use crate::events::AppEvent;
use crate::layout::{
    GroupState, MAX_RADIUS, PathId, PathLayout, PathState, RenderStyle, WeightState,
};
use crate::specimen::{Charset, Specimen};
use crate::theme::Theme;
use std::collections::BTreeSet;
use typekit::{AlternateRegistry, SliderScale, StrokeTable, TranslationTable, Weight, WeightSlider};

/// Outputs that must be recomputed after an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dirty {
    pub paths: BTreeSet<PathId>,
    pub specimens: bool,
}

impl Dirty {
    pub fn path(id: PathId) -> Self {
        Self {
            paths: BTreeSet::from([id]),
            specimens: false,
        }
    }

    pub fn specimens() -> Self {
        Self {
            paths: BTreeSet::new(),
            specimens: true,
        }
    }

    pub fn merge(&mut self, other: Dirty) {
        self.paths.extend(other.paths);
        self.specimens |= other.specimens;
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && !self.specimens
    }
}

/// The whole interactive page: every control value and the state derived
/// from it.
#[derive(Debug, Clone)]
pub struct Showcase {
    pub paths: Vec<PathState>,
    pub weights: WeightState,
    pub charset: Charset,
    pub specimens: Vec<Specimen>,
    pub alternates: AlternateRegistry,
    pub translations: TranslationTable,
    pub strokes: StrokeTable,
    pub theme: Theme,
    pub font_family: String,
}

impl Showcase {
    pub fn from_config(config: &Config) -> Self {
        let mut weights = WeightState::default();

        let paths = config
            .paths
            .iter()
            .map(|cfg| {
                let weight = cfg.weight.unwrap_or_else(|| cfg.id.default_weight());
                weights.insert(cfg.id, WeightSlider::from_weight(SliderScale::Raw, weight));

                PathState {
                    id: cfg.id,
                    variant: cfg.variant,
                    groups: cfg
                        .groups
                        .iter()
                        .map(|g| GroupState {
                            text: g.text.clone(),
                            radius: g.radius,
                            font_size: g.font_size,
                            color: g.color.unwrap_or(config.theme.glyph),
                            show_guide: g.show_guide,
                            start_angle: g.start_angle,
                            end_angle: g.end_angle,
                            reversed: g.reversed,
                        })
                        .collect(),
                    center_lines: cfg.center_lines.clone(),
                    center_font_size: cfg.center_font_size,
                    stroke_paths: cfg.stroke_paths.clone(),
                }
            })
            .collect();

        let mut alternates = AlternateRegistry::default();
        let specimens = config
            .specimens
            .iter()
            .map(|cfg| {
                let specimen = Specimen {
                    id: cfg.id.clone(),
                    text: cfg.text.clone(),
                    font_size: cfg.font_size,
                    slider: cfg
                        .weight
                        .map(|w| WeightSlider::from_weight(SliderScale::Positional, w)),
                    language: cfg.language.clone(),
                };
                for alt in &cfg.alternates {
                    alternates.toggle(&specimen.element(), *alt, true);
                }
                specimen
            })
            .collect();

        Self {
            paths,
            weights,
            charset: Charset {
                glyphs: config.charset.glyphs.clone(),
                columns: config.charset.columns,
                font_size: config.charset.font_size,
                weight: config.charset.weight,
            },
            specimens,
            alternates,
            translations: config.translations.clone(),
            strokes: config.strokes.clone(),
            theme: config.theme,
            font_family: config.font_family.clone(),
        }
    }

    pub fn path(&self, id: PathId) -> Option<&PathState> {
        self.paths.iter().find(|p| p.id == id)
    }

    fn path_mut(&mut self, id: PathId) -> Option<&mut PathState> {
        self.paths.iter_mut().find(|p| p.id == id)
    }

    fn specimen_mut(&mut self, id: &str) -> Option<&mut Specimen> {
        self.specimens.iter_mut().find(|s| s.id.as_str() == id)
    }

    /// Current weight of a path as its weight control reads.
    pub fn resolve_current_weight(&self, id: PathId) -> Weight {
        self.weights.resolve(id)
    }

    pub fn layout_path(&self, id: PathId) -> Option<PathLayout> {
        self.path(id).map(|p| p.layout(self.resolve_current_weight(id)))
    }

    pub fn style(&self) -> RenderStyle<'_> {
        RenderStyle {
            font_family: &self.font_family,
            theme: &self.theme,
            strokes: &self.strokes,
        }
    }

    /// Paths that draw outline artwork with the stroke table.
    fn stroked_paths(&self) -> Dirty {
        Dirty {
            paths: self
                .paths
                .iter()
                .filter(|p| !p.stroke_paths.is_empty())
                .map(|p| p.id)
                .collect(),
            specimens: false,
        }
    }

    pub fn all_dirty(&self) -> Dirty {
        Dirty {
            paths: self.paths.iter().map(|p| p.id).collect(),
            specimens: true,
        }
    }

    /// Applies one control change. Changes aimed at controls that do not
    /// exist are dropped and nothing is marked dirty.
    pub fn update(&mut self, event: AppEvent) -> Dirty {
        let applied = match event {
            AppEvent::SetWeight { path, value } => {
                let weight = self.weights.set(path, value);
                if let Some(w) = weight {
                    log::debug!("{} weight is now {} ({})", path, w.value(), w);
                }
                weight.map(|_| Dirty::path(path))
            }
            AppEvent::SetText { path, group, text } => {
                self.with_group(path, group, |g| g.text = text)
            }
            AppEvent::SetRadius {
                path,
                group,
                radius,
            } => self.with_group(path, group, |g| g.radius = clamp_radius(radius)),
            AppEvent::SetStartAngle {
                path,
                group,
                degrees,
            } => self.with_group(path, group, |g| g.start_angle = clamp_angle(degrees)),
            AppEvent::SetEndAngle {
                path,
                group,
                degrees,
            } => self.with_group(path, group, |g| g.end_angle = clamp_angle(degrees)),
            AppEvent::SetGuide {
                path,
                group,
                visible,
            } => self.with_group(path, group, |g| g.show_guide = visible),
            AppEvent::SetCenterLine { line, text } => self
                .paths
                .iter_mut()
                .find(|p| p.variant.has_center_block())
                .and_then(|p| {
                    let id = p.id;
                    line.checked_sub(1)
                        .and_then(|i| p.center_lines.get_mut(i))
                        .map(|slot| {
                            *slot = text;
                            Dirty::path(id)
                        })
                }),
            AppEvent::SetTesterWeight { tester, position } => self
                .specimen_mut(&tester)
                .and_then(|s| s.slider.as_mut())
                .map(|slider| {
                    slider.set(position);
                    Dirty::specimens()
                }),
            AppEvent::ToggleAlternate {
                element,
                alternate,
                active,
            } => self
                .specimens
                .iter()
                .find(|s| s.id == element)
                .map(|s| s.element())
                .map(|id| {
                    let settings = self.alternates.toggle(&id, alternate, active);
                    log::debug!("{} font-feature-settings: {}", id, settings);
                    Dirty::specimens()
                }),
            AppEvent::SetLanguage { tester, language } => {
                let text = self.translations.lookup(&tester, &language);
                match (text, self.specimen_mut(&tester)) {
                    (Some(text), Some(specimen)) => {
                        specimen.text = text;
                        specimen.language = Some(language);
                        Some(Dirty::specimens())
                    }
                    _ => None,
                }
            }
            AppEvent::SetCharsetWeight(weight) => {
                self.charset.weight = weight;
                Some(Dirty::specimens())
            }
            AppEvent::SetStrokeWidth { weight, width } => {
                let applied = match width {
                    Some(width) => self
                        .strokes
                        .set_override(weight, width)
                        .map_err(|e| log::warn!("{}", e))
                        .is_ok(),
                    None => {
                        self.strokes.clear_override(weight);
                        true
                    }
                };
                applied.then(|| self.stroked_paths())
            }
            AppEvent::ConfigReload => None,
        };

        applied.unwrap_or_else(|| {
            log::debug!("Control change skipped: target not present");
            Dirty::default()
        })
    }

    fn with_group(
        &mut self,
        path: PathId,
        group: usize,
        apply: impl FnOnce(&mut GroupState),
    ) -> Option<Dirty> {
        self.path_mut(path)
            .and_then(|p| p.group_mut(group))
            .map(apply)
            .map(|_| Dirty::path(path))
    }
}

fn clamp_radius(radius: f64) -> f64 {
    if radius.is_nan() {
        0.0
    } else {
        radius.clamp(0.0, MAX_RADIUS)
    }
}

/// Angle sliders run from 0 to 360.
fn clamp_angle(degrees: f64) -> f64 {
    if degrees.is_nan() {
        0.0
    } else {
        degrees.clamp(0.0, 360.0)
    }
}
