//! Flat text specimens: the charset block driven by the weight buttons and
//! the editable lines/testers that carry stylistic alternates.

use crate::layout::RenderStyle;
use svg::Document;
use svg::node::element::{Group, TSpan, Text};
use typekit::{AlternateRegistry, ElementId, LanguageCode, TesterId, Weight, WeightSlider};

pub const SPECIMEN_MARGIN: f64 = 20.0;
pub const LINE_SPACING: f64 = 1.2;
pub const SPECIMEN_WIDTH: f64 = 800.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Charset {
    pub glyphs: String,
    pub columns: usize,
    pub font_size: f64,
    pub weight: Weight,
}

impl Charset {
    fn rows(&self) -> usize {
        self.glyphs.chars().count().div_ceil(self.columns.max(1))
    }

    fn height(&self) -> f64 {
        self.rows() as f64 * self.font_size * LINE_SPACING
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Specimen {
    pub id: TesterId,
    pub text: String,
    pub font_size: f64,
    /// Testers have a positional weight control; plain lines do not.
    pub slider: Option<WeightSlider>,
    pub language: Option<LanguageCode>,
}

impl Specimen {
    pub fn element(&self) -> ElementId {
        ElementId::new(self.id.as_str())
    }

    pub fn weight(&self) -> Weight {
        self.slider.map(|s| s.weight()).unwrap_or_default()
    }

    fn height(&self) -> f64 {
        self.text.lines().count().max(1) as f64 * self.font_size * LINE_SPACING
    }

    /// Inline style carrying weight, variation axis and feature settings.
    pub fn style(&self, alternates: &AlternateRegistry) -> String {
        let weight = self.weight();
        format!(
            "font-weight: {}; font-variation-settings: {}; font-feature-settings: {}",
            weight.value(),
            weight.variation_settings(),
            alternates.feature_settings(&self.element())
        )
    }
}

fn draw_charset(charset: &Charset, top: f64, style: RenderStyle) -> Group {
    let columns = charset.columns.max(1);
    let cell = (SPECIMEN_WIDTH - 2.0 * SPECIMEN_MARGIN) / columns as f64;
    let row_height = charset.font_size * LINE_SPACING;

    charset.glyphs.chars().enumerate().fold(
        Group::new()
            .set("id", "charset")
            .set("class", format!("weight-{}", charset.weight.value())),
        |node, (i, c)| {
            let (row, col) = (i / columns, i % columns);
            node.add(
                Text::new(c.to_string())
                    .set("x", SPECIMEN_MARGIN + (col as f64 + 0.5) * cell)
                    .set("y", top + (row as f64 + 1.0) * row_height)
                    .set("font-size", charset.font_size)
                    .set("font-family", style.font_family)
                    .set("fill", style.theme.glyph.to_string())
                    .set("text-anchor", "middle")
                    .set("font-weight", charset.weight.value().to_string())
                    .set("font-variation-settings", charset.weight.variation_settings()),
            )
        },
    )
}

fn draw_specimen(
    specimen: &Specimen,
    alternates: &AlternateRegistry,
    top: f64,
    style: RenderStyle,
) -> Text {
    let line_height = specimen.font_size * LINE_SPACING;
    let mut text = Text::new("")
        .set("id", specimen.id.to_string())
        .set("x", SPECIMEN_MARGIN)
        .set("y", top + line_height)
        .set("font-size", specimen.font_size)
        .set("font-family", style.font_family)
        .set("fill", style.theme.glyph.to_string())
        .set("style", specimen.style(alternates));
    if let Some(lang) = &specimen.language {
        text = text.set("lang", lang.to_string());
    }

    specimen.text.lines().enumerate().fold(text, |node, (i, line)| {
        let dy = if i == 0 { 0.0 } else { line_height };
        node.add(TSpan::new(line).set("x", SPECIMEN_MARGIN).set("dy", dy))
    })
}

pub fn draw(
    charset: &Charset,
    specimens: &[Specimen],
    alternates: &AlternateRegistry,
    style: RenderStyle,
) -> Document {
    let mut document = Document::new();
    let mut top = SPECIMEN_MARGIN;

    if !charset.glyphs.is_empty() {
        document = document.add(draw_charset(charset, top, style));
        top += charset.height() + SPECIMEN_MARGIN;
    }

    for specimen in specimens {
        document = document.add(draw_specimen(specimen, alternates, top, style));
        top += specimen.height() + SPECIMEN_MARGIN;
    }

    document
        .set("viewBox", (0.0, 0.0, SPECIMEN_WIDTH, top))
        .set("width", SPECIMEN_WIDTH)
        .set("height", top)
}
