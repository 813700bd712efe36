use super::GUIDE_STROKE_WIDTH;
use super::model::{CenterBlock, GroupLayout, GuideGeometry, PathId, PathLayout, Segment};
use crate::theme::Theme;
use svg::Document;
use svg::node::element::{Circle, Group, Line, Path, Text};
use typekit::{StrokeTable, Weight};

/// Everything the renderer needs besides the layout itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle<'a> {
    pub font_family: &'a str,
    pub theme: &'a Theme,
    pub strokes: &'a StrokeTable,
}

struct GroupRenderer<'a> {
    path: PathId,
    number: usize,
    group: &'a GroupLayout,
    style: RenderStyle<'a>,
}

impl<'a> GroupRenderer<'a> {
    fn new(path: PathId, number: usize, group: &'a GroupLayout, style: RenderStyle<'a>) -> Self {
        Self {
            path,
            number,
            group,
            style,
        }
    }

    fn draw(&self) -> Group {
        let mut node = Group::new().set("id", format!("{}-group{}", self.path, self.number));

        if let Some(guide) = &self.group.layout.guide {
            node = node.add(self.draw_guide_circle(guide));
            if self.group.markers {
                node = node
                    .add(self.draw_marker(&guide.start_marker))
                    .add(self.draw_marker(&guide.end_marker));
            }
        }

        for glyph in &self.group.layout.glyphs {
            let (x, y) = (glyph.position.x, glyph.position.y);
            let text = glyph_text(glyph.character.to_string(), self.group.request.weight, self.path)
                .set("x", x)
                .set("y", y)
                .set("font-size", self.group.request.font_size)
                .set("font-family", self.style.font_family)
                .set("fill", self.group.request.color.to_string())
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("transform", format!("rotate({},{},{})", glyph.rotation, x, y));
            node = node.add(text);
        }
        node
    }

    fn draw_guide_circle(&self, guide: &GuideGeometry) -> Circle {
        Circle::new()
            .set("cx", guide.center.x)
            .set("cy", guide.center.y)
            .set("r", guide.radius)
            .set("fill", "none")
            .set("stroke", self.style.theme.guide.to_string())
            .set("stroke-width", GUIDE_STROKE_WIDTH)
    }

    fn draw_marker(&self, marker: &Segment) -> Line {
        Line::new()
            .set("x1", marker.from.x)
            .set("y1", marker.from.y)
            .set("x2", marker.to.x)
            .set("y2", marker.to.y)
            .set("stroke", self.style.theme.guide.to_string())
            .set("stroke-width", GUIDE_STROKE_WIDTH)
    }
}

fn glyph_text(content: String, weight: Weight, path: PathId) -> Text {
    Text::new(content)
        .set("class", format!("path-text weight-{}", weight.value()))
        .set("font-weight", weight.value().to_string())
        .set("font-variation-settings", weight.variation_settings())
        .set("data-path-text", path.to_string())
}

fn draw_center_block(block: &CenterBlock, path: PathId, style: RenderStyle) -> Group {
    block
        .lines
        .iter()
        .enumerate()
        .fold(
            Group::new().set("id", format!("{}-center", path)),
            |node, (i, line)| {
                node.add(
                    glyph_text(line.text.clone(), block.weight, path)
                        .set("id", format!("{}-center{}", path, i + 1))
                        .set("x", line.position.x)
                        .set("y", line.position.y)
                        .set("font-size", block.font_size)
                        .set("font-family", style.font_family)
                        .set("fill", style.theme.glyph.to_string())
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "middle"),
                )
            },
        )
}

fn draw_stroke_paths(layout: &PathLayout, paths: &[String], style: RenderStyle) -> Group {
    let width = style.strokes.width(layout.weight);
    paths.iter().fold(
        Group::new().set("id", format!("{}-strokes", layout.id)),
        |node, d| {
            node.add(
                Path::new()
                    .set("d", d.as_str())
                    .set("fill", "none")
                    .set("stroke", style.theme.glyph.to_string())
                    .set("stroke-width", width)
                    .set("data-svg-stroke", layout.id.to_string()),
            )
        },
    )
}

/// Builds a fresh document for one path; nothing from a previous render is
/// reused.
pub fn draw(layout: &PathLayout, stroke_paths: &[String], style: RenderStyle) -> Document {
    let size = layout.size;
    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, size, size))
        .set("width", size)
        .set("height", size);

    if !stroke_paths.is_empty() {
        document = document.add(draw_stroke_paths(layout, stroke_paths, style));
    }

    for (i, group) in layout.groups.iter().enumerate() {
        document = document.add(GroupRenderer::new(layout.id, i + 1, group, style).draw());
    }

    if let Some(block) = &layout.center_block {
        document = document.add(draw_center_block(block, layout.id, style));
    }

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::model::{GroupState, PathState, PathVariant};
    use crate::theme::Color;

    fn state(variant: PathVariant, show_guide: bool) -> PathState {
        PathState {
            id: PathId::Path3,
            variant,
            groups: vec![
                GroupState {
                    text: "TOP".into(),
                    radius: 150.0,
                    font_size: 20.0,
                    color: Color::new(0, 9, 249),
                    show_guide,
                    start_angle: 300.0,
                    end_angle: 60.0,
                    reversed: false,
                },
                GroupState {
                    text: "UNDER".into(),
                    radius: 110.0,
                    font_size: 20.0,
                    color: Color::new(0, 9, 249),
                    show_guide: false,
                    start_angle: 120.0,
                    end_angle: 240.0,
                    reversed: true,
                },
            ],
            center_lines: vec!["PEACE".into(), "AND".into(), "LOVE".into()],
            center_font_size: 24.0,
            stroke_paths: vec!["M 0 0 L 10 10".into()],
        }
    }

    fn render(state: &PathState, weight: Weight) -> String {
        let theme = Theme::default();
        let strokes = StrokeTable::default();
        let style = RenderStyle {
            font_family: "Courier New, monospace",
            theme: &theme,
            strokes: &strokes,
        };
        draw(&state.layout(weight), &state.stroke_paths, style).to_string()
    }

    #[test]
    fn test_one_text_node_per_glyph_and_line() {
        let svg = render(&state(PathVariant::ArcWithCenterBlock, false), Weight::Bold);
        assert_eq!(svg.matches("<text").count(), 3 + 5 + 3);
        assert_eq!(svg.matches("font-weight=\"700\"").count(), 11);
        assert_eq!(svg.matches("data-path-text=\"path3\"").count(), 11);
        assert!(svg.contains("viewBox=\"0 0 340 340\""));
    }

    #[test]
    fn test_guide_markers_only_when_shown() {
        let hidden = render(&state(PathVariant::Arc, false), Weight::Regular);
        assert!(!hidden.contains("<circle"));
        assert!(!hidden.contains("<line"));

        let shown = render(&state(PathVariant::Arc, true), Weight::Regular);
        assert_eq!(shown.matches("<circle").count(), 1);
        assert_eq!(shown.matches("<line").count(), 2);

        let full = render(&state(PathVariant::FullCircle, true), Weight::Regular);
        assert_eq!(full.matches("<circle").count(), 1);
        assert!(!full.contains("<line"));
    }

    #[test]
    fn test_stroke_width_tracks_weight() {
        let light = render(&state(PathVariant::Arc, false), Weight::Light);
        assert!(light.contains("stroke-width=\"1.542\""));

        let bold = render(&state(PathVariant::Arc, false), Weight::Bold);
        assert!(bold.contains("stroke-width=\"4.75\""));
        assert!(bold.contains("data-svg-stroke=\"path3\""));
    }

    #[test]
    fn test_center_block_only_for_its_variant() {
        let svg = render(&state(PathVariant::Arc, false), Weight::Regular);
        assert!(!svg.contains("path3-center"));

        let svg = render(&state(PathVariant::ArcWithCenterBlock, false), Weight::Regular);
        assert!(svg.contains("id=\"path3-center2\""));
    }
}
