//! Text block layout.
//!
//! Sections are stacked in template order and anchored to the bottom inset,
//! centred between the left and right insets. Sections that are toggled off or
//! hold only whitespace take no space.

use std::fmt::Write;

use serde::Serialize;

use crate::style::{DividerVariant, Section, Template};
use crate::types::{Colour, Configuration};

use super::surface::{escape_xml, num};

/// Horizontal gap between the name/city text and its decoration.
const DECORATION_GAP: f32 = 12.0;
/// Length of each rule in the `Lines` divider.
const RULE_LENGTH: f32 = 40.0;
const DOT_RADIUS: f32 = 2.0;

/// One laid-out line of the text block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedText {
    pub section: Section,
    /// Text after the case transform.
    pub text: String,
    /// Horizontal centre.
    pub x: f32,
    /// Top of the line box.
    pub top: f32,
    pub line_height: f32,
}

impl PlacedText {
    fn baseline(&self, size: f32) -> f32 {
        self.top + (self.line_height + size * 0.7) / 2.0
    }
}

/// Raw text for a section, if it is switched on and non-blank.
pub fn section_text(config: &Configuration, section: Section) -> Option<&str> {
    let vis = &config.visibility;
    let text = &config.text;
    let (shown, value) = match section {
        Section::Title => (vis.show_title, &text.title),
        Section::NameCity => (vis.show_name_city, &text.divider),
        Section::Coords => (vis.show_coords, &text.subtitle),
        Section::Date => (vis.show_date, &text.date),
    };
    (shown && !value.trim().is_empty()).then_some(value.as_str())
}

/// Lay out the visible sections on a `width`×`height` surface.
pub fn layout(config: &Configuration, template: &Template, width: f32, height: f32) -> Vec<PlacedText> {
    if !config.visibility.text_block_visible() {
        return Vec::new();
    }

    let centre = template.inset.left + (width - template.inset.left - template.inset.right) / 2.0;

    let mut lines: Vec<PlacedText> = template
        .stack
        .iter()
        .filter_map(|&section| {
            let text = section_text(config, section)?;
            let typography = template.typography(section);
            Some(PlacedText {
                section,
                text: typography.display_text(text),
                x: centre,
                top: 0.0,
                line_height: typography.line_height(),
            })
        })
        .collect();

    let total = block_height(&lines, template.gap);
    let mut top = height - template.inset.bottom - total;
    for line in &mut lines {
        line.top = top;
        top += line.line_height + template.gap;
    }

    lines
}

/// Height of a stack of lines, including gaps.
pub fn block_height(lines: &[PlacedText], gap: f32) -> f32 {
    let heights: f32 = lines.iter().map(|l| l.line_height).sum();
    heights + gap * lines.len().saturating_sub(1) as f32
}

/// SVG markup for laid-out lines, or `None` when nothing is visible.
pub fn markup(template: &Template, lines: &[PlacedText]) -> Option<String> {
    if lines.is_empty() {
        return None;
    }

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<g id="text-block" font-family="{}" text-anchor="middle">"#,
        escape_xml(template.font_family)
    );

    for line in lines {
        let typography = template.typography(line.section);
        let baseline = line.baseline(typography.size);
        let _ = write!(
            out,
            r#"<text class="{}" x="{}" y="{}" font-size="{}" font-weight="{}""#,
            typography.class,
            num(line.x),
            num(baseline),
            num(typography.size),
            typography.weight
        );
        if typography.tracking != 0.0 {
            let _ = write!(out, r#" letter-spacing="{}""#, num(typography.tracking * typography.size));
        }
        if typography.italic {
            out.push_str(r#" font-style="italic""#);
        }
        let _ = write!(
            out,
            r#" fill="{}">{}</text>"#,
            typography.colour.svg_hex(),
            escape_xml(&line.text)
        );

        if line.section == Section::NameCity {
            let half = typography.estimate_width(&line.text) / 2.0;
            let mid = line.top + line.line_height / 2.0;
            decorate(&mut out, template.divider, line.x, half, mid);
        }
    }

    out.push_str("</g>");
    Some(out)
}

fn decorate(out: &mut String, variant: DividerVariant, x: f32, half_width: f32, mid: f32) {
    match variant {
        DividerVariant::Plain => {}
        DividerVariant::Lines => {
            let inner = half_width + DECORATION_GAP;
            for (from, to) in [
                (x - inner - RULE_LENGTH, x - inner),
                (x + inner, x + inner + RULE_LENGTH),
            ] {
                let _ = write!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
                    num(from),
                    num(mid),
                    num(to),
                    num(mid),
                    Colour::RULE.svg_hex()
                );
            }
        }
        DividerVariant::Dot => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                num(x + half_width + DECORATION_GAP),
                num(mid),
                num(DOT_RADIUS),
                Colour::INK.svg_hex()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleId;
    use pretty_assertions::assert_eq;

    fn sections(lines: &[PlacedText]) -> Vec<Section> {
        lines.iter().map(|l| l.section).collect()
    }

    #[test]
    fn test_standard_order() {
        let config = Configuration::default();
        let lines = layout(&config, &StyleId::Classic.template(), 600.0, 800.0);
        assert_eq!(
            sections(&lines),
            vec![Section::Title, Section::NameCity, Section::Coords, Section::Date]
        );
    }

    #[test]
    fn test_coords_first_order() {
        let config = Configuration::default();
        let lines = layout(&config, &StyleId::Hugo.template(), 600.0, 800.0);
        assert_eq!(
            sections(&lines),
            vec![Section::Title, Section::Coords, Section::NameCity, Section::Date]
        );
    }

    #[test]
    fn test_block_is_anchored_to_bottom_inset() {
        let config = Configuration::default();
        let template = StyleId::Classic.template();
        let lines = layout(&config, &template, 600.0, 800.0);
        let last = lines.last().unwrap();
        assert!((last.top + last.line_height - (800.0 - template.inset.bottom)).abs() < 1e-3);
        assert!(lines.windows(2).all(|w| w[1].top > w[0].top));
    }

    #[test]
    fn test_hidden_and_blank_sections_are_skipped() {
        let mut config = Configuration::default();
        config.visibility.show_title = false;
        config.text.date = "   ".into();
        let lines = layout(&config, &StyleId::Classic.template(), 600.0, 800.0);
        assert_eq!(sections(&lines), vec![Section::NameCity, Section::Coords]);
    }

    #[test]
    fn test_hide_text_suppresses_block() {
        let mut config = Configuration::default();
        config.visibility.hide_text = true;
        let template = StyleId::Classic.template();
        let lines = layout(&config, &template, 600.0, 800.0);
        assert!(lines.is_empty());
        assert!(markup(&template, &lines).is_none());
    }

    #[test]
    fn test_markup_escapes_text() {
        let mut config = Configuration::default();
        config.text.title = "Tom & <Jerry>".into();
        let template = StyleId::Japandi.template();
        let svg = markup(&template, &layout(&config, &template, 600.0, 800.0)).unwrap();
        assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(!svg.contains("<Jerry>"));
    }

    #[test]
    fn test_divider_decorations() {
        let config = Configuration::default();

        let classic = StyleId::Classic.template();
        let svg = markup(&classic, &layout(&config, &classic, 600.0, 800.0)).unwrap();
        assert_eq!(svg.matches("<line ").count(), 2);

        let wabi = StyleId::WabiSabi.template();
        let svg = markup(&wabi, &layout(&config, &wabi, 600.0, 800.0)).unwrap();
        assert_eq!(svg.matches("<circle ").count(), 1);
    }
}
