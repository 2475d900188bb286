//! Typography classes.
//!
//! Templates describe text with utility-class strings (`text-3xl
//! tracking-wider`). The same string is emitted on the preview surface and
//! resolved here into concrete metrics for the SVG text nodes.

use serde::Serialize;

use crate::types::Colour;

/// Concrete text metrics derived from a class string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Typography {
    /// The class string as written in the template.
    pub class: &'static str,
    /// Font size in surface units.
    pub size: f32,
    pub weight: u16,
    /// Letter spacing in em.
    pub tracking: f32,
    pub uppercase: bool,
    pub italic: bool,
    pub colour: Colour,
}

impl Typography {
    /// Resolve a class string. Unknown tokens are ignored.
    pub fn from_class(class: &'static str) -> Self {
        let mut typography = Typography {
            class,
            size: 16.0,
            weight: 400,
            tracking: 0.0,
            uppercase: false,
            italic: false,
            colour: Colour::INK,
        };

        for token in class.split_whitespace() {
            match token {
                "text-xs" => typography.size = 12.0,
                "text-sm" => typography.size = 14.0,
                "text-base" => typography.size = 16.0,
                "text-lg" => typography.size = 18.0,
                "text-xl" => typography.size = 20.0,
                "text-2xl" => typography.size = 24.0,
                "text-3xl" => typography.size = 30.0,
                "text-4xl" => typography.size = 36.0,
                "font-semibold" => typography.weight = 600,
                "font-bold" => typography.weight = 700,
                "font-black" => typography.weight = 900,
                "uppercase" => typography.uppercase = true,
                "italic" => typography.italic = true,
                "tracking-wide" => typography.tracking = 0.025,
                "tracking-wider" => typography.tracking = 0.05,
                "tracking-widest" => typography.tracking = 0.1,
                "text-gray-600" => typography.colour = Colour::rgb(75, 85, 99),
                "text-gray-700" => typography.colour = Colour::rgb(55, 65, 81),
                other => {
                    if let Some(em) = arbitrary_tracking(other) {
                        typography.tracking = em;
                    }
                }
            }
        }

        typography
    }

    /// Line box height used when stacking sections.
    pub fn line_height(&self) -> f32 {
        (self.size * 1.25).round()
    }

    /// Apply the case transform to `text`.
    pub fn display_text(&self, text: &str) -> String {
        if self.uppercase {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }

    /// Approximate advance width of `text`; good enough to place divider rules.
    pub fn estimate_width(&self, text: &str) -> f32 {
        let chars = text.chars().count() as f32;
        chars * self.size * (0.55 + self.tracking)
    }
}

/// `tracking-[0.2em]` → 0.2
fn arbitrary_tracking(token: &str) -> Option<f32> {
    token
        .strip_prefix("tracking-[")?
        .strip_suffix("em]")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_class_sizes_and_weight() {
        let t = Typography::from_class("text-3xl font-black uppercase");
        assert_eq!(t.size, 30.0);
        assert_eq!(t.weight, 900);
        assert!(t.uppercase);
        assert!(!t.italic);
    }

    #[test]
    fn test_from_class_arbitrary_tracking() {
        let t = Typography::from_class("text-sm uppercase tracking-[0.3em]");
        assert!((t.tracking - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_class_colour() {
        let t = Typography::from_class("text-xs text-gray-600");
        assert_eq!(t.colour, Colour::rgb(75, 85, 99));
        assert_eq!(t.size, 12.0);
    }

    #[test]
    fn test_unknown_tokens_ignored() {
        let t = Typography::from_class("text-base whatever-else");
        assert_eq!(t.size, 16.0);
        assert_eq!(t.weight, 400);
    }

    #[test]
    fn test_display_text_uppercases() {
        let t = Typography::from_class("uppercase");
        assert_eq!(t.display_text("France"), "FRANCE");
    }
}
