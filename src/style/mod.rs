//! Style templates.
//!
//! A style decides how the text block under the map looks: which sections
//! appear and in which order, the typography of each, and how the name/city
//! divider is decorated. The compositor walks `Template::stack` as given and
//! never assumes an order of its own.

mod typography;

pub use typography::Typography;

use serde::{Deserialize, Serialize};

/// Known style identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum StyleId {
    #[default]
    Classic,
    Hugo,
    Japandi,
    WabiSabi,
    Relief,
    Calligraphic,
    Veil,
    Lucas,
    Hygge,
    Bauhaus,
    Gypset,
}

impl StyleId {
    /// All styles, in listing order. The first entry is the fallback.
    pub const ALL: [StyleId; 11] = [
        StyleId::Classic,
        StyleId::Hugo,
        StyleId::Japandi,
        StyleId::WabiSabi,
        StyleId::Relief,
        StyleId::Calligraphic,
        StyleId::Veil,
        StyleId::Lucas,
        StyleId::Hygge,
        StyleId::Bauhaus,
        StyleId::Gypset,
    ];

    pub fn id(self) -> &'static str {
        match self {
            StyleId::Classic => "classic",
            StyleId::Hugo => "hugo",
            StyleId::Japandi => "japandi",
            StyleId::WabiSabi => "wabi_sabi",
            StyleId::Relief => "relief",
            StyleId::Calligraphic => "calligraphic",
            StyleId::Veil => "veil",
            StyleId::Lucas => "lucas",
            StyleId::Hygge => "hygge",
            StyleId::Bauhaus => "bauhaus",
            StyleId::Gypset => "gypset",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StyleId::Classic => "Classic",
            StyleId::Hugo => "Hugo",
            StyleId::Japandi => "Japandi",
            StyleId::WabiSabi => "Wabi-Sabi",
            StyleId::Relief => "Relief",
            StyleId::Calligraphic => "Calligraphic",
            StyleId::Veil => "Veil",
            StyleId::Lucas => "Lucas",
            StyleId::Hygge => "Hygge",
            StyleId::Bauhaus => "Bauhaus",
            StyleId::Gypset => "Gypset",
        }
    }

    /// Parse an identifier; anything unknown is `Classic`.
    pub fn from_id(id: &str) -> Self {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.id().eq_ignore_ascii_case(id))
            .unwrap_or(StyleId::ALL[0])
    }

    pub fn template(self) -> Template {
        template_for(self)
    }
}

impl From<String> for StyleId {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

/// A section of the text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Title,
    /// The name/city line, drawn with the template's divider decoration.
    NameCity,
    Coords,
    Date,
}

/// How the name/city line is decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DividerVariant {
    /// Text only.
    Plain,
    /// Text flanked by horizontal rules.
    Lines,
    /// Text followed by a small dot.
    Dot,
}

/// Distance of the text block from the poster edges, in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Inset {
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Inset {
    const fn uniform(v: f32) -> Self {
        Self {
            bottom: v,
            left: v,
            right: v,
        }
    }
}

/// Resolved layout instructions for one style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub id: StyleId,
    pub font_family: &'static str,
    pub stack: Vec<Section>,
    pub title: Typography,
    pub name_city: Typography,
    pub detail: Typography,
    pub divider: DividerVariant,
    pub inset: Inset,
    /// Vertical gap between sections.
    pub gap: f32,
}

impl Template {
    /// Typography for a section.
    pub fn typography(&self, section: Section) -> &Typography {
        match section {
            Section::Title => &self.title,
            Section::NameCity => &self.name_city,
            Section::Coords | Section::Date => &self.detail,
        }
    }
}

/// Resolve a style identifier into its template.
///
/// Unknown identifiers resolve to the first listed style ("classic").
pub fn resolve(style_id: &str) -> Template {
    StyleId::from_id(style_id).template()
}

const STANDARD: [Section; 4] = [Section::Title, Section::NameCity, Section::Coords, Section::Date];
const COORDS_FIRST: [Section; 4] = [Section::Title, Section::Coords, Section::NameCity, Section::Date];

fn template_for(id: StyleId) -> Template {
    use DividerVariant::{Dot, Lines, Plain};

    let (font_family, title, name_city, detail, divider, stack, inset): (
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        DividerVariant,
        [Section; 4],
        Inset,
    ) = match id {
        StyleId::Classic => (
            "Bebas Neue, sans-serif",
            "text-3xl tracking-wider",
            "text-sm tracking-widest",
            "text-xs text-gray-600",
            Lines,
            STANDARD,
            Inset::uniform(32.0),
        ),
        StyleId::Hugo => (
            "Barlow, sans-serif",
            "text-2xl font-bold uppercase",
            "text-sm font-semibold uppercase tracking-wide",
            "text-xs text-gray-600 tracking-wide",
            Lines,
            COORDS_FIRST,
            Inset::uniform(32.0),
        ),
        StyleId::Japandi => (
            "Made Mirage, serif",
            "text-3xl",
            "text-sm uppercase tracking-[0.2em]",
            "text-xs text-gray-700",
            Plain,
            STANDARD,
            Inset::uniform(40.0),
        ),
        StyleId::WabiSabi => (
            "Abril Fatface, serif",
            "text-2xl",
            "text-sm uppercase tracking-wide",
            "text-xs text-gray-700",
            Dot,
            COORDS_FIRST,
            Inset::uniform(40.0),
        ),
        StyleId::Relief => (
            "Bebas Neue Book, sans-serif",
            "text-4xl tracking-wide",
            "text-sm uppercase tracking-[0.3em]",
            "text-xs text-gray-600",
            Plain,
            STANDARD,
            Inset::uniform(24.0),
        ),
        StyleId::Calligraphic => (
            "Collection, serif",
            "text-4xl",
            "text-base italic",
            "text-sm",
            Plain,
            STANDARD,
            Inset {
                bottom: 40.0,
                left: 48.0,
                right: 48.0,
            },
        ),
        StyleId::Veil => (
            "Bad Script, serif",
            "text-3xl",
            "text-sm uppercase tracking-widest",
            "text-xs",
            Lines,
            COORDS_FIRST,
            Inset {
                bottom: 40.0,
                left: 32.0,
                right: 32.0,
            },
        ),
        StyleId::Lucas => (
            "Bebas Neue, sans-serif",
            "text-4xl tracking-[0.2em]",
            "text-sm uppercase tracking-[0.3em]",
            "text-xs",
            Lines,
            STANDARD,
            Inset::uniform(32.0),
        ),
        StyleId::Hygge => (
            "Inter, sans-serif",
            "text-2xl font-semibold",
            "text-sm",
            "text-xs text-gray-600",
            Plain,
            STANDARD,
            Inset::uniform(40.0),
        ),
        StyleId::Bauhaus => (
            "Barlow, sans-serif",
            "text-3xl font-black uppercase",
            "text-xs uppercase tracking-[0.25em]",
            "text-xs",
            Lines,
            COORDS_FIRST,
            Inset::uniform(32.0),
        ),
        StyleId::Gypset => (
            "Abril Fatface, serif",
            "text-3xl",
            "text-sm uppercase tracking-[0.2em]",
            "text-xs",
            Dot,
            STANDARD,
            Inset::uniform(32.0),
        ),
    };

    Template {
        id,
        font_family,
        stack: stack.to_vec(),
        title: Typography::from_class(title),
        name_city: Typography::from_class(name_city),
        detail: Typography::from_class(detail),
        divider,
        inset,
        gap: 4.0,
    }
}
