//! Shape catalog.
//!
//! Static registry of the map silhouettes a poster can be cut to. Outlines are
//! stored as authored (with their own sizes and colours); the mask module is
//! responsible for turning them into stencils.

use serde::Serialize;

/// Shape every new poster starts with.
pub const DEFAULT_SHAPE_ID: &str = "circle";

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeEntry {
    pub id: &'static str,
    pub label: &'static str,
    /// Raw outline markup as authored.
    pub outline: &'static str,
}

/// Ordered, read-only list of shapes.
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    entries: Vec<ShapeEntry>,
}

impl ShapeCatalog {
    /// The shapes shipped with the application.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_SHAPES.to_vec(),
        }
    }

    /// A catalog with explicit entries (used by tests and embedders).
    pub fn from_entries(entries: Vec<ShapeEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&ShapeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const BUILTIN_SHAPES: [ShapeEntry; 8] = [
    ShapeEntry {
        id: "circle",
        label: "Circle",
        outline: r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="400" viewBox="0 0 100 100">
  <circle cx="50" cy="50" r="48" fill="#E11D48" stroke="#111827" stroke-width="1"/>
</svg>"##,
    },
    ShapeEntry {
        id: "heart",
        label: "Heart",
        outline: r##"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="460" viewBox="0 0 100 90">
  <path d="M50 88 C20 66 2 48 2 28 C2 12 14 2 28 2 C38 2 46 8 50 16 C54 8 62 2 72 2 C86 2 98 12 98 28 C98 48 80 66 50 88 Z"
        fill="#BE123C"/>
</svg>"##,
    },
    ShapeEntry {
        id: "square",
        label: "Square",
        outline: r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="300" viewBox="0 0 100 100">
  <rect x="2" y="2" width="96" height="96" fill="#0F172A"/>
</svg>"##,
    },
    ShapeEntry {
        id: "star",
        label: "Star",
        outline: r##"<svg xmlns="http://www.w3.org/2000/svg" width="240" height="240" viewBox="0 0 100 100">
  <polygon points="50,3 61,38 98,38 68,60 79,95 50,74 21,95 32,60 2,38 39,38" fill="#F59E0B" stroke="#92400E" stroke-width="2"/>
</svg>"##,
    },
    ShapeEntry {
        id: "hexagon",
        label: "Hexagon",
        outline: r##"<svg xmlns="http://www.w3.org/2000/svg" width="346" height="400" viewBox="0 0 87 100">
  <polygon points="43.5,1 86,25.5 86,74.5 43.5,99 1,74.5 1,25.5" fill="rgb(14, 116, 144)"/>
</svg>"##,
    },
    ShapeEntry {
        id: "drop",
        label: "Drop",
        outline: r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="400" viewBox="0 0 75 100">
  <path d="M37.5 2 C37.5 2 4 44 4 64 C4 84 19 98 37.5 98 C56 98 71 84 71 64 C71 44 37.5 2 37.5 2 Z" fill="#2563EB"/>
</svg>"##,
    },
    ShapeEntry {
        id: "house",
        label: "House",
        outline: r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="400" viewBox="0 0 100 100">
  <g fill="#78350F">
    <polygon points="50,4 96,44 86,44 86,96 14,96 14,44 4,44"/>
  </g>
</svg>"##,
    },
    ShapeEntry {
        id: "ring",
        label: "Ring",
        outline: r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="400" viewBox="0 0 100 100">
  <circle cx="50" cy="50" r="42" fill="none" stroke="#A21CAF" stroke-width="12"/>
</svg>"##,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_default() {
        let catalog = ShapeCatalog::builtin();
        assert!(catalog.contains(DEFAULT_SHAPE_ID));
        assert_eq!(catalog.iter().next().map(|e| e.id), Some(DEFAULT_SHAPE_ID));
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = ShapeCatalog::builtin();
        let mut ids: Vec<_> = catalog.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_unknown_id_is_absent() {
        assert!(ShapeCatalog::builtin().get("dodecahedron").is_none());
    }

    #[test]
    fn test_custom_entries_keep_order() {
        let catalog = ShapeCatalog::from_entries(vec![
            ShapeEntry {
                id: "square",
                label: "Square",
                outline: r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10"/></svg>"#,
            },
            BUILTIN_SHAPES[0].clone(),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.iter().next().map(|e| e.id), Some("square"));
        assert!(catalog.contains(DEFAULT_SHAPE_ID));
    }

    #[test]
    fn test_every_outline_parses() {
        for entry in ShapeCatalog::builtin().iter() {
            let tree = usvg::Tree::from_str(entry.outline, &usvg::Options::default());
            assert!(tree.is_ok(), "{} does not parse", entry.id);
        }
    }
}
