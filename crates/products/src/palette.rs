//! Suggested color names and their display values.
//!
//! This is the only place the name → hex mapping lives; every rendering
//! surface (reports, the color hint endpoint) reads from [`PALETTE`].

use serde::Serialize;

/// Hex used for colors outside the palette.
pub const FALLBACK_HEX: &str = "#6b7280";

/// Border drawn around white swatches so they stay visible on paper.
pub const LIGHT_BORDER_HEX: &str = "#dddddd";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteColor {
    pub name: &'static str,
    pub hex: &'static str,
}

/// The 12 common colors offered as hints, in display order.
pub const PALETTE: [PaletteColor; 12] = [
    PaletteColor { name: "Red", hex: "#ef4444" },
    PaletteColor { name: "Blue", hex: "#3b82f6" },
    PaletteColor { name: "Green", hex: "#10b981" },
    PaletteColor { name: "Yellow", hex: "#f59e0b" },
    PaletteColor { name: "Black", hex: "#000000" },
    PaletteColor { name: "White", hex: "#ffffff" },
    PaletteColor { name: "Purple", hex: "#8b5cf6" },
    PaletteColor { name: "Orange", hex: "#f97316" },
    PaletteColor { name: "Pink", hex: "#ec4899" },
    PaletteColor { name: "Brown", hex: "#92400e" },
    PaletteColor { name: "Gray", hex: "#6b7280" },
    PaletteColor { name: "Navy", hex: "#1e3a8a" },
];

/// Look up a palette entry by name, ignoring case and surrounding whitespace.
pub fn lookup(name: &str) -> Option<&'static PaletteColor> {
    let name = name.trim();
    PALETTE.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Display hex for any color name; unknown names get [`FALLBACK_HEX`].
pub fn hex_for(name: &str) -> &'static str {
    lookup(name).map(|c| c.hex).unwrap_or(FALLBACK_HEX)
}

/// Fill and border of a rendered color swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub fill: &'static str,
    pub border: &'static str,
}

pub fn swatch(name: &str) -> Swatch {
    let fill = hex_for(name);
    let border = if fill == "#ffffff" { LIGHT_BORDER_HEX } else { "transparent" };
    Swatch { fill, border }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_colors_map_case_insensitively() {
        assert_eq!(hex_for("Red"), "#ef4444");
        assert_eq!(hex_for("red"), "#ef4444");
        assert_eq!(hex_for(" NAVY "), "#1e3a8a");
        assert_eq!(hex_for("white"), "#ffffff");
        assert_eq!(hex_for("brown"), "#92400e");
    }

    #[test]
    fn unknown_colors_fall_back_to_gray() {
        assert_eq!(hex_for("Teal"), FALLBACK_HEX);
        assert_eq!(hex_for("Silver"), "#6b7280");
        assert_eq!(hex_for(""), FALLBACK_HEX);
    }

    #[test]
    fn palette_names_are_unique() {
        let mut names: Vec<_> = PALETTE.iter().map(|c| c.name.to_lowercase()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), PALETTE.len());
    }

    #[test]
    fn white_swatch_gets_a_border() {
        assert_eq!(swatch("White").border, LIGHT_BORDER_HEX);
        assert_eq!(swatch("Black").border, "transparent");
        assert_eq!(swatch("Teal").fill, FALLBACK_HEX);
    }

    proptest! {
        #[test]
        fn lookup_ignores_case(idx in 0usize..12, upper in proptest::collection::vec(any::<bool>(), 6)) {
            let entry = PALETTE[idx];
            let mixed: String = entry
                .name
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
                .collect();
            prop_assert_eq!(hex_for(&mixed), entry.hex);
        }
    }
}
