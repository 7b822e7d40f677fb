//! Block-letter font for the skyfolio intro banner.
//!
//! Glyphs are 5 rows tall. Letters are 5 columns wide; punctuation is
//! narrower. Lowercase input is drawn with the uppercase glyphs.

/// Rows per glyph.
pub const GLYPH_HEIGHT: usize = 5;

/// Blank columns between adjacent glyphs.
const SPACING: usize = 1;

/// Rows of the glyph for `ch`, or `None` if the font has no such glyph.
pub fn glyph(ch: char) -> Option<[&'static str; GLYPH_HEIGHT]> {
    let glyph = match ch.to_ascii_uppercase() {
        'A' => ["▄███▄", "█   █", "█████", "█   █", "█   █"],
        'B' => ["████▄", "█   █", "████▄", "█   █", "████▀"],
        'C' => ["▄████", "█    ", "█    ", "█    ", "▀████"],
        'D' => ["████▄", "█   █", "█   █", "█   █", "████▀"],
        'E' => ["█████", "█    ", "████ ", "█    ", "█████"],
        'F' => ["█████", "█    ", "████ ", "█    ", "█    "],
        'G' => ["▄████", "█    ", "█  ██", "█   █", "▀███▀"],
        'H' => ["█   █", "█   █", "█████", "█   █", "█   █"],
        'I' => ["█████", "  █  ", "  █  ", "  █  ", "█████"],
        'J' => ["█████", "   █ ", "   █ ", "█  █ ", "▀██▀ "],
        'K' => ["█   █", "█  █ ", "███  ", "█  █ ", "█   █"],
        'L' => ["█    ", "█    ", "█    ", "█    ", "█████"],
        'M' => ["█▄ ▄█", "█ █ █", "█ █ █", "█   █", "█   █"],
        'N' => ["█▄  █", "██▄ █", "█ █ █", "█ ▀██", "█  ▀█"],
        'O' => ["▄███▄", "█   █", "█   █", "█   █", "▀███▀"],
        'P' => ["████▄", "█   █", "████▀", "█    ", "█    "],
        'Q' => ["▄███▄", "█   █", "█ █ █", "█  █ ", "▀██ █"],
        'R' => ["████▄", "█   █", "████▀", "█  █ ", "█   █"],
        'S' => ["▄████", "█    ", "▀███▄", "    █", "████▀"],
        'T' => ["█████", "  █  ", "  █  ", "  █  ", "  █  "],
        'U' => ["█   █", "█   █", "█   █", "█   █", "▀███▀"],
        'V' => ["█   █", "█   █", "█   █", "▀▄ ▄▀", "  █  "],
        'W' => ["█   █", "█   █", "█ █ █", "█ █ █", "▀▄▀▄▀"],
        'X' => ["█   █", "▀▄ ▄▀", "  █  ", "▄▀ ▀▄", "█   █"],
        'Y' => ["█   █", "▀▄ ▄▀", "  █  ", "  █  ", "  █  "],
        'Z' => ["█████", "   ▄▀", "  █  ", "▄▀   ", "█████"],
        ' ' => ["   ", "   ", "   ", "   ", "   "],
        '.' => [" ", " ", " ", " ", "▄"],
        ',' => ["  ", "  ", "  ", " ▄", "▀ "],
        '-' => ["   ", "   ", "▀▀▀", "   ", "   "],
        '\'' => ["█", "▀", " ", " ", " "],
        _ => return None,
    };
    Some(glyph)
}

/// Whether every character of `text` has a glyph.
pub fn supports(text: &str) -> bool {
    text.chars().all(|c| glyph(c).is_some())
}

/// Width in columns of `text` drawn with [`build_banner`].
pub fn banner_width(text: &str) -> usize {
    let glyphs: usize = text
        .chars()
        .filter_map(glyph)
        .map(|g| g[0].chars().count())
        .sum();
    let count = text.chars().filter(|&c| glyph(c).is_some()).count();
    glyphs + count.saturating_sub(1) * SPACING
}

/// Render `text` as block letters, one string per row.
///
/// Characters without a glyph are skipped.
pub fn build_banner(text: &str) -> Vec<String> {
    let glyphs: Vec<_> = text.chars().filter_map(glyph).collect();
    (0..GLYPH_HEIGHT)
        .map(|row| {
            let parts: Vec<&str> = glyphs.iter().map(|g| g[row]).collect();
            parts.join(&" ".repeat(SPACING))
        })
        .collect()
}
