use unicode_width::UnicodeWidthStr;

pub const GLYPH_HEIGHT: usize = 5;
const BLANK: [&str; GLYPH_HEIGHT] = ["     "; GLYPH_HEIGHT];

fn glyph(c: char) -> [&'static str; GLYPH_HEIGHT] {
    match c {
        '0' => ["█████", "█   █", "█   █", "█   █", "█████"],
        '1' => ["    █", "    █", "    █", "    █", "    █"],
        '2' => ["█████", "    █", "█████", "█    ", "█████"],
        '3' => ["█████", "    █", "█████", "    █", "█████"],
        '4' => ["█   █", "█   █", "█████", "    █", "    █"],
        '5' => ["█████", "█    ", "█████", "    █", "█████"],
        '6' => ["█████", "█    ", "█████", "█   █", "█████"],
        '7' => ["█████", "    █", "    █", "    █", "    █"],
        '8' => ["█████", "█   █", "█████", "█   █", "█████"],
        '9' => ["█████", "█   █", "█████", "    █", "█████"],
        ':' => [" ", "█", " ", "█", " "],
        _ => BLANK,
    }
}

/// Render `text` (digits and colons) as rows of block characters.
pub fn big_text(text: &str) -> Vec<String> {
    (0..GLYPH_HEIGHT)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Display width of [`big_text`] for `text`.
pub fn big_width(text: &str) -> usize {
    big_text(text).first().map_or(0, |row| row.width())
}
