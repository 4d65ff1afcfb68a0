//! Card artwork for posts and works without a thumbnail.
//!
//! Each card gets a CSS `linear-gradient` derived from its tags: known
//! technologies use their brand color, anything else gets a hue derived from
//! a hash of a seed string (usually the record id), so the same record always
//! gets the same card.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Brand colors for well-known tags.
const TAG_COLORS: &[(&str, &str)] = &[
    // JavaScript/TypeScript
    ("JavaScript", "#F7DF1E"),
    ("TypeScript", "#3178C6"),
    // Frameworks
    ("SvelteKit", "#FF3E00"),
    ("Svelte", "#FF3E00"),
    ("React", "#61DAFB"),
    ("Next.js", "#000000"),
    ("Vue", "#42B883"),
    ("Nuxt", "#00DC82"),
    ("Angular", "#DD0031"),
    // Backend
    ("Node.js", "#339933"),
    ("Deno", "#000000"),
    ("Python", "#3776AB"),
    ("Django", "#092E20"),
    ("FastAPI", "#009688"),
    ("Rust", "#CE422B"),
    ("Go", "#00ADD8"),
    ("Java", "#007396"),
    // Databases
    ("PostgreSQL", "#4169E1"),
    ("MySQL", "#4479A1"),
    ("MongoDB", "#47A248"),
    ("Redis", "#DC382D"),
    ("Supabase", "#3ECF8E"),
    ("Firebase", "#FFCA28"),
    // Styling
    ("CSS", "#1572B6"),
    ("TailwindCSS", "#06B6D4"),
    ("Sass", "#CC6699"),
    // Everything else
    ("Docker", "#2496ED"),
    ("Kubernetes", "#326CE5"),
    ("Git", "#F05032"),
    ("GraphQL", "#E10098"),
    ("Markdown", "#000000"),
    ("WebAssembly", "#654FF0"),
    ("ブログ", "#FF6B6B"),
    ("技術記事", "#4ECDC4"),
];

/// Hue offsets that pair well with a base hue: complementary, triadic, analogous.
const HARMONIES: [i64; 5] = [180, 120, -120, 30, -30];

static HSL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"hsl\((\d+),\s*(\d+)%,\s*(\d+)%\)").expect("valid regex"));

static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9A-Fa-f]{6})").expect("valid regex"));

/// A color in HSL space, components rounded to whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: i64,
    pub s: i64,
    pub l: i64,
}

impl Hsl {
    fn css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Everything a card needs to draw its placeholder artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStyle {
    pub gradient: String,
    pub initial: String,
    /// Whether light text reads better on this gradient
    pub dark: bool,
}

impl CardStyle {
    pub fn new(tags: &[String], seed: &str, title: &str) -> Self {
        let gradient = gradient_from_tags(tags, seed);
        let dark = is_dark_gradient(&gradient);
        Self {
            gradient,
            initial: initial(title),
            dark,
        }
    }
}

/// The brand color for a tag, if it has one.
pub fn tag_color(tag: &str) -> Option<&'static str> {
    TAG_COLORS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, color)| *color)
}

/// Hash a string the way the site's front end does, so server-rendered and
/// client-rendered cards agree: `h = c + (h << 5) - h` over UTF-16 code
/// units with 32-bit shifts, then the absolute value.
pub fn simple_hash(s: &str) -> u64 {
    let mut hash: i64 = 0;
    for unit in s.encode_utf16() {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        hash = unit as i64 + (shifted - hash);
    }
    hash.unsigned_abs()
}

/// Convert `#rrggbb` (or `rrggbb`) to HSL. Invalid input yields black.
pub fn hex_to_hsl(hex: &str) -> Hsl {
    let hex = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            .map(|value| value as f64 / 255.0)
            .unwrap_or(0.0)
    };
    let (r, g, b) = (channel(0..2), channel(2..4), channel(4..6));

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let mut h = 0.0;
    let mut s = 0.0;

    if max != min {
        let d = max - min;
        s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };
    }

    Hsl {
        h: (h * 360.0).round() as i64,
        s: (s * 100.0).round() as i64,
        l: (l * 100.0).round() as i64,
    }
}

/// A second color that harmonizes with `base_hue`, chosen by `seed`.
pub fn harmonious_color(base_hue: i64, seed: u64) -> Hsl {
    let offset = HARMONIES[(seed % HARMONIES.len() as u64) as usize];
    Hsl {
        h: (base_hue + offset + 360).rem_euclid(360),
        s: 70,
        l: 60,
    }
}

/// Build a card gradient from tags.
///
/// - Two or more known tags: the first two brand colors.
/// - One known tag: its brand color and a harmonizing color.
/// - None: two harmonizing colors derived from `fallback_seed`.
pub fn gradient_from_tags(tags: &[String], fallback_seed: &str) -> String {
    let mapped: Vec<&'static str> = tags.iter().filter_map(|tag| tag_color(tag)).collect();

    match mapped.as_slice() {
        [first, second, ..] => format!("linear-gradient(135deg, {}, {})", first, second),
        [base] => {
            let base_hsl = hex_to_hsl(base);
            let second = harmonious_color(base_hsl.h, simple_hash(fallback_seed));
            format!("linear-gradient(135deg, {}, {})", base, second.css())
        }
        [] => {
            let hash = simple_hash(fallback_seed);
            let first = Hsl {
                h: (hash % 360) as i64,
                s: 70,
                l: 60,
            };
            let second = harmonious_color(first.h, hash);
            format!("linear-gradient(135deg, {}, {})", first.css(), second.css())
        }
    }
}

/// The letter shown on a card: the first character of a Japanese title, or
/// the first Latin letter (upper-cased) otherwise.
pub fn initial(title: &str) -> String {
    let Some(first) = title.chars().next() else {
        return "?".to_string();
    };

    if is_japanese(first) {
        return first.to_string();
    }

    title
        .chars()
        .find(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or(first)
        .to_string()
}

fn is_japanese(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' // hiragana
        | '\u{30A0}'..='\u{30FF}' // katakana
        | '\u{4E00}'..='\u{9FAF}' // kanji
    )
}

/// Whether a gradient is dark enough to need light text.
///
/// Looks at the first `hsl(...)` color, then the first hex color.
pub fn is_dark_gradient(gradient: &str) -> bool {
    if let Some(lightness) = HSL_PATTERN
        .captures(gradient)
        .and_then(|caps| caps[3].parse::<i64>().ok())
    {
        return lightness < 50;
    }

    if let Some(caps) = HEX_PATTERN.captures(gradient) {
        return hex_to_hsl(&caps[1]).l < 50;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_simple_hash() {
        assert_eq!(simple_hash(""), 0);
        assert_eq!(simple_hash("a"), 97);
        // 97 * 31 + 98
        assert_eq!(simple_hash("ab"), 3105);
        assert_eq!(simple_hash("post-1"), simple_hash("post-1"));
    }

    #[test]
    fn test_simple_hash_long_input() {
        // Shifts overflow 32 bits here; the hash must not panic.
        let long = "a considerably longer seed string for hashing";
        assert_eq!(simple_hash(long), simple_hash(long));
        assert_ne!(simple_hash(long), simple_hash("a considerably longer seed string for hashin"));
    }

    #[test]
    fn test_hex_to_hsl() {
        assert_eq!(hex_to_hsl("#000000"), Hsl { h: 0, s: 0, l: 0 });
        assert_eq!(hex_to_hsl("#FFFFFF"), Hsl { h: 0, s: 0, l: 100 });
        assert_eq!(hex_to_hsl("#FF0000"), Hsl { h: 0, s: 100, l: 50 });
        assert_eq!(hex_to_hsl("00FF00"), Hsl { h: 120, s: 100, l: 50 });
        assert_eq!(hex_to_hsl("#0000FF"), Hsl { h: 240, s: 100, l: 50 });
    }

    #[test]
    fn test_harmonious_color_wraps_hue() {
        assert_eq!(harmonious_color(300, 0).h, 120);
        assert_eq!(harmonious_color(10, 2).h, 250);
        assert_eq!(harmonious_color(10, 4).h, 340);
    }

    #[test]
    fn test_gradient_two_known_tags() {
        assert_eq!(
            gradient_from_tags(&tags(&["Blog", "Rust", "TypeScript"]), "seed"),
            "linear-gradient(135deg, #CE422B, #3178C6)"
        );
    }

    #[test]
    fn test_gradient_one_known_tag() {
        let gradient = gradient_from_tags(&tags(&["Rust", "Unknown"]), "a");
        // Rust hue is 8; seed "a" hashes to 97 -> offset index 2 (-120)
        assert_eq!(gradient, "linear-gradient(135deg, #CE422B, hsl(248, 70%, 60%))");
    }

    #[test]
    fn test_gradient_no_known_tags() {
        let gradient = gradient_from_tags(&[], "a");
        // hue 97, offset index 2 (-120) -> 337
        assert_eq!(
            gradient,
            "linear-gradient(135deg, hsl(97, 70%, 60%), hsl(337, 70%, 60%))"
        );
    }

    #[test]
    fn test_initial() {
        assert_eq!(initial(""), "?");
        assert_eq!(initial("ポートフォリオ"), "ポ");
        assert_eq!(initial("rust tips"), "R");
        assert_eq!(initial("2024 retrospective"), "R");
        assert_eq!(initial("123"), "1");
    }

    #[test]
    fn test_is_dark_gradient() {
        assert!(!is_dark_gradient("linear-gradient(135deg, hsl(97, 70%, 60%), hsl(1, 70%, 60%))"));
        assert!(is_dark_gradient("linear-gradient(135deg, hsl(97, 70%, 20%), #FFFFFF)"));
        assert!(is_dark_gradient("linear-gradient(135deg, #000000, #FFFFFF)"));
        assert!(!is_dark_gradient("linear-gradient(135deg, #F7DF1E, #3178C6)"));
        assert!(!is_dark_gradient("none"));
    }

    #[test]
    fn test_card_style() {
        let style = CardStyle::new(&tags(&["Next.js", "Deno"]), "x", "Hello");
        assert_eq!(style.gradient, "linear-gradient(135deg, #000000, #000000)");
        assert_eq!(style.initial, "H");
        assert!(style.dark);
    }
}
