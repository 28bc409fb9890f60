//! Code snippets that obstacles display
//!
//! Each obstacle shows a short window cut out of one of these snippets. The
//! text is purely cosmetic, but its length decides how many particles the
//! obstacle bursts into.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Fragment used when a snippet has no printable content
pub const PLACEHOLDER_FRAGMENT: &str = "()";

/// Snippet pool sampled by obstacles
pub const CODE_SNIPPETS: &[&str] = &[
    "fn main() {\n    let mut running = true;\n    while running {\n        running = poll_events();\n        update();\n        draw();\n    }\n}",
    "#[derive(Clone, Copy)]\nstruct Vec2 {\n    x: f32,\n    y: f32,\n}\n\nimpl Vec2 {\n    fn length(self) -> f32 {\n        (self.x * self.x + self.y * self.y).sqrt()\n    }\n}",
    "fn collides(a: Circle, b: Circle) -> bool {\n    a.center.distance(b.center) < a.radius + b.radius\n}",
    "let scores = HashMap::from([(\"apple\", 3), (\"banana\", 1)]);\nfor (key, value) in &scores {\n    println!(\"{key}: {value}\");\n}",
    "let evens: Vec<u32> = (0..10).filter(|x| x % 2 == 0).map(|x| x * 2).collect();",
    "match 10_i32.checked_div(0) {\n    Some(v) => println!(\"{v}\"),\n    None => println!(\"cannot divide by zero\"),\n}",
    "fn countdown(n: u32) {\n    if n == 0 {\n        println!(\"Blast off!\");\n    } else {\n        println!(\"{n}\");\n        countdown(n - 1);\n    }\n}",
    "let mut x = 0;\nwhile x < 5 {\n    println!(\"{x}\");\n    x += 1;\n}",
    "let data = [('a', 1), ('b', 2)];\nfor (key, value) in data {\n    println!(\"{key}: {value}\");\n}",
    "fn greet(name: Option<&str>) -> String {\n    format!(\"Hello, {}!\", name.unwrap_or(\"World\"))\n}",
    "use rand::Rng;\n\nlet roll = rand::rng().random_range(1..=100);",
];

/// Collapse a multi-line snippet into one line: trim every line, drop blank
/// ones and join the rest with single spaces.
pub fn flatten_snippet(snippet: &str) -> String {
    snippet
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut a random window of at most `max_len` characters out of `snippet`.
///
/// Falls back to [`PLACEHOLDER_FRAGMENT`] when the snippet is empty or
/// `max_len` is zero, so callers always get printable text.
pub fn fragment_from<R: Rng + ?Sized>(snippet: &str, max_len: usize, rng: &mut R) -> String {
    let chars: Vec<char> = flatten_snippet(snippet).chars().collect();
    if chars.is_empty() || max_len == 0 {
        log::warn!("Empty code fragment, using placeholder");
        return PLACEHOLDER_FRAGMENT.to_string();
    }

    let len = max_len.min(chars.len());
    let start = rng.random_range(0..=chars.len() - len);
    chars[start..start + len].iter().collect()
}

/// Pick a random snippet from the pool and cut a fragment from it
pub fn random_fragment<R: Rng + ?Sized>(max_len: usize, rng: &mut R) -> String {
    let snippet = CODE_SNIPPETS.choose(rng).copied().unwrap_or_default();
    fragment_from(snippet, max_len, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_flatten_snippet() {
        let flat = flatten_snippet("fn a() {\n\n    b();\n}\n");
        assert_eq!(flat, "fn a() { b(); }");
    }

    #[test]
    fn test_fragment_length_bounded() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let fragment = random_fragment(30, &mut rng);
            let len = fragment.chars().count();
            assert!(len > 0 && len <= 30, "bad fragment {fragment:?}");
        }
    }

    #[test]
    fn test_short_snippet_used_whole() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(fragment_from("  x += 1;  ", 30, &mut rng), "x += 1;");
    }

    #[test]
    fn test_fragment_is_contiguous_window() {
        let mut rng = Pcg32::seed_from_u64(3);
        let flat = flatten_snippet(CODE_SNIPPETS[0]);
        let fragment = fragment_from(CODE_SNIPPETS[0], 8, &mut rng);
        assert_eq!(fragment.chars().count(), 8);
        assert!(flat.contains(&fragment));
    }

    #[test]
    fn test_empty_snippet_falls_back() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(fragment_from("\n   \n", 10, &mut rng), PLACEHOLDER_FRAGMENT);
        assert_eq!(fragment_from("abc", 0, &mut rng), PLACEHOLDER_FRAGMENT);
    }
}
