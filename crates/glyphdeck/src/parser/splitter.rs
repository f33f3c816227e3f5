use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*?)\s*#*\s*$").expect("valid heading regex"));

/// Raw slide sources plus the deck title inferred while splitting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Split {
    pub slides: Vec<String>,
    pub title: Option<String>,
}

/// Split a document body (after frontmatter extraction) into raw slide strings.
///
/// When the body contains thematic breaks (`---`, `***` or `___` on a line
/// after a blank line) they are the only slide boundaries. Otherwise the
/// headings decide: a heading level used exactly once, by the very first
/// heading, is the deck title, and every heading at the lowest remaining
/// level starts a new slide. Nothing inside fenced code is considered.
pub fn split(body: &str) -> Split {
    let body = body.replace("\r\n", "\n");
    let lines: Vec<&str> = body.split('\n').collect();
    let kinds = classify(&lines);

    let breaks = kinds.iter().filter(|k| matches!(k, LineKind::Break)).count();
    if breaks > 0 {
        return Split {
            slides: split_on_breaks(&lines, &kinds),
            title: None,
        };
    }

    let (title, split_level) = scan_headings(&kinds);
    let slides = match split_level {
        Some(level) => split_on_headings(&lines, &kinds, level),
        None => vec![lines.join("\n")],
    };
    Split {
        slides: slides
            .into_iter()
            .map(|s| s.trim_matches('\n').to_string())
            .filter(|s| !s.trim().is_empty())
            .collect(),
        title,
    }
}

/// Keep the whole body as one slide, ignoring breaks and headings.
pub fn single(body: &str) -> Split {
    let body = body.replace("\r\n", "\n");
    let slide = body.trim_matches('\n');
    Split {
        slides: if slide.trim().is_empty() {
            Vec::new()
        } else {
            vec![slide.to_string()]
        },
        title: None,
    }
}

/// Extract `(level, text)` from an ATX heading line.
pub fn heading(line: &str) -> Option<(u8, String)> {
    let caps = HEADING.captures(line)?;
    Some((caps[1].len() as u8, caps[2].to_string()))
}

#[derive(Debug, Clone, PartialEq)]
enum LineKind {
    Text,
    Fenced,
    Break,
    Heading(u8, String),
}

fn classify(lines: &[&str]) -> Vec<LineKind> {
    let mut kinds = Vec::with_capacity(lines.len());
    let mut fence: Option<&str> = None;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if let Some(open) = fence {
            if trimmed.starts_with(open) {
                fence = None;
            }
            kinds.push(LineKind::Fenced);
            continue;
        }
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            fence = Some(&trimmed[..3]);
            kinds.push(LineKind::Fenced);
            continue;
        }

        let prev_blank = i == 0 || lines[i - 1].trim().is_empty();
        if prev_blank && is_thematic_break(trimmed) {
            kinds.push(LineKind::Break);
        } else if let Some((level, text)) = heading(trimmed) {
            kinds.push(LineKind::Heading(level, text));
        } else {
            kinds.push(LineKind::Text);
        }
    }
    kinds
}

fn is_thematic_break(trimmed: &str) -> bool {
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|&m| compact.chars().all(|c| c == m))
}

/// Returns the deck title (if the first heading claims one) and the level
/// that starts new slides.
fn scan_headings(kinds: &[LineKind]) -> (Option<String>, Option<u8>) {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    let mut first: Option<(u8, &str)> = None;
    for kind in kinds {
        if let LineKind::Heading(level, text) = kind {
            *counts.entry(*level).or_default() += 1;
            first.get_or_insert((*level, text.as_str()));
        }
    }

    let mut title = None;
    if let Some((level, text)) = first {
        if counts.get(&level) == Some(&1) {
            counts.remove(&level);
            title = Some(text.to_string());
        }
    }
    (title, counts.keys().next().copied())
}

fn split_on_breaks(lines: &[&str], kinds: &[LineKind]) -> Vec<String> {
    let mut slides = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for (line, kind) in lines.iter().zip(kinds) {
        if matches!(kind, LineKind::Break) {
            slides.push(current.join("\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }
    slides.push(current.join("\n"));
    slides
        .into_iter()
        .map(|s| s.trim_matches('\n').to_string())
        .filter(|s| !s.trim().is_empty())
        .collect()
}

fn split_on_headings(lines: &[&str], kinds: &[LineKind], split_level: u8) -> Vec<String> {
    let mut slides = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for (line, kind) in lines.iter().zip(kinds) {
        if matches!(kind, LineKind::Heading(level, _) if *level == split_level)
            && current.iter().any(|l| !l.trim().is_empty())
        {
            slides.push(current.join("\n"));
            current.clear();
        }
        current.push(line);
    }
    slides.push(current.join("\n"));
    slides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_separator() {
        let result = split("Slide one\n\n---\n\nSlide two");
        assert_eq!(result.slides, vec!["Slide one", "Slide two"]);
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_setext_underline_is_not_a_break() {
        let result = split("Heading\n---\n\nBody");
        assert_eq!(result.slides.len(), 1);
    }

    #[test]
    fn test_breaks_take_precedence_over_headings() {
        let body = "# One\n\n## A\n\ntext\n\n## B\n\n---\n\n# Two";
        let result = split(body);
        assert_eq!(result.slides.len(), 2);
        assert!(result.slides[0].contains("## B"));
    }

    #[test]
    fn test_smart_split_with_title_heading() {
        let body = "# Deck\n\nintro\n\n## First\n\na\n\n## Second\n\nb";
        let result = split(body);
        assert_eq!(result.title.as_deref(), Some("Deck"));
        assert_eq!(result.slides.len(), 3);
        assert!(result.slides[0].starts_with("# Deck"));
        assert!(result.slides[1].starts_with("## First"));
        assert!(result.slides[2].starts_with("## Second"));
    }

    #[test]
    fn test_smart_split_without_title() {
        let body = "# First\n\nContent\n\n# Second\n\nMore content";
        let result = split(body);
        assert_eq!(result.title, None);
        assert_eq!(result.slides.len(), 2);
        assert!(result.slides[1].starts_with("# Second"));
    }

    #[test]
    fn test_deeper_headings_stay_in_slide() {
        let body = "## One\n\n### detail\n\n## Two";
        let result = split(body);
        assert_eq!(result.slides.len(), 2);
        assert!(result.slides[0].contains("### detail"));
    }

    #[test]
    fn test_heading_in_code_block_no_split() {
        let body = "# Title\n\n## Code\n\n```python\n## not a heading\nprint('hi')\n```";
        let result = split(body);
        assert_eq!(result.slides.len(), 2, "{:?}", result.slides);
        assert!(result.slides[1].contains("## not a heading"));
    }

    #[test]
    fn test_break_in_code_block_no_split() {
        let body = "text\n\n```\n\n---\n```";
        assert_eq!(split(body).slides.len(), 1);
    }

    #[test]
    fn test_empty_body() {
        assert!(split("").slides.is_empty());
        assert!(split("\n\n---\n\n").slides.is_empty());
    }

    #[test]
    fn test_heading_text() {
        assert_eq!(heading("## Intro: Goals ##"), Some((2, "Intro: Goals".to_string())));
        assert_eq!(heading("#hashtag"), None);
    }

    #[test]
    fn test_single_ignores_breaks_and_headings() {
        let result = single("\n# A\n\none\n\n---\n\n# B\n");
        assert_eq!(result.slides, vec!["# A\n\none\n\n---\n\n# B"]);
        assert!(result.title.is_none());
        assert!(single(" \n\n").slides.is_empty());
    }
}
