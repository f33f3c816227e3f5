use tracing::warn;

use super::PresentationMeta;

/// Split optional YAML frontmatter off the top of a document.
///
/// Frontmatter starts with a `---` line (only blank lines may precede it)
/// and ends at the next `---` line. Unparseable frontmatter is dropped with
/// a warning and defaults are used.
pub fn extract(content: &str) -> (PresentationMeta, String) {
    let content = content.replace("\r\n", "\n");
    let mut lines = content.split('\n').enumerate();

    let open = lines.find(|(_, l)| !l.trim().is_empty());
    let Some((open_idx, open_line)) = open else {
        return (PresentationMeta::default(), content);
    };
    if !is_marker(open_line) {
        return (PresentationMeta::default(), content);
    }

    let Some((close_idx, _)) = lines.find(|(_, l)| is_marker(l)) else {
        return (PresentationMeta::default(), content);
    };

    let all: Vec<&str> = content.split('\n').collect();
    let yaml = all[open_idx + 1..close_idx].join("\n");
    let body = all[close_idx + 1..].join("\n");

    if yaml.trim().is_empty() {
        return (PresentationMeta::default(), body);
    }
    let meta = serde_yaml::from_str::<PresentationMeta>(&yaml).unwrap_or_else(|err| {
        warn!("Ignoring invalid frontmatter: {err}");
        PresentationMeta::default()
    });
    (meta, body)
}

fn is_marker(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_meta() {
        let doc = "---\ntitle: Talk\nauthor: Sam\ntheme: dark\n---\n# First\n";
        let (meta, body) = extract(doc);
        assert_eq!(meta.title.as_deref(), Some("Talk"));
        assert_eq!(meta.author.as_deref(), Some("Sam"));
        assert_eq!(meta.theme.as_deref(), Some("dark"));
        assert_eq!(body, "# First\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let doc = "# Just a slide\n\ntext";
        let (meta, body) = extract(doc);
        assert!(meta.title.is_none());
        assert_eq!(body, doc);
    }

    #[test]
    fn test_invalid_yaml_falls_back() {
        let doc = "---\ntitle: [unclosed\n---\nbody";
        let (meta, body) = extract(doc);
        assert!(meta.title.is_none());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_unterminated_frontmatter_is_body() {
        let doc = "---\ntitle: Talk\n";
        let (meta, body) = extract(doc);
        assert!(meta.title.is_none());
        assert_eq!(body, doc);
    }
}
