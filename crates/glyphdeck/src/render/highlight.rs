use anyhow::{Result, bail};
use eframe::egui::Color32;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme as SyntaxTheme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::parser::{Block, Presentation};

/// One highlighted source line: colored runs in order.
pub type CodeLine = Vec<(Color32, String)>;

/// Highlighted lines of each fenced block, parallel to a slide's body blocks.
/// `None` for blocks that are not code or have no known language.
pub type SlideCode = Vec<Option<Vec<CodeLine>>>;

pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: SyntaxTheme,
}

impl Highlighter {
    pub fn new(theme_name: &str) -> Result<Self> {
        let mut themes = ThemeSet::load_defaults();
        let Some(theme) = themes.themes.remove(theme_name) else {
            let known: Vec<&str> = themes.themes.keys().map(String::as_str).collect();
            bail!(
                "Unknown code style '{theme_name}'. Available: {}",
                known.join(", ")
            );
        };
        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Highlight `code` as `language`. Unknown or missing languages yield
    /// `None` so the caller falls back to plain code colors.
    pub fn highlight(&self, language: Option<&str>, code: &str) -> Option<Vec<CodeLine>> {
        let syntax = self.syntaxes.find_syntax_by_token(language?)?;
        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut out = Vec::new();
        for line in code.split('\n') {
            let with_nl = format!("{line}\n");
            let regions = match lines.highlight_line(&with_nl, &self.syntaxes) {
                Ok(regions) => regions,
                Err(err) => {
                    tracing::debug!("Highlighting failed, using plain code: {err}");
                    return None;
                }
            };
            out.push(
                regions
                    .iter()
                    .filter_map(|(style, text)| {
                        let text = text.trim_end_matches('\n');
                        (!text.is_empty()).then(|| {
                            let fg = style.foreground;
                            (Color32::from_rgb(fg.r, fg.g, fg.b), text.to_string())
                        })
                    })
                    .collect(),
            );
        }
        Some(out)
    }

    /// Highlight every fenced block of every slide up front.
    pub fn highlight_deck(&self, presentation: &Presentation) -> Vec<SlideCode> {
        presentation
            .slides
            .iter()
            .map(|slide| {
                slide
                    .body_blocks()
                    .iter()
                    .map(|block| match block {
                        Block::CodeBlock { language, code } => {
                            self.highlight(language.as_deref(), code)
                        }
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{self, SplitMode};

    fn joined(line: &CodeLine) -> String {
        line.iter().map(|(_, text)| text.as_str()).collect()
    }

    #[test]
    fn test_known_language_is_colored() {
        let hl = Highlighter::new("base16-ocean.dark").unwrap();
        let lines = hl
            .highlight(Some("rust"), "fn main() {\n\n    let x = 1;\n}")
            .unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(joined(&lines[0]), "fn main() {");
        assert!(lines[1].is_empty());
        assert_eq!(joined(&lines[2]), "    let x = 1;");
        let colors: std::collections::HashSet<_> = lines[0].iter().map(|(c, _)| *c).collect();
        assert!(colors.len() > 1);
    }

    #[test]
    fn test_unknown_or_missing_language_is_plain() {
        let hl = Highlighter::new("InspiredGitHub").unwrap();
        assert!(hl.highlight(None, "x").is_none());
        assert!(hl.highlight(Some("no-such-lang"), "x").is_none());
    }

    #[test]
    fn test_unknown_style_is_an_error() {
        let err = Highlighter::new("neon").err().unwrap();
        assert!(err.to_string().contains("Unknown code style 'neon'"));
    }

    #[test]
    fn test_deck_code_is_parallel_to_body_blocks() {
        let pres = parser::parse(
            "# One\n\ntext\n\n```python\nprint(1)\n```\n\n```\nplain\n```",
            SplitMode::Auto,
        );
        let hl = Highlighter::new("base16-ocean.dark").unwrap();
        let code = hl.highlight_deck(&pres);
        assert_eq!(code.len(), 1);
        assert_eq!(code[0].len(), pres.slides[0].body_blocks().len());
        assert!(code[0][0].is_none());
        assert!(code[0][1].is_some());
        assert!(code[0][2].is_none());
    }
}
