pub mod blocks;
pub mod frontmatter;
pub mod inline;
pub mod splitter;

use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct Presentation {
    pub meta: PresentationMeta,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PresentationMeta {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub theme: Option<String>,
    /// Syntax highlighting theme for fenced code.
    pub code_theme: Option<String>,
}

/// How the document body is cut into slides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitMode {
    /// Thematic breaks, else headings.
    #[default]
    Auto,
    /// The whole body is one slide.
    Single,
}

#[derive(Debug, Clone)]
pub struct Slide {
    /// Plain text of the slide's first heading, if any.
    pub heading: Option<String>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        inlines: Vec<Inline>,
    },
    Paragraph {
        inlines: Vec<Inline>,
    },
    ListItem {
        depth: usize,
        ordered: bool,
        marker: String,
        inlines: Vec<Inline>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    BlockQuote {
        inlines: Vec<Inline>,
    },
    Rule,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::enum_variant_names)]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Code(String),
    Link { text: Vec<Inline>, url: String },
}

pub fn parse(content: &str, mode: SplitMode) -> Presentation {
    let (mut meta, body) = frontmatter::extract(content);
    let split = match mode {
        SplitMode::Auto => splitter::split(&body),
        SplitMode::Single => splitter::single(&body),
    };
    if meta.title.is_none() {
        meta.title = split
            .title
            .map(|title| inline::inlines_to_text(&inline::parse(&title)));
    }

    let slides = split
        .slides
        .iter()
        .map(|raw| {
            let blocks = blocks::parse(raw);
            let heading = blocks.iter().find_map(|b| match b {
                Block::Heading { inlines, .. } => Some(inline::inlines_to_text(inlines)),
                _ => None,
            });
            Slide { heading, blocks }
        })
        .collect();
    Presentation { meta, slides }
}

impl Slide {
    /// Blocks shown in the slide body. A leading heading is already shown as
    /// the slide title and is skipped.
    pub fn body_blocks(&self) -> &[Block] {
        match (self.blocks.first(), &self.heading) {
            (Some(Block::Heading { inlines, .. }), Some(heading))
                if inline::inlines_to_text(inlines) == *heading =>
            {
                &self.blocks[1..]
            }
            _ => &self.blocks,
        }
    }
}

impl Presentation {
    /// Title shown for a slide: its heading, else the deck title, else its
    /// 1-based number.
    pub fn slide_title(&self, index: usize) -> String {
        self.slides
            .get(index)
            .and_then(|s| s.heading.clone())
            .or_else(|| self.meta.title.clone())
            .unwrap_or_else(|| format!("Slide {}", index + 1))
    }

    pub fn slide_titles(&self) -> Vec<String> {
        (0..self.slides.len()).map(|i| self.slide_title(i)).collect()
    }
}
