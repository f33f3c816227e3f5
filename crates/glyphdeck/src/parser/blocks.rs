use std::sync::LazyLock;

use regex::Regex;

use super::inline;
use super::Block;
use super::splitter::heading;

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)([-*+]|\d+[.)])\s+(.*)$").expect("valid list item regex")
});

/// Parse one slide's markdown into blocks.
pub fn parse(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            flush_paragraph(&mut blocks, &mut paragraph);
            let fence = &trimmed[..3];
            let language = Some(trimmed[3..].trim())
                .filter(|l| !l.is_empty())
                .map(str::to_string);
            let mut code = Vec::new();
            for inner in lines.by_ref() {
                if inner.trim().starts_with(fence) {
                    break;
                }
                code.push(inner);
            }
            blocks.push(Block::CodeBlock {
                language,
                code: code.join("\n"),
            });
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            continue;
        }

        if let Some((level, text)) = heading(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::Heading {
                level,
                inlines: inline::parse(&text),
            });
            continue;
        }

        if is_rule(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::Rule);
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('>') {
            flush_paragraph(&mut blocks, &mut paragraph);
            let mut quote = vec![rest.trim()];
            while let Some(next) = lines.next_if(|l| l.trim_start().starts_with('>')) {
                quote.push(next.trim_start()[1..].trim());
            }
            blocks.push(Block::BlockQuote {
                inlines: inline::parse(quote.join(" ").trim()),
            });
            continue;
        }

        if let Some(caps) = LIST_ITEM.captures(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            let indent = caps[1].chars().map(|c| if c == '\t' { 4 } else { 1 }).sum::<usize>();
            let marker = &caps[2];
            blocks.push(Block::ListItem {
                depth: indent / 2,
                ordered: marker.chars().next().is_some_and(|c| c.is_ascii_digit()),
                marker: marker.to_string(),
                inlines: inline::parse(caps[3].trim()),
            });
            continue;
        }

        paragraph.push(trimmed);
    }
    flush_paragraph(&mut blocks, &mut paragraph);
    blocks
}

fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<&str>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph {
            inlines: inline::parse(&paragraph.join(" ")),
        });
        paragraph.clear();
    }
}

fn is_rule(trimmed: &str) -> bool {
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3 && ['-', '*', '_'].iter().any(|&m| compact.chars().all(|c| c == m))
}
