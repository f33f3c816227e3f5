use eframe::egui::{self, Color32, RichText, Stroke, text::LayoutJob, text::TextFormat};

use super::highlight::CodeLine;
use crate::parser::{Block, Inline};
use crate::theme::Theme;

/// Lay out slide blocks top to bottom in the body font.
///
/// Every row is exactly one body line tall and blocks are separated by one
/// blank line, so the content height is a whole number of line units.
/// `code` holds the highlighted lines of fenced blocks by block index.
pub fn draw_blocks(
    ui: &mut egui::Ui,
    blocks: &[Block],
    code: &[Option<Vec<CodeLine>>],
    theme: &Theme,
    line_height: f32,
) {
    ui.spacing_mut().item_spacing.y = 0.0;
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            ui.add_space(line_height);
        }
        draw_block(ui, block, code.get(i).and_then(Option::as_ref), theme);
    }
}

#[derive(Clone, Copy)]
struct SpanStyle {
    color: Color32,
    italics: bool,
    strike: bool,
    underline: bool,
}

impl SpanStyle {
    fn plain(color: Color32) -> Self {
        Self {
            color,
            italics: false,
            strike: false,
            underline: false,
        }
    }
}

fn text_format(theme: &Theme, style: SpanStyle) -> TextFormat {
    TextFormat {
        font_id: theme.body_font(),
        color: style.color,
        italics: style.italics,
        strikethrough: if style.strike {
            Stroke::new(1.0, style.color)
        } else {
            Stroke::NONE
        },
        underline: if style.underline {
            Stroke::new(1.0, style.color)
        } else {
            Stroke::NONE
        },
        ..Default::default()
    }
}

/// Build a layout job for inline spans. All runs share the monospace body
/// font so wrapped rows stay one line unit tall.
fn inlines_to_job(
    ui: &egui::Ui,
    prefix: &str,
    inlines: &[Inline],
    theme: &Theme,
    style: SpanStyle,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = ui.available_width();
    if !prefix.is_empty() {
        job.append(prefix, 0.0, text_format(theme, style));
    }
    append_inlines(&mut job, inlines, theme, style);
    job
}

fn append_inlines(job: &mut LayoutJob, inlines: &[Inline], theme: &Theme, style: SpanStyle) {
    for inline in inlines {
        match inline {
            Inline::Text(s) => job.append(s, 0.0, text_format(theme, style)),
            Inline::Bold(children) => {
                let strong = SpanStyle {
                    color: theme.strong,
                    ..style
                };
                append_inlines(job, children, theme, strong);
            }
            Inline::Italic(children) => {
                append_inlines(job, children, theme, SpanStyle { italics: true, ..style });
            }
            Inline::Strikethrough(children) => {
                append_inlines(job, children, theme, SpanStyle { strike: true, ..style });
            }
            Inline::Code(s) => {
                let mut fmt = text_format(
                    theme,
                    SpanStyle {
                        color: theme.code_foreground,
                        ..style
                    },
                );
                fmt.background = theme.code_background;
                job.append(s, 0.0, fmt);
            }
            Inline::Link { text, .. } => {
                let link = SpanStyle {
                    color: theme.accent,
                    underline: true,
                    ..style
                };
                append_inlines(job, text, theme, link);
            }
        }
    }
}

fn link_urls<'a>(inlines: &'a [Inline], out: &mut Vec<&'a str>) {
    for inline in inlines {
        match inline {
            Inline::Link { text, url } => {
                out.push(url);
                link_urls(text, out);
            }
            Inline::Bold(children) | Inline::Italic(children) | Inline::Strikethrough(children) => {
                link_urls(children, out);
            }
            Inline::Text(_) | Inline::Code(_) => {}
        }
    }
}

fn draw_spans(ui: &mut egui::Ui, prefix: &str, inlines: &[Inline], theme: &Theme, style: SpanStyle) {
    let job = inlines_to_job(ui, prefix, inlines, theme, style);
    let response = ui.label(job);
    let mut urls = Vec::new();
    link_urls(inlines, &mut urls);
    if !urls.is_empty() {
        response.on_hover_text(urls.join("\n"));
    }
}

fn body_text(text: &str, theme: &Theme, color: Color32) -> RichText {
    RichText::new(text).font(theme.body_font()).color(color)
}

fn draw_block(ui: &mut egui::Ui, block: &Block, code_lines: Option<&Vec<CodeLine>>, theme: &Theme) {
    match block {
        Block::Heading { level, inlines } => {
            let color = if *level <= 2 {
                theme.heading_color
            } else {
                theme.accent
            };
            draw_spans(ui, "", inlines, theme, SpanStyle::plain(color));
        }
        Block::Paragraph { inlines } => {
            draw_spans(ui, "", inlines, theme, SpanStyle::plain(theme.foreground));
        }
        Block::ListItem {
            depth,
            ordered,
            marker,
            inlines,
        } => {
            let bullet = if *ordered {
                marker.as_str()
            } else {
                match depth % 3 {
                    0 => "•",
                    1 => "◦",
                    _ => "▪",
                }
            };
            let prefix = format!("{}{bullet} ", "  ".repeat(*depth));
            draw_spans(ui, &prefix, inlines, theme, SpanStyle::plain(theme.foreground));
        }
        Block::CodeBlock { code, .. } => {
            egui::Frame::new()
                .fill(theme.code_background)
                .inner_margin(egui::Margin::symmetric(8, 0))
                .show(ui, |ui| {
                    ui.spacing_mut().item_spacing.y = 0.0;
                    match code_lines {
                        Some(lines) => {
                            for line in lines {
                                draw_code_line(ui, line, theme);
                            }
                        }
                        None => {
                            for line in code.split('\n') {
                                // Keep blank code lines one row tall.
                                let line = if line.is_empty() { " " } else { line };
                                ui.label(body_text(line, theme, theme.code_foreground));
                            }
                        }
                    }
                });
        }
        Block::BlockQuote { inlines } => {
            let style = SpanStyle {
                italics: true,
                ..SpanStyle::plain(theme.muted)
            };
            draw_spans(ui, "▌ ", inlines, theme, style);
        }
        Block::Rule => {
            let glyph_width = ui
                .painter()
                .layout_no_wrap("─".to_string(), theme.body_font(), theme.muted)
                .rect
                .width();
            let count = if glyph_width > 0.0 {
                (ui.available_width() / glyph_width).floor() as usize
            } else {
                0
            };
            ui.label(body_text(&"─".repeat(count.max(1)), theme, theme.muted));
        }
    }
}

fn draw_code_line(ui: &mut egui::Ui, line: &CodeLine, theme: &Theme) {
    let mut job = LayoutJob::default();
    if line.is_empty() {
        job.append(" ", 0.0, text_format(theme, SpanStyle::plain(theme.code_foreground)));
    }
    for (color, text) in line {
        job.append(text, 0.0, text_format(theme, SpanStyle::plain(*color)));
    }
    ui.label(job);
}
