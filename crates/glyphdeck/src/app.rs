use eframe::egui::{self, RichText};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use tracing::{debug, info, warn};

use crate::config::{Config, ScrollbarStyle};
use crate::fullscreen::Fullscreen;
use crate::input::{self, Action};
use crate::nav::NavTree;
use crate::navigator::{SlideNavigator, SlidePage};
use crate::parser::{self, Presentation, SplitMode};
use crate::render::{self, highlight::Highlighter, highlight::SlideCode};
use crate::scrollbar::{GlyphProbe, LineMetric, ViewportMetrics};
use crate::theme::Theme;
use crate::watch::DeckWatcher;

const NAV_WIDTH: f32 = 240.0;
const NAV_INDENT: f32 = 14.0;
const TRACK_GAP: f32 = 2.0;

/// Settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub windowed: bool,
    /// 1-indexed slide to open on.
    pub start_slide: Option<usize>,
    pub theme: Option<String>,
    pub title_delim: Option<String>,
    pub code_style: Option<String>,
    pub live: bool,
    pub single: bool,
}

/// Everything derived from the deck file. Rebuilt on live reload.
struct Deck {
    presentation: Presentation,
    nav_tree: NavTree,
    theme: Theme,
    code_style: String,
    /// Highlighted code per slide, parallel to each slide's body blocks.
    code: Vec<SlideCode>,
}

impl Deck {
    fn slide_count(&self) -> usize {
        self.presentation.slides.len()
    }
}

/// Read and parse `file`, resolving theme, title delimiter and code style
/// from the command line, the frontmatter and the config, in that order.
fn load_deck(file: &Path, options: &LaunchOptions, config: &Config) -> anyhow::Result<Deck> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let mode = if options.single {
        SplitMode::Single
    } else {
        SplitMode::Auto
    };
    let presentation = parser::parse(&content, mode);

    if presentation.slides.is_empty() {
        anyhow::bail!("No slides found in {}", file.display());
    }

    let theme_name = options
        .theme
        .as_deref()
        .or(presentation.meta.theme.as_deref())
        .or(config.theme())
        .unwrap_or("dark");
    let theme = Theme::from_name(theme_name);

    let delim = options
        .title_delim
        .clone()
        .unwrap_or_else(|| config.title_delim().to_string());
    let nav_tree = NavTree::build(&presentation.slide_titles(), &delim);

    let code_style = options
        .code_style
        .as_deref()
        .or(presentation.meta.code_theme.as_deref())
        .or(config.code_style())
        .unwrap_or(theme.syntect_theme_name())
        .to_string();
    let code = Highlighter::new(&code_style)?.highlight_deck(&presentation);

    Ok(Deck {
        presentation,
        nav_tree,
        theme,
        code_style,
        code,
    })
}

/// Zero-based slide to open on for a 1-based request, clamped into the deck.
fn start_index(requested: Option<usize>, slide_count: usize) -> usize {
    requested
        .map(|s| s.saturating_sub(1))
        .unwrap_or(0)
        .min(slide_count.saturating_sub(1))
}

struct DeckApp {
    file: PathBuf,
    options: LaunchOptions,
    config: Config,
    deck: Deck,
    navigator: SlideNavigator,
    style: Arc<ScrollbarStyle>,
    fullscreen: Fullscreen,
    gutter_glyph: char,
    start_slide: usize,
    watcher: Option<DeckWatcher>,
    /// Navigation requested by input this frame, applied once a `Ui` is
    /// available to measure lines.
    pending: Vec<Action>,
    pending_scroll_lines: f32,
    /// Slide area from the previous frame, used to detect window resizes.
    last_area: Option<egui::Rect>,
}

impl DeckApp {
    /// Re-read the deck after a change on disk. A deck that fails to load
    /// leaves the current one on screen.
    fn reload(&mut self) {
        match load_deck(&self.file, &self.options, &self.config) {
            Ok(deck) => {
                let keep = start_index(
                    Some(self.navigator.active_index() + 1),
                    deck.slide_count(),
                );
                info!(slides = deck.slide_count(), slide = keep + 1, "Reloaded deck");
                self.deck = deck;
                self.navigator = SlideNavigator::new(Arc::clone(&self.style));
                self.start_slide = keep;
                self.pending.clear();
                self.last_area = None;
            }
            Err(err) => warn!("Keeping previous deck: {err:#}"),
        }
    }

    fn draw_nav_panel(&mut self, ctx: &egui::Context) {
        let theme = &self.deck.theme;
        let active_marker = self.navigator.active_marker();
        egui::SidePanel::left("navigation")
            .resizable(false)
            .exact_width(NAV_WIDTH)
            .frame(egui::Frame::new().fill(theme.nav_background).inner_margin(12.0))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("navigation_scroll")
                    .show(ui, |ui| {
                        for entry in self.deck.nav_tree.entries() {
                            ui.horizontal(|ui| {
                                ui.add_space(entry.depth as f32 * NAV_INDENT);
                                let Some(slide) = entry.slide else {
                                    ui.label(
                                        RichText::new(&entry.label)
                                            .font(theme.chrome_font())
                                            .color(theme.muted),
                                    );
                                    return;
                                };
                                let active = active_marker == Some(slide);
                                let color = if active {
                                    theme.accent
                                } else {
                                    theme.foreground
                                };
                                let label = RichText::new(&entry.label)
                                    .font(theme.chrome_font())
                                    .color(color);
                                if ui.selectable_label(active, label).clicked() {
                                    self.pending.push(Action::Activate(slide));
                                }
                            });
                        }
                    });
            });
    }

    fn draw_footer(&self, ctx: &egui::Context) {
        let theme = &self.deck.theme;
        let meta = &self.deck.presentation.meta;
        let counter = format!(
            "{} / {}",
            self.navigator.active_index() + 1,
            self.deck.slide_count()
        );
        let byline = [meta.author.as_deref(), meta.date.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" \u{00b7} ");

        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::new().fill(theme.background).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(byline)
                            .font(theme.chrome_font())
                            .color(theme.muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(counter)
                                .font(theme.chrome_font())
                                .color(theme.muted),
                        );
                    });
                });
            });
    }

    fn draw_slide_area(&mut self, ui: &mut egui::Ui) {
        let font = self.deck.theme.body_font();

        if !self.navigator.is_initialized() {
            let markers: Vec<usize> = self.deck.nav_tree.marker_indices().collect();
            self.navigator.initialize(
                self.deck.slide_count(),
                markers,
                &GlyphProbe::new(ui, font.clone()),
            );
            if self.start_slide > 0 {
                self.navigator
                    .set_active(self.start_slide, &GlyphProbe::new(ui, font.clone()));
            }
        }

        let area = ui.max_rect();
        if self.last_area.is_some_and(|last| last != area) {
            debug!(width = area.width(), height = area.height(), "Slide area resized");
            self.navigator.resize(&GlyphProbe::new(ui, font.clone()));
        }
        self.last_area = Some(area);

        for action in std::mem::take(&mut self.pending) {
            action.apply(&mut self.navigator, &GlyphProbe::new(ui, font.clone()));
        }

        let Some(index) = self.navigator.visible().map(SlidePage::index) else {
            return;
        };
        let line_height = GlyphProbe::new(ui, font.clone()).measure();
        let theme = &self.deck.theme;

        ui.spacing_mut().item_spacing.y = 0.0;
        ui.label(
            RichText::new(self.deck.presentation.slide_title(index))
                .font(theme.heading_font())
                .color(theme.heading_color)
                .strong(),
        );
        ui.add_space(line_height);

        let track_width = render::track_width(ui, theme, self.gutter_glyph);
        let avail = ui.available_rect_before_wrap();
        let body_rect = egui::Rect::from_min_max(
            avail.min,
            egui::pos2(avail.max.x - track_width - TRACK_GAP * 2.0, avail.max.y),
        );
        let track_rect = egui::Rect::from_min_max(
            egui::pos2(body_rect.max.x + TRACK_GAP, body_rect.min.y),
            egui::pos2(body_rect.max.x + TRACK_GAP + track_width, body_rect.max.y),
        );

        // Arrow keys scroll the body only while it holds keyboard focus.
        let focus_id = egui::Id::new(("slide_body_focus", index));
        let mut scroll = egui::ScrollArea::vertical()
            .id_salt(("slide_body", index))
            .auto_shrink([false, false])
            .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::AlwaysHidden);
        if self.pending_scroll_lines != 0.0 && ui.memory(|m| m.has_focus(focus_id)) {
            let top = self
                .navigator
                .slide(index)
                .map(|page| page.viewport().scroll_top)
                .unwrap_or(0.0);
            scroll =
                scroll.vertical_scroll_offset((top + self.pending_scroll_lines * line_height).max(0.0));
        }
        self.pending_scroll_lines = 0.0;

        let blocks = self.deck.presentation.slides[index].body_blocks();
        let code = self.deck.code.get(index).map(Vec::as_slice).unwrap_or(&[]);
        let mut body_ui = ui.new_child(egui::UiBuilder::new().max_rect(body_rect).id_salt("slide_body_ui"));
        let output = scroll.show(&mut body_ui, |ui| {
            ui.set_width(ui.available_width());
            render::text::draw_blocks(ui, blocks, code, theme, line_height);
        });

        let body = ui.interact(body_rect, focus_id, egui::Sense::click());
        if self.navigator.take_focus_request().is_some() || body.clicked() {
            body.request_focus();
        }
        if body.has_focus() {
            ui.memory_mut(|m| {
                m.set_focus_lock_filter(
                    focus_id,
                    egui::EventFilter {
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        ..Default::default()
                    },
                );
            });
        }

        let metrics = ViewportMetrics::new(
            output.state.offset.y,
            output.inner_rect.height(),
            output.content_size.y,
        );
        self.navigator
            .observe_viewport(index, metrics, &GlyphProbe::new(ui, font.clone()));

        if let Some(page) = self.navigator.slide(index) {
            render::indicator::paint(
                ui,
                track_rect,
                page.scrollbar().indicator(),
                &self.deck.theme,
                &font,
            );
        }
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.watcher.as_ref().is_some_and(DeckWatcher::changed) {
            self.reload();
        }

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        let (actions, scroll_lines, is_fullscreen) = ctx.input(|i| {
            (
                input::collect_actions(i),
                input::scroll_lines(i),
                i.viewport().fullscreen.unwrap_or(false),
            )
        });
        self.pending_scroll_lines += scroll_lines;

        for action in actions {
            match action {
                Action::Quit => viewport_cmds.push(egui::ViewportCommand::Close),
                Action::ToggleFullscreen => viewport_cmds.extend(self.fullscreen.toggle(is_fullscreen)),
                navigation => self.pending.push(navigation),
            }
        }

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        self.draw_nav_panel(ctx);
        self.draw_footer(ctx);

        let bg = self.deck.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(24.0))
            .show(ctx, |ui| self.draw_slide_area(ui));
    }
}

pub fn run(file: PathBuf, options: LaunchOptions) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let deck = load_deck(&file, &options, &config)?;

    let fullscreen = Fullscreen::resolve(config.fullscreen_enabled());
    let style = Arc::new(config.scrollbar_style());
    let gutter_glyph = style.gutter.fill;
    let start_slide = start_index(options.start_slide, deck.slide_count());

    let title = deck.presentation.meta.title.clone().unwrap_or_else(|| {
        format!(
            "glyphdeck \u{2014} {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    info!(
        file = %file.display(),
        slides = deck.slide_count(),
        markers = deck.nav_tree.marker_indices().count(),
        theme = %deck.theme.name,
        code_style = %deck.code_style,
        live = options.live,
        ?fullscreen,
        "Opening deck"
    );

    let viewport = if fullscreen.start_fullscreen(options.windowed) {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            let watcher = if options.live {
                Some(DeckWatcher::spawn(&file, cc.egui_ctx.clone())?)
            } else {
                None
            };
            Ok(Box::new(DeckApp {
                file,
                options,
                config,
                deck,
                navigator: SlideNavigator::new(Arc::clone(&style)),
                style,
                fullscreen,
                gutter_glyph,
                start_slide,
                watcher,
                pending: Vec::new(),
                pending_scroll_lines: 0.0,
                last_area: None,
            }))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_deck(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("talk.md");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_start_slide_is_clamped_into_the_deck() {
        assert_eq!(start_index(None, 3), 0);
        assert_eq!(start_index(Some(0), 3), 0);
        assert_eq!(start_index(Some(1), 3), 0);
        assert_eq!(start_index(Some(2), 3), 1);
        assert_eq!(start_index(Some(3), 3), 2);
        assert_eq!(start_index(Some(999), 3), 2);
    }

    #[test]
    fn test_empty_deck_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_deck(&dir, "---\ntitle: Nothing\n---\n\n");
        let err = load_deck(&path, &LaunchOptions::default(), &Config::default())
            .err()
            .unwrap();
        assert!(err.to_string().starts_with("No slides found in"));
    }

    #[test]
    fn test_single_mode_loads_one_slide() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_deck(&dir, "# A\n\none\n\n---\n\n# B\n\ntwo");
        let split = load_deck(&path, &LaunchOptions::default(), &Config::default()).unwrap();
        assert_eq!(split.slide_count(), 2);

        let options = LaunchOptions {
            single: true,
            ..Default::default()
        };
        let single = load_deck(&path, &options, &Config::default()).unwrap();
        assert_eq!(single.slide_count(), 1);
        assert_eq!(single.nav_tree.marker_indices().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_settings_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_deck(
            &dir,
            "---\ntheme: light\ncode_theme: Solarized (light)\n---\n# A\n\n```rust\nfn x() {}\n```",
        );
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.code_style", "base16-mocha.dark").unwrap();

        let deck = load_deck(&path, &LaunchOptions::default(), &config).unwrap();
        assert_eq!(deck.theme.name, "light");
        assert_eq!(deck.code_style, "Solarized (light)");
        assert!(deck.code[0][0].is_some());

        let options = LaunchOptions {
            theme: Some("dark".to_string()),
            code_style: Some("InspiredGitHub".to_string()),
            ..Default::default()
        };
        let deck = load_deck(&path, &options, &config).unwrap();
        assert_eq!(deck.theme.name, "dark");
        assert_eq!(deck.code_style, "InspiredGitHub");
    }

    #[test]
    fn test_code_style_defaults_to_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_deck(&dir, "# A\n\ntext");
        let deck = load_deck(&path, &LaunchOptions::default(), &Config::default()).unwrap();
        assert_eq!(deck.code_style, "base16-ocean.dark");
    }

    #[test]
    fn test_unknown_code_style_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_deck(&dir, "# A\n\ntext");
        let options = LaunchOptions {
            code_style: Some("neon".to_string()),
            ..Default::default()
        };
        assert!(load_deck(&path, &options, &Config::default()).is_err());
    }
}
