//! Keyboard and pointer routing.
//!
//! Key presses are mapped to [`Action`]s; any press with shift, ctrl or alt
//! held is ignored. Vertical arrows never change slides: they scroll the
//! focused slide body instead (see [`scroll_lines`]).

use eframe::egui::{self, Key, Modifiers};

use crate::navigator::SlideNavigator;
use crate::scrollbar::LineMetric;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move by a relative number of slides.
    Step(isize),
    /// Jump to a slide, e.g. from a marker click.
    Activate(usize),
    ToggleFullscreen,
    Quit,
}

impl Action {
    /// Apply a navigation action. Returns `false` for actions the navigator
    /// does not handle.
    pub fn apply(self, navigator: &mut SlideNavigator, probe: &dyn LineMetric) -> bool {
        match self {
            Action::Step(delta) => navigator.set_active_relative(delta, probe),
            Action::Activate(index) => {
                if index < navigator.slide_count() {
                    navigator.set_active(index, probe);
                }
            }
            Action::ToggleFullscreen | Action::Quit => return false,
        }
        true
    }
}

fn has_blocking_modifier(modifiers: Modifiers) -> bool {
    modifiers.shift || modifiers.ctrl || modifiers.alt
}

pub fn route_key(key: Key, modifiers: Modifiers) -> Option<Action> {
    if has_blocking_modifier(modifiers) {
        return None;
    }
    match key {
        Key::ArrowLeft | Key::H | Key::K => Some(Action::Step(-1)),
        Key::ArrowRight | Key::J | Key::L => Some(Action::Step(1)),
        Key::ArrowUp | Key::ArrowDown => None,
        Key::F => Some(Action::ToggleFullscreen),
        Key::Q => Some(Action::Quit),
        _ => None,
    }
}

/// Actions for every key pressed this frame, in order.
pub fn collect_actions(input: &egui::InputState) -> Vec<Action> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => route_key(*key, *modifiers),
            _ => None,
        })
        .collect()
}

/// Net lines to scroll the focused body by this frame (up is negative).
pub fn scroll_lines(input: &egui::InputState) -> f32 {
    input
        .events
        .iter()
        .map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } if !has_blocking_modifier(*modifiers) => match key {
                Key::ArrowUp => -1.0,
                Key::ArrowDown => 1.0,
                _ => 0.0,
            },
            _ => 0.0,
        })
        .sum()
}
