use eframe::egui;

/// Fullscreen capability, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fullscreen {
    /// The native window can switch to fullscreen.
    Native,
    Unsupported,
}

impl Fullscreen {
    pub fn resolve(enabled: bool) -> Self {
        if enabled {
            Self::Native
        } else {
            Self::Unsupported
        }
    }

    /// Command that flips the current state, if fullscreen is available.
    pub fn toggle(self, currently_fullscreen: bool) -> Option<egui::ViewportCommand> {
        match self {
            Self::Native => Some(egui::ViewportCommand::Fullscreen(!currently_fullscreen)),
            Self::Unsupported => None,
        }
    }

    /// Whether the window should open fullscreen.
    pub fn start_fullscreen(self, windowed: bool) -> bool {
        matches!(self, Self::Native) && !windowed
    }
}
