//! Keyboard help window.

use eframe::egui;

/// Single help entry (key binding + description)
#[derive(Clone, Debug)]
pub struct HelpEntry {
    pub key: &'static str,
    pub desc: &'static str,
}

impl HelpEntry {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }
}

/// Global hotkeys (ignored while a text field has focus)
pub const GLOBAL_HELP: &[HelpEntry] = &[
    HelpEntry::new("F1", "Toggle this help"),
    HelpEntry::new("Left / Right", "Previous / Next Pokémon"),
    HelpEntry::new("Home / End", "First / Last Pokémon"),
    HelpEntry::new("F", "Toggle favorite"),
    HelpEntry::new("Ctrl+F", "Show favorites"),
    HelpEntry::new("R", "Retry current request"),
    HelpEntry::new("G", "Focus jump field"),
];

/// Jump field help
pub const JUMP_HELP: &[HelpEntry] = &[
    HelpEntry::new("Enter", "Go to typed number"),
    HelpEntry::new("Esc", "Leave jump field"),
];

/// Render the help window if `open` is set.
pub fn render_help_window(ctx: &egui::Context, open: &mut bool) {
    let key_color = egui::Color32::from_rgb(255, 200, 100);

    egui::Window::new("Help")
        .open(open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            for (title, entries) in [("Viewer", GLOBAL_HELP), ("Jump field", JUMP_HELP)] {
                ui.strong(title);
                egui::Grid::new(title).num_columns(2).striped(true).show(ui, |ui| {
                    for entry in entries {
                        ui.label(egui::RichText::new(entry.key).monospace().color(key_color));
                        ui.label(entry.desc);
                        ui.end_row();
                    }
                });
                ui.add_space(6.0);
            }
            ui.small("Numbers outside 1..=1025 are clamped; other text is ignored.");
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_unique_keys() {
        let mut keys: Vec<&str> = GLOBAL_HELP.iter().map(|e| e.key).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }
}
