mod favorites_ui;

pub use favorites_ui::render_favorites_window;
