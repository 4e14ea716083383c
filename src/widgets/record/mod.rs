mod record_view;

pub use record_view::render_record_view;
