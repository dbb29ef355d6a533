pub mod detail_view;
pub mod table_renderer;
