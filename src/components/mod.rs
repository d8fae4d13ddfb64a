pub mod app;
pub mod contest_view;
pub mod legend;
pub mod nav_bar;
pub mod stats_bar;
pub mod status_toast;
pub mod sync_panel;
pub mod tree_view;
