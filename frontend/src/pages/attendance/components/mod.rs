pub mod calendar;
pub mod mark_dialog;
pub mod summary;
pub mod toolbar;
