pub mod components;
pub mod layout;
pub mod panel;
pub mod period;
pub mod reconcile;
pub mod repository;
pub mod upsert;
pub mod utils;
pub mod view_model;

pub use panel::AttendancePage;
