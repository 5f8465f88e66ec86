pub mod components;
pub mod panel;
pub mod query;
pub mod repository;
