//! Terminal front end: login screen, then the boat list and form.

pub mod app;
pub mod ui;

pub use app::App;
