//! UI layer: the single processing form.

pub mod app;

pub use app::ProcessApp;
