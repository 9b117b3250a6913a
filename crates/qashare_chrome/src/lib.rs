pub mod platform;
pub mod setup;

mod app;

pub use app::QaShareApp;
