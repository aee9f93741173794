pub mod app;
pub mod card;
pub mod form;
pub mod input;
pub mod render;
pub mod theme;

pub use app::run;
