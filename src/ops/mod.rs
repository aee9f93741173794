pub mod projection;

pub use projection::Board;
