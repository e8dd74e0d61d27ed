pub mod popup;
pub mod preprocess;
pub mod selection;

pub use selection::{Selection, extract};
