pub mod fallback;
pub mod labels;
pub mod text;
mod clean;
mod duration;
mod graph;
mod request;
mod tree;
mod validation;

pub use clean::*;
pub use duration::*;
pub use graph::*;
pub use request::*;
pub use tree::*;
pub use validation::*;
