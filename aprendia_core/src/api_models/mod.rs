mod errors;
mod health;
mod stories;
mod studiables;

pub use errors::*;
pub use health::*;
pub use stories::*;
pub use studiables::*;
