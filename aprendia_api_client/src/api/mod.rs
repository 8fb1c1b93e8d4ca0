mod health;
mod stories;
mod studiables;

pub use health::*;
pub use stories::*;
pub use studiables::*;
