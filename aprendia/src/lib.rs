//! Terminal frontend for the Aprendia study engine.

pub mod audio;
pub mod driver;
pub mod logging;
pub mod terminal;
pub mod watch;
