//! Configuration: data directory resolution and user settings

pub mod paths;
pub mod settings;

pub use paths::AqshaPaths;
pub use settings::{Language, Settings};
