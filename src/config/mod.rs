//! Configuration for spendcast: where data lives and user preferences

pub mod paths;
pub mod settings;

pub use paths::SpendcastPaths;
pub use settings::Settings;
