//! Configuration for StagePass

mod paths;
mod user_config;

pub use paths::Paths;
pub use user_config::UserConfig;
