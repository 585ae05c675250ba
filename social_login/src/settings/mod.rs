mod errors;
mod merge;
mod source;

pub use errors::ConfigError;
pub use merge::extend_deep;
pub use source::ConfigSource;
