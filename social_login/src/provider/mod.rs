mod descriptor;
mod types;

pub use descriptor::{AuthenticateOptions, ModuleOptions, StrategyDescriptor, configure_strategies};
pub use types::{Provider, UnknownProvider};
