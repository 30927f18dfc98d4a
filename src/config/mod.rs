pub mod cli;
pub mod plan;

pub use cli::{Cli, Command};
pub use plan::PlanConfig;
