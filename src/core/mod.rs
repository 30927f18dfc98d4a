pub mod allocator;
pub mod naming;
pub mod planner;

pub use crate::domain::model::{Farm, FarmPlan, Plot, PlotStatus};
pub use crate::domain::ports::{PlanSource, Storage};
pub use crate::utils::error::Result;
