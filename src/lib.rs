pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::LocalStorage;
pub use config::{Cli, Command, PlanConfig};
pub use crate::core::allocator::{
    allocate_equal_areas, redistribute_equally, validate_allocation, ValidationReport,
    MAX_PLOT_COUNT, MIN_PLOT_AREA,
};
pub use crate::core::planner::{build_plan, ExportFormat, PlanEngine};
pub use domain::model::{Farm, FarmPlan, Plot, PlotStatus};
pub use utils::error::{FarmError, Result};
