use crate::utils::error::Result;

/// Output sink for exported plans. The core never touches the filesystem
/// directly; exports go through this seam.
pub trait Storage: Send + Sync {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// Anything that can describe the farm a plan is built from. Implemented by
/// both the CLI arguments and the TOML plan file.
pub trait PlanSource {
    fn farm_name(&self) -> &str;
    fn owner(&self) -> &str;
    fn location(&self) -> &str;
    fn total_area(&self) -> f64;
    fn plot_count(&self) -> usize;
    fn crop_variety(&self) -> &str;
}
