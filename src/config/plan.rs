use crate::core::allocator::{self, MAX_PLOT_COUNT};
use crate::domain::model::{FarmPlan, PlotStatus};
use crate::domain::ports::PlanSource;
use crate::utils::error::{FarmError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_area, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CROP_VARIETY: &str = "Ceylon Cinnamon";

/// TOML description of a farm plan:
///
/// ```toml
/// [farm]
/// name = "Galle Estate"
/// owner = "N. Perera"
/// location = "Galle"
/// total_area = 10.0
/// plot_count = 3
///
/// [defaults]
/// crop_variety = "Ceylon Alba"
///
/// [[plots]]
/// name = "Plot A"
/// area = 3.0
/// status = "planted"
/// ```
///
/// The `[[plots]]` entries are optional per-plot overrides applied on top of
/// the equal split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    pub farm: FarmSection,
    pub defaults: Option<DefaultsSection>,
    #[serde(default)]
    pub plots: Vec<PlotOverride>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmSection {
    pub name: String,
    pub owner: String,
    pub location: String,
    pub total_area: f64,
    pub plot_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsSection {
    pub crop_variety: Option<String>,
    pub status: Option<PlotStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotOverride {
    /// Label of the generated plot to override, e.g. "Plot B".
    pub name: String,
    pub area: Option<f64>,
    pub crop_variety: Option<String>,
    pub status: Option<PlotStatus>,
}

impl PlanConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PlanConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn crop_variety(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.crop_variety.as_deref())
            .unwrap_or(DEFAULT_CROP_VARIETY)
    }

    pub fn default_status(&self) -> PlotStatus {
        self.defaults
            .as_ref()
            .and_then(|d| d.status)
            .unwrap_or_default()
    }

    /// Applies the `[[plots]]` overrides to a generated plan, then
    /// re-validates the full allocation. Nothing is mutated permanently on
    /// failure paths before validation; validation runs against the already
    /// applied areas, so the caller must treat an error as fatal for the
    /// plan.
    pub fn apply_overrides(&self, plan: &mut FarmPlan) -> Result<()> {
        let default_status = self.default_status();
        for plot in plan.plots.iter_mut() {
            plot.status = default_status;
        }

        for over in &self.plots {
            let plot = plan
                .plots
                .iter_mut()
                .find(|p| p.name == over.name)
                .ok_or_else(|| FarmError::UnknownPlot {
                    label: over.name.clone(),
                })?;
            if let Some(area) = over.area {
                plot.area = area;
            }
            if let Some(variety) = &over.crop_variety {
                plot.crop_variety = variety.clone();
            }
            if let Some(status) = over.status {
                plot.status = status;
            }
        }

        let areas: Vec<f64> = plan.plots.iter().map(|p| p.area).collect();
        allocator::validate_allocation(&areas, plan.farm.total_area)
            .into_result()
            .map(|_| ())
    }
}

impl Validate for PlanConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("farm.name", &self.farm.name)?;
        validate_non_empty_string("farm.owner", &self.farm.owner)?;
        validate_non_empty_string("farm.location", &self.farm.location)?;
        validate_positive_area("farm.total_area", self.farm.total_area)?;
        validate_range("farm.plot_count", self.farm.plot_count, 1, MAX_PLOT_COUNT)?;

        for (i, over) in self.plots.iter().enumerate() {
            validate_non_empty_string(&format!("plots[{}].name", i), &over.name)?;
            if let Some(area) = over.area {
                validate_positive_area(&format!("plots[{}].area", i), area)?;
            }
        }

        Ok(())
    }
}

impl PlanSource for PlanConfig {
    fn farm_name(&self) -> &str {
        &self.farm.name
    }

    fn owner(&self) -> &str {
        &self.farm.owner
    }

    fn location(&self) -> &str {
        &self.farm.location
    }

    fn total_area(&self) -> f64 {
        self.farm.total_area
    }

    fn plot_count(&self) -> usize {
        self.farm.plot_count
    }

    fn crop_variety(&self) -> &str {
        self.crop_variety()
    }
}
