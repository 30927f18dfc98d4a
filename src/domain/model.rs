use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cinnamon farm: the unit that owns plots and carries the total area the
/// allocator distributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub location: String,
    /// Total farm area in hectares.
    pub total_area: f64,
    /// Number of plots the farm is divided into.
    pub plot_count: usize,
    pub created_at: DateTime<Utc>,
}

impl Farm {
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        location: impl Into<String>,
        total_area: f64,
        plot_count: usize,
    ) -> Self {
        let name = name.into();
        Self {
            id: slug(&name),
            name,
            owner: owner.into(),
            location: location.into(),
            total_area,
            plot_count,
            created_at: Utc::now(),
        }
    }
}

/// A subdivision of a farm with its own area, crop variety, and growth status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plot {
    pub id: String,
    pub farm_id: String,
    /// Display label assigned by the naming policy, e.g. "Plot A".
    pub name: String,
    /// Plot area in hectares.
    pub area: f64,
    pub crop_variety: String,
    pub status: PlotStatus,
}

impl Plot {
    pub fn new(farm_id: &str, name: impl Into<String>, area: f64, crop_variety: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: format!("{}/{}", farm_id, slug(&name)),
            farm_id: farm_id.to_string(),
            name,
            area,
            crop_variety: crop_variety.into(),
            status: PlotStatus::Preparing,
        }
    }

    /// Renames the plot, keeping the id in sync with the label.
    pub fn rename(&mut self, new_name: impl Into<String>) {
        let new_name = new_name.into();
        self.id = format!("{}/{}", self.farm_id, slug(&new_name));
        self.name = new_name;
    }
}

/// Plot lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlotStatus {
    #[default]
    Preparing,
    Planted,
    Growing,
    Mature,
    Harvesting,
    Harvested,
    Resting,
}

impl std::fmt::Display for PlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PlotStatus::Preparing => "PREPARING",
            PlotStatus::Planted => "PLANTED",
            PlotStatus::Growing => "GROWING",
            PlotStatus::Mature => "MATURE",
            PlotStatus::Harvesting => "HARVESTING",
            PlotStatus::Harvested => "HARVESTED",
            PlotStatus::Resting => "RESTING",
        };
        write!(f, "{}", label)
    }
}

/// A farm together with its plots. Plots are owned by the plan, so dropping
/// the plan (or deleting the farm) discards them with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmPlan {
    pub farm: Farm,
    pub plots: Vec<Plot>,
}

impl FarmPlan {
    pub fn allocated_area(&self) -> f64 {
        self.plots.iter().map(|p| p.area).sum()
    }

    /// Unassigned hectares. Under-allocation is a legal state; the caller
    /// surfaces this as "remaining area".
    pub fn remaining_area(&self) -> f64 {
        self.farm.total_area - self.allocated_area()
    }

    pub fn labels(&self) -> Vec<String> {
        self.plots.iter().map(|p| p.name.clone()).collect()
    }
}

fn slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_normalizes_names() {
        assert_eq!(slug("Galle Estate"), "galle-estate");
        assert_eq!(slug("  Plot A "), "plot-a");
    }

    #[test]
    fn test_remaining_area() {
        let farm = Farm::new("Galle Estate", "N. Perera", "Galle", 10.0, 3);
        let plots = vec![
            Plot::new(&farm.id, "Plot A", 3.0, "Ceylon Alba"),
            Plot::new(&farm.id, "Plot B", 3.0, "Ceylon Alba"),
        ];
        let plan = FarmPlan { farm, plots };
        assert!((plan.remaining_area() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_status_display_matches_ui_labels() {
        assert_eq!(PlotStatus::Preparing.to_string(), "PREPARING");
        assert_eq!(PlotStatus::Harvesting.to_string(), "HARVESTING");
    }
}
