use crate::core::allocator;
use crate::core::naming;
use crate::domain::model::{Farm, FarmPlan, Plot};
use crate::domain::ports::{PlanSource, Storage};
use crate::utils::error::{FarmError, Result};

/// Builds a farm plan from a plan source: allocate areas, assign labels,
/// then re-check the allocation invariant before the plan leaves the core.
pub fn build_plan(source: &dyn PlanSource) -> Result<FarmPlan> {
    let farm = Farm::new(
        source.farm_name(),
        source.owner(),
        source.location(),
        source.total_area(),
        source.plot_count(),
    );
    let areas = allocator::allocate_equal_areas(farm.total_area, farm.plot_count)?;
    let labels = naming::generate_labels(farm.plot_count);

    let plots = labels
        .into_iter()
        .zip(areas)
        .map(|(label, area)| Plot::new(&farm.id, label, area, source.crop_variety()))
        .collect();

    let plan = FarmPlan { farm, plots };
    check_invariant(&plan)?;
    Ok(plan)
}

/// Bulk regeneration for a new plot count. Custom areas and labels are
/// discarded; the crop variety carries over from the existing plots.
pub fn resize_plan(plan: &FarmPlan, new_plot_count: usize) -> Result<FarmPlan> {
    let mut farm = plan.farm.clone();
    farm.plot_count = new_plot_count;

    let areas = allocator::allocate_equal_areas(farm.total_area, new_plot_count)?;
    let variety = plan
        .plots
        .first()
        .map(|p| p.crop_variety.clone())
        .unwrap_or_default();

    let plots = naming::generate_labels(new_plot_count)
        .into_iter()
        .zip(areas)
        .map(|(label, area)| Plot::new(&farm.id, label, area, variety.clone()))
        .collect();

    Ok(FarmPlan { farm, plots })
}

/// Adds one plot, named with the first unused label in the sequence. Fails
/// when the farm's remaining area cannot cover the new plot.
pub fn add_plot(plan: &mut FarmPlan, area: f64, crop_variety: &str) -> Result<String> {
    let mut proposed: Vec<f64> = plan.plots.iter().map(|p| p.area).collect();
    proposed.push(area);
    allocator::validate_allocation(&proposed, plan.farm.total_area).into_result()?;

    let label = naming::next_unused_label(&plan.labels());
    plan.plots
        .push(Plot::new(&plan.farm.id, label.clone(), area, crop_variety));
    plan.farm.plot_count = plan.plots.len();
    Ok(label)
}

/// Removes the plot with the given label. Its area returns to the farm's
/// unassigned remainder.
pub fn remove_plot(plan: &mut FarmPlan, label: &str) -> Result<Plot> {
    let position = plan
        .plots
        .iter()
        .position(|p| p.name == label)
        .ok_or_else(|| FarmError::UnknownPlot {
            label: label.to_string(),
        })?;
    let removed = plan.plots.remove(position);
    plan.farm.plot_count = plan.plots.len();
    Ok(removed)
}

/// Renames one plot. The new label may be anything (custom names are legal;
/// the naming policy simply skips them when filling gaps), but it must not
/// collide with an existing plot.
pub fn rename_plot(plan: &mut FarmPlan, label: &str, new_name: &str) -> Result<()> {
    if plan.plots.iter().any(|p| p.name == new_name) {
        return Err(FarmError::InvalidConfigValue {
            field: "name".to_string(),
            value: new_name.to_string(),
            reason: "A plot with this name already exists".to_string(),
        });
    }
    find_plot(plan, label)?.rename(new_name);
    Ok(())
}

/// Changes one plot's crop variety.
pub fn set_crop_variety(plan: &mut FarmPlan, label: &str, variety: &str) -> Result<()> {
    find_plot(plan, label)?.crop_variety = variety.to_string();
    Ok(())
}

/// Resizes one plot, validating the whole allocation before applying.
pub fn resize_plot(plan: &mut FarmPlan, label: &str, new_area: f64) -> Result<()> {
    let position = plan
        .plots
        .iter()
        .position(|p| p.name == label)
        .ok_or_else(|| FarmError::UnknownPlot {
            label: label.to_string(),
        })?;

    let mut proposed: Vec<f64> = plan.plots.iter().map(|p| p.area).collect();
    proposed[position] = new_area;
    allocator::validate_allocation(&proposed, plan.farm.total_area).into_result()?;

    plan.plots[position].area = new_area;
    Ok(())
}

/// Replaces every plot's area with a fresh equal split. Labels, varieties,
/// and statuses are kept; only areas change.
pub fn redistribute(plan: &mut FarmPlan) -> Result<()> {
    let areas = allocator::redistribute_equally(plan.farm.total_area, plan.plots.len())?;
    for (plot, area) in plan.plots.iter_mut().zip(areas) {
        plot.area = area;
    }
    Ok(())
}

fn find_plot<'a>(plan: &'a mut FarmPlan, label: &str) -> Result<&'a mut Plot> {
    plan.plots
        .iter_mut()
        .find(|p| p.name == label)
        .ok_or_else(|| FarmError::UnknownPlot {
            label: label.to_string(),
        })
}

fn check_invariant(plan: &FarmPlan) -> Result<()> {
    let areas: Vec<f64> = plan.plots.iter().map(|p| p.area).collect();
    allocator::validate_allocation(&areas, plan.farm.total_area)
        .into_result()
        .map(|_| ())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = FarmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(FarmError::InvalidConfigValue {
                field: "formats".to_string(),
                value: other.to_string(),
                reason: "Supported formats: csv, json".to_string(),
            }),
        }
    }
}

/// Drives a full plan run: build, validate, export. The plan must be
/// confirmed valid before anything is written, so a rejected allocation
/// never reaches storage.
pub struct PlanEngine<S: Storage> {
    storage: S,
}

impl<S: Storage> PlanEngine<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn run(&self, source: &dyn PlanSource, formats: &[ExportFormat]) -> Result<Vec<String>> {
        tracing::info!("Building plan for farm '{}'", source.farm_name());
        let plan = build_plan(source)?;
        tracing::info!(
            "Allocated {} plots over {} ha ({:.1} ha remaining)",
            plan.plots.len(),
            plan.farm.total_area,
            plan.remaining_area()
        );
        self.export(&plan, formats)
    }

    /// Exports an already-built plan. The allocation invariant is re-checked
    /// first, so an over-allocated plan never reaches storage.
    pub fn export(&self, plan: &FarmPlan, formats: &[ExportFormat]) -> Result<Vec<String>> {
        check_invariant(plan)?;

        let mut written = Vec::new();
        for format in formats {
            let (path, data) = match format {
                ExportFormat::Csv => ("plots.csv".to_string(), render_csv(plan)?),
                ExportFormat::Json => ("farm_plan.json".to_string(), render_json(plan)?),
            };
            self.storage.write_file(&path, &data)?;
            tracing::info!("Exported {}", path);
            written.push(path);
        }

        Ok(written)
    }
}

/// Plot table as CSV: one row per plot.
pub fn render_csv(plan: &FarmPlan) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["name", "area_ha", "crop_variety", "status"])?;
    for plot in &plan.plots {
        writer.write_record([
            plot.name.as_str(),
            &plot.area.to_string(),
            plot.crop_variety.as_str(),
            &plot.status.to_string(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| FarmError::IoError(std::io::Error::other(e.to_string())))
}

/// Full plan (farm plus plots) as pretty-printed JSON.
pub fn render_json(plan: &FarmPlan) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(plan)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PlotStatus;

    struct TestSource;

    impl PlanSource for TestSource {
        fn farm_name(&self) -> &str {
            "Galle Estate"
        }
        fn owner(&self) -> &str {
            "N. Perera"
        }
        fn location(&self) -> &str {
            "Galle"
        }
        fn total_area(&self) -> f64 {
            10.0
        }
        fn plot_count(&self) -> usize {
            3
        }
        fn crop_variety(&self) -> &str {
            "Ceylon Alba"
        }
    }

    #[test]
    fn test_build_plan_areas_and_labels() {
        let plan = build_plan(&TestSource).unwrap();
        let areas: Vec<f64> = plan.plots.iter().map(|p| p.area).collect();
        assert_eq!(areas, vec![3.3, 3.3, 3.4]);
        assert_eq!(plan.labels(), vec!["Plot A", "Plot B", "Plot C"]);
        assert!(plan.plots.iter().all(|p| p.status == PlotStatus::Preparing));
    }

    #[test]
    fn test_removed_label_is_reused() {
        let mut plan = build_plan(&TestSource).unwrap();
        remove_plot(&mut plan, "Plot B").unwrap();
        let label = add_plot(&mut plan, 3.3, "Ceylon Alba").unwrap();
        assert_eq!(label, "Plot B");
    }

    #[test]
    fn test_add_plot_rejects_over_allocation() {
        let mut plan = build_plan(&TestSource).unwrap();
        let err = add_plot(&mut plan, 2.0, "Ceylon Alba");
        assert!(err.is_err());
        assert_eq!(plan.plots.len(), 3);
    }

    #[test]
    fn test_resize_plot_validates_whole_allocation() {
        let mut plan = build_plan(&TestSource).unwrap();
        assert!(resize_plot(&mut plan, "Plot A", 5.0).is_err());
        assert!(resize_plot(&mut plan, "Plot A", 3.0).is_ok());
        assert!((plan.remaining_area() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_resize_plan_regenerates_from_scratch() {
        let mut plan = build_plan(&TestSource).unwrap();
        resize_plot(&mut plan, "Plot C", 1.0).unwrap();

        let resized = resize_plan(&plan, 5).unwrap();
        assert_eq!(resized.farm.plot_count, 5);
        let areas: Vec<f64> = resized.plots.iter().map(|p| p.area).collect();
        assert_eq!(areas, vec![2.0, 2.0, 2.0, 2.0, 2.0]);
        assert_eq!(
            resized.labels(),
            vec!["Plot A", "Plot B", "Plot C", "Plot D", "Plot E"]
        );
        assert_eq!(resized.plots[0].crop_variety, "Ceylon Alba");
    }

    #[test]
    fn test_rename_keeps_status_and_rejects_duplicates() {
        let mut plan = build_plan(&TestSource).unwrap();
        plan.plots[1].status = PlotStatus::Growing;

        rename_plot(&mut plan, "Plot B", "Riverside").unwrap();
        assert_eq!(plan.plots[1].name, "Riverside");
        assert_eq!(plan.plots[1].status, PlotStatus::Growing);

        assert!(rename_plot(&mut plan, "Plot A", "Riverside").is_err());
    }

    #[test]
    fn test_set_crop_variety() {
        let mut plan = build_plan(&TestSource).unwrap();
        set_crop_variety(&mut plan, "Plot C", "Ceylon Continental").unwrap();
        assert_eq!(plan.plots[2].crop_variety, "Ceylon Continental");
        assert!(set_crop_variety(&mut plan, "Plot Z", "x").is_err());
    }

    #[test]
    fn test_redistribute_restores_equal_split() {
        let mut plan = build_plan(&TestSource).unwrap();
        resize_plot(&mut plan, "Plot A", 1.0).unwrap();
        redistribute(&mut plan).unwrap();
        let areas: Vec<f64> = plan.plots.iter().map(|p| p.area).collect();
        assert_eq!(areas, vec![3.3, 3.3, 3.4]);
    }
}
