use cinnaplot::{build_plan, ExportFormat, FarmPlan, LocalStorage, PlanConfig, PlanEngine};
use std::fs;
use tempfile::TempDir;

const PLAN_TOML: &str = r#"
[farm]
name = "Galle Estate"
owner = "N. Perera"
location = "Galle"
total_area = 10.0
plot_count = 3

[defaults]
crop_variety = "Ceylon Alba"
"#;

fn write_plan(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("farm.toml");
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_plan_export_round_trip() {
    let config_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let output_path = output_dir.path().to_str().unwrap().to_string();

    let config = PlanConfig::from_file(write_plan(&config_dir, PLAN_TOML)).unwrap();
    let engine = PlanEngine::new(LocalStorage::new(output_path.clone()));
    let written = engine
        .run(&config, &[ExportFormat::Csv, ExportFormat::Json])
        .unwrap();
    assert_eq!(written, vec!["plots.csv", "farm_plan.json"]);

    let csv_content = fs::read_to_string(output_dir.path().join("plots.csv")).unwrap();
    assert!(csv_content.starts_with("name,area_ha,crop_variety,status"));
    assert!(csv_content.contains("Plot A,3.3,Ceylon Alba,PREPARING"));
    assert!(csv_content.contains("Plot B,3.3,Ceylon Alba,PREPARING"));
    assert!(csv_content.contains("Plot C,3.4,Ceylon Alba,PREPARING"));

    let json_content = fs::read_to_string(output_dir.path().join("farm_plan.json")).unwrap();
    let plan: FarmPlan = serde_json::from_str(&json_content).unwrap();
    assert_eq!(plan.farm.name, "Galle Estate");
    assert_eq!(plan.plots.len(), 3);
    assert!(plan.remaining_area().abs() < 1e-9);
}

#[test]
fn test_overrides_change_area_and_status() {
    let config_dir = TempDir::new().unwrap();
    let toml = format!(
        "{}\n[[plots]]\nname = \"Plot A\"\narea = 3.0\nstatus = \"planted\"\n",
        PLAN_TOML
    );

    let config = PlanConfig::from_file(write_plan(&config_dir, &toml)).unwrap();
    let mut plan = build_plan(&config).unwrap();
    config.apply_overrides(&mut plan).unwrap();

    assert_eq!(plan.plots[0].area, 3.0);
    assert_eq!(plan.plots[0].status.to_string(), "PLANTED");
    assert!((plan.remaining_area() - 0.3).abs() < 1e-9);
}

#[test]
fn test_over_allocated_overrides_rejected_before_export() {
    let config_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let toml = format!(
        "{}\n[[plots]]\nname = \"Plot A\"\narea = 9.0\n",
        PLAN_TOML
    );

    let config = PlanConfig::from_file(write_plan(&config_dir, &toml)).unwrap();
    let mut plan = build_plan(&config).unwrap();
    assert!(config.apply_overrides(&mut plan).is_err());

    // An invalid plan must never reach storage.
    let engine = PlanEngine::new(LocalStorage::new(
        output_dir.path().to_str().unwrap().to_string(),
    ));
    assert!(engine.export(&plan, &[ExportFormat::Csv]).is_err());
    assert!(!output_dir.path().join("plots.csv").exists());
}

#[test]
fn test_unknown_override_label_rejected() {
    let config_dir = TempDir::new().unwrap();
    let toml = format!(
        "{}\n[[plots]]\nname = \"Plot Z\"\narea = 1.0\n",
        PLAN_TOML
    );

    let config = PlanConfig::from_file(write_plan(&config_dir, &toml)).unwrap();
    let mut plan = build_plan(&config).unwrap();
    assert!(config.apply_overrides(&mut plan).is_err());
}

#[test]
fn test_malformed_config_rejected_at_load() {
    let config_dir = TempDir::new().unwrap();
    assert!(PlanConfig::from_file(write_plan(&config_dir, "not toml [")).is_err());

    let zero_plots = PLAN_TOML.replace("plot_count = 3", "plot_count = 0");
    assert!(PlanConfig::from_file(write_plan(&config_dir, &zero_plots)).is_err());
}
