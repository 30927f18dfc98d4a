use cinnaplot::core::naming;
use cinnaplot::utils::{logger, validation};
use cinnaplot::{
    allocate_equal_areas, build_plan, validate_allocation, Cli, Command, ExportFormat, FarmError,
    LocalStorage, PlanConfig, PlanEngine,
};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting cinnaplot CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli.command);
    }

    if let Err(e) = run(cli.command) {
        tracing::error!("❌ Command failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

// 1 for allocation/validation failures, 2 for config and usage problems.
fn exit_code(error: &FarmError) -> i32 {
    match error {
        FarmError::InvalidConfigValue { .. }
        | FarmError::MissingConfig { .. }
        | FarmError::TomlError(_)
        | FarmError::IoError(_) => 2,
        _ => 1,
    }
}

fn run(command: Command) -> cinnaplot::Result<()> {
    match command {
        Command::Allocate {
            total_area,
            plot_count,
            json,
        } => {
            let total = validation::parse_area("total-area", &total_area)?;
            let areas = allocate_equal_areas(total, plot_count)?;
            let labels = naming::generate_labels(plot_count);

            if json {
                let rows: Vec<serde_json::Value> = labels
                    .iter()
                    .zip(&areas)
                    .map(|(name, area)| serde_json::json!({ "name": name, "area_ha": area }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for (name, area) in labels.iter().zip(&areas) {
                    println!("{:<10} {:>6} ha", name, area);
                }
                println!("{:<10} {:>6} ha", "Total", total);
            }
            Ok(())
        }

        Command::Validate { total_area, areas } => {
            let total = validation::parse_area("total-area", &total_area)?;
            let proposed = validation::parse_area_list("areas", &areas)?;
            let report = validate_allocation(&proposed, total);

            for violation in &report.out_of_range {
                eprintln!(
                    "❌ Plot {}: area {} ha is out of range",
                    violation.index + 1,
                    violation.value
                );
            }
            if let Some(overage) = report.overage {
                eprintln!("❌ Plots exceed the farm total by {} ha", overage);
            }

            let remaining = report.into_result()?;
            println!("✅ Allocation valid ({} ha remaining)", remaining);
            Ok(())
        }

        Command::Plan {
            config,
            output,
            formats,
        } => {
            let plan_config = PlanConfig::from_file(&config)?;
            let formats: Vec<ExportFormat> = formats
                .iter()
                .map(|f| f.parse())
                .collect::<cinnaplot::Result<_>>()?;

            let mut plan = build_plan(&plan_config)?;
            plan_config.apply_overrides(&mut plan)?;

            let engine = PlanEngine::new(LocalStorage::new(output.clone()));
            let written = engine.export(&plan, &formats)?;

            println!("✅ Farm plan for '{}' exported", plan.farm.name);
            for path in written {
                println!("📁 {}/{}", output, path);
            }
            Ok(())
        }
    }
}
