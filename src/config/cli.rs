use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "cinnaplot")]
#[command(about = "Plot area allocation and farm planning for cinnamon farms")]
pub struct Cli {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Split a farm's total area evenly across plots
    Allocate {
        #[arg(long, help = "Farm total area in hectares")]
        total_area: String,

        #[arg(long, help = "Number of plots (1-50)")]
        plot_count: usize,

        #[arg(long, help = "Print the allocation as JSON")]
        json: bool,
    },

    /// Check user-proposed plot areas against the farm total
    Validate {
        #[arg(long, help = "Farm total area in hectares")]
        total_area: String,

        #[arg(long, help = "Comma-separated plot areas, e.g. 3.3,3.3,3.4")]
        areas: String,
    },

    /// Build a farm plan from a TOML file and export the plot table
    Plan {
        #[arg(long, help = "Path to the farm plan TOML file")]
        config: String,

        #[arg(long, default_value = "./output", help = "Output directory")]
        output: String,

        #[arg(
            long,
            value_delimiter = ',',
            default_value = "csv,json",
            help = "Export formats"
        )]
        formats: Vec<String>,
    },
}
