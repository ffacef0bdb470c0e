use anyhow::Result;
use clap::{Parser, Subcommand};
use flowrisk::commands::{
    dataset_info_command, export_report_command, flows_command, heatmap_command,
    init_dataset_command, input_industries_command, risk_command, secondary_inputs_command,
    summary_command, top_inputs_command,
};
use flowrisk::init_tracing;

/// Supplier-diversification analysis over inter-country input-output tables.
///
/// This CLI is a thin wrapper around `flowrisk-core` (exposed in code as
/// `flowrisk_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "flowrisk",
    version,
    about = "Supplier concentration risk from input-output tables",
    long_about = None
)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new dataset at the given root.
    ///
    /// This will:
    /// - Create `.flowrisk`, `data` and `reports` directories.
    /// - Write a `.flowrisk/dataset.json` config file.
    InitDataset {
        /// Dataset root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Optional dataset name. If omitted, the name is derived from the root directory.
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the dataset config, source file status and table sizes.
    DatasetInfo {
        /// Dataset root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Rank the largest foreign suppliers of a country-industry pair.
    TopInputs {
        #[command(flatten)]
        query: QueryArgs,

        /// Append the importer's own inputs for every selected industry.
        #[arg(long, default_value_t = false)]
        domestic_breakdown: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Rank suppliers, then each supplier's own suppliers.
    SecondaryInputs {
        #[command(flatten)]
        query: QueryArgs,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Concentration metrics (HHI, entropy, Gini, weighted HHI) per input industry.
    Risk {
        #[command(flatten)]
        query: QueryArgs,

        /// Country risk weight override as CODE=VALUE (repeatable).
        #[arg(long = "weight", value_name = "CODE=VALUE")]
        weights: Vec<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Input totals per industry and the country split of one input industry.
    Summary {
        #[command(flatten)]
        query: QueryArgs,

        /// Input industry to break down by country. Defaults to the first available.
        #[arg(long)]
        input_industry: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the input industries present among a pair's suppliers.
    InputIndustries {
        #[command(flatten)]
        query: QueryArgs,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Supplier flow links for map rendering.
    Flows {
        #[command(flatten)]
        query: QueryArgs,

        /// Also expand every supplier into its own top suppliers.
        #[arg(long, default_value_t = false)]
        secondary: bool,

        /// Scale link thickness by flow value.
        #[arg(long, default_value_t = false)]
        thickness: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Industry-by-industry flows from one country into a reference country.
    Heatmap {
        /// Dataset root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Supplying country. Defaults to the configured importer.
        #[arg(long)]
        country: Option<String>,

        /// Receiving country.
        #[arg(long)]
        reference: String,

        /// Apply ln(1 + v) to every cell.
        #[arg(long, default_value_t = false)]
        log: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write summary, risk and flows for one pair to `reports/<C>_<I>.json`.
    ExportReport {
        /// Dataset root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Importing country. Defaults to the configured importer.
        #[arg(long)]
        country: Option<String>,

        /// Receiving industry. Defaults to the configured industry.
        #[arg(long)]
        industry: Option<String>,

        /// Country risk weight override as CODE=VALUE (repeatable).
        #[arg(long = "weight", value_name = "CODE=VALUE")]
        weights: Vec<String>,

        /// Print the bundle as JSON as well.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Target pair and depth shared by the query commands.
#[derive(clap::Args, Debug)]
struct QueryArgs {
    /// Dataset root directory. Defaults to the current working directory.
    #[arg(long, default_value = ".")]
    root: String,

    /// Importing country code. Defaults to the configured importer.
    #[arg(long)]
    country: Option<String>,

    /// Receiving industry code. Defaults to the configured industry.
    #[arg(long)]
    industry: Option<String>,

    /// Number of suppliers to keep. Defaults to the configured depth.
    #[arg(long)]
    depth: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::InitDataset { root, name } => init_dataset_command(&root, name)?,
        Command::DatasetInfo { root, json } => dataset_info_command(&root, json)?,
        Command::TopInputs { query, domestic_breakdown, json } => top_inputs_command(
            &query.root,
            query.country.as_deref(),
            query.industry.as_deref(),
            query.depth,
            domestic_breakdown,
            json,
        )?,
        Command::SecondaryInputs { query, json } => secondary_inputs_command(
            &query.root,
            query.country.as_deref(),
            query.industry.as_deref(),
            query.depth,
            json,
        )?,
        Command::Risk { query, weights, json } => risk_command(
            &query.root,
            query.country.as_deref(),
            query.industry.as_deref(),
            query.depth,
            &weights,
            json,
        )?,
        Command::Summary { query, input_industry, json } => summary_command(
            &query.root,
            query.country.as_deref(),
            query.industry.as_deref(),
            input_industry.as_deref(),
            query.depth,
            json,
        )?,
        Command::InputIndustries { query, json } => input_industries_command(
            &query.root,
            query.country.as_deref(),
            query.industry.as_deref(),
            query.depth,
            json,
        )?,
        Command::Flows { query, secondary, thickness, json } => flows_command(
            &query.root,
            query.country.as_deref(),
            query.industry.as_deref(),
            query.depth,
            secondary,
            thickness,
            json,
        )?,
        Command::Heatmap { root, country, reference, log, json } => {
            heatmap_command(&root, country.as_deref(), &reference, log, json)?
        }
        Command::ExportReport { root, country, industry, weights, json } => {
            export_report_command(&root, country.as_deref(), industry.as_deref(), &weights, json)?
        }
    }

    Ok(())
}
