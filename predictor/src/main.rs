use anyhow::Context;
use chrono::NaiveDateTime;
use clap::Parser;
use energycore::api::PredictionMode;
use energycore::math::StatsHelper;
use energycore::processing::ViewState;
use energycore::state::{parse_date_strict, FormState};
use log::info;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use workflow::config::WorkflowConfig;
use workflow::export::write_export;
use workflow::runner::Runner;

mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Energy prediction command-line client")]
struct Args {
    /// First day of the range (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_parser = parse_date_strict)]
    start: Option<NaiveDateTime>,
    /// Last day of the range, same format as --start
    #[arg(long, value_parser = parse_date_strict)]
    end: Option<NaiveDateTime>,
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<String>,
    /// basic, solar or wind; solar and wind need coordinates
    #[arg(long, default_value_t = PredictionMode::Basic)]
    mode: PredictionMode,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
    /// IANA timezone sent with the request (defaults to the host zone)
    #[arg(long)]
    timezone: Option<String>,
    #[arg(long)]
    horizon_days: Option<i64>,
    /// Skip the forecast horizon check for located requests
    #[arg(long, default_value_t = false)]
    no_horizon: bool,
    /// Directory to write predictions.csv into
    #[arg(long)]
    export: Option<PathBuf>,
    /// Decode a saved /predict body instead of calling the service
    #[arg(long)]
    replay: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    }
    .with_overrides(
        args.base_url.clone(),
        args.timezone.clone(),
        args.horizon_days,
        args.no_horizon,
        args.export.clone(),
    );

    let form = FormState::new(args.mode)
        .with_dates(args.start, args.end)
        .with_location(
            args.latitude.as_deref().unwrap_or_default(),
            args.longitude.as_deref().unwrap_or_default(),
        );

    let client_config = workflow_config.to_client_config();
    client_config.validate()?;
    let runner = match args.replay {
        Some(path) => Runner::replay(client_config, path),
        None => Runner::new(client_config)?,
    };

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for prediction request")?;
    let result = runtime.block_on(runner.execute(&form))?;

    print_summary(&result.state.view);

    if let Some(dir) = &workflow_config.export_dir {
        let export = runner.export(&result.state)?;
        let path = write_export(dir, &export)?;
        println!("Exported {}", path.display());
    }

    if let Some(metrics) = runner.metrics() {
        info!(
            "requests={} failures={} stale={}",
            metrics.requests, metrics.failures, metrics.stale_responses
        );
    }

    Ok(())
}

fn print_summary(view: &ViewState) {
    if view.is_empty() {
        println!("No predictions returned for the requested range.");
        return;
    }

    let width = view
        .chart_series
        .iter()
        .map(|point| point.label.len())
        .max()
        .unwrap_or(0);
    for point in &view.chart_series {
        println!("{:<width$}  {} kWh", point.label, point.value, width = width);
    }

    let values = view.values();
    println!(
        "Total: {} kWh over {} points (mean {:.3}, peak {:.3})",
        view.total_energy,
        values.len(),
        StatsHelper::mean(&values),
        StatsHelper::peak(&values).unwrap_or_default()
    );
}
