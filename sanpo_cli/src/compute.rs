use std::{path::PathBuf, time::Duration};

use comfy_table::{Table, presets::UTF8_FULL};
use sanpo_batch::{
    BatchOutcome, BatchReport, DirectorySink, Orchestrator, OrchestratorParams, PipelineError,
    RouteReport,
};
use sanpo_ors::{OrsClient, OrsProfile};
use sanpo_store::StoreClient;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;

pub struct ComputeArgs {
    pub out: PathBuf,
    pub delay: Duration,
    pub profile: OrsProfile,
    pub skip_computed: bool,
}

fn orchestrator(
    config: &AppConfig,
    args: ComputeArgs,
) -> Orchestrator<StoreClient, OrsClient, DirectorySink> {
    Orchestrator::new(
        StoreClient::new(config.store_params()),
        OrsClient::new(config.ors_params()),
        DirectorySink::new(args.out),
        OrchestratorParams {
            profile: args.profile,
            request_delay: args.delay,
            skip_computed: args.skip_computed,
        },
    )
}

pub async fn run_route(
    config: &AppConfig,
    args: ComputeArgs,
    route_id: Uuid,
) -> Result<(), anyhow::Error> {
    let report = orchestrator(config, args).run_route(route_id).await?;

    print_route(&report);

    Ok(())
}

pub async fn run_all(config: &AppConfig, args: ComputeArgs) -> Result<(), anyhow::Error> {
    let report = match orchestrator(config, args).run_all().await {
        Ok(report) => report,
        Err(PipelineError::CombinedStatements { report, source }) => {
            print_batch(&report);
            return Err(source.into());
        }
        Err(err) => return Err(err.into()),
    };

    print_batch(&report);

    if report.failed() > 0 {
        warn!("{} of {} routes failed", report.failed(), report.total());
    }

    Ok(())
}

fn print_route(report: &RouteReport) {
    info!("Route: {} ({})", report.route_name, report.route_id);
    info!("Waypoints: {}", report.waypoint_count);
    info!("Path points: {}", report.point_count);
    info!("Distance: {}", report.distance_label());
    info!("Duration: {}", report.duration_label());
    info!("Ascent: {}", report.ascent_label());
    info!("Geometry: {}", report.geometry_file.display());
    if let Some(statement_file) = &report.statement_file {
        info!("Statement: {}", statement_file.display());
    }
}

fn print_batch(report: &BatchReport) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Route", "Status", "Points", "Distance", "Duration", "Ascent", "Detail",
    ]);

    for result in &report.results {
        let row = match &result.outcome {
            BatchOutcome::Succeeded(route) => vec![
                result.route_name.clone(),
                "ok".to_string(),
                route.point_count.to_string(),
                route.distance_label(),
                route.duration_label(),
                route.ascent_label(),
                route.geometry_file.display().to_string(),
            ],
            BatchOutcome::Failed { stage, reason } => vec![
                result.route_name.clone(),
                "failed".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                format!("after {}: {}", stage, reason),
            ],
            BatchOutcome::Skipped => vec![
                result.route_name.clone(),
                "skipped".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                "geometry already stored".to_string(),
            ],
        };
        table.add_row(row);
    }

    println!("{table}");

    info!(
        "{} succeeded, {} failed, {} skipped",
        report.succeeded(),
        report.failed(),
        report.skipped()
    );
    match &report.statements_file {
        Some(path) => info!("Statements: {}", path.display()),
        None => info!("No statements written"),
    }
}
