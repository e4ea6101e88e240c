use std::time::Duration;

use sanpo_core::{
    Coordinate, PathGeometry, Route, UpdateStatement, Waypoint, extract, join_statements,
};
use sanpo_ors::OrsProfile;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    error::PipelineError,
    report::{BatchOutcome, BatchReport, BatchResult, RouteReport, RouteStage},
    sink::{ArtifactSink, COMBINED_STATEMENTS_FILE, geometry_file_name, statement_file_name},
    source::{PathRouter, WaypointSource},
};

/// Pause between two routing calls of a batch, to stay under the service rate limit.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct OrchestratorParams {
    pub profile: OrsProfile,

    /// Applied between consecutive routes of a batch, never before the first one
    pub request_delay: Duration,

    /// Leave routes that already have a stored geometry untouched
    pub skip_computed: bool,
}

impl Default for OrchestratorParams {
    fn default() -> Self {
        Self {
            profile: OrsProfile::default(),
            request_delay: DEFAULT_REQUEST_DELAY,
            skip_computed: false,
        }
    }
}

/// Drives fetch, extract, route and persist for one route or all of them.
///
/// Routes are processed one after the other; nothing here runs concurrently.
pub struct Orchestrator<S, R, K> {
    store: S,
    router: R,
    sink: K,
    params: OrchestratorParams,
}

impl<S, R, K> Orchestrator<S, R, K>
where
    S: WaypointSource,
    R: PathRouter,
    K: ArtifactSink,
{
    pub fn new(store: S, router: R, sink: K, params: OrchestratorParams) -> Self {
        Self {
            store,
            router,
            sink,
            params,
        }
    }

    /// Processes a single route; any failure aborts the run.
    #[tracing::instrument(skip(self))]
    pub async fn run_route(&self, route_id: Uuid) -> Result<RouteReport, PipelineError> {
        let route = self.store.fetch_route(route_id).await?;
        let mut stage = RouteStage::Pending;

        let mut report = self.process(&route, &mut stage).await?;

        let sql = report.statement.to_string();
        report.statement_file = Some(
            self.sink
                .write_statements(&statement_file_name(&route), &sql)?,
        );

        info!(
            "{}: {} points, {}, {}",
            route.name,
            report.point_count,
            report.distance_label(),
            report.duration_label()
        );

        Ok(report)
    }

    /// Processes every route in the store. A failing route is recorded and
    /// the batch moves on.
    #[tracing::instrument(skip(self))]
    pub async fn run_all(&self) -> Result<BatchReport, PipelineError> {
        let routes = self.store.fetch_all_routes().await?;
        let total = routes.len();
        info!("Processing {} routes", total);

        let mut results = Vec::with_capacity(total);
        let mut statements: Vec<UpdateStatement> = Vec::new();
        let mut routed_any = false;

        for (index, route) in routes.iter().enumerate() {
            info!("[{}/{}] {}", index + 1, total, route.name);

            if self.params.skip_computed && route.has_geometry() {
                info!("{}: geometry already stored, skipping", route.name);
                results.push(batch_result(route, BatchOutcome::Skipped));
                continue;
            }

            if routed_any && !self.params.request_delay.is_zero() {
                debug!("Waiting {:?} before the next route", self.params.request_delay);
                tokio::time::sleep(self.params.request_delay).await;
            }
            routed_any = true;

            let mut stage = RouteStage::Pending;
            let outcome = match self.process(route, &mut stage).await {
                Ok(report) => {
                    info!(
                        "{}: {} points, {}, {}",
                        route.name,
                        report.point_count,
                        report.distance_label(),
                        report.duration_label()
                    );
                    statements.push(report.statement.clone());
                    BatchOutcome::Succeeded(Box::new(report))
                }
                Err(err) => {
                    warn!("{}: failed after {}: {}", route.name, stage, err);
                    BatchOutcome::Failed {
                        stage,
                        reason: err.to_string(),
                    }
                }
            };

            results.push(batch_result(route, outcome));
        }

        let statements_file = if statements.is_empty() {
            None
        } else {
            match self
                .sink
                .write_statements(COMBINED_STATEMENTS_FILE, &join_statements(&statements))
            {
                Ok(path) => Some(path),
                Err(source) => {
                    return Err(PipelineError::CombinedStatements {
                        report: Box::new(BatchReport {
                            results,
                            statements_file: None,
                        }),
                        source,
                    });
                }
            }
        };

        Ok(BatchReport {
            results,
            statements_file,
        })
    }

    async fn process(
        &self,
        route: &Route,
        stage: &mut RouteStage,
    ) -> Result<RouteReport, PipelineError> {
        let waypoints = self.store.fetch_waypoints(route).await?;
        advance(route, stage, RouteStage::WaypointsFetched);

        let coordinates = extract_coordinates(&waypoints)?;
        advance(route, stage, RouteStage::CoordinatesExtracted);

        let geometry = self
            .router
            .compute_route(&coordinates, self.params.profile)
            .await?;
        advance(route, stage, RouteStage::GeometryComputed);

        let report = self.persist(route, waypoints.len(), geometry)?;
        advance(route, stage, RouteStage::Persisted);

        Ok(report)
    }

    fn persist(
        &self,
        route: &Route,
        waypoint_count: usize,
        geometry: PathGeometry,
    ) -> Result<RouteReport, PipelineError> {
        let geometry_file = self
            .sink
            .write_geometry(&geometry_file_name(route), &geometry.to_geojson())?;

        Ok(RouteReport {
            route_id: route.id,
            route_name: route.name.clone(),
            waypoint_count,
            point_count: geometry.point_count(),
            summary: geometry.summary,
            ascent: geometry.ascent(),
            geometry_file,
            statement: UpdateStatement::new(route.id, geometry.line_string()),
            statement_file: None,
        })
    }
}

/// One coordinate per waypoint, in waypoint order. The first bad point fails the route.
pub fn extract_coordinates(waypoints: &[Waypoint]) -> Result<Vec<Coordinate>, PipelineError> {
    waypoints
        .iter()
        .map(|waypoint| {
            extract(&waypoint.location).map_err(|source| PipelineError::Waypoint {
                order: waypoint.order,
                name: waypoint.name.clone(),
                source,
            })
        })
        .collect()
}

fn advance(route: &Route, stage: &mut RouteStage, next: RouteStage) {
    debug!("{}: {} -> {}", route.id, stage, next);
    *stage = next;
}

fn batch_result(route: &Route, outcome: BatchOutcome) -> BatchResult {
    BatchResult {
        route_id: route.id,
        route_name: route.name.clone(),
        outcome,
    }
}
