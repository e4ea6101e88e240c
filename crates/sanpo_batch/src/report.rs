use std::{fmt::Display, path::PathBuf};

use sanpo_core::{PathSummary, UpdateStatement};
use uuid::Uuid;

/// How far a route got through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStage {
    Pending,
    WaypointsFetched,
    CoordinatesExtracted,
    GeometryComputed,
    Persisted,
}

impl Display for RouteStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RouteStage::Pending => "pending",
                RouteStage::WaypointsFetched => "waypoints fetched",
                RouteStage::CoordinatesExtracted => "coordinates extracted",
                RouteStage::GeometryComputed => "geometry computed",
                RouteStage::Persisted => "persisted",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteReport {
    pub route_id: Uuid,
    pub route_name: String,
    pub waypoint_count: usize,

    /// Vertices of the computed path
    pub point_count: usize,

    pub summary: PathSummary,

    /// Meters climbed, when the service returned elevation
    pub ascent: Option<f64>,

    pub geometry_file: PathBuf,
    pub statement: UpdateStatement,

    /// Only written for single route runs
    pub statement_file: Option<PathBuf>,
}

impl RouteReport {
    pub fn distance_label(&self) -> String {
        format!("{:.2} km", self.summary.distance_km())
    }

    pub fn duration_label(&self) -> String {
        format!("{} min", self.summary.duration_minutes())
    }

    pub fn ascent_label(&self) -> String {
        match self.ascent {
            Some(ascent) => format!("{:.0} m", ascent),
            None => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Succeeded(Box<RouteReport>),
    Failed {
        /// Last stage reached before the failure
        stage: RouteStage,
        reason: String,
    },
    /// Geometry already stored and the run only fills missing ones
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub route_id: Uuid,
    pub route_name: String,
    pub outcome: BatchOutcome,
}

impl BatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Succeeded(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Failed { .. })
    }

    pub fn report(&self) -> Option<&RouteReport> {
        match &self.outcome {
            BatchOutcome::Succeeded(report) => Some(report.as_ref()),
            _ => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            BatchOutcome::Failed { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    /// In processing order
    pub results: Vec<BatchResult>,

    /// Combined statements, absent when no route succeeded
    pub statements_file: Option<PathBuf>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    pub fn skipped(&self) -> usize {
        self.total() - self.succeeded() - self.failed()
    }

    pub fn statements(&self) -> impl Iterator<Item = &UpdateStatement> {
        self.results
            .iter()
            .filter_map(|r| r.report().map(|report| &report.statement))
    }
}
