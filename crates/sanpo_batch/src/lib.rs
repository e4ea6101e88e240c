pub mod error;
pub mod orchestrator;
pub mod report;
pub mod sink;
pub mod source;

pub use error::PipelineError;
pub use orchestrator::{
    DEFAULT_REQUEST_DELAY, Orchestrator, OrchestratorParams, extract_coordinates,
};
pub use report::{BatchOutcome, BatchReport, BatchResult, RouteReport, RouteStage};
pub use sink::{ArtifactError, ArtifactSink, COMBINED_STATEMENTS_FILE, DirectorySink};
pub use source::{PathRouter, WaypointSource};
