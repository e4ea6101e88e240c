use sanpo_core::MalformedPointError;
use sanpo_ors::OrsError;
use sanpo_store::StoreError;
use thiserror::Error;

use crate::{report::BatchReport, sink::ArtifactError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("waypoint {order} ({name}): {source}")]
    Waypoint {
        order: i32,
        name: String,
        #[source]
        source: MalformedPointError,
    },

    #[error(transparent)]
    Routing(#[from] OrsError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// Every route was processed but the combined statements could not be written.
    #[error("could not write the combined statements: {source}")]
    CombinedStatements {
        report: Box<BatchReport>,
        #[source]
        source: ArtifactError,
    },
}
