use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use sanpo_core::Route;
use thiserror::Error;

pub const COMBINED_STATEMENTS_FILE: &str = "update_all_routes.sql";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination of the geometry and statement files.
pub trait ArtifactSink {
    /// Returns the location the geometry was written to.
    fn write_geometry(
        &self,
        name: &str,
        geometry: &geojson::Geometry,
    ) -> Result<PathBuf, ArtifactError>;

    fn write_statements(&self, name: &str, sql: &str) -> Result<PathBuf, ArtifactError>;
}

/// Lower-cased route name with every non ASCII alphanumeric replaced by `_`,
/// suffixed with the start of the route id so non-latin names stay distinct.
pub fn artifact_slug(route: &Route) -> String {
    let name: String = route
        .name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    let id = route.id.simple().to_string();
    format!("{}_{}", name, &id[..8])
}

pub fn geometry_file_name(route: &Route) -> String {
    format!("route_geometry_{}.json", artifact_slug(route))
}

pub fn statement_file_name(route: &Route) -> String {
    format!("update_{}.sql", artifact_slug(route))
}

/// Writes artifacts as files into one directory.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn create(&self, name: &str) -> Result<(PathBuf, BufWriter<File>), ArtifactError> {
        let path = self.dir.join(name);
        let io_error = |source: std::io::Error| ArtifactError::Io {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_error)?;
        let file = File::create(&path).map_err(io_error)?;

        Ok((path, BufWriter::with_capacity(64 * 1024, file)))
    }
}

impl ArtifactSink for DirectorySink {
    fn write_geometry(
        &self,
        name: &str,
        geometry: &geojson::Geometry,
    ) -> Result<PathBuf, ArtifactError> {
        let (path, mut writer) = self.create(name)?;
        serde_json::to_writer_pretty(&mut writer, geometry)?;
        writer.flush().map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    fn write_statements(&self, name: &str, sql: &str) -> Result<PathBuf, ArtifactError> {
        let (path, mut writer) = self.create(name)?;
        writer
            .write_all(sql.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|source| ArtifactError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}
