use sanpo_core::PathGeometry;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{profile::OrsProfile, response::parse_directions_response};

pub type OrsPoint = [f64; 2];

pub const ORS_DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";
pub const ORS_DIRECTIONS_API_PATH: &str = "/v2/directions";

#[derive(Debug, Error)]
pub enum OrsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("routing service error: {status} - {body}")]
    Service { status: u16, body: String },

    #[error("unexpected routing service response: {0}")]
    Parse(String),

    #[error("routing service returned no route")]
    EmptyRoute,

    #[error("a route needs at least 2 coordinates, got {0}")]
    TooFewCoordinates(usize),
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequestBody {
    /// `[lon, lat]` in traversal order
    pub coordinates: Vec<OrsPoint>,

    pub profile: String,

    pub format: String,

    /// Turn-by-turn instructions are never consumed
    pub instructions: bool,

    pub elevation: bool,
}

impl DirectionsRequestBody {
    pub fn new(coordinates: Vec<OrsPoint>, profile: OrsProfile) -> Self {
        Self {
            coordinates,
            profile: profile.to_string(),
            format: "geojson".to_string(),
            instructions: false,
            elevation: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrsClientParams {
    pub base_url: String,
    pub api_key: String,
}

pub struct OrsClient {
    params: OrsClientParams,
    client: reqwest::Client,
}

impl OrsClient {
    pub fn new(params: OrsClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn directions_url(&self, profile: OrsProfile) -> String {
        format!(
            "{}{}/{}/geojson",
            self.params.base_url.trim_end_matches('/'),
            ORS_DIRECTIONS_API_PATH,
            profile
        )
    }

    /// One POST to the directions endpoint. No retries.
    #[tracing::instrument(skip_all, fields(points = coordinates.len(), %profile))]
    pub async fn compute_route<P>(
        &self,
        coordinates: &[P],
        profile: OrsProfile,
    ) -> Result<PathGeometry, OrsError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        if coordinates.len() < 2 {
            return Err(OrsError::TooFewCoordinates(coordinates.len()));
        }

        let ors_points: Vec<OrsPoint> = coordinates
            .iter()
            .map(|p| {
                let point: geo_types::Point = p.into();
                [point.x(), point.y()]
            })
            .collect();

        let body = DirectionsRequestBody::new(ors_points, profile);

        let response = self
            .client
            .post(self.directions_url(profile))
            .header(reqwest::header::AUTHORIZATION, &self.params.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!("OrsClient: directions responded with {}", status);

        parse_directions_response(status, &text)
    }
}
