use sanpo_core::{Route, Waypoint, statement::ROUTES_TABLE};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::rows::{ROUTE_COLUMNS, RouteRow, WAYPOINT_COLUMNS, WaypointRow};

pub const REST_API_PATH: &str = "/rest/v1";
pub const WAYPOINTS_TABLE: &str = "route_spots";

/// A path needs at least a start and an end.
pub const MIN_WAYPOINTS: usize = 2;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("route {0} not found")]
    RouteNotFound(Uuid),

    #[error("route {route_id} has {count} waypoint(s), at least 2 are required")]
    InsufficientWaypoints { route_id: Uuid, count: usize },
}

#[derive(Debug, Clone)]
pub struct StoreClientParams {
    /// e.g. `https://<project>.supabase.co`
    pub base_url: String,
    pub api_key: String,
}

/// Read access to routes and their waypoints through PostgREST.
pub struct StoreClient {
    params: StoreClientParams,
    client: reqwest::Client,
}

impl StoreClient {
    pub fn new(params: StoreClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}{}/{}",
            self.params.base_url.trim_end_matches('/'),
            REST_API_PATH,
            table
        )
    }

    async fn select<T>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.params.api_key)
            .bearer_auth(&self.params.api_key)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await?;
            return Err(StoreError::Api { status, message });
        }

        let body = response.text().await?;
        let rows: Vec<T> = serde_json::from_str(&body)?;

        debug!("StoreClient: {} rows from {}", rows.len(), table);

        Ok(rows)
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_route(&self, route_id: Uuid) -> Result<Route, StoreError> {
        let rows: Vec<RouteRow> = self
            .select(
                ROUTES_TABLE,
                &[
                    ("id", format!("eq.{}", route_id)),
                    ("select", ROUTE_COLUMNS.to_string()),
                ],
            )
            .await?;

        rows.into_iter()
            .next()
            .map(Route::from)
            .ok_or(StoreError::RouteNotFound(route_id))
    }

    /// Waypoints of an existing route, ascending by order.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_waypoints(&self, route_id: Uuid) -> Result<Vec<Waypoint>, StoreError> {
        let route = self.fetch_route(route_id).await?;
        self.fetch_route_waypoints(&route).await
    }

    /// Same as [`StoreClient::fetch_waypoints`] for a route that was already looked up.
    #[tracing::instrument(skip_all, fields(route_id = %route.id))]
    pub async fn fetch_route_waypoints(&self, route: &Route) -> Result<Vec<Waypoint>, StoreError> {
        let rows: Vec<WaypointRow> = self
            .select(
                WAYPOINTS_TABLE,
                &[
                    ("route_id", format!("eq.{}", route.id)),
                    ("select", WAYPOINT_COLUMNS.to_string()),
                    ("order", "spot_order.asc".to_string()),
                ],
            )
            .await?;

        order_waypoints(route.id, rows.into_iter().map(Waypoint::from).collect())
    }

    /// Every route, ordered by name.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_all_routes(&self) -> Result<Vec<Route>, StoreError> {
        let rows: Vec<RouteRow> = self
            .select(
                ROUTES_TABLE,
                &[
                    ("select", ROUTE_COLUMNS.to_string()),
                    ("order", "name.asc".to_string()),
                ],
            )
            .await?;

        Ok(rows.into_iter().map(Route::from).collect())
    }
}

/// Sorts by `order` (stable) and enforces the waypoint minimum.
pub fn order_waypoints(
    route_id: Uuid,
    mut waypoints: Vec<Waypoint>,
) -> Result<Vec<Waypoint>, StoreError> {
    if waypoints.len() < MIN_WAYPOINTS {
        return Err(StoreError::InsufficientWaypoints {
            route_id,
            count: waypoints.len(),
        });
    }

    waypoints.sort_by_key(|waypoint| waypoint.order);

    Ok(waypoints)
}
