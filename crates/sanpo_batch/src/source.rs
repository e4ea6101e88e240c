use sanpo_core::{Coordinate, PathGeometry, Route, Waypoint};
use sanpo_ors::{OrsClient, OrsError, OrsProfile};
use sanpo_store::{StoreClient, StoreError};
use uuid::Uuid;

/// Where routes and their waypoints come from.
#[allow(async_fn_in_trait)]
pub trait WaypointSource {
    async fn fetch_route(&self, route_id: Uuid) -> Result<Route, StoreError>;

    /// Ascending by order, at least two.
    async fn fetch_waypoints(&self, route: &Route) -> Result<Vec<Waypoint>, StoreError>;

    /// Ordered by name.
    async fn fetch_all_routes(&self) -> Result<Vec<Route>, StoreError>;
}

/// Computes a path through coordinates given in traversal order.
#[allow(async_fn_in_trait)]
pub trait PathRouter {
    async fn compute_route(
        &self,
        coordinates: &[Coordinate],
        profile: OrsProfile,
    ) -> Result<PathGeometry, OrsError>;
}

impl WaypointSource for StoreClient {
    async fn fetch_route(&self, route_id: Uuid) -> Result<Route, StoreError> {
        StoreClient::fetch_route(self, route_id).await
    }

    async fn fetch_waypoints(&self, route: &Route) -> Result<Vec<Waypoint>, StoreError> {
        self.fetch_route_waypoints(route).await
    }

    async fn fetch_all_routes(&self) -> Result<Vec<Route>, StoreError> {
        StoreClient::fetch_all_routes(self).await
    }
}

impl PathRouter for OrsClient {
    async fn compute_route(
        &self,
        coordinates: &[Coordinate],
        profile: OrsProfile,
    ) -> Result<PathGeometry, OrsError> {
        OrsClient::compute_route(self, coordinates, profile).await
    }
}
