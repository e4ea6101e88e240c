use comfy_table::{Table, presets::UTF8_FULL};
use sanpo_core::Route;
use sanpo_store::StoreClient;
use tracing::info;
use uuid::Uuid;

use crate::config::AppConfig;

pub async fn list(config: &AppConfig) -> Result<(), anyhow::Error> {
    let store = StoreClient::new(config.store_params());
    let mut routes = store.fetch_all_routes().await?;
    sort_by_distance(&mut routes);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Name", "Id", "Distance", "Geometry"]);

    for route in &routes {
        table.add_row(vec![
            route.name.clone(),
            route.id.to_string(),
            route
                .distance_meters
                .map(|meters| format!("{:.2} km", meters / 1000.0))
                .unwrap_or_else(|| "-".to_string()),
            geometry_status(route).to_string(),
        ]);
    }

    println!("{table}");

    let present = routes.iter().filter(|route| route.has_geometry()).count();
    info!(
        "{} routes, {} with geometry, {} missing",
        routes.len(),
        present,
        routes.len() - present
    );

    Ok(())
}

pub async fn check(config: &AppConfig, route_id: Uuid) -> Result<(), anyhow::Error> {
    let store = StoreClient::new(config.store_params());
    let route = store.fetch_route(route_id).await?;

    info!("Route: {} ({})", route.name, route.id);
    if let Some(meters) = route.distance_meters {
        info!("Recorded distance: {:.2} km", meters / 1000.0);
    }

    match &route.geometry {
        Some(geometry) => info!("Geometry: {}", geometry.describe()),
        None => info!("Geometry: missing"),
    }

    Ok(())
}

/// Longest first, routes without a recorded distance last.
fn sort_by_distance(routes: &mut [Route]) {
    routes.sort_by(|a, b| match (a.distance_meters, b.distance_meters) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

fn geometry_status(route: &Route) -> &'static str {
    if route.has_geometry() {
        "present"
    } else {
        "missing"
    }
}

#[cfg(test)]
mod tests {
    use sanpo_core::StoredGeometry;

    use super::*;

    fn route(name: &str, distance_meters: Option<f64>) -> Route {
        Route {
            id: Uuid::new_v4(),
            name: name.to_string(),
            distance_meters,
            geometry: None,
        }
    }

    #[test]
    fn test_sort_by_distance() {
        let mut routes = vec![
            route("short", Some(800.0)),
            route("unknown", None),
            route("long", Some(5200.0)),
            route("medium", Some(2100.0)),
        ];

        sort_by_distance(&mut routes);

        let names: Vec<&str> = routes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["long", "medium", "short", "unknown"]);
    }

    #[test]
    fn test_geometry_status() {
        let mut computed = route("computed", None);
        computed.geometry = Some(StoredGeometry::Text("LINESTRING(1 2, 3 4)".to_string()));

        assert_eq!(geometry_status(&computed), "present");
        assert_eq!(geometry_status(&route("pending", None)), "missing");
    }
}
