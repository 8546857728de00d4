use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::database::event_repo;
use crate::error::AppError;
use crate::services::event_service::{event_view, EventView};

#[derive(Debug, Deserialize, Default)]
pub struct NearbyQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct NearbyEventView {
    #[serde(flatten)]
    pub event: EventView,
    pub distance_km: Option<f64>,
}

/// Rank events by distance from the reference point. Events without
/// coordinates (or when no reference point is given) keep a null distance
/// and sort last. Read-only; never touches stored events.
pub async fn nearby_events(
    pool: &SqlitePool,
    query: &NearbyQuery,
) -> Result<Vec<NearbyEventView>, AppError> {
    let reference = query.lat.zip(query.lng);
    let rows = event_repo::list_events(pool).await?;

    let mut out: Vec<NearbyEventView> = rows
        .into_iter()
        .map(|row| {
            let distance_km = reference.and_then(|(lat, lng)| {
                row.latitude
                    .zip(row.longitude)
                    .map(|(elat, elng)| haversine_km(lat, lng, elat, elng))
            });
            NearbyEventView {
                event: event_view(row),
                distance_km,
            }
        })
        .collect();

    out.sort_by(|a, b| {
        a.distance_km
            .unwrap_or(f64::MAX)
            .partial_cmp(&b.distance_km.unwrap_or(f64::MAX))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(out)
}

fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let to_rad = |deg: f64| deg.to_radians();
    let dlat = to_rad(lat2 - lat1);
    let dlon = to_rad(lon2 - lon1);
    let a = (dlat / 2.0).sin().powi(2)
        + to_rad(lat1).cos() * to_rad(lat2).cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    6371.0 * c
}
