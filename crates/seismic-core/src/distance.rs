//! Great-circle distance between two epicenter coordinates.
//!
//! Uses the haversine formula on a spherical Earth. Accuracy within
//! ~0.5% of the ellipsoidal truth, which is far below the spatial
//! thresholds the classifier operates with.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two points given in
/// decimal degrees.
///
/// Pure and total over finite inputs. Out-of-range coordinates are not
/// rejected here; the boundary layer validates them before reports
/// reach the engine.
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let sin_half_lat = (d_lat / 2.0).sin();
    let sin_half_lon = (d_lon / 2.0).sin();

    let a = (lat1.to_radians().cos() * lat2.to_radians().cos())
        .mul_add(sin_half_lon * sin_half_lon, sin_half_lat * sin_half_lat);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
