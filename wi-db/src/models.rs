//! Query result model structs.
//!
//! All structs derive `Serialize` so the command layer can hand them to
//! map, table and plot front ends as JSON or CSV.

use serde::Serialize;

/// One row of the well list view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WellRow {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub river: String,
    pub date_built: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `None` while no hydrograph has been uploaded for the well.
    pub hydrograph_id: Option<i64>,
}

/// GeoJSON `FeatureCollection` of all wells, in EPSG:4326.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WellFeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub crs: NamedCrs,
    pub features: Vec<WellFeature>,
}

/// A named coordinate reference system member.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NamedCrs {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: CrsProperties,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CrsProperties {
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WellFeature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: PointGeometry,
    pub properties: WellProperties,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WellProperties {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub river: String,
    pub date_built: String,
    pub hydrograph_id: Option<i64>,
}

impl WellFeatureCollection {
    pub fn new(features: Vec<WellFeature>) -> Self {
        Self {
            kind: "FeatureCollection",
            crs: NamedCrs {
                kind: "name",
                properties: CrsProperties { name: "EPSG:4326" },
            },
            features,
        }
    }
}

impl From<WellRow> for WellFeature {
    fn from(row: WellRow) -> Self {
        WellFeature {
            kind: "Feature",
            geometry: PointGeometry {
                kind: "Point",
                coordinates: [row.longitude, row.latitude],
            },
            properties: WellProperties {
                id: row.id,
                name: row.name,
                owner: row.owner,
                river: row.river,
                date_built: row.date_built,
                hydrograph_id: row.hydrograph_id,
            },
        }
    }
}

/// Plot-ready hydrograph of one well.
///
/// `time` (hours) and `flow` are parallel vectors ordered by time.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HydrographPlot {
    pub hydrograph_id: i64,
    pub well_id: i64,
    pub title: String,
    pub series_name: String,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub time: Vec<i64>,
    pub flow: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> WellRow {
        WellRow {
            id: 7,
            name: "Deer Creek".to_string(),
            owner: "Reclamation".to_string(),
            river: "Provo River".to_string(),
            date_built: "1941".to_string(),
            latitude: 40.5,
            longitude: -111.5,
            hydrograph_id: None,
        }
    }

    #[test]
    fn feature_collection_serializes_as_geojson() {
        let collection = WellFeatureCollection::new(vec![row().into()]);
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "FeatureCollection",
                "crs": {"type": "name", "properties": {"name": "EPSG:4326"}},
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-111.5, 40.5]},
                    "properties": {
                        "id": 7,
                        "name": "Deer Creek",
                        "owner": "Reclamation",
                        "river": "Provo River",
                        "date_built": "1941",
                        "hydrograph_id": null
                    }
                }]
            })
        );
    }

    #[test]
    fn empty_feature_collection_has_no_features() {
        let value = serde_json::to_value(WellFeatureCollection::new(Vec::new())).unwrap();
        assert_eq!(value["features"], json!([]));
        assert_eq!(value["type"], "FeatureCollection");
    }
}
