use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::Value as JsonValue;

use crate::{Error, model::RouteNode, routing::SafeRoute};

impl SafeRoute {
    /// Converts the route to a `GeoJSON` `FeatureCollection`: the route line
    /// first, then one point per visited node.
    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features = Vec::with_capacity(self.nodes.len() + 1);
        features.push(self.line_feature());
        features.extend(self.nodes.iter().map(node_feature));

        FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        }
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()).map_err(|e| Error::GeoJson(e.to_string()))
    }

    fn line_feature(&self) -> Feature {
        let coords: Vec<Coord<f64>> = self.nodes.iter().map(|n| n.coordinate.into()).collect();
        let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));

        let mut feature = Feature::from(geometry);
        feature.set_property("feature_type", "route");
        feature.set_property("path", JsonValue::from(self.id_strings()));
        feature.set_property("total_weight", self.total_weight);
        feature.set_property("distance_km", self.distance_km);
        feature
    }
}

fn node_feature(node: &RouteNode) -> Feature {
    let geometry = Geometry::new(GeoJsonValue::from(&node.coordinate.geometry()));

    let mut feature = Feature::from(geometry);
    feature.set_property("feature_type", "node");
    feature.set_property("id", node.id.to_string());

    let name = node.name.clone();
    feature.set_property("name", name.map_or(JsonValue::Null, JsonValue::from));
    let level = node.safety_level.map(|level| level.as_str());
    let level = level.map_or(JsonValue::Null, JsonValue::from);
    feature.set_property("safety_level", level);
    feature
}
