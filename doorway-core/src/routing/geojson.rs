//! GeoJSON export of solved routes for visualization

use geo::{Distance, Euclidean, LineString, Point, line_string};
use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::json;

use crate::model::{Query, RoadGraph};
use crate::routing::door_to_door::RouteSummary;
use crate::{Error, WALKING_SPEED_KPH};

/// Converts a solved route into a `GeoJSON` `FeatureCollection`: the
/// access walk, the driven path and the egress walk as separate features
pub fn route_to_geojson(
    graph: &RoadGraph,
    query: &Query,
    summary: &RouteSummary,
) -> Result<FeatureCollection, Error> {
    let mut features = Vec::with_capacity(3);

    let path_points: Vec<Point<f64>> = summary
        .path
        .iter()
        .filter_map(|&id| graph.node_index(id))
        .filter_map(|index| graph.coordinate(index))
        .collect();

    if let (Some(&first), Some(&last)) = (path_points.first(), path_points.last()) {
        let access_km = Euclidean.distance(query.source, first);
        let egress_km = Euclidean.distance(last, query.dest);
        let vehicle_minutes =
            (summary.time_minutes - (access_km + egress_km) / WALKING_SPEED_KPH * 60.0).max(0.0);

        features.push(walk_leg_feature(query.source, first, access_km, "access_walk")?);
        features.push(vehicle_feature(&path_points, summary, vehicle_minutes)?);
        features.push(walk_leg_feature(last, query.dest, egress_km, "egress_walk")?);
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn route_to_geojson_string(
    graph: &RoadGraph,
    query: &Query,
    summary: &RouteSummary,
) -> Result<String, Error> {
    serde_json::to_string(&route_to_geojson(graph, query, summary)?)
        .map_err(|e| Error::GeoJson(e.to_string()))
}

/// Straight walking leg between a query point and a network node
fn walk_leg_feature(
    from: Point<f64>,
    to: Point<f64>,
    distance_km: f64,
    leg_type: &str,
) -> Result<Feature, Error> {
    let coordinates = line_string![
        (x: from.x(), y: from.y()),
        (x: to.x(), y: to.y()),
    ];

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new((&coordinates).into()),
        "properties": {
            "leg_type": leg_type,
            "distance_km": distance_km,
            "duration_minutes": distance_km / WALKING_SPEED_KPH * 60.0,
        }
    });

    serde_json::from_value(value).map_err(|e| Error::GeoJson(e.to_string()))
}

fn vehicle_feature(
    path_points: &[Point<f64>],
    summary: &RouteSummary,
    duration_minutes: f64,
) -> Result<Feature, Error> {
    // A single-node route has no driven extent; represent it by the node
    let geometry = if path_points.len() == 1 {
        Geometry::new((&path_points[0]).into())
    } else {
        let linestring: LineString = path_points
            .iter()
            .map(|point| (point.x(), point.y()))
            .collect::<Vec<_>>()
            .into();
        Geometry::new((&linestring).into())
    };

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "leg_type": "vehicle",
            "distance_km": summary.vehicle_km,
            "duration_minutes": duration_minutes,
            "nodes": summary.path,
        }
    });

    serde_json::from_value(value).map_err(|e| Error::GeoJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use geo::Point;
    use geojson::GeometryValue;

    use super::*;
    use crate::model::{EdgeRecord, RoadNode};
    use crate::routing::door_to_door::solve_query;

    fn sample_graph() -> RoadGraph {
        let nodes = vec![
            RoadNode {
                id: 1,
                geometry: Point::new(0.0, 0.0),
            },
            RoadNode {
                id: 2,
                geometry: Point::new(4.0, 0.0),
            },
        ];
        let edges = vec![EdgeRecord {
            from: 1,
            to: 2,
            length_km: 4.0,
            speed_kph: 40.0,
        }];
        RoadGraph::load(nodes, edges).unwrap()
    }

    #[test]
    fn exports_three_legs() {
        let graph = sample_graph();
        let query = Query::new(Point::new(-0.2, 0.0), Point::new(4.1, 0.0), 300.0);
        let summary = solve_query(&graph, &query).unwrap();

        let collection = route_to_geojson(&graph, &query, &summary).unwrap();
        assert_eq!(collection.features.len(), 3);

        let leg_types: Vec<_> = collection
            .features
            .iter()
            .map(|feature| feature.property("leg_type").unwrap().clone())
            .collect();
        assert_eq!(
            leg_types,
            vec![json!("access_walk"), json!("vehicle"), json!("egress_walk")]
        );

        let vehicle = &collection.features[1];
        match &vehicle.geometry.as_ref().unwrap().value {
            GeometryValue::LineString { coordinates } => assert_eq!(coordinates.len(), 2),
            other => panic!("expected a LineString, got {other:?}"),
        }
        assert_eq!(vehicle.property("nodes").unwrap(), &json!([1, 2]));
    }

    #[test]
    fn single_node_route_exports_a_point() {
        let graph = sample_graph();
        let query = Query::new(Point::new(0.0, 0.5), Point::new(0.0, 0.5), 600.0);
        let summary = solve_query(&graph, &query).unwrap();
        assert_eq!(summary.path, vec![1]);

        let collection = route_to_geojson(&graph, &query, &summary).unwrap();
        let vehicle = &collection.features[1];
        assert!(matches!(
            vehicle.geometry.as_ref().unwrap().value,
            GeometryValue::Point { .. }
        ));
    }

    #[test]
    fn serializes_to_a_json_string() {
        let graph = sample_graph();
        let query = Query::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0), 100.0);
        let summary = solve_query(&graph, &query).unwrap();

        let text = route_to_geojson_string(&graph, &query, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 3);
    }
}
