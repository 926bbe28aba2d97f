use townroute_core::config::LoaderConfig;
use townroute_core::graph::*;
use townroute_nav::manager::RouteManager;
use townroute_nav::paths::{shortest_path, shortest_path_tree};

const ROADS: &str = "\
Aspen;Birch;12;Route 9
Birch;Cedar;7;Mill Road
Aspen;Cedar;25;Old Highway
Cedar;Dogwood;4;Creek Lane
Dogwood;Aspen;30;Ridge Pass
Elm;Fir;2;Spur
not;enough
Birch;Dogwood;nine;Broken
";

fn loc(name: &str) -> Location {
    Location::new(name)
}

fn make_manager() -> RouteManager {
    let mut m = RouteManager::new();
    m.populate_from_str(ROADS, &LoaderConfig::default()).unwrap();
    m
}

#[test]
fn test_populate_from_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("towns.txt");
    std::fs::write(&path, ROADS).unwrap();

    let mut m = RouteManager::new();
    let report = m.populate_from_file(&path, &LoaderConfig::default()).unwrap();
    assert_eq!(report.records.len(), 6);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(
        m.all_towns(),
        vec!["Aspen", "Birch", "Cedar", "Dogwood", "Elm", "Fir"]
    );
}

#[test]
fn test_populate_from_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let mut m = RouteManager::new();
    let result = m.populate_from_file(&tmp.path().join("nope.txt"), &LoaderConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_path_through_loaded_network() {
    let m = make_manager();
    assert_eq!(
        m.get_path("Aspen", "Dogwood"),
        vec![
            "Aspen via Route 9 to Birch 12 mi",
            "Birch via Mill Road to Cedar 7 mi",
            "Cedar via Creek Lane to Dogwood 4 mi",
        ]
    );
    assert_eq!(m.route("Aspen", "Dogwood").total_distance, 23);
}

#[test]
fn test_disconnected_component() {
    let m = make_manager();
    assert!(m.get_path("Aspen", "Elm").is_empty());
    assert_eq!(m.get_path("Elm", "Fir"), vec!["Elm via Spur to Fir 2 mi"]);
}

#[test]
fn test_path_is_optimal_against_every_tree_distance() {
    let m = make_manager();
    let graph = m.graph();
    for source in graph.vertex_set() {
        let tree = shortest_path_tree(graph, source);
        for target in graph.vertex_set() {
            let route = shortest_path(graph, source, target);
            match tree.distance(target) {
                Some(d) if source != target => assert_eq!(route.total_distance, d),
                _ => assert!(route.is_empty()),
            }
        }
    }
}

#[test]
fn test_route_steps_chain() {
    let m = make_manager();
    let route = m.route("Dogwood", "Cedar");
    assert!(!route.is_empty());
    assert_eq!(route.steps.first().unwrap().from, "Dogwood");
    assert_eq!(route.steps.last().unwrap().to, "Cedar");
    for pair in route.steps.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
}

#[test]
fn test_delete_town_reroutes() {
    let mut m = make_manager();
    assert!(m.delete_town("Birch"));
    assert_eq!(
        m.get_path("Aspen", "Cedar"),
        vec!["Aspen via Old Highway to Cedar 25 mi"]
    );
    for edge in m.graph().edge_set() {
        assert!(!edge.touches(&loc("Birch")));
    }
}

#[test]
fn test_route_serializes_to_json() {
    let m = make_manager();
    let json = serde_json::to_value(m.route("Elm", "Fir")).unwrap();
    assert_eq!(json["total_distance"], 2);
    assert_eq!(json["steps"][0]["road"], "Spur");
    assert_eq!(json["steps"][0]["miles"], 2);
}
