use crate::geometry::utils_2d::points_equal;
use crate::shape::cycles::{build_adjacency, find_cycle, FillTracker};
use crate::shape::store::GraphStore;
use crate::shape::types::FillPolygon;
use crate::topo::{IdGenerator, VertexId};
use std::collections::HashSet;

fn store() -> GraphStore {
    GraphStore::with_generator(IdGenerator::new("cycle-tests"))
}

fn square(s: &mut GraphStore) -> Vec<VertexId> {
    let v = vec![
        s.create_vertex([0.0, 0.0]),
        s.create_vertex([100.0, 0.0]),
        s.create_vertex([100.0, 100.0]),
        s.create_vertex([0.0, 100.0]),
    ];
    for i in 0..4 {
        s.create_edge(v[i], v[(i + 1) % 4]).unwrap();
    }
    v
}

#[test]
fn test_square_is_one_loop() {
    let mut s = store();
    let v = square(&mut s);

    let cycle = find_cycle(&s).expect("square should contain a loop");
    assert_eq!(cycle, v);
}

#[test]
fn test_open_chain_has_no_loop() {
    let mut s = store();
    let a = s.create_vertex([0.0, 0.0]);
    let b = s.create_vertex([10.0, 0.0]);
    let c = s.create_vertex([20.0, 0.0]);
    let d = s.create_vertex([20.0, 10.0]);
    s.create_edge(a, b).unwrap();
    s.create_edge(b, c).unwrap();
    s.create_edge(c, d).unwrap();
    assert!(find_cycle(&s).is_none());
}

#[test]
fn test_parallel_edges_do_not_form_a_loop() {
    let mut s = store();
    let a = s.create_vertex([0.0, 0.0]);
    let b = s.create_vertex([10.0, 0.0]);
    let c = s.create_vertex([20.0, 0.0]);
    s.create_edge(a, b).unwrap();
    s.create_edge(a, b).unwrap();
    s.create_edge(b, c).unwrap();
    assert!(find_cycle(&s).is_none());
}

#[test]
fn test_loop_behind_a_tail() {
    // tail t -> a, triangle a b c
    let mut s = store();
    let t = s.create_vertex([-50.0, 0.0]);
    let a = s.create_vertex([0.0, 0.0]);
    let b = s.create_vertex([50.0, 0.0]);
    let c = s.create_vertex([25.0, 40.0]);
    s.create_edge(t, a).unwrap();
    s.create_edge(a, b).unwrap();
    s.create_edge(b, c).unwrap();
    s.create_edge(c, a).unwrap();

    // Tail vertex is on the path but not part of the reported slice
    assert_eq!(find_cycle(&s).unwrap(), vec![a, b, c]);
}

#[test]
fn test_first_loop_wins_in_disconnected_graph() {
    let mut s = store();
    // Open chain created first
    let x = s.create_vertex([500.0, 500.0]);
    let y = s.create_vertex([600.0, 500.0]);
    s.create_edge(x, y).unwrap();
    let first = square(&mut s);

    let t1 = s.create_vertex([300.0, 0.0]);
    let t2 = s.create_vertex([400.0, 0.0]);
    let t3 = s.create_vertex([350.0, 80.0]);
    s.create_edge(t1, t2).unwrap();
    s.create_edge(t2, t3).unwrap();
    s.create_edge(t3, t1).unwrap();

    assert_eq!(find_cycle(&s).unwrap(), first);
}

#[test]
fn test_search_order_follows_edge_insertion() {
    // a connects to b first, then to d; the walk goes a -> b -> c -> d -> a
    let mut s = store();
    let a = s.create_vertex([0.0, 0.0]);
    let b = s.create_vertex([10.0, 0.0]);
    let c = s.create_vertex([10.0, 10.0]);
    let d = s.create_vertex([0.0, 10.0]);
    s.create_edge(a, b).unwrap();
    s.create_edge(d, a).unwrap();
    s.create_edge(c, d).unwrap();
    s.create_edge(b, c).unwrap();

    assert_eq!(find_cycle(&s).unwrap(), vec![a, b, c, d]);
}

#[test]
fn test_adjacency_is_undirected() {
    let mut s = store();
    let a = s.create_vertex([0.0, 0.0]);
    let b = s.create_vertex([10.0, 0.0]);
    s.create_edge(a, b).unwrap();
    let adj = build_adjacency(&s);
    assert_eq!(adj[&a], vec![b]);
    assert_eq!(adj[&b], vec![a]);
}

#[test]
fn test_fill_points_match_square() {
    let mut s = store();
    square(&mut s);
    let mut tracker = FillTracker::new();
    let fill = tracker.refresh(&s, true).expect("fill").clone();

    assert_eq!(fill.points.len(), 4);
    let expected: HashSet<(i64, i64)> = s
        .vertices()
        .iter()
        .map(|v| (v.position[0] as i64, v.position[1] as i64))
        .collect();
    let got: HashSet<(i64, i64)> = fill.points.iter().map(|p| (p[0] as i64, p[1] as i64)).collect();
    assert_eq!(expected, got);
    assert!((fill.area.abs() - 10_000.0).abs() < 1e-6);
    assert!(points_equal(fill.centroid, [50.0, 50.0]));
}

#[test]
fn test_refresh_is_idempotent() {
    let mut s = store();
    square(&mut s);
    let mut tracker = FillTracker::new();
    let first = tracker.refresh(&s, true).cloned();
    let second = tracker.refresh(&s, true).cloned();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_refresh_repositions_on_move() {
    let mut s = store();
    let v = square(&mut s);
    let mut tracker = FillTracker::new();
    tracker.refresh(&s, true);

    s.move_vertex(v[2], [150.0, 150.0]).unwrap();
    let fill = tracker.refresh(&s, true).unwrap();
    assert_eq!(fill.points[2], [150.0, 150.0]);
    assert_eq!(fill.cycle, v);
}

#[test]
fn test_refresh_rebuilds_on_topology_change() {
    let mut s = store();
    square(&mut s);
    let mut tracker = FillTracker::new();
    assert!(tracker.refresh(&s, true).is_some());

    let last = s.edges().last().unwrap().id;
    s.remove_edge(last).unwrap();
    assert!(tracker.refresh(&s, true).is_none());
}

#[test]
fn test_disabled_or_small_graph_clears_fill() {
    let mut s = store();
    square(&mut s);
    let mut tracker = FillTracker::new();
    assert!(tracker.refresh(&s, true).is_some());
    assert!(tracker.refresh(&s, false).is_none());
    assert!(tracker.fill().is_none());

    let mut small = store();
    let a = small.create_vertex([0.0, 0.0]);
    let b = small.create_vertex([1.0, 0.0]);
    small.create_edge(a, b).unwrap();
    assert!(tracker.refresh(&small, true).is_none());
}

#[test]
fn test_short_cycle_is_not_filled() {
    let s = store();
    let a = VertexId::new_deterministic("a");
    let b = VertexId::new_deterministic("b");
    assert!(FillPolygon::from_cycle(&s, vec![a, b]).is_none());
}
