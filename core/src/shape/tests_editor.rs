use crate::error::ShapeError;
use crate::geometry::ApproxEq;
use crate::shape::editor::ShapeEditor;
use crate::shape::snapshot::DrawItem;
use crate::shape::types::ShapeConfig;
use crate::topo::{EdgeId, IdGenerator, Selection, VertexId};

fn editor() -> ShapeEditor {
    ShapeEditor::with_generator(ShapeConfig::default(), IdGenerator::new("editor-tests"))
}

fn assert_no_dangling(ed: &ShapeEditor) {
    let store = ed.store();
    for e in store.edges() {
        assert!(store.contains_vertex(e.v1), "edge {} has dangling v1", e.id);
        assert!(store.contains_vertex(e.v2), "edge {} has dangling v2", e.id);
        assert_ne!(e.v1, e.v2, "edge {} is a self-loop", e.id);
    }
    assert!(store.is_consistent());
    if let Some(fill) = ed.fill() {
        assert!(fill.cycle.len() >= 3);
        assert!(fill.cycle.iter().all(|v| store.contains_vertex(*v)));
    }
}

#[test]
fn test_square_fill_appears_and_disappears() {
    let mut ed = editor();
    let rect = ed.add_rectangle().unwrap();
    let fill = ed.fill().expect("rectangle should be filled");
    assert_eq!(fill.points.len(), 4);
    assert_eq!(fill.cycle, rect.vertices);

    ed.remove_edge(rect.edges[2]).unwrap();
    assert!(ed.fill().is_none());
    assert_no_dangling(&ed);
}

#[test]
fn test_fill_follows_vertex_moves() {
    let mut ed = editor();
    let rect = ed.add_rectangle().unwrap();
    ed.move_vertex(rect.vertices[0], [120.0, 130.0]).unwrap();
    let fill = ed.fill().unwrap();
    assert_eq!(fill.points[0], [120.0, 130.0]);
}

#[test]
fn test_auto_fill_toggle() {
    let mut ed = editor();
    ed.add_rectangle().unwrap();
    assert!(ed.fill().is_some());

    ed.set_auto_fill(false);
    assert!(ed.fill().is_none());
    assert!(ed.refresh_fill().is_none());

    ed.set_auto_fill(true);
    assert!(ed.fill().is_some());
}

#[test]
fn test_refresh_twice_is_stable() {
    let mut ed = editor();
    ed.add_pentagon().unwrap();
    let first = ed.refresh_fill().cloned();
    let second = ed.refresh_fill().cloned();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_parametric_edits_through_editor() {
    let mut ed = editor();
    let a = ed.create_vertex([0.0, 0.0]);
    let b = ed.create_vertex([10.0, 0.0]);
    let e = ed.create_edge(a, b).unwrap();

    ed.set_edge_length(e, 20.0).unwrap();
    assert!(ed.store().position(b).unwrap().approx_eq(&[20.0, 0.0]));
    assert_eq!(ed.store().position(a).unwrap(), [0.0, 0.0]);

    let mut ed2 = editor();
    let a = ed2.create_vertex([0.0, 0.0]);
    let b = ed2.create_vertex([10.0, 0.0]);
    let e = ed2.create_edge(a, b).unwrap();
    ed2.set_edge_angle(e, 90.0).unwrap();
    assert!(ed2.store().position(b).unwrap().approx_eq(&[0.0, 10.0]));
    assert!(ed2.store().edge(e).unwrap().end.approx_eq(&[0.0, 10.0]));
}

#[test]
fn test_parametric_edit_updates_fill() {
    let mut ed = editor();
    let rect = ed.add_rectangle().unwrap();
    // Edge 0 runs (150,150) -> (350,150); stretch it
    ed.set_edge_length(rect.edges[0], 300.0).unwrap();
    let fill = ed.fill().unwrap();
    assert!(fill.points[1].approx_eq(&[450.0, 150.0]));
}

#[test]
fn test_selected_edge_params() {
    let mut ed = editor();
    let a = ed.create_vertex([0.0, 0.0]);
    let b = ed.create_vertex([0.0, -30.0]);
    let e = ed.create_edge(a, b).unwrap();

    assert!(ed.selected_edge_params().is_none());
    ed.select(Selection::Edge(e)).unwrap();
    let params = ed.selected_edge_params().unwrap();
    assert!(params.length.approx_eq(&30.0));
    assert!(params.angle.approx_eq(&-90.0));

    // Derived, so a move is reflected immediately
    ed.move_vertex(b, [30.0, 0.0]).unwrap();
    assert!(ed.selected_edge_params().unwrap().angle.approx_eq(&0.0));

    ed.select(Selection::Vertex(a)).unwrap();
    assert!(ed.selected_edge_params().is_none());
}

#[test]
fn test_select_validates_reference() {
    let mut ed = editor();
    let ghost_v = VertexId::new_deterministic("ghost");
    let ghost_e = EdgeId::new_deterministic("ghost");
    assert_eq!(ed.select(Selection::Vertex(ghost_v)), Err(ShapeError::InvalidVertexReference(ghost_v)));
    assert_eq!(ed.select(Selection::Edge(ghost_e)), Err(ShapeError::InvalidEdgeReference(ghost_e)));
    assert!(ed.selection().is_none());
}

#[test]
fn test_selection_never_dangles() {
    let mut ed = editor();
    let line = ed.add_line().unwrap();

    ed.select(Selection::Edge(line.edges[0])).unwrap();
    ed.remove_vertex(line.vertices[0]).unwrap();
    assert!(ed.selection().is_none());

    ed.select(Selection::Vertex(line.vertices[1])).unwrap();
    ed.remove_vertex(line.vertices[1]).unwrap();
    assert!(ed.selection().is_none());
}

#[test]
fn test_merge_transfers_selection_and_drops_collapsed_edge() {
    let mut ed = editor();
    let line = ed.add_line().unwrap();
    let (a, b) = (line.vertices[0], line.vertices[1]);

    ed.select(Selection::Vertex(a)).unwrap();
    let outcome = ed.merge_vertices(a, b).unwrap();
    assert_eq!(outcome.removed_edges, line.edges);
    assert_eq!(ed.selection(), Selection::Vertex(b));
    assert_eq!(ed.store().edge_count(), 0);
    assert_no_dangling(&ed);
}

#[test]
fn test_grid_size_validation() {
    let mut ed = editor();
    assert_eq!(ed.set_grid_size(0.0), Err(ShapeError::InvalidGridSize(0.0)));
    assert!(ed.set_grid_size(-1.0).is_err());
    assert!(ed.set_grid_size(f64::INFINITY).is_err());
    ed.set_grid_size(25.0).unwrap();
    assert_eq!(ed.config().grid_size, 25.0);
}

#[test]
fn test_snap_distance_validation() {
    let mut ed = editor();
    assert_eq!(ed.set_snap_distance(-1.0), Err(ShapeError::InvalidSnapDistance(-1.0)));
    assert!(ed.set_snap_distance(f64::NAN).is_err());
    assert!(ed.set_snap_distance(f64::INFINITY).is_err());
    assert_eq!(ed.config().snap_distance, 10.0);

    ed.set_snap_distance(0.0).unwrap();
    ed.set_snap_distance(25.0).unwrap();
    assert_eq!(ed.config().snap_distance, 25.0);
}

#[test]
fn test_presets() {
    let mut ed = editor();
    let line = ed.add_line().unwrap();
    assert_eq!(line.vertices.len(), 2);
    assert_eq!(line.edges.len(), 1);
    assert!(ed.fill().is_none());

    let pentagon = ed.add_pentagon().unwrap();
    assert_eq!(pentagon.vertices.len(), 5);
    assert_eq!(pentagon.edges.len(), 5);
    // First vertex sits straight above the center
    let top = ed.store().position(pentagon.vertices[0]).unwrap();
    assert!(top.approx_eq(&[300.0, 120.0]));
    assert_eq!(ed.fill().unwrap().cycle, pentagon.vertices);

    assert_eq!(ed.add_regular_polygon(2, 10.0, [0.0, 0.0]), Err(ShapeError::InvalidPolygon(2)));
}

#[test]
fn test_reset() {
    let mut ed = editor();
    let rect = ed.add_rectangle().unwrap();
    ed.select(Selection::Vertex(rect.vertices[0])).unwrap();
    ed.reset();
    assert_eq!(ed.store().vertex_count(), 0);
    assert!(ed.fill().is_none());
    assert!(ed.selection().is_none());
}

#[test]
fn test_snapshot_draw_order() {
    let mut ed = editor();
    ed.add_rectangle().unwrap();
    let snap = ed.snapshot();
    let order = snap.draw_order();

    assert_eq!(order.len(), 1 + 4 + 4);
    assert!(matches!(order[0], DrawItem::Fill(_)));
    assert!(order[1..5].iter().all(|i| matches!(i, DrawItem::Edge(_))));
    assert!(order[5..].iter().all(|i| matches!(i, DrawItem::Vertex(_))));
    assert!(!snap.is_empty());
}

#[test]
fn test_snapshot_serializes() {
    let mut ed = editor();
    let rect = ed.add_rectangle().unwrap();
    ed.select(Selection::Edge(rect.edges[0])).unwrap();

    let snap = ed.snapshot();
    let json = serde_json::to_value(&snap).expect("snapshot should serialize");
    assert_eq!(json["vertices"].as_array().unwrap().len(), 4);
    assert_eq!(json["edges"].as_array().unwrap().len(), 4);
    assert_eq!(json["fill"]["points"].as_array().unwrap().len(), 4);
    assert_eq!(json["selection"]["kind"], "edge");
    assert_eq!(json["vertices"][0]["state"], "normal");
    assert!((json["selected_edge"]["length"].as_f64().unwrap() - 200.0).abs() < 1e-9);
}

#[test]
fn test_invariants_hold_across_mixed_edits() {
    let mut ed = editor();
    ed.set_grid_size(10.0).unwrap();
    let rect = ed.add_rectangle().unwrap();
    let pent = ed.add_pentagon().unwrap();
    assert_no_dangling(&ed);

    // Drag a pentagon corner onto a rectangle corner and drop
    ed.begin_vertex_drag(pent.vertices[0]).unwrap();
    ed.drag_to([152.0, 148.0]).unwrap();
    assert_no_dangling(&ed);
    ed.end_drag().unwrap();
    assert_no_dangling(&ed);
    assert!(!ed.store().contains_vertex(pent.vertices[0]));

    ed.set_edge_angle(rect.edges[1], 45.0).unwrap();
    assert_no_dangling(&ed);
    ed.remove_vertex(rect.vertices[2]).unwrap();
    assert_no_dangling(&ed);

    ed.begin_edge_drag(pent.edges[2]).unwrap();
    ed.drag_by([33.0, -21.0]).unwrap();
    ed.end_drag().unwrap();
    assert_no_dangling(&ed);

    // Pentagon still closes through the merged corner
    assert!(ed.fill().is_some());
}
