#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::consts::DEFAULT_FONT_SIZE;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn rect_node(id: &str, x: f64, y: f64, w: f64, h: f64) -> Node {
    Node {
        id: id.into(),
        name: id.into(),
        active: true,
        locked: false,
        opacity: 1.0,
        z_index: 0,
        rotation: 0.0,
        position: PositionMode::Absolute,
        top: Some(y),
        left: Some(x),
        right: None,
        bottom: None,
        width: Dimension::Length(w),
        height: Dimension::Length(h),
        fill: None,
        shape: Shape::Rectangle { corner_radius: 0.0 },
    }
}

fn container_node(id: &str, children: &[&str]) -> Node {
    Node {
        id: id.into(),
        name: id.into(),
        active: true,
        locked: false,
        opacity: 1.0,
        z_index: 0,
        rotation: 0.0,
        position: PositionMode::Relative,
        top: None,
        left: None,
        right: None,
        bottom: None,
        width: Dimension::Auto,
        height: Dimension::Auto,
        fill: None,
        shape: Shape::Container {
            children: children.iter().map(|c| (*c).to_string()).collect(),
            layout: Layout::Flow,
            direction: Axis::Horizontal,
            main_axis_alignment: AxisAlignment::Start,
            cross_axis_alignment: AxisAlignment::Start,
            gap: 0.0,
        },
    }
}

fn text_node(id: &str, text: &str) -> Node {
    Node {
        shape: Shape::Text {
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: 400,
            text_align: TextAlign::Left,
        },
        ..rect_node(id, 0.0, 0.0, 100.0, 20.0)
    }
}

// =============================================================
// Dimension serde
// =============================================================

#[test]
fn dimension_length_serializes_as_number() {
    assert_eq!(serde_json::to_value(Dimension::Length(12.5)).unwrap(), json!(12.5));
}

#[test]
fn dimension_auto_serializes_as_string() {
    assert_eq!(serde_json::to_value(Dimension::Auto).unwrap(), json!("auto"));
}

#[test]
fn dimension_deserializes_number_and_auto() {
    assert_eq!(serde_json::from_value::<Dimension>(json!(42)).unwrap(), Dimension::Length(42.0));
    assert_eq!(serde_json::from_value::<Dimension>(json!(3.5)).unwrap(), Dimension::Length(3.5));
    assert_eq!(serde_json::from_value::<Dimension>(json!("auto")).unwrap(), Dimension::Auto);
}

#[test]
fn dimension_rejects_other_strings() {
    assert!(serde_json::from_value::<Dimension>(json!("fit")).is_err());
}

#[test]
fn dimension_as_length() {
    assert_eq!(Dimension::Length(5.0).as_length(), Some(5.0));
    assert_eq!(Dimension::Auto.as_length(), None);
    assert!(Dimension::Auto.is_auto());
}

// =============================================================
// Paint serde
// =============================================================

#[test]
fn paint_solid_tagged_lowercase() {
    let paint = Paint::Solid { color: Rgba::new(255, 0, 0, 1.0) };
    let value = serde_json::to_value(&paint).unwrap();
    assert_eq!(value["type"], "solid");
    assert_eq!(value["color"]["r"], 255);
}

#[test]
fn paint_gradient_defaults_to_identity_transform() {
    let value = json!({
        "type": "linear_gradient",
        "stops": [
            {"offset": 0.0, "color": {"r": 0, "g": 0, "b": 0, "a": 1.0}},
            {"offset": 1.0, "color": {"r": 255, "g": 255, "b": 255, "a": 1.0}}
        ]
    });
    let paint: Paint = serde_json::from_value(value).unwrap();
    let Paint::LinearGradient { stops, transform } = paint else {
        panic!("expected linear gradient");
    };
    assert_eq!(stops.len(), 2);
    assert_eq!(transform, cmath::transform::IDENTITY);
}

#[test]
fn paint_gradient_roundtrips_custom_transform() {
    let paint = Paint::RadialGradient {
        stops: vec![GradientStop { offset: 0.0, color: Rgba::new(1, 2, 3, 0.5) }],
        transform: [[2.0, 0.0, 1.0], [0.0, 2.0, 1.0]],
    };
    let back: Paint = serde_json::from_value(serde_json::to_value(&paint).unwrap()).unwrap();
    assert_eq!(back, paint);
}

// =============================================================
// Node serde
// =============================================================

#[test]
fn node_shape_tag_is_lowercase_type_key() {
    let value = serde_json::to_value(rect_node("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
    assert_eq!(value["type"], "rectangle");
    let value = serde_json::to_value(container_node("c", &[])).unwrap();
    assert_eq!(value["type"], "container");
    let value = serde_json::to_value(text_node("t", "hi")).unwrap();
    assert_eq!(value["type"], "text");
}

#[test]
fn node_roundtrip_preserves_base_and_shape_fields() {
    let mut node = rect_node("a", 1.0, 2.0, 3.0, 4.0);
    node.z_index = 7;
    node.rotation = 45.0;
    node.locked = true;
    let back: Node = serde_json::from_value(serde_json::to_value(&node).unwrap()).unwrap();
    assert_eq!(back, node);
}

#[test]
fn node_deserialize_applies_defaults() {
    let value = json!({
        "id": "n1",
        "name": "minimal",
        "width": 10.0,
        "height": "auto",
        "type": "ellipse"
    });
    let node: Node = serde_json::from_value(value).unwrap();
    assert!(node.active);
    assert!(!node.locked);
    assert_eq!(node.opacity, 1.0);
    assert_eq!(node.z_index, 0);
    assert_eq!(node.rotation, 0.0);
    assert_eq!(node.position, PositionMode::Relative);
    assert_eq!(node.height, Dimension::Auto);
    assert!(node.fill.is_none());
    assert_eq!(node.shape, Shape::Ellipse);
}

#[test]
fn node_none_insets_are_skipped_on_the_wire() {
    let serialized = serde_json::to_string(&rect_node("a", 0.0, 0.0, 1.0, 1.0)).unwrap();
    assert!(!serialized.contains("\"right\""));
    assert!(!serialized.contains("\"bottom\""));
    assert!(serialized.contains("\"left\""));
}

// =============================================================
// Node queries
// =============================================================

#[test]
fn children_of_container_and_leaf() {
    let c = container_node("c", &["a", "b"]);
    assert_eq!(c.children(), ["a".to_string(), "b".to_string()]);
    assert!(rect_node("a", 0.0, 0.0, 1.0, 1.0).children().is_empty());
}

#[test]
fn bounding_rect_unrotated() {
    let node = rect_node("a", 10.0, 20.0, 30.0, 40.0);
    assert_eq!(node.bounding_rect(), Some(cmath::rect::Rect::new(10.0, 20.0, 30.0, 40.0)));
}

#[test]
fn bounding_rect_missing_insets_default_to_origin() {
    let mut node = rect_node("a", 0.0, 0.0, 10.0, 10.0);
    node.top = None;
    node.left = None;
    assert_eq!(node.bounding_rect(), Some(cmath::rect::Rect::new(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn bounding_rect_auto_dimension_is_none() {
    let mut node = rect_node("a", 0.0, 0.0, 10.0, 10.0);
    node.width = Dimension::Auto;
    assert_eq!(node.bounding_rect(), None);
}

#[test]
fn bounding_rect_rotation_yields_aabb() {
    // 20x10 rect rotated 90 degrees: the AABB swaps extents around the center.
    let mut node = rect_node("a", 0.0, 0.0, 20.0, 10.0);
    node.rotation = 90.0;
    let rect = node.bounding_rect().unwrap();
    assert!(approx(rect.x, 5.0), "x = {}", rect.x);
    assert!(approx(rect.y, -5.0), "y = {}", rect.y);
    assert!(approx(rect.width, 10.0), "width = {}", rect.width);
    assert!(approx(rect.height, 20.0), "height = {}", rect.height);
}

#[test]
fn bounding_rect_full_turn_matches_unrotated() {
    let mut node = rect_node("a", 3.0, 4.0, 6.0, 8.0);
    node.rotation = 360.0;
    let rect = node.bounding_rect().unwrap();
    assert!(approx(rect.x, 3.0));
    assert!(approx(rect.y, 4.0));
    assert!(approx(rect.width, 6.0));
    assert!(approx(rect.height, 8.0));
}

// =============================================================
// Document: construction and invariants
// =============================================================

#[test]
fn from_nodes_accepts_valid_tree() {
    let doc = Document::from_nodes(
        vec![
            container_node("root", &["a", "b"]),
            rect_node("a", 0.0, 0.0, 10.0, 10.0),
            rect_node("b", 50.0, 50.0, 10.0, 10.0),
        ],
        "root",
    )
    .unwrap();
    assert_eq!(doc.len(), 3);
    assert_eq!(doc.root_id(), "root");
    assert!(doc.contains("a"));
    assert!(!doc.is_empty());
}

#[test]
fn from_nodes_missing_root_rejected() {
    let err = Document::from_nodes(vec![rect_node("a", 0.0, 0.0, 1.0, 1.0)], "root").unwrap_err();
    assert_eq!(err, DocumentError::MissingRoot("root".into()));
}

#[test]
fn from_nodes_unknown_child_rejected() {
    let err = Document::from_nodes(vec![container_node("root", &["ghost"])], "root").unwrap_err();
    assert_eq!(err, DocumentError::UnknownChild { parent: "root".into(), child: "ghost".into() });
}

#[test]
fn from_nodes_two_parents_rejected() {
    let err = Document::from_nodes(
        vec![
            container_node("root", &["p", "q"]),
            container_node("p", &["x"]),
            container_node("q", &["x"]),
            rect_node("x", 0.0, 0.0, 1.0, 1.0),
        ],
        "root",
    )
    .unwrap_err();
    assert_eq!(err, DocumentError::MultipleParents("x".into()));
}

#[test]
fn from_nodes_root_as_child_rejected() {
    let err = Document::from_nodes(
        vec![container_node("root", &["p"]), container_node("p", &["root"])],
        "root",
    )
    .unwrap_err();
    assert_eq!(err, DocumentError::RootHasParent("p".into()));
}

#[test]
fn from_nodes_unreachable_node_rejected() {
    let err = Document::from_nodes(
        vec![container_node("root", &[]), rect_node("orphan", 0.0, 0.0, 1.0, 1.0)],
        "root",
    )
    .unwrap_err();
    assert!(matches!(err, DocumentError::Unreachable(_)));
}

#[test]
fn validate_detects_violations_after_deserialization() {
    // Deserialization does not validate; acceptance must.
    let value = json!({
        "root_id": "root",
        "nodes": {
            "root": {
                "id": "root", "name": "root", "width": "auto", "height": "auto",
                "type": "container", "children": ["ghost"]
            }
        }
    });
    let doc: Document = serde_json::from_value(value).unwrap();
    assert!(doc.validate().is_err());
}

// =============================================================
// Document: queries
// =============================================================

#[test]
fn get_nonexistent_returns_none() {
    let doc = Document::from_nodes(vec![container_node("root", &[])], "root").unwrap();
    assert!(doc.get("missing").is_none());
    assert!(doc.node_rect("missing").is_none());
}

#[test]
fn node_rect_derives_from_position_and_size() {
    let doc = Document::from_nodes(
        vec![container_node("root", &["a"]), rect_node("a", 5.0, 6.0, 7.0, 8.0)],
        "root",
    )
    .unwrap();
    assert_eq!(doc.node_rect("a"), Some(cmath::rect::Rect::new(5.0, 6.0, 7.0, 8.0)));
    // Containers with auto size have no derived rect.
    assert_eq!(doc.node_rect("root"), None);
}

#[test]
fn painter_order_sorts_by_z_index_then_id() {
    let mut a = rect_node("a", 0.0, 0.0, 1.0, 1.0);
    let mut b = rect_node("b", 0.0, 0.0, 1.0, 1.0);
    let mut c = rect_node("c", 0.0, 0.0, 1.0, 1.0);
    a.z_index = 2;
    b.z_index = 1;
    c.z_index = 1;
    let doc = Document::from_nodes(vec![container_node("root", &["a", "b", "c"]), a, b, c], "root").unwrap();

    let order: Vec<&str> = doc.painter_order().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(order, ["root", "b", "c", "a"]);
}

#[test]
fn painter_order_negative_z_below_zero() {
    let mut below = rect_node("below", 0.0, 0.0, 1.0, 1.0);
    below.z_index = -1;
    let doc = Document::from_nodes(vec![container_node("root", &["below"]), below], "root").unwrap();
    let order: Vec<&str> = doc.painter_order().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(order, ["below", "root"]);
}
