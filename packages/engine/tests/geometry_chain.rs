use cairn_engine::geometry::polygon::{area, centroid};
use cairn_engine::{anchor_next, build_trapezoid, build_trapezoid_json, Point, Transform, TrapezoidGeometry, TrapezoidParams};

#[test]
fn chained_trapezoids_share_their_contact_edge() {
    let geometry = TrapezoidGeometry::new(90.0, 45.0, 0.5, 0.3);
    let mut reference = 0.0f32;
    let mut body = Transform::new(Point::new(0.0, 22.5), 0.0);

    for &(beta, tau) in &[(0.0, 0.1), (0.05, -0.08), (-0.02, 0.12)] {
        let shape = build_trapezoid(&TrapezoidParams::new(geometry, beta, tau, reference));

        assert!(centroid(&shape.local).length() < 1e-2);
        assert!((area(&shape.local) - area(&shape.world)).abs() < 1e-1);
        for (l, w) in shape.local.iter().zip(&shape.world) {
            assert!((l.length() - w.length()).abs() < 1e-3);
        }

        let next = anchor_next(&shape.metrics, body, Point::ZERO);
        let top_world = body.translation + shape.metrics.top_mid_world.rotate(body.rotation);
        assert!(next.translation.distance(top_world) < 1e-4);

        reference = next.rotation;
        body = Transform::new(next.translation - shape.metrics.bottom_mid_world, 0.0);
    }
}

#[test]
fn build_trapezoid_json_matches_native_builder() {
    let json = r#"{
        "geometry": {"width_bottom": 100.0, "height": 50.0, "taper": 0.0, "round": 0.0},
        "beta": 0.0,
        "tau": 0.0,
        "prev_top_angle_global": 0.0
    }"#;
    let out = build_trapezoid_json(json.to_string()).expect("json");
    let value: serde_json::Value = serde_json::from_str(&out).expect("parse");
    assert_eq!(value["local"].as_array().map(|a| a.len()), Some(4));
    let width = value["metrics"]["bottom_width"].as_f64().expect("width");
    assert!((width - 100.0).abs() < 1e-3);
}
