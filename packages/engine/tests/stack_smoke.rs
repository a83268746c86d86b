use cairn_engine::{
    build_trapezoid, ControlInputs, Point, StackCore, StackRequest, StoneParams, TrapezoidGeometry,
    TrapezoidParams, UpdateOptions,
};

const DT: f32 = 1.0 / 60.0;

fn tower(count: usize) -> StackCore {
    let mut world = StackCore::new();
    let geometry = TrapezoidGeometry::new(120.0, 40.0, 0.3, 0.2);
    for i in 0..count {
        let request = StackRequest::new(geometry, StoneParams::default().with_friction(0.9))
            .with_tilts(0.0, if i % 2 == 0 { 0.05 } else { -0.05 })
            .with_stack_offset(Point::new(0.0, 0.5));
        world.stack_stone(&request).expect("stone");
    }
    world
}

#[test]
fn perf_smoke_step() {
    let mut world = tower(4);
    world.enable_perf_metrics(true);
    world.update(DT, UpdateOptions::default(), &ControlInputs::stabilizing(1.0));
    let stats = world.perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.stone_count(), 4);
}

#[test]
fn stabilized_tower_stays_up() {
    let mut world = tower(4);
    let start = world.tower_height();
    assert!(start > 150.0);

    let inputs = ControlInputs::stabilizing(1.0);
    for _ in 0..120 {
        world.update(DT, UpdateOptions::default(), &inputs);
    }

    assert!(world.detect_tumble(0.5).is_empty());
    assert!(world.tower_height() > start * 0.8);
}

#[test]
fn stones_json_lists_every_stone() {
    let mut world = tower(3);
    world.update(DT, UpdateOptions::default(), &ControlInputs::default());

    let stones = world.stones();
    assert_eq!(stones.len(), 3);
    let json = serde_json::to_string(&stones).expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(3));
    assert!(parsed[0]["vertices"].as_array().map_or(false, |v| v.len() > 4));
}

#[test]
fn facade_round_trip_without_js() {
    use cairn_engine::StackWorld;

    let mut world = StackWorld::new();
    let square = [-20.0, -20.0, 20.0, -20.0, 20.0, 20.0, -20.0, 20.0];
    let id = world
        .add_stone(&square, String::new(), 0.0, 200.0, 0xff0000ff, None, None, None)
        .expect("stone");
    assert!(world.add_stone(&square[..4], String::new(), 0.0, 0.0, 0, None, None, None).is_none());
    assert!(world.add_stone(&square, "{oops".to_string(), 0.0, 0.0, 0, None, None, None).is_none());

    world.set_gravity_bias(50.0, 0.0);
    world.update(DT, true, false);

    let stones: serde_json::Value = serde_json::from_str(&world.get_stones_json()).expect("stones");
    assert_eq!(stones[0]["id"].as_u64(), Some(id as u64));
    assert!(world.is_stone_stable(id, 0.3));

    world.flip_stone(id);
    assert_eq!(world.detect_tumble(0.3), vec![id]);

    world.clear();
    assert_eq!(world.stone_count(), 0);
}

#[test]
fn facade_accepts_an_anchor_and_support_target() {
    use cairn_engine::geometry::ground_anchor;
    use cairn_engine::{AnchoredTrapezoid, StackWorld};

    let shape = build_trapezoid(&TrapezoidParams::new(
        TrapezoidGeometry::new(100.0, 50.0, 0.0, 0.0),
        0.0,
        0.1,
        0.0,
    ));
    let anchored = AnchoredTrapezoid::new(ground_anchor(0.0, 0.0), shape.metrics);
    let origin = anchored.body_origin();
    let anchor_json = serde_json::to_string(&anchored).expect("anchor json");
    let flat: Vec<f32> = shape.world.iter().flat_map(|p| [p.x, p.y]).collect();

    let mut world = StackWorld::new();
    let id = world
        .add_stone(&flat, String::new(), origin.x, origin.y, 0, None, Some(anchor_json), Some(0.0))
        .expect("anchored stone");

    let stones: serde_json::Value = serde_json::from_str(&world.get_stones_json()).expect("stones");
    assert_eq!(stones[0]["id"].as_u64(), Some(id as u64));
    let top = stones[0]["top_angle"].as_f64().expect("top angle from anchor");
    assert!((top - shape.metrics.top_angle_world as f64).abs() < 1e-4);

    assert!(world
        .add_stone(&flat, String::new(), 0.0, 0.0, 0, None, Some("{bad".to_string()), None)
        .is_none());
}
