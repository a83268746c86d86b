//! Facade tests for a wasm32 target (`wasm-pack test --node`).
#![cfg(target_arch = "wasm32")]

use cairn_engine::StackWorld;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn facade_builds_and_steps_a_stack() {
    let mut world = StackWorld::new();
    let request = r#"{"geometry": {"width_bottom": 100.0, "height": 40.0, "taper": 0.2, "round": 0.1}}"#;
    assert!(world.stack_stone(request.to_string()).unwrap().is_some());
    assert!(world.stack_stone(request.to_string()).unwrap().is_some());

    world.set_force_strengths(1.0, 0.0, 0.0);
    world.update(1.0 / 60.0, true, false);

    assert_eq!(world.stone_count(), 2);
    assert!(world.detect_tumble(0.5).is_empty());
    assert!(world.get_tower_height() > 70.0);
}

#[wasm_bindgen_test]
fn bad_config_json_is_an_error() {
    assert!(StackWorld::from_config_json("{".to_string()).is_err());
}
