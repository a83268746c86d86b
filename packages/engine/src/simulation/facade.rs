use wasm_bindgen::prelude::*;

use crate::core::math::Point;
use crate::domain::stone::{StoneId, StoneParams};
use crate::geometry::{build_trapezoid, AnchoredTrapezoid, TrapezoidParams};
use crate::systems::controller::{ControlInputs, EnergyPhase, UpdateOptions};

use super::perf_stats::PerfStats;
use super::stacking::StackRequest;
use super::StackCore;

/// JS handle to a stacking world.
///
/// Control inputs are latched here and handed to every `update`.
#[wasm_bindgen]
pub struct StackWorld {
    core: StackCore,
    inputs: ControlInputs,
}

#[wasm_bindgen]
impl StackWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: StackCore::new(),
            inputs: ControlInputs::default(),
        }
    }

    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: String) -> Result<StackWorld, JsValue> {
        let core = StackCore::from_config_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            core,
            inputs: ControlInputs::default(),
        })
    }

    #[wasm_bindgen(js_name = getConfigJson)]
    pub fn get_config_json(&self) -> String {
        self.core.config().to_json()
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 { self.core.time() }

    #[wasm_bindgen(getter)]
    pub fn stone_count(&self) -> usize { self.core.stone_count() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }

    #[wasm_bindgen(js_name = setGravity)]
    pub fn set_gravity(&mut self, x: f32, y: f32) {
        self.core.set_gravity(Point::new(x, y));
    }

    // === STONES ===

    /// `vertices` is a flat `[x0, y0, x1, y1, ...]` list in body space.
    /// `anchor_json` is an `AnchoredTrapezoid` (transform + metrics).
    /// Returns `undefined` when the stone cannot be built.
    #[wasm_bindgen(js_name = addStone)]
    #[allow(clippy::too_many_arguments)]
    pub fn add_stone(
        &mut self,
        vertices: &[f32],
        params_json: String,
        x: f32,
        y: f32,
        color: u32,
        top_angle: Option<f32>,
        anchor_json: Option<String>,
        support_target_x: Option<f32>,
    ) -> Option<u32> {
        let params = match parse_params(&params_json) {
            Ok(p) => p,
            Err(msg) => {
                console_warn!("addStone: bad params ({})", msg);
                return None;
            }
        };
        let anchor = match parse_anchor(anchor_json.as_deref()) {
            Ok(a) => a,
            Err(msg) => {
                console_warn!("addStone: bad anchor ({})", msg);
                return None;
            }
        };
        let points: Vec<Point> = vertices
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0], xy[1]))
            .collect();
        self.core
            .add_stone(&points, params, x, y, color, top_angle, anchor, support_target_x)
            .map(|id| id.0)
    }

    /// Build a trapezoid from a `StackRequest` JSON and place it on the stack.
    #[wasm_bindgen(js_name = stackStone)]
    pub fn stack_stone(&mut self, request_json: String) -> Result<Option<u32>, JsValue> {
        let request: StackRequest =
            serde_json::from_str(&request_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.core.stack_stone(&request).map(|id| id.0))
    }

    #[wasm_bindgen(js_name = removeStone)]
    pub fn remove_stone(&mut self, id: u32) {
        self.core.remove_stone(StoneId(id));
    }

    #[wasm_bindgen(js_name = flipStone)]
    pub fn flip_stone(&mut self, id: u32) {
        self.core.flip_stone(StoneId(id));
    }

    #[wasm_bindgen(js_name = setStoneAngle)]
    pub fn set_stone_angle(&mut self, id: u32, angle: f32) {
        self.core.set_stone_angle(StoneId(id), angle);
    }

    #[wasm_bindgen(js_name = setStoneStatic)]
    pub fn set_stone_static(&mut self, id: u32, is_static: bool) {
        self.core.set_stone_static(StoneId(id), is_static);
    }

    /// Force for the next step. Without a point it acts at the center of mass.
    #[wasm_bindgen(js_name = applyForce)]
    pub fn apply_force(&mut self, id: u32, fx: f32, fy: f32, px: Option<f32>, py: Option<f32>) {
        let at = match (px, py) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        };
        self.core.apply_force(StoneId(id), Point::new(fx, fy), at);
    }

    #[wasm_bindgen(js_name = stabilizeBodies)]
    pub fn stabilize_bodies(&mut self) {
        self.core.stabilize_bodies();
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === CONTROL INPUTS ===

    #[wasm_bindgen(js_name = setForceStrengths)]
    pub fn set_force_strengths(&mut self, stabilizer: f32, disturber: f32, direction: f32) {
        self.inputs.stabilizer = stabilizer;
        self.inputs.disturber = disturber;
        self.inputs.direction = direction;
    }

    /// `phase`: 0 calm, 1 building, 2 critical.
    #[wasm_bindgen(js_name = setEnergy)]
    pub fn set_energy(&mut self, phase: u8, ratio: f32, volatility: f32) {
        self.inputs.energy_phase = EnergyPhase::from_u8(phase);
        self.inputs.energy_ratio = ratio;
        self.inputs.volatility = volatility;
    }

    #[wasm_bindgen(js_name = setGravityBias)]
    pub fn set_gravity_bias(&mut self, x: f32, y: f32) {
        self.inputs.gravity_bias = Point::new(x, y);
    }

    // === STEP ===

    pub fn update(&mut self, delta_time: f32, apply_helpers: bool, wake_bodies: bool) {
        let options = UpdateOptions { apply_helpers, wake_bodies };
        self.core.update(delta_time, options, &self.inputs);
    }

    // === QUERIES ===

    #[wasm_bindgen(js_name = getStonesJson)]
    pub fn get_stones_json(&self) -> String {
        serde_json::to_string(&self.core.stones()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Telemetry of the last step; drains it.
    #[wasm_bindgen(js_name = getTelemetryJson)]
    pub fn get_telemetry_json(&mut self) -> String {
        serde_json::to_string(&self.core.take_telemetry()).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen(js_name = isStoneStable)]
    pub fn is_stone_stable(&self, id: u32, threshold: f32) -> bool {
        self.core.is_stone_stable(StoneId(id), threshold)
    }

    #[wasm_bindgen(js_name = detectTumble)]
    pub fn detect_tumble(&self, threshold: f32) -> Vec<u32> {
        self.core
            .detect_tumble(threshold)
            .into_iter()
            .map(|id| id.0)
            .collect()
    }

    #[wasm_bindgen(js_name = getTowerHeight)]
    pub fn get_tower_height(&self) -> f32 {
        self.core.tower_height()
    }

    #[wasm_bindgen(js_name = getTowerHeightRotated)]
    pub fn get_tower_height_rotated(&self) -> f32 {
        self.core.tower_height_rotated()
    }
}

impl Default for StackWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure geometry: `TrapezoidParams` JSON in, `TrapezoidResult` JSON out.
#[wasm_bindgen(js_name = buildTrapezoidJson)]
pub fn build_trapezoid_json(params_json: String) -> Result<String, JsValue> {
    let params: TrapezoidParams =
        serde_json::from_str(&params_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&build_trapezoid(&params)).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_anchor(json: Option<&str>) -> Result<Option<AnchoredTrapezoid>, String> {
    match json.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => serde_json::from_str(text).map(Some).map_err(|e| e.to_string()),
    }
}

fn parse_params(json: &str) -> Result<StoneParams, String> {
    if json.trim().is_empty() {
        return Ok(StoneParams::default());
    }
    serde_json::from_str(json).map_err(|e| e.to_string())
}
