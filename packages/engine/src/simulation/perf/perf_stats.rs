use wasm_bindgen::prelude::*;

/// Timings and counters of the last `update` (zeros when perf is off).
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(crate) step_ms: f64,
    pub(crate) controller_ms: f64,
    pub(crate) integrate_ms: f64,
    pub(crate) telemetry_ms: f64,
    pub(crate) stone_count: u32,
    pub(crate) influenced: u32,
    pub(crate) contact_pairs: u32,
    pub(crate) telemetry_entries: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn controller_ms(&self) -> f64 { self.controller_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn telemetry_ms(&self) -> f64 { self.telemetry_ms }
    #[wasm_bindgen(getter)]
    pub fn stone_count(&self) -> u32 { self.stone_count }
    #[wasm_bindgen(getter)]
    pub fn influenced(&self) -> u32 { self.influenced }
    #[wasm_bindgen(getter)]
    pub fn contact_pairs(&self) -> u32 { self.contact_pairs }
    #[wasm_bindgen(getter)]
    pub fn telemetry_entries(&self) -> u32 { self.telemetry_entries }
}
