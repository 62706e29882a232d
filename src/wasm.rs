//! WASM bindings for Graphstep Core.
//!
//! This module provides JavaScript-friendly bindings so a browser front end
//! can draw graphs and animate Prim's algorithm. Vertex indices are 0-based.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmGraph, WasmMstStepper } from 'graphstep_core';
//!
//! await init();
//!
//! const graph = new WasmGraph("3,0,1,1,1,0,1,1,1,0");
//! graph.is_bipartite();       // false
//! graph.shortest_path(0, 2);  // Uint32Array [0, 2]
//!
//! const prim = new WasmMstStepper("3,0,2,5,2,0,1,5,1,0", Math.random() * 2 ** 32);
//! while (prim.step_forward()) {
//!   redraw(prim.visited_vertices(), prim.visited_edges());
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::graph::Graph;
use crate::mst::{MstStepper, SeededVertex};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(err: crate::error::GraphError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible graph with memoized queries.
#[wasm_bindgen]
pub struct WasmGraph {
    graph: Graph,
}

#[wasm_bindgen]
impl WasmGraph {
    /// Create a graph from its text representation.
    ///
    /// # Example
    /// ```javascript
    /// const graph = new WasmGraph("2,0,1,1,0");
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(representation: &str) -> Result<WasmGraph, JsValue> {
        let graph = Graph::from_text(representation).map_err(js_error)?;
        Ok(WasmGraph { graph })
    }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    #[wasm_bindgen]
    pub fn is_connected(&self) -> bool {
        self.graph.is_connected()
    }

    #[wasm_bindgen]
    pub fn has_cycle(&self) -> bool {
        self.graph.has_cycle()
    }

    #[wasm_bindgen]
    pub fn is_bipartite(&self) -> bool {
        self.graph.is_bipartite()
    }

    /// Shortest path from `start` to `end`; throws if none exists.
    #[wasm_bindgen]
    pub fn shortest_path(&self, start: usize, end: usize) -> Result<Vec<u32>, JsValue> {
        let path = self.graph.shortest_path(start, end).map_err(js_error)?;
        Ok(path.into_iter().map(|v| v as u32).collect())
    }

    /// Edge weight between two vertices, 0 if absent.
    #[wasm_bindgen]
    pub fn weight(&self, u: usize, v: usize) -> Result<f64, JsValue> {
        let w = self.graph.weight(u, v).map_err(js_error)?;
        Ok(w as f64)
    }

    #[wasm_bindgen]
    pub fn to_text(&self) -> String {
        self.graph.to_text()
    }
}

/// WASM-compatible Prim's stepper.
#[wasm_bindgen]
pub struct WasmMstStepper {
    stepper: MstStepper,
}

#[wasm_bindgen]
impl WasmMstStepper {
    /// Create a stepper whose start vertex is drawn from `seed`.
    ///
    /// Pass a value from `Math.random()` for a random start, or a constant
    /// for a reproducible one.
    #[wasm_bindgen(constructor)]
    pub fn new(representation: &str, seed: f64) -> Result<WasmMstStepper, JsValue> {
        let graph = Graph::from_text(representation).map_err(js_error)?;
        let stepper = MstStepper::with_strategy(graph, SeededVertex::new(seed as u64));
        Ok(WasmMstStepper { stepper })
    }

    #[wasm_bindgen]
    pub fn step_forward(&mut self) -> bool {
        self.stepper.step_forward()
    }

    #[wasm_bindgen]
    pub fn step_backward(&mut self) -> bool {
        self.stepper.step_backward()
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.stepper.reset()
    }

    #[wasm_bindgen]
    pub fn visited_vertices(&self) -> Vec<u32> {
        self.stepper
            .visited_vertices()
            .iter()
            .map(|&v| v as u32)
            .collect()
    }

    /// Tree edges flattened as `[u0, v0, u1, v1, ...]`.
    #[wasm_bindgen]
    pub fn visited_edges(&self) -> Vec<u32> {
        self.stepper
            .visited_edges()
            .iter()
            .flat_map(|e| [e.u as u32, e.v as u32])
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn total_weight(&self) -> f64 {
        self.stepper.total_weight() as f64
    }

    #[wasm_bindgen]
    pub fn seen_edge(&self, u: usize, v: usize) -> bool {
        self.stepper.seen_edge(u, v)
    }

    #[wasm_bindgen(getter)]
    pub fn is_complete(&self) -> bool {
        self.stepper.state() == crate::mst::StepperState::Complete
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
