use crate::batch;
use crate::config::{QueryConfig, TreeConfig};
use crate::kdtree::KdTree;
use crate::query::KdQuery;
use js_sys::{Float64Array, Int32Array, Uint32Array};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

// --- Tree ---

/// WASM wrapper around a 3D k-d tree built from a flat `[x, y, z, ...]` array.
#[wasm_bindgen(js_name = KdTree3D)]
pub struct KdTree3D {
    inner: KdTree,
}

#[wasm_bindgen(js_class = KdTree3D)]
impl KdTree3D {
    #[wasm_bindgen(constructor)]
    pub fn new(points: &[f64], max_points_per_leaf: usize) -> Result<KdTree3D, JsError> {
        let inner = KdTree::from_points(points, TreeConfig::with_leaf_size(max_points_per_leaf))?;
        Ok(KdTree3D { inner })
    }

    pub fn build(&mut self, points: &[f64]) -> Result<(), JsError> {
        self.inner.build(points)?;
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize { self.inner.len() }
    #[wasm_bindgen(getter)]
    pub fn depth(&self) -> usize { self.inner.depth() }
    #[wasm_bindgen(getter)]
    pub fn node_count(&self) -> usize { self.inner.nodes().len() }
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> { self.inner.points().to_vec() }
    pub fn get_point(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.inner.len()).then(|| self.inner.point(index).to_vec())
    }

    /// Nearest point for each position of a flat array, `-1` where there is none.
    pub fn closest_points(&self, positions: &[f64]) -> Result<Int32Array, JsError> {
        let results = batch::closest_points(&self.inner, positions, QueryConfig::default())?;
        let indices: Vec<i32> = results.iter().map(|r| r.map_or(-1, |n| n.index as i32)).collect();
        Ok(Int32Array::from(&indices[..]))
    }
}

// --- Query ---

/// Result of a closest point search.
#[wasm_bindgen(js_name = NearestPoint3D)]
#[derive(Clone, Copy, Debug)]
pub struct NearestPoint3D {
    pub index: u32,
    pub distance_sq: f64,
}

/// Reusable query object. Keep one alive and call it every frame.
#[wasm_bindgen(js_name = KdQuery3D)]
pub struct KdQuery3D {
    inner: KdQuery,
}

#[wasm_bindgen(js_class = KdQuery3D)]
impl KdQuery3D {
    #[wasm_bindgen(constructor)]
    pub fn new(initial_capacity: usize) -> KdQuery3D {
        KdQuery3D { inner: KdQuery::with_capacity(initial_capacity) }
    }

    #[wasm_bindgen(getter)]
    pub fn capacity(&self) -> usize { self.inner.capacity() }

    pub fn closest_point(&mut self, tree: &KdTree3D, x: f64, y: f64, z: f64) -> Option<NearestPoint3D> {
        self.inner.closest_point(&tree.inner, [x, y, z]).map(|n| NearestPoint3D {
            index: n.index as u32,
            distance_sq: n.distance_sq,
        })
    }

    pub fn radius(&mut self, tree: &KdTree3D, x: f64, y: f64, z: f64, radius: f64) -> Result<Uint32Array, JsError> {
        let mut indices = Vec::new();
        self.inner.radius(&tree.inner, [x, y, z], radius, &mut indices)?;
        let indices: Vec<u32> = indices.into_iter().map(|i| i as u32).collect();
        Ok(Uint32Array::from(&indices[..]))
    }

    /// Indices of the `k` nearest points, nearest first.
    pub fn k_nearest(&mut self, tree: &KdTree3D, x: f64, y: f64, z: f64, k: usize) -> Result<Uint32Array, JsError> {
        let mut indices = Vec::with_capacity(k);
        self.inner.k_nearest(&tree.inner, [x, y, z], k, &mut indices, None)?;
        let indices: Vec<u32> = indices.into_iter().map(|i| i as u32).collect();
        Ok(Uint32Array::from(&indices[..]))
    }

    /// Squared distances of the `k` nearest points, nearest first.
    pub fn k_nearest_distances(&mut self, tree: &KdTree3D, x: f64, y: f64, z: f64, k: usize) -> Result<Float64Array, JsError> {
        let mut indices = Vec::with_capacity(k);
        let mut distances = Vec::with_capacity(k);
        self.inner.k_nearest(&tree.inner, [x, y, z], k, &mut indices, Some(&mut distances))?;
        Ok(Float64Array::from(&distances[..]))
    }
}
