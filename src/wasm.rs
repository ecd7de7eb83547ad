use crate::faces::FaceStyle;
use crate::voronoi::{compute_voronoi_with, VoronoiConfig};
use js_sys::Array;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_VORONOI: &'static str = r#"
export type CellGeometry = string | null;
"#;

/// Create a cell-based Voronoi diagram from three-dimensional points.
///
/// Returns one entry per point, in input order: the polyhedral surface of its
/// cell in well-known text, or `null` if the cell could not be built.
/// Invalid input throws an `Error` naming the violated precondition.
///
/// # Arguments
///
/// * `x`, `y`, `z` - Coordinates of the points.
/// * `container_ratio` - Ratio between the length of the container and the
///   length of the bounding box of the points. Must not be less than 1.
/// * `polygons` - Write one ring per face instead of fan triangles.
#[wasm_bindgen(js_name = voronoi)]
pub fn wasm_voronoi(x: &[f64], y: &[f64], z: &[f64], container_ratio: f64, polygons: Option<bool>) -> Result<Array, JsError> {
    let style = if polygons.unwrap_or(false) { FaceStyle::Polygons } else { FaceStyle::Triangles };
    let config = VoronoiConfig::default().with_ratio(container_ratio).with_style(style);
    let cells = compute_voronoi_with(x, y, z, &config)?;

    let result = Array::new_with_length(cells.len() as u32);
    for (i, cell) in cells.into_iter().enumerate() {
        let value = match cell {
            Some(text) => JsValue::from(text),
            None => JsValue::NULL,
        };
        result.set(i as u32, value);
    }
    Ok(result)
}
