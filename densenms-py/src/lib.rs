//! Python bindings for the densenms adaptive suppression library.
//!
//! Boxes cross the boundary as `float32` arrays of shape `(N, 4)`, scores as
//! `float32 (N,)` and heatmaps as `uint8 (H, W)` where non-zero marks an
//! activation.

use numpy::{PyReadonlyArray1, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use densenms::lowlevel::boxes_from_flat;
use densenms::{
    ActivationMap, AdaptiveNmsConfig as RustNmsConfig, BBox, CentroidInit, DenseNmsError,
    Detections as RustDetections, KMeansConfig,
};

/// Convert a DenseNmsError to a Python exception.
fn to_py_err(err: DenseNmsError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn boxes_from_array(boxes: &PyReadonlyArray2<'_, f32>) -> PyResult<Vec<BBox>> {
    let shape = boxes.shape();
    if shape[1] != 4 {
        return Err(PyValueError::new_err("boxes must have shape (N, 4)"));
    }
    boxes_from_flat(boxes.as_slice()?).map_err(to_py_err)
}

/// Configuration for density-adaptive suppression.
#[pyclass]
#[derive(Clone)]
pub struct NmsConfig {
    inner: RustNmsConfig,
}

#[pymethods]
impl NmsConfig {
    /// Create a new NmsConfig.
    ///
    /// Args:
    ///     base_thresh: IoU threshold floor (default: 0.5)
    ///     n_clusters: Number of heatmap clusters (default: 5)
    ///     max_iters: k-means iteration budget (default: 100)
    ///     init: "farthest_point" or "kmeans_plus_plus" (default: "farthest_point")
    ///     seed: RNG seed for "kmeans_plus_plus" (default: 0)
    ///     parallel: Enable parallel execution (default: False)
    #[new]
    #[pyo3(signature = (
        base_thresh = 0.5,
        n_clusters = 5,
        max_iters = 100,
        init = "farthest_point",
        seed = 0,
        parallel = false
    ))]
    fn new(
        base_thresh: f32,
        n_clusters: usize,
        max_iters: usize,
        init: &str,
        seed: u64,
        parallel: bool,
    ) -> PyResult<Self> {
        let init = match init.to_lowercase().as_str() {
            "farthest_point" => CentroidInit::FarthestPoint,
            "kmeans_plus_plus" => CentroidInit::KMeansPlusPlus { seed },
            _ => {
                return Err(PyValueError::new_err(
                    "init must be 'farthest_point' or 'kmeans_plus_plus'",
                ))
            }
        };
        let inner = RustNmsConfig {
            base_thresh,
            n_clusters,
            kmeans: KMeansConfig { max_iters, init },
            parallel,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn __repr__(&self) -> String {
        format!(
            "NmsConfig(base_thresh={}, n_clusters={}, max_iters={}, parallel={})",
            self.inner.base_thresh,
            self.inner.n_clusters,
            self.inner.kmeans.max_iters,
            self.inner.parallel
        )
    }
}

/// Boxes kept by adaptive suppression, in selection order.
#[pyclass]
#[derive(Clone)]
pub struct Detections {
    /// Kept indices into the input arrays.
    #[pyo3(get)]
    pub keep: Vec<usize>,
    /// Kept boxes as [x1, y1, x2, y2].
    #[pyo3(get)]
    pub boxes: Vec<[f32; 4]>,
    /// Kept scores.
    #[pyo3(get)]
    pub scores: Vec<f32>,
    /// Region boxes as [x1, y1, x2, y2].
    #[pyo3(get)]
    pub regions: Vec<[f32; 4]>,
    /// Box-center count per region.
    #[pyo3(get)]
    pub densities: Vec<usize>,
}

#[pymethods]
impl Detections {
    fn __len__(&self) -> usize {
        self.keep.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Detections(kept={}, regions={})",
            self.keep.len(),
            self.regions.len()
        )
    }
}

impl From<RustDetections> for Detections {
    fn from(d: RustDetections) -> Self {
        Self {
            boxes: d.boxes.iter().map(|b| b.to_array()).collect(),
            regions: d.regions.iter().map(|r| r.bbox.to_array()).collect(),
            densities: d.regions.iter().map(|r| r.density).collect(),
            scores: d.scores,
            keep: d.keep,
        }
    }
}

/// Run density-adaptive NMS.
///
/// Args:
///     boxes: float32 array (N, 4) of [x1, y1, x2, y2]
///     scores: float32 array (N,)
///     heatmap: uint8 array (H, W); non-zero pixels are activations
///     config: NmsConfig (default: NmsConfig())
///
/// Returns:
///     Detections with kept indices, boxes, scores and regions
#[pyfunction]
#[pyo3(signature = (boxes, scores, heatmap, config = None))]
fn adaptive_nms(
    boxes: PyReadonlyArray2<'_, f32>,
    scores: PyReadonlyArray1<'_, f32>,
    heatmap: PyReadonlyArray2<'_, u8>,
    config: Option<NmsConfig>,
) -> PyResult<Detections> {
    let boxes = boxes_from_array(&boxes)?;
    let scores = scores.as_slice()?;
    let shape = heatmap.shape();
    let map = ActivationMap::from_slice(heatmap.as_slice()?, shape[1], shape[0])
        .map_err(to_py_err)?;
    let cfg = config.map(|c| c.inner).unwrap_or_default();
    let result = densenms::adaptive_nms(&boxes, scores, map, &cfg).map_err(to_py_err)?;
    Ok(result.into())
}

/// Fixed-threshold NMS; returns kept indices by descending score.
#[pyfunction]
#[pyo3(signature = (boxes, scores, iou_threshold = 0.5))]
fn nms(
    boxes: PyReadonlyArray2<'_, f32>,
    scores: PyReadonlyArray1<'_, f32>,
    iou_threshold: f32,
) -> PyResult<Vec<usize>> {
    let boxes = boxes_from_array(&boxes)?;
    densenms::nms(&boxes, scores.as_slice()?, iou_threshold).map_err(to_py_err)
}

/// Per-class NMS; boxes with different labels never suppress each other.
#[pyfunction]
#[pyo3(signature = (boxes, scores, labels, iou_threshold = 0.5))]
fn batched_nms(
    boxes: PyReadonlyArray2<'_, f32>,
    scores: PyReadonlyArray1<'_, f32>,
    labels: Vec<usize>,
    iou_threshold: f32,
) -> PyResult<Vec<usize>> {
    let boxes = boxes_from_array(&boxes)?;
    densenms::batched_nms(&boxes, scores.as_slice()?, &labels, iou_threshold).map_err(to_py_err)
}

/// Pairwise IoU matrix as a list of rows.
#[pyfunction]
fn box_iou(a: PyReadonlyArray2<'_, f32>, b: PyReadonlyArray2<'_, f32>) -> PyResult<Vec<Vec<f32>>> {
    let a = boxes_from_array(&a)?;
    let b = boxes_from_array(&b)?;
    let flat = densenms::box_iou(&a, &b);
    if b.is_empty() {
        return Ok(vec![Vec::new(); a.len()]);
    }
    Ok(flat.chunks(b.len()).map(<[f32]>::to_vec).collect())
}

/// Python module for density-adaptive suppression.
#[pymodule]
fn _densenms(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<NmsConfig>()?;
    m.add_class::<Detections>()?;
    m.add_function(wrap_pyfunction!(adaptive_nms, m)?)?;
    m.add_function(wrap_pyfunction!(nms, m)?)?;
    m.add_function(wrap_pyfunction!(batched_nms, m)?)?;
    m.add_function(wrap_pyfunction!(box_iou, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
