//! Row-wise / column-wise application of slice functions

use crate::types::Dim;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

fn with_slice<R>(lane: ArrayView1<'_, f64>, f: impl FnOnce(&[f64]) -> R) -> R {
    match lane.as_slice() {
        Some(values) => f(values),
        None => f(&lane.to_vec()),
    }
}

/// Reduce every lane of `x` to one value: one per row for [`Dim::Rows`],
/// one per column for [`Dim::Columns`].
pub(crate) fn apply_along(
    x: &ArrayView2<'_, f64>,
    dim: Dim,
    f: impl Fn(&[f64]) -> f64,
) -> Array1<f64> {
    x.map_axis(dim.lane_axis(), |lane| with_slice(lane, &f))
}

/// Replace every lane of `x` by `f(lane)`, keeping the shape.
///
/// `f` must return as many values as it receives.
pub(crate) fn apply_lanes(
    x: &ArrayView2<'_, f64>,
    dim: Dim,
    f: impl Fn(&[f64]) -> Vec<f64>,
) -> Array2<f64> {
    let mut out = x.to_owned();
    for mut lane in out.lanes_mut(dim.lane_axis()) {
        let values = with_slice(lane.view(), &f);
        lane.assign(&Array1::from(values));
    }
    out
}
