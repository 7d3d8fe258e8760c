//! Small numeric helpers shared by clustering and region lookup.

/// Squared Euclidean distance between two points.
#[inline]
pub(crate) fn dist_sq(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

/// Returns the index of the nearest point in `targets`.
///
/// Ties resolve to the lowest index. Returns `None` for an empty slice.
pub(crate) fn nearest_index(point: (f32, f32), targets: &[(f32, f32)]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &target) in targets.iter().enumerate() {
        let dist = dist_sq(point, target);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}
