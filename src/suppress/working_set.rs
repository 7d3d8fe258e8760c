//! Ordered candidate set with tombstones.

/// Live candidate indices in descending score order.
///
/// Indices are never removed from `order`; taking or suppressing one only
/// flips its flag, so a suppressed index can never come back.
#[derive(Clone, Debug)]
pub struct WorkingSet {
    order: Vec<usize>,
    alive: Vec<bool>,
    cursor: usize,
    live: usize,
}

impl WorkingSet {
    /// Orders `0..scores.len()` by descending score; equal scores keep index order.
    pub fn by_descending_score(scores: &[f32]) -> Self {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        Self {
            order,
            alive: vec![true; scores.len()],
            cursor: 0,
            live: scores.len(),
        }
    }

    /// Number of indices still live.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true once every index is taken or suppressed.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns true if `idx` is still a candidate.
    pub fn is_alive(&self, idx: usize) -> bool {
        self.alive.get(idx).copied().unwrap_or(false)
    }

    /// Takes the highest-scoring live index out of the set.
    pub fn pop_best(&mut self) -> Option<usize> {
        while let Some(&idx) = self.order.get(self.cursor) {
            self.cursor += 1;
            if self.alive[idx] {
                self.alive[idx] = false;
                self.live -= 1;
                return Some(idx);
            }
        }
        None
    }

    /// Fills `out` with the live indices in current order.
    pub fn live_into(&self, out: &mut Vec<usize>) {
        out.clear();
        out.extend(
            self.order[self.cursor..]
                .iter()
                .copied()
                .filter(|&idx| self.alive[idx]),
        );
    }

    /// Permanently removes `idx`. Returns false if it was already gone.
    pub fn suppress(&mut self, idx: usize) -> bool {
        match self.alive.get_mut(idx) {
            Some(flag) if *flag => {
                *flag = false;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }
}
