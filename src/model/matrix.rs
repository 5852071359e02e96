//! Symmetric distance matrix, stored as its strict upper triangle.
//!
//! ```text
//!        0    1    2    3
//!   0 [  0   e0   e1   e2 ]
//!   1 [  .    0   e3   e4 ]      entries = [e0, e1, e2, e3, e4, e5]
//!   2 [  .    .    0   e5 ]
//!   3 [  .    .    .    0 ]
//! ```
//!
//! The diagonal is implicit (always `0.0`) and the lower triangle mirrors the
//! upper one, so `get(i, j)` and `get(j, i)` read the same cell. Unknown
//! distances are `f64::INFINITY`; IEEE addition keeps `∞ + x = ∞`, and
//! `∞ < x` is false for every `x`, so relaxation never mistakes an unknown
//! path for a shorter one.

use serde::{Deserialize, Serialize};

/// `n × n` symmetric, non-negative distance table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr")]
pub struct DistanceMatrix {
    n: usize,
    #[serde(with = "infinite_as_null")]
    entries: Vec<f64>,
}

impl DistanceMatrix {
    /// A matrix over `n` points where every off-diagonal pair is unknown.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            entries: vec![f64::INFINITY; triangle_len(n)],
        }
    }

    /// Number of points (rows).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between `i` and `j`, `f64::INFINITY` if no path is known.
    ///
    /// # Panics
    ///
    /// If either index is `>= len()`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of bounds for {} points", self.n);
        if i == j {
            return 0.0;
        }
        self.entries[self.slot(i, j)]
    }

    /// Like [`get`](Self::get) but returns `None` for out-of-range indices.
    pub fn try_get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.n && j < self.n).then(|| self.get(i, j))
    }

    /// Store `distance` for the unordered pair `{i, j}`.
    ///
    /// Writes to the diagonal are ignored; it is fixed at zero.
    ///
    /// # Panics
    ///
    /// If either index is `>= len()`.
    #[inline]
    pub fn put(&mut self, i: usize, j: usize, distance: f64) {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of bounds for {} points", self.n);
        if i == j {
            return;
        }
        let slot = self.slot(i, j);
        self.entries[slot] = distance;
    }

    /// True if a finite distance is known between `i` and `j`.
    pub fn is_reachable(&self, i: usize, j: usize) -> bool {
        self.get(i, j).is_finite()
    }

    /// Every unordered pair `(i, j, distance)` with `i < j`, row by row.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.n;
        (0..n)
            .flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
            .zip(self.entries.iter().copied())
            .map(|((i, j), d)| (i, j, d))
    }

    /// Number of unordered pairs with a finite distance.
    pub fn reachable_pair_count(&self) -> usize {
        self.entries.iter().filter(|d| d.is_finite()).count()
    }

    /// Index into `entries` for the unordered pair; callers guarantee `i != j`.
    #[inline]
    fn slot(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        // Rows 0..i hold (n-1) + (n-2) + ... + (n-i) cells.
        i * self.n - i * (i + 1) / 2 + (j - i - 1)
    }
}

#[inline]
fn triangle_len(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

// ============================================================================
// Serde
// ============================================================================

/// Unchecked wire shape; [`DistanceMatrix::try_from`] validates it.
#[derive(Deserialize)]
pub(crate) struct MatrixRepr {
    n: usize,
    #[serde(with = "infinite_as_null")]
    entries: Vec<f64>,
}

impl TryFrom<MatrixRepr> for DistanceMatrix {
    type Error = String;

    fn try_from(repr: MatrixRepr) -> std::result::Result<Self, Self::Error> {
        let expected = triangle_len(repr.n);
        if repr.entries.len() != expected {
            return Err(format!(
                "matrix over {} points needs {expected} entries, got {}",
                repr.n,
                repr.entries.len()
            ));
        }
        if let Some(bad) = repr.entries.iter().find(|d| d.is_nan() || **d < 0.0) {
            return Err(format!("matrix entry {bad} is not a non-negative distance"));
        }
        Ok(Self { n: repr.n, entries: repr.entries })
    }
}

/// JSON has no infinity, so unknown distances travel as `null`.
mod infinite_as_null {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde::ser::SerializeSeq;

    pub fn serialize<S: Serializer>(entries: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(entries.len()))?;
        for d in entries {
            let cell = if d.is_finite() { Some(*d) } else { None };
            seq.serialize_element(&cell)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let cells = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(cells.into_iter().map(|c| c.unwrap_or(f64::INFINITY)).collect())
    }
}
