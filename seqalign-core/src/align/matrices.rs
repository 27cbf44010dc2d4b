//! Default similarity weight matrices.
//!
//! The nucleotide matrix is NCBI's NUC.4.4 ("IUB") matrix, which also scores
//! the IUB ambiguity codes. The amino-acid matrix is BLOSUM30, extended with
//! rows for stop, gap and the ambiguity codes. Row order matches the
//! corresponding symbol ordinals.

use std::sync::LazyLock;

/// Square symbol-indexed similarity table. Immutable and shared by
/// reference; the alignment engine never owns one.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightMatrix {
    dim: usize,
    scores: Vec<f64>,
}

impl WeightMatrix {
    pub fn new(dim: usize, scores: Vec<f64>) -> Self {
        assert_eq!(scores.len(), dim * dim, "weight matrix must be square");
        Self { dim, scores }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.scores[a * self.dim + b]
    }
}

#[rustfmt::skip]
const IUB_SCORES: [i8; 15 * 15] = [
//   A   C   G   T   M   R   W   S   Y   K   V   H   D   B   N
     5, -4, -4, -4,  1,  1,  1, -4, -4, -4, -1, -1, -1, -4, -2, // A
    -4,  5, -4, -4,  1, -4, -4,  1,  1, -4, -1, -1, -4, -1, -2, // C
    -4, -4,  5, -4, -4,  1, -4,  1, -4,  1, -1, -4, -1, -1, -2, // G
    -4, -4, -4,  5, -4, -4,  1, -4,  1,  1, -4, -1, -1, -1, -2, // T
     1,  1, -4, -4, -1, -2, -2, -2, -2, -4, -1, -1, -3, -3, -1, // M
     1, -4,  1, -4, -2, -1, -2, -2, -4, -2, -1, -3, -1, -3, -1, // R
     1, -4, -4,  1, -2, -2, -1, -4, -2, -2, -3, -1, -1, -3, -1, // W
    -4,  1,  1, -4, -2, -2, -4, -1, -2, -2, -1, -3, -3, -1, -1, // S
    -4,  1, -4,  1, -2, -4, -2, -2, -1, -2, -3, -1, -3, -1, -1, // Y
    -4, -4,  1,  1, -4, -2, -2, -2, -2, -1, -3, -3, -1, -1, -1, // K
    -1, -1, -1, -4, -1, -1, -3, -1, -3, -3, -1, -2, -2, -2, -1, // V
    -1, -1, -4, -1, -1, -3, -1, -3, -1, -3, -2, -1, -2, -2, -1, // H
    -1, -4, -1, -1, -3, -1, -1, -3, -3, -1, -2, -2, -1, -2, -1, // D
    -4, -1, -1, -1, -3, -3, -3, -1, -1, -1, -2, -2, -2, -1, -1, // B
    -2, -2, -2, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, // N
];

#[rustfmt::skip]
const BLOSUM30_SCORES: [i8; 26 * 26] = [
//   A   C   D   E   F   G   H   I   K   L   M   N   P   Q   R   S   T   V   W   Y   *   -   Z   U   B   X
     4, -3,  0,  0, -2,  0, -2,  0,  0, -1,  1,  0, -1,  1, -1,  1,  1,  1, -5, -4, -7,  0,  0,  0,  0,  0, // A
    -3, 17, -3,  1, -3, -4, -5, -2, -3,  0, -2, -1, -3, -2, -2, -2, -2, -2, -2, -6, -7,  0,  0,  0, -2, -2, // C
     0, -3,  9,  1, -5, -1, -2, -4,  0, -1, -3,  1, -1, -1, -1,  0, -1, -2, -4, -1, -7,  0,  0,  0,  5, -1, // D
     0,  1,  1,  6, -4, -2,  0, -3,  2, -1, -1, -1,  1,  2, -1,  0, -2, -3, -1, -2, -7,  0,  5,  0,  0, -1, // E
    -2, -3, -5, -4, 10, -3, -3,  0, -1,  2, -2, -1, -4, -3, -1, -1, -2,  1,  1,  3, -7,  0, -4,  0, -3, -1, // F
     0, -4, -1, -2, -3,  8, -3, -1, -1, -2, -2,  0, -1, -2, -2,  0, -2, -3,  1, -3, -7,  0, -2,  0,  0, -1, // G
    -2, -5, -2,  0, -3, -3, 14, -2, -2, -1,  2, -1,  1,  0, -1, -1, -2, -3, -5,  0, -7,  0,  0,  0, -2, -1, // H
     0, -2, -4, -3,  0, -1, -2,  6, -2,  2,  1,  0, -3, -2, -3, -1,  0,  4, -3, -1, -7,  0, -3,  0, -2,  0, // I
     0, -3,  0,  2, -1, -1, -2, -2,  4, -2,  2,  0,  1,  0,  1,  0, -1, -2, -2, -1, -7,  0,  1,  0,  0,  0, // K
    -1,  0, -1, -1,  2, -2, -1,  2, -2,  4,  2, -2, -3, -2, -2, -2,  0,  1, -2,  3, -7,  0, -1,  0, -1,  0, // L
     1, -2, -3, -1, -2, -2,  2,  1,  2,  2,  6,  0, -4, -1,  0, -2,  0,  0, -3, -1, -7,  0, -1,  0, -2,  0, // M
     0, -1,  1, -1, -1,  0, -1,  0,  0, -2,  0,  8, -3, -1, -2,  0,  1, -2, -7, -4, -7,  0, -1,  0,  4,  0, // N
    -1, -3, -1,  1, -4, -1,  1, -3,  1, -3, -4, -3, 11,  0, -1, -1,  0, -4, -3, -2, -7,  0,  0,  0, -2, -1, // P
     1, -2, -1,  2, -3, -2,  0, -2,  0, -2, -1, -1,  0,  8,  3, -1,  0, -3, -1, -1, -7,  0,  4,  0, -1,  0, // Q
    -1, -2, -1, -1, -1, -2, -1, -3,  1, -2,  0, -2, -1,  3,  8, -1, -3, -1,  0,  0, -7,  0,  0,  0, -2, -1, // R
     1, -2,  0,  0, -1,  0, -1, -1,  0, -2, -2,  0, -1, -1, -1,  4,  2, -1, -3, -2, -7,  0, -1,  0,  0,  0, // S
     1, -2, -1, -2, -2, -2, -2,  0, -1,  0,  0,  1,  0,  0, -3,  2,  5,  1, -5, -1, -7,  0, -1,  0,  0,  0, // T
     1, -2, -2, -3,  1, -3, -3,  4, -2,  1,  0, -2, -4, -3, -1, -1,  1,  5, -3,  1, -7,  0, -3,  0, -2,  0, // V
    -5, -2, -4, -1,  1,  1, -5, -3, -2, -2, -3, -7, -3, -1,  0, -3, -5, -3, 20,  5, -7,  0, -1,  0, -5, -2, // W
    -4, -6, -1, -2,  3, -3,  0, -1, -1,  3, -1, -4, -2, -1,  0, -2, -1,  1,  5,  9, -7,  0, -2,  0, -3, -1, // Y
    -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7, -7,  1,  0, -7,  0, -7, -7, // *
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // -
     0,  0,  0,  5, -4, -2,  0, -3,  1, -1, -1, -1,  0,  4,  0, -1, -1, -3, -1, -2, -7,  0,  4,  0,  0,  0, // Z
     0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0, // U
     0, -2,  5,  0, -3,  0, -2, -2,  0, -1, -2,  4, -2, -1, -2,  0,  0, -2, -5, -3, -7,  0,  0,  0,  5, -1, // B
     0, -2, -1, -1, -1, -1, -1,  0,  0,  0,  0,  0, -1,  0, -1,  0,  0,  0, -2, -1, -7,  0,  0,  0, -1, -1, // X
];

static IUB: LazyLock<WeightMatrix> =
    LazyLock::new(|| WeightMatrix::new(15, IUB_SCORES.iter().map(|&v| f64::from(v)).collect()));

static BLOSUM30: LazyLock<WeightMatrix> = LazyLock::new(|| {
    WeightMatrix::new(26, BLOSUM30_SCORES.iter().map(|&v| f64::from(v)).collect())
});

/// NCBI NUC.4.4 nucleotide matrix over the 15 IUB symbols (gap excluded).
pub fn iub() -> &'static WeightMatrix {
    &IUB
}

/// BLOSUM30 over the 26-symbol amino-acid alphabet.
pub fn blosum30() -> &'static WeightMatrix {
    &BLOSUM30
}
