//! Affine-gap global alignment over a single score table plus a signed
//! gap-run table. The run table replaces the classical three-matrix
//! formulation: the sign records which gap direction is open, the magnitude
//! whether the neighboring cell's run continues.
//!
//! The DP uses i for sequence 1 (rows) and j for sequence 2 (columns); a
//! positive run is a gap run in sequence 2, a negative run one in
//! sequence 1.

use crate::align::types::{Alignment, Scoring};
use crate::seq::{Seq, Symbol};

/// Globally align `seq1` and `seq2` in place and return the score.
///
/// Both sequences are mutated to equal length by inserting [`Symbol::GAP`]
/// at the chosen positions; afterwards no column holds a gap in both.
/// Leading and trailing gap runs are charged the extension cost only.
/// Inputs that already contain gap symbols are stripped first with a
/// warning, since the gap symbol is reserved for engine-inserted positions.
pub fn align<S: Symbol>(seq1: &mut Seq<S>, seq2: &mut Seq<S>, scoring: &Scoring) -> f64 {
    assert!(
        scoring.matrix().dim() + 1 >= S::ALPHABET_SIZE,
        "weight matrix too small for the alphabet"
    );

    if seq1.contains_gap() || seq2.contains_gap() {
        log::warn!("alignment input contained gap symbols; removing them");
        seq1.strip_gaps();
        seq2.strip_gaps();
    }

    let n = seq1.len();
    let m = seq2.len();
    let width = m + 1;

    let mut scores = vec![0.0f64; (n + 1) * width];
    let mut runs = vec![0i32; (n + 1) * width];

    // Boundary cells are pure end-gap runs: extension cost only.
    for i in 1..=n {
        scores[i * width] = scores[(i - 1) * width] + scoring.gap_extend;
        runs[i * width] = runs[(i - 1) * width] + 1;
    }
    for j in 1..=m {
        scores[j] = scores[j - 1] + scoring.gap_extend;
        runs[j] = runs[j - 1] - 1;
    }

    for i in 1..=n {
        for j in 1..=m {
            let diag = scores[(i - 1) * width + j - 1] + scoring.weight(seq1[i - 1], seq2[j - 1]);

            // A gap move pays the open cost unless the neighbor already
            // carries a run in the same direction or the run trails past
            // the end of the other sequence.
            let horiz_cost = if runs[(i - 1) * width + j] > 0 || j == m {
                scoring.gap_extend
            } else {
                scoring.gap_open + scoring.gap_extend
            };
            let horiz = scores[(i - 1) * width + j] + horiz_cost;

            let vert_cost = if runs[i * width + j - 1] < 0 || i == n {
                scoring.gap_extend
            } else {
                scoring.gap_open + scoring.gap_extend
            };
            let vert = scores[i * width + j - 1] + vert_cost;

            // Ties: diagonal beats both gap moves, horizontal beats vertical.
            let idx = i * width + j;
            if diag >= horiz && diag >= vert {
                scores[idx] = diag;
                runs[idx] = 0;
            } else if horiz >= vert {
                scores[idx] = horiz;
                runs[idx] = runs[(i - 1) * width + j].max(0) + 1;
            } else {
                scores[idx] = vert;
                runs[idx] = runs[i * width + j - 1].min(0) - 1;
            }
        }
    }

    let score = scores[n * width + m];

    // Walk the run table back to the origin, inserting gaps end-first so
    // earlier indices stay valid.
    let mut i = n + 1;
    let mut j = m + 1;
    while i > 1 || j > 1 {
        let run = runs[(i - 1) * width + j - 1];
        if run == 0 {
            i -= 1;
            j -= 1;
        } else if run > 0 {
            i -= 1;
            seq2.insert(j - 1, S::GAP);
        } else {
            j -= 1;
            seq1.insert(i - 1, S::GAP);
        }
    }

    score
}

/// Non-mutating variant of [`align`]: clones the inputs and returns them
/// aligned together with the score.
pub fn align_pair<S: Symbol>(seq1: &Seq<S>, seq2: &Seq<S>, scoring: &Scoring) -> Alignment<S> {
    let mut seq1 = seq1.clone();
    let mut seq2 = seq2.clone();
    let score = align(&mut seq1, &mut seq2, scoring);
    Alignment { score, seq1, seq2 }
}
