pub mod codon;
pub mod matrices;
pub mod pairwise;
pub mod types;

pub use codon::{codon_align, codon_align_default};
pub use pairwise::{align, align_pair};
pub use types::{Alignment, Scoring, DEFAULT_GAP_EXTEND, DEFAULT_GAP_OPEN};

#[cfg(test)]
mod tests;

use crate::seq::{Seq, Symbol};

/// Align independent sequence pairs, in parallel when the `parallel`
/// feature is enabled.
///
/// Each pair is aligned exactly as by [`align_pair`]; no state is shared
/// between pairs.
pub fn align_batch<S>(pairs: &[(Seq<S>, Seq<S>)], scoring: &Scoring) -> Vec<Alignment<S>>
where
    S: Symbol + Send + Sync,
{
    par_map!(pairs, |(seq1, seq2)| pairwise::align_pair(
        seq1, seq2, scoring
    ))
}
