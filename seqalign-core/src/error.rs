use thiserror::Error;

use crate::seq::NtSeq;

/// Raised by codon alignment when an apparent frameshift cannot be corrected
/// within the caller's budget.
///
/// Carries both nucleotide alignments as they stood at the point of
/// divergence, so the caller can widen the budget, inspect the pair by hand,
/// or reject it.
#[derive(Debug, Clone, Error)]
#[error("frameshift could not be corrected (nucleotide score {nt_score}, codon score {codon_score})")]
pub struct FrameShiftError {
    /// Score of the direct nucleotide-level alignment.
    pub nt_score: f64,
    /// Score of the codon-constrained alignment.
    pub codon_score: f64,
    /// Nucleotide-aligned reference sequence.
    pub aligned_ref: NtSeq,
    /// Nucleotide-aligned target sequence.
    pub aligned_target: NtSeq,
}

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("invalid character '{ch}' at position {pos}")]
    InvalidChar { ch: char, pos: usize },

    #[error(transparent)]
    FrameShift(#[from] FrameShiftError),
}

pub type AlignResult<T> = Result<T, AlignError>;
