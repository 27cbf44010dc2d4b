//! Codon-aware alignment: nucleotide sequences aligned so that gaps fall on
//! codon boundaries, with detection and repair of apparent frameshifts.
//!
//! The reference is translated once; the target is translated in all three
//! reading frames and the best amino-acid alignment is expanded back to
//! nucleotide coordinates. A direct nucleotide alignment serves as the
//! cross-check: when it outscores the codon-constrained alignment by more
//! than the threshold, an isolated non-codon-multiple gap is searched for
//! and patched with `N` fillers, and the whole procedure recurses.

use crate::align::matrices::{self, WeightMatrix};
use crate::align::pairwise::align;
use crate::align::types::{Scoring, DEFAULT_GAP_EXTEND, DEFAULT_GAP_OPEN};
use crate::error::FrameShiftError;
use crate::seq::{AaSeq, AminoAcid, NtSeq, Nucleotide};

/// Score gap between the direct and the codon-constrained alignment above
/// which the codon alignment is assumed to hide a frameshift. A real
/// frameshift garbles every downstream codon in the constrained view while
/// the codon-blind alignment absorbs it with one short gap, so the two
/// scores diverge far beyond substitution noise.
const FRAME_SHIFT_THRESHOLD: f64 = 100.0;

/// Positions checked on each side of a gap run when testing isolation.
const ISOLATION_WINDOW: usize = 10;

/// Codon-aware global alignment of `target` against an open reading frame.
///
/// `reference` must have length a multiple of 3. On success both sequences
/// are mutated to the aligned, equal-length form with reference gaps on
/// codon boundaries, and the codon alignment score is returned together
/// with the number of frameshifts that were corrected (by inserting `N`
/// fillers into `target`). Each correction consumes one unit of
/// `max_frame_shifts`; the recursion depth is bounded by it.
pub fn codon_align(
    reference: &mut NtSeq,
    target: &mut NtSeq,
    max_frame_shifts: u32,
    gap_open: f64,
    gap_extend: f64,
    nt_weights: &WeightMatrix,
    aa_weights: &WeightMatrix,
) -> Result<(f64, u32), FrameShiftError> {
    assert_eq!(
        reference.len() % 3,
        0,
        "reference length must be a multiple of 3"
    );

    let nt_scoring = Scoring::new(nt_weights, gap_open, gap_extend);
    let aa_scoring = Scoring::new(aa_weights, gap_open, gap_extend);

    let ref_aa = reference.translate();

    // Try all three reading frames of the target; the first frame wins
    // exact ties.
    let mut best_offset = 0;
    let mut best_score = f64::NEG_INFINITY;
    let mut best_ref_aa = AaSeq::new();
    let mut best_target_aa = AaSeq::new();
    for offset in 0..3 {
        let mut target_aa = target.translate_frame(offset);
        let mut ref_copy_aa = ref_aa.clone();
        let score = align(&mut ref_copy_aa, &mut target_aa, &aa_scoring);
        if score > best_score {
            best_offset = offset;
            best_score = score;
            best_ref_aa = ref_copy_aa;
            best_target_aa = target_aa;
        }
    }

    let mut ref_codon = reference.clone();
    let mut target_codon = target.clone();
    let codon_score = align_like_aa(
        &mut ref_codon,
        &mut target_codon,
        best_offset,
        &nt_scoring,
        &best_ref_aa,
        &best_target_aa,
    );

    let mut ref_nt = reference.clone();
    let mut target_nt = target.clone();
    let nt_score = align(&mut ref_nt, &mut target_nt, &nt_scoring);

    if nt_score - codon_score > FRAME_SHIFT_THRESHOLD {
        if max_frame_shifts > 0 {
            if let Some((insert_at, fill)) = find_frameshift(&ref_nt, &target_nt) {
                target.insert_n(insert_at, fill, Nucleotide::N);
                let (score, corrected) = codon_align(
                    reference,
                    target,
                    max_frame_shifts - 1,
                    gap_open,
                    gap_extend,
                    nt_weights,
                    aa_weights,
                )?;
                return Ok((score, corrected + 1));
            }
        }
        Err(FrameShiftError {
            nt_score,
            codon_score,
            aligned_ref: ref_nt,
            aligned_target: target_nt,
        })
    } else {
        *reference = ref_codon;
        *target = target_codon;
        Ok((codon_score, 0))
    }
}

/// [`codon_align`] with the default costs and matrices and a budget of one
/// repairable frameshift.
pub fn codon_align_default(
    reference: &mut NtSeq,
    target: &mut NtSeq,
) -> Result<(f64, u32), FrameShiftError> {
    codon_align(
        reference,
        target,
        1,
        DEFAULT_GAP_OPEN,
        DEFAULT_GAP_EXTEND,
        matrices::iub(),
        matrices::blosum30(),
    )
}

/// Expand a finished amino-acid alignment back to nucleotide coordinates:
/// every amino-acid gap becomes three nucleotide gaps in the corresponding
/// sequence. The target nucleotides excluded by the frame offset, and the
/// trailing ones that did not complete a codon, are spliced back into the
/// gap columns adjacent to the first and last non-gap codons so no target
/// nucleotide is lost. Returns the position-by-position score of the
/// reconstruction.
fn align_like_aa(
    seq1: &mut NtSeq,
    seq2: &mut NtSeq,
    offset: usize,
    scoring: &Scoring,
    aa1: &AaSeq,
    aa2: &AaSeq,
) -> f64 {
    debug_assert_eq!(aa1.len(), aa2.len());

    let aa_len = (seq2.len() - offset) / 3;
    let lead = seq2.remove_range(0..offset);
    let tail = seq2.remove_range(aa_len * 3..seq2.len());

    let mut first_non_gap = None;
    let mut last_non_gap = 0;

    for i in 0..aa1.len() {
        if aa1[i] == AminoAcid::Gap {
            seq1.insert_n(i * 3, 3, Nucleotide::Gap);
        }
        if aa2[i] == AminoAcid::Gap {
            seq2.insert_n(i * 3, 3, Nucleotide::Gap);
        } else {
            if first_non_gap.is_none() {
                first_non_gap = Some(i * 3);
            }
            last_non_gap = i * 3 + 3;
        }
    }

    splice_tail(seq1, seq2, &tail, last_non_gap);
    splice_lead(seq1, seq2, &lead, first_non_gap.unwrap_or(0));

    alignment_score(seq1, seq2, scoring)
}

fn splice_lead(seq1: &mut NtSeq, seq2: &mut NtSeq, lead: &NtSeq, first_non_gap: usize) {
    if lead.is_empty() {
        return;
    }
    let avail = first_non_gap.min(lead.len());
    let overflow = lead.len() - avail;
    for k in 0..avail {
        seq2[first_non_gap - avail + k] = lead[overflow + k];
    }
    if overflow > 0 {
        // Not enough gap columns before the first aligned codon: keep the
        // overhang as extra columns rather than dropping nucleotides.
        for k in (0..overflow).rev() {
            seq2.insert(0, lead[k]);
        }
        seq1.insert_n(0, overflow, Nucleotide::Gap);
    }
}

fn splice_tail(seq1: &mut NtSeq, seq2: &mut NtSeq, tail: &NtSeq, last_non_gap: usize) {
    if tail.is_empty() {
        return;
    }
    let avail = (seq2.len() - last_non_gap).min(tail.len());
    for k in 0..avail {
        seq2[last_non_gap + k] = tail[k];
    }
    let overflow = tail.len() - avail;
    if overflow > 0 {
        for k in avail..tail.len() {
            seq2.push(tail[k]);
        }
        seq1.insert_n(seq1.len(), overflow, Nucleotide::Gap);
    }
}

/// Score a finished alignment position by position: matrix weight where
/// both tracks carry a symbol, otherwise one open cost at the start of a
/// gap run plus one extension cost per gap position. Runs open at the very
/// start of either track are not charged the open cost.
fn alignment_score(seq1: &NtSeq, seq2: &NtSeq, scoring: &Scoring) -> f64 {
    debug_assert_eq!(seq1.len(), seq2.len());

    let mut score = 0.0;
    let mut seq1_gap = true;
    let mut seq2_gap = true;

    for i in 0..seq1.len() {
        if seq1[i] == Nucleotide::Gap {
            if !seq1_gap {
                seq1_gap = true;
                score += scoring.gap_open;
            }
            score += scoring.gap_extend;
        } else {
            seq1_gap = false;

            if seq2[i] == Nucleotide::Gap {
                if !seq2_gap {
                    seq2_gap = true;
                    score += scoring.gap_open;
                }
                score += scoring.gap_extend;
            } else {
                seq2_gap = false;
                score += scoring.weight(seq1[i], seq2[i]);
            }
        }
    }

    score
}

/// Locate the first isolated gap run whose length is not a multiple of 3 in
/// a direct nucleotide alignment, scanning left to right with the reference
/// track checked before the target track at each position. Leading runs are
/// never candidates. Returns the ungapped-target coordinate at which filler
/// belongs and the filler count: a reference-track run of length `l` calls
/// for `3 - l % 3` fillers (the target carries `l` extra nucleotides), a
/// target-track run for `l % 3` (the target lost that many).
fn find_frameshift(ref_nt: &NtSeq, target_nt: &NtSeq) -> Option<(usize, usize)> {
    let mut target_pos = 0usize;
    // A recorded start of 0 marks the leading run, which never qualifies.
    let mut ref_gap_start: isize = 0;
    let mut target_gap_start: isize = 0;

    for i in 0..ref_nt.len() {
        if ref_nt[i] == Nucleotide::Gap {
            if ref_gap_start == -1 {
                ref_gap_start = i as isize;
            }
        } else {
            if ref_gap_start > 0 {
                let start = ref_gap_start as usize;
                let len = i - start;
                if len % 3 != 0 && is_isolated(ref_nt, target_nt, start, i) {
                    return Some((target_pos, 3 - len % 3));
                }
            }
            ref_gap_start = -1;
        }

        if target_nt[i] == Nucleotide::Gap {
            if target_gap_start == -1 {
                target_gap_start = i as isize;
            }
        } else {
            if target_gap_start > 0 {
                let start = target_gap_start as usize;
                let len = i - start;
                if len % 3 != 0 && is_isolated(ref_nt, target_nt, start, i) {
                    return Some((target_pos, len % 3));
                }
            }
            target_gap_start = -1;
            target_pos += 1;
        }
    }

    None
}

/// A run is isolated when no gap of either track lies within the window
/// before its start or after its end.
fn is_isolated(ref_nt: &NtSeq, target_nt: &NtSeq, start: usize, stop: usize) -> bool {
    let before = start.saturating_sub(ISOLATION_WINDOW);
    !(have_gaps(ref_nt, before, start)
        || have_gaps(ref_nt, stop, stop + ISOLATION_WINDOW)
        || have_gaps(target_nt, before, start)
        || have_gaps(target_nt, stop, stop + ISOLATION_WINDOW))
}

fn have_gaps(seq: &NtSeq, from: usize, to: usize) -> bool {
    let to = to.min(seq.len());
    (from..to).any(|i| seq[i] == Nucleotide::Gap)
}
