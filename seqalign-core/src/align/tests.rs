use proptest::prelude::*;

use super::codon::{codon_align, codon_align_default};
use super::pairwise::{align, align_pair};
use super::types::{Scoring, DEFAULT_GAP_EXTEND, DEFAULT_GAP_OPEN};
use super::{align_batch, matrices};
use crate::seq::{AaSeq, NtSeq, Nucleotide, Seq, Symbol};

fn nt(s: &str) -> NtSeq {
    s.parse().unwrap()
}

fn aa(s: &str) -> AaSeq {
    s.parse().unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "score {actual} differs from expected {expected}"
    );
}

fn ungapped<S: Symbol>(seq: &Seq<S>) -> Seq<S> {
    seq.iter().copied().filter(|&s| s != S::GAP).collect()
}

fn no_column_gaps_both<S: Symbol>(seq1: &Seq<S>, seq2: &Seq<S>) -> bool {
    (0..seq1.len()).all(|i| seq1[i] != S::GAP || seq2[i] != S::GAP)
}

/// Maximal gap-run lengths of one alignment track.
fn gap_runs<S: Symbol>(seq: &Seq<S>) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0usize;
    for &s in seq.iter() {
        if s == S::GAP {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}

/// Recompute an alignment's score under the engine's policy: matrix weight
/// per substitution column, extension per gap position, open per gap run
/// unless the run touches either end of the alignment.
fn rescore<S: Symbol>(seq1: &Seq<S>, seq2: &Seq<S>, scoring: &Scoring) -> f64 {
    assert_eq!(seq1.len(), seq2.len());
    let len = seq1.len();
    let mut score = 0.0;
    let mut i = 0;
    while i < len {
        if seq1[i] == S::GAP || seq2[i] == S::GAP {
            let in_seq1 = seq1[i] == S::GAP;
            let start = i;
            while i < len && (if in_seq1 { seq1[i] } else { seq2[i] }) == S::GAP {
                i += 1;
            }
            score += scoring.gap_extend * (i - start) as f64;
            if start != 0 && i != len {
                score += scoring.gap_open;
            }
        } else {
            score += scoring.weight(seq1[i], seq2[i]);
            i += 1;
        }
    }
    score
}

// ---- pairwise engine ----

#[test]
fn identical_nucleotide_sequences() {
    let mut seq1 = nt("ACGT");
    let mut seq2 = nt("ACGT");
    let score = align(&mut seq1, &mut seq2, &Scoring::nucleotide());
    assert_close(score, 20.0);
    assert_eq!(seq1.to_string(), "ACGT");
    assert_eq!(seq2.to_string(), "ACGT");
}

#[test]
fn identical_amino_acid_sequences() {
    let mut seq1 = aa("MA");
    let mut seq2 = aa("MA");
    let score = align(&mut seq1, &mut seq2, &Scoring::amino_acid());
    assert_close(score, 10.0);
}

#[test]
fn trailing_end_gap_costs_extension_only() {
    let mut seq1 = nt("AAAA");
    let mut seq2 = nt("AAAAGG");
    let score = align(&mut seq1, &mut seq2, &Scoring::nucleotide());
    assert_close(score, 4.0 * 5.0 + 2.0 * DEFAULT_GAP_EXTEND);
    assert_eq!(seq1.to_string(), "AAAA--");
    assert_eq!(seq2.to_string(), "AAAAGG");
}

#[test]
fn leading_end_gap_costs_extension_only() {
    let mut seq1 = nt("GGAAAA");
    let mut seq2 = nt("AAAA");
    let score = align(&mut seq1, &mut seq2, &Scoring::nucleotide());
    assert_close(score, 4.0 * 5.0 + 2.0 * DEFAULT_GAP_EXTEND);
    assert_eq!(seq2.to_string(), "--AAAA");
}

#[test]
fn substitution_beats_gapping() {
    let mut seq1 = nt("ACGT");
    let mut seq2 = nt("AGGT");
    let score = align(&mut seq1, &mut seq2, &Scoring::nucleotide());
    assert_close(score, 3.0 * 5.0 - 4.0);
    assert_eq!(seq1.to_string(), "ACGT");
    assert_eq!(seq2.to_string(), "AGGT");
}

#[test]
fn empty_sequence_aligns_as_pure_gap() {
    let mut seq1 = nt("ACG");
    let mut seq2 = NtSeq::new();
    let score = align(&mut seq1, &mut seq2, &Scoring::nucleotide());
    assert_close(score, 3.0 * DEFAULT_GAP_EXTEND);
    assert_eq!(seq1.to_string(), "ACG");
    assert_eq!(seq2.to_string(), "---");
}

#[test]
fn gap_symbols_in_input_are_stripped() {
    let mut seq1 = nt("AC-GT");
    let mut seq2 = nt("ACGT");
    let score = align(&mut seq1, &mut seq2, &Scoring::nucleotide());
    assert_close(score, 20.0);
    assert_eq!(seq1.to_string(), "ACGT");
}

#[test]
fn tie_breaks_prefer_horizontal_gap() {
    // "AC" against "CA" has two optimal placements; the horizontal move
    // wins the tie, so the trailing gap lands in sequence 2.
    let mut seq1 = nt("AC");
    let mut seq2 = nt("CA");
    let score = align(&mut seq1, &mut seq2, &Scoring::nucleotide());
    assert_close(score, 5.0 + 2.0 * DEFAULT_GAP_EXTEND);
    assert_eq!(seq1.to_string(), "-AC");
    assert_eq!(seq2.to_string(), "CA-");
}

#[test]
fn returned_score_matches_alignment_rescore() {
    let nt_cases = [
        ("ACGTACGT", "ACTACG"),
        ("GATTACA", "GCATGCA"),
        ("AAAAAA", "AAA"),
        ("ACGT", "TGCA"),
    ];
    let scoring = Scoring::nucleotide();
    for (a, b) in nt_cases {
        let mut seq1 = nt(a);
        let mut seq2 = nt(b);
        let score = align(&mut seq1, &mut seq2, &scoring);
        assert_eq!(seq1.len(), seq2.len());
        assert!(no_column_gaps_both(&seq1, &seq2));
        assert_close(score, rescore(&seq1, &seq2, &scoring));
    }

    let mut seq1 = aa("MAVEQ");
    let mut seq2 = aa("MVE");
    let scoring = Scoring::amino_acid();
    let score = align(&mut seq1, &mut seq2, &scoring);
    assert_eq!(seq1.len(), seq2.len());
    assert_close(score, rescore(&seq1, &seq2, &scoring));
}

#[test]
fn alignment_is_deterministic() {
    let scoring = Scoring::nucleotide();
    let first = align_pair(&nt("ACGTACGT"), &nt("ACTACG"), &scoring);
    let second = align_pair(&nt("ACGTACGT"), &nt("ACTACG"), &scoring);
    assert_eq!(first.score, second.score);
    assert_eq!(first.seq1, second.seq1);
    assert_eq!(first.seq2, second.seq2);
}

#[test]
fn score_is_symmetric() {
    let scoring = Scoring::nucleotide();
    for (a, b) in [("ACGTACGT", "ACTACG"), ("GATTACA", "GCATGCA")] {
        let forward = align_pair(&nt(a), &nt(b), &scoring);
        let backward = align_pair(&nt(b), &nt(a), &scoring);
        assert_close(forward.score, backward.score);
    }
}

#[test]
fn batch_matches_individual_alignments() {
    let scoring = Scoring::nucleotide();
    let pairs = vec![
        (nt("ACGT"), nt("ACGT")),
        (nt("AAAA"), nt("AAAAGG")),
        (nt("GATTACA"), nt("GCATGCA")),
    ];
    let batch = align_batch(&pairs, &scoring);
    assert_eq!(batch.len(), pairs.len());
    for ((seq1, seq2), result) in pairs.iter().zip(&batch) {
        let single = align_pair(seq1, seq2, &scoring);
        assert_eq!(result.score, single.score);
        assert_eq!(result.seq1, single.seq1);
        assert_eq!(result.seq2, single.seq2);
    }
}

// ---- codon-aware alignment ----

fn orf_30() -> NtSeq {
    // ATG plus nine ACG codons: translates to M followed by nine T's,
    // and shifting the repeat region by one mismatches every position.
    nt(&format!("ATG{}", "ACG".repeat(9)))
}

#[test]
fn codon_identity_is_a_noop() {
    let original = orf_30();
    let mut reference = original.clone();
    let mut target = original.clone();
    let (score, shifts) = codon_align_default(&mut reference, &mut target).unwrap();
    assert_eq!(shifts, 0);
    assert_close(score, 30.0 * 5.0);
    assert_eq!(reference, original);
    assert_eq!(target, original);
}

#[test]
fn whole_codon_deletion_aligns_on_codon_boundary() {
    let mut reference = orf_30();
    let mut target = nt(&format!("ATG{}", "ACG".repeat(8)));
    let (score, shifts) = codon_align_default(&mut reference, &mut target).unwrap();
    assert_eq!(shifts, 0);
    assert_eq!(reference.to_string(), orf_30().to_string());
    assert_eq!(target.to_string(), format!("ATG{}---", "ACG".repeat(8)));
    assert_close(
        score,
        27.0 * 5.0 + DEFAULT_GAP_OPEN + 3.0 * DEFAULT_GAP_EXTEND,
    );
}

#[test]
fn reference_gap_runs_stay_codon_multiples() {
    let base = orf_30().to_string();
    let mut reference = orf_30();
    let mut target = nt(&format!("{}TTT{}", &base[..15], &base[15..]));
    let (score, shifts) = codon_align_default(&mut reference, &mut target).unwrap();
    assert_eq!(shifts, 0);
    assert!(score.is_finite());
    assert_eq!(reference.len(), target.len());
    assert!(no_column_gaps_both(&reference, &target));
    for run in gap_runs(&reference) {
        assert_eq!(run % 3, 0, "reference gap run of length {run}");
    }
}

#[test]
fn single_deletion_frameshift_is_repaired() {
    let original = orf_30();
    let mut reference = original.clone();
    let mut deleted = original.clone();
    deleted.remove(15);
    let mut target = deleted;

    let (score, shifts) = codon_align_default(&mut reference, &mut target).unwrap();
    assert_eq!(shifts, 1);
    assert_eq!(reference, original);
    assert_eq!(target.len(), 30);
    // The repair restores the reading frame with exactly one N filler.
    let mut fillers = 0;
    for i in 0..30 {
        if target[i] != original[i] {
            assert_eq!(target[i], Nucleotide::N);
            fillers += 1;
        }
    }
    assert_eq!(fillers, 1);
    assert_close(score, 29.0 * 5.0 - 2.0);
}

#[test]
fn frameshift_with_zero_budget_is_an_error() {
    let mut reference = orf_30();
    let mut target = orf_30();
    target.remove(15);

    let err = codon_align(
        &mut reference,
        &mut target,
        0,
        DEFAULT_GAP_OPEN,
        DEFAULT_GAP_EXTEND,
        matrices::iub(),
        matrices::blosum30(),
    )
    .unwrap_err();
    assert!(err.nt_score - err.codon_score > 100.0);
    assert_eq!(err.aligned_ref.len(), err.aligned_target.len());
}

#[test]
fn second_frameshift_exhausts_the_budget() {
    let mut reference = nt(&format!("ATG{}", "ACG".repeat(19)));
    let mut target = reference.clone();
    target.remove(45);
    target.remove(15);

    let result = codon_align(
        &mut reference,
        &mut target,
        1,
        DEFAULT_GAP_OPEN,
        DEFAULT_GAP_EXTEND,
        matrices::iub(),
        matrices::blosum30(),
    );
    assert!(result.is_err());
}

#[test]
fn codon_alignment_is_deterministic() {
    let run = || {
        let mut reference = orf_30();
        let mut target = orf_30();
        target.remove(15);
        let (score, shifts) = codon_align_default(&mut reference, &mut target).unwrap();
        (score, shifts, reference.to_string(), target.to_string())
    };
    assert_eq!(run(), run());
}

// ---- properties ----

fn acgt_string(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')],
        1..max_len,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn global_alignment_invariants(a in acgt_string(20), b in acgt_string(20)) {
        let original1 = nt(&a);
        let original2 = nt(&b);
        let scoring = Scoring::nucleotide();
        let mut seq1 = original1.clone();
        let mut seq2 = original2.clone();
        let score = align(&mut seq1, &mut seq2, &scoring);

        prop_assert_eq!(seq1.len(), seq2.len());
        prop_assert!(no_column_gaps_both(&seq1, &seq2));
        prop_assert_eq!(ungapped(&seq1), original1);
        prop_assert_eq!(ungapped(&seq2), original2);
        let recomputed = rescore(&seq1, &seq2, &scoring);
        prop_assert!((score - recomputed).abs() < 1e-6,
            "score {} != rescore {} for {} / {}", score, recomputed, a, b);
    }
}

proptest! {
    #[test]
    fn alignment_score_is_symmetric(a in acgt_string(15), b in acgt_string(15)) {
        let scoring = Scoring::nucleotide();
        let forward = align_pair(&nt(&a), &nt(&b), &scoring);
        let backward = align_pair(&nt(&b), &nt(&a), &scoring);
        prop_assert!((forward.score - backward.score).abs() < 1e-6);
    }
}

proptest! {
    #[test]
    fn codon_alignment_of_identical_orfs_is_identity(codons in prop::collection::vec(
        prop::sample::select(vec!["ATG", "ACG", "GCT", "TTC", "GGA", "CAC", "TAA"]),
        1..8,
    )) {
        let orf: String = codons.concat();
        let original = nt(&orf);
        let mut reference = original.clone();
        let mut target = original.clone();
        let (_, shifts) = codon_align_default(&mut reference, &mut target).unwrap();
        prop_assert_eq!(shifts, 0);
        prop_assert_eq!(reference, original.clone());
        prop_assert_eq!(target, original);
    }
}
