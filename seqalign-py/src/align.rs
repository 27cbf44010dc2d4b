use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use seqalign_core::align::{self as core_align, matrices, Scoring};
use seqalign_core::seq::{AaSeq, NtSeq};

fn parse_nt(name: &str, s: &str) -> PyResult<NtSeq> {
    s.parse()
        .map_err(|e| PyValueError::new_err(format!("{name}: {e}")))
}

fn parse_aa(name: &str, s: &str) -> PyResult<AaSeq> {
    s.parse()
        .map_err(|e| PyValueError::new_err(format!("{name}: {e}")))
}

fn check_gap_costs(gap_open: f64, gap_extend: f64) -> PyResult<()> {
    if gap_open > 0.0 || gap_extend > 0.0 {
        return Err(PyValueError::new_err(
            "gap_open and gap_extend must be <= 0",
        ));
    }
    Ok(())
}

/// Globally align two sequences; returns (score, aligned1, aligned2).
#[pyfunction]
#[pyo3(signature = (seq1, seq2, gap_open=-10.0, gap_extend=-3.3, protein=false))]
fn align(
    seq1: &str,
    seq2: &str,
    gap_open: f64,
    gap_extend: f64,
    protein: bool,
) -> PyResult<(f64, String, String)> {
    check_gap_costs(gap_open, gap_extend)?;
    if protein {
        let mut a = parse_aa("seq1", seq1)?;
        let mut b = parse_aa("seq2", seq2)?;
        let scoring = Scoring::new(matrices::blosum30(), gap_open, gap_extend);
        let score = core_align::align(&mut a, &mut b, &scoring);
        Ok((score, a.to_string(), b.to_string()))
    } else {
        let mut a = parse_nt("seq1", seq1)?;
        let mut b = parse_nt("seq2", seq2)?;
        let scoring = Scoring::new(matrices::iub(), gap_open, gap_extend);
        let score = core_align::align(&mut a, &mut b, &scoring);
        Ok((score, a.to_string(), b.to_string()))
    }
}

/// Codon-aware alignment of a target against an open reading frame;
/// returns (score, frameshifts_corrected, aligned_ref, aligned_target).
#[pyfunction]
#[pyo3(signature = (reference, target, max_frame_shifts=1, gap_open=-10.0, gap_extend=-3.3))]
fn codon_align(
    reference: &str,
    target: &str,
    max_frame_shifts: u32,
    gap_open: f64,
    gap_extend: f64,
) -> PyResult<(f64, u32, String, String)> {
    check_gap_costs(gap_open, gap_extend)?;
    let mut r = parse_nt("reference", reference)?;
    if r.len() % 3 != 0 {
        return Err(PyValueError::new_err(
            "reference length must be a multiple of 3",
        ));
    }
    let mut t = parse_nt("target", target)?;
    let (score, corrected) = core_align::codon_align(
        &mut r,
        &mut t,
        max_frame_shifts,
        gap_open,
        gap_extend,
        matrices::iub(),
        matrices::blosum30(),
    )
    .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok((score, corrected, r.to_string(), t.to_string()))
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(align, m)?)?;
    m.add_function(wrap_pyfunction!(codon_align, m)?)?;
    Ok(())
}
