use super::{AaSeq, AminoAcid, Nucleotide, Seq, Symbol};

/// Standard genetic code indexed by 2-bit packed codons (A=0, C=1, G=2, T=3).
const CODON_TABLE: &[u8; 64] = b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSS*CWCLFLF";

/// Translate one codon, resolving ambiguity codes by expansion: when every
/// concrete reading codes the same residue the codon translates to it,
/// otherwise to X. Codons touching a gap translate to X as well.
pub fn translate_codon(codon: [Nucleotide; 3]) -> AminoAcid {
    let mut result: Option<AminoAcid> = None;
    for &b0 in codon[0].bases() {
        for &b1 in codon[1].bases() {
            for &b2 in codon[2].bases() {
                let idx = (b0 as usize) << 4 | (b1 as usize) << 2 | b2 as usize;
                let aa = AminoAcid::from_char(CODON_TABLE[idx] as char).unwrap_or(AminoAcid::X);
                match result {
                    None => result = Some(aa),
                    Some(prev) if prev != aa => return AminoAcid::X,
                    Some(_) => {}
                }
            }
        }
    }
    result.unwrap_or(AminoAcid::X)
}

impl Seq<Nucleotide> {
    /// Translate reading frame 0.
    pub fn translate(&self) -> AaSeq {
        self.translate_frame(0)
    }

    /// Translate from `offset` (0, 1 or 2), dropping the trailing
    /// nucleotides that do not complete a codon.
    pub fn translate_frame(&self, offset: usize) -> AaSeq {
        assert!(offset < 3, "frame offset must be 0, 1 or 2");
        let start = offset.min(self.len());
        self.as_slice()[start..]
            .chunks_exact(3)
            .map(|codon| translate_codon([codon[0], codon[1], codon[2]]))
            .collect()
    }
}
