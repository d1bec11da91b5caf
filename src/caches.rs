//! Small signature-keyed caches that sit alongside the main
//! transposition table: a pawn-structure score cache, a whole-position
//! eval cache, and a "danger/en-prise" cache opportunistically populated
//! during null-move failure analysis.
//!
//! Each is a flat power-of-two array indexed by the low bits of a
//! signature, single-slot (no chaining): a collision simply evicts the
//! old entry, which is safe since every entry also stores and checks the
//! full signature before being trusted.

#[derive(Clone, Copy, Default)]
struct PawnEntry {
    signature: u64,
    score: i32,
    /// Bitboard-free "open file" hints as a per-file bitmask pair would
    /// belong here in a fuller evaluator; kept minimal since `eval.rs`'s
    /// default evaluator only needs the aggregate score.
    valid: bool,
}

pub struct PawnHash {
    entries: Vec<PawnEntry>,
    mask: usize,
}

impl PawnHash {
    #[must_use]
    pub fn new(capacity_pow2: usize) -> PawnHash {
        let capacity = capacity_pow2.max(1).next_power_of_two();
        PawnHash {
            entries: vec![PawnEntry::default(); capacity],
            mask: capacity - 1,
        }
    }

    #[must_use]
    pub fn probe(&self, signature: u64) -> Option<i32> {
        let e = &self.entries[(signature as usize) & self.mask];
        (e.valid && e.signature == signature).then_some(e.score)
    }

    pub fn store(&mut self, signature: u64, score: i32) {
        let e = &mut self.entries[(signature as usize) & self.mask];
        *e = PawnEntry {
            signature,
            score,
            valid: true,
        };
    }
}

#[derive(Clone, Copy, Default)]
struct EvalEntry {
    signature: u64,
    score: i32,
    valid: bool,
}

pub struct EvalHash {
    entries: Vec<EvalEntry>,
    mask: usize,
}

impl EvalHash {
    #[must_use]
    pub fn new(capacity_pow2: usize) -> EvalHash {
        let capacity = capacity_pow2.max(1).next_power_of_two();
        EvalHash {
            entries: vec![EvalEntry::default(); capacity],
            mask: capacity - 1,
        }
    }

    #[must_use]
    pub fn probe(&self, signature: u64) -> Option<i32> {
        let e = &self.entries[(signature as usize) & self.mask];
        (e.valid && e.signature == signature).then_some(e.score)
    }

    pub fn store(&mut self, signature: u64, score: i32) {
        let e = &mut self.entries[(signature as usize) & self.mask];
        *e = EvalEntry {
            signature,
            score,
            valid: true,
        };
    }
}

/// Whether a side-to-move's position was found, during a null-move
/// verification search, to be in danger (losing badly even with a free
/// move) or to have a piece en prise. Populated opportunistically by
/// search's null-move handling and consulted to skip redundant pruning
/// attempts on a position already known to be dangerous.
#[derive(Clone, Copy, Default)]
struct DangerEntry {
    signature: u64,
    danger: bool,
    en_prise: bool,
    valid: bool,
}

pub struct DangerHash {
    entries: Vec<DangerEntry>,
    mask: usize,
}

impl DangerHash {
    #[must_use]
    pub fn new(capacity_pow2: usize) -> DangerHash {
        let capacity = capacity_pow2.max(1).next_power_of_two();
        DangerHash {
            entries: vec![DangerEntry::default(); capacity],
            mask: capacity - 1,
        }
    }

    #[must_use]
    pub fn probe(&self, signature: u64) -> Option<(bool, bool)> {
        let e = &self.entries[(signature as usize) & self.mask];
        (e.valid && e.signature == signature).then_some((e.danger, e.en_prise))
    }

    pub fn store(&mut self, signature: u64, danger: bool, en_prise: bool) {
        let e = &mut self.entries[(signature as usize) & self.mask];
        *e = DangerEntry {
            signature,
            danger,
            en_prise,
            valid: true,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_hash_round_trips() {
        let mut cache = PawnHash::new(64);
        cache.store(42, -15);
        assert_eq!(cache.probe(42), Some(-15));
        assert_eq!(cache.probe(43), None);
    }

    #[test]
    fn danger_hash_round_trips_both_flags() {
        let mut cache = DangerHash::new(64);
        cache.store(7, true, false);
        assert_eq!(cache.probe(7), Some((true, false)));
    }
}
