//! Transposition table: fixed-size, lock-sharded, two-tier replacement.
//!
//! Entries are packed into 4-entry, 64-byte-aligned "lines" so a probe
//! touches exactly one cache line. Within a line, slot 0 is
//! depth-preferred (only overwritten by a search result from at least as
//! deep a search), slot 1 is always-replace, and slots 2/3 give a
//! recently-displaced deep entry a second chance before it is finally
//! evicted. A 4-bit aging counter, bumped once per `new_search`, lets a
//! stale entry from a previous search be treated as replaceable even if
//! its recorded depth is nominally still high.

use crate::chess_move::{Move, NO_MOVE};
use parking_lot::Mutex;

pub const NUM_LOCKS: usize = 256;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy)]
struct Entry {
    signature: u64,
    best_move: Move,
    depth: i8,
    bound: Bound,
    value: i16,
    age: u8,
}

const EMPTY_ENTRY: Entry = Entry {
    signature: 0,
    best_move: NO_MOVE,
    depth: -1,
    bound: Bound::Exact,
    value: 0,
    age: 0,
};

const LINE_SIZE: usize = 4;

#[repr(align(64))]
struct Line {
    entries: [Entry; LINE_SIZE],
}

pub struct ProbeResult {
    pub best_move: Move,
    pub depth: i8,
    pub bound: Bound,
    pub value: i32,
}

/// Transposition table. `lines.len()` is always a power of two so the
/// line index is a mask, not a modulo.
pub struct TranspositionTable {
    lines: Vec<Mutex<Line>>,
    mask: usize,
    current_age: std::sync::atomic::AtomicU8,
}

impl TranspositionTable {
    /// `size_mb` is rounded down to the nearest power-of-two line count
    /// that fits, per the reference engine's "hash size must be a power
    /// of two" convention (see `OptionError::NotAPowerOfTwo`).
    #[must_use]
    pub fn new(size_mb: usize) -> TranspositionTable {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let line_bytes = std::mem::size_of::<Line>();
        let mut num_lines = (bytes / line_bytes).max(1);
        num_lines = num_lines.next_power_of_two() / 2;
        if num_lines == 0 {
            num_lines = 1;
        }
        let mut lines = Vec::with_capacity(num_lines);
        for _ in 0..num_lines {
            lines.push(Mutex::new(Line {
                entries: [EMPTY_ENTRY; LINE_SIZE],
            }));
        }
        TranspositionTable {
            lines,
            mask: num_lines - 1,
            current_age: std::sync::atomic::AtomicU8::new(0),
        }
    }

    fn line_index(&self, signature: u64) -> usize {
        (signature as usize) & self.mask
    }

    fn lock_index(&self, line_index: usize) -> usize {
        line_index % NUM_LOCKS
    }

    /// Bumps the aging counter; called once per new root search so stale
    /// entries from the previous search become preferentially
    /// replaceable without being actively cleared.
    pub fn new_search(&self) {
        self.current_age
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    }

    /// On a hit, also refreshes the entry's age to the current search so a
    /// position still being visited doesn't become replaceable purely
    /// because it was first stored a few iterations ago.
    #[must_use]
    pub fn probe(&self, signature: u64) -> Option<ProbeResult> {
        let idx = self.line_index(signature);
        let current_age = self.current_age.load(std::sync::atomic::Ordering::Relaxed);
        let mut line = self.lines[idx].lock();
        for entry in line.entries.iter_mut() {
            if entry.signature == signature && entry.depth >= 0 {
                entry.age = current_age;
                return Some(ProbeResult {
                    best_move: entry.best_move,
                    depth: entry.depth,
                    bound: entry.bound,
                    value: entry.value as i32,
                });
            }
        }
        None
    }

    pub fn store(&self, signature: u64, best_move: Move, depth: i8, bound: Bound, value: i32) {
        let idx = self.line_index(signature);
        let age = self.current_age.load(std::sync::atomic::Ordering::Relaxed);
        let value = value.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        let new_entry = Entry {
            signature,
            best_move: if best_move.is_none() { NO_MOVE } else { best_move },
            depth,
            bound,
            value,
            age,
        };

        let mut line = self.lines[idx].lock();

        // Prefer updating an existing entry for this exact position.
        if let Some(slot) = line.entries.iter_mut().find(|e| e.signature == signature) {
            if depth >= slot.depth || slot.age != age {
                let keep_move = if new_entry.best_move.is_none() {
                    slot.best_move
                } else {
                    new_entry.best_move
                };
                *slot = Entry {
                    best_move: keep_move,
                    ..new_entry
                };
            }
            return;
        }

        // Slot 0: depth-preferred. Only displaced by an at-least-as-deep
        // result, or by a result from a stale (previous) search.
        if line.entries[0].age != age || depth >= line.entries[0].depth {
            let displaced = line.entries[0];
            line.entries[0] = new_entry;
            if displaced.depth >= 0 {
                insert_second_chance(&mut line.entries, displaced);
            }
            return;
        }

        // Slot 1: always-replace.
        line.entries[1] = new_entry;
    }

    #[must_use]
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }
}

/// Gives a depth-preferred entry displaced from slot 0 a second chance in
/// slots 2/3 rather than discarding it outright, before it is finally
/// evicted on the next displacement from those slots.
fn insert_second_chance(entries: &mut [Entry; LINE_SIZE], displaced: Entry) {
    if entries[2].depth < 0 {
        entries[2] = displaced;
    } else if entries[3].depth < 0 {
        entries[3] = displaced;
    } else if displaced.depth >= entries[2].depth.min(entries[3].depth) {
        if entries[2].depth <= entries[3].depth {
            entries[2] = displaced;
        } else {
            entries[3] = displaced;
        }
    }
}
