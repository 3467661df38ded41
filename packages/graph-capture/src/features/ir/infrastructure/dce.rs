/*
 * Dead Code Elimination - backward liveness fixpoint
 *
 * Input: per record, the record index that defined each input at the time
 * it was consumed (None for placeholders), plus the seed set of root
 * records and root values.
 *
 * Algorithm:
 * 1. live_nodes := root records, live_vars := root values
 * 2. Scan records in reverse order; for a live record, mark each input
 *    value live and mark its defining record live
 * 3. Repeat full reverse passes until one adds nothing
 *
 * Cost: O(R * (R + E)) worst case for R records and E input references.
 */

use crate::shared::models::Identifier;
use std::collections::HashSet;

/// Borrowed view of one record for the liveness pass
pub struct LivenessInput<'a> {
    pub inputs: &'a [Identifier],
    /// Defining record per input, parallel to `inputs`
    pub sources: &'a [Option<usize>],
}

/// Liveness result
#[derive(Debug, Clone)]
pub struct LivenessResult {
    /// `live[i]` is true iff record `i` survives
    pub live: Vec<bool>,

    /// Every value that some live record (or the caller) needs
    pub live_vars: HashSet<Identifier>,

    /// Number of full reverse passes, including the final quiet one
    pub passes: usize,
}

impl LivenessResult {
    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|live| **live).count()
    }
}

/// Backward liveness over an append-only record log
pub struct LivenessAnalysis<'a> {
    records: Vec<LivenessInput<'a>>,
}

impl<'a> LivenessAnalysis<'a> {
    pub fn new(records: Vec<LivenessInput<'a>>) -> Self {
        Self { records }
    }

    /// Run the fixpoint from the given roots
    ///
    /// Root record indices out of range are ignored.
    pub fn run(
        &self,
        root_records: impl IntoIterator<Item = usize>,
        root_vars: impl IntoIterator<Item = Identifier>,
    ) -> LivenessResult {
        let mut live = vec![false; self.records.len()];
        for idx in root_records {
            if let Some(slot) = live.get_mut(idx) {
                *slot = true;
            }
        }
        let mut live_vars: HashSet<Identifier> = root_vars.into_iter().collect();

        let mut passes = 0;
        loop {
            passes += 1;
            let mut changed = false;

            for i in (0..self.records.len()).rev() {
                if !live[i] {
                    continue;
                }
                let record = &self.records[i];
                for (input, source) in record.inputs.iter().zip(record.sources) {
                    if !live_vars.contains(input) {
                        live_vars.insert(input.clone());
                        changed = true;
                    }
                    if let Some(def) = *source {
                        if !live[def] {
                            live[def] = true;
                            changed = true;
                        }
                    }
                }
            }

            if !changed {
                break;
            }
        }

        LivenessResult {
            live,
            live_vars,
            passes,
        }
    }
}
