/*
 * Intermediate Representation
 *
 * Append-only log of every recorded operation, including ones that later
 * turn out dead. Each input is bound to the record that defined it when it
 * was consumed, so a later redefinition never rewires an earlier consumer.
 *
 * Copies (`b = a` without a record) resolve `a` at copy time: `last_def[b]`
 * becomes `a`'s producer, and a later read of `b` is recorded as the value
 * `a` held then, bound to that producer.
 *
 * Roots for DCE:
 * - placeholders
 * - every explicit identifier, through its final binding (last writer wins)
 */

use crate::errors::{CaptureError, CaptureResult};
use crate::features::graph::Graph;
use crate::features::ir::infrastructure::dce::{LivenessAnalysis, LivenessInput};
use crate::shared::models::{Identifier, NodeId, OperationRecord};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, trace};

/// One record plus its resolved input producers
#[derive(Debug, Clone)]
struct RecordEntry {
    record: OperationRecord,
    /// Parallel to `record.inputs`; None for placeholders and free inputs
    sources: Vec<Option<usize>>,
    /// Set once, by DCE on a snapshot
    live: bool,
}

/// What a name reads: a concrete value and the record that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    value: Identifier,
    producer: Option<usize>,
}

/// Mutable recording state of one session
#[derive(Debug, Clone, Default)]
pub struct IntermediateRepresentation {
    records: Vec<RecordEntry>,
    /// Identifier -> index of the record defining it. For a record output
    /// that record produced it; for a copy it produced the copied value.
    last_def: HashMap<Identifier, usize>,
    placeholders: BTreeSet<Identifier>,
    /// Copied names, resolved at copy time. Dropped once a record writes the name.
    copies: HashMap<Identifier, Binding>,
    /// Counter for pinned internal copies
    pins: usize,
}

impl IntermediateRepresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records, dead ones included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &OperationRecord> {
        self.records.iter().map(|entry| &entry.record)
    }

    pub fn placeholders(&self) -> &BTreeSet<Identifier> {
        &self.placeholders
    }

    pub fn is_placeholder(&self, value: &Identifier) -> bool {
        self.placeholders.contains(value)
    }

    /// Index of the record currently defining `value`
    pub fn last_def(&self, value: &Identifier) -> Option<usize> {
        self.last_def.get(value).copied()
    }

    /// True if `value` is a copy made without a record
    pub fn is_copy(&self, value: &Identifier) -> bool {
        self.copies.contains_key(value)
    }

    /// True if `value` can be consumed right now
    pub fn is_defined(&self, value: &Identifier) -> bool {
        self.copies.contains_key(value)
            || self.last_def.contains_key(value)
            || self.placeholders.contains(value)
    }

    /// Id the next appended record of `operator_class` will receive
    pub fn next_node_id(&self, operator_class: &str) -> NodeId {
        NodeId::new(operator_class, self.records.len())
    }

    pub fn add_placeholder(&mut self, name: Identifier) {
        trace!(placeholder = %name, "placeholder declared");
        self.placeholders.insert(name);
    }

    fn resolve(&self, value: &Identifier) -> Binding {
        match self.copies.get(value) {
            Some(binding) => binding.clone(),
            None => Binding {
                value: value.clone(),
                producer: self.last_def.get(value).copied(),
            },
        }
    }

    fn ensure_defined(&self, value: &Identifier, operator_class: &str, strict: bool) -> CaptureResult<()> {
        if strict && !self.is_defined(value) {
            return Err(CaptureError::UndefinedValue {
                value: value.to_string(),
                operator_class: operator_class.to_string(),
            });
        }
        Ok(())
    }

    /// Append one record
    ///
    /// Validation happens before any mutation: on error the IR is unchanged.
    /// Copied inputs are recorded as the value they were copied from.
    pub fn append(
        &mut self,
        operator_class: &str,
        inputs: Vec<Identifier>,
        outputs: Vec<Identifier>,
        strict_inputs: bool,
    ) -> CaptureResult<NodeId> {
        if outputs.is_empty() {
            return Err(CaptureError::EmptyOutputs(operator_class.to_string()));
        }
        let mut seen = HashSet::with_capacity(outputs.len());
        for output in &outputs {
            if !seen.insert(output) {
                return Err(CaptureError::DuplicateOutput {
                    operator_class: operator_class.to_string(),
                    value: output.to_string(),
                });
            }
        }

        let mut resolved = Vec::with_capacity(inputs.len());
        let mut sources = Vec::with_capacity(inputs.len());
        for input in &inputs {
            self.ensure_defined(input, operator_class, strict_inputs)?;
            let binding = self.resolve(input);
            resolved.push(binding.value);
            sources.push(binding.producer);
        }

        let index = self.records.len();
        let id = NodeId::new(operator_class, index);
        for output in &outputs {
            self.last_def.insert(output.clone(), index);
            self.copies.remove(output);
        }
        trace!(node = %id, inputs = resolved.len(), outputs = outputs.len(), "record appended");

        self.records.push(RecordEntry {
            record: OperationRecord {
                id: id.clone(),
                operator_class: operator_class.to_string(),
                inputs: resolved,
                outputs,
            },
            sources,
            live: false,
        });
        Ok(id)
    }

    /// `name = source` without a record
    ///
    /// `source` is resolved now; redefining it later does not affect `name`.
    pub fn alias(&mut self, name: Identifier, source: &Identifier, strict_inputs: bool) -> CaptureResult<()> {
        self.ensure_defined(source, "<alias>", strict_inputs)?;
        let binding = self.resolve(source);
        match binding.producer {
            Some(idx) => {
                self.last_def.insert(name.clone(), idx);
            }
            // Copy of a placeholder or free value: no record defines it
            None => {
                self.last_def.remove(&name);
            }
        }
        trace!(alias = %name, source = %binding.value, "alias recorded");
        self.copies.insert(name, binding);
        Ok(())
    }

    /// Fresh internal identifier reading what `source` reads now
    ///
    /// Generated record outputs never change, so they are returned as is.
    pub fn pin(&mut self, source: &Identifier, strict_inputs: bool) -> CaptureResult<Identifier> {
        self.ensure_defined(source, "<pin>", strict_inputs)?;
        if source.is_internal() && !self.copies.contains_key(source) {
            return Ok(source.clone());
        }
        let pinned = Identifier::internal(format!("copy:{}", self.pins));
        self.pins += 1;
        self.alias(pinned.clone(), source, strict_inputs)?;
        Ok(pinned)
    }

    /// Final binding of every explicit identifier
    fn root_records(&self) -> Vec<usize> {
        self.last_def
            .iter()
            .filter(|(value, _)| value.is_explicit())
            .map(|(_, idx)| *idx)
            .collect()
    }

    fn root_vars(&self) -> Vec<Identifier> {
        self.last_def
            .keys()
            .chain(self.copies.keys())
            .filter(|value| value.is_explicit())
            .chain(self.placeholders.iter())
            .cloned()
            .collect()
    }

    /// Flag live records in place
    fn mark_live(&mut self) {
        let result = {
            let inputs = self
                .records
                .iter()
                .map(|entry| LivenessInput {
                    inputs: &entry.record.inputs,
                    sources: &entry.sources,
                })
                .collect();
            LivenessAnalysis::new(inputs).run(self.root_records(), self.root_vars())
        };

        debug!(
            records = self.records.len(),
            live = result.live_count(),
            dead = self.records.len() - result.live_count(),
            passes = result.passes,
            "dead code elimination finished"
        );

        for (entry, live) in self.records.iter_mut().zip(result.live) {
            entry.live = live;
        }
    }

    /// Run DCE on an independent snapshot; `self` is not modified
    pub fn to_graph(&self) -> Graph {
        let mut snapshot = self.clone();
        snapshot.mark_live();
        snapshot.into_graph()
    }

    fn into_graph(self) -> Graph {
        let total = self.records.len();
        let mut remap: Vec<Option<usize>> = vec![None; total];
        let mut nodes = Vec::new();
        let mut sources = Vec::new();

        for (old_idx, entry) in self.records.into_iter().enumerate() {
            if !entry.live {
                continue;
            }
            remap[old_idx] = Some(nodes.len());
            // Producers of live records are live and earlier, so already remapped
            sources.push(
                entry
                    .sources
                    .iter()
                    .map(|source| source.and_then(|idx| remap[idx]))
                    .collect(),
            );
            nodes.push(entry.record);
        }

        let eliminated = total - nodes.len();
        Graph::from_parts(nodes, sources, self.placeholders, eliminated)
    }
}
