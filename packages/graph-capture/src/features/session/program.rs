/*
 * Program - one build session
 *
 * Naming authority and commit funnel:
 * - explicit names are unique for the lifetime of the session
 * - every operation application lands here as one OperationRecord
 * - graph() snapshots the IR and runs DCE without touching live state
 */

use crate::config::CaptureConfig;
use crate::errors::{CaptureError, CaptureResult};
use crate::features::graph::Graph;
use crate::features::ir::IntermediateRepresentation;
use crate::shared::models::{Identifier, NodeId};
use std::cell::{RefCell, RefMut};
use std::collections::HashSet;
use std::rc::Rc;
use tracing::debug;

/// Program shared between a `Context` stack and the handles recording into it
pub type SharedProgram = Rc<RefCell<Program>>;

/// Mutable borrow of a shared program, without panicking on re-entrancy
pub fn borrow_program(program: &SharedProgram) -> CaptureResult<RefMut<'_, Program>> {
    program
        .try_borrow_mut()
        .map_err(|_| CaptureError::ProgramBusy)
}

/// Named build session
#[derive(Debug, Clone)]
pub struct Program {
    name: String,
    config: CaptureConfig,
    ir: IntermediateRepresentation,
    names: HashSet<String>,
    finalized: bool,
}

impl Program {
    /// Session with the default configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: CaptureConfig::default(),
            ir: IntermediateRepresentation::new(),
            names: HashSet::new(),
            finalized: false,
        }
    }

    pub fn with_config(name: impl Into<String>, config: CaptureConfig) -> CaptureResult<Self> {
        config.validate()?;
        let mut program = Self::new(name);
        program.config = config;
        Ok(program)
    }

    /// Wrap for use with `Context` and handles
    pub fn into_shared(self) -> SharedProgram {
        Rc::new(RefCell::new(self))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn ir(&self) -> &IntermediateRepresentation {
        &self.ir
    }

    /// Records committed so far, dead ones included
    pub fn node_count(&self) -> usize {
        self.ir.len()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn is_sentinel(&self, name: &str) -> bool {
        name == self.config.internal_sentinel
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn ensure_open(&self) -> CaptureResult<()> {
        if self.finalized {
            return Err(CaptureError::AlreadyFinalized {
                program: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Claim an explicit name for this session
    ///
    /// The internal sentinel is accepted any number of times and never stored.
    pub fn register_name(&mut self, name: &str) -> CaptureResult<()> {
        self.ensure_open()?;
        if self.is_sentinel(name) {
            return Ok(());
        }
        if self.names.contains(name) {
            return Err(CaptureError::DuplicateName(name.to_string()));
        }
        self.names.insert(name.to_string());
        Ok(())
    }

    /// Declare a root input
    pub fn register_placeholder(&mut self, name: &str) -> CaptureResult<Identifier> {
        if self.is_sentinel(name) {
            return Err(CaptureError::ReservedName(name.to_string()));
        }
        self.register_name(name)?;
        let placeholder = Identifier::explicit(name);
        self.ir.add_placeholder(placeholder.clone());
        Ok(placeholder)
    }

    /// Id the next committed record of `operator_class` will receive
    pub fn next_node_id(&self, operator_class: &str) -> NodeId {
        self.ir.next_node_id(operator_class)
    }

    /// Append one operation record
    ///
    /// Each output's previous definition is shadowed; the earlier record
    /// stays in the log and is dropped by DCE if nothing consumed it.
    pub fn commit(
        &mut self,
        operator_class: &str,
        inputs: &[Identifier],
        outputs: &[Identifier],
    ) -> CaptureResult<NodeId> {
        self.ensure_open()?;
        self.ir.append(
            operator_class,
            inputs.to_vec(),
            outputs.to_vec(),
            self.config.strict_inputs,
        )
    }

    /// Multi-output commit by output name
    ///
    /// Names equal to the internal sentinel become generated internal
    /// identifiers `"{node}:{position}"`. Returns the node id and the
    /// identifiers actually recorded, in order.
    pub fn commit_multi(
        &mut self,
        operator_class: &str,
        inputs: &[Identifier],
        output_names: &[&str],
    ) -> CaptureResult<(NodeId, Vec<Identifier>)> {
        let next = self.next_node_id(operator_class);
        let outputs: Vec<Identifier> = output_names
            .iter()
            .enumerate()
            .map(|(position, name)| {
                if self.is_sentinel(name) {
                    Identifier::result_of(&next, position)
                } else {
                    Identifier::explicit(*name)
                }
            })
            .collect();
        let id = self.commit(operator_class, inputs, &outputs)?;
        Ok((id, outputs))
    }

    /// Commit with `arity` generated internal outputs
    pub fn commit_unnamed(
        &mut self,
        operator_class: &str,
        inputs: &[Identifier],
        arity: usize,
    ) -> CaptureResult<(NodeId, Vec<Identifier>)> {
        let next = self.next_node_id(operator_class);
        let outputs: Vec<Identifier> = (0..arity)
            .map(|position| Identifier::result_of(&next, position))
            .collect();
        let id = self.commit(operator_class, inputs, &outputs)?;
        Ok((id, outputs))
    }

    /// Copy-propagate `source` into `name` without a record
    ///
    /// `name` reads what `source` reads at this point, even if `source` is
    /// redefined later.
    pub fn alias(&mut self, name: &Identifier, source: &Identifier) -> CaptureResult<()> {
        self.ensure_open()?;
        self.ir
            .alias(name.clone(), source, self.config.strict_inputs)
    }

    /// Internal identifier fixed to the current value of `source`
    pub fn pin(&mut self, source: &Identifier) -> CaptureResult<Identifier> {
        self.ensure_open()?;
        self.ir.pin(source, self.config.strict_inputs)
    }

    /// DCE over an independent snapshot; repeatable, recording may continue
    pub fn graph(&self) -> Graph {
        let graph = self.ir.to_graph();
        debug!(
            program = %self.name,
            nodes = graph.node_count(),
            eliminated = graph.eliminated_count(),
            "graph snapshot"
        );
        graph
    }

    /// Final graph; later commits and registrations fail
    pub fn finalize(&mut self) -> Graph {
        self.finalized = true;
        self.graph()
    }
}
