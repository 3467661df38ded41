/*
 * GraphBuilder - handle factory for one program
 *
 * Creates variables and placeholders, and commits multi-output operations
 * whose results land in several variables at once. Every call goes to the
 * program the builder was created for; there is no hidden global target.
 */

use crate::errors::{CaptureError, CaptureResult};
use crate::features::graph::Graph;
use crate::features::handles::var::{values_of, Var};
use crate::features::session::{borrow_program, Context, SharedProgram};
use crate::shared::models::{Identifier, NodeId};
use std::rc::Rc;
use tracing::debug;

/// Records into one program through variable handles
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    program: SharedProgram,
}

impl GraphBuilder {
    pub fn new(program: SharedProgram) -> Self {
        Self { program }
    }

    /// Builder for the program on top of `context`
    pub fn current(context: &Context) -> CaptureResult<Self> {
        context.current().map(Self::new)
    }

    pub fn program(&self) -> &SharedProgram {
        &self.program
    }

    /// Declare a variable
    ///
    /// The internal sentinel yields an anonymous variable; any other name is
    /// registered and must be unique within the program.
    pub fn define(&self, name: &str) -> CaptureResult<Var> {
        let mut program = borrow_program(&self.program)?;
        if program.is_sentinel(name) {
            return Ok(Var::anonymous(Rc::clone(&self.program)));
        }
        program.register_name(name)?;
        Ok(Var::named(Rc::clone(&self.program), Identifier::explicit(name)))
    }

    /// Declare an unnamed temporary
    pub fn define_anonymous(&self) -> Var {
        Var::anonymous(Rc::clone(&self.program))
    }

    /// Declare a root input
    pub fn placeholder(&self, name: &str) -> CaptureResult<Var> {
        let value = borrow_program(&self.program)?.register_placeholder(name)?;
        Ok(Var::bound(Rc::clone(&self.program), Some(value.clone()), value))
    }

    /// `operator_class(inputs...)` into a fresh anonymous variable
    pub fn apply(&self, operator_class: &str, inputs: &[&Var]) -> CaptureResult<Var> {
        let result = self.define_anonymous();
        result.assign_from(operator_class, inputs)?;
        Ok(result)
    }

    /// One record whose outputs go to `outputs`, in order
    ///
    /// Named variables write their own name; anonymous ones receive
    /// generated identifiers `"{node}:{position}"`.
    pub fn commit_multi(
        &self,
        operator_class: &str,
        inputs: &[&Var],
        outputs: &[&Var],
    ) -> CaptureResult<NodeId> {
        let inputs = values_of(&self.program, inputs)?;
        for output in outputs {
            output.ensure_same_program(&self.program)?;
        }

        let mut program = borrow_program(&self.program)?;
        let next = program.next_node_id(operator_class);
        let slots: Vec<Identifier> = outputs
            .iter()
            .enumerate()
            .map(|(position, var)| var.output_slot(&next, position))
            .collect();
        let id = program.commit(operator_class, &inputs, &slots)?;
        drop(program);

        for (var, slot) in outputs.iter().zip(slots) {
            var.bind(slot);
        }
        Ok(id)
    }

    /// Snapshot graph of the program so far
    pub fn graph(&self) -> CaptureResult<Graph> {
        let program = self
            .program
            .try_borrow()
            .map_err(|_| CaptureError::ProgramBusy)?;
        Ok(program.graph())
    }

    /// Final graph; the program accepts no further recording
    pub fn finalize(&self) -> CaptureResult<Graph> {
        let graph = borrow_program(&self.program)?.finalize();
        debug!(nodes = graph.node_count(), "program finalized");
        Ok(graph)
    }
}

/// Run `build` with `program` as the current program of `context`
///
/// The scope ends on every exit path, including errors returned by `build`.
pub fn capture<R>(
    context: &Context,
    program: SharedProgram,
    build: impl FnOnce(&GraphBuilder) -> CaptureResult<R>,
) -> CaptureResult<R> {
    let scope = context.scoped(Rc::clone(&program))?;
    let builder = GraphBuilder::new(program);
    let result = build(&builder);
    scope.release()?;
    result
}
