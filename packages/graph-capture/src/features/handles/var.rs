//! Variable handles
//!
//! A `Var` is a named slot bound to the value it currently holds. Assigning
//! to it is always an explicit call:
//!
//! ```rust,ignore
//! let x = builder.define("x")?;
//! x.assign(&input)?;                  // x = input
//! x.assign_from("add_one", &[&x])?;   // x = add_one(x)
//! ```

use crate::config::AssignPolicy;
use crate::errors::{CaptureError, CaptureResult};
use crate::features::session::{borrow_program, SharedProgram};
use crate::shared::models::{Identifier, NodeId};
use std::cell::RefCell;
use std::rc::Rc;

/// Handle to one variable of a program
#[derive(Debug, Clone)]
pub struct Var {
    program: SharedProgram,
    /// Explicit name, or None for an anonymous variable
    name: Option<Identifier>,
    /// Identifier this variable reads; a named variable reads its own name
    current: RefCell<Option<Identifier>>,
}

impl Var {
    pub(crate) fn named(program: SharedProgram, name: Identifier) -> Self {
        Self {
            program,
            name: Some(name),
            current: RefCell::new(None),
        }
    }

    pub(crate) fn anonymous(program: SharedProgram) -> Self {
        Self {
            program,
            name: None,
            current: RefCell::new(None),
        }
    }

    pub(crate) fn bound(program: SharedProgram, name: Option<Identifier>, value: Identifier) -> Self {
        Self {
            program,
            name,
            current: RefCell::new(Some(value)),
        }
    }

    /// Explicit name; None for anonymous variables
    pub fn name(&self) -> Option<&Identifier> {
        self.name.as_ref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    pub fn is_bound(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn program(&self) -> &SharedProgram {
        &self.program
    }

    /// Identifier a consumer of this variable reads
    ///
    /// An unbound named variable reads its own name, which only resolves if
    /// something defined it (otherwise commit reports `UndefinedValue`).
    pub fn value(&self) -> CaptureResult<Identifier> {
        if let Some(current) = self.current.borrow().as_ref() {
            return Ok(current.clone());
        }
        self.name.clone().ok_or(CaptureError::UnboundVariable)
    }

    fn label(&self) -> &str {
        self.name.as_ref().map_or("<anonymous>", Identifier::as_str)
    }

    /// Identifier this variable writes on assignment
    pub(crate) fn output_slot(&self, node: &NodeId, position: usize) -> Identifier {
        match &self.name {
            Some(name) => name.clone(),
            None => Identifier::result_of(node, position),
        }
    }

    pub(crate) fn bind(&self, value: Identifier) {
        *self.current.borrow_mut() = Some(value);
    }

    pub(crate) fn ensure_same_program(&self, program: &SharedProgram) -> CaptureResult<()> {
        if !Rc::ptr_eq(&self.program, program) {
            return Err(CaptureError::invalid_scope(format!(
                "variable '{}' belongs to another program",
                self.label()
            )));
        }
        Ok(())
    }

    /// `self = operator_class(inputs...)`
    pub fn assign_from(&self, operator_class: &str, inputs: &[&Var]) -> CaptureResult<NodeId> {
        let inputs = values_of(&self.program, inputs)?;
        let mut program = borrow_program(&self.program)?;
        let output = self.output_slot(&program.next_node_id(operator_class), 0);
        let id = program.commit(operator_class, &inputs, std::slice::from_ref(&output))?;
        drop(program);
        self.bind(output);
        Ok(id)
    }

    /// `self = source`, recorded per the session's assign policy
    ///
    /// Under `CopyPropagate` no record is made and `self` keeps reading the
    /// value `source` holds now. Returns the identity node id when the
    /// policy materializes one.
    pub fn assign(&self, source: &Var) -> CaptureResult<Option<NodeId>> {
        source.ensure_same_program(&self.program)?;

        let (policy, identity_operator) = {
            let program = self
                .program
                .try_borrow()
                .map_err(|_| CaptureError::ProgramBusy)?;
            let config = program.config();
            (config.assign_policy, config.identity_operator.clone())
        };
        match policy {
            AssignPolicy::CopyPropagate => {
                let value = source.value()?;
                let mut program = borrow_program(&self.program)?;
                let bound = match &self.name {
                    Some(name) => {
                        program.alias(name, &value)?;
                        name.clone()
                    }
                    None => program.pin(&value)?,
                };
                drop(program);
                self.bind(bound);
                Ok(None)
            }
            AssignPolicy::MaterializeIdentity => {
                self.assign_from(&identity_operator, &[source]).map(Some)
            }
        }
    }
}

/// Identifiers read by `inputs`, all of which must belong to `program`
pub(crate) fn values_of(program: &SharedProgram, inputs: &[&Var]) -> CaptureResult<Vec<Identifier>> {
    inputs
        .iter()
        .map(|var| {
            var.ensure_same_program(program)?;
            var.value()
        })
        .collect()
}
