/*
 * Context - stack of active programs
 *
 * Decides which Program receives commits from code that does not pass one
 * explicitly. Scopes nest strictly (LIFO).
 *
 * A Context is a plain value: pass it where it is needed, or use the
 * per-thread instance through `Context::with_thread_local`. Nothing is
 * shared across threads.
 */

use crate::errors::{CaptureError, CaptureResult};
use crate::features::session::program::{borrow_program, Program, SharedProgram};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{trace, warn};

thread_local! {
    static THREAD_CONTEXT: Context = Context::new();
}

/// Stack of active build sessions
#[derive(Debug, Default)]
pub struct Context {
    stack: RefCell<Vec<SharedProgram>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with this thread's context
    pub fn with_thread_local<R>(f: impl FnOnce(&Context) -> R) -> R {
        THREAD_CONTEXT.with(f)
    }

    /// Push a program; `None` stands for an absent program and is rejected
    pub fn push(&self, program: Option<SharedProgram>) -> CaptureResult<()> {
        let program = program
            .ok_or_else(|| CaptureError::invalid_scope("Cannot push null program to context"))?;
        self.stack.borrow_mut().push(program);
        trace!(depth = self.depth(), "scope push");
        Ok(())
    }

    /// Remove and return the top program
    pub fn pop(&self) -> CaptureResult<SharedProgram> {
        let program = self
            .stack
            .borrow_mut()
            .pop()
            .ok_or_else(|| CaptureError::invalid_scope("Cannot pop from empty program stack"))?;
        trace!(depth = self.depth(), "scope pop");
        Ok(program)
    }

    /// Top of the stack
    pub fn current(&self) -> CaptureResult<SharedProgram> {
        self.stack
            .borrow()
            .last()
            .cloned()
            .ok_or(CaptureError::NoActiveScope)
    }

    /// Run `f` against the current program
    pub fn with_current<R>(
        &self,
        f: impl FnOnce(&mut Program) -> CaptureResult<R>,
    ) -> CaptureResult<R> {
        let program = self.current()?;
        let mut guard = borrow_program(&program)?;
        f(&mut guard)
    }

    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.borrow().is_empty()
    }

    /// Make `program` current until the returned guard is dropped or released
    pub fn scoped(&self, program: SharedProgram) -> CaptureResult<ScopeGuard<'_>> {
        self.push(Some(Rc::clone(&program)))?;
        Ok(ScopeGuard {
            context: self,
            program: Some(program),
        })
    }

    /// Pop only if `program` is on top
    fn pop_expected(&self, program: &SharedProgram) -> CaptureResult<()> {
        let on_top = self
            .stack
            .borrow()
            .last()
            .map_or(false, |top| Rc::ptr_eq(top, program));
        if !on_top {
            return Err(CaptureError::invalid_scope(
                "scope guard released out of order: its program is not on top of the stack",
            ));
        }
        self.pop().map(|_| ())
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        let depth = self.stack.get_mut().len();
        if depth > 0 {
            warn!(depth, "context dropped with active programs");
        }
    }
}

/// Keeps a program current for its lifetime
///
/// Pops on every exit path. A released guard does nothing on drop.
#[must_use = "dropping the guard immediately ends the scope"]
#[derive(Debug)]
pub struct ScopeGuard<'a> {
    context: &'a Context,
    /// None once released
    program: Option<SharedProgram>,
}

impl<'a> ScopeGuard<'a> {
    /// Program this guard keeps current
    pub fn program(&self) -> Option<&SharedProgram> {
        self.program.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.program.is_some()
    }

    /// End the scope now and report misuse instead of logging it
    pub fn release(mut self) -> CaptureResult<()> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> CaptureResult<()> {
        match self.program.take() {
            Some(program) => self.context.pop_expected(&program),
            None => Ok(()),
        }
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.release_inner() {
            warn!(error = %err, "scope guard could not pop its program");
        }
    }
}
