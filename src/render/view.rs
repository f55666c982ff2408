//! Live view: the log is kept and re-walked on every redraw.
//!
//! Each `save` opens a [`Backend::scoped`] block and recurses; the matching `restore` returns to
//! the caller, so backend state is always restored by the scope primitive itself.

use std::slice;

use crate::foundation::core::Canvas;
use crate::foundation::error::{SketchError, SketchResult};
use crate::record::instruction::Instruction;
use crate::record::log::{InstructionLog, Page};
use crate::render::backend::Backend;
use crate::render::replay::Machine;

/// A drawing bound to a host backend that can be redrawn on demand.
#[derive(Debug)]
pub struct ViewContext<B: Backend> {
    pages: Vec<Page>,
    leading: Canvas,
    backend: B,
    redraws: u64,
}

impl<B: Backend> ViewContext<B> {
    /// Snapshot `log` for later redraws into `backend`.
    pub fn new(backend: B, log: &InstructionLog, leading: Canvas) -> Self {
        Self {
            pages: log.pages().iter().filter(|p| !p.is_empty()).cloned().collect(),
            leading,
            backend,
            redraws: 0,
        }
    }

    /// Walk every page from fresh state.
    #[tracing::instrument(skip(self), fields(pages = self.pages.len()))]
    pub fn redraw(&mut self) -> SketchResult<()> {
        let mut machine = Machine::new();
        let synthesize = self.pages.first().is_none_or(|p| !p.has_boundary());
        if synthesize {
            machine.apply(
                &mut self.backend,
                &Instruction::NewPage {
                    canvas: self.leading,
                },
            )?;
        }
        let last = self.pages.len().saturating_sub(1);
        for (index, page) in self.pages.iter().enumerate() {
            let mut records = page.records().iter();
            execute_nested(&mut machine, &mut self.backend, &mut records, 0, index < last)?;
        }
        machine.finish_page(&mut self.backend)?;
        self.redraws += 1;
        Ok(())
    }

    /// Number of completed redraws.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Size of the synthesized first page.
    pub fn leading_canvas(&self) -> Canvas {
        self.leading
    }

    /// Snapshotted pages.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The bound backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The bound backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Release the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

/// Run `records` until the end of the page or the `restore` closing this scope.
///
/// A scope still open at the end of the page is an error when `more_pages` is set, since the
/// next record is a `newPage`. On the final page it is unwound with a warning.
pub(crate) fn execute_nested<B: Backend>(
    machine: &mut Machine,
    backend: &mut B,
    records: &mut slice::Iter<'_, Instruction>,
    depth: usize,
    more_pages: bool,
) -> SketchResult<()> {
    while let Some(instruction) = records.next() {
        match instruction {
            Instruction::Save => {
                machine.push_state()?;
                backend.scoped(|b| execute_nested(machine, b, records, depth + 1, more_pages))?;
            }
            Instruction::Restore => {
                machine.pop_state()?;
                return Ok(());
            }
            other => machine.apply(backend, other)?,
        }
    }
    if depth > 0 && more_pages {
        return Err(SketchError::usage(format!(
            "newPage while {} saved state(s) are still open",
            machine.depth()
        )));
    }
    if depth > 0 {
        tracing::warn!(depth, "page ended with unbalanced save()");
        machine.pop_state()?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/view.rs"]
mod tests;
