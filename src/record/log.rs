use crate::record::instruction::Instruction;

/// Records between two page boundaries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    records: Vec<Instruction>,
}

impl Page {
    /// Records in insertion order.
    pub fn records(&self) -> &[Instruction] {
        &self.records
    }

    /// Return `true` when the page holds no record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records on the page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return `true` when the page opens with an explicit `NewPage` record.
    pub fn has_boundary(&self) -> bool {
        matches!(self.records.first(), Some(Instruction::NewPage { .. }))
    }
}

/// Ordered, append-only sequence of pages.
///
/// There is always at least one (possibly empty) page open for recording. Replay order is
/// insertion order: records within a page, pages in creation order.
#[derive(Clone, Debug, PartialEq)]
pub struct InstructionLog {
    pages: Vec<Page>,
}

impl Default for InstructionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionLog {
    /// A log with a single empty page.
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
        }
    }

    /// Append to the open page.
    pub fn record(&mut self, instruction: Instruction) {
        self.open_page().records.push(instruction);
    }

    /// Open a page whose first record is `boundary`.
    ///
    /// A still-empty trailing page is reused, so the first boundary of a fresh log lands on the
    /// implicit first page.
    pub fn begin_page(&mut self, boundary: Instruction) {
        debug_assert!(matches!(boundary, Instruction::NewPage { .. }));
        if !self.open_page().is_empty() {
            self.pages.push(Page::default());
        }
        self.open_page().records.push(boundary);
    }

    /// Discard every page and open one empty page.
    pub fn reset(&mut self) {
        self.pages.clear();
        self.pages.push(Page::default());
    }

    /// All pages, including a trailing empty one.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages holding at least one record.
    pub fn page_count(&self) -> usize {
        self.pages.iter().filter(|p| !p.is_empty()).count()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Return `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Page::is_empty)
    }

    /// Iterate every record in replay order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.pages.iter().flat_map(|p| p.records.iter())
    }

    fn open_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/log.rs"]
mod tests;
