use log::debug;

use crate::journal::{HeaderRecord, Journal, JournalLine};

/// The JDT and OJDT row sequences of one journal, in output order.
#[derive(Debug)]
pub struct Batch<'j> {
    pub jdt: Vec<&'j JournalLine>,
    pub ojdt: Vec<&'j HeaderRecord>,
}

impl<'j> Batch<'j> {
    /// Orders a journal's lines and headers for output.
    ///
    /// JDT lines are grouped by role across the whole batch rather than by
    /// group: all primary debits, then each credit role in turn, then the
    /// additional-fee debits and credits. Within a role, lines keep row
    /// order. The downstream importer depends on this layout.
    ///
    /// OJDT headers are the primary groups' in row order, followed by the
    /// additional-fee groups' in the order they were found.
    pub fn assemble(journal: &'j Journal) -> Self {
        let mut jdt: Vec<&JournalLine> = journal.groups().flat_map(|g| g.lines.iter()).collect();
        // Stable, so row order is kept within each role.
        jdt.sort_by_key(|line| line.role);

        let ojdt: Vec<&HeaderRecord> = journal.groups().map(|g| &g.header).collect();

        debug!(
            "assembled {} batch: {} JDT lines, {} OJDT headers",
            journal.format,
            jdt.len(),
            ojdt.len()
        );
        Batch { jdt, ojdt }
    }
}
