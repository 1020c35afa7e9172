//! Pass list mutation.

use super::Job;
use crate::lasertags::{passes_from_lasertags, TagField};
use crate::pass::Pass;
use indexmap::IndexSet;
use lasaurkit_core::MessageSink;

impl Job {
    /// Append a pass
    pub fn add_pass(&mut self, pass: Pass) {
        self.passes.push(pass);
    }

    /// Replace all passes with the ones described by lasertag rows.
    /// Malformed rows are reported to `sink` and skipped.
    pub fn set_passes_from_lasertags<R>(&mut self, lasertags: &[R], sink: &mut dyn MessageSink)
    where
        R: AsRef<[TagField]>,
    {
        self.passes = passes_from_lasertags(lasertags, sink);
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn has_passes(&self) -> bool {
        !self.passes.is_empty()
    }

    pub fn clear_passes(&mut self) {
        self.passes.clear();
    }

    /// Every color referenced by any pass, first reference first
    pub fn passes_colors(&self) -> IndexSet<String> {
        self.passes
            .iter()
            .flat_map(|pass| pass.colors.iter().cloned())
            .collect()
    }
}
