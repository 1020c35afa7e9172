//! Writing the canonical JSON form.
//!
//! Stats are a cache and are never exported. Excluded colors are dropped from
//! `paths_by_color` only; passes still name them.

use super::Job;
use crate::geometry::Path;
use crate::pass::Pass;
use crate::raster::Raster;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Serialize)]
struct JobDocumentRef<'a> {
    passes: &'a [Pass],
    paths_by_color: IndexMap<&'a str, &'a [Path]>,
    rasters: &'a [Raster],
}

impl Job {
    /// Serialize the job, leaving out the colors in `exclude_colors`
    pub fn to_json(&self, exclude_colors: Option<&HashSet<String>>) -> serde_json::Result<String> {
        let paths_by_color = self
            .paths_by_color
            .iter()
            .filter(|(color, _)| exclude_colors.is_none_or(|ex| !ex.contains(*color)))
            .map(|(color, paths)| (color.as_str(), paths.as_slice()))
            .collect();

        let doc = JobDocumentRef {
            passes: &self.passes,
            paths_by_color,
            rasters: &self.rasters,
        };
        serde_json::to_string(&doc)
    }
}
