//! The job model: paths by color, rasters, passes and cached stats.
//!
//! This module is split into submodules:
//! - `import`: building a job from paths or JSON, appending rasters
//! - `export`: writing the canonical JSON form
//! - `passes`: pass list mutation and lasertags
//!
//! A [`Job`] owns all of its state. Every import and every raster addition
//! recomputes stats before returning, so [`Job::stats`] is never stale when
//! observed through this API.

mod export;
mod import;
mod passes;

pub use import::Coordinate;

use crate::geometry::{segmentize_long_lines, Bbox, Path};
use crate::pass::Pass;
use crate::raster::Raster;
use crate::stats::{compute_stats, Stats};
use indexmap::IndexMap;
use lasaurkit_settings::LaserSettings;

/// Paths grouped by color key, in insertion order
pub type PathsByColor = IndexMap<String, Vec<Path>>;

/// An open design and everything needed to machine it
#[derive(Debug, Clone, Default)]
pub struct Job {
    settings: LaserSettings,
    paths_by_color: PathsByColor,
    rasters: Vec<Raster>,
    passes: Vec<Pass>,
    stats: Stats,
}

impl Job {
    /// Create an empty job with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty job with the given settings
    pub fn with_settings(settings: LaserSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Settings this job was created with
    pub fn settings(&self) -> &LaserSettings {
        &self.settings
    }

    /// Drop all paths, rasters, passes and stats. Settings are kept.
    pub fn clear(&mut self) {
        self.paths_by_color.clear();
        self.rasters.clear();
        self.passes.clear();
        self.stats = Stats::default();
    }

    /// True when there are neither paths nor rasters. Passes do not count.
    pub fn is_empty(&self) -> bool {
        self.paths_by_color.is_empty() && self.rasters.is_empty()
    }

    pub fn paths_by_color(&self) -> &PathsByColor {
        &self.paths_by_color
    }

    /// Paths under one color, if the color exists
    pub fn paths(&self, color: &str) -> Option<&[Path]> {
        self.paths_by_color.get(color).map(Vec::as_slice)
    }

    pub fn rasters(&self) -> &[Raster] {
        &self.rasters
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Color keys in insertion order
    pub fn all_colors(&self) -> Vec<&str> {
        self.paths_by_color.keys().map(String::as_str).collect()
    }

    /// Insertion index of every color
    pub fn color_order(&self) -> IndexMap<&str, usize> {
        self.paths_by_color
            .keys()
            .enumerate()
            .map(|(i, color)| (color.as_str(), i))
            .collect()
    }

    /// Recompute stats from paths and rasters
    pub fn recalculate_stats(&mut self) {
        self.stats = compute_stats(
            &self.paths_by_color,
            &self.rasters,
            self.settings.raster_offset,
        );
        if let Some(all) = self.stats.all() {
            tracing::debug!(
                "Stats: {} scopes, bbox {:?}, length {:.3}",
                self.stats.len(),
                all.bbox.to_array(),
                all.length
            );
        }
    }

    /// Stats for the whole job, computing them if the cache lacks the
    /// aggregate (possible with stats trusted from JSON).
    pub fn overall_stats(&self) -> crate::stats::ScopeStats {
        match self.stats.all() {
            Some(all) => *all,
            None => {
                let fresh = compute_stats(
                    &self.paths_by_color,
                    &self.rasters,
                    self.settings.raster_offset,
                );
                fresh.all().copied().unwrap_or_default()
            }
        }
    }

    /// Total feed length of the colors used by passes
    pub fn job_path_length(&self) -> f64 {
        self.passes_colors()
            .iter()
            .filter_map(|color| self.stats.get(color))
            .map(|s| s.length)
            .sum()
    }

    /// Bounding box of the colors used by passes
    pub fn job_bbox(&self) -> Bbox {
        let mut bbox = Bbox::EMPTY;
        for color in self.passes_colors() {
            if let Some(scope) = self.stats.get(&color) {
                bbox.merge(&scope.bbox);
            }
        }
        bbox
    }

    /// Split feed segments longer than the configured `max_segment_length`.
    /// Returns the number of rebuilt paths.
    pub fn segmentize_long_lines(&mut self) -> usize {
        let max_len = self.settings.max_segment_length;
        self.segmentize_long_lines_with(max_len)
    }

    /// Split feed segments longer than `max_len`
    pub fn segmentize_long_lines_with(&mut self, max_len: f64) -> usize {
        let rebuilt =
            segmentize_long_lines(self.paths_by_color.values_mut().flatten(), max_len);
        if rebuilt > 0 {
            tracing::debug!("Segmentized {} paths at {} mm", rebuilt, max_len);
        }
        rebuilt
    }
}
