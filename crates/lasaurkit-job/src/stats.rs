//! Bounding boxes and travel lengths per scope
//!
//! Scopes are the color keys, [`RASTER_SCOPE`] for all rasters together, and
//! [`ALL_SCOPE`] for the whole job. Stats are a cache: they can always be
//! recomputed from paths and rasters.

use crate::geometry::{polyline_length, Bbox, Path};
use crate::raster::Raster;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Scope key of the job-wide aggregate
pub const ALL_SCOPE: &str = "_all_";

/// Scope key of the raster group
pub const RASTER_SCOPE: &str = "rasters";

/// Bounding box and length of one scope
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScopeStats {
    pub bbox: Bbox,
    pub length: f64,
}

/// Stats keyed by scope
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats(IndexMap<String, ScopeStats>);

impl Stats {
    /// Stats for one scope
    pub fn get(&self, scope: &str) -> Option<&ScopeStats> {
        self.0.get(scope)
    }

    /// The job-wide aggregate
    pub fn all(&self) -> Option<&ScopeStats> {
        self.get(ALL_SCOPE)
    }

    /// The raster group
    pub fn rasters(&self) -> Option<&ScopeStats> {
        self.get(RASTER_SCOPE)
    }

    pub fn insert(&mut self, scope: impl Into<String>, stats: ScopeStats) {
        self.0.insert(scope.into(), stats);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScopeStats)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Bbox and length over a set of paths. Paths with fewer than two points
/// contribute nothing.
pub fn path_stats<'a, I>(paths: I) -> ScopeStats
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut stats = ScopeStats::default();
    for path in paths {
        if path.len() > 1 {
            for p in path {
                stats.bbox.expand(p.x, p.y);
            }
            stats.length += polyline_length(path);
        }
    }
    stats
}

/// Bbox and head travel of a raster group.
///
/// Each raster is widened by `raster_offset` on both horizontal sides. Length
/// is `(2 * offset + width_mm) * height_px` per raster.
pub fn raster_stats(rasters: &[Raster], raster_offset: f64) -> ScopeStats {
    let mut stats = ScopeStats::default();
    for raster in rasters {
        let [x, y] = raster.pos;
        let [w, h] = raster.size_mm;
        stats.bbox.expand(x - raster_offset, y);
        stats.bbox.expand(x + w + raster_offset, y + h);
        stats.length += (2.0 * raster_offset + w) * f64::from(raster.size_px[1]);
    }
    stats
}

/// Compute stats for every color, the raster group and the aggregate.
///
/// The aggregate folds color scopes in key order, then the raster scope, so
/// it does not depend on the insertion order of colors.
pub fn compute_stats(
    paths_by_color: &IndexMap<String, Vec<Path>>,
    rasters: &[Raster],
    raster_offset: f64,
) -> Stats {
    let mut stats = Stats::default();

    for (color, paths) in paths_by_color {
        stats.insert(color.clone(), path_stats(paths));
    }

    let mut all = ScopeStats::default();
    let mut colors: Vec<&String> = paths_by_color.keys().collect();
    colors.sort();
    for color in colors {
        if let Some(scope) = stats.get(color) {
            all.bbox.merge(&scope.bbox);
            all.length += scope.length;
        }
    }

    if !rasters.is_empty() {
        let scope = raster_stats(rasters, raster_offset);
        all.bbox.merge(&scope.bbox);
        all.length += scope.length;
        stats.insert(RASTER_SCOPE, scope);
    }

    stats.insert(ALL_SCOPE, all);
    stats
}
