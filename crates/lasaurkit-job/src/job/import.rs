//! Building a job from raw paths or from the canonical JSON form.

use super::{Job, PathsByColor};
use crate::geometry::{Path, Point};
use crate::pass::Pass;
use crate::raster::Raster;
use crate::stats::Stats;
use lasaurkit_core::{FormatError, FormatResult};
use serde::Deserialize;

/// Anything that carries an x/y coordinate pair. Further components are
/// ignored on import.
pub trait Coordinate {
    fn xy(&self) -> (f64, f64);
}

impl Coordinate for Point {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Coordinate for (f64, f64) {
    fn xy(&self) -> (f64, f64) {
        *self
    }
}

impl Coordinate for (f64, f64, f64) {
    fn xy(&self) -> (f64, f64) {
        (self.0, self.1)
    }
}

impl Coordinate for [f64; 2] {
    fn xy(&self) -> (f64, f64) {
        (self[0], self[1])
    }
}

impl Coordinate for [f64; 3] {
    fn xy(&self) -> (f64, f64) {
        (self[0], self[1])
    }
}

impl<T: Coordinate + ?Sized> Coordinate for &T {
    fn xy(&self) -> (f64, f64) {
        (**self).xy()
    }
}

/// Wire schema of a job document. Keys are optional here so that a missing
/// key maps to [`FormatError::MissingKey`] instead of a generic serde error.
#[derive(Deserialize)]
struct JobDocument {
    passes: Option<Vec<Pass>>,
    paths_by_color: Option<PathsByColor>,
    rasters: Option<Vec<Raster>>,
    #[serde(default)]
    stats: Option<Stats>,
}

impl Job {
    /// Replace the job with copies of the given paths and recompute stats.
    ///
    /// Colors and paths keep their order. Only the x/y pair of each point is
    /// copied.
    pub fn set_by_paths<I, K, PS, P, C>(&mut self, paths_by_color: I)
    where
        I: IntoIterator<Item = (K, PS)>,
        K: Into<String>,
        PS: IntoIterator<Item = P>,
        P: IntoIterator<Item = C>,
        C: Coordinate,
    {
        self.clear();
        for (color, paths) in paths_by_color {
            let paths: Vec<Path> = paths
                .into_iter()
                .map(|path| {
                    path.into_iter()
                        .map(|c| {
                            let (x, y) = c.xy();
                            Point::new(x, y)
                        })
                        .collect()
                })
                .collect();
            self.paths_by_color.insert(color.into(), paths);
        }
        tracing::info!("Imported {} colors from paths", self.paths_by_color.len());
        self.recalculate_stats();
    }

    /// Replace the job with the contents of a JSON document.
    ///
    /// `stats`, when present, is trusted as-is; otherwise it is computed. On
    /// error the job is left unchanged.
    pub fn set_by_json(&mut self, text: &str) -> FormatResult<()> {
        let doc: JobDocument = serde_json::from_str(text)?;

        let passes = doc.passes.ok_or(FormatError::MissingKey("passes"))?;
        let paths_by_color = doc
            .paths_by_color
            .ok_or(FormatError::MissingKey("paths_by_color"))?;
        let rasters = doc.rasters.ok_or(FormatError::MissingKey("rasters"))?;

        for (index, raster) in rasters.iter().enumerate() {
            raster
                .validate()
                .map_err(|e| FormatError::InvalidRaster {
                    index,
                    reason: e.to_string(),
                })?;
        }
        for (index, pass) in passes.iter().enumerate() {
            if !(pass.feedrate.is_finite() && pass.intensity.is_finite()) {
                return Err(FormatError::InvalidPass {
                    index,
                    reason: "feedrate and intensity must be finite".to_string(),
                });
            }
        }

        self.clear();
        self.passes = passes;
        self.paths_by_color = paths_by_color;
        self.rasters = rasters;
        match doc.stats {
            Some(stats) => self.stats = stats,
            None => self.recalculate_stats(),
        }

        tracing::info!(
            "Imported job: {} colors, {} rasters, {} passes",
            self.paths_by_color.len(),
            self.rasters.len(),
            self.passes.len()
        );
        Ok(())
    }

    /// Build a job from a JSON document
    pub fn from_json(text: &str, settings: lasaurkit_settings::LaserSettings) -> FormatResult<Self> {
        let mut job = Job::with_settings(settings);
        job.set_by_json(text)?;
        Ok(job)
    }

    /// Append rasters and recompute stats.
    ///
    /// # Panics
    ///
    /// Panics if a raster's image length is not `w * h` or holds a byte
    /// outside `[33, 118]`.
    pub fn add_rasters<I>(&mut self, rasters: I)
    where
        I: IntoIterator<Item = Raster>,
    {
        let before = self.rasters.len();
        for raster in rasters {
            if let Err(e) = raster.validate() {
                panic!("raster {} violates its invariants: {}", self.rasters.len(), e);
            }
            self.rasters.push(raster);
        }
        tracing::debug!("Added {} rasters", self.rasters.len() - before);
        self.recalculate_stats();
    }
}
