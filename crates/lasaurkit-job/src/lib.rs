//! # LasaurKit Job
//!
//! The in-memory job model shared by the importers and the encoders.
//!
//! A job holds vector paths grouped by color, raster images, an ordered pass
//! list that says which colors to machine with which feedrate and intensity,
//! and cached stats (bounding box and travel length) per color, for the raster
//! group, and for the whole job.
//!
//! ## Example
//!
//! ```
//! use lasaurkit_job::{Job, Pass};
//!
//! let mut job = Job::new();
//! job.set_by_paths(vec![("#ff0000", vec![vec![(0.0, 0.0), (10.0, 0.0)]])]);
//! job.add_pass(Pass::new(["#ff0000"], 1500.0, 60.0));
//!
//! assert_eq!(job.stats().get("#ff0000").map(|s| s.length), Some(10.0));
//! let json = job.to_json(None).unwrap();
//! assert!(json.contains("\"paths_by_color\""));
//! ```

pub mod geometry;
pub mod job;
pub mod lasertags;
pub mod pass;
pub mod raster;
pub mod stats;

pub use geometry::{
    expand_bbox, polyline_length, segmentize_long_lines, segmentize_path, Bbox, Path, Point,
};
pub use job::{Coordinate, Job, PathsByColor};
pub use lasertags::{passes_from_lasertags, TagField, LASERTAG_ARITY};
pub use pass::Pass;
pub use raster::{
    decode_intensity, encode_intensity, Raster, RasterError, RasterImage, RASTER_BYTE_MAX,
    RASTER_BYTE_MIN,
};
pub use stats::{compute_stats, ScopeStats, Stats, ALL_SCOPE, RASTER_SCOPE};
