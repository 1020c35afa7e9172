//! # LasaurKit G-code
//!
//! Machine code output for a [`Job`]: the production program with the `G8`
//! raster extension, the bbox framing path, and a reader that turns a simple
//! G-code program back into a job.
//!
//! ```
//! use lasaurkit_core::MessageLog;
//! use lasaurkit_gcode::JobGcodeExt;
//! use lasaurkit_job::{Job, Pass};
//!
//! let mut job = Job::new();
//! job.set_by_paths(vec![("#ff0000", vec![vec![(0.0, 0.0), (10.0, 0.0)]])]);
//! job.add_pass(Pass::new(["#ff0000"], 1500.0, 50.0));
//!
//! let mut log = MessageLog::new();
//! let gcode = job.to_gcode(&mut log);
//! assert!(gcode.contains("G1F1500\nS128\nG0X0.00Y0.00\nG1X10.00Y0.00\n"));
//! ```

pub mod constrain;
pub mod encoder;
pub mod error;
pub mod format;
pub mod reader;

pub use constrain::{
    constrain_feedrate, constrain_intensity, intensity_to_power, map_constrain_feedrate,
    map_constrain_intensity, MAX_FEEDRATE, MAX_INTENSITY, MIN_FEEDRATE, MIN_INTENSITY,
};
pub use encoder::{GcodeEncoder, BBOX_DIGITS};
pub use error::{GcodeReadError, GcodeReadResult};
pub use format::{format_fixed, format_number};
pub use reader::{
    power_to_intensity, read_gcode, set_job_by_gcode, GcodeReader, ParsedProgram, READ_COLOR,
};

use lasaurkit_core::MessageSink;
use lasaurkit_job::Job;

/// G-code operations on a job, using the job's own settings
pub trait JobGcodeExt {
    /// Production program; clamp warnings go to `sink`
    fn to_gcode(&self, sink: &mut dyn MessageSink) -> String;

    /// Framing path around the whole job
    fn to_bbox_gcode(&self) -> String;

    /// Replace the job with the paths of a G-code program
    fn set_by_gcode(&mut self, text: &str) -> GcodeReadResult<()>;
}

impl JobGcodeExt for Job {
    fn to_gcode(&self, sink: &mut dyn MessageSink) -> String {
        GcodeEncoder::new(self.settings().clone()).encode(self, sink)
    }

    fn to_bbox_gcode(&self) -> String {
        GcodeEncoder::new(self.settings().clone()).encode_bbox(self)
    }

    fn set_by_gcode(&mut self, text: &str) -> GcodeReadResult<()> {
        set_job_by_gcode(self, text)
    }
}
