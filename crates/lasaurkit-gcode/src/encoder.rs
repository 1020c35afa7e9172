//! Job to G-code
//!
//! Output layout:
//!
//! ```text
//! G90 / M80 / G0F<seek>            header
//! per raster:  G1F<raster feed>, G0X..Y.., G8P<kerf>, G8X<offset>, G8N,
//!              then per pixel row: G8D chunks, G8N
//! per pass:    G1F<feed>, S<power>, then G0 to each path start and G1 along it
//! M81 / S0 / G0X0Y0F<seek>         footer
//! ```
//!
//! Raster rows are split into `raster_linechars` wide `G8D` lines. The last
//! chunk of a row is always written, even when it is empty.

use lasaurkit_core::MessageSink;
use lasaurkit_job::{Job, Raster};
use lasaurkit_settings::LaserSettings;

use crate::constrain::{map_constrain_feedrate, map_constrain_intensity};
use crate::format::format_fixed;

/// Decimals used by the bbox framing path, independent of `num_digits`
pub const BBOX_DIGITS: usize = 3;

/// Writes machine code for a job
#[derive(Debug, Clone)]
pub struct GcodeEncoder {
    settings: LaserSettings,
}

impl GcodeEncoder {
    pub fn new(settings: LaserSettings) -> Self {
        Self { settings }
    }

    /// Generate the full program: rasters first, then passes in order.
    ///
    /// Clamped feedrates and intensities are reported to `sink`. Pass colors
    /// with no paths are skipped.
    pub fn encode(&self, job: &Job, sink: &mut dyn MessageSink) -> String {
        let mut gcode = String::new();

        gcode.push_str("G90\nM80\n");
        gcode.push_str(&format!("G0F{}\n", self.settings.max_seek_speed));

        for raster in job.rasters() {
            self.encode_raster(raster, &mut gcode);
        }

        for (index, pass) in job.passes().iter().enumerate() {
            let feedrate = map_constrain_feedrate(pass.feedrate, sink);
            let intensity = map_constrain_intensity(pass.intensity, sink);
            gcode.push_str(&format!("G1F{}\nS{}\n", feedrate, intensity));

            for color in &pass.colors {
                let Some(paths) = job.paths(color) else {
                    tracing::debug!("Pass {} references color {} with no paths", index + 1, color);
                    continue;
                };
                for path in paths {
                    let Some((first, rest)) = path.split_first() else {
                        continue;
                    };
                    gcode.push_str(&format!("G0{}\n", self.xy(first.x, first.y)));
                    for p in rest {
                        gcode.push_str(&format!("G1{}\n", self.xy(p.x, p.y)));
                    }
                }
            }
        }

        gcode.push_str(&format!(
            "M81\nS0\nG0X0Y0F{}\n",
            self.settings.max_seek_speed
        ));

        tracing::info!(
            "Generated G-code: {} rasters, {} passes, {} lines",
            job.rasters().len(),
            job.passes().len(),
            gcode.lines().count()
        );
        gcode
    }

    fn encode_raster(&self, raster: &Raster, gcode: &mut String) {
        let digits = self.settings.num_digits;
        // a zero width would never advance through the row
        let linechars = self.settings.raster_linechars.max(1);

        gcode.push_str(&format!("G1F{}\n", self.settings.raster_feedrate));
        gcode.push_str(&format!("G0{}\n", self.xy(raster.pos[0], raster.pos[1])));
        gcode.push_str(&format!("G8P{}\n", format_fixed(self.settings.kerf, digits + 2)));
        gcode.push_str(&format!(
            "G8X{}\n",
            format_fixed(self.settings.raster_offset, digits)
        ));
        gcode.push_str("G8N\n");

        let mut chunks = 0usize;
        for row in raster.rows() {
            let full = row.len() / linechars;
            for chunk in row[..full * linechars].chunks(linechars) {
                push_data_line(gcode, chunk);
                chunks += 1;
            }
            push_data_line(gcode, &row[full * linechars..]);
            chunks += 1;
            gcode.push_str("G8N\n");
        }

        tracing::debug!(
            "Raster at ({}, {}): {} rows, {} data lines",
            raster.pos[0],
            raster.pos[1],
            raster.height_px(),
            chunks
        );
    }

    /// Generate the framing path around the whole job.
    ///
    /// Visits the four corners of the job bbox and returns to the origin.
    /// Coordinates always use three decimals.
    pub fn encode_bbox(&self, job: &Job) -> String {
        let [x0, y0, x1, y1] = job.overall_stats().bbox.to_array();
        let corner = |x: f64, y: f64| {
            format!(
                "G00X{}Y{}\n",
                format_fixed(x, BBOX_DIGITS),
                format_fixed(y, BBOX_DIGITS)
            )
        };

        let mut gcode = String::new();
        gcode.push_str("G90\n");
        gcode.push_str(&format!("G0F{}\n", self.settings.max_seek_speed));
        gcode.push_str(&corner(x0, y0));
        gcode.push_str(&corner(x1, y0));
        gcode.push_str(&corner(x1, y1));
        gcode.push_str(&corner(x0, y1));
        gcode.push_str(&corner(x0, y0));
        gcode.push_str(&format!("G0X0Y0F{}\n", self.settings.max_seek_speed));
        gcode
    }

    fn xy(&self, x: f64, y: f64) -> String {
        let digits = self.settings.num_digits;
        format!("X{}Y{}", format_fixed(x, digits), format_fixed(y, digits))
    }
}

fn push_data_line(gcode: &mut String, data: &[u8]) {
    gcode.push_str("G8D");
    gcode.extend(data.iter().map(|&b| char::from(b)));
    gcode.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasaurkit_core::MessageLog;
    use lasaurkit_job::{Pass, RasterImage};

    fn encoder() -> GcodeEncoder {
        GcodeEncoder::new(LaserSettings::default())
    }

    #[test]
    fn test_empty_job() {
        let mut log = MessageLog::new();
        let gcode = encoder().encode(&Job::new(), &mut log);
        assert_eq!(gcode, "G90\nM80\nG0F8000\nM81\nS0\nG0X0Y0F8000\n");
        assert!(log.is_empty());
    }

    #[test]
    fn test_unknown_pass_color_is_skipped() {
        let mut job = Job::new();
        job.add_pass(Pass::new(["#123456"], 1000.0, 20.0));
        let mut log = MessageLog::new();
        let gcode = encoder().encode(&job, &mut log);
        assert_eq!(
            gcode,
            "G90\nM80\nG0F8000\nG1F1000\nS51\nM81\nS0\nG0X0Y0F8000\n"
        );
    }

    #[test]
    fn test_single_point_path_emits_only_seek() {
        let mut job = Job::new();
        job.set_by_paths(vec![("#000000", vec![vec![(1.0, 2.0)]])]);
        job.add_pass(Pass::new(["#000000"], 1000.0, 20.0));
        let gcode = encoder().encode(&job, &mut MessageLog::new());
        assert!(gcode.contains("S51\nG0X1.00Y2.00\nM81\n"));
    }

    #[test]
    fn test_raster_block() {
        let settings = LaserSettings {
            raster_linechars: 2,
            ..Default::default()
        };
        let mut job = Job::with_settings(settings.clone());
        job.add_rasters(vec![Raster::new(
            [10.0, 20.0],
            [3.0, 2.0],
            [3, 2],
            RasterImage::from_bytes(b"!#%&()".to_vec()),
        )
        .unwrap()]);

        let gcode = GcodeEncoder::new(settings).encode(&job, &mut MessageLog::new());
        let expected = "G90\nM80\nG0F8000\n\
                        G1F3000\nG0X10.00Y20.00\nG8P0.1000\nG8X40.00\nG8N\n\
                        G8D!#\nG8D%\nG8N\n\
                        G8D&(\nG8D)\nG8N\n\
                        M81\nS0\nG0X0Y0F8000\n";
        assert_eq!(gcode, expected);
    }

    #[test]
    fn test_raster_row_multiple_of_linechars_ends_with_empty_chunk() {
        let settings = LaserSettings {
            raster_linechars: 2,
            ..Default::default()
        };
        let mut job = Job::with_settings(settings.clone());
        job.add_rasters(vec![Raster::new(
            [0.0, 0.0],
            [1.0, 1.0],
            [2, 1],
            RasterImage::from_bytes(b"AB".to_vec()),
        )
        .unwrap()]);
        let gcode = GcodeEncoder::new(settings).encode(&job, &mut MessageLog::new());
        assert!(gcode.contains("G8N\nG8DAB\nG8D\nG8N\n"));
    }

    #[test]
    fn test_bbox_uses_three_decimals() {
        let mut job = Job::with_settings(LaserSettings {
            num_digits: 1,
            ..Default::default()
        });
        job.set_by_paths(vec![(
            "#000000",
            vec![vec![(1.0, 2.0), (11.5, 2.0), (11.5, 7.25)]],
        )]);
        let gcode = GcodeEncoder::new(job.settings().clone()).encode_bbox(&job);
        assert_eq!(
            gcode,
            "G90\nG0F8000\n\
             G00X1.000Y2.000\nG00X11.500Y2.000\nG00X11.500Y7.250\n\
             G00X1.000Y7.250\nG00X1.000Y2.000\n\
             G0X0Y0F8000\n"
        );
    }
}
