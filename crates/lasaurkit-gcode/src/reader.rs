//! Reader for a constrained G-code subset
//!
//! Understood words: `G0`/`G00` seek, `G1`/`G01` feed, `G90`/`G91` distance
//! mode, `X`, `Y`, `F` and `S`. `M` codes, other `G` codes and other axis
//! letters are accepted and ignored. `G8` raster lines are skipped whole since
//! their data may contain comment characters. Comments in `;` and `( )` form
//! are stripped.
//!
//! A seek ends the current path; a feed extends it, starting from the current
//! position when no path is open. Paths with fewer than two points are
//! dropped. `F` on a seek line sets the seek rate and is ignored.

use std::sync::OnceLock;

use lasaurkit_job::{Job, Pass, Path, Point};
use lasaurkit_settings::{DEFAULT_PASS_FEEDRATE, DEFAULT_PASS_INTENSITY};
use regex::Regex;

use crate::error::{GcodeReadError, GcodeReadResult};

/// Color assigned to every path read from G-code
pub const READ_COLOR: &str = "#000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Seek,
    Feed,
}

/// What a G-code program describes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedProgram {
    pub paths: Vec<Path>,
    /// Feedrate in effect at the last feed move
    pub feedrate: Option<f64>,
    /// `S` value in effect at the last feed move, on the 0-255 scale
    pub power: Option<f64>,
}

/// Line-by-line G-code reader with modal state
#[derive(Debug, Clone)]
pub struct GcodeReader {
    line: usize,
    absolute: bool,
    motion: Motion,
    position: Point,
    feedrate: Option<f64>,
    power: Option<f64>,
    current: Option<Path>,
    program: ParsedProgram,
}

impl Default for GcodeReader {
    fn default() -> Self {
        Self::new()
    }
}

impl GcodeReader {
    pub fn new() -> Self {
        Self {
            line: 0,
            absolute: true,
            motion: Motion::Seek,
            position: Point::default(),
            feedrate: None,
            power: None,
            current: None,
            program: ParsedProgram::default(),
        }
    }

    /// Feed the next line of the program
    pub fn read_line(&mut self, line: &str) -> GcodeReadResult<()> {
        self.line += 1;
        if is_raster_line(line) {
            tracing::trace!("Skipping raster line {}", self.line);
            return Ok(());
        }

        let cleaned = remove_comments(line);
        let mut x = None;
        let mut y = None;
        let mut f = None;

        for (letter, value) in parse_words(&cleaned, self.line)? {
            match letter {
                'G' => self.apply_g_code(value),
                'X' => x = Some(value),
                'Y' => y = Some(value),
                'F' => f = Some(value),
                'S' => self.power = Some(value),
                _ => {}
            }
        }
        if f.is_some() && self.motion == Motion::Feed {
            self.feedrate = f;
        }

        if x.is_some() || y.is_some() {
            let target = if self.absolute {
                Point::new(x.unwrap_or(self.position.x), y.unwrap_or(self.position.y))
            } else {
                Point::new(
                    self.position.x + x.unwrap_or(0.0),
                    self.position.y + y.unwrap_or(0.0),
                )
            };
            self.move_to(target);
        }
        Ok(())
    }

    /// Close the open path and return everything read
    pub fn finish(mut self) -> ParsedProgram {
        self.close_path();
        self.program
    }

    fn apply_g_code(&mut self, value: f64) {
        if value.fract() != 0.0 {
            tracing::debug!("Ignoring G{} on line {}", value, self.line);
            return;
        }
        match value as i64 {
            0 => self.motion = Motion::Seek,
            1 => self.motion = Motion::Feed,
            90 => self.absolute = true,
            91 => self.absolute = false,
            other => tracing::debug!("Ignoring G{} on line {}", other, self.line),
        }
    }

    fn move_to(&mut self, target: Point) {
        match self.motion {
            Motion::Seek => self.close_path(),
            Motion::Feed => {
                let start = self.position;
                self.current.get_or_insert_with(|| vec![start]).push(target);
                self.program.feedrate = self.feedrate;
                self.program.power = self.power;
            }
        }
        self.position = target;
    }

    fn close_path(&mut self) {
        if let Some(path) = self.current.take() {
            if path.len() > 1 {
                self.program.paths.push(path);
            }
        }
    }
}

/// Read a whole program
pub fn read_gcode(text: &str) -> GcodeReadResult<ParsedProgram> {
    let mut reader = GcodeReader::new();
    for line in text.lines() {
        reader.read_line(line)?;
    }
    let program = reader.finish();
    tracing::debug!("Read {} paths from G-code", program.paths.len());
    Ok(program)
}

/// Replace `job` with the paths of a G-code program.
///
/// All paths go under [`READ_COLOR`]. When there are paths, one pass is added
/// for that color using the `F` and `S` of the last feed move, with `S` mapped
/// back to percent. The job is left unchanged on error.
pub fn set_job_by_gcode(job: &mut Job, text: &str) -> GcodeReadResult<()> {
    let program = read_gcode(text)?;
    let has_paths = !program.paths.is_empty();

    if has_paths {
        job.set_by_paths([(READ_COLOR, program.paths)]);
        job.add_pass(Pass::new(
            [READ_COLOR],
            program.feedrate.unwrap_or(DEFAULT_PASS_FEEDRATE),
            program
                .power
                .map(power_to_intensity)
                .unwrap_or(DEFAULT_PASS_INTENSITY),
        ));
    } else {
        job.set_by_paths(Vec::<(&str, Vec<Path>)>::new());
    }

    tracing::info!("Imported G-code: {} paths", job.paths(READ_COLOR).map_or(0, <[Path]>::len));
    Ok(())
}

/// Map an `S` value on the 0-255 scale back to percent
pub fn power_to_intensity(power: f64) -> f64 {
    (power / 2.55).round()
}

fn is_raster_line(line: &str) -> bool {
    let mut chars = line.trim_start().chars();
    matches!(chars.next(), Some('G' | 'g'))
        && chars
            .take_while(char::is_ascii_digit)
            .collect::<String>()
            .parse::<u32>()
            == Ok(8)
}

fn remove_comments(line: &str) -> String {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COMMENT_REGEX
        .get_or_init(|| Regex::new(r"\([^)]*\)|;.*").expect("invalid regex pattern"));
    regex.replace_all(line, "").into_owned()
}

// Split into (letter, value) words; letters are upper-cased and words may be
// written without spaces between them.
fn parse_words(line: &str, line_no: usize) -> GcodeReadResult<Vec<(char, f64)>> {
    let mut words = Vec::new();
    let mut rest = line.trim_start();

    while let Some(letter) = rest.chars().next() {
        if !letter.is_ascii_alphabetic() {
            return Err(GcodeReadError::InvalidWord {
                line: line_no,
                word: rest.split_whitespace().next().unwrap_or(rest).to_string(),
            });
        }
        let body = &rest[1..];
        let end = body
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
            .unwrap_or(body.len());
        let number = &body[..end];
        let value = number
            .parse::<f64>()
            .map_err(|_| GcodeReadError::InvalidWord {
                line: line_no,
                word: format!("{}{}", letter, number),
            })?;
        words.push((letter.to_ascii_uppercase(), value));
        rest = body[end..].trim_start();
    }
    Ok(words)
}
