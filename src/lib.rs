//! # LasaurKit
//!
//! A design-to-machine-code translator for Lasersaur-style laser cutters.
//!
//! ## Architecture
//!
//! LasaurKit is organized as a workspace with multiple crates:
//!
//! 1. **lasaurkit-core** - Error taxonomy and the message sink
//! 2. **lasaurkit-settings** - Machine settings with defaults and file loading
//! 3. **lasaurkit-job** - Job model, stats, lasertags and JSON interchange
//! 4. **lasaurkit-gcode** - G-code with the G8 raster extension, bbox framing
//!    and a constrained G-code reader
//! 5. **lasaurkit** - This crate: re-exports, logging setup and the CLI

pub use lasaurkit_core::{
    FormatError, FormatResult, InputError, Message, MessageLevel, MessageLog, MessageSink,
    TracingSink, ValidationWarning,
};
pub use lasaurkit_gcode::{
    format_fixed, GcodeEncoder, GcodeReadError, GcodeReadResult, JobGcodeExt,
};
pub use lasaurkit_job::{
    Bbox, Job, Pass, Path, PathsByColor, Point, Raster, RasterImage, ScopeStats, Stats, TagField,
};
pub use lasaurkit_settings::{LaserSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - stderr output with pretty formatting, keeping stdout for program output
/// - RUST_LOG environment variable support
/// - `verbose` raises the default level from WARN to DEBUG
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
