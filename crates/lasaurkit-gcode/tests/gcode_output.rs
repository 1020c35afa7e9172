use lasaurkit_core::{Message, MessageLevel, MessageLog};
use lasaurkit_gcode::{GcodeEncoder, JobGcodeExt};
use lasaurkit_job::{Job, Pass, Raster, RasterImage};
use lasaurkit_settings::LaserSettings;

fn square_job() -> Job {
    let mut job = Job::new();
    job.set_by_paths(vec![(
        "#ff0000",
        vec![vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]],
    )]);
    job.add_pass(Pass::new(["#ff0000"], 500.0, 50.0));
    job
}

#[test]
fn test_simple_square() {
    let mut log = MessageLog::new();
    let gcode = square_job().to_gcode(&mut log);

    assert_eq!(
        gcode,
        "G90\nM80\nG0F8000\n\
         G1F500\nS128\n\
         G0X0.00Y0.00\n\
         G1X10.00Y0.00\nG1X10.00Y10.00\nG1X0.00Y10.00\nG1X0.00Y0.00\n\
         M81\nS0\nG0X0Y0F8000\n"
    );
    assert!(log.is_empty());
    assert_eq!(gcode.matches("G0X").count(), 2);
}

#[test]
fn test_out_of_range_pass_is_clamped() {
    let mut job = square_job();
    job.clear_passes();
    job.add_pass(Pass::new(["#ff0000"], 30000.0, 150.0));

    let mut log = MessageLog::new();
    let gcode = job.to_gcode(&mut log);

    assert!(gcode.contains("G1F24000\nS255\n"));
    let warnings: Vec<&Message> = log.with_level(MessageLevel::Warning).collect();
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].text, "Feedrate constrained to 24000");
    assert_eq!(warnings[1].text, "Intensity constrained to 100");

    // a reused log only holds the latest run
    log.clear();
    square_job().to_gcode(&mut log);
    assert!(log.is_empty());
}

#[test]
fn test_passes_and_colors_run_in_listed_order() {
    let mut job = Job::new();
    job.set_by_paths(vec![
        ("#ff0000", vec![vec![(1.0, 1.0), (2.0, 2.0)]]),
        ("#0000ff", vec![vec![(3.0, 3.0), (4.0, 4.0)]]),
    ]);
    job.add_pass(Pass::new(["#0000ff", "#ff0000"], 800.0, 10.0));
    job.add_pass(Pass::new(["#ff0000"], 400.0, 100.0));

    let gcode = job.to_gcode(&mut MessageLog::new());
    let body: Vec<&str> = gcode.lines().skip(3).collect();
    assert_eq!(
        body,
        vec![
            "G1F800", "S26", "G0X3.00Y3.00", "G1X4.00Y4.00", "G0X1.00Y1.00", "G1X2.00Y2.00",
            "G1F400", "S255", "G0X1.00Y1.00", "G1X2.00Y2.00", "M81", "S0", "G0X0Y0F8000",
        ]
    );
}

#[test]
fn test_rasters_precede_passes() {
    let settings = LaserSettings {
        num_digits: 3,
        raster_linechars: 4,
        kerf: 0.05,
        raster_offset: 12.5,
        ..Default::default()
    };
    let mut job = Job::from_json(&square_job().to_json(None).unwrap(), settings.clone()).unwrap();
    job.add_rasters(vec![Raster::new(
        [5.0, 6.0],
        [1.0, 0.2],
        [10, 2],
        RasterImage::from_intensities(&[255; 20]),
    )
    .unwrap()]);

    let gcode = GcodeEncoder::new(settings).encode(&job, &mut MessageLog::new());
    let raster_start = gcode.find("G8P").unwrap();
    let pass_start = gcode.find("G1F500").unwrap();
    assert!(raster_start < pass_start);

    assert!(gcode.contains(
        "G1F3000\nG0X5.000Y6.000\nG8P0.05000\nG8X12.500\nG8N\n\
         G8Dvvvv\nG8Dvvvv\nG8Dvv\nG8N\n\
         G8Dvvvv\nG8Dvvvv\nG8Dvv\nG8N\n"
    ));
    assert_eq!(gcode.matches("G8D").count(), 6);
}

#[test]
fn test_bbox_gcode_of_square() {
    let gcode = square_job().to_bbox_gcode();
    assert_eq!(
        gcode,
        "G90\nG0F8000\n\
         G00X0.000Y0.000\nG00X10.000Y0.000\nG00X10.000Y10.000\n\
         G00X0.000Y10.000\nG00X0.000Y0.000\n\
         G0X0Y0F8000\n"
    );
}

#[test]
fn test_bbox_gcode_computes_missing_aggregate() {
    let mut job = Job::new();
    job.set_by_json(
        r##"{"passes": [], "paths_by_color": {"#000000": [[[2, 3], [4, 5]]]},
            "rasters": [], "stats": {}}"##,
    )
    .unwrap();
    assert!(job.stats().all().is_none());
    let gcode = job.to_bbox_gcode();
    assert!(gcode.contains("G00X2.000Y3.000\nG00X4.000Y3.000\n"));
}

#[test]
fn test_gcode_reads_back_into_job() {
    let gcode = square_job().to_gcode(&mut MessageLog::new());

    let mut job = Job::new();
    job.set_by_gcode(&gcode).unwrap();

    assert_eq!(job.all_colors(), vec!["#000000"]);
    assert_eq!(job.paths("#000000").unwrap().len(), 1);
    assert_eq!(job.paths("#000000").unwrap()[0].len(), 5);
    assert_eq!(job.passes(), &[Pass::new(["#000000"], 500.0, 50.0)]);
    assert_eq!(job.stats().all().unwrap().length, 40.0);
}

#[test]
fn test_gcode_reader_skips_raster_block() {
    let text = "G90\nM80\nG1F3000\nG0X0Y0\nG8P0.1000\nG8X40.00\nG8N\nG8D!(;)\nG8N\nM81\n";
    let mut job = Job::new();
    job.set_by_gcode(text).unwrap();
    assert!(job.is_empty());
    assert!(!job.has_passes());
}

#[test]
fn test_gcode_reader_error_leaves_job_unchanged() {
    let mut job = square_job();
    let err = job.set_by_gcode("G0 X1\nG1 X2 *bad\n").unwrap_err();
    assert_eq!(err.to_string(), "Invalid word '*bad' on line 2");
    assert_eq!(job.all_colors(), vec!["#ff0000"]);
}
