use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use framefit_core::classify::shape_classifier::ClassifierConfig;
use framefit_core::detection::domain::face_detector::FaceDetector;
use framefit_core::detection::infrastructure::onnx_landmark_detector::OnnxLandmarkDetector;
use framefit_core::overlay::domain::filter_kind::FilterKind;
use framefit_core::overlay::infrastructure::cpu_compositor::CpuCompositor;
use framefit_core::overlay::infrastructure::filter_store::FilterStore;
use framefit_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use framefit_core::pipeline::render_loop::{FrameReport, RenderLoop};
use framefit_core::pipeline::try_on_image_use_case::TryOnImageUseCase;
use framefit_core::pipeline::try_on_video_use_case::TryOnVideoUseCase;
use framefit_core::shared::constants::{IMAGE_EXTENSIONS, LANDMARK_MODEL_NAME, LANDMARK_MODEL_URL};
use framefit_core::shared::model_resolver;
use framefit_core::video::domain::image_writer::ImageWriter;
use framefit_core::video::domain::video_reader::VideoReader;
use framefit_core::video::domain::video_writer::VideoWriter;
use framefit_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use framefit_core::video::infrastructure::ffmpeg_writer::FfmpegWriter;
use framefit_core::video::infrastructure::image_file_reader::ImageFileReader;
use framefit_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Virtual eyewear try-on for videos and images.
#[derive(Parser)]
#[command(name = "framefit")]
struct Cli {
    /// Input video or image file.
    input: PathBuf,

    /// Output file (required unless --report is used).
    output: Option<PathBuf>,

    /// Overlay to apply: aviator, cat_eye, circle, oval, rectangle, custom.
    #[arg(long, default_value = "circle")]
    filter: String,

    /// Re-select the overlay automatically when the classified face shape changes.
    #[arg(long)]
    auto: bool,

    /// Recolor the overlay to this hue (degrees, 0-359).
    #[arg(long)]
    hue: Option<u16>,

    /// Directory holding the static overlay PNGs (<name>.png).
    #[arg(long)]
    filters_dir: Option<PathBuf>,

    /// Base URL to fetch overlays missing from the filters directory.
    #[arg(long)]
    filters_url: Option<String>,

    /// Image file to use as the custom overlay (selects the custom filter).
    #[arg(long)]
    custom_filter: Option<PathBuf>,

    /// JSON file overriding the classifier thresholds.
    #[arg(long)]
    classifier_config: Option<PathBuf>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.25")]
    confidence: f64,

    /// Classify and recommend only; no overlay, no output file.
    #[arg(long)]
    report: bool,

    /// Leave the detection box and landmark dots out of the output.
    #[arg(long)]
    no_annotations: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let filter = selected_filter(&cli)?;
    let classifier = match &cli.classifier_config {
        Some(path) => ClassifierConfig::load(path)?,
        None => ClassifierConfig::default(),
    };

    let mut filters = FilterStore::new(cli.filters_dir.clone());
    if let Some(base) = &cli.filters_url {
        filters = filters.with_remote(base.clone());
    }
    if let Some(path) = &cli.custom_filter {
        filters.set_custom_source(path.clone());
    }
    if cli.filters_dir.is_some() && !cli.report {
        filters.preload()?;
    }

    let detector = build_detector(&cli)?;
    let render_loop = RenderLoop::new(
        detector,
        Box::new(CpuCompositor::new()),
        filters,
        classifier,
        Box::new(StdoutPipelineLogger::default()),
    )
    .with_filter(filter)
    .with_hue(cli.hue)
    .with_auto_select(cli.auto)
    .with_annotations(!cli.no_annotations);

    if is_image(&cli.input) {
        run_image(&cli, render_loop)?;
    } else {
        run_video(&cli, render_loop)?;
    }

    Ok(())
}

fn run_image(cli: &Cli, render_loop: RenderLoop) -> Result<(), Box<dyn std::error::Error>> {
    let reader: Box<dyn VideoReader> = Box::new(ImageFileReader::new());
    let image_writer: Box<dyn ImageWriter> = Box::new(ImageFileWriter::new());

    let mut use_case = TryOnImageUseCase::new(reader, image_writer, render_loop);
    let output = if cli.report { None } else { cli.output.as_deref() };
    let report = use_case.execute(&cli.input, output)?;

    print_report(&report);
    if let Some(path) = output {
        log::info!("Output written to {}", path.display());
    }
    Ok(())
}

fn run_video(cli: &Cli, render_loop: RenderLoop) -> Result<(), Box<dyn std::error::Error>> {
    let reader: Box<dyn VideoReader> = Box::new(FfmpegReader::new());
    let writer: Box<dyn VideoWriter> = Box::new(FfmpegWriter::new());

    let progress: Box<dyn Fn(usize, usize) -> bool + Send> = Box::new(|current, total| {
        eprint!("\rProcessing frame {current}/{total}");
        true
    });

    let mut use_case = TryOnVideoUseCase::new(reader, writer, render_loop, Some(progress));
    let output = cli.output.as_ref().unwrap();
    let summary = use_case.execute(&cli.input, output)?;
    eprintln!();

    log::info!(
        "Processed {} frames ({} skipped, {} faces); output written to {}",
        summary.frames,
        summary.skipped,
        summary.faces,
        output.display()
    );
    Ok(())
}

fn print_report(report: &FrameReport) {
    if report.skipped {
        println!("Detection failed; no faces reported");
        return;
    }
    if report.faces.is_empty() {
        println!("No faces detected");
        return;
    }
    for (i, face) in report.faces.iter().enumerate() {
        println!(
            "Face {}: shape {} | recommended frames: {} | distance: {}",
            i + 1,
            face.shape,
            face.recommendation,
            face.distance
        );
    }
}

fn build_detector(cli: &Cli) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {LANDMARK_MODEL_NAME}");
    let model_path = model_resolver::resolve(
        LANDMARK_MODEL_NAME,
        LANDMARK_MODEL_URL,
        None,
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    Ok(Box::new(OnnxLandmarkDetector::new(
        &model_path,
        cli.confidence,
    )?))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !cli.report && cli.output.is_none() {
        return Err("Output file is required unless --report is used".into());
    }
    if cli.report && !is_image(&cli.input) {
        return Err("--report only works on still images".into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if let Some(hue) = cli.hue {
        if hue > 359 {
            return Err(format!("Hue must be between 0 and 359, got {hue}").into());
        }
    }
    if let Some(path) = &cli.custom_filter {
        if !path.exists() {
            return Err(format!("Custom filter image not found: {}", path.display()).into());
        }
    }
    selected_filter(cli)?;
    Ok(())
}

/// `--custom-filter` implies the custom overlay; otherwise parse `--filter`.
fn selected_filter(cli: &Cli) -> Result<FilterKind, Box<dyn std::error::Error>> {
    if cli.custom_filter.is_some() {
        return Ok(FilterKind::Custom);
    }
    let kind: FilterKind = cli.filter.parse()?;
    if kind == FilterKind::Custom {
        return Err("--filter custom requires --custom-filter <image>".into());
    }
    Ok(kind)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading landmark model... {pct}%");
    } else {
        eprint!("\rDownloading landmark model... {downloaded} bytes");
    }
}
