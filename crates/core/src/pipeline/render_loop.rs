//! The per-frame try-on step and its session state.
//!
//! Processing is single-threaded and frame-driven: exactly one
//! detect→classify→composite cycle runs at a time, and the next frame is
//! taken only after the previous cycle finishes. All UI-style mutations
//! (filter choice, hue, pause/resume/stop) arrive as commands on a queue
//! drained between frames, so they are serialized with the loop's own
//! writes to the session state.

use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};

use crate::classify::auto_filter::{AutoFilterSelector, INITIAL_FILTER};
use crate::classify::face_shape::FaceShape;
use crate::classify::recommendation::recommended_frames;
use crate::classify::shape_classifier::{classify, ClassifierConfig};
use crate::detection::domain::detection_box::{DetectionBox, DistanceCategory};
use crate::detection::domain::face_detector::FaceDetector;
use crate::geometry::face_measurements::FaceMeasurements;
use crate::geometry::shape_ratios::ShapeRatios;
use crate::overlay::domain::filter_kind::FilterKind;
use crate::overlay::domain::frame_compositor::FrameCompositor;
use crate::overlay::domain::placement::placement;
use crate::overlay::infrastructure::filter_store::FilterStore;
use crate::pipeline::annotate::{draw_box, draw_landmarks};
use crate::pipeline::brightness::BrightnessMonitor;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::frame::Frame;

/// Mutations applied between frames, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    SelectFilter(FilterKind),
    SetHue(u16),
    ClearHue,
    SetAutoSelect(bool),
    Pause,
    Resume,
    Stop,
}

/// Cloneable sender half for UI/driver code.
#[derive(Clone)]
pub struct SessionHandle {
    tx: Sender<SessionCommand>,
}

impl SessionHandle {
    /// Queue a command for the next frame boundary. Returns `false` if
    /// the loop is gone.
    pub fn send(&self, command: SessionCommand) -> bool {
        self.tx.send(command).is_ok()
    }
}

/// Per-face result of one processed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceReport {
    pub bounds: DetectionBox,
    pub shape: FaceShape,
    pub recommendation: &'static str,
    pub distance: DistanceCategory,
}

/// Result of one `step` call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    pub faces: Vec<FaceReport>,
    /// Filter in effect after this frame's auto-selection.
    pub filter: Option<FilterKind>,
    /// Detection failed; the frame passed through untouched.
    pub skipped: bool,
    /// The loop is paused; no processing happened.
    pub paused: bool,
}

pub struct RenderLoop {
    detector: Box<dyn FaceDetector>,
    compositor: Box<dyn FrameCompositor>,
    filters: FilterStore,
    classifier: ClassifierConfig,
    selector: AutoFilterSelector,
    brightness: BrightnessMonitor,
    logger: Box<dyn PipelineLogger>,
    commands: Receiver<SessionCommand>,
    handle: SessionHandle,

    filter: FilterKind,
    hue: Option<u16>,
    auto_select: bool,
    annotate: bool,
    paused: bool,
    stopped: bool,
}

impl RenderLoop {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        compositor: Box<dyn FrameCompositor>,
        filters: FilterStore,
        classifier: ClassifierConfig,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            detector,
            compositor,
            filters,
            classifier,
            selector: AutoFilterSelector::new(),
            brightness: BrightnessMonitor::new(),
            logger,
            commands: rx,
            handle: SessionHandle { tx },
            filter: INITIAL_FILTER,
            hue: None,
            auto_select: false,
            annotate: true,
            paused: false,
            stopped: false,
        }
    }

    pub fn with_filter(mut self, filter: FilterKind) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_hue(mut self, hue: Option<u16>) -> Self {
        self.hue = hue;
        self
    }

    pub fn with_auto_select(mut self, enabled: bool) -> Self {
        self.auto_select = enabled;
        self
    }

    pub fn with_annotations(mut self, enabled: bool) -> Self {
        self.annotate = enabled;
        self
    }

    /// Command queue endpoint for UI/driver code.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Once stopped the loop never processes again; drivers should exit.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn current_filter(&self) -> FilterKind {
        self.filter
    }

    /// Emit the logger's end-of-run summary.
    pub fn finish(&self) {
        self.logger.summary();
    }

    /// Process one frame in place.
    ///
    /// Drains pending commands first, then runs the
    /// detect→classify→composite cycle. Detection failure is transient:
    /// the frame is left untouched and the loop continues.
    pub fn step(&mut self, frame: &mut Frame) -> FrameReport {
        self.drain_commands();

        if self.stopped || self.paused {
            return FrameReport {
                paused: true,
                ..FrameReport::default()
            };
        }

        let cycle_start = Instant::now();

        if self.brightness.observe(frame) {
            self.logger
                .warn("Low light: brighten the surroundings for reliable detection");
        }

        let detect_start = Instant::now();
        let detections = match self.detector.detect(frame) {
            Ok(d) => d,
            Err(e) => {
                self.logger.warn(&format!(
                    "Detect error on frame {}: {e}",
                    frame.index()
                ));
                return FrameReport {
                    skipped: true,
                    filter: Some(self.filter),
                    ..FrameReport::default()
                };
            }
        };
        self.logger
            .timing("detect", detect_start.elapsed().as_secs_f64() * 1000.0);
        self.logger.metric("faces", detections.len() as f64);

        let classify_start = Instant::now();
        let mut faces = Vec::with_capacity(detections.len());
        for detection in &detections {
            let measurements = FaceMeasurements::measure(&detection.landmarks);
            let ratios = ShapeRatios::from(&measurements);
            let shape = classify(&ratios, &self.classifier);
            faces.push(FaceReport {
                bounds: detection.bounds.clone(),
                shape,
                recommendation: recommended_frames(shape),
                distance: detection.bounds.distance_category(),
            });
        }
        self.logger
            .timing("classify", classify_start.elapsed().as_secs_f64() * 1000.0);

        // Auto-selection tracks a single subject: the first face.
        if self.auto_select {
            if let Some(first) = faces.first() {
                if let Some(kind) = self.selector.observe(first.shape) {
                    self.filter = kind;
                    self.logger
                        .info(&format!("Shape changed to {}; filter -> {kind}", first.shape));
                }
            }
        }

        for (face, detection) in faces.iter().zip(&detections) {
            self.logger.info(&format!(
                "Face: shape {} | frames: {} | distance: {}",
                face.shape, face.recommendation, face.distance
            ));
            if let Some(attrs) = &detection.attributes {
                self.logger.info(&format!(
                    "  {:.0}% {} | {:.0}% {} | age {:.0}",
                    attrs.gender_probability * 100.0,
                    attrs.gender,
                    attrs.expression_probability * 100.0,
                    attrs.expression,
                    attrs.age
                ));
            }
            if self.annotate {
                draw_box(frame, &face.bounds);
                draw_landmarks(frame, &detection.landmarks);
            }
        }

        let composite_start = Instant::now();
        for detection in &detections {
            // A not-yet-loaded asset or degenerate eye geometry skips the
            // draw for this frame; both are recoverable.
            if let Err(e) = self.filters.ensure_loaded(self.filter) {
                log::debug!("Overlay {} unavailable: {e}", self.filter);
                break;
            }
            let asset = match self.filters.get(self.filter) {
                Some(asset) => asset,
                None => break,
            };
            let Some(rect) = placement(
                &detection.landmarks,
                self.filter,
                (asset.width(), asset.height()),
            ) else {
                continue;
            };
            if let Err(e) = self.compositor.composite(frame, asset, &rect, self.hue) {
                self.logger
                    .warn(&format!("Composite failed on frame {}: {e}", frame.index()));
            }
        }
        self.logger
            .timing("composite", composite_start.elapsed().as_secs_f64() * 1000.0);

        let cycle_ms = cycle_start.elapsed().as_secs_f64() * 1000.0;
        if cycle_ms > 0.0 {
            self.logger.metric("fps", 1000.0 / cycle_ms);
        }

        FrameReport {
            faces,
            filter: Some(self.filter),
            skipped: false,
            paused: false,
        }
    }

    fn drain_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                SessionCommand::SelectFilter(kind) => self.filter = kind,
                SessionCommand::SetHue(hue) => self.hue = Some(hue.min(359)),
                SessionCommand::ClearHue => self.hue = None,
                SessionCommand::SetAutoSelect(enabled) => {
                    self.auto_select = enabled;
                    if !enabled {
                        self.selector.reset();
                    }
                }
                SessionCommand::Pause => self.paused = true,
                SessionCommand::Resume => self.paused = false,
                SessionCommand::Stop => self.stopped = true,
            }
        }
    }
}
