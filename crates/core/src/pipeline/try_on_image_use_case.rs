use std::path::Path;

use crate::pipeline::render_loop::{FrameReport, RenderLoop};
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::VideoReader;

/// Still-image try-on: read → detect/classify/composite → write.
///
/// With no output path the pipeline runs report-only: shapes and
/// recommendations are returned but nothing is written.
pub struct TryOnImageUseCase {
    reader: Box<dyn VideoReader>,
    image_writer: Box<dyn ImageWriter>,
    render_loop: RenderLoop,
}

impl TryOnImageUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        image_writer: Box<dyn ImageWriter>,
        render_loop: RenderLoop,
    ) -> Self {
        Self {
            reader,
            image_writer,
            render_loop,
        }
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: Option<&Path>,
    ) -> Result<FrameReport, Box<dyn std::error::Error>> {
        self.reader.open(input_path)?;
        let mut frame = self.reader.frames().next().ok_or("No frames in image")??;
        self.reader.close();

        let report = self.render_loop.step(&mut frame);

        if let Some(path) = output_path {
            self.image_writer.write(path, &frame)?;
        }

        self.render_loop.finish();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::face_shape::FaceShape;
    use crate::classify::shape_classifier::ClassifierConfig;
    use crate::detection::domain::detection_box::DetectionBox;
    use crate::detection::domain::face_detector::{FaceDetection, FaceDetector};
    use crate::detection::domain::landmark_set::{LandmarkSet, LANDMARK_COUNT};
    use crate::overlay::infrastructure::cpu_compositor::CpuCompositor;
    use crate::overlay::infrastructure::filter_store::FilterStore;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::shared::frame::Frame;
    use crate::shared::video_metadata::VideoMetadata;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubImageReader {
        frame: Option<Frame>,
    }

    impl VideoReader for StubImageReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            let frame = self.frame.as_ref().unwrap();
            Ok(VideoMetadata {
                width: frame.width(),
                height: frame.height(),
                fps: 0.0,
                total_frames: 1,
                codec: String::new(),
                source_path: None,
            })
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(self.frame.take().into_iter().map(Ok))
        }

        fn close(&mut self) {}
    }

    struct StubImageWriter {
        written: Arc<Mutex<Vec<(PathBuf, Frame)>>>,
    }

    impl ImageWriter for StubImageWriter {
        fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
            Ok(())
        }
    }

    struct StubDetector {
        detections: Vec<FaceDetection>,
    }

    impl FaceDetector for StubDetector {
        fn detect(
            &mut self,
            _frame: &Frame,
        ) -> Result<Vec<FaceDetection>, Box<dyn std::error::Error>> {
            Ok(self.detections.clone())
        }
    }

    // --- Helpers ---

    fn bright_frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![150u8; (w * h * 3) as usize], w, h, 3, 0)
    }

    fn one_face() -> Vec<FaceDetection> {
        // Uniform landmarks: degenerate geometry, classifies Undefined,
        // which is fine for orchestration tests.
        vec![FaceDetection {
            bounds: DetectionBox {
                x: 5.0,
                y: 5.0,
                width: 40.0,
                height: 40.0,
            },
            landmarks: LandmarkSet::new(vec![(30.0, 30.0); LANDMARK_COUNT]).unwrap(),
            attributes: None,
        }]
    }

    fn use_case(detections: Vec<FaceDetection>, frame: Frame) -> (TryOnImageUseCase, Arc<Mutex<Vec<(PathBuf, Frame)>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let render_loop = RenderLoop::new(
            Box::new(StubDetector { detections }),
            Box::new(CpuCompositor::new()),
            FilterStore::new(None),
            ClassifierConfig::default(),
            Box::new(NullPipelineLogger),
        );
        let uc = TryOnImageUseCase::new(
            Box::new(StubImageReader { frame: Some(frame) }),
            Box::new(StubImageWriter {
                written: written.clone(),
            }),
            render_loop,
        );
        (uc, written)
    }

    // --- Tests ---

    #[test]
    fn test_reports_classified_faces() {
        let (mut uc, _) = use_case(one_face(), bright_frame(100, 100));
        let report = uc
            .execute(Path::new("in.png"), Some(Path::new("out.png")))
            .unwrap();
        assert_eq!(report.faces.len(), 1);
        assert_eq!(report.faces[0].shape, FaceShape::Undefined);
    }

    #[test]
    fn test_writes_output_when_path_given() {
        let (mut uc, written) = use_case(one_face(), bright_frame(100, 100));
        uc.execute(Path::new("in.png"), Some(Path::new("out.png")))
            .unwrap();
        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, PathBuf::from("out.png"));
        assert_eq!(written[0].1.width(), 100);
    }

    #[test]
    fn test_report_only_mode_writes_nothing() {
        let (mut uc, written) = use_case(one_face(), bright_frame(100, 100));
        let report = uc.execute(Path::new("in.png"), None).unwrap();
        assert_eq!(report.faces.len(), 1);
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_no_faces_still_writes_output() {
        let (mut uc, written) = use_case(Vec::new(), bright_frame(64, 64));
        let report = uc
            .execute(Path::new("in.png"), Some(Path::new("out.png")))
            .unwrap();
        assert!(report.faces.is_empty());
        assert_eq!(written.lock().unwrap().len(), 1);
    }
}
