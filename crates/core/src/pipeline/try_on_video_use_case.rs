use std::path::Path;

use crate::pipeline::render_loop::RenderLoop;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Per-run totals reported back to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessingSummary {
    /// Frames written to the output.
    pub frames: usize,
    /// Frames whose detection failed and passed through untouched.
    pub skipped: usize,
    /// Total faces seen across all frames.
    pub faces: usize,
}

/// Progress callback `(current, total) -> keep_going`.
pub type ProgressFn = Box<dyn Fn(usize, usize) -> bool + Send>;

/// Video try-on: read → per-frame render loop → write.
///
/// Strictly one cycle in flight: each frame is read, processed, and
/// written before the next is taken. A `Stop` command (or a `false`
/// from the progress callback) ends the run; `Pause` passes frames
/// through unprocessed until `Resume`.
pub struct TryOnVideoUseCase {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn VideoWriter>,
    render_loop: RenderLoop,
    on_progress: Option<ProgressFn>,
}

impl TryOnVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        render_loop: RenderLoop,
        on_progress: Option<ProgressFn>,
    ) -> Self {
        Self {
            reader,
            writer,
            render_loop,
            on_progress,
        }
    }

    /// Handle for pause/resume/stop and filter commands during the run.
    pub fn handle(&self) -> crate::pipeline::render_loop::SessionHandle {
        self.render_loop.handle()
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<ProcessingSummary, Box<dyn std::error::Error>> {
        let metadata = self.reader.open(input_path)?;
        self.writer.open(output_path, &metadata)?;

        let total = metadata.total_frames;
        let mut summary = ProcessingSummary::default();

        for frame_result in self.reader.frames() {
            let mut frame = frame_result?;
            let report = self.render_loop.step(&mut frame);

            if self.render_loop.is_stopped() {
                break;
            }

            self.writer.write(&frame)?;
            summary.frames += 1;
            if report.skipped {
                summary.skipped += 1;
            }
            summary.faces += report.faces.len();

            if let Some(ref progress) = self.on_progress {
                if !progress(summary.frames, total) {
                    break;
                }
            }
        }

        self.reader.close();
        self.writer.close()?;
        self.render_loop.finish();
        Ok(summary)
    }
}
