pub mod annotate;
pub mod brightness;
pub mod pipeline_logger;
pub mod render_loop;
pub mod try_on_image_use_case;
pub mod try_on_video_use_case;
