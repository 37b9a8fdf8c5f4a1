pub const LANDMARK_MODEL_NAME: &str = "yolo11n-face68_300wlp.onnx";
pub const LANDMARK_MODEL_URL: &str =
    "https://github.com/framefit/framefit/releases/download/v0.1.0/yolo11n-face68_300wlp.onnx";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Mean frame brightness below this triggers the low-light warning.
pub const LOW_LIGHT_THRESHOLD: u32 = 100;
