//! Virtual eyewear try-on: face/landmark detection, face-shape
//! classification, frame-style recommendation, and overlay compositing.
//!
//! Layering follows ports-and-adapters: `domain` modules hold interfaces
//! and pure logic, `infrastructure` modules hold the concrete bindings
//! (ONNX Runtime, ffmpeg, the filesystem).

pub mod account;
pub mod classify;
pub mod detection;
pub mod geometry;
pub mod overlay;
pub mod pipeline;
pub mod shared;
pub mod video;
