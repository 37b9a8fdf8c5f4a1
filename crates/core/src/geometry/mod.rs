pub mod face_measurements;
pub mod shape_ratios;
