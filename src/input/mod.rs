//! Input processing module
//! Handles file detection, JD reading, resume segmentation, and profile extraction

pub mod file_detector;
pub mod jd_reader;
pub mod segmenter;
pub mod text_extractor;
