pub mod client;
pub mod text_detector;
