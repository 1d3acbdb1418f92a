pub mod config;
pub mod cv;

pub use config::Config;
pub use cv::*;
