pub mod analysis;
pub mod batch;
pub mod condition;
pub mod config;
pub mod curve;
pub mod cycles;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod signal;
pub mod split;
pub mod timing;

pub use analysis::{analyze_recording, Group, RecordingAnalysis};
pub use condition::*;
pub use config::AnalysisConfig;
pub use error::*;
pub use signal::*;
