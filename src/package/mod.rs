pub mod error;
pub mod param;
pub mod vpk;

pub use error::*;
pub use param::ParamSfo;
pub use vpk::{stage_layout, StagingReport, VpkPackager};
