pub mod apktool;
pub mod error;

pub use apktool::{default_output_dir, ApktoolDecompiler};
pub use error::*;
