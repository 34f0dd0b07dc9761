//! vita-port-check - PS Vita port feasibility for Android APKs
//!
//! This crate decompiles APKs through apktool, classifies whether the
//! decompiled native code could be ported to the PS Vita, and stages VPK
//! packages through an external packaging tool.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod decompile;
pub mod package;
pub mod types;

pub use classifier::{classify, DecompiledApp};
pub use config::ToolConfig;
pub use types::*;
