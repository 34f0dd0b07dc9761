//! Port-feasibility classification of decompiled APK trees

pub mod app;
pub mod error;
pub mod gles;
pub mod rules;

pub use app::DecompiledApp;
pub use error::*;
pub use gles::{declared_gles_version, detect_gles_token, GlesDeclaration};
pub use rules::{Rule, RuleSet};

use crate::types::Verdict;
use tracing::info;

/// Classify a decompiled app with the standard rule set
pub fn classify(app: &DecompiledApp) -> Result<Verdict> {
    let verdict = RuleSet::standard().evaluate(app)?;
    info!(
        "Classified {:?}: {} ({} findings)",
        app.root(),
        verdict.portability,
        verdict.findings.len()
    );
    Ok(verdict)
}
