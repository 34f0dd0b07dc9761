use crate::types::finding::Finding;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal portability classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Portability {
    ImpossiblePort,
    AlmostImpossiblePort,
    PossiblePort,
    /// The rule set ran out of rules before any of them reached a decision
    Inconclusive,
}

impl Portability {
    pub fn is_portable(&self) -> bool {
        matches!(self, Portability::PossiblePort)
    }
}

impl fmt::Display for Portability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Portability::ImpossiblePort => "Impossible port",
            Portability::AlmostImpossiblePort => "Almost impossible port",
            Portability::PossiblePort => "Possible port",
            Portability::Inconclusive => "Inconclusive",
        };
        f.write_str(label)
    }
}

/// OpenGL ES version required by the app's manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlesVersion {
    Gles1,
    Gles2,
    Gles3,
    /// Manifest absent or no known version token found
    Unknown,
    /// Evaluation stopped before the manifest was inspected
    NotChecked,
}

impl fmt::Display for GlesVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GlesVersion::Gles1 => "GLES 1.0",
            GlesVersion::Gles2 => "GLES 2.0",
            GlesVersion::Gles3 => "GLES 3.0",
            GlesVersion::Unknown => "unknown",
            GlesVersion::NotChecked => "not checked",
        };
        f.write_str(label)
    }
}

/// Result of one classification: the outcome plus the trail that led to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub portability: Portability,
    pub gles: GlesVersion,
    pub findings: Vec<Finding>,
}

impl Verdict {
    /// Severity-bearing finding that decided the outcome, if any
    pub fn deciding_finding(&self) -> Option<&Finding> {
        match self.portability {
            Portability::Inconclusive => None,
            _ => self.findings.last(),
        }
    }
}
