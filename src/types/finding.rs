use serde::{Deserialize, Serialize};
use std::fmt;

/// How much a single finding weighs on the portability outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    PossiblePort,
    ImpossiblePort,
    AlmostImpossible,
}

impl Severity {
    /// Label used when rendering findings for an operator
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::PossiblePort => "POSSIBLE PORT",
            Severity::ImpossiblePort => "IMPOSSIBLE PORT",
            Severity::AlmostImpossible => "ALMOST IMPOSSIBLE",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One observation recorded while classifying a decompiled app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Info => write!(f, "{}", self.message),
            severity => write!(f, "{severity}: {}", self.message),
        }
    }
}
