//! Ordered rule table for the port-feasibility decision procedure
//!
//! Rules run in table order. Each rule either records findings and lets
//! evaluation continue, or halts with a terminal [`Portability`]. The first
//! halting rule decides the verdict.

use crate::classifier::app::DecompiledApp;
use crate::classifier::error::Result;
use crate::classifier::gles::detect_gles_token;
use crate::types::{Finding, GlesVersion, Portability, Severity, Verdict};
use tracing::debug;

/// ABI folders holding executables the Vita's ARMv7 core can run
pub const ARM_ABIS: &[&str] = &["armeabi", "armeabi-v7a"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLibrary {
    pub file: &'static str,
    pub engine: &'static str,
}

/// Engines whose runtime has no Vita counterpart, looked up directly under `lib/`
pub const ENGINE_LIBRARIES: &[EngineLibrary] = &[
    EngineLibrary {
        file: "libgdx.so",
        engine: "libGDX",
    },
    EngineLibrary {
        file: "libunity.so",
        engine: "Unity",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSupport {
    Supported,
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioLibrary {
    pub file: &'static str,
    pub support: AudioSupport,
}

/// FMOD variants in lookup order; only the first one present counts
pub const AUDIO_LIBRARIES: &[AudioLibrary] = &[
    AudioLibrary {
        file: "libfmod.so",
        support: AudioSupport::Supported,
    },
    AudioLibrary {
        file: "libfmodevent.so",
        support: AudioSupport::Unsupported,
    },
    AudioLibrary {
        file: "libfmodex.so",
        support: AudioSupport::Unsupported,
    },
    AudioLibrary {
        file: "libfmodstudio.so",
        support: AudioSupport::Supported,
    },
];

/// Directories apktool emits for Kotlin metadata
pub const MANAGED_RUNTIME_DIRS: &[&str] = &["kotlin"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    ArchitectureGate {
        abis: &'static [&'static str],
    },
    GlesProbe,
    EngineGate {
        libraries: &'static [EngineLibrary],
    },
    AudioMiddlewareGate {
        abis: &'static [&'static str],
        libraries: &'static [AudioLibrary],
    },
    ManagedRuntimeGate {
        directories: &'static [&'static str],
    },
    Fallback,
}

/// Outcome of applying one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Halt(Portability),
}

/// Mutable state threaded through a single evaluation
#[derive(Debug)]
struct Evaluation {
    findings: Vec<Finding>,
    gles: GlesVersion,
}

impl Evaluation {
    fn new() -> Self {
        Self {
            findings: Vec::new(),
            gles: GlesVersion::NotChecked,
        }
    }

    fn record(&mut self, severity: Severity, message: impl Into<String>) {
        self.findings.push(Finding::new(severity, message));
    }

    fn halt(
        &mut self,
        portability: Portability,
        severity: Severity,
        message: impl Into<String>,
    ) -> Step {
        self.record(severity, message);
        Step::Halt(portability)
    }

    fn into_verdict(self, portability: Portability) -> Verdict {
        Verdict {
            portability,
            gles: self.gles,
            findings: self.findings,
        }
    }
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::ArchitectureGate { .. } => "architecture",
            Rule::GlesProbe => "gles",
            Rule::EngineGate { .. } => "engine",
            Rule::AudioMiddlewareGate { .. } => "audio-middleware",
            Rule::ManagedRuntimeGate { .. } => "managed-runtime",
            Rule::Fallback => "fallback",
        }
    }

    fn apply(&self, app: &DecompiledApp, state: &mut Evaluation) -> Result<Step> {
        match self {
            Rule::ArchitectureGate { abis } => {
                if abis.iter().any(|abi| app.has_abi_dir(abi)) {
                    state.record(Severity::Info, "ARMv6 or ARMv7 executable is present");
                    Ok(Step::Continue)
                } else {
                    Ok(state.halt(
                        Portability::ImpossiblePort,
                        Severity::ImpossiblePort,
                        "No ARMv6 or ARMv7 executable found",
                    ))
                }
            }
            Rule::GlesProbe => {
                match app.manifest()? {
                    Some(manifest) => {
                        state.gles = detect_gles_token(manifest);
                        let message = match state.gles {
                            GlesVersion::Unknown | GlesVersion::NotChecked => {
                                "Unknown or unsupported GLES version".to_string()
                            }
                            version => format!("{version} is supported"),
                        };
                        state.record(Severity::Info, message);
                    }
                    None => {
                        state.gles = GlesVersion::Unknown;
                        state.record(
                            Severity::Info,
                            "Unknown GLES version: AndroidManifest.xml not found",
                        );
                    }
                }
                Ok(Step::Continue)
            }
            Rule::EngineGate { libraries } => {
                match libraries.iter().find(|lib| app.has_library(lib.file)) {
                    Some(lib) => Ok(state.halt(
                        Portability::ImpossiblePort,
                        Severity::ImpossiblePort,
                        format!("{} found ({} engine)", lib.file, lib.engine),
                    )),
                    None => Ok(Step::Continue),
                }
            }
            Rule::AudioMiddlewareGate { abis, libraries } => {
                let found = libraries
                    .iter()
                    .find(|lib| abis.iter().any(|abi| app.has_abi_library(abi, lib.file)));

                match found {
                    Some(lib) if lib.support == AudioSupport::Supported => Ok(state.halt(
                        Portability::PossiblePort,
                        Severity::PossiblePort,
                        format!("Compatible FMOD audio middleware found ({})", lib.file),
                    )),
                    Some(lib) => Ok(state.halt(
                        Portability::ImpossiblePort,
                        Severity::ImpossiblePort,
                        format!("Unsupported FMOD variant found ({})", lib.file),
                    )),
                    None => Ok(Step::Continue),
                }
            }
            Rule::ManagedRuntimeGate { directories } => {
                match directories.iter().find(|dir| app.has_dir(dir)) {
                    Some(dir) => Ok(state.halt(
                        Portability::ImpossiblePort,
                        Severity::ImpossiblePort,
                        format!("Kotlin artifacts found ({dir}/)"),
                    )),
                    None => Ok(Step::Continue),
                }
            }
            Rule::Fallback => {
                if state.gles == GlesVersion::Gles3 {
                    Ok(state.halt(
                        Portability::AlmostImpossiblePort,
                        Severity::AlmostImpossible,
                        "GLES 3.0 required",
                    ))
                } else {
                    Ok(state.halt(
                        Portability::PossiblePort,
                        Severity::PossiblePort,
                        "No additional limitations found",
                    ))
                }
            }
        }
    }
}

/// An ordered list of rules evaluated first-match-terminates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The Vita port-feasibility procedure
    pub fn standard() -> Self {
        Self::new(vec![
            Rule::ArchitectureGate { abis: ARM_ABIS },
            Rule::GlesProbe,
            Rule::EngineGate {
                libraries: ENGINE_LIBRARIES,
            },
            Rule::AudioMiddlewareGate {
                abis: ARM_ABIS,
                libraries: AUDIO_LIBRARIES,
            },
            Rule::ManagedRuntimeGate {
                directories: MANAGED_RUNTIME_DIRS,
            },
            Rule::Fallback,
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run the rules against `app` until one of them halts
    pub fn evaluate(&self, app: &DecompiledApp) -> Result<Verdict> {
        let mut state = Evaluation::new();

        for rule in &self.rules {
            let step = rule.apply(app, &mut state)?;
            debug!("Rule {} on {:?}: {:?}", rule.name(), app.root(), step);

            if let Step::Halt(portability) = step {
                return Ok(state.into_verdict(portability));
            }
        }

        Ok(state.into_verdict(Portability::Inconclusive))
    }
}
