use crate::classifier::GlesDeclaration;
use crate::types::{Portability, Severity, Verdict};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "•",
        Severity::PossiblePort => "✅",
        Severity::ImpossiblePort => "❌",
        Severity::AlmostImpossible => "⚠️ ",
    }
}

fn portability_icon(portability: Portability) -> &'static str {
    match portability {
        Portability::PossiblePort => "✅",
        Portability::AlmostImpossiblePort => "⚠️ ",
        Portability::ImpossiblePort => "❌",
        Portability::Inconclusive => "❔",
    }
}

/// Human-readable port report
pub fn render_verdict(app_root: &Path, verdict: &Verdict) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "🔍 Port Feasibility: {}", app_root.display());
    let _ = writeln!(out, "=========================================");
    let _ = writeln!(out);
    let _ = writeln!(out, "📋 Findings:");
    for finding in &verdict.findings {
        let _ = writeln!(out, "  {} {}", severity_icon(finding.severity), finding);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "🎮 GLES: {}", verdict.gles);
    let _ = writeln!(
        out,
        "{} Verdict: {}",
        portability_icon(verdict.portability),
        verdict.portability
    );

    out
}

pub fn print_verdict(app_root: &Path, verdict: &Verdict) {
    print!("{}", render_verdict(app_root, verdict));
}

#[derive(Serialize)]
struct VerdictJson<'a> {
    app: &'a Path,
    #[serde(flatten)]
    verdict: &'a Verdict,
}

pub fn render_verdict_json(
    app_root: &Path,
    verdict: &Verdict,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&VerdictJson {
        app: app_root,
        verdict,
    })
}

pub fn print_verdict_json(app_root: &Path, verdict: &Verdict) -> Result<(), serde_json::Error> {
    println!("{}", render_verdict_json(app_root, verdict)?);
    Ok(())
}

pub fn print_gles_declaration(declaration: Option<&GlesDeclaration>) {
    match declaration {
        Some(declaration) => println!("GLES Version: {declaration} ({})", declaration.raw),
        None => println!("GLES Version not found in the AndroidManifest.xml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Finding, GlesVersion};

    fn sample_verdict() -> Verdict {
        Verdict {
            portability: Portability::PossiblePort,
            gles: GlesVersion::Gles2,
            findings: vec![
                Finding::info("ARMv6 or ARMv7 executable is present"),
                Finding::info("GLES 2.0 is supported"),
                Finding::new(Severity::PossiblePort, "No additional limitations found"),
            ],
        }
    }

    #[test]
    fn test_render_verdict_text() {
        let text = render_verdict(Path::new("decompiled_game_apk"), &sample_verdict());

        assert!(text.contains("decompiled_game_apk"));
        assert!(text.contains("GLES 2.0 is supported"));
        assert!(text.contains("POSSIBLE PORT: No additional limitations found"));
        assert!(text.contains("Verdict: Possible port"));
    }

    #[test]
    fn test_render_verdict_json() {
        let json =
            render_verdict_json(Path::new("decompiled_game_apk"), &sample_verdict()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["app"], "decompiled_game_apk");
        assert_eq!(value["portability"], "possible_port");
        assert_eq!(value["gles"], "gles2");
        assert_eq!(value["findings"][2]["severity"], "possible_port");
    }
}
