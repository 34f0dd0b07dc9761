//! OpenGL ES requirement detection from `AndroidManifest.xml`

use crate::types::GlesVersion;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Manifest substrings checked in order; the first one present wins
pub const GLES_TOKENS: &[(&str, GlesVersion)] = &[
    (r#"android:glEsVersion="0x00010000""#, GlesVersion::Gles1),
    (r#"android:glEsVersion="0x00020000""#, GlesVersion::Gles2),
    (r#"android:glEsVersion="0x00030000""#, GlesVersion::Gles3),
];

static GLES_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"android:glEsVersion="([^"]*)""#).expect("GLES attribute pattern is valid")
});

/// Match the manifest against the fixed GLES tokens
pub fn detect_gles_token(manifest: &str) -> GlesVersion {
    GLES_TOKENS
        .iter()
        .find(|(token, _)| manifest.contains(token))
        .map(|(_, version)| *version)
        .unwrap_or(GlesVersion::Unknown)
}

/// GLES version as literally declared by `android:glEsVersion`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlesDeclaration {
    pub raw: String,
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for GlesDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Parse the first `android:glEsVersion` attribute of a manifest.
///
/// Accepts the packed form written by aapt (`0x00020000`, major in the high
/// 16 bits) and a dotted decimal form (`2.0`). Returns `None` when the
/// attribute is missing or its value is neither.
pub fn declared_gles_version(manifest: &str) -> Option<GlesDeclaration> {
    let raw = GLES_ATTRIBUTE.captures(manifest)?.get(1)?.as_str();
    let (major, minor) = parse_packed(raw).or_else(|| parse_dotted(raw))?;

    Some(GlesDeclaration {
        raw: raw.to_string(),
        major,
        minor,
    })
}

fn parse_packed(raw: &str) -> Option<(u32, u32)> {
    let hex = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))?;
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some((value >> 16, value & 0xffff))
}

fn parse_dotted(raw: &str) -> Option<(u32, u32)> {
    let (major, minor) = raw.split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}
