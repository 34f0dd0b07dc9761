use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Decompile Android APKs and judge whether they could be ported to the PS Vita
#[derive(Parser)]
#[command(name = "vita-port-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct VitaPortCli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to <config dir>/vita-port-check/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decompile an APK with apktool
    Decompile {
        /// APK file to decompile
        apk: PathBuf,
        #[command(flatten)]
        tools: DecompileOptions,
    },

    /// Classify an already decompiled APK tree
    Check {
        /// Directory produced by apktool
        dir: PathBuf,
        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Decompile an APK and classify the result
    Analyze {
        /// APK file to analyze
        apk: PathBuf,
        #[command(flatten)]
        tools: DecompileOptions,
        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the GLES version declared in a decompiled tree's manifest
    Gles {
        /// Directory produced by apktool
        dir: PathBuf,
    },

    /// Build a VPK from a decompiled tree with an external VPK tool
    Package {
        /// Directory produced by apktool
        dir: PathBuf,
        /// VPK file to write
        #[arg(short, long, default_value = "output.vpk")]
        output: PathBuf,
        /// VPK packaging executable
        #[arg(long)]
        vpk_tool: Option<PathBuf>,
        /// Title written to param.sfo
        #[arg(long)]
        title: Option<String>,
        /// 9-character content ID written to param.sfo
        #[arg(long)]
        content_id: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DecompileOptions {
    /// Output directory (defaults to decompiled_<name>_apk)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Path to apktool.jar
    #[arg(long)]
    pub apktool: Option<PathBuf>,
    /// Java executable
    #[arg(long)]
    pub java: Option<PathBuf>,
    /// Overwrite an existing output directory
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Maximum tracing level for a `-v` count
pub fn tracing_level(verbosity: u8) -> tracing::Level {
    match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}
