use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use vita_port_check::classifier::{classify, declared_gles_version, DecompiledApp};
use vita_port_check::cli::{
    print_gles_declaration, print_verdict, print_verdict_json, tracing_level, Commands,
    DecompileOptions, OutputFormat, VitaPortCli,
};
use vita_port_check::config::ToolConfig;
use vita_port_check::decompile::ApktoolDecompiler;
use vita_port_check::package::VpkPackager;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = VitaPortCli::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing_level(cli.verbosity))
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting vita-port-check v{}", env!("CARGO_PKG_VERSION"));

    let config = ToolConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Decompile { apk, tools } => {
            let output = run_decompile(&apk, &tools, &config, false).await?;
            println!("APK decompiled successfully. Output folder: {}", output.display());
        }
        Commands::Check { dir, format } => {
            run_check(&dir, format)?;
        }
        Commands::Analyze { apk, tools, format } => {
            let output =
                run_decompile(&apk, &tools, &config, format == OutputFormat::Json).await?;
            run_check(&output, format)?;
        }
        Commands::Gles { dir } => {
            let app = DecompiledApp::open(&dir)?;
            let manifest = app
                .manifest()?
                .with_context(|| format!("No AndroidManifest.xml in {}", dir.display()))?;
            print_gles_declaration(declared_gles_version(manifest).as_ref());
        }
        Commands::Package {
            dir,
            output,
            vpk_tool,
            title,
            content_id,
        } => {
            let vpk_tool = vpk_tool
                .or_else(|| config.vpk_tool.clone())
                .context("No VPK tool configured; pass --vpk-tool or set vpk_tool in the config")?;

            let mut metadata = config.package.clone();
            if let Some(title) = title {
                metadata = metadata.with_title(title);
            }
            if let Some(content_id) = content_id {
                metadata = metadata.with_content_id(content_id);
            }

            let vpk = VpkPackager::new(vpk_tool)
                .metadata(metadata)
                .package(&dir, &output)
                .await
                .with_context(|| format!("Failed to package {}", dir.display()))?;
            println!("VPK file '{}' created successfully.", vpk.display());
        }
    }

    Ok(())
}

async fn run_decompile(
    apk: &Path,
    tools: &DecompileOptions,
    config: &ToolConfig,
    tool_output_to_stderr: bool,
) -> Result<PathBuf> {
    let apktool_jar = tools
        .apktool
        .clone()
        .or_else(|| config.apktool_jar.clone())
        .context("No apktool.jar configured; pass --apktool or set apktool_jar in the config")?;

    let decompiler = match tools.java.clone().or_else(|| config.java.clone()) {
        Some(java) => ApktoolDecompiler::with_java(java, apktool_jar),
        None => ApktoolDecompiler::new(apktool_jar)?,
    }
    .work_dir(&config.work_dir)
    .force(tools.force);

    let output = decompiler
        .decompile(apk, tools.output.as_deref(), |line| {
            if tool_output_to_stderr {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        })
        .await
        .with_context(|| format!("APK decompilation failed for {}", apk.display()))?;

    info!("Decompiled tree at {:?}", output);
    Ok(output)
}

fn run_check(dir: &Path, format: OutputFormat) -> Result<()> {
    let app = DecompiledApp::open(dir)?;
    let verdict = classify(&app).with_context(|| format!("Failed to classify {}", dir.display()))?;

    match format {
        OutputFormat::Text => print_verdict(app.root(), &verdict),
        OutputFormat::Json => print_verdict_json(app.root(), &verdict)?,
    }

    Ok(())
}
