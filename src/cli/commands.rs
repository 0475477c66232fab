use crate::config::{load_for_registry, GeneratorConfig};
use crate::generator::{ExtensionSelection, Platform, PlatformBuckets};
use crate::pipeline::{generate_api, generate_file, generate_to_string};
use crate::registry::load_registry;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Command-line interface for vk-api-gen
///
/// Generates a Python description of the Vulkan API from the registry XML
/// and inspects what a run would produce.
#[derive(Parser, Debug)]
#[command(name = "vk-api-gen", version)]
#[command(about = "Vulkan API description generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the Python API description
    Generate {
        /// Path to the registry XML (vk.xml)
        #[arg(short, long)]
        registry: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Show the object lists, platform buckets and selected extensions
    ///
    /// Runs the same pipeline as `generate` but prints a summary instead of
    /// the generated module.
    Inspect {
        /// Path to the registry XML (vk.xml)
        #[arg(short, long)]
        registry: PathBuf,

        /// Display-server token to resolve (Win32, Xcb, Xlib, Wayland, Mir,
        /// Display, Android); unrecognized tokens select every platform
        #[arg(long)]
        display_server: Option<String>,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        #[command(flatten)]
        selection: SelectionArgs,
    },
}

/// Options shared by every command that runs the generator
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionArgs {
    /// Path to the config file (vk-api-gen.toml)
    /// If not provided, will auto-detect alongside the registry
    #[arg(short, long, env = "VKGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// API name to generate for
    #[arg(long)]
    pub api: Option<String>,

    /// Core versions to emit (full-match regex)
    #[arg(long)]
    pub versions: Option<String>,

    /// Extensions to emit (full-match regex)
    #[arg(long)]
    pub extensions: Option<String>,

    /// Extensions to drop (full-match regex)
    #[arg(long)]
    pub remove_extensions: Option<String>,
}

impl SelectionArgs {
    /// Load the config for `registry` and apply flag overrides on top.
    pub fn resolve(&self, registry: &Path) -> anyhow::Result<GeneratorConfig> {
        let mut config = load_for_registry(self.config.as_deref(), registry)?;
        self.apply(&mut config);
        Ok(config)
    }

    pub fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(api) = &self.api {
            config.api_name = api.clone();
        }
        if let Some(versions) = &self.versions {
            config.versions = versions.clone();
        }
        if let Some(extensions) = &self.extensions {
            config.extensions = extensions.clone();
        }
        if let Some(remove) = &self.remove_extensions {
            config.remove_extensions = Some(remove.clone());
        }
    }
}

/// Summary printed by `inspect`
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub api: String,
    pub features: Vec<String>,
    pub dispatchable_objects: Vec<String>,
    pub non_dispatchable_objects: Vec<String>,
    pub buckets: PlatformBuckets,
    pub display_server: Option<String>,
    /// Platform the token selected; `None` means all of them
    pub platform: Option<Platform>,
    pub selection: ExtensionSelection,
    pub skipped_commands: Vec<String>,
}

impl Inspection {
    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "api: {}", self.api)?;
        writeln!(out, "features ({}):", self.features.len())?;
        for name in &self.features {
            writeln!(out, "  {name}")?;
        }
        write_list(out, "dispatchable objects", &self.dispatchable_objects)?;
        write_list(out, "non-dispatchable objects", &self.non_dispatchable_objects)?;
        writeln!(out, "buckets:")?;
        for (bucket, names) in self.buckets.iter() {
            writeln!(out, "  {bucket:?}: {}", names.join(", "))?;
        }
        match (&self.display_server, self.platform) {
            (Some(token), Some(platform)) => {
                writeln!(out, "display server: {token} ({platform})")?
            }
            (Some(token), None) => writeln!(out, "display server: {token} (all platforms)")?,
            (None, _) => writeln!(out, "display server: none (all platforms)")?,
        }
        write_list(out, "extensions", &self.selection.extensions)?;
        write_list(out, "extensions_all", &self.selection.extensions_all)?;
        if !self.skipped_commands.is_empty() {
            write_list(out, "skipped commands", &self.skipped_commands)?;
        }
        Ok(())
    }
}

fn write_list<W: Write>(out: &mut W, label: &str, items: &[String]) -> io::Result<()> {
    writeln!(out, "{label} ({}):", items.len())?;
    for item in items {
        writeln!(out, "  {item}")?;
    }
    Ok(())
}

/// Build the `inspect` summary for `registry_path`.
pub fn inspect(
    registry_path: &Path,
    config: &GeneratorConfig,
    display_server: Option<&str>,
) -> anyhow::Result<Inspection> {
    let registry = load_registry(registry_path, &config.api_name)?;
    let (_, generated) = generate_to_string(&registry, config)?;
    let report = generated.report;
    let buckets = report
        .buckets
        .context("Generator finished without partitioning features")?;
    let platform = display_server.and_then(Platform::from_display_server);
    let selection = buckets.select(platform);
    Ok(Inspection {
        api: config.api_name.clone(),
        features: report.feature_names,
        dispatchable_objects: report.dispatchable_objects,
        non_dispatchable_objects: report.non_dispatchable_objects,
        buckets,
        display_server: display_server.map(str::to_string),
        platform,
        selection,
        skipped_commands: generated.summary.skipped_commands,
    })
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The registry or config file cannot be read or parsed
/// - A selection pattern is not a valid regex
/// - Generation fails or the output cannot be written
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

/// Run `cli`, writing anything destined for stdout to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            registry,
            output,
            selection,
        } => {
            let config = selection.resolve(&registry)?;
            match output {
                Some(path) => {
                    let generated = generate_file(&registry, &path, &config)?;
                    eprintln!(
                        "✅ Wrote {} features to {}",
                        generated.report.feature_names.len(),
                        path.display()
                    );
                }
                None => {
                    let loaded = load_registry(&registry, &config.api_name)?;
                    generate_api(&loaded, &config, &mut *out)?;
                }
            }
            Ok(())
        }
        Commands::Inspect {
            registry,
            display_server,
            json,
            selection,
        } => {
            let config = selection.resolve(&registry)?;
            let inspection = inspect(&registry, &config, display_server.as_deref())?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &inspection)
                    .context("Failed to serialize inspection")?;
                writeln!(out)?;
            } else {
                inspection.write_text(out)?;
            }
            Ok(())
        }
    }
}
