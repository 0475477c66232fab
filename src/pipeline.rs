//! End-to-end generation: registry XML in, Python module out.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::generator::{ApiGenerator, RunReport};
use crate::registry::{load_registry, Registry, RegistryWalker, WalkSummary};

/// What a run produced besides the text itself.
#[derive(Debug)]
pub struct Generated<W> {
    pub sink: W,
    pub report: RunReport,
    pub summary: WalkSummary,
}

/// Walk `registry` with `config`, writing the module to `sink`.
///
/// # Errors
///
/// Invalid selection patterns, sink failures and lifecycle violations.
pub fn generate_api<W: Write>(
    registry: &Registry,
    config: &GeneratorConfig,
    sink: W,
) -> anyhow::Result<Generated<W>> {
    let filter = config.feature_filter()?;
    let walker = RegistryWalker::new(registry, filter, config.api_name.as_str());
    let mut generator = ApiGenerator::new(&registry.types, config.generator_options(), sink);
    let summary = walker
        .walk(&mut generator)
        .context("Failed to generate API description")?;
    let (sink, report) = generator.finish();
    Ok(Generated {
        sink,
        report,
        summary,
    })
}

/// Generate into memory; nothing is written unless the whole run succeeds.
pub fn generate_to_string(
    registry: &Registry,
    config: &GeneratorConfig,
) -> anyhow::Result<(String, Generated<()>)> {
    let Generated {
        sink,
        report,
        summary,
    } = generate_api(registry, config, Vec::new())?;
    let text = String::from_utf8(sink).context("Generated output is not valid UTF-8")?;
    Ok((
        text,
        Generated {
            sink: (),
            report,
            summary,
        },
    ))
}

/// Load `registry_path`, generate, and write the result to `output_path`.
///
/// The output file is only touched after generation succeeds, so a failed
/// run never leaves a truncated module behind.
pub fn generate_file(
    registry_path: &Path,
    output_path: &Path,
    config: &GeneratorConfig,
) -> anyhow::Result<Generated<()>> {
    let registry = load_registry(registry_path, &config.api_name)?;
    let (text, generated) = generate_to_string(&registry, config)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory for {}", output_path.display()))?;
    }
    fs::write(output_path, text)
        .with_context(|| format!("Failed to write output: {}", output_path.display()))?;
    info!(
        output = %output_path.display(),
        features = generated.report.feature_names.len(),
        "Wrote API description"
    );
    Ok(generated)
}
