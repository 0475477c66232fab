//! Generator configuration
//!
//! Settings live in a `vk-api-gen.toml` file that sits alongside the
//! registry XML, or at a path given with `--config`. Every key is optional;
//! command-line flags override whatever the file sets.
//!
//! ```toml
//! api_name = "vulkan"
//! versions = "VK_VERSION_1_0"
//! extensions = "VK_KHR_.*"
//! remove_extensions = "VK_KHR_mir_surface"
//! headers = ["vulkan/vulkan.h"]
//! prefix_text = ["# Copyright (c) 2026 Example"]
//!
//! [platform]
//! wsi_extensions = ["VK_KHR_win32_surface", "VK_KHR_xcb_surface"]
//! base_extensions = ["VK_VERSION_1_0", "VK_KHR_surface"]
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::generator::{
    GeneratorOptions, PlatformRules, DEFAULT_BASE_EXTENSIONS, DEFAULT_HEADER,
    DEFAULT_WSI_EXTENSIONS,
};
use crate::registry::FeatureFilter;

/// File name looked up next to the registry.
pub const CONFIG_FILE_NAME: &str = "vk-api-gen.toml";

/// Generator configuration loaded from `vk-api-gen.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// API whose features are emitted (`api`/`supported` attributes)
    pub api_name: String,
    /// Core versions to emit, full-match regex
    pub versions: String,
    /// Extensions to emit, full-match regex
    pub extensions: String,
    /// Extensions to drop even if `extensions` matches
    pub remove_extensions: Option<String>,
    /// Headers listed in each `Extension(headers=[...])`
    pub headers: Vec<String>,
    /// Lines written before the generated-file banner
    pub prefix_text: Vec<String>,
    pub platform: PlatformConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            api_name: "vulkan".to_string(),
            versions: ".*".to_string(),
            extensions: ".*".to_string(),
            remove_extensions: None,
            headers: vec![DEFAULT_HEADER.to_string()],
            prefix_text: Vec::new(),
            platform: PlatformConfig::default(),
        }
    }
}

/// Overrides for the platform partitioning lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformConfig {
    /// Platform extensions that count as WSI rather than platform-only
    pub wsi_extensions: Vec<String>,
    /// Features shared by every platform
    pub base_extensions: Vec<String>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        PlatformConfig {
            wsi_extensions: DEFAULT_WSI_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            base_extensions: DEFAULT_BASE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GeneratorConfig {
    /// Compile the feature selection patterns.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending key if a pattern is not a valid
    /// regex.
    pub fn feature_filter(&self) -> anyhow::Result<FeatureFilter> {
        // Compile each pattern on its own first so the error names the key.
        for (key, pattern) in [
            ("versions", Some(self.versions.as_str())),
            ("extensions", Some(self.extensions.as_str())),
            ("remove_extensions", self.remove_extensions.as_deref()),
        ] {
            if let Some(pattern) = pattern {
                regex::Regex::new(pattern)
                    .with_context(|| format!("Invalid `{key}` pattern: {pattern}"))?;
            }
        }
        FeatureFilter::new(
            &self.versions,
            &self.extensions,
            self.remove_extensions.as_deref(),
        )
        .context("Invalid feature selection pattern")
    }

    pub fn platform_rules(&self) -> PlatformRules {
        PlatformRules::new(
            self.platform.wsi_extensions.clone(),
            self.platform.base_extensions.clone(),
        )
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            headers: self.headers.clone(),
            prefix_text: self.prefix_text.clone(),
            platform_rules: self.platform_rules(),
        }
    }
}

/// Load generator configuration from a TOML file
///
/// # Returns
///
/// Returns `Ok(Some(config))` if the file exists and parses successfully,
/// `Ok(None)` if it doesn't exist (not an error),
/// `Err` if it exists but fails to parse.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path).with_context(|| {
        format!(
            "Failed to read generator config: {}",
            config_path.display()
        )
    })?;

    let config: GeneratorConfig = toml::from_str(&contents).with_context(|| {
        format!(
            "Failed to parse generator config: {}",
            config_path.display()
        )
    })?;

    Ok(Some(config))
}

/// Auto-detect `vk-api-gen.toml` in the registry's directory.
pub fn auto_detect_config_path(registry_path: &Path) -> Option<PathBuf> {
    let config_path = registry_path.parent()?.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the registry
/// 3. None (defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, registry_path: &Path) -> Option<PathBuf> {
    match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => auto_detect_config_path(registry_path),
    }
}

/// Resolve and load the configuration for `registry_path`, falling back to
/// defaults when no file is found.
///
/// # Errors
///
/// An explicitly requested file that does not exist is an error, as is any
/// file that fails to parse.
pub fn load_for_registry(
    explicit_path: Option<&Path>,
    registry_path: &Path,
) -> anyhow::Result<GeneratorConfig> {
    let Some(path) = resolve_config_path(explicit_path, registry_path) else {
        return Ok(GeneratorConfig::default());
    };
    match load_config(&path)? {
        Some(config) => {
            tracing::debug!(config = %path.display(), "Loaded generator config");
            Ok(config)
        }
        None => anyhow::bail!("Config file not found: {}", path.display()),
    }
}
