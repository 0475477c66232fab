//! Registry traversal.
//!
//! Selects and orders the features to emit, then drives an
//! [`OutputGenerator`] through `begin_file`, one
//! `begin_feature` / `gen_cmd`* / `end_feature` block per feature, and
//! `end_file`. Each command is visited once, under the first selected
//! feature that requires it.

use super::types::{FeatureKind, FeatureNode, Registry};
use crate::generator::{GeneratorError, OutputGenerator};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Name filters deciding which features take part in a run.
///
/// Patterns must match the whole feature name. `None` accepts everything.
#[derive(Debug, Clone, Default)]
pub struct FeatureFilter {
    versions: Option<Regex>,
    extensions: Option<Regex>,
    remove_extensions: Option<Regex>,
}

impl FeatureFilter {
    pub fn new(
        versions: &str,
        extensions: &str,
        remove_extensions: Option<&str>,
    ) -> Result<Self, regex::Error> {
        Ok(FeatureFilter {
            versions: Some(full_match(versions)?),
            extensions: Some(full_match(extensions)?),
            remove_extensions: remove_extensions.map(full_match).transpose()?,
        })
    }

    /// Whether `feature` is emitted for `api`.
    pub fn accepts(&self, feature: &FeatureNode, api: &str) -> bool {
        if !feature.supports(api) {
            return false;
        }
        let name = feature.name.as_str();
        match feature.kind {
            FeatureKind::Core { .. } => self.versions.as_ref().map_or(true, |re| re.is_match(name)),
            FeatureKind::Extension { .. } => {
                let wanted = self
                    .extensions
                    .as_ref()
                    .map_or(true, |re| re.is_match(name));
                let removed = self
                    .remove_extensions
                    .as_ref()
                    .is_some_and(|re| re.is_match(name));
                wanted && !removed
            }
        }
    }
}

fn full_match(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

/// Counters reported after a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub features: usize,
    pub commands: usize,
    /// Required commands that have no definition in the command table.
    pub skipped_commands: Vec<String>,
}

/// Drives an [`OutputGenerator`] over a parsed [`Registry`].
pub struct RegistryWalker<'r> {
    registry: &'r Registry,
    filter: FeatureFilter,
    api: String,
}

impl<'r> RegistryWalker<'r> {
    pub fn new(registry: &'r Registry, filter: FeatureFilter, api: impl Into<String>) -> Self {
        RegistryWalker {
            registry,
            filter,
            api: api.into(),
        }
    }

    /// Selected features in emission order: core versions by version number,
    /// then extensions by extension number. Ties keep document order.
    pub fn selected_features(&self) -> Vec<&'r FeatureNode> {
        let mut features: Vec<&FeatureNode> = self
            .registry
            .features
            .iter()
            .filter(|f| self.filter.accepts(f, &self.api))
            .collect();
        features.sort_by(|a, b| feature_order(a, b));
        features
    }

    /// Run the full lifecycle against `generator`.
    ///
    /// # Errors
    ///
    /// Stops at the first error the generator reports.
    pub fn walk<G: OutputGenerator>(&self, generator: &mut G) -> Result<WalkSummary, GeneratorError> {
        let features = self.selected_features();
        info!(
            api = %self.api,
            features = features.len(),
            "Walking registry"
        );

        let mut summary = WalkSummary::default();
        let mut visited: HashSet<&str> = HashSet::new();

        generator.begin_file()?;
        for feature in features {
            generator.begin_feature(&feature.name, feature.protect())?;
            for name in &feature.commands {
                if !visited.insert(name.as_str()) {
                    continue;
                }
                match self.registry.resolve_command(name) {
                    Some(cmd) => {
                        generator.gen_cmd(&cmd)?;
                        summary.commands += 1;
                    }
                    None => {
                        warn!(feature = %feature.name, command = %name, "Required command not defined, skipping");
                        summary.skipped_commands.push(name.clone());
                    }
                }
            }
            generator.end_feature()?;
            summary.features += 1;
            debug!(feature = %feature.name, "Feature walked");
        }
        generator.end_file()?;

        Ok(summary)
    }
}

fn feature_order(a: &FeatureNode, b: &FeatureNode) -> Ordering {
    match (&a.kind, &b.kind) {
        (FeatureKind::Core { version: x }, FeatureKind::Core { version: y }) => x.cmp(y),
        (FeatureKind::Core { .. }, FeatureKind::Extension { .. }) => Ordering::Less,
        (FeatureKind::Extension { .. }, FeatureKind::Core { .. }) => Ordering::Greater,
        (FeatureKind::Extension { number: x, .. }, FeatureKind::Extension { number: y, .. }) => {
            x.cmp(y)
        }
    }
}
