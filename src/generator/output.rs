use std::io::Write;

use askama::Template;
use serde::Serialize;
use tracing::{debug, info};

use super::aggregate::GlobalRegistry;
use super::classify::{HandleClassification, TypeClassifier};
use super::error::{GeneratorError, ProtocolViolation};
use super::feature::{Feature, FeatureState};
use super::platform::{PlatformBuckets, PlatformRules};
use super::templates::{ExtensionListsTemplate, PreludeTemplate};
use crate::registry::{CommandNode, TypeTable};

/// Default header every emitted `Extension` lists.
pub const DEFAULT_HEADER: &str = "vulkan/vulkan.h";

/// Lifecycle hooks driven by the registry walker.
///
/// Calls arrive as `begin_file`, then `begin_feature` / `gen_cmd`* /
/// `end_feature` for each selected feature, then `end_file`.
pub trait OutputGenerator {
    fn begin_file(&mut self) -> Result<(), GeneratorError>;

    fn begin_feature(&mut self, name: &str, extra_protect: Option<&str>)
        -> Result<(), GeneratorError>;

    fn gen_cmd(&mut self, cmd: &CommandNode) -> Result<(), GeneratorError>;

    fn end_feature(&mut self) -> Result<(), GeneratorError>;

    fn end_file(&mut self) -> Result<(), GeneratorError>;
}

/// Settings that shape the emitted text but not the collected data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Headers listed in every `Extension(headers=[...])`
    pub headers: Vec<String>,
    /// Lines written ahead of the banner, typically a license block
    pub prefix_text: Vec<String>,
    pub platform_rules: PlatformRules,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            headers: vec![DEFAULT_HEADER.to_string()],
            prefix_text: Vec::new(),
            platform_rules: PlatformRules::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    NotStarted,
    Running,
    Finished,
}

/// Everything a completed run collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub dispatchable_objects: Vec<String>,
    pub non_dispatchable_objects: Vec<String>,
    /// Completed features in emission order
    pub feature_names: Vec<String>,
    /// `None` unless `end_file` ran
    pub buckets: Option<PlatformBuckets>,
}

/// Writes the Python API description to `W` as the walker drives it.
///
/// Feature blocks are written when they close, so a sink only ever sees
/// whole `Extension(...)` constructors.
pub struct ApiGenerator<'r, W: Write> {
    sink: W,
    classifier: TypeClassifier<'r>,
    state: FeatureState,
    registry: GlobalRegistry,
    run: RunState,
    options: GeneratorOptions,
    buckets: Option<PlatformBuckets>,
}

impl<'r, W: Write> ApiGenerator<'r, W> {
    pub fn new(types: &'r TypeTable, options: GeneratorOptions, sink: W) -> Self {
        ApiGenerator {
            sink,
            classifier: TypeClassifier::new(types),
            state: FeatureState::default(),
            registry: GlobalRegistry::new(),
            run: RunState::NotStarted,
            options,
            buckets: None,
        }
    }

    /// Run-wide object lists and feature names collected so far.
    pub fn registry(&self) -> &GlobalRegistry {
        &self.registry
    }

    /// The open feature, if any.
    pub fn current_feature(&self) -> Option<&Feature> {
        self.state.current()
    }

    /// Hand back the sink together with what the run collected.
    pub fn finish(self) -> (W, RunReport) {
        let report = RunReport {
            dispatchable_objects: self.registry.dispatchable_objects().to_vec(),
            non_dispatchable_objects: self.registry.non_dispatchable_objects().to_vec(),
            feature_names: self.registry.feature_names().to_vec(),
            buckets: self.buckets,
        };
        (self.sink, report)
    }

    fn ensure_running(&self, operation: &'static str) -> Result<(), ProtocolViolation> {
        match self.run {
            RunState::Running => Ok(()),
            RunState::NotStarted => Err(ProtocolViolation::RunNotStarted { operation }),
            RunState::Finished => Err(ProtocolViolation::RunAlreadyFinished { operation }),
        }
    }

    fn headers_literal(&self) -> String {
        let quoted: Vec<String> = self
            .options
            .headers
            .iter()
            .map(|h| format!("\"{h}\""))
            .collect();
        format!("[{}]", quoted.join(", "))
    }

    fn write_feature_tail(&mut self, feature: &Feature) -> Result<(), GeneratorError> {
        let out = &mut self.sink;
        writeln!(
            out,
            "    ifdef=\"{}\",",
            feature.extra_protect.as_deref().unwrap_or_default()
        )?;

        if feature.objects.is_empty() {
            writeln!(out, "    objects=[],")?;
        } else {
            writeln!(out, "    objects=[")?;
            for name in feature.object_names() {
                writeln!(out, "        \"{name}\",")?;
            }
            writeln!(out, "    ],")?;
        }

        if feature.protos.is_empty() {
            writeln!(out, "    protos=[],")?;
        } else {
            writeln!(out, "    protos=[")?;
            for proto in &feature.protos {
                write!(out, "{proto}")?;
            }
            writeln!(out, "    ],")?;
        }

        writeln!(out, ")")?;
        writeln!(out)?;
        Ok(())
    }
}

impl<W: Write> OutputGenerator for ApiGenerator<'_, W> {
    fn begin_file(&mut self) -> Result<(), GeneratorError> {
        match self.run {
            RunState::NotStarted => {}
            RunState::Running => return Err(ProtocolViolation::RunAlreadyStarted.into()),
            RunState::Finished => {
                return Err(ProtocolViolation::RunAlreadyFinished {
                    operation: "begin_file",
                }
                .into())
            }
        }
        let prelude = PreludeTemplate {
            prefix_text: &self.options.prefix_text,
        }
        .render()?;
        self.sink.write_all(prelude.as_bytes())?;
        writeln!(self.sink)?;
        self.run = RunState::Running;
        Ok(())
    }

    fn begin_feature(
        &mut self,
        name: &str,
        extra_protect: Option<&str>,
    ) -> Result<(), GeneratorError> {
        self.ensure_running("begin_feature")?;
        self.state.begin(name, extra_protect)?;
        debug!(feature = name, protect = ?extra_protect, "begin feature");

        let headers = self.headers_literal();
        writeln!(self.sink, "{name} = Extension(")?;
        writeln!(self.sink, "    name=\"{name}\",")?;
        writeln!(self.sink, "    headers={headers},")?;
        Ok(())
    }

    fn gen_cmd(&mut self, cmd: &CommandNode) -> Result<(), GeneratorError> {
        self.ensure_running("gen_cmd")?;
        self.state
            .visit_command(cmd, &self.classifier, &self.registry)?;
        Ok(())
    }

    fn end_feature(&mut self) -> Result<(), GeneratorError> {
        self.ensure_running("end_feature")?;
        let feature = self.state.end()?;
        self.registry.add_feature_name(&feature.name)?;
        self.write_feature_tail(&feature)?;

        for classification in [
            HandleClassification::Dispatchable,
            HandleClassification::NonDispatchable,
        ] {
            self.registry
                .add_objects(classification, feature.objects_of(classification));
        }
        debug!(
            feature = %feature.name,
            objects = feature.objects.len(),
            protos = feature.protos.len(),
            "end feature"
        );
        Ok(())
    }

    fn end_file(&mut self) -> Result<(), GeneratorError> {
        self.ensure_running("end_file")?;
        if let Some(open) = self.state.current() {
            return Err(ProtocolViolation::UnclosedFeature {
                name: open.name.clone(),
            }
            .into());
        }

        let buckets = self
            .options
            .platform_rules
            .partition(self.registry.feature_names().iter().map(String::as_str));
        let tail = ExtensionListsTemplate::new(
            self.registry.dispatchable_objects(),
            self.registry.non_dispatchable_objects(),
            &buckets,
        )
        .render()?;
        self.sink.write_all(tail.as_bytes())?;
        writeln!(self.sink)?;
        self.sink.flush()?;

        info!(
            features = self.registry.feature_names().len(),
            dispatchable = self.registry.dispatchable_objects().len(),
            non_dispatchable = self.registry.non_dispatchable_objects().len(),
            "generated API description"
        );
        self.buckets = Some(buckets);
        self.run = RunState::Finished;
        Ok(())
    }
}
