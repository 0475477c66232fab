use super::aggregate::GlobalRegistry;
use super::classify::{HandleClassification, TypeClassifier};
use super::command::{extract_command, CommandPrototype};
use super::error::ProtocolViolation;
use crate::registry::CommandNode;
use serde::Serialize;

/// A handle type first referenced by a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureObject {
    pub name: String,
    pub classification: HandleClassification,
}

/// Output buffered for one core version or extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub name: String,
    pub extra_protect: Option<String>,
    /// Handles this feature introduces, in first-seen order.
    pub objects: Vec<FeatureObject>,
    pub protos: Vec<CommandPrototype>,
}

impl Feature {
    pub fn new(name: impl Into<String>, extra_protect: Option<String>) -> Self {
        Feature {
            name: name.into(),
            extra_protect,
            objects: Vec::new(),
            protos: Vec::new(),
        }
    }

    pub fn has_object(&self, name: &str) -> bool {
        self.objects.iter().any(|o| o.name == name)
    }

    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|o| o.name.as_str())
    }

    /// Object names with the given classification, in feature order.
    pub fn objects_of(&self, classification: HandleClassification) -> impl Iterator<Item = &str> {
        self.objects
            .iter()
            .filter(move |o| o.classification == classification)
            .map(|o| o.name.as_str())
    }
}

/// At most one feature is open at a time.
#[derive(Debug, Default)]
pub enum FeatureState {
    #[default]
    Closed,
    Open(Feature),
}

impl FeatureState {
    pub fn is_open(&self) -> bool {
        matches!(self, FeatureState::Open(_))
    }

    pub fn current(&self) -> Option<&Feature> {
        match self {
            FeatureState::Open(feature) => Some(feature),
            FeatureState::Closed => None,
        }
    }

    /// `Closed → Open` with a fresh, empty feature.
    ///
    /// # Errors
    ///
    /// [`ProtocolViolation::FeatureAlreadyOpen`] if a feature is open; the
    /// open feature is left untouched.
    pub fn begin(
        &mut self,
        name: &str,
        extra_protect: Option<&str>,
    ) -> Result<(), ProtocolViolation> {
        if let FeatureState::Open(open) = self {
            return Err(ProtocolViolation::FeatureAlreadyOpen {
                open: open.name.clone(),
                requested: name.to_string(),
            });
        }
        *self = FeatureState::Open(Feature::new(name, extra_protect.map(str::to_string)));
        Ok(())
    }

    /// Add `cmd` to the open feature.
    ///
    /// Every handle parameter whose type is neither in this feature's objects
    /// nor already registered globally becomes one of this feature's objects.
    ///
    /// # Errors
    ///
    /// [`ProtocolViolation::NoOpenFeature`] when closed.
    pub fn visit_command(
        &mut self,
        cmd: &CommandNode,
        classifier: &TypeClassifier<'_>,
        global: &GlobalRegistry,
    ) -> Result<(), ProtocolViolation> {
        let FeatureState::Open(feature) = self else {
            return Err(ProtocolViolation::NoOpenFeature {
                operation: "gen_cmd",
            });
        };

        let proto = extract_command(cmd);
        for param in &proto.params {
            let base = param.ty.base();
            let classification = classifier.classify(base);
            if classification.is_handle() && !feature.has_object(base) && !global.contains_object(base)
            {
                feature.objects.push(FeatureObject {
                    name: base.to_string(),
                    classification,
                });
            }
        }
        feature.protos.push(proto);
        Ok(())
    }

    /// `Open → Closed`, handing back the sealed feature.
    ///
    /// # Errors
    ///
    /// [`ProtocolViolation::NoOpenFeature`] when already closed.
    pub fn end(&mut self) -> Result<Feature, ProtocolViolation> {
        match std::mem::take(self) {
            FeatureState::Open(feature) => Ok(feature),
            FeatureState::Closed => Err(ProtocolViolation::NoOpenFeature {
                operation: "end_feature",
            }),
        }
    }
}
