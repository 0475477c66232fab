use super::classify::HandleClassification;
use super::error::ProtocolViolation;
use serde::Serialize;
use std::collections::HashSet;

/// Insertion-ordered set of names. Positions never change once assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedNames {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless present. Returns whether it was added.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.order.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Serialize for OrderedNames {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}

/// Run-wide accumulation of handle objects and completed feature names.
///
/// Grows monotonically from `begin_file` to `end_file`; nothing is ever
/// removed or reordered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GlobalRegistry {
    dispatchable_objects: OrderedNames,
    non_dispatchable_objects: OrderedNames,
    feature_names: OrderedNames,
}

impl GlobalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `names` into the list for `classification`, skipping names
    /// already present. `NotAHandle` names are ignored.
    pub fn add_objects<'a, I>(&mut self, classification: HandleClassification, names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let list = match classification {
            HandleClassification::Dispatchable => &mut self.dispatchable_objects,
            HandleClassification::NonDispatchable => &mut self.non_dispatchable_objects,
            HandleClassification::NotAHandle => return,
        };
        for name in names {
            list.insert(name);
        }
    }

    /// Record a completed feature.
    ///
    /// # Errors
    ///
    /// [`ProtocolViolation::DuplicateFeature`] if `name` was already recorded;
    /// the registry is left unchanged.
    pub fn add_feature_name(&mut self, name: &str) -> Result<(), ProtocolViolation> {
        if self.feature_names.insert(name) {
            Ok(())
        } else {
            Err(ProtocolViolation::DuplicateFeature {
                name: name.to_string(),
            })
        }
    }

    /// Whether `name` is in either object list.
    pub fn contains_object(&self, name: &str) -> bool {
        self.dispatchable_objects.contains(name) || self.non_dispatchable_objects.contains(name)
    }

    pub fn dispatchable_objects(&self) -> &[String] {
        self.dispatchable_objects.as_slice()
    }

    pub fn non_dispatchable_objects(&self) -> &[String] {
        self.non_dispatchable_objects.as_slice()
    }

    pub fn feature_names(&self) -> &[String] {
        self.feature_names.as_slice()
    }
}
