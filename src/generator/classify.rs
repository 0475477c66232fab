use crate::registry::TypeTable;
use serde::Serialize;

/// Macro the registry uses to declare a non-dispatchable handle.
pub const NON_DISPATCHABLE_HANDLE_MACRO: &str = "VK_DEFINE_NON_DISPATCHABLE_HANDLE";

/// Maximum number of `alias` hops followed when classifying.
const MAX_ALIAS_DEPTH: usize = 8;

/// What a type name is, as far as object tracking is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HandleClassification {
    Dispatchable,
    NonDispatchable,
    NotAHandle,
}

impl HandleClassification {
    pub fn is_handle(self) -> bool {
        !matches!(self, HandleClassification::NotAHandle)
    }
}

/// Read-only handle classification over a [`TypeTable`].
#[derive(Debug, Clone, Copy)]
pub struct TypeClassifier<'r> {
    types: &'r TypeTable,
}

impl<'r> TypeClassifier<'r> {
    pub fn new(types: &'r TypeTable) -> Self {
        TypeClassifier { types }
    }

    /// Classify `type_name` by exact lookup.
    ///
    /// Unknown names, entries without a category and non-handle categories
    /// are all `NotAHandle`; forward references never fail the run. Handle
    /// aliases are followed to the handle they name.
    pub fn classify(&self, type_name: &str) -> HandleClassification {
        let mut name = type_name;
        for _ in 0..MAX_ALIAS_DEPTH {
            let Some(info) = self.types.get(name) else {
                return HandleClassification::NotAHandle;
            };
            if info.category.as_deref() != Some("handle") {
                return HandleClassification::NotAHandle;
            }
            match (&info.alias, &info.handle_macro) {
                (Some(target), None) => name = target,
                (_, Some(m)) if m == NON_DISPATCHABLE_HANDLE_MACRO => {
                    return HandleClassification::NonDispatchable
                }
                _ => return HandleClassification::Dispatchable,
            }
        }
        HandleClassification::NotAHandle
    }
}
