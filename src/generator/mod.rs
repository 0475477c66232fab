//! # Generator Module
//!
//! Turns registry walks into a Python module describing the Vulkan API:
//! one `Extension(...)` constructor per core version or extension, global
//! lists of dispatchable and non-dispatchable handle types, and per-platform
//! extension lists a consumer selects between with a display-server token.
//!
//! ## Architecture
//!
//! ```text
//! RegistryWalker → OutputGenerator hooks → ApiGenerator → W: Write
//!                                           ├── TypeClassifier
//!                                           ├── FeatureState
//!                                           ├── GlobalRegistry
//!                                           └── PlatformRules (end_file)
//! ```
//!
//! 1. **Classification** - [`TypeClassifier`] decides whether a type is a
//!    dispatchable handle, a non-dispatchable handle, or neither
//! 2. **Accumulation** - [`FeatureState`] buffers the open feature's
//!    prototypes and first-seen handle objects
//! 3. **Aggregation** - [`GlobalRegistry`] merges each closed feature's
//!    objects and records its name
//! 4. **Partitioning** - [`PlatformRules`] splits feature names into eight
//!    platform buckets when the file ends
//!
//! Hooks called out of order fail with a [`ProtocolViolation`] instead of
//! producing malformed output.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vk_api_gen::generator::{ApiGenerator, GeneratorOptions};
//! use vk_api_gen::registry::{load_registry, FeatureFilter, RegistryWalker};
//!
//! let registry = load_registry(Path::new("vk.xml"), "vulkan")?;
//! let mut gen = ApiGenerator::new(&registry.types, GeneratorOptions::default(), Vec::new());
//! RegistryWalker::new(&registry, FeatureFilter::default(), "vulkan").walk(&mut gen)?;
//! let (text, report) = gen.finish();
//! ```

mod aggregate;
mod classify;
mod command;
mod error;
mod feature;
mod output;
mod platform;
mod templates;


pub use aggregate::{GlobalRegistry, OrderedNames};
pub use classify::{HandleClassification, TypeClassifier, NON_DISPATCHABLE_HANDLE_MACRO};
pub use command::{extract_command, CommandPrototype, Param, COMMAND_PREFIX_LEN};
pub use error::{GeneratorError, ProtocolViolation};
pub use feature::{Feature, FeatureObject, FeatureState};
pub use output::{ApiGenerator, GeneratorOptions, OutputGenerator, RunReport, DEFAULT_HEADER};
pub use platform::{
    Bucket, ExtensionSelection, NameMatch, Platform, PlatformBuckets, PlatformLists, PlatformRule,
    PlatformRules, RuleTarget, DEFAULT_BASE_EXTENSIONS, DEFAULT_WSI_EXTENSIONS, LINUX_WSI_MARKERS,
};
pub use templates::{ExtensionListsTemplate, PreludeTemplate};
