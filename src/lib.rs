//! # vk-api-gen
//!
//! **vk-api-gen** reads the Vulkan registry (`vk.xml`) and writes a Python
//! module describing the API: one `Extension(...)` per core version or
//! extension with its commands and newly introduced handle types, global
//! lists of dispatchable and non-dispatchable handles, and per-platform
//! extension lists selected at import time by a display-server token.
//!
//! ## Architecture
//!
//! - **[`registry`]** - Registry model, XML loader and the walker that drives generation
//! - **[`generator`]** - Handle classification, feature accumulation, global aggregation,
//!   platform partitioning and the Python emitter
//! - **[`config`]** - `vk-api-gen.toml` loading and feature selection patterns
//! - **[`pipeline`]** - Load, walk and write in one call
//! - **[`cli`]** - The `vk-api-gen` command-line interface
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(vk-api-gen)
//!     participant Loader as registry::load_registry
//!     participant Walker as RegistryWalker
//!     participant Gen as ApiGenerator
//!     participant Out as Output
//!
//!     CLI->>Loader: load_registry("vk.xml", "vulkan")
//!     Loader-->>CLI: Registry (types, commands, features)
//!     CLI->>Walker: walk(&mut generator)
//!     Walker->>Gen: begin_file()
//!     Gen->>Out: prelude (banner, helper classes)
//!     loop every selected feature
//!         Walker->>Gen: begin_feature(name, protect)
//!         Walker->>Gen: gen_cmd(cmd) for each new command
//!         Walker->>Gen: end_feature()
//!         Gen->>Out: NAME = Extension(...)
//!     end
//!     Walker->>Gen: end_file()
//!     Gen->>Out: object lists, platform buckets, selector
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! vk-api-gen generate --registry vk.xml --output vulkan.py
//! vk-api-gen inspect --registry vk.xml --display-server Xcb
//! ```
//!
//! ```rust,ignore
//! use vk_api_gen::{config::GeneratorConfig, pipeline::generate_file};
//!
//! let generated = generate_file(
//!     Path::new("vk.xml"),
//!     Path::new("vulkan.py"),
//!     &GeneratorConfig::default(),
//! )?;
//! println!("{} features", generated.report.feature_names.len());
//! ```

pub mod cli;
pub mod config;
pub mod generator;
pub mod logging;
pub mod pipeline;
pub mod registry;

pub use config::GeneratorConfig;
pub use generator::{
    ApiGenerator, GeneratorError, GeneratorOptions, HandleClassification, OutputGenerator,
    Platform, PlatformBuckets, ProtocolViolation, RunReport,
};
pub use pipeline::{generate_api, generate_file, generate_to_string, Generated};
pub use registry::{load_registry, parse_registry, FeatureFilter, Registry, RegistryWalker};
