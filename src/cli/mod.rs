//! # CLI Module
//!
//! Command-line interface for the `vk-api-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate the Python API description from a registry:
//!
//! ```bash
//! vk-api-gen generate --registry vk.xml --output vulkan.py
//! ```
//!
//! Options:
//! - `--registry <FILE>` - Path to the registry XML (required)
//! - `--output <FILE>` - Output file (default: stdout)
//! - `--config <FILE>` - Config file (default: `vk-api-gen.toml` next to the registry)
//! - `--api <NAME>` - API to generate for (default: `vulkan`)
//! - `--versions <REGEX>` / `--extensions <REGEX>` / `--remove-extensions <REGEX>`
//!
//! ### `inspect`
//!
//! Print the collected object lists, platform buckets and the extension
//! lists a display-server token selects:
//!
//! ```bash
//! vk-api-gen inspect --registry vk.xml --display-server Xcb
//! vk-api-gen inspect --registry vk.xml --json
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use vk_api_gen::cli::{run, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run(cli, &mut std::io::stdout())?;
//! ```

mod commands;


pub use commands::{inspect, run, run_cli, Cli, Commands, Inspection, SelectionArgs};
