//! # Registry Module
//!
//! In-memory model of the API registry (`vk.xml`): the type table, the
//! command table and the features (core versions and extensions) that
//! require those commands.
//!
//! - [`load_registry`] / [`parse_registry`] read the XML, dropping elements
//!   that belong to a different API variant.
//! - [`RegistryWalker`] orders the selected features and drives an
//!   [`OutputGenerator`](crate::generator::OutputGenerator) through the
//!   generation lifecycle.

mod load;
mod types;
mod walk;

pub use load::*;
pub use types::*;
pub use walk::*;
