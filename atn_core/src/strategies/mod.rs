// src/strategies/mod.rs
//! Component registry and declarative loading
//!
//! - [`ComponentRegistry`] maps type names to constructors per protocol
//! - [`ComponentLoader`] applies ids, `verbose` and `reverse`
//! - [`ComponentSet`] loads a whole TOML or JSON document

pub mod component_set;
pub mod loader;
pub mod registry;

pub use component_set::{ComponentDocument, ComponentSet};
pub use loader::ComponentLoader;
pub use registry::{
    ClassifierConstructor, ComponentRegistry, ComponentResult, FilterConstructor, RegistryBuilder,
    RegistryMetadata, TestConstructor,
};
