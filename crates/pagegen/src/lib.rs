//! pagegen: typed page-object accessors for Selenium-based Kotlin suites
//!
//! A page is declared as an enumeration whose entries name the elements on
//! the page. Each entry optionally carries one locator marker; entries
//! without one are looked up by id-or-name using the entry's own name.
//! pagegen turns every declaration into a Kotlin class exposing one typed
//! accessor per entry.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐   ┌──────────┐   ┌───────────┐   ┌──────────┐
//! │ PageDescriptor │──►│ validate │──►│ build_    │──►│ codegen  │──► Kotlin
//! │ (YAML / JSON)  │   │          │   │ class(IR) │   │ generate │
//! └────────────────┘   └──────────┘   └───────────┘   └──────────┘
//! ```
//!
//! Validation is the only stage that can fail. Once a [`PageDeclaration`]
//! exists, building and emitting its class always succeed, and the same
//! input always produces byte-identical output.

#![warn(missing_docs)]

pub mod builder;
pub mod codegen;
pub mod config;
pub mod declaration;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod ir;
pub mod locator;
pub mod manifest;
pub mod template;
pub mod validate;

pub use builder::build_class;
pub use config::GeneratorOptions;
pub use declaration::{
    DeclarationKind, EntryDescriptor, LocatorEntry, LocatorMarker, MarkerArgs, PageDeclaration,
    PageDescriptor,
};
pub use descriptor::{load_descriptors, parse_descriptors, DescriptorFormat};
pub use error::{PageGenError, Result};
pub use generator::{generate, generate_all, GeneratedFile};
pub use ir::{GeneratedClass, GeneratedMember, Identifier};
pub use locator::{Cardinality, Locator, Strategy};
pub use manifest::{verify, write_generated, FileManifest, GenerationMetadata};
pub use template::LocatorTemplate;
pub use validate::validate;

/// Common imports for driving the generator from code.
pub mod prelude {
    pub use super::builder::build_class;
    pub use super::codegen::generate as emit_kotlin;
    pub use super::config::GeneratorOptions;
    pub use super::declaration::{DeclarationKind, EntryDescriptor, PageDescriptor};
    pub use super::error::{PageGenError, Result};
    pub use super::generator::{generate, generate_all, GeneratedFile};
    pub use super::locator::{Cardinality, Strategy};
    pub use super::validate::validate;
}
