//! Builds the IR for a validated page declaration.
//!
//! ```rust
//! use pagegen::prelude::*;
//!
//! let descriptor = PageDescriptor::new("com.example", "Login")
//!     .entry(EntryDescriptor::new("username"))
//!     .entry(EntryDescriptor::new("password").locator(Strategy::Id, "pass"));
//!
//! let declaration = validate(&descriptor).unwrap();
//! let class = build_class(&declaration, &GeneratorOptions::default());
//! assert_eq!(class.members.len(), 2);
//! ```

use crate::config::GeneratorOptions;
use crate::declaration::PageDeclaration;
use crate::ir::{
    FunctionMember, GeneratedClass, GeneratedMember, Identifier, Import, Initializer,
    PropertyMember,
};
use crate::locator::{Cardinality, Locator, Strategy};
use crate::template::LocatorTemplate;
use std::collections::BTreeSet;
use tracing::debug;

/// Package of the Selenium driver API.
pub const SELENIUM_PACKAGE: &str = "org.openqa.selenium";

/// Package of Selenium's `ByIdOrName`.
pub const PAGEFACTORY_PACKAGE: &str = "org.openqa.selenium.support.pagefactory";

/// Suffix appended to the declaration namespace.
pub const GENERATED_PACKAGE_SUFFIX: &str = "generated";

/// Package the generated class lives in.
#[must_use]
pub fn generated_package(namespace: &str) -> String {
    if namespace.is_empty() {
        GENERATED_PACKAGE_SUFFIX.to_string()
    } else {
        format!("{namespace}.{GENERATED_PACKAGE_SUFFIX}")
    }
}

/// Incremental builder for a [`GeneratedClass`].
///
/// Imports are collected in a sorted set as members are added, so only
/// symbols that some member actually references end up in the output.
#[derive(Debug)]
pub struct ClassBuilder<'a> {
    name: Identifier,
    package: String,
    options: &'a GeneratorOptions,
    imports: BTreeSet<Import>,
    initializer: Option<Initializer>,
    members: Vec<GeneratedMember>,
}

impl<'a> ClassBuilder<'a> {
    /// Create a builder for a class in `package`.
    #[must_use]
    pub fn new(name: Identifier, package: impl Into<String>, options: &'a GeneratorOptions) -> Self {
        let mut imports = BTreeSet::new();
        imports.insert(Import::new(SELENIUM_PACKAGE, "WebDriver"));
        Self {
            name,
            package: package.into(),
            options,
            imports,
            initializer: None,
            members: Vec::new(),
        }
    }

    /// Navigate to `url` when the class is constructed.
    #[must_use]
    pub fn initializer(mut self, url: impl Into<String>) -> Self {
        self.initializer = Some(Initializer { url: url.into() });
        self
    }

    /// Add a lazily looked-up property.
    #[must_use]
    pub fn property(mut self, name: Identifier, locator: Locator) -> Self {
        self.import_result_type(locator.cardinality);
        self.imports.insert(Import::new(
            &self.options.runtime_package,
            locator.strategy.delegate(),
        ));
        self.members
            .push(GeneratedMember::Property(PropertyMember { name, locator }));
        self
    }

    /// Add an accessor function taking one parameter per placeholder.
    ///
    /// `params` must be the template's parameters in first-occurrence order.
    #[must_use]
    pub fn function(
        mut self,
        name: Identifier,
        strategy: Strategy,
        params: Vec<Identifier>,
        template: LocatorTemplate,
    ) -> Self {
        self.import_result_type(Cardinality::Single);
        self.imports.insert(match strategy.by_factory() {
            Some(_) => Import::new(SELENIUM_PACKAGE, "By"),
            None => Import::new(PAGEFACTORY_PACKAGE, "ByIdOrName"),
        });
        self.members.push(GeneratedMember::Function(FunctionMember {
            name,
            strategy,
            params,
            template,
        }));
        self
    }

    fn import_result_type(&mut self, cardinality: Cardinality) {
        let package = match cardinality {
            Cardinality::Single => SELENIUM_PACKAGE,
            Cardinality::Collection => self.options.runtime_package.as_str(),
        };
        self.imports
            .insert(Import::new(package, cardinality.type_name()));
    }

    /// Build the class.
    #[must_use]
    pub fn build(self) -> GeneratedClass {
        GeneratedClass {
            header: self.options.provenance().to_string(),
            name: self.name,
            package: self.package,
            imports: self.imports.into_iter().collect(),
            initializer: self.initializer,
            members: self.members,
        }
    }
}

/// Build the IR for a validated declaration.
///
/// Entries keep their source order. An entry whose locator has placeholders
/// becomes a function; every other entry becomes a property.
#[must_use]
pub fn build_class(declaration: &PageDeclaration, options: &GeneratorOptions) -> GeneratedClass {
    let mut builder = ClassBuilder::new(
        declaration.output_name().clone(),
        generated_package(declaration.package()),
        options,
    );

    if let Some(url) = declaration.url() {
        builder = builder.initializer(url);
    }

    for entry in declaration.entries() {
        let locator = entry.resolve();
        let template = LocatorTemplate::parse(&locator.value);

        builder = if template.is_parameterized() {
            // validation has already checked every placeholder name
            let params = template
                .parameters()
                .iter()
                .filter_map(|p| Identifier::new(p.as_str()).ok())
                .collect();
            builder.function(entry.name.clone(), locator.strategy, params, template)
        } else {
            builder.property(entry.name.clone(), locator)
        };
    }

    let class = builder.build();
    debug!(
        class = %class.name,
        members = class.members.len(),
        imports = class.imports.len(),
        "built class IR"
    );
    class
}
