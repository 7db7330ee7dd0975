//! Declaration validation.
//!
//! Rules are checked in a fixed order and the first failure wins:
//!
//! 1. the declaration is an enum
//! 2. it has at least one entry
//! 3. no entry carries more than one locator marker
//! 4. the startup URL, if any, is absolute with a host
//! 5. every name is a valid identifier
//! 6. entry names are unique
//! 7. parameterized locators do not request collections

use crate::declaration::{DeclarationKind, LocatorEntry, PageDeclaration, PageDescriptor};
use crate::error::{PageGenError, Result};
use crate::ir::Identifier;
use crate::template::LocatorTemplate;
use std::collections::HashSet;
use tracing::debug;

/// Validate a descriptor, producing a declaration that can be built and
/// emitted without further failure.
pub fn validate(descriptor: &PageDescriptor) -> Result<PageDeclaration> {
    let declaration = descriptor.name.as_str();

    if descriptor.kind != DeclarationKind::Enum {
        return Err(PageGenError::NotAnEnum {
            declaration: declaration.to_string(),
            kind: descriptor.kind,
        });
    }

    if descriptor.entries.is_empty() {
        return Err(PageGenError::EmptyEnum {
            declaration: declaration.to_string(),
        });
    }

    for entry in &descriptor.entries {
        if entry.locators.len() > 1 {
            let mut strategies: Vec<_> = entry.locators.iter().map(|m| m.strategy()).collect();
            strategies.sort_by_key(|s| s.as_str());
            return Err(PageGenError::MultipleLocators {
                declaration: declaration.to_string(),
                entry: entry.name.clone(),
                strategies,
            });
        }
    }

    if let Some(url) = &descriptor.url {
        check_url(declaration, url)?;
    }

    let name = identifier(declaration, declaration)?;
    let class_name = descriptor
        .class_name
        .as_deref()
        .map(|n| identifier(declaration, n))
        .transpose()?;
    if !descriptor.package.is_empty() {
        for segment in descriptor.package.split('.') {
            identifier(declaration, segment)?;
        }
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(descriptor.entries.len());
    for entry in &descriptor.entries {
        let entry_name = identifier(declaration, &entry.name)?;
        let locator = entry.locators.first().map(|m| m.to_locator(&entry.name));

        if let Some(locator) = &locator {
            let template = LocatorTemplate::parse(&locator.value);
            for param in template.parameters() {
                identifier(declaration, param)?;
            }
            if template.is_parameterized() && locator.cardinality.is_collection() {
                return Err(PageGenError::CollectionTemplate {
                    declaration: declaration.to_string(),
                    entry: entry.name.clone(),
                });
            }
        }

        if !seen.insert(entry.name.as_str()) {
            return Err(PageGenError::DuplicateEntry {
                declaration: declaration.to_string(),
                entry: entry.name.clone(),
            });
        }

        entries.push(LocatorEntry {
            name: entry_name,
            locator,
        });
    }

    debug!(
        declaration,
        entries = entries.len(),
        "validated page declaration"
    );

    Ok(PageDeclaration {
        name,
        package: descriptor.package.clone(),
        class_name,
        url: descriptor.url.clone(),
        entries,
    })
}

fn identifier(declaration: &str, name: &str) -> Result<Identifier> {
    Identifier::new(name).map_err(|e| e.in_declaration(declaration))
}

fn check_url(declaration: &str, url: &str) -> Result<()> {
    let invalid = |reason: String| PageGenError::InvalidUrl {
        declaration: declaration.to_string(),
        url: url.to_string(),
        reason,
    };

    let parsed = url::Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(invalid("URL has no host".to_string())),
    }
}
