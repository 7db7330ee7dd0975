//! Kotlin source emission.
//!
//! The emitter is a pure function of the IR: the same [`GeneratedClass`]
//! always yields byte-identical text. Layout:
//!
//! ```text
//! // <header>
//!
//! package <package>
//!
//! import <sorted imports>
//!
//! context(WebDriver)
//! public class <Name> {
//!   init { ... }
//!
//!   <members, one blank line apart>
//! }
//! ```

use crate::ir::{FunctionMember, GeneratedClass, GeneratedMember, PropertyMember};
use crate::locator::Strategy;
use crate::template::Segment;
use std::fmt::{self, Display, Formatter, Write};

const INDENT: &str = "  ";

/// Render a class as Kotlin source.
#[must_use]
pub fn generate(class: &GeneratedClass) -> String {
    KotlinSource(class).to_string()
}

/// [`Display`] adapter writing a class as Kotlin source.
#[derive(Debug, Clone, Copy)]
pub struct KotlinSource<'a>(pub &'a GeneratedClass);

impl Display for KotlinSource<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let class = self.0;

        for line in class.header.lines() {
            if line.trim().is_empty() {
                writeln!(f, "//")?;
            } else {
                writeln!(f, "// {}", line.trim_end())?;
            }
        }
        if !class.header.is_empty() {
            writeln!(f)?;
        }

        writeln!(f, "package {}", class.package)?;
        writeln!(f)?;

        for import in &class.imports {
            writeln!(f, "import {}", import.as_str())?;
        }
        if !class.imports.is_empty() {
            writeln!(f)?;
        }

        writeln!(f, "context(WebDriver)")?;
        writeln!(f, "public class {} {{", class.name)?;

        let mut first = true;
        let mut separate = |f: &mut Formatter<'_>| {
            if std::mem::take(&mut first) {
                Ok(())
            } else {
                writeln!(f)
            }
        };

        if let Some(init) = &class.initializer {
            separate(f)?;
            writeln!(f, "{INDENT}init {{")?;
            writeln!(f, "{INDENT}{INDENT}get({})", quoted(&init.url))?;
            writeln!(f, "{INDENT}}}")?;
        }

        for member in &class.members {
            separate(f)?;
            match member {
                GeneratedMember::Property(p) => property(f, p)?,
                GeneratedMember::Function(func) => function(f, func)?,
            }
        }

        writeln!(f, "}}")
    }
}

fn property(f: &mut Formatter<'_>, p: &PropertyMember) -> fmt::Result {
    let ty = p.locator.cardinality.type_name();
    writeln!(
        f,
        "{INDENT}public val {}: {ty} by {}<{ty}>({})",
        p.name,
        p.locator.strategy.delegate(),
        quoted(&p.locator.value)
    )
}

fn function(f: &mut Formatter<'_>, func: &FunctionMember) -> fmt::Result {
    let params = func
        .params
        .iter()
        .map(|p| format!("{p}: String"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut template = String::from("\"");
    for segment in func.template.segments() {
        match segment {
            Segment::Literal(text) => escape_into(&mut template, text),
            Segment::Placeholder(name) => {
                template.push_str("${");
                template.push_str(name);
                template.push('}');
            }
        }
    }
    template.push('"');

    writeln!(
        f,
        "{INDENT}public fun {}({params}): WebElement = findElement({})",
        func.name,
        by_expression(func.strategy, &template)
    )
}

fn by_expression(strategy: Strategy, argument: &str) -> String {
    match strategy.by_factory() {
        Some(factory) => format!("By.{factory}({argument})"),
        None => format!("ByIdOrName({argument})"),
    }
}

/// Quote `text` as a Kotlin string literal.
#[must_use]
pub fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    escape_into(&mut out, text);
    out.push('"');
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
}
