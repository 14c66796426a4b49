//! Documentation generator for managed object definitions
//!
//! Generates a markdown reference of every registered definition and the
//! default of each of its properties.

use std::fmt::Write;

use crate::definition::{ManagedObjectDefinition, PropertyDefinition, PropertySyntax};
use crate::registry::DefinitionRegistry;

/// Configuration for docs generation
#[derive(Debug, Clone, Default)]
pub struct DocsConfig {
    /// Title for the documentation
    pub title: Option<String>,
    /// Description/introduction text
    pub description: Option<String>,
    /// Whether to show advanced properties
    pub show_advanced: bool,
}

impl DocsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            show_advanced: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    #[must_use]
    pub fn hide_advanced(mut self) -> Self {
        self.show_advanced = false;
        self
    }
}

/// Generate markdown documentation for every definition in a registry
///
/// Inherited properties are listed on the definition that declares them.
#[must_use]
pub fn generate_docs(registry: &DefinitionRegistry, config: DocsConfig) -> String {
    let mut output = String::new();

    let title = config
        .title
        .unwrap_or_else(|| "Configuration Reference".to_string());
    let _ = writeln!(output, "# {title}\n");

    if let Some(desc) = config.description {
        let _ = writeln!(output, "{desc}\n");
    }

    for definition in registry.definitions() {
        format_definition(&mut output, definition, config.show_advanced);
    }

    output
}

fn format_definition(out: &mut String, definition: &ManagedObjectDefinition, show_advanced: bool) {
    let _ = writeln!(out, "## `{}`\n", definition.name);

    if let Some(parent) = &definition.parent {
        let _ = writeln!(out, "Extends `{parent}`.\n");
    }
    if let Some(desc) = &definition.description {
        let _ = writeln!(out, "{desc}\n");
    }

    let properties: Vec<&PropertyDefinition> = definition
        .properties
        .values()
        .filter(|p| show_advanced || !p.advanced)
        .collect();
    if properties.is_empty() {
        out.push_str("_No properties._\n\n");
        return;
    }

    out.push_str("| Property | Syntax | Multi-valued | Default | Description |\n");
    out.push_str("|----------|--------|--------------|---------|-------------|\n");
    for property in properties {
        let mut name = format!("`{}`", property.name);
        if property.advanced {
            name.push_str(" (advanced)");
        }
        if property.read_only {
            name.push_str(" (read-only)");
        }
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            name,
            format_syntax(&property.syntax),
            if property.multi_valued { "yes" } else { "no" },
            property.default_behavior.describe(),
            property.description.as_deref().unwrap_or("")
        );
    }
    out.push('\n');
}

fn format_syntax(syntax: &PropertySyntax) -> String {
    match syntax {
        PropertySyntax::Enum { values } => format!("enum ({})", values.join(" \\| ")),
        PropertySyntax::Duration { base_unit, .. } => {
            format!("duration ({})", base_unit.abbreviation())
        }
        PropertySyntax::String {
            pattern: Some(pattern),
        } => format!("string (`{pattern}`)"),
        other => other.name().to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
