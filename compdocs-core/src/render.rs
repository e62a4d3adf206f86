//! Page rendering: one complete MDX page per component, plus the section's
//! landing page.
//!
//! Rendering is a pure function of the export name, the library settings and
//! an optional curated [`MetadataEntry`]. It never touches the filesystem.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::LibraryConfig;

/// Curated enrichment for one component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub used_for: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// JSX usage sample shown in place of the bare `<Name />` example.
    #[serde(default)]
    pub example: String,
}

/// Read-only lookup of curated entries by exact export name.
pub type MetadataTable = BTreeMap<String, MetadataEntry>;

/// A rendered page, ready to be written as `<slug>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub slug: String,
    pub export_name: String,
    pub content: String,
}

pub struct PageRenderer<'a> {
    library: &'a LibraryConfig,
    metadata: &'a MetadataTable,
}

impl<'a> PageRenderer<'a> {
    pub fn new(library: &'a LibraryConfig, metadata: &'a MetadataTable) -> Self {
        Self { library, metadata }
    }

    pub fn render_page(&self, name: &str) -> PageSpec {
        PageSpec {
            slug: crate::slug::to_slug(name),
            export_name: name.to_string(),
            content: self.render(name),
        }
    }

    /// Full page body for `name`. Uses the curated entry when one exists.
    pub fn render(&self, name: &str) -> String {
        let lib = self.library;
        let entry = self.metadata.get(name);

        let used_for = match entry {
            Some(entry) => entry.used_for.trim().to_string(),
            None => format!("`{name}` is one of the building blocks exported by {}.", lib.name),
        };

        let features: String = match entry {
            Some(entry) if !entry.features.is_empty() => entry
                .features
                .iter()
                .map(|feature| format!("- {feature}\n"))
                .collect(),
            _ => format!(
                "- `{name}` ships as part of `{package}`.\n- `{name}` renders in the live preview below.\n",
                package = lib.package
            ),
        };

        let example = match entry {
            Some(entry) if !entry.example.trim().is_empty() => entry.example.trim().to_string(),
            _ => format!("<{name} />"),
        };

        [
            format!(
                "---\ntitle: {name}\ndescription: {name} component from the {lib_name} UI library.\n---\n\n",
                lib_name = lib.name
            ),
            format!("import {{ ComponentPreview }} from '{}';\n\n", lib.preview_import),
            format!("## Used for\n\n{used_for}\n\n"),
            format!("## Features\n\n{features}\n"),
            format!("## Usage\n\n```tsx\nimport {{ {name} }} from '{}';\n```\n\n", lib.package),
            format!("## Live Preview\n\n<ComponentPreview name=\"{name}\" />\n\n"),
            format!("## Example\n\n```tsx\n{example}\n```\n\n"),
            format!("> Auto-generated from {} exports.\n", lib.name),
        ]
        .concat()
    }
}

/// Landing page for the component section.
pub fn render_index(library: &LibraryConfig, title: &str, component_count: usize) -> String {
    format!(
        "---\ntitle: {title}\ndescription: Auto-generated component reference from {name} exports.\n---\n\n\
         {name} currently exports **{component_count}** components.\n",
        name = library.name,
    )
}
