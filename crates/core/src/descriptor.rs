//! Typed view over a parsed project descriptor.
//!
//! A descriptor is a sequence of property lists such as
//! `(Project-Version proj 0 3)` or `(Files (README (proj/0_README 1.2 644)))`.
//! [`Descriptor::extract`] turns the top-level list into a name -> values
//! mapping once; the accessors below read typed records out of it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::ast::Node;
use crate::error::{Error, FormatError, SchemaError};
use crate::parser;
use crate::version::VersionIdentifier;

pub const PROJECT_VERSION: &str = "Project-Version";
pub const PARENT_VERSION: &str = "Parent-Version";
pub const MERGE_PARENTS: &str = "Merge-Parents";
pub const VERSION_LOG: &str = "Version-Log";
pub const FILES: &str = "Files";

/// Major and minor of a root version's `Parent-Version`.
const NO_PARENT: &str = "-*-";
const MERGE_COMPLETE: &str = "complete";
const SYMLINK_FLAG: &str = ":symlink";

/// One tracked path in a version's file manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileEntry {
    Regular {
        content_id: String,
        revision: String,
        mode: u32,
    },
    Symlink {
        target: String,
    },
}

impl FileEntry {
    pub fn is_symlink(&self) -> bool {
        matches!(self, FileEntry::Symlink { .. })
    }
}

/// Everything a descriptor says about one project version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectVersionInfo {
    pub version: VersionIdentifier,
    pub parent: Option<VersionIdentifier>,
    pub merge_parents: BTreeSet<String>,
    pub message: String,
    pub files: BTreeMap<String, FileEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    properties: HashMap<String, Vec<Node>>,
}

impl Descriptor {
    /// Tokenize, parse and extract descriptor text in one step.
    ///
    /// The top-level forms are treated as the children of one enclosing list.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let forms = parser::parse_str(text)?;
        Ok(Descriptor::extract(Node::List(forms)))
    }

    /// Build the property mapping from the root list.
    ///
    /// Each child list whose head is a symbol becomes one property; anything
    /// else is skipped. A repeated property name keeps its last occurrence.
    pub fn extract(mut root: Node) -> Self {
        let mut properties = HashMap::new();
        let children = match &mut root {
            Node::List(children) => std::mem::take(children),
            other => {
                tracing::debug!(kind = other.kind_name(), "descriptor root is not a list");
                return Descriptor { properties };
            }
        };
        for mut child in children {
            if let Node::List(items) = &mut child {
                if let Some(Node::Symbol(name)) = items.first_mut() {
                    let name = std::mem::take(name);
                    properties.insert(name, items.split_off(1));
                    continue;
                }
            }
            tracing::debug!(kind = child.kind_name(), "skipping non-property form");
        }
        Descriptor { properties }
    }

    /// Raw values of a property, without its leading name.
    pub fn property(&self, name: &str) -> Option<&[Node]> {
        self.properties.get(name).map(Vec::as_slice)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    fn require(&self, name: &str) -> Result<&[Node], SchemaError> {
        self.property(name)
            .ok_or_else(|| SchemaError::new(name, "property is missing"))
    }

    /// Name of the project, the first element of `Project-Version`.
    pub fn project_name(&self) -> Result<&str, Error> {
        let items = self.require(PROJECT_VERSION)?;
        Ok(text_at(PROJECT_VERSION, items, 0)?)
    }

    pub fn version(&self) -> Result<VersionIdentifier, Error> {
        let (major, minor) = self.version_parts(PROJECT_VERSION)?;
        Ok(VersionIdentifier::from_parts(major, minor)?)
    }

    /// Parent version, or `None` for a root version.
    pub fn parent(&self) -> Result<Option<VersionIdentifier>, Error> {
        let (major, minor) = self.version_parts(PARENT_VERSION)?;
        if major == NO_PARENT && minor == NO_PARENT {
            return Ok(None);
        }
        Ok(Some(VersionIdentifier::from_parts(major, minor)?))
    }

    fn version_parts(&self, property: &str) -> Result<(&str, &str), SchemaError> {
        let items = self.require(property)?;
        if items.len() < 3 {
            return Err(SchemaError::new(
                property,
                format!(
                    "expected project, major and minor, found {} element(s)",
                    items.len()
                ),
            ));
        }
        Ok((text_at(property, items, 1)?, text_at(property, items, 2)?))
    }

    /// Ids of merge parents whose merge completed.
    pub fn merge_parents(&self) -> Result<BTreeSet<String>, Error> {
        let mut parents = BTreeSet::new();
        for entry in self.require(MERGE_PARENTS)? {
            let parts = entry.as_list().ok_or_else(|| {
                SchemaError::new(
                    MERGE_PARENTS,
                    format!("expected a list per parent, found a {}", entry.kind_name()),
                )
            })?;
            if parts.len() < 2 {
                return Err(SchemaError::new(
                    MERGE_PARENTS,
                    "expected a parent id and a merge status",
                )
                .into());
            }
            let id = text_at(MERGE_PARENTS, parts, 0)?;
            let status = text_at(MERGE_PARENTS, parts, 1)?;
            if status == MERGE_COMPLETE {
                parents.insert(id.to_owned());
            }
        }
        Ok(parents)
    }

    /// Log message, verbatim.
    pub fn message(&self) -> Result<String, Error> {
        let items = self.require(VERSION_LOG)?;
        Ok(text_at(VERSION_LOG, items, 0)?.to_owned())
    }

    /// One result per manifest element, in descriptor order.
    ///
    /// A malformed element yields an `Err` without affecting its neighbours.
    pub fn file_entries(
        &self,
    ) -> Result<impl Iterator<Item = Result<(String, FileEntry), Error>> + '_, Error> {
        Ok(self.require(FILES)?.iter().map(file_entry))
    }

    /// The file manifest keyed by path. Later duplicates of a path win.
    pub fn files(&self) -> Result<BTreeMap<String, FileEntry>, Error> {
        self.file_entries()?.collect()
    }

    pub fn info(&self) -> Result<ProjectVersionInfo, Error> {
        Ok(ProjectVersionInfo {
            version: self.version()?,
            parent: self.parent()?,
            merge_parents: self.merge_parents()?,
            message: self.message()?,
            files: self.files()?,
        })
    }
}

fn text_at<'a>(property: &str, items: &'a [Node], index: usize) -> Result<&'a str, SchemaError> {
    match items.get(index) {
        Some(node) => node.text().ok_or_else(|| {
            SchemaError::new(
                property,
                format!("expected text at position {}, found a list", index),
            )
        }),
        None => Err(SchemaError::new(
            property,
            format!("missing element at position {}", index),
        )),
    }
}

fn file_entry(node: &Node) -> Result<(String, FileEntry), Error> {
    let parts = node.as_list().ok_or_else(|| {
        SchemaError::new(
            FILES,
            format!("expected a list per file, found a {}", node.kind_name()),
        )
    })?;
    let name = text_at(FILES, parts, 0)?;
    let info = parts.get(1).and_then(Node::as_list).ok_or_else(|| {
        SchemaError::new(FILES, format!("file '{}' has no info list", name))
    })?;

    let symlink = parts.iter().skip(2).any(|flag| flag.is_symbol(SYMLINK_FLAG));
    let entry = if symlink {
        FileEntry::Symlink {
            target: text_at(FILES, info, 0)?.to_owned(),
        }
    } else {
        if info.len() < 3 {
            return Err(SchemaError::new(
                FILES,
                format!(
                    "file '{}' needs content id, revision and mode, found {} element(s)",
                    name,
                    info.len()
                ),
            )
            .into());
        }
        let mode_text = text_at(FILES, info, 2)?;
        let mode = u32::from_str_radix(mode_text, 8)
            .map_err(|_| FormatError::new("mode", mode_text, "not an octal number"))?;
        FileEntry::Regular {
            content_id: text_at(FILES, info, 0)?.to_owned(),
            revision: text_at(FILES, info, 1)?.to_owned(),
            mode,
        }
    };
    Ok((name.to_owned(), entry))
}
