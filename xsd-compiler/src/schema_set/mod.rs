// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Compiled schema set.
//!
//! A schema set is the root schema document together with every
//! document it includes or imports (transitively). After loading, all
//! top level components are indexed by qualified name and every
//! reference between components is checked, so the rest of the crate
//! can rely on lookups of referenced components.
//!
//! The set is immutable after compilation and can be shared between
//! threads.

/// Views of components used by the schema parser.
pub mod compiled;

/// Schema set errors.
pub mod error;

/// Resolution of schema locations.
pub mod resolver;

/// Reference and derivation checks.
mod validate;

use crate::occurs::Occurs;
use crate::xsd::attribute::Attribute;
use crate::xsd::attribute::AttributeGroup;
use crate::xsd::complex_type::ComplexType;
use crate::xsd::complex_type::ContentModel;
use crate::xsd::element::Element;
use crate::xsd::particle::Compositor;
use crate::xsd::particle::GroupDefinition;
use crate::xsd::particle::ModelGroup;
use crate::xsd::particle::Particle;
use crate::xsd::particle::Wildcard;
use crate::xsd::schema::IncludeKind;
use crate::xsd::schema::Schema;
use crate::xsd::simple_type::SimpleType;
use crate::xsd::IsMixed;
use crate::QualifiedName;
use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;

#[doc(inline)]
pub use compiled::AttributeUse;
#[doc(inline)]
pub use compiled::ContentParticle;
#[doc(inline)]
pub use compiled::ContentType;
#[doc(inline)]
pub use compiled::DeclaredType;
#[doc(inline)]
pub use error::ComponentKind;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use resolver::FolderResolver;
#[doc(inline)]
pub use resolver::ResolvedSchema;
#[doc(inline)]
pub use resolver::Resolver;

/// Schema document that is part of the set.
#[derive(Debug)]
pub struct LoadedSchema {
    /// `None` for the in-memory root document.
    pub location: Option<PathBuf>,
    pub schema: Schema,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ItemRef {
    schema: usize,
    item: usize,
}

type Index = HashMap<QualifiedName, ItemRef>;

/// Compiled and indexed schema set.
#[derive(Debug)]
pub struct SchemaSet {
    schemas: Vec<LoadedSchema>,
    any_type: ComplexType,
    elements: Index,
    complex_types: Index,
    simple_types: Index,
    groups: Index,
    attribute_groups: Index,
    attributes: Index,
}

impl SchemaSet {
    /// Compile in-memory schema text. Included documents are resolved
    /// with `resolver`.
    ///
    /// # Errors
    ///
    /// Returns error if any document cannot be loaded or validated, or
    /// if the set contains references to undefined components.
    pub fn compile(xml: &str, resolver: &dyn Resolver) -> Result<Self, Error> {
        Self::compile_at(None, xml, resolver)
    }

    /// Compile schema file. Locations are resolved against the
    /// directory of the file.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaSet::load`].
    pub fn compile_file(path: &Path) -> Result<Self, Error> {
        Self::load(path, None)
    }

    /// Compile schema file. Locations in the root document are
    /// resolved against `resolution_folder` (directory of the file if
    /// not given).
    ///
    /// # Errors
    ///
    /// - `Error::Io` if file cannot be read
    /// - other errors as [`SchemaSet::compile`]
    pub fn load(path: &Path, resolution_folder: Option<&Path>) -> Result<Self, Error> {
        let content =
            fs::read_to_string(path).map_err(|e| Error::Io(path.display().to_string(), e))?;
        let folder = resolution_folder
            .or_else(|| path.parent())
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let location = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        Self::compile_at(Some(location), &content, &FolderResolver::new(folder))
    }

    fn compile_at(
        location: Option<PathBuf>,
        xml: &str,
        resolver: &dyn Resolver,
    ) -> Result<Self, Error> {
        let root = Schema::parse(xml, None).map_err(|e| Error::Xsd(display(&location), e))?;
        let mut loaded = location.iter().cloned().collect::<HashSet<_>>();
        // Includes of the root document are resolved without base, so
        // the resolver applies its folder.
        let mut queue = VecDeque::from([(None::<PathBuf>, location, root)]);
        let mut schemas = Vec::new();
        while let Some((base, location, schema)) = queue.pop_front() {
            for include in &schema.includes {
                let Some(schema_location) = &include.location else {
                    debug!(namespace = ?include.namespace, "import without schema location skipped");
                    continue;
                };
                let resolved = resolver.resolve(base.as_deref(), schema_location)?;
                if !loaded.insert(resolved.path.clone()) {
                    continue;
                }
                debug!(location = %resolved.path.display(), "loading schema document");
                let chameleon_namespace = match include.kind {
                    IncludeKind::Include => schema.target_namespace.as_deref(),
                    IncludeKind::Import => None,
                };
                let included = Schema::parse(&resolved.content, chameleon_namespace)
                    .map_err(|e| Error::Xsd(resolved.path.display().to_string(), e))?;
                queue.push_back((Some(resolved.path.clone()), Some(resolved.path), included));
            }
            schemas.push(LoadedSchema { location, schema });
        }
        Self::build(schemas)
    }

    fn build(schemas: Vec<LoadedSchema>) -> Result<Self, Error> {
        let set = Self {
            elements: index(&schemas, |s| &s.elements, |e| Some(&e.name)),
            complex_types: index(&schemas, |s| &s.complex_types, |t| t.name.as_ref()),
            simple_types: index(&schemas, |s| &s.simple_types, |t| t.name.as_ref()),
            groups: index(&schemas, |s| &s.groups, |g| Some(&g.name)),
            attribute_groups: index(&schemas, |s| &s.attribute_groups, |g| Some(&g.name)),
            attributes: index(&schemas, |s| &s.attributes, |a| Some(&a.name)),
            schemas,
            any_type: any_type(),
        };
        validate::check(&set)?;
        debug!(
            documents = set.schemas.len(),
            elements = set.elements.len(),
            "schema set compiled"
        );
        Ok(set)
    }

    /// Documents of the set. The root document is the first one.
    #[must_use]
    pub fn schemas(&self) -> &[LoadedSchema] {
        &self.schemas
    }

    /// Global element declarations in declaration order.
    pub fn global_elements(&self) -> impl Iterator<Item = &Element> {
        self.schemas.iter().enumerate().flat_map(move |(schema, s)| {
            s.schema
                .elements
                .iter()
                .enumerate()
                .filter(move |(item, e)| {
                    self.elements.get(&e.name) == Some(&ItemRef { schema, item: *item })
                })
                .map(|(_, e)| e)
        })
    }

    /// Builtin `xs:anyType`.
    #[must_use]
    pub const fn any_type(&self) -> &ComplexType {
        &self.any_type
    }

    #[must_use]
    pub fn find_element(&self, name: &QualifiedName) -> Option<&Element> {
        self.lookup(&self.elements, name, |s| &s.elements)
    }

    #[must_use]
    pub fn find_complex_type(&self, name: &QualifiedName) -> Option<&ComplexType> {
        self.lookup(&self.complex_types, name, |s| &s.complex_types)
    }

    #[must_use]
    pub fn find_simple_type(&self, name: &QualifiedName) -> Option<&SimpleType> {
        self.lookup(&self.simple_types, name, |s| &s.simple_types)
    }

    #[must_use]
    pub fn find_group(&self, name: &QualifiedName) -> Option<&GroupDefinition> {
        self.lookup(&self.groups, name, |s| &s.groups)
    }

    #[must_use]
    pub fn find_attribute_group(&self, name: &QualifiedName) -> Option<&AttributeGroup> {
        self.lookup(&self.attribute_groups, name, |s| &s.attribute_groups)
    }

    #[must_use]
    pub fn find_attribute(&self, name: &QualifiedName) -> Option<&Attribute> {
        self.lookup(&self.attributes, name, |s| &s.attributes)
    }

    fn lookup<'a, T>(
        &'a self,
        index: &Index,
        name: &QualifiedName,
        items: fn(&Schema) -> &Vec<T>,
    ) -> Option<&'a T> {
        let r = index.get(name)?;
        items(&self.schemas.get(r.schema)?.schema).get(r.item)
    }
}

fn display(location: &Option<PathBuf>) -> String {
    location
        .as_ref()
        .map_or_else(|| "<root>".into(), |p| p.display().to_string())
}

fn index<T>(
    schemas: &[LoadedSchema],
    items: fn(&Schema) -> &Vec<T>,
    name: fn(&T) -> Option<&QualifiedName>,
) -> Index {
    let mut index = Index::new();
    for (schema, s) in schemas.iter().enumerate() {
        for (item, v) in items(&s.schema).iter().enumerate() {
            let Some(name) = name(v) else {
                continue;
            };
            if index.contains_key(name) {
                warn!(%name, "duplicate definition ignored");
            } else {
                index.insert(name.clone(), ItemRef { schema, item });
            }
        }
    }
    index
}

/// `xs:anyType`: mixed content of any elements.
fn any_type() -> ComplexType {
    ComplexType {
        name: Some(QualifiedName::xs("anyType")),
        mixed: IsMixed::new(true),
        content: ContentModel::Particle(Some(Particle::Group(ModelGroup {
            compositor: Compositor::Sequence,
            occurs: Occurs::ONCE,
            particles: vec![Particle::Any(Wildcard {
                occurs: Occurs::ANY_NUMBER,
                namespace: Some("##any".into()),
            })],
        }))),
        attributes: Vec::new(),
    }
}
