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

use crate::occurs::MaxOccurs;
use crate::occurs::Occurs;
use crate::xsd::element::DeElement;
use crate::xsd::element::ElementDecl;
use crate::xsd::Context;
use crate::xsd::Ignored;
use crate::xsd::ValidateError;
use crate::QualifiedName;
use serde::Deserialize;

/// `xs:sequence`, `xs:choice` or `xs:all`
#[derive(Debug, Deserialize)]
pub struct DeModelGroup {
    #[serde(rename = "@minOccurs")]
    pub min_occurs: Option<u64>,
    #[serde(rename = "@maxOccurs")]
    pub max_occurs: Option<MaxOccurs>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeModelGroupItem>,
}

/// Items of a model group.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeModelGroupItem {
    Annotation(Ignored),
    Element(DeElement),
    Group(DeGroup),
    Choice(DeModelGroup),
    Sequence(DeModelGroup),
    All(DeModelGroup),
    Any(DeAny),
}

/// `xs:group`, either a definition (`name`) or a reference (`ref`).
#[derive(Debug, Deserialize)]
pub struct DeGroup {
    #[serde(rename = "@name")]
    pub name: Option<String>,
    #[serde(rename = "@ref")]
    pub reference: Option<String>,
    #[serde(rename = "@minOccurs")]
    pub min_occurs: Option<u64>,
    #[serde(rename = "@maxOccurs")]
    pub max_occurs: Option<MaxOccurs>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeGroupItem>,
}

/// Items of `xs:group` definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeGroupItem {
    Annotation(Ignored),
    Choice(DeModelGroup),
    Sequence(DeModelGroup),
    All(DeModelGroup),
}

/// `xs:any`
#[derive(Debug, Deserialize)]
pub struct DeAny {
    #[serde(rename = "@minOccurs")]
    pub min_occurs: Option<u64>,
    #[serde(rename = "@maxOccurs")]
    pub max_occurs: Option<MaxOccurs>,
    #[serde(rename = "@namespace")]
    pub namespace: Option<String>,
}

/// Kind of a model group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compositor {
    Sequence,
    Choice,
    All,
}

/// Validated model group.
#[derive(Debug)]
pub struct ModelGroup {
    pub compositor: Compositor,
    pub occurs: Occurs,
    pub particles: Vec<Particle>,
}

impl ModelGroup {
    /// Whether the group has no content at all (nested empty groups
    /// included).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.iter().all(|p| match p {
            Particle::Group(g) => g.is_empty(),
            _ => false,
        })
    }
}

/// Element particle: local declaration or reference to a global
/// element.
#[derive(Debug)]
pub struct ElementParticle {
    pub occurs: Occurs,
    pub element: ElementDecl,
}

/// `xs:any` particle.
#[derive(Debug)]
pub struct Wildcard {
    pub occurs: Occurs,
    /// Value of `namespace` attribute.
    pub namespace: Option<String>,
}

/// Reference to a named model group.
#[derive(Debug)]
pub struct GroupRef {
    pub occurs: Occurs,
    pub name: QualifiedName,
}

/// Named model group definition.
#[derive(Debug)]
pub struct GroupDefinition {
    pub name: QualifiedName,
    /// `None` if the definition has no compositor.
    pub model_group: Option<ModelGroup>,
}

/// Validated particle.
#[derive(Debug)]
pub enum Particle {
    Element(ElementParticle),
    Any(Wildcard),
    Group(ModelGroup),
    GroupRef(GroupRef),
}

impl Particle {
    /// Whether particle has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Group(g) if g.is_empty())
    }
}

impl DeModelGroup {
    /// # Errors
    ///
    /// Returns error if any of nested particles is not valid.
    pub fn validate(
        self,
        compositor: Compositor,
        ctx: &Context<'_>,
    ) -> Result<ModelGroup, ValidateError> {
        let particles = self
            .items
            .into_iter()
            .filter_map(|item| match item {
                DeModelGroupItem::Annotation(_) => None,
                DeModelGroupItem::Element(e) => Some(e.validate_particle(ctx).map(Particle::Element)),
                DeModelGroupItem::Group(g) => Some(g.validate_ref(ctx).map(Particle::GroupRef)),
                DeModelGroupItem::Choice(g) => {
                    Some(g.validate(Compositor::Choice, ctx).map(Particle::Group))
                }
                DeModelGroupItem::Sequence(g) => {
                    Some(g.validate(Compositor::Sequence, ctx).map(Particle::Group))
                }
                DeModelGroupItem::All(g) => Some(g.validate(Compositor::All, ctx).map(Particle::Group)),
                DeModelGroupItem::Any(a) => Some(Ok(Particle::Any(a.validate()))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ModelGroup {
            compositor,
            occurs: Occurs::from_attributes(self.min_occurs, self.max_occurs),
            particles,
        })
    }
}

impl DeAny {
    #[must_use]
    pub fn validate(self) -> Wildcard {
        Wildcard {
            occurs: Occurs::from_attributes(self.min_occurs, self.max_occurs),
            namespace: self.namespace,
        }
    }
}

impl DeGroup {
    /// Validate group reference inside a content model.
    ///
    /// # Errors
    ///
    /// - `ValidateError::NameOrRefRequired` if `ref` is missing
    /// - `ValidateError::Group` if reference cannot be resolved
    pub fn validate_ref(self, ctx: &Context<'_>) -> Result<GroupRef, ValidateError> {
        let reference = self
            .reference
            .ok_or(ValidateError::NameOrRefRequired("group"))?;
        let name = ctx
            .resolve(&reference)
            .map_err(|e| ValidateError::Group(reference.clone(), Box::new(e)))?;
        Ok(GroupRef {
            occurs: Occurs::from_attributes(self.min_occurs, self.max_occurs),
            name,
        })
    }

    /// Validate top level group definition.
    ///
    /// # Errors
    ///
    /// - `ValidateError::NameOrRefRequired` if `name` is missing
    /// - `ValidateError::Group` if content of the group is not valid
    pub fn validate_definition(self, ctx: &Context<'_>) -> Result<GroupDefinition, ValidateError> {
        let name = self.name.ok_or(ValidateError::NameOrRefRequired("group"))?;
        let model_group = self
            .items
            .into_iter()
            .find_map(|item| match item {
                DeGroupItem::Annotation(_) => None,
                DeGroupItem::Choice(g) => Some(g.validate(Compositor::Choice, ctx)),
                DeGroupItem::Sequence(g) => Some(g.validate(Compositor::Sequence, ctx)),
                DeGroupItem::All(g) => Some(g.validate(Compositor::All, ctx)),
            })
            .transpose()
            .map_err(|e| ValidateError::Group(name.clone(), Box::new(e)))?;
        Ok(GroupDefinition {
            name: ctx.global_name(&name),
            model_group,
        })
    }
}
