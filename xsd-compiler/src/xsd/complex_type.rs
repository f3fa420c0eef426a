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

use crate::xsd::attribute::AttributeItem;
use crate::xsd::attribute::DeAttribute;
use crate::xsd::attribute::DeAttributeGroup;
use crate::xsd::particle::Compositor;
use crate::xsd::particle::DeGroup;
use crate::xsd::particle::DeModelGroup;
use crate::xsd::particle::Particle;
use crate::xsd::simple_type::DeSimpleType;
use crate::xsd::simple_type::SimpleType;
use crate::xsd::Context;
use crate::xsd::Ignored;
use crate::xsd::IsMixed;
use crate::xsd::ValidateError;
use crate::QualifiedName;
use serde::Deserialize;

/// `xs:complexType`
#[derive(Debug, Deserialize)]
pub struct DeComplexType {
    #[serde(rename = "@name")]
    pub name: Option<String>,
    #[serde(rename = "@mixed")]
    pub mixed: Option<IsMixed>,
    #[serde(rename = "@abstract")]
    pub r#abstract: Option<bool>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeComplexTypeItem>,
}

/// Items of `xs:complexType`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeComplexTypeItem {
    Annotation(Ignored),
    SimpleContent(DeContent),
    ComplexContent(DeContent),
    Group(DeGroup),
    All(DeModelGroup),
    Choice(DeModelGroup),
    Sequence(DeModelGroup),
    Attribute(DeAttribute),
    AttributeGroup(DeAttributeGroup),
    AnyAttribute(Ignored),
    Assert(Ignored),
    OpenContent(Ignored),
}

/// `xs:simpleContent` or `xs:complexContent`
#[derive(Debug, Deserialize)]
pub struct DeContent {
    #[serde(rename = "@mixed")]
    pub mixed: Option<IsMixed>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeContentItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeContentItem {
    Annotation(Ignored),
    Extension(DeDerivation),
    Restriction(DeDerivation),
}

/// `xs:extension` or `xs:restriction`. Used by complex and simple
/// types.
#[derive(Debug, Deserialize)]
pub struct DeDerivation {
    #[serde(rename = "@base")]
    pub base: Option<String>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeDerivationItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeDerivationItem {
    Annotation(Ignored),
    SimpleType(DeSimpleType),
    Group(DeGroup),
    All(DeModelGroup),
    Choice(DeModelGroup),
    Sequence(DeModelGroup),
    Attribute(DeAttribute),
    AttributeGroup(DeAttributeGroup),
    AnyAttribute(Ignored),
    Assert(Ignored),
    OpenContent(Ignored),
    // Facets
    Enumeration(Ignored),
    Pattern(Ignored),
    Length(Ignored),
    MinLength(Ignored),
    MaxLength(Ignored),
    WhiteSpace(Ignored),
    MinInclusive(Ignored),
    MaxInclusive(Ignored),
    MinExclusive(Ignored),
    MaxExclusive(Ignored),
    TotalDigits(Ignored),
    FractionDigits(Ignored),
    Assertion(Ignored),
    ExplicitTimezone(Ignored),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DerivationMethod {
    Extension,
    Restriction,
}

/// Content model of a complex type.
#[derive(Debug)]
pub enum ContentModel {
    /// Particle given directly in `xs:complexType` (implicit
    /// restriction of `xs:anyType`).
    Particle(Option<Particle>),
    /// `xs:simpleContent`
    Simple {
        method: DerivationMethod,
        base: QualifiedName,
        /// Inline simple type of a restriction.
        simple_type: Option<Box<SimpleType>>,
    },
    /// `xs:complexContent`
    Complex {
        method: DerivationMethod,
        base: QualifiedName,
        particle: Option<Particle>,
    },
}

/// Validated `xs:complexType`
#[derive(Debug)]
pub struct ComplexType {
    /// `None` for anonymous types.
    pub name: Option<QualifiedName>,
    pub mixed: IsMixed,
    pub content: ContentModel,
    pub attributes: Vec<AttributeItem>,
}

impl ComplexType {
    /// Base type of derived content.
    #[must_use]
    pub const fn base(&self) -> Option<&QualifiedName> {
        match &self.content {
            ContentModel::Particle(_) => None,
            ContentModel::Simple { base, .. } | ContentModel::Complex { base, .. } => Some(base),
        }
    }

    /// Particle declared by the type itself (base content excluded).
    #[must_use]
    pub const fn own_particle(&self) -> Option<&Particle> {
        match &self.content {
            ContentModel::Particle(p) | ContentModel::Complex { particle: p, .. } => p.as_ref(),
            ContentModel::Simple { .. } => None,
        }
    }
}

/// Part of complex type or derivation content.
enum ContentPart {
    Particle(Particle),
    Attribute(AttributeItem),
}

fn model_group(
    group: DeModelGroup,
    compositor: Compositor,
    ctx: &Context<'_>,
) -> Result<ContentPart, ValidateError> {
    group
        .validate(compositor, ctx)
        .map(|g| ContentPart::Particle(Particle::Group(g)))
}

fn group_ref(group: DeGroup, ctx: &Context<'_>) -> Result<ContentPart, ValidateError> {
    group
        .validate_ref(ctx)
        .map(|g| ContentPart::Particle(Particle::GroupRef(g)))
}

/// Split validated content into the first particle and attributes.
fn split_parts(parts: Vec<ContentPart>) -> (Option<Particle>, Vec<AttributeItem>) {
    parts
        .into_iter()
        .fold((None, Vec::new()), |(particle, mut attributes), part| match part {
            ContentPart::Particle(p) => (particle.or(Some(p)), attributes),
            ContentPart::Attribute(a) => {
                attributes.push(a);
                (particle, attributes)
            }
        })
}

struct Derivation {
    method: DerivationMethod,
    base: Option<QualifiedName>,
    simple_type: Option<SimpleType>,
    particle: Option<Particle>,
    attributes: Vec<AttributeItem>,
}

impl DeDerivation {
    fn validate(
        self,
        method: DerivationMethod,
        ctx: &Context<'_>,
    ) -> Result<Derivation, ValidateError> {
        let base = self.base.as_deref().map(|b| ctx.resolve(b)).transpose()?;
        let mut simple_type = None;
        let mut parts = Vec::new();
        for item in self.items {
            let part = match item {
                DeDerivationItem::SimpleType(st) => {
                    simple_type = Some(st.validate(ctx)?);
                    continue;
                }
                DeDerivationItem::Group(g) => group_ref(g, ctx)?,
                DeDerivationItem::All(g) => model_group(g, Compositor::All, ctx)?,
                DeDerivationItem::Choice(g) => model_group(g, Compositor::Choice, ctx)?,
                DeDerivationItem::Sequence(g) => model_group(g, Compositor::Sequence, ctx)?,
                DeDerivationItem::Attribute(a) => ContentPart::Attribute(a.validate_local(ctx)?),
                DeDerivationItem::AttributeGroup(g) => ContentPart::Attribute(g.validate_ref(ctx)?),
                _ => continue,
            };
            parts.push(part);
        }
        let (particle, attributes) = split_parts(parts);
        Ok(Derivation {
            method,
            base,
            simple_type,
            particle,
            attributes,
        })
    }
}

impl DeContent {
    fn derivation(self, ctx: &Context<'_>) -> Result<Option<Derivation>, ValidateError> {
        self.items
            .into_iter()
            .find_map(|item| match item {
                DeContentItem::Annotation(_) => None,
                DeContentItem::Extension(d) => Some(d.validate(DerivationMethod::Extension, ctx)),
                DeContentItem::Restriction(d) => {
                    Some(d.validate(DerivationMethod::Restriction, ctx))
                }
            })
            .transpose()
    }
}

impl DeComplexType {
    /// # Errors
    ///
    /// - `ValidateError::ComplexType` if error occured. Internal `ValidateError` contains details.
    pub fn validate(self, ctx: &Context<'_>) -> Result<ComplexType, ValidateError> {
        let display_name = self.name.clone().unwrap_or_else(|| "<anonymous>".into());
        let name = self.name.as_deref().map(|n| ctx.global_name(n));
        let mixed = self.mixed.unwrap_or(IsMixed::new(false));
        self.validate_content(mixed, ctx)
            .map(|(mixed, content, attributes)| ComplexType {
                name,
                mixed,
                content,
                attributes,
            })
            .map_err(|e| ValidateError::ComplexType(display_name, Box::new(e)))
    }

    fn validate_content(
        self,
        mixed: IsMixed,
        ctx: &Context<'_>,
    ) -> Result<(IsMixed, ContentModel, Vec<AttributeItem>), ValidateError> {
        let mut parts = Vec::new();
        for item in self.items {
            let part = match item {
                DeComplexTypeItem::SimpleContent(content) => {
                    let d = content
                        .derivation(ctx)?
                        .ok_or(ValidateError::MissingAttribute("simpleContent", "base"))?;
                    let base = d
                        .base
                        .ok_or(ValidateError::MissingAttribute("simpleContent", "base"))?;
                    let content = ContentModel::Simple {
                        method: d.method,
                        base,
                        simple_type: d.simple_type.map(Box::new),
                    };
                    return Ok((mixed, content, d.attributes));
                }
                DeComplexTypeItem::ComplexContent(content) => {
                    let mixed = content.mixed.unwrap_or(mixed);
                    let d = content
                        .derivation(ctx)?
                        .ok_or(ValidateError::MissingAttribute("complexContent", "base"))?;
                    let base = d
                        .base
                        .ok_or(ValidateError::MissingAttribute("complexContent", "base"))?;
                    let content = ContentModel::Complex {
                        method: d.method,
                        base,
                        particle: d.particle,
                    };
                    return Ok((mixed, content, d.attributes));
                }
                DeComplexTypeItem::Group(g) => group_ref(g, ctx)?,
                DeComplexTypeItem::All(g) => model_group(g, Compositor::All, ctx)?,
                DeComplexTypeItem::Choice(g) => model_group(g, Compositor::Choice, ctx)?,
                DeComplexTypeItem::Sequence(g) => model_group(g, Compositor::Sequence, ctx)?,
                DeComplexTypeItem::Attribute(a) => ContentPart::Attribute(a.validate_local(ctx)?),
                DeComplexTypeItem::AttributeGroup(g) => {
                    ContentPart::Attribute(g.validate_ref(ctx)?)
                }
                DeComplexTypeItem::Annotation(_)
                | DeComplexTypeItem::AnyAttribute(_)
                | DeComplexTypeItem::Assert(_)
                | DeComplexTypeItem::OpenContent(_) => continue,
            };
            parts.push(part);
        }
        let (particle, attributes) = split_parts(parts);
        Ok((mixed, ContentModel::Particle(particle), attributes))
    }
}
