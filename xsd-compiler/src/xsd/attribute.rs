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

use crate::xsd::simple_type::DeSimpleType;
use crate::xsd::simple_type::SimpleType;
use crate::xsd::Context;
use crate::xsd::Form;
use crate::xsd::Ignored;
use crate::xsd::ValidateError;
use crate::QualifiedName;
use serde::Deserialize;

/// `xs:attribute`
#[derive(Debug, Deserialize)]
pub struct DeAttribute {
    #[serde(rename = "@name")]
    pub name: Option<String>,
    #[serde(rename = "@ref")]
    pub reference: Option<String>,
    #[serde(rename = "@type")]
    pub attribute_type: Option<String>,
    #[serde(rename = "@use")]
    pub usage: Option<AttributeUsage>,
    #[serde(rename = "@form")]
    pub form: Option<Form>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeAttributeItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeAttributeItem {
    Annotation(Ignored),
    SimpleType(DeSimpleType),
}

/// `xs:attributeGroup`, either a definition (`name`) or a reference
/// (`ref`).
#[derive(Debug, Deserialize)]
pub struct DeAttributeGroup {
    #[serde(rename = "@name")]
    pub name: Option<String>,
    #[serde(rename = "@ref")]
    pub reference: Option<String>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeAttributeGroupItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeAttributeGroupItem {
    Annotation(Ignored),
    Attribute(DeAttribute),
    AttributeGroup(DeAttributeGroup),
    AnyAttribute(Ignored),
}

/// Value of `use` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeUsage {
    /// No `use` given.
    #[serde(skip_deserializing)]
    None,
    Optional,
    Required,
    Prohibited,
}

/// Validated attribute declaration.
#[derive(Debug)]
pub struct Attribute {
    pub name: QualifiedName,
    pub attribute_type: AttributeType,
}

#[derive(Debug)]
pub enum AttributeType {
    Named(QualifiedName),
    Anonymous(SimpleType),
    /// No type given (`xs:anySimpleType`).
    Unspecified,
}

#[derive(Debug)]
pub enum AttributeDecl {
    Local(Attribute),
    Ref(QualifiedName),
}

/// Attribute content of complex types and attribute groups.
#[derive(Debug)]
pub enum AttributeItem {
    Attribute {
        decl: AttributeDecl,
        usage: AttributeUsage,
    },
    GroupRef(QualifiedName),
}

/// Validated `xs:attributeGroup` definition.
#[derive(Debug)]
pub struct AttributeGroup {
    pub name: QualifiedName,
    pub items: Vec<AttributeItem>,
}

impl DeAttribute {
    /// Validate top level attribute declaration.
    ///
    /// # Errors
    ///
    /// - `ValidateError::NameOrRefRequired` if name is missing
    /// - `ValidateError::Attribute` if type cannot be resolved
    pub fn validate_global(self, ctx: &Context<'_>) -> Result<Attribute, ValidateError> {
        let name = self
            .name
            .clone()
            .ok_or(ValidateError::NameOrRefRequired("attribute"))?;
        let qname = ctx.global_name(&name);
        self.validate_declaration(qname, ctx)
            .map_err(|e| ValidateError::Attribute(name, Box::new(e)))
    }

    /// Validate attribute use inside complex type or attribute group.
    ///
    /// # Errors
    ///
    /// - `ValidateError::NameOrRefRequired` if neither name nor ref is given
    /// - `ValidateError::Attribute` if type or reference cannot be resolved
    pub fn validate_local(mut self, ctx: &Context<'_>) -> Result<AttributeItem, ValidateError> {
        let usage = self.usage.unwrap_or(AttributeUsage::None);
        if let Some(reference) = self.reference.take() {
            let name = ctx
                .resolve(&reference)
                .map_err(|e| ValidateError::Attribute(reference, Box::new(e)))?;
            return Ok(AttributeItem::Attribute {
                decl: AttributeDecl::Ref(name),
                usage,
            });
        }
        let name = self
            .name
            .clone()
            .ok_or(ValidateError::NameOrRefRequired("attribute"))?;
        let qname = ctx.local_attribute_name(&name, self.form);
        let attribute = self
            .validate_declaration(qname, ctx)
            .map_err(|e| ValidateError::Attribute(name, Box::new(e)))?;
        Ok(AttributeItem::Attribute {
            decl: AttributeDecl::Local(attribute),
            usage,
        })
    }

    fn validate_declaration(
        self,
        name: QualifiedName,
        ctx: &Context<'_>,
    ) -> Result<Attribute, ValidateError> {
        let attribute_type = match self.attribute_type {
            Some(t) => AttributeType::Named(ctx.resolve(&t)?),
            None => self
                .items
                .into_iter()
                .find_map(|item| match item {
                    DeAttributeItem::SimpleType(st) => Some(st),
                    DeAttributeItem::Annotation(_) => None,
                })
                .map(|st| st.validate(ctx))
                .transpose()?
                .map_or(AttributeType::Unspecified, AttributeType::Anonymous),
        };
        Ok(Attribute {
            name,
            attribute_type,
        })
    }
}

impl DeAttributeGroup {
    /// Validate attribute group reference.
    ///
    /// # Errors
    ///
    /// - `ValidateError::NameOrRefRequired` if `ref` is missing
    /// - `ValidateError::AttributeGroup` if reference cannot be resolved
    pub fn validate_ref(self, ctx: &Context<'_>) -> Result<AttributeItem, ValidateError> {
        let reference = self
            .reference
            .ok_or(ValidateError::NameOrRefRequired("attributeGroup"))?;
        ctx.resolve(&reference)
            .map(AttributeItem::GroupRef)
            .map_err(|e| ValidateError::AttributeGroup(reference, Box::new(e)))
    }

    /// Validate top level attribute group definition.
    ///
    /// # Errors
    ///
    /// - `ValidateError::NameOrRefRequired` if `name` is missing
    /// - `ValidateError::AttributeGroup` if content is not valid
    pub fn validate_definition(self, ctx: &Context<'_>) -> Result<AttributeGroup, ValidateError> {
        let name = self
            .name
            .ok_or(ValidateError::NameOrRefRequired("attributeGroup"))?;
        let items = self
            .items
            .into_iter()
            .filter_map(|item| match item {
                DeAttributeGroupItem::Attribute(a) => Some(a.validate_local(ctx)),
                DeAttributeGroupItem::AttributeGroup(g) => Some(g.validate_ref(ctx)),
                DeAttributeGroupItem::Annotation(_) | DeAttributeGroupItem::AnyAttribute(_) => None,
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ValidateError::AttributeGroup(name.clone(), Box::new(e)))?;
        Ok(AttributeGroup {
            name: ctx.global_name(&name),
            items,
        })
    }
}
