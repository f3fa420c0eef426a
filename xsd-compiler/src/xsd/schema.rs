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

use crate::xsd::attribute::Attribute;
use crate::xsd::attribute::AttributeGroup;
use crate::xsd::attribute::DeAttribute;
use crate::xsd::attribute::DeAttributeGroup;
use crate::xsd::complex_type::ComplexType;
use crate::xsd::complex_type::DeComplexType;
use crate::xsd::element::DeElement;
use crate::xsd::element::Element;
use crate::xsd::namespaces::qualify;
use crate::xsd::particle::DeGroup;
use crate::xsd::particle::GroupDefinition;
use crate::xsd::simple_type::DeSimpleType;
use crate::xsd::simple_type::SimpleType;
use crate::xsd::Context;
use crate::xsd::Form;
use crate::xsd::Ignored;
use crate::xsd::ValidateError;
use serde::Deserialize;

/// `xs:schema`
#[derive(Debug, Deserialize)]
pub struct DeSchema {
    #[serde(rename = "@targetNamespace")]
    pub target_namespace: Option<String>,
    #[serde(rename = "@elementFormDefault")]
    pub element_form_default: Option<Form>,
    #[serde(rename = "@attributeFormDefault")]
    pub attribute_form_default: Option<Form>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeSchemaItem>,
}

/// Top level items of `xs:schema`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeSchemaItem {
    Annotation(Ignored),
    Include(DeInclude),
    Import(DeInclude),
    Redefine(DeInclude),
    Override(DeInclude),
    Element(DeElement),
    ComplexType(DeComplexType),
    SimpleType(DeSimpleType),
    Group(DeGroup),
    AttributeGroup(DeAttributeGroup),
    Attribute(DeAttribute),
    Notation(Ignored),
    DefaultOpenContent(Ignored),
}

/// `xs:include`, `xs:import`, `xs:redefine` or `xs:override`. Content
/// of redefinitions is ignored.
#[derive(Debug, Deserialize)]
pub struct DeInclude {
    #[serde(rename = "@schemaLocation")]
    pub schema_location: Option<String>,
    #[serde(rename = "@namespace")]
    pub namespace: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncludeKind {
    /// `xs:include`, `xs:redefine` and `xs:override`: same target
    /// namespace.
    Include,
    /// `xs:import`: other namespace.
    Import,
}

/// Reference to another schema document.
#[derive(Debug, Clone)]
pub struct Include {
    pub kind: IncludeKind,
    pub location: Option<String>,
    pub namespace: Option<String>,
}

/// Validated schema document.
#[derive(Debug, Default)]
pub struct Schema {
    /// Effective target namespace (adopted one for chameleon
    /// includes).
    pub target_namespace: Option<String>,
    pub elements: Vec<Element>,
    pub complex_types: Vec<ComplexType>,
    pub simple_types: Vec<SimpleType>,
    pub groups: Vec<GroupDefinition>,
    pub attribute_groups: Vec<AttributeGroup>,
    pub attributes: Vec<Attribute>,
    pub includes: Vec<Include>,
}

impl Schema {
    /// Parse and validate schema document.
    ///
    /// `chameleon_namespace` is the target namespace of the including
    /// document. It is adopted if the document declares no target
    /// namespace itself.
    ///
    /// # Errors
    ///
    /// Returns `ValidateError` if document is not a valid schema.
    pub fn parse(xml: &str, chameleon_namespace: Option<&str>) -> Result<Self, ValidateError> {
        let xml = qualify(xml)?;
        let de: DeSchema = quick_xml::de::from_str(&xml).map_err(ValidateError::XmlDeserialize)?;
        de.validate(chameleon_namespace)
    }
}

impl DeSchema {
    /// # Errors
    ///
    /// Returns first validation error of schema components.
    pub fn validate(self, chameleon_namespace: Option<&str>) -> Result<Schema, ValidateError> {
        let own_namespace = self.target_namespace.filter(|ns| !ns.is_empty());
        let chameleon = own_namespace.is_none() && chameleon_namespace.is_some();
        let target_namespace = own_namespace.or_else(|| chameleon_namespace.map(Into::into));
        let ctx = Context {
            target_namespace: target_namespace.as_deref(),
            element_form_default: self.element_form_default.unwrap_or_default(),
            attribute_form_default: self.attribute_form_default.unwrap_or_default(),
            chameleon,
        };
        let mut schema = Schema::default();
        for item in self.items {
            match item {
                DeSchemaItem::Include(v) | DeSchemaItem::Redefine(v) | DeSchemaItem::Override(v) => {
                    schema.includes.push(v.into_include(IncludeKind::Include));
                }
                DeSchemaItem::Import(v) => schema.includes.push(v.into_include(IncludeKind::Import)),
                DeSchemaItem::Element(v) => schema.elements.push(v.validate_global(&ctx)?),
                DeSchemaItem::ComplexType(v) => {
                    let ct = v.validate(&ctx)?;
                    if ct.name.is_none() {
                        return Err(ValidateError::ComplexType(
                            "<anonymous>".into(),
                            Box::new(ValidateError::NameOrRefRequired("complexType")),
                        ));
                    }
                    schema.complex_types.push(ct);
                }
                DeSchemaItem::SimpleType(v) => {
                    let st = v.validate(&ctx)?;
                    if st.name.is_none() {
                        return Err(ValidateError::SimpleType(
                            "<anonymous>".into(),
                            Box::new(ValidateError::NameOrRefRequired("simpleType")),
                        ));
                    }
                    schema.simple_types.push(st);
                }
                DeSchemaItem::Group(v) => schema.groups.push(v.validate_definition(&ctx)?),
                DeSchemaItem::AttributeGroup(v) => {
                    schema.attribute_groups.push(v.validate_definition(&ctx)?);
                }
                DeSchemaItem::Attribute(v) => schema.attributes.push(v.validate_global(&ctx)?),
                DeSchemaItem::Annotation(_)
                | DeSchemaItem::Notation(_)
                | DeSchemaItem::DefaultOpenContent(_) => {}
            }
        }
        schema.target_namespace = target_namespace;
        Ok(schema)
    }
}

impl DeInclude {
    fn into_include(self, kind: IncludeKind) -> Include {
        Include {
            kind,
            location: self.schema_location,
            namespace: self.namespace,
        }
    }
}
