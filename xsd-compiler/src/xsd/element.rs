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
use crate::xsd::complex_type::ComplexType;
use crate::xsd::complex_type::DeComplexType;
use crate::xsd::particle::ElementParticle;
use crate::xsd::simple_type::DeSimpleType;
use crate::xsd::simple_type::SimpleType;
use crate::xsd::Context;
use crate::xsd::Form;
use crate::xsd::Ignored;
use crate::xsd::IsNillable;
use crate::xsd::ValidateError;
use crate::QualifiedName;
use serde::Deserialize;

/// `xs:element`
#[derive(Debug, Deserialize)]
pub struct DeElement {
    #[serde(rename = "@name")]
    pub name: Option<String>,
    #[serde(rename = "@ref")]
    pub reference: Option<String>,
    #[serde(rename = "@type")]
    pub element_type: Option<String>,
    #[serde(rename = "@nillable")]
    pub nillable: Option<IsNillable>,
    #[serde(rename = "@form")]
    pub form: Option<Form>,
    #[serde(rename = "@minOccurs")]
    pub min_occurs: Option<u64>,
    #[serde(rename = "@maxOccurs")]
    pub max_occurs: Option<MaxOccurs>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeElementItem>,
}

/// Items of `xs:element`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeElementItem {
    Annotation(Ignored),
    ComplexType(DeComplexType),
    SimpleType(DeSimpleType),
    Key(Ignored),
    Keyref(Ignored),
    Unique(Ignored),
    Alternative(Ignored),
}

/// Validated element declaration.
#[derive(Debug)]
pub struct Element {
    pub name: QualifiedName,
    pub nillable: IsNillable,
    pub element_type: ElementType,
}

/// Declared type of an element.
#[derive(Debug)]
pub enum ElementType {
    /// `type` attribute.
    Named(QualifiedName),
    /// Anonymous complex type.
    Complex(Box<ComplexType>),
    /// Anonymous simple type.
    Simple(SimpleType),
    /// No type given (`xs:anyType`).
    Unspecified,
}

/// Element declaration inside a content model.
#[derive(Debug)]
pub enum ElementDecl {
    Local(Element),
    Ref(QualifiedName),
}

impl DeElement {
    /// Validate top level element declaration.
    ///
    /// # Errors
    ///
    /// - `ValidateError::NameOrRefRequired` if name is missing
    /// - `ValidateError::Element` if error occured. Internal `ValidateError` contains details.
    pub fn validate_global(self, ctx: &Context<'_>) -> Result<Element, ValidateError> {
        let name = self
            .name
            .clone()
            .ok_or(ValidateError::NameOrRefRequired("element"))?;
        let qname = ctx.global_name(&name);
        self.validate_declaration(qname, ctx)
            .map_err(|e| ValidateError::Element(name, Box::new(e)))
    }

    /// Validate element declaration or reference inside a model group.
    ///
    /// # Errors
    ///
    /// - `ValidateError::NameOrRefRequired` if neither name nor ref is given
    /// - `ValidateError::Element` if error occured. Internal `ValidateError` contains details.
    pub fn validate_particle(mut self, ctx: &Context<'_>) -> Result<ElementParticle, ValidateError> {
        let occurs = Occurs::from_attributes(self.min_occurs, self.max_occurs);
        if let Some(reference) = self.reference.take() {
            let name = ctx
                .resolve(&reference)
                .map_err(|e| ValidateError::Element(reference, Box::new(e)))?;
            return Ok(ElementParticle {
                occurs,
                element: ElementDecl::Ref(name),
            });
        }
        let name = self
            .name
            .clone()
            .ok_or(ValidateError::NameOrRefRequired("element"))?;
        let qname = ctx.local_element_name(&name, self.form);
        let element = self
            .validate_declaration(qname, ctx)
            .map_err(|e| ValidateError::Element(name, Box::new(e)))?;
        Ok(ElementParticle {
            occurs,
            element: ElementDecl::Local(element),
        })
    }

    fn validate_declaration(
        self,
        name: QualifiedName,
        ctx: &Context<'_>,
    ) -> Result<Element, ValidateError> {
        let inline = self
            .items
            .into_iter()
            .find_map(|item| match item {
                DeElementItem::ComplexType(ct) => {
                    Some(ct.validate(ctx).map(|ct| ElementType::Complex(Box::new(ct))))
                }
                DeElementItem::SimpleType(st) => Some(st.validate(ctx).map(ElementType::Simple)),
                DeElementItem::Annotation(_)
                | DeElementItem::Key(_)
                | DeElementItem::Keyref(_)
                | DeElementItem::Unique(_)
                | DeElementItem::Alternative(_) => None,
            })
            .transpose()?;
        let element_type = match (self.element_type, inline) {
            (Some(t), _) => ElementType::Named(ctx.resolve(&t)?),
            (None, Some(inline)) => inline,
            (None, None) => ElementType::Unspecified,
        };
        Ok(Element {
            name,
            nillable: self.nillable.unwrap_or(IsNillable::new(false)),
            element_type,
        })
    }
}
