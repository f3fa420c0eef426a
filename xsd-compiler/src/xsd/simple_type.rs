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

use crate::xsd::complex_type::DeDerivation;
use crate::xsd::complex_type::DeDerivationItem;
use crate::xsd::Context;
use crate::xsd::Ignored;
use crate::xsd::ValidateError;
use crate::QualifiedName;
use serde::Deserialize;

/// `xs:simpleType`
#[derive(Debug, Deserialize)]
pub struct DeSimpleType {
    #[serde(rename = "@name")]
    pub name: Option<String>,
    #[serde(rename = "$value", default)]
    pub items: Vec<DeSimpleTypeItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeSimpleTypeItem {
    Annotation(Ignored),
    Restriction(DeDerivation),
    // Members of lists and unions are not analyzed.
    List(Ignored),
    Union(Ignored),
}

/// Validated `xs:simpleType`
#[derive(Debug)]
pub struct SimpleType {
    /// `None` for anonymous types.
    pub name: Option<QualifiedName>,
    pub variety: SimpleVariety,
}

#[derive(Debug)]
pub enum SimpleVariety {
    Restriction(SimpleTypeRef),
    List,
    Union,
}

/// Base of a simple type restriction.
#[derive(Debug)]
pub enum SimpleTypeRef {
    Named(QualifiedName),
    Anonymous(Box<SimpleType>),
}

impl DeSimpleType {
    /// # Errors
    ///
    /// - `ValidateError::SimpleType` if error occured. Internal `ValidateError` contains details.
    pub fn validate(self, ctx: &Context<'_>) -> Result<SimpleType, ValidateError> {
        let display_name = self.name.clone().unwrap_or_else(|| "<anonymous>".into());
        let name = self.name.as_deref().map(|n| ctx.global_name(n));
        let variety = self
            .items
            .into_iter()
            .find_map(|item| match item {
                DeSimpleTypeItem::Annotation(_) => None,
                DeSimpleTypeItem::Restriction(r) => Some(restriction(r, ctx)),
                DeSimpleTypeItem::List(_) => Some(Ok(SimpleVariety::List)),
                DeSimpleTypeItem::Union(_) => Some(Ok(SimpleVariety::Union)),
            })
            .unwrap_or(Err(ValidateError::MissingAttribute(
                "simpleType",
                "restriction",
            )))
            .map_err(|e| ValidateError::SimpleType(display_name, Box::new(e)))?;
        Ok(SimpleType { name, variety })
    }
}

fn restriction(r: DeDerivation, ctx: &Context<'_>) -> Result<SimpleVariety, ValidateError> {
    if let Some(base) = r.base {
        return Ok(SimpleVariety::Restriction(SimpleTypeRef::Named(
            ctx.resolve(&base)?,
        )));
    }
    r.items
        .into_iter()
        .find_map(|item| match item {
            DeDerivationItem::SimpleType(st) => Some(st),
            _ => None,
        })
        .ok_or(ValidateError::MissingAttribute("restriction", "base"))?
        .validate(ctx)
        .map(|st| SimpleVariety::Restriction(SimpleTypeRef::Anonymous(Box::new(st))))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::xsd::namespaces::qualify;
    use crate::xsd::Form;

    fn validate(xml: &str) -> Result<SimpleType, ValidateError> {
        let xml = qualify(xml)?;
        let ctx = Context {
            target_namespace: None,
            element_form_default: Form::Unqualified,
            attribute_form_default: Form::Unqualified,
            chameleon: false,
        };
        let de: DeSimpleType = quick_xml::de::from_str(&xml).map_err(ValidateError::XmlDeserialize)?;
        de.validate(&ctx)
    }

    #[test]
    fn restriction_with_facets_test() {
        let st = validate(
            r#"<xs:simpleType xmlns:xs="http://www.w3.org/2001/XMLSchema" name="Sku">
                 <xs:restriction base="xs:string">
                   <xs:pattern value="\d{3}-[A-Z]{2}"/>
                   <xs:maxLength value="6"/>
                 </xs:restriction>
               </xs:simpleType>"#,
        )
        .unwrap();
        assert_eq!(st.name, Some(QualifiedName::local("Sku")));
        assert!(matches!(
            st.variety,
            SimpleVariety::Restriction(SimpleTypeRef::Named(ref n)) if *n == QualifiedName::xs("string")
        ));
    }

    #[test]
    fn nested_restriction_and_list_test() {
        let st = validate(
            r#"<xs:simpleType xmlns:xs="http://www.w3.org/2001/XMLSchema">
                 <xs:restriction>
                   <xs:simpleType><xs:list itemType="xs:int"/></xs:simpleType>
                   <xs:length value="3"/>
                 </xs:restriction>
               </xs:simpleType>"#,
        )
        .unwrap();
        let SimpleVariety::Restriction(SimpleTypeRef::Anonymous(inner)) = st.variety else {
            panic!("anonymous base expected");
        };
        assert!(matches!(inner.variety, SimpleVariety::List));
    }

    #[test]
    fn empty_simple_type_test() {
        let err = validate(r#"<xs:simpleType xmlns:xs="http://www.w3.org/2001/XMLSchema"/>"#)
            .unwrap_err();
        assert!(matches!(err, ValidateError::SimpleType(..)));
    }
}
