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

//! XML Schema document parser and validator.
//!
//! Documents are deserialized into `De*` structures that mirror the
//! XML and then validated into the native schema object model. All
//! QName valued attributes are resolved to [`QualifiedName`] during
//! validation.

/// Namespace resolution of QName values.
pub mod namespaces;

/// `xs:schema`
pub mod schema;

/// `xs:element`
pub mod element;

/// `xs:complexType`, `xs:simpleContent`, `xs:complexContent`
pub mod complex_type;

/// `xs:simpleType`
pub mod simple_type;

/// `xs:sequence`, `xs:choice`, `xs:all`, `xs:group`, `xs:any`
pub mod particle;

/// `xs:attribute`, `xs:attributeGroup`
pub mod attribute;

use crate::QualifiedName;
use quick_xml::DeError;
use quick_xml::Error as XmlError;
use serde::Deserialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::Utf8Error;
use tagged_types::TaggedType;

/// Namespace of XML Schema components.
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

pub type IsNillable = TaggedType<bool, IsNillableTag>;
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug, Deserialize)]
#[capability(inner_access)]
pub enum IsNillableTag {}

pub type IsMixed = TaggedType<bool, IsMixedTag>;
#[derive(tagged_types::Tag)]
#[implement(Clone, Copy, PartialEq, Eq)]
#[transparent(Debug, Deserialize)]
#[capability(inner_access)]
pub enum IsMixedTag {}

pub type ComponentName = String;

/// XSD validation errors.
#[derive(Debug)]
pub enum ValidateError {
    /// XML deserialization error.
    XmlDeserialize(DeError),
    /// XML reader error.
    Xml(XmlError),
    /// Qualified name is not valid UTF-8.
    Utf8(Utf8Error),
    /// QName uses a prefix that is not bound.
    UndeclaredPrefix(String),
    /// Malformed QName.
    InvalidQualifiedName(String),
    /// Component that must have either `name` or `ref` has none.
    NameOrRefRequired(&'static str),
    /// Required attribute is missing.
    MissingAttribute(&'static str, &'static str),
    /// `xs:element` validation error.
    Element(ComponentName, Box<ValidateError>),
    /// `xs:complexType` validation error.
    ComplexType(ComponentName, Box<ValidateError>),
    /// `xs:simpleType` validation error.
    SimpleType(ComponentName, Box<ValidateError>),
    /// `xs:group` validation error.
    Group(ComponentName, Box<ValidateError>),
    /// `xs:attributeGroup` validation error.
    AttributeGroup(ComponentName, Box<ValidateError>),
    /// `xs:attribute` validation error.
    Attribute(ComponentName, Box<ValidateError>),
}

impl Display for ValidateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::XmlDeserialize(err) => write!(f, "xml deserialization error: {err}"),
            Self::Xml(err) => write!(f, "xml error: {err}"),
            Self::Utf8(err) => write!(f, "invalid qualified name encoding: {err}"),
            Self::UndeclaredPrefix(qname) => write!(f, "undeclared namespace prefix in {qname}"),
            Self::InvalidQualifiedName(qname) => write!(f, "invalid qualified name: {qname}"),
            Self::NameOrRefRequired(kind) => write!(f, "{kind}: either name or ref is required"),
            Self::MissingAttribute(kind, attr) => write!(f, "{kind}: attribute {attr} is required"),
            Self::Element(name, err) => write!(f, "element {name}: {err}"),
            Self::ComplexType(name, err) => write!(f, "complex type {name}: {err}"),
            Self::SimpleType(name, err) => write!(f, "simple type {name}: {err}"),
            Self::Group(name, err) => write!(f, "group {name}: {err}"),
            Self::AttributeGroup(name, err) => write!(f, "attribute group {name}: {err}"),
            Self::Attribute(name, err) => write!(f, "attribute {name}: {err}"),
        }
    }
}

/// Value of `form`, `elementFormDefault` and `attributeFormDefault`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    Qualified,
    #[default]
    Unqualified,
}

/// Content without impact on inferred types (annotations, facets,
/// identity constraints, ...).
#[derive(Debug, Deserialize)]
pub struct Ignored {}

/// Document level settings used to resolve names during validation.
#[derive(Debug)]
pub struct Context<'a> {
    pub target_namespace: Option<&'a str>,
    pub element_form_default: Form,
    pub attribute_form_default: Form,
    /// Document without `targetNamespace` included into a namespace.
    pub chameleon: bool,
}

impl Context<'_> {
    /// Resolve QName value of `type`, `ref`, `base` attributes.
    ///
    /// Prefixes are expected to be already replaced by namespaces in
    /// `{namespace}local` form (see [`namespaces::qualify`]). A prefix that
    /// is still present was not declared in scope.
    ///
    /// # Errors
    ///
    /// - `ValidateError::UndeclaredPrefix` if prefix is not bound
    /// - `ValidateError::InvalidQualifiedName` if value is malformed
    pub fn resolve(&self, qname: &str) -> Result<QualifiedName, ValidateError> {
        let qname = qname.trim();
        let invalid = || ValidateError::InvalidQualifiedName(qname.into());
        if let Some(clark) = qname.strip_prefix('{') {
            let (namespace, local) = clark.split_once('}').ok_or_else(invalid)?;
            if local.is_empty() || local.contains(':') {
                return Err(invalid());
            }
            return Ok(QualifiedName::new(Some(namespace), local));
        }
        match qname.split_once(':') {
            Some((prefix, local)) => {
                if prefix.is_empty() || local.is_empty() || local.contains(':') {
                    Err(invalid())
                } else {
                    Err(ValidateError::UndeclaredPrefix(qname.into()))
                }
            }
            None if qname.is_empty() => Err(invalid()),
            None => Ok(QualifiedName::new(
                self.target_namespace.filter(|_| self.chameleon),
                qname,
            )),
        }
    }

    /// Name of a top level component.
    #[must_use]
    pub fn global_name(&self, name: &str) -> QualifiedName {
        QualifiedName::new(self.target_namespace, name)
    }

    /// Name of a local element declaration.
    #[must_use]
    pub fn local_element_name(&self, name: &str, form: Option<Form>) -> QualifiedName {
        self.local_name(name, form.unwrap_or(self.element_form_default))
    }

    /// Name of a local attribute declaration.
    #[must_use]
    pub fn local_attribute_name(&self, name: &str, form: Option<Form>) -> QualifiedName {
        self.local_name(name, form.unwrap_or(self.attribute_form_default))
    }

    fn local_name(&self, name: &str, form: Form) -> QualifiedName {
        match form {
            Form::Qualified => self.global_name(name),
            Form::Unqualified => QualifiedName::local(name),
        }
    }
}
