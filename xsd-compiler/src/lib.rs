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

//! Type inference from XML Schema (XSD) documents.
//!
//! Schema documents are compiled into a [`SchemaSet`]. A global
//! element of the set is converted into a simplified schema tree
//! ([`parser`]), and the tree is converted into the shared
//! [`InferedType`] model ([`inference`]).
//!
//! ```no_run
//! use std::path::Path;
//! use xsd_infer_compiler::infer;
//! use xsd_infer_compiler::ElementSelector;
//! use xsd_infer_compiler::SchemaSet;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let set = SchemaSet::compile_file(Path::new("po.xsd"))?;
//! let infered = infer(&set, &ElementSelector::named("purchaseOrder"))?;
//! println!("{infered}");
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod error;
pub mod inference;
pub mod manifest;
pub mod occurs;
pub mod parser;
pub mod qualified_name;
pub mod schema_set;
pub mod type_code;
pub mod xsd;

use xsd_infer_core::InferedType;

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use qualified_name::QualifiedName;
#[doc(inline)]
pub use schema_set::SchemaSet;
#[doc(inline)]
pub use type_code::TypeCode;

/// Selector of a global element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSelector {
    /// Local name. Without name the schema must have exactly one
    /// matching global element.
    pub name: Option<String>,
    /// Namespace URI.
    pub namespace: Option<String>,
}

impl ElementSelector {
    /// Select element by local name in any namespace.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            namespace: None,
        }
    }

    /// Restrict selection to the namespace.
    #[must_use]
    pub fn in_namespace(self, namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..self
        }
    }
}

/// Infer type of the selected global element.
///
/// # Errors
///
/// - element lookup errors, see [`parser::find_global_element`]
/// - schema tree construction errors, see [`parser::Parser::parse_element`]
pub fn infer(set: &SchemaSet, selector: &ElementSelector) -> Result<InferedType, parser::Error> {
    let element = parser::find_global_element(
        set,
        selector.name.as_deref(),
        selector.namespace.as_deref(),
    )?;
    let schema_element = parser::Parser::new(set).parse_element(element)?;
    Ok(inference::infer_element(&schema_element))
}
