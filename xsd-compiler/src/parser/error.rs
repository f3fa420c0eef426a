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

use crate::QualifiedName;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Errors of the schema tree construction.
#[derive(Debug)]
pub enum Error {
    /// Element definition reaches the element itself.
    RecursiveSchema(QualifiedName),
    /// Declared type or content type cannot be handled.
    UnknownTypeShape(String),
    /// Model group is not a sequence, choice or all.
    UnknownGroupKind(QualifiedName),
    /// No global element matches the selector.
    ElementNotFound {
        name: Option<String>,
        namespace: Option<String>,
        available: Vec<QualifiedName>,
    },
    /// Selector has no name and the schema has several global
    /// elements.
    AmbiguousElement(Vec<QualifiedName>),
    NoGlobalElements,
}

fn names(names: &[QualifiedName]) -> String {
    names
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::RecursiveSchema(name) => {
                write!(f, "recursive schemas are not supported: element {name}")
            }
            Self::UnknownTypeShape(v) => write!(f, "unknown schema type: {v}"),
            Self::UnknownGroupKind(name) => write!(f, "unknown model group kind: group {name}"),
            Self::ElementNotFound {
                name,
                namespace,
                available,
            } => write!(
                f,
                "global element not found: name: {} namespace: {}; available elements: {}",
                name.as_deref().unwrap_or("<any>"),
                namespace.as_deref().unwrap_or("<any>"),
                names(available)
            ),
            Self::AmbiguousElement(available) => write!(
                f,
                "schema has several global elements, element name must be specified: {}",
                names(available)
            ),
            Self::NoGlobalElements => "schema has no global elements".fmt(f),
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn available_names_test() {
        let err = Error::AmbiguousElement(vec![
            QualifiedName::new(Some("urn:a"), "foo"),
            QualifiedName::local("bar"),
        ]);
        assert_eq!(
            err.to_string(),
            "schema has several global elements, element name must be specified: {urn:a}foo, bar"
        );
    }
}
