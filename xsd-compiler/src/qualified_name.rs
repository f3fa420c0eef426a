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

//! Namespace qualified names of schema components.

use crate::xsd::XS_NAMESPACE;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Expanded name: namespace URI plus local name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Namespace URI. `None` for names that are not in a namespace.
    pub namespace: Option<String>,
    /// Local name.
    pub name: String,
}

impl QualifiedName {
    /// Create new qualified name. Empty namespace means no namespace.
    #[must_use]
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(Into::into),
            name: name.into(),
        }
    }

    /// Name without namespace.
    #[must_use]
    pub fn local(name: impl Into<String>) -> Self {
        Self::new(None, name)
    }

    /// Name in the XML Schema namespace.
    #[must_use]
    pub fn xs(name: impl Into<String>) -> Self {
        Self::new(Some(XS_NAMESPACE), name)
    }

    /// Whether the name is in the XML Schema namespace.
    #[must_use]
    pub fn is_xs(&self) -> bool {
        self.namespace.as_deref() == Some(XS_NAMESPACE)
    }

    /// Whether the name belongs to `namespace`. Empty string matches
    /// names without namespace.
    #[must_use]
    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace.as_deref().unwrap_or("") == namespace
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.name),
            None => self.name.fmt(f),
        }
    }
}
