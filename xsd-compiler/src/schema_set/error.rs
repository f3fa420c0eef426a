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

use crate::xsd::ValidateError;
use crate::QualifiedName;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::io::Error as IoError;

/// Kind of a referenced schema component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentKind {
    Element,
    Type,
    SimpleType,
    Group,
    AttributeGroup,
    Attribute,
}

impl Display for ComponentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Element => "element",
            Self::Type => "type",
            Self::SimpleType => "simple type",
            Self::Group => "group",
            Self::AttributeGroup => "attribute group",
            Self::Attribute => "attribute",
        }
        .fmt(f)
    }
}

/// Schema set compilation errors.
#[derive(Debug)]
pub enum Error {
    /// Schema document cannot be read.
    Io(String, IoError),
    /// Location scheme is not supported by the resolver.
    UnsupportedLocation(String),
    /// Schema document is not valid.
    Xsd(String, ValidateError),
    /// Referenced component is not defined in the set.
    UnresolvedReference {
        kind: ComponentKind,
        name: QualifiedName,
    },
    /// Type is derived from itself.
    CircularDerivation(QualifiedName),
    /// Attribute group references itself.
    CircularAttributeGroup(QualifiedName),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Io(location, err) => {
                write!(f, "input/output error: schema location: {location}: {err}")
            }
            Self::UnsupportedLocation(location) => {
                write!(f, "unsupported schema location: {location}")
            }
            Self::Xsd(location, err) => {
                write!(f, "XSD validation error: schema location: {location}: {err}")
            }
            Self::UnresolvedReference { kind, name } => {
                write!(f, "reference to undefined {kind}: {name}")
            }
            Self::CircularDerivation(name) => write!(f, "type {name} is derived from itself"),
            Self::CircularAttributeGroup(name) => {
                write!(f, "attribute group {name} references itself")
            }
        }
    }
}

impl StdError for Error {}
