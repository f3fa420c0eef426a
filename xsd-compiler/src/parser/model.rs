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

//! Simplified schema tree.
//!
//! The tree is built for one global element and owns all of its data.
//! References of the schema set are already resolved, so the tree can
//! be consumed without the schema set.

use crate::occurs::Occurs;
use crate::xsd::IsMixed;
use crate::xsd::IsNillable;
use crate::QualifiedName;
use crate::TypeCode;

/// Element with resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaElement {
    pub name: QualifiedName,
    pub element_type: SchemaType,
    pub nillable: IsNillable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Simple(TypeCode),
    Complex(Box<ComplexTypeDescriptor>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexTypeDescriptor {
    /// Attributes in declaration order. Prohibited attributes are not
    /// included.
    pub attributes: Vec<AttributeDescriptor>,
    pub contents: Contents,
    pub mixed: IsMixed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: QualifiedName,
    pub type_code: TypeCode,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    /// Text with attributes.
    SimpleContent(TypeCode),
    ComplexContent(Particle),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Particle {
    Empty,
    Any(Occurs),
    Element(Occurs, SchemaElement),
    All(Occurs, Vec<Particle>),
    Choice(Occurs, Vec<Particle>),
    Sequence(Occurs, Vec<Particle>),
}
