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

//! Detection of recursive definitions.

use crate::schema_set::DeclaredType;
use crate::schema_set::SchemaSet;
use crate::xsd::complex_type::ComplexType;
use crate::xsd::element::Element;
use crate::xsd::element::ElementDecl;
use crate::xsd::particle::GroupDefinition;
use crate::xsd::particle::ModelGroup;
use crate::xsd::particle::Particle;
use std::collections::HashSet;

/// Node of the schema component graph.
#[derive(Clone, Copy)]
pub enum Node<'a> {
    Element(&'a Element),
    ComplexType(&'a ComplexType),
    ModelGroup(&'a ModelGroup),
    Group(&'a GroupDefinition),
}

impl<'a> Node<'a> {
    /// Identity of the component: kind and address.
    fn id(self) -> (u8, *const ()) {
        match self {
            Self::Element(v) => (0, std::ptr::from_ref(v).cast()),
            Self::ComplexType(v) => (1, std::ptr::from_ref(v).cast()),
            Self::ModelGroup(v) => (2, std::ptr::from_ref(v).cast()),
            Self::Group(v) => (3, std::ptr::from_ref(v).cast()),
        }
    }

    fn successors(self, set: &'a SchemaSet, out: &mut Vec<Node<'a>>) {
        match self {
            Self::Element(e) => {
                if let DeclaredType::Complex(ct) = set.element_type(e) {
                    out.push(Node::ComplexType(ct));
                }
            }
            Self::ComplexType(ct) => {
                if let Some(DeclaredType::Complex(base)) = ct.base().map(|b| set.named_type(b)) {
                    out.push(Node::ComplexType(base));
                }
                out.extend(ct.own_particle().and_then(|p| particle_node(set, p)));
            }
            Self::ModelGroup(g) => {
                out.extend(g.particles.iter().filter_map(|p| particle_node(set, p)));
            }
            Self::Group(g) => out.extend(g.model_group.as_ref().map(Node::ModelGroup)),
        }
    }
}

fn particle_node<'a>(set: &'a SchemaSet, particle: &'a Particle) -> Option<Node<'a>> {
    match particle {
        Particle::Element(e) => match &e.element {
            ElementDecl::Local(e) => Some(Node::Element(e)),
            ElementDecl::Ref(name) => set.find_element(name).map(Node::Element),
        },
        Particle::Group(g) => Some(Node::ModelGroup(g)),
        Particle::GroupRef(r) => set.find_group(&r.name).map(Node::Group),
        Particle::Any(_) => None,
    }
}

/// Whether `start` can be reached from itself.
///
/// Traversal is iterative and visits every node at most once, so it
/// terminates on cyclic graphs that do not pass through `start`.
#[must_use]
pub fn is_recursive(set: &SchemaSet, start: Node<'_>) -> bool {
    let start_id = start.id();
    let mut visited = HashSet::new();
    let mut stack = Vec::new();
    start.successors(set, &mut stack);
    while let Some(node) = stack.pop() {
        let id = node.id();
        if id == start_id {
            return true;
        }
        if visited.insert(id) {
            node.successors(set, &mut stack);
        }
    }
    false
}
