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

use crate::schema_set::ComponentKind;
use crate::schema_set::Error;
use crate::schema_set::SchemaSet;
use crate::xsd::attribute::Attribute;
use crate::xsd::attribute::AttributeDecl;
use crate::xsd::attribute::AttributeItem;
use crate::xsd::attribute::AttributeType;
use crate::xsd::complex_type::ComplexType;
use crate::xsd::complex_type::ContentModel;
use crate::xsd::element::Element;
use crate::xsd::element::ElementDecl;
use crate::xsd::element::ElementType;
use crate::xsd::particle::Particle;
use crate::xsd::simple_type::SimpleType;
use crate::xsd::simple_type::SimpleTypeRef;
use crate::xsd::simple_type::SimpleVariety;
use crate::QualifiedName;
use crate::TypeCode;
use std::collections::HashSet;

/// Check that every reference of the set can be resolved and that
/// there are no circular definitions.
pub(super) fn check(set: &SchemaSet) -> Result<(), Error> {
    let refs = References { set };
    for loaded in set.schemas() {
        let schema = &loaded.schema;
        schema.elements.iter().try_for_each(|e| refs.element(e))?;
        schema
            .complex_types
            .iter()
            .try_for_each(|ct| refs.complex_type(ct))?;
        schema
            .simple_types
            .iter()
            .try_for_each(|st| refs.simple_type(st))?;
        schema
            .groups
            .iter()
            .filter_map(|g| g.model_group.as_ref())
            .flat_map(|g| &g.particles)
            .try_for_each(|p| refs.particle(p))?;
        schema
            .attribute_groups
            .iter()
            .try_for_each(|g| refs.attribute_items(&g.items))?;
        schema
            .attributes
            .iter()
            .try_for_each(|a| refs.attribute(a))?;
    }
    for loaded in set.schemas() {
        for ct in &loaded.schema.complex_types {
            check_complex_derivation(set, ct)?;
        }
        for st in &loaded.schema.simple_types {
            check_simple_derivation(set, st)?;
        }
        for g in &loaded.schema.attribute_groups {
            check_attribute_group(set, &g.name, &g.items)?;
        }
    }
    Ok(())
}

fn unresolved(kind: ComponentKind, name: &QualifiedName) -> impl FnOnce() -> Error + '_ {
    move || Error::UnresolvedReference {
        kind,
        name: name.clone(),
    }
}

struct References<'a> {
    set: &'a SchemaSet,
}

impl References<'_> {
    fn type_name(&self, name: &QualifiedName) -> Result<(), Error> {
        let found = *name == QualifiedName::xs("anyType")
            || TypeCode::builtin(name).is_some()
            || self.set.find_complex_type(name).is_some()
            || self.set.find_simple_type(name).is_some();
        found.then_some(()).ok_or_else(unresolved(ComponentKind::Type, name))
    }

    fn simple_type_name(&self, name: &QualifiedName) -> Result<(), Error> {
        let found =
            TypeCode::builtin(name).is_some() || self.set.find_simple_type(name).is_some();
        found
            .then_some(())
            .ok_or_else(unresolved(ComponentKind::SimpleType, name))
    }

    fn element(&self, e: &Element) -> Result<(), Error> {
        match &e.element_type {
            ElementType::Named(name) => self.type_name(name),
            ElementType::Complex(ct) => self.complex_type(ct),
            ElementType::Simple(st) => self.simple_type(st),
            ElementType::Unspecified => Ok(()),
        }
    }

    fn complex_type(&self, ct: &ComplexType) -> Result<(), Error> {
        if let Some(base) = ct.base() {
            self.type_name(base)?;
        }
        if let ContentModel::Simple {
            simple_type: Some(st),
            ..
        } = &ct.content
        {
            self.simple_type(st)?;
        }
        if let Some(p) = ct.own_particle() {
            self.particle(p)?;
        }
        self.attribute_items(&ct.attributes)
    }

    fn simple_type(&self, st: &SimpleType) -> Result<(), Error> {
        match &st.variety {
            SimpleVariety::Restriction(SimpleTypeRef::Named(name)) => self.simple_type_name(name),
            SimpleVariety::Restriction(SimpleTypeRef::Anonymous(st)) => self.simple_type(st),
            SimpleVariety::List | SimpleVariety::Union => Ok(()),
        }
    }

    fn particle(&self, p: &Particle) -> Result<(), Error> {
        match p {
            Particle::Element(ep) => match &ep.element {
                ElementDecl::Local(e) => self.element(e),
                ElementDecl::Ref(name) => self
                    .set
                    .find_element(name)
                    .map(|_| ())
                    .ok_or_else(unresolved(ComponentKind::Element, name)),
            },
            Particle::Any(_) => Ok(()),
            Particle::Group(g) => g.particles.iter().try_for_each(|p| self.particle(p)),
            Particle::GroupRef(r) => self
                .set
                .find_group(&r.name)
                .map(|_| ())
                .ok_or_else(unresolved(ComponentKind::Group, &r.name)),
        }
    }

    fn attribute_items(&self, items: &[AttributeItem]) -> Result<(), Error> {
        items.iter().try_for_each(|item| match item {
            AttributeItem::Attribute {
                decl: AttributeDecl::Local(a),
                ..
            } => self.attribute(a),
            AttributeItem::Attribute {
                decl: AttributeDecl::Ref(name),
                ..
            } => self
                .set
                .find_attribute(name)
                .map(|_| ())
                .ok_or_else(unresolved(ComponentKind::Attribute, name)),
            AttributeItem::GroupRef(name) => self
                .set
                .find_attribute_group(name)
                .map(|_| ())
                .ok_or_else(unresolved(ComponentKind::AttributeGroup, name)),
        })
    }

    fn attribute(&self, a: &Attribute) -> Result<(), Error> {
        match &a.attribute_type {
            AttributeType::Named(name) => self.simple_type_name(name),
            AttributeType::Anonymous(st) => self.simple_type(st),
            AttributeType::Unspecified => Ok(()),
        }
    }
}

fn check_complex_derivation(set: &SchemaSet, ct: &ComplexType) -> Result<(), Error> {
    let Some(start) = &ct.name else {
        return Ok(());
    };
    let mut seen = HashSet::from([start]);
    let mut current = ct;
    while let Some(base) = current.base() {
        if !seen.insert(base) {
            return Err(Error::CircularDerivation(start.clone()));
        }
        match set.find_complex_type(base) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(())
}

fn check_simple_derivation(set: &SchemaSet, st: &SimpleType) -> Result<(), Error> {
    let Some(start) = &st.name else {
        return Ok(());
    };
    let mut seen = HashSet::from([start]);
    let mut current = st;
    loop {
        match &current.variety {
            SimpleVariety::Restriction(SimpleTypeRef::Named(base)) => {
                if !seen.insert(base) {
                    return Err(Error::CircularDerivation(start.clone()));
                }
                match set.find_simple_type(base) {
                    Some(next) => current = next,
                    None => return Ok(()),
                }
            }
            SimpleVariety::Restriction(SimpleTypeRef::Anonymous(inner)) => current = inner.as_ref(),
            SimpleVariety::List | SimpleVariety::Union => return Ok(()),
        }
    }
}

fn check_attribute_group(
    set: &SchemaSet,
    start: &QualifiedName,
    items: &[AttributeItem],
) -> Result<(), Error> {
    let mut seen = HashSet::new();
    let mut stack = group_refs(items).collect::<Vec<_>>();
    while let Some(name) = stack.pop() {
        if name == start {
            return Err(Error::CircularAttributeGroup(start.clone()));
        }
        if seen.insert(name) {
            if let Some(group) = set.find_attribute_group(name) {
                stack.extend(group_refs(&group.items));
            }
        }
    }
    Ok(())
}

fn group_refs(items: &[AttributeItem]) -> impl Iterator<Item = &QualifiedName> {
    items.iter().filter_map(|item| match item {
        AttributeItem::GroupRef(name) => Some(name),
        AttributeItem::Attribute { .. } => None,
    })
}
