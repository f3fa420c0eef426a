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

//! Inference of structural types from the simplified schema tree.
//!
//! Elements become records named after the element. The body of a
//! record (text or child content) is the property with empty name,
//! attributes are named properties. Child content is a collection
//! keyed by element name.

pub mod primitive;

use crate::occurs::MaxOccurs;
use crate::occurs::Occurs;
use crate::parser::ComplexTypeDescriptor;
use crate::parser::Contents;
use crate::parser::Particle;
use crate::parser::SchemaElement;
use crate::parser::SchemaType;
use xsd_infer_core::InferedMultiplicity;
use xsd_infer_core::InferedProperty;
use xsd_infer_core::InferedType;
use xsd_infer_core::InferedTypeTag;

#[doc(inline)]
pub use primitive::type_code_to_runtime_type;

/// Record name of `xs:any` content.
pub const ANY_ELEMENT: &str = "{anyNs}anyElement";

/// Collection branch: tag with multiplicity and type.
pub type Branch = (InferedTypeTag, (InferedMultiplicity, InferedType));

/// Multiplicity of a particle. Only `[1..1]` and `[0..1]` keep their
/// exact meaning.
#[must_use]
pub const fn occurs_to_multiplicity(occurs: Occurs) -> InferedMultiplicity {
    match occurs {
        Occurs {
            min: 1,
            max: MaxOccurs::Bounded(1),
        } => InferedMultiplicity::Single,
        Occurs {
            min: 0,
            max: MaxOccurs::Bounded(1),
        } => InferedMultiplicity::OptionalSingle,
        _ => InferedMultiplicity::Multiple,
    }
}

/// Infer record type of an element.
#[must_use]
pub fn infer_element(element: &SchemaElement) -> InferedType {
    let properties = match &element.element_type {
        SchemaType::Simple(code) => vec![InferedProperty::body(InferedType::primitive(
            type_code_to_runtime_type(*code),
            *element.nillable.inner(),
        ))],
        SchemaType::Complex(ct) => infer_complex_type(ct),
    };
    InferedType::record(Some(element.name.to_string()), properties)
}

/// Infer properties of a complex type: body first, then attributes.
#[must_use]
pub fn infer_complex_type(ct: &ComplexTypeDescriptor) -> Vec<InferedProperty> {
    let body = match &ct.contents {
        Contents::SimpleContent(code) => {
            InferedType::primitive(type_code_to_runtime_type(*code), false)
        }
        Contents::ComplexContent(particle) => {
            let (_, (_, body)) = infer_particle(particle);
            body
        }
    };
    std::iter::once(InferedProperty::body(body))
        .chain(ct.attributes.iter().map(|a| {
            InferedProperty::new(
                a.name.to_string(),
                InferedType::primitive(type_code_to_runtime_type(a.type_code), a.optional),
            )
        }))
        .collect()
}

/// Infer collection branch of a particle.
#[must_use]
pub fn infer_particle(particle: &Particle) -> Branch {
    match particle {
        Particle::Element(occurs, element) => (
            InferedTypeTag::Record(Some(element.name.to_string())),
            (occurs_to_multiplicity(*occurs), infer_element(element)),
        ),
        Particle::All(occurs, children) | Particle::Sequence(occurs, children) => (
            InferedTypeTag::Collection,
            (
                occurs_to_multiplicity(*occurs),
                InferedType::collection(children.iter().map(infer_particle)),
            ),
        ),
        Particle::Choice(occurs, children) => (
            InferedTypeTag::Collection,
            (
                occurs_to_multiplicity(*occurs),
                InferedType::collection(children.iter().map(infer_particle).map(
                    |(tag, (multiplicity, infered_type))| {
                        (tag, (widen(multiplicity), infered_type))
                    },
                )),
            ),
        ),
        Particle::Empty => (
            InferedTypeTag::Collection,
            (InferedMultiplicity::OptionalSingle, InferedType::Top),
        ),
        // Wildcards are a repeatable opaque slot whatever the bounds are.
        Particle::Any(_) => (
            InferedTypeTag::Record(Some(ANY_ELEMENT.into())),
            (
                InferedMultiplicity::Multiple,
                InferedType::record(
                    Some(ANY_ELEMENT.into()),
                    vec![InferedProperty::body(InferedType::Top)],
                ),
            ),
        ),
    }
}

/// Only one alternative of a choice is present.
const fn widen(multiplicity: InferedMultiplicity) -> InferedMultiplicity {
    match multiplicity {
        InferedMultiplicity::Single => InferedMultiplicity::OptionalSingle,
        m => m,
    }
}
