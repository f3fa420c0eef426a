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

//! Compiled views of schema components.
//!
//! Declarations only describe what is written in a document. The
//! views combine a declaration with the components it refers to:
//! declared types resolved to builtins or named types, content of
//! derived types merged with the content of base types, attribute
//! groups expanded.

use crate::schema_set::SchemaSet;
use crate::xsd::attribute::Attribute;
use crate::xsd::attribute::AttributeDecl;
use crate::xsd::attribute::AttributeItem;
use crate::xsd::attribute::AttributeType;
use crate::xsd::attribute::AttributeUsage;
use crate::xsd::complex_type::ComplexType;
use crate::xsd::complex_type::ContentModel;
use crate::xsd::complex_type::DerivationMethod;
use crate::xsd::element::Element;
use crate::xsd::element::ElementType;
use crate::xsd::particle::Particle;
use crate::xsd::simple_type::SimpleType;
use crate::xsd::simple_type::SimpleTypeRef;
use crate::xsd::simple_type::SimpleVariety;
use crate::QualifiedName;
use crate::TypeCode;

/// Resolved type of an element.
#[derive(Debug, Clone, Copy)]
pub enum DeclaredType<'a> {
    Simple(TypeCode),
    Complex(&'a ComplexType),
    /// Reference that cannot be resolved.
    Unknown,
}

/// Classification of complex type content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Text and attributes only (simple content).
    TextOnly,
    /// Attributes only.
    Empty,
    /// Child elements without text.
    ElementOnly,
    /// Child elements interleaved with text.
    Mixed,
    /// Content that cannot be classified.
    Unknown,
}

/// Effective content particle of a complex type.
#[derive(Debug)]
pub enum ContentParticle<'a> {
    /// No element content.
    Empty,
    Particle(&'a Particle),
    /// Extension of a type with element content: particles of base
    /// types first, then the particle of the derived type. The
    /// particles form one sequence.
    Extension(Vec<&'a Particle>),
}

impl<'a> ContentParticle<'a> {
    fn into_particles(self) -> Vec<&'a Particle> {
        match self {
            Self::Empty => Vec::new(),
            Self::Particle(p) => vec![p],
            Self::Extension(ps) => ps,
        }
    }

    fn from_particles(mut particles: Vec<&'a Particle>) -> Self {
        match particles.len() {
            0 => Self::Empty,
            1 => particles.pop().map_or(Self::Empty, Self::Particle),
            _ => Self::Extension(particles),
        }
    }
}

/// Attribute use of a complex type.
#[derive(Debug, Clone, Copy)]
pub struct AttributeUse<'a> {
    pub name: &'a QualifiedName,
    pub type_code: TypeCode,
    pub usage: AttributeUsage,
}

fn non_empty(p: &Option<Particle>) -> Option<&Particle> {
    p.as_ref().filter(|p| !p.is_empty())
}

impl SchemaSet {
    /// Resolve type by name: `xs:anyType`, builtin simple types and
    /// named types of the set.
    #[must_use]
    pub fn named_type(&self, name: &QualifiedName) -> DeclaredType<'_> {
        if self.any_type().name.as_ref() == Some(name) {
            DeclaredType::Complex(self.any_type())
        } else if let Some(code) = TypeCode::builtin(name) {
            DeclaredType::Simple(code)
        } else if let Some(ct) = self.find_complex_type(name) {
            DeclaredType::Complex(ct)
        } else if let Some(st) = self.find_simple_type(name) {
            DeclaredType::Simple(self.simple_type_code(st))
        } else {
            DeclaredType::Unknown
        }
    }

    /// Declared type of an element. Elements without type are
    /// `xs:anyType`.
    #[must_use]
    pub fn element_type<'a>(&'a self, element: &'a Element) -> DeclaredType<'a> {
        match &element.element_type {
            ElementType::Named(name) => self.named_type(name),
            ElementType::Complex(ct) => DeclaredType::Complex(ct),
            ElementType::Simple(st) => DeclaredType::Simple(self.simple_type_code(st)),
            ElementType::Unspecified => DeclaredType::Complex(self.any_type()),
        }
    }

    /// Primitive type code of a simple type. Restrictions use the code
    /// of their base, lists and unions are `AnyAtomicType`.
    #[must_use]
    pub fn simple_type_code(&self, st: &SimpleType) -> TypeCode {
        match &st.variety {
            SimpleVariety::Restriction(SimpleTypeRef::Named(name)) => self.named_simple_code(name),
            SimpleVariety::Restriction(SimpleTypeRef::Anonymous(st)) => self.simple_type_code(st),
            SimpleVariety::List | SimpleVariety::Union => TypeCode::AnyAtomicType,
        }
    }

    fn named_simple_code(&self, name: &QualifiedName) -> TypeCode {
        TypeCode::builtin(name)
            .or_else(|| {
                self.find_simple_type(name)
                    .map(|st| self.simple_type_code(st))
            })
            .unwrap_or(TypeCode::AnyAtomicType)
    }

    /// Content type classification of a complex type.
    #[must_use]
    pub fn content_type(&self, ct: &ComplexType) -> ContentType {
        match &ct.content {
            ContentModel::Simple { base, .. } => match self.named_type(base) {
                DeclaredType::Simple(_) => ContentType::TextOnly,
                DeclaredType::Complex(base) => match self.content_type(base) {
                    ContentType::TextOnly => ContentType::TextOnly,
                    _ => ContentType::Unknown,
                },
                DeclaredType::Unknown => ContentType::Unknown,
            },
            ContentModel::Complex { base, .. } => match self.named_type(base) {
                DeclaredType::Complex(_) => self.particle_content_type(ct),
                DeclaredType::Simple(_) | DeclaredType::Unknown => ContentType::Unknown,
            },
            ContentModel::Particle(_) => self.particle_content_type(ct),
        }
    }

    // Mixed type without element content holds text only.
    fn particle_content_type(&self, ct: &ComplexType) -> ContentType {
        match (*ct.mixed.inner(), self.content_particle(ct)) {
            (true, ContentParticle::Empty) => ContentType::TextOnly,
            (true, _) => ContentType::Mixed,
            (false, ContentParticle::Empty) => ContentType::Empty,
            (false, _) => ContentType::ElementOnly,
        }
    }

    /// Primitive type code of text-only content.
    #[must_use]
    pub fn text_content_code(&self, ct: &ComplexType) -> TypeCode {
        match &ct.content {
            ContentModel::Simple {
                simple_type: Some(st),
                ..
            } => self.simple_type_code(st),
            ContentModel::Simple { base, .. } => match self.named_type(base) {
                DeclaredType::Simple(code) => code,
                DeclaredType::Complex(base) => self.text_content_code(base),
                DeclaredType::Unknown => TypeCode::AnyAtomicType,
            },
            ContentModel::Particle(_) | ContentModel::Complex { .. } => TypeCode::String,
        }
    }

    /// Effective content particle of a complex type.
    #[must_use]
    pub fn content_particle<'a>(&'a self, ct: &'a ComplexType) -> ContentParticle<'a> {
        match &ct.content {
            ContentModel::Simple { .. } => ContentParticle::Empty,
            ContentModel::Particle(p)
            | ContentModel::Complex {
                method: DerivationMethod::Restriction,
                particle: p,
                ..
            } => non_empty(p).map_or(ContentParticle::Empty, ContentParticle::Particle),
            ContentModel::Complex {
                method: DerivationMethod::Extension,
                base,
                particle,
            } => {
                let mut particles = match self.named_type(base) {
                    DeclaredType::Complex(base) => self.content_particle(base).into_particles(),
                    DeclaredType::Simple(_) | DeclaredType::Unknown => Vec::new(),
                };
                particles.extend(non_empty(particle));
                ContentParticle::from_particles(particles)
            }
        }
    }

    /// Attribute uses of a complex type: attributes of base types,
    /// then own attributes. Attribute groups are expanded. A later use
    /// of the same attribute replaces the earlier one.
    #[must_use]
    pub fn attribute_uses<'a>(&'a self, ct: &'a ComplexType) -> Vec<AttributeUse<'a>> {
        let mut uses = match ct.base().map(|base| self.named_type(base)) {
            Some(DeclaredType::Complex(base)) => self.attribute_uses(base),
            _ => Vec::new(),
        };
        self.collect_attribute_uses(&ct.attributes, &mut uses);
        uses
    }

    fn collect_attribute_uses<'a>(&'a self, items: &'a [AttributeItem], uses: &mut Vec<AttributeUse<'a>>) {
        for item in items {
            match item {
                AttributeItem::Attribute { decl, usage } => {
                    let attribute = match decl {
                        AttributeDecl::Local(a) => Some(a),
                        AttributeDecl::Ref(name) => self.find_attribute(name),
                    };
                    if let Some(a) = attribute {
                        let new_use = AttributeUse {
                            name: &a.name,
                            type_code: self.attribute_type_code(a),
                            usage: *usage,
                        };
                        match uses.iter_mut().find(|u| u.name == new_use.name) {
                            Some(existing) => *existing = new_use,
                            None => uses.push(new_use),
                        }
                    }
                }
                AttributeItem::GroupRef(name) => {
                    if let Some(group) = self.find_attribute_group(name) {
                        self.collect_attribute_uses(&group.items, uses);
                    }
                }
            }
        }
    }

    fn attribute_type_code(&self, a: &Attribute) -> TypeCode {
        match &a.attribute_type {
            AttributeType::Named(name) => self.named_simple_code(name),
            AttributeType::Anonymous(st) => self.simple_type_code(st),
            AttributeType::Unspecified => TypeCode::AnyAtomicType,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schema_set::Error;
    use crate::schema_set::FolderResolver;

    fn compile(body: &str) -> Result<SchemaSet, Error> {
        let xml = format!(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:t="urn:t" targetNamespace="urn:t">{body}</xs:schema>"#
        );
        SchemaSet::compile(&xml, &FolderResolver::default())
    }

    fn complex<'a>(set: &'a SchemaSet, name: &str) -> &'a ComplexType {
        set.find_complex_type(&QualifiedName::new(Some("urn:t"), name))
            .unwrap()
    }

    #[test]
    fn simple_type_codes_test() -> Result<(), Error> {
        let set = compile(
            r#"<xs:simpleType name="Qty"><xs:restriction base="xs:positiveInteger"/></xs:simpleType>
               <xs:simpleType name="Small"><xs:restriction base="t:Qty"><xs:maxExclusive value="10"/></xs:restriction></xs:simpleType>
               <xs:simpleType name="Sizes"><xs:list itemType="xs:int"/></xs:simpleType>
               <xs:element name="small" type="t:Small"/>
               <xs:element name="sizes" type="t:Sizes"/>
               <xs:element name="untyped"/>"#,
        )?;
        let codes = set
            .global_elements()
            .map(|e| match set.element_type(e) {
                DeclaredType::Simple(code) => Some(code),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(
            codes,
            vec![
                Some(TypeCode::PositiveInteger),
                Some(TypeCode::AnyAtomicType),
                None
            ]
        );
        let untyped = set.global_elements().nth(2).unwrap();
        assert!(matches!(
            set.element_type(untyped),
            DeclaredType::Complex(ct) if std::ptr::eq(ct, set.any_type())
        ));
        Ok(())
    }

    #[test]
    fn content_types_test() -> Result<(), Error> {
        let set = compile(
            r#"<xs:complexType name="Empty"><xs:sequence/><xs:attribute name="a"/></xs:complexType>
               <xs:complexType name="Elements"><xs:sequence><xs:element name="x"/></xs:sequence></xs:complexType>
               <xs:complexType name="Mixed" mixed="true"><xs:choice><xs:element name="x"/></xs:choice></xs:complexType>
               <xs:complexType name="Text" mixed="true"/>
               <xs:complexType name="Price">
                 <xs:simpleContent><xs:extension base="xs:decimal"/></xs:simpleContent>
               </xs:complexType>
               <xs:complexType name="Discount">
                 <xs:simpleContent><xs:restriction base="t:Price"><xs:minInclusive value="0"/></xs:restriction></xs:simpleContent>
               </xs:complexType>"#,
        )?;
        assert_eq!(set.content_type(complex(&set, "Empty")), ContentType::Empty);
        assert_eq!(
            set.content_type(complex(&set, "Elements")),
            ContentType::ElementOnly
        );
        assert_eq!(set.content_type(complex(&set, "Mixed")), ContentType::Mixed);
        assert_eq!(set.content_type(complex(&set, "Text")), ContentType::TextOnly);
        assert_eq!(set.text_content_code(complex(&set, "Text")), TypeCode::String);
        assert_eq!(set.content_type(complex(&set, "Price")), ContentType::TextOnly);
        assert_eq!(
            set.text_content_code(complex(&set, "Discount")),
            TypeCode::Decimal
        );
        assert!(matches!(
            set.content_particle(complex(&set, "Empty")),
            ContentParticle::Empty
        ));
        Ok(())
    }

    #[test]
    fn extension_test() -> Result<(), Error> {
        let set = compile(
            r#"<xs:attributeGroup name="Ids"><xs:attribute name="id" type="xs:ID" use="required"/></xs:attributeGroup>
               <xs:complexType name="Base">
                 <xs:sequence><xs:element name="a" type="xs:string"/></xs:sequence>
                 <xs:attributeGroup ref="t:Ids"/>
                 <xs:attribute name="version" type="xs:int"/>
               </xs:complexType>
               <xs:complexType name="Derived">
                 <xs:complexContent>
                   <xs:extension base="t:Base">
                     <xs:sequence><xs:element name="b" type="xs:int"/></xs:sequence>
                     <xs:attribute name="version" type="xs:long" use="prohibited"/>
                     <xs:attribute name="extra" type="xs:boolean"/>
                   </xs:extension>
                 </xs:complexContent>
               </xs:complexType>
               <xs:complexType name="NoContent">
                 <xs:complexContent><xs:extension base="t:Base"/></xs:complexContent>
               </xs:complexType>"#,
        )?;
        let derived = complex(&set, "Derived");
        assert!(matches!(
            set.content_particle(derived),
            ContentParticle::Extension(ref ps) if ps.len() == 2
        ));
        assert!(matches!(
            set.content_particle(complex(&set, "NoContent")),
            ContentParticle::Particle(_)
        ));
        let uses = set
            .attribute_uses(derived)
            .into_iter()
            .map(|u| (u.name.name.as_str(), u.type_code, u.usage))
            .collect::<Vec<_>>();
        assert_eq!(
            uses,
            vec![
                ("id", TypeCode::Id, AttributeUsage::Required),
                ("version", TypeCode::Long, AttributeUsage::Prohibited),
                ("extra", TypeCode::Boolean, AttributeUsage::None),
            ]
        );
        Ok(())
    }
}
