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

//! Conversion of schema set components to the simplified schema tree.

pub mod cycles;
pub mod error;
pub mod lookup;
pub mod model;

use crate::occurs::Occurs;
use crate::schema_set::AttributeUse;
use crate::schema_set::ContentParticle;
use crate::schema_set::ContentType;
use crate::schema_set::DeclaredType;
use crate::schema_set::SchemaSet;
use crate::xsd::attribute::AttributeUsage;
use crate::xsd::complex_type::ComplexType;
use crate::xsd::element::Element;
use crate::xsd::element::ElementDecl;
use crate::xsd::particle::Compositor;
use crate::xsd::particle::ModelGroup;
use crate::xsd::particle::Particle as XsdParticle;
use cycles::Node;
use tracing::trace;

pub use error::Error;
pub use lookup::find_global_element;
pub use model::AttributeDescriptor;
pub use model::ComplexTypeDescriptor;
pub use model::Contents;
pub use model::Particle;
pub use model::SchemaElement;
pub use model::SchemaType;

/// Builds simplified schema trees from components of a schema set.
pub struct Parser<'a> {
    schema_set: &'a SchemaSet,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub const fn new(schema_set: &'a SchemaSet) -> Self {
        Self { schema_set }
    }

    /// Convert element declaration with everything it references.
    ///
    /// # Errors
    ///
    /// - `Error::RecursiveSchema` if element definition reaches the element itself
    /// - `Error::UnknownTypeShape` if declared type cannot be handled
    /// - `Error::UnknownGroupKind` if referenced group has no compositor
    pub fn parse_element(&self, element: &'a Element) -> Result<SchemaElement, Error> {
        if cycles::is_recursive(self.schema_set, Node::Element(element)) {
            return Err(Error::RecursiveSchema(element.name.clone()));
        }
        trace!(element = %element.name, "converting element");
        let element_type = match self.schema_set.element_type(element) {
            DeclaredType::Simple(code) => SchemaType::Simple(code),
            DeclaredType::Complex(ct) => {
                SchemaType::Complex(Box::new(self.parse_complex_type(ct)?))
            }
            DeclaredType::Unknown => {
                return Err(Error::UnknownTypeShape(format!(
                    "declared type of element {}",
                    element.name
                )))
            }
        };
        Ok(SchemaElement {
            name: element.name.clone(),
            element_type,
            nillable: element.nillable,
        })
    }

    /// Convert complex type: attribute uses and content.
    ///
    /// # Errors
    ///
    /// Same as [`Parser::parse_element`] for elements of the content.
    pub fn parse_complex_type(&self, ct: &'a ComplexType) -> Result<ComplexTypeDescriptor, Error> {
        let attributes = self
            .schema_set
            .attribute_uses(ct)
            .into_iter()
            .filter(|u| u.usage != AttributeUsage::Prohibited)
            .map(attribute_descriptor)
            .collect();
        let contents = match self.schema_set.content_type(ct) {
            ContentType::TextOnly => {
                Contents::SimpleContent(self.schema_set.text_content_code(ct))
            }
            ContentType::Empty | ContentType::ElementOnly | ContentType::Mixed => {
                Contents::ComplexContent(self.parse_content(self.schema_set.content_particle(ct))?)
            }
            ContentType::Unknown => {
                return Err(Error::UnknownTypeShape(format!(
                    "content type of complex type {}",
                    ct.name
                        .as_ref()
                        .map_or_else(|| "<anonymous>".into(), ToString::to_string)
                )))
            }
        };
        Ok(ComplexTypeDescriptor {
            attributes,
            contents,
            mixed: ct.mixed,
        })
    }

    fn parse_content(&self, content: ContentParticle<'a>) -> Result<Particle, Error> {
        match content {
            ContentParticle::Empty => Ok(Particle::Empty),
            ContentParticle::Particle(p) => self.parse_particle(p),
            ContentParticle::Extension(ps) => {
                let mut particles = Vec::new();
                for p in ps {
                    // Sequence occurring once is part of the outer sequence.
                    match self.parse_particle(p)? {
                        Particle::Sequence(Occurs::ONCE, children) => particles.extend(children),
                        particle => particles.push(particle),
                    }
                }
                Ok(Particle::Sequence(Occurs::ONCE, particles))
            }
        }
    }

    /// Convert content model particle.
    ///
    /// Group references are replaced by the model group of the
    /// definition with occurrence bounds of the reference.
    ///
    /// # Errors
    ///
    /// - `Error::RecursiveSchema` if referenced group reaches itself
    /// - `Error::UnknownGroupKind` if referenced group has no compositor
    /// - errors of [`Parser::parse_element`] for nested elements
    pub fn parse_particle(&self, particle: &'a XsdParticle) -> Result<Particle, Error> {
        match particle {
            XsdParticle::Any(w) => Ok(Particle::Any(w.occurs)),
            XsdParticle::Group(g) => self.parse_model_group(g.occurs, g),
            XsdParticle::GroupRef(r) => {
                let Some(definition) = self.schema_set.find_group(&r.name) else {
                    return Ok(Particle::Empty);
                };
                if cycles::is_recursive(self.schema_set, Node::Group(definition)) {
                    return Err(Error::RecursiveSchema(definition.name.clone()));
                }
                let group = definition
                    .model_group
                    .as_ref()
                    .ok_or_else(|| Error::UnknownGroupKind(definition.name.clone()))?;
                self.parse_model_group(r.occurs, group)
            }
            XsdParticle::Element(e) => {
                let element = match &e.element {
                    ElementDecl::Local(element) => Some(element),
                    ElementDecl::Ref(name) => self.schema_set.find_element(name),
                };
                element.map_or(Ok(Particle::Empty), |element| {
                    self.parse_element(element)
                        .map(|element| Particle::Element(e.occurs, element))
                })
            }
        }
    }

    fn parse_model_group(&self, occurs: Occurs, group: &'a ModelGroup) -> Result<Particle, Error> {
        let particles = group
            .particles
            .iter()
            .map(|p| self.parse_particle(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(match group.compositor {
            Compositor::All => Particle::All(occurs, particles),
            Compositor::Choice => Particle::Choice(occurs, particles),
            Compositor::Sequence => Particle::Sequence(occurs, particles),
        })
    }
}

fn attribute_descriptor(u: AttributeUse<'_>) -> AttributeDescriptor {
    AttributeDescriptor {
        name: u.name.clone(),
        type_code: u.type_code,
        optional: u.usage != AttributeUsage::Required,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::occurs::MaxOccurs;
    use crate::schema_set::FolderResolver;
    use crate::QualifiedName;
    use crate::TypeCode;

    fn compile(body: &str) -> SchemaSet {
        let xml = format!(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">{body}</xs:schema>"#
        );
        SchemaSet::compile(&xml, &FolderResolver::default()).unwrap()
    }

    fn parse(set: &SchemaSet, name: &str) -> Result<SchemaElement, Error> {
        let element = find_global_element(set, Some(name), None)?;
        Parser::new(set).parse_element(element)
    }

    fn complex(e: &SchemaElement) -> &ComplexTypeDescriptor {
        match &e.element_type {
            SchemaType::Complex(ct) => ct.as_ref(),
            SchemaType::Simple(code) => panic!("simple type {code}"),
        }
    }

    #[test]
    fn simple_element_test() {
        let set = compile(r#"<xs:element name="qty" type="xs:int" nillable="true"/>"#);
        let e = parse(&set, "qty").unwrap();
        assert_eq!(e.name, QualifiedName::local("qty"));
        assert_eq!(e.element_type, SchemaType::Simple(TypeCode::Int));
        assert!(*e.nillable.inner());
    }

    #[test]
    fn attributes_test() {
        let set = compile(
            r#"<xs:element name="item">
                 <xs:complexType>
                   <xs:attribute name="id" type="xs:long" use="required"/>
                   <xs:attribute name="note" type="xs:string"/>
                   <xs:attribute name="legacy" type="xs:string" use="prohibited"/>
                   <xs:attribute name="flag" type="xs:boolean" use="optional"/>
                 </xs:complexType>
               </xs:element>"#,
        );
        let e = parse(&set, "item").unwrap();
        let ct = complex(&e);
        let attributes = ct
            .attributes
            .iter()
            .map(|a| (a.name.name.as_str(), a.type_code, a.optional))
            .collect::<Vec<_>>();
        assert_eq!(
            attributes,
            vec![
                ("id", TypeCode::Long, false),
                ("note", TypeCode::String, true),
                ("flag", TypeCode::Boolean, true),
            ]
        );
        assert_eq!(ct.contents, Contents::ComplexContent(Particle::Empty));
    }

    #[test]
    fn simple_content_test() {
        let set = compile(
            r#"<xs:element name="price">
                 <xs:complexType><xs:simpleContent>
                   <xs:extension base="xs:decimal"><xs:attribute name="currency"/></xs:extension>
                 </xs:simpleContent></xs:complexType>
               </xs:element>"#,
        );
        let e = parse(&set, "price").unwrap();
        assert_eq!(
            complex(&e).contents,
            Contents::SimpleContent(TypeCode::Decimal)
        );
    }

    #[test]
    fn group_reference_occurs_test() {
        let set = compile(
            r#"<xs:group name="G">
                 <xs:choice minOccurs="2" maxOccurs="3"><xs:element name="a" type="xs:int"/></xs:choice>
               </xs:group>
               <xs:element name="root">
                 <xs:complexType><xs:sequence>
                   <xs:group ref="G" minOccurs="0"/>
                   <xs:element ref="leaf"/>
                 </xs:sequence></xs:complexType>
               </xs:element>
               <xs:element name="leaf" type="xs:date"/>"#,
        );
        let e = parse(&set, "root").unwrap();
        let Contents::ComplexContent(Particle::Sequence(_, children)) = &complex(&e).contents else {
            panic!("sequence expected");
        };
        assert!(matches!(
            &children[0],
            Particle::Choice(Occurs { min: 0, max: MaxOccurs::Bounded(1) }, c) if c.len() == 1
        ));
        assert!(matches!(
            &children[1],
            Particle::Element(Occurs::ONCE, SchemaElement { name, .. }) if name.name == "leaf"
        ));
    }

    #[test]
    fn recursive_element_test() {
        let set = compile(
            r#"<xs:element name="node">
                 <xs:complexType><xs:sequence>
                   <xs:element ref="node" minOccurs="0" maxOccurs="unbounded"/>
                 </xs:sequence></xs:complexType>
               </xs:element>"#,
        );
        assert!(matches!(
            parse(&set, "node"),
            Err(Error::RecursiveSchema(name)) if name.name == "node"
        ));
    }

    #[test]
    fn recursion_through_group_test() {
        let set = compile(
            r#"<xs:group name="Children">
                 <xs:sequence><xs:element ref="tree" minOccurs="0"/></xs:sequence>
               </xs:group>
               <xs:element name="tree">
                 <xs:complexType><xs:group ref="Children"/></xs:complexType>
               </xs:element>"#,
        );
        assert!(matches!(parse(&set, "tree"), Err(Error::RecursiveSchema(_))));
    }

    #[test]
    fn recursive_local_element_test() {
        let set = compile(
            r#"<xs:complexType name="Folder">
                 <xs:sequence><xs:element name="sub" type="Folder" minOccurs="0"/></xs:sequence>
               </xs:complexType>
               <xs:element name="root" type="Folder"/>"#,
        );
        assert!(matches!(
            parse(&set, "root"),
            Err(Error::RecursiveSchema(name)) if name.name == "sub"
        ));
    }

    #[test]
    fn group_without_compositor_test() {
        let set = compile(
            r#"<xs:group name="G"><xs:annotation/></xs:group>
               <xs:element name="root">
                 <xs:complexType><xs:sequence><xs:group ref="G"/></xs:sequence></xs:complexType>
               </xs:element>"#,
        );
        assert!(matches!(
            parse(&set, "root"),
            Err(Error::UnknownGroupKind(name)) if name.name == "G"
        ));
    }

    #[test]
    fn any_type_element_test() {
        let set = compile(r#"<xs:element name="blob"/>"#);
        let e = parse(&set, "blob").unwrap();
        let ct = complex(&e);
        assert!(*ct.mixed.inner());
        assert_eq!(
            ct.contents,
            Contents::ComplexContent(Particle::Sequence(
                Occurs::ONCE,
                vec![Particle::Any(Occurs::ANY_NUMBER)]
            ))
        );
    }

    #[test]
    fn extension_test() {
        let set = compile(
            r#"<xs:complexType name="Base">
                 <xs:sequence><xs:element name="a" type="xs:string"/></xs:sequence>
                 <xs:attribute name="id" type="xs:int"/>
               </xs:complexType>
               <xs:element name="derived">
                 <xs:complexType><xs:complexContent>
                   <xs:extension base="Base">
                     <xs:sequence><xs:element name="b" type="xs:double"/></xs:sequence>
                   </xs:extension>
                 </xs:complexContent></xs:complexType>
               </xs:element>"#,
        );
        let e = parse(&set, "derived").unwrap();
        let ct = complex(&e);
        assert_eq!(ct.attributes.len(), 1);
        let Contents::ComplexContent(Particle::Sequence(Occurs::ONCE, parts)) = &ct.contents else {
            panic!("sequence expected");
        };
        let names = parts
            .iter()
            .map(|p| match p {
                Particle::Element(_, e) => e.name.name.as_str(),
                _ => panic!("element expected: {p:?}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b"]);
    }
}
