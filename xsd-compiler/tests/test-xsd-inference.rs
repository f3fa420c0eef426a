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

use std::path::Path;
use std::path::PathBuf;
use xsd_infer_compiler::infer;
use xsd_infer_compiler::parser::Error as ParseError;
use xsd_infer_compiler::schema_set::ComponentKind;
use xsd_infer_compiler::schema_set::Error as SchemaSetError;
use xsd_infer_compiler::schema_set::FolderResolver;
use xsd_infer_compiler::ElementSelector;
use xsd_infer_compiler::QualifiedName;
use xsd_infer_compiler::SchemaSet;
use xsd_infer_core::InferedMultiplicity;
use xsd_infer_core::InferedProperty;
use xsd_infer_core::InferedType;
use xsd_infer_core::InferedTypeTag;
use xsd_infer_core::PrimitiveType;

fn test_data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

fn compile(xml: &str) -> Result<SchemaSet, SchemaSetError> {
    SchemaSet::compile(xml, &FolderResolver::new(test_data("")))
}

fn schema(body: &str) -> String {
    format!(r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">{body}</xs:schema>"#)
}

fn primitive_record(name: &str, primitive: PrimitiveType, optional: bool) -> InferedType {
    InferedType::record(
        Some(name.into()),
        vec![InferedProperty::body(InferedType::primitive(
            primitive, optional,
        ))],
    )
}

fn properties(t: &InferedType) -> &[InferedProperty] {
    match t {
        InferedType::Record { properties, .. } => properties,
        _ => panic!("record expected: {t}"),
    }
}

fn body(t: &InferedType) -> &InferedType {
    &properties(t)[0].infered_type
}

fn property<'a>(t: &'a InferedType, name: &str) -> &'a InferedType {
    properties(t)
        .iter()
        .find(|p| p.name == name)
        .map(|p| &p.infered_type)
        .unwrap_or_else(|| panic!("no property {name} in {t}"))
}

/// Branch of a collection with the record tag `name`.
fn branch<'a>(t: &'a InferedType, name: &str) -> (InferedMultiplicity, &'a InferedType) {
    t.branches()
        .find(|(tag, _, _)| tag.nice_name() == name)
        .map(|(_, m, t)| (*m, t))
        .unwrap_or_else(|| panic!("no branch {name} in {t}"))
}

#[test]
fn round_trip_test() -> Result<(), Box<dyn std::error::Error>> {
    let set = SchemaSet::compile_file(&test_data("simple.xsd"))?;
    let infered = infer(&set, &ElementSelector::default())?;
    let expected = InferedType::record(
        Some("foo".into()),
        vec![InferedProperty::body(InferedType::collection(vec![
            (
                InferedTypeTag::Record(Some("bar".into())),
                (
                    InferedMultiplicity::Single,
                    primitive_record("bar", PrimitiveType::Int32, false),
                ),
            ),
            (
                InferedTypeTag::Record(Some("baz".into())),
                (
                    InferedMultiplicity::Multiple,
                    primitive_record("baz", PrimitiveType::Date, false),
                ),
            ),
        ]))],
    );
    assert_eq!(infered, expected);
    Ok(())
}

#[test]
fn purchase_order_test() -> Result<(), Box<dyn std::error::Error>> {
    let set = SchemaSet::compile_file(&test_data("purchase-order.xsd"))?;
    let po = infer(&set, &ElementSelector::named("purchaseOrder").in_namespace("urn:po"))?;

    assert_eq!(
        property(&po, "orderDate"),
        &InferedType::primitive(PrimitiveType::Date, true)
    );
    let content = body(&po);
    let (multiplicity, ship_to) = branch(content, "{urn:po}shipTo");
    assert_eq!(multiplicity, InferedMultiplicity::Single);
    // Address type comes from a chameleon include.
    let address = body(ship_to);
    assert_eq!(
        branch(address, "{urn:po}zip"),
        (
            InferedMultiplicity::Single,
            &primitive_record("{urn:po}zip", PrimitiveType::Decimal, false)
        )
    );
    assert_eq!(
        property(ship_to, "country"),
        &InferedType::primitive(PrimitiveType::String, true)
    );
    let (multiplicity, comment) = branch(content, "{urn:po}comment");
    assert_eq!(multiplicity, InferedMultiplicity::OptionalSingle);
    assert_eq!(
        comment,
        &primitive_record("{urn:po}comment", PrimitiveType::String, false)
    );

    let (_, items) = branch(content, "{urn:po}items");
    let (multiplicity, item) = branch(body(items), "{urn:po}item");
    assert_eq!(multiplicity, InferedMultiplicity::Multiple);
    assert_eq!(
        property(item, "partNum"),
        &InferedType::primitive(PrimitiveType::String, false)
    );
    let (_, quantity) = branch(body(item), "{urn:po}quantity");
    assert_eq!(
        body(quantity),
        &InferedType::primitive(PrimitiveType::String, false)
    );
    let (multiplicity, _) = branch(body(item), "{urn:po}shipDate");
    assert_eq!(multiplicity, InferedMultiplicity::OptionalSingle);
    Ok(())
}

#[test]
fn chameleon_include_test() -> Result<(), SchemaSetError> {
    let set = SchemaSet::compile_file(&test_data("purchase-order.xsd"))?;
    assert_eq!(set.schemas().len(), 2);
    assert!(set
        .find_complex_type(&QualifiedName::new(Some("urn:po"), "USAddress"))
        .is_some());
    assert!(set
        .find_complex_type(&QualifiedName::local("USAddress"))
        .is_none());
    Ok(())
}

#[test]
fn resolution_folder_test() -> Result<(), Box<dyn std::error::Error>> {
    let set = SchemaSet::load(
        &test_data("resolution/root.xsd"),
        Some(&test_data("resolution/lib")),
    )?;
    assert_eq!(set.schemas().len(), 3);
    let reading = infer(&set, &ElementSelector::named("reading"))?;
    let (multiplicity, value) = branch(body(&reading), "{urn:measure}value");
    assert_eq!(multiplicity, InferedMultiplicity::Multiple);
    // Simple content body ignores nillable.
    assert_eq!(
        value,
        &InferedType::record(
            Some("{urn:measure}value".into()),
            vec![
                InferedProperty::body(InferedType::primitive(PrimitiveType::Double, false)),
                InferedProperty::new("unit", InferedType::primitive(PrimitiveType::String, false)),
            ]
        )
    );

    // Without the folder the import is looked up next to the root document.
    assert!(matches!(
        SchemaSet::compile_file(&test_data("resolution/root.xsd")),
        Err(SchemaSetError::Io(..))
    ));
    Ok(())
}

#[test]
fn in_memory_include_test() -> Result<(), Box<dyn std::error::Error>> {
    let set = compile(
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:po="urn:po" targetNamespace="urn:po">
             <xs:include schemaLocation="common/address.xsd"/>
             <xs:element name="address" type="po:USAddress"/>
           </xs:schema>"#,
    )?;
    let address = infer(&set, &ElementSelector::default())?;
    assert_eq!(body(&address).branches().count(), 4);
    Ok(())
}

#[test]
fn remote_location_test() {
    assert!(matches!(
        SchemaSet::compile_file(&test_data("remote.xsd")),
        Err(SchemaSetError::UnsupportedLocation(location)) if location.starts_with("http://")
    ));
}

#[test]
fn unresolved_reference_test() {
    let result = compile(&schema(r#"<xs:element name="a" type="Missing"/>"#));
    assert!(matches!(
        result,
        Err(SchemaSetError::UnresolvedReference {
            kind: ComponentKind::Type,
            name,
        }) if name == QualifiedName::local("Missing")
    ));
}

#[test]
fn recursive_schema_test() -> Result<(), SchemaSetError> {
    let set = SchemaSet::compile_file(&test_data("recursive.xsd"))?;
    assert!(matches!(
        infer(&set, &ElementSelector::default()),
        Err(ParseError::RecursiveSchema(name)) if name == QualifiedName::local("section")
    ));
    Ok(())
}

#[test]
fn lookup_errors_test() -> Result<(), SchemaSetError> {
    let set = compile(&schema(r#"<xs:simpleType name="S"><xs:restriction base="xs:int"/></xs:simpleType>"#))?;
    assert!(matches!(
        infer(&set, &ElementSelector::default()),
        Err(ParseError::NoGlobalElements)
    ));

    let set = compile(&schema(
        r#"<xs:element name="a" type="xs:int"/><xs:element name="b" type="xs:int"/>"#,
    ))?;
    match infer(&set, &ElementSelector::default()) {
        Err(ParseError::AmbiguousElement(names)) => assert_eq!(
            names,
            vec![QualifiedName::local("a"), QualifiedName::local("b")]
        ),
        other => panic!("unexpected result: {other:?}"),
    }
    match infer(&set, &ElementSelector::named("c")) {
        Err(e @ ParseError::ElementNotFound { .. }) => {
            let message = e.to_string();
            assert!(message.contains("available elements: a, b"), "{message}");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn choice_test() -> Result<(), Box<dyn std::error::Error>> {
    let set = compile(&schema(
        r#"<xs:element name="payment">
             <xs:complexType>
               <xs:choice>
                 <xs:element name="card" type="xs:string"/>
                 <xs:element name="iban" type="xs:string" minOccurs="0"/>
                 <xs:element name="voucher" type="xs:string" maxOccurs="unbounded"/>
               </xs:choice>
             </xs:complexType>
           </xs:element>"#,
    ))?;
    let payment = infer(&set, &ElementSelector::default())?;
    let multiplicities = body(&payment)
        .branches()
        .map(|(tag, m, _)| (tag.nice_name().to_string(), *m))
        .collect::<Vec<_>>();
    assert_eq!(
        multiplicities,
        vec![
            ("card".to_string(), InferedMultiplicity::OptionalSingle),
            ("iban".to_string(), InferedMultiplicity::OptionalSingle),
            ("voucher".to_string(), InferedMultiplicity::Multiple),
        ]
    );
    Ok(())
}

#[test]
fn nillable_test() -> Result<(), Box<dyn std::error::Error>> {
    let set = compile(&schema(
        r#"<xs:element name="n" type="xs:long" nillable="true"/>
           <xs:element name="m" type="xs:long"/>"#,
    ))?;
    assert_eq!(
        infer(&set, &ElementSelector::named("n"))?,
        primitive_record("n", PrimitiveType::Int64, true)
    );
    assert_eq!(
        infer(&set, &ElementSelector::named("m"))?,
        primitive_record("m", PrimitiveType::Int64, false)
    );
    Ok(())
}

#[test]
fn nested_prefix_test() -> Result<(), Box<dyn std::error::Error>> {
    let set = compile(
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:t">
             <xs:simpleType name="S"><xs:restriction base="xs:int"/></xs:simpleType>
             <xs:element name="root" xmlns:t="urn:t" type="t:S"/>
           </xs:schema>"#,
    )?;
    assert_eq!(
        infer(&set, &ElementSelector::named("root"))?,
        primitive_record("{urn:t}root", PrimitiveType::Int32, false)
    );
    Ok(())
}

#[test]
fn attributes_test() -> Result<(), Box<dyn std::error::Error>> {
    let set = compile(&schema(
        r#"<xs:element name="e">
             <xs:complexType>
               <xs:attribute name="kept" type="xs:boolean"/>
               <xs:attribute name="gone" type="xs:boolean" use="prohibited"/>
             </xs:complexType>
           </xs:element>"#,
    ))?;
    let e = infer(&set, &ElementSelector::default())?;
    let names = properties(&e)
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["", "kept"]);
    assert_eq!(
        property(&e, "kept"),
        &InferedType::primitive(PrimitiveType::Boolean, true)
    );
    assert_eq!(
        body(&e),
        &InferedType::Top
    );
    Ok(())
}

#[test]
fn any_type_test() -> Result<(), Box<dyn std::error::Error>> {
    let set = compile(&schema(r#"<xs:element name="anything"/>"#))?;
    let anything = infer(&set, &ElementSelector::default())?;
    let (multiplicity, any) = branch(body(&anything), "{anyNs}anyElement");
    assert_eq!(multiplicity, InferedMultiplicity::Multiple);
    assert_eq!(body(any), &InferedType::Top);
    Ok(())
}

#[test]
fn extension_test() -> Result<(), Box<dyn std::error::Error>> {
    let set = compile(&schema(
        r#"<xs:complexType name="Base">
             <xs:sequence><xs:element name="id" type="xs:int"/></xs:sequence>
             <xs:attribute name="version" type="xs:int"/>
           </xs:complexType>
           <xs:element name="derived">
             <xs:complexType>
               <xs:complexContent>
                 <xs:extension base="Base">
                   <xs:sequence><xs:element name="label" type="xs:string"/></xs:sequence>
                 </xs:extension>
               </xs:complexContent>
             </xs:complexType>
           </xs:element>"#,
    ))?;
    let derived = infer(&set, &ElementSelector::default())?;
    assert_eq!(
        property(&derived, "version"),
        &InferedType::primitive(PrimitiveType::Int32, true)
    );
    let parts = body(&derived)
        .branches()
        .map(|(tag, m, _)| (tag.clone(), *m))
        .collect::<Vec<_>>();
    assert_eq!(
        parts,
        vec![
            (
                InferedTypeTag::Record(Some("id".into())),
                InferedMultiplicity::Single
            ),
            (
                InferedTypeTag::Record(Some("label".into())),
                InferedMultiplicity::Single
            ),
        ]
    );
    Ok(())
}
