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

use crate::parser::Error;
use crate::schema_set::SchemaSet;
use crate::xsd::element::Element;

/// Find the global element selected by local `name` and `namespace`.
///
/// Without a name the schema must have exactly one global element (in
/// `namespace`, if given).
///
/// # Errors
///
/// - `Error::NoGlobalElements` if schema set has no global elements
/// - `Error::AmbiguousElement` if several elements match
/// - `Error::ElementNotFound` if nothing matches
pub fn find_global_element<'a>(
    set: &'a SchemaSet,
    name: Option<&str>,
    namespace: Option<&str>,
) -> Result<&'a Element, Error> {
    let elements = set.global_elements().collect::<Vec<_>>();
    if elements.is_empty() {
        return Err(Error::NoGlobalElements);
    }
    let mut matches = elements
        .iter()
        .copied()
        .filter(|e| name.is_none_or(|name| e.name.name == name))
        .filter(|e| namespace.is_none_or(|ns| e.name.in_namespace(ns)))
        .collect::<Vec<_>>();
    match matches.len() {
        0 => Err(Error::ElementNotFound {
            name: name.map(Into::into),
            namespace: namespace.map(Into::into),
            available: elements.iter().map(|e| e.name.clone()).collect(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(Error::AmbiguousElement(
            matches.iter().map(|e| e.name.clone()).collect(),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schema_set::FolderResolver;
    use crate::QualifiedName;

    fn compile(xml: &str) -> SchemaSet {
        SchemaSet::compile(xml, &FolderResolver::default()).unwrap()
    }

    const TWO: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:a">
        <xs:element name="foo" type="xs:int"/>
        <xs:element name="bar" type="xs:string"/>
    </xs:schema>"#;

    #[test]
    fn no_global_elements_test() {
        let set = compile(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                 <xs:complexType name="T"/>
               </xs:schema>"#,
        );
        assert!(matches!(
            find_global_element(&set, None, None),
            Err(Error::NoGlobalElements)
        ));
    }

    #[test]
    fn single_element_test() {
        let set = compile(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                 <xs:element name="only" type="xs:int"/>
               </xs:schema>"#,
        );
        let e = find_global_element(&set, None, None).unwrap();
        assert_eq!(e.name, QualifiedName::local("only"));
        let e = find_global_element(&set, None, Some("")).unwrap();
        assert_eq!(e.name, QualifiedName::local("only"));
    }

    #[test]
    fn ambiguous_test() {
        let set = compile(TWO);
        match find_global_element(&set, None, None) {
            Err(Error::AmbiguousElement(names)) => assert_eq!(
                names,
                vec![
                    QualifiedName::new(Some("urn:a"), "foo"),
                    QualifiedName::new(Some("urn:a"), "bar"),
                ]
            ),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn by_name_test() {
        let set = compile(TWO);
        let e = find_global_element(&set, Some("bar"), Some("urn:a")).unwrap();
        assert_eq!(e.name, QualifiedName::new(Some("urn:a"), "bar"));
        let e = find_global_element(&set, Some("foo"), None).unwrap();
        assert_eq!(e.name.name, "foo");
    }

    #[test]
    fn not_found_test() {
        let set = compile(TWO);
        match find_global_element(&set, Some("foo"), Some("urn:b")) {
            Err(Error::ElementNotFound { available, .. }) => assert_eq!(available.len(), 2),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            find_global_element(&set, Some("baz"), None),
            Err(Error::ElementNotFound { .. })
        ));
    }
}
