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

//! Namespace resolution of QName valued attributes.
//!
//! Serde deserialization of `quick-xml` drops namespace declarations,
//! so QName values are qualified before deserialization using the
//! bindings in scope of the element that carries them.

use crate::xsd::ValidateError;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use quick_xml::Writer;
use std::str::from_utf8;

/// Unprefixed attributes holding a QName.
const QNAME_ATTRIBUTES: [&[u8]; 3] = [b"type", b"ref", b"base"];

/// Rewrite QName values of `type`, `ref` and `base` attributes into
/// `{namespace}local` form.
///
/// Values with an undeclared prefix and unprefixed values without a
/// default namespace in scope are kept as is.
///
/// # Errors
///
/// - `ValidateError::Xml` if document cannot be read
/// - `ValidateError::Utf8` if a namespace is not valid UTF-8
pub fn qualify(xml: &str) -> Result<String, ValidateError> {
    let mut reader = NsReader::from_str(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    loop {
        let event = match reader.read_event().map_err(ValidateError::Xml)? {
            Event::Eof => break,
            Event::Start(e) => Event::Start(qualify_attributes(&reader, &e)?),
            Event::Empty(e) => Event::Empty(qualify_attributes(&reader, &e)?),
            event => event,
        };
        writer
            .write_event(event)
            .map_err(|e| ValidateError::Xml(e.into()))?;
    }
    String::from_utf8(writer.into_inner()).map_err(|e| ValidateError::Utf8(e.utf8_error()))
}

fn qualify_attributes(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<BytesStart<'static>, ValidateError> {
    let mut qualified = start.to_owned();
    qualified.clear_attributes();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ValidateError::Xml(e.into()))?;
        if !QNAME_ATTRIBUTES.contains(&attr.key.into_inner()) {
            qualified.push_attribute(attr);
            continue;
        }
        let value = attr.unescape_value().map_err(ValidateError::Xml)?;
        match clark_name(reader, value.trim())? {
            Some(name) => {
                let key = from_utf8(attr.key.into_inner()).map_err(ValidateError::Utf8)?;
                qualified.push_attribute((key, name.as_str()));
            }
            None => qualified.push_attribute(attr),
        }
    }
    Ok(qualified)
}

fn clark_name(reader: &NsReader<&[u8]>, value: &str) -> Result<Option<String>, ValidateError> {
    if value.starts_with('{') {
        return Ok(None);
    }
    let (namespace, local) = reader.resolver().resolve_element(QName(value.as_bytes()));
    match namespace {
        ResolveResult::Bound(ns) if !local.into_inner().is_empty() => {
            let ns = from_utf8(ns.into_inner()).map_err(ValidateError::Utf8)?;
            let local = from_utf8(local.into_inner()).map_err(ValidateError::Utf8)?;
            Ok(Some(format!("{{{ns}}}{local}")))
        }
        ResolveResult::Bound(_) | ResolveResult::Unbound | ResolveResult::Unknown(_) => Ok(None),
    }
}
