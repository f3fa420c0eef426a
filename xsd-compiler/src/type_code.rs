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

//! Primitive type codes of XML Schema builtin datatypes.

use crate::QualifiedName;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Builtin datatype of a simple value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeCode {
    /// `anySimpleType`, lists and unions.
    AnyAtomicType,
    String,
    Boolean,
    Decimal,
    Float,
    Double,
    Duration,
    DateTime,
    Time,
    Date,
    GYearMonth,
    GYear,
    GMonthDay,
    GDay,
    GMonth,
    HexBinary,
    Base64Binary,
    AnyUri,
    QName,
    Notation,
    NormalizedString,
    Token,
    Language,
    NmToken,
    Name,
    NcName,
    Id,
    IdRef,
    Entity,
    Integer,
    NonPositiveInteger,
    NegativeInteger,
    Long,
    Int,
    Short,
    Byte,
    NonNegativeInteger,
    UnsignedLong,
    UnsignedInt,
    UnsignedShort,
    UnsignedByte,
    PositiveInteger,
}

const BUILTINS: &[(&str, TypeCode)] = &[
    ("anySimpleType", TypeCode::AnyAtomicType),
    ("anyAtomicType", TypeCode::AnyAtomicType),
    ("string", TypeCode::String),
    ("boolean", TypeCode::Boolean),
    ("decimal", TypeCode::Decimal),
    ("float", TypeCode::Float),
    ("double", TypeCode::Double),
    ("duration", TypeCode::Duration),
    ("dateTime", TypeCode::DateTime),
    ("time", TypeCode::Time),
    ("date", TypeCode::Date),
    ("gYearMonth", TypeCode::GYearMonth),
    ("gYear", TypeCode::GYear),
    ("gMonthDay", TypeCode::GMonthDay),
    ("gDay", TypeCode::GDay),
    ("gMonth", TypeCode::GMonth),
    ("hexBinary", TypeCode::HexBinary),
    ("base64Binary", TypeCode::Base64Binary),
    ("anyURI", TypeCode::AnyUri),
    ("QName", TypeCode::QName),
    ("NOTATION", TypeCode::Notation),
    ("normalizedString", TypeCode::NormalizedString),
    ("token", TypeCode::Token),
    ("language", TypeCode::Language),
    ("NMTOKEN", TypeCode::NmToken),
    ("NMTOKENS", TypeCode::NmToken),
    ("Name", TypeCode::Name),
    ("NCName", TypeCode::NcName),
    ("ID", TypeCode::Id),
    ("IDREF", TypeCode::IdRef),
    ("IDREFS", TypeCode::IdRef),
    ("ENTITY", TypeCode::Entity),
    ("ENTITIES", TypeCode::Entity),
    ("integer", TypeCode::Integer),
    ("nonPositiveInteger", TypeCode::NonPositiveInteger),
    ("negativeInteger", TypeCode::NegativeInteger),
    ("long", TypeCode::Long),
    ("int", TypeCode::Int),
    ("short", TypeCode::Short),
    ("byte", TypeCode::Byte),
    ("nonNegativeInteger", TypeCode::NonNegativeInteger),
    ("unsignedLong", TypeCode::UnsignedLong),
    ("unsignedInt", TypeCode::UnsignedInt),
    ("unsignedShort", TypeCode::UnsignedShort),
    ("unsignedByte", TypeCode::UnsignedByte),
    ("positiveInteger", TypeCode::PositiveInteger),
];

impl TypeCode {
    /// Type code of a builtin simple type given by its qualified name.
    /// `None` if the name is not a builtin simple type.
    #[must_use]
    pub fn builtin(name: &QualifiedName) -> Option<Self> {
        if name.is_xs() {
            BUILTINS
                .iter()
                .find_map(|(n, code)| (*n == name.name).then_some(*code))
        } else {
            None
        }
    }

    /// Local name of the datatype in the XML Schema namespace.
    #[must_use]
    pub fn xs_name(self) -> &'static str {
        BUILTINS
            .iter()
            .find_map(|(n, code)| (*code == self).then_some(*n))
            .unwrap_or("anySimpleType")
    }
}

impl Display for TypeCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "xs:{}", self.xs_name())
    }
}
