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

//! Inferred type tree
//!
//! - [`InferedType`]: the type of a value (record, collection,
//!   primitive or unconstrained).
//! - [`InferedProperty`]: named member of a record. The empty name
//!   denotes the body (text or content) of the value itself.
//! - [`InferedTypeTag`]: key of one branch of a collection.
//! - [`InferedMultiplicity`]: how many times a collection branch may
//!   appear.
//!
//! Example
//! ```rust
//! use xsd_infer_core::InferedType;
//! use xsd_infer_core::PrimitiveType;
//!
//! let t = InferedType::primitive(PrimitiveType::Int32, false);
//! assert!(!t.is_optional());
//! assert!(t.ensure_optional().is_optional());
//! ```

use core::fmt::Display;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;
use std::collections::HashMap;

/// Target primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Text.
    String,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Boolean.
    Boolean,
    /// Decimal number.
    Decimal,
    /// Double precision float.
    Double,
    /// Single precision float.
    Single,
    /// Calendar date.
    Date,
    /// Date and time with offset.
    DateTime,
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::String => "string",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Boolean => "bool",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Single => "single",
            Self::Date => "date",
            Self::DateTime => "datetime",
        }
        .fmt(f)
    }
}

/// Unit of measure attached to a primitive value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Unit(String);

impl From<String> for Unit {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

/// How many times a branch of a collection may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InferedMultiplicity {
    /// Exactly once.
    Single,
    /// Zero or one time.
    OptionalSingle,
    /// Any number of times.
    Multiple,
}

impl Display for InferedMultiplicity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Single => "single",
            Self::OptionalSingle => "optional",
            Self::Multiple => "multiple",
        }
        .fmt(f)
    }
}

/// Key of a branch inside [`InferedType::Collection`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InferedTypeTag {
    /// Record with an optional name.
    Record(Option<String>),
    /// Nested collection.
    Collection,
}

impl InferedTypeTag {
    /// Human readable name of the tag.
    #[must_use]
    pub fn nice_name(&self) -> &str {
        match self {
            Self::Record(Some(name)) => name,
            Self::Record(None) => "Record",
            Self::Collection => "Array",
        }
    }

    /// Unique code of the tag. Different tags always have different
    /// codes.
    #[must_use]
    pub fn code(&self) -> String {
        match self {
            Self::Record(Some(name)) => format!("Record@{name}"),
            Self::Record(None) => "Record".into(),
            Self::Collection => "Collection".into(),
        }
    }
}

impl Display for InferedTypeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.code().fmt(f)
    }
}

/// Member of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferedProperty {
    /// Name of the property. Empty name is the body of the record.
    pub name: String,
    /// Type of the property.
    pub infered_type: InferedType,
}

impl InferedProperty {
    /// Create a new property.
    #[must_use]
    pub fn new(name: impl Into<String>, infered_type: InferedType) -> Self {
        Self {
            name: name.into(),
            infered_type,
        }
    }

    /// Create the body property (property with empty name).
    #[must_use]
    pub fn body(infered_type: InferedType) -> Self {
        Self::new(String::new(), infered_type)
    }

    /// Whether the property is the body of the record.
    #[must_use]
    pub fn is_body(&self) -> bool {
        self.name.is_empty()
    }
}

/// Branches of a collection keyed by tag.
pub type CollectionTypes = HashMap<InferedTypeTag, (InferedMultiplicity, InferedType)>;

/// Inferred type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferedType {
    /// Unconstrained type.
    Top,
    /// Primitive value.
    Primitive {
        /// Target primitive type.
        primitive: PrimitiveType,
        /// Unit of measure.
        unit: Option<Unit>,
        /// Whether the value may be missing.
        optional: bool,
    },
    /// Record with ordered properties.
    Record {
        /// Name of the record.
        name: Option<String>,
        /// Properties in declaration order.
        properties: Vec<InferedProperty>,
        /// Whether the record may be missing.
        optional: bool,
    },
    /// Collection of heterogeneous branches.
    Collection {
        /// Tags in order of first appearance.
        order: Vec<InferedTypeTag>,
        /// Branches keyed by tag.
        types: CollectionTypes,
    },
}

impl InferedType {
    /// Primitive type without unit of measure.
    #[must_use]
    pub const fn primitive(primitive: PrimitiveType, optional: bool) -> Self {
        Self::Primitive {
            primitive,
            unit: None,
            optional,
        }
    }

    /// Non-optional record.
    #[must_use]
    pub const fn record(name: Option<String>, properties: Vec<InferedProperty>) -> Self {
        Self::Record {
            name,
            properties,
            optional: false,
        }
    }

    /// Build collection from branches.
    ///
    /// Tag order follows the first appearance of each tag. If the
    /// same tag appears more than once the last branch wins.
    #[must_use]
    pub fn collection<I>(branches: I) -> Self
    where
        I: IntoIterator<Item = (InferedTypeTag, (InferedMultiplicity, InferedType))>,
    {
        let (order, types) = branches.into_iter().fold(
            (Vec::new(), HashMap::new()),
            |(mut order, mut types): (Vec<_>, CollectionTypes), (tag, branch)| {
                if types.insert(tag.clone(), branch).is_none() {
                    order.push(tag);
                }
                (order, types)
            },
        );
        Self::Collection { order, types }
    }

    /// Whether the value may be missing.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(
            self,
            Self::Primitive { optional: true, .. } | Self::Record { optional: true, .. }
        )
    }

    /// Make the type optional. Types without optionality flag are
    /// returned as is.
    #[must_use]
    pub fn ensure_optional(self) -> Self {
        self.with_optional(true)
    }

    /// Make the type non-optional. Types without optionality flag are
    /// returned as is.
    #[must_use]
    pub fn drop_optional(self) -> Self {
        self.with_optional(false)
    }

    /// Branches of a collection in tag order. Empty for any other type.
    pub fn branches(
        &self,
    ) -> impl Iterator<Item = (&InferedTypeTag, &InferedMultiplicity, &InferedType)> {
        let (order, types) = match self {
            Self::Collection { order, types } => (order.as_slice(), Some(types)),
            _ => (&[][..], None),
        };
        order.iter().filter_map(move |tag| {
            types
                .and_then(|types| types.get(tag))
                .map(|(multiplicity, t)| (tag, multiplicity, t))
        })
    }

    fn with_optional(self, optional: bool) -> Self {
        match self {
            Self::Primitive {
                primitive, unit, ..
            } => Self::Primitive {
                primitive,
                unit,
                optional,
            },
            Self::Record {
                name, properties, ..
            } => Self::Record {
                name,
                properties,
                optional,
            },
            v @ (Self::Top | Self::Collection { .. }) => v,
        }
    }

    fn fmt_indented(&self, f: &mut Formatter<'_>, indent: usize) -> FmtResult {
        let opt = |optional: bool| if optional { "?" } else { "" };
        match self {
            Self::Top => write!(f, "top"),
            Self::Primitive {
                primitive,
                unit,
                optional,
            } => {
                write!(f, "{primitive}{}", opt(*optional))?;
                unit.as_ref().map_or(Ok(()), |unit| write!(f, "<{unit}>"))
            }
            Self::Record {
                name,
                properties,
                optional,
            } => {
                write!(
                    f,
                    "record {}{} {{",
                    name.as_deref().unwrap_or("<anonymous>"),
                    opt(*optional)
                )?;
                for p in properties {
                    write!(f, "\n{:width$}", "", width = indent + 2)?;
                    if p.is_body() {
                        write!(f, "<body>: ")?;
                    } else {
                        write!(f, "{}: ", p.name)?;
                    }
                    p.infered_type.fmt_indented(f, indent + 2)?;
                }
                write!(f, "\n{:width$}}}", "", width = indent)
            }
            Self::Collection { .. } => {
                write!(f, "collection [")?;
                for (tag, multiplicity, t) in self.branches() {
                    write!(
                        f,
                        "\n{:width$}{} ({multiplicity}): ",
                        "",
                        tag.nice_name(),
                        width = indent + 2
                    )?;
                    t.fmt_indented(f, indent + 2)?;
                }
                write!(f, "\n{:width$}]", "", width = indent)
            }
        }
    }
}

impl Display for InferedType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.fmt_indented(f, 0)
    }
}
