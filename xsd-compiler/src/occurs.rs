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

//! Occurrence bounds of particles (`minOccurs` / `maxOccurs`).

use serde::de::Error as DeError;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;

#[derive(Debug)]
pub enum Error {
    InvalidMaxOccurs(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidMaxOccurs(v) => write!(f, "invalid maxOccurs value: {v}"),
        }
    }
}

/// Upper occurrence bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaxOccurs {
    Bounded(u64),
    Unbounded,
}

impl FromStr for MaxOccurs {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "unbounded" => Ok(Self::Unbounded),
            v => v
                .parse()
                .map(Self::Bounded)
                .map_err(|_| Error::InvalidMaxOccurs(s.into())),
        }
    }
}

impl Display for MaxOccurs {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Bounded(v) => v.fmt(f),
            Self::Unbounded => "unbounded".fmt(f),
        }
    }
}

impl<'de> Deserialize<'de> for MaxOccurs {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct MoVisitor {}
        impl Visitor<'_> for MoVisitor {
            type Value = MaxOccurs;

            fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
                formatter.write_str("non-negative integer or `unbounded`")
            }
            fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(DeError::custom)
            }
            fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
                Ok(MaxOccurs::Bounded(value))
            }
        }

        de.deserialize_str(MoVisitor {})
    }
}

/// Occurrence bounds of a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Occurs {
    pub min: u64,
    pub max: MaxOccurs,
}

impl Occurs {
    /// Default bounds `(1, 1)`.
    pub const ONCE: Self = Self::new(1, MaxOccurs::Bounded(1));
    /// Bounds `(0, 1)`.
    pub const OPTIONAL: Self = Self::new(0, MaxOccurs::Bounded(1));
    /// Bounds `(0, unbounded)`.
    pub const ANY_NUMBER: Self = Self::new(0, MaxOccurs::Unbounded);

    #[must_use]
    pub const fn new(min: u64, max: MaxOccurs) -> Self {
        Self { min, max }
    }

    /// Bounds from `minOccurs` / `maxOccurs` attribute values. Missing
    /// attributes default to 1.
    #[must_use]
    pub fn from_attributes(min: Option<u64>, max: Option<MaxOccurs>) -> Self {
        Self {
            min: min.unwrap_or(1),
            max: max.unwrap_or(MaxOccurs::Bounded(1)),
        }
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::ONCE
    }
}

impl Display for Occurs {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}..{}]", self.min, self.max)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::from_str as json_from_str;

    #[test]
    fn max_occurs_parse_test() {
        assert_eq!(
            "unbounded".parse::<MaxOccurs>().unwrap(),
            MaxOccurs::Unbounded
        );
        assert_eq!("3".parse::<MaxOccurs>().unwrap(), MaxOccurs::Bounded(3));
        assert!("-1".parse::<MaxOccurs>().is_err());
        assert!("many".parse::<MaxOccurs>().is_err());
    }

    #[test]
    fn max_occurs_deserialize_test() {
        let v: MaxOccurs = json_from_str(r#""unbounded""#).unwrap();
        assert_eq!(v, MaxOccurs::Unbounded);
        let v: MaxOccurs = json_from_str(r#""0""#).unwrap();
        assert_eq!(v, MaxOccurs::Bounded(0));
        assert!(json_from_str::<MaxOccurs>(r#""x""#).is_err());
    }

    #[test]
    fn defaults_test() {
        assert_eq!(Occurs::from_attributes(None, None), Occurs::ONCE);
        assert_eq!(
            Occurs::from_attributes(Some(0), Some(MaxOccurs::Unbounded)),
            Occurs::ANY_NUMBER
        );
        assert_eq!(Occurs::ANY_NUMBER.to_string(), "[0..unbounded]");
    }
}
