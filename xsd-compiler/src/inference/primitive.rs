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

use crate::TypeCode;
use xsd_infer_core::PrimitiveType;

/// Target primitive type of a schema type code. Codes without a
/// dedicated primitive are strings.
#[must_use]
pub const fn type_code_to_runtime_type(code: TypeCode) -> PrimitiveType {
    match code {
        TypeCode::Int => PrimitiveType::Int32,
        TypeCode::Long => PrimitiveType::Int64,
        TypeCode::Date => PrimitiveType::Date,
        TypeCode::DateTime => PrimitiveType::DateTime,
        TypeCode::Boolean => PrimitiveType::Boolean,
        TypeCode::Decimal => PrimitiveType::Decimal,
        TypeCode::Double => PrimitiveType::Double,
        TypeCode::Float => PrimitiveType::Single,
        _ => PrimitiveType::String,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mapped_codes_test() {
        assert_eq!(type_code_to_runtime_type(TypeCode::Int), PrimitiveType::Int32);
        assert_eq!(type_code_to_runtime_type(TypeCode::Long), PrimitiveType::Int64);
        assert_eq!(type_code_to_runtime_type(TypeCode::Float), PrimitiveType::Single);
        assert_eq!(
            type_code_to_runtime_type(TypeCode::DateTime),
            PrimitiveType::DateTime
        );
    }

    #[test]
    fn string_fallback_test() {
        for code in [
            TypeCode::Short,
            TypeCode::Integer,
            TypeCode::Time,
            TypeCode::AnyUri,
            TypeCode::AnyAtomicType,
        ] {
            assert_eq!(type_code_to_runtime_type(code), PrimitiveType::String);
        }
    }
}
