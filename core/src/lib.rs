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

//! Inferred type model
//!
//! Structural type description shared by every inference engine of
//! the project: the XSD based engine (`xsd-infer-compiler`) and
//! sample based engines. Code generators consume [`InferedType`]
//! without knowing where it came from.
//!
//! The crate has no dependencies. Values are plain immutable trees.

/// Inferred type tree.
pub mod infered_type;

#[doc(inline)]
pub use infered_type::InferedMultiplicity;
#[doc(inline)]
pub use infered_type::InferedProperty;
#[doc(inline)]
pub use infered_type::InferedType;
#[doc(inline)]
pub use infered_type::InferedTypeTag;
#[doc(inline)]
pub use infered_type::PrimitiveType;
#[doc(inline)]
pub use infered_type::Unit;
