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

use crate::manifest::Error as ManifestError;
use crate::parser::Error as ParseError;
use crate::schema_set::Error as SchemaSetError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// XSD inference errors.
#[derive(Debug)]
pub enum Error {
    SchemaSet(SchemaSetError),
    Parse(ParseError),
    Manifest(String, ManifestError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::SchemaSet(err) => write!(f, "schema set error: {err}"),
            Self::Parse(err) => write!(f, "schema parse error: {err}"),
            Self::Manifest(fname, err) => write!(f, "manifest error: file: {fname}: {err}"),
        }
    }
}

impl StdError for Error {}
