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

//! Inference manifest.
//!
//! Lists schemas and the global elements to infer from them. Build
//! scripts can use the manifest to process several schemas at once.
//!
//! ```toml
//! [[schemas]]
//! file = "schemas/po.xsd"
//! resolution-folder = "schemas"
//! element = "purchaseOrder"
//! namespace = "urn:po"
//! ```

use crate::ElementSelector;
use serde::Deserialize;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs::File;
use std::io::Error as IoError;
use std::io::Read as _;
use std::path::Path;
use std::path::PathBuf;
use toml::de::Error as TomlError;

/// Manifest with schemas to infer.
#[derive(Deserialize, Debug)]
pub struct Manifest {
    pub schemas: Vec<ManifestEntry>,
}

/// One schema of the manifest.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
pub struct ManifestEntry {
    /// Schema file.
    pub file: PathBuf,
    /// Folder for relative includes and imports of the schema.
    /// Defaults to the directory of the file.
    pub resolution_folder: Option<PathBuf>,
    /// Local name of the global element.
    pub element: Option<String>,
    /// Namespace of the global element.
    pub namespace: Option<String>,
}

impl ManifestEntry {
    #[must_use]
    pub fn selector(&self) -> ElementSelector {
        ElementSelector {
            name: self.element.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

impl Manifest {
    /// Read manifest from toml file. Relative paths of the manifest
    /// are resolved against the directory of the manifest.
    ///
    /// # Errors
    ///
    /// - `Error::Io` if failed to read file
    /// - `Error::Toml` if failed to parse content as TOML / invalid manifest.
    pub fn read(fname: &Path) -> Result<Self, Error> {
        let mut file = File::open(fname).map_err(Error::Io)?;
        let mut content = String::new();
        file.read_to_string(&mut content).map_err(Error::Io)?;
        let manifest = Self::parse(&content)?;
        Ok(match fname.parent() {
            Some(dir) => manifest.relative_to(dir),
            None => manifest,
        })
    }

    /// Parse manifest content.
    ///
    /// # Errors
    ///
    /// - `Error::Toml` if content is not a valid manifest.
    pub fn parse(content: &str) -> Result<Self, Error> {
        toml::from_str(content).map_err(Error::Toml)
    }

    fn relative_to(mut self, dir: &Path) -> Self {
        for entry in &mut self.schemas {
            entry.file = dir.join(&entry.file);
            entry.resolution_folder = entry.resolution_folder.take().map(|f| dir.join(f));
        }
        self
    }
}

#[derive(Debug)]
pub enum Error {
    Io(IoError),
    Toml(TomlError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Io(err) => write!(f, "input/output error: {err}"),
            Self::Toml(err) => write!(f, "toml parse error: {err}"),
        }
    }
}

impl StdError for Error {}
