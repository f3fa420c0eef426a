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

//! Resolution of `schemaLocation` references.

use crate::schema_set::Error;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Schema document found by a resolver.
#[derive(Debug)]
pub struct ResolvedSchema {
    /// Canonical location of the document. Documents with the same
    /// location are loaded once.
    pub path: PathBuf,
    pub content: String,
}

/// Resolver of schema locations.
pub trait Resolver {
    /// Resolve `location` of `xs:include` / `xs:import`.
    ///
    /// `base` is the path of the including document, `None` for the
    /// in-memory root document.
    ///
    /// # Errors
    ///
    /// - `Error::UnsupportedLocation` if location cannot be handled
    /// - `Error::Io` if document cannot be read
    fn resolve(&self, base: Option<&Path>, location: &str) -> Result<ResolvedSchema, Error>;
}

/// Resolves relative locations of the root document against a folder
/// and relative locations of loaded documents against their own
/// directory. Only local files are read.
#[derive(Debug, Default, Clone)]
pub struct FolderResolver {
    folder: Option<PathBuf>,
}

impl FolderResolver {
    #[must_use]
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: Some(folder.into()),
        }
    }

    fn path(&self, base: Option<&Path>, location: &str) -> Result<PathBuf, Error> {
        let location = match location.strip_prefix("file://") {
            Some(path) => path,
            None if location.contains("://") => {
                return Err(Error::UnsupportedLocation(location.into()))
            }
            None => location,
        };
        let path = Path::new(location);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let dir = base
            .and_then(Path::parent)
            .or(self.folder.as_deref());
        Ok(dir.map_or_else(|| path.to_path_buf(), |dir| dir.join(path)))
    }
}

impl Resolver for FolderResolver {
    fn resolve(&self, base: Option<&Path>, location: &str) -> Result<ResolvedSchema, Error> {
        let path = self.path(base, location)?;
        let content =
            fs::read_to_string(&path).map_err(|e| Error::Io(path.display().to_string(), e))?;
        let path = fs::canonicalize(&path).unwrap_or(path);
        Ok(ResolvedSchema { path, content })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn folder_path_test() {
        let resolver = FolderResolver::new("/schemas");
        assert_eq!(
            resolver.path(None, "common.xsd").unwrap(),
            PathBuf::from("/schemas/common.xsd")
        );
        assert_eq!(
            resolver
                .path(Some(Path::new("/other/po.xsd")), "sub/types.xsd")
                .unwrap(),
            PathBuf::from("/other/sub/types.xsd")
        );
        assert_eq!(
            resolver.path(None, "file:///abs/a.xsd").unwrap(),
            PathBuf::from("/abs/a.xsd")
        );
        assert_eq!(
            FolderResolver::default().path(None, "a.xsd").unwrap(),
            PathBuf::from("a.xsd")
        );
    }

    #[test]
    fn remote_location_test() {
        let resolver = FolderResolver::new("/schemas");
        assert!(matches!(
            resolver.path(None, "http://example.com/a.xsd"),
            Err(Error::UnsupportedLocation(_))
        ));
        assert!(matches!(
            resolver.resolve(None, "https://example.com/a.xsd"),
            Err(Error::UnsupportedLocation(_))
        ));
    }

    #[test]
    fn missing_file_test() {
        let resolver = FolderResolver::new(env!("CARGO_MANIFEST_DIR"));
        assert!(matches!(
            resolver.resolve(None, "test-data/no-such-file.xsd"),
            Err(Error::Io(..))
        ));
    }
}
