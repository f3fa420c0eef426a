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

//! Command-line entry points
//!
//! Subcommands:
//! - `Infer`: infer type of a global element of a schema.
//! - `Schema`: show the simplified schema tree of a global element.
//! - `Elements`: list global elements of a schema.
//! - `Manifest`: infer types of every schema listed in a manifest.
//!
//! Every command compiles the schema file first. Relative includes
//! and imports are resolved against the resolution folder (directory
//! of the schema file by default).

use crate::infer;
use crate::manifest::Manifest;
use crate::parser::find_global_element;
use crate::parser::Parser;
use crate::ElementSelector;
use crate::Error;
use crate::SchemaSet;
use clap::Args;
use clap::Subcommand;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;

/// Schema file and global element selection.
#[derive(Args, Debug)]
pub struct SchemaInput {
    /// XSD file.
    pub schema: PathBuf,
    /// Local name of the global element. May be omitted if the schema
    /// has a single global element.
    #[arg(short, long)]
    pub element: Option<String>,
    /// Namespace of the global element.
    #[arg(short, long)]
    pub namespace: Option<String>,
    /// Folder for relative `schemaLocation` of includes and imports.
    #[arg(short, long = "resolution-folder")]
    pub resolution_folder: Option<PathBuf>,
}

impl SchemaInput {
    fn selector(&self) -> ElementSelector {
        ElementSelector {
            name: self.element.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

/// High-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer type of a global element.
    Infer(SchemaInput),
    /// Show simplified schema tree of a global element.
    Schema(SchemaInput),
    /// List global elements of a schema.
    Elements {
        /// XSD file.
        schema: PathBuf,
        /// Folder for relative `schemaLocation` of includes and imports.
        #[arg(short, long = "resolution-folder")]
        resolution_folder: Option<PathBuf>,
    },
    /// Infer types of all schemas of a manifest.
    Manifest {
        /// Manifest file (TOML).
        manifest: PathBuf,
    },
}

/// Process a command.
///
/// # Errors
///
/// Returns an error if command processing fails.
pub fn process_command(command: &Commands) -> Result<Vec<String>, Error> {
    match command {
        Commands::Infer(input) => {
            let set = load(&input.schema, input.resolution_folder.as_deref())?;
            let infered = infer(&set, &input.selector()).map_err(Error::Parse)?;
            Ok(vec![infered.to_string()])
        }
        Commands::Schema(input) => {
            let set = load(&input.schema, input.resolution_folder.as_deref())?;
            let element = find_global_element(
                &set,
                input.element.as_deref(),
                input.namespace.as_deref(),
            )
            .map_err(Error::Parse)?;
            let schema_element = Parser::new(&set)
                .parse_element(element)
                .map_err(Error::Parse)?;
            Ok(vec![format!("{schema_element:#?}")])
        }
        Commands::Elements {
            schema,
            resolution_folder,
        } => {
            let set = load(schema, resolution_folder.as_deref())?;
            Ok(set
                .global_elements()
                .map(|e| e.name.to_string())
                .collect())
        }
        Commands::Manifest { manifest } => {
            let manifest = Manifest::read(manifest)
                .map_err(|e| Error::Manifest(manifest.display().to_string(), e))?;
            manifest
                .schemas
                .iter()
                .map(|entry| {
                    let set = load(&entry.file, entry.resolution_folder.as_deref())?;
                    let infered = infer(&set, &entry.selector()).map_err(Error::Parse)?;
                    Ok(format!("{}:\n{infered}", entry.file.display()))
                })
                .collect()
        }
    }
}

fn load(schema: &Path, resolution_folder: Option<&Path>) -> Result<SchemaSet, Error> {
    info!(schema = %schema.display(), "compiling schema");
    SchemaSet::load(schema, resolution_folder).map_err(Error::SchemaSet)
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_data(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("test-data")
            .join(name)
    }

    #[test]
    fn elements_test() {
        let output = process_command(&Commands::Elements {
            schema: test_data("purchase-order.xsd"),
            resolution_folder: None,
        })
        .unwrap();
        assert_eq!(
            output,
            vec!["{urn:po}purchaseOrder".to_string(), "{urn:po}comment".to_string()]
        );
    }

    #[test]
    fn infer_test() {
        let output = process_command(&Commands::Infer(SchemaInput {
            schema: test_data("purchase-order.xsd"),
            element: Some("comment".into()),
            namespace: None,
            resolution_folder: None,
        }))
        .unwrap();
        assert_eq!(output.len(), 1);
        assert!(output[0].contains("{urn:po}comment"));
    }

    #[test]
    fn manifest_test() {
        let output = process_command(&Commands::Manifest {
            manifest: test_data("manifest.toml"),
        })
        .unwrap();
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn missing_schema_test() {
        assert!(matches!(
            process_command(&Commands::Elements {
                schema: test_data("no-such-schema.xsd"),
                resolution_folder: None,
            }),
            Err(Error::SchemaSet(_))
        ));
    }
}
