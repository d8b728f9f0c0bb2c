//! Generated-file lifecycle: writing, regeneration, and orphan cleanup.
//!
//! Any structural change to a persisted graph triggers regeneration of its
//! file. Stale files for deleted graphs are removed, and a graph that lost
//! its association with a concrete implementation type is regenerated from
//! scratch rather than patched. File-system failures are reported through
//! `tracing` and an optional diagnostics channel; they never abort
//! unrelated graphs' compilation.

use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use rustc_hash::FxHashSet;
use serde::Serialize;
use thiserror::Error;

use crate::graph::{GraphData, GraphValidationError, validate};
use crate::registry::DescriptorRegistry;

use super::generator::{CodegenError, generate};
use super::program::GeneratedProgram;

/// Extension carried by every generated file.
pub const GENERATED_EXTENSION: &str = ".g.rs";

/// Configuration for the code generator's output location.
#[derive(Clone, Debug)]
pub struct CodegenConfig {
    pub output_dir: PathBuf,
}

impl CodegenConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        CodegenConfig {
            output_dir: output_dir.into(),
        }
    }

    /// Load configuration from the environment (`FLOWGRAPH_CODEGEN_DIR`),
    /// reading a `.env` file when present. Defaults to `src/generated`.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let output_dir = std::env::var("FLOWGRAPH_CODEGEN_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("src/generated"));
        CodegenConfig { output_dir }
    }
}

/// A diagnostic forwarded to the host when generated-file maintenance hits
/// a problem it can survive.
#[derive(Clone, Debug, Serialize)]
pub struct CodegenDiagnostic {
    pub graph: String,
    pub message: String,
}

/// File-system failures while maintaining generated code.
#[derive(Debug, Error, Diagnostic)]
pub enum OutputError {
    #[error("failed to write generated code for graph '{graph}'")]
    #[diagnostic(code(flowgraph::codegen::write))]
    Write {
        graph: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove generated file '{path}'")]
    #[diagnostic(code(flowgraph::codegen::remove))]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Everything that can go wrong regenerating one graph.
#[derive(Debug, Error, Diagnostic)]
pub enum RegenerateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] GraphValidationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Codegen(#[from] CodegenError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Output(#[from] OutputError),
}

/// Result of one maintenance pass over a set of graphs.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Files successfully (re)written.
    pub written: Vec<PathBuf>,
    /// Graphs that failed, with the rendered failure. Other graphs are
    /// unaffected.
    pub failed: Vec<(String, String)>,
    /// Orphaned files that were deleted.
    pub removed: Vec<PathBuf>,
}

/// Manager for one directory of generated flow code.
pub struct OutputDir {
    dir: PathBuf,
    diagnostics: Option<flume::Sender<CodegenDiagnostic>>,
}

impl OutputDir {
    #[must_use]
    pub fn new(config: CodegenConfig) -> Self {
        OutputDir {
            dir: config.output_dir,
            diagnostics: None,
        }
    }

    /// Forward maintenance diagnostics to a channel in addition to tracing.
    #[must_use]
    pub fn with_diagnostics(mut self, sender: flume::Sender<CodegenDiagnostic>) -> Self {
        self.diagnostics = Some(sender);
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the generated file for a graph id.
    #[must_use]
    pub fn path_for(&self, graph_id: &str) -> PathBuf {
        self.dir.join(format!("{graph_id}{GENERATED_EXTENSION}"))
    }

    /// Whether a graph's code must be rebuilt: no implementation-type
    /// association, or the backing file is gone.
    #[must_use]
    pub fn needs_regeneration(&self, graph: &GraphData) -> bool {
        graph.flow_type.is_none() || !self.path_for(&graph.id).exists()
    }

    /// Write a generated program to its file.
    pub fn write(&self, program: &GeneratedProgram) -> Result<PathBuf, OutputError> {
        fs::create_dir_all(&self.dir).map_err(|source| OutputError::Write {
            graph: program.graph_name.clone(),
            source,
        })?;
        let path = self.path_for(&program.graph_id);
        fs::write(&path, program.source()).map_err(|source| OutputError::Write {
            graph: program.graph_name.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Validate, generate and write one graph, recording the generated type
    /// back onto the graph as its flow-type association.
    pub fn regenerate(
        &self,
        graph: &mut GraphData,
        registry: &DescriptorRegistry,
    ) -> Result<PathBuf, RegenerateError> {
        let program = {
            let validated = validate(&*graph, registry)?;
            generate(&validated)?
        };
        let path = self.write(&program)?;
        graph.flow_type = Some(program.type_name.clone());
        tracing::info!(
            graph = %graph.name,
            path = %path.display(),
            flow_type = %program.type_name,
            "generated flow code"
        );
        Ok(path)
    }

    /// Delete the generated file for a graph that was deleted or renamed.
    pub fn remove_for_graph(&self, graph_id: &str) -> Result<(), OutputError> {
        let path = self.path_for(graph_id);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path).map_err(|source| OutputError::Remove {
            path: path.display().to_string(),
            source,
        })
    }

    /// One maintenance pass: regenerate every graph, then delete orphaned
    /// files. A failing graph is reported and skipped; the rest of the pass
    /// continues.
    pub fn sync(&self, graphs: &mut [GraphData], registry: &DescriptorRegistry) -> SyncReport {
        let mut report = SyncReport::default();

        for graph in graphs.iter_mut() {
            match self.regenerate(graph, registry) {
                Ok(path) => report.written.push(path),
                Err(error) => {
                    self.report(&graph.name, format!("regeneration failed: {error}"));
                    report.failed.push((graph.name.clone(), error.to_string()));
                }
            }
        }

        let live: FxHashSet<String> = graphs.iter().map(|graph| graph.id.clone()).collect();
        report.removed = self.remove_orphans(&live);
        report
    }

    /// Delete generated files whose graph no longer exists. Individual
    /// deletion failures are reported and skipped.
    pub fn remove_orphans(&self, live_graph_ids: &FxHashSet<String>) -> Vec<PathBuf> {
        let mut removed = Vec::new();
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return removed,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(graph_id) = file_name.strip_suffix(GENERATED_EXTENSION) else {
                continue;
            };
            if live_graph_ids.contains(graph_id) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "removed orphaned generated file");
                    removed.push(path);
                }
                Err(error) => {
                    self.report(
                        graph_id,
                        format!("failed to remove orphaned file {}: {error}", path.display()),
                    );
                }
            }
        }
        removed
    }

    fn report(&self, graph: &str, message: String) {
        tracing::error!(graph, message, "generated-code maintenance problem");
        if let Some(sender) = &self.diagnostics {
            let _ = sender.send(CodegenDiagnostic {
                graph: graph.to_string(),
                message,
            });
        }
    }
}
