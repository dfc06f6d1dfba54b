//! Corpus loading: turns a directory of extracted document files into typed
//! [`RawDocument`]s ready for the pipeline.
//!
//! Two layouts are accepted:
//!
//! ```text
//! <corpus>/<doc_type>/<files>          flat: type directories at the top level
//! <corpus>/<job>/<doc_type>/<files>    nested: one job directory in between
//! ```
//!
//! Directory names map case-insensitively onto [`DocumentType`]
//! ("MEDICAL_RECORDS" and "medical_records" are the same bucket). Unknown
//! directories are skipped. Files are visited in sorted path order so repeated
//! runs over the same corpus produce the same merge result.

use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::models::DocumentType;
use crate::pipeline::{Payload, RawDocument};

/// A corpus read off disk: the case identifier plus every recognized document.
#[derive(Debug)]
pub struct CaseCorpus {
    /// Derived from the corpus directory name.
    pub case_id: String,
    pub documents: Vec<RawDocument>,
}

/// Load every recognized document under `root`.
///
/// A missing or non-directory root is fatal; individual unreadable or
/// unparseable files are not. `.json` files must parse (a parse failure warns
/// and skips the file); `.txt` files are tried as JSON first and fall back to
/// a plain text payload, since extraction jobs sometimes dump JSON with a
/// `.txt` suffix.
pub fn load_corpus(root: &Path) -> Result<CaseCorpus, EngineError> {
    if !root.exists() {
        return Err(EngineError::CorpusNotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(EngineError::CorpusNotADirectory(root.display().to_string()));
    }

    let case_id = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "case".to_string());

    let mut documents = Vec::new();
    for dir in sorted_entries(root)? {
        if !dir.is_dir() {
            tracing::debug!(path = %dir.display(), "Skipping stray file at corpus root");
            continue;
        }
        match document_type_of(&dir) {
            Some(document_type) => collect_documents(&dir, document_type, &mut documents)?,
            // Not a type directory: treat it as a job directory and look one
            // level down for type directories.
            None => {
                for sub in sorted_entries(&dir)? {
                    match document_type_of(&sub) {
                        Some(document_type) if sub.is_dir() => {
                            collect_documents(&sub, document_type, &mut documents)?;
                        }
                        _ => {
                            tracing::debug!(
                                path = %sub.display(),
                                "Skipping unrecognized corpus entry"
                            );
                        }
                    }
                }
            }
        }
    }

    tracing::debug!(
        case_id = %case_id,
        documents = documents.len(),
        "Corpus loaded"
    );
    Ok(CaseCorpus { case_id, documents })
}

fn document_type_of(dir: &Path) -> Option<DocumentType> {
    dir.file_name()
        .and_then(|name| name.to_str())
        .and_then(DocumentType::from_dir_name)
}

/// Directory entries in sorted path order.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|source| EngineError::FileRead {
            path: dir.display().to_string(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();
    Ok(paths)
}

fn collect_documents(
    dir: &Path,
    document_type: DocumentType,
    documents: &mut Vec<RawDocument>,
) -> Result<(), EngineError> {
    for path in sorted_entries(dir)? {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "Skipping nested directory");
            continue;
        }
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "Skipping unreadable document file"
                );
                continue;
            }
        };
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let payload = match extension.as_deref() {
            Some("json") => match serde_json::from_str(&content) {
                Ok(value) => Payload::Json(value),
                Err(error) => {
                    tracing::warn!(
                        source = %source,
                        error = %error,
                        "Skipping document with malformed JSON"
                    );
                    continue;
                }
            },
            Some("txt") => match serde_json::from_str(&content) {
                Ok(value) => Payload::Json(value),
                Err(_) => Payload::Text(content),
            },
            _ => {
                tracing::debug!(source = %source, "Skipping file with unsupported extension");
                continue;
            }
        };

        documents.push(RawDocument {
            document_type,
            source,
            payload,
        });
    }
    Ok(())
}
