//! Export of generated websites to disk.
//!
//! Writes the composed standalone document next to a JSON snapshot of the
//! artifact, so a later invocation can resume improving it.

use std::path::{Path, PathBuf};

use thiserror::Error;

use sitecraft_core::render::{compose_document, export_filename, snapshot_filename};
use sitecraft_types::artifact::WebsiteArtifact;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid artifact snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Write the composed document to `dir/<export_filename>`.
///
/// Creates `dir` if needed and returns the written path.
pub async fn write_document(dir: &Path, artifact: &WebsiteArtifact) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_filename(&artifact.title));
    write_document_to(&path, artifact).await?;
    Ok(path)
}

/// Write the composed document to an exact path.
pub async fn write_document_to(path: &Path, artifact: &WebsiteArtifact) -> Result<(), ExportError> {
    write(path, compose_document(artifact)).await?;
    tracing::debug!(path = %path.display(), "wrote website document");
    Ok(())
}

/// Write the artifact snapshot to `dir/<slug>.artifact.json`.
pub async fn write_artifact_json(
    dir: &Path,
    artifact: &WebsiteArtifact,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(snapshot_filename(&artifact.title));
    write_artifact_json_to(&path, artifact).await?;
    Ok(path)
}

/// Write the artifact snapshot to an exact path.
pub async fn write_artifact_json_to(
    path: &Path,
    artifact: &WebsiteArtifact,
) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(artifact).map_err(|source| ExportError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    write(path, json).await?;
    tracing::debug!(path = %path.display(), "wrote artifact snapshot");
    Ok(())
}

/// Read an artifact snapshot written by [`write_artifact_json`].
///
/// Also accepts the `html`/`css`/`js` key spelling.
pub async fn read_artifact_json(path: &Path) -> Result<WebsiteArtifact, ExportError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&content).map_err(|source| ExportError::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}

async fn write(path: &Path, content: String) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    tokio::fs::write(path, content).await.map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn artifact() -> WebsiteArtifact {
        WebsiteArtifact {
            markup: "<h1>Sweet Crumbs</h1>".to_string(),
            style: "h1{color:#a52}".to_string(),
            script: String::new(),
            title: "Sweet Crumbs Bakery".to_string(),
            description: "Bakery".to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_document_uses_title_slug() {
        let tmp = TempDir::new().unwrap();
        let path = write_document(tmp.path(), &artifact()).await.unwrap();

        assert_eq!(path, tmp.path().join("sweet-crumbs-bakery.html"));
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, compose_document(&artifact()));
    }

    #[tokio::test]
    async fn test_snapshot_round_trip_creates_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("out");
        let path = write_artifact_json(&dir, &artifact()).await.unwrap();

        assert_eq!(path.file_name().unwrap(), "sweet-crumbs-bakery.artifact.json");
        assert_eq!(read_artifact_json(&path).await.unwrap(), artifact());
    }

    #[tokio::test]
    async fn test_read_accepts_wire_key_spelling() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.json");
        tokio::fs::write(&path, r#"{"html":"<p/>","css":"p{}","js":"","title":"T"}"#)
            .await
            .unwrap();

        let a = read_artifact_json(&path).await.unwrap();
        assert_eq!(a.markup, "<p/>");
        assert_eq!(a.style, "p{}");
        assert_eq!(a.description, "");
    }

    #[tokio::test]
    async fn test_write_to_exact_paths_ignores_title() {
        let tmp = TempDir::new().unwrap();
        let doc = tmp.path().join("bakery.html");
        let snap = tmp.path().join("bakery.artifact.json");
        write_document_to(&doc, &artifact()).await.unwrap();
        write_artifact_json_to(&snap, &artifact()).await.unwrap();

        assert!(doc.exists());
        assert_eq!(read_artifact_json(&snap).await.unwrap(), artifact());
        assert!(!tmp.path().join("sweet-crumbs-bakery.html").exists());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_artifact_json(&tmp.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[tokio::test]
    async fn test_read_garbage_is_snapshot_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        tokio::fs::write(&path, "not json").await.unwrap();
        let err = read_artifact_json(&path).await.unwrap_err();
        assert!(matches!(err, ExportError::Snapshot { .. }));
    }
}
