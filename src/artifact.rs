//! Name-keyed artifact generation with the dedup gate.

use crate::encoder::{CodeEncoder, QrEncoder, encode_png};
use crate::error::{ProcessError, ProcessResult};
use crate::model::Artifact;
use crate::utils::artifact_file_name;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Names that already produced an artifact.
///
/// Owned by the caller; pass the same set to several runs to dedup across files.
#[derive(Debug, Clone, Default)]
pub struct SeenNames {
    names: HashSet<String>,
}

impl SeenNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns `false` when the name was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub struct ArtifactGenerator<E = QrEncoder> {
    encoder: E,
}

impl Default for ArtifactGenerator<QrEncoder> {
    fn default() -> Self {
        Self::new(QrEncoder::default())
    }
}

impl<E: CodeEncoder> ArtifactGenerator<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    /// Produces `output_folder/{name}.png` for the first occurrence of `name`.
    ///
    /// Returns `Ok(None)` without touching the filesystem when the name was
    /// already seen, even if `data` differs from the first occurrence.
    pub fn generate(
        &self,
        name: &str,
        data: &str,
        output_folder: &Path,
        seen: &mut SeenNames,
    ) -> ProcessResult<Option<Artifact>> {
        if !seen.insert(name) {
            debug!(name, "artifact already produced");
            return Ok(None);
        }
        let file_name = artifact_file_name(name);

        let image = self
            .encoder
            .render(data)
            .map_err(|source| ProcessError::Encode {
                name: name.to_string(),
                source,
            })?;
        let png = encode_png(&image).map_err(|source| ProcessError::Image {
            name: name.to_string(),
            source,
        })?;

        let path = output_folder.join(&file_name);
        fs::write(&path, &png).map_err(|source| ProcessError::io(&path, source))?;
        debug!(name, path = %path.display(), bytes = png.len(), "artifact written");

        Ok(Some(Artifact {
            name: name.to_string(),
            file_name,
            width: image.width(),
            height: image.height(),
            path,
            png,
        }))
    }
}

/// Convenience wrapper using the default QR encoder.
pub fn generate(
    name: &str,
    data: &str,
    output_folder: &Path,
    seen: &mut SeenNames,
) -> ProcessResult<Option<Artifact>> {
    ArtifactGenerator::default().generate(name, data, output_folder, seen)
}
