//! Row processing: generate one artifact per unique name, embed it beside its
//! data cell, and save the workbook once at the end.

use crate::artifact::{ArtifactGenerator, SeenNames};
use crate::encoder::{CodeEncoder, QrEncoder};
use crate::error::{ProcessError, ProcessResult};
use crate::model::{Artifact, EmbedRecord, RunSummary, SkipReason, SkippedRow, SourceRow};
use crate::placement::Placement;
use crate::utils::path_to_forward_slashes;
use crate::workbook::{DATA_COLUMN, SheetStore};
use std::fs;
use std::path::Path;
use tracing::{debug, info, info_span};

struct PendingEmbed {
    row: u32,
    artifact: Artifact,
    placement: Placement,
}

pub struct RowProcessor<E = QrEncoder> {
    generator: ArtifactGenerator<E>,
}

impl Default for RowProcessor<QrEncoder> {
    fn default() -> Self {
        Self::new(ArtifactGenerator::default())
    }
}

impl<E: CodeEncoder> RowProcessor<E> {
    pub fn new(generator: ArtifactGenerator<E>) -> Self {
        Self { generator }
    }

    pub fn process(
        &self,
        source_path: &Path,
        output_folder: &Path,
        seen: &mut SeenNames,
    ) -> ProcessResult<RunSummary> {
        let span = info_span!(
            "process",
            source = %source_path.display(),
            output = %output_folder.display()
        );
        let _enter = span.enter();

        let mut store = SheetStore::load(source_path)?;
        fs::create_dir_all(output_folder)
            .map_err(|source| ProcessError::io(output_folder, source))?;

        let rows = store.rows();
        info!(sheet = %store.sheet_name(), rows = rows.len(), "workbook loaded");

        let mut summary = RunSummary {
            source: path_to_forward_slashes(source_path),
            output_folder: path_to_forward_slashes(output_folder),
            rows_scanned: rows.len() as u32,
            ..RunSummary::default()
        };

        let pending = self.plan(&store, &rows, output_folder, seen, &mut summary)?;
        commit(&mut store, pending, &mut summary)?;

        info!(
            artifacts = summary.artifacts.len(),
            embeds = summary.embeds.len(),
            skipped = summary.skipped.len(),
            "workbook saved"
        );
        Ok(summary)
    }

    /// Writes artifacts and computes placements; the sheet is not touched.
    fn plan(
        &self,
        store: &SheetStore,
        rows: &[SourceRow],
        output_folder: &Path,
        seen: &mut SeenNames,
        summary: &mut RunSummary,
    ) -> ProcessResult<Vec<PendingEmbed>> {
        let mut pending = Vec::new();
        for source_row in rows {
            if !source_row.has_data() {
                debug!(row = source_row.row, "row skipped: no data");
                summary.skipped.push(SkippedRow {
                    row: source_row.row,
                    name: source_row.name.clone(),
                    reason: SkipReason::EmptyData,
                });
                continue;
            }

            let Some(artifact) = self.generator.generate(
                &source_row.name,
                &source_row.data,
                output_folder,
                seen,
            )?
            else {
                summary.skipped.push(SkippedRow {
                    row: source_row.row,
                    name: source_row.name.clone(),
                    reason: SkipReason::DuplicateName,
                });
                continue;
            };

            let layout = store.cell_layout(DATA_COLUMN, source_row.row);
            let placement = Placement::compute(layout, artifact.width, artifact.height);
            summary.artifacts.push(artifact.file_name.clone());
            pending.push(PendingEmbed {
                row: source_row.row,
                artifact,
                placement,
            });
        }
        Ok(pending)
    }
}

/// Applies every planned embed, then persists the workbook once.
fn commit(
    store: &mut SheetStore,
    pending: Vec<PendingEmbed>,
    summary: &mut RunSummary,
) -> ProcessResult<()> {
    for embed in pending {
        let PendingEmbed {
            row,
            artifact,
            placement,
        } = embed;
        // package part names must stay plain; artifact file names may carry `%`
        let media_name = format!("qr_code_row{row}.png");
        store.embed_image(&media_name, &artifact.png, &placement);
        summary.embeds.push(EmbedRecord {
            row,
            name: artifact.name,
            anchor: placement.anchor,
            width_px: placement.width_px,
            height_px: placement.height_px,
            artifact_width: artifact.width,
            artifact_height: artifact.height,
        });
    }
    store.save()
}

/// Processes `source_path` with the default QR encoder.
pub fn process(
    source_path: &Path,
    output_folder: &Path,
    seen: &mut SeenNames,
) -> ProcessResult<RunSummary> {
    RowProcessor::default().process(source_path, output_folder, seen)
}
