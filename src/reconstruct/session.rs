use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::core::metadata::Metadata;
use crate::core::reference::ReferenceStore;
use crate::core::types::{EditScript, LineLayout};
use crate::parsing::compressed::{parse_compressed_file, CompressedTarget};
use crate::parsing::reference::parse_reference_file;
use crate::reconstruct::engine::reconstruct_raw;
use crate::reconstruct::overlay::OverlayPipeline;
use crate::reconstruct::{ReconstructError, SessionError};
use crate::utils::validation::DEFAULT_MAX_SEQUENCE_LENGTH;

/// Configuration for one reconstruction
#[derive(Debug, Clone)]
pub struct ReconstructionConfig {
    /// Longest reference or target sequence accepted
    pub max_sequence_length: usize,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
        }
    }
}

/// What a reconstruction produced, for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconstructionSummary {
    pub header: String,
    pub reference_length: usize,
    pub mismatch_records: usize,
    pub literal_bases: usize,
    pub raw_length: usize,
    pub special_chars: usize,
    pub n_bases: usize,
    pub lowercase_bases: usize,
    pub final_length: usize,

    /// MD5 of the final sequence exactly as written (case preserved)
    pub md5: String,
}

/// The final sequence with what the writer needs to reproduce the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    pub header: Vec<u8>,
    pub line_layout: LineLayout,
    pub sequence: Vec<u8>,
    pub summary: ReconstructionSummary,
}

/// All inputs of one invocation: reference, metadata, edit script and
/// configuration. Nothing is shared between sessions.
#[derive(Debug, Clone)]
pub struct ReconstructionSession {
    reference: ReferenceStore,
    compressed: CompressedTarget,
    config: ReconstructionConfig,
}

impl ReconstructionSession {
    #[must_use]
    pub fn new(
        reference: ReferenceStore,
        compressed: CompressedTarget,
        config: ReconstructionConfig,
    ) -> Self {
        Self {
            reference,
            compressed,
            config,
        }
    }

    /// Load both input files. Both are fully parsed before anything is
    /// replayed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Parse` labeled with the file that failed.
    pub fn from_files(
        reference_path: &Path,
        compressed_path: &Path,
        config: ReconstructionConfig,
    ) -> Result<Self, SessionError> {
        let reference = parse_reference_file(reference_path, config.max_sequence_length)
            .map_err(|source| SessionError::Parse {
                path: reference_path.to_path_buf(),
                source,
            })?;
        info!("Loaded reference: {} bases", reference.len());

        let compressed =
            parse_compressed_file(compressed_path).map_err(|source| SessionError::Parse {
                path: compressed_path.to_path_buf(),
                source,
            })?;
        info!(
            "Parsed compressed target: {} edit records",
            compressed.edit_script.len()
        );

        Ok(Self::new(reference, compressed, config))
    }

    #[must_use]
    pub fn reference(&self) -> &ReferenceStore {
        &self.reference
    }

    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.compressed.metadata
    }

    #[must_use]
    pub fn edit_script(&self) -> &EditScript {
        &self.compressed.edit_script
    }

    #[must_use]
    pub fn config(&self) -> &ReconstructionConfig {
        &self.config
    }

    /// Replay the edit script and apply the overlays.
    ///
    /// # Errors
    ///
    /// Returns the first `ReconstructError`; there is no partial output.
    pub fn run(&self) -> Result<Reconstruction, ReconstructError> {
        let metadata = self.metadata();
        let max_length = self.config.max_sequence_length;

        let raw = reconstruct_raw(
            &self.reference,
            metadata.initial_offset,
            metadata.initial_copy_length(),
            self.edit_script(),
            max_length,
        )?;
        let raw_length = raw.len();
        info!("Replayed {} edit records into {raw_length} bases", self.edit_script().len());

        let (sequence, stats) = OverlayPipeline::new(metadata, max_length).run(raw)?;
        info!("Final sequence: {} characters", sequence.len());

        let summary = ReconstructionSummary {
            header: metadata.header_lossy(),
            reference_length: self.reference.len(),
            mismatch_records: self.edit_script().len(),
            literal_bases: self.edit_script().literal_bases(),
            raw_length,
            special_chars: stats.special_chars,
            n_bases: stats.n_bases,
            lowercase_bases: stats.lowercase_bases,
            final_length: sequence.len(),
            md5: format!("{:x}", md5::compute(&sequence)),
        };

        Ok(Reconstruction {
            header: metadata.header.clone(),
            line_layout: metadata.line_layout.clone(),
            sequence,
            summary,
        })
    }
}

/// Load both files and reconstruct, labeling any failure with the file it
/// belongs to.
///
/// # Errors
///
/// Returns `SessionError::Parse` for unreadable or malformed inputs and
/// `SessionError::Reconstruct` (labeled with the compressed file) if replay
/// or overlays fail.
pub fn reconstruct_files(
    reference_path: &Path,
    compressed_path: &Path,
    config: ReconstructionConfig,
) -> Result<Reconstruction, SessionError> {
    let session = ReconstructionSession::from_files(reference_path, compressed_path, config)?;
    session.run().map_err(|source| SessionError::Reconstruct {
        path: compressed_path.to_path_buf(),
        source,
    })
}
