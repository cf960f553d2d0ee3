use tracing::debug;

use crate::core::reference::ReferenceStore;
use crate::core::types::{Base, EditScript, Mismatch};
use crate::reconstruct::ReconstructError;
use crate::utils::validation::check_sequence_length;

/// Replays an edit script against a reference.
///
/// The engine owns the only cursor into the reference and the append-only
/// raw output. Record 0 is the initial copy; mismatch `i` is record `i + 1`.
pub struct ReconstructionEngine<'a> {
    reference: &'a ReferenceStore,
    ref_cursor: usize,
    out: Vec<u8>,
    record: usize,
    max_length: usize,
}

impl<'a> ReconstructionEngine<'a> {
    /// Create an engine with its cursor at `initial_offset`.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructError::CursorOutOfBounds` if the offset lies
    /// outside the reference.
    pub fn new(
        reference: &'a ReferenceStore,
        initial_offset: i64,
        max_length: usize,
    ) -> Result<Self, ReconstructError> {
        let ref_cursor = usize::try_from(initial_offset)
            .ok()
            .filter(|&c| c <= reference.len())
            .ok_or(ReconstructError::CursorOutOfBounds {
                record: 0,
                position: i128::from(initial_offset),
                reference_len: reference.len(),
            })?;

        Ok(Self {
            reference,
            ref_cursor,
            out: Vec::new(),
            record: 0,
            max_length,
        })
    }

    /// Current reference cursor
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.ref_cursor
    }

    /// Raw output produced so far
    #[must_use]
    pub fn output(&self) -> &[u8] {
        &self.out
    }

    /// Copy `length` bases from the cursor and advance it by the same amount.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructError::NegativeCopyLength` for a negative length,
    /// `ReconstructError::CopyOutOfBounds` if the copy runs past the
    /// reference, or `ReconstructError::SequenceTooLong` if the output would
    /// exceed the configured maximum.
    pub fn copy_from_reference(&mut self, length: i64) -> Result<(), ReconstructError> {
        let length = usize::try_from(length).map_err(|_| ReconstructError::NegativeCopyLength {
            record: self.record,
            length,
        })?;

        let window = self.reference.window(self.ref_cursor, length).ok_or(
            ReconstructError::CopyOutOfBounds {
                record: self.record,
                start: self.ref_cursor,
                length,
                reference_len: self.reference.len(),
            },
        )?;
        self.ensure_capacity(length)?;

        self.out.extend_from_slice(window);
        self.ref_cursor += length;
        Ok(())
    }

    /// Append literal bases. The reference cursor does not move.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructError::SequenceTooLong` if the output would exceed
    /// the configured maximum.
    pub fn push_literals(&mut self, bases: &[Base]) -> Result<(), ReconstructError> {
        self.ensure_capacity(bases.len())?;
        self.out.extend(bases.iter().map(|b| b.as_byte()));
        Ok(())
    }

    /// Move the reference cursor by a signed offset. Moving backwards
    /// re-reads reference material and is allowed; leaving the reference is
    /// not.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructError::CursorOutOfBounds` if the new position is
    /// negative or beyond the end of the reference.
    pub fn seek(&mut self, offset: i64) -> Result<(), ReconstructError> {
        let target = i128::from(offset) + self.ref_cursor as i128;
        self.ref_cursor = usize::try_from(target)
            .ok()
            .filter(|&c| c <= self.reference.len())
            .ok_or(ReconstructError::CursorOutOfBounds {
                record: self.record,
                position: target,
                reference_len: self.reference.len(),
            })?;
        Ok(())
    }

    /// Replay one mismatch record: literals, cursor jump, reference copy.
    ///
    /// # Errors
    ///
    /// Any error from [`push_literals`](Self::push_literals),
    /// [`seek`](Self::seek) or [`copy_from_reference`](Self::copy_from_reference).
    pub fn apply(&mut self, mismatch: &Mismatch) -> Result<(), ReconstructError> {
        self.record += 1;
        self.push_literals(&mismatch.mismatched_bases)?;
        self.seek(mismatch.offset_from_prev)?;
        self.copy_from_reference(mismatch.copy_length())
    }

    /// Consume the engine and return the raw target
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.out
    }

    fn ensure_capacity(&self, additional: usize) -> Result<(), ReconstructError> {
        let new_len = self.out.len().saturating_add(additional);
        if check_sequence_length(new_len, self.max_length).is_some() {
            return Err(ReconstructError::SequenceTooLong {
                limit: self.max_length,
            });
        }
        Ok(())
    }
}

/// Replay a whole edit script, starting with the initial copy.
///
/// # Errors
///
/// Returns the first `ReconstructError` hit; there is no partial result.
pub fn reconstruct_raw(
    reference: &ReferenceStore,
    initial_offset: i64,
    initial_copy_length: i64,
    edit_script: &EditScript,
    max_length: usize,
) -> Result<Vec<u8>, ReconstructError> {
    let mut engine = ReconstructionEngine::new(reference, initial_offset, max_length)?;
    engine.copy_from_reference(initial_copy_length)?;

    for mismatch in edit_script {
        engine.apply(mismatch)?;
    }

    debug!(
        records = edit_script.len(),
        bases = engine.output().len(),
        cursor = engine.cursor(),
        "Replayed edit script"
    );
    Ok(engine.finish())
}
