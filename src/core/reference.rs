/// The cleaned reference sequence: uppercase `A`, `C`, `G`, `T` only.
///
/// Immutable once loaded; replay reads it through [`ReferenceStore::window`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceStore {
    bases: Vec<u8>,
}

impl ReferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from text, cleaning it the same way as a loaded line.
    #[must_use]
    pub fn from_sequence(sequence: &[u8]) -> Self {
        let mut store = Self::new();
        store.push_cleaned(sequence);
        store
    }

    /// Append one line of sequence, upper-casing it and dropping every
    /// character that is not `A`, `C`, `G` or `T`.
    pub fn push_cleaned(&mut self, line: &[u8]) {
        self.bases.extend(
            line.iter()
                .map(u8::to_ascii_uppercase)
                .filter(|b| matches!(b, b'A' | b'C' | b'G' | b'T')),
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    /// `length` bases starting at `start`, or `None` if any part lies
    /// outside the reference
    #[must_use]
    pub fn window(&self, start: usize, length: usize) -> Option<&[u8]> {
        let end = start.checked_add(length)?;
        self.bases.get(start..end)
    }
}
