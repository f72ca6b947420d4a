/// Copy of the pending output buffer taken at a known-good point (typically
/// right after the frame chrome was drawn). Restoring it replaces whatever is
/// buffered with these bytes, so a redraw only has to add the changing parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedScreen {
    bytes: Vec<u8>,
}

impl SavedScreen {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}
