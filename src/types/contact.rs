//! Contact block type for the contact-detail feed

/// One separator-delimited block of the contact-detail feed
///
/// A block is the ordered list of `Key: value` pairs that appeared between
/// two separator lines. Keys may repeat within a block; pairs are kept in
/// feed order so that later occurrences win when the block is merged into a
/// record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactBlock {
    /// Key/value pairs in the order they appeared in the feed
    pub pairs: Vec<(String, String)>,
}

impl ContactBlock {
    /// Create an empty block
    pub fn new() -> Self {
        ContactBlock { pairs: Vec::new() }
    }

    /// Append one key/value pair to the block
    pub fn push(&mut self, key: String, value: String) {
        self.pairs.push((key, value));
    }

    /// Whether the block holds no pairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Look up the value for a key, honoring last-occurrence-wins
    ///
    /// # Arguments
    ///
    /// * `key` - The exact key to look up
    ///
    /// # Returns
    ///
    /// The value of the last pair with that key, or `None` if the key never
    /// appears in the block.
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
