//! Contact importer module
//!
//! This module merges contact-detail blocks into the supporter cache. Each
//! block is resolved to a canonical entity key by an injected
//! [`EntityResolver`], then its recognized fields are merged into the
//! record for that key.
//!
//! The importer is deliberately tolerant: blocks missing the name fields,
//! and blocks the resolver cannot place, are logged and skipped rather than
//! failing the run. A sparse block simply contributes fewer attributes.

use crate::core::SupporterCache;
use crate::types::{ContactBlock, ContactField};
use log::{debug, warn};

/// Fixed mapping from contact-feed field names to record attributes
///
/// Feed fields not listed here are ignored. Street lines are handled
/// separately because they are numbered and assembled into one multi-line
/// address.
const FIELD_MAP: &[(&str, ContactField)] = &[
    ("DisplayName", ContactField::DisplayName),
    ("AddressName", ContactField::AddressName),
    ("FirstName", ContactField::FirstName),
    ("LastName", ContactField::LastName),
    ("Email", ContactField::Email),
    ("City", ContactField::City),
    ("State", ContactField::Region),
    ("PostCode", ContactField::PostalCode),
    ("CountryCode", ContactField::CountryCode),
    ("Country", ContactField::CountryName),
    ("PayerCountry", ContactField::PayerCountry),
];

/// Resolves a contact block to a canonical entity key
///
/// In production this seam is backed by the entity-resolution service; the
/// importer only requires that a resolver either names the entity behind a
/// block or declines it. Declined blocks are never inserted into the cache.
pub trait EntityResolver {
    /// Resolve a block to an entity key
    ///
    /// # Arguments
    ///
    /// * `block` - The contact block to resolve
    /// * `display_hint` - The "first last" name derived from the block
    ///
    /// # Returns
    ///
    /// The canonical entity key, or `None` if the block cannot be placed
    fn resolve(&self, block: &ContactBlock, display_hint: &str) -> Option<String>;
}

/// Resolver that reads the entity key from the block itself
///
/// Feeds exported with resolution already applied carry the key in an
/// `Entity` field; this resolver simply reads it back.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldResolver;

impl EntityResolver for FieldResolver {
    fn resolve(&self, block: &ContactBlock, _display_hint: &str) -> Option<String> {
        block.value_of("Entity").map(str::to_string)
    }
}

/// Merges contact blocks into supporter records
///
/// The importer owns its resolver and writes into a caller-supplied cache,
/// so the same cache can afterwards receive the payment fold pass.
pub struct ContactImporter<R: EntityResolver> {
    /// Collaborator that maps blocks to entity keys
    resolver: R,
}

impl<R: EntityResolver> ContactImporter<R> {
    /// Create a new importer around the given resolver
    pub fn new(resolver: R) -> Self {
        ContactImporter { resolver }
    }

    /// Merge a sequence of blocks into the cache
    ///
    /// # Arguments
    ///
    /// * `cache` - The supporter cache to merge into
    /// * `blocks` - The parsed contact blocks, in feed order
    ///
    /// # Returns
    ///
    /// The number of blocks that were merged (resolved blocks with both
    /// name fields present)
    pub fn import(&self, cache: &mut SupporterCache, blocks: &[ContactBlock]) -> usize {
        let mut merged = 0;
        for block in blocks {
            if self.import_block(cache, block) {
                merged += 1;
            }
        }
        merged
    }

    /// Merge one block into the cache
    ///
    /// Returns `true` if the block was merged, `false` if it was dropped
    /// (missing name fields or unresolved).
    fn import_block(&self, cache: &mut SupporterCache, block: &ContactBlock) -> bool {
        let (first, last) = match (block.value_of("FirstName"), block.value_of("LastName")) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                debug!("dropping contact block without both name fields");
                return false;
            }
        };
        let display_hint = format!("{} {}", first, last);

        let entity = match self.resolver.resolve(block, &display_hint) {
            Some(entity) => entity,
            None => {
                warn!("no entity resolved for contact '{}'", display_hint);
                return false;
            }
        };

        let record = cache.get_or_create(&entity);
        for (key, value) in &block.pairs {
            if let Some(&(_, field)) = FIELD_MAP.iter().find(|(name, _)| name == key) {
                record.set_field(field, value.clone());
            }
        }
        // An explicit DisplayName field wins; the name hint only fills a gap.
        if record.display_name.is_none() {
            record.set_field(ContactField::DisplayName, display_hint);
        }

        if let Some(address) = collect_address(block) {
            record.postal_address = Some(address);
        }
        true
    }
}

/// Assemble the postal address from numbered street-line fields
///
/// Street lines run `Street1`, `Street2`, ... contiguously from 1; the
/// first gap ends the address. Each line is trimmed and the lines are
/// joined with newlines.
///
/// # Returns
///
/// The joined address, or `None` if the block holds no street lines at all
fn collect_address(block: &ContactBlock) -> Option<String> {
    let mut lines = Vec::new();
    for number in 1.. {
        match block.value_of(&format!("Street{}", number)) {
            Some(line) => lines.push(line.trim().to_string()),
            None => break,
        }
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
