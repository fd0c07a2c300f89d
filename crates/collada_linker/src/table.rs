//! Identifier-keyed library tables
//!
//! Each library category (images, effects, materials, ...) is linked into a
//! `LibraryTable`: an immutable mapping from string key to a shared, resolved
//! entity. Tables also centralize the two addressing conventions of the
//! format: bare-key lookup and URI-fragment lookup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Library, LinkError};

/// A record that carries a lookup key.
///
/// Implemented per concrete record type (most key on an `id` field, inputs
/// key on their `semantic`), so key extraction is resolved at compile time.
pub trait Keyed {
    /// The key under which this record is registered in its table.
    fn key(&self) -> &str;
}

/// An immutable mapping from string key to a shared resolved entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryTable<T> {
    entries: HashMap<String, Arc<T>>,
}

impl<T> LibraryTable<T> {
    /// Build a table from an ordered sequence of raw records.
    ///
    /// Each record is converted through `link`; conversion failures abort
    /// the build. Two records sharing a key is an authoring error and fails
    /// with [`LinkError::DuplicateKey`].
    pub fn build<R, F>(records: &[R], library: Library, mut link: F) -> Result<Self, LinkError>
    where
        R: Keyed,
        F: FnMut(&R) -> Result<T, LinkError>,
    {
        let mut entries = HashMap::with_capacity(records.len());
        for record in records {
            let key = record.key();
            if entries.contains_key(key) {
                return Err(LinkError::DuplicateKey {
                    key: key.to_string(),
                    library,
                });
            }
            let entity = link(record)?;
            entries.insert(key.to_string(), Arc::new(entity));
        }
        Ok(Self { entries })
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&Arc<T>> {
        self.entries.get(key)
    }

    /// Resolve a bare-key reference, failing if the key is absent.
    pub fn resolve(&self, key: &str, library: Library) -> Result<Arc<T>, LinkError> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| LinkError::UnresolvedReference {
                reference: key.to_string(),
                library,
            })
    }

    /// Resolve a fragment-addressed reference: the key is the substring
    /// after `#`. A value carrying no fragment cannot resolve and is
    /// reported with the full reference string.
    pub fn resolve_fragment(&self, url: &str, library: Library) -> Result<Arc<T>, LinkError> {
        match fragment(url) {
            Some(key) => self.resolve(key, library),
            None => Err(LinkError::UnresolvedReference {
                reference: url.to_string(),
                library,
            }),
        }
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, entity)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<T>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over the table's keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Index records by key without taking ownership.
///
/// Used for transient per-element lookups (e.g. a triangle batch's inputs
/// by semantic) where building a full table would be wasted work. Later
/// records shadow earlier ones on duplicate keys.
pub fn index<R: Keyed>(records: &[R]) -> HashMap<&str, &R> {
    records.iter().map(|record| (record.key(), record)).collect()
}

/// Fragment of a URI-like reference: the substring after `#`.
fn fragment(url: &str) -> Option<&str> {
    url.split_once('#').map(|(_, frag)| frag)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        id: String,
        value: u32,
    }

    impl Keyed for Record {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn record(id: &str, value: u32) -> Record {
        Record {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_build_and_get() {
        let records = vec![record("a", 1), record("b", 2)];
        let table = LibraryTable::build(&records, Library::Images, |r| Ok(r.value)).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(**table.get("a").unwrap(), 1);
        assert_eq!(**table.get("b").unwrap(), 2);
        assert!(table.get("c").is_none());
    }

    #[test]
    fn test_duplicate_key_fails() {
        let records = vec![record("a", 1), record("a", 2)];
        let err = LibraryTable::build(&records, Library::Images, |r| Ok(r.value)).unwrap_err();

        assert_eq!(
            err,
            LinkError::DuplicateKey {
                key: "a".to_string(),
                library: Library::Images,
            }
        );
    }

    #[test]
    fn test_conversion_error_propagates() {
        let records = vec![record("a", 1)];
        let err = LibraryTable::<u32>::build(&records, Library::Effects, |_| {
            Err(LinkError::UnresolvedReference {
                reference: "tex".to_string(),
                library: Library::Images,
            })
        })
        .unwrap_err();

        assert!(matches!(err, LinkError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_resolve_bare_key() {
        let records = vec![record("mat1", 7)];
        let table = LibraryTable::build(&records, Library::Materials, |r| Ok(r.value)).unwrap();

        assert_eq!(*table.resolve("mat1", Library::Materials).unwrap(), 7);

        let err = table.resolve("mat2", Library::Materials).unwrap_err();
        assert_eq!(
            err,
            LinkError::UnresolvedReference {
                reference: "mat2".to_string(),
                library: Library::Materials,
            }
        );
    }

    #[test]
    fn test_resolve_fragment() {
        let records = vec![record("eff1", 3)];
        let table = LibraryTable::build(&records, Library::Effects, |r| Ok(r.value)).unwrap();

        assert_eq!(*table.resolve_fragment("#eff1", Library::Effects).unwrap(), 3);

        // The error names the extracted key, not the raw URL.
        let err = table.resolve_fragment("#eff2", Library::Effects).unwrap_err();
        assert_eq!(
            err,
            LinkError::UnresolvedReference {
                reference: "eff2".to_string(),
                library: Library::Effects,
            }
        );
    }

    #[test]
    fn test_resolve_fragment_without_hash_fails() {
        let records = vec![record("eff1", 3)];
        let table = LibraryTable::build(&records, Library::Effects, |r| Ok(r.value)).unwrap();

        let err = table.resolve_fragment("eff1", Library::Effects).unwrap_err();
        assert_eq!(
            err,
            LinkError::UnresolvedReference {
                reference: "eff1".to_string(),
                library: Library::Effects,
            }
        );
    }

    #[test]
    fn test_index_by_semantic_style_key() {
        let records = vec![record("VERTEX", 0), record("NORMAL", 1)];
        let indexed = index(&records);

        assert_eq!(indexed.get("VERTEX").unwrap().value, 0);
        assert_eq!(indexed.get("NORMAL").unwrap().value, 1);
        assert!(!indexed.contains_key("TEXCOORD"));
    }
}
