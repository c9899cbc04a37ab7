//! Declarations keyed by resource reference

use super::types::ApiDeclaration;
use indexmap::IndexMap;

/// How a loader derives map keys from listing reference paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyConvention {
    /// Every `/` removed ("/pets" is stored as "pets"); remote loads
    StripSeparators,
    /// Reference path kept as-is; local loads
    Raw,
}

impl KeyConvention {
    pub fn key_for(&self, reference_path: &str) -> String {
        match self {
            KeyConvention::StripSeparators => reference_path.replace('/', ""),
            KeyConvention::Raw => reference_path.to_string(),
        }
    }
}

/// API declarations in the order they were loaded
///
/// The map remembers the key convention of the loader that filled it,
/// so lookups by reference path work whichever loader was used.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationMap {
    convention: KeyConvention,
    entries: IndexMap<String, ApiDeclaration>,
}

impl DeclarationMap {
    pub fn new(convention: KeyConvention) -> Self {
        Self {
            convention,
            entries: IndexMap::new(),
        }
    }

    pub fn convention(&self) -> KeyConvention {
        self.convention
    }

    /// Map key used for a listing reference path
    pub fn key_for(&self, reference_path: &str) -> String {
        self.convention.key_for(reference_path)
    }

    /// Insert the declaration of a listing reference
    ///
    /// Returns the previous declaration stored under the same key, if any.
    pub fn insert(
        &mut self,
        reference_path: &str,
        declaration: ApiDeclaration,
    ) -> Option<ApiDeclaration> {
        let key = self.key_for(reference_path);
        self.entries.insert(key, declaration)
    }

    /// Declaration for a listing reference path
    pub fn lookup(&self, reference_path: &str) -> Option<&ApiDeclaration> {
        self.entries.get(&self.key_for(reference_path))
    }

    /// Declaration by stored key
    pub fn get(&self, key: &str) -> Option<&ApiDeclaration> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stored keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_conventions() {
        assert_eq!(KeyConvention::StripSeparators.key_for("/pets"), "pets");
        assert_eq!(KeyConvention::StripSeparators.key_for("/pets/v2/"), "petsv2");
        assert_eq!(KeyConvention::Raw.key_for("/pets"), "/pets");
    }

    #[test]
    fn test_lookup_applies_convention() {
        let mut remote = DeclarationMap::new(KeyConvention::StripSeparators);
        remote.insert("/pets", ApiDeclaration::default());
        assert!(remote.contains_key("pets"));
        assert!(remote.lookup("/pets").is_some());

        let mut local = DeclarationMap::new(KeyConvention::Raw);
        local.insert("/pets", ApiDeclaration::default());
        assert!(local.contains_key("/pets"));
        assert!(!local.contains_key("pets"));
        assert!(local.lookup("/pets").is_some());
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let mut map = DeclarationMap::new(KeyConvention::Raw);
        for path in ["/zoo", "/pets", "/owners"] {
            map.insert(path, ApiDeclaration::default());
        }
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["/zoo", "/pets", "/owners"]);
        assert_eq!(map.len(), 3);
    }
}
