//! Extractor registry: bank key to extractor lookup
//!
//! The registry is populated once at startup from the fixed table of
//! built-in extractors and exposes no mutation API afterwards, so lookups
//! need no locking.

use std::collections::BTreeMap;
use std::sync::Arc;

use stex_common::{Error, Result};

use crate::extractors::{self, BankExtractor};

/// Process-wide mapping from bank key to extractor implementation
pub struct ExtractorRegistry {
    entries: BTreeMap<&'static str, Arc<dyn BankExtractor>>,
}

impl ExtractorRegistry {
    /// Build a registry from a list of extractors.
    ///
    /// Duplicate keys are a startup configuration error: every registered
    /// key must map to exactly one implementation.
    pub fn new(extractors: Vec<Arc<dyn BankExtractor>>) -> Result<Self> {
        let mut entries: BTreeMap<&'static str, Arc<dyn BankExtractor>> = BTreeMap::new();
        for extractor in extractors {
            let key = extractor.key();
            if entries.insert(key, extractor).is_some() {
                return Err(Error::Config(format!("Duplicate extractor key: {}", key)));
            }
        }
        Ok(Self { entries })
    }

    /// Registry holding all built-in bank extractors
    pub fn with_builtin_banks() -> Result<Self> {
        Self::new(extractors::builtin())
    }

    /// Look up the extractor for a bank key
    pub fn resolve(&self, bank_key: &str) -> Result<Arc<dyn BankExtractor>> {
        self.entries
            .get(bank_key)
            .cloned()
            .ok_or_else(|| Error::UnknownBank {
                bank: bank_key.to_string(),
                known: self.entries.keys().copied().collect::<Vec<_>>().join(", "),
            })
    }

    /// Registered bank keys in sorted order
    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Registered extractors in key order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn BankExtractor>> {
        self.entries.values()
    }

    /// Number of registered extractors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no extractors are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::ExtractError;
    use std::path::Path;
    use stex_common::StatementTable;

    struct StubExtractor {
        key: &'static str,
    }

    impl BankExtractor for StubExtractor {
        fn key(&self) -> &'static str {
            self.key
        }

        fn label(&self) -> &'static str {
            "Stub Bank"
        }

        fn extract(&self, _path: &Path) -> std::result::Result<StatementTable, ExtractError> {
            Ok(StatementTable::new(vec!["fecha".to_string()]))
        }
    }

    #[test]
    fn resolves_every_builtin_key() {
        let registry = ExtractorRegistry::with_builtin_banks().unwrap();
        assert!(!registry.is_empty());
        for key in registry.keys() {
            assert!(registry.resolve(key).is_ok(), "key {} should resolve", key);
        }
    }

    #[test]
    fn unknown_key_error_names_the_key() {
        let registry = ExtractorRegistry::with_builtin_banks().unwrap();
        let err = registry.resolve("banco_inexistente").unwrap_err();
        match err {
            Error::UnknownBank { bank, known } => {
                assert_eq!(bank, "banco_inexistente");
                assert!(known.contains("banco_galicia"));
            }
            other => panic!("Expected UnknownBank, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_keys_are_rejected_at_construction() {
        let result = ExtractorRegistry::new(vec![
            Arc::new(StubExtractor { key: "twice" }) as Arc<dyn BankExtractor>,
            Arc::new(StubExtractor { key: "twice" }),
        ]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn keys_are_sorted() {
        let registry = ExtractorRegistry::with_builtin_banks().unwrap();
        let keys = registry.keys();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }
}
