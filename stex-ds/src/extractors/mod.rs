//! Built-in bank statement extractors
//!
//! Each extractor is a black box from the dispatcher's point of view: given
//! a file path it returns a table of transactions or fails. Most Argentine
//! bank exports are delimited text, covered by one shared parser configured
//! per bank in `profiles`. Banks with bespoke formats get their own
//! `BankExtractor` impl behind the same trait.

pub mod delimited;
pub mod profiles;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use stex_common::StatementTable;

/// Error raised by a bank extractor while parsing a statement file
#[derive(Error, Debug)]
pub enum ExtractError {
    /// I/O error (file read)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Statement content did not match the bank's format
    #[error("Parse error: {0}")]
    Parse(String),

    /// File is not a format this extractor understands
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// A per-bank statement parser.
///
/// Implementations are synchronous and may block on file I/O; the dispatch
/// layer runs them on the blocking thread pool. Extractors read the input
/// file but never mutate it.
pub trait BankExtractor: Send + Sync {
    /// Stable bank identifier used in requests ("banco_galicia")
    fn key(&self) -> &'static str;

    /// Human-readable institution name
    fn label(&self) -> &'static str;

    /// Parse the statement file at `path` into a table of transactions
    fn extract(&self, path: &Path) -> Result<StatementTable, ExtractError>;
}

impl std::fmt::Debug for dyn BankExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankExtractor")
            .field("key", &self.key())
            .field("label", &self.label())
            .finish()
    }
}

/// The fixed startup table of built-in extractors
pub fn builtin() -> Vec<Arc<dyn BankExtractor>> {
    profiles::PROFILES
        .iter()
        .map(|profile| {
            Arc::new(delimited::ProfileExtractor::new(profile)) as Arc<dyn BankExtractor>
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn builtin_keys_are_unique() {
        let extractors = builtin();
        let keys: BTreeSet<&'static str> = extractors.iter().map(|e| e.key()).collect();
        assert_eq!(keys.len(), extractors.len());
    }

    #[test]
    fn builtin_covers_the_supported_banks() {
        let extractors = builtin();
        let keys: Vec<&'static str> = extractors.iter().map(|e| e.key()).collect();
        assert!(keys.contains(&"banco_galicia"));
        assert!(keys.contains(&"santander_rio"));
        assert!(keys.contains(&"mercado_pago"));
        assert_eq!(extractors.len(), 18);
    }
}
