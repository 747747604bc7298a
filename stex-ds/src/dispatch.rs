//! Dispatch: resolve a bank key and run its extractor
//!
//! Extractors are black boxes from this layer's point of view: synchronous,
//! possibly slow parsers, so they run on the blocking thread pool. Any
//! failure they raise, including a panic, is wrapped as an extractor error
//! carrying the bank key; nothing reaches the transport layer as an
//! unhandled fault.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use stex_common::{Error, Result, StatementTable};

use crate::extractors::BankExtractor;
use crate::registry::ExtractorRegistry;

/// Resolve `bank_key` and run its extractor against the file at `path`
pub async fn dispatch(
    registry: &ExtractorRegistry,
    bank_key: &str,
    path: &Path,
) -> Result<StatementTable> {
    let extractor = registry.resolve(bank_key)?;
    invoke(extractor, bank_key, path).await
}

/// Run an already-resolved extractor against the file at `path`
pub async fn invoke(
    extractor: Arc<dyn BankExtractor>,
    bank_key: &str,
    path: &Path,
) -> Result<StatementTable> {
    let bank = bank_key.to_string();
    let input = path.to_path_buf();

    let outcome = tokio::task::spawn_blocking(move || extractor.extract(&input)).await;

    match outcome {
        Ok(Ok(table)) => {
            info!("Extracted {} rows for bank '{}'", table.row_count(), bank);
            Ok(table)
        }
        Ok(Err(e)) => {
            warn!("Extractor '{}' failed: {}", bank, e);
            Err(Error::Extractor {
                bank,
                message: e.to_string(),
            })
        }
        Err(join_err) => {
            let message = if join_err.is_panic() {
                "extractor panicked while parsing the file".to_string()
            } else {
                join_err.to_string()
            };
            warn!("Extractor '{}' aborted: {}", bank, message);
            Err(Error::Extractor { bank, message })
        }
    }
}
