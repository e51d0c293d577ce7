//! Sequential, fail-fast batch processing over issue keys.

use std::future::Future;

use thiserror::Error;
use tracing::{debug, warn};

use crate::api::ApiError;

/// A batch stopped at its first failure.
///
/// Keys after `failed_key` were not attempted.
#[derive(Debug, Error)]
#[error("failed on {failed_key} after {} processed: {source}", .processed.len())]
pub struct BatchError {
    /// Keys the action succeeded on, in order.
    pub processed: Vec<String>,
    /// The key the action failed on.
    pub failed_key: String,
    #[source]
    pub source: ApiError,
}

/// Apply `action` to each key in order, one at a time.
///
/// Stops at the first error. On success returns every key, in order.
pub async fn for_each_issue<F, Fut>(keys: &[String], mut action: F) -> Result<Vec<String>, BatchError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    let mut processed = Vec::with_capacity(keys.len());

    for key in keys {
        debug!(issue_key = %key, "Processing issue {}/{}", processed.len() + 1, keys.len());

        if let Err(source) = action(key.clone()).await {
            warn!(issue_key = %key, "Batch stopped: {}", source);
            return Err(BatchError {
                processed,
                failed_key: key.clone(),
                source,
            });
        }
        processed.push(key.clone());
    }

    Ok(processed)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_succeed_in_order() {
        let seen = RefCell::new(Vec::new());
        let input = keys(&["JIWA-1", "JIWA-2", "JIWA-3"]);

        let result = tokio_test::block_on(for_each_issue(&input, |key| {
            seen.borrow_mut().push(key);
            async { Ok(()) }
        }));

        assert_eq!(result.unwrap(), input);
        assert_eq!(*seen.borrow(), input);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let seen = RefCell::new(Vec::new());
        let input = keys(&["JIWA-1", "JIWA-2", "JIWA-3"]);

        let result = tokio_test::block_on(for_each_issue(&input, |key| {
            seen.borrow_mut().push(key.clone());
            async move {
                if key == "JIWA-2" {
                    Err(ApiError::InvalidInput("boom".to_string()))
                } else {
                    Ok(())
                }
            }
        }));

        let err = result.unwrap_err();
        assert_eq!(err.processed, keys(&["JIWA-1"]));
        assert_eq!(err.failed_key, "JIWA-2");
        assert_eq!(*seen.borrow(), keys(&["JIWA-1", "JIWA-2"]));
        assert!(err.to_string().starts_with("failed on JIWA-2 after 1 processed"));
    }

    #[test]
    fn test_empty_batch() {
        let result = tokio_test::block_on(for_each_issue(&[], |_| async { Ok(()) }));
        assert!(result.unwrap().is_empty());
    }
}
