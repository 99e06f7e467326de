use crate::domain::errors::FetchError;
use crate::domain::ports::DocumentFetcher;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// In-memory page source keyed by address. Unknown addresses answer 404.
#[derive(Default)]
pub struct MockDocumentFetcher {
    pages: RwLock<HashMap<String, String>>,
}

impl MockDocumentFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, address: &str, content: &str) -> Self {
        self.insert(address, content);
        self
    }

    pub fn insert(&self, address: &str, content: &str) {
        self.pages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address.to_string(), content.to_string());
    }
}

#[async_trait]
impl DocumentFetcher for MockDocumentFetcher {
    async fn fetch(&self, address: &str) -> Result<String, FetchError> {
        let pages = self.pages.read().unwrap_or_else(PoisonError::into_inner);

        pages.get(address).cloned().ok_or_else(|| FetchError::Status {
            url: format!("mock://{}", address),
            status: 404,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_serves_known_pages() {
        let fetcher = MockDocumentFetcher::new().with_page("f01", "<html></html>");

        assert_eq!(fetcher.fetch("f01").await.unwrap(), "<html></html>");
        assert!(matches!(
            fetcher.fetch("f02").await,
            Err(FetchError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_pages_survive_poisoned_lock() {
        let fetcher = MockDocumentFetcher::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = fetcher.pages.write().unwrap();
            panic!("writer panicked while holding the lock");
        }));
        assert!(fetcher.pages.is_poisoned());

        fetcher.insert("f01", "<html>ok</html>");
        assert_eq!(fetcher.fetch("f01").await.unwrap(), "<html>ok</html>");
    }
}
