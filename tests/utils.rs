use gazopti_sdk::{ClientConfig, GazOptiClient, MemoryStore};
use std::sync::Arc;

#[cfg(test)]
pub mod test_utils {
    use super::*;

    /// Token used by tests that start with a stored session
    pub const TEST_TOKEN: &str = "abc";

    /// Create a client pointing at the mock server, with an in-memory store.
    ///
    /// The store is returned as well so tests can check what was persisted.
    pub fn create_test_client(
        server_url: &str,
        token: Option<&str>,
    ) -> (GazOptiClient, Arc<MemoryStore>) {
        let config = ClientConfig::new(server_url);
        let store = Arc::new(match token {
            Some(token) => MemoryStore::with_entry(&config.token_key, token),
            None => MemoryStore::new(),
        });
        let client = GazOptiClient::with_store(config, store.clone());
        (client, store)
    }

    /// Value of the `Authorization` header for the test session
    #[allow(dead_code)]
    pub fn bearer() -> String {
        format!("Bearer {}", TEST_TOKEN)
    }

    /// Sample delivery as returned by the service
    #[allow(dead_code)]
    pub fn delivery_json(id: &str, full: u32, empty: u32) -> serde_json::Value {
        serde_json::json!({
            "_id": id,
            "driver": { "_id": "d1", "name": "Karim", "role": "driver" },
            "truck": { "_id": "t1", "plateNumber": "AB-123-CD" },
            "fullBottlesSent": full,
            "emptyBottlesSent": empty,
            "fullBottlesReturned": 0,
            "emptyBottlesReturned": 0,
            "status": "pending"
        })
    }
}
