use mockall::automock;

/// Key-value port for the per-client counter state. Production binds the
/// embedding client's persistent storage; tests bind an in-memory map.
/// Synchronous: the backing stores are local, not networked.
#[automock]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String);
}
