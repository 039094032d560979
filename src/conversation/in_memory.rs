use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{ConversationStore, Exchange, Thread};

/// Process-lifetime thread map behind an async read/write lock
#[derive(Debug, Default)]
pub struct InMemoryStore {
    threads: RwLock<HashMap<String, Thread>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryStore {
    async fn get_or_create(&self, thread_id: &str) -> Thread {
        if let Some(thread) = self.threads.read().await.get(thread_id) {
            return thread.clone();
        }

        let mut threads = self.threads.write().await;
        let thread = threads.entry(thread_id.to_string()).or_insert_with(|| {
            tracing::debug!(thread_id, "created thread");
            Thread::default()
        });
        thread.clone()
    }

    async fn get(&self, thread_id: &str) -> Option<Thread> {
        self.threads.read().await.get(thread_id).cloned()
    }

    async fn append(&self, thread_id: &str, exchange: Exchange) {
        let mut threads = self.threads.write().await;
        threads
            .entry(thread_id.to_string())
            .or_default()
            .exchanges
            .push(exchange);
    }

    async fn set_last_code(&self, thread_id: &str, code: String) {
        let mut threads = self.threads.write().await;
        threads.entry(thread_id.to_string()).or_default().last_code = Some(code);
    }

    async fn thread_count(&self) -> usize {
        self.threads.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_or_create_creates_empty_thread() {
        let store = InMemoryStore::new();
        assert!(store.get("t1").await.is_none());

        let thread = store.get_or_create("t1").await;
        assert!(thread.exchanges.is_empty());
        assert!(thread.last_code.is_none());
        assert!(store.get("t1").await.is_some());
        assert_eq!(store.thread_count().await, 1);
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let store = InMemoryStore::new();
        store.append("t1", Exchange::new("hi", "hello")).await;

        let thread = store.get_or_create("t1").await;
        assert_eq!(thread.exchanges.len(), 1);
        assert_eq!(store.thread_count().await, 1);
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = InMemoryStore::new();
        for i in 0..5 {
            store
                .append("t1", Exchange::new(format!("in{}", i), format!("out{}", i)))
                .await;
        }

        let thread = store.get("t1").await.unwrap();
        let inputs: Vec<_> = thread.exchanges.iter().map(|e| e.input.clone()).collect();
        assert_eq!(inputs, vec!["in0", "in1", "in2", "in3", "in4"]);
    }

    #[tokio::test]
    async fn test_set_last_code_overwrites() {
        let store = InMemoryStore::new();
        store.set_last_code("t1", "x = 1".to_string()).await;
        store.set_last_code("t1", "x = 2".to_string()).await;

        let thread = store.get("t1").await.unwrap();
        assert_eq!(thread.last_code.as_deref(), Some("x = 2"));
        assert!(thread.exchanges.is_empty());
    }

    #[tokio::test]
    async fn test_threads_are_isolated() {
        let store = InMemoryStore::new();
        store.append("a", Exchange::new("1", "1")).await;
        store.set_last_code("b", "code".to_string()).await;

        let a = store.get("a").await.unwrap();
        let b = store.get("b").await.unwrap();
        assert_eq!(a.exchanges.len(), 1);
        assert!(a.last_code.is_none());
        assert!(b.exchanges.is_empty());
        assert_eq!(b.last_code.as_deref(), Some("code"));
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.append("shared", Exchange::new(i.to_string(), "ok")).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("shared").await.unwrap().exchanges.len(), 50);
    }
}
