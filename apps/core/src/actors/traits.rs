use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Defines the page-navigation primitive of the host application.
///
/// Navigation is fire-and-forget and assumed to always succeed; the assistant
/// only ever passes paths from its route table or paths the host asked for.
#[async_trait]
pub trait Navigator: Send + Sync + 'static {
    async fn navigate(&self, path: &str);
}

/// Navigator that only logs the route change.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

#[async_trait]
impl Navigator for LogNavigator {
    async fn navigate(&self, path: &str) {
        info!(path, "Navigating");
    }
}

/// Navigator that remembers every path it was asked to open.
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    visited: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .map(|v| v.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate(&self, path: &str) {
        match self.visited.lock() {
            Ok(mut visited) => visited.push(path.to_string()),
            Err(poisoned) => poisoned.into_inner().push(path.to_string()),
        }
    }
}
