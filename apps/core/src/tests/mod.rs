//! Test Module
//!
//! Cross-module suites for the assistant engine.
//!
//! ## Test Categories
//! - `brain_tests`: search, topic detection, intent rules and dialogue replies
//! - `session_tests`: session actor operations and state snapshots
//! - `integration_tests`: end-to-end conversations on virtual time

pub mod brain_tests;
pub mod integration_tests;

use crate::actors::{AssistantHandle, RecordingNavigator};
use crate::catalog::Catalog;
use crate::choice::ScriptedChoices;
use crate::config::AssistantConfig;
use std::sync::Arc;
use std::time::Duration;

pub(crate) fn builtin_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().expect("built-in catalog must load"))
}

/// Starts a session whose thinking delays are taken from `delays_ms`, in order.
pub(crate) fn spawn_session(delays_ms: &[u64]) -> (AssistantHandle, RecordingNavigator) {
    let navigator = RecordingNavigator::new();
    let choices = ScriptedChoices::new().with_delays(delays_ms.iter().map(|ms| Duration::from_millis(*ms)));
    let handle = AssistantHandle::with_options(
        builtin_catalog(),
        Arc::new(navigator.clone()),
        AssistantConfig::default(),
        Box::new(choices),
    );
    (handle, navigator)
}

/// Advances virtual time (the test runtime must start paused).
pub(crate) async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
