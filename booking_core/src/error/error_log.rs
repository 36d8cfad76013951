//! Bounded in-memory log of caught errors.
//!
//! The log is an ordinary value: construct one, hand clones to whoever needs
//! to record into it (the store, retry helpers) and read it back in tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::{AppError, AppResult};

/// Number of entries kept before the oldest are evicted.
pub const DEFAULT_ERROR_LOG_CAPACITY: usize = 100;

/// Where an error was caught.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    pub component: Option<String>,
    pub action: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl ErrorContext {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: Some(component.into()),
            ..Self::default()
        }
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// A recorded error with its context.
#[derive(Debug, Clone)]
pub struct ErrorLogEntry {
    pub error: AppError,
    pub context: ErrorContext,
    pub timestamp: DateTime<Utc>,
}

/// Shared, bounded error log with FIFO eviction.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    entries: Arc<RwLock<VecDeque<ErrorLogEntry>>>,
    capacity: usize,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ERROR_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Record an error, evicting the oldest entry when full.
    pub fn record(&self, error: &AppError, context: ErrorContext) {
        log::error!(
            "[{}] {}: {}",
            context.component.as_deref().unwrap_or("app"),
            context.action.as_deref().unwrap_or("unknown"),
            error
        );

        let mut entries = self.entries.write();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(ErrorLogEntry {
            error: error.clone(),
            context,
            timestamp: Utc::now(),
        });
    }

    /// Snapshot of the log, oldest first.
    pub fn entries(&self) -> Vec<ErrorLogEntry> {
        self.entries.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Await `fut`, recording its error (if any) before handing it back.
    pub async fn capture<T, F>(&self, fut: F, context: ErrorContext) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        match fut.await {
            Ok(value) => Ok(value),
            Err(err) => {
                self.record(&err, context);
                Err(err)
            }
        }
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new()
    }
}
