// ABOUTME: Data context for dependency injection of the credential store
// ABOUTME: Holds the UserStore trait object shared by all handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::database::UserStore;
use std::sync::Arc;

/// Data context containing the credential store
#[derive(Clone)]
pub struct DataContext {
    database: Arc<dyn UserStore>,
}

impl DataContext {
    /// Create new data context
    #[must_use]
    pub fn new(database: Arc<dyn UserStore>) -> Self {
        Self { database }
    }

    /// Get database for persistence operations
    #[must_use]
    pub fn database(&self) -> &dyn UserStore {
        self.database.as_ref()
    }
}
