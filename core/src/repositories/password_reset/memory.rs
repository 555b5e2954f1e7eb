//! In-memory implementation of PasswordResetRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::DomainError;

use super::{PasswordResetRecord, PasswordResetRepository};

#[derive(Default)]
pub struct InMemoryPasswordResetRepository {
    records: Mutex<HashMap<String, PasswordResetRecord>>,
}

impl InMemoryPasswordResetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, PasswordResetRecord>) -> T,
    ) -> Result<T, DomainError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| DomainError::internal("password reset store lock poisoned"))?;
        Ok(f(&mut records))
    }
}

fn key(email: &str) -> String {
    email.to_lowercase()
}

#[async_trait]
impl PasswordResetRepository for InMemoryPasswordResetRepository {
    async fn store(&self, record: PasswordResetRecord) -> Result<(), DomainError> {
        self.with_records(|records| {
            records.insert(key(&record.email), record);
        })
    }

    async fn find(&self, email: &str) -> Result<Option<PasswordResetRecord>, DomainError> {
        self.with_records(|records| records.get(&key(email)).cloned())
    }

    async fn delete(&self, email: &str) -> Result<(), DomainError> {
        self.with_records(|records| {
            records.remove(&key(email));
        })
    }
}
