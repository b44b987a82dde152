//! In-memory wizard store.
//!
//! Wizards are session-scoped, so process memory is the production store
//! as well as the test one.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Timestamp, WizardId};
use crate::domain::quote::QuoteWizard;
use crate::ports::{WizardStore, WizardUpdate};

#[derive(Debug, Clone, Default)]
pub struct InMemoryWizardStore {
    wizards: Arc<RwLock<HashMap<WizardId, QuoteWizard>>>,
}

impl InMemoryWizardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored wizards
    pub async fn len(&self) -> usize {
        self.wizards.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.wizards.read().await.is_empty()
    }
}

#[async_trait]
impl WizardStore for InMemoryWizardStore {
    async fn save(&self, wizard: &QuoteWizard) -> Result<(), DomainError> {
        self.wizards
            .write()
            .await
            .insert(wizard.id(), wizard.clone());
        Ok(())
    }

    async fn find(&self, id: WizardId) -> Result<Option<QuoteWizard>, DomainError> {
        Ok(self.wizards.read().await.get(&id).cloned())
    }

    async fn update<'a>(
        &self,
        id: WizardId,
        apply: WizardUpdate<'a>,
    ) -> Result<Option<QuoteWizard>, DomainError> {
        let mut wizards = self.wizards.write().await;
        Ok(wizards.get_mut(&id).map(|wizard| {
            apply(wizard);
            wizard.clone()
        }))
    }

    async fn remove(&self, id: WizardId) -> Result<(), DomainError> {
        self.wizards.write().await.remove(&id);
        Ok(())
    }

    async fn remove_idle(&self, cutoff: Timestamp) -> Result<usize, DomainError> {
        let mut wizards = self.wizards.write().await;
        let before = wizards.len();
        wizards.retain(|_, wizard| wizard.updated_at() >= cutoff);
        Ok(before - wizards.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::Industry;
    use std::time::Duration;

    #[tokio::test]
    async fn save_then_find_returns_copy() {
        let store = InMemoryWizardStore::new();
        let mut wizard = QuoteWizard::new(WizardId::new());
        wizard
            .edit(|a| a.industry = Some(Industry::FamilyOffice))
            .unwrap();

        store.save(&wizard).await.unwrap();
        let found = store.find(wizard.id()).await.unwrap().unwrap();

        assert_eq!(found, wizard);
    }

    #[tokio::test]
    async fn save_overwrites() {
        let store = InMemoryWizardStore::new();
        let mut wizard = QuoteWizard::new(WizardId::new());
        store.save(&wizard).await.unwrap();

        wizard.edit(|a| a.company = "Acme".into()).unwrap();
        store.save(&wizard).await.unwrap();

        assert_eq!(store.len().await, 1);
        let found = store.find(wizard.id()).await.unwrap().unwrap();
        assert_eq!(found.answers().company, "Acme");
    }

    #[tokio::test]
    async fn find_unknown_is_none() {
        let store = InMemoryWizardStore::new();
        assert!(store.find(WizardId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = InMemoryWizardStore::new();
        let wizard = QuoteWizard::new(WizardId::new());
        store.save(&wizard).await.unwrap();

        store.remove(wizard.id()).await.unwrap();
        store.remove(wizard.id()).await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn update_applies_and_persists() {
        let store = InMemoryWizardStore::new();
        let wizard = QuoteWizard::new(WizardId::new());
        store.save(&wizard).await.unwrap();

        let updated = store
            .update(
                wizard.id(),
                Box::new(|w: &mut QuoteWizard| w.edit(|a| a.company = "Acme".into()).unwrap()),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.answers().company, "Acme");
        let found = store.find(wizard.id()).await.unwrap().unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn update_unknown_skips_mutation() {
        let store = InMemoryWizardStore::new();
        let mut called = false;

        let result = store
            .update(WizardId::new(), Box::new(|_: &mut QuoteWizard| called = true))
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(!called);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_are_not_lost() {
        let store = InMemoryWizardStore::new();
        let wizard = QuoteWizard::new(WizardId::new());
        let id = wizard.id();
        store.save(&wizard).await.unwrap();

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .update(
                            id,
                            Box::new(|w: &mut QuoteWizard| {
                                w.edit(|a| a.company.push('x')).unwrap();
                            }),
                        )
                        .await
                        .unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let found = store.find(id).await.unwrap().unwrap();
        assert_eq!(found.answers().company.len(), 16);
    }

    #[tokio::test]
    async fn remove_idle_keeps_recently_touched() {
        let store = InMemoryWizardStore::new();
        let stale = QuoteWizard::new(WizardId::new());
        tokio::time::sleep(Duration::from_millis(5)).await;
        let cutoff = Timestamp::now();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let fresh = QuoteWizard::new(WizardId::new());
        store.save(&stale).await.unwrap();
        store.save(&fresh).await.unwrap();

        let removed = store.remove_idle(cutoff).await.unwrap();

        assert_eq!(removed, 1);
        assert!(store.find(stale.id()).await.unwrap().is_none());
        assert!(store.find(fresh.id()).await.unwrap().is_some());
    }
}
