//! Wizard store port.
//!
//! Holds in-progress quote wizards between HTTP requests. Wizards live only
//! for the visitor's session; nothing here is meant to be durable.
//!
//! # Design
//!
//! - **Atomic read-modify-write**: `update` applies a mutation with no other
//!   write to the same wizard in between, so guards such as "one pending
//!   submission" hold across concurrent requests
//! - **Idle eviction**: abandoned wizards are dropped by `remove_idle`

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, WizardId};
use crate::domain::quote::QuoteWizard;

/// Mutation applied by [`WizardStore::update`].
pub type WizardUpdate<'a> = Box<dyn FnOnce(&mut QuoteWizard) + Send + 'a>;

#[async_trait]
pub trait WizardStore: Send + Sync {
    /// Insert or overwrite a wizard.
    async fn save(&self, wizard: &QuoteWizard) -> Result<(), DomainError>;

    /// Find a wizard by id.
    ///
    /// Returns `None` if not found.
    async fn find(&self, id: WizardId) -> Result<Option<QuoteWizard>, DomainError>;

    /// Apply `apply` to the stored wizard and keep the result.
    ///
    /// The mutated wizard is stored even when the domain operation inside
    /// `apply` reported an error, so recorded field errors survive.
    ///
    /// Returns the updated wizard, or `None` if the id is unknown (in which
    /// case `apply` is not called).
    async fn update<'a>(
        &self,
        id: WizardId,
        apply: WizardUpdate<'a>,
    ) -> Result<Option<QuoteWizard>, DomainError>;

    /// Remove a wizard. Removing an unknown id is not an error.
    async fn remove(&self, id: WizardId) -> Result<(), DomainError>;

    /// Remove every wizard last touched before `cutoff`.
    ///
    /// Returns how many were removed.
    async fn remove_idle(&self, cutoff: Timestamp) -> Result<usize, DomainError>;
}
