//! Gadget repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Gadget, GadgetQuery, GadgetStats, NewGadget};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait GadgetRepository: Send + Sync {
    async fn list(&self, query: &GadgetQuery) -> DomainResult<PaginatedResult<Gadget>>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Gadget>>;

    /// Exact, case-sensitive codename lookup, optionally ignoring one record.
    async fn find_by_codename(
        &self,
        codename: &str,
        exclude_id: Option<&str>,
    ) -> DomainResult<Option<Gadget>>;

    /// Insert a new record. A duplicate codename yields `DomainError::Conflict`.
    async fn insert(&self, gadget: NewGadget) -> DomainResult<Gadget>;

    /// Persist every mutable field of `gadget`.
    async fn save(&self, gadget: &Gadget) -> DomainResult<Gadget>;

    /// Returns `false` when no record matched.
    async fn delete(&self, id: &str) -> DomainResult<bool>;

    /// Conditionally move a gadget to `Decommissioned`.
    ///
    /// Returns `false` if the gadget does not exist or is already decommissioned.
    async fn mark_decommissioned(&self, id: &str, at: DateTime<Utc>) -> DomainResult<bool>;

    async fn stats(&self) -> DomainResult<GadgetStats>;
}
