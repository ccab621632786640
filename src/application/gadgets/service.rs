//! Gadget inventory service
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::gadget::{
    Gadget, GadgetChanges, GadgetQuery, GadgetRepository, GadgetStats, NewGadget,
};
use crate::domain::{DomainError, DomainResult};
use crate::shared::PaginatedResult;

/// Identity of a gadget that has just been removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedGadget {
    pub id: String,
    pub name: String,
    pub codename: String,
}

pub struct GadgetService {
    repo: Arc<dyn GadgetRepository>,
}

impl GadgetService {
    pub fn new(repo: Arc<dyn GadgetRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, query: GadgetQuery) -> DomainResult<PaginatedResult<Gadget>> {
        self.repo.list(&query.normalized()).await
    }

    pub async fn get(&self, id: &str) -> DomainResult<Gadget> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::gadget_not_found(id))
    }

    pub async fn create(&self, new: NewGadget) -> DomainResult<Gadget> {
        self.ensure_codename_free(&new.codename, None).await?;

        let gadget = self.repo.insert(new).await?;
        info!(
            gadget_id = %gadget.id,
            codename = %gadget.codename,
            status = %gadget.status,
            "Gadget created"
        );
        Ok(gadget)
    }

    /// Full replacement of name, codename and status.
    pub async fn update(&self, id: &str, changes: GadgetChanges) -> DomainResult<Gadget> {
        let mut gadget = self.get(id).await?;
        self.ensure_codename_free(&changes.codename, Some(id)).await?;

        let previous = gadget.status;
        gadget.apply_changes(changes, Utc::now());
        let saved = self.repo.save(&gadget).await?;

        info!(
            gadget_id = %saved.id,
            from = %previous,
            to = %saved.status,
            "Gadget updated"
        );
        Ok(saved)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<DeletedGadget> {
        let gadget = self.get(id).await?;

        if !self.repo.delete(id).await? {
            return Err(DomainError::gadget_not_found(id));
        }

        info!(gadget_id = %gadget.id, codename = %gadget.codename, "Gadget deleted");
        Ok(DeletedGadget {
            id: gadget.id,
            name: gadget.name,
            codename: gadget.codename,
        })
    }

    /// One-way retirement; a second call fails with `InvalidState`.
    pub async fn decommission(&self, id: &str) -> DomainResult<Gadget> {
        let mut gadget = self.get(id).await?;
        let now = Utc::now();
        gadget.decommission(now)?;

        // Conditional on the stored status, so a concurrent caller loses here
        if !self.repo.mark_decommissioned(id, now).await? {
            let mut current = self.get(id).await?;
            warn!(gadget_id = %id, status = %current.status, "Concurrent decommission lost");
            current.decommission(now)?;
            return Err(DomainError::Internal(format!(
                "Gadget {} could not be decommissioned",
                id
            )));
        }

        info!(gadget_id = %gadget.id, codename = %gadget.codename, "Gadget decommissioned");
        self.get(id).await
    }

    pub async fn stats(&self) -> DomainResult<GadgetStats> {
        self.repo.stats().await
    }

    async fn ensure_codename_free(&self, codename: &str, exclude_id: Option<&str>) -> DomainResult<()> {
        if self
            .repo
            .find_by_codename(codename, exclude_id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "A gadget with codename '{}' already exists",
                codename
            )));
        }
        Ok(())
    }
}
