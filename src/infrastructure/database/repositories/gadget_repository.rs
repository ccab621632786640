//! SeaORM implementation of GadgetRepository

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::{debug, warn};

use crate::domain::gadget::{
    Gadget, GadgetQuery, GadgetRepository, GadgetStats, GadgetStatus, NewGadget, SortField,
    SortOrder,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::gadget;
use crate::shared::PaginatedResult;

pub struct SeaOrmGadgetRepository {
    db: DatabaseConnection,
}

impl SeaOrmGadgetRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_entity(status: GadgetStatus) -> gadget::GadgetStatus {
    match status {
        GadgetStatus::Available => gadget::GadgetStatus::Available,
        GadgetStatus::Deployed => gadget::GadgetStatus::Deployed,
        GadgetStatus::Destroyed => gadget::GadgetStatus::Destroyed,
        GadgetStatus::Decommissioned => gadget::GadgetStatus::Decommissioned,
    }
}

fn status_to_domain(status: gadget::GadgetStatus) -> GadgetStatus {
    match status {
        gadget::GadgetStatus::Available => GadgetStatus::Available,
        gadget::GadgetStatus::Deployed => GadgetStatus::Deployed,
        gadget::GadgetStatus::Destroyed => GadgetStatus::Destroyed,
        gadget::GadgetStatus::Decommissioned => GadgetStatus::Decommissioned,
    }
}

fn model_to_domain(model: gadget::Model) -> Gadget {
    Gadget {
        id: model.id,
        name: model.name,
        codename: model.codename,
        status: status_to_domain(model.status),
        decommissioned_at: model.decommissioned_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn sort_column(field: SortField) -> gadget::Column {
    match field {
        SortField::Name => gadget::Column::Name,
        SortField::Codename => gadget::Column::Codename,
        SortField::Status => gadget::Column::Status,
        SortField::CreatedAt => gadget::Column::CreatedAt,
        SortField::UpdatedAt => gadget::Column::UpdatedAt,
        SortField::DecommissionedAt => gadget::Column::DecommissionedAt,
    }
}

/// Escape LIKE wildcards so the term matches literally.
///
/// Only ASCII is folded, matching SQLite's `LOWER()`.
fn like_pattern(term: &str) -> LikeExpr {
    let escaped = term
        .to_ascii_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{}%", escaped)).escape('\\')
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn insert_err(e: DbErr, codename: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_codename(codename),
        _ => db_err(e),
    }
}

pub(crate) fn duplicate_codename(codename: &str) -> DomainError {
    DomainError::Conflict(format!(
        "A gadget with codename '{}' already exists",
        codename
    ))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl GadgetRepository for SeaOrmGadgetRepository {
    async fn list(&self, query: &GadgetQuery) -> DomainResult<PaginatedResult<Gadget>> {
        let mut select = gadget::Entity::find();

        if let Some(status) = query.status {
            select = select.filter(gadget::Column::Status.eq(status_to_entity(status)));
        }

        // Lowercase both sides so the match is case-insensitive on every backend
        if let Some(search) = &query.search {
            select = select.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(gadget::Column::Name)))
                            .like(like_pattern(search)),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(gadget::Column::Codename)))
                            .like(like_pattern(search)),
                    ),
            );
        }

        let order = match query.sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        select = select
            .order_by(sort_column(query.sort_by), order)
            .order_by_asc(gadget::Column::Id);

        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        // Pages past the end are empty; skip the query
        let models = match query.offset().filter(|offset| *offset < total) {
            Some(offset) => select
                .offset(offset)
                .limit(query.limit)
                .all(&self.db)
                .await
                .map_err(db_err)?,
            None => Vec::new(),
        };

        debug!(
            total,
            returned = models.len(),
            page = query.page,
            "Listed gadgets"
        );

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, query.page, query.limit))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Gadget>> {
        let model = gadget::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn find_by_codename(
        &self,
        codename: &str,
        exclude_id: Option<&str>,
    ) -> DomainResult<Option<Gadget>> {
        let mut select = gadget::Entity::find().filter(gadget::Column::Codename.eq(codename));
        if let Some(id) = exclude_id {
            select = select.filter(gadget::Column::Id.ne(id));
        }

        let model = select.one(&self.db).await.map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn insert(&self, new: NewGadget) -> DomainResult<Gadget> {
        let now = Utc::now();
        let codename = new.codename.clone();

        let active = gadget::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(new.name),
            codename: Set(new.codename),
            status: Set(status_to_entity(new.status)),
            decommissioned_at: Set((new.status == GadgetStatus::Decommissioned).then_some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| insert_err(e, &codename))?;

        Ok(model_to_domain(model))
    }

    async fn save(&self, g: &Gadget) -> DomainResult<Gadget> {
        let active = gadget::ActiveModel {
            id: Unchanged(g.id.clone()),
            name: Set(g.name.clone()),
            codename: Set(g.codename.clone()),
            status: Set(status_to_entity(g.status)),
            decommissioned_at: Set(g.decommissioned_at),
            created_at: Unchanged(g.created_at),
            updated_at: Set(g.updated_at),
        };

        match active.update(&self.db).await {
            Ok(model) => Ok(model_to_domain(model)),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::gadget_not_found(&g.id)),
            Err(e) => Err(insert_err(e, &g.codename)),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = gadget::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn mark_decommissioned(&self, id: &str, at: DateTime<Utc>) -> DomainResult<bool> {
        let result = gadget::Entity::update_many()
            .set(gadget::ActiveModel {
                status: Set(gadget::GadgetStatus::Decommissioned),
                decommissioned_at: Set(Some(at)),
                updated_at: Set(at),
                ..Default::default()
            })
            .filter(gadget::Column::Id.eq(id))
            .filter(gadget::Column::Status.ne(gadget::GadgetStatus::Decommissioned))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected == 1)
    }

    async fn stats(&self) -> DomainResult<GadgetStats> {
        let rows: Vec<(String, i64)> = gadget::Entity::find()
            .select_only()
            .column(gadget::Column::Status)
            .column_as(Expr::col(gadget::Column::Id).count(), "count")
            .group_by(gadget::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut by_status = BTreeMap::new();
        for (status, count) in rows {
            match status.parse::<GadgetStatus>() {
                Ok(status) => {
                    by_status.insert(status, count.max(0) as u64);
                }
                Err(_) => warn!(status = %status, "Skipping unknown gadget status in stats"),
            }
        }

        let total = gadget::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(GadgetStats { total, by_status })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    async fn repo_with(gadgets: &[(&str, &str, GadgetStatus)]) -> SeaOrmGadgetRepository {
        let repo = SeaOrmGadgetRepository::new(test_db().await);
        for (name, codename, status) in gadgets {
            repo.insert(NewGadget::new(name, codename, Some(*status)).unwrap())
                .await
                .unwrap();
        }
        repo
    }

    fn demo() -> Vec<(&'static str, &'static str, GadgetStatus)> {
        vec![
            ("Explosive Pen", "PEN-001", GadgetStatus::Available),
            ("Invisible Car", "CAR-007", GadgetStatus::Deployed),
            ("Laser Watch", "WATCH-003", GadgetStatus::Available),
            ("Jetpack", "PACK-009", GadgetStatus::Destroyed),
            ("X-Ray Glasses", "GLASS-005", GadgetStatus::Decommissioned),
        ]
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_codename() {
        let repo = repo_with(&[("Pen", "PEN-001", GadgetStatus::Available)]).await;
        let err = repo
            .insert(NewGadget::new("Other Pen", "PEN-001", None).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn codename_uniqueness_is_case_sensitive() {
        let repo = repo_with(&[("Pen", "PEN-001", GadgetStatus::Available)]).await;
        assert!(repo
            .insert(NewGadget::new("Pen", "pen-001", None).unwrap())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_over_name_and_codename() {
        let repo = repo_with(&demo()).await;

        let by_name = repo
            .list(&GadgetQuery {
                search: Some("pen".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = by_name.items.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Explosive Pen"]);

        let by_codename = repo
            .list(&GadgetQuery {
                search: Some("car-0".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_codename.total, 1);
        assert_eq!(by_codename.items[0].codename, "CAR-007");
    }

    #[tokio::test]
    async fn search_matches_non_ascii_terms() {
        let repo = repo_with(&[
            ("Überwatch Lens", "LENS-001", GadgetStatus::Available),
            ("Jetpack", "PACK-009", GadgetStatus::Available),
        ])
        .await;

        for term in ["Über", "ÜBERWATCH", "Überwatch lens"] {
            let page = repo
                .list(&GadgetQuery {
                    search: Some(term.into()),
                    ..Default::default()
                })
                .await
                .unwrap();
            assert_eq!(page.total, 1, "search {:?}", term);
        }
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let repo = repo_with(&demo()).await;
        let page = repo
            .list(&GadgetQuery {
                search: Some("%".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn status_filter_returns_only_matching() {
        let repo = repo_with(&demo()).await;
        let page = repo
            .list(&GadgetQuery {
                status: Some(GadgetStatus::Deployed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert!(page.items.iter().all(|g| g.status == GadgetStatus::Deployed));
    }

    #[tokio::test]
    async fn pagination_past_the_end_is_empty() {
        let repo = repo_with(&demo()).await;
        let page = repo
            .list(&GadgetQuery {
                page: 4,
                limit: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn huge_page_numbers_return_an_empty_page() {
        let repo = repo_with(&demo()).await;
        for page in [1_000_000_000_000_000_000, u64::MAX] {
            let result = repo
                .list(&GadgetQuery {
                    page,
                    limit: 10,
                    ..Default::default()
                })
                .await
                .unwrap();
            assert_eq!(result.total, 5);
            assert!(result.items.is_empty());
            assert!(!result.has_next_page());
        }
    }

    #[tokio::test]
    async fn sorts_by_requested_column() {
        let repo = repo_with(&demo()).await;
        let page = repo
            .list(&GadgetQuery {
                sort_by: SortField::Name,
                sort_order: SortOrder::Asc,
                ..Default::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = page.items.iter().map(|g| g.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn find_by_codename_can_exclude_self() {
        let repo = repo_with(&[("Pen", "PEN-001", GadgetStatus::Available)]).await;
        let pen = repo.find_by_codename("PEN-001", None).await.unwrap().unwrap();
        assert!(repo
            .find_by_codename("PEN-001", Some(&pen.id))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn mark_decommissioned_only_once() {
        let repo = repo_with(&[("Hook", "HOOK-01", GadgetStatus::Available)]).await;
        let hook = repo.find_by_codename("HOOK-01", None).await.unwrap().unwrap();

        assert!(repo.mark_decommissioned(&hook.id, Utc::now()).await.unwrap());
        assert!(!repo.mark_decommissioned(&hook.id, Utc::now()).await.unwrap());
        assert!(!repo.mark_decommissioned("missing", Utc::now()).await.unwrap());

        let stored = repo.find_by_id(&hook.id).await.unwrap().unwrap();
        assert_eq!(stored.status, GadgetStatus::Decommissioned);
        assert!(stored.decommissioned_at.is_some());
    }

    #[tokio::test]
    async fn save_of_missing_record_is_not_found() {
        let repo = repo_with(&[]).await;
        let now = Utc::now();
        let ghost = Gadget {
            id: "missing".into(),
            name: "Ghost".into(),
            codename: "GHOST".into(),
            status: GadgetStatus::Available,
            decommissioned_at: None,
            created_at: now,
            updated_at: now,
        };
        let err = repo.save(&ghost).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn stats_group_by_status_without_zero_fill() {
        let repo = repo_with(&demo()[..4]).await;
        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_status.get(&GadgetStatus::Available), Some(&2));
        assert_eq!(stats.by_status.get(&GadgetStatus::Deployed), Some(&1));
        assert_eq!(stats.by_status.get(&GadgetStatus::Destroyed), Some(&1));
        assert!(!stats.by_status.contains_key(&GadgetStatus::Decommissioned));
    }

    #[tokio::test]
    async fn delete_reports_missing() {
        let repo = repo_with(&[("Pen", "PEN-001", GadgetStatus::Available)]).await;
        let pen = repo.find_by_codename("PEN-001", None).await.unwrap().unwrap();
        assert!(repo.delete(&pen.id).await.unwrap());
        assert!(!repo.delete(&pen.id).await.unwrap());
    }
}
