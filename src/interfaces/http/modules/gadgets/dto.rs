//! Gadget DTOs

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::application::DeletedGadget;
use crate::domain::gadget::{Gadget, GadgetQuery, GadgetStats, GadgetStatus};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

// ── Requests ───────────────────────────────────────────────────

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

const STATUS_MESSAGE: &str =
    "Status must be one of: Available, Deployed, Destroyed, Decommissioned";

fn known_status(value: &str) -> Result<(), ValidationError> {
    if value.parse::<GadgetStatus>().is_err() {
        let mut err = ValidationError::new("status");
        err.message = Some(Cow::Borrowed(STATUS_MESSAGE));
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGadgetRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    #[schema(example = "Grapple Hook")]
    pub name: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Codename is required"),
        length(max = 100, message = "Codename must be at most 100 characters")
    )]
    #[schema(example = "HOOK-01")]
    pub codename: String,
    /// Defaults to `Available`
    #[validate(custom(function = "known_status"))]
    #[schema(value_type = Option<GadgetStatus>)]
    pub status: Option<String>,
}

/// Full replacement; every field is required.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGadgetRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Codename is required"),
        length(max = 100, message = "Codename must be at most 100 characters")
    )]
    pub codename: String,
    #[validate(
        required(message = "Status is required"),
        custom(function = "known_status")
    )]
    #[schema(value_type = GadgetStatus)]
    pub status: Option<String>,
}

/// Query parameters for `GET /api/gadgets`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListGadgetsParams {
    /// 1-based page number (default 1)
    pub page: Option<u64>,
    /// Page size, 1–100 (default 10)
    pub limit: Option<u64>,
    /// Exact status filter
    pub status: Option<String>,
    /// Case-insensitive substring of name or codename
    pub search: Option<String>,
    /// name | codename | status | createdAt | updatedAt | decommissionedAt
    pub sort_by: Option<String>,
    /// ASC | DESC (default DESC)
    pub sort_order: Option<String>,
}

impl ListGadgetsParams {
    pub fn into_query(self) -> DomainResult<GadgetQuery> {
        let defaults = GadgetQuery::default();
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        Ok(GadgetQuery {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
            status: non_empty(self.status).map(|s| s.parse()).transpose()?,
            search: self.search,
            sort_by: non_empty(self.sort_by)
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or(defaults.sort_by),
            sort_order: non_empty(self.sort_order)
                .map(|s| s.parse())
                .transpose()?
                .unwrap_or(defaults.sort_order),
        })
    }
}

// ── Responses ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GadgetDto {
    pub id: String,
    pub name: String,
    pub codename: String,
    pub status: GadgetStatus,
    pub decommissioned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Gadget> for GadgetDto {
    fn from(g: Gadget) -> Self {
        Self {
            id: g.id,
            name: g.name,
            codename: g.codename,
            status: g.status,
            decommissioned_at: g.decommissioned_at,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GadgetListResponse {
    pub gadgets: Vec<GadgetDto>,
    pub pagination: PaginationDto,
}

impl From<PaginatedResult<Gadget>> for GadgetListResponse {
    fn from(page: PaginatedResult<Gadget>) -> Self {
        let pagination = PaginationDto {
            current_page: page.page,
            total_pages: page.total_pages,
            total_items: page.total,
            items_per_page: page.limit,
            has_next_page: page.has_next_page(),
            has_prev_page: page.has_prev_page(),
        };
        Self {
            gadgets: page.items.into_iter().map(GadgetDto::from).collect(),
            pagination,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GadgetResponse {
    pub gadget: GadgetDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GadgetMessageResponse {
    pub message: String,
    pub gadget: GadgetDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedGadgetDto {
    pub id: String,
    pub name: String,
    pub codename: String,
}

impl From<DeletedGadget> for DeletedGadgetDto {
    fn from(d: DeletedGadget) -> Self {
        Self {
            id: d.id,
            name: d.name,
            codename: d.codename,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGadgetResponse {
    pub message: String,
    pub deleted_gadget: DeletedGadgetDto,
}

/// Counts per status; statuses without records are omitted.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GadgetStatsResponse {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
}

impl From<GadgetStats> for GadgetStatsResponse {
    fn from(stats: GadgetStats) -> Self {
        Self {
            total: stats.total,
            by_status: stats
                .by_status
                .into_iter()
                .map(|(status, count)| (status.to_string(), count))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GadgetStatsSummaryResponse {
    pub summary: GadgetStatsResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gadget::{SortField, SortOrder};

    #[test]
    fn params_default_to_first_page_newest_first() {
        let q = ListGadgetsParams::default().into_query().unwrap();
        assert_eq!(q, GadgetQuery::default());
        assert_eq!(q.sort_by, SortField::CreatedAt);
        assert_eq!(q.sort_order, SortOrder::Desc);
    }

    #[test]
    fn params_reject_unknown_values() {
        let bad_status = ListGadgetsParams {
            status: Some("Lost".into()),
            ..Default::default()
        };
        assert!(bad_status.into_query().is_err());

        let bad_sort = ListGadgetsParams {
            sort_by: Some("password_hash".into()),
            ..Default::default()
        };
        assert!(bad_sort.into_query().is_err());
    }

    #[test]
    fn create_request_reports_blank_fields() {
        let req = CreateGadgetRequest {
            name: "  ".into(),
            codename: String::new(),
            status: Some("Sideways".into()),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("codename"));
        assert!(fields.contains_key("status"));
    }

    #[test]
    fn gadget_dto_uses_camel_case() {
        let now = Utc::now();
        let dto = GadgetDto::from(Gadget {
            id: "g-1".into(),
            name: "Jetpack".into(),
            codename: "PACK-009".into(),
            status: GadgetStatus::Destroyed,
            decommissioned_at: None,
            created_at: now,
            updated_at: now,
        });
        let json = serde_json::to_value(dto).unwrap();
        assert_eq!(json["status"], "Destroyed");
        assert!(json["decommissionedAt"].is_null());
        assert!(json.get("createdAt").is_some());
    }
}
