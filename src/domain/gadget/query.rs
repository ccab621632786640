//! Gadget list query and aggregate types

use std::collections::BTreeMap;
use std::str::FromStr;

use super::GadgetStatus;
use crate::domain::DomainError;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Column a gadget list can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Name,
    Codename,
    Status,
    #[default]
    CreatedAt,
    UpdatedAt,
    DecommissionedAt,
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "codename" => Ok(Self::Codename),
            "status" => Ok(Self::Status),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "updatedAt" | "updated_at" => Ok(Self::UpdatedAt),
            "decommissionedAt" | "decommissioned_at" => Ok(Self::DecommissionedAt),
            other => Err(DomainError::validation(format!(
                "sortBy must be one of: name, codename, status, createdAt, updatedAt, decommissionedAt (got '{}')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(DomainError::validation("sortOrder must be ASC or DESC")),
        }
    }
}

/// Filter, ordering and paging for a gadget listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GadgetQuery {
    /// 1-based page number
    pub page: u64,
    pub limit: u64,
    pub status: Option<GadgetStatus>,
    /// Case-insensitive substring matched against name or codename
    pub search: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for GadgetQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            status: None,
            search: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl GadgetQuery {
    /// Clamp paging values into range and drop blank search terms.
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(1, MAX_PAGE_SIZE);
        self.search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    /// Rows to skip before this page.
    ///
    /// `None` when the offset does not fit a signed 64-bit SQL parameter;
    /// such a page lies past the end of any table.
    pub fn offset(&self) -> Option<u64> {
        (self.page.max(1) - 1)
            .checked_mul(self.limit)
            .filter(|offset| i64::try_from(*offset).is_ok())
    }
}

/// Record counts, overall and per status.
///
/// Statuses without any record are absent from `by_status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GadgetStats {
    pub total: u64,
    pub by_status: BTreeMap<GadgetStatus, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_clamps_paging() {
        let q = GadgetQuery {
            page: 0,
            limit: 5000,
            search: Some("   ".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, MAX_PAGE_SIZE);
        assert!(q.search.is_none());
    }

    #[test]
    fn offset_is_zero_based() {
        let q = GadgetQuery {
            page: 3,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(q.offset(), Some(20));
    }

    #[test]
    fn offset_out_of_range_is_none() {
        let huge = GadgetQuery {
            page: u64::MAX,
            limit: MAX_PAGE_SIZE,
            ..Default::default()
        };
        assert_eq!(huge.offset(), None);

        let past_i64 = GadgetQuery {
            page: 1_000_000_000_000_000_000,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(past_i64.offset(), None);
    }

    #[test]
    fn sort_parsing() {
        assert_eq!("createdAt".parse::<SortField>().unwrap(), SortField::CreatedAt);
        assert_eq!("codename".parse::<SortField>().unwrap(), SortField::Codename);
        assert!("password".parse::<SortField>().is_err());
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
