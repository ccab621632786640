//! Gadget domain entity and status state machine

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainError, DomainResult};

pub const NAME_MAX_LEN: usize = 255;
pub const CODENAME_MAX_LEN: usize = 100;

/// Gadget lifecycle status
///
/// Any status can be reached from any other through a full update.
/// `Decommissioned` is additionally reachable through [`Gadget::decommission`],
/// which refuses to run twice.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    ToSchema,
)]
pub enum GadgetStatus {
    #[default]
    Available,
    Deployed,
    Destroyed,
    Decommissioned,
}

impl GadgetStatus {
    pub const ALL: [GadgetStatus; 4] = [
        Self::Available,
        Self::Deployed,
        Self::Destroyed,
        Self::Decommissioned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Deployed => "Deployed",
            Self::Destroyed => "Destroyed",
            Self::Decommissioned => "Decommissioned",
        }
    }
}

impl fmt::Display for GadgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GadgetStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(Self::Available),
            "Deployed" => Ok(Self::Deployed),
            "Destroyed" => Ok(Self::Destroyed),
            "Decommissioned" => Ok(Self::Decommissioned),
            _ => Err(DomainError::validation(
                "Status must be one of: Available, Deployed, Destroyed, Decommissioned",
            )),
        }
    }
}

/// Inventory record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gadget {
    pub id: String,
    pub name: String,
    /// Unique secondary identifier
    pub codename: String,
    pub status: GadgetStatus,
    /// Set iff `status == Decommissioned`
    pub decommissioned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Gadget {
    pub fn is_decommissioned(&self) -> bool {
        self.status == GadgetStatus::Decommissioned
    }

    /// Apply a full update.
    ///
    /// Moving into `Decommissioned` stamps `decommissioned_at`; staying there
    /// keeps the original stamp; any other status clears it.
    pub fn apply_changes(&mut self, changes: GadgetChanges, now: DateTime<Utc>) {
        let was_decommissioned = self.is_decommissioned();

        self.name = changes.name;
        self.codename = changes.codename;
        self.status = changes.status;

        self.decommissioned_at = match (changes.status, was_decommissioned) {
            (GadgetStatus::Decommissioned, false) => Some(now),
            (GadgetStatus::Decommissioned, true) => self.decommissioned_at.or(Some(now)),
            _ => None,
        };
        self.updated_at = now;
    }

    /// One-way retirement. Fails if the gadget is already decommissioned.
    pub fn decommission(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.is_decommissioned() {
            return Err(DomainError::InvalidState(
                "This gadget has already been decommissioned".into(),
            ));
        }
        self.status = GadgetStatus::Decommissioned;
        self.decommissioned_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

/// Validated input for creating a gadget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGadget {
    pub name: String,
    pub codename: String,
    pub status: GadgetStatus,
}

impl NewGadget {
    /// Trims and validates the input; collects every field error.
    pub fn new(name: &str, codename: &str, status: Option<GadgetStatus>) -> DomainResult<Self> {
        let (name, codename) = validate_fields(name, codename)?;
        Ok(Self {
            name,
            codename,
            status: status.unwrap_or_default(),
        })
    }
}

/// Validated input for a full update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GadgetChanges {
    pub name: String,
    pub codename: String,
    pub status: GadgetStatus,
}

impl GadgetChanges {
    pub fn new(name: &str, codename: &str, status: GadgetStatus) -> DomainResult<Self> {
        let (name, codename) = validate_fields(name, codename)?;
        Ok(Self {
            name,
            codename,
            status,
        })
    }
}

fn validate_fields(name: &str, codename: &str) -> DomainResult<(String, String)> {
    let name = name.trim();
    let codename = codename.trim();
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push("Name is required".to_string());
    } else if name.chars().count() > NAME_MAX_LEN {
        errors.push(format!("Name must be at most {} characters", NAME_MAX_LEN));
    }

    if codename.is_empty() {
        errors.push("Codename is required".to_string());
    } else if codename.chars().count() > CODENAME_MAX_LEN {
        errors.push(format!(
            "Codename must be at most {} characters",
            CODENAME_MAX_LEN
        ));
    }

    if errors.is_empty() {
        Ok((name.to_string(), codename.to_string()))
    } else {
        Err(DomainError::Validation(errors))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_gadget(status: GadgetStatus) -> Gadget {
        let created = Utc::now() - Duration::days(3);
        Gadget {
            id: "g-1".into(),
            name: "Explosive Pen".into(),
            codename: "PEN-001".into(),
            status,
            decommissioned_at: (status == GadgetStatus::Decommissioned).then_some(created),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn decommission_stamps_timestamp() {
        let mut g = sample_gadget(GadgetStatus::Deployed);
        let now = Utc::now();
        g.decommission(now).unwrap();
        assert_eq!(g.status, GadgetStatus::Decommissioned);
        assert_eq!(g.decommissioned_at, Some(now));
        assert!(g.decommissioned_at.unwrap() >= g.created_at);
    }

    #[test]
    fn second_decommission_fails_and_leaves_gadget_unchanged() {
        let mut g = sample_gadget(GadgetStatus::Available);
        g.decommission(Utc::now()).unwrap();
        let snapshot = g.clone();

        let err = g.decommission(Utc::now() + Duration::hours(1)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
        assert_eq!(g, snapshot);
    }

    #[test]
    fn update_out_of_decommissioned_clears_timestamp() {
        let mut g = sample_gadget(GadgetStatus::Decommissioned);
        let changes = GadgetChanges::new("Explosive Pen", "PEN-001", GadgetStatus::Available).unwrap();
        g.apply_changes(changes, Utc::now());
        assert_eq!(g.status, GadgetStatus::Available);
        assert!(g.decommissioned_at.is_none());
    }

    #[test]
    fn update_into_decommissioned_sets_timestamp() {
        let mut g = sample_gadget(GadgetStatus::Deployed);
        let now = Utc::now();
        let changes = GadgetChanges::new("Pen", "PEN-001", GadgetStatus::Decommissioned).unwrap();
        g.apply_changes(changes, now);
        assert_eq!(g.decommissioned_at, Some(now));
        assert_eq!(g.updated_at, now);
    }

    #[test]
    fn update_keeping_decommissioned_keeps_original_stamp() {
        let mut g = sample_gadget(GadgetStatus::Decommissioned);
        let original = g.decommissioned_at;
        let changes = GadgetChanges::new("Renamed", "PEN-001", GadgetStatus::Decommissioned).unwrap();
        g.apply_changes(changes, Utc::now());
        assert_eq!(g.decommissioned_at, original);
        assert_eq!(g.name, "Renamed");
    }

    #[test]
    fn new_gadget_trims_and_defaults_status() {
        let g = NewGadget::new("  Grapple Hook ", " HOOK-01", None).unwrap();
        assert_eq!(g.name, "Grapple Hook");
        assert_eq!(g.codename, "HOOK-01");
        assert_eq!(g.status, GadgetStatus::Available);
    }

    #[test]
    fn new_gadget_collects_all_field_errors() {
        let err = NewGadget::new("   ", "", None).unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation(vec![
                "Name is required".into(),
                "Codename is required".into()
            ])
        );
    }

    #[test]
    fn codename_length_is_limited() {
        let long = "X".repeat(CODENAME_MAX_LEN + 1);
        assert!(NewGadget::new("ok", &long, None).is_err());
        let max = "X".repeat(CODENAME_MAX_LEN);
        assert!(NewGadget::new("ok", &max, None).is_ok());
    }

    #[test]
    fn status_parses_only_exact_names() {
        for status in GadgetStatus::ALL {
            assert_eq!(status.as_str().parse::<GadgetStatus>().unwrap(), status);
        }
        assert!("available".parse::<GadgetStatus>().is_err());
        assert!("Lost".parse::<GadgetStatus>().is_err());
    }
}
