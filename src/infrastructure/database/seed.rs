//! Startup seeding: reference accounts and demo inventory

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use tracing::{info, warn};

use crate::infrastructure::crypto::password::hash_password;
use crate::infrastructure::database::entities::{gadget, user};

/// Accounts every deployment starts with: (username, email, role)
const REFERENCE_USERS: [(&str, &str, user::UserRole); 2] = [
    ("agent007", "james.bond@imf.gov", user::UserRole::Agent),
    ("missioncontrol", "control@imf.gov", user::UserRole::Admin),
];

/// Create each reference account whose username is not taken yet.
///
/// Returns how many accounts were created.
pub async fn seed_reference_users(
    db: &DatabaseConnection,
    password: &str,
    bcrypt_cost: u32,
) -> Result<usize, DbErr> {
    let mut created = 0;

    for (username, email, role) in REFERENCE_USERS {
        let exists = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .count(db)
            .await?
            > 0;
        if exists {
            continue;
        }

        let plain = password.to_string();
        let hashed = tokio::task::spawn_blocking(move || hash_password(&plain, bcrypt_cost)).await;
        let password_hash = match hashed {
            Ok(Ok(hash)) => hash,
            Ok(Err(e)) => {
                warn!(username, error = %e, "Failed to hash seed password");
                continue;
            }
            Err(e) => {
                warn!(username, error = %e, "Hashing task failed");
                continue;
            }
        };

        let now = Utc::now();
        user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        info!(username, role = ?role, "Seeded reference account");
        created += 1;
    }

    Ok(created)
}

fn utc_date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

/// Insert the demo inventory when the gadgets table is empty.
///
/// Returns how many gadgets were inserted.
pub async fn seed_demo_gadgets(db: &DatabaseConnection) -> Result<usize, DbErr> {
    if gadget::Entity::find().count(db).await? > 0 {
        return Ok(0);
    }

    let now = Utc::now();
    let retired_at = utc_date(2024, 1, 15);
    let first_issued = utc_date(2023, 6, 10).unwrap_or(now);

    let demo = [
        ("Explosive Pen", "PEN-001", gadget::GadgetStatus::Available, None, now),
        ("Invisible Car", "CAR-007", gadget::GadgetStatus::Deployed, None, now),
        ("Laser Watch", "WATCH-003", gadget::GadgetStatus::Available, None, now),
        ("Jetpack", "PACK-009", gadget::GadgetStatus::Destroyed, None, now),
        (
            "X-Ray Glasses",
            "GLASS-005",
            gadget::GadgetStatus::Decommissioned,
            retired_at.or(Some(now)),
            first_issued,
        ),
    ];

    let count = demo.len();
    let models = demo
        .into_iter()
        .map(|(name, codename, status, decommissioned_at, created_at)| gadget::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            codename: Set(codename.to_string()),
            status: Set(status),
            decommissioned_at: Set(decommissioned_at),
            created_at: Set(created_at),
            updated_at: Set(now),
        });

    gadget::Entity::insert_many(models).exec(db).await?;
    info!(count, "Seeded demo gadgets");
    Ok(count)
}
