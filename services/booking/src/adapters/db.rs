//! services/booking/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `StorageService` port from the `core` crate. It persists accounts, the
//! current session and the reservation ledger in SQLite using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clinic_booking_core::domain::{Account, Reservation, Slot, VisitType};
use clinic_booking_core::ports::{PortError, PortResult, StorageService};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `StorageService` port.
#[derive(Clone)]
pub struct SqliteAdapter {
    pool: SqlitePool,
}

impl SqliteAdapter {
    /// Creates a new `SqliteAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database at `database_url`.
    ///
    /// A single connection is used: the booking flow has one writer, and an
    /// in-memory database only lives as long as its connection, so that
    /// connection is never reaped or recycled.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct AccountRecord {
    email: String,
    first_name: String,
    last_name: String,
    password: String,
}
impl AccountRecord {
    fn to_domain(self) -> Account {
        Account {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
        }
    }
}

#[derive(FromRow)]
struct ReservationRecord {
    id: String,
    patient: String,
    phone: String,
    provider_name: String,
    specialty: String,
    location: String,
    date: String,
    time: String,
    visit_type: String,
    reason: String,
    fee: i64,
    booked_at: DateTime<Utc>,
}
impl ReservationRecord {
    fn to_domain(self) -> PortResult<Reservation> {
        let corrupt = |what: &str, e: String| {
            PortError::Unexpected(format!("Reservation {} has an invalid {}: {}", self.id, what, e))
        };
        let id = Uuid::parse_str(&self.id).map_err(|e| corrupt("id", e.to_string()))?;
        let time = Slot::from_str(&self.time).map_err(|e| corrupt("time", e.to_string()))?;
        let visit_type = VisitType::from_str(&self.visit_type)
            .map_err(|e| corrupt("visit type", e.to_string()))?;
        let fee = u32::try_from(self.fee).map_err(|e| corrupt("fee", e.to_string()))?;

        Ok(Reservation {
            id,
            patient: self.patient,
            phone: self.phone,
            provider_name: self.provider_name,
            specialty: self.specialty,
            location: self.location,
            date: self.date,
            time,
            visit_type,
            reason: self.reason,
            fee,
            booked_at: self.booked_at,
        })
    }
}

//=========================================================================================
// `StorageService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StorageService for SqliteAdapter {
    async fn insert_account(&self, account: &Account) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO accounts (email, first_name, last_name, password) VALUES (?, ?, ?, ?)",
        )
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.password)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                PortError::AlreadyExists(format!("Account {}", account.email))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;
        Ok(())
    }

    async fn get_account_by_email(&self, email: &str) -> PortResult<Account> {
        let record = sqlx::query_as::<_, AccountRecord>(
            "SELECT email, first_name, last_name, password FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("Account {} not found", email)),
            _ => PortError::Unexpected(e.to_string()),
        })?;
        Ok(record.to_domain())
    }

    async fn load_session(&self) -> PortResult<Option<Account>> {
        let record = sqlx::query_as::<_, AccountRecord>(
            "SELECT email, first_name, last_name, password FROM session WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(record.map(AccountRecord::to_domain))
    }

    async fn save_session(&self, account: &Account) -> PortResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO session (id, email, first_name, last_name, password) VALUES (1, ?, ?, ?, ?)",
        )
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.password)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn clear_session(&self) -> PortResult<()> {
        sqlx::query("DELETE FROM session")
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn append_reservation(&self, reservation: &Reservation) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO reservations (id, patient, phone, provider_name, specialty, location, date, time, visit_type, reason, fee, booked_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(reservation.id.to_string())
        .bind(&reservation.patient)
        .bind(&reservation.phone)
        .bind(&reservation.provider_name)
        .bind(&reservation.specialty)
        .bind(&reservation.location)
        .bind(&reservation.date)
        .bind(reservation.time.label())
        .bind(reservation.visit_type.label())
        .bind(&reservation.reason)
        .bind(i64::from(reservation.fee))
        .bind(reservation.booked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn list_reservations(&self) -> PortResult<Vec<Reservation>> {
        let records = sqlx::query_as::<_, ReservationRecord>(
            "SELECT id, patient, phone, provider_name, specialty, location, date, time, visit_type, reason, fee, booked_at \
             FROM reservations ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        records.into_iter().map(|r| r.to_domain()).collect()
    }
}
