//! In-memory storage and fixtures shared by the core unit tests.

use crate::directory::Directory;
use crate::domain::{Account, Provider, Reservation};
use crate::ports::{PortError, PortResult, StorageService};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeStorage {
    accounts: Mutex<Vec<Account>>,
    session: Mutex<Option<Account>>,
    reservations: Mutex<Vec<Reservation>>,
    fail_appends: AtomicBool,
}

impl FakeStorage {
    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    pub fn stored_session(&self) -> Option<Account> {
        self.session.lock().unwrap().clone()
    }

    pub fn stored_reservations(&self) -> Vec<Reservation> {
        self.reservations.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageService for FakeStorage {
    async fn insert_account(&self, account: &Account) -> PortResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(PortError::AlreadyExists(account.email.clone()));
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn get_account_by_email(&self, email: &str) -> PortResult<Account> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned()
            .ok_or_else(|| PortError::NotFound(email.to_string()))
    }

    async fn load_session(&self) -> PortResult<Option<Account>> {
        Ok(self.stored_session())
    }

    async fn save_session(&self, account: &Account) -> PortResult<()> {
        *self.session.lock().unwrap() = Some(account.clone());
        Ok(())
    }

    async fn clear_session(&self) -> PortResult<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn append_reservation(&self, reservation: &Reservation) -> PortResult<()> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("disk full".to_string()));
        }
        self.reservations.lock().unwrap().push(reservation.clone());
        Ok(())
    }

    async fn list_reservations(&self) -> PortResult<Vec<Reservation>> {
        Ok(self.stored_reservations())
    }
}

pub fn provider(name: &str, specialty: &str) -> Provider {
    Provider {
        name: name.to_string(),
        specialty: specialty.to_string(),
        location: format!("{name} Clinic, Kano, Nigeria"),
        fee: 8000,
        image_url: format!("https://images.example.com/{}.jpg", name.len()),
    }
}

pub fn sample_directory() -> Directory {
    Directory::new(vec![
        provider("Dr. John Smith", "Cardiologist"),
        provider("Dr. Lisa Morgan", "Dermatologist"),
        provider("Dr. Blessing Ogechi", "Neurologist"),
        provider("Dr. Ali Sale", "Neurologist"),
        provider("Dr. Larry George", "Cardiologist"),
    ])
    .expect("sample directory has unique names")
}
