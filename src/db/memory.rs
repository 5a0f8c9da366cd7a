use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{Store, StoreError};
use crate::auth::user::{NewUser, User};
use crate::valves::valve::{Bop, BopId, Valve};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    bops: Vec<Bop>,
    valves: Vec<Valve>,
}

/// [`Store`] kept entirely in memory, for tests and local experiments.
///
/// Mirrors the constraints of the SQL schema: unique user emails and
/// sequential ids.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // a panicking writer can't leave a half applied row behind, keep going
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a BOP and returns its id.
    pub fn add_bop(&self, name: &str) -> BopId {
        let mut tables = self.tables();
        let id = tables.bops.len() as BopId + 1;
        tables.bops.push(Bop {
            id,
            name: name.to_owned(),
        });
        id
    }

    /// Adds a valve to an existing BOP, returns `None` if the BOP doesn't exist.
    pub fn add_valve(&self, bop_id: BopId, acronym: &str) -> Option<i32> {
        let mut tables = self.tables();
        if !tables.bops.iter().any(|bop| bop.id == bop_id) {
            return None;
        }

        let id = tables.valves.len() as i32 + 1;
        tables.valves.push(Valve {
            id,
            acronym: acronym.to_owned(),
            bop_id,
        });
        Some(id)
    }

    pub fn user_count(&self) -> usize {
        self.tables().users.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict);
        }

        let created = User {
            id: tables.users.len() as i32 + 1,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
        };
        tables.users.push(created.clone());

        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_bop(&self, id: BopId) -> Result<Option<Bop>, StoreError> {
        Ok(self.tables().bops.iter().find(|b| b.id == id).cloned())
    }

    async fn list_valves_of_bop(&self, bop_id: BopId) -> Result<Vec<Valve>, StoreError> {
        Ok(self
            .tables()
            .valves
            .iter()
            .filter(|v| v.bop_id == bop_id)
            .cloned()
            .collect())
    }

    async fn list_valve_acronyms(&self) -> Result<Vec<String>, StoreError> {
        let acronyms: BTreeSet<String> = self
            .tables()
            .valves
            .iter()
            .map(|v| v.acronym.clone())
            .collect();

        Ok(acronyms.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ana".into(),
            email: email.into(),
            password: "hash".into(),
        }
    }

    #[actix_web::test]
    async fn duplicate_email_conflicts() {
        let store = MemoryStore::new();

        assert!(store.create_user(&new_user("ana@x.com")).await.is_ok());
        assert!(matches!(
            store.create_user(&new_user("ana@x.com")).await,
            Err(StoreError::Conflict)
        ));
        assert_eq!(store.user_count(), 1);
    }

    #[actix_web::test]
    async fn acronyms_are_distinct_and_sorted() {
        let store = MemoryStore::new();
        let first = store.add_bop("NS-38");
        let second = store.add_bop("NS-40");
        for (bop, acronym) in [(first, "VS2"), (first, "VS1"), (second, "VS1")] {
            store.add_valve(bop, acronym).unwrap();
        }

        assert_eq!(store.list_valve_acronyms().await.unwrap(), vec!["VS1", "VS2"]);
        assert_eq!(store.list_valves_of_bop(first).await.unwrap().len(), 2);
    }

    #[test]
    fn valve_needs_existing_bop() {
        let store = MemoryStore::new();
        assert_eq!(store.add_valve(7, "VS1"), None);
    }
}
