use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::*;
use crate::repo::{ProfileStore, StoreError};

/// A row of `app_user`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    pub name: Option<String>,
    pub location: Option<String>,
    pub email: String,
    pub user_type: UserType,
}

/// A row of `employer`, keyed by user id in the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployerRow {
    pub id: i32,
    pub budget: Option<Decimal>,
}

/// A row of `freelancer`, keyed by user id in the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FreelancerRow {
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, UserRow>,
    employers: HashMap<UserId, EmployerRow>,
    freelancers: HashMap<UserId, FreelancerRow>,
}

impl Tables {
    fn write_employer(&mut self, user_id: UserId, fields: &EmployerFields) {
        // An UPDATE matching no row is not an error
        if let (Some(row), Some(budget)) = (self.employers.get_mut(&user_id), fields.budget) {
            row.budget = Some(budget.amount());
        }
    }

    fn write_freelancer(&mut self, user_id: UserId, fields: &FreelancerFields) {
        if let Some(row) = self.freelancers.get_mut(&user_id) {
            if let Some(bio) = &fields.bio {
                row.bio = Some(bio.clone());
            }
            if let Some(picture) = &fields.profile_picture {
                row.profile_picture = Some(picture.clone());
            }
        }
    }

    fn write_user(&mut self, user_id: UserId, fields: &UserFields) {
        if let Some(row) = self.users.get_mut(&user_id) {
            if let Some(name) = &fields.name {
                row.name = Some(name.clone());
            }
            if let Some(location) = &fields.location {
                row.location = Some(location.clone());
            }
        }
    }
}

/// In-memory ProfileStore for testing.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    /// Seed an employer account.
    pub fn insert_employer(&self, user_id: UserId, user: UserRow, employer: EmployerRow) {
        let mut tables = self.tables();
        tables.users.insert(
            user_id,
            UserRow {
                user_type: UserType::Employer,
                ..user
            },
        );
        tables.employers.insert(user_id, employer);
    }

    /// Seed a freelancer account.
    pub fn insert_freelancer(&self, user_id: UserId, user: UserRow, freelancer: FreelancerRow) {
        let mut tables = self.tables();
        tables.users.insert(
            user_id,
            UserRow {
                user_type: UserType::Freelancer,
                ..user
            },
        );
        tables.freelancers.insert(user_id, freelancer);
    }

    pub fn user(&self, user_id: UserId) -> Option<UserRow> {
        self.tables().users.get(&user_id).cloned()
    }

    pub fn employer(&self, user_id: UserId) -> Option<EmployerRow> {
        self.tables().employers.get(&user_id).cloned()
    }

    pub fn freelancer(&self, user_id: UserId) -> Option<FreelancerRow> {
        self.tables().freelancers.get(&user_id).cloned()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn read_profile(
        &self,
        user_id: UserId,
        user_type: UserType,
    ) -> Result<Profile, StoreError> {
        let tables = self.tables();
        let not_found = || StoreError::NotFound { user_id, user_type };
        let user = tables.users.get(&user_id).ok_or_else(not_found)?;
        match user_type {
            UserType::Employer => {
                let employer = tables.employers.get(&user_id).ok_or_else(not_found)?;
                Ok(Profile::Employer(EmployerProfile {
                    name: user.name.clone(),
                    location: user.location.clone(),
                    budget: employer.budget,
                    employer_id: employer.id,
                }))
            }
            UserType::Freelancer => {
                let freelancer = tables.freelancers.get(&user_id).ok_or_else(not_found)?;
                Ok(Profile::Freelancer(FreelancerProfile {
                    name: user.name.clone(),
                    location: user.location.clone(),
                    bio: freelancer.bio.clone(),
                    profile_picture: freelancer.profile_picture.clone(),
                }))
            }
        }
    }

    async fn write_employer(
        &self,
        user_id: UserId,
        fields: &EmployerFields,
    ) -> Result<(), StoreError> {
        self.tables().write_employer(user_id, fields);
        Ok(())
    }

    async fn write_freelancer(
        &self,
        user_id: UserId,
        fields: &FreelancerFields,
    ) -> Result<(), StoreError> {
        self.tables().write_freelancer(user_id, fields);
        Ok(())
    }

    async fn write_user(&self, user_id: UserId, fields: &UserFields) -> Result<(), StoreError> {
        self.tables().write_user(user_id, fields);
        Ok(())
    }

    async fn apply_update(&self, user_id: UserId, update: &ProfileUpdate) -> Result<(), StoreError> {
        // One lock for the whole submission
        let mut tables = self.tables();
        match &update.details {
            DetailsUpdate::Employer(fields) => tables.write_employer(user_id, fields),
            DetailsUpdate::Freelancer(fields) => tables.write_freelancer(user_id, fields),
        }
        tables.write_user(user_id, &update.user);
        Ok(())
    }
}
