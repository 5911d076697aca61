pub mod models;
pub mod repo;

mod memory;
pub use memory::{EmployerRow, FreelancerRow, MemoryStore, UserRow};

pub use models::{
    Budget, DetailsUpdate, EmployerFields, EmployerProfile, FreelancerFields, FreelancerProfile,
    InvalidBudget, Profile, ProfileUpdate, UnknownUserType, UserFields, UserId, UserType,
};
pub use repo::{ProfileStore, StoreError};
