//! # Edit-profile routes
//!
//! | Route | Handler | Flow |
//! |-------|---------|------|
//! | `GET /edit-profile` | [`edit_profile`] | session guard → [`ProfileStore::read_profile`](store::ProfileStore::read_profile) → [`EditProfileView`] → HTML or JSON |
//! | `POST /edit-profile` | [`update_profile`] | session guard → [`ProfileForm::into_update`] → [`ProfileStore::apply_update`](store::ProfileStore::apply_update) → redirect or JSON ack |
//!
//! Both handlers take a [`CurrentUser`](crate::auth::CurrentUser), so an
//! unauthenticated request never reaches the store.

mod form;
mod handlers;
mod view;

pub use form::{BodyFormat, ProfileForm, Submission};
pub use handlers::{edit_profile, update_profile, UpdateAck, EDIT_PROFILE_PATH, PROFILE_UPDATED};
pub use view::{EditProfileView, EmployerView, FreelancerView, UserView};
