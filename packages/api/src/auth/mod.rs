//! Session-based authentication for the profile routes.
//!
//! Logging in happens elsewhere; this module only reads the identity the login
//! flow stored in the session and rejects requests that carry none.

mod session;

pub use session::{
    CurrentUser, Flash, SESSION_EMAIL_KEY, SESSION_FLASH_KEY, SESSION_USER_ID_KEY,
    SESSION_USER_TYPE_KEY,
};
