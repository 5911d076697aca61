//! # Domain models for job-board profiles
//!
//! Every account on the job board is either an employer or a freelancer. The shared
//! columns live in `app_user`; the type-specific columns live in exactly one of
//! `employer` or `freelancer`, joined on `user_id`.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`UserType`] | The account kind stored in the session. Parsed once, matched exhaustively afterwards. |
//! | [`Budget`] | A validated, non-negative employer budget. |
//! | [`Profile`] | The joined row read for the edit-profile page, one variant per [`UserType`]. |
//! | [`UserFields`], [`EmployerFields`], [`FreelancerFields`] | Partial updates. `None` keeps the stored value. |
//! | [`ProfileUpdate`] | One form submission, already narrowed to the session's [`UserType`]. |

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Primary key of `app_user`.
pub type UserId = i32;

/// Kind of account, as stored in `app_user.type` and in the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Employer,
    Freelancer,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Employer => "employer",
            UserType::Freelancer => "freelancer",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user type string that is neither `employer` nor `freelancer`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown user type {0:?}")]
pub struct UnknownUserType(pub String);

impl FromStr for UserType {
    type Err = UnknownUserType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employer" => Ok(UserType::Employer),
            "freelancer" => Ok(UserType::Freelancer),
            other => Err(UnknownUserType(other.to_string())),
        }
    }
}

/// Rejected budget input: not a number, or negative.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid budget value {0:?}")]
pub struct InvalidBudget(pub String);

/// Employer budget. Always `>= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Budget(Decimal);

impl Budget {
    pub fn new(amount: Decimal) -> Result<Self, InvalidBudget> {
        if amount < Decimal::ZERO {
            return Err(InvalidBudget(amount.to_string()));
        }
        Ok(Self(amount))
    }

    /// Parse user input. Accepts plain decimals (`"1500"`, `"99.95"`) and
    /// scientific notation (`"1e3"`). Digit separators (`"1_000"`) are not
    /// numbers to a user and are rejected.
    pub fn parse(input: &str) -> Result<Self, InvalidBudget> {
        let trimmed = input.trim();
        if trimmed.contains('_') {
            return Err(InvalidBudget(input.to_string()));
        }
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| InvalidBudget(input.to_string()))?;
        Self::new(amount).map_err(|_| InvalidBudget(input.to_string()))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// `app_user` joined with `employer`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmployerProfile {
    pub name: Option<String>,
    pub location: Option<String>,
    pub budget: Option<Decimal>,
    /// `employer.id`, not the user id.
    pub employer_id: i32,
}

/// `app_user` joined with `freelancer`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FreelancerProfile {
    pub name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
}

/// Profile data for the edit-profile page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Profile {
    Employer(EmployerProfile),
    Freelancer(FreelancerProfile),
}

impl Profile {
    pub fn user_type(&self) -> UserType {
        match self {
            Profile::Employer(_) => UserType::Employer,
            Profile::Freelancer(_) => UserType::Freelancer,
        }
    }
}

/// Columns of `app_user` a user may edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFields {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl UserFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none()
    }
}

/// Columns of `employer` a user may edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployerFields {
    pub budget: Option<Budget>,
}

impl EmployerFields {
    pub fn is_empty(&self) -> bool {
        self.budget.is_none()
    }
}

/// Columns of `freelancer` a user may edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FreelancerFields {
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
}

impl FreelancerFields {
    pub fn is_empty(&self) -> bool {
        self.bio.is_none() && self.profile_picture.is_none()
    }
}

/// Type-specific half of a [`ProfileUpdate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailsUpdate {
    Employer(EmployerFields),
    Freelancer(FreelancerFields),
}

impl DetailsUpdate {
    pub fn is_empty(&self) -> bool {
        match self {
            DetailsUpdate::Employer(fields) => fields.is_empty(),
            DetailsUpdate::Freelancer(fields) => fields.is_empty(),
        }
    }
}

/// A validated edit-profile submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub user: UserFields,
    pub details: DetailsUpdate,
}

impl ProfileUpdate {
    pub fn user_type(&self) -> UserType {
        match self.details {
            DetailsUpdate::Employer(_) => UserType::Employer,
            DetailsUpdate::Freelancer(_) => UserType::Freelancer,
        }
    }

    /// True when applying the update would not touch any column.
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.details.is_empty()
    }
}
