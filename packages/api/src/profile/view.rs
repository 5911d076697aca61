//! View data for the edit-profile page.
//!
//! The same structure feeds the HTML template and the JSON representation, so
//! the keys are stable: `user { name, location, type }`, then exactly one of
//! `employer { budget, id }` or `freelancer { bio, profile_picture }`, then
//! `email`. Absent columns render as empty strings.

use rust_decimal::Decimal;
use serde::Serialize;
use store::{Profile, UserType};

use crate::auth::Flash;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployerView {
    pub budget: Option<Decimal>,
    pub id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreelancerView {
    pub bio: String,
    pub profile_picture: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditProfileView {
    pub user: UserView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer: Option<EmployerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freelancer: Option<FreelancerView>,
    /// Taken from the session, not from the profile query.
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

impl EditProfileView {
    pub fn new(profile: Profile, email: Option<String>) -> Self {
        let user_type = profile.user_type();
        let (name, location, employer, freelancer) = match profile {
            Profile::Employer(p) => (
                p.name,
                p.location,
                Some(EmployerView {
                    budget: p.budget,
                    id: p.employer_id,
                }),
                None,
            ),
            Profile::Freelancer(p) => (
                p.name,
                p.location,
                None,
                Some(FreelancerView {
                    bio: p.bio.unwrap_or_default(),
                    profile_picture: p.profile_picture.unwrap_or_default(),
                }),
            ),
        };

        Self {
            user: UserView {
                name: name.unwrap_or_default(),
                location: location.unwrap_or_default(),
                user_type,
            },
            employer,
            freelancer,
            email,
            flash: None,
        }
    }

    pub fn with_flash(mut self, flash: Option<Flash>) -> Self {
        self.flash = flash;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store::{EmployerProfile, FreelancerProfile};

    #[test]
    fn test_employer_view_keys() {
        let profile = Profile::Employer(EmployerProfile {
            name: Some("Acme".to_string()),
            location: Some("Boulder".to_string()),
            budget: Some(Decimal::from(5000)),
            employer_id: 10,
        });
        let view = EditProfileView::new(profile, Some("hr@acme.test".to_string()));

        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "user": { "name": "Acme", "location": "Boulder", "type": "employer" },
                "employer": { "budget": "5000", "id": 10 },
                "email": "hr@acme.test",
            })
        );
    }

    #[test]
    fn test_freelancer_view_keys() {
        let profile = Profile::Freelancer(FreelancerProfile {
            name: Some("Ada".to_string()),
            location: None,
            bio: Some("Rust developer".to_string()),
            profile_picture: None,
        });
        let view = EditProfileView::new(profile, None)
            .with_flash(Some(Flash::success("Profile updated successfully")));

        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "user": { "name": "Ada", "location": "", "type": "freelancer" },
                "freelancer": { "bio": "Rust developer", "profile_picture": "" },
                "email": null,
                "flash": { "kind": "success", "message": "Profile updated successfully" },
            })
        );
    }
}
