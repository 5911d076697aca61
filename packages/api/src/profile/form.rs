//! Edit-profile submissions: body extraction and validation.

use std::fmt;

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use store::{
    Budget, DetailsUpdate, EmployerFields, FreelancerFields, InvalidBudget, ProfileUpdate,
    UserFields, UserType,
};

use crate::errors::ProfileError;

/// Raw fields of an edit-profile submission. Every field is optional: a
/// missing field (or JSON `null`) keeps the stored value, while an empty text
/// field is written as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileForm {
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub budget: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
}

/// A blank budget carries no number, so it counts as not supplied.
fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ProfileForm {
    /// Validate the fields that belong to `user_type` and drop the rest.
    pub fn into_update(self, user_type: UserType) -> Result<ProfileUpdate, InvalidBudget> {
        let details = match user_type {
            UserType::Employer => DetailsUpdate::Employer(EmployerFields {
                budget: supplied(self.budget)
                    .map(|budget| Budget::parse(&budget))
                    .transpose()?,
            }),
            UserType::Freelancer => DetailsUpdate::Freelancer(FreelancerFields {
                bio: self.bio,
                profile_picture: self.profile_picture,
            }),
        };

        Ok(ProfileUpdate {
            user: UserFields {
                name: self.name,
                location: self.location,
            },
            details,
        })
    }
}

/// JSON clients may send the budget as a number; forms always send text.
/// Anything else is kept as text so validation reports it as an invalid budget.
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct BudgetVisitor;

    impl<'de> Visitor<'de> for BudgetVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a budget as a number or a string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(BudgetVisitor)
}

/// How the client submitted the form, which decides the success response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Form,
    Json,
}

/// A submission extracted from either a URL-encoded or a JSON body.
#[derive(Debug)]
pub struct Submission {
    pub form: ProfileForm,
    pub format: BodyFormat,
}

impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = ProfileError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(form) = Json::<ProfileForm>::from_request(req, state)
                .await
                .map_err(|rejection| ProfileError::InvalidBody(rejection.body_text()))?;
            Ok(Self {
                form,
                format: BodyFormat::Json,
            })
        } else {
            let Form(form) = Form::<ProfileForm>::from_request(req, state)
                .await
                .map_err(|rejection| ProfileError::InvalidBody(rejection.body_text()))?;
            Ok(Self {
                form,
                format: BodyFormat::Form,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn form(fields: &[(&str, &str)]) -> ProfileForm {
        let mut form = ProfileForm::default();
        for (key, value) in fields {
            let value = Some(value.to_string());
            match *key {
                "name" => form.name = value,
                "location" => form.location = value,
                "budget" => form.budget = value,
                "bio" => form.bio = value,
                "profile_picture" => form.profile_picture = value,
                other => panic!("unexpected field {other}"),
            }
        }
        form
    }

    #[test]
    fn test_employer_update() {
        let update = form(&[("name", "Acme"), ("budget", "2500")])
            .into_update(UserType::Employer)
            .unwrap();

        assert_eq!(update.user.name.as_deref(), Some("Acme"));
        assert_eq!(update.user.location, None);
        assert_eq!(
            update.details,
            DetailsUpdate::Employer(EmployerFields {
                budget: Some(Budget::new(Decimal::from(2500)).unwrap()),
            })
        );
    }

    #[test]
    fn test_invalid_budget() {
        assert_eq!(
            form(&[("budget", "-5")]).into_update(UserType::Employer),
            Err(InvalidBudget("-5".to_string()))
        );
        assert_eq!(
            form(&[("budget", "abc")]).into_update(UserType::Employer),
            Err(InvalidBudget("abc".to_string()))
        );
    }

    #[test]
    fn test_freelancer_ignores_budget() {
        // Budget is not a freelancer field, so it is neither validated nor applied
        let update = form(&[("bio", "Rust developer"), ("budget", "abc")])
            .into_update(UserType::Freelancer)
            .unwrap();

        assert_eq!(
            update.details,
            DetailsUpdate::Freelancer(FreelancerFields {
                bio: Some("Rust developer".to_string()),
                profile_picture: None,
            })
        );
    }

    #[test]
    fn test_employer_ignores_freelancer_fields() {
        let update = form(&[("bio", "hello"), ("profile_picture", "x.png")])
            .into_update(UserType::Employer)
            .unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_blank_budget_is_absent() {
        let update = form(&[("budget", "  ")])
            .into_update(UserType::Employer)
            .unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_empty_text_fields_are_written() {
        let update = form(&[("location", ""), ("bio", "")])
            .into_update(UserType::Freelancer)
            .unwrap();

        assert!(!update.is_empty());
        assert_eq!(update.user.name, None);
        assert_eq!(update.user.location.as_deref(), Some(""));
        assert_eq!(
            update.details,
            DetailsUpdate::Freelancer(FreelancerFields {
                bio: Some(String::new()),
                profile_picture: None,
            })
        );
    }

    #[test]
    fn test_json_budget_number() {
        let form: ProfileForm = serde_json::from_str(r#"{"budget": 1200.5}"#).unwrap();
        assert_eq!(form.budget.as_deref(), Some("1200.5"));

        let form: ProfileForm = serde_json::from_str(r#"{"budget": -3}"#).unwrap();
        assert!(form.into_update(UserType::Employer).is_err());

        let form: ProfileForm =
            serde_json::from_str(r#"{"budget": null, "name": "Acme"}"#).unwrap();
        assert_eq!(form.budget, None);
        assert_eq!(form.name.as_deref(), Some("Acme"));

        let form: ProfileForm = serde_json::from_str(r#"{"budget": true}"#).unwrap();
        assert_eq!(
            form.into_update(UserType::Employer),
            Err(InvalidBudget("true".to_string()))
        );
    }
}
