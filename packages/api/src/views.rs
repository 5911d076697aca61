//! HTML rendering with Tera.
//!
//! Templates are compiled into the binary and parsed once at startup. Template
//! names end in `.html` so Tera autoescapes every value, including user-supplied
//! profile fields.

use tera::{Context, Tera};

use crate::profile::EditProfileView;

const LAYOUT: &str = "layout.html";
const EDIT_PROFILE: &str = "edit_profile.html";

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        Self::with_edit_profile(include_str!("../templates/edit_profile.html"))
    }

    pub(crate) fn with_edit_profile(source: &str) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (LAYOUT, include_str!("../templates/layout.html")),
            (EDIT_PROFILE, source),
        ])?;
        Ok(Self { tera })
    }

    pub fn edit_profile(&self, view: &EditProfileView) -> Result<String, tera::Error> {
        let ctx = Context::from_serialize(view)?;
        self.tera.render(EDIT_PROFILE, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Flash;
    use rust_decimal::Decimal;
    use store::{EmployerProfile, FreelancerProfile, Profile};

    #[test]
    fn test_render_employer() {
        let views = Views::new().unwrap();
        let view = EditProfileView::new(
            Profile::Employer(EmployerProfile {
                name: Some("Acme".to_string()),
                location: Some("Boulder".to_string()),
                budget: Some(Decimal::from(5000)),
                employer_id: 10,
            }),
            Some("hr@acme.test".to_string()),
        );

        let html = views.edit_profile(&view).unwrap();
        assert!(html.contains(r#"name="name" type="text" value="Acme""#));
        assert!(html.contains(r#"value="Boulder""#));
        assert!(html.contains(r#"value="5000""#));
        assert!(html.contains("Employer #10"));
        assert!(html.contains("hr@acme.test"));
        assert!(!html.contains(r#"name="bio""#));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn test_render_freelancer_escapes_input() {
        let views = Views::new().unwrap();
        let view = EditProfileView::new(
            Profile::Freelancer(FreelancerProfile {
                name: Some("<script>alert(1)</script>".to_string()),
                location: None,
                bio: Some("Rust developer".to_string()),
                profile_picture: Some("https://img.example.com/ada.png".to_string()),
            }),
            None,
        )
        .with_flash(Some(Flash::success("Profile updated successfully")));

        let html = views.edit_profile(&view).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Rust developer</textarea>"));
        assert!(html.contains("Profile updated successfully"));
        assert!(!html.contains(r#"name="budget""#));
    }
}
