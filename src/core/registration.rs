use std::collections::HashSet;

use crate::models::RegistrationKind;

/// Default email suffix for student accounts
pub const DEFAULT_STUDENT_EMAIL_DOMAIN: &str = "@ucsc.edu";

/// Who may create student and club accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPolicy {
    student_email_domain: String,
    approved_club_emails: HashSet<String>,
}

/// Why an email was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Ineligible {
    #[error("You must use a valid {0} email to sign up")]
    WrongDomain(String),

    #[error("Email is not an approved club email")]
    NotApprovedClub,
}

impl RegistrationPolicy {
    pub fn new<I, S>(student_email_domain: impl Into<String>, approved_club_emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            student_email_domain: student_email_domain.into().to_lowercase(),
            approved_club_emails: approved_club_emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn check(&self, email: &str, kind: RegistrationKind) -> Result<(), Ineligible> {
        let email = email.trim().to_lowercase();
        match kind {
            RegistrationKind::Student => {
                if email.ends_with(&self.student_email_domain) {
                    Ok(())
                } else {
                    Err(Ineligible::WrongDomain(self.student_email_domain.clone()))
                }
            }
            RegistrationKind::Club => {
                if self.approved_club_emails.contains(&email) {
                    Ok(())
                } else {
                    Err(Ineligible::NotApprovedClub)
                }
            }
        }
    }
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_STUDENT_EMAIL_DOMAIN, Vec::<String>::new())
    }
}
