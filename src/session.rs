//! Per-conversation session context.
//!
//! Created once per logical conversation and passed into every pipeline
//! call — there is no global session state.

use uuid::Uuid;

/// Exactly five ASCII digits.
pub fn is_valid_zip(s: &str) -> bool {
    s.len() == 5 && s.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    user_id: String,
    session_id: Uuid,
    zip_code: Option<String>,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: Uuid::new_v4(),
            zip_code: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn zip_code(&self) -> Option<&str> {
        self.zip_code.as_deref()
    }

    /// Set the session location. Returns `false` (session unchanged) when
    /// `zip` is not five ASCII digits.
    pub fn set_zip(&mut self, zip: &str) -> bool {
        if !is_valid_zip(zip) {
            return false;
        }
        self.zip_code = Some(zip.to_string());
        true
    }
}
