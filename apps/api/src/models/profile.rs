use serde::{Deserialize, Serialize};

/// Sender/recipient details plus free-text notes. Read by every gateway call.
///
/// There is exactly one profile per session; it is mutated field-by-field and
/// replaced wholesale on reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: String,
    pub position: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub recipient_name: String,
    pub recipient_title: String,
    pub recipient_company: String,
    pub custom_notes: String,
}

/// Keys accepted by the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FullName,
    Position,
    CompanyName,
    Email,
    Phone,
    RecipientName,
    RecipientTitle,
    RecipientCompany,
    CustomNotes,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            full_name: "Alex Johnson".to_string(),
            position: "Senior Manager".to_string(),
            company_name: "Acme Corp".to_string(),
            email: "alex.j@acme.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            recipient_name: "Sarah Connor".to_string(),
            recipient_title: "Software Engineer".to_string(),
            recipient_company: "Acme Corp".to_string(),
            custom_notes: "Excessive absenteeism. 3 days missed without notice.".to_string(),
        }
    }
}

impl Profile {
    pub fn set(&mut self, field: ProfileField, value: String) {
        *self.field_mut(field) = value;
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FullName => &self.full_name,
            ProfileField::Position => &self.position,
            ProfileField::CompanyName => &self.company_name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::RecipientName => &self.recipient_name,
            ProfileField::RecipientTitle => &self.recipient_title,
            ProfileField::RecipientCompany => &self.recipient_company,
            ProfileField::CustomNotes => &self.custom_notes,
        }
    }

    pub fn reset(&mut self) {
        *self = Profile::default();
    }

    /// True when the notes field has nothing to write about.
    pub fn notes_are_empty(&self) -> bool {
        self.custom_notes.is_empty()
    }

    fn field_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::FullName => &mut self.full_name,
            ProfileField::Position => &mut self.position,
            ProfileField::CompanyName => &mut self.company_name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::RecipientName => &mut self.recipient_name,
            ProfileField::RecipientTitle => &mut self.recipient_title,
            ProfileField::RecipientCompany => &mut self.recipient_company,
            ProfileField::CustomNotes => &mut self.custom_notes,
        }
    }
}
