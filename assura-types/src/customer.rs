use serde::{Deserialize, Serialize};

/// Raw values of the customer form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    pub age: String,
    pub policy_number: String,
}

/// Customer data sent to the document generator. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub name: String,
    pub age: Option<u32>,
    #[serde(
        rename = "policyNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub policy_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_type: Option<String>,
}

impl CustomerRecord {
    /// Build a record from form input.
    ///
    /// No field is required. An age that does not parse as a whole number
    /// becomes `None` and goes out as `"age": null`.
    pub fn from_form(form: &CustomerForm) -> Self {
        Self {
            name: form.name.clone(),
            age: form.age.trim().parse().ok(),
            policy_number: Some(form.policy_number.clone()),
            insurance_type: None,
        }
    }
}

/// Body of `POST <document endpoint>`.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRequest<'a> {
    pub customer_data: &'a CustomerRecord,
}

/// Response of the document generator. Only `contract` is read.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentResponse {
    #[serde(default)]
    pub contract: Option<String>,
}
