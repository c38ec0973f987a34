use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Details collected from the user before the Q&A phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserField {
    FirstName,
    LastName,
    IdNumber,
    Gender,
    Age,
    HmoName,
    InsuranceMembershipTier,
    HmoCardNumber,
}

impl UserField {
    pub const ALL: [UserField; 8] = [
        UserField::FirstName,
        UserField::LastName,
        UserField::IdNumber,
        UserField::Gender,
        UserField::Age,
        UserField::HmoName,
        UserField::InsuranceMembershipTier,
        UserField::HmoCardNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::FirstName => "first_name",
            UserField::LastName => "last_name",
            UserField::IdNumber => "id_number",
            UserField::Gender => "gender",
            UserField::Age => "age",
            UserField::HmoName => "hmo_name",
            UserField::InsuranceMembershipTier => "insurance_membership_tier",
            UserField::HmoCardNumber => "hmo_card_number",
        }
    }

    /// "first_name" -> "First name"
    pub fn label(&self) -> String {
        let spaced = self.as_str().replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn validate(&self, value: &str) -> Result<(), FieldValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(self.invalid(format!("{} cannot be empty.", self.label())));
        }

        match self {
            UserField::FirstName | UserField::LastName => {
                if !value.chars().all(char::is_alphabetic) {
                    return Err(self.invalid(format!(
                        "{} must contain only alphabetic characters.",
                        self.label()
                    )));
                }
            }
            UserField::IdNumber => {
                if !is_nine_digits(value) {
                    return Err(self.invalid("ID number must be exactly 9 digits."));
                }
            }
            UserField::Gender => {
                if !VALID_GENDERS.contains(&value.to_lowercase().as_str()) {
                    return Err(self.invalid("Gender must be male, female, or other."));
                }
            }
            UserField::Age => match value.parse::<i64>() {
                Ok(age) if (0..=120).contains(&age) => {}
                Ok(_) => return Err(self.invalid("Age must be a number between 0 and 120.")),
                Err(_) => return Err(self.invalid("Age must be a valid number.")),
            },
            UserField::HmoName => {
                if !VALID_HMOS.contains(&value.to_lowercase().as_str()) {
                    return Err(self.invalid("HMO name must be one of: Maccabi, Meuhedet, Clalit."));
                }
            }
            UserField::InsuranceMembershipTier => {
                if !VALID_TIERS.contains(&value) {
                    return Err(self.invalid(
                        "Insurance membership tier must be gold, silver, or bronze.",
                    ));
                }
            }
            UserField::HmoCardNumber => {
                if !is_nine_digits(value) {
                    return Err(self.invalid("HMO card number must be exactly 9 digits."));
                }
            }
        }

        Ok(())
    }

    fn invalid(&self, message: impl Into<String>) -> FieldValidationError {
        FieldValidationError {
            field: *self,
            message: message.into(),
        }
    }
}

const VALID_GENDERS: [&str; 6] = ["male", "female", "other", "זכר", "נקבה", "אחר"];
const VALID_HMOS: [&str; 6] = ["מכבי", "מאוחדת", "כללית", "maccabi", "meuhedet", "clalit"];
const VALID_TIERS: [&str; 9] = [
    "זהב", "כסף", "ארד", "gold", "silver", "bronze", "Gold", "Silver", "Bronze",
];

fn is_nine_digits(value: &str) -> bool {
    value.len() == 9 && value.chars().all(|c| c.is_ascii_digit())
}

impl FromStr for UserField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("Unknown user field: {}", s))
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldValidationError {
    pub field: UserField,
    pub message: String,
}

/// Collected user details keyed by field name.
///
/// Keys outside [`UserField`] are kept as-is so that whatever the client sent
/// is echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    values: BTreeMap<String, String>,
}

impl UserInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    pub fn get(&self, field: UserField) -> Option<&str> {
        self.values.get(field.as_str()).map(String::as_str)
    }

    pub fn set(&mut self, field: UserField, value: impl Into<String>) {
        self.values.insert(field.as_str().to_string(), value.into());
    }

    pub fn merge(&mut self, other: &UserInfo) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Required fields that are absent or blank, in canonical order.
    pub fn missing_fields(&self) -> Vec<UserField> {
        UserField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }
}
