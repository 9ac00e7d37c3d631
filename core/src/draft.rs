//! Client-side form drafts and their validation.

use thiserror::Error;

use crate::types::CreateSpyCat;

/// Unsaved text input for a new spy cat, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatDraft {
    pub name: String,
    pub years_of_experience: String,
    pub breed: String,
    pub salary: String,
}

/// Why a draft was rejected before reaching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    /// A field is blank or a number failed to parse.
    #[error("Please fill all fields correctly.")]
    Incomplete,
    #[error("Years of experience cannot be negative")]
    NegativeExperience,
    #[error("Salary must be greater than 0")]
    NonPositiveSalary,
}

/// Names accepted by [`CatDraft::set_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    YearsOfExperience,
    Breed,
    Salary,
}

impl DraftField {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(DraftField::Name),
            "years" | "experience" | "years_of_experience" => Some(DraftField::YearsOfExperience),
            "breed" => Some(DraftField::Breed),
            "salary" => Some(DraftField::Salary),
            _ => None,
        }
    }
}

impl CatDraft {
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::Name => &mut self.name,
            DraftField::YearsOfExperience => &mut self.years_of_experience,
            DraftField::Breed => &mut self.breed,
            DraftField::Salary => &mut self.salary,
        };
        *slot = value.into();
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validate and convert into the create payload.
    ///
    /// Name and breed are trimmed; experience must be a whole number and
    /// salary a finite number above zero.
    pub fn validate(&self) -> Result<CreateSpyCat, DraftError> {
        let name = self.name.trim();
        let breed = self.breed.trim();
        if name.is_empty() || breed.is_empty() {
            return Err(DraftError::Incomplete);
        }

        let years: i64 = self
            .years_of_experience
            .trim()
            .parse()
            .map_err(|_| DraftError::Incomplete)?;
        let salary = parse_amount(&self.salary).ok_or(DraftError::Incomplete)?;

        if years < 0 {
            return Err(DraftError::NegativeExperience);
        }
        if salary <= 0.0 {
            return Err(DraftError::NonPositiveSalary);
        }
        let years_of_experience = u32::try_from(years).map_err(|_| DraftError::Incomplete)?;

        Ok(CreateSpyCat {
            name: name.to_string(),
            years_of_experience,
            breed: breed.to_string(),
            salary,
        })
    }

    pub fn clear(&mut self) {
        *self = CatDraft::default();
    }
}

/// Parse a typed money amount. NaN and infinities count as unparsable.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
