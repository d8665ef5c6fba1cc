//! Client-side form validation.
//!
//! Errors are collected per field so the views can render them inline next
//! to each input. Messages are in Portuguese, as shown to the user.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::FieldErrors;

static PERSON_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-ZÀ-ÿ\s]+$").expect("valid person name regex")
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?\d{2}\)?[\s-]?\d{4,5}[\s-]?\d{4}$").expect("valid phone regex")
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

pub type ValidationResult<T> = Result<T, FieldErrors>;

/// Validator builder for form validations
#[derive(Debug, Default)]
pub struct Validator {
    details: BTreeMap<String, Vec<String>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add error for a field
    pub fn error(mut self, field: &str, message: &str) -> Self {
        self.details
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
        self
    }

    /// Add error if condition is true
    pub fn error_if(self, condition: bool, field: &str, message: &str) -> Self {
        if condition {
            self.error(field, message)
        } else {
            self
        }
    }

    /// Non-blank after trimming
    pub fn required(self, value: &str, field: &str, message: &str) -> Self {
        self.error_if(value.trim().is_empty(), field, message)
    }

    /// Character count within `min..=max`
    pub fn length(self, value: &str, field: &str, min: usize, max: usize, message: &str) -> Self {
        let len = value.chars().count();
        self.error_if(len < min || len > max, field, message)
    }

    pub fn matches(self, value: &str, regex: &Regex, field: &str, message: &str) -> Self {
        self.error_if(!regex.is_match(value), field, message)
    }

    pub fn range(self, value: Decimal, field: &str, min: Decimal, max: Decimal, message: &str) -> Self {
        self.error_if(value < min || value > max, field, message)
    }

    pub fn is_valid(&self) -> bool {
        self.details.is_empty()
    }

    /// Finish validation, returning error if any
    pub fn finish(self) -> ValidationResult<()> {
        if self.details.is_empty() {
            Ok(())
        } else {
            Err(FieldErrors(self.details))
        }
    }

    /// Finish with a value if valid
    pub fn finish_with<T>(self, value: T) -> ValidationResult<T> {
        self.finish()?;
        Ok(value)
    }
}

/// Contact name: 2..=100 letters (Latin-1 accents allowed) and spaces.
pub fn customer_name(validator: Validator, name: &str) -> Validator {
    if name.is_empty() {
        return validator.error("name", "Nome é obrigatório");
    }
    validator
        .error_if(name.chars().count() < 2, "name", "Nome deve ter pelo menos 2 caracteres")
        .error_if(name.chars().count() > 100, "name", "Nome deve ter no máximo 100 caracteres")
        .matches(name, &PERSON_NAME_REGEX, "name", "Nome deve conter apenas letras e espaços")
}

/// Brazilian phone: (XX) XXXXX-XXXX or (XX) XXXX-XXXX, parens and separators optional.
pub fn customer_phone(validator: Validator, phone: &str) -> Validator {
    if phone.is_empty() {
        return validator.error("phone", "Telefone é obrigatório");
    }
    validator.matches(
        phone,
        &PHONE_REGEX,
        "phone",
        "Formato inválido. Use: (XX) XXXXX-XXXX ou (XX) XXXX-XXXX",
    )
}

/// Login form
pub fn login(email: &str, password: &str) -> ValidationResult<()> {
    Validator::new()
        .matches(email.trim(), &EMAIL_REGEX, "email", "Digite um email válido")
        .error_if(
            password.chars().count() < 6,
            "password",
            "A senha deve ter pelo menos 6 caracteres",
        )
        .finish()
}

/// New organization form
pub fn organization_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();
    Validator::new()
        .length(name, "name", 2, 15, "O nome deve ter entre 2 e 15 caracteres")
        .finish_with(name.to_string())
}

/// Raw inputs of the service form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub duration: String,
    pub observations: String,
}

/// Parsed and validated service fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidService {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub duration: u32,
    pub observations: String,
}

impl ServiceForm {
    pub fn validate(&self) -> ValidationResult<ValidService> {
        // Accept the pt-BR decimal comma as well
        let price = self.price.trim().replace(',', ".").parse::<Decimal>().ok();
        let duration = self.duration.trim().parse::<u32>().ok();

        let mut validator = Validator::new()
            .length(&self.name, "name", 2, 15, "O nome deve ter entre 2 e 15 caracteres")
            .length(
                &self.description,
                "description",
                2,
                60,
                "A descrição deve ter entre 2 e 60 caracteres",
            )
            .length(
                &self.observations,
                "observations",
                2,
                1000,
                "As observações devem ter entre 2 e 1000 caracteres",
            );

        validator = match price {
            Some(price) => validator.range(
                price,
                "price",
                Decimal::ONE,
                Decimal::from(1000),
                "O preço deve estar entre 1 e 1000",
            ),
            None => validator.error("price", "O preço deve estar entre 1 e 1000"),
        };
        validator = match duration {
            Some(duration) => validator.error_if(
                !(1..=1000).contains(&duration),
                "duration",
                "A duração deve estar entre 1 e 1000",
            ),
            None => validator.error("duration", "A duração deve estar entre 1 e 1000"),
        };

        validator.finish()?;
        Ok(ValidService {
            name: self.name.clone(),
            description: self.description.clone(),
            price: price.unwrap_or_default(),
            duration: duration.unwrap_or_default(),
            observations: self.observations.clone(),
        })
    }
}

/// Space of service form: name 2..=15, description 2..=60.
pub fn space_of_service(name: &str, description: &str) -> ValidationResult<()> {
    Validator::new()
        .length(name, "name", 2, 15, "O nome deve ter entre 2 e 15 caracteres")
        .length(
            description,
            "description",
            2,
            60,
            "A descrição deve ter entre 2 e 60 caracteres",
        )
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, phone: &str) -> ValidationResult<()> {
        customer_phone(customer_name(Validator::new(), name), phone).finish()
    }

    #[test]
    fn test_valid_contacts() {
        assert!(contact("Ana Souza", "(11) 99999-9999").is_ok());
        assert!(contact("José Antônio", "11 3333-4444").is_ok());
        assert!(contact("Bia", "11999999999").is_ok());
    }

    #[test]
    fn test_contact_name_rules() {
        let err = contact("", "11999999999").unwrap_err();
        assert_eq!(err.first("name"), Some("Nome é obrigatório"));

        let err = contact("A", "11999999999").unwrap_err();
        assert_eq!(err.first("name"), Some("Nome deve ter pelo menos 2 caracteres"));

        let err = contact("R2D2", "11999999999").unwrap_err();
        assert_eq!(err.first("name"), Some("Nome deve conter apenas letras e espaços"));

        let long = "a".repeat(101);
        assert!(contact(&long, "11999999999").unwrap_err().has("name"));
    }

    #[test]
    fn test_contact_phone_rules() {
        assert!(contact("Ana", "").unwrap_err().has("phone"));
        assert!(contact("Ana", "12345").unwrap_err().has("phone"));
        assert!(contact("Ana", "(11) 9999-99999").unwrap_err().has("phone"));
    }

    #[test]
    fn test_login_validation() {
        assert!(login("ana@example.com", "secret1").is_ok());
        let err = login("ana", "123").unwrap_err();
        assert!(err.has("email"));
        assert!(err.has("password"));
    }

    #[test]
    fn test_organization_name_is_trimmed() {
        assert_eq!(organization_name("  Studio  ").unwrap(), "Studio");
        assert!(organization_name("A").is_err());
        assert!(organization_name("Nome muito comprido").is_err());
    }

    #[test]
    fn test_service_form() {
        let form = ServiceForm {
            name: "Corte".to_string(),
            description: "Corte masculino".to_string(),
            price: "45,50".to_string(),
            duration: "30".to_string(),
            observations: "Inclui lavagem".to_string(),
        };
        let valid = form.validate().unwrap();
        assert_eq!(valid.price, Decimal::new(4550, 2));
        assert_eq!(valid.duration, 30);

        let err = ServiceForm {
            price: "0".to_string(),
            duration: "abc".to_string(),
            ..form
        }
        .validate()
        .unwrap_err();
        assert!(err.has("price"));
        assert!(err.has("duration"));
        assert!(!err.has("name"));
    }

    #[test]
    fn test_space_of_service_validation() {
        assert!(space_of_service("Sala 1", "Sala com maca").is_ok());
        let err = space_of_service("S", "").unwrap_err();
        assert!(err.has("name"));
        assert!(err.has("description"));
    }
}
