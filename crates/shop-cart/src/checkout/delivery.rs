//! Delivery details collected on the checkout form.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, FieldError};

static ZIP_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("Invalid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("Invalid regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("Invalid regex")
});

/// Where and to whom an order ships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub mobile_number: String,
    pub email: String,
}

impl DeliveryInfo {
    /// Check every field, collecting all failures.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let mut errors = Vec::new();

        check_length(&mut errors, "firstName", "First name", &self.first_name, 2, Some(50));
        check_length(&mut errors, "lastName", "Last name", &self.last_name, 2, Some(50));
        check_length(&mut errors, "address", "Address", &self.address, 5, None);
        check_length(&mut errors, "city", "City", &self.city, 2, None);
        check_pattern(
            &mut errors,
            "zipCode",
            "Zip code",
            &self.zip_code,
            &ZIP_CODE_RE,
            "Please enter a valid zip code",
        );
        check_pattern(
            &mut errors,
            "mobileNumber",
            "Mobile number",
            &self.mobile_number,
            &PHONE_RE,
            "Please enter a valid phone number",
        );
        check_pattern(
            &mut errors,
            "email",
            "Email",
            &self.email,
            &EMAIL_RE,
            "Please enter a valid email address",
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::InvalidDelivery(errors))
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn check_length(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: &str,
    min: usize,
    max: Option<usize>,
) {
    let len = value.chars().count();
    if len == 0 {
        errors.push(FieldError::new(field, format!("{} is required", label)));
    } else if len < min {
        errors.push(FieldError::new(
            field,
            format!("{} must be at least {} characters", label, min),
        ));
    } else if let Some(max) = max.filter(|max| len > *max) {
        errors.push(FieldError::new(
            field,
            format!("{} must be less than {} characters", label, max),
        ));
    }
}

fn check_pattern(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: &str,
    pattern: &Regex,
    message: &str,
) {
    if value.is_empty() {
        errors.push(FieldError::new(field, format!("{} is required", label)));
    } else if !pattern.is_match(value) {
        errors.push(FieldError::new(field, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> DeliveryInfo {
        DeliveryInfo {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 Analytical Row".to_string(),
            city: "London".to_string(),
            zip_code: "94102".to_string(),
            mobile_number: "+14155550123".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn failed_fields(info: &DeliveryInfo) -> Vec<&'static str> {
        match info.validate() {
            Ok(()) => Vec::new(),
            Err(CheckoutError::InvalidDelivery(errors)) => {
                errors.into_iter().map(|e| e.field).collect()
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_valid_delivery() {
        assert!(valid().validate().is_ok());
        let mut info = valid();
        info.zip_code = "94102-1234".to_string();
        assert!(info.validate().is_ok());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let fields = failed_fields(&DeliveryInfo::default());
        assert_eq!(
            fields,
            vec!["firstName", "lastName", "address", "city", "zipCode", "mobileNumber", "email"]
        );
    }

    #[test]
    fn test_length_rules() {
        let mut info = valid();
        info.first_name = "A".to_string();
        info.last_name = "x".repeat(51);
        info.address = "1 St".to_string();
        info.city = "X".to_string();
        assert_eq!(failed_fields(&info), vec!["firstName", "lastName", "address", "city"]);
    }

    #[test]
    fn test_zip_code_rules() {
        for bad in ["9410", "941023", "94102-12", "abcde"] {
            let mut info = valid();
            info.zip_code = bad.to_string();
            assert_eq!(failed_fields(&info), vec!["zipCode"], "zip {bad}");
        }
    }

    #[test]
    fn test_phone_rules() {
        for good in ["5", "+15551234567", "4155550123"] {
            let mut info = valid();
            info.mobile_number = good.to_string();
            assert!(info.validate().is_ok(), "phone {good}");
        }
        for bad in ["0123456", "+0123", "555-1234", "12345678901234567"] {
            let mut info = valid();
            info.mobile_number = bad.to_string();
            assert_eq!(failed_fields(&info), vec!["mobileNumber"], "phone {bad}");
        }
    }

    #[test]
    fn test_email_rules() {
        for bad in ["plain", "a@", "@b.com", "a@b", "a b@c.com"] {
            let mut info = valid();
            info.email = bad.to_string();
            assert_eq!(failed_fields(&info), vec!["email"], "email {bad}");
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(valid().full_name(), "Ada Lovelace");
    }
}
