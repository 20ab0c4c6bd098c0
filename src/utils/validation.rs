use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

use crate::error::{AppError, AppResult};

static TICKET_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,6}$").expect("valid ticket number pattern"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// 彩票号码: 1-6 位 ASCII 数字
pub fn validate_ticket_number(number: &str) -> AppResult<()> {
    if !TICKET_NUMBER_RE.is_match(number) {
        return Err(AppError::ValidationError(
            "Ticket number must have between 1 and 6 digits".to_string(),
        ));
    }
    Ok(())
}

/// 价格列为 DECIMAL(12, 2)
// 999_999_999_999 × 10^-2 (Decimal::new 不是 const fn)
const MAX_PRICE: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

/// 价格: 大于 0，最多两位小数，不超过 9999999999.99
pub fn validate_price(price: Decimal) -> AppResult<()> {
    if price <= Decimal::ZERO {
        return Err(AppError::ValidationError(
            "Price must be greater than 0".to_string(),
        ));
    }
    if price.normalize().scale() > 2 {
        return Err(AppError::ValidationError(
            "Price must have at most 2 decimal places".to_string(),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::ValidationError(format!(
            "Price must not exceed {}",
            MAX_PRICE
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> AppResult<()> {
    require_non_blank(email, "email")?;
    if !EMAIL_RE.is_match(email) {
        return Err(AppError::ValidationError(
            "Email format is invalid".to_string(),
        ));
    }
    Ok(())
}

pub fn require_non_blank(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_ticket_number() {
        assert!(validate_ticket_number("0001").is_ok());
        assert!(validate_ticket_number("7").is_ok());
        assert!(validate_ticket_number("999999").is_ok());
        assert!(validate_ticket_number("").is_err());
        assert!(validate_ticket_number("1234567").is_err());
        assert!(validate_ticket_number("12a4").is_err());
        assert!(validate_ticket_number(" 123").is_err());
        // 非 ASCII 数字
        assert!(validate_ticket_number("١٢٣").is_err());
        assert!(validate_ticket_number("１２３").is_err());
        assert!(validate_ticket_number("०१").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(dec!(10000)).is_ok());
        assert!(validate_price(dec!(10000.50)).is_ok());
        assert!(validate_price(dec!(0.01)).is_ok());
        assert!(validate_price(dec!(12.500)).is_ok());
        assert!(validate_price(dec!(9999999999.99)).is_ok());
        assert!(validate_price(dec!(0)).is_err());
        assert!(validate_price(dec!(-5)).is_err());
        assert!(validate_price(dec!(0.001)).is_err());
        assert!(validate_price(dec!(10000000000)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("Jane.Doe@Example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@x").is_err());
        assert!(validate_email("a b@x.com").is_err());
    }

    #[test]
    fn test_require_non_blank() {
        assert!(require_non_blank("Jane", "name").is_ok());
        match require_non_blank("  ", "name") {
            Err(AppError::ValidationError(msg)) => assert_eq!(msg, "name is required"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
