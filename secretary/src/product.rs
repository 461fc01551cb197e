use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ArgumentError;

pub const MIN_PAYMENT_DAY: u32 = 1;
pub const MAX_PAYMENT_DAY: u32 = 31;

/// A recurring monthly expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub sum: i64,
    pub payment_day: u32,
}

impl Product {
    pub fn new(name: impl Into<String>, sum: i64, payment_day: u32) -> Self {
        Self {
            name: name.into(),
            sum,
            payment_day,
        }
    }

    /// Build a product from the `<name> <sum> <payment day>` arguments of the add command
    pub fn from_arguments(args: &[String]) -> Result<Self, ArgumentError> {
        let [name, sum, day] = args else {
            return Err(ArgumentError::Count {
                expected: 3,
                found: args.len(),
            });
        };

        let sum = parse_number("sum", sum)?;
        let day = parse_number("payment day", day)?;
        let payment_day = validate_payment_day(day)?;

        Ok(Product::new(name.clone(), sum, payment_day))
    }
}

fn parse_number(name: &'static str, value: &str) -> Result<i64, ArgumentError> {
    value.parse::<i64>().map_err(|_| ArgumentError::Type {
        name,
        value: value.to_string(),
    })
}

pub fn validate_payment_day(day: i64) -> Result<u32, ArgumentError> {
    u32::try_from(day)
        .ok()
        .filter(|day| (MIN_PAYMENT_DAY..=MAX_PAYMENT_DAY).contains(day))
        .ok_or(ArgumentError::PaymentDayOutOfRange(day))
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}\nSum: {}\nPayment day: {}",
            self.name, self.sum, self.payment_day
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_arguments() {
        let product = Product::from_arguments(&args(&["rent", "500", "5"])).unwrap();
        assert_eq!(product, Product::new("rent", 500, 5));
    }

    #[test]
    fn test_wrong_argument_count() {
        assert_eq!(
            Product::from_arguments(&args(&["rent", "500"])),
            Err(ArgumentError::Count {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Product::from_arguments(&args(&["rent", "500", "5", "extra"])),
            Err(ArgumentError::Count {
                expected: 3,
                found: 4
            })
        );
        assert_eq!(
            Product::from_arguments(&[]),
            Err(ArgumentError::Count {
                expected: 3,
                found: 0
            })
        );
    }

    #[test]
    fn test_non_numeric_sum() {
        assert_eq!(
            Product::from_arguments(&args(&["x", "abc", "5"])),
            Err(ArgumentError::Type {
                name: "sum",
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_non_numeric_day() {
        assert_eq!(
            Product::from_arguments(&args(&["x", "10", "5th"])),
            Err(ArgumentError::Type {
                name: "payment day",
                value: "5th".to_string()
            })
        );
    }

    #[test]
    fn test_payment_day_range() {
        assert_eq!(
            Product::from_arguments(&args(&["x", "10", "0"])),
            Err(ArgumentError::PaymentDayOutOfRange(0))
        );
        assert_eq!(
            Product::from_arguments(&args(&["x", "10", "32"])),
            Err(ArgumentError::PaymentDayOutOfRange(32))
        );
        assert_eq!(
            Product::from_arguments(&args(&["x", "10", "31"])).map(|p| p.payment_day),
            Ok(31)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Product::new("gym", 25, 12).to_string(),
            "Name: gym\nSum: 25\nPayment day: 12"
        );
    }
}
