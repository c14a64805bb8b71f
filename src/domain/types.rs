//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty document identifiers,
//! non-negative money, positive quantities) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier contained no non-whitespace characters.
    #[error("identifier cannot be empty")]
    EmptyId,
    /// Monetary value was below zero.
    #[error("amount cannot be negative")]
    NegativeAmount,
    /// Monetary value was above [`Amount::max`].
    #[error("amount exceeds {0}")]
    AmountTooLarge(Decimal),
    /// Quantity was zero.
    #[error("quantity must be greater than zero")]
    ZeroQuantity,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
}

/// Macro to generate newtypes around backend document identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier ensuring it is not blank.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into().trim().to_string();
                if value.is_empty() {
                    Err(TypeConstraintError::EmptyId)
                } else {
                    Ok(Self(value))
                }
            }

            /// Borrow the identifier as a `&str`.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ShopkeeperId, "Identifier of a shopkeeper account.");
id_newtype!(SalesmanId, "Identifier of a salesman account.");
id_newtype!(ProductId, "Identifier of a catalog product.");
id_newtype!(RecoveryId, "Identifier of a stored recovery transaction.");

/// Monetary amount between zero and [`Amount::max`].
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Largest accepted amount, one trillion.
    pub fn max() -> Decimal {
        Decimal::new(1_000_000_000_000, 0)
    }

    /// Wraps the value, rejecting anything below zero or above
    /// [`Amount::max`].
    pub fn new(value: Decimal) -> Result<Self, TypeConstraintError> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(TypeConstraintError::NegativeAmount)
        } else if value > Self::max() {
            Err(TypeConstraintError::AmountTooLarge(Self::max()))
        } else {
            Ok(Self(value))
        }
    }

    /// Returns the raw decimal value.
    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|_| TypeConstraintError::InvalidValue(s.trim().to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = TypeConstraintError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

/// Item count that is always at least one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        if value == 0 {
            Err(TypeConstraintError::ZeroQuantity)
        } else {
            Ok(Self(value))
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| TypeConstraintError::InvalidValue(s.trim().to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

/// Client-generated key attached to a submission so the backend can
/// recognise a repeated post of the same recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionKey(Uuid);

impl SubmissionKey {
    /// Generate a new random key
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for SubmissionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubmissionKey {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            Uuid::parse_str(s).map_err(|_| TypeConstraintError::InvalidUuid)?,
        ))
    }
}

impl Default for SubmissionKey {
    fn default() -> Self {
        Self::new()
    }
}
