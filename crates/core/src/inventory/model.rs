//! Stock lot entity, movement payload, and count comparison operator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Entity name used in `CoreError::NotFound`.
pub const STOCK_LOT_ENTITY: &str = "StockLot";

/// A persisted lot of socks, unique per `(color, cotton_percentage)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLot {
    pub id: DbId,
    pub color: String,
    pub cotton_percentage: i32,
    pub quantity: i32,
    /// Optimistic-concurrency stamp. Starts at 0, bumped by every write.
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Income, outcome, and update payload. Also the shape of a batch CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    #[validate(length(min = 1, message = "color must not be empty"))]
    pub color: String,
    #[validate(range(min = 0, max = 100, message = "cottonPercentage must be between 0 and 100"))]
    pub cotton_percentage: i32,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

impl StockMovement {
    pub fn new(color: impl Into<String>, cotton_percentage: i32, quantity: i32) -> Self {
        Self {
            color: color.into(),
            cotton_percentage,
            quantity,
        }
    }

    /// Run field validation, flattening any failures into `CoreError::Validation`.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(describe_validation_errors(&errors)))?;
        if self.color.trim().is_empty() {
            return Err(CoreError::Validation("color must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Column values written to the store on insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLotValues {
    pub color: String,
    pub cotton_percentage: i32,
    pub quantity: i32,
}

impl StockLotValues {
    /// Same key as `lot`, new quantity.
    pub fn requantified(lot: &StockLot, quantity: i32) -> Self {
        Self {
            color: lot.color.clone(),
            cotton_percentage: lot.cotton_percentage,
            quantity,
        }
    }
}

impl From<&StockMovement> for StockLotValues {
    fn from(movement: &StockMovement) -> Self {
        Self {
            color: movement.color.clone(),
            cotton_percentage: movement.cotton_percentage,
            quantity: movement.quantity,
        }
    }
}

/// Cotton percentage comparison accepted by the count query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Strictly greater than the threshold.
    MoreThan,
    /// Strictly less than the threshold.
    LessThan,
    /// Exactly the threshold.
    Equal,
}

impl Comparison {
    pub const ALL: [Comparison; 3] = [Self::MoreThan, Self::LessThan, Self::Equal];

    /// Query-string token for this operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MoreThan => "moreThan",
            Self::LessThan => "lessThan",
            Self::Equal => "equal",
        }
    }

    /// Whether `value` satisfies this comparison against `threshold`.
    pub fn matches(self, value: i32, threshold: i32) -> bool {
        match self {
            Self::MoreThan => value > threshold,
            Self::LessThan => value < threshold,
            Self::Equal => value == threshold,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparison {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid comparison '{s}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Flatten `validator` output into one stable, human-readable message.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
