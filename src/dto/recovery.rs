//! Recovery payloads sent to the backend and shown to the salesman.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::recovery::{NewRecovery, Reconciliation, RecoveryItem, RecoveryType};

/// Line of a recovery as posted to the backend.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionItem {
    pub product: String,
    pub product_name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl From<&RecoveryItem> for SubmissionItem {
    fn from(item: &RecoveryItem) -> Self {
        Self {
            product: item.product_id.to_string(),
            product_name: item.product_name.clone(),
            quantity: item.quantity.get(),
            unit_price: item.unit_price.get(),
            total_price: item.total_price(),
        }
    }
}

/// Body posted to the recoveries endpoint. Amounts go out as JSON numbers.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecoverySubmission {
    pub submission_key: String,
    pub shopkeeper: String,
    pub salesman: String,
    pub recovery_type: RecoveryType,
    #[serde(with = "rust_decimal::serde::float")]
    pub previous_pending_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_collected: Decimal,
    pub items: Vec<SubmissionItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub items_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_payment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub new_pending_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&NewRecovery> for RecoverySubmission {
    fn from(recovery: &NewRecovery) -> Self {
        let summary = recovery.reconcile();

        Self {
            submission_key: recovery.key.to_string(),
            shopkeeper: recovery.shopkeeper_id.to_string(),
            salesman: recovery.salesman_id.to_string(),
            recovery_type: recovery.recovery_type,
            previous_pending_amount: recovery.previous_pending.get(),
            amount_collected: recovery.amount_collected.get(),
            items: recovery.items.iter().map(SubmissionItem::from).collect(),
            items_value: summary.items_value,
            net_payment: summary.net_payment,
            new_pending_amount: summary.new_pending,
            note: recovery.note.clone(),
        }
    }
}

/// Printed receipt line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReceiptLine {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Printable receipt for a stored recovery.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecoveryReceipt {
    pub recovery_id: String,
    pub shopkeeper_name: String,
    pub salesman_id: String,
    pub recovery_type: RecoveryType,
    pub recorded_at: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    pub previous_pending: Decimal,
    pub amount_collected: Decimal,
    /// Values stored by the backend.
    pub totals: Reconciliation,
    /// Whether recomputing from the stored inputs gives the stored totals.
    pub consistent: bool,
    pub note: Option<String>,
}

/// What the pre-submission summary panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRecovery {
    pub recovery: NewRecovery,
    pub summary: Reconciliation,
}

impl PreparedRecovery {
    pub fn submission(&self) -> RecoverySubmission {
        RecoverySubmission::from(&self.recovery)
    }
}
