//! Recovery transactions recorded by salesmen against shopkeeper balances.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Amount, ProductId, Quantity, RecoveryId, SalesmanId, ShopkeeperId, SubmissionKey,
    TypeConstraintError,
};

/// Whether a recovery is a pure cash collection or is bundled with goods.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryType {
    #[default]
    PaymentOnly,
    PaymentWithItems,
}

impl RecoveryType {
    /// Reconciles the inputs, ignoring `items` entirely for cash-only
    /// recoveries.
    pub fn reconcile(
        self,
        previous_pending: Decimal,
        amount_collected: Decimal,
        items: &[RecoveryItem],
    ) -> Reconciliation {
        match self {
            RecoveryType::PaymentOnly => reconcile(previous_pending, amount_collected, &[]),
            RecoveryType::PaymentWithItems => {
                reconcile(previous_pending, amount_collected, items)
            }
        }
    }

    pub fn carries_items(self) -> bool {
        self == RecoveryType::PaymentWithItems
    }
}

impl Display for RecoveryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoveryType::PaymentOnly => write!(f, "payment_only"),
            RecoveryType::PaymentWithItems => write!(f, "payment_with_items"),
        }
    }
}

impl TryFrom<&str> for RecoveryType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "" | "payment_only" => Ok(RecoveryType::PaymentOnly),
            "payment_with_items" => Ok(RecoveryType::PaymentWithItems),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Goods line delivered or returned as part of a recovery.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryItem {
    #[serde(alias = "product")]
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: String,
    pub quantity: Quantity,
    pub unit_price: Amount,
}

impl RecoveryItem {
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: Quantity,
        unit_price: Amount,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
        }
    }

    /// `quantity × unit_price`, saturating at the `Decimal` bounds.
    pub fn total_price(&self) -> Decimal {
        Decimal::from(self.quantity.get()).saturating_mul(self.unit_price.get())
    }
}

/// Monetary effect of a recovery on the shopkeeper's balance.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub items_value: Decimal,
    /// May be negative when the goods are worth more than the cash.
    pub net_payment: Decimal,
    pub new_pending: Decimal,
}

/// Computes `(items_value, net_payment, new_pending)` for a recovery.
///
/// The new pending amount is clamped at zero: an overpayment beyond the
/// outstanding balance is not carried forward as credit. Stored records can
/// carry arbitrary figures, so the arithmetic saturates instead of
/// overflowing.
pub fn reconcile(
    previous_pending: Decimal,
    amount_collected: Decimal,
    items: &[RecoveryItem],
) -> Reconciliation {
    let items_value = items
        .iter()
        .map(RecoveryItem::total_price)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let net_payment = amount_collected.saturating_sub(items_value);
    let new_pending = previous_pending
        .saturating_sub(net_payment)
        .max(Decimal::ZERO);

    Reconciliation {
        items_value,
        net_payment,
        new_pending,
    }
}

/// Recovery ready to be submitted to the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct NewRecovery {
    pub key: SubmissionKey,
    pub shopkeeper_id: ShopkeeperId,
    pub salesman_id: SalesmanId,
    pub recovery_type: RecoveryType,
    pub previous_pending: Amount,
    pub amount_collected: Amount,
    pub items: Vec<RecoveryItem>,
    pub note: Option<String>,
}

impl NewRecovery {
    /// Builds the submission. Items are dropped for cash-only recoveries.
    #[must_use]
    pub fn new(
        shopkeeper_id: ShopkeeperId,
        salesman_id: SalesmanId,
        recovery_type: RecoveryType,
        previous_pending: Amount,
        amount_collected: Amount,
        items: Vec<RecoveryItem>,
        note: Option<String>,
    ) -> Self {
        let items = if recovery_type.carries_items() {
            items
        } else {
            Vec::new()
        };

        Self {
            key: SubmissionKey::new(),
            shopkeeper_id,
            salesman_id,
            recovery_type,
            previous_pending,
            amount_collected,
            items,
            note: note
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn reconcile(&self) -> Reconciliation {
        self.recovery_type.reconcile(
            self.previous_pending.get(),
            self.amount_collected.get(),
            &self.items,
        )
    }
}

/// Recovery as persisted and echoed back by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryRecord {
    #[serde(alias = "_id")]
    pub id: RecoveryId,
    #[serde(alias = "shopkeeper")]
    pub shopkeeper_id: ShopkeeperId,
    #[serde(alias = "salesman")]
    pub salesman_id: SalesmanId,
    #[serde(default)]
    pub recovery_type: RecoveryType,
    pub previous_pending_amount: Decimal,
    pub amount_collected: Decimal,
    #[serde(default)]
    pub items: Vec<RecoveryItem>,
    #[serde(default)]
    pub items_value: Decimal,
    #[serde(default)]
    pub net_payment: Decimal,
    pub new_pending_amount: Decimal,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RecoveryRecord {
    /// The stored outputs, as the backend reported them.
    pub fn stored(&self) -> Reconciliation {
        Reconciliation {
            items_value: self.items_value,
            net_payment: self.net_payment,
            new_pending: self.new_pending_amount,
        }
    }

    /// Re-runs the reconciliation from the stored inputs.
    pub fn recompute(&self) -> Reconciliation {
        self.recovery_type.reconcile(
            self.previous_pending_amount,
            self.amount_collected,
            &self.items,
        )
    }
}
