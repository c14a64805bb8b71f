//! Aggregated recovery figures for the admin dashboard.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::recovery::RecoveryRecord;
use crate::domain::types::SalesmanId;

/// Running totals over a group of recoveries.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct RecoveryTotals {
    pub count: usize,
    pub collected: Decimal,
    pub items_value: Decimal,
    pub net_payment: Decimal,
}

impl RecoveryTotals {
    /// Adds one record. Sums saturate at the `Decimal` bounds.
    pub fn add(&mut self, record: &RecoveryRecord) {
        self.count += 1;
        self.collected = self.collected.saturating_add(record.amount_collected);
        self.items_value = self.items_value.saturating_add(record.items_value);
        self.net_payment = self.net_payment.saturating_add(record.net_payment);
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SalesmanSummary {
    pub salesman_id: SalesmanId,
    pub totals: RecoveryTotals,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub totals: RecoveryTotals,
}
