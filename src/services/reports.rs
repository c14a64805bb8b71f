//! Recovery analytics for the admin dashboard.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::recovery::RecoveryRecord;
use crate::domain::types::SalesmanId;
use crate::dto::reports::{DailyTotals, RecoveryTotals, SalesmanSummary};

/// Totals per salesman, ordered by salesman id.
pub fn summarize_by_salesman(records: &[RecoveryRecord]) -> Vec<SalesmanSummary> {
    let mut groups: BTreeMap<SalesmanId, RecoveryTotals> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.salesman_id.clone())
            .or_default()
            .add(record);
    }

    groups
        .into_iter()
        .map(|(salesman_id, totals)| SalesmanSummary {
            salesman_id,
            totals,
        })
        .collect()
}

/// Totals per UTC calendar day, oldest first.
pub fn daily_totals(records: &[RecoveryRecord]) -> Vec<DailyTotals> {
    let mut groups: BTreeMap<NaiveDate, RecoveryTotals> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.created_at.date_naive())
            .or_default()
            .add(record);
    }

    groups
        .into_iter()
        .map(|(date, totals)| DailyTotals { date, totals })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::recovery::RecoveryType;
    use crate::domain::types::{RecoveryId, ShopkeeperId};

    fn record(
        id: &str,
        salesman: &str,
        day: u32,
        collected: Decimal,
        items_value: Decimal,
    ) -> RecoveryRecord {
        RecoveryRecord {
            id: RecoveryId::new(id).unwrap(),
            shopkeeper_id: ShopkeeperId::new("s-1").unwrap(),
            salesman_id: SalesmanId::new(salesman).unwrap(),
            recovery_type: RecoveryType::PaymentOnly,
            previous_pending_amount: dec!(1000),
            amount_collected: collected,
            items: Vec::new(),
            items_value,
            net_payment: collected - items_value,
            new_pending_amount: dec!(0),
            note: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, day, 18, 30, 0).unwrap(),
        }
    }

    #[test]
    fn groups_by_salesman() {
        let records = [
            record("r1", "m-2", 1, dec!(100), dec!(0)),
            record("r2", "m-1", 1, dec!(50), dec!(20)),
            record("r3", "m-2", 2, dec!(25), dec!(0)),
        ];

        let summary = summarize_by_salesman(&records);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].salesman_id.as_str(), "m-1");
        assert_eq!(summary[0].totals.net_payment, dec!(30));
        assert_eq!(summary[1].totals.count, 2);
        assert_eq!(summary[1].totals.collected, dec!(125));
    }

    #[test]
    fn groups_by_day_in_order() {
        let records = [
            record("r1", "m-1", 3, dec!(10), dec!(0)),
            record("r2", "m-1", 1, dec!(20), dec!(0)),
            record("r3", "m-2", 3, dec!(30), dec!(5)),
        ];

        let days = daily_totals(&records);

        assert_eq!(
            days.iter().map(|d| d.date.to_string()).collect::<Vec<_>>(),
            vec!["2026-03-01", "2026-03-03"]
        );
        assert_eq!(days[1].totals.count, 2);
        assert_eq!(days[1].totals.items_value, dec!(5));
    }

    #[test]
    fn huge_stored_amounts_saturate() {
        let records = [
            record("r1", "m-1", 1, Decimal::MAX, dec!(0)),
            record("r2", "m-1", 1, Decimal::MAX, dec!(0)),
        ];

        let summary = summarize_by_salesman(&records);
        let days = daily_totals(&records);

        assert_eq!(summary[0].totals.collected, Decimal::MAX);
        assert_eq!(days[0].totals.net_payment, Decimal::MAX);
    }

    #[test]
    fn no_records_no_groups() {
        assert!(summarize_by_salesman(&[]).is_empty());
        assert!(daily_totals(&[]).is_empty());
    }
}
