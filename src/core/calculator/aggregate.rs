//! Earnings aggregation over delivery records.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::delivery::DeliveryRecord;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub total_earnings: f64,
    pub total_occupied_minutes: i64,
    pub count: usize,
    pub average_earnings: f64,
}

/// Per-service accumulation (earnings include tips).
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ServiceTotals {
    pub count: usize,
    pub earnings: f64,
}

pub fn total_earnings(records: &[DeliveryRecord]) -> f64 {
    records.iter().map(DeliveryRecord::total).sum()
}

pub fn total_occupied_minutes(records: &[DeliveryRecord]) -> i64 {
    records.iter().map(|r| i64::from(r.duration_minutes)).sum()
}

pub fn average_earnings_per_record(records: &[DeliveryRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    total_earnings(records) / records.len() as f64
}

/// Earnings per working hour; `0` when no working time has elapsed.
pub fn hourly_rate(total_earnings: f64, working_seconds: i64) -> f64 {
    if working_seconds <= 0 {
        return 0.0;
    }
    total_earnings / (working_seconds as f64 / 3600.0)
}

pub fn aggregate(records: &[DeliveryRecord]) -> Aggregate {
    Aggregate {
        total_earnings: total_earnings(records),
        total_occupied_minutes: total_occupied_minutes(records),
        count: records.len(),
        average_earnings: average_earnings_per_record(records),
    }
}

/// Group by service name. Keys come back sorted by name.
pub fn group_by_service(records: &[DeliveryRecord]) -> BTreeMap<String, ServiceTotals> {
    let mut groups: BTreeMap<String, ServiceTotals> = BTreeMap::new();
    for r in records {
        let entry = groups.entry(r.service.clone()).or_default();
        entry.count += 1;
        entry.earnings += r.total();
    }
    groups
}
