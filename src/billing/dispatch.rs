//! Payload-to-calculator dispatch.

use crate::config::TariffSchedule;

use super::block::{bill_household_one, bill_household_two};
use super::flat::{DualRateUsage, bill_dual_rate, bill_single_rate};
use super::types::{ConsumptionPayload, Invoice, TariffGroup};

/// Computes the invoice for a tagged consumption payload.
///
/// Exhaustive over the eight group variants with no fallback arm: tag
/// validation is the transport layer's job, and a well-typed payload
/// always dispatches. Pure and synchronous; safe to call concurrently.
pub fn calculate(schedule: &TariffSchedule, payload: &ConsumptionPayload) -> Invoice {
    match *payload {
        ConsumptionPayload::HouseholdTwo { a1_kwh, a2_kwh } => {
            Invoice::HouseholdTwo(bill_household_two(&schedule.group_5, a1_kwh, a2_kwh))
        }
        ConsumptionPayload::HouseholdOne { total_kwh } => {
            Invoice::HouseholdOne(bill_household_one(&schedule.group_6, total_kwh))
        }
        ConsumptionPayload::Group1 { high_kwh, low_kwh } => {
            Invoice::FlatDualRate(bill_dual_rate(
                &schedule.group_1,
                TariffGroup::Group1,
                DualRateUsage {
                    high_kwh,
                    low_kwh,
                    ..DualRateUsage::default()
                },
            ))
        }
        ConsumptionPayload::Group2 { high_kwh, low_kwh } => {
            Invoice::FlatDualRate(bill_dual_rate(
                &schedule.group_2,
                TariffGroup::Group2,
                DualRateUsage {
                    high_kwh,
                    low_kwh,
                    ..DualRateUsage::default()
                },
            ))
        }
        ConsumptionPayload::Group3 {
            high_kwh,
            low_kwh,
            demand_kw,
            reactive_kvarh,
        } => Invoice::FlatDualRate(bill_dual_rate(
            &schedule.group_3,
            TariffGroup::Group3,
            DualRateUsage {
                high_kwh,
                low_kwh,
                demand_kw,
                reactive_kvarh,
            },
        )),
        ConsumptionPayload::Group4 { total_kwh } => Invoice::FlatSingleRate(bill_single_rate(
            &schedule.group_4,
            TariffGroup::Group4,
            total_kwh,
        )),
        ConsumptionPayload::Group7 { total_kwh } => Invoice::FlatSingleRate(bill_single_rate(
            &schedule.group_7,
            TariffGroup::Group7,
            total_kwh,
        )),
        ConsumptionPayload::Group8 { total_kwh } => Invoice::FlatSingleRate(bill_single_rate(
            &schedule.group_8,
            TariffGroup::Group8,
            total_kwh,
        )),
    }
}
