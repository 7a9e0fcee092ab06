//! Block-tariff calculators for the two household groups.
//!
//! Consumption up to 800 kWh is billed at block-1 prices, the remainder
//! at block-2 prices. The two-register group shares the threshold across
//! both rate classes proportionally instead of thresholding each register
//! on its own.

use crate::config::{BlockOneRateTariff, BlockTwoRateTariff};

use super::rates::{BLOCK_THRESHOLD_KWH, TAX_RATE, cents_to_unit, round2};
use super::types::{
    HouseholdOneBlocks, HouseholdOneInvoice, HouseholdTwoBlocks, HouseholdTwoInputs,
    HouseholdTwoInvoice, TariffGroup, TotalInputs,
};

/// Bills the two-register household group (`household_two`, `group_5`).
///
/// `a1_kwh` is high-rate consumption, `a2_kwh` low-rate. Total
/// consumption is split at the block threshold and each block portion is
/// allocated to the two rate classes in proportion to their share of the
/// total, giving four quantity/cost cells.
pub fn bill_household_two(tariff: &BlockTwoRateTariff, a1_kwh: f64, a2_kwh: f64) -> HouseholdTwoInvoice {
    let total = a1_kwh + a2_kwh;
    // Shares are 0 for zero total so the split never divides by zero.
    let (share_a1, share_a2) = if total > 0.0 {
        (a1_kwh / total, a2_kwh / total)
    } else {
        (0.0, 0.0)
    };

    let (a1_b1, a2_b1, a1_b2, a2_b2) = if total <= BLOCK_THRESHOLD_KWH {
        (total * share_a1, total * share_a2, 0.0, 0.0)
    } else {
        let over = total - BLOCK_THRESHOLD_KWH;
        (
            BLOCK_THRESHOLD_KWH * share_a1,
            BLOCK_THRESHOLD_KWH * share_a2,
            over * share_a1,
            over * share_a2,
        )
    };

    let cost_a1_b1 = a1_b1 * cents_to_unit(tariff.block_1.high);
    let cost_a2_b1 = a2_b1 * cents_to_unit(tariff.block_1.low);
    let cost_a1_b2 = a1_b2 * cents_to_unit(tariff.block_2.high);
    let cost_a2_b2 = a2_b2 * cents_to_unit(tariff.block_2.low);

    let energy = cost_a1_b1 + cost_a2_b1 + cost_a1_b2 + cost_a2_b2;
    let net = tariff.fixed_fee + energy;
    let tax = net * TAX_RATE;
    let final_bill = net + tax;

    HouseholdTwoInvoice {
        group: TariffGroup::HouseholdTwo,
        inputs: HouseholdTwoInputs {
            a1_kwh: round2(a1_kwh),
            a2_kwh: round2(a2_kwh),
        },
        blocks: HouseholdTwoBlocks {
            a1_block1_kwh: round2(a1_b1),
            a2_block1_kwh: round2(a2_b1),
            a1_block2_kwh: round2(a1_b2),
            a2_block2_kwh: round2(a2_b2),
            a1_block1_cost: round2(cost_a1_b1),
            a2_block1_cost: round2(cost_a2_b1),
            a1_block2_cost: round2(cost_a1_b2),
            a2_block2_cost: round2(cost_a2_b2),
        },
        fixed_fee: round2(tariff.fixed_fee),
        energy_cost: round2(energy),
        net_amount: round2(net),
        tax: round2(tax),
        final_bill: round2(final_bill),
    }
}

/// Bills the single-register household group (`household_one`, `group_6`).
pub fn bill_household_one(tariff: &BlockOneRateTariff, total_kwh: f64) -> HouseholdOneInvoice {
    let b1_kwh = total_kwh.min(BLOCK_THRESHOLD_KWH);
    let b2_kwh = (total_kwh - BLOCK_THRESHOLD_KWH).max(0.0);

    let cost_b1 = b1_kwh * cents_to_unit(tariff.block_1.single);
    let cost_b2 = b2_kwh * cents_to_unit(tariff.block_2.single);

    let energy = cost_b1 + cost_b2;
    let net = tariff.fixed_fee + energy;
    let tax = net * TAX_RATE;
    let final_bill = net + tax;

    HouseholdOneInvoice {
        group: TariffGroup::HouseholdOne,
        inputs: TotalInputs {
            total_kwh: round2(total_kwh),
        },
        blocks: HouseholdOneBlocks {
            block1_kwh: round2(b1_kwh),
            block2_kwh: round2(b2_kwh),
            block1_cost: round2(cost_b1),
            block2_cost: round2(cost_b2),
        },
        fixed_fee: round2(tariff.fixed_fee),
        energy_cost: round2(energy),
        net_amount: round2(net),
        tax: round2(tax),
        final_bill: round2(final_bill),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TariffSchedule;

    const TOL: f64 = 0.011;

    fn schedule() -> TariffSchedule {
        TariffSchedule::proposal_2025()
    }

    #[test]
    fn two_register_under_threshold_stays_in_block_1() {
        let inv = bill_household_two(&schedule().group_5, 300.0, 200.0);
        let b = &inv.blocks;
        assert!((b.a1_block1_kwh + b.a2_block1_kwh - 500.0).abs() < TOL);
        assert_eq!(b.a1_block2_kwh, 0.0);
        assert_eq!(b.a2_block2_kwh, 0.0);
        assert!(inv.final_bill > 0.0);
    }

    #[test]
    fn two_register_over_threshold_splits_at_800() {
        let inv = bill_household_two(&schedule().group_5, 600.0, 400.0);
        let b = &inv.blocks;
        assert!((b.a1_block1_kwh + b.a2_block1_kwh - 800.0).abs() < TOL);
        assert!((b.a1_block2_kwh + b.a2_block2_kwh - 200.0).abs() < TOL);
        assert!(b.a1_block2_kwh > 0.0);
        assert!(b.a2_block2_kwh > 0.0);
    }

    #[test]
    fn two_register_allocation_is_proportional() {
        // 600:300 is a 2:1 ratio; both blocks must preserve it.
        let inv = bill_household_two(&schedule().group_5, 600.0, 300.0);
        let b = &inv.blocks;
        let block1 = b.a1_block1_kwh + b.a2_block1_kwh;
        let block2 = b.a1_block2_kwh + b.a2_block2_kwh;
        assert!((b.a1_block1_kwh / block1 - 2.0 / 3.0).abs() < 0.01);
        assert!((b.a1_block2_kwh / block2 - 2.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn two_register_zero_consumption_bills_fixed_fee_only() {
        let tariff = &schedule().group_5;
        let inv = bill_household_two(tariff, 0.0, 0.0);
        assert_eq!(inv.energy_cost, 0.0);
        assert!((inv.final_bill - tariff.fixed_fee * 1.08).abs() < TOL);
    }

    #[test]
    fn two_register_costs_match_rates() {
        let tariff = schedule().group_5;
        let inv = bill_household_two(&tariff, 300.0, 200.0);
        let b = &inv.blocks;
        assert!((b.a1_block1_cost - 300.0 * tariff.block_1.high / 100.0).abs() < TOL);
        assert!((b.a2_block1_cost - 200.0 * tariff.block_1.low / 100.0).abs() < TOL);
        assert!((inv.energy_cost - (b.a1_block1_cost + b.a2_block1_cost)).abs() < TOL);
    }

    #[test]
    fn two_register_tax_and_total_are_consistent() {
        let inv = bill_household_two(&schedule().group_5, 600.0, 400.0);
        assert!((inv.net_amount - (inv.fixed_fee + inv.energy_cost)).abs() < TOL);
        assert!((inv.tax - inv.net_amount * 0.08).abs() < TOL);
        assert!((inv.final_bill - (inv.net_amount + inv.tax)).abs() < TOL);
    }

    #[test]
    fn one_register_under_threshold() {
        let inv = bill_household_one(&schedule().group_6, 500.0);
        assert_eq!(inv.blocks.block1_kwh, 500.0);
        assert_eq!(inv.blocks.block2_kwh, 0.0);
        assert_eq!(inv.blocks.block2_cost, 0.0);
    }

    #[test]
    fn one_register_straddles_threshold() {
        let inv = bill_household_one(&schedule().group_6, 1200.0);
        assert_eq!(inv.blocks.block1_kwh, 800.0);
        assert_eq!(inv.blocks.block2_kwh, 400.0);
        assert!(inv.blocks.block1_cost > 0.0);
        assert!(inv.blocks.block2_cost > 0.0);
    }

    #[test]
    fn one_register_costs_match_rates() {
        let tariff = schedule().group_6;
        let inv = bill_household_one(&tariff, 1000.0);
        assert!((inv.blocks.block1_cost - 800.0 * tariff.block_1.single / 100.0).abs() < TOL);
        assert!((inv.blocks.block2_cost - 200.0 * tariff.block_2.single / 100.0).abs() < TOL);
    }

    #[test]
    fn one_register_exactly_at_threshold() {
        let inv = bill_household_one(&schedule().group_6, 800.0);
        assert_eq!(inv.blocks.block1_kwh, 800.0);
        assert_eq!(inv.blocks.block2_kwh, 0.0);
    }
}
