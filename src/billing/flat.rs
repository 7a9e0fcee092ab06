//! Flat (non-block) calculators for the business and public-sector groups.

use crate::config::{FlatDualRateTariff, FlatSingleRateTariff};

use super::rates::{TAX_RATE, cents_to_unit, round2};
use super::types::{
    DualRateInputs, FlatDualRateInvoice, FlatSingleRateInvoice, TariffGroup, TotalInputs,
};

/// High/low consumption plus the optional group_3 extras.
#[derive(Debug, Clone, Copy, Default)]
pub struct DualRateUsage {
    pub high_kwh: f64,
    pub low_kwh: f64,
    /// Peak demand reading (kW); billed for group_3 only.
    pub demand_kw: f64,
    /// Reactive energy reading (kVArh); billed for group_3 only.
    pub reactive_kvarh: f64,
}

/// Bills a flat dual-rate group (`group_1`, `group_2`, `group_3`).
///
/// Demand is priced in base currency units per kW straight from the
/// tariff document, while the reactive rate goes through the hundredths
/// conversion like every energy rate. Groups without those tariff fields
/// bill both charges at 0.
pub fn bill_dual_rate(
    tariff: &FlatDualRateTariff,
    group: TariffGroup,
    usage: DualRateUsage,
) -> FlatDualRateInvoice {
    let energy_cost = usage.high_kwh * cents_to_unit(tariff.active_energy.high)
        + usage.low_kwh * cents_to_unit(tariff.active_energy.low);

    let demand_cost = usage.demand_kw * tariff.demand_charge.unwrap_or(0.0);
    let reactive_cost = usage.reactive_kvarh * cents_to_unit(tariff.reactive_energy.unwrap_or(0.0));

    let net = tariff.fixed_fee + energy_cost + demand_cost + reactive_cost;
    let tax = net * TAX_RATE;
    let final_bill = net + tax;

    FlatDualRateInvoice {
        group,
        inputs: DualRateInputs {
            high_kwh: round2(usage.high_kwh),
            low_kwh: round2(usage.low_kwh),
            demand_kw: round2(usage.demand_kw),
            reactive_kvarh: round2(usage.reactive_kvarh),
        },
        fixed_fee: round2(tariff.fixed_fee),
        energy_cost: round2(energy_cost),
        demand_cost: round2(demand_cost),
        reactive_cost: round2(reactive_cost),
        net_amount: round2(net),
        tax: round2(tax),
        final_bill: round2(final_bill),
    }
}

/// Bills a flat single-rate group (`group_4`, `group_7`, `group_8`).
pub fn bill_single_rate(
    tariff: &FlatSingleRateTariff,
    group: TariffGroup,
    total_kwh: f64,
) -> FlatSingleRateInvoice {
    let rate = cents_to_unit(tariff.active_energy.single);
    let energy_cost = total_kwh * rate;

    let net = tariff.fixed_fee + energy_cost;
    let tax = net * TAX_RATE;
    let final_bill = net + tax;

    FlatSingleRateInvoice {
        group,
        inputs: TotalInputs {
            total_kwh: round2(total_kwh),
        },
        rate_eur_per_kwh: round2(rate),
        fixed_fee: round2(tariff.fixed_fee),
        energy_cost: round2(energy_cost),
        net_amount: round2(net),
        tax: round2(tax),
        final_bill: round2(final_bill),
    }
}
