//! Core billing types: tariff groups, consumption payloads, and invoices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the eight billing categories.
///
/// The two household groups carry descriptive tags; the six business and
/// public-sector groups keep their numeric tags from the tariff document
/// (`group_5` and `group_6` are the schedule keys behind the household
/// tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TariffGroup {
    /// Household with separate high/low rate metering (schedule key `group_5`).
    #[serde(rename = "household_two")]
    HouseholdTwo,
    /// Household with a single meter register (schedule key `group_6`).
    #[serde(rename = "household_one")]
    HouseholdOne,
    #[serde(rename = "group_1")]
    Group1,
    #[serde(rename = "group_2")]
    Group2,
    /// Dual-rate business group with demand and reactive-energy charges.
    #[serde(rename = "group_3")]
    Group3,
    #[serde(rename = "group_4")]
    Group4,
    #[serde(rename = "group_7")]
    Group7,
    #[serde(rename = "group_8")]
    Group8,
}

impl TariffGroup {
    /// All valid group tags, in schedule order.
    pub const TAGS: &[&str] = &[
        "household_two",
        "household_one",
        "group_1",
        "group_2",
        "group_3",
        "group_4",
        "group_7",
        "group_8",
    ];

    /// The wire/CLI tag for this group.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::HouseholdTwo => "household_two",
            Self::HouseholdOne => "household_one",
            Self::Group1 => "group_1",
            Self::Group2 => "group_2",
            Self::Group3 => "group_3",
            Self::Group4 => "group_4",
            Self::Group7 => "group_7",
            Self::Group8 => "group_8",
        }
    }

    /// Parses a wire/CLI tag; `None` for anything outside the eight groups.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "household_two" => Some(Self::HouseholdTwo),
            "household_one" => Some(Self::HouseholdOne),
            "group_1" => Some(Self::Group1),
            "group_2" => Some(Self::Group2),
            "group_3" => Some(Self::Group3),
            "group_4" => Some(Self::Group4),
            "group_7" => Some(Self::Group7),
            "group_8" => Some(Self::Group8),
            _ => None,
        }
    }
}

impl fmt::Display for TariffGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Metered consumption for one bill, tagged by group.
///
/// This is the canonical engine input. The transport layer is responsible
/// for normalizing legacy field names into this shape before dispatch;
/// the engine only ever sees one of these variants.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "group")]
pub enum ConsumptionPayload {
    /// Two-register household: `a1_kwh` high rate, `a2_kwh` low rate.
    #[serde(rename = "household_two")]
    HouseholdTwo { a1_kwh: f64, a2_kwh: f64 },
    /// Single-register household.
    #[serde(rename = "household_one")]
    HouseholdOne { total_kwh: f64 },
    #[serde(rename = "group_1")]
    Group1 { high_kwh: f64, low_kwh: f64 },
    #[serde(rename = "group_2")]
    Group2 { high_kwh: f64, low_kwh: f64 },
    /// Dual-rate with optional peak-demand and reactive-energy readings.
    #[serde(rename = "group_3")]
    Group3 {
        high_kwh: f64,
        low_kwh: f64,
        #[serde(default)]
        demand_kw: f64,
        #[serde(default)]
        reactive_kvarh: f64,
    },
    #[serde(rename = "group_4")]
    Group4 { total_kwh: f64 },
    #[serde(rename = "group_7")]
    Group7 { total_kwh: f64 },
    #[serde(rename = "group_8")]
    Group8 { total_kwh: f64 },
}

impl ConsumptionPayload {
    /// The tariff group this payload belongs to.
    pub fn group(&self) -> TariffGroup {
        match self {
            Self::HouseholdTwo { .. } => TariffGroup::HouseholdTwo,
            Self::HouseholdOne { .. } => TariffGroup::HouseholdOne,
            Self::Group1 { .. } => TariffGroup::Group1,
            Self::Group2 { .. } => TariffGroup::Group2,
            Self::Group3 { .. } => TariffGroup::Group3,
            Self::Group4 { .. } => TariffGroup::Group4,
            Self::Group7 { .. } => TariffGroup::Group7,
            Self::Group8 { .. } => TariffGroup::Group8,
        }
    }
}

/// Echoed inputs for a two-register household invoice.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdTwoInputs {
    pub a1_kwh: f64,
    pub a2_kwh: f64,
}

/// Per-block quantities and costs for the two-register household.
///
/// Four cells: each rate class (A1 high, A2 low) split across the two
/// pricing blocks by proportional allocation.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdTwoBlocks {
    pub a1_block1_kwh: f64,
    pub a2_block1_kwh: f64,
    pub a1_block2_kwh: f64,
    pub a2_block2_kwh: f64,
    pub a1_block1_cost: f64,
    pub a2_block1_cost: f64,
    pub a1_block2_cost: f64,
    pub a2_block2_cost: f64,
}

/// Itemized bill for the two-register household group.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdTwoInvoice {
    pub group: TariffGroup,
    pub inputs: HouseholdTwoInputs,
    pub blocks: HouseholdTwoBlocks,
    pub fixed_fee: f64,
    pub energy_cost: f64,
    pub net_amount: f64,
    pub tax: f64,
    pub final_bill: f64,
}

/// Echoed input for single-total invoices.
#[derive(Debug, Clone, Serialize)]
pub struct TotalInputs {
    pub total_kwh: f64,
}

/// Per-block quantities and costs for the single-register household.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdOneBlocks {
    pub block1_kwh: f64,
    pub block2_kwh: f64,
    pub block1_cost: f64,
    pub block2_cost: f64,
}

/// Itemized bill for the single-register household group.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdOneInvoice {
    pub group: TariffGroup,
    pub inputs: TotalInputs,
    pub blocks: HouseholdOneBlocks,
    pub fixed_fee: f64,
    pub energy_cost: f64,
    pub net_amount: f64,
    pub tax: f64,
    pub final_bill: f64,
}

/// Echoed inputs for dual-rate flat invoices.
///
/// `demand_kw` and `reactive_kvarh` are echoed as 0 for the groups that
/// have no such charges.
#[derive(Debug, Clone, Serialize)]
pub struct DualRateInputs {
    pub high_kwh: f64,
    pub low_kwh: f64,
    pub demand_kw: f64,
    pub reactive_kvarh: f64,
}

/// Itemized bill for the flat dual-rate groups (1, 2, 3).
#[derive(Debug, Clone, Serialize)]
pub struct FlatDualRateInvoice {
    pub group: TariffGroup,
    pub inputs: DualRateInputs,
    pub fixed_fee: f64,
    pub energy_cost: f64,
    pub demand_cost: f64,
    pub reactive_cost: f64,
    pub net_amount: f64,
    pub tax: f64,
    pub final_bill: f64,
}

/// Itemized bill for the flat single-rate groups (4, 7, 8).
#[derive(Debug, Clone, Serialize)]
pub struct FlatSingleRateInvoice {
    pub group: TariffGroup,
    pub inputs: TotalInputs,
    /// Effective rate after hundredths conversion, echoed for display.
    pub rate_eur_per_kwh: f64,
    pub fixed_fee: f64,
    pub energy_cost: f64,
    pub net_amount: f64,
    pub tax: f64,
    pub final_bill: f64,
}

/// A computed bill, one shape per calculator.
///
/// Serialized untagged: each variant already carries its `group` field, so
/// the JSON output matches the per-group invoice shape directly.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Invoice {
    HouseholdTwo(HouseholdTwoInvoice),
    HouseholdOne(HouseholdOneInvoice),
    FlatDualRate(FlatDualRateInvoice),
    FlatSingleRate(FlatSingleRateInvoice),
}

/// One row of an itemized bill breakdown, shared by the text rendering
/// and the CSV export.
#[derive(Debug, Clone)]
pub struct LineItem {
    /// Row label (e.g. `"A1 block 1"`, `"Fixed fee"`).
    pub item: &'static str,
    /// Billed quantity, when the row has one (kWh, kW, or kVArh).
    pub quantity: Option<f64>,
    /// Row amount in currency units.
    pub amount: f64,
}

impl LineItem {
    fn new(item: &'static str, quantity: Option<f64>, amount: f64) -> Self {
        Self {
            item,
            quantity,
            amount,
        }
    }
}

impl Invoice {
    /// The tariff group this invoice was computed for.
    pub fn group(&self) -> TariffGroup {
        match self {
            Self::HouseholdTwo(i) => i.group,
            Self::HouseholdOne(i) => i.group,
            Self::FlatDualRate(i) => i.group,
            Self::FlatSingleRate(i) => i.group,
        }
    }

    /// Fixed monthly fee component.
    pub fn fixed_fee(&self) -> f64 {
        match self {
            Self::HouseholdTwo(i) => i.fixed_fee,
            Self::HouseholdOne(i) => i.fixed_fee,
            Self::FlatDualRate(i) => i.fixed_fee,
            Self::FlatSingleRate(i) => i.fixed_fee,
        }
    }

    /// Active-energy cost component.
    pub fn energy_cost(&self) -> f64 {
        match self {
            Self::HouseholdTwo(i) => i.energy_cost,
            Self::HouseholdOne(i) => i.energy_cost,
            Self::FlatDualRate(i) => i.energy_cost,
            Self::FlatSingleRate(i) => i.energy_cost,
        }
    }

    /// Amount before tax.
    pub fn net_amount(&self) -> f64 {
        match self {
            Self::HouseholdTwo(i) => i.net_amount,
            Self::HouseholdOne(i) => i.net_amount,
            Self::FlatDualRate(i) => i.net_amount,
            Self::FlatSingleRate(i) => i.net_amount,
        }
    }

    /// Tax on the net amount.
    pub fn tax(&self) -> f64 {
        match self {
            Self::HouseholdTwo(i) => i.tax,
            Self::HouseholdOne(i) => i.tax,
            Self::FlatDualRate(i) => i.tax,
            Self::FlatSingleRate(i) => i.tax,
        }
    }

    /// Total amount due.
    pub fn final_bill(&self) -> f64 {
        match self {
            Self::HouseholdTwo(i) => i.final_bill,
            Self::HouseholdOne(i) => i.final_bill,
            Self::FlatDualRate(i) => i.final_bill,
            Self::FlatSingleRate(i) => i.final_bill,
        }
    }

    /// Flattens the invoice into display/export rows.
    ///
    /// Zero-quantity charge rows are kept so the breakdown always shows
    /// the full structure of the group's tariff.
    pub fn line_items(&self) -> Vec<LineItem> {
        let mut rows = Vec::new();
        match self {
            Self::HouseholdTwo(i) => {
                let b = &i.blocks;
                rows.push(LineItem::new(
                    "A1 block 1",
                    Some(b.a1_block1_kwh),
                    b.a1_block1_cost,
                ));
                rows.push(LineItem::new(
                    "A2 block 1",
                    Some(b.a2_block1_kwh),
                    b.a2_block1_cost,
                ));
                rows.push(LineItem::new(
                    "A1 block 2",
                    Some(b.a1_block2_kwh),
                    b.a1_block2_cost,
                ));
                rows.push(LineItem::new(
                    "A2 block 2",
                    Some(b.a2_block2_kwh),
                    b.a2_block2_cost,
                ));
            }
            Self::HouseholdOne(i) => {
                let b = &i.blocks;
                rows.push(LineItem::new("Block 1", Some(b.block1_kwh), b.block1_cost));
                rows.push(LineItem::new("Block 2", Some(b.block2_kwh), b.block2_cost));
            }
            Self::FlatDualRate(i) => {
                rows.push(LineItem::new(
                    "Energy (high + low)",
                    Some(i.inputs.high_kwh + i.inputs.low_kwh),
                    i.energy_cost,
                ));
                if i.group == TariffGroup::Group3 {
                    rows.push(LineItem::new(
                        "Demand charge",
                        Some(i.inputs.demand_kw),
                        i.demand_cost,
                    ));
                    rows.push(LineItem::new(
                        "Reactive energy",
                        Some(i.inputs.reactive_kvarh),
                        i.reactive_cost,
                    ));
                }
            }
            Self::FlatSingleRate(i) => {
                rows.push(LineItem::new(
                    "Energy",
                    Some(i.inputs.total_kwh),
                    i.energy_cost,
                ));
            }
        }
        rows.push(LineItem::new("Fixed fee", None, self.fixed_fee()));
        rows.push(LineItem::new("Net amount", None, self.net_amount()));
        rows.push(LineItem::new("Tax (8%)", None, self.tax()));
        rows.push(LineItem::new("Final bill", None, self.final_bill()));
        rows
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Bill estimate ({}) ---", self.group())?;
        for row in self.line_items() {
            match row.quantity {
                Some(q) => writeln!(f, "{:<22}{:>10.2} {:>10.2}", row.item, q, row.amount)?,
                None => writeln!(f, "{:<22}{:>10} {:>10.2}", row.item, "", row.amount)?,
            }
        }
        Ok(())
    }
}
