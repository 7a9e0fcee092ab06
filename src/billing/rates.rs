//! Rate conversion and rounding primitives shared by all calculators.

/// Tax rate applied uniformly to the net amount of every invoice.
pub const TAX_RATE: f64 = 0.08;

/// Boundary between block 1 and block 2 pricing (kWh).
pub const BLOCK_THRESHOLD_KWH: f64 = 800.0;

/// Converts a tariff rate authored in hundredths of a currency unit per kWh
/// into the base-currency rate used by the calculators.
pub fn cents_to_unit(rate_hundredths: f64) -> f64 {
    rate_hundredths / 100.0
}

/// Rounds to 2 decimal places with half-up behavior.
///
/// The 1e-12 nudge counters binary representation error so that values
/// like `2.675` (stored as `2.67499999...`) round up to `2.68`. Every
/// numeric field emitted on an invoice goes through this function exactly
/// once, from an unrounded intermediate.
pub fn round2(x: f64) -> f64 {
    ((x + 1e-12) * 100.0).round() / 100.0
}
