/// Scale between a percentage target and Honeycomb's "target per million".
pub const TPM_PER_PERCENT: f64 = 10_000.0;

/// Converts a floating point percentage (e.g. `99.95`) to a target-per-million value.
///
/// Rounds to the nearest integer so percentages with up to four decimal
/// digits survive binary floating point (`12.3456 * 10000` is not exact).
pub fn float_to_tpm(percentage: f64) -> i64 {
    (percentage * TPM_PER_PERCENT).round() as i64
}

/// Converts a target-per-million value back to a floating point percentage.
pub fn tpm_to_float(target_per_million: i64) -> f64 {
    target_per_million as f64 / TPM_PER_PERCENT
}
