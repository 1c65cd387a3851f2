//! Percentage computation shared by every summary category.

/// Percentage of `covered` over `total`, rounded half-up to two decimals.
///
/// A zero `total` is vacuously full coverage and yields exactly `100.0`.
/// Rounding scales the ratio to thousandths of a percent, adds 5 and floors
/// before the final division, so `percent(1, 3)` is `33.33` and
/// `percent(2, 3)` is `66.67`.
#[must_use]
pub fn percent(covered: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let scaled = 1000.0 * 100.0 * covered as f64 / total as f64;
    ((scaled + 5.0) / 10.0).floor() / 100.0
}
