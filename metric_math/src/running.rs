//! Running totals over ordered series

/// Running sum of `values`, in order.
pub fn running_total(values: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    values
        .iter()
        .map(|v| {
            total += v;
            total
        })
        .collect()
}

/// Running sum over a series with gaps.
///
/// Present entries accumulate into the total; missing entries stay missing
/// in the output and do not reset or advance the total. This mirrors how a
/// cumulative actuals column behaves once the series crosses into periods
/// that have no observation yet.
pub fn running_total_sparse(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut total = 0.0;
    values
        .iter()
        .map(|v| {
            v.map(|v| {
                total += v;
                total
            })
        })
        .collect()
}
