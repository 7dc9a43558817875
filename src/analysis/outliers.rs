//! Inter-quartile range outlier rejection for detection sets

/// Width of the Tukey fence in IQR units
pub const IQR_FENCE: f64 = 1.5;

/// Default extra tolerance (pixels) added to both fences
pub const DEFAULT_OFFSET: f64 = 7.0;

/// Remove items whose feature lies outside the IQR fences
///
/// Keeps items with `feature` in `[Q1 - 1.5*IQR - offset, Q3 + 1.5*IQR + offset]`,
/// preserving input order. Inputs with one item or none come back unchanged.
pub fn filter_outliers<T, F>(items: Vec<T>, feature: F, offset: f64) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    filter_outliers_with_fence(items, feature, IQR_FENCE, offset)
}

/// [`filter_outliers`] with a custom fence multiplier
pub fn filter_outliers_with_fence<T, F>(items: Vec<T>, feature: F, fence: f64, offset: f64) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    if items.len() <= 1 {
        return items;
    }

    let mut values: Vec<f64> = items.iter().map(&feature).collect();
    values.sort_by(f64::total_cmp);

    let q1 = quantile(&values, 0.25);
    let q3 = quantile(&values, 0.75);
    let iqr = q3 - q1;
    let low = q1 - fence * iqr - offset;
    let high = q3 + fence * iqr + offset;

    items
        .into_iter()
        .filter(|item| {
            let v = feature(item);
            v >= low && v <= high
        })
        .collect()
}

/// Quantile of sorted data, linearly interpolated between order statistics
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&data, 0.25) - 1.75).abs() < 1e-9);
        assert!((quantile(&data, 0.75) - 3.25).abs() < 1e-9);
        assert_eq!(quantile(&[5.0], 0.5), 5.0);
    }

    #[test]
    fn test_small_inputs_unchanged() {
        let empty: Vec<f64> = vec![];
        assert!(filter_outliers(empty, |v| *v, DEFAULT_OFFSET).is_empty());

        let single = vec![1000.0];
        assert_eq!(filter_outliers(single, |v| *v, 0.0), vec![1000.0]);
    }

    #[test]
    fn test_removes_far_baseline() {
        let bottoms = vec![400.0, 401.0, 399.0, 400.0, 250.0, 402.0];
        let kept = filter_outliers(bottoms, |v| *v, 10.0);
        assert_eq!(kept, vec![400.0, 401.0, 399.0, 400.0, 402.0]);
    }

    #[test]
    fn test_offset_tolerates_jitter() {
        // All equal except one: IQR is zero, so only the offset admits jitter
        let rows = vec![300.0, 300.0, 300.0, 306.0, 300.0];
        assert_eq!(filter_outliers(rows.clone(), |v| *v, 7.0).len(), 5);
        assert_eq!(filter_outliers(rows, |v| *v, 5.0).len(), 4);
    }

    #[test]
    fn test_order_preserved_and_never_grows() {
        let items = vec![(3, 10.0), (1, 11.0), (2, 9.0), (0, 90.0)];
        let kept = filter_outliers(items.clone(), |item| item.1, 0.0);
        assert!(kept.len() <= items.len());
        let ids: Vec<i32> = kept.iter().map(|item| item.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_custom_fence() {
        let values = vec![10.0, 11.0, 12.0, 13.0, 20.0];
        // Q1 = 11, Q3 = 13, IQR = 2
        assert_eq!(filter_outliers_with_fence(values.clone(), |v| *v, 1.5, 0.0).len(), 4);
        assert_eq!(filter_outliers_with_fence(values, |v| *v, 3.5, 0.0).len(), 5);
    }
}
