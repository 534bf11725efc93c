/* PORTED NUMPY FUNCTIONS */

/// Returns a symmetric Hann window.
///
/// # Arguments
///
/// * `len` - Number of points in the window.
///
/// # Returns
///
/// * The window, `0.5 - 0.5 * cos(2 * pi * n / (len - 1))`.
pub fn hanning(len: usize) -> Vec<f32> {
    match len {
        0 => vec![],
        1 => vec![1.0],
        _ => (0..len)
            .map(|n| {
                let phase = 2.0 * std::f64::consts::PI * n as f64 / (len - 1) as f64;
                (0.5 - 0.5 * phase.cos()) as f32
            })
            .collect(),
    }
}

/// Returns `num` evenly spaced values over `[start, stop)`.
///
/// # Arguments
///
/// * `start` - First value.
/// * `stop` - End of the interval, not included.
/// * `num` - Number of values.
pub fn linspace_exclusive(start: f32, stop: f32, num: usize) -> Vec<f32> {
    let step = (stop - start) / num as f32;
    (0..num).map(|i| start + step * i as f32).collect()
}

/// Finds the index where `value` should be inserted to keep `sorted` ordered,
/// leftmost position among equal elements.
///
/// # Arguments
///
/// * `sorted` - Ascending input array.
/// * `value` - Value to insert.
///
/// # Returns
///
/// * The first index `i` with `sorted[i] >= value`.
pub fn search_sorted_left(sorted: &[f32], value: f32) -> usize {
    sorted.partition_point(|&x| x < value)
}

/// Same as [`search_sorted_left`], rightmost position among equal elements.
pub fn search_sorted_right(sorted: &[f32], value: f32) -> usize {
    sorted.partition_point(|&x| x <= value)
}

/// Returns the sorted unique elements of an array.
pub fn unique(values: &[usize]) -> Vec<usize> {
    let mut output = values.to_vec();
    output.sort_unstable();
    output.dedup();
    output
}

/// Returns the minimum and maximum of an array, or `None` if it is empty or all NaN.
pub fn min_max<'a, I: IntoIterator<Item = &'a f32>>(values: I) -> Option<(f32, f32)> {
    values.into_iter().filter(|v| !v.is_nan()).fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hanning_is_symmetric_with_zero_ends() {
        let window = hanning(5);
        assert_eq!(window.len(), 5);
        assert!(window[0].abs() < 1e-7);
        assert!(window[4].abs() < 1e-7);
        assert!((window[2] - 1.0).abs() < 1e-7);
        assert!((window[1] - window[3]).abs() < 1e-7);
    }

    #[test]
    fn test_linspace_exclusive() {
        assert_eq!(linspace_exclusive(0.0, 1.0, 4), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(linspace_exclusive(1.0, 0.0, 2), vec![1.0, 0.5]);
        assert!(linspace_exclusive(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_search_sorted() {
        let arr = [1.0, 2.0, 2.0, 3.0];
        assert_eq!(search_sorted_left(&arr, 2.0), 1);
        assert_eq!(search_sorted_right(&arr, 2.0), 3);
        assert_eq!(search_sorted_left(&arr, 0.5), 0);
        assert_eq!(search_sorted_left(&arr, 9.0), 4);
    }

    #[test]
    fn test_unique() {
        assert_eq!(unique(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[2.0, -1.0, 5.0]), Some((-1.0, 5.0)));
        assert_eq!(min_max(&[]), None);
    }
}
