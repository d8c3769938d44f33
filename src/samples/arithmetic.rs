/// Multiplies two integers.
///
/// Not very useful on its own.
///
/// # Arguments
/// * `a` - The first integer
/// * `b` - The second integer
///
/// # Returns
/// The product, or `None` if it does not fit in an `i64`.
///
/// ```
/// use admonition_filter::samples::multiply;
///
/// assert_eq!(multiply(2, 3), Some(6));
/// assert_eq!(multiply(i64::MAX, 2), None);
/// ```
pub fn multiply(a: i64, b: i64) -> Option<i64> {
    a.checked_mul(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(4, 5), Some(20));
        assert_eq!(multiply(-3, 7), Some(-21));
        assert_eq!(multiply(0, i64::MIN), Some(0));
        assert_eq!(multiply(i64::MIN, -1), None);
    }
}
