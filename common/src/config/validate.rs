pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Checks that `value` lies in `range`, producing the message format used by every config type.
pub fn check_range<T>(name: &str, value: T, range: std::ops::RangeInclusive<T>) -> Result<(), String>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "{} must be between {} and {}, got {}",
            name,
            range.start(),
            range.end(),
            value
        ))
    }
}
