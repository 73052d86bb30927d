quantity!(Percentage, prefix: "", suffix: "%", precision: 2);

impl Percentage {
    /// Relative difference `|value - reference| / reference`, in percent.
    ///
    /// Returns [`None`] when the reference is zero, as the ratio is undefined.
    #[must_use]
    pub fn relative_difference(value: f64, reference: f64) -> Option<Self> {
        if reference == 0.0 {
            None
        } else {
            Some(Self((value - reference).abs() / reference.abs() * 100.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_space() {
        assert_eq!(Percentage(6.25).to_string(), "6.25%");
        assert_eq!(format!("{:.1}", Percentage(6.24)), "6.2%");
    }
}
