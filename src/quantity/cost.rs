quantity!(
    /// Philippine peso.
    Cost, prefix: "₱", precision: 2
);

impl Cost {
    /// Whole number of centavos.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn as_cents(self) -> i64 {
        (self.0 * 100.0).round() as i64
    }
}
