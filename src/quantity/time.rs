quantity!(Hours, suffix: "h", precision: 1);

impl Hours {
    pub const ONE: Self = Self(1.0);
    pub const PER_DAY: Self = Self(24.0);
}
