quantity!(
    /// Philippine peso per kilowatt-hour.
    KilowattHourRate, prefix: "₱", suffix: "/kWh", precision: 4
);
