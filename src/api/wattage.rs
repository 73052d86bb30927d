use crate::{prelude::*, quantity::power::Watts};

/// Extract the wattage from a free-text reply: the first run of digits.
pub fn parse_wattage_reply(reply: &str) -> Result<Watts> {
    let reply = reply.trim();
    if reply.starts_with("Error") {
        bail!("wattage lookup failed: {reply}");
    }
    let digits = reply
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect::<String>();
    ensure!(!digits.is_empty(), "no wattage in `{reply}`");
    let watts: u32 = digits.parse().with_context(|| format!("wattage `{digits}` is too large"))?;
    ensure!(watts != 0, "looked up wattage is zero");
    Ok(Watts(f64::from(watts)))
}
