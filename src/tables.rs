use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use kuryente::{
    appliance::ApplianceSet,
    engine::AggregateTotals,
    history::{BillPrediction, CalculationItem, SavedCalculation},
    rates::HistoricalRates,
    store::CalculationId,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn right(content: impl ToString) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

pub fn build_breakdown_table(items: &[CalculationItem], totals: AggregateTotals) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Appliance", "Qty", "Per hour", "Per day", "Per week", "Per month"]);
    for item in items {
        table.add_row(vec![
            Cell::new(item.usage.name()),
            right(item.usage.quantity()).add_attribute(Attribute::Dim),
            right(format!("{:.2}", item.breakdown.per_hour)),
            right(format!("{:.2}", item.breakdown.per_day)),
            right(format!("{:.2}", item.breakdown.per_week)),
            right(format!("{:.2}", item.breakdown.per_month)).fg(Color::DarkYellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        right(format!("{:.2}", totals.per_hour)),
        right(format!("{:.2}", totals.per_day)),
        right(format!("{:.2}", totals.per_week)),
        right(format!("{:.2}", totals.per_month)).add_attribute(Attribute::Bold).fg(Color::Red),
    ]);
    table
}

pub fn build_appliance_sets_table(sets: &[ApplianceSet]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Set", "Appliances", "Monthly energy"]);
    for set in sets {
        table.add_row(vec![
            Cell::new(set.name()).add_attribute(Attribute::Bold),
            right(set.len()),
            right(format!("{:.2}", set.monthly_energy())),
        ]);
    }
    table
}

pub fn build_appliances_table(set: &ApplianceSet) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Appliance", "Wattage", "Hours/day", "Days", "Weeks", "Qty", "Energy"]);
    for usage in set.appliances() {
        let days = usage.days_per_week().iter().map(|day| day.token()).collect::<Vec<_>>();
        table.add_row(vec![
            Cell::new(usage.name()),
            right(usage.wattage()),
            right(usage.hours_per_day()),
            Cell::new(days.join(" ")).add_attribute(Attribute::Dim),
            Cell::new(usage.weeks_per_month()),
            right(usage.quantity()),
            right(format!("{:.2}", usage.monthly_energy())).fg(Color::DarkYellow),
        ]);
    }
    table
}

pub fn build_calculations_table(calculations: &[(CalculationId, SavedCalculation)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Name", "Created", "Rate", "Monthly cost", "Declared bill"]);
    for (id, calculation) in calculations {
        table.add_row(vec![
            right(id).add_attribute(Attribute::Dim),
            Cell::new(calculation.display_name(id)),
            Cell::new(calculation.created_at().format("%Y-%m-%d %H:%M")),
            right(calculation.rate()),
            right(format!("{:.2}", calculation.total_cost())).fg(Color::DarkYellow),
            right(calculation.monthly_bill().map(|bill| format!("{bill:.2}")).unwrap_or_default()),
        ]);
    }
    table
}

pub fn build_predictions_table(predictions: &[BillPrediction]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Month", "Sets", "Energy", "Rate", "Margin", "Min", "Average", "Max"]);
    for prediction in predictions {
        table.add_row(vec![
            Cell::new(prediction.month).add_attribute(Attribute::Bold),
            Cell::new(prediction.appliance_sets.join(", ")),
            right(format!("{:.2}", prediction.total_energy)),
            right(prediction.predicted_rate),
            right(prediction.margin).add_attribute(Attribute::Dim),
            right(format!("{:.2}", prediction.estimated_bill.min)).fg(Color::Green),
            right(format!("{:.2}", prediction.estimated_bill.average)).fg(Color::DarkYellow),
            right(format!("{:.2}", prediction.estimated_bill.max)).fg(Color::Red),
        ]);
    }
    table
}

pub fn build_yearly_summaries_table(rates: &HistoricalRates) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Year", "Months", "Average", "Min", "Max"]);
    for summary in rates.years().into_iter().filter_map(|year| rates.yearly_summary(year)) {
        table.add_row(vec![
            Cell::new(summary.year).add_attribute(Attribute::Bold),
            right(summary.n_months),
            right(summary.average).fg(Color::DarkYellow),
            right(summary.min).fg(Color::Green),
            right(summary.max).fg(Color::Red),
        ]);
    }
    table
}

pub fn build_monthly_rates_table(rates: &HistoricalRates, year: i32) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Month", "Rate", "Seasonal factor"]);
    let average = rates.yearly_summary(year).map(|summary| summary.average);
    for rate in rates.iter().filter(|rate| rate.year == year) {
        let color = match average {
            Some(average) if rate.rate > average => Color::Red,
            Some(_) => Color::Green,
            None => Color::Reset,
        };
        table.add_row(vec![
            Cell::new(format!("{}-{:02}", rate.year, rate.month)),
            right(rate.rate).fg(color),
            right(format!("{:.4}", rates.seasonal_factor(rate.month)))
                .add_attribute(Attribute::Dim),
        ]);
    }
    table
}
