//! Expense Report
//!
//! Filters expense records by date range and category, then derives totals,
//! averages, per-category and per-month breakdowns, and the extreme records.
//! Generation is a pure function of the records and criteria.

use std::collections::{BTreeMap, HashSet};
use std::io::Write;

use serde::Serialize;

use crate::display::report::{double_separator, format_bar, format_percentage, separator, truncate};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, MalformedRecord, Money, RawRecord, ReportCriteria};

/// Width of the bar charts in terminal output
const BAR_WIDTH: usize = 20;

/// Spending within one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    /// Category label
    pub category: String,
    /// Sum of costs in this category
    pub total: Money,
    /// Number of matching records in this category
    pub record_count: usize,
    /// Share of the report total, 0-100
    pub percentage: f64,
    /// Average cost per record in this category
    pub average: Money,
}

/// Spending within one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    /// Month key, `YYYY-MM`
    pub month: String,
    /// Sum of costs in the month
    pub total: Money,
    /// Number of matching records in the month
    pub record_count: usize,
}

/// Expense Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseReport {
    /// Criteria the report was generated for
    pub criteria: ReportCriteria,
    /// Sum of all matching costs
    pub total_expenses: Money,
    /// Number of matching records
    pub total_records: usize,
    /// Number of distinct item names among matching records
    pub total_unique_items: usize,
    /// Total divided by the number of distinct item names
    pub average_expense_per_item: Money,
    /// Total divided by the number of matching records
    pub average_cost: Money,
    /// Per-category breakdown, largest total first
    pub categories: Vec<CategoryBreakdown>,
    /// Per-month totals in chronological order
    pub months: Vec<MonthlyTotal>,
    /// Cheapest single cost (zero when nothing matched)
    pub min_expense: Money,
    /// Most expensive single cost (zero when nothing matched)
    pub max_expense: Money,
    /// First record with the highest cost
    pub most_expensive: Option<ExpenseRecord>,
    /// First record with the lowest cost
    pub least_expensive: Option<ExpenseRecord>,
    /// Raw records rejected before aggregation
    pub skipped: Vec<MalformedRecord>,
}

impl ExpenseReport {
    /// Generate a report over already-validated records
    pub fn generate(records: &[ExpenseRecord], criteria: &ReportCriteria) -> Self {
        let matching: Vec<&ExpenseRecord> =
            records.iter().filter(|r| criteria.matches(r)).collect();

        let mut total_expenses = Money::zero();
        let mut names: HashSet<&str> = HashSet::new();
        let mut by_category: BTreeMap<&str, (Money, usize)> = BTreeMap::new();
        let mut by_month: BTreeMap<String, (Money, usize)> = BTreeMap::new();
        let mut most_expensive: Option<&ExpenseRecord> = None;
        let mut least_expensive: Option<&ExpenseRecord> = None;

        for &record in &matching {
            total_expenses += record.cost;
            names.insert(record.name.as_str());

            let entry = by_category
                .entry(record.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 += record.cost;
            entry.1 += 1;

            let entry = by_month
                .entry(record.year_month())
                .or_insert((Money::zero(), 0));
            entry.0 += record.cost;
            entry.1 += 1;

            // Strict comparisons keep the first record on ties
            if most_expensive.map_or(true, |m| record.cost > m.cost) {
                most_expensive = Some(record);
            }
            if least_expensive.map_or(true, |l| record.cost < l.cost) {
                least_expensive = Some(record);
            }
        }

        let mut categories: Vec<CategoryBreakdown> = by_category
            .into_iter()
            .map(|(category, (total, count))| CategoryBreakdown {
                category: category.to_string(),
                total,
                record_count: count,
                percentage: total.percentage_of(total_expenses),
                average: total.divide_rounded(count),
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

        let months = by_month
            .into_iter()
            .map(|(month, (total, count))| MonthlyTotal {
                month,
                total,
                record_count: count,
            })
            .collect();

        Self {
            criteria: criteria.clone(),
            total_expenses,
            total_records: matching.len(),
            total_unique_items: names.len(),
            average_expense_per_item: total_expenses.divide_rounded(names.len()),
            average_cost: total_expenses.divide_rounded(matching.len()),
            categories,
            months,
            min_expense: least_expensive.map(|r| r.cost).unwrap_or_default(),
            max_expense: most_expensive.map(|r| r.cost).unwrap_or_default(),
            most_expensive: most_expensive.cloned(),
            least_expensive: least_expensive.cloned(),
            skipped: Vec::new(),
        }
    }

    /// Generate a report over raw records, skipping malformed ones
    ///
    /// Every raw record that cannot be converted is listed in `skipped`;
    /// the remaining records are aggregated as by [`ExpenseReport::generate`].
    pub fn generate_raw(records: &[RawRecord], criteria: &ReportCriteria) -> Self {
        let mut valid = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();

        for (position, raw) in records.iter().enumerate() {
            match raw.parse(position) {
                Ok(record) => valid.push(record),
                Err(malformed) => skipped.push(malformed),
            }
        }

        Self::generate(&valid, criteria).with_skipped(skipped)
    }

    /// Attach records rejected while loading the input, ordered by position
    pub fn with_skipped(mut self, skipped: Vec<MalformedRecord>) -> Self {
        self.skipped.extend(skipped);
        self.skipped.sort_by_key(|m| m.position);
        self
    }

    /// Check whether no records matched
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }

    /// The most and least expensive records
    ///
    /// Fails with [`ExpenseError::EmptyReport`] when nothing matched.
    pub fn extremes(&self) -> ExpenseResult<(&ExpenseRecord, &ExpenseRecord)> {
        match (&self.most_expensive, &self.least_expensive) {
            (Some(most), Some(least)) => Ok((most, least)),
            _ => Err(ExpenseError::EmptyReport),
        }
    }

    /// Per-category totals keyed by category
    pub fn expenses_by_category(&self) -> BTreeMap<String, Money> {
        self.categories
            .iter()
            .map(|c| (c.category.clone(), c.total))
            .collect()
    }

    /// Per-category share of the total keyed by category
    pub fn percentage_by_category(&self) -> BTreeMap<String, f64> {
        self.categories
            .iter()
            .map(|c| (c.category.clone(), c.percentage))
            .collect()
    }

    /// Per-category average cost keyed by category
    pub fn average_cost_by_category(&self) -> BTreeMap<String, Money> {
        self.categories
            .iter()
            .map(|c| (c.category.clone(), c.average))
            .collect()
    }

    /// Per-month totals keyed by `YYYY-MM`
    pub fn expenses_over_time(&self) -> BTreeMap<String, Money> {
        self.months.iter().map(|m| (m.month.clone(), m.total)).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency);
        let mut output = String::new();

        output.push_str(&format!("Expense Report: {}\n", self.criteria));
        output.push_str(&double_separator(72));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No expense records match these criteria.\n");
            self.push_skipped(&mut output);
            return output;
        }

        output.push_str(&format!("Total Expenses:           {:>14}\n", money(self.total_expenses)));
        output.push_str(&format!("Records:                  {:>14}\n", self.total_records));
        output.push_str(&format!("Average Cost:             {:>14}\n", money(self.average_cost)));
        output.push_str(&format!("Unique Items:             {:>14}\n", self.total_unique_items));
        output.push_str(&format!(
            "Average Expense per Item: {:>14}\n",
            money(self.average_expense_per_item)
        ));
        output.push_str(&format!("Min Expense:              {:>14}\n", money(self.min_expense)));
        output.push_str(&format!("Max Expense:              {:>14}\n", money(self.max_expense)));

        if let Ok((most, least)) = self.extremes() {
            output.push_str(&format!(
                "Most Expensive:  {} ({}, {})\n",
                most.name,
                money(most.cost),
                most.date
            ));
            output.push_str(&format!(
                "Least Expensive: {} ({}, {})\n",
                least.name,
                money(least.cost),
                least.date
            ));
        }

        // Categories
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>12} {:>6} {:>8} {:>12}  {}\n",
            "Category", "Amount", "Count", "%", "Average", ""
        ));
        output.push_str(&separator(72));
        output.push('\n');
        for category in &self.categories {
            let label = if category.category.is_empty() {
                "(uncategorized)".to_string()
            } else {
                truncate(&category.category, 24)
            };
            output.push_str(&format!(
                "{:<24} {:>12} {:>6} {:>8} {:>12}  {}\n",
                label,
                money(category.total),
                category.record_count,
                format_percentage(category.percentage),
                money(category.average),
                format_bar(category.percentage, 100.0, BAR_WIDTH / 2)
            ));
        }

        // Months
        let peak = self
            .months
            .iter()
            .map(|m| m.total)
            .max()
            .unwrap_or_default();
        output.push('\n');
        output.push_str(&format!("{:<10} {:>12} {:>6}  {}\n", "Month", "Amount", "Count", ""));
        output.push_str(&separator(72));
        output.push('\n');
        for month in &self.months {
            output.push_str(&format!(
                "{:<10} {:>12} {:>6}  {}\n",
                month.month,
                money(month.total),
                month.record_count,
                format_bar(month.total.as_f64(), peak.as_f64(), BAR_WIDTH)
            ));
        }

        self.push_skipped(&mut output);
        output
    }

    fn push_skipped(&self, output: &mut String) {
        if self.skipped.is_empty() {
            return;
        }
        output.push_str(&format!(
            "\nSkipped {} malformed record(s):\n",
            self.skipped.len()
        ));
        for malformed in &self.skipped {
            output.push_str(&format!("  {}\n", malformed));
        }
    }

    /// Export the report to CSV format
    ///
    /// One row per statistic, category and month.
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| ExpenseError::Export(e.to_string());
        let amount = |m: Money| format!("{:.2}", m.as_f64());

        csv.write_record(["Section", "Key", "Amount", "Count", "Percentage", "Average"])
            .map_err(export_err)?;

        let summary = [
            ("Total Expenses", amount(self.total_expenses), self.total_records.to_string()),
            ("Average Cost", amount(self.average_cost), String::new()),
            (
                "Average Expense per Item",
                amount(self.average_expense_per_item),
                self.total_unique_items.to_string(),
            ),
            ("Min Expense", amount(self.min_expense), String::new()),
            ("Max Expense", amount(self.max_expense), String::new()),
        ];
        for (key, value, count) in &summary {
            csv.write_record(["Summary", *key, value.as_str(), count.as_str(), "", ""])
                .map_err(export_err)?;
        }

        for category in &self.categories {
            csv.write_record([
                "Category",
                category.category.as_str(),
                amount(category.total).as_str(),
                category.record_count.to_string().as_str(),
                format!("{:.2}", category.percentage).as_str(),
                amount(category.average).as_str(),
            ])
            .map_err(export_err)?;
        }

        for month in &self.months {
            csv.write_record([
                "Month",
                month.month.as_str(),
                amount(month.total).as_str(),
                month.record_count.to_string().as_str(),
                "",
                "",
            ])
            .map_err(export_err)?;
        }

        csv.flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        Ok(())
    }

    /// Get the top categories by spending
    pub fn top_categories(&self, limit: usize) -> &[CategoryBreakdown] {
        &self.categories[..limit.min(self.categories.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MalformedReason, RecordId};
    use chrono::NaiveDate;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(name: &str, cents: i64, category: &str, d: NaiveDate) -> ExpenseRecord {
        ExpenseRecord::new(name, Money::from_cents(cents), category, d)
    }

    fn january() -> ReportCriteria {
        ReportCriteria::new(date(2024, 1, 1), date(2024, 1, 31))
    }

    fn sample_records() -> Vec<ExpenseRecord> {
        vec![
            record("Coffee", 500, "Food", date(2024, 1, 5)),
            record("Bus", 200, "Transport", date(2024, 1, 10)),
            record("Coffee", 450, "Food", date(2024, 1, 20)),
            record("Cinema", 1200, "Entertainment", date(2024, 2, 3)),
            record("Train", 1575, "Transport", date(2024, 2, 14)),
            record("Groceries", 6420, "Food", date(2024, 3, 1)),
            record("Refill", 0, "Food", date(2024, 3, 2)),
        ]
    }

    fn all_criteria() -> Vec<ReportCriteria> {
        vec![
            january(),
            ReportCriteria::new(date(2024, 1, 1), date(2024, 12, 31)),
            ReportCriteria::new(date(2024, 1, 1), date(2024, 12, 31)).with_category("Food"),
            ReportCriteria::new(date(2024, 2, 1), date(2024, 2, 29)).with_category("Transport"),
            ReportCriteria::single_day(date(2024, 3, 2)),
            ReportCriteria::new(date(2025, 1, 1), date(2025, 1, 31)),
        ]
    }

    #[test]
    fn test_coffee_and_bus_scenario() {
        let records = vec![
            record("Coffee", 500, "Food", date(2024, 1, 5)),
            record("Bus", 200, "Transport", date(2024, 1, 10)),
        ];
        let report = ExpenseReport::generate(&records, &january());

        assert_eq!(report.total_expenses.cents(), 700);
        assert_eq!(report.average_cost.cents(), 350);
        assert_eq!(report.total_records, 2);
        assert_eq!(report.total_unique_items, 2);
        assert_eq!(report.average_expense_per_item.cents(), 350);

        let by_category = report.expenses_by_category();
        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category["Food"].cents(), 500);
        assert_eq!(by_category["Transport"].cents(), 200);

        let pct = report.percentage_by_category();
        assert!((pct["Food"] - 71.43).abs() < 0.01);
        assert!((pct["Transport"] - 28.57).abs() < 0.01);

        assert_eq!(report.min_expense.cents(), 200);
        assert_eq!(report.max_expense.cents(), 500);
        let (most, least) = report.extremes().unwrap();
        assert_eq!(most.name, "Coffee");
        assert_eq!(least.name, "Bus");
    }

    #[test]
    fn test_empty_records() {
        let report = ExpenseReport::generate(&[], &january());

        assert!(report.is_empty());
        assert_eq!(report.total_expenses, Money::zero());
        assert_eq!(report.average_cost, Money::zero());
        assert_eq!(report.average_expense_per_item, Money::zero());
        assert_eq!(report.min_expense, Money::zero());
        assert_eq!(report.max_expense, Money::zero());
        assert!(report.most_expensive.is_none());
        assert!(report.least_expensive.is_none());
        assert!(report.categories.is_empty());
        assert!(report.months.is_empty());
        assert!(matches!(report.extremes(), Err(ExpenseError::EmptyReport)));
    }

    #[test]
    fn test_no_matches_is_empty() {
        let records = sample_records();
        let criteria = ReportCriteria::new(date(2025, 1, 1), date(2025, 1, 31));
        let report = ExpenseReport::generate(&records, &criteria);
        assert!(report.is_empty());
        assert!(report.most_expensive.is_none());
    }

    #[test]
    fn test_category_filter_excludes_other_categories() {
        let records = sample_records();
        let criteria = january().with_category("Food");
        let report = ExpenseReport::generate(&records, &criteria);

        assert_eq!(report.total_expenses.cents(), 950);
        assert_eq!(report.total_records, 2);
        assert_eq!(report.average_cost.cents(), 475);
        let by_category = report.expenses_by_category();
        assert_eq!(by_category.len(), 1);
        assert!(by_category.contains_key("Food"));
        assert!(!by_category.contains_key("Transport"));
        assert_eq!(report.percentage_by_category()["Food"], 100.0);
    }

    #[test]
    fn test_unset_category_includes_all() {
        let records = sample_records();
        let criteria = ReportCriteria::new(date(2024, 1, 1), date(2024, 12, 31));
        let report = ExpenseReport::generate(&records, &criteria);

        assert_eq!(report.total_records, records.len());
        assert_eq!(report.categories.len(), 3);
    }

    #[test]
    fn test_same_day_range() {
        let records = sample_records();
        let report = ExpenseReport::generate(&records, &ReportCriteria::single_day(date(2024, 1, 10)));

        assert_eq!(report.total_records, 1);
        assert_eq!(report.total_expenses.cents(), 200);
    }

    #[test]
    fn test_unique_items_are_case_sensitive() {
        let records = vec![
            record("Coffee", 300, "Food", date(2024, 1, 5)),
            record("coffee", 300, "Food", date(2024, 1, 6)),
            record("Coffee", 300, "Food", date(2024, 1, 7)),
        ];
        let report = ExpenseReport::generate(&records, &january());

        assert_eq!(report.total_unique_items, 2);
        assert_eq!(report.average_expense_per_item.cents(), 450);
        assert_eq!(report.average_cost.cents(), 300);
    }

    #[test]
    fn test_category_averages_and_order() {
        let records = sample_records();
        let criteria = ReportCriteria::new(date(2024, 1, 1), date(2024, 12, 31));
        let report = ExpenseReport::generate(&records, &criteria);

        let names: Vec<_> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Food", "Transport", "Entertainment"]);

        let averages = report.average_cost_by_category();
        // (500 + 450 + 6420 + 0) / 4 = 1842.5 -> rounds away from zero
        assert_eq!(averages["Food"].cents(), 1843);
        assert_eq!(averages["Transport"].cents(), 888);
        assert_eq!(averages["Entertainment"].cents(), 1200);
        assert_eq!(report.categories[0].record_count, 4);
    }

    #[test]
    fn test_expenses_over_time() {
        let records = sample_records();
        let criteria = ReportCriteria::new(date(2024, 1, 1), date(2024, 12, 31));
        let report = ExpenseReport::generate(&records, &criteria);

        let months: Vec<_> = report.months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);

        let over_time = report.expenses_over_time();
        assert_eq!(over_time["2024-01"].cents(), 1150);
        assert_eq!(over_time["2024-02"].cents(), 2775);
        assert_eq!(over_time["2024-03"].cents(), 6420);
    }

    #[test]
    fn test_extremes_tie_break_first_in_input_order() {
        let first = record("First", 500, "Food", date(2024, 1, 5));
        let second = record("Second", 500, "Food", date(2024, 1, 6));
        let records = vec![first.clone(), second];
        let report = ExpenseReport::generate(&records, &january());

        let (most, least) = report.extremes().unwrap();
        assert_eq!(most.id, first.id);
        assert_eq!(least.id, first.id);
    }

    #[test]
    fn test_zero_total_percentages_are_zero() {
        let records = vec![
            record("Sample", 0, "Food", date(2024, 1, 5)),
            record("Ticket", 0, "Transport", date(2024, 1, 6)),
        ];
        let report = ExpenseReport::generate(&records, &january());

        assert_eq!(report.total_expenses, Money::zero());
        for pct in report.percentage_by_category().values() {
            assert_eq!(*pct, 0.0);
            assert!(pct.is_finite());
        }
        assert_eq!(report.average_cost, Money::zero());
        assert!(report.most_expensive.is_some());
    }

    #[test]
    fn test_total_matches_filtered_sum() {
        let records = sample_records();
        for criteria in all_criteria() {
            let report = ExpenseReport::generate(&records, &criteria);
            let expected: Money = records
                .iter()
                .filter(|r| criteria.matches(r))
                .map(|r| r.cost)
                .sum();
            assert_eq!(report.total_expenses, expected, "criteria {}", criteria);
        }
    }

    #[test]
    fn test_category_partition_sums_to_total() {
        let records = sample_records();
        for criteria in all_criteria() {
            let report = ExpenseReport::generate(&records, &criteria);
            let partition: Money = report.expenses_by_category().values().sum();
            assert_eq!(partition, report.total_expenses, "criteria {}", criteria);

            let monthly: Money = report.expenses_over_time().values().sum();
            assert_eq!(monthly, report.total_expenses, "criteria {}", criteria);
        }
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let records = sample_records();
        for criteria in all_criteria() {
            let report = ExpenseReport::generate(&records, &criteria);
            if report.total_expenses.is_positive() {
                let sum: f64 = report.percentage_by_category().values().sum();
                assert!((sum - 100.0).abs() < 1e-9, "criteria {}: {}", criteria, sum);
            }
        }
    }

    #[test]
    fn test_generation_is_idempotent() {
        let records = sample_records();
        let snapshot = records.clone();
        for criteria in all_criteria() {
            let first = ExpenseReport::generate(&records, &criteria);
            let second = ExpenseReport::generate(&records, &criteria);
            assert_eq!(first, second);
        }
        assert_eq!(records, snapshot);
    }

    #[test]
    fn test_generate_raw_skips_malformed() {
        let raw: Vec<RawRecord> = serde_json::from_value(json!([
            {"_id": "a", "name": "Coffee", "cost": "5", "type": "Food", "date": "2024-01-05"},
            {"_id": "b", "name": "Broken", "cost": "five", "type": "Food", "date": "2024-01-06"},
            {"_id": "c", "name": "Bus", "cost": 2, "type": "Transport", "date": "2024-01-10"},
            {"_id": "d", "name": "Undated", "cost": "1", "type": "Food", "date": "someday"}
        ]))
        .unwrap();

        let report = ExpenseReport::generate_raw(&raw, &january());

        assert_eq!(report.total_expenses.cents(), 700);
        assert_eq!(report.total_records, 2);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].position, 1);
        assert!(matches!(report.skipped[0].reason, MalformedReason::InvalidCost(_)));
        assert_eq!(report.skipped[1].id.as_deref(), Some("d"));
        assert!(matches!(report.skipped[1].reason, MalformedReason::InvalidDate(_)));

        let most = report.most_expensive.as_ref().unwrap();
        assert_eq!(most.id, RecordId::from_foreign("a"));

        assert_eq!(report, ExpenseReport::generate_raw(&raw, &january()));
    }

    #[test]
    fn test_oversized_costs_do_not_overflow() {
        let raw: Vec<RawRecord> = serde_json::from_value(json!([
            {"name": "Island", "cost": "50000000000000000", "type": "Property", "date": "2024-01-05"},
            {"name": "Island", "cost": "50000000000000000", "type": "Property", "date": "2024-01-06"},
            {"name": "Tea", "cost": "3", "type": "Food", "date": "2024-01-07"}
        ]))
        .unwrap();

        let report = ExpenseReport::generate_raw(&raw, &january());
        assert_eq!(report.total_expenses.cents(), 300);
        assert_eq!(report.skipped.len(), 2);
        assert!(matches!(report.skipped[0].reason, MalformedReason::CostTooLarge(_)));

        let half = i64::MAX / 2 + 1;
        let records = vec![
            record("Island", half, "Property", date(2024, 1, 5)),
            record("Island", half, "Property", date(2024, 1, 6)),
        ];
        let report = ExpenseReport::generate(&records, &january());
        assert_eq!(report.total_expenses.cents(), i64::MAX);
        assert!(report.total_expenses.is_positive());
        assert!(report.categories[0].percentage.is_finite());
    }

    #[test]
    fn test_format_terminal() {
        let records = sample_records();
        let report = ExpenseReport::generate(&records, &january());
        let output = report.format_terminal("$");

        assert!(output.contains("Expense Report: 2024-01-01 to 2024-01-31"));
        assert!(output.contains("$11.50"));
        assert!(output.contains("Most Expensive:  Coffee"));
        assert!(output.contains("Least Expensive: Bus"));
        assert!(output.contains("2024-01"));

        let empty = ExpenseReport::generate(&[], &january()).format_terminal("$");
        assert!(empty.contains("No expense records match"));
    }

    #[test]
    fn test_export_csv() {
        let records = vec![
            record("Coffee", 500, "Food, Drinks", date(2024, 1, 5)),
            record("Bus", 200, "Transport", date(2024, 1, 10)),
        ];
        let report = ExpenseReport::generate(&records, &january());

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.starts_with("Section,Key,Amount,Count,Percentage,Average"));
        assert!(csv.contains("Summary,Total Expenses,7.00,2,,"));
        assert!(csv.contains("Category,\"Food, Drinks\",5.00,1,71.43,5.00"));
        assert!(csv.contains("Month,2024-01,7.00,2,,"));
    }

    #[test]
    fn test_top_categories() {
        let records = sample_records();
        let criteria = ReportCriteria::new(date(2024, 1, 1), date(2024, 12, 31));
        let report = ExpenseReport::generate(&records, &criteria);

        let top = report.top_categories(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].category, "Food");
        assert_eq!(report.top_categories(10).len(), 3);
    }
}
