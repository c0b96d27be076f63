//! Analytics report
//!
//! Aggregates the transaction log for the analytics screen: period totals,
//! comparison with the previous period, breakdown by category or income
//! source, and per-day totals for the chart. All aggregation is computed from
//! the log on demand; nothing here is persisted.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::models::{AccountId, Money, Transaction, TransactionType};

/// Period granularity selectable on the analytics screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
}

/// Half-open period: `start` is inclusive, `end` is the first instant of the
/// next period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PeriodBounds {
    /// The period of the given granularity containing `reference`
    ///
    /// Weeks start on Monday. Periods tile the timeline with no gap: every
    /// instant, sub-second timestamps included, falls in exactly one period.
    pub fn for_date(reference: DateTime<Utc>, range: TimeRange) -> Self {
        let date = reference.date_naive();

        let (first, next) = match range {
            TimeRange::Day => (date, date + Duration::days(1)),
            TimeRange::Week => {
                let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                (monday, monday + Duration::days(7))
            }
            TimeRange::Month => {
                let first = first_of_month(date.year(), date.month());
                (first, first_of_next_month(date.year(), date.month()))
            }
            TimeRange::Year => (
                NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).unwrap(),
            ),
        };

        Self {
            start: start_of_day(first),
            end: start_of_day(next),
        }
    }

    /// The period of the same granularity immediately before this one
    pub fn previous(&self, range: TimeRange) -> Self {
        Self::for_date(self.start - Duration::milliseconds(1), range)
    }

    /// Whether an instant falls inside this period
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

fn first_of_next_month(year: i32, month: u32) -> NaiveDate {
    if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
}

/// Period totals and comparison with the previous period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income minus expenses
    pub net_change: Money,
    /// Percentage change of the selected type's total against the previous
    /// period; 0.0 when the previous period had no activity
    pub comparison_with_previous: f64,
}

/// One slice of the breakdown chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category_id: String,
    pub category_name: String,
    pub amount: Money,
    /// Share of the period total; 0.0 when the total is zero
    pub percentage: f64,
    pub color: String,
}

/// Total of the selected type for one day, for the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub amount: Money,
    pub kind: TransactionType,
}

/// Account reference shown in the transaction list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountLabel {
    pub id: AccountId,
    pub name: String,
}

/// Row of the period's transaction list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionListItem {
    pub kind: TransactionType,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub label: String,
    pub source_account: Option<AccountLabel>,
    pub destination_account: Option<AccountLabel>,
}

impl From<&Transaction> for TransactionListItem {
    fn from(txn: &Transaction) -> Self {
        let label = match txn.kind {
            TransactionType::Expense => txn
                .category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            TransactionType::Income => txn
                .income_source
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            TransactionType::Transfer => "Перевод".to_string(),
        };

        let to_label = |snapshot: &crate::models::AccountSnapshot| AccountLabel {
            id: snapshot.id,
            name: snapshot.name.clone(),
        };

        Self {
            kind: txn.kind,
            amount: txn.amount,
            date: txn.date,
            label,
            source_account: txn.source_account.as_ref().map(to_label),
            destination_account: txn.destination_account.as_ref().map(to_label),
        }
    }
}

/// The full analytics payload for one period and selected type
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub selected: TransactionType,
    pub summary: AnalyticsSummary,
    pub breakdown: Vec<CategoryBreakdown>,
    pub daily: Vec<DailyTotal>,
    pub transactions: Vec<TransactionListItem>,
}

impl AnalyticsReport {
    /// Aggregate the log for the period containing `reference`
    ///
    /// The breakdown groups expenses by category and income by source;
    /// transfers have no breakdown. The transaction list keeps only the
    /// selected type, except the transfer tab which lists everything in the
    /// period.
    pub fn generate(
        transactions: &[Transaction],
        reference: DateTime<Utc>,
        range: TimeRange,
        selected: TransactionType,
    ) -> Self {
        let bounds = PeriodBounds::for_date(reference, range);
        let previous_bounds = bounds.previous(range);

        let in_period: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| bounds.contains(t.date))
            .collect();

        let total_income = sum_of(&in_period, TransactionType::Income);
        let total_expenses = sum_of(&in_period, TransactionType::Expense);

        let previous: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| previous_bounds.contains(t.date))
            .collect();

        let current_total = match selected {
            TransactionType::Income => total_income,
            TransactionType::Expense => total_expenses,
            TransactionType::Transfer => sum_of(&in_period, TransactionType::Transfer),
        };
        let previous_total = sum_of(&previous, selected);

        let comparison_with_previous = if previous_total.is_zero() {
            0.0
        } else {
            (current_total.to_units_f64() - previous_total.to_units_f64())
                / previous_total.to_units_f64()
                * 100.0
        };

        let summary = AnalyticsSummary {
            total_income,
            total_expenses,
            net_change: total_income - total_expenses,
            comparison_with_previous,
        };

        let breakdown = build_breakdown(&in_period, selected, current_total);
        let daily = build_daily(&in_period, selected);

        let mut listed: Vec<&Transaction> = in_period
            .iter()
            .filter(|t| selected == TransactionType::Transfer || t.kind == selected)
            .copied()
            .collect();
        listed.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            range,
            selected,
            summary,
            breakdown,
            daily,
            transactions: listed.iter().map(|t| TransactionListItem::from(*t)).collect(),
        }
    }
}

fn sum_of(transactions: &[&Transaction], kind: TransactionType) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

fn build_breakdown(
    transactions: &[&Transaction],
    selected: TransactionType,
    total: Money,
) -> Vec<CategoryBreakdown> {
    // (name, color) keyed by tag id; insertion order is recovered by sorting
    let mut groups: HashMap<String, (String, String, Money)> = HashMap::new();

    for txn in transactions.iter().filter(|t| t.kind == selected) {
        let (id, name, color) = match selected {
            TransactionType::Expense => match &txn.category {
                Some(c) => (c.id.to_string(), c.name.clone(), c.color.clone()),
                None => continue,
            },
            TransactionType::Income => match &txn.income_source {
                Some(s) => (s.id.to_string(), s.name.clone(), s.color.clone()),
                None => continue,
            },
            TransactionType::Transfer => return Vec::new(),
        };

        let entry = groups.entry(id).or_insert((name, color, Money::zero()));
        entry.2 += txn.amount;
    }

    let mut breakdown: Vec<CategoryBreakdown> = groups
        .into_iter()
        .map(|(id, (name, color, amount))| CategoryBreakdown {
            category_id: id,
            category_name: name,
            percentage: if total.is_zero() {
                0.0
            } else {
                amount.to_units_f64() / total.to_units_f64() * 100.0
            },
            amount,
            color,
        })
        .collect();

    breakdown.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category_name.cmp(&b.category_name)));
    breakdown
}

fn build_daily(transactions: &[&Transaction], selected: TransactionType) -> Vec<DailyTotal> {
    let mut by_day: HashMap<NaiveDate, Money> = HashMap::new();

    for txn in transactions.iter().filter(|t| t.kind == selected) {
        *by_day.entry(txn.date.date_naive()).or_insert(Money::zero()) += txn.amount;
    }

    let mut daily: Vec<DailyTotal> = by_day
        .into_iter()
        .map(|(date, amount)| DailyTotal {
            date,
            amount,
            kind: selected,
        })
        .collect();

    daily.sort_by_key(|d| d.date);
    daily
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Account, AccountForm, AccountKind, AccountSnapshot, Category, IncomeSource, TransactionId,
    };

    fn account(name: &str) -> Account {
        Account::new(AccountForm {
            name: name.to_string(),
            kind: AccountKind::Cash,
            ..AccountForm::default()
        })
    }

    fn at(date: &str) -> DateTime<Utc> {
        format!("{}T12:00:00Z", date).parse().unwrap()
    }

    fn expense(amount: i64, date: &str, category: &Category, source: &Account) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            kind: TransactionType::Expense,
            amount: Money::from_units(amount),
            date: at(date),
            category: Some(category.clone()),
            income_source: None,
            source_account: Some(AccountSnapshot::from(source)),
            destination_account: None,
            note: None,
        }
    }

    fn income(amount: i64, date: &str, source: &IncomeSource, destination: &Account) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            kind: TransactionType::Income,
            amount: Money::from_units(amount),
            date: at(date),
            category: None,
            income_source: Some(source.clone()),
            source_account: None,
            destination_account: Some(AccountSnapshot::from(destination)),
            note: None,
        }
    }

    #[test]
    fn test_day_bounds() {
        let bounds = PeriodBounds::for_date(at("2025-03-15"), TimeRange::Day);
        assert_eq!(bounds.start, "2025-03-15T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(bounds.end, "2025-03-16T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert!(!bounds.contains(bounds.end));
    }

    #[test]
    fn test_week_starts_monday() {
        // 2025-03-15 is a Saturday
        let bounds = PeriodBounds::for_date(at("2025-03-15"), TimeRange::Week);
        assert_eq!(bounds.start.date_naive().to_string(), "2025-03-10");
        assert_eq!(bounds.end.date_naive().to_string(), "2025-03-17");
    }

    #[test]
    fn test_month_and_year_bounds() {
        let month = PeriodBounds::for_date(at("2024-02-10"), TimeRange::Month);
        assert_eq!(month.start.date_naive().to_string(), "2024-02-01");
        assert_eq!(month.end.date_naive().to_string(), "2024-03-01");

        let year = PeriodBounds::for_date(at("2024-02-10"), TimeRange::Year);
        assert_eq!(year.start.date_naive().to_string(), "2024-01-01");
        assert_eq!(year.end.date_naive().to_string(), "2025-01-01");
    }

    #[test]
    fn test_previous_period() {
        let month = PeriodBounds::for_date(at("2025-03-15"), TimeRange::Month);
        let previous = month.previous(TimeRange::Month);
        assert_eq!(previous.start.date_naive().to_string(), "2025-02-01");
        assert_eq!(previous.end, month.start);

        let week = PeriodBounds::for_date(at("2025-03-15"), TimeRange::Week);
        let previous_week = week.previous(TimeRange::Week);
        assert_eq!(previous_week.start.date_naive().to_string(), "2025-03-03");
    }

    #[test]
    fn test_periods_tile_without_gaps() {
        // Sub-second timestamps in the last second of a period belong to it,
        // not to a hole between periods
        let instant: DateTime<Utc> = "2025-03-12T23:59:59.500Z".parse().unwrap();

        for range in [TimeRange::Day, TimeRange::Week, TimeRange::Month, TimeRange::Year] {
            let bounds = PeriodBounds::for_date(at("2025-03-12"), range);
            assert!(
                bounds.contains(instant),
                "{:?} period should contain {}",
                range,
                instant
            );
            assert!(!bounds.previous(range).contains(instant));
        }

        // And the first instant of the next day belongs to the next period
        let midnight: DateTime<Utc> = "2025-03-13T00:00:00Z".parse().unwrap();
        let day = PeriodBounds::for_date(at("2025-03-12"), TimeRange::Day);
        assert!(!day.contains(midnight));
        assert!(PeriodBounds::for_date(midnight, TimeRange::Day).contains(midnight));
    }

    #[test]
    fn test_sub_second_transaction_appears_in_analytics() {
        let acc = account("Наличные");
        let cat = Category::new("Продукты", "#F97316", "🛒");

        let mut txn = expense(100, "2025-03-12", &cat, &acc);
        txn.date = "2025-03-12T23:59:59.500Z".parse().unwrap();

        let report = AnalyticsReport::generate(
            &[txn],
            at("2025-03-12"),
            TimeRange::Day,
            TransactionType::Expense,
        );

        assert_eq!(report.summary.total_expenses, Money::from_units(100));
        assert_eq!(report.transactions.len(), 1);
    }

    #[test]
    fn test_summary_and_breakdown() {
        let acc = account("Наличные");
        let cat = Category::new("Продукты", "#F97316", "🛒");
        let salary = IncomeSource::new("Зарплата", "#22C55E", "💼");

        // Two expenses in one week plus an income
        let transactions = vec![
            expense(100, "2025-03-10", &cat, &acc),
            expense(50, "2025-03-11", &cat, &acc),
            income(200, "2025-03-10", &salary, &acc),
        ];

        let report = AnalyticsReport::generate(
            &transactions,
            at("2025-03-12"),
            TimeRange::Week,
            TransactionType::Expense,
        );

        assert_eq!(report.summary.total_expenses, Money::from_units(150));
        assert_eq!(report.summary.total_income, Money::from_units(200));
        assert_eq!(report.summary.net_change, Money::from_units(50));

        assert_eq!(report.breakdown.len(), 1);
        assert_eq!(report.breakdown[0].category_name, "Продукты");
        assert_eq!(report.breakdown[0].amount, Money::from_units(150));
        assert!((report.breakdown[0].percentage - 100.0).abs() < 1e-9);

        // Daily totals ascending by date
        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.daily[0].amount, Money::from_units(100));
        assert_eq!(report.daily[1].amount, Money::from_units(50));
    }

    #[test]
    fn test_income_breakdown_groups_by_source() {
        let acc = account("Карта");
        let salary = IncomeSource::new("Зарплата", "#22C55E", "💼");
        let freelance = IncomeSource::new("Фриланс", "#3B82F6", "💻");

        let transactions = vec![
            income(300, "2025-03-10", &salary, &acc),
            income(100, "2025-03-11", &freelance, &acc),
            income(200, "2025-03-12", &salary, &acc),
        ];

        let report = AnalyticsReport::generate(
            &transactions,
            at("2025-03-12"),
            TimeRange::Week,
            TransactionType::Income,
        );

        assert_eq!(report.breakdown.len(), 2);
        assert_eq!(report.breakdown[0].category_name, "Зарплата");
        assert_eq!(report.breakdown[0].amount, Money::from_units(500));
        assert!((report.breakdown[0].percentage - 500.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_comparison_with_previous_period() {
        let acc = account("Наличные");
        let cat = Category::new("Продукты", "#F97316", "🛒");

        let transactions = vec![
            expense(100, "2025-03-05", &cat, &acc), // previous week
            expense(150, "2025-03-12", &cat, &acc), // current week
        ];

        let report = AnalyticsReport::generate(
            &transactions,
            at("2025-03-12"),
            TimeRange::Week,
            TransactionType::Expense,
        );

        assert!((report.summary.comparison_with_previous - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_previous_period_yields_zero_comparison() {
        let acc = account("Наличные");
        let cat = Category::new("Продукты", "#F97316", "🛒");
        let transactions = vec![expense(150, "2025-03-12", &cat, &acc)];

        let report = AnalyticsReport::generate(
            &transactions,
            at("2025-03-12"),
            TimeRange::Week,
            TransactionType::Expense,
        );

        assert_eq!(report.summary.comparison_with_previous, 0.0);
    }

    #[test]
    fn test_empty_period() {
        let report = AnalyticsReport::generate(
            &[],
            at("2025-03-12"),
            TimeRange::Month,
            TransactionType::Expense,
        );

        assert_eq!(report.summary.total_income, Money::zero());
        assert_eq!(report.summary.total_expenses, Money::zero());
        assert_eq!(report.summary.comparison_with_previous, 0.0);
        assert!(report.breakdown.is_empty());
        assert!(report.daily.is_empty());
        assert!(report.transactions.is_empty());
    }

    #[test]
    fn test_transfer_tab_has_no_breakdown_and_lists_everything() {
        let cash = account("Наличные");
        let card = account("Карта");
        let cat = Category::new("Продукты", "#F97316", "🛒");

        let transfer = Transaction {
            id: TransactionId::new(),
            kind: TransactionType::Transfer,
            amount: Money::from_units(500),
            date: at("2025-03-12"),
            category: None,
            income_source: None,
            source_account: Some(AccountSnapshot::from(&cash)),
            destination_account: Some(AccountSnapshot::from(&card)),
            note: None,
        };
        let transactions = vec![expense(100, "2025-03-11", &cat, &cash), transfer];

        let report = AnalyticsReport::generate(
            &transactions,
            at("2025-03-12"),
            TimeRange::Week,
            TransactionType::Transfer,
        );

        assert!(report.breakdown.is_empty());
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.transactions[0].label, "Перевод");
    }

    #[test]
    fn test_transaction_list_newest_first() {
        let acc = account("Наличные");
        let cat = Category::new("Продукты", "#F97316", "🛒");

        let transactions = vec![
            expense(10, "2025-03-10", &cat, &acc),
            expense(20, "2025-03-12", &cat, &acc),
            expense(30, "2025-03-11", &cat, &acc),
        ];

        let report = AnalyticsReport::generate(
            &transactions,
            at("2025-03-12"),
            TimeRange::Week,
            TransactionType::Expense,
        );

        let amounts: Vec<i64> = report.transactions.iter().map(|t| t.amount.units()).collect();
        assert_eq!(amounts, vec![20, 30, 10]);
    }
}
