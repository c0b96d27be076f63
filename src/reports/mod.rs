//! On-demand aggregation over the transaction log

pub mod analytics;

pub use analytics::{
    AccountLabel, AnalyticsReport, AnalyticsSummary, CategoryBreakdown, DailyTotal, PeriodBounds,
    TimeRange, TransactionListItem,
};
