//! Summary service - totals and breakdowns over stored records

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{
    calculate_totals, category_breakdown, monthly_totals, validate_records, CategorySlice,
    PeriodTotals, Summary, TransactionRecord, TransactionType, ValidationReport,
};
use crate::ports::TransactionRepository;

/// Everything a dashboard needs for one period, computed in one go
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub summary: Summary,
    pub income_breakdown: Vec<CategorySlice>,
    pub expense_breakdown: Vec<CategorySlice>,
    pub validation: ValidationReport,
}

/// Summary service for aggregated views
pub struct SummaryService {
    repository: Arc<dyn TransactionRepository>,
}

impl SummaryService {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self { repository }
    }

    fn fetch(&self, period: Option<&str>) -> Result<Vec<TransactionRecord>> {
        self.repository
            .list_records(period)
            .with_context(|| format!("Failed to load records from {} storage", self.repository.name()))
    }

    /// Totals for all records, or for one `YYYY-MM` period
    pub fn summary(&self, period: Option<&str>) -> Result<Summary> {
        let records = self.fetch(period)?;
        Ok(calculate_totals(&records))
    }

    /// Full report: totals, chart slices for both types, and skipped records
    pub fn report(&self, period: Option<&str>) -> Result<Report> {
        let records = self.fetch(period)?;
        let validation = validate_records(&records);
        if validation.skipped > 0 {
            warn!(
                skipped = validation.skipped,
                total = records.len(),
                "records excluded from totals"
            );
        }

        let summary = calculate_totals(&records);
        debug!(
            period = period.unwrap_or("all"),
            valid = validation.valid,
            "computed summary"
        );

        Ok(Report {
            period: period.map(str::to_string),
            income_breakdown: category_breakdown(&summary, TransactionType::Income),
            expense_breakdown: category_breakdown(&summary, TransactionType::Expense),
            summary,
            validation,
        })
    }

    /// Income, expenses and balance per month
    pub fn monthly(&self) -> Result<BTreeMap<String, PeriodTotals>> {
        let records = self.fetch(None)?;
        Ok(monthly_totals(&records))
    }

    /// Which stored records are excluded from totals
    pub fn validation(&self, period: Option<&str>) -> Result<ValidationReport> {
        let records = self.fetch(period)?;
        Ok(validate_records(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRepository;
    use rust_decimal::Decimal;

    fn service() -> SummaryService {
        let repo = InMemoryRepository::with_records(vec![
            TransactionRecord::new("income", 2000).with_category("Salary").with_date("2024-04-01"),
            TransactionRecord::new("despesa", "150,25").with_category("Food").with_date("2024-04-03"),
            TransactionRecord::new("expense", 400).with_category("Rent").with_date("2024-05-01"),
            TransactionRecord::new("???", 10).with_date("2024-05-02"),
        ])
        .unwrap();
        SummaryService::new(Arc::new(repo))
    }

    #[test]
    fn test_summary_for_period() {
        let service = service();
        let april = service.summary(Some("2024-04")).unwrap();
        assert_eq!(april.total_income, Decimal::from(2000));
        assert_eq!(april.total_expenses, Decimal::new(15025, 2));

        let all = service.summary(None).unwrap();
        assert_eq!(all.total_expenses, Decimal::new(55025, 2));
        assert_eq!(all.balance, Decimal::new(144975, 2));
    }

    #[test]
    fn test_report() {
        let report = service().report(None).unwrap();
        assert_eq!(report.validation.skipped, 1);
        assert_eq!(report.expense_breakdown[0].category, "Rent");
        assert_eq!(report.income_breakdown.len(), 1);
    }

    #[test]
    fn test_monthly() {
        let months = service().monthly().unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months["2024-05"].count, 1);
        assert_eq!(months["2024-05"].balance, Decimal::from(-400));
    }
}
