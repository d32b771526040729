//! Import service - CSV transaction import

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ColumnMappings, Config, ImportOptions, ImportProfile};
use crate::domain::{RawValue, Transaction, TransactionRecord};
use crate::ports::TransactionRepository;

const TYPE_PATTERNS: [&str; 3] = ["type", "tipo", "kind"];
const AMOUNT_PATTERNS: [&str; 5] = ["amount", "valor", "value", "amt", "total"];
const CATEGORY_PATTERNS: [&str; 2] = ["category", "categoria"];
const DATE_PATTERNS: [&str; 3] = ["date", "data", "posted"];
const DESCRIPTION_PATTERNS: [&str; 7] =
    ["description", "descrição", "descricao", "desc", "memo", "payee", "details"];

/// Import service for CSV imports
pub struct ImportService {
    repository: Arc<dyn TransactionRepository>,
    data_dir: PathBuf,
}

impl ImportService {
    pub fn new(repository: Arc<dyn TransactionRepository>, data_dir: PathBuf) -> Self {
        Self { repository, data_dir }
    }

    /// Import transactions from a CSV file
    pub fn import(
        &self,
        file_path: &Path,
        mappings: &ColumnMappings,
        options: &ImportOptions,
        preview_only: bool,
    ) -> Result<ImportResult> {
        let file = std::fs::File::open(file_path)
            .with_context(|| format!("Failed to read CSV file: {:?}", file_path))?;
        self.import_reader(file, mappings, options, preview_only)
    }

    /// Import transactions from any CSV source
    ///
    /// Rows that fail validation are counted as skipped; they never abort
    /// the import.
    pub fn import_reader<R: Read>(
        &self,
        source: R,
        mappings: &ColumnMappings,
        options: &ImportOptions,
        preview_only: bool,
    ) -> Result<ImportResult> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).trim(csv::Trim::All).from_reader(source);
        let headers = reader.headers().context("Failed to read CSV headers")?.clone();

        let amount_idx = find_column(&headers, &mappings.amount)
            .with_context(|| format!("Amount column '{}' not found", mappings.amount))?;
        let type_idx = mappings.kind.as_deref().and_then(|c| find_column(&headers, c));
        let category_idx = mappings.category.as_deref().and_then(|c| find_column(&headers, c));
        let date_idx = mappings.date.as_deref().and_then(|c| find_column(&headers, c));
        let desc_idx = mappings.description.as_deref().and_then(|c| find_column(&headers, c));

        if type_idx.is_none() && options.default_type.is_none() {
            anyhow::bail!("No type column found and no default type given");
        }

        let mut accepted = Vec::new();
        let mut discovered = 0i64;
        let mut skipped = 0i64;

        for (line, row) in reader.records().enumerate() {
            let row = row.with_context(|| format!("Failed to read CSV row {}", line + 2))?;
            discovered += 1;

            let cell = |idx: Option<usize>| -> Option<&str> {
                idx.and_then(|i| row.get(i)).filter(|s| !s.is_empty())
            };

            let record = TransactionRecord {
                id: RawValue::Null,
                kind: cell(type_idx).or(options.default_type.as_deref()).into(),
                amount: cell(Some(amount_idx)).into(),
                category: cell(category_idx).or(options.default_category.as_deref()).into(),
                description: cell(desc_idx).into(),
                date: cell(date_idx).into(),
            };

            match Transaction::try_from(&record) {
                Ok(tx) => accepted.push(tx),
                Err(e) => {
                    debug!(row = line + 2, error = %e, "skipping CSV row");
                    skipped += 1;
                }
            }
        }

        let imported = accepted.len() as i64;

        if !preview_only {
            for tx in &accepted {
                self.repository.add_record(&TransactionRecord::from(tx))?;
            }
            info!(imported, skipped, "imported CSV transactions");
        }

        Ok(ImportResult {
            discovered,
            imported,
            skipped,
            preview: preview_only,
            rows: if preview_only {
                Some(accepted.iter().map(RowPreview::from).collect())
            } else {
                None
            },
        })
    }

    /// List saved import profiles
    pub fn list_profiles(&self) -> Result<HashMap<String, ImportProfile>> {
        let config = Config::load(&self.data_dir)?;
        Ok(config.import_profiles)
    }

    /// Save an import profile
    pub fn save_profile(&self, name: &str, mappings: &ColumnMappings, options: &ImportOptions) -> Result<()> {
        let mut config = Config::load(&self.data_dir)?;
        config.import_profiles.insert(
            name.to_string(),
            ImportProfile {
                column_mappings: mappings.clone(),
                options: options.clone(),
            },
        );
        config.save(&self.data_dir)?;
        Ok(())
    }

    /// Get a saved profile
    pub fn get_profile(&self, name: &str) -> Result<Option<ImportProfile>> {
        let config = Config::load(&self.data_dir)?;
        Ok(config.import_profiles.get(name).cloned())
    }

    /// Auto-detect column mapping from the CSV header of a file
    pub fn detect_columns(&self, file_path: &Path) -> Result<DetectedColumns> {
        let mut reader = csv::Reader::from_path(file_path)
            .with_context(|| format!("Failed to read CSV file: {:?}", file_path))?;
        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        Ok(detect_columns(&headers))
    }
}

/// Best-guess mapping for English and Portuguese headers
pub fn detect_columns(headers: &[String]) -> DetectedColumns {
    let mut taken: Vec<&String> = Vec::new();
    let mut pick = |patterns: &[&str]| -> Option<String> {
        let found = headers.iter().find(|h| {
            let lower = h.to_lowercase();
            !taken.contains(h) && patterns.iter().any(|p| lower.contains(p))
        })?;
        taken.push(found);
        Some(found.clone())
    };

    // Most specific first, so "Transaction Date" is not taken as a type column
    let description = pick(&DESCRIPTION_PATTERNS[..]);
    let category = pick(&CATEGORY_PATTERNS[..]);
    let date = pick(&DATE_PATTERNS[..]);
    let amount = pick(&AMOUNT_PATTERNS[..]);
    let kind = pick(&TYPE_PATTERNS[..]);

    DetectedColumns {
        kind,
        amount,
        category,
        date,
        description,
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    let name = name.trim();
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Result of column auto-detection
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct DetectedColumns {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DetectedColumns {
    /// Mappings from the detected columns, or `None` without an amount column
    pub fn into_mappings(self) -> Option<ColumnMappings> {
        Some(ColumnMappings {
            kind: self.kind,
            amount: self.amount?,
            category: self.category,
            date: self.date,
            description: self.description,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ImportResult {
    /// Data rows found in the CSV
    pub discovered: i64,
    /// Rows that passed validation (stored unless previewing)
    pub imported: i64,
    /// Rows rejected by validation
    pub skipped: i64,
    /// Whether this was a preview (no changes applied)
    pub preview: bool,
    /// Accepted rows (only in preview mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<RowPreview>>,
}

#[derive(Debug, Serialize)]
pub struct RowPreview {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl From<&Transaction> for RowPreview {
    fn from(tx: &Transaction) -> Self {
        Self {
            kind: tx.kind.to_string(),
            amount: tx.amount.to_string(),
            category: tx.category.clone(),
            date: tx.date.map(|d| d.to_string()),
            description: tx.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRepository;
    use tempfile::TempDir;

    const BANK_CSV: &str = "\
Date,Type,Amount,Category,Description
2024-01-05,income,\"3.500,00\",Salary,ACME payroll
2024-01-06,Despesa,-120.40,Food,Market
2024-01-07,transfer,50,,Between accounts
2024-01-08,expense,abc,Food,Broken amount
2024-01-09,expense,80,,Bus pass
";

    fn setup() -> (TempDir, Arc<InMemoryRepository>, ImportService) {
        let temp_dir = TempDir::new().unwrap();
        let repo = Arc::new(InMemoryRepository::new());
        let service = ImportService::new(repo.clone(), temp_dir.path().to_path_buf());
        (temp_dir, repo, service)
    }

    #[test]
    fn test_import_skips_invalid_rows() {
        let (_dir, repo, service) = setup();
        let result = service
            .import_reader(BANK_CSV.as_bytes(), &ColumnMappings::default(), &ImportOptions::default(), false)
            .unwrap();

        assert_eq!(result.discovered, 5);
        assert_eq!(result.imported, 3);
        assert_eq!(result.skipped, 2);
        assert!(result.rows.is_none());

        let stored = repo.list_records(None).unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[2].category_label(), "Other");
    }

    #[test]
    fn test_preview_does_not_store() {
        let (_dir, repo, service) = setup();
        let result = service
            .import_reader(BANK_CSV.as_bytes(), &ColumnMappings::default(), &ImportOptions::default(), true)
            .unwrap();

        let rows = result.rows.unwrap();
        assert_eq!(rows[0].amount, "3500.00");
        assert_eq!(rows[1].kind, "expense");
        assert!(repo.list_records(None).unwrap().is_empty());
    }

    #[test]
    fn test_default_type_without_type_column() {
        let (_dir, repo, service) = setup();
        let csv = "Data,Valor,Categoria\n2024-02-01,\"45,90\",\n2024-02-02,10,Transporte\n";
        let mappings = ColumnMappings {
            kind: None,
            amount: "valor".to_string(),
            category: Some("Categoria".to_string()),
            date: Some("Data".to_string()),
            description: None,
        };
        let options = ImportOptions {
            default_type: Some("despesa".to_string()),
            default_category: Some("Mercado".to_string()),
        };

        let result = service.import_reader(csv.as_bytes(), &mappings, &options, false).unwrap();
        assert_eq!(result.imported, 2);

        let stored = repo.list_records(Some("2024-02")).unwrap();
        assert_eq!(stored[0].category_label(), "Mercado");
        assert_eq!(stored[1].category_label(), "Transporte");
    }

    #[test]
    fn test_missing_columns_are_errors() {
        let (_dir, _repo, service) = setup();
        let mappings = ColumnMappings {
            amount: "Valor".to_string(),
            ..Default::default()
        };
        let err = service
            .import_reader(BANK_CSV.as_bytes(), &mappings, &ImportOptions::default(), true)
            .unwrap_err();
        assert!(err.to_string().contains("Amount column"));

        let mappings = ColumnMappings {
            kind: None,
            ..Default::default()
        };
        let err = service
            .import_reader(BANK_CSV.as_bytes(), &mappings, &ImportOptions::default(), true)
            .unwrap_err();
        assert!(err.to_string().contains("default type"));
    }

    #[test]
    fn test_detect_columns() {
        let headers: Vec<String> = ["Data", "Descrição", "Valor", "Tipo", "Categoria"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let detected = detect_columns(&headers);
        assert_eq!(detected.date.as_deref(), Some("Data"));
        assert_eq!(detected.description.as_deref(), Some("Descrição"));
        assert_eq!(detected.amount.as_deref(), Some("Valor"));
        assert_eq!(detected.kind.as_deref(), Some("Tipo"));
        assert_eq!(detected.category.as_deref(), Some("Categoria"));

        let headers: Vec<String> = ["Transaction Date", "Transaction Type", "Amount"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mappings = detect_columns(&headers).into_mappings().unwrap();
        assert_eq!(mappings.date.as_deref(), Some("Transaction Date"));
        assert_eq!(mappings.kind.as_deref(), Some("Transaction Type"));
        assert_eq!(mappings.amount, "Amount");
    }

    #[test]
    fn test_profiles_round_trip() {
        let (_dir, _repo, service) = setup();
        let options = ImportOptions {
            default_type: Some("expense".to_string()),
            default_category: None,
        };
        service.save_profile("card", &ColumnMappings::default(), &options).unwrap();

        let profile = service.get_profile("card").unwrap().unwrap();
        assert_eq!(profile.options.default_type.as_deref(), Some("expense"));
        assert_eq!(service.list_profiles().unwrap().len(), 1);
        assert!(service.get_profile("missing").unwrap().is_none());
    }
}
