// Reading and cleaning of the three CSV exports.
//
// Each table is read with headers trimmed once, checked for its required
// columns, then every raw row is normalized into a new typed row.
use crate::config::Settings;
use crate::error::{DashboardError, Result};
use crate::month::MonthLabel;
use crate::normalize::{parse_currency, parse_percentage, CoercionCounter};
use crate::types::{
    Dataset, MonthlySummary, NetworkSale, RawMonthlyView, RawNetworkSale, RawStoreSale, StoreSale,
};
use csv::{Reader, ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

pub const STORE_SALES_TABLE: &str = "VISÃO LOJAS";
pub const MONTHLY_VIEW_TABLE: &str = "VISÃO MENSAL";
pub const NETWORK_SALES_TABLE: &str = "VENDAS REDE";

const STORE_SALES_COLUMNS: &[&str] = &["LOJA", "CONSULTOR", "PRODUTO", "CATEGORIA", "VALOR VENDA"];
const MONTHLY_VIEW_COLUMNS: &[&str] = &["LOJA", "MÊS", "META MENSAL", "ACUMULADO MÊS", "% ATINGIMENTO"];
const NETWORK_SALES_COLUMNS: &[&str] = &["LOJA", "META MENSAL", "ACUMULADO DO MÊS"];

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub table: &'static str,
    pub total_rows: usize,
    pub parse_errors: usize,
    pub numeric_cells: usize,
    pub coerced_cells: usize,
}

#[derive(Debug, Clone)]
pub struct DatasetReport {
    pub tables: Vec<LoadReport>,
}

fn open_table(path: &Path, table: &'static str, required: &[&'static str]) -> Result<Reader<File>> {
    let file = File::open(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(file);
    let headers = rdr.headers()?.clone();
    for &column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(DashboardError::MissingColumn { table, column });
        }
    }
    Ok(rdr)
}

/// Read every row of `path` as `R`, cleaning each with `clean`.
///
/// Structurally broken records are skipped and counted; numeric cells that
/// do not parse are counted through the shared `CoercionCounter`.
fn read_table<R, T, F>(
    path: &Path,
    table: &'static str,
    required: &[&'static str],
    mut clean: F,
) -> Result<(Vec<T>, LoadReport)>
where
    R: DeserializeOwned,
    F: FnMut(R, &mut CoercionCounter) -> T,
{
    let mut rdr = open_table(path, table, required)?;
    let mut counter = CoercionCounter::default();
    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut rows = Vec::new();

    for result in rdr.deserialize::<R>() {
        total_rows += 1;
        match result {
            Ok(raw) => rows.push(clean(raw, &mut counter)),
            Err(e) => {
                parse_errors += 1;
                warn!(table, error = %e, "skipping malformed record");
            }
        }
    }

    let report = LoadReport {
        table,
        total_rows,
        parse_errors,
        numeric_cells: counter.cells,
        coerced_cells: counter.coerced,
    };
    if report.coerced_cells > 0 {
        warn!(table, coerced = report.coerced_cells, "numeric cells coerced to missing");
    }
    info!(table, rows = rows.len(), path = %path.display(), "table loaded");
    Ok((rows, report))
}

fn text_or(value: Option<String>, fallback: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

fn clean_store_sale(row: RawStoreSale, counter: &mut CoercionCounter) -> StoreSale {
    StoreSale {
        amount: counter.apply(row.sale_amount.as_deref(), parse_currency),
        store: text_or(row.store, "Sem loja"),
        consultant: text_or(row.consultant, "Sem consultor"),
        product: text_or(row.product, "Sem produto"),
        category: text_or(row.category, "Sem categoria"),
    }
}

fn clean_monthly_view(row: RawMonthlyView, counter: &mut CoercionCounter) -> MonthlySummary {
    MonthlySummary {
        target: counter.apply(row.target.as_deref(), parse_currency),
        accumulated: counter.apply(row.accumulated.as_deref(), parse_currency),
        total_sales: counter.apply(row.total_sales.as_deref(), parse_currency),
        average_ticket: counter.apply(row.average_ticket.as_deref(), parse_currency),
        performance: counter.apply(row.performance.as_deref(), parse_percentage),
        attainment: counter.apply(row.attainment.as_deref(), parse_percentage),
        store: text_or(row.store, "Sem loja"),
        month: MonthLabel::new(&text_or(row.month, "Sem mês")),
    }
}

fn clean_network_sale(row: RawNetworkSale, counter: &mut CoercionCounter) -> NetworkSale {
    NetworkSale {
        target: counter.apply(row.target.as_deref(), parse_currency),
        accumulated: counter.apply(row.accumulated.as_deref(), parse_currency),
        store: text_or(row.store, "Sem loja"),
    }
}

pub fn load_store_sales(path: &Path) -> Result<(Vec<StoreSale>, LoadReport)> {
    read_table::<RawStoreSale, _, _>(path, STORE_SALES_TABLE, STORE_SALES_COLUMNS, clean_store_sale)
}

pub fn load_monthly_view(path: &Path) -> Result<(Vec<MonthlySummary>, LoadReport)> {
    read_table::<RawMonthlyView, _, _>(path, MONTHLY_VIEW_TABLE, MONTHLY_VIEW_COLUMNS, clean_monthly_view)
}

pub fn load_network_sales(path: &Path) -> Result<(Vec<NetworkSale>, LoadReport)> {
    read_table::<RawNetworkSale, _, _>(path, NETWORK_SALES_TABLE, NETWORK_SALES_COLUMNS, clean_network_sale)
}

/// Load and clean all three tables. Any missing file or column aborts the
/// whole load.
pub fn load_dataset(settings: &Settings) -> Result<(Dataset, DatasetReport)> {
    let (store_sales, r1) = load_store_sales(&settings.store_sales_path())?;
    let (monthly, r2) = load_monthly_view(&settings.monthly_view_path())?;
    let (network, r3) = load_network_sales(&settings.network_sales_path())?;
    let dataset = Dataset {
        store_sales,
        monthly,
        network,
    };
    Ok((dataset, DatasetReport { tables: vec![r1, r2, r3] }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_store_sales_trims_headers_and_cells() {
        let file = create_test_csv(
            " LOJA , CONSULTOR ,PRODUTO, CATEGORIA ,VALOR VENDA \n\
             Terminal ,Ana,Galaxy A15,Smartphone,\"R$ 1.299,90\"\n\
             Patio 1,Bruno,Capinha,Acessório,\"R$ 49,90\"",
        );
        let (rows, report) = load_store_sales(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].store, "Terminal");
        assert_eq!(rows[0].amount, Some(1299.9));
        assert_eq!(rows[1].category, "Acessório");
        assert_eq!(rows[1].amount, Some(49.9));
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.coerced_cells, 0);
    }

    #[test]
    fn test_malformed_amount_becomes_missing() {
        let file = create_test_csv(
            "LOJA,CONSULTOR,PRODUTO,CATEGORIA,VALOR VENDA\n\
             Terminal,Ana,Galaxy A15,Smartphone,abc\n\
             Terminal,Ana,Capinha,Acessório,\n\
             Terminal,Ana,Capinha,Acessório,\"R$ 1.234.567,89\"",
        );
        let (rows, report) = load_store_sales(file.path()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].amount, None);
        assert_eq!(rows[1].amount, None);
        assert_eq!(rows[2].amount, Some(1234567.89));
        assert_eq!(report.coerced_cells, 1);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let file = create_test_csv("LOJA,CONSULTOR,PRODUTO,CATEGORIA\nTerminal,Ana,X,Y");
        let err = load_store_sales(file.path()).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::MissingColumn { column: "VALOR VENDA", .. }
        ));
        assert!(err.to_string().contains("VALOR VENDA"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_network_sales(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::Io { .. }));
    }

    #[test]
    fn test_monthly_view_percentages_and_optional_columns() {
        let file = create_test_csv(
            "LOJA,MÊS,META MENSAL,ACUMULADO MÊS,% ATINGIMENTO \n\
             Terminal,ABRIL,\"R$ 100.000,00\",\"R$ 65.400,00\",\"65,4%\"\n\
             Terminal,MAIO,\"R$ 100.000,00\",\"R$ 50.000,00\",erro",
        );
        let (rows, report) = load_monthly_view(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month.as_str(), "ABRIL");
        assert_eq!(rows[0].target, Some(100000.0));
        assert_eq!(rows[0].accumulated, Some(65400.0));
        assert_eq!(rows[0].attainment, Some(65.4));
        assert_eq!(rows[0].average_ticket, None);
        assert_eq!(rows[1].attainment, None);
        assert_eq!(report.coerced_cells, 1);
    }

    #[test]
    fn test_network_sales_without_month_column() {
        let file = create_test_csv(
            "LOJA,META MENSAL,ACUMULADO DO MÊS\n\
             Terminal,1000,600\n\
             Patio 1,2000,800",
        );
        let (rows, _) = load_network_sales(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].target, Some(2000.0));
        assert_eq!(rows[1].accumulated, Some(800.0));
        assert_eq!(rows[0].store, "Terminal");
    }

    #[test]
    fn test_empty_store_name_gets_placeholder() {
        let file = create_test_csv(
            "LOJA,CONSULTOR,PRODUTO,CATEGORIA,VALOR VENDA\n\
             ,Ana,Capinha,Acessório,10",
        );
        let (rows, _) = load_store_sales(file.path()).unwrap();
        assert_eq!(rows[0].store, "Sem loja");
    }

    #[test]
    fn test_load_dataset_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        std::fs::write(
            settings.store_sales_path(),
            "LOJA,CONSULTOR,PRODUTO,CATEGORIA,VALOR VENDA\nTerminal,Ana,Capinha,Acessório,10\n",
        )
        .unwrap();
        std::fs::write(
            settings.monthly_view_path(),
            "LOJA,MÊS,META MENSAL,ACUMULADO MÊS,% ATINGIMENTO\nTerminal,ABRIL,100,60,\"60,0%\"\n",
        )
        .unwrap();
        std::fs::write(
            settings.network_sales_path(),
            "LOJA,META MENSAL,ACUMULADO DO MÊS\nTerminal,100,60\n",
        )
        .unwrap();

        let (dataset, report) = load_dataset(&settings).unwrap();
        assert_eq!(dataset.store_sales.len(), 1);
        assert_eq!(dataset.monthly.len(), 1);
        assert_eq!(dataset.network.len(), 1);
        assert_eq!(report.tables.len(), 3);
        assert_eq!(report.tables[1].table, MONTHLY_VIEW_TABLE);
    }
}
