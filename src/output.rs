use crate::error::{DashboardError, Result};
use crate::reports;
use crate::types::{Dataset, Period};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush().map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table<T>(title: &str, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}\n", title);
    println!("{}\n", render_table(rows, max_rows));
    if rows.len() > max_rows {
        println!("({} of {} rows shown)\n", max_rows, rows.len());
    }
}

/// Write every dashboard report to `dir` and return the files created.
pub fn export_snapshot(
    dir: &Path,
    data: &Dataset,
    period: Period,
    network_top_n: usize,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| DashboardError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut written = Vec::new();

    let overview = reports::network_overview(data, period);
    let mut out = |name: &str| {
        let p = dir.join(name);
        written.push(p.clone());
        p
    };
    write_csv(&out("overview.csv"), &[reports::overview_row(&overview)])?;
    write_csv(&out("quarterly_performance.csv"), &reports::quarterly_performance(data))?;
    write_csv(&out("attainment_by_store.csv"), &reports::attainment_by_store(data))?;
    write_csv(&out("product_ranking.csv"), &reports::product_ranking(data, network_top_n))?;
    write_csv(&out("consultant_ranking.csv"), &reports::consultant_ranking(data, network_top_n))?;
    write_csv(&out("store_ranking.csv"), &reports::store_ranking(data))?;
    write_json(&out("summary.json"), &reports::generate_summary(data, period))?;

    tracing::info!(dir = %dir.display(), files = written.len(), "snapshot exported");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RankingRow, StoreSale};

    fn ranking() -> Vec<RankingRow> {
        vec![
            RankingRow { rank: 1, name: "iPhone 13".to_string(), total: "R$ 3,500.00".to_string() },
            RankingRow { rank: 2, name: "Capinha".to_string(), total: "R$ 80.00".to_string() },
        ]
    }

    #[test]
    fn test_render_table_markdown() {
        let s = render_table(&ranking(), 1);
        assert!(s.contains("| Rank |"));
        assert!(s.contains("iPhone 13"));
        assert!(!s.contains("Capinha"));
    }

    #[test]
    fn test_render_empty_table() {
        let rows: Vec<RankingRow> = Vec::new();
        assert_eq!(render_table(&rows, 5), "(no rows)");
    }

    #[test]
    fn test_write_csv_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.csv");
        write_csv(&path, &ranking()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Rank,Name,Sales\n"));
        assert!(text.contains("1,iPhone 13,\"R$ 3,500.00\""));
    }

    #[test]
    fn test_export_snapshot_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = Dataset {
            store_sales: vec![StoreSale {
                store: "Terminal".to_string(),
                consultant: "Ana".to_string(),
                product: "Capinha".to_string(),
                category: "Acessório".to_string(),
                amount: Some(50.0),
            }],
            ..Dataset::default()
        };
        let out_dir = dir.path().join("out");
        let files = export_snapshot(&out_dir, &data, Period::Monthly, 10).unwrap();
        assert_eq!(files.len(), 7);
        assert!(files.iter().all(|f| f.exists()));

        let summary: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out_dir.join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["total_sales_rows"], 1);
        assert_eq!(summary["overview"]["tier"], "red");
    }
}
