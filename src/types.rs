use crate::month::MonthLabel;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

// Raw rows mirror the export headers. Headers are trimmed by the reader, so
// the names here carry no padding.

#[derive(Debug, Deserialize)]
pub struct RawStoreSale {
    #[serde(rename = "LOJA")]
    pub store: Option<String>,
    #[serde(rename = "CONSULTOR")]
    pub consultant: Option<String>,
    #[serde(rename = "PRODUTO")]
    pub product: Option<String>,
    #[serde(rename = "CATEGORIA")]
    pub category: Option<String>,
    #[serde(rename = "VALOR VENDA")]
    pub sale_amount: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawMonthlyView {
    #[serde(rename = "LOJA")]
    pub store: Option<String>,
    #[serde(rename = "MÊS")]
    pub month: Option<String>,
    #[serde(rename = "META MENSAL")]
    pub target: Option<String>,
    #[serde(rename = "ACUMULADO MÊS")]
    pub accumulated: Option<String>,
    #[serde(rename = "TOTAL VENDAS")]
    pub total_sales: Option<String>,
    #[serde(rename = "TICKET MÉDIO")]
    pub average_ticket: Option<String>,
    #[serde(rename = "PERFORMANCE")]
    pub performance: Option<String>,
    #[serde(rename = "% ATINGIMENTO")]
    pub attainment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawNetworkSale {
    #[serde(rename = "LOJA")]
    pub store: Option<String>,
    #[serde(rename = "META MENSAL")]
    pub target: Option<String>,
    #[serde(rename = "ACUMULADO DO MÊS")]
    pub accumulated: Option<String>,
}

/// One sale line. `None` amounts are cells that could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSale {
    pub store: String,
    pub consultant: String,
    pub product: String,
    pub category: String,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub store: String,
    pub month: MonthLabel,
    pub target: Option<f64>,
    pub accumulated: Option<f64>,
    pub total_sales: Option<f64>,
    pub average_ticket: Option<f64>,
    pub performance: Option<f64>,
    pub attainment: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSale {
    pub store: String,
    pub target: Option<f64>,
    pub accumulated: Option<f64>,
}

/// All three cleaned tables, loaded once per session.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub store_sales: Vec<StoreSale>,
    pub monthly: Vec<MonthlySummary>,
    pub network: Vec<NetworkSale>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    Monthly,
    Quarterly,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Monthly => "Mensal",
            Period::Quarterly => "Trimestral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttainmentTier {
    Green,
    Yellow,
    Red,
}

impl AttainmentTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttainmentTier::Green => "green",
            AttainmentTier::Yellow => "yellow",
            AttainmentTier::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkOverview {
    pub period: Period,
    pub target_total: f64,
    pub revenue_total: f64,
    pub attainment_pct: f64,
    pub tier: AttainmentTier,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct OverviewRow {
    #[serde(rename = "Period")]
    #[tabled(rename = "Period")]
    pub period: String,
    #[serde(rename = "ConsolidatedTarget")]
    #[tabled(rename = "ConsolidatedTarget")]
    pub target_total: String,
    #[serde(rename = "TotalRevenue")]
    #[tabled(rename = "TotalRevenue")]
    pub revenue_total: String,
    #[serde(rename = "Attainment")]
    #[tabled(rename = "Attainment")]
    pub attainment: String,
    #[serde(rename = "Tier")]
    #[tabled(rename = "Tier")]
    pub tier: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct PerformanceRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "Store")]
    #[tabled(rename = "Store")]
    pub store: String,
    #[serde(rename = "Color")]
    #[tabled(rename = "Color")]
    pub color: String,
    #[serde(rename = "Accumulated")]
    #[tabled(rename = "Accumulated")]
    pub accumulated: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct AttainmentRow {
    #[serde(rename = "Store")]
    #[tabled(rename = "Store")]
    pub store: String,
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "AttainmentPct")]
    #[tabled(rename = "AttainmentPct")]
    pub attainment: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct IndicatorRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "MonthlyTarget")]
    #[tabled(rename = "MonthlyTarget")]
    pub target: String,
    #[serde(rename = "TotalSales")]
    #[tabled(rename = "TotalSales")]
    pub total_sales: String,
    #[serde(rename = "Accumulated")]
    #[tabled(rename = "Accumulated")]
    pub accumulated: String,
    #[serde(rename = "AverageTicket")]
    #[tabled(rename = "AverageTicket")]
    pub average_ticket: String,
    #[serde(rename = "Performance")]
    #[tabled(rename = "Performance")]
    pub performance: String,
    #[serde(rename = "AttainmentPct")]
    #[tabled(rename = "AttainmentPct")]
    pub attainment: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MixRow {
    #[serde(rename = "Category")]
    #[tabled(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sales")]
    #[tabled(rename = "Sales")]
    pub total: String,
    #[serde(rename = "Share")]
    #[tabled(rename = "Share")]
    pub share: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RankingRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "Sales")]
    #[tabled(rename = "Sales")]
    pub total: String,
}

/// Everything shown for a single selected store. Empty vectors and a `None`
/// indicator row mean the store had no matching data.
#[derive(Debug, Clone, Default)]
pub struct StoreDetail {
    pub store: String,
    pub indicators: Option<IndicatorRow>,
    pub mix: Vec<MixRow>,
    pub top_consultants: Vec<RankingRow>,
    pub top_products: Vec<RankingRow>,
    pub top_categories: Vec<RankingRow>,
}

impl StoreDetail {
    pub fn is_empty(&self) -> bool {
        self.indicators.is_none() && self.mix.is_empty()
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub overview: NetworkOverview,
    pub total_stores: usize,
    pub network_stores: usize,
    pub total_consultants: usize,
    pub total_products: usize,
    pub total_sales_rows: usize,
    pub missing_sale_amounts: usize,
}
