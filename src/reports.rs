use crate::aggregate::{attainment, latest_period, rank_desc, sum_by_group, top_n_by_group, total, GroupTotal};
use crate::month::MonthLabel;
use crate::palette::store_color;
use crate::types::{
    AttainmentRow, AttainmentTier, Dataset, IndicatorRow, MixRow, MonthlySummary, NetworkOverview,
    OverviewRow, Period, PerformanceRow, RankingRow, StoreDetail, StoreSale, SummaryStats,
};
use crate::util::{format_brl, format_opt, format_pct};
use std::collections::HashSet;

/// Consolidated target, revenue and attainment for the whole network.
///
/// Monthly reads the network table; Quarterly sums every month of the
/// monthly view.
pub fn network_overview(data: &Dataset, period: Period) -> NetworkOverview {
    let (target_total, revenue_total) = match period {
        Period::Monthly => (
            total(&data.network, |r| r.target),
            total(&data.network, |r| r.accumulated),
        ),
        Period::Quarterly => (
            total(&data.monthly, |r| r.target),
            total(&data.monthly, |r| r.accumulated),
        ),
    };
    let attainment_pct = attainment(revenue_total, target_total);
    NetworkOverview {
        period,
        target_total,
        revenue_total,
        attainment_pct,
        tier: AttainmentTier::classify(attainment_pct),
    }
}

pub fn overview_row(overview: &NetworkOverview) -> OverviewRow {
    OverviewRow {
        period: overview.period.label().to_string(),
        target_total: format_brl(overview.target_total),
        revenue_total: format_brl(overview.revenue_total),
        attainment: format_pct(overview.attainment_pct),
        tier: overview.tier.as_str().to_string(),
    }
}

/// Accumulated revenue per month and store, months in calendar order.
pub fn quarterly_performance(data: &Dataset) -> Vec<PerformanceRow> {
    sum_by_group(
        &data.monthly,
        |r| (r.month.clone(), r.store.clone()),
        |r| r.accumulated,
    )
    .into_iter()
    .map(|g| {
        let (month, store) = g.key;
        PerformanceRow {
            month: month.to_string(),
            color: store_color(&store).to_string(),
            store,
            accumulated: format_brl(g.total),
        }
    })
    .collect()
}

/// Reported attainment per store and month, in the order the rows appear.
pub fn attainment_by_store(data: &Dataset) -> Vec<AttainmentRow> {
    data.monthly
        .iter()
        .map(|r| AttainmentRow {
            store: r.store.clone(),
            month: r.month.to_string(),
            attainment: format_opt(r.attainment, |v| format!("{:.1}", v)),
        })
        .collect()
}

/// Distinct store names of the sales table, first-seen order.
pub fn store_names(data: &Dataset) -> Vec<String> {
    let mut seen = HashSet::new();
    data.store_sales
        .iter()
        .filter(|r| seen.insert(r.store.as_str()))
        .map(|r| r.store.clone())
        .collect()
}

fn indicator_row(info: &MonthlySummary) -> IndicatorRow {
    IndicatorRow {
        month: info.month.to_string(),
        target: format_opt(info.target, format_brl),
        total_sales: format_opt(info.total_sales, format_brl),
        accumulated: format_opt(info.accumulated, format_brl),
        average_ticket: format_opt(info.average_ticket, format_brl),
        performance: format_opt(info.performance, format_pct),
        attainment: format_opt(info.attainment, format_pct),
    }
}

fn ranking_rows<K: ToString>(groups: Vec<GroupTotal<K>>) -> Vec<RankingRow> {
    groups
        .into_iter()
        .enumerate()
        .map(|(idx, g)| RankingRow {
            rank: idx + 1,
            name: g.key.to_string(),
            total: format_brl(g.total),
        })
        .collect()
}

fn sales_mix(rows: &[StoreSale]) -> Vec<MixRow> {
    let groups = sum_by_group(rows, |r| r.category.clone(), |r| r.amount);
    let store_total: f64 = groups.iter().map(|g| g.total).sum();
    groups
        .into_iter()
        .map(|g| {
            let share = if store_total == 0.0 { 0.0 } else { g.total / store_total * 100.0 };
            MixRow {
                category: g.key,
                total: format_brl(g.total),
                share: format_pct(share),
            }
        })
        .collect()
}

/// Indicators, sales mix and rankings for one store. A store without sales
/// rows yields an empty detail, even when it has monthly rows.
pub fn store_detail(data: &Dataset, store: &str, top_n: usize) -> StoreDetail {
    let sales: Vec<StoreSale> = data
        .store_sales
        .iter()
        .filter(|r| r.store == store)
        .cloned()
        .collect();
    if sales.is_empty() {
        return StoreDetail {
            store: store.to_string(),
            ..StoreDetail::default()
        };
    }

    let monthly: Vec<&MonthlySummary> = data.monthly.iter().filter(|r| r.store == store).collect();
    let indicators = latest_period(&monthly, |r| r.month.clone()).copied().map(indicator_row);

    StoreDetail {
        store: store.to_string(),
        indicators,
        mix: sales_mix(&sales),
        top_consultants: ranking_rows(top_n_by_group(&sales, |r| r.consultant.clone(), |r| r.amount, top_n)),
        top_products: ranking_rows(top_n_by_group(&sales, |r| r.product.clone(), |r| r.amount, top_n)),
        top_categories: ranking_rows(top_n_by_group(&sales, |r| r.category.clone(), |r| r.amount, top_n)),
    }
}

pub fn product_ranking(data: &Dataset, top_n: usize) -> Vec<RankingRow> {
    ranking_rows(top_n_by_group(&data.store_sales, |r| r.product.clone(), |r| r.amount, top_n))
}

pub fn consultant_ranking(data: &Dataset, top_n: usize) -> Vec<RankingRow> {
    ranking_rows(top_n_by_group(&data.store_sales, |r| r.consultant.clone(), |r| r.amount, top_n))
}

/// Full store ranking by sales, used for the exported snapshot.
pub fn store_ranking(data: &Dataset) -> Vec<RankingRow> {
    ranking_rows(rank_desc(sum_by_group(&data.store_sales, |r| r.store.clone(), |r| r.amount)))
}

pub fn months_covered(data: &Dataset) -> Vec<MonthLabel> {
    let mut months: Vec<MonthLabel> = data.monthly.iter().map(|r| r.month.clone()).collect();
    months.sort();
    months.dedup();
    months
}

fn distinct_count<'a>(rows: &'a [StoreSale], field: impl Fn(&'a StoreSale) -> &'a str) -> usize {
    rows.iter().map(field).collect::<HashSet<&str>>().len()
}

pub fn generate_summary(data: &Dataset, period: Period) -> SummaryStats {
    let rows = &data.store_sales;
    SummaryStats {
        overview: network_overview(data, period),
        total_stores: distinct_count(rows, |r| r.store.as_str()),
        network_stores: data.network.iter().map(|r| r.store.as_str()).collect::<HashSet<_>>().len(),
        total_consultants: distinct_count(rows, |r| r.consultant.as_str()),
        total_products: distinct_count(rows, |r| r.product.as_str()),
        total_sales_rows: data.store_sales.len(),
        missing_sale_amounts: data.store_sales.iter().filter(|r| r.amount.is_none()).count(),
    }
}
