// Group, rank and ratio helpers shared by every report.
use crate::types::AttainmentTier;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total: f64,
}

/// Sum `value` per distinct `key`, ordered by key.
///
/// Missing values (`None`) add nothing, so a group made only of missing
/// cells totals `0.0`. The result does not depend on input row order.
pub fn sum_by_group<T, K, FK, FV>(rows: &[T], key: FK, value: FV) -> Vec<GroupTotal<K>>
where
    K: Ord,
    FK: Fn(&T) -> K,
    FV: Fn(&T) -> Option<f64>,
{
    let mut map: BTreeMap<K, f64> = BTreeMap::new();
    for r in rows {
        let e = map.entry(key(r)).or_insert(0.0);
        if let Some(v) = value(r) {
            *e += v;
        }
    }
    map.into_iter()
        .map(|(key, total)| GroupTotal { key, total })
        .collect()
}

/// Sort groups by total, largest first. The sort is stable, so ties keep key
/// order.
pub fn rank_desc<K>(mut groups: Vec<GroupTotal<K>>) -> Vec<GroupTotal<K>> {
    groups.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    groups
}

pub fn top_n_by_group<T, K, FK, FV>(rows: &[T], key: FK, value: FV, n: usize) -> Vec<GroupTotal<K>>
where
    K: Ord,
    FK: Fn(&T) -> K,
    FV: Fn(&T) -> Option<f64>,
{
    let mut ranked = rank_desc(sum_by_group(rows, key, value));
    ranked.truncate(n);
    ranked
}

/// Sum of the present values in a column.
pub fn total<T, FV>(rows: &[T], value: FV) -> f64
where
    FV: Fn(&T) -> Option<f64>,
{
    rows.iter().filter_map(value).sum()
}

/// `accumulated / target * 100`, defined as `0.0` for a zero target.
pub fn attainment(accumulated: f64, target: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    accumulated / target * 100.0
}

impl AttainmentTier {
    pub fn classify(pct: f64) -> Self {
        if pct >= 65.0 {
            AttainmentTier::Green
        } else if pct >= 51.0 {
            AttainmentTier::Yellow
        } else {
            AttainmentTier::Red
        }
    }
}

/// Pick the row with the greatest period, or `None` for no rows. On equal
/// periods the last row wins.
pub fn latest_period<'a, T, P, FP>(rows: &'a [T], period: FP) -> Option<&'a T>
where
    P: Ord,
    FP: Fn(&T) -> P,
{
    rows.iter().max_by(|a, b| period(a).cmp(&period(b)))
}
