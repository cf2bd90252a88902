use crate::data::{Cake, Transaction};
use std::collections::HashSet;

/// One `Cake` per distinct `items` value, in order of first appearance.
pub(crate) fn unique_by_name(rows: &[Transaction]) -> Vec<Cake> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|tx| seen.insert(tx.items.as_str()))
        .map(|tx| Cake::new(tx.items.as_str()))
        .collect()
}

/// One `Cake` per transaction, repeats included.
pub(crate) fn all_cakes(rows: &[Transaction]) -> Vec<Cake> {
    rows.iter().map(|tx| Cake::new(tx.items.as_str())).collect()
}

/// Final totals printed at the end of the report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Summary {
    pub transactions: usize,
    pub unique_cakes: usize,
    pub all_cakes: usize,
}

pub(crate) fn summarize(rows: &[Transaction], unique: &[Cake]) -> Summary {
    Summary {
        transactions: rows.len(),
        unique_cakes: unique.len(),
        all_cakes: all_cakes(rows).len(),
    }
}
