use crate::types::{Product, ReleaseInfo};

/// Outcome of one product check
#[derive(Debug, Clone)]
pub struct CheckEntry {
    pub product: Product,
    pub info: ReleaseInfo,
    pub near_end_of_life: bool,
}

/// Every product checked during a successful run, in catalogue order
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub entries: Vec<CheckEntry>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, product: Product, info: ReleaseInfo, near_end_of_life: bool) {
        self.entries.push(CheckEntry {
            product,
            info,
            near_end_of_life,
        });
    }

    pub fn checked_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries that triggered a notification
    pub fn near_end_of_life(&self) -> impl Iterator<Item = &CheckEntry> {
        self.entries.iter().filter(|e| e.near_end_of_life)
    }

    pub fn near_end_of_life_count(&self) -> usize {
        self.near_end_of_life().count()
    }

    pub fn has_issues(&self) -> bool {
        self.near_end_of_life_count() > 0
    }
}
