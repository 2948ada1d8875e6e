use std::collections::HashSet;

use super::model::UsageDataset;

// ---------------------------------------------------------------------------
// Model-name normalization
// ---------------------------------------------------------------------------

/// Canonicalize a raw model cell: drop the stray double-quote characters
/// exports tend to carry, then trim surrounding whitespace. Idempotent.
pub fn normalize_model(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

// ---------------------------------------------------------------------------
// Allowlist
// ---------------------------------------------------------------------------

/// Device models approved for use. Fixed at build time.
pub const AUTHORIZED_MODELS: [&str; 2] = ["SM-T295", "Walpad10HProMax"];

/// An immutable set of authorized model names with O(1) membership checks.
#[derive(Debug, Clone)]
pub struct Allowlist {
    models: HashSet<String>,
}

impl Allowlist {
    /// The built-in allowlist shipped with the tool.
    pub fn builtin() -> Self {
        Self::new(AUTHORIZED_MODELS)
    }

    /// Build an allowlist from arbitrary model names.
    pub fn new<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Allowlist {
            models: models.into_iter().map(Into::into).collect(),
        }
    }

    /// Membership test on a normalized model name.
    pub fn contains(&self, model: &str) -> bool {
        self.models.contains(model)
    }
}

// ---------------------------------------------------------------------------
// Authorized / unauthorized split
// ---------------------------------------------------------------------------

/// Record indices partitioned by allowlist membership, in record order.
#[derive(Debug, Clone, Default)]
pub struct Split {
    pub unauthorized: Vec<usize>,
    pub authorized: Vec<usize>,
}

/// Partition the dataset: a record is authorized exactly when its model is
/// on the allowlist. Every record lands in exactly one side.
pub fn split_indices(dataset: &UsageDataset, allowlist: &Allowlist) -> Split {
    let mut split = Split::default();
    for (i, record) in dataset.records.iter().enumerate() {
        if allowlist.contains(&record.device_model) {
            split.authorized.push(i);
        } else {
            split.unauthorized.push(i);
        }
    }
    split
}
