/// Data layer: loading, schema validation, classification, and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable → UsageDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  allowlist membership → authorized / unauthorized split
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  group, left-join, derive → Report
///   └──────────┘
/// ```

pub mod classify;
pub mod error;
pub mod loader;
pub mod model;
pub mod summary;
