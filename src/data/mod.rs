/// Data layer: core types, loading, caching and filtering.
///
/// Architecture:
/// ```text
///  Most Streamed Spotify Songs 2024.csv  (latin1)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode → schema check → clean numeric cells
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  one load per path, Arc<Dataset> shared afterwards
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  artist set or top-N → Subset
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
