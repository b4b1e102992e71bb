/// Data layer: core types, synthetic generation, and loading.
///
/// Architecture:
/// ```text
///   DatasetSpec (seed + layout)        .json / .csv
///        │                                  │
///        ▼                                  ▼
///   ┌──────────┐                      ┌──────────┐
///   │ generate  │                      │  loader   │
///   └──────────┘                      └──────────┘
///        │                                  │
///        └──────────────┬───────────────────┘
///                       ▼
///                ┌────────────┐
///                │   Dataset   │  columns + declared types + rows
///                └────────────┘
///                       │
///                       ▼
///            analytics (read-only consumers)
/// ```

pub mod error;
pub mod generate;
pub mod loader;
pub mod model;
