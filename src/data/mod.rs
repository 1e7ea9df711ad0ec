/// Data layer: sounding records and loading.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset   (LoadTask: on a worker thread)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<SoundingRecord>, replaced wholesale on each load
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
