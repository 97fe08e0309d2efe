/// Data layer: core types, loading, smoothing and series extraction.
///
/// Architecture:
/// ```text
///  .csv / .txt / .dat
///        │
///        ▼
///   ┌──────────┐   ┌────────┐
///   │  loader   │◄──│ sniff  │  header detection over the leading bytes
///   └──────────┘   └────────┘
///        │  ReadReport { Result<Dataset, ReadError>, ErrorLog }
///        ▼
///   ┌──────────┐
///   │  series   │  pair x / y columns, skip missing cells → points
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  smooth   │  reflection-padded window convolution (per overlay)
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod series;
pub mod smooth;
pub mod sniff;
