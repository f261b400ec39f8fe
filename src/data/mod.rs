//! Data layer: core types, loading, filtering, and summary statistics.
//!
//! Architecture:
//! ```text
//!  .csv / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → SeekDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │  SeekDataset  │  Vec<SeekSample>
//!   └──────────────┘
//!        │
//!        ├──────────────────────┐
//!        ▼                      ▼
//!   ┌──────────┐          ┌──────────┐
//!   │  filter   │          │  stats    │
//!   │ direction │          │ summary   │
//!   └──────────┘          └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
