//! Domain models - core record types and route arithmetic
//!
//! This module contains the canonical data types used throughout the system:
//! - `Reading` - a point-in-time air quality measurement for one city
//! - `RecordSet` - the tabular pass-through shape written by the persister
//! - `BaseRoute` / `RouteAlternative` - route exposure records
//! - `RunResult` / `RunSummary` - per-source outcome of an orchestrated run

pub mod route;
pub mod types;
