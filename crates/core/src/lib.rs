//! Risk aggregation and live prediction engine for the Rockfall Guardian
//! monitoring backend.
//!
//! Everything here is synchronous and free of HTTP concerns. The only I/O is
//! the file-backed [`store::ReadingStore`]; every other module is pure logic
//! over parsed readings so it can be tested in isolation.

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod predict;
pub mod reading;
pub mod registry;
pub mod risk;
pub mod site_id;
pub mod store;
pub mod trend;
pub mod types;
