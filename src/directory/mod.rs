//! Client directory access
//!
//! Client and contact CRUD lives in the CRM backend; calls only need to
//! resolve the selected client.

mod client;
mod types;

pub use client::{ClientDirectory, HttpClientDirectory};
pub use types::{ClientRecord, ClientRef, Contact};
