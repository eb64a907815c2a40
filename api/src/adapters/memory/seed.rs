//! Startup seed files
//!
//! Users and invoices can be preloaded from JSON arrays so a fresh process
//! has something to serve.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::domain::entities::{NewInvoice, NewUser};

fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))
}

pub fn load_users(path: impl AsRef<Path>) -> Result<Vec<NewUser>> {
    read_json_array(path.as_ref())
}

pub fn load_invoices(path: impl AsRef<Path>) -> Result<Vec<NewInvoice>> {
    read_json_array(path.as_ref())
}
