//! Finance service
//!
//! Billing summaries derived from the invoice store.

use std::sync::Arc;

use crate::domain::entities::{FinanceStats, User};
use crate::domain::ports::InvoiceRepository;
use crate::error::AppError;

use super::invoice_service::seller_scope;

pub struct FinanceService {
    invoices: Arc<dyn InvoiceRepository>,
}

impl FinanceService {
    pub fn new(invoices: Arc<dyn InvoiceRepository>) -> Self {
        Self { invoices }
    }

    pub async fn summary(&self, user: &User, seller_id: Option<i64>) -> Result<FinanceStats, AppError> {
        let invoices = match seller_scope(user, seller_id)? {
            Some(seller_id) => self.invoices.get_by_seller(seller_id).await?,
            None => self.invoices.get_all().await?,
        };
        Ok(FinanceStats::from_invoices(&invoices))
    }
}
