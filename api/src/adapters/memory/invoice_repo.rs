//! In-memory invoice store
//!
//! Keeps invoices in issue order and hands out correlatives per series.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::{
    format_invoice_number, Invoice, InvoiceId, InvoiceKind, InvoiceStatus, NewInvoice,
};
use crate::domain::ports::InvoiceRepository;
use crate::error::DomainError;

#[derive(Default)]
struct Ledger {
    invoices: HashMap<InvoiceId, Invoice>,
    order: Vec<InvoiceId>,
    correlatives: HashMap<InvoiceKind, u64>,
}

impl Ledger {
    fn in_order(&self) -> impl Iterator<Item = &Invoice> {
        self.order.iter().filter_map(|id| self.invoices.get(id))
    }
}

#[derive(Default)]
pub struct InMemoryInvoiceRepository {
    ledger: RwLock<Ledger>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn get_all(&self) -> Result<Vec<Invoice>, DomainError> {
        Ok(self.ledger.read().await.in_order().cloned().collect())
    }

    async fn get_by_seller(&self, seller_id: i64) -> Result<Vec<Invoice>, DomainError> {
        Ok(self
            .ledger
            .read()
            .await
            .in_order()
            .filter(|i| i.seller_id == seller_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, DomainError> {
        Ok(self.ledger.read().await.invoices.get(id).cloned())
    }

    async fn create(&self, invoice: NewInvoice) -> Result<Invoice, DomainError> {
        // Totals are settled before a correlative is taken
        let totals = invoice.validate()?;

        let mut ledger = self.ledger.write().await;

        let correlative = ledger.correlatives.entry(invoice.kind).or_insert(0);
        *correlative += 1;
        let number = format_invoice_number(invoice.kind, *correlative);

        let invoice = invoice.into_invoice(totals, number, Utc::now());
        ledger.order.push(invoice.id);
        ledger.invoices.insert(invoice.id, invoice.clone());

        tracing::info!(
            invoice_id = %invoice.id,
            number = %invoice.number,
            seller_id = invoice.seller_id,
            "Invoice issued"
        );

        Ok(invoice)
    }

    async fn update_status(
        &self,
        id: &InvoiceId,
        status: InvoiceStatus,
    ) -> Result<Invoice, DomainError> {
        let mut ledger = self.ledger.write().await;
        let invoice = ledger
            .invoices
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Invoice {} not found", id)))?;

        if !invoice.status.can_transition_to(status) {
            return Err(DomainError::Conflict(format!(
                "Invoice {} cannot move from {} to {}",
                invoice.number, invoice.status, status
            )));
        }

        invoice.status = status;
        tracing::info!(invoice_id = %id, status = %status, "Invoice status changed");

        Ok(invoice.clone())
    }
}
