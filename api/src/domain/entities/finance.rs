//! Finance summary computed from the invoice list

use std::collections::BTreeMap;

use serde::Serialize;

use super::invoice::{Currency, Invoice, InvoiceStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CurrencyTotals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FinanceStats {
    pub invoice_count: usize,
    pub by_status: BTreeMap<InvoiceStatus, usize>,
    /// Only issued and accepted invoices contribute to totals
    pub by_currency: BTreeMap<Currency, CurrencyTotals>,
}

impl FinanceStats {
    pub fn from_invoices<'a>(invoices: impl IntoIterator<Item = &'a Invoice>) -> Self {
        let mut stats = Self::default();

        for invoice in invoices {
            stats.invoice_count += 1;
            *stats.by_status.entry(invoice.status).or_default() += 1;

            if invoice.status.is_billable() {
                let totals = stats.by_currency.entry(invoice.currency).or_default();
                // Saturate instead of wrapping when many large invoices add up
                totals.subtotal_cents =
                    totals.subtotal_cents.saturating_add(invoice.subtotal_cents);
                totals.tax_cents = totals.tax_cents.saturating_add(invoice.tax_cents);
                totals.total_cents = totals.total_cents.saturating_add(invoice.total_cents);
            }
        }

        stats
    }
}
