//! Invoice domain entity
//!
//! Electronic invoices issued through Rapifac. Facturas go to businesses
//! (RUC), boletas to consumers (DNI). Amounts are integer cents.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// IGV rate in percent
pub const IGV_PERCENT: i64 = 18;

/// Unique identifier for an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceId(pub Uuid);

impl InvoiceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InvoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invoice document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceKind {
    Factura,
    Boleta,
}

impl InvoiceKind {
    /// Numbering series for this document type
    pub fn series(&self) -> &'static str {
        match self {
            InvoiceKind::Factura => "F001",
            InvoiceKind::Boleta => "B001",
        }
    }

    fn document_pattern(&self) -> &'static Regex {
        static RUC: OnceLock<Regex> = OnceLock::new();
        static DNI: OnceLock<Regex> = OnceLock::new();
        match self {
            InvoiceKind::Factura => {
                RUC.get_or_init(|| Regex::new(r"^\d{11}$").expect("static regex"))
            }
            InvoiceKind::Boleta => {
                DNI.get_or_init(|| Regex::new(r"^\d{8}$").expect("static regex"))
            }
        }
    }

    fn document_label(&self) -> &'static str {
        match self {
            InvoiceKind::Factura => "RUC (11 digits)",
            InvoiceKind::Boleta => "DNI (8 digits)",
        }
    }
}

impl std::fmt::Display for InvoiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceKind::Factura => write!(f, "factura"),
            InvoiceKind::Boleta => write!(f, "boleta"),
        }
    }
}

/// Invoice lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Issued,
    Accepted,
    Rejected,
    Voided,
}

impl InvoiceStatus {
    pub fn can_transition_to(&self, next: InvoiceStatus) -> bool {
        matches!(
            (self, next),
            (InvoiceStatus::Issued, InvoiceStatus::Accepted)
                | (InvoiceStatus::Issued, InvoiceStatus::Rejected)
                | (InvoiceStatus::Issued, InvoiceStatus::Voided)
                | (InvoiceStatus::Accepted, InvoiceStatus::Voided)
        )
    }

    /// Whether the invoice still counts towards billed totals
    pub fn is_billable(&self) -> bool {
        matches!(self, InvoiceStatus::Issued | InvoiceStatus::Accepted)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Issued => write!(f, "issued"),
            InvoiceStatus::Accepted => write!(f, "accepted"),
            InvoiceStatus::Rejected => write!(f, "rejected"),
            InvoiceStatus::Voided => write!(f, "voided"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "issued" => Ok(InvoiceStatus::Issued),
            "accepted" => Ok(InvoiceStatus::Accepted),
            "rejected" => Ok(InvoiceStatus::Rejected),
            "voided" | "void" | "cancelled" => Ok(InvoiceStatus::Voided),
            _ => Err(format!("Unknown invoice status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Pen,
    Usd,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Pen => write!(f, "PEN"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl InvoiceLine {
    /// `None` when the line amount does not fit in an i64
    pub fn amount_cents(&self) -> Option<i64> {
        self.quantity.checked_mul(self.unit_price_cents)
    }
}

/// Computed invoice amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

impl InvoiceTotals {
    /// Sum the lines and apply IGV. `None` on overflow.
    pub fn from_lines(lines: &[InvoiceLine]) -> Option<Self> {
        let subtotal_cents = lines
            .iter()
            .try_fold(0i64, |acc, line| acc.checked_add(line.amount_cents()?))?;
        // Round half up to the cent
        let tax_cents = subtotal_cents.checked_mul(IGV_PERCENT)?.checked_add(50)? / 100;
        Some(Self {
            subtotal_cents,
            tax_cents,
            total_cents: subtotal_cents.checked_add(tax_cents)?,
        })
    }
}

/// An issued invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub seller_id: i64,
    pub kind: InvoiceKind,
    /// Series and correlative, e.g. `F001-00000042`
    pub number: String,
    pub customer_name: String,
    pub customer_document: String,
    pub currency: Currency,
    pub lines: Vec<InvoiceLine>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub status: InvoiceStatus,
    pub issued_at: DateTime<Utc>,
}

/// Format a series correlative into an invoice number
pub fn format_invoice_number(kind: InvoiceKind, correlative: u64) -> String {
    format!("{}-{:08}", kind.series(), correlative)
}

/// Data needed to issue a new invoice
#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
    pub seller_id: i64,
    pub kind: InvoiceKind,
    pub customer_name: String,
    pub customer_document: String,
    #[serde(default = "default_currency")]
    pub currency: Currency,
    pub lines: Vec<InvoiceLine>,
}

fn default_currency() -> Currency {
    Currency::Pen
}

impl NewInvoice {
    /// Check the request and compute its totals
    pub fn validate(&self) -> Result<InvoiceTotals, DomainError> {
        if self.customer_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "customer_name must not be empty".to_string(),
            ));
        }

        if !self
            .kind
            .document_pattern()
            .is_match(self.customer_document.trim())
        {
            return Err(DomainError::Validation(format!(
                "customer_document for a {} must be a {}",
                self.kind,
                self.kind.document_label()
            )));
        }

        if self.lines.is_empty() {
            return Err(DomainError::Validation(
                "an invoice needs at least one line".to_string(),
            ));
        }

        for (i, line) in self.lines.iter().enumerate() {
            if line.description.trim().is_empty() {
                return Err(DomainError::Validation(format!(
                    "line {} has an empty description",
                    i + 1
                )));
            }
            if line.quantity <= 0 {
                return Err(DomainError::Validation(format!(
                    "line {} quantity must be positive",
                    i + 1
                )));
            }
            if line.unit_price_cents < 0 {
                return Err(DomainError::Validation(format!(
                    "line {} unit price must not be negative",
                    i + 1
                )));
            }
        }

        InvoiceTotals::from_lines(&self.lines).ok_or_else(|| {
            DomainError::Validation("invoice amounts exceed the supported range".to_string())
        })
    }

    /// Build the invoice once validated and numbered
    pub fn into_invoice(
        self,
        totals: InvoiceTotals,
        number: String,
        issued_at: DateTime<Utc>,
    ) -> Invoice {
        Invoice {
            id: InvoiceId::new(),
            seller_id: self.seller_id,
            kind: self.kind,
            number,
            customer_name: self.customer_name.trim().to_string(),
            customer_document: self.customer_document.trim().to_string(),
            currency: self.currency,
            lines: self.lines,
            subtotal_cents: totals.subtotal_cents,
            tax_cents: totals.tax_cents,
            total_cents: totals.total_cents,
            status: InvoiceStatus::Issued,
            issued_at,
        }
    }
}
