//! Invoice service
//!
//! Role-aware access to the Rapifac invoice store.

use std::sync::Arc;

use crate::domain::entities::{
    Invoice, InvoiceId, InvoiceStatus, NewInvoice, NotificationKind, Role, User,
};
use crate::domain::ports::InvoiceRepository;
use crate::error::AppError;

use super::NotificationService;

/// Resolve which seller's records a user may read.
///
/// `None` means every seller. Sellers are pinned to their own store and
/// get `Forbidden` when they ask for another one.
pub fn seller_scope(user: &User, requested: Option<i64>) -> Result<Option<i64>, AppError> {
    match user.role {
        Role::Admin | Role::Logistics => Ok(requested),
        Role::Seller => {
            let own = user.seller_id.ok_or(AppError::Forbidden)?;
            match requested {
                Some(id) if id != own => Err(AppError::Forbidden),
                _ => Ok(Some(own)),
            }
        }
    }
}

pub struct InvoiceService {
    invoices: Arc<dyn InvoiceRepository>,
    notifications: Arc<NotificationService>,
}

impl InvoiceService {
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            invoices,
            notifications,
        }
    }

    /// Invoices visible to `user`, optionally narrowed to one seller
    pub async fn list(&self, user: &User, seller_id: Option<i64>) -> Result<Vec<Invoice>, AppError> {
        let invoices = match seller_scope(user, seller_id)? {
            Some(seller_id) => self.invoices.get_by_seller(seller_id).await?,
            None => self.invoices.get_all().await?,
        };
        Ok(invoices)
    }

    /// A single invoice; hidden invoices are reported as missing
    pub async fn get(&self, user: &User, id: &InvoiceId) -> Result<Invoice, AppError> {
        self.invoices
            .find_by_id(id)
            .await?
            .filter(|invoice| user.can_view_seller(invoice.seller_id))
            .ok_or_else(|| AppError::NotFound(format!("Invoice {} not found", id)))
    }

    pub async fn create(&self, user: &User, new_invoice: NewInvoice) -> Result<Invoice, AppError> {
        if !user.can_act_for_seller(new_invoice.seller_id) {
            return Err(AppError::Forbidden);
        }

        let invoice = self.invoices.create(new_invoice).await?;

        let title = format!("Invoice {} issued", invoice.number);
        let body = format!(
            "{} for {} {:.2}",
            invoice.customer_name,
            invoice.currency,
            invoice.total_cents as f64 / 100.0
        );
        if let Err(e) = self
            .notifications
            .notify_seller(invoice.seller_id, NotificationKind::Invoice, &title, &body)
            .await
        {
            tracing::warn!(error = %e, invoice_id = %invoice.id, "Failed to notify seller of invoice");
        }

        Ok(invoice)
    }

    /// Store a seed invoice without access checks or notifications
    pub async fn import(&self, new_invoice: NewInvoice) -> Result<Invoice, AppError> {
        Ok(self.invoices.create(new_invoice).await?)
    }

    pub async fn update_status(
        &self,
        user: &User,
        id: &InvoiceId,
        status: InvoiceStatus,
    ) -> Result<Invoice, AppError> {
        if !user.is_admin() {
            return Err(AppError::Forbidden);
        }
        Ok(self.invoices.update_status(id, status).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryInvoiceRepository, InMemoryNotificationRepository, InMemoryUserRepository,
    };
    use crate::domain::ports::UserRepository;
    use crate::error::DomainError;
    use crate::test_utils::{new_boleta, new_factura, test_admin, test_logistics, test_seller};

    struct Fixture {
        service: InvoiceService,
        notifications: Arc<NotificationService>,
    }

    async fn fixture(users: &[User]) -> Fixture {
        let user_repo = Arc::new(InMemoryUserRepository::new());
        for user in users {
            user_repo.create(user.clone()).await.unwrap();
        }
        let notifications = Arc::new(NotificationService::new(
            Arc::new(InMemoryNotificationRepository::new()),
            user_repo,
        ));
        Fixture {
            service: InvoiceService::new(
                Arc::new(InMemoryInvoiceRepository::new()),
                notifications.clone(),
            ),
            notifications,
        }
    }

    #[test]
    fn scope_rules() {
        let admin = test_admin();
        let logistics = test_logistics();
        let seller = test_seller(3);

        assert_eq!(seller_scope(&admin, None).unwrap(), None);
        assert_eq!(seller_scope(&admin, Some(9)).unwrap(), Some(9));
        assert_eq!(seller_scope(&logistics, Some(9)).unwrap(), Some(9));
        assert_eq!(seller_scope(&seller, None).unwrap(), Some(3));
        assert_eq!(seller_scope(&seller, Some(3)).unwrap(), Some(3));
        assert!(matches!(seller_scope(&seller, Some(4)), Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn seller_lists_only_own_invoices() {
        let admin = test_admin();
        let seller = test_seller(1);
        let f = fixture(&[admin.clone(), seller.clone()]).await;

        f.service.create(&admin, new_boleta(1)).await.unwrap();
        f.service.create(&admin, new_boleta(2)).await.unwrap();

        let own = f.service.list(&seller, None).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].seller_id, 1);

        assert_eq!(f.service.list(&admin, None).await.unwrap().len(), 2);
        assert_eq!(f.service.list(&admin, Some(2)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn hidden_invoice_reads_as_not_found() {
        let admin = test_admin();
        let seller = test_seller(1);
        let f = fixture(&[admin.clone(), seller.clone()]).await;

        let other = f.service.create(&admin, new_factura(2)).await.unwrap();

        assert!(matches!(
            f.service.get(&seller, &other.id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(f.service.get(&admin, &other.id).await.unwrap().id, other.id);
    }

    #[tokio::test]
    async fn sellers_issue_for_themselves_only() {
        let seller = test_seller(1);
        let logistics = test_logistics();
        let f = fixture(&[seller.clone()]).await;

        assert!(f.service.create(&seller, new_boleta(1)).await.is_ok());
        assert!(matches!(
            f.service.create(&seller, new_boleta(2)).await,
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            f.service.create(&logistics, new_boleta(1)).await,
            Err(AppError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn create_notifies_seller() {
        let seller = test_seller(1);
        let f = fixture(&[seller.clone()]).await;

        let invoice = f.service.create(&seller, new_boleta(1)).await.unwrap();

        let list = f.notifications.list(&seller, false).await.unwrap();
        assert_eq!(list.notifications.len(), 1);
        assert_eq!(list.notifications[0].kind, NotificationKind::Invoice);
        assert!(list.notifications[0].title.contains(&invoice.number));
    }

    #[tokio::test]
    async fn validation_errors_surface() {
        let admin = test_admin();
        let f = fixture(&[admin.clone()]).await;
        let mut bad = new_factura(1);
        bad.lines.clear();

        assert!(matches!(
            f.service.create(&admin, bad).await,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn only_admins_change_status() {
        let admin = test_admin();
        let seller = test_seller(1);
        let f = fixture(&[admin.clone(), seller.clone()]).await;
        let invoice = f.service.create(&seller, new_boleta(1)).await.unwrap();

        assert!(matches!(
            f.service
                .update_status(&seller, &invoice.id, InvoiceStatus::Voided)
                .await,
            Err(AppError::Forbidden)
        ));

        let voided = f
            .service
            .update_status(&admin, &invoice.id, InvoiceStatus::Voided)
            .await
            .unwrap();
        assert_eq!(voided.status, InvoiceStatus::Voided);

        assert!(matches!(
            f.service
                .update_status(&admin, &invoice.id, InvoiceStatus::Accepted)
                .await,
            Err(AppError::Domain(DomainError::Conflict(_)))
        ));
    }
}
