use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::quotation_dto::{CreateQuotationRequest, UpdateQuotationRequest};
use crate::model::counter::{format_quotation_id, QUOTATION_COUNTER_KEY};
use crate::model::quotation::{ActivityEntry, Quotation, QuotationVersion};
use crate::repository::counter_repo::{CounterRepository, MongoCounterRepository};
use crate::repository::quotation_repo::{MongoQuotationRepository, QuotationRepository};
use crate::util::email::SmtpEmailService;
use crate::util::error::ServiceError;
use crate::util::pdf::{generate_quotation_pdf, quotation_pdf_filename};

const DEFAULT_VERSION_NOTE: &str = "Edited quotation";
const DEFAULT_UPDATE_COMMENT: &str = "Quotation updated";

/// Takes the pre-update snapshot, applies the patch, and records the audit
/// entry — in that order. The snapshot always captures the items/totals as
/// they were before any patch field lands, and the version number is the
/// prior history length plus one.
pub fn apply_update(
    quotation: &mut Quotation,
    patch: UpdateQuotationRequest,
    actor: Option<ObjectId>,
    now: &str,
) -> Result<(), ServiceError> {
    let sales_rep = match &patch.sales_rep {
        Some(raw) => Some(
            ObjectId::parse_str(raw)
                .map_err(|_| ServiceError::InvalidInput("Invalid salesRep id".to_string()))?,
        ),
        None => None,
    };

    quotation.versions.push(QuotationVersion {
        version_number: quotation.versions.len() as u32 + 1,
        items: quotation.items.clone(),
        totals: quotation.totals.clone(),
        notes: patch
            .version_note
            .clone()
            .unwrap_or_else(|| DEFAULT_VERSION_NOTE.to_string()),
        updated_at: now.to_string(),
    });

    if let Some(customer) = patch.customer {
        quotation.customer = customer;
    }
    if let Some(valid_until) = patch.valid_until {
        quotation.valid_until = Some(valid_until);
    }
    if let Some(currency) = patch.currency {
        quotation.currency = Some(currency);
    }
    if let Some(sales_rep) = sales_rep {
        quotation.sales_rep = sales_rep;
    }
    if let Some(items) = patch.items {
        quotation.items = items;
    }
    if let Some(terms) = patch.terms {
        quotation.terms = Some(terms);
    }
    if let Some(attachments) = patch.attachments {
        quotation.attachments = attachments;
    }
    if let Some(totals) = patch.totals {
        quotation.totals = totals;
    }
    if let Some(discount_type) = patch.discount_type {
        quotation.discount_type = discount_type;
    }
    if let Some(global_discount) = patch.global_discount {
        quotation.global_discount = Some(global_discount);
    }
    if let Some(tax_type) = patch.tax_type {
        quotation.tax_type = Some(tax_type);
    }
    if let Some(status) = patch.status {
        quotation.status = status;
    }

    quotation.activity_log.push(ActivityEntry {
        action: "Updated".to_string(),
        user: actor,
        timestamp: now.to_string(),
        comment: patch
            .version_note
            .unwrap_or_else(|| DEFAULT_UPDATE_COMMENT.to_string()),
    });

    Ok(())
}

#[async_trait]
pub trait QuotationService: Send + Sync {
    async fn create(
        &self,
        request: CreateQuotationRequest,
        actor: ObjectId,
    ) -> Result<Quotation, ServiceError>;
    async fn list(&self) -> Result<Vec<Quotation>, ServiceError>;
    async fn get(&self, id: ObjectId) -> Result<Quotation, ServiceError>;
    async fn update(
        &self,
        id: ObjectId,
        patch: UpdateQuotationRequest,
        actor: Option<ObjectId>,
    ) -> Result<Quotation, ServiceError>;
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn send_email(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn render_pdf(&self, id: ObjectId) -> Result<(String, Vec<u8>), ServiceError>;
}

pub struct QuotationServiceImpl {
    pub quotation_repo: MongoQuotationRepository,
    pub counter_repo: MongoCounterRepository,
    /// Absent when SMTP is not configured; send-email then fails cleanly.
    pub email_service: Option<SmtpEmailService>,
}

impl QuotationServiceImpl {
    pub fn new(
        quotation_repo: MongoQuotationRepository,
        counter_repo: MongoCounterRepository,
        email_service: Option<SmtpEmailService>,
    ) -> Self {
        Self {
            quotation_repo,
            counter_repo,
            email_service,
        }
    }
}

#[async_trait]
impl QuotationService for QuotationServiceImpl {
    #[instrument(skip(self, request), fields(actor = %actor))]
    async fn create(
        &self,
        request: CreateQuotationRequest,
        actor: ObjectId,
    ) -> Result<Quotation, ServiceError> {
        fn missing() -> ServiceError {
            ServiceError::InvalidInput(
                "Missing required fields: customer, salesRep, items, totals".to_string(),
            )
        }
        let customer = request.customer.ok_or_else(missing)?;
        let sales_rep_raw = request.sales_rep.ok_or_else(missing)?;
        let items = request.items.ok_or_else(missing)?;
        let totals = request.totals.ok_or_else(missing)?;

        let sales_rep = ObjectId::parse_str(&sales_rep_raw)
            .map_err(|_| ServiceError::InvalidInput("Invalid salesRep id".to_string()))?;

        let seq = self.counter_repo.next_sequence(QUOTATION_COUNTER_KEY).await?;
        let quotation_id = format_quotation_id(seq);
        info!(quotation_id = %quotation_id, "Assigned quotation id");

        let now = Utc::now().to_rfc3339();
        let quotation = Quotation {
            id: None,
            quotation_id,
            customer,
            valid_until: request.valid_until,
            currency: request.currency,
            sales_rep,
            items,
            totals,
            discount_type: request.discount_type.unwrap_or_default(),
            global_discount: request.global_discount,
            tax_type: request.tax_type,
            terms: request.terms,
            attachments: request.attachments.unwrap_or_default(),
            status: Default::default(),
            versions: Vec::new(),
            activity_log: vec![ActivityEntry {
                action: "Created".to_string(),
                user: Some(actor),
                timestamp: now,
                comment: "Quotation created.".to_string(),
            }],
            created_by: Some(actor),
            created_at: None,
            updated_at: None,
        };

        Ok(self.quotation_repo.insert(quotation).await?)
    }

    async fn list(&self) -> Result<Vec<Quotation>, ServiceError> {
        Ok(self.quotation_repo.list().await?)
    }

    async fn get(&self, id: ObjectId) -> Result<Quotation, ServiceError> {
        self.quotation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Quotation not found".to_string()))
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update(
        &self,
        id: ObjectId,
        patch: UpdateQuotationRequest,
        actor: Option<ObjectId>,
    ) -> Result<Quotation, ServiceError> {
        let mut quotation = self
            .quotation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Quotation not found".to_string()))?;

        let now = Utc::now().to_rfc3339();
        apply_update(&mut quotation, patch, actor, &now)?;

        Ok(self.quotation_repo.replace(id, quotation).await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError> {
        // Versions and the activity log are embedded, so this single delete
        // removes the full history with the document.
        Ok(self.quotation_repo.delete(id).await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn send_email(&self, id: ObjectId) -> Result<(), ServiceError> {
        let email_service = self.email_service.as_ref().ok_or_else(|| {
            ServiceError::InternalError("Email delivery is not configured".to_string())
        })?;

        let quotation = self.get(id).await?;
        let recipient = quotation
            .customer
            .email
            .clone()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                ServiceError::InvalidInput(
                    "Quotation customer has no email address".to_string(),
                )
            })?;

        let pdf = generate_quotation_pdf(&quotation)
            .map_err(|e| ServiceError::InternalError(format!("PDF error: {}", e)))?;
        let filename = quotation_pdf_filename(&quotation.quotation_id);
        let subject = format!("Quotation #{}", quotation.quotation_id);
        let body = format!(
            "Dear {},\n\nPlease find attached your quotation.\n\nBest regards,\n{}",
            quotation.customer.name, email_service.config.from_name
        );

        email_service
            .send_pdf_email(&recipient, &subject, &body, &filename, pdf)
            .await
            .map_err(|e| ServiceError::InternalError(format!("Email error: {}", e)))?;

        info!("Quotation email sent");
        Ok(())
    }

    async fn render_pdf(&self, id: ObjectId) -> Result<(String, Vec<u8>), ServiceError> {
        let quotation = self.get(id).await?;
        let pdf = generate_quotation_pdf(&quotation)
            .map_err(|e| ServiceError::InternalError(format!("PDF error: {}", e)))?;
        Ok((quotation_pdf_filename(&quotation.quotation_id), pdf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::quotation::{Customer, LineItem, QuotationStatus, Totals};

    fn item(name: &str, subtotal: f64) -> LineItem {
        LineItem {
            product_name: name.to_string(),
            description: None,
            quantity: 1.0,
            unit_price: subtotal,
            discount: 0.0,
            tax: 0.0,
            subtotal,
        }
    }

    fn quotation() -> Quotation {
        Quotation {
            id: Some(ObjectId::new()),
            quotation_id: "QTN-0001".to_string(),
            customer: Customer {
                name: "Acme Corp".to_string(),
                contact: None,
                email: Some("billing@acme.test".to_string()),
                billing_address: None,
            },
            valid_until: None,
            currency: Some("USD".to_string()),
            sales_rep: ObjectId::new(),
            items: vec![item("Widget", 100.0)],
            totals: Totals {
                total_before_tax: 100.0,
                tax_amount: 10.0,
                grand_total: 110.0,
            },
            discount_type: Default::default(),
            global_discount: None,
            tax_type: None,
            terms: None,
            attachments: vec![],
            status: QuotationStatus::Draft,
            versions: vec![],
            activity_log: vec![ActivityEntry {
                action: "Created".to_string(),
                user: None,
                timestamp: "2026-01-01T00:00:00+00:00".to_string(),
                comment: "Quotation created.".to_string(),
            }],
            created_by: None,
            created_at: Some("2026-01-01T00:00:00+00:00".to_string()),
            updated_at: None,
        }
    }

    fn items_patch(name: &str, subtotal: f64) -> UpdateQuotationRequest {
        UpdateQuotationRequest {
            items: Some(vec![item(name, subtotal)]),
            totals: Some(Totals {
                total_before_tax: subtotal,
                tax_amount: 0.0,
                grand_total: subtotal,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_update_snapshots_prior_state() {
        let mut q = quotation();
        apply_update(&mut q, items_patch("Gadget", 200.0), None, "2026-02-01T00:00:00+00:00")
            .unwrap();

        assert_eq!(q.versions.len(), 1);
        let snapshot = &q.versions[0];
        assert_eq!(snapshot.version_number, 1);
        // snapshot holds the state before the patch
        assert_eq!(snapshot.items[0].product_name, "Widget");
        assert_eq!(snapshot.totals.grand_total, 110.0);
        // the document itself carries the new state
        assert_eq!(q.items[0].product_name, "Gadget");
        assert_eq!(q.totals.grand_total, 200.0);
    }

    #[test]
    fn test_repeated_updates_number_versions_sequentially() {
        let mut q = quotation();
        for k in 1..=5u32 {
            let patch = items_patch(&format!("Item-{}", k), k as f64 * 10.0);
            apply_update(&mut q, patch, None, "2026-02-01T00:00:00+00:00").unwrap();
        }

        assert_eq!(q.versions.len(), 5);
        for (index, version) in q.versions.iter().enumerate() {
            assert_eq!(version.version_number, index as u32 + 1);
        }
        // snapshot K captures the state produced by update K-1
        assert_eq!(q.versions[0].items[0].product_name, "Widget");
        assert_eq!(q.versions[1].items[0].product_name, "Item-1");
        assert_eq!(q.versions[4].items[0].product_name, "Item-4");
        assert_eq!(q.items[0].product_name, "Item-5");
    }

    #[test]
    fn test_update_appends_exactly_one_activity_entry() {
        let mut q = quotation();
        let before = q.activity_log.len();
        let actor = ObjectId::new();
        let patch = UpdateQuotationRequest {
            status: Some(QuotationStatus::Sent),
            version_note: Some("Sent to customer".to_string()),
            ..Default::default()
        };
        apply_update(&mut q, patch, Some(actor), "2026-02-01T00:00:00+00:00").unwrap();

        assert_eq!(q.activity_log.len(), before + 1);
        let entry = q.activity_log.last().unwrap();
        assert_eq!(entry.action, "Updated");
        assert_eq!(entry.user, Some(actor));
        assert_eq!(entry.comment, "Sent to customer");
        // the snapshot note matches too
        assert_eq!(q.versions[0].notes, "Sent to customer");
    }

    #[test]
    fn test_update_default_notes() {
        let mut q = quotation();
        apply_update(
            &mut q,
            UpdateQuotationRequest::default(),
            None,
            "2026-02-01T00:00:00+00:00",
        )
        .unwrap();
        assert_eq!(q.versions[0].notes, "Edited quotation");
        assert_eq!(q.activity_log.last().unwrap().comment, "Quotation updated");
    }

    #[test]
    fn test_update_rejects_bad_sales_rep_id() {
        let mut q = quotation();
        let patch = UpdateQuotationRequest {
            sales_rep: Some("not-a-hex-id".to_string()),
            ..Default::default()
        };
        let err = apply_update(&mut q, patch, None, "2026-02-01T00:00:00+00:00").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }
}
