use serde::Deserialize;

use crate::model::quotation::{
    Customer, DiscountType, LineItem, QuotationStatus, Terms, Totals,
};

/// Create payload. Presence of customer, sales rep, items and totals is
/// checked by the service; everything else is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotationRequest {
    pub customer: Option<Customer>,
    pub valid_until: Option<String>,
    pub currency: Option<String>,
    /// Hex ObjectId of the sales rep user.
    pub sales_rep: Option<String>,
    pub items: Option<Vec<LineItem>>,
    pub terms: Option<Terms>,
    pub attachments: Option<Vec<String>>,
    pub totals: Option<Totals>,
    pub discount_type: Option<DiscountType>,
    pub global_discount: Option<f64>,
    pub tax_type: Option<String>,
}

/// Update payload. Only the provided fields are applied; the version
/// snapshot of the prior items/totals is always taken first.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuotationRequest {
    pub customer: Option<Customer>,
    pub valid_until: Option<String>,
    pub currency: Option<String>,
    pub sales_rep: Option<String>,
    pub items: Option<Vec<LineItem>>,
    pub terms: Option<Terms>,
    pub attachments: Option<Vec<String>>,
    pub totals: Option<Totals>,
    pub discount_type: Option<DiscountType>,
    pub global_discount: Option<f64>,
    pub tax_type: Option<String>,
    pub status: Option<QuotationStatus>,
    /// Free-text note recorded on the version snapshot and activity entry.
    pub version_note: Option<String>,
}
