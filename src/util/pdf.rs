//! Quotation PDF rendering.
//!
//! Renders the quotation summary (customer block, line items, totals,
//! terms) to an in-memory PDF using the built-in Helvetica fonts, so no
//! font assets ship with the binary.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;

use crate::model::quotation::Quotation;

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("Failed to render PDF: {0}")]
    RenderFailed(String),
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const LINE_HEIGHT_MM: f32 = 7.0;

fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Generates the quotation PDF and returns it as a byte buffer.
pub fn generate_quotation_pdf(quotation: &Quotation) -> Result<Vec<u8>, PdfError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Quotation {}", quotation.quotation_id),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::RenderFailed(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::RenderFailed(e.to_string()))?;

    let layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    let write_line = |text: &str, size: f32, bold: bool, y: &mut f32| {
        let f = if bold { &font_bold } else { &font };
        layer.use_text(text, size, Mm(MARGIN_MM), Mm(*y), f);
        *y -= LINE_HEIGHT_MM;
    };

    write_line(
        &format!("Quotation #{}", quotation.quotation_id),
        18.0,
        true,
        &mut y,
    );
    y -= LINE_HEIGHT_MM / 2.0;

    write_line(
        &format!("Customer: {}", quotation.customer.name),
        11.0,
        false,
        &mut y,
    );
    write_line(
        &format!(
            "Email: {}",
            quotation.customer.email.as_deref().unwrap_or("-")
        ),
        11.0,
        false,
        &mut y,
    );
    write_line(
        &format!(
            "Billing Address: {}",
            quotation.customer.billing_address.as_deref().unwrap_or("-")
        ),
        11.0,
        false,
        &mut y,
    );
    write_line(
        &format!("Status: {:?}", quotation.status),
        11.0,
        false,
        &mut y,
    );
    write_line(
        &format!(
            "Valid Until: {}",
            quotation.valid_until.as_deref().unwrap_or("-")
        ),
        11.0,
        false,
        &mut y,
    );
    y -= LINE_HEIGHT_MM / 2.0;

    write_line("Items", 13.0, true, &mut y);
    for (index, item) in quotation.items.iter().enumerate() {
        write_line(
            &format!(
                "{}. {} - Qty: {} | Price: {} | Tax: {}% | Subtotal: {}",
                index + 1,
                item.product_name,
                item.quantity,
                format_amount(item.unit_price),
                item.tax,
                format_amount(item.subtotal),
            ),
            10.0,
            false,
            &mut y,
        );
    }
    y -= LINE_HEIGHT_MM / 2.0;

    write_line(
        &format!(
            "Total Before Tax: {}",
            format_amount(quotation.totals.total_before_tax)
        ),
        11.0,
        false,
        &mut y,
    );
    write_line(
        &format!("Tax Amount: {}", format_amount(quotation.totals.tax_amount)),
        11.0,
        false,
        &mut y,
    );
    write_line(
        &format!("Grand Total: {}", format_amount(quotation.totals.grand_total)),
        12.0,
        true,
        &mut y,
    );

    if let Some(terms) = &quotation.terms {
        y -= LINE_HEIGHT_MM / 2.0;
        write_line(
            &format!("Payment Terms: {}", terms.payment.as_deref().unwrap_or("-")),
            10.0,
            false,
            &mut y,
        );
        write_line(
            &format!(
                "Delivery Terms: {}",
                terms.delivery.as_deref().unwrap_or("-")
            ),
            10.0,
            false,
            &mut y,
        );
        write_line(
            &format!(
                "Notes: {}",
                terms.additional_notes.as_deref().unwrap_or("-")
            ),
            10.0,
            false,
            &mut y,
        );
    }

    let mut buf = Vec::new();
    {
        let mut writer = BufWriter::new(&mut buf);
        doc.save(&mut writer)
            .map_err(|e| PdfError::RenderFailed(e.to_string()))?;
    }
    Ok(buf)
}

/// Attachment filename for a quotation, e.g. `Quotation-QTN-0001.pdf`.
pub fn quotation_pdf_filename(quotation_id: &str) -> String {
    format!("Quotation-{}.pdf", quotation_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::quotation::{Customer, LineItem, Quotation, QuotationStatus, Totals};
    use bson::oid::ObjectId;

    fn sample_quotation() -> Quotation {
        Quotation {
            id: None,
            quotation_id: "QTN-0007".to_string(),
            customer: Customer {
                name: "Acme Corp".to_string(),
                contact: None,
                email: Some("billing@acme.test".to_string()),
                billing_address: Some("1 Main St".to_string()),
            },
            valid_until: Some("2026-09-30".to_string()),
            currency: Some("USD".to_string()),
            sales_rep: ObjectId::new(),
            items: vec![LineItem {
                product_name: "Widget".to_string(),
                description: None,
                quantity: 3.0,
                unit_price: 10.0,
                discount: 0.0,
                tax: 10.0,
                subtotal: 33.0,
            }],
            totals: Totals {
                total_before_tax: 30.0,
                tax_amount: 3.0,
                grand_total: 33.0,
            },
            discount_type: Default::default(),
            global_discount: None,
            tax_type: None,
            terms: None,
            attachments: vec![],
            status: QuotationStatus::Draft,
            versions: vec![],
            activity_log: vec![],
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_generate_pdf_produces_bytes() {
        let bytes = generate_quotation_pdf(&sample_quotation()).unwrap();
        assert!(!bytes.is_empty());
        // PDF magic header
        assert_eq!(&bytes[..5], b"%PDF-");
    }

    #[test]
    fn test_pdf_filename() {
        assert_eq!(quotation_pdf_filename("QTN-0007"), "Quotation-QTN-0007.pdf");
    }
}
