use bson::oid::ObjectId;
use crm_backend::dto::quotation_dto::UpdateQuotationRequest;
use crm_backend::model::quotation::{
    ActivityEntry, Customer, LineItem, Quotation, QuotationStatus, Totals,
};
use crm_backend::service::quotation_service::apply_update;

fn line_item(name: &str, quantity: f64, unit_price: f64) -> LineItem {
    let subtotal = quantity * unit_price;
    LineItem {
        product_name: name.to_string(),
        description: None,
        quantity,
        unit_price,
        discount: 0.0,
        tax: 0.0,
        subtotal,
    }
}

fn fresh_quotation() -> Quotation {
    Quotation {
        id: Some(ObjectId::new()),
        quotation_id: "QTN-0001".to_string(),
        customer: Customer {
            name: "Globex".to_string(),
            contact: Some("Hank Scorpio".to_string()),
            email: Some("hank@globex.test".to_string()),
            billing_address: Some("1 Volcano Lane".to_string()),
        },
        valid_until: Some("2026-12-31".to_string()),
        currency: Some("USD".to_string()),
        sales_rep: ObjectId::new(),
        items: vec![line_item("Flamethrower", 2.0, 150.0)],
        totals: Totals {
            total_before_tax: 300.0,
            tax_amount: 30.0,
            grand_total: 330.0,
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
            timestamp: "2026-06-01T09:00:00+00:00".to_string(),
            comment: "Quotation created.".to_string(),
        }],
        created_by: None,
        created_at: Some("2026-06-01T09:00:00+00:00".to_string()),
        updated_at: None,
    }
}

#[test]
fn test_k_updates_yield_k_ordered_versions() {
    let mut quotation = fresh_quotation();
    let k = 7;

    for step in 1..=k {
        let patch = UpdateQuotationRequest {
            items: Some(vec![line_item("Revision", step as f64, 100.0)]),
            totals: Some(Totals {
                total_before_tax: step as f64 * 100.0,
                tax_amount: 0.0,
                grand_total: step as f64 * 100.0,
            }),
            version_note: Some(format!("revision {}", step)),
            ..Default::default()
        };
        apply_update(&mut quotation, patch, None, "2026-06-02T10:00:00+00:00").unwrap();
    }

    assert_eq!(quotation.versions.len(), k);
    for (index, version) in quotation.versions.iter().enumerate() {
        assert_eq!(version.version_number, index as u32 + 1);
    }

    // Each snapshot equals the item/total state immediately prior to its
    // update: snapshot 1 is the original, snapshot N is the result of
    // update N-1.
    assert_eq!(quotation.versions[0].items[0].product_name, "Flamethrower");
    assert_eq!(quotation.versions[0].totals.grand_total, 330.0);
    for step in 2..=k {
        let snapshot = &quotation.versions[step - 1];
        assert_eq!(snapshot.items[0].quantity, (step - 1) as f64);
        assert_eq!(snapshot.totals.grand_total, (step - 1) as f64 * 100.0);
    }
}

#[test]
fn test_each_update_appends_one_activity_entry() {
    let mut quotation = fresh_quotation();
    let actor = ObjectId::new();
    let initial_log_len = quotation.activity_log.len();

    for _ in 0..3 {
        apply_update(
            &mut quotation,
            UpdateQuotationRequest::default(),
            Some(actor),
            "2026-06-02T10:00:00+00:00",
        )
        .unwrap();
    }

    assert_eq!(quotation.activity_log.len(), initial_log_len + 3);
    for entry in quotation.activity_log.iter().skip(initial_log_len) {
        assert_eq!(entry.action, "Updated");
        assert_eq!(entry.user, Some(actor));
    }
}

#[test]
fn test_status_only_update_still_snapshots_items() {
    let mut quotation = fresh_quotation();
    let patch = UpdateQuotationRequest {
        status: Some(QuotationStatus::Sent),
        version_note: Some("Marked as sent".to_string()),
        ..Default::default()
    };
    apply_update(&mut quotation, patch, None, "2026-06-02T10:00:00+00:00").unwrap();

    assert_eq!(quotation.status, QuotationStatus::Sent);
    assert_eq!(quotation.versions.len(), 1);
    // items unchanged by the patch, snapshot still taken
    assert_eq!(quotation.versions[0].items.len(), quotation.items.len());
    assert_eq!(quotation.versions[0].notes, "Marked as sent");
}
