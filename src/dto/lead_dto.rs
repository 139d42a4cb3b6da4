use serde::{Deserialize, Serialize};

use crate::model::lead::{Lead, LeadStatus};

/// Partial update for a lead: only fields present in the request body are
/// applied, everything else keeps its stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPatch {
    pub lead_owner_name: Option<String>,
    pub company_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub lead_source: Option<String>,
    pub status: Option<LeadStatus>,
    pub industry: Option<String>,
    pub number_of_employees: Option<i64>,
    pub annual_revenue: Option<String>,
    pub rating: Option<String>,
    pub team_id: Option<String>,
    pub secondary_email: Option<String>,
    pub twitter: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
}

impl LeadPatch {
    pub fn apply(self, lead: &mut Lead) {
        if let Some(v) = self.lead_owner_name {
            lead.lead_owner_name = Some(v);
        }
        if let Some(v) = self.company_name {
            lead.company_name = Some(v);
        }
        if let Some(v) = self.first_name {
            lead.first_name = v;
        }
        if let Some(v) = self.last_name {
            lead.last_name = Some(v);
        }
        if let Some(v) = self.title {
            lead.title = Some(v);
        }
        if let Some(v) = self.email {
            lead.email = v;
        }
        if let Some(v) = self.phone {
            lead.phone = Some(v);
        }
        if let Some(v) = self.fax {
            lead.fax = Some(v);
        }
        if let Some(v) = self.lead_source {
            lead.lead_source = Some(v);
        }
        if let Some(v) = self.status {
            lead.status = v;
        }
        if let Some(v) = self.industry {
            lead.industry = Some(v);
        }
        if let Some(v) = self.number_of_employees {
            lead.number_of_employees = Some(v);
        }
        if let Some(v) = self.annual_revenue {
            lead.annual_revenue = Some(v);
        }
        if let Some(v) = self.rating {
            lead.rating = Some(v);
        }
        if let Some(v) = self.team_id {
            lead.team_id = Some(v);
        }
        if let Some(v) = self.secondary_email {
            lead.secondary_email = Some(v);
        }
        if let Some(v) = self.twitter {
            lead.twitter = Some(v);
        }
        if let Some(v) = self.street {
            lead.street = Some(v);
        }
        if let Some(v) = self.city {
            lead.city = Some(v);
        }
        if let Some(v) = self.state {
            lead.state = Some(v);
        }
        if let Some(v) = self.zip_code {
            lead.zip_code = Some(v);
        }
        if let Some(v) = self.country {
            lead.country = Some(v);
        }
        if let Some(v) = self.description {
            lead.description = Some(v);
        }
    }
}

/// Result message for the bulk import endpoint.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut lead = Lead {
            id: None,
            lead_owner_name: None,
            company_name: Some("Initech".to_string()),
            first_name: "Peter".to_string(),
            last_name: Some("Gibbons".to_string()),
            title: None,
            email: "peter@initech.test".to_string(),
            phone: None,
            fax: None,
            lead_source: None,
            status: LeadStatus::New,
            industry: None,
            number_of_employees: None,
            annual_revenue: None,
            rating: None,
            team_id: None,
            secondary_email: None,
            twitter: None,
            street: None,
            city: None,
            state: None,
            zip_code: None,
            country: None,
            description: None,
            created_at: Some("2026-01-01T00:00:00+00:00".to_string()),
            updated_at: None,
        };

        let patch: LeadPatch =
            serde_json::from_str(r#"{"status": "contacted", "city": "Austin"}"#).unwrap();
        patch.apply(&mut lead);

        assert_eq!(lead.status, LeadStatus::Contacted);
        assert_eq!(lead.city.as_deref(), Some("Austin"));
        // untouched fields survive
        assert_eq!(lead.company_name.as_deref(), Some("Initech"));
        assert_eq!(lead.first_name, "Peter");
    }
}
