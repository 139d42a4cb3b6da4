use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{Datelike, Utc};
use tracing::{info, instrument};

use crate::dto::lead_dto::LeadPatch;
use crate::model::lead::{Lead, LeadStatus};
use crate::repository::lead_repo::{LeadRepository, MongoLeadRepository};
use crate::service::analytics::{
    self, LeadMetrics, MonthlyMetrics, StatusDistribution, TrendGranularity, Trends,
};
use crate::util::error::ServiceError;

/// Fields a bulk-imported row must carry with non-blank values.
const IMPORT_REQUIRED_FIELDS: [&str; 5] =
    ["firstName", "lastName", "email", "phone", "companyName"];

/// Counts rows missing any required import field. Pure so the import gate
/// is testable on its own.
pub fn count_invalid_import_rows(leads: &[Lead]) -> usize {
    fn blank(value: Option<&str>) -> bool {
        value.map(|v| v.trim().is_empty()).unwrap_or(true)
    }

    leads
        .iter()
        .filter(|lead| {
            blank(Some(&lead.first_name))
                || blank(lead.last_name.as_deref())
                || blank(Some(&lead.email))
                || blank(lead.phone.as_deref())
                || blank(lead.company_name.as_deref())
        })
        .count()
}

#[async_trait]
pub trait LeadService: Send + Sync {
    async fn create(&self, lead: Lead) -> Result<Lead, ServiceError>;
    async fn import(&self, leads: Vec<Lead>) -> Result<usize, ServiceError>;
    async fn list(&self, status: Option<String>) -> Result<Vec<Lead>, ServiceError>;
    async fn get(&self, id: ObjectId) -> Result<Lead, ServiceError>;
    async fn update(&self, id: ObjectId, patch: LeadPatch) -> Result<Lead, ServiceError>;
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError>;

    async fn status_distribution(&self) -> Result<StatusDistribution, ServiceError>;
    async fn trends(
        &self,
        mode: &str,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Result<Trends, ServiceError>;
    async fn metrics(&self) -> Result<LeadMetrics, ServiceError>;
    async fn monthly_metrics(&self, year: Option<i32>) -> Result<MonthlyMetrics, ServiceError>;
}

pub struct LeadServiceImpl {
    pub lead_repo: MongoLeadRepository,
}

impl LeadServiceImpl {
    pub fn new(lead_repo: MongoLeadRepository) -> Self {
        Self { lead_repo }
    }
}

/// Widens date-only bounds (`YYYY-MM-DD`) to full-day RFC 3339 bounds so
/// string range filters stay chronological against stored timestamps.
fn normalize_range(start: &str, end: &str) -> (String, String) {
    let start = if start.len() == 10 {
        format!("{}T00:00:00+00:00", start)
    } else {
        start.to_string()
    };
    let end = if end.len() == 10 {
        format!("{}T23:59:59.999999+00:00", end)
    } else {
        end.to_string()
    };
    (start, end)
}

#[async_trait]
impl LeadService for LeadServiceImpl {
    #[instrument(skip(self, lead), fields(email = %lead.email))]
    async fn create(&self, lead: Lead) -> Result<Lead, ServiceError> {
        if lead.first_name.trim().is_empty() || lead.email.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "firstName and email are required".to_string(),
            ));
        }
        Ok(self.lead_repo.insert(lead).await?)
    }

    #[instrument(skip(self, leads), fields(count = leads.len()))]
    async fn import(&self, leads: Vec<Lead>) -> Result<usize, ServiceError> {
        let invalid = count_invalid_import_rows(&leads);
        if invalid > 0 {
            return Err(ServiceError::InvalidInput(format!(
                "Import failed. {} lead(s) missing required fields: {}.",
                invalid,
                IMPORT_REQUIRED_FIELDS.join(", ")
            )));
        }
        let imported = self.lead_repo.insert_many(leads).await?;
        info!("Imported {} leads", imported);
        Ok(imported)
    }

    async fn list(&self, status: Option<String>) -> Result<Vec<Lead>, ServiceError> {
        let status = status.map(|s| LeadStatus::parse(&s));
        Ok(self.lead_repo.find(status.as_ref()).await?)
    }

    async fn get(&self, id: ObjectId) -> Result<Lead, ServiceError> {
        self.lead_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Lead not found".to_string()))
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update(&self, id: ObjectId, patch: LeadPatch) -> Result<Lead, ServiceError> {
        let mut lead = self
            .lead_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Lead not found".to_string()))?;
        patch.apply(&mut lead);
        Ok(self.lead_repo.update(id, lead).await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError> {
        Ok(self.lead_repo.delete(id).await?)
    }

    async fn status_distribution(&self) -> Result<StatusDistribution, ServiceError> {
        let rows = self.lead_repo.status_rows(None).await?;
        let statuses: Vec<LeadStatus> = rows.into_iter().map(|(status, _)| status).collect();
        Ok(analytics::status_distribution(&statuses))
    }

    async fn trends(
        &self,
        mode: &str,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Result<Trends, ServiceError> {
        let granularity = match mode {
            "year" => TrendGranularity::Year,
            "month" | "range" => TrendGranularity::Month,
            other => {
                return Err(ServiceError::InvalidInput(format!(
                    "Invalid type value: {}. Allowed values are: year, month, range.",
                    other
                )))
            }
        };

        // Bounds apply to any mode when both are given; range mode
        // requires them.
        let range = match (start_date, end_date) {
            (Some(start), Some(end)) => Some(normalize_range(&start, &end)),
            _ if mode == "range" => {
                return Err(ServiceError::InvalidInput(
                    "startDate and endDate are required for type=range".to_string(),
                ))
            }
            _ => None,
        };

        let rows = self.lead_repo.status_rows(range).await?;
        Ok(analytics::build_trends(&rows, granularity))
    }

    async fn metrics(&self) -> Result<LeadMetrics, ServiceError> {
        let total = self.lead_repo.count().await?;
        let converted = self.lead_repo.count_by_status("converted").await?;
        Ok(analytics::lead_metrics(total, converted))
    }

    async fn monthly_metrics(&self, year: Option<i32>) -> Result<MonthlyMetrics, ServiceError> {
        let year = year.unwrap_or_else(|| Utc::now().year());
        let rows = self.lead_repo.status_rows(None).await?;
        Ok(analytics::monthly_metrics(&rows, year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(first: &str, last: &str, email: &str, phone: &str, company: &str) -> Lead {
        Lead {
            id: None,
            lead_owner_name: None,
            company_name: if company.is_empty() {
                None
            } else {
                Some(company.to_string())
            },
            first_name: first.to_string(),
            last_name: if last.is_empty() {
                None
            } else {
                Some(last.to_string())
            },
            title: None,
            email: email.to_string(),
            phone: if phone.is_empty() {
                None
            } else {
                Some(phone.to_string())
            },
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
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_import_validation_accepts_complete_rows() {
        let leads = vec![
            lead("Ada", "Lovelace", "ada@acme.test", "555-0100", "Acme"),
            lead("Grace", "Hopper", "grace@acme.test", "555-0101", "Acme"),
        ];
        assert_eq!(count_invalid_import_rows(&leads), 0);
    }

    #[test]
    fn test_import_validation_counts_incomplete_rows() {
        let leads = vec![
            lead("Ada", "Lovelace", "ada@acme.test", "555-0100", "Acme"),
            lead("Grace", "", "grace@acme.test", "555-0101", "Acme"), // no last name
            lead("Alan", "Turing", "alan@acme.test", "  ", "Acme"),   // blank phone
        ];
        assert_eq!(count_invalid_import_rows(&leads), 2);
    }

    #[test]
    fn test_normalize_range_widens_date_only_bounds() {
        let (start, end) = normalize_range("2026-01-01", "2026-01-31");
        assert_eq!(start, "2026-01-01T00:00:00+00:00");
        assert_eq!(end, "2026-01-31T23:59:59.999999+00:00");
        // a timestamp on the last day stays inside the range
        assert!(end.as_str() > "2026-01-31T18:30:00+00:00");
    }

    #[test]
    fn test_normalize_range_passes_full_timestamps_through() {
        let (start, end) = normalize_range(
            "2026-01-01T08:00:00+00:00",
            "2026-01-02T08:00:00+00:00",
        );
        assert_eq!(start, "2026-01-01T08:00:00+00:00");
        assert_eq!(end, "2026-01-02T08:00:00+00:00");
    }
}
