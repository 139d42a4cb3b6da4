use serde::{Deserialize, Serialize};

/// Singleton-per-key sequence document backing human-readable identifiers.
///
/// The only write path is an atomic findOneAndUpdate `$inc` with upsert, so
/// handed-out values are unique and monotonic under concurrent callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    #[serde(rename = "_id")]
    pub id: String,
    pub seq: i64,
}

/// Counter key for the quotation sequence.
pub const QUOTATION_COUNTER_KEY: &str = "quotationId";

/// Renders a sequence number as a quotation identifier, e.g. `QTN-0001`.
pub fn format_quotation_id(seq: i64) -> String {
    format!("QTN-{:04}", seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quotation_id_pads_to_four_digits() {
        assert_eq!(format_quotation_id(1), "QTN-0001");
        assert_eq!(format_quotation_id(42), "QTN-0042");
        assert_eq!(format_quotation_id(9999), "QTN-9999");
    }

    #[test]
    fn test_format_quotation_id_does_not_truncate() {
        assert_eq!(format_quotation_id(12345), "QTN-12345");
    }
}
