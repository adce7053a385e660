//! Registrar record payloads.

use serde::{Deserialize, Serialize};

/// TTL, in seconds, written with every update.
pub const UPDATE_TTL_SECS: u32 = 600;

/// One A record as the registrar API models it.
///
/// Serializes as `{"data": "<ip>", "ttl": <secs>}`. Extra fields in registrar
/// responses (`name`, `type`, ...) are ignored on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Address the record points at.
    #[serde(rename = "data")]
    pub value: String,

    /// Time to live in seconds.
    #[serde(rename = "ttl", default)]
    pub time_to_live: u32,
}

impl DnsRecord {
    /// Creates a record with an explicit TTL.
    #[must_use]
    pub fn new(value: impl Into<String>, time_to_live: u32) -> Self {
        Self {
            value: value.into(),
            time_to_live,
        }
    }

    /// Creates the record pushed when the public IP changes.
    #[must_use]
    pub fn for_update(ip: impl Into<String>) -> Self {
        Self::new(ip, UPDATE_TTL_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_record_serializes_in_registrar_shape() {
        let body = serde_json::to_string(&[DnsRecord::for_update("5.6.7.8")]).unwrap();

        assert_eq!(body, r#"[{"data":"5.6.7.8","ttl":600}]"#);
    }

    #[test]
    fn deserialize_ignores_extra_fields() {
        let json = r#"[{"data":"1.2.3.4","name":"home","ttl":3600,"type":"A"}]"#;

        let records: Vec<DnsRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records, [DnsRecord::new("1.2.3.4", 3600)]);
    }

    #[test]
    fn missing_ttl_defaults_to_zero() {
        let record: DnsRecord = serde_json::from_str(r#"{"data":"1.2.3.4"}"#).unwrap();

        assert_eq!(record.time_to_live, 0);
    }
}
