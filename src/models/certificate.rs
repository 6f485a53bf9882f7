//! Certificate records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::collection::{Titled, first_filled, opt_string_or_number};
use crate::entity::certificate;

/// Certificate as submitted by the client. The web client sends the
/// display spellings (`name`, `date`, `certificateLink`) next to the
/// storage ones in the same record.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", from = "CertificateWire")]
pub struct CertificateInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    /// `file` or `link`
    pub upload_type: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CertificateWire {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    id: Option<String>,
    title: Option<String>,
    name: Option<String>,
    issuer: Option<String>,
    organization: Option<String>,
    issue_date: Option<String>,
    #[serde(rename = "issue_date")]
    issue_date_snake: Option<String>,
    date: Option<String>,
    credential_id: Option<String>,
    #[serde(rename = "credential_id")]
    credential_id_snake: Option<String>,
    credential_url: Option<String>,
    #[serde(rename = "credential_url")]
    credential_url_snake: Option<String>,
    certificate_link: Option<String>,
    file_url: Option<String>,
    #[serde(rename = "file_url")]
    file_url_snake: Option<String>,
    url: Option<String>,
    file_type: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    upload_type: Option<String>,
    category: Option<String>,
    description: Option<String>,
}

impl From<CertificateWire> for CertificateInput {
    fn from(w: CertificateWire) -> Self {
        Self {
            id: w.id,
            title: first_filled([w.title, w.name]),
            issuer: first_filled([w.issuer, w.organization]),
            issue_date: first_filled([w.issue_date, w.issue_date_snake, w.date]),
            credential_id: first_filled([w.credential_id, w.credential_id_snake]),
            credential_url: first_filled([
                w.credential_url,
                w.credential_url_snake,
                w.certificate_link,
            ]),
            file_url: first_filled([w.file_url, w.file_url_snake, w.url]),
            file_type: first_filled([w.file_type, w.kind]),
            upload_type: w.upload_type,
            category: w.category,
            description: w.description,
        }
    }
}

impl Titled for CertificateInput {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub title: String,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub upload_type: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<certificate::Model> for Certificate {
    fn from(m: certificate::Model) -> Self {
        Self {
            id: m.client_id.unwrap_or_else(|| m.id.to_string()),
            title: m.title,
            issuer: m.issuer,
            issue_date: m.issue_date,
            credential_id: m.credential_id,
            credential_url: m.credential_url,
            file_url: m.file_url,
            file_type: m.file_type,
            upload_type: m.upload_type,
            category: m.category,
            description: m.description,
            created_at: m.created_at,
        }
    }
}
