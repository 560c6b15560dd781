use axum::http::{HeaderMap, HeaderName, HeaderValue};
use tonic::metadata::{Ascii, MetadataKey, MetadataMap, MetadataValue};

use crate::{domain::entities::payload::ClaimSet, infra::error::InfraError};

struct ClaimHeader {
    header: HeaderName,
    metadata_key: MetadataKey<Ascii>,
    render: fn(&ClaimSet) -> String,
}

/// [`ClaimSet::HEADER_FIELDS`] resolved into HTTP header names and gRPC
/// metadata keys. Built once at startup.
pub struct ClaimHeaders {
    fields: Vec<ClaimHeader>,
}

impl ClaimHeaders {
    pub fn new() -> Result<Self, InfraError> {
        let fields: Vec<ClaimHeader> = ClaimSet::HEADER_FIELDS
            .iter()
            .map(|field| {
                let header = HeaderName::from_bytes(field.header.as_bytes())
                    .map_err(|_| InfraError::ClaimHeader(field.header))?;
                // HeaderName lowercases on parse; the table must already be lowercase.
                if header.as_str() != field.header {
                    return Err(InfraError::ClaimHeader(field.header));
                }
                let metadata_key = MetadataKey::from_bytes(field.header.as_bytes())
                    .map_err(|_| InfraError::ClaimHeader(field.header))?;
                Ok(ClaimHeader {
                    header,
                    metadata_key,
                    render: field.render,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { fields })
    }

    pub fn header_map(&self, claims: &ClaimSet) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(self.fields.len());
        for field in &self.fields {
            let rendered = (field.render)(claims);
            match HeaderValue::try_from(rendered) {
                Ok(value) => {
                    headers.insert(field.header.clone(), value);
                }
                Err(_) => tracing::warn!(header = %field.header, "claim value is not a valid header value"),
            }
        }
        headers
    }

    pub fn metadata_map(&self, claims: &ClaimSet) -> MetadataMap {
        let mut metadata = MetadataMap::new();
        for field in &self.fields {
            match (field.render)(claims).parse::<MetadataValue<Ascii>>() {
                Ok(value) => {
                    metadata.insert(field.metadata_key.clone(), value);
                }
                Err(_) => tracing::warn!(key = field.metadata_key.as_str(), "claim value is not valid ASCII metadata"),
            }
        }
        metadata
    }
}
