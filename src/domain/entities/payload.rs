use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Application-defined claims asserted by the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    pub user_id: u32,
}

/// A claim field that is echoed to callers as an outbound header.
#[derive(Clone, Copy)]
pub struct ClaimField {
    pub header: &'static str,
    pub render: fn(&ClaimSet) -> String,
}

impl ClaimSet {
    /// Claim fields propagated as response headers / gRPC metadata.
    /// Header names must be lowercase.
    pub const HEADER_FIELDS: &'static [ClaimField] = &[ClaimField {
        header: "x-user-id",
        render: render_user_id,
    }];

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.user_id == 0 {
            return Err("user_id must be a positive integer");
        }
        Ok(())
    }
}

fn render_user_id(claims: &ClaimSet) -> String {
    claims.user_id.to_string()
}

/// Issuance window. Always stamped by the token manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub expired_at: OffsetDateTime,
}

impl Metadata {
    /// `None` when `issued_at + validity` leaves the representable date range.
    pub fn starting_at(issued_at: OffsetDateTime, validity: Duration) -> Option<Self> {
        Some(Self {
            issued_at,
            expired_at: issued_at.checked_add(validity)?,
        })
    }

    /// The expiry instant itself is already expired.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expired_at
    }
}

/// Claims plus metadata: the unit that gets serialized, encrypted and signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(flatten)]
    pub claims: ClaimSet,
    #[serde(flatten)]
    pub metadata: Metadata,
}
