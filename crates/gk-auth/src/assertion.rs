//! Identity assertions submitted after the provider login completes

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::codec::SessionClaims;

/// Account details reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// The body posted to the issuance endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityAssertion {
    pub id_token: String,
    pub account: AccountInfo,
}

#[derive(Debug, Error)]
pub enum AssertionError {
    #[error("Missing required data")]
    MissingData,
    #[error("Malformed assertion body: {0}")]
    Malformed(String),
    #[error("Identity assertion rejected: {0}")]
    Rejected(String),
}

impl IdentityAssertion {
    /// Parse a raw request body
    pub fn from_slice(body: &[u8]) -> Result<Self, AssertionError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| AssertionError::Malformed(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Extract the assertion from a JSON document.
    ///
    /// `idToken` must be a non-empty string and `account` an object with
    /// string `id`, `name` and `email`; extra fields are ignored.
    pub fn from_value(value: &Value) -> Result<Self, AssertionError> {
        let id_token = match value.get("idToken") {
            Some(Value::String(token)) if !token.is_empty() => token.clone(),
            _ => return Err(AssertionError::MissingData),
        };

        let account = value
            .get("account")
            .filter(|account| !account.is_null())
            .ok_or(AssertionError::MissingData)?;
        let account = AccountInfo::deserialize(account).map_err(|_| AssertionError::MissingData)?;

        Ok(Self { id_token, account })
    }

    /// Session claims for the asserted account
    pub fn claims(&self) -> SessionClaims {
        SessionClaims {
            id: self.account.id.clone(),
            name: self.account.name.clone(),
            email: self.account.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_assertion() {
        let body = json!({
            "idToken": "t",
            "account": { "id": "1", "name": "A", "email": "a@b.com", "tenantId": "x" }
        });

        let assertion = IdentityAssertion::from_value(&body).unwrap();
        assert_eq!(assertion.id_token, "t");
        assert_eq!(
            assertion.claims(),
            SessionClaims {
                id: "1".into(),
                name: "A".into(),
                email: "a@b.com".into(),
            }
        );
    }

    #[test]
    fn test_missing_fields() {
        let cases = [
            json!({}),
            json!({ "idToken": "t" }),
            json!({ "account": { "id": "1", "name": "A", "email": "a@b.com" } }),
            json!({ "idToken": "", "account": { "id": "1", "name": "A", "email": "a@b.com" } }),
            json!({ "idToken": "t", "account": null }),
            json!({ "idToken": "t", "account": { "id": "1" } }),
            json!([1, 2, 3]),
        ];

        for body in cases {
            assert!(
                matches!(IdentityAssertion::from_value(&body), Err(AssertionError::MissingData)),
                "expected missing data for {body}"
            );
        }
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            IdentityAssertion::from_slice(b"{not json"),
            Err(AssertionError::Malformed(_))
        ));
    }
}
