//! Group-based access decision over unverified token claims.
//!
//! The pipeline runs strictly in order and stops at the first failure:
//! cookie → claims → group list → allow-list. Nothing here verifies a
//! signature. This is a coarse gate over self-asserted data, not an
//! authentication boundary.
//!
//! The core only needs request headers, so it stays independent of axum's
//! middleware plumbing (see `crate::middleware::group_access`).

pub mod authorizer;
pub mod claims;
pub mod credential;
pub mod navigator;

use std::sync::Arc;

use axum::http::HeaderMap;
use tracing::{debug, warn};

use crate::config::GroupAccessConfig;
use crate::error::Rejection;

pub use claims::{ClaimSet, DecodeError};
pub use navigator::GroupClaimError;

/// Result of evaluating one request.
pub type Verdict = Result<Grant, Rejection>;

/// A request that may pass, with the allow-list entry that let it through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub matched_group: String,
}

/// A configured group-access filter.
///
/// Cheap to clone; every clone shares the same read-only settings.
#[derive(Debug, Clone)]
pub struct GroupAccess {
    inner: Arc<Settings>,
}

#[derive(Debug)]
struct Settings {
    name: String,
    allowed_groups: Vec<String>,
    claims_prefix: Option<String>,
    group_property: String,
    cookie_name: String,
}

impl GroupAccess {
    pub fn new(name: impl Into<String>, config: GroupAccessConfig) -> Self {
        let claims_prefix = Some(config.claims_prefix).filter(|p| !p.is_empty());

        Self {
            inner: Arc::new(Settings {
                name: name.into(),
                allowed_groups: config.allow_groups,
                claims_prefix,
                group_property: config.group_property,
                cookie_name: config.cookie_name,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Decides whether the request with these headers may pass.
    pub fn evaluate(&self, headers: &HeaderMap) -> Verdict {
        let s = &*self.inner;

        let Some(token) = credential::token_from_cookies(headers, &s.cookie_name) else {
            warn!(filter = %s.name, cookie = %s.cookie_name, "credential cookie missing");
            return Err(Rejection::MissingCredential);
        };

        let claims = ClaimSet::decode_unverified(token).map_err(|err| {
            warn!(filter = %s.name, error = %err, "token claims could not be decoded");
            Rejection::MalformedToken
        })?;

        debug!(filter = %s.name, claims = ?claims.as_map(), "decoded token claims");

        let groups = navigator::group_list(&claims, s.claims_prefix.as_deref(), &s.group_property)
            .map_err(|err| {
                warn!(filter = %s.name, error = %err, "group claim missing or malformed");
                Rejection::MissingOrMalformedGroups
            })?;

        match authorizer::first_allowed(&s.allowed_groups, &groups) {
            Some(group) => {
                debug!(filter = %s.name, group = %group, "group allowed");
                Ok(Grant {
                    matched_group: group.to_owned(),
                })
            }
            None => {
                warn!(filter = %s.name, ?groups, "no allowed group, forbidden");
                Err(Rejection::GroupNotAllowed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use serde_json::{Value, json};

    fn access(allow: &[&str], prefix: &str, property: &str) -> GroupAccess {
        GroupAccess::new(
            "test",
            GroupAccessConfig {
                allow_groups: allow.iter().map(|s| s.to_string()).collect(),
                claims_prefix: prefix.to_string(),
                group_property: property.to_string(),
                ..GroupAccessConfig::default()
            },
        )
    }

    fn cookie(token: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("token={token}")).unwrap(),
        );
        h
    }

    fn token(claims: &Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    #[test]
    fn allow_reports_matched_group() {
        let a = access(&["ops", "admin"], "", "groups");
        let verdict = a.evaluate(&cookie(&token(&json!({"groups": ["admin", "user"]}))));
        assert_eq!(
            verdict,
            Ok(Grant {
                matched_group: "admin".into()
            })
        );
    }

    #[test]
    fn each_step_maps_to_its_rejection() {
        let a = access(&["admin"], "", "groups");

        assert_eq!(a.evaluate(&HeaderMap::new()), Err(Rejection::MissingCredential));
        assert_eq!(a.evaluate(&cookie("garbage")), Err(Rejection::MalformedToken));
        assert_eq!(
            a.evaluate(&cookie(&token(&json!({"other": 1})))),
            Err(Rejection::MissingOrMalformedGroups)
        );
        assert_eq!(
            a.evaluate(&cookie(&token(&json!({"groups": ["user"]})))),
            Err(Rejection::GroupNotAllowed)
        );
    }

    #[test]
    fn empty_allow_list_denies_everyone() {
        let a = access(&[], "", "groups");
        assert_eq!(
            a.evaluate(&cookie(&token(&json!({"groups": ["admin"]})))),
            Err(Rejection::GroupNotAllowed)
        );
    }

    #[test]
    fn empty_prefix_reads_top_level() {
        let a = access(&["admin"], "", "groups");
        assert!(
            a.evaluate(&cookie(&token(&json!({"groups": ["admin"]}))))
                .is_ok()
        );
    }

    #[test]
    fn same_request_same_verdict() {
        let a = access(&["admin"], "realm_access", "groups");
        let h = cookie(&token(&json!({"realm_access": {"groups": ["admin"]}})));
        let first = a.evaluate(&h);
        for _ in 0..10 {
            assert_eq!(a.evaluate(&h), first);
        }
    }

    #[test]
    fn clones_share_settings() {
        let a = access(&["admin"], "", "groups");
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.inner, &b.inner));
        assert_eq!(b.name(), "test");
    }
}
