// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! API key prefix parsing
//!
//! Keys may carry a plan prefix: `<plan>_<bits>_<raw key>`, where `<plan>`
//! is a two-letter code and the first three bits flag custom, managed and
//! self-hosted databases.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static TOKEN_PREFIX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^([a-z]{2})_([01]{4}\d*)_(.+)$").ok());

/// Subscription plan encoded in a key prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanType {
    Initial,
    Extended,
    FullFeatured,
}

impl PlanType {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "in" => Some(PlanType::Initial),
            "ex" => Some(PlanType::Extended),
            "ff" => Some(PlanType::FullFeatured),
            _ => None,
        }
    }
}

/// Settings decoded from a prefixed key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSettings {
    pub plan_type: PlanType,
    #[serde(rename = "customDB")]
    pub custom_db: bool,
    #[serde(rename = "managedDB")]
    pub managed_db: bool,
    pub self_hosted: bool,
}

/// Split a key into its prefix settings and the raw key.
///
/// Keys without a recognised prefix come back unchanged with `None`.
pub fn extract_token_settings(token: &str) -> (Option<TokenSettings>, &str) {
    let Some(pattern) = TOKEN_PREFIX.as_ref() else {
        return (None, token);
    };
    let Some(captures) = pattern.captures(token) else {
        return (None, token);
    };

    let (Some(prefix), Some(bits), Some(raw)) = (captures.get(1), captures.get(2), captures.get(3))
    else {
        return (None, token);
    };
    let Some(plan_type) = PlanType::from_prefix(prefix.as_str()) else {
        return (None, token);
    };

    let bits = bits.as_str().as_bytes();
    let settings = TokenSettings {
        plan_type,
        custom_db: bits[0] == b'1',
        managed_db: bits[1] == b'1',
        self_hosted: bits[2] == b'1',
    };
    (Some(settings), raw.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_token() {
        let (settings, raw) = extract_token_settings("in_0110_secret_key");
        let settings = settings.unwrap();
        assert_eq!(settings.plan_type, PlanType::Initial);
        assert!(!settings.custom_db);
        assert!(settings.managed_db);
        assert!(settings.self_hosted);
        assert_eq!(raw, "secret_key");
    }

    #[test]
    fn test_extra_digits_allowed() {
        let (settings, raw) = extract_token_settings("ex_100042_abc");
        assert_eq!(settings.unwrap().plan_type, PlanType::Extended);
        assert_eq!(raw, "abc");
    }

    #[test]
    fn test_unknown_prefix_passes_through() {
        let (settings, raw) = extract_token_settings("zz_1111_abc");
        assert!(settings.is_none());
        assert_eq!(raw, "zz_1111_abc");
    }

    #[test]
    fn test_plain_token_passes_through() {
        let (settings, raw) = extract_token_settings("abcdef");
        assert!(settings.is_none());
        assert_eq!(raw, "abcdef");
    }

    #[test]
    fn test_settings_serialize() {
        let (settings, _) = extract_token_settings("ff_1000_x");
        let value = serde_json::to_value(settings.unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "planType": "fullFeatured",
                "customDB": true,
                "managedDB": false,
                "selfHosted": false
            })
        );
    }
}
