//! Serde roundtrip and JsonSchema validation tests for all entity types.

use chrono::{NaiveDate, Utc};
use lex_core::analytics::{PortfolioSummary, StatusCount};
use lex_core::entities::*;
use lex_core::enums::*;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    session_roundtrip,
    Session,
    Session {
        access_token: "eyJhbGciOiJIUzI1NiJ9.e30.sig".into(),
        refresh_token: Some("r-123".into()),
        expires_at: Some(Utc::now()),
        user: User {
            id: "3f0c6a56-8d7e-4b6e-9a3b-0b8f1c2d3e4f".into(),
            email: Some("a@b.com".into()),
        },
    }
);

roundtrip_and_validate!(
    organization_roundtrip,
    Organization,
    Organization {
        id: "org-1".into(),
        user_id: "3f0c6a56-8d7e-4b6e-9a3b-0b8f1c2d3e4f".into(),
        name: "Acme".into(),
        hq_location: "NYC".into(),
        plan: BillingPlan::TwoYear,
        created_at: Some(Utc::now()),
    }
);

roundtrip_and_validate!(
    new_organization_roundtrip,
    NewOrganization,
    NewOrganization {
        user_id: "user-1".into(),
        name: "Acme".into(),
        hq_location: "NYC".into(),
        plan: BillingPlan::Monthly,
    }
);

roundtrip_and_validate!(
    agreement_roundtrip,
    Agreement,
    Agreement {
        id: "agr-001".into(),
        title: "Cloud Services Agreement".into(),
        counterparty: "Globex".into(),
        kind: "SaaS".into(),
        status: AgreementStatus::Review,
        value: 120_000,
        owner: Some("legal@acme.test".into()),
        effective_date: NaiveDate::from_ymd_opt(2026, 1, 1),
        expiry_date: NaiveDate::from_ymd_opt(2027, 1, 1),
        risk: Some(RiskLevel::Medium),
    }
);

roundtrip_and_validate!(brand_roundtrip, BrandSettings, BrandSettings::default());

roundtrip_and_validate!(template_roundtrip, Template, Template::standard_nda());

roundtrip_and_validate!(
    summary_roundtrip,
    PortfolioSummary,
    PortfolioSummary {
        total: 2,
        by_status: vec![
            StatusCount {
                status: AgreementStatus::Active,
                count: 1,
            },
            StatusCount {
                status: AgreementStatus::Draft,
                count: 1,
            },
        ],
        total_value: 10,
        high_risk: 0,
    }
);

#[test]
fn organization_row_without_created_at_parses() {
    let row = serde_json::json!({
        "id": "org-9",
        "user_id": "user-9",
        "name": "Initech",
        "hq_location": "Austin",
        "plan": "5_year"
    });
    let org: Organization = serde_json::from_value(row).unwrap();
    assert_eq!(org.plan, BillingPlan::FiveYear);
    assert!(org.created_at.is_none());
}
