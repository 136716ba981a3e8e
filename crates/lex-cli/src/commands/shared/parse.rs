use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use lex_core::enums::{AgreementStatus, BillingPlan};

    use super::parse_enum;

    #[test]
    fn parses_snake_case_enum() {
        let status: AgreementStatus = parse_enum("review", "status").expect("status should parse");
        assert_eq!(status, AgreementStatus::Review);
    }

    #[test]
    fn parses_hyphenated_plan() {
        let plan: BillingPlan = parse_enum("2-year", "plan").expect("plan should parse");
        assert_eq!(plan, BillingPlan::TwoYear);
        let plan: BillingPlan = parse_enum("Monthly", "plan").expect("plan should parse");
        assert_eq!(plan, BillingPlan::Monthly);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<BillingPlan>("weekly", "plan").expect_err("should fail");
        assert!(err.to_string().contains("invalid plan 'weekly'"));
    }
}
