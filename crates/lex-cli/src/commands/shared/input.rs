use std::path::Path;

use anyhow::Context;
use lex_core::entities::Agreement;

/// Read a JSON array of agreements.
pub fn load_agreements(path: &Path) -> anyhow::Result<Vec<Agreement>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of agreements", path.display()))
}

/// Write agreements back as pretty JSON.
pub fn save_agreements(path: &Path, agreements: &[Agreement]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(agreements)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Inline text, or the contents of `file`.
pub fn read_text(text: Option<&str>, file: Option<&str>) -> anyhow::Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text.to_string()),
        (None, Some(file)) => {
            std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
        }
        (None, None) => anyhow::bail!("provide --text or --file"),
    }
}

#[cfg(test)]
mod tests {
    use lex_core::enums::AgreementStatus;
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"[
        {"id":"agr-1","title":"Mutual NDA","counterparty":"Globex","type":"NDA","status":"draft","value":0},
        {"id":"agr-2","title":"Cloud Services","counterparty":"Initech","type":"SaaS","status":"active","value":120000,"risk":"high"}
    ]"#;

    #[test]
    fn load_and_save_agreements() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("agreements.json");
        std::fs::write(&path, SAMPLE).expect("write");

        let mut agreements = load_agreements(&path).expect("load");
        assert_eq!(agreements.len(), 2);
        assert_eq!(agreements[1].kind, "SaaS");

        agreements[0].status = AgreementStatus::Review;
        save_agreements(&path, &agreements).expect("save");
        let reloaded = load_agreements(&path).expect("reload");
        assert_eq!(reloaded, agreements);
    }

    #[test]
    fn load_rejects_non_array() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("agreements.json");
        std::fs::write(&path, r#"{"id":"agr-1"}"#).expect("write");
        let err = load_agreements(&path).unwrap_err();
        assert!(err.to_string().contains("is not a JSON array of agreements"));
    }

    #[test]
    fn read_text_prefers_inline() {
        assert_eq!(read_text(Some("inline"), None).unwrap(), "inline");

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("contract.txt");
        std::fs::write(&path, "from file").expect("write");
        let path = path.to_string_lossy();
        assert_eq!(read_text(None, Some(&path)).unwrap(), "from file");
        assert!(read_text(None, None).is_err());
    }
}
