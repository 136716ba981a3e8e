use std::path::Path;

use lex_core::analytics::PortfolioSummary;
use lex_core::entities::Agreement;
use lex_core::enums::AgreementStatus;
use lex_core::errors::CoreError;
use lex_core::filter::AgreementFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AgreementsCommands;
use crate::commands::shared::input::{load_agreements, save_agreements};
use crate::commands::shared::parse::parse_enum;
use crate::output::output;

/// Handle `lex agreements`.
pub fn handle(action: &AgreementsCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AgreementsCommands::List {
            file,
            status,
            search,
        } => {
            let agreements = load_agreements(Path::new(file))?;
            let filter = AgreementFilter {
                status: status
                    .as_deref()
                    .map(|raw| parse_enum::<AgreementStatus>(raw, "status"))
                    .transpose()?,
                search: search.clone().unwrap_or_default(),
            };
            output(&filter.apply(&agreements), flags.format)
        }
        AgreementsCommands::Analytics { file } => {
            let agreements = load_agreements(Path::new(file))?;
            output(&PortfolioSummary::from_agreements(&agreements), flags.format)
        }
        AgreementsCommands::Transition { file, id, to } => {
            let path = Path::new(file);
            let mut agreements = load_agreements(path)?;
            let next = parse_enum::<AgreementStatus>(to, "status")?;
            let updated = transition(&mut agreements, id, next)?;
            save_agreements(path, &agreements)?;
            output(&updated, flags.format)
        }
    }
}

fn transition(
    agreements: &mut [Agreement],
    id: &str,
    next: AgreementStatus,
) -> Result<Agreement, CoreError> {
    let agreement = agreements
        .iter_mut()
        .find(|agreement| agreement.id == id)
        .ok_or_else(|| CoreError::NotFound {
            entity_type: "agreement".into(),
            id: id.into(),
        })?;
    agreement.transition_to(next)?;
    tracing::debug!(id, status = %next, "agreement transitioned");
    Ok(agreement.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agreement(id: &str, status: AgreementStatus) -> Agreement {
        Agreement {
            id: id.into(),
            title: "Mutual NDA".into(),
            counterparty: "Globex".into(),
            kind: "NDA".into(),
            status,
            value: 0,
            owner: None,
            effective_date: None,
            expiry_date: None,
            risk: None,
        }
    }

    #[test]
    fn transition_updates_matching_agreement() {
        let mut agreements = vec![
            agreement("agr-1", AgreementStatus::Draft),
            agreement("agr-2", AgreementStatus::Approved),
        ];
        let updated = transition(&mut agreements, "agr-2", AgreementStatus::Active).unwrap();
        assert_eq!(updated.status, AgreementStatus::Active);
        assert_eq!(agreements[1].status, AgreementStatus::Active);
        assert_eq!(agreements[0].status, AgreementStatus::Draft);
    }

    #[test]
    fn transition_unknown_id() {
        let mut agreements = vec![agreement("agr-1", AgreementStatus::Draft)];
        let err = transition(&mut agreements, "agr-9", AgreementStatus::Review).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn transition_rejects_illegal_move() {
        let mut agreements = vec![agreement("agr-1", AgreementStatus::Draft)];
        let err = transition(&mut agreements, "agr-1", AgreementStatus::Active).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert_eq!(agreements[0].status, AgreementStatus::Draft);
    }
}
