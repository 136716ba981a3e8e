use lex_ai::AgreementContext;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AiCommands;
use crate::commands::shared::input::read_text;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DraftResponse {
    clause: String,
    text: String,
}

/// Handle `lex ai`.
pub async fn handle(
    action: &AiCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.drafting_service()?;
    match action {
        AiCommands::Draft {
            clause,
            title,
            counterparty,
            kind,
        } => {
            let context = AgreementContext {
                title: title.clone(),
                counterparty: counterparty.clone(),
                kind: kind.clone(),
            };
            let text = service.draft_clause(clause, &context).await;
            output(
                &DraftResponse {
                    clause: clause.clone(),
                    text,
                },
                flags.format,
            )
        }
        AiCommands::Risk { text, file } => {
            let text = read_text(text.as_deref(), file.as_deref())?;
            output(&service.analyze_risk(&text).await, flags.format)
        }
    }
}
