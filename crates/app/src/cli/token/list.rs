use clap::Args;
use jiff::Timestamp;
use rugs_app::{auth::PgAuthService, database};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User whose tokens should be listed
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let tokens = PgAuthService::new(pool, None)
        .list_api_tokens(args.user_uuid.into())
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for user {}", args.user_uuid);
        return Ok(());
    }

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("token_version: {}", token.version.as_i16());
        println!("created_at: {}", token.created_at);
        println!("last_used_at: {}", or_label(token.last_used_at, "never"));
        println!("expires_at: {}", or_label(token.expires_at, "none"));
        println!("revoked_at: {}", or_label(token.revoked_at, "active"));
        println!();
    }

    Ok(())
}

fn or_label(value: Option<Timestamp>, label: &str) -> String {
    value.map_or_else(|| label.to_string(), |value| value.to_string())
}
