use clap::Args;
use jiff::SignedDuration;
use rugs_app::{
    auth::{AuthService, PgAuthService},
    database,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User the token authenticates as
    #[arg(long)]
    user_uuid: Uuid,

    /// Token lifetime in hours; 0 issues a token that never expires
    #[arg(long, default_value_t = 10)]
    ttl_hours: u32,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let ttl = (args.ttl_hours > 0).then(|| SignedDuration::from_hours(i64::from(args.ttl_hours)));

    let issued = PgAuthService::new(pool, ttl)
        .issue_token(args.user_uuid.into())
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("user_uuid: {}", issued.metadata.user_uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
