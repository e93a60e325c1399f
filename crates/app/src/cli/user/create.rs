use clap::Args;
use rugs_app::{
    database::{self, Db},
    domain::users::{
        PgUsersService, UsersService, UsersServiceError, data::NewUser, records::UserUuid,
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    /// Initial password
    #[arg(long, env = "RUGS_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Grant staff (administrator) rights
    #[arg(long)]
    staff: bool,

    /// Opt the account out of all store emails
    #[arg(long)]
    no_emails: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let user = service
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: args.username,
            email: args.email,
            password: args.password,
            is_staff: args.staff,
            receive_emails_order_updates: !args.no_emails,
            receive_emails_new_items: !args.no_emails,
        })
        .await
        .map_err(|error| match error {
            UsersServiceError::Validation(errors) => format!("failed to create user: {errors}"),
            other => format!("failed to create user: {other}"),
        })?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("is_staff: {}", user.is_staff);

    Ok(())
}
