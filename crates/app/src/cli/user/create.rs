use clap::Args;
use dispensary_app::{
    auth::{AuthService, NewUser, SqliteAuthService},
    database::{self, Db},
};

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Sign-in email address
    #[arg(long)]
    email: String,

    /// Plaintext password, hashed before storage
    #[arg(long, env = "DISPENSARY_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://dispensary.db")]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if !(2..=100).contains(&args.name.trim().chars().count()) {
        return Err("name must be between 2 and 100 characters".to_string());
    }

    if !args.email.contains('@') {
        return Err("email must be a valid address".to_string());
    }

    if args.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(format!(
            "password must be at least {MIN_PASSWORD_CHARS} characters"
        ));
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    let service = SqliteAuthService::new(Db::new(pool));

    let user = service
        .register(NewUser {
            name: args.name,
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);

    Ok(())
}
