//! dailybrew operator CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use dailybrew_app::{
    auth::PgAuthService,
    database::{self, Db},
    domain::users::{
        models::{NewUser, Role, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Parser)]
#[command(name = "dailybrew-app", about = "dailybrew CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(DbCommand),
    User(UserCommand),
    Token(TokenCommand),
}

#[derive(Debug, Args)]
struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending migrations.
    Migrate(DatabaseArgs),
}

#[derive(Debug, Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Issue(IssueTokenArgs),
    Revoke(RevokeTokenArgs),
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Email address
    #[arg(long)]
    email: String,

    /// Phone number
    #[arg(long)]
    phone: Option<String>,

    /// Account role
    #[arg(long, value_enum, default_value = "customer")]
    role: RoleArg,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum RoleArg {
    Customer,
    Staff,
    Admin,
    SuperAdmin,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Customer => Self::Customer,
            RoleArg::Staff => Self::Staff,
            RoleArg::Admin => Self::Admin,
            RoleArg::SuperAdmin => Self::SuperAdmin,
        }
    }
}

#[derive(Debug, Args)]
struct IssueTokenArgs {
    /// User the token belongs to
    #[arg(long)]
    user_uuid: Uuid,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Args)]
struct RevokeTokenArgs {
    /// Token to revoke
    #[arg(long)]
    token_uuid: Uuid,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Db(DbCommand {
            command: DbSubcommand::Migrate(args),
        }) => migrate(args).await,
        Commands::User(UserCommand {
            command: UserSubcommand::Create(args),
        }) => create_user(args).await,
        Commands::Token(TokenCommand {
            command: TokenSubcommand::Issue(args),
        }) => issue_token(args).await,
        Commands::Token(TokenCommand {
            command: TokenSubcommand::Revoke(args),
        }) => revoke_token(args).await,
    }
}

async fn migrate(args: DatabaseArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}

async fn create_user(args: CreateUserArgs) -> Result<(), String> {
    let pool = connect(&args.database.database_url).await?;
    let db = Db::new(pool);

    let mut tx = db
        .begin()
        .await
        .map_err(|error| format!("failed to begin transaction: {error}"))?;

    let user = PgUsersRepository::new()
        .create_user(
            &mut tx,
            &NewUser {
                uuid: UserUuid::new(),
                name: args.name,
                email: args.email,
                phone: args.phone,
                role: args.role.into(),
            },
        )
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    tx.commit()
        .await
        .map_err(|error| format!("failed to commit: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_name: {}", user.name);
    println!("user_role: {}", user.role);

    Ok(())
}

async fn issue_token(args: IssueTokenArgs) -> Result<(), String> {
    let pool = connect(&args.database.database_url).await?;

    let issued = PgAuthService::new(pool)
        .issue_token(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("token_uuid: {}", issued.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

async fn revoke_token(args: RevokeTokenArgs) -> Result<(), String> {
    let pool = connect(&args.database.database_url).await?;

    let revoked = PgAuthService::new(pool)
        .revoke_token(args.token_uuid)
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    if revoked {
        println!("token revoked");
    } else {
        println!("token was not active");
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<sqlx::PgPool, String> {
    database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}
