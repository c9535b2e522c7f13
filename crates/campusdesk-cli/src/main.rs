use anyhow::Context;
use campusdesk_cli::{CreateUserInput, MIN_PASSWORD_LEN, create_user, role_table_lines, set_user_active};
use campusdesk_core::Role;
use campusdesk_db::{CredentialStore, PgCredentialStore, init_db_pool, run_migrations};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campusdesk-cli")]
#[command(about = "CampusDesk CLI - User administration for CampusDesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account (prompts for anything not given)
    CreateUser {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Role, e.g. SUPER_ADMIN or TEACHER
        #[arg(short = 'r', long)]
        role: Option<Role>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// List all user accounts
    ListUsers,
    /// Disable login for an account
    DeactivateUser {
        #[arg(short = 'e', long)]
        email: String,
    },
    /// Re-enable login for an account
    ActivateUser {
        #[arg(short = 'e', long)]
        email: String,
    },
    /// Print the role to capability table
    ListRoles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    if let Commands::ListRoles = cli.command {
        for line in role_table_lines() {
            println!("{}", line);
        }
        return Ok(());
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await?;
    let store = PgCredentialStore::new(pool);

    match cli.command {
        Commands::CreateUser {
            name,
            email,
            role,
            password,
        } => handle_create_user(&store, name, email, role, password).await,
        Commands::ListUsers => handle_list_users(&store).await,
        Commands::DeactivateUser { email } => handle_set_active(&store, &email, false).await,
        Commands::ActivateUser { email } => handle_set_active(&store, &email, true).await,
        Commands::ListRoles => Ok(()),
    }
}

async fn handle_create_user(
    store: &dyn CredentialStore,
    name: Option<String>,
    email: Option<String>,
    role: Option<Role>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let role = match role {
        Some(role) => role,
        None => {
            let labels: Vec<&str> = Role::ALL.iter().map(Role::label).collect();
            let index = Select::new()
                .with_prompt("Role")
                .items(&labels)
                .default(0)
                .interact()?;
            Role::ALL[index]
        }
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt(format!("Password (min {} characters)", MIN_PASSWORD_LEN))
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let user = create_user(
        store,
        CreateUserInput {
            name,
            email,
            role,
            password,
        },
    )
    .await
    .map_err(|e| e.error)?;

    println!("\n✅ User created successfully!");
    println!("   Email: {}", user.email);
    println!("   Name: {}", user.name);
    println!("   Role: {}", user.role.label());
    Ok(())
}

async fn handle_list_users(store: &dyn CredentialStore) -> anyhow::Result<()> {
    let users = store.list().await.map_err(|e| e.error)?;

    if users.is_empty() {
        println!("No users yet. Create one with `campusdesk-cli create-user`.");
        return Ok(());
    }

    for user in users {
        println!(
            "{:<36}  {:<14}  {:<8}  {} <{}>",
            user.id,
            user.role.as_str(),
            if user.is_active { "active" } else { "disabled" },
            user.name,
            user.email
        );
    }
    Ok(())
}

async fn handle_set_active(
    store: &dyn CredentialStore,
    email: &str,
    is_active: bool,
) -> anyhow::Result<()> {
    let user = set_user_active(store, email, is_active)
        .await
        .map_err(|e| e.error)?;

    if is_active {
        println!("✅ {} can log in again", user.email);
    } else {
        println!("✅ {} has been deactivated", user.email);
    }
    Ok(())
}
