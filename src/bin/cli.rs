use accounting_system::{
    auth::{Argon2Hashing, PasswordHashing},
    client::{
        self, validation::is_strong_password, AppStore, ClientState, ClientStorage, FormState,
        HttpAccountApi, JsonFileStorage, LoginForm, LoginInput, SignupForm, SignupInput,
    },
    config::{ClientConfig, ServerConfig},
    db,
    models::NewUser,
    services::AddUserOutcome,
    AppState,
};
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "accounting-cli")]
#[command(about = "Manage accounting-system accounts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account administration against the database
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Create an account through the API
    Signup {
        /// Company name
        #[arg(short, long)]
        company: String,

        /// Email address
        #[arg(short, long)]
        email: String,
    },

    /// Log in through the API
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Keep the session for 30 days
        #[arg(long)]
        remember_me: bool,
    },

    /// Clear the local login flags
    Logout,
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new account
    Create {
        /// Company name
        #[arg(short, long)]
        company: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Show the account registered under an email
    Show {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
}

fn get_password(prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
    use std::io::{self, Write};
    print!("{}: ", prompt);
    io::stdout().flush()?;

    Ok(rpassword::read_password()?)
}

fn confirm_password(prompt: &str) -> Result<(String, String), Box<dyn std::error::Error>> {
    let password = get_password(prompt)?;
    let confirm = get_password("Confirm password")?;
    Ok((password, confirm))
}

fn local_store(storage: &dyn ClientStorage) -> Result<AppStore, Box<dyn std::error::Error>> {
    Ok(AppStore::new(ClientState {
        is_login: storage.flag(client::storage::IS_LOGIN)?,
    }))
}

fn report(state: &FormState) {
    match state {
        FormState::Success { navigation, message } => {
            if let Some(message) = message {
                println!("✅ {}", message);
            }
            println!("→ {}", navigation.path);
        }
        FormState::Failed(reason) => {
            eprintln!("❌ {}", reason.message());
            std::process::exit(1);
        }
        FormState::Invalid(errors) => {
            for error in errors {
                eprintln!("❌ {:?}: {}", error.field, error.message);
            }
            std::process::exit(1);
        }
        FormState::Idle | FormState::Submitting => {}
    }
}

async fn run_user_command(command: UserCommands) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    let state = AppState::new(pool);

    match command {
        UserCommands::Create {
            company,
            email,
            password,
        } => {
            let (password, password_confirm) = if let Some(pw) = password {
                (pw.clone(), pw)
            } else {
                confirm_password("Password")?
            };

            if password != password_confirm {
                eprintln!("❌ Passwords do not match");
                std::process::exit(1);
            }
            if !is_strong_password(&password) {
                eprintln!("❌ Password must be 8-20 characters with upper and lower case letters, a number and a special character");
                std::process::exit(1);
            }

            let request = NewUser {
                company_name: company,
                email: email.clone(),
                password: Argon2Hashing.hash_with_new_salt(&password)?,
            };

            match state.account_service.add_user(request).await {
                Ok(AddUserOutcome::Created(id)) => {
                    println!("✅ Account created successfully!");
                    println!("  ID: {}", id);
                    println!("  Email: {}", email);
                }
                Ok(AddUserOutcome::DuplicateEmail) => {
                    eprintln!("❌ An account already exists for '{}'", email);
                    std::process::exit(1);
                }
                Err(err) => {
                    eprintln!("❌ Failed to create account: {}", err);
                    std::process::exit(1);
                }
            }
        }

        UserCommands::Show { email } => match state.account_service.get_user(&email).await {
            Ok(Some(user)) => {
                println!("{:<5} {:<30} {:<50}", "ID", "Email", "Company");
                println!("{}", "-".repeat(85));
                println!("{:<5} {:<30} {:<50}", user.id, user.email, user.company_name);
            }
            Ok(None) => {
                eprintln!("❌ Account '{}' not found", email);
                std::process::exit(1);
            }
            Err(err) => {
                eprintln!("❌ Failed to find account: {}", err);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accounting_system=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let command = match cli.command {
        Commands::User { command } => return run_user_command(command).await,
        other => other,
    };

    let config = ClientConfig::from_env()?;
    let api = Arc::new(HttpAccountApi::new(&config)?);
    let storage = Arc::new(JsonFileStorage::new(config.storage_path.clone()));
    let store = local_store(storage.as_ref())?;

    match command {
        Commands::Signup { company, email } => {
            let (password, confirm_password) = confirm_password("Password")?;
            let mut form = SignupForm::new(api, Arc::new(Argon2Hashing));
            let state = form
                .submit(SignupInput {
                    company_name: company,
                    email,
                    password,
                    confirm_password,
                })
                .await;
            report(state);
        }
        Commands::Login { email, remember_me } => {
            let password = get_password("Password")?;
            let mut form = LoginForm::new(api, storage, store.clone());
            let state = form
                .submit(LoginInput {
                    email,
                    password,
                    remember_me,
                })
                .await;
            report(state);
        }
        Commands::Logout => {
            let navigation = client::logout(storage.as_ref(), &store);
            println!("✅ Logged out");
            println!("→ {}", navigation.path);
        }
        Commands::User { .. } => {}
    }

    Ok(())
}
