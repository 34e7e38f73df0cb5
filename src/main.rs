use std::sync::Arc;

use agri_shell::config::{ConfigError, ShellConfig};
use agri_shell::net::api::SimulatedAuthApi;
use agri_shell::net::types::{AuthError, Role};
use agri_shell::pages::Toast;
use agri_shell::pages::login::{self, LoginForm};
use agri_shell::pages::register::{self, RegisterForm};
use agri_shell::pages::verify::{VerifyPage, verify_toast};
use agri_shell::routes::{GuardDecision, Navigation, navigate};
use agri_shell::state::auth::SessionStore;
use agri_shell::util::storage::FileStorage;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "agri-shell", about = "AgriAI dashboard session shell")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current session.
    Status,
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AGRI_PASSWORD")]
        password: String,
        /// Protected path to return to after signing in.
        #[arg(long)]
        from: Option<String>,
    },
    /// Request a sign-in link.
    Link {
        #[arg(long)]
        email: String,
    },
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "AGRI_PASSWORD")]
        password: String,
        /// One of "Farmer", "FPO Manager", "Agronomist".
        #[arg(long)]
        role: Role,
        #[arg(long, default_value = "")]
        organization: String,
    },
    /// Open a sign-in link token.
    Verify {
        #[arg(long)]
        token: Option<String>,
    },
    /// Sign out.
    Logout,
    /// Resolve a path against the current session.
    Open { path: String },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = ShellConfig::from_env()?;
    tracing::debug!(storage = %config.storage_path.display(), latency_ms = config.auth_latency.as_millis(), "config loaded");

    let store = SessionStore::new(
        Arc::new(SimulatedAuthApi::new(config.auth_latency)),
        Arc::new(FileStorage::new(&config.storage_path)),
    );
    store.initialize();

    match cli.command {
        Command::Status => print_status(&store),
        Command::Login { email, password, from } => {
            let form = LoginForm::new(email, password);
            let result = form.submit(&store, from.as_deref()).await;
            finish(login::submit_toast(&result), result.map(|to| println!("-> {to}")))
        }
        Command::Link { email } => {
            let mut form = LoginForm::new(email, "");
            let result = form.send_link(&store).await;
            finish(login::link_toast(&result), result)
        }
        Command::Register { name, email, password, role, organization } => {
            let form = RegisterForm { name, email, secret: password, role: Some(role), organization };
            let result = form.submit(&store).await;
            finish(register::submit_toast(&result), result.map(|to| println!("-> {to}")))
        }
        Command::Verify { token } => {
            let mut page = VerifyPage::new();
            let result = page.run(&store, token.as_deref()).await;
            finish(verify_toast(&result), result.map(|to| println!("-> {to}")))
        }
        Command::Logout => {
            store.logout();
            print_status(&store)
        }
        Command::Open { path } => {
            match navigate(&store.snapshot(), &path) {
                Navigation::Public(route) => println!("public {}", route.path()),
                Navigation::NotFound => println!("not found"),
                Navigation::Protected(GuardDecision::Loading) => println!("loading"),
                Navigation::Protected(GuardDecision::Redirect { to, from }) => println!("-> {to} (from {from})"),
                Navigation::Protected(GuardDecision::Render(path)) => println!("render {path}"),
            }
            Ok(())
        }
    }
}

fn print_status(store: &SessionStore) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
    Ok(())
}

fn finish(toast: Toast, result: Result<(), AuthError>) -> Result<(), CliError> {
    if toast.is_error() {
        eprintln!("{}: {}", toast.title, toast.description);
    } else {
        println!("{}: {}", toast.title, toast.description);
    }
    result.map_err(CliError::from)
}
