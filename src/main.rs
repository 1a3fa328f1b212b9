//! Library Management terminal client
//!
//! Renders a routed page (`--path`) or runs one account or borrowing action.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_client::{
    config::AppConfig,
    models::auth::RegistrationForm,
    pages::{
        book_details::BookDetailsPage, borrow_history::BorrowHistoryPage, catalog::CatalogPage,
        login::LoginPage, member_dashboard::MemberDashboardPage, register::RegisterPage, Outcome,
        Page,
    },
    session::FileSessionStore,
    ui::{footer, Navbar, Prompt, TerminalPrompt},
    App,
};

#[derive(Debug, Parser)]
#[command(name = "library-client", version, about = "Terminal client for the library management API")]
struct Cli {
    /// Page to render, e.g. /books or /admin/members
    #[arg(long, default_value = "/")]
    path: String,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long)]
    yes: bool,

    /// Override the API base URL
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login {
        username: String,
        /// Asked for interactively when omitted
        #[arg(long)]
        password: Option<String>,
    },
    Logout,
    /// Create a member account (pending approval)
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Borrow a copy of a book, optionally from a given library
    Borrow {
        book_id: i64,
        #[arg(long)]
        library: Option<i64>,
    },
    Renew {
        borrow_id: i64,
    },
    Return {
        borrow_id: i64,
    },
    /// Show the logged-in user
    Whoami,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_tracing(&config);
    tracing::debug!("Library client v{} using {}", env!("CARGO_PKG_VERSION"), config.api.base_url);

    let store = FileSessionStore::open(&config.session.path)
        .with_context(|| format!("Failed to open session file {}", config.session.path.display()))?;
    let app = App::new(config, Arc::new(store)).context("Failed to create API client")?;
    app.auth.initialize().await;

    let prompt: Arc<dyn Prompt> = Arc::new(TerminalPrompt::new(cli.yes));

    match cli.command {
        None => render(&app, &cli.path, prompt).await,
        Some(command) => run(&app, command, prompt).await,
    }
}

/// Logs go to stderr so page output stays clean
fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_client={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn render(app: &App, path: &str, prompt: Arc<dyn Prompt>) -> anyhow::Result<()> {
    let (_, page) = app.open(path, prompt).await;
    let user = app.auth.user();

    println!("{}", Navbar::for_user(user.as_ref()).render());
    println!();
    println!("{}", page.render());
    println!("{}", footer::current());
    Ok(())
}

async fn run(app: &App, command: Command, prompt: Arc<dyn Prompt>) -> anyhow::Result<()> {
    let ctx = app.context(prompt.clone());

    match command {
        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt.input("Password:").unwrap_or_default(),
            };
            let mut page = LoginPage::new(ctx);
            page.username = username;
            page.password = password;
            if page.submit().await.is_err() {
                println!("{}", page.render());
                anyhow::bail!("Login failed");
            }
            if let Some(user) = app.auth.user() {
                println!("Logged in as {} ({})", user.display_name(), user.user_type);
            }
        }
        Command::Logout => {
            app.auth.logout().await?;
            app.navigator.redirect("/");
            println!("Logged out");
        }
        Command::Register {
            first_name,
            last_name,
            username,
            email,
            phone,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt.input("Password:").unwrap_or_default(),
            };
            let confirm_password = prompt.input("Confirm password:").unwrap_or_default();
            let mut page = RegisterPage::new(ctx);
            page.form = RegistrationForm {
                first_name,
                last_name,
                username,
                email,
                phone,
                password,
                confirm_password,
            };
            if page.submit().await.is_err() {
                println!("{}", page.render());
                anyhow::bail!("Registration failed");
            }
            println!("{}", page.render());
        }
        Command::Borrow { book_id, library } => {
            let outcome = match library {
                Some(library_id) => {
                    let mut page = CatalogPage::new(ctx);
                    page.load().await?;
                    page.borrow(book_id, library_id).await?
                }
                None => {
                    let mut page = BookDetailsPage::new(ctx, book_id);
                    page.load().await?;
                    page.borrow().await?
                }
            };
            report(outcome, "Borrow");
        }
        Command::Renew { borrow_id } => {
            let mut page = BorrowHistoryPage::new(ctx);
            page.load().await?;
            report(page.renew(borrow_id).await?, "Renewal");
        }
        Command::Return { borrow_id } => {
            let mut page = MemberDashboardPage::new(ctx);
            page.load().await?;
            let outcome = page.return_book(borrow_id).await?;
            if outcome == Outcome::Done {
                println!("Book returned successfully!");
            }
            report(outcome, "Return");
        }
        Command::Whoami => match app.auth.user() {
            Some(user) => println!(
                "{} ({}) #{} {}",
                user.display_name(),
                user.username,
                user.id,
                user.user_type
            ),
            None => println!("Not logged in"),
        },
    }

    let location = app.navigator.current();
    if location != "/" {
        tracing::debug!("Ended on {}", location);
    }
    Ok(())
}

fn report(outcome: Outcome, action: &str) {
    if outcome == Outcome::Cancelled {
        println!("{} cancelled", action);
    }
}
