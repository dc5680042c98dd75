// src/main.rs
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{error, info};

use biodata_karyawan::config::Config;
use biodata_karyawan::handlers::admin_list::{AdminList, Confirm};
use biodata_karyawan::handlers::biodata_page::{BiodataPage, PageState, SubmitOutcome};
use biodata_karyawan::handlers::layout::Layout;
use biodata_karyawan::handlers::notice::Notice;
use biodata_karyawan::handlers::register_page::{RegisterOutcome, RegisterPage};
use biodata_karyawan::middleware::navigator::HistoryNavigator;
use biodata_karyawan::middleware::session::{FileCookieJar, Session, TokenStore, mask_token};
use biodata_karyawan::models::biodata::{BiodataRecord, EducationLevel};
use biodata_karyawan::models::user::DEFAULT_ROLE;
use biodata_karyawan::services::api_client::{ApiClient, ApiError};
use biodata_karyawan::utils::display::{detail_lines, format_currency, highest_education_label};

#[derive(Parser)]
#[command(name = "biodata-karyawan", version, about = "Employee biodata client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store a token and role issued by the login service
    Login {
        #[arg(long)]
        token: String,
        #[arg(long, default_value = DEFAULT_ROLE)]
        role: String,
    },
    Logout,
    /// Show the stored session and where it lands
    Whoami,
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Show your own biodata
    Me,
    /// Create or replace your biodata from a JSON file
    Submit { file: PathBuf },
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
enum AdminCommand {
    List(ListArgs),
    Show { id: String },
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, default_value = "")]
    nama: String,
    #[arg(long, default_value = "")]
    posisi: String,
    #[arg(long)]
    pendidikan: Option<EducationLevel>,
    #[arg(long, default_value_t = 1)]
    page: u32,
}

struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

struct App {
    config: Config,
    store: Arc<TokenStore<FileCookieJar>>,
    navigator: Arc<HistoryNavigator>,
    api: ApiClient,
}

impl App {
    fn new(config: Config) -> Self {
        let store = Arc::new(TokenStore::new(FileCookieJar::new(config.cookie_file.clone())));
        let navigator = Arc::new(HistoryNavigator::default());
        let api = ApiClient::from_config(&config, store.clone(), navigator.clone());
        Self {
            config,
            store,
            navigator,
            api,
        }
    }

    fn layout(&self) -> Layout {
        Layout::new(self.store.clone(), self.navigator.clone(), &self.config.login_path)
    }

    /// Turns a redirect to the login page into a readable failure.
    fn check_redirect(&self) -> Result<()> {
        if self.navigator.current().as_deref() == Some(self.config.login_path.as_str()) {
            bail!("not signed in (or the session expired); run `login` first");
        }
        Ok(())
    }

    fn api_failure(&self, e: ApiError, notice: Option<&Notice>) -> anyhow::Error {
        if e.is_unauthorized() {
            return anyhow::anyhow!("session expired; run `login` again");
        }
        match notice {
            Some(n) => anyhow::anyhow!("{} ({})", n.message, e),
            None => e.into(),
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

async fn run(app: App, command: Command) -> Result<()> {
    match command {
        Command::Login { token, role } => {
            app.store.set_auth(token.trim(), role.trim())?;
            info!("Session stored (token {})", mask_token(token.trim()));
            println!("Signed in as {}; home is {}", role.trim(), app.layout().landing());
        }
        Command::Logout => {
            app.layout().logout()?;
            println!("Signed out");
        }
        Command::Whoami => match app.store.current_token() {
            Some(token) => {
                let layout = app.layout();
                println!("token : {}", mask_token(&token));
                println!("role  : {}", app.store.user().map(|u| u.role).unwrap_or_default());
                println!("home  : {}", layout.landing());
                let nav: Vec<_> = layout.nav_items().iter().map(|i| i.label).collect();
                println!("menu  : {} | {} | Logout", layout.brand(), nav.join(" | "));
            }
            None => println!("Not signed in"),
        },
        Command::Signup {
            email,
            password,
            confirm,
        } => {
            let mut page = RegisterPage::new(app.api.clone());
            page.email = email;
            page.password = password;
            page.confirm_password = confirm;
            let outcome = page.submit().await;
            let message = page.notice().map(|n| n.message.clone()).unwrap_or_default();
            match outcome {
                Ok(RegisterOutcome::Registered) => println!("{}", message),
                Ok(RegisterOutcome::Invalid) => bail!(message),
                Err(e) => return Err(app.api_failure(e, page.notice())),
            }
        }
        Command::Me => {
            let mut page = BiodataPage::new(app.api.clone());
            if let Err(e) = page.initialize().await {
                return Err(app.api_failure(e, page.banner()));
            }
            app.check_redirect()?;
            match (page.state(), page.saved()) {
                (PageState::Viewing, Some(record)) => print_lines(&detail_lines(record)),
                _ => println!("No biodata yet; create one with `submit <file>`"),
            }
        }
        Command::Submit { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let record: BiodataRecord = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a biodata document", file.display()))?;

            let mut page = BiodataPage::new(app.api.clone());
            if let Err(e) = page.initialize().await {
                return Err(app.api_failure(e, page.banner()));
            }
            app.check_redirect()?;
            page.edit();
            page.form_mut().reset(Some(&record));

            match page.submit().await {
                Ok(SubmitOutcome::Saved) => {
                    if let Some(toast) = page.toast() {
                        println!("{}", toast.message);
                    }
                    if let Some(saved) = page.saved() {
                        print_lines(&detail_lines(saved));
                    }
                }
                Ok(SubmitOutcome::Invalid) => {
                    for (path, message) in page.form().errors().to_rendered() {
                        eprintln!("  {}: {}", path, message);
                    }
                    let summary = page.banner().map(|b| b.message.clone()).unwrap_or_default();
                    bail!(summary);
                }
                Err(e) => {
                    for (path, message) in page.form().errors().to_rendered() {
                        eprintln!("  {}: {}", path, message);
                    }
                    return Err(app.api_failure(e, page.banner()));
                }
            }
        }
        Command::Admin(admin) => run_admin(&app, admin).await?,
    }
    Ok(())
}

async fn run_admin(app: &App, command: AdminCommand) -> Result<()> {
    let mut list = AdminList::new(app.api.clone());
    if !app.store.is_authenticated() || !app.store.is_admin() {
        list.initialize().await.ok();
        bail!("admin access required; sign in with an ADMIN role");
    }

    match command {
        AdminCommand::List(args) => {
            {
                let filters = list.filters_mut();
                filters.name = args.nama;
                filters.position = args.posisi;
                filters.education = args.pendidikan;
            }
            if let Err(e) = list.search().await {
                return Err(app.api_failure(e, list.error()));
            }
            if args.page > 1 {
                if let Err(e) = list.go_to_page(args.page).await {
                    return Err(app.api_failure(e, list.error()));
                }
            }
            if list.records().is_empty() {
                println!("No biodata found");
            }
            for record in list.records() {
                let salary = record
                    .expected_salary_amount()
                    .map(format_currency)
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<26} {:<28} {:<20} {:<22} {}",
                    record.id.as_deref().unwrap_or("-"),
                    record.full_name,
                    record.position_applied,
                    highest_education_label(&record.education),
                    salary
                );
            }
            let window: Vec<String> = list
                .page_window()
                .iter()
                .map(|p| {
                    if *p == list.current_page() {
                        format!("[{}]", p)
                    } else {
                        p.to_string()
                    }
                })
                .collect();
            println!("Page {} of {}: {}", list.current_page(), list.total_pages(), window.join(" "));
        }
        AdminCommand::Show { id } => {
            if let Err(e) = list.view_details(&id).await {
                return Err(app.api_failure(e, list.error()));
            }
            if let Some(record) = list.selected() {
                print_lines(&detail_lines(record));
            }
        }
        AdminCommand::Delete { id, yes } => {
            let confirmed: Box<dyn Confirm> = if yes {
                Box::new(|_: &str| true)
            } else {
                Box::new(StdinConfirm)
            };
            match list.delete_record(&id, confirmed.as_ref()).await {
                Ok(true) => {
                    if let Some(n) = list.success() {
                        println!("{}", n.message);
                    }
                }
                Ok(false) => println!("Cancelled"),
                Err(e) => return Err(app.api_failure(e, list.error())),
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            eprintln!("error: {:#}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(App::new(config), cli.command).await {
        error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
