//! CLI entry point for the GPA calculator client.
//!
//! Provides subcommands for computing a weighted average locally, submitting
//! subjects to the remote calculator service, and managing the session with
//! the auth service.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use gpa_calc::account::{LoginForm, RegistrationForm};
use gpa_calc::config::Config;
use gpa_calc::contract::summaries_agree;
use gpa_calc::engine::GradeSummary;
use gpa_calc::fetch::{BasicClient, Bearer};
use gpa_calc::input::{parse_inline, read_csv_file, validate_all};
use gpa_calc::output::{
    Source, SummaryRecord, append_record, print_pretty, render_report, render_subjects, to_json,
};
use gpa_calc::roster::SubjectList;
use gpa_calc::services::{AuthApi, AuthClient, CalculatorApi, CalculatorClient};
use gpa_calc::token::TokenStore;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gpa_calc")]
#[command(about = "Weighted GPA calculator client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the weighted average locally
    Compute(SubjectArgs),
    /// Submit subjects to the calculator service
    Calculate(SubjectArgs),
    /// Log in and store the access token
    Login {
        /// Institutional email address
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create a student account
    Register {
        #[arg(long)]
        first_names: String,

        #[arg(long)]
        last_names: String,

        /// Institutional email address
        #[arg(long)]
        email: String,

        /// National identity document number
        #[arg(long)]
        national_id: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the stored access token
    Logout,
    /// Check that the auth and calculator services respond
    Health,
}

#[derive(Args)]
struct SubjectArgs {
    /// Subject as NAME:GRADE:CREDITS (repeatable)
    #[arg(short, long = "subject", value_name = "NAME:GRADE:CREDITS")]
    subjects: Vec<String>,

    /// CSV file with a name,grade,credits header
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// CSV file to append the summary to
    #[arg(long)]
    history: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let config = Config::from_env()?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = config
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = config
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("gpa_calc.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let tokens = TokenStore::new(&config.token_path);

    match cli.command {
        Commands::Compute(args) => {
            let list = load_subjects(&args)?;
            let summary = list.summary();
            info!(subjects = list.len(), average = summary.average, "Computed locally");
            emit(&list, &summary, &args, Source::Local)?;
        }
        Commands::Calculate(args) => {
            let list = load_subjects(&args)?;
            if list.is_empty() {
                bail!("no subjects given; use --subject or --file");
            }

            let http = BasicClient::with_timeout(config.http_timeout)?;
            let summary = match tokens.get()? {
                Some(token) => {
                    let api = CalculatorClient::new(
                        Bearer::new(http, &token)?,
                        &config.calculator_api_url,
                    );
                    submit(&api, &list).await?
                }
                None => {
                    warn!("Not logged in; calling the calculator without a token");
                    let api = CalculatorClient::new(http, &config.calculator_api_url);
                    submit(&api, &list).await?
                }
            };
            emit(&list, &summary, &args, Source::Remote)?;
        }
        Commands::Login { email, password } => {
            let request = LoginForm { email, password }.validate()?;
            let api = AuthClient::new(
                BasicClient::with_timeout(config.http_timeout)?,
                &config.auth_api_url,
            );
            let response = api.login(&request).await?;
            tokens.save(&response.access_token)?;
            println!("Logged in as {}", request.email);
        }
        Commands::Register {
            first_names,
            last_names,
            email,
            national_id,
            password,
            confirm_password,
        } => {
            let form = RegistrationForm {
                first_names,
                last_names,
                email,
                national_id,
                password,
                confirm_password,
            };
            let request = form.validate()?;
            let api = AuthClient::new(
                BasicClient::with_timeout(config.http_timeout)?,
                &config.auth_api_url,
            );
            let account = api.register(&request).await?;
            println!(
                "Registered {} {} <{}> (id {})",
                account.first_names, account.last_names, account.email, account.id
            );
        }
        Commands::Logout => {
            tokens.remove()?;
            println!("Logged out");
        }
        Commands::Health => {
            let auth = AuthClient::new(
                BasicClient::with_timeout(config.http_timeout)?,
                &config.auth_api_url,
            );
            let calculator = CalculatorClient::new(
                BasicClient::with_timeout(config.http_timeout)?,
                &config.calculator_api_url,
            );
            let (auth_ok, calculator_ok) = tokio::join!(auth.health(), calculator.health());

            info!(auth_ok, calculator_ok, "Health check complete");
            println!("auth       {}  {}", status_word(auth_ok), config.auth_api_url);
            println!(
                "calculator {}  {}",
                status_word(calculator_ok),
                config.calculator_api_url
            );
            println!(
                "session    {}",
                if tokens.is_authenticated() { "logged in" } else { "logged out" }
            );

            if !(auth_ok && calculator_ok) {
                bail!("one or more services are unavailable");
            }
        }
    }

    Ok(())
}

/// Collects subjects from `--subject` flags and `--file`, validating each.
fn load_subjects(args: &SubjectArgs) -> Result<SubjectList> {
    let mut drafts = args
        .subjects
        .iter()
        .map(|s| parse_inline(s))
        .collect::<Result<Vec<_>>>()?;

    if let Some(path) = &args.file {
        drafts.extend(read_csv_file(path)?);
    }

    Ok(validate_all(&drafts)?.into_iter().collect())
}

/// Submits the list and cross-checks the answer against the local engine.
async fn submit<A: CalculatorApi + Sync>(api: &A, list: &SubjectList) -> Result<GradeSummary> {
    let response = api.calculate(&list.payload()).await?;
    let remote = response.to_summary();
    let local = list.summary();

    if !summaries_agree(&remote, &local) {
        warn!(?remote, ?local, "Calculator service disagrees with the local average");
    }
    if !response.message.is_empty() {
        println!("{}", response.message);
    }
    Ok(remote)
}

fn emit(list: &SubjectList, summary: &GradeSummary, args: &SubjectArgs, source: Source) -> Result<()> {
    print_pretty(summary);
    if args.json {
        println!("{}", to_json(summary)?);
    } else {
        println!("{}", render_subjects(list));
        println!();
        println!("{}", render_report(summary));
    }

    if let Some(path) = &args.history {
        append_record(path, &SummaryRecord::new(summary, list.len(), source))?;
    }
    Ok(())
}

fn status_word(ok: bool) -> &'static str {
    if ok { "up  " } else { "down" }
}
