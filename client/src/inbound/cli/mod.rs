//! Command-line inbound adapter.
//!
//! Each invocation builds one sign-in form, submits it, and prints the
//! outcome. A successful sign-in renders the home screen.

mod navigator;
mod render;

use std::io::{self, Write};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::config::{ClientSettings, SettingsError};
use crate::domain::ports::{AuthBackend, FixtureAuthBackend, Route, StorageError};
use crate::domain::{AuthenticationService, FormMode, HomeView, SignInForm};
use crate::outbound::baas::{BaasHttpBackend, BaasSetupError};
use crate::outbound::directory::StaticChildDirectory;
use crate::outbound::storage::JsonFileStorage;

pub use navigator::TerminalNavigator;

const OFFLINE_USERNAME: &str = "demo";
const OFFLINE_PASSWORD: &str = "demo";

/// `sponsor` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sponsor",
    about = "Sign in to the sponsorship programme and browse supported children",
    version
)]
pub struct CliArgs {
    /// Use the built-in offline backend (account `demo` / `demo`).
    #[arg(long, global = true)]
    pub offline: bool,
    /// Emit logs as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations offered by the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in to an existing account.
    SignIn(FormArgs),
    /// Create a new account.
    SignUp(FormArgs),
    /// List the supported children.
    Children {
        /// Print records as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Form fields supplied on the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    /// Account username.
    #[arg(long, value_name = "name")]
    pub username: Option<String>,
    /// Account password.
    #[arg(long, value_name = "secret")]
    pub password: Option<String>,
}

/// Whether the command achieved what was asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The operation succeeded.
    Success,
    /// Validation or the backend rejected the submission.
    Rejected,
}

/// Failures that prevent a command from running at all.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings are incomplete or malformed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The HTTP adapter could not be built.
    #[error(transparent)]
    Setup(#[from] BaasSetupError),
    /// Credential storage could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Writing to the terminal failed.
    #[error("write output: {0}")]
    Output(#[from] io::Error),
}

/// Run one command, writing user-facing output to `out`.
///
/// # Errors
///
/// Returns [`CliError`] when adapters cannot be built or output cannot be
/// written. Rejected submissions are reported through [`RunStatus`].
pub async fn run<W: Write>(
    args: CliArgs,
    settings: &ClientSettings,
    out: &mut W,
) -> Result<RunStatus, CliError> {
    let (mode, fields) = match args.command {
        Command::Children { json } => {
            let children = child_directory::supported_children();
            if json {
                render::write_children_json(out, &children)?;
            } else {
                render::write_children(out, &children)?;
            }
            return Ok(RunStatus::Success);
        }
        Command::SignIn(fields) => (FormMode::LoggingIn, fields),
        Command::SignUp(fields) => (FormMode::SigningUp, fields),
    };

    if args.offline {
        let backend = Arc::new(FixtureAuthBackend::with_accounts([(
            OFFLINE_USERNAME,
            OFFLINE_PASSWORD,
        )]));
        submit_form(backend, settings, mode, fields, out).await
    } else {
        let backend = Arc::new(BaasHttpBackend::new(settings.baas_config()?)?);
        submit_form(backend, settings, mode, fields, out).await
    }
}

async fn submit_form<B, W>(
    backend: Arc<B>,
    settings: &ClientSettings,
    mode: FormMode,
    fields: FormArgs,
    out: &mut W,
) -> Result<RunStatus, CliError>
where
    B: AuthBackend + 'static,
    W: Write,
{
    let service = Arc::new(AuthenticationService::new(backend));
    let navigator = Arc::new(TerminalNavigator::default());
    let mut form = SignInForm::new(service.clone(), navigator.clone());
    if settings.remember_credentials {
        let storage = JsonFileStorage::open(&settings.storage_path())?;
        form = form.with_credential_memory(Arc::new(storage));
    }
    if let Some(username) = fields.username {
        form.set_username(username);
    }
    if let Some(password) = fields.password {
        form.set_password(password);
    }
    if form.mode() != mode {
        form.toggle_mode();
    }

    let outcome = form.submit().await;
    debug!(success = outcome.is_success(), "form submitted");
    if let Some(alert) = outcome.alert() {
        writeln!(out, "{alert}")?;
    }

    if navigator.current() == Some(Route::Home) {
        let active = service.active_user();
        let view = HomeView::new(active.as_ref(), &StaticChildDirectory);
        render::write_home(out, &view)?;
    }

    Ok(if outcome.is_success() {
        RunStatus::Success
    } else {
        RunStatus::Rejected
    })
}

#[cfg(test)]
mod tests {
    //! Offline end-to-end coverage for the CLI adapter.
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn settings() -> ClientSettings {
        ClientSettings {
            remember_credentials: false,
            base_url: None,
            app_key: None,
            app_secret: None,
            request_timeout_secs: None,
            storage_path: None,
        }
    }

    async fn run_offline(argv: &[&str], settings: &ClientSettings) -> (RunStatus, String) {
        let args = CliArgs::try_parse_from(argv.iter().copied()).expect("arguments parse");
        let mut out = Vec::new();
        let status = run(args, settings, &mut out).await.expect("command runs");
        (status, String::from_utf8(out).expect("utf-8 output"))
    }

    #[tokio::test]
    async fn offline_sign_in_renders_home() {
        let (status, output) = run_offline(
            &["sponsor", "--offline", "sign-in", "--username", "demo", "--password", "demo"],
            &settings(),
        )
        .await;
        assert_eq!(status, RunStatus::Success);
        assert!(output.starts_with("Welcome, demo!"), "output: {output}");
        assert!(output.contains("Amani Otieno"));
    }

    #[rstest]
    #[case(&["sponsor", "--offline", "sign-in", "--username", "a"], "Please Provide Password")]
    #[case(&["sponsor", "--offline", "sign-in", "--password", "pw"], "Please Provide Username")]
    #[case(
        &["sponsor", "--offline", "sign-up"],
        "Please Provide Both a Username and a Password"
    )]
    #[tokio::test]
    async fn missing_fields_are_rejected(#[case] argv: &[&str], #[case] expected: &str) {
        let (status, output) = run_offline(argv, &settings()).await;
        assert_eq!(status, RunStatus::Rejected);
        assert_eq!(output.trim(), expected);
    }

    #[tokio::test]
    async fn offline_wrong_password_names_the_user() {
        let (status, output) = run_offline(
            &["sponsor", "--offline", "sign-in", "--username", "demo", "--password", "nope"],
            &settings(),
        )
        .await;
        assert_eq!(status, RunStatus::Rejected);
        assert!(output.contains("demo"));
        assert!(!output.contains("Welcome"));
    }

    #[tokio::test]
    async fn offline_sign_up_reports_success_without_home() {
        let (status, output) = run_offline(
            &["sponsor", "--offline", "sign-up", "--username", "erin", "--password", "pw"],
            &settings(),
        )
        .await;
        assert_eq!(status, RunStatus::Success);
        assert_eq!(output.trim(), "Your account was successfully created.");
    }

    #[tokio::test]
    async fn offline_sign_up_of_demo_account_is_a_duplicate() {
        let (status, output) = run_offline(
            &["sponsor", "--offline", "sign-up", "--username", "demo", "--password", "x"],
            &settings(),
        )
        .await;
        assert_eq!(status, RunStatus::Rejected);
        assert!(output.contains("already taken"));
    }

    #[tokio::test]
    async fn remembered_credentials_fill_later_runs() {
        let dir = TempDir::new().expect("temp dir");
        let mut remembering = settings();
        remembering.remember_credentials = true;
        remembering.storage_path = Some(dir.path().join("creds.json"));

        let (first, _) = run_offline(
            &["sponsor", "--offline", "sign-in", "--username", "demo", "--password", "demo"],
            &remembering,
        )
        .await;
        assert_eq!(first, RunStatus::Success);

        let (second, output) =
            run_offline(&["sponsor", "--offline", "sign-in"], &remembering).await;
        assert_eq!(second, RunStatus::Success);
        assert!(output.starts_with("Welcome, demo!"));
    }

    #[tokio::test]
    async fn children_json_lists_five_records() {
        let (status, output) = run_offline(&["sponsor", "children", "--json"], &settings()).await;
        assert_eq!(status, RunStatus::Success);
        let records: serde_json::Value = serde_json::from_str(&output).expect("json output");
        assert_eq!(records.as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn online_mode_requires_app_credentials() {
        let args = CliArgs::try_parse_from(["sponsor", "sign-in", "--username", "a", "--password", "b"])
            .expect("arguments parse");
        let mut out = Vec::new();
        let err = run(args, &settings(), &mut out)
            .await
            .expect_err("missing app key must fail");
        assert!(matches!(err, CliError::Settings(SettingsError::MissingAppKey)));
    }
}
