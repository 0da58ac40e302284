//! Subcommand handlers. Each returns the process exit code; an error
//! outcome from the service is reported, not raised.

use std::path::Path;
use std::process::ExitCode;

use diagnosense_client::session::DiagnosisSession;
use diagnosense_client::transport::HttpTransport;
use diagnosense_core::chart::{ChartData, chart_data};
use diagnosense_core::disease::{Disease, DiseaseId, all_diseases};
use diagnosense_core::form::{CKD_FIELDS, CkdForm, DiagnosisForm, UploadForm};
use diagnosense_core::models::outcome::Outcome;
use diagnosense_core::models::upload::UploadFile;
use diagnosense_export::styles::ChartStyles;
use diagnosense_export::{html, text};
use eyre::WrapErr;
use serde::Serialize;

use crate::cli::{Cli, Commands, ConfigCommand, OutputArgs};
use crate::config::{self, API_URL_ENV, CliConfig};

pub async fn run(cli: &Cli) -> eyre::Result<ExitCode> {
    match &cli.command {
        Commands::List => {
            print!("{}", catalog());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fields => {
            print!("{}", fields_listing());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Ckd(args) => {
            let mut session = DiagnosisSession::new(CkdForm::default());
            for (field, value) in args.fields() {
                session.set_field(field, value)?;
            }
            submit(cli, session, &args.output).await
        }
        Commands::Pneumonia(args) => {
            let form = upload_form(UploadForm::pneumonia(), args.image.as_deref())?;
            submit(cli, DiagnosisSession::new(form), &args.output).await
        }
        Commands::Prostate(args) => {
            let form = upload_form(UploadForm::prostate_cancer(), args.file.as_deref())?;
            submit(cli, DiagnosisSession::new(form), &args.output).await
        }
        Commands::Config(args) => config_command(cli, &args.command),
    }
}

/// One line per predictor, as listed on the home page.
pub fn catalog() -> String {
    let diseases = all_diseases();
    let width = diseases.iter().map(|d| d.title().len()).max().unwrap_or(0);
    diseases
        .iter()
        .map(|d| format!("{:<width$}  {:<17} {}\n", d.title(), d.route(), d.description()))
        .collect()
}

/// One line per CKD input: flag, label, input kind, default and hint.
pub fn fields_listing() -> String {
    let width = CKD_FIELDS.iter().map(|f| f.label.len()).max().unwrap_or(0);
    CKD_FIELDS
        .iter()
        .map(|f| {
            format!(
                "--{:<5} {:<width$}  {:<11} default {:<6} {}\n",
                f.name,
                f.label,
                f.kind.describe(),
                f.default,
                f.hint
            )
        })
        .collect()
}

fn upload_form(mut form: UploadForm, path: Option<&Path>) -> eyre::Result<UploadForm> {
    let file = path
        .map(|p| UploadFile::read(p).wrap_err_with(|| format!("failed to read {}", p.display())))
        .transpose()?;
    form.select_file(file);
    Ok(form)
}

fn stored_config() -> eyre::Result<Option<CliConfig>> {
    match config::config_path() {
        Ok(path) => config::load_config(&path),
        Err(e) => {
            tracing::debug!(error = %e, "no config directory; using defaults");
            Ok(None)
        }
    }
}

fn transport(cli: &Cli) -> eyre::Result<HttpTransport> {
    let file = stored_config()?;
    let env = std::env::var(API_URL_ENV).ok();
    let settings =
        config::client_config(cli.api_url.as_deref(), env.as_deref(), file.as_ref(), cli.timeout);
    Ok(HttpTransport::new(&settings)?)
}

async fn submit<F: DiagnosisForm>(
    cli: &Cli,
    mut session: DiagnosisSession<F>,
    output: &OutputArgs,
) -> eyre::Result<ExitCode> {
    let transport = transport(cli)?;
    let disease = session.disease();
    let outcome = session.submit(&transport).await?;
    let rendered = render(disease, outcome, output)?;
    print!("{}", rendered.stdout);
    Ok(rendered.exit_code())
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    disease: DiseaseId,
    outcome: &'a Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    charts: Option<ChartData>,
}

/// What a submission prints, and whether it counts as a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub stdout: String,
    pub success: bool,
}

impl Rendered {
    pub fn exit_code(&self) -> ExitCode {
        if self.success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    }
}

/// Render an outcome for the terminal, writing the HTML page first when
/// `--html` was given. Error outcomes are rendered, then reported as failure.
pub fn render(disease: &dyn Disease, outcome: &Outcome, output: &OutputArgs) -> eyre::Result<Rendered> {
    if let Some(path) = &output.html {
        write_html(disease, outcome, path)?;
    }

    let stdout = if output.json {
        let doc = JsonOutput {
            disease: disease.id(),
            outcome,
            charts: outcome.report().map(|r| chart_data(disease, r)),
        };
        let mut json = serde_json::to_string_pretty(&doc)?;
        json.push('\n');
        json
    } else {
        text::render_outcome(disease, outcome)
    };

    Ok(Rendered {
        stdout,
        success: outcome.report().is_some(),
    })
}

fn write_html(disease: &dyn Disease, outcome: &Outcome, path: &Path) -> eyre::Result<()> {
    let page = html::render_page(disease, outcome, &ChartStyles::default())?;
    std::fs::write(path, page).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote HTML report");
    Ok(())
}

fn config_command(cli: &Cli, command: &ConfigCommand) -> eyre::Result<ExitCode> {
    let path = config::config_path()?;

    match command {
        ConfigCommand::Show => {
            let file = config::load_config(&path)?;
            let env = std::env::var(API_URL_ENV).ok();
            let (effective_url, source) =
                config::resolve_base_url(cli.api_url.as_deref(), env.as_deref(), file.as_ref());
            let doc = serde_json::json!({
                "path": path.display().to_string(),
                "config": file,
                "effective_api_url": effective_url,
                "source": source,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        ConfigCommand::SetUrl { url } => {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(eyre::eyre!("expected an http:// or https:// URL, got {url:?}"));
            }
            let mut updated = config::load_config(&path)?.unwrap_or_default();
            updated.api_base_url = url.trim_end_matches('/').to_string();
            updated.updated_at = jiff::Timestamp::now();
            config::save_config(&path, &updated)?;
            println!("API URL set to {}", updated.api_base_url);
        }
        ConfigCommand::Reset => {
            if config::delete_config(&path)? {
                println!("Removed {}", path.display());
            } else {
                println!("No config at {}", path.display());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
