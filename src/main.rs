use clap::Parser;
use docgen_client::app::build_submitter;
use docgen_client::config::cli::{form_from_fields, LogFormat};
use docgen_client::core::health::check_health;
use docgen_client::utils::{logger, validation::Validate};
use docgen_client::config::Command;
use docgen_client::{CliConfig, DispatchOutcome, PreparedRequest, ResolvedApi, TomlConfig};

const EXIT_CONFIG_ERROR: i32 = 1;
const EXIT_REQUEST_FAILED: i32 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Logging first, so config errors are recorded too
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }

    tracing::info!("Starting docgen-client");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // Load the file (if any), apply flags, validate
    let config = match load_and_validate(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {} (Severity: {:?})", e, e.severity());
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    // Resolve the API base once and wire saver + notifier
    let submitter = build_submitter(&config);

    match &cli.command {
        Command::Submit {
            kind,
            fields,
            dry_run,
        } => {
            let form = form_from_fields(fields);

            if *dry_run {
                tracing::info!("🔍 DRY RUN MODE - nothing will be sent");
                let prepared = submitter.prepare(*kind, &form);
                print_prepared(&prepared, submitter.dispatcher().api())?;
                return Ok(());
            }

            // Failures were already shown to the user; only the exit code is left
            match submitter.submit(*kind, &form).await {
                DispatchOutcome::Saved(saved) => {
                    println!("✅ Saved {}", saved.path.display());
                }
                DispatchOutcome::Failed => std::process::exit(EXIT_REQUEST_FAILED),
            }
        }
        Command::Health => {
            let dispatcher = submitter.dispatcher();
            match check_health(dispatcher.client(), dispatcher.api()).await {
                Ok(status) if status.is_ok() => {
                    println!("✅ {} is up", dispatcher.api().base_url());
                }
                Ok(status) => {
                    eprintln!(
                        "⚠️  {} reported status '{}'",
                        dispatcher.api().base_url(),
                        status.status
                    );
                    std::process::exit(EXIT_REQUEST_FAILED);
                }
                Err(e) => {
                    tracing::error!("❌ Health check failed: {}", e);
                    eprintln!("❌ {}", e.user_friendly_message());
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(EXIT_REQUEST_FAILED);
                }
            }
        }
    }

    Ok(())
}

fn load_and_validate(cli: &CliConfig) -> docgen_client::Result<TomlConfig> {
    let config = cli.load_config()?;
    config.validate()?;
    Ok(config)
}

fn print_prepared(prepared: &PreparedRequest, api: &ResolvedApi) -> anyhow::Result<()> {
    let mut url = url::Url::parse(&prepared.target.resolve(api))?;
    if !prepared.options.query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(prepared.options.query.iter());
    }

    println!("{} {}", prepared.method(), url);
    if let Some(body) = &prepared.options.body {
        println!("{}", serde_json::to_string_pretty(body)?);
    }
    println!("suggested filename: {}", prepared.suggested_filename);
    Ok(())
}
