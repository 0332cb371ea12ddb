use anyhow::Context;
use clap::Parser;
use sat_tracker_init::core::registry::FileListingLoader;
use sat_tracker_init::core::{ConfigProvider, InitOutcome};
use sat_tracker_init::utils::error::ErrorSeverity;
use sat_tracker_init::utils::{logger, validation::Validate};
use sat_tracker_init::{BundledContext, CliConfig, DataContext, OrbitDataInitializer, TomlConfig};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ListedFile {
    name: String,
    bytes: u64,
}

#[derive(Debug, Serialize)]
struct Summary {
    #[serde(flatten)]
    outcome: InitOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<Vec<ListedFile>>,
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("failed to load configuration from {}", path))?,
        ),
        None => None,
    };

    let verbose = cli.verbose || file_config.as_ref().is_some_and(|c| c.verbose());
    let json_logs = cli.json_logs || file_config.as_ref().is_some_and(|c| c.json_logs());
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting sat-tracker-init");
    tracing::debug!("CLI config: {:?}", cli);

    let validation = cli
        .validate()
        .and_then(|_| file_config.as_ref().map_or(Ok(()), |c| c.validate()));
    if let Err(e) = validation {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    let settings: &dyn ConfigProvider = match &file_config {
        Some(config) => config,
        None => &cli,
    };

    match run(settings, cli.list.as_deref()) {
        Ok(summary) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
        Err(e) => {
            tracing::error!(
                "Orbit data initialization failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("{}", e.user_friendly_message());
            eprintln!("Hint: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn run(settings: &dyn ConfigProvider, list: Option<&str>) -> sat_tracker_init::Result<Summary> {
    let ctx = BundledContext::from_bundle(settings.files_dir(), settings.assets_bundle())?;
    let outcome = OrbitDataInitializer::with_global_manager(settings.init_options()).run(&ctx)?;

    let files = match list {
        Some(pattern) => {
            let mut loader = FileListingLoader::new();
            DataContext::global()
                .providers_manager()
                .feed(pattern, &mut loader)?;
            Some(
                loader
                    .files
                    .into_iter()
                    .map(|(name, bytes)| ListedFile { name, bytes })
                    .collect(),
            )
        }
        None => None,
    };

    Ok(Summary { outcome, files })
}

fn print_summary(summary: &Summary) {
    let report = &summary.outcome.provision;
    if report.copied {
        println!(
            "Copied {} files ({} bytes) to {}",
            report.files_copied,
            report.bytes_copied,
            summary.outcome.data_dir.display()
        );
    } else {
        println!(
            "Orbit data already present in {}",
            summary.outcome.data_dir.display()
        );
    }
    println!(
        "Registered data providers: {}",
        summary.outcome.providers_registered
    );

    if let Some(files) = &summary.files {
        println!("Matching data files: {}", files.len());
        for file in files {
            println!("  {} ({} bytes)", file.name, file.bytes);
        }
    }
}
