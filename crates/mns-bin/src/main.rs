//! mnsbadge entrypoint.
use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use core_config::{Config, load_from};
use core_fonts::{AdvanceMeasurer, FontFitter};
use core_model::{MetadataInit, MetadataRecord, Version};
use core_render::{ImageGenerator, ImageOutcome, SvgTemplate};
use core_text::DefaultNormalizer;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "mnsbadge", version, about = "Render MNS name badges")]
struct Args {
    /// Optional configuration file path (overrides discovery of `mnsbadge.toml`).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the metadata record (with generated image) as JSON.
    Metadata(RecordArgs),
    /// Print the SVG badge.
    Image(RecordArgs),
    /// Print the SVG badge for `<label>.mon`.
    TempImage {
        label: String,
        #[arg(long = "version-tag", default_value = "v2")]
        version_tag: String,
    },
    /// Render every name in a file (one per line) concurrently.
    Batch {
        file: PathBuf,
        #[arg(long = "version-tag", default_value = "v2")]
        version_tag: String,
    },
}

#[derive(ClapArgs, Debug, Clone)]
struct RecordArgs {
    name: String,
    #[arg(long = "token-id", default_value = "0")]
    token_id: String,
    /// Creation time, epoch seconds.
    #[arg(long, default_value_t = 0)]
    created: i64,
    #[arg(long)]
    description: Option<String>,
    #[arg(long = "version-tag", default_value = "v2")]
    version_tag: String,
    #[arg(long = "last-request-date")]
    last_request_date: Option<i64>,
    /// Base64 background image; ignored for names that are not normalized.
    #[arg(long = "background")]
    background: Option<String>,
    #[arg(long = "mime-type", requires = "background")]
    mime_type: Option<String>,
}

impl RecordArgs {
    fn for_name(name: impl Into<String>, version_tag: &str) -> Self {
        let name = name.into();
        Self {
            token_id: name.clone(),
            name,
            created: 0,
            description: None,
            version_tag: version_tag.to_string(),
            last_request_date: None,
            background: None,
            mime_type: None,
        }
    }
}

#[derive(Default)]
struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn run(&mut self, args: &Args) -> Result<Config> {
        let config = load_from(args.config.clone())?;
        self.configure_logging(&config.file.logging.dir)?;
        Self::install_panic_hook();

        let fitter = FontFitter::new(
            config.file.fonts.clone(),
            config.file.canvas,
            Arc::new(AdvanceMeasurer),
        );
        if core_fonts::install_shared(fitter).is_err() {
            warn!(target: "runtime.startup", "shared_fitter_already_installed");
        }
        info!(
            target: "runtime.startup",
            config_path = config.path.as_ref().map(|p| p.display().to_string()).as_deref(),
            "startup"
        );
        Ok(config)
    }

    fn configure_logging(&mut self, log_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("creating log directory {}", log_dir.display()))?;
        let file_appender = tracing_appender::rolling::never(log_dir, "mnsbadge.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn build_record(config: &Config, args: &RecordArgs) -> Result<MetadataRecord> {
    let version: Version = args.version_tag.parse()?;
    let mut init = MetadataInit::new(&args.name, &args.token_id, args.created, version)
        .external_url_base(&config.file.links.external_url_base);
    if let Some(description) = &args.description {
        init = init.description(description);
    }
    if let Some(epoch) = args.last_request_date {
        init = init.last_request_date(epoch);
    }
    let mut record = MetadataRecord::new(init, &DefaultNormalizer)
        .with_context(|| format!("building metadata for {:?}", args.name))?;
    if let Some(background) = &args.background {
        if !record.set_background(background, args.mime_type.clone()) {
            warn!(target: "runtime", name = %args.name, "background_ignored_for_unnormalized_name");
        }
    }
    Ok(record)
}

fn template_for(config: &Config) -> SvgTemplate {
    SvgTemplate::new(config.file.fonts.families().join(", "))
}

fn render_record(config: &Config, args: &RecordArgs) -> Result<MetadataRecord> {
    let mut record = build_record(config, args)?;
    let template = template_for(config);
    let outcome = ImageGenerator::new(core_fonts::shared(), &template).generate(&mut record);
    if let ImageOutcome::Failed(err) = outcome {
        bail!("image rendering failed for {:?}: {err}", args.name);
    }
    Ok(record)
}

/// Non-empty, trimmed lines in input order.
fn read_batch_names(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn batch_line(config: &Config, name: &str, version_tag: &str) -> String {
    let args = RecordArgs::for_name(name, version_tag);
    let mut record = match build_record(config, &args) {
        Ok(record) => record,
        Err(err) => return format!("{name}\terror\t{err:#}"),
    };
    let template = template_for(config);
    match ImageGenerator::new(core_fonts::shared(), &template).generate(&mut record) {
        ImageOutcome::Rendered { bytes, font_size } => format!("{name}\t{font_size}\t{bytes}"),
        ImageOutcome::Failed(err) => format!("{name}\terror\t{err}"),
    }
}

async fn run_batch(config: Arc<Config>, file: &Path, version_tag: &str) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading batch file {}", file.display()))?;
    let names = read_batch_names(&content);
    info!(target: "runtime.batch", count = names.len(), "batch_start");
    let handles: Vec<_> = names
        .into_iter()
        .map(|name| {
            let config = Arc::clone(&config);
            let version_tag = version_tag.to_string();
            tokio::task::spawn_blocking(move || batch_line(&config, &name, &version_tag))
        })
        .collect();
    for handle in handles {
        println!("{}", handle.await?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::default();
    let config = startup.run(&args)?;

    match args.command {
        Command::Metadata(record_args) => {
            let record = render_record(&config, &record_args)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Image(record_args) => {
            let record = render_record(&config, &record_args)?;
            println!("{}", record.image());
        }
        Command::TempImage { label, version_tag } => {
            let record_args = RecordArgs::for_name(format!("{label}.mon"), &version_tag);
            let record = render_record(&config, &record_args)?;
            println!("{}", record.image());
        }
        Command::Batch { file, version_tag } => {
            run_batch(Arc::new(config), &file, &version_tag).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn parses_metadata_command() {
        let args = Args::try_parse_from([
            "mnsbadge",
            "metadata",
            "alice.mon",
            "--token-id",
            "42",
            "--version-tag",
            "v1",
        ])
        .unwrap();
        match args.command {
            Command::Metadata(r) => {
                assert_eq!(r.name, "alice.mon");
                assert_eq!(r.token_id, "42");
                assert_eq!(r.version_tag, "v1");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn mime_type_requires_background() {
        let err = Args::try_parse_from([
            "mnsbadge",
            "image",
            "alice.mon",
            "--mime-type",
            "image/png",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn unknown_version_tag_rejected() {
        let args = RecordArgs::for_name("alice.mon", "v5");
        let err = build_record(&config(), &args).unwrap_err();
        assert!(err.to_string().contains("unknown metadata version: v5"));
    }

    #[test]
    fn missing_separator_rejected() {
        let args = RecordArgs::for_name("alice", "v2");
        let err = build_record(&config(), &args).unwrap_err();
        assert!(format!("{err:#}").contains("label cannot be empty"));
    }

    #[test]
    fn render_record_produces_svg() {
        let record = render_record(&config(), &RecordArgs::for_name("alice.mon", "v2")).unwrap();
        assert!(record.image().starts_with("<svg"));
        assert_eq!(record.image(), record.image_url());
    }

    #[test]
    fn batch_names_skip_blank_lines() {
        assert_eq!(
            read_batch_names("alice.mon\n\n  bob.mon  \n\t\n"),
            vec!["alice.mon".to_string(), "bob.mon".to_string()]
        );
    }

    #[test]
    fn batch_line_reports_errors_inline() {
        let line = batch_line(&config(), "nodot", "v2");
        assert!(line.starts_with("nodot\terror\t"));
        let line = batch_line(&config(), "alice.mon", "v2");
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields[0], "alice.mon");
        let expected = core_render::LayoutEngine::new(core_fonts::shared())
            .layout("alice.mon")
            .domain
            .font_size;
        assert_eq!(fields[1].parse::<i32>().unwrap(), expected);
        assert!(fields[2].parse::<usize>().unwrap() > 0);
    }

    #[tokio::test]
    async fn batch_runs_concurrently_over_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "alice.mon\nsub.alice.mon\n").unwrap();
        run_batch(Arc::new(config()), tmp.path(), "v1").await.unwrap();
    }
}
