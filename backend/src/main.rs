use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, MietteHandlerOpts, Result, miette};
use std::path::PathBuf;
use std::process::ExitCode;

use webutil::config::AppConfig;
use webutil::db::connect::connect;
use webutil::db::core::DbConfig;
use webutil::environment::Environment;
use webutil::file::error::JsonError;
use webutil::file::json::load_json;
use webutil::file::lines::remove_cr;
use webutil::httpserver::templates::TemplateSet;
use webutil::log::core::init_logging;
use webutil::nix::users::users_from;
use webutil::secrets::core::Secrets;
use webutil::{locate, locate_byte, paginate};

#[derive(Parser)]
#[command(name = "webutil", version, about = "Web backend utility toolbox")]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Overrides the configured environment.
    #[arg(short, long, global = true, value_enum)]
    env: Option<Environment>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the line and character of an offset in a file.
    #[command(visible_aliases = &["loc"])]
    Locate {
        input: PathBuf,
        offset: usize,
        /// Treat OFFSET as a UTF-8 byte offset instead of a character index.
        #[arg(short, long)]
        bytes: bool,
    },
    /// Parse a JSON file and report syntax errors by line and character.
    #[command(visible_aliases = &["json"])]
    CheckJson { input: PathBuf },
    /// Compute pagination for a listing.
    #[command(visible_aliases = &["p"])]
    Paginate {
        #[arg(short, long, default_value_t = 1, allow_hyphen_values = true)]
        page: i64,
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        items: i64,
        /// Defaults to `items_per_page` from the configuration.
        #[arg(long, allow_hyphen_values = true)]
        per_page: Option<i64>,
    },
    /// List regular users from a passwd-style file.
    Users {
        #[arg(default_value = "/etc/passwd")]
        path: PathBuf,
    },
    /// Create the secrets file, or fill in missing keys.
    Secrets {
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Print the configured database DSN with the password masked.
    Dsn,
    /// Connect to the configured database and check that it answers.
    Ping,
    /// Parse the HTML templates found in a directory and list them.
    Templates { dir: Option<PathBuf> },
    /// Convert CR and CR LF line endings to LF.
    Normalize {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .color(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(env) = cli.env {
        config.environment = env;
    }
    let _guard = init_logging(&config.log_config())?;
    tracing::debug!(?config, "configuration loaded");

    match cli.cmd {
        Cmd::Locate { input, offset, bytes } => {
            let src = std::fs::read_to_string(&input).into_diagnostic()?;
            let position = if bytes {
                locate_byte(&src, offset)?
            } else {
                locate(&src, offset)?
            };
            println!("{}: {position}", input.display());
        }

        Cmd::CheckJson { input } => match load_json(&input) {
            Ok(data) => println!("{}: ok, {} top-level keys", input.display(), data.len()),
            Err(err @ JsonError::Syntax { .. }) => {
                eprintln!("error: {err}");
                return Ok(ExitCode::FAILURE);
            }
            Err(err) => return Err(err.into()),
        },

        Cmd::Paginate {
            page,
            items,
            per_page,
        } => {
            let paginator = paginate(page, items, per_page.unwrap_or(config.items_per_page))?;
            println!("{}", serde_json::to_string_pretty(&paginator).into_diagnostic()?);
        }

        Cmd::Users { path } => {
            for user in users_from(&path)? {
                println!("{user}");
            }
        }

        Cmd::Secrets { path } => {
            let path = path.unwrap_or(config.secrets_path);
            let secrets = Secrets::load_or_create(&path)?;
            println!("{}: {secrets:?}", path.display());
        }

        Cmd::Dsn => {
            let db = database(config.database)?;
            tracing::info!("using DSN {}", db.masked_dsn());
            println!("{}", db.masked_dsn());
        }

        Cmd::Ping => {
            let db = database(config.database)?;
            let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
            runtime.block_on(async {
                let pool = connect(&db).await?;
                pool.close().await;
                Ok::<_, webutil::db::error::DbError>(())
            })?;
            println!("{}: ok", db.masked_dsn());
        }

        Cmd::Templates { dir } => {
            let dir = dir
                .or(config.templates_dir)
                .ok_or_else(|| miette!("no template directory given or configured"))?;
            let templates = TemplateSet::load(&dir)?;
            for name in templates.names() {
                println!("{name}");
            }
        }

        Cmd::Normalize { input, output } => {
            let src = std::fs::read_to_string(&input).into_diagnostic()?;
            let normalized = remove_cr(&src);
            match output {
                Some(path) => std::fs::write(&path, normalized).into_diagnostic()?,
                None => print!("{normalized}"),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn database(config: Option<DbConfig>) -> Result<DbConfig> {
    config.ok_or_else(|| {
        miette!(
            help = "Add a \"database\" section to the config file",
            "no database configured"
        )
    })
}
