use anyhow::{Context, Result};
use atlas_core::{provinces, CompanyDraft, CompanyId, Sector};
use clap::{ArgAction, Args, Parser, Subcommand};
use company_sqlite::Db;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod output;
#[cfg(feature = "map")]
mod session;

use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "atlas", version, about = "Registry of companies by sector and province, with a province map")]
struct Cli {
    /// Optional config file (YAML). If omitted, loads ./atlas.yaml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database file (default: empresas.db)
    #[arg(long, global = true, value_name = "FILE")]
    db: Option<PathBuf>,
    /// More log output on stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

/// Form fields shared by `add` and `edit`.
#[derive(Debug, Args)]
struct CompanyArgs {
    /// Company name (required)
    #[arg(long)]
    name: String,
    /// Satelites, Defensa y Espacio, Comunicaciones, Aeronautica, Tecnologia, Consultoria, Energia or Otro
    #[arg(long)]
    sector: Option<String>,
    /// Province name; see `atlas provinces`. Use "Otra" for anything else.
    #[arg(long)]
    province: String,
    /// Autonomous region. Defaults to the province's region when known.
    #[arg(long)]
    region: Option<String>,
    /// Latitude in decimal degrees, e.g. 40.4168
    #[arg(long, allow_hyphen_values = true)]
    lat: String,
    /// Longitude in decimal degrees, e.g. -3.7038
    #[arg(long, allow_hyphen_values = true)]
    lon: String,
    /// Employee list URL (scheme optional)
    #[arg(long)]
    link: Option<String>,
}

impl CompanyArgs {
    fn into_draft(self) -> atlas_core::Result<CompanyDraft> {
        let name = self.name.trim().to_string();
        let province = self.province.trim().to_string();
        if province.is_empty() {
            return Err(atlas_core::Error::Validation("select a province".into()));
        }
        let parse = |v: &str| -> atlas_core::Result<f64> {
            v.trim().parse::<f64>().map_err(|_| {
                atlas_core::Error::Validation(
                    "latitude and longitude are required decimal numbers, e.g. 40.4168".into(),
                )
            })
        };
        let sector = match self.sector.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(s.parse::<Sector>()?.label().to_string()),
        };
        let mut draft = CompanyDraft {
            name,
            sector,
            province: Some(province),
            region: self.region.map(|r| r.trim().to_string()),
            latitude: parse(&self.lat)?,
            longitude: parse(&self.lon)?,
            employee_link: self.link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty()),
        };
        draft.prefill_region();
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// Create or migrate the database and print its schema version
    Init,
    /// List companies ordered by name
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Output file (overwrites). Stdout if omitted.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Show every field of one company
    Show { id: i64 },
    /// Add a company
    Add {
        #[command(flatten)]
        fields: CompanyArgs,
    },
    /// Overwrite every field of an existing company
    Edit {
        id: i64,
        #[command(flatten)]
        fields: CompanyArgs,
    },
    /// Delete a company (asks for confirmation)
    Delete {
        id: i64,
        /// Do not ask for confirmation
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
    /// List known provinces with their region and reference coordinate
    Provinces {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Open a company's employee link in the browser
    #[cfg(feature = "links")]
    OpenLink { id: i64 },
    /// Interactive map session: reads `click X Y`, `dblclick X Y`, `reset`,
    /// `show`, `refresh`, `quit` from stdin and prints one JSON line per event
    #[cfg(feature = "map")]
    Map {
        /// GeoJSON with one feature per province (overrides config)
        #[arg(long, value_name = "FILE")]
        geodata: Option<PathBuf>,
        /// Feature property holding the province name
        #[arg(long)]
        name_property: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "s" | "si"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let cfg = config::load_config(cli.config.as_deref()).unwrap_or_default();
    let db_path = cfg.db_path(cli.db.as_deref());
    let open_db = || {
        Db::open_or_create(&db_path).with_context(|| format!("opening {}", db_path.display()))
    };

    match cli.command {
        Commands::Version => {
            println!("atlas {} (core {})", env!("CARGO_PKG_VERSION"), atlas_core::version());
        }
        Commands::Init => {
            let db = open_db()?;
            let info = db.schema_info()?;
            println!(
                "{}: schema v{} ({} companies) columns: {}",
                db_path.display(),
                info.version,
                info.rows,
                info.columns.join(", ")
            );
        }
        Commands::List { format, out } => {
            let db = open_db()?;
            let companies = db.list_all()?;
            match out {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    let mut out = std::io::BufWriter::new(file);
                    output::write_companies(format, &companies, &mut out)?;
                    out.flush().with_context(|| format!("writing {}", path.display()))?;
                }
                None => output::write_companies(format, &companies, std::io::stdout().lock())?,
            }
        }
        Commands::Show { id } => {
            let db = open_db()?;
            let company = db
                .get(CompanyId(id))?
                .ok_or(atlas_core::Error::NotFound(CompanyId(id)))?;
            output::write_company(&company, std::io::stdout().lock())?;
        }
        Commands::Add { fields } => {
            let draft = fields.into_draft()?;
            let db = open_db()?;
            let id = db.insert(&draft)?;
            println!("added company {id}: {}", draft.name);
        }
        Commands::Edit { id, fields } => {
            let draft = fields.into_draft()?;
            let db = open_db()?;
            db.update(CompanyId(id), &draft)?;
            println!("saved company {id}");
        }
        Commands::Delete { id, yes } => {
            let db = open_db()?;
            let id = CompanyId(id);
            let Some(company) = db.get(id)? else {
                eprintln!("no company with id {id}; nothing deleted");
                return Ok(());
            };
            if !yes && !confirm(&format!("Delete company {id} ({})?", company.name))? {
                eprintln!("cancelled");
                return Ok(());
            }
            db.delete(id)?;
            println!("deleted company {id}");
        }
        Commands::Provinces { format } => {
            output::write_provinces(format, provinces::PROVINCES, std::io::stdout().lock())?;
        }
        #[cfg(feature = "links")]
        Commands::OpenLink { id } => {
            let db = open_db()?;
            let company = db
                .get(CompanyId(id))?
                .ok_or(atlas_core::Error::NotFound(CompanyId(id)))?;
            let Some(url) = company.employee_link.as_deref().and_then(atlas_core::link::normalize_link) else {
                eprintln!("company {id} has no employee link");
                return Ok(());
            };
            tracing::info!(%url, "opening link");
            open::that(&url).with_context(|| format!("opening {url}"))?;
        }
        #[cfg(feature = "map")]
        Commands::Map { geodata, name_property } => {
            let map_cfg = cfg.map.clone().unwrap_or_default();
            let geodata_path = geodata.or(map_cfg.geodata);
            let name_property = name_property
                .or(map_cfg.name_property)
                .unwrap_or_else(|| map_engine::geodata::DEFAULT_NAME_PROPERTY.to_string());
            let shapes = map_engine::geodata::load_or_degrade(geodata_path.as_deref(), &name_property);
            if shapes.is_none() {
                eprintln!("province map not available; markers only");
            }
            let mut engine = map_engine::MapEngine::new(shapes)
                .with_pick_radius_sq(map_cfg.pick_radius_sq.unwrap_or(map_engine::DEFAULT_PICK_RADIUS_SQ));
            let db = open_db()?;
            session::run(&db, &mut engine, std::io::stdin().lock(), std::io::stdout().lock())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(lat: &str, lon: &str) -> CompanyArgs {
        CompanyArgs {
            name: " GMV ".into(),
            sector: Some("satélites".into()),
            province: "Madrid".into(),
            region: None,
            lat: lat.into(),
            lon: lon.into(),
            link: Some("  ".into()),
        }
    }

    #[test]
    fn form_fields_become_a_draft() {
        let draft = args("40.4520", "-3.6927").into_draft().unwrap();
        assert_eq!(draft.name, "GMV");
        assert_eq!(draft.sector.as_deref(), Some("Satelites"));
        assert_eq!(draft.region.as_deref(), Some("Madrid"));
        assert_eq!((draft.latitude, draft.longitude), (40.4520, -3.6927));
        assert_eq!(draft.employee_link, None);
    }

    #[test]
    fn non_numeric_coordinates_are_rejected() {
        let err = args("cuarenta", "-3.6927").into_draft().unwrap_err();
        assert!(matches!(err, atlas_core::Error::Validation(_)));
        let mut missing_province = args("40.4", "-3.7");
        missing_province.province = " ".into();
        assert!(missing_province.into_draft().is_err());
    }

    #[test]
    fn cli_parses_negative_longitude() {
        let cli = Cli::try_parse_from([
            "atlas", "--db", "x.db", "add", "--name", "Indra", "--province", "Madrid",
            "--lat", "40.4", "--lon", "-3.7",
        ])
        .unwrap();
        match cli.command {
            Commands::Add { fields } => assert_eq!(fields.lon, "-3.7"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
