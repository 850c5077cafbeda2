use anyhow::Result;
use clap::{App, Arg};
use std::path::Path;
use storypager::build::build_site;
use storypager::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let matches = App::new("storypager")
        .about("Builds paginated story pages and their JSON indexes")
        .arg(
            Arg::with_name("project")
                .help("The project directory (or any directory beneath it)")
                .default_value("."),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Overrides the configured output directory"),
        )
        .get_matches();

    let project = std::fs::canonicalize(matches.value_of("project").unwrap_or("."))?;
    let config = Config::from_directory(&project, matches.value_of("output").map(Path::new))?;
    build_site(&config)?;
    Ok(())
}
