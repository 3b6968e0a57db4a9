//! banner-rotator - Timer-Driven Banner Rotation
//!
//! Rotates an "active" marker across the given banners, in the terminal or headless.

use anyhow::{Context, Result};
use banner_rotator::render::ui::{ColorTheme, TerminalUI, THEME_NAMES};
use banner_rotator::{Application, MemoryDocument, RotatorConfig};
use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

fn cli() -> Command {
    let command = Command::new("banner-rotator")
        .version(banner_rotator::VERSION)
        .about("Rotate an active marker across a set of banners on a timer")
        .long_about(
            "banner-rotator builds an image slider from the given banner sources and moves \
             the active class one step forward every interval, wrapping at the end.",
        )
        .arg(
            Arg::new("banners")
                .help("Banner sources, in rotation order (the first starts active)")
                .num_args(0..)
                .index(1),
        )
        .arg(
            Arg::new("interval-ms")
                .long("interval-ms")
                .short('i')
                .help("Milliseconds between transitions [default: 4000]")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("selector")
                .long("selector")
                .short('s')
                .help("Selector picking the banners [default: .image-slider img]"),
        )
        .arg(
            Arg::new("active-class")
                .long("active-class")
                .short('a')
                .help("Class marking the active banner [default: active]"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .short('t')
                .help("Color theme for the terminal UI")
                .value_parser(PossibleValuesParser::new(THEME_NAMES))
                .default_value("default"),
        )
        .arg(
            Arg::new("headless")
                .long("headless")
                .help("Log transitions instead of drawing a terminal UI")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ticks")
                .long("ticks")
                .short('n')
                .help("Stop after this many transitions (headless only)")
                .value_parser(value_parser!(u64))
                .requires("headless"),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .short('c')
            .help("TOML configuration file (defaults to the user config dir)")
            .value_parser(value_parser!(std::path::PathBuf)),
    );

    command
}

fn load_config(matches: &ArgMatches) -> Result<RotatorConfig> {
    #[cfg(feature = "config")]
    let mut config = match matches.get_one::<std::path::PathBuf>("config") {
        Some(path) => RotatorConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RotatorConfig::load_or_default().context("loading default configuration")?,
    };
    #[cfg(not(feature = "config"))]
    let mut config = RotatorConfig::default();

    // Command-line flags win over file values
    if let Some(&interval_ms) = matches.get_one::<u64>("interval-ms") {
        config.interval_ms = interval_ms;
    }
    if let Some(selector) = matches.get_one::<String>("selector") {
        config.selector = selector.clone();
    }
    if let Some(active_class) = matches.get_one::<String>("active-class") {
        config.active_class = active_class.clone();
    }

    config.validate().context("invalid rotation settings")?;
    Ok(config)
}

fn load_theme(matches: &ArgMatches) -> Result<ColorTheme> {
    let name = matches
        .get_one::<String>("theme")
        .map(String::as_str)
        .unwrap_or("default");
    Ok(ColorTheme::from_name(name)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let headless = matches.get_flag("headless");

    // Headless mode reports through the log, so make info visible unless RUST_LOG says otherwise
    if headless {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
    } else {
        env_logger::init();
    }

    let config = load_config(&matches)?;
    let sources: Vec<String> = matches
        .get_many::<String>("banners")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let document = MemoryDocument::image_slider(sources, &config.active_class);

    let ui_renderer = Box::new(TerminalUI::with_theme(load_theme(&matches)?)?);
    let mut app = Application::new(config, document, ui_renderer)?;

    if headless {
        let ticks = matches.get_one::<u64>("ticks").copied();
        app.run_headless(ticks).await?;
    } else {
        app.run().await?;
    }

    Ok(())
}
