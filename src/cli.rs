//! Command line interface

use crate::config::SiteConfig;
use crate::error::Result;
use crate::{convert_file, scan_document, ConvertOptions};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;
use std::time::Instant;

pub struct Cli {
    config: SiteConfig,
    start_time: Instant,
}

impl Cli {
    pub fn new() -> Self {
        Self {
            config: SiteConfig::default(),
            start_time: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.start_time = Instant::now();
        let matches = self.build_cli().get_matches();

        if let Some(config_path) = matches.get_one::<String>("config") {
            self.config = SiteConfig::load(config_path)?;
        }

        setup_logging(matches.get_count("verbose"));

        match matches.subcommand() {
            Some(("convert", sub_matches)) => self.handle_convert(sub_matches),
            Some(("tokens", sub_matches)) => self.handle_tokens(sub_matches),
            _ => {
                println!("No subcommand specified. Use --help for usage information.");
                Ok(())
            }
        }
    }

    fn build_cli(&self) -> Command {
        Command::new(crate::NAME)
            .version(crate::VERSION)
            .about(crate::DESCRIPTION)
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Site configuration file (TOML)")
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Increase verbosity (can be used multiple times)")
                    .action(ArgAction::Count),
            )
            .subcommand(
                Command::new("convert")
                    .about("Convert an HTML page to a Godot scene")
                    .arg(Arg::new("input").help("Input HTML file").required(true).index(1))
                    .arg(Arg::new("output").short('o').long("output").value_name("DIR").help("Output directory").default_value("godot_output"))
                    .arg(Arg::new("name").short('n').long("name").value_name("NAME").help("Scene name (defaults to the input file stem)"))
                    .arg(Arg::new("host").long("host").value_name("HOST").help("Host whose links count as in-site navigation"))
                    .arg(Arg::new("select").long("select").value_name("SELECTOR").help("CSS selector for the content subtree"))
                    .arg(Arg::new("no-inline").long("no-inline").help("Skip the CSS inlining pass").action(ArgAction::SetTrue))
                    .arg(Arg::new("stats").long("stats").help("Show detailed conversion statistics").action(ArgAction::SetTrue)),
            )
            .subcommand(
                Command::new("tokens")
                    .about("Print the token stream for an HTML page")
                    .arg(Arg::new("input").help("Input HTML file").required(true).index(1))
                    .arg(Arg::new("select").long("select").value_name("SELECTOR").help("CSS selector for the content subtree"))
                    .arg(Arg::new("no-inline").long("no-inline").help("Skip the CSS inlining pass").action(ArgAction::SetTrue)),
            )
    }

    /// Fold subcommand flags into the loaded site config.
    fn effective_config(&self, matches: &ArgMatches) -> SiteConfig {
        let mut config = self.config.clone();
        if let Some(host) = matches.get_one::<String>("host") {
            config.host = host.clone();
        }
        if let Some(selector) = matches.get_one::<String>("select") {
            config.content_selector = selector.clone();
        }
        config
    }

    fn handle_convert(&self, matches: &ArgMatches) -> Result<()> {
        let input = matches
            .get_one::<String>("input")
            .map(String::as_str)
            .unwrap_or_default();
        let output = matches
            .get_one::<String>("output")
            .map(String::as_str)
            .unwrap_or("godot_output");

        let config = self.effective_config(matches);
        let options = ConvertOptions {
            scene_name: matches.get_one::<String>("name").cloned(),
            inline_css: !matches.get_flag("no-inline"),
        };

        println!("Converting '{}' into '{}'...", input, output);
        let stats = convert_file(Path::new(input), Path::new(output), &config, &options)?;
        println!("Conversion successful in {}ms", stats.convert_time_ms);

        if matches.get_flag("stats") {
            self.print_stats(&stats);
        }
        Ok(())
    }

    fn handle_tokens(&self, matches: &ArgMatches) -> Result<()> {
        let input = matches
            .get_one::<String>("input")
            .map(String::as_str)
            .unwrap_or_default();

        let config = {
            let mut config = self.config.clone();
            if let Some(selector) = matches.get_one::<String>("select") {
                config.content_selector = selector.clone();
            }
            config
        };

        let source = std::fs::read_to_string(input)?;
        let html = if matches.get_flag("no-inline") {
            source
        } else {
            crate::inline_styles(&source)?
        };

        for (index, token) in scan_document(&html, &config)?.iter().enumerate() {
            println!("{:4}  {}", index, token);
        }
        Ok(())
    }

    fn print_stats(&self, stats: &crate::ConversionStats) {
        match serde_json::to_string_pretty(stats) {
            Ok(json) => println!("{}", json),
            Err(_) => println!("{:#?}", stats),
        }
        println!("Total time: {}ms", self.start_time.elapsed().as_millis());
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

fn setup_logging(verbose_count: u8) {
    let log_level = match verbose_count {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
}
