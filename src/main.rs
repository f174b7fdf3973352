use std::path::{Path, PathBuf};

use court_rotation::display::{print_schedule, write_schedule_to_file};
use court_rotation::export::export_report;
use court_rotation::roster::load_roster;
use court_rotation::schedule::{ScheduleBuilder, SessionConfig};

/// Command line options for CLI mode
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    roster: Option<PathBuf>,
    config: Option<PathBuf>,
    hours: Option<u32>,
    seed: Option<u64>,
    strategy: Option<String>,
    start_time: Option<String>,
    out: Option<PathBuf>,
}

impl CliOptions {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = CliOptions::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| format!("{} needs a value", flag))
            };
            match arg.as_str() {
                "--config" => options.config = Some(PathBuf::from(value(arg)?)),
                "--hours" => {
                    options.hours = Some(value(arg)?.parse().map_err(|_| "--hours must be a number".to_string())?)
                }
                "--seed" => {
                    options.seed = Some(value(arg)?.parse().map_err(|_| "--seed must be a number".to_string())?)
                }
                "--strategy" => options.strategy = Some(value(arg)?),
                "--start" => options.start_time = Some(value(arg)?),
                "--out" => options.out = Some(PathBuf::from(value(arg)?)),
                other if other.starts_with("--") => return Err(format!("unknown option {}", other)),
                other => options.roster = Some(PathBuf::from(other)),
            }
        }
        Ok(options)
    }

    /// Config file (or defaults) with the command line flags applied on top
    fn session_config(&self) -> Result<SessionConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SessionConfig::default(),
        };
        if let Some(hours) = self.hours {
            config.total_rounds = SessionConfig::for_duration(hours).total_rounds;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(strategy) = &self.strategy {
            config.strategy = strategy.parse()?;
        }
        if self.start_time.is_some() {
            config.start_time = self.start_time.clone();
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args.get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let options = CliOptions::parse(&args[2..])?;
        let config = options.session_config()?;
        config.validate()?;

        println!("Starting web server on port {}...", port);
        println!("Access the site at http://localhost:{}", port);

        court_rotation::web::start_server(port, config).await?;
        return Ok(());
    }

    // CLI mode
    let options = CliOptions::parse(&args[1..])?;
    let roster_path = options
        .roster
        .clone()
        .unwrap_or_else(|| PathBuf::from("data/players.csv"));

    println!("Loading players from {}...", roster_path.display());
    let players = load_roster(&roster_path)?;
    println!("Loaded {} players (duplicates merged)", players.len());

    let config = options.session_config()?;
    let report = ScheduleBuilder::new(config).build(&players)?;
    print_schedule(&report);

    let out = options.out.clone().unwrap_or_else(|| PathBuf::from("schedule"));
    let text_path = format!("{}.txt", out.display());
    write_schedule_to_file(&report, &text_path)?;
    export_report(&report, &out)?;
    println!("\nSchedule saved to:");
    println!("  - {}", text_path);
    println!("  - {}_rounds.csv", out.display());
    println!("  - {}_stats.csv", out.display());

    Ok(())
}
