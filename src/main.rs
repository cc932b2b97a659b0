use anyhow::Result;
use checklist_tui::app::{App, Overrides};
use checklist_tui::config::Config;
use clap::{crate_description, crate_name, crate_version, App as Cli, Arg};
use std::path::PathBuf;

fn main() -> Result<()> {
    let matches = Cli::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("checklists")
                .short("f")
                .long("checklists")
                .value_name("FILE")
                .help("YAML file defining the checklists")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("state")
                .short("s")
                .long("state")
                .value_name("FILE")
                .help("JSON file item statuses are saved to")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;

    let overrides = Overrides {
        checklist_file: matches.value_of("checklists").map(PathBuf::from),
        state_file: matches.value_of("state").map(PathBuf::from),
    };
    App::start(config, overrides)
}
