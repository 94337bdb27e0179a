use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::*;
use serde::Deserialize;
use structopt::StructOpt;

use biryani::config::{EnvLogger, EnvOverrides};
use biryani::menu::ShowMenu;
use biryani::render::{ConfirmationView, MenuView};
use biryani::services::Queryable;
use biryani::session::{SessionEvent, UpdateDetails};

#[derive(Debug, StructOpt)]
#[structopt(name = "rb", about = "Biryani Thinu Mawa ordering CLI")]
struct Opt {
    /// Configuration file
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(subcommand)]
    command: Commands,
}

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(name = "show-menu", about = "Show menu")]
    ShowMenu {
        #[structopt(long = "json")]
        json: bool,
    },
    #[structopt(name = "order", about = "Place a single order")]
    Order(Order),
    #[structopt(name = "shop", about = "Order interactively from stdin")]
    Shop,
}

#[derive(Debug, StructOpt)]
struct Order {
    /// Dish to add, by menu number, name or id; repeat for more
    #[structopt(long = "add", number_of_values = 1)]
    add: Vec<String>,
    /// Dish to take out again, applied after all additions
    #[structopt(long = "remove", number_of_values = 1)]
    remove: Vec<String>,
    #[structopt(long = "name", default_value = "")]
    name: String,
    #[structopt(long = "phone", default_value = "")]
    phone: String,
    #[structopt(long = "address", default_value = "")]
    address: String,
    #[structopt(long = "json")]
    json: bool,
}

#[derive(Deserialize, Debug, Default)]
struct Config {
    #[serde(flatten)]
    biryani: biryani::config::Config,
    #[serde(default)]
    env_logger: EnvLogger,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            let mut config_buf = String::new();
            File::open(path)
                .with_context(|| format!("open config {:?}", path))?
                .read_to_string(&mut config_buf)?;
            toml::from_str(&config_buf).with_context(|| format!("parse config {:?}", path))?
        }
        None => Config::default(),
    };
    config.biryani.apply(EnvOverrides::from_env()?);
    Ok(config)
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let config = load_config(opt.config.as_ref())?;
    config.env_logger.builder().init();
    debug!("Options: {:?}", opt);

    let app = biryani::Biryani::new(&config.biryani)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match opt.command {
        Commands::ShowMenu { json } => {
            if json {
                let list = app.menu().query(ShowMenu)?;
                serde_json::to_writer_pretty(&mut out, &list)?;
                writeln!(out)?;
            } else {
                write!(out, "{}", MenuView(app.menu()))?;
            }
        }
        Commands::Order(order) => {
            let mut session = app.session();
            let details = UpdateDetails {
                name: Some(order.name),
                phone: Some(order.phone),
                address: Some(order.address),
            };
            biryani::shell::place_order(&mut session, &order.add[..], &order.remove[..], details)?;

            while let Some(SessionEvent::OrderPlaced(confirmation)) = session.take_event() {
                if order.json {
                    serde_json::to_writer_pretty(&mut out, &confirmation)?;
                    writeln!(out)?;
                } else {
                    write!(out, "{}", ConfirmationView(&confirmation))?;
                }
            }
        }
        Commands::Shop => {
            let stdin = io::stdin();
            let mut session = app.session();
            biryani::shell::run(&mut session, stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}
