//! ids-camera binary for inspecting and tuning camera attributes.

mod cli;

use clap::Parser;
use ids_camera::{Attribute, V4L2Driver};

use cli::{Cli, Commands};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> ids_camera::Result<()> {
    if let Commands::List = cli.command {
        for attr in Attribute::ALL {
            println!("{:<12} {}", attr.name(), attr.doc());
        }
        return Ok(());
    }

    let driver = V4L2Driver::open(cli.device)?;
    println!("Device: {}", driver.card());
    let mut camera = driver.into_camera()?;

    match &cli.command {
        Commands::List => {}
        Commands::Dump => {
            for attr in Attribute::ALL {
                match camera.get_attr(attr) {
                    Ok(value) => println!("{:<12} {value}", attr.name()),
                    Err(err) => println!("{:<12} <{err}>", attr.name()),
                }
            }
        }
        Commands::Get { attribute } => {
            println!("{}", camera.get_attr(*attribute)?);
        }
        Commands::Set { attribute, value } => {
            camera.set_attr(*attribute, Some(value))?;
            println!("{attribute} = {}", camera.get_attr(*attribute)?);
        }
    }

    Ok(())
}
