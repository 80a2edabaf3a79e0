use std::fs::File;

use clap::Parser;
use lifeboard::{Args, Sim};
use simplelog::{ConfigBuilder, WriteLogger};

const FAREWELL: &str = "Thanks for playing!";

fn init_logging(args: &Args) {
    // the terminal belongs to the board, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level(), log_config, log_file);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let settings = args.settings();
    log::info!(
        "starting a {}x{} board at {:?}, {:?} per generation",
        settings.rows,
        settings.columns,
        settings.origin,
        settings.interval
    );

    Sim::new(&settings, args.seed).run()?;

    println!("{FAREWELL}");
    Ok(())
}
