use clap::Parser;

use secured_jdbc::cli::Args;
use secured_jdbc::config::ConfigFile;
use secured_jdbc::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = ConfigFile::load_or_default()?;

    let level = args
        .log_level
        .as_deref()
        .or(config.logging.level.as_deref());
    let format = args.log_format.unwrap_or(config.logging.format);
    logging::init(level, format)?;

    let output = args.command.run(&config, args.format)?;
    println!("{}", output);
    Ok(())
}
