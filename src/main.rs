// A drawing surface made with the Bevy game engine.

use clap::Parser;
use sketchpad::utils::logger::init_custom_logger;
use sketchpad::{create_app, CliArgs};

fn main() {
    let cli_args = CliArgs::parse();
    init_custom_logger(cli_args.debug);

    match create_app(cli_args) {
        Ok(mut app) => {
            app.run();
        }
        Err(e) => {
            eprintln!("Error starting Sketchpad: {}", e);
            std::process::exit(1);
        }
    }
}
