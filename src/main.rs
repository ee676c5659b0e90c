//! DVD Screensaver entry point

use std::path::Path;

use dvd_screensaver::Settings;
use dvd_screensaver::consts::SETTINGS_FILE;

fn main() {
    env_logger::init();
    log::info!("DVD Screensaver starting...");

    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE));

    if let Err(e) = dvd_screensaver::app::run(settings) {
        println!("{e}");
        std::process::exit(-1);
    }

    log::info!("DVD Screensaver exited cleanly");
}
