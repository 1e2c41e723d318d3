//! `--create-html`: write a product page from interactive answers.

use std::io;

use dlsenc_client::run_wizard;
use dlsenc_core::{AppConfig, Error};

pub fn run(config: &AppConfig) -> Result<(), Error> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    run_wizard(&mut input, &mut output, &config.dir_setting.html_dir, &config.dir_setting.image_dir)?;
    Ok(())
}
