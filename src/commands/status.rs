use anyhow::Result;
use date_ask_core::config::DateAskConfig;
use owo_colors::OwoColorize;

use super::open_gateway;
use crate::render::Render;

pub fn run() -> Result<()> {
    let config = DateAskConfig::load()?;
    let gateway = open_gateway(&config)?;

    match gateway.load() {
        Ok(Some(record)) => println!("{}", record.render()),
        Ok(None) => println!("{}", "No answer yet.".dimmed()),
        Err(e) => println!("   {}", format!("Stored answer is unreadable: {e}").red()),
    }

    Ok(())
}
