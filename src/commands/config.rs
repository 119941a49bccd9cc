use anyhow::Result;
use date_ask_core::config::DateAskConfig;
use date_ask_core::store::{FileStore, RESPONSE_KEY};
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = DateAskConfig::config_path()?;
    let config = DateAskConfig::load()?;
    let store = FileStore::new(config.data_path());

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", store.dir().display());
    println!("  Answer:  {}", store.path_for(RESPONSE_KEY).display());

    println!();
    println!("{}", "Remote".bold());
    match &config.remote {
        Some(remote) => {
            println!("  Project:     {}", remote.project_id);
            println!("  Collection:  {}", remote.collection);
        }
        None => println!("  {}", "Off (answers stay on this machine)".dimmed()),
    }

    Ok(())
}
