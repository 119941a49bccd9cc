use std::time::Duration as StdDuration;

use anyhow::Result;
use chrono::Utc;
use date_ask_core::ActivityType;
use date_ask_core::clock::SystemClock;
use date_ask_core::config::DateAskConfig;
use date_ask_core::controller::{Controller, Stage};
use dialoguer::Select;
use owo_colors::OwoColorize;

use super::open_gateway;
use crate::render::{self, Render};
use crate::utils::tui::create_celebration;

/// How often the celebration checks the terminal size and its deadlines.
const FRAME: StdDuration = StdDuration::from_millis(250);
/// Rows of the yes/no picker visible at once.
const ASK_ROWS: usize = 6;

pub async fn run() -> Result<()> {
    let config = DateAskConfig::load()?;
    let gateway = open_gateway(&config)?;
    let mut controller = Controller::new(gateway, SystemClock);

    println!();
    println!("{}", render::QUESTION.bold());
    println!("{}", render::SUBTITLE.dimmed());
    println!();

    if controller.stage() == Stage::Asking {
        ask(&mut controller)?;
    }
    if controller.stage() == Stage::Celebrating {
        celebrate(&mut controller).await;
    }

    schedule(&mut controller)
}

fn ask(controller: &mut Controller) -> Result<()> {
    loop {
        let reluctance = controller.reluctance();

        let mut items = vec![render::yes_button(reluctance)];
        items.extend(std::iter::repeat_n(String::new(), render::spacer_rows(reluctance)));
        items.push(render::no_button());

        let choice = Select::new()
            .items(&items)
            .default(0)
            .max_length(ASK_ROWS)
            .interact()?;

        if choice == 0 {
            controller.accept();
            return Ok(());
        }
        if choice == items.len() - 1 {
            controller.decline();
        }
    }
}

async fn celebrate(controller: &mut Controller) {
    let spinner = create_celebration(render::celebration_banner(None));

    while controller.stage() == Stage::Celebrating {
        if let Ok((width, height)) = crossterm::terminal::size() {
            controller.resize(width, height);
        }
        controller.tick();

        if controller.effect_active() {
            spinner.set_message(render::celebration_banner(controller.viewport()));
        } else if !spinner.is_finished() {
            spinner.finish_and_clear();
            println!("{}", render::celebration_banner(None));
        }

        let wait = controller
            .next_deadline()
            .and_then(|deadline| (deadline - Utc::now()).to_std().ok())
            .map_or(FRAME, |until| until.min(FRAME));
        tokio::time::sleep(wait).await;
    }

    if !spinner.is_finished() {
        spinner.finish_and_clear();
    }
    println!("{}", render::THANKS.dimmed());
    println!();
}

fn schedule(controller: &mut Controller) -> Result<()> {
    loop {
        println!("{}", controller.render());
        println!();

        let confirm_label = if controller.is_confirmed() {
            "Confirmed".dimmed().to_string()
        } else if controller.can_confirm() {
            "Confirm".green().bold().to_string()
        } else {
            "Confirm (choose a date first)".dimmed().to_string()
        };
        let actions = [
            "Choose a date".to_string(),
            "Pick a date type".to_string(),
            confirm_label,
            "Done".to_string(),
        ];

        let choice = Select::new()
            .with_prompt("What next?")
            .items(&actions)
            .default(if controller.can_confirm() { 2 } else { 0 })
            .interact()?;

        match choice {
            0 => choose_date(controller)?,
            1 => choose_activity(controller)?,
            2 => match controller.confirm() {
                Ok(true) => {}
                Ok(false) => println!("{}", "Nothing to confirm.".dimmed()),
                Err(e) => eprintln!("  {}", format!("Could not save: {e}").red()),
            },
            _ => return Ok(()),
        }
        println!();
    }
}

fn choose_date(controller: &mut Controller) -> Result<()> {
    let Some(bounds) = controller.bounds() else {
        return Ok(());
    };
    let today = controller.today();

    println!(
        "{}",
        render::month_grid(bounds, controller.chosen_date(), today)
    );
    println!();

    let days: Vec<_> = bounds.days().collect();
    let labels: Vec<_> = days.iter().map(|d| d.format("%a %e %b").to_string()).collect();
    let current = controller.chosen_date().unwrap_or(today);
    let default = days.iter().position(|d| *d == current).unwrap_or(0);

    let choice = Select::new()
        .with_prompt("Choose a date")
        .items(&labels)
        .default(default)
        .max_length(7)
        .interact()?;

    controller.pick_date(days[choice])?;
    Ok(())
}

fn choose_activity(controller: &mut Controller) -> Result<()> {
    let labels: Vec<_> = ActivityType::ALL.iter().map(|a| a.label()).collect();
    let default = ActivityType::ALL
        .iter()
        .position(|a| *a == controller.activity())
        .unwrap_or(0);

    let choice = Select::new()
        .with_prompt("Pick a date type")
        .items(&labels)
        .default(default)
        .interact()?;

    controller.pick_activity(ActivityType::ALL[choice]);
    Ok(())
}
