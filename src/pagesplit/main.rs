use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use pagesplit::api::{CmdMessage, CmdResult, ConfigAction, MessageLevel, PageRecord, PagesplitApi};
use pagesplit::config::PagesplitConfig;
use pagesplit::error::{PagesplitError, Result};
use std::path::PathBuf;

mod args;
mod logging;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: PagesplitApi,
    project_path: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let ctx = init_context(&cli)?;

    let result = match cli.command {
        Some(Commands::Show { pages }) => ctx.api.show(&pages)?,
        Some(Commands::Layout { layout_type, pages }) => {
            ctx.api.set_layout(&layout_type, &pages)?
        }
        Some(Commands::ClearLayout { pages }) => ctx.api.clear_layout(&pages)?,
        Some(Commands::Params { page, params_file }) => {
            ctx.api.set_params_from_file(&page, &params_file)?
        }
        Some(Commands::ClearParams { pages }) => ctx.api.clear_params(&pages)?,
        Some(Commands::Default { layout_type }) => ctx.api.set_default(&layout_type)?,
        Some(Commands::Relink { from, to }) => ctx.api.relink(&from, &to)?,
        Some(Commands::Reset) => ctx.api.reset()?,
        Some(Commands::Config { key, value }) => {
            let action = match (key, value) {
                (None, _) => ConfigAction::ShowAll,
                (Some(key), None) => ConfigAction::ShowKey(key),
                (Some(key), Some(value)) => ConfigAction::Set(key, value),
            };
            ctx.api.config_action(action)?
        }
        None => {
            let none: [&str; 0] = [];
            ctx.api.show(&none)?
        }
    };

    print_result(&result);

    if result.modified {
        ctx.api.save(&ctx.project_path)?;
    }
    Ok(())
}

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os("PAGESPLIT_HOME") {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("org", "pagesplit", "pagesplit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| PagesplitError::Config("Could not determine data directory".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = data_dir(cli)?;
    let config = PagesplitConfig::load(&data_dir)?;
    let project_path = match &cli.file {
        Some(file) => file.clone(),
        None => data_dir.join(&config.project_file),
    };

    let api = PagesplitApi::open(&project_path, config, data_dir)?;
    Ok(AppContext { api, project_path })
}

fn print_result(result: &CmdResult) {
    print_records(&result.records);
    if let Some(config) = &result.config {
        for key in PagesplitConfig::KEYS {
            if let Some(value) = config.get(key) {
                println!("{} = {}", key, value);
            }
        }
    }
    print_messages(&result.messages);
}

fn print_records(records: &[PageRecord]) {
    for entry in records {
        let record = &entry.record;
        let layout = match record.layout_type() {
            Some(layout_type) => layout_type.to_string().bold(),
            None => format!("{} (default)", record.combined_layout_type()).normal(),
        };
        let params = match record.params() {
            Some(params) => format!("{:?}", params.shape()).green(),
            None => "not computed".dimmed(),
        };
        println!("{}  {}  params: {}", entry.image, layout, params);
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
