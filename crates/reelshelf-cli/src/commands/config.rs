use super::{styled_table, Session};
use crate::output::{Notice, Output};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color};
use movie_catalog_config::{Config, ShelfSource};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(session: &Session, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(session, output),
        ConfigCommands::Init { force } => init_config(session, force, output),
    }
}

fn show_config(session: &Session, output: &Output) -> Result<()> {
    let config_file = session.paths.config_file();
    let config = &session.config;
    let store_dir = config.store_dir(&session.paths);

    let log_file = config.log_file(&session.paths);

    if output.is_json() {
        output.json(&json!({
            "root": session.paths.root().display().to_string(),
            "rootSource": session.paths.source(),
            "logFile": log_file.as_ref().map(|p| p.display().to_string()),
            "configFile": config_file.display().to_string(),
            "configFileExists": config_file.exists(),
            "storeDir": store_dir.display().to_string(),
            "config": config,
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let mut files = styled_table();
    files.set_header(vec![
        Cell::new("Locations").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    let file_state = if config_file.exists() {
        config_file.display().to_string()
    } else {
        format!("{} {}", config_file.display(), "(not created, using defaults)".bright_black())
    };
    files.add_row(vec![
        Cell::new("Shelf Root"),
        Cell::new(format!("{} {}", session.paths.root().display(), source_label(session.paths.source()).bright_black())),
    ]);
    files.add_row(vec![Cell::new("Config File"), Cell::new(file_state)]);
    files.add_row(vec![Cell::new("Movie Store"), Cell::new(store_dir.display())]);
    println!("{}", files);
    println!();

    let mut posters = styled_table();
    posters.set_header(vec![
        Cell::new("Posters").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    posters.add_row(vec![Cell::new("Proxy Base"), Cell::new(&config.posters.proxy_base)]);
    posters.add_row(vec![Cell::new("Fallback"), Cell::new(&config.posters.fallback)]);
    println!("{}", posters);
    println!();

    let mut logging = styled_table();
    logging.set_header(vec![
        Cell::new("Logging").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    logging.add_row(vec![Cell::new("Level"), Cell::new(&config.logging.level)]);
    let json_mode = match config.logging.json {
        Some(true) => "json".to_string(),
        Some(false) => "text".to_string(),
        None => "auto (json when not a terminal)".to_string(),
    };
    logging.add_row(vec![Cell::new("Format"), Cell::new(json_mode)]);
    let log_target = log_file
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());
    logging.add_row(vec![Cell::new("Output"), Cell::new(log_target)]);
    println!("{}", logging);

    Ok(())
}

fn init_config(session: &Session, force: bool, output: &Output) -> Result<()> {
    let config_file = session.paths.config_file();
    if config_file.exists() && !force {
        output.warn(
            Notice::new(format!(
                "Configuration already exists at {} (use --force to overwrite)",
                config_file.display()
            ))
            .with("configFile", config_file.display().to_string()),
        );
        return Ok(());
    }

    session
        .paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    output.success(
        Notice::new(format!("Wrote default configuration to {}", config_file.display()))
            .with("configFile", config_file.display().to_string())
            .with("storeDir", session.config.store_dir(&session.paths).display().to_string()),
    );
    Ok(())
}

fn source_label(source: ShelfSource) -> &'static str {
    match source {
        ShelfSource::Env => "(from REELSHELF_HOME)",
        ShelfSource::Container => "(container mount)",
        ShelfSource::Platform => "(user config directory)",
        ShelfSource::Explicit => "",
    }
}
