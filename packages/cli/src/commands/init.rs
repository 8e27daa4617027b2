use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Masthead title for the diary
    #[arg(short, long, default_value = "Campaign Diary")]
    pub masthead: String,

    /// Session source directory
    #[arg(short, long, default_value = "sessions")]
    pub src_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

const SAMPLE_SESSION: &str = r#"Type: recap
Date: Jan 1, 2024
Title: The Adventure Begins

The company assembles for the first time.
---
Type: conversation
Date: Jan 1, 2024

Elora: Did you hear that?
Brum: I heard nothing but my own stomach.
---
Type: quote
Date: Jan 1, 2024
Author: Brum

No dwarf ever drowned in ale.
"#;

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "!".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "Initializing diary project...".bright_blue().bold());

    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "\u{2713}".green(), args.src_dir);
    }

    let sample_file = src_dir.join("session-1.session");
    if !sample_file.exists() {
        fs::write(&sample_file, SAMPLE_SESSION)?;
        println!("  {} Created session-1.session", "\u{2713}".green());
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        masthead: args.masthead.clone(),
        ..Config::default()
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "\u{2713}".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("Next: run {} to build the site", "chronicle render".bright_white());
    Ok(())
}
