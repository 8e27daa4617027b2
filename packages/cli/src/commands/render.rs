use crate::config::Config;
use anyhow::{anyhow, Result};
use chronicle_parser::parse;
use chronicle_renderer::{organize, EmojiMap, PortraitBook, Renderer, Session};
use clap::Args;
use colored::Colorize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Session directory to render (overrides the config srcDir)
    pub path: Option<String>,

    /// Print rendered pages to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let src_dir = resolve_src_dir(args.path.as_deref(), &config, cwd);

    println!("{}", "Rendering session files...".bright_blue().bold());

    let session_files = find_session_files(&src_dir);
    if session_files.is_empty() {
        // A missing diary is the empty/welcome state, not an error.
        println!(
            "{} No session files found in {}",
            "!".yellow(),
            src_dir.display()
        );
    } else {
        println!("Found {} session files", session_files.len());
    }

    let renderer = Renderer::new(
        PortraitBook::new(&config.portraits, config.default_portrait.clone()),
        EmojiMap::with_overrides(&config.emoji),
    );

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    let mut sessions: Vec<Session> = Vec::new();
    let mut used_numbers = BTreeSet::new();
    let mut error_count = 0;

    for file in &session_files {
        let relative_path = file.strip_prefix(&src_dir).unwrap_or(file);
        let outcome = claim_number(file, &mut used_numbers)
            .and_then(|number| render_file(file, number, &renderer, &config, &args, &out_dir));
        match outcome {
            Ok(session) => {
                println!(
                    "  {} {} \u{2192} session-{}.html",
                    "\u{2713}".green(),
                    relative_path.display(),
                    session.number
                );
                sessions.push(session);
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "\u{2717}".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    // Newest session first on the index.
    sessions.sort_by(|a, b| b.number.cmp(&a.number));
    let index = renderer.render_index(&sessions, &config.masthead, &config.theme_color)?;

    if args.stdout {
        println!("{}", index);
    } else {
        fs::create_dir_all(&out_dir)?;
        fs::write(out_dir.join("index.html"), index)?;
        println!("  {} index.html", "\u{2713}".green());
    }

    println!();
    if error_count == 0 {
        println!("{} Rendered {} sessions", "\u{2713}".green(), sessions.len());
        Ok(())
    } else {
        Err(anyhow!("{} session files failed to render", error_count))
    }
}

fn render_file(
    file: &Path,
    number: u32,
    renderer: &Renderer,
    config: &Config,
    args: &RenderArgs,
    out_dir: &Path,
) -> Result<Session> {
    let source = fs::read_to_string(file)?;
    let session = organize(number, parse(&source));
    let page = renderer.render_page(&session, &config.masthead, &config.theme_color)?;

    if args.stdout {
        println!("{}", page);
    } else {
        fs::create_dir_all(out_dir)?;
        fs::write(out_dir.join(format!("session-{}.html", session.number)), page)?;
    }

    Ok(session)
}

/// A positional path wins over the configured source directory.
fn resolve_src_dir(path: Option<&str>, config: &Config, cwd: &str) -> PathBuf {
    match path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_src_dir(cwd),
    }
}

/// All .session files under the source directory, sorted by path for a
/// stable report order.
fn find_session_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.path().to_path_buf())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("session"))
        .collect();
    files.sort();
    files
}

/// Session number from a `session-N.session` file name.
fn session_number(path: &Path) -> Option<u32> {
    path.file_stem()?
        .to_str()?
        .strip_prefix("session-")?
        .parse()
        .ok()
}

/// Resolve each file to a unique session number. Files not matching the
/// `session-N.session` pattern take the first free number, so two oddly
/// named files never overwrite each other's output page.
fn claim_number(path: &Path, used: &mut BTreeSet<u32>) -> Result<u32> {
    let number = match session_number(path) {
        Some(number) => {
            if used.contains(&number) {
                return Err(anyhow!("duplicate session number {}", number));
            }
            number
        }
        None => (0..).find(|n| !used.contains(n)).unwrap_or(0),
    };
    used.insert(number);
    Ok(number)
}
