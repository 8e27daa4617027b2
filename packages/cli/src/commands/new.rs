use crate::config::Config;
use anyhow::{anyhow, Result};
use chronicle_parser::{prepend, NewPost, PostType};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::io::Read;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Session number to add the post to
    #[arg(short, long)]
    pub session: u32,

    /// Post type (text, image, quote, conversation, recap, character, location, travel)
    #[arg(short = 't', long = "type", default_value = "text")]
    pub post_type: String,

    /// Date line; defaults to today as "Mon D, YYYY"
    #[arg(long)]
    pub date: Option<String>,

    /// Title (text, recap)
    #[arg(long)]
    pub title: Option<String>,

    /// Caption (image)
    #[arg(long)]
    pub caption: Option<String>,

    /// Author (quote)
    #[arg(long)]
    pub author: Option<String>,

    /// Name (character, location)
    #[arg(long)]
    pub name: Option<String>,

    /// Origin (travel)
    #[arg(long)]
    pub from: Option<String>,

    /// Destination (travel)
    #[arg(long)]
    pub to: Option<String>,

    /// Comma-separated character names (location)
    #[arg(long)]
    pub characters: Option<String>,

    /// Body text; read from stdin when omitted
    #[arg(long)]
    pub body: Option<String>,
}

pub fn new(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let post_type = PostType::parse(&args.post_type);
    if let PostType::Unknown(raw) = &post_type {
        return Err(anyhow!("Unknown post type: {}", raw));
    }

    let date = match &args.date {
        Some(date) => date.clone(),
        None => chrono::Local::now().format("%b %-d, %Y").to_string(),
    };

    let body = match &args.body {
        Some(body) => body.clone(),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut post = NewPost::new(post_type, date).body(body.trim_end());
    if let Some(title) = args.title {
        post = post.title(title);
    }
    if let Some(caption) = args.caption {
        post = post.caption(caption);
    }
    if let Some(author) = args.author {
        post = post.author(author);
    }
    if let Some(name) = args.name {
        post = post.name(name);
    }
    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        post = post.route(from.clone(), to.clone());
    }
    if let Some(characters) = args.characters {
        post = post.characters(characters);
    }

    let src_dir = config.get_src_dir(cwd);
    let path = src_dir.join(format!("session-{}.session", args.session));
    let existing = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    // Newest post on top; the whole document re-parses on the next render.
    let document = prepend(&post.serialize(), &existing);
    fs::create_dir_all(&src_dir)?;
    fs::write(&path, document)?;

    println!(
        "{} Added {} post to {}",
        "\u{2713}".green(),
        args.post_type,
        path.display()
    );
    Ok(())
}
