use anyhow::{Context, Result};
use std::{env, fs, process};

use stgy_markup_config::Config;
use stgy_markup_engine::{
    ExcerptOptions, deserialize, excerpt, parse, render_html, render_text, serialize,
};

enum Output {
    Html,
    Text,
    Snippet,
}

struct Args {
    file: String,
    output: Output,
    config: Option<String>,
    positions: bool,
    thumbnail: bool,
    /// Input is a cached snippet JSON rather than raw markup.
    from_snippet: bool,
}

fn usage() -> ! {
    eprintln!(
        "usage: stgy-markup <file> [--html|--text|--snippet] [--config <path>]\n\
         \x20                  [--positions] [--thumbnail] [--from-snippet]"
    );
    process::exit(2);
}

fn parse_args() -> Args {
    let mut args = Args {
        file: String::new(),
        output: Output::Html,
        config: None,
        positions: false,
        thumbnail: false,
        from_snippet: false,
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--html" => args.output = Output::Html,
            "--text" => args.output = Output::Text,
            "--snippet" => args.output = Output::Snippet,
            "--positions" => args.positions = true,
            "--thumbnail" => args.thumbnail = true,
            "--from-snippet" => args.from_snippet = true,
            "--config" => match iter.next() {
                Some(path) => args.config = Some(path),
                None => usage(),
            },
            _ if arg.starts_with('-') => usage(),
            _ if args.file.is_empty() => args.file = arg,
            _ => usage(),
        }
    }
    if args.file.is_empty() {
        usage();
    }
    args
}

fn main() -> Result<()> {
    let args = parse_args();

    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file))?;

    let mut doc = if args.from_snippet {
        deserialize(&content)
    } else {
        parse(&content)
    };

    if let Some(path) = &args.config
        && let Some(config) = Config::load_from_path(path)?
    {
        let opts = ExcerptOptions {
            grid_max_elements: config.grid_max_elements(),
            cutoff: config.cutoff_budget(),
            featured_only: false,
            media: config.url_rewrite_options(args.thumbnail)?,
        };
        doc = excerpt(&doc, &opts);
    }

    match args.output {
        Output::Html => println!("{}", render_html(&doc, args.positions)),
        Output::Text => println!("{}", render_text(&doc)),
        Output::Snippet => println!("{}", serialize(&doc)),
    }
    Ok(())
}
