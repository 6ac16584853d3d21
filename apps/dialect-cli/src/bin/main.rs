use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dialect_core::config::{resolve_with_base, Config, PaletteSettings};
use dialect_core::traits::Navigator;
use dialect_core::types::Key;
use dialect_palette::{fetch, KeyboardHub, PaletteView, SearchEngine, ViewMode};
use dialect_store::MemoryStore;
use dialect_text::{highlight_sanitized, rank, sanitize_with_limit, to_marked, tokenize};

/// Pause between simulated keystrokes when replaying a typed line.
const KEYSTROKE_GAP: Duration = Duration::from_millis(30);

struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn go_to(&self, path: &str) {
        println!("→ navigate to {}", path);
    }
}

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <query|palette> [args...]", prog);
        eprintln!("  {} query \"<text>\" [posts_dir]", prog);
        eprintln!("  {} palette [posts_dir]   (stdin: text, :up, :down, :enter, :esc, :open, :close, :quit)", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn posts_dir(config: &Config, arg: Option<&String>) -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let dir = match arg {
        Some(dir) => dir.clone(),
        None => config.get::<String>("palette.posts_dir").unwrap_or_else(|_| "posts".to_string()),
    };
    resolve_with_base(&cwd, dir)
}

fn load_store(dir: &Path) -> anyhow::Result<MemoryStore> {
    MemoryStore::from_dir(dir).with_context(|| format!("loading posts from {}", dir.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.palette()?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "query" => {
            let text = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: dialect-search query \"<text>\" [posts_dir]"); std::process::exit(1)
            });
            let store = load_store(&posts_dir(&config, args.get(1)))?;
            run_query(&store, &text, &settings).await?;
        }
        "palette" => {
            let store = load_store(&posts_dir(&config, args.first()))?;
            run_palette(store, settings).await?;
        }
        _ => { eprintln!("Unknown command: {}", cmd); std::process::exit(1); }
    }
    Ok(())
}

async fn run_query(store: &MemoryStore, text: &str, settings: &PaletteSettings) -> anyhow::Result<()> {
    let sanitized = sanitize_with_limit(text, settings.max_query_chars);
    let records = fetch::search(store, &sanitized, settings).await?;
    let ranked = rank(records, &tokenize(&sanitized), settings.result_limit);
    println!("🔍 {} results for \"{}\"", ranked.len(), sanitized);
    for (i, r) in ranked.iter().enumerate() {
        let title = to_marked(&highlight_sanitized(&r.record.title, &sanitized), "[", "]");
        println!("  {}. score={:<4} {}  {}", i + 1, r.score, title, r.record.detail_path(&settings.detail_path_prefix));
    }
    Ok(())
}

async fn run_palette(store: MemoryStore, settings: PaletteSettings) -> anyhow::Result<()> {
    let mut engine = SearchEngine::new(Arc::new(store), PrintNavigator, settings, KeyboardHub::new());
    let settle = engine.settings().debounce() + Duration::from_millis(100);
    engine.open(true).await;
    print_view(&engine.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" => break,
            ":open" => engine.open(true).await,
            ":close" => engine.open(false).await,
            ":down" => { let outcome = engine.handle_key(Key::ArrowDown); debug!(?outcome, "key"); }
            ":up" => { let outcome = engine.handle_key(Key::ArrowUp); debug!(?outcome, "key"); }
            ":enter" => { let outcome = engine.handle_key(Key::Enter); debug!(?outcome, "key"); }
            ":esc" => { let outcome = engine.handle_key(Key::Escape); debug!(?outcome, "key"); }
            text => {
                // each line replaces the input, typed one character at a time
                engine.set_query("");
                let mut typed = String::new();
                for ch in text.chars() {
                    typed.push(ch);
                    engine.set_query(&typed);
                    tokio::time::sleep(KEYSTROKE_GAP).await;
                }
                tokio::time::sleep(settle).await;
            }
        }
        print_view(&engine.render());
    }
    Ok(())
}

fn print_view(view: &PaletteView) {
    if !view.visible { println!("(palette closed)"); return; }
    println!("\n> {}{}", view.query, if view.loading { "  …" } else { "" });
    if view.mode == ViewMode::Trending { println!("  Recent posts"); }
    if let Some(msg) = &view.empty_message { println!("  {}", msg); }
    for item in &view.items {
        let marker = if item.selected { "›" } else { " " };
        let score = item.score.map(|s| format!(" ({})", s)).unwrap_or_default();
        println!("  {} {}{}  {}", marker, to_marked(&item.title, "[", "]"), score, item.path);
    }
}
