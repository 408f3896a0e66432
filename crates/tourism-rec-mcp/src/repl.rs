//! Interactive REPL for the TourismRec MCP server.
//!
//! Launch with `tourism-rec-mcp repl` to enter interactive mode.
//! Type `/help` for available commands, Tab for completion.

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};

use tourism_rec::{stats, PlaceRef};

use crate::config::{resolve_dataset_path, EngineDefaults};
use crate::session::TourismSessionManager;
use crate::tools::render::tier;
use crate::tools::ToolRegistry;

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/info", "Show server capabilities and tools"),
    ("/tools", "List available MCP tools"),
    ("/load", "Load a .trec dataset file"),
    ("/stats", "Show dataset statistics"),
    ("/popular", "Top places, optionally in a city"),
    ("/similar", "Places similar to a place (id or name)"),
    ("/rate", "Rate a place: /rate <place> <1-5>"),
    ("/recommend", "Recommend for a user id, or for your ratings"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// REPL helper for tab completion.
#[derive(Default)]
struct TourismHelper;

impl Completer for TourismHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<16} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        // .trec file completion
        let (cmd, args) = input.split_once(' ').unwrap_or((input, ""));
        if cmd == "/load" {
            let mut files = Vec::new();
            if let Ok(entries) = std::fs::read_dir(".") {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().is_some_and(|e| e == "trec") {
                        if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                            files.push(name.to_string());
                        }
                    }
                }
            }
            files.sort();
            let prefix_start = input.len() - args.len();
            let matches: Vec<Pair> = files
                .iter()
                .filter(|f| f.starts_with(args.trim()))
                .map(|f| Pair {
                    display: f.clone(),
                    replacement: format!("{f} "),
                })
                .collect();
            return Ok((prefix_start, matches));
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for TourismHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for TourismHelper {}
impl Validator for TourismHelper {}
impl Helper for TourismHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Session state.
struct ReplState {
    defaults: EngineDefaults,
    session: Option<TourismSessionManager>,
}

impl ReplState {
    /// The loaded dataset, opening the default path on first use.
    fn session(&mut self) -> Option<&mut TourismSessionManager> {
        if self.session.is_none() {
            let path = resolve_dataset_path(None);
            match TourismSessionManager::open(&path, self.defaults) {
                Ok(session) => self.session = Some(session),
                Err(e) => {
                    eprintln!("  Cannot open dataset {path}: {e}");
                    return None;
                }
            }
        }
        self.session.as_mut()
    }
}

/// Run the interactive REPL.
pub fn run(defaults: EngineDefaults) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mtourism-rec-mcp v{}\x1b[0m \x1b[90m\u{00b7} Destination recommendations\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Press \x1b[36m/\x1b[0m to browse commands, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<TourismHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(TourismHelper));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    let hist_path = std::path::PathBuf::from(&home).join(".tourism_rec_mcp_history");
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let mut state = ReplState {
        defaults,
        session: None,
    };
    let prompt = " \x1b[36mtourism>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let input = line.strip_prefix('/').unwrap_or(line);
                if input.is_empty() {
                    cmd_help();
                    continue;
                }

                let (cmd, args) = input.split_once(' ').unwrap_or((input, ""));
                let args = args.trim();

                match cmd {
                    "exit" | "quit" => {
                        eprintln!("  Sampai jumpa!");
                        break;
                    }
                    "help" | "h" | "?" => cmd_help(),
                    "clear" | "cls" => eprint!("\x1b[2J\x1b[H"),
                    "info" => cmd_info(),
                    "tools" => cmd_tools(),
                    "load" => cmd_load(args, &mut state),
                    "stats" => cmd_stats(&mut state),
                    "popular" => cmd_popular(args, &mut state),
                    "similar" => cmd_similar(args, &mut state),
                    "rate" => cmd_rate(args, &mut state),
                    "recommend" => cmd_recommend(args, &mut state),
                    _ => {
                        eprintln!("  Unknown command '/{cmd}'. Type /help for commands.");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  Sampai jumpa!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(hist_path.parent().unwrap_or(std::path::Path::new(".")));
    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn parse_place(raw: &str) -> PlaceRef {
    match raw.parse::<u32>() {
        Ok(id) => PlaceRef::Id(id),
        Err(_) => PlaceRef::Name(raw.to_string()),
    }
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<18} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: Tab completion works for commands and .trec files.");
    eprintln!();
}

fn cmd_info() {
    let capabilities = crate::types::InitializeResult::default_result();
    let tools = ToolRegistry::list_tools();
    eprintln!();
    eprintln!(
        "  Server:   {} v{}",
        capabilities.server_info.name, capabilities.server_info.version
    );
    eprintln!("  Protocol: {}", capabilities.protocol_version);
    eprintln!("  Tools:    {}", tools.len());
    eprintln!();
}

fn cmd_tools() {
    let tools = ToolRegistry::list_tools();
    eprintln!();
    eprintln!("  {} MCP tools available:", tools.len());
    eprintln!();
    for tool in &tools {
        eprintln!(
            "    {:<28} {}",
            tool.name,
            tool.description.as_deref().unwrap_or("")
        );
    }
    eprintln!();
}

fn cmd_load(args: &str, state: &mut ReplState) {
    if args.is_empty() {
        eprintln!("  Usage: /load <file.trec>");
        return;
    }
    let path = args.split_whitespace().next().unwrap_or(args);
    match TourismSessionManager::open(path, state.defaults) {
        Ok(session) => {
            let dataset = session.dataset();
            eprintln!(
                "  Loaded: {path} ({} places, {} ratings)",
                dataset.catalog.len(),
                dataset.ratings.len()
            );
            state.session = Some(session);
        }
        Err(e) => {
            eprintln!("  Failed to load: {e}");
        }
    }
}

fn cmd_stats(state: &mut ReplState) {
    let Some(session) = state.session() else {
        return;
    };
    let dataset = session.dataset();
    let overview = stats::overview(&dataset.ratings, &dataset.catalog);
    let dist = stats::rating_distribution(&dataset.ratings);

    eprintln!();
    eprintln!("  Dataset: {}", session.file_path().display());
    eprintln!("    Places:  {}", overview.total_places);
    eprintln!("    Users:   {}", overview.total_users);
    eprintln!("    Ratings: {}", overview.total_ratings);
    if let Some(mean) = overview.mean_rating {
        eprintln!("    Mean:    {mean:.2}");
    }
    for (i, count) in dist.iter().enumerate() {
        eprintln!("    {} star: {count}", i + 1);
    }
    eprintln!();
}

fn cmd_popular(args: &str, state: &mut ReplState) {
    let Some(session) = state.session() else {
        return;
    };
    let city = (!args.is_empty()).then_some(args);
    let places = session
        .dataset()
        .catalog
        .popular(city, session.defaults().popular_n);
    if places.is_empty() {
        eprintln!("  No places found.");
        return;
    }
    eprintln!();
    for place in places {
        eprintln!(
            "    {:>3}  {:<34} {:<14} {:.1}",
            place.id, place.name, place.city, place.rating
        );
    }
    eprintln!();
}

fn cmd_similar(args: &str, state: &mut ReplState) {
    if args.is_empty() {
        eprintln!("  Usage: /similar <place id or name>");
        return;
    }
    let Some(session) = state.session() else {
        return;
    };
    let k = session.defaults().content_top_k;
    match session.similar_places(&parse_place(args), k) {
        Ok((query, matches)) => {
            eprintln!();
            eprintln!("  Similar to {} ({}):", query.name, query.city);
            for m in matches {
                let name = session
                    .dataset()
                    .catalog
                    .get(m.place_id)
                    .map_or("?", |p| p.name.as_str());
                eprintln!("    {:>3}  {:<34} {:.3}", m.place_id, name, m.similarity);
            }
            eprintln!();
        }
        Err(e) => eprintln!("  {e}"),
    }
}

fn cmd_rate(args: &str, state: &mut ReplState) {
    let Some((place, rating)) = args.rsplit_once(' ') else {
        eprintln!("  Usage: /rate <place id or name> <1-5>");
        return;
    };
    let Ok(rating) = rating.parse::<i64>() else {
        eprintln!("  Rating must be a number from 1 to 5");
        return;
    };
    let Some(session) = state.session() else {
        return;
    };
    match session.rate_place(&parse_place(place.trim()), rating) {
        Ok((place, _)) => eprintln!("  Rated {} = {rating}", place.name),
        Err(e) => eprintln!("  {e}"),
    }
}

fn cmd_recommend(args: &str, state: &mut ReplState) {
    let Some(session) = state.session() else {
        return;
    };
    let config = match session.recommend_config(None, None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("  {e}");
            return;
        }
    };
    let result = if args.is_empty() {
        session.recommend_for_session(&config)
    } else {
        match args.parse() {
            Ok(id) => session.recommend_for_user(id, &config),
            Err(_) => {
                eprintln!("  Usage: /recommend [user id]");
                return;
            }
        }
    };

    match result {
        Ok(rec) => {
            eprintln!();
            eprintln!(
                "  {} neighbors, {} candidates",
                rec.neighbors.len(),
                rec.candidate_count
            );
            for (i, p) in rec.predictions().iter().enumerate() {
                let name = session
                    .dataset()
                    .catalog
                    .get(p.place_id)
                    .map_or("?", |pl| pl.name.as_str());
                eprintln!(
                    "    {:>2}. {:<34} {:.2}  {}",
                    i + 1,
                    name,
                    p.predicted_rating,
                    tier(p.predicted_rating)
                );
            }
            if rec.predictions().is_empty() {
                eprintln!("  {}", crate::tools::render::outcome_message(&rec.outcome));
            }
            eprintln!();
        }
        Err(e) => eprintln!("  {e}"),
    }
}
