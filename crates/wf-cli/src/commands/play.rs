use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use wf_engine::{Effect, GameSession, Route, SessionConfig};
use wf_world::{DangerTier, LocationId};

/// Starting purse for an interactive session.
const STARTING_GOLD: i64 = 100;

pub fn run(world: Option<&Path>, start: Option<&str>) -> Result<(), String> {
    let atlas = super::load_world(world)?;

    let mut config = SessionConfig::default();
    if let Some(start) = start {
        config = config.with_start(super::resolve_location(&atlas, start)?);
    }

    let mut session = GameSession::new(atlas, config)
        .map_err(|e| format!("failed to start session: {e}"))?;
    session.player_mut().adjust_stat("gold", STARTING_GOLD);

    println!("  {} Wayfarer session", "Starting".bold());
    print_status(&session);
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }

        if let Err(message) = dispatch(&mut session, input) {
            println!("{}\n", message.yellow());
        }
    }

    Ok(())
}

fn dispatch(session: &mut GameSession, input: &str) -> Result<(), String> {
    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "help" | "h" => {
            print_help();
            Ok(())
        }
        "status" | "st" => {
            print_status(session);
            Ok(())
        }
        "routes" | "r" => {
            print_routes(session);
            Ok(())
        }
        "map" | "m" => {
            print_map(session);
            Ok(())
        }
        "quests" => {
            print_quests(session);
            Ok(())
        }
        "context" => print_context(session),
        "go" => go(session, rest),
        "arrive" => arrive(session),
        "unlock" => unlock(session, rest),
        "effects" => effects(session, rest),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

fn print_help() {
    println!("  routes          list travel options from here");
    println!("  go <n|name>     depart along a route (by list number or destination)");
    println!("  arrive          finish the journey in progress");
    println!("  status          where you are, gold, reputation");
    println!("  quests          the quest log");
    println!("  map             renderable path segments from here");
    println!("  unlock <id>     unlock a destination for cross-kingdom travel");
    println!("  effects <json>  apply a JSON effect batch");
    println!("  context         travel context as JSON");
    println!("  quit            leave the session");
    println!();
}

fn location_name(session: &GameSession, id: &LocationId) -> String {
    session
        .atlas()
        .poi(id)
        .map(|poi| poi.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn print_status(session: &GameSession) {
    let here = location_name(session, &session.travel().location);
    println!("  Location: {} ({})", here.bold(), session.travel().kingdom);
    println!(
        "  Gold: {} | Reputation: {}",
        session.player().stat("gold"),
        session.player().stat("reputation")
    );
    if let Some(progress) = &session.travel().traveling {
        println!(
            "  In transit to {} — {} of {} day(s) remaining",
            location_name(session, &progress.to),
            progress.days_remaining,
            progress.total_days
        );
    }
    if let Some(forced) = &session.travel().travel_quest {
        println!(
            "  {} Travel required: {} — {}",
            "!".red(),
            location_name(session, &forced.target),
            forced.reason
        );
    }
    println!();
}

fn print_routes(session: &GameSession) {
    let routes = session.available_routes();
    if routes.is_empty() {
        println!("  No routes from here.\n");
        return;
    }
    for (i, route) in routes.iter().enumerate() {
        let danger = match route.danger {
            DangerTier::Safe => "safe".green(),
            DangerTier::Risky => "risky".yellow(),
            DangerTier::Dangerous => "dangerous".red(),
        };
        let lock = if route.is_unlocked { "" } else { " [locked]" };
        println!(
            "  {:>2}. {} — {} day(s), {} gold, {}{}",
            i + 1,
            location_name(session, &route.to),
            route.distance_days,
            route.cost,
            danger,
            lock.dimmed()
        );
    }
    println!();
}

fn print_map(session: &GameSession) {
    let segments = session.travel_paths(false);
    if segments.is_empty() {
        println!("  Nothing to draw.\n");
        return;
    }
    for segment in &segments {
        let style = if segment.is_locked {
            "locked"
        } else if segment.dashed {
            "dashed"
        } else {
            "solid"
        };
        println!(
            "  {} -> {}  [{} | {} day(s) | {} gold | {}]",
            segment.from, segment.to, style, segment.distance_days, segment.cost, segment.color
        );
    }
    println!();
}

fn print_quests(session: &GameSession) {
    let quests = session.quests().all();
    if quests.is_empty() {
        println!("  No quests.\n");
        return;
    }
    for quest in quests {
        println!(
            "  [{}] {} — {}",
            quest.status.to_string().bold(),
            quest.title,
            quest.id.to_string().dimmed()
        );
        if let Some(objective) = quest.current_objective() {
            println!("      next: {}", objective.description);
        }
    }
    println!();
}

fn print_context(session: &GameSession) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&session.travel_context())
        .map_err(|e| e.to_string())?;
    println!("{json}\n");
    Ok(())
}

fn go(session: &mut GameSession, arg: &str) -> Result<(), String> {
    if arg.is_empty() {
        return Err("usage: go <number|destination>".into());
    }
    let routes = session.available_routes();
    let route = pick_route(session, &routes, arg)
        .ok_or_else(|| format!("no route matching '{arg}' (see 'routes')"))?
        .clone();

    if !session.travel_to(&route) {
        return Err("cannot take that route right now".into());
    }
    println!(
        "  Departing for {} — {} day(s), {} gold.\n",
        location_name(session, &route.to).bold(),
        route.distance_days,
        route.cost
    );
    Ok(())
}

fn pick_route<'a>(session: &GameSession, routes: &'a [Route], arg: &str) -> Option<&'a Route> {
    if let Ok(n) = arg.parse::<usize>() {
        return (1..=routes.len()).contains(&n).then(|| &routes[n - 1]);
    }
    routes.iter().find(|route| {
        route.to.as_str().eq_ignore_ascii_case(arg)
            || location_name(session, &route.to).eq_ignore_ascii_case(arg)
    })
}

fn arrive(session: &mut GameSession) -> Result<(), String> {
    let Some(here) = session.arrive() else {
        return Err("not traveling".into());
    };
    println!("  Arrived at {}.\n", location_name(session, &here).bold());
    Ok(())
}

fn unlock(session: &mut GameSession, arg: &str) -> Result<(), String> {
    if arg.is_empty() {
        return Err("usage: unlock <location id>".into());
    }
    let id = super::resolve_location(session.atlas(), arg)?;
    session.unlock_new_location(&id);
    println!("  Unlocked {}.\n", location_name(session, &id));
    Ok(())
}

fn effects(session: &mut GameSession, raw: &str) -> Result<(), String> {
    if raw.is_empty() {
        return Err("usage: effects <json array>".into());
    }
    let batch: Vec<Effect> =
        serde_json::from_str(raw).map_err(|e| format!("invalid effects: {e}"))?;
    let scene = session.advance_scene();
    let report = session.process_effects(&batch, scene);

    for note in &report.applied {
        println!("  {} {note}", "+".green());
    }
    for reason in &report.skipped {
        println!("  {} {reason}", "-".yellow());
    }
    if let Some(forced) = &report.travel_required {
        println!(
            "  {} Travel required: {} — {}",
            "!".red().bold(),
            location_name(session, &forced.target),
            forced.reason
        );
    }
    println!();
    Ok(())
}
