//! Initial seed search CLI
//!
//! Usage: gen5seed_search --mac <MAC> --version <black|white> --vframe <N|MIN-MAX>
//!        [--vcount <N|MIN-MAX>] --date <YYYY-MM-DD> --time <HH:MM:SS>
//!        [--full-timer0] [--workers N]
//!
//! Then declare battle turns and run the search interactively.
//!
//! Example:
//!   gen5seed_search --mac 00:11:22:33:44:55 --version black --vframe 8-12 --vcount 95 \
//!       --date 2011-03-06 --time 12:34:56
//!   > turn other n sure-hit
//!   > compute
//!   > turn inflict-hit y miss
//!   > check

use gen5seed_search::app::enumerator::candidate_count_upper_bound;
use gen5seed_search::{
    BattleTurnOutcome, EnemyAction, GameDateTime, GameVersion, MacAddress, ParameterError,
    PlayerAction, SearchConfig, SeedParameters, SeedSet, StatusProgress, Timer0Window, parse_date,
    parse_range, parse_time,
};
use std::env;
use std::io::{self, Write};
use std::time::Instant;

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} --mac <MAC> --version <black|white> --vframe <N|MIN-MAX> [--vcount <N|MIN-MAX>]",
        program
    );
    eprintln!("       --date <YYYY-MM-DD> --time <HH:MM:SS> [--full-timer0] [--workers N]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --mac <MAC>         DS MAC address (e.g. 00:11:22:33:44:55)");
    eprintln!("  --version <V>       Game version: black or white");
    eprintln!("  --vframe <N|MIN-MAX>  VFrame window");
    eprintln!("  --vcount <N|MIN-MAX>  VCount window (default: 0-262)");
    eprintln!("  --date <DATE>       DS clock date at boot");
    eprintln!("  --time <TIME>       DS clock time at boot");
    eprintln!("  --full-timer0       Try every Timer0 value instead of the predicted window");
    eprintln!("  --workers <N>       Worker threads (default: 3/4 of available threads)");
}

fn print_commands() {
    println!("Commands:");
    println!("  turn <player> <priority:y|n> <enemy> [recovered <turns> <rolls> | status <turns>]");
    println!("      player: inflict-hit | inflict-miss | other");
    println!("      enemy:  hurt-itself | miss | hit | hit-crit | sure-hit | sure-hit-crit");
    println!("  compute   Enumerate candidates with the turns declared so far");
    println!("  check     Check whether the remaining candidates share one seed");
    println!("  reset     Drop all candidates and declared turns");
    println!("  help      Show this message");
    println!("  q         Quit");
}

#[derive(Default)]
struct Args {
    mac: Option<String>,
    version: Option<String>,
    vframe: Option<String>,
    vcount: Option<String>,
    date: Option<String>,
    time: Option<String>,
    full_timer0: bool,
    workers: Option<usize>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        let option = args[i].as_str();
        if option == "--full-timer0" {
            parsed.full_timer0 = true;
            i += 1;
            continue;
        }

        let value = args
            .get(i + 1)
            .cloned()
            .ok_or_else(|| format!("{} requires a value", option))?;
        match option {
            "--mac" => parsed.mac = Some(value),
            "--version" => parsed.version = Some(value),
            "--vframe" => parsed.vframe = Some(value),
            "--vcount" => parsed.vcount = Some(value),
            "--date" => parsed.date = Some(value),
            "--time" => parsed.time = Some(value),
            "--workers" => {
                let workers = value
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| format!("Invalid worker count: {}", value))?;
                parsed.workers = Some(workers);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 2;
    }

    Ok(parsed)
}

fn build_parameters(args: &Args) -> Result<SeedParameters, ParameterError> {
    let mac: MacAddress = args
        .mac
        .as_deref()
        .ok_or(ParameterError::MacIncomplete)?
        .parse()?;
    let version: GameVersion = args.version.as_deref().unwrap_or_default().parse()?;
    let vframe = parse_range("VFrame", args.vframe.as_deref().unwrap_or_default())?;
    let vcount = match args.vcount.as_deref() {
        Some(v) => parse_range("VCount", v)?,
        None => SeedParameters::full_vcount(),
    };
    let date = parse_date(args.date.as_deref().unwrap_or_default())?;
    let time = parse_time(args.time.as_deref().unwrap_or_default())?;

    let params = SeedParameters::new(mac, version, vcount, vframe, GameDateTime::new(date, time))?;
    Ok(if args.full_timer0 {
        params.with_timer0_window(Timer0Window::Full)
    } else {
        params
    })
}

fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.parse()
        .map_err(|_| format!("Expected a number in range, got '{}'", s))
}

/// Parse the arguments of a `turn` command
fn parse_turn(words: &[&str]) -> Result<BattleTurnOutcome, String> {
    let [player, priority, enemy, status @ ..] = words else {
        return Err("turn requires <player> <priority:y|n> <enemy>".to_string());
    };

    let player: PlayerAction = player.parse().map_err(|e| format!("{}", e))?;
    let priority = match priority.to_ascii_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        other => return Err(format!("Priority must be y or n, got '{}'", other)),
    };
    let enemy: EnemyAction = enemy.parse().map_err(|e| format!("{}", e))?;

    let status = match status {
        [] => StatusProgress::None,
        ["status", turns] => StatusProgress::Active {
            turns: parse_number(turns)?,
        },
        ["recovered", turns, rolls] => StatusProgress::Recovered {
            turns: parse_number(turns)?,
            rolls: parse_number(rolls)?,
        },
        _ => {
            return Err(
                "Status must be 'recovered <turns> <rolls>' or 'status <turns>'".to_string(),
            );
        }
    };

    BattleTurnOutcome::new(player, priority, status, enemy).map_err(|e| format!("{}", e))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("gen5seed_search", String::as_str);

    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            print_usage(program);
            std::process::exit(1);
        }
    };

    let params = match build_parameters(&parsed) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(program);
            std::process::exit(1);
        }
    };

    let mut config = SearchConfig::default();
    if let Some(workers) = parsed.workers {
        config = config.with_workers(workers);
    }

    println!("Gen 5 initial seed search");
    println!("  MAC:       {}", params.mac);
    println!("  Version:   {}", params.version);
    println!(
        "  VFrame:    {}-{}",
        params.vframe.start(),
        params.vframe.end()
    );
    println!(
        "  VCount:    {}-{}",
        params.vcount.start(),
        params.vcount.end()
    );
    println!("  DateTime:  {}", params.datetime);
    println!("  Timer0:    {:?}", params.timer0_window);
    println!("  Workers:   {}", config.workers);
    println!();
    print_commands();

    let mut seed_set = SeedSet::with_config(config);

    loop {
        print!("\n> ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                eprintln!("Error reading input.");
                continue;
            }
        }

        let words: Vec<&str> = input.split_whitespace().collect();
        let Some((command, rest)) = words.split_first() else {
            continue;
        };

        match command.to_ascii_lowercase().as_str() {
            "q" | "quit" => {
                println!("Goodbye!");
                break;
            }
            "help" => print_commands(),
            "turn" => {
                let outcome = match parse_turn(rest) {
                    Ok(outcome) => outcome,
                    Err(msg) => {
                        eprintln!("Error: {}", msg);
                        continue;
                    }
                };

                let start = Instant::now();
                match seed_set.add_turn(outcome) {
                    Ok(report) => println!("{}", report),
                    Err(e) => eprintln!("Error: {}", e),
                }
                println!(
                    "Turn {} ({}), {} RNG advances total, {:.2} seconds",
                    seed_set.turns().len(),
                    outcome,
                    seed_set.rng_advances(),
                    start.elapsed().as_secs_f64()
                );
            }
            "compute" => {
                println!(
                    "Enumerating up to {} combinations with {} declared turn(s)...",
                    candidate_count_upper_bound(&params),
                    seed_set.turns().len()
                );
                let start = Instant::now();
                match seed_set.compute(&params) {
                    Ok(report) => println!("{}", report),
                    Err(e) => eprintln!("Error: {}", e),
                }
                println!(
                    "Search completed in {:.2} seconds.",
                    start.elapsed().as_secs_f64()
                );
            }
            "check" => match seed_set.check_uniqueness() {
                Some(report) => println!("{}", report),
                None => println!("{} seed(s) remaining, nothing to check", seed_set.len()),
            },
            "reset" => {
                seed_set.reset();
                println!("Cleared all seeds and battle turns");
            }
            other => {
                eprintln!("Unknown command: '{}'. Type 'help' for a list.", other);
            }
        }
    }
}
