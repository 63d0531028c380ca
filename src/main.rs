use chrono::Utc;
use gridquest::build_info;
use gridquest::character::{ItemKind, SHOP_CATALOG};
use gridquest::combat::{CombatAction, CombatEvent, CombatPhase};
use gridquest::config::Config;
use gridquest::core::exploration::{ExploreOutcome, ItemUse, MoveOutcome};
use gridquest::persistence::{FileStore, PersistenceGateway, SaveSnapshot};
use gridquest::world::{get_region, Direction};
use gridquest::{ConnectOutcome, Game, GameError, HostIdentity, TICK_INTERVAL_MS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

struct CliArgs {
    config_path: Option<PathBuf>,
    name: Option<String>,
    seed: Option<u64>,
    verbosity: u8,
}

fn print_usage() {
    println!("Gridquest - turn-based grid exploration\n");
    println!("Usage: gridquest [options]\n");
    println!("Options:");
    println!("  --config <path>  Config file (default: gridquest.toml)");
    println!("  --name <name>    Player name for a new game");
    println!("  --seed <n>       Fixed random seed");
    println!("  -v, -vv          More log output on stderr");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
}

fn parse_args() -> CliArgs {
    let mut parsed = CliArgs {
        config_path: None,
        name: None,
        seed: None,
        verbosity: 0,
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("gridquest {}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--config" => parsed.config_path = args.next().map(PathBuf::from),
            "--name" => parsed.name = args.next(),
            "--seed" => match args.next().and_then(|s| s.parse().ok()) {
                Some(seed) => parsed.seed = Some(seed),
                None => {
                    eprintln!("--seed needs a number");
                    std::process::exit(1);
                }
            },
            "-v" => parsed.verbosity = parsed.verbosity.max(1),
            "-vv" => parsed.verbosity = 2,
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'gridquest --help' for usage.");
                std::process::exit(1);
            }
        }
    }
    parsed
}

fn init_logging(config: &Config, verbosity: u8) {
    use std::io::Write;
    let level = match verbosity {
        0 => config.log_level().unwrap_or_else(|e| {
            eprintln!("{}; using warn", e);
            log::LevelFilter::Warn
        }),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            let ts = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(buf, "{} [{}] {}", ts, record.level(), record.args())
        })
        .init();
}

fn now() -> i64 {
    Utc::now().timestamp()
}

fn main() -> io::Result<()> {
    let args = parse_args();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(args))
}

async fn run(args: CliArgs) -> io::Result<()> {
    let config_path = args
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("gridquest.toml"));
    let config = match Config::load(&config_path).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}; using defaults", e);
            Config::default()
        }
    };
    init_logging(&config, args.verbosity);

    let mut rng = match args.seed.or(config.game.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let save_dir = match config.storage.dir.clone() {
        Some(dir) => dir,
        None => FileStore::default_dir()?,
    };
    log::debug!("saves live in {}", save_dir.display());
    let gateway = Rc::new(PersistenceGateway::with_key(
        FileStore::new(save_dir),
        config.storage.key.clone(),
    ));

    let identity = args
        .name
        .map(|name| HostIdentity {
            id: "local".to_string(),
            display_name: name,
        })
        .or_else(|| config.host_identity());

    let mut game = Game::new();
    let saved = gateway.load_or_fresh().await;
    match game.connect(identity.as_ref(), saved, now(), &mut rng) {
        Ok(ConnectOutcome::NewGame) | Ok(ConnectOutcome::AlreadyConnected) => {
            if let Some(state) = game.state() {
                println!("Welcome, {}! A new adventure begins.", state.player.name());
            }
        }
        Ok(ConnectOutcome::Resumed) => {
            if let Some(state) = game.state() {
                println!("Welcome back, {}!", state.player.name());
            }
        }
        Err(e) => {
            println!("{}", e);
            println!(
                "Pass --name or set [identity] in {} to play.",
                config_path.display()
            );
            return Ok(());
        }
    }

    // Single writer keeps saves in the order they were taken
    let (save_tx, mut save_rx) = mpsc::unbounded_channel::<SaveSnapshot>();
    let writer_gateway = Rc::clone(&gateway);
    let writer = tokio::task::spawn_local(async move {
        while let Some(snapshot) = save_rx.recv().await {
            if let Err(e) = writer_gateway.write(snapshot).await {
                log::warn!("autosave failed: {}", e);
            }
        }
    });

    queue_save(&mut game, &save_tx);
    print_status(&game);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Ok(restored) = game.tick(now()) {
                    if restored > 0 {
                        println!("You feel rested (+{} energy).", restored);
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_command(&mut game, line.trim(), &mut rng) {
                    break;
                }
            }
        }

        queue_save(&mut game, &save_tx);
    }

    queue_save(&mut game, &save_tx);
    drop(save_tx);
    if let Err(e) = writer.await {
        log::warn!("save writer crashed: {}", e);
    }
    println!("Farewell.");
    Ok(())
}

/// Hands the latest snapshot, if any, to the save writer without waiting.
fn queue_save(game: &mut Game, save_tx: &mpsc::UnboundedSender<SaveSnapshot>) {
    if let Some(snapshot) = game.take_pending_save() {
        if save_tx.send(snapshot).is_err() {
            log::warn!("save writer stopped; progress is not being saved");
        }
    }
}

/// Runs one typed command. Returns false to quit.
fn handle_command(game: &mut Game, line: &str, rng: &mut StdRng) -> bool {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return true;
    };
    let argument = words.collect::<Vec<_>>().join(" ");

    if matches!(command, "quit" | "q" | "exit") {
        return false;
    }
    if matches!(command, "help" | "?") {
        print_help(game.in_combat());
        return true;
    }
    if matches!(command, "stats" | "status") {
        print_status(game);
        return true;
    }

    if game.in_combat() {
        match CombatAction::parse(command) {
            Some(action) => match game.combat_action(action, now(), rng) {
                Ok(step) => print_combat(&step.events, &step.phase),
                Err(e) => println!("{}", e),
            },
            None => println!("You are in a fight! attack, potion, boost or flee."),
        }
        return true;
    }

    let result = match command {
        "map" => {
            print_map(game);
            Ok(())
        }
        "explore" | "x" => game.explore(now(), rng).map(|outcome| match outcome {
            ExploreOutcome::FoundGold { amount } => println!("You found {} gold!", amount),
            ExploreOutcome::Encounter(session) => println!(
                "A {} appears! (HP {}, attack {})",
                session.monster_name, session.monster_hp, session.monster_attack
            ),
        }),
        "shop" => {
            print_shop(game);
            Ok(())
        }
        "buy" => match ItemKind::parse(&argument) {
            Some(kind) => game.buy(kind).map(|p| {
                println!("Bought a {} for {} gold ({} left).", p.kind, p.price, p.gold_left)
            }),
            None => {
                println!("Buy what? Try 'shop' to see the wares.");
                Ok(())
            }
        },
        "use" => match ItemKind::parse(&argument) {
            Some(kind) => game.use_item(kind).map(|used| match used {
                ItemUse::Healed { amount, hp } => println!("Healed {} HP (now {}).", amount, hp),
                ItemUse::Energized { amount, energy } => {
                    println!("Restored {} energy (now {}).", amount, energy)
                }
            }),
            None => {
                println!("Use what? healthPotion or energyPotion.");
                Ok(())
            }
        },
        other => {
            let target = if matches!(other, "move" | "go") {
                argument.as_str()
            } else {
                other
            };
            match Direction::parse(target) {
                Some(direction) => game.move_player(direction, now()).map(|outcome| match outcome {
                    MoveOutcome::Moved { to, region } => println!(
                        "You travel to {} at ({}, {}).",
                        get_region(region).name,
                        to.x,
                        to.y
                    ),
                    MoveOutcome::Blocked => println!("You cannot go further that way."),
                }),
                None => {
                    println!("Unknown command '{}'. Type 'help'.", line);
                    Ok(())
                }
            }
        }
    };

    if let Err(e) = result {
        report_error(&e);
    }
    true
}

fn report_error(error: &GameError) {
    println!("{}", error);
}

fn print_help(in_combat: bool) {
    if in_combat {
        println!("Combat: attack (a), potion (p), boost (b), flee (f)");
    } else {
        println!("Travel:  n / s / e / w, or 'move <direction>'");
        println!("Explore: explore (x)");
        println!("Shop:    shop, buy <item>, use <item>");
    }
    println!("Other:   stats, map, help, quit");
}

fn print_status(game: &Game) {
    let Some(state) = game.state() else {
        println!("Waiting for a player.");
        return;
    };
    let p = &state.player;
    let region = state.current_region();
    println!(
        "{} | Lv {} ({} xp) | HP {}/{} | ATK {} | Energy {}/{} | Gold {}",
        p.name(),
        p.level(),
        p.xp(),
        p.hp(),
        p.max_hp(),
        p.attack(),
        p.energy(),
        p.max_energy(),
        p.gold()
    );
    let inventory: Vec<String> = ItemKind::all()
        .iter()
        .map(|k| format!("{} x{}", k, p.inventory().count(*k)))
        .collect();
    println!("Items: {}", inventory.join(", "));
    println!("{}: {}", region.name, region.description);
    if let Some(session) = game.combat() {
        println!(
            "Fighting {} (HP {}/{}), your attack {}",
            session.monster_name, session.monster_hp, session.monster_max_hp, session.attack_power
        );
    }
}

fn print_map(game: &Game) {
    let Some(state) = game.state() else {
        return;
    };
    let here = state.player.position();
    for (y, row) in state.map.rows().iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(x, kind)| {
                let letter = get_region(*kind).name.chars().next().unwrap_or('?');
                if here.x == x && here.y == y {
                    format!("[{}]", letter)
                } else {
                    format!(" {} ", letter)
                }
            })
            .collect();
        println!("{}", cells.join(""));
    }
}

fn print_shop(game: &Game) {
    let Some(state) = game.state() else {
        return;
    };
    if !state.current_region().has_shop {
        println!("{}", GameError::NoShopHere);
        return;
    }
    for item in SHOP_CATALOG.iter() {
        println!(
            "  {:<14} {:>3} gold  {}  (buy {})",
            item.name,
            item.price,
            item.effect,
            item.kind.key()
        );
    }
}

fn print_combat(events: &[CombatEvent], phase: &CombatPhase) {
    for event in events {
        match event {
            CombatEvent::PlayerAttack {
                damage,
                was_crit,
                monster_hp,
            } => println!(
                "You hit for {}{} (monster HP {}).",
                damage,
                if *was_crit { " - critical!" } else { "" },
                monster_hp
            ),
            CombatEvent::MonsterAttack {
                damage,
                was_crit,
                player_hp,
            } => println!(
                "The monster hits you for {}{} (HP {}).",
                damage,
                if *was_crit { " - critical!" } else { "" },
                player_hp
            ),
            CombatEvent::HealthPotionUsed { healed, player_hp } => {
                println!("You drink a potion: +{} HP (HP {}).", healed, player_hp)
            }
            CombatEvent::DamageBoosterUsed { attack_power } => {
                println!("Power surges through you: attack {} this fight.", attack_power)
            }
            CombatEvent::FleeFailed { damage, player_hp } => println!(
                "You fail to escape and take {} damage (HP {}).",
                damage, player_hp
            ),
            CombatEvent::Fled => println!("You escaped!"),
            CombatEvent::MonsterDefeated {
                xp_gained,
                gold_gained,
            } => println!("Victory! +{} xp, +{} gold.", xp_gained, gold_gained),
            CombatEvent::LevelUp(level_up) => println!(
                "Level up! You are now level {} (max HP {}, attack {}).",
                level_up.new_level, level_up.max_hp, level_up.attack
            ),
            CombatEvent::PlayerDefeated => println!("You have fallen..."),
        }
    }
    if *phase == CombatPhase::Defeat {
        println!("Game over. A new journey begins.");
    }
}
