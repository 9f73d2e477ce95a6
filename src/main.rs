use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use xianxia::character::types::{Profession, Talent};
use xianxia::persistence::codec::SaveDocument;
use xianxia::persistence::store::SaveStore;
use xianxia::utils::build_info::version_string;
use xianxia::{GameConfig, GameError, GameSession, TickEvent};

/// Options for `xianxia play`.
#[derive(Debug)]
struct PlayOptions {
    name: Option<String>,
    profession: Profession,
    talent: Talent,
    seconds: u64,
    seed: Option<u64>,
    realtime: bool,
    fast: bool,
    auto_play: bool,
    tick_ms: Option<u64>,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            name: None,
            profession: Profession::default(),
            talent: Talent::default(),
            seconds: 60,
            seed: None,
            realtime: false,
            fast: false,
            auto_play: true,
            tick_ms: None,
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--version" | "-v") => {
            println!("{}", version_string());
            return;
        }
        Some("--help" | "-h") => {
            print_help();
            return;
        }
        _ => {}
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let rest = args.get(2..).unwrap_or(&[]);
    let result = match args.get(1).map(String::as_str) {
        None => run_play(PlayOptions::default()),
        Some("play") => match parse_play_args(rest) {
            Ok(options) => run_play(options),
            Err(message) => usage_error(&message),
        },
        Some("status") => run_status(),
        Some("export") => run_export(rest.first().map(PathBuf::from)),
        Some("import") => match rest.first() {
            Some(path) => run_import(Path::new(path)),
            None => usage_error("import needs a file path"),
        },
        Some("reset") => run_reset(),
        Some(other) => usage_error(&format!("Unknown command: {}", other)),
    };

    if let Err(e) = result {
        eprintln!("错误: {}", e);
        std::process::exit(1);
    }
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'xianxia --help' for usage.");
    std::process::exit(2);
}

fn print_help() {
    println!("Xianxia - Idle Cultivation\n");
    println!("Usage: xianxia [command] [options]\n");
    println!("Commands:");
    println!("  play       Run the session (default)");
    println!("  status     Show the saved character");
    println!("  export     Write the save to an export file [dir]");
    println!("  import     Replace the save with an export file <file>");
    println!("  reset      Delete the save");
    println!("  --version  Show version information");
    println!("  --help     Show this help message\n");
    println!("Play options:");
    println!("  --name <name>          Start a new character instead of resuming");
    println!("  --profession <key>     sword, body, fire, ice, thunder, beast");
    println!("  --talent <key>         normal, huanggu, xianti");
    println!("  --seconds <n>          Virtual seconds to play (default 60)");
    println!("  --seed <n>             Seed the random source");
    println!("  --tick-ms <n>          Override the combat round interval");
    println!("  --fast                 Use the compressed test cadence");
    println!("  --realtime             Pace the clock with the wall clock");
    println!("  --manual               Fight a single encounter without auto-play");
}

fn parse_play_args(args: &[String]) -> Result<PlayOptions, String> {
    let mut options = PlayOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--name" => options.name = Some(value("--name")?),
            "--profession" => {
                let key = value("--profession")?;
                options.profession = Profession::from_key(&key)
                    .ok_or_else(|| format!("unknown profession: {}", key))?;
            }
            "--talent" => {
                let key = value("--talent")?;
                options.talent =
                    Talent::from_key(&key).ok_or_else(|| format!("unknown talent: {}", key))?;
            }
            "--seconds" => options.seconds = parse_number("--seconds", &value("--seconds")?)?,
            "--seed" => options.seed = Some(parse_number("--seed", &value("--seed")?)?),
            "--tick-ms" => options.tick_ms = Some(parse_number("--tick-ms", &value("--tick-ms")?)?),
            "--fast" => options.fast = true,
            "--realtime" => options.realtime = true,
            "--manual" => options.auto_play = false,
            other => return Err(format!("unknown option: {}", other)),
        }
    }
    Ok(options)
}

fn parse_number(flag: &str, raw: &str) -> Result<u64, String> {
    raw.parse()
        .map_err(|_| format!("{} expects a number, got {}", flag, raw))
}

fn run_play(options: PlayOptions) -> Result<(), GameError> {
    let store = SaveStore::new()?;
    let mut config = if options.fast {
        GameConfig::fast()
    } else {
        store.load_config()
    };
    if let Some(tick) = options.tick_ms {
        config.tick_interval_ms = tick;
    }
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let saved = match options.name {
        Some(_) => None,
        None => store.load()?,
    };
    let mut session = match saved {
        Some(document) => {
            tracing::info!(name = %document.character.name, "resuming saved run");
            GameSession::new(document.into_state(), config, rng)
        }
        None => {
            let name = options.name.as_deref().unwrap_or("无名散修");
            GameSession::start(name, options.profession, options.talent, config, rng)?
        }
    };

    print_notices(&session.take_events());
    if let Some(summary) = session.summary() {
        println!("{}", summary);
        return Ok(());
    }

    if options.auto_play {
        session.set_auto_play(true)?;
    } else {
        session.set_auto_play(false)?;
        session.start_encounter()?;
    }
    print_notices(&session.take_events());

    let budget = options.seconds.saturating_mul(1000);
    while session.now_ms() < budget {
        let Some(wakeup) = session.next_wakeup() else {
            break;
        };
        let step = wakeup.clamp(session.now_ms() + 1, budget) - session.now_ms();
        if options.realtime {
            std::thread::sleep(Duration::from_millis(step));
        }

        let events = session.advance(step);
        print_notices(&events);
        for event in events {
            match event {
                TickEvent::SaveRequested => store.save(&session.save_document())?,
                TickEvent::GameOver { summary } => println!("\n{}", summary),
                _ => {}
            }
        }
        if session.is_game_over() {
            break;
        }
    }

    store.save(&session.save_document())?;
    print_status(&session.save_document());
    Ok(())
}

/// Notifications are printed from the event stream; with short lifetimes
/// they can expire before the queue is looked at again.
fn print_notices(events: &[TickEvent]) {
    for event in events {
        if let TickEvent::Notified { title, message, .. } = event {
            println!("[{}] {}", title, message);
        }
    }
}

fn run_status() -> Result<(), GameError> {
    let store = SaveStore::new()?;
    match store.load()? {
        Some(document) => print_status(&document),
        None => println!("尚无存档。运行 'xianxia play --name <名字>' 开始修行。"),
    }
    Ok(())
}

fn print_status(document: &SaveDocument) {
    let c = &document.character;
    let r = &document.resources;
    println!();
    println!(
        "{} · {} · {} · {}境 第{}级",
        c.name,
        c.profession.name(),
        c.talent.name(),
        c.realm,
        c.level
    );
    println!(
        "修为 {}  年龄 {}/{}  气血 {}/{}",
        c.experience, c.age, c.age_limit, c.attributes.hp, c.attributes.max_hp
    );
    println!("门派 {}", c.sect.as_deref().unwrap_or("散修"));
    println!(
        "金币 {}  灵石 {}  丹药 {}",
        r.currency, r.rare_currency, r.consumables
    );
    for quest in &document.quests {
        println!(
            "  [{:?}] {} {}/{}",
            quest.status, quest.name, quest.progress, quest.goal
        );
    }
    let stats = &document.stats;
    println!(
        "战斗 {} 胜 {} 负 {}",
        stats.total_battles, stats.victories, stats.defeats
    );
    for entry in &document.history {
        println!("  {}", entry);
    }
}

fn run_export(dir: Option<PathBuf>) -> Result<(), GameError> {
    let store = SaveStore::new()?;
    let Some(document) = store.load()? else {
        println!("尚无存档，无法导出。");
        return Ok(());
    };
    let now = Utc::now();
    let export = SaveDocument::for_export(&document.into_state(), now);
    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    let path = SaveStore::export_to(&dir, &export, now.timestamp_millis())?;
    println!("已导出到 {}", path.display());
    Ok(())
}

fn run_import(path: &Path) -> Result<(), GameError> {
    let store = SaveStore::new()?;
    let json = SaveStore::read_import(path)?;

    // Import through a session so a rejected file leaves the save untouched.
    let current = match store.load() {
        Ok(Some(document)) => Some(document.into_state()),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(error = %e, "current save unreadable, replacing it");
            None
        }
    };
    let rng = StdRng::from_entropy();
    let mut session = match current {
        Some(state) => GameSession::new(state, store.load_config(), rng),
        None => GameSession::start(
            "无名散修",
            Profession::default(),
            Talent::default(),
            store.load_config(),
            rng,
        )?,
    };
    session.import_json(&json)?;
    store.save(&session.save_document())?;
    println!("已导入 {}", session.character().name);
    Ok(())
}

fn run_reset() -> Result<(), GameError> {
    let store = SaveStore::new()?;
    store.delete()?;
    println!("存档已删除。");
    Ok(())
}
