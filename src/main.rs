//! # Arcane Command Line Driver
//!
//! Rolls loot, crafts from the starting materials, plays out a duel or
//! simulates a dungeon finder queue from the terminal, using the same tables and rules as the game client.

use arcane::generation::tables;
use arcane::{
    ArcaneConfig, ArcaneError, ArcaneResult, CharacterRecord, CombatSession, Crafting,
    DungeonFinder, EnemyRecord, Generator, InstanceKind, ItemBase, ItemGenerator, LootItem, Skill,
};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Rounds after which a duel is called off.
const MAX_DUEL_ROUNDS: u32 = 1_000;

/// Command line arguments for the Arcane encounter core.
#[derive(Parser, Debug)]
#[command(name = "arcane")]
#[command(about = "Loot, combat and matchmaking core of the Arcane Engine")]
#[command(version)]
struct Args {
    /// Random seed; overrides the seed from the config file
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Roll items from the default loot tables
    Loot {
        /// Number of items to roll
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Base item name; a random base is used when omitted
        #[arg(long)]
        base: Option<String>,

        /// Item type for a custom base
        #[arg(long, default_value = "Weapon")]
        item_type: String,
    },
    /// Craft recipes from the starting material stock
    Craft {
        /// Recipe names, crafted in order
        #[arg(required = true)]
        recipes: Vec<String>,
    },
    /// Auto-play a duel between the default hero and an enemy
    Duel {
        #[arg(long, default_value_t = 30)]
        enemy_hp: u32,

        #[arg(long, default_value_t = 5)]
        enemy_attack: u32,
    },
    /// Queue synthetic players and run the dungeon finder
    Queue {
        /// Number of players to queue
        #[arg(short, long)]
        players: usize,

        #[arg(long, default_value = "Sunken Crypt")]
        activity: String,

        /// Group size; defaults to the configured capacity
        #[arg(long)]
        capacity: Option<usize>,
    },
}

fn main() -> ArcaneResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;
    log::info!("Starting Arcane v{}", arcane::VERSION);

    let mut config = match &args.config {
        Some(path) => ArcaneConfig::from_file(path)?,
        None => ArcaneConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.generation.seed = seed;
    }
    let mut rng = StdRng::seed_from_u64(config.generation.seed);

    match args.command {
        Command::Loot {
            count,
            base,
            item_type,
        } => run_loot(&config, count, base, item_type, &mut rng),
        Command::Craft { recipes } => run_craft(&recipes, &mut rng),
        Command::Duel {
            enemy_hp,
            enemy_attack,
        } => run_duel(&config, enemy_hp, enemy_attack, &mut rng),
        Command::Queue {
            players,
            activity,
            capacity,
        } => run_queue(&config, players, &activity, capacity),
    }
}

/// Initializes the logging backend for the requested level.
fn initialize_logging(log_level: &str) -> ArcaneResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init()
            .map_err(|e| ArcaneError::Configuration(format!("logging: {}", e)))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .try_init()
            .map_err(|e| ArcaneError::Configuration(format!("logging: {}", e)))?;
    }

    Ok(())
}

fn run_loot(
    config: &ArcaneConfig,
    count: usize,
    base: Option<String>,
    item_type: String,
    rng: &mut StdRng,
) -> ArcaneResult<()> {
    let generator = ItemGenerator::new(tables::default_loot_tables()?, tables::default_item_bases())?;
    let custom = base.map(|name| ItemBase::new(name, item_type));

    for _ in 0..count {
        let item = match &custom {
            Some(base) => generator.roll(base, &config.generation, rng)?,
            None => generator.generate(&config.generation, rng)?,
        };
        print_item(&item);
    }
    Ok(())
}

fn run_craft(recipes: &[String], rng: &mut StdRng) -> ArcaneResult<()> {
    let mut crafting = Crafting::with_defaults()?;
    for recipe in recipes {
        match crafting.craft(recipe, rng) {
            Some(item) => print_item(&item),
            None => println!("Cannot craft {}", recipe),
        }
    }
    for (material, amount) in crafting.materials() {
        println!("{}: {}", material, amount);
    }
    Ok(())
}

fn print_item(item: &LootItem) {
    println!("{}", item);
    println!("  {} ({})", item.prefix().name, item.prefix().effect);
    println!("  {} ({})", item.suffix().name, item.suffix().effect);
    for (stat, value) in item.stats().iter().chain(item.substats()) {
        println!("  {}: {}", stat, value);
    }
}

fn run_duel(
    config: &ArcaneConfig,
    enemy_hp: u32,
    enemy_attack: u32,
    rng: &mut StdRng,
) -> ArcaneResult<()> {
    let cleave = Skill::new("Cleave", 10, 15);
    let hero = CharacterRecord::new("Aiden", "Barbarian").with_skill(cleave.clone());
    let enemy = EnemyRecord::new("Bone Warden", enemy_hp, enemy_attack);
    let mut session = CombatSession::new(&hero, &enemy, config.combat.clone())?;

    let mut rounds = 0;
    while !session.is_over() && rounds < MAX_DUEL_ROUNDS {
        let affordable = session.player().mana() >= Some(cleave.mana_cost);
        if !affordable || !session.use_skill(&cleave, rng).advanced_turn() {
            session.player_attack(rng);
        }
        session.advance_turn(rng);
        rounds += 1;
    }

    println!("{}", session.log_text());
    match session.result() {
        Some(result) => println!(
            "{:?} after {} turns ({} hp left)",
            result,
            session.turns_taken(),
            session.player().health()
        ),
        None => println!("No winner after {} rounds", rounds),
    }
    Ok(())
}

fn run_queue(
    config: &ArcaneConfig,
    players: usize,
    activity: &str,
    capacity: Option<usize>,
) -> ArcaneResult<()> {
    let mut finder = DungeonFinder::from_config(&config.matchmaking);
    for index in 1..=players {
        finder.join(format!("player{}", index), activity);
    }

    let capacity = capacity.unwrap_or(finder.group_capacity());
    let matched = finder.match_groups(activity, InstanceKind::Dungeon, capacity)?;
    for (id, group) in &matched {
        println!("Instance {}: {}", id, group.members().join(", "));
    }

    let waiting = finder.matchmaker().queued_for(activity);
    println!("{} group(s) formed, {} still waiting", matched.len(), waiting.len());
    Ok(())
}
