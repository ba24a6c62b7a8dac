//! Maggots headless driver
//!
//! Plays a scripted duel through the fixed-timestep loop and logs what
//! happens. Usage: `maggots [tuning.json] [--bumpy SEED]`

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file overriding the default tuning
    #[arg(value_name = "TUNING_JSON")]
    tuning: Option<std::path::PathBuf>,
    /// Generate bumpy terrain from this seed instead of flat ground
    #[arg(long, value_name = "SEED")]
    bumpy: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use maggots::Tuning;
    use maggots::sim::{GameSession, Terrain};

    env_logger::init();
    log::info!("Maggots (headless) starting...");

    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                log::error!("Could not read {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let terrain = match args.bumpy {
        Some(seed) => {
            log::info!("Generating terrain with seed: {}", seed);
            Terrain::generate(
                tuning.arena_width as usize,
                tuning.ground_line(),
                tuning.arena_height / 4.0,
                0.6,
                (tuning.arena_height / 2.0, tuning.arena_height),
                seed,
            )
        }
        None => Terrain::flat(tuning.ground_line()),
    };

    let session = match GameSession::start_with_terrain(tuning, terrain) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    driver::run(session);
}

#[cfg(not(target_arch = "wasm32"))]
mod driver {
    use maggots::consts::{MAX_SUBSTEPS, SIM_DT};
    use maggots::sim::{GameEvent, GamePhase, GameSession, Outcome, Shot, TickInput, tick};

    /// Display refresh the loop pretends to run at
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a duel that never ends
    const MAX_TURNS: u32 = 200;

    pub fn run(mut session: GameSession) {
        let mut accumulator = 0.0;
        let mut input = TickInput::default();

        while !session.is_over() && session.turn() <= MAX_TURNS {
            if session.phase() == GamePhase::AwaitingInput && input.shot.is_none() {
                input.shot = Some(scripted_shot(&session));
            }

            accumulator += FRAME_DT;
            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut session, &input, SIM_DT);
                accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                input.shot = None;
            }

            report(&mut session);
        }

        match session.outcome() {
            Some(Outcome::Champion(id)) => {
                let label = session.entity(id).map(|e| e.label.clone()).unwrap_or_default();
                println!("> {} player == \"champion\"", label);
                println!("true");
            }
            Some(Outcome::Draw) => println!("> draw"),
            None => println!("> no winner after {} turns", MAX_TURNS),
        }
    }

    /// Lob toward the other side, creeping the power up each turn
    fn scripted_shot(session: &GameSession) -> Shot {
        let Some(active) = session.active_player() else {
            return Shot::new(0.0, 0.0);
        };
        let centre = session.tuning().arena_width / 2.0;
        // Cosine is subtracted from x, so > 90° heads right
        let angle = if active.pos.x < centre { 135.0 } else { 45.0 };
        let power = 60.0 + ((session.turn() * 7) % 41) as f32;
        Shot::new(angle, power)
    }

    fn report(session: &mut GameSession) {
        for event in session.drain_events() {
            match event {
                GameEvent::TurnStarted { player, turn } => {
                    log::info!("-- turn {} ({:?}) --", turn, player);
                    for row in session.scoreboard() {
                        log::info!("{}{}: {}", if row.active { "> " } else { "  " }, row.label, row.health);
                    }
                }
                GameEvent::Damaged { entity, lost, health } => {
                    log::info!("{:?} hit for {} ({} left)", entity, lost, health);
                }
                GameEvent::Impact { point } => {
                    log::info!("Impact at x = {:.0}", point.x);
                }
                other => log::trace!("{:?}", other),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly
}
