//! Twin Arcade headless runner
//!
//! Drives one session at a fixed timestep with a simple autopilot and logs
//! every event. Useful for eyeballing tuning changes without a renderer.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;

    use twin_arcade::consts::SIM_DT;
    use twin_arcade::{GameEvent, GamePhase, GameSession, InputIntent, Settings, Variant};

    #[derive(Debug, Parser)]
    #[command(name = "twin-arcade", about = "Run a headless arcade session")]
    pub struct Args {
        /// Game to run: jumper or star-catcher
        #[arg(long, default_value = "star-catcher")]
        pub variant: Variant,
        /// RNG seed (random when omitted)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Simulated seconds before giving up
        #[arg(long, default_value_t = 60.0)]
        pub seconds: f32,
        /// JSON settings file
        #[arg(long)]
        pub settings: Option<PathBuf>,
        /// Print the default settings as JSON and exit
        #[arg(long)]
        pub dump_settings: bool,
    }

    /// Steer toward the live star, easing off when close
    fn autopilot(session: &mut GameSession) -> twin_arcade::Result<()> {
        let Some(star) = session.collectible() else {
            return Ok(());
        };
        let dx = star.pos.x - session.actor().pos.x;
        let vel = session.actor().vel_x;

        let (neg, pos) = if dx > 20.0 && vel < dx {
            (false, true)
        } else if dx < -20.0 && vel > dx {
            (true, false)
        } else if vel > 0.0 {
            (true, false)
        } else if vel < 0.0 {
            (false, true)
        } else {
            (false, false)
        };

        session.set_input_intent(InputIntent::AccelNegative, neg)?;
        session.set_input_intent(InputIntent::AccelPositive, pos)?;
        Ok(())
    }

    fn log_events(time: f32, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::EntitySpawned(_)
                | GameEvent::EntityRemoved(_)
                | GameEvent::JumpCompleted => log::debug!("[{time:7.2}s] {event:?}"),
                _ => log::info!("[{time:7.2}s] {event:?}"),
            }
        }
    }

    pub fn run(args: Args) -> anyhow::Result<()> {
        if args.dump_settings {
            println!("{}", Settings::default().to_json()?);
            return Ok(());
        }

        let settings = match &args.settings {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };

        let mut session = match args.seed {
            Some(seed) => GameSession::new(args.variant, settings, seed)?,
            None => GameSession::with_random_seed(args.variant, settings)?,
        };

        let mut time = 0.0;
        log_events(time, &session.request_start());

        while time < args.seconds && session.phase() == GamePhase::Playing {
            if session.variant() == Variant::StarCatcher {
                autopilot(&mut session)?;
            }
            let events = session.on_tick(SIM_DT)?;
            time += SIM_DT;
            log_events(time, &events);
        }

        println!(
            "{} finished after {:.2}s: phase={}, score={}, step={}",
            session.variant().as_str(),
            time,
            session.phase(),
            session.score(),
            session.displayed_step()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Twin Arcade (headless) starting...");

    headless::run(headless::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web; there is no runner there
}
