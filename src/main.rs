// SPDX-License-Identifier: MIT

//! Command-line shell over the client core.
//!
//! Stands in for the desktop front-end: lists the library, shows a game's
//! achievements, and unlocks or re-locks a single achievement.

use chrono::{DateTime, Utc};
use galaxy_achievements::{config::Config, App};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: galaxy-achievements <command>

commands:
  list                                        list owned games
  achievements <product_id>                   list a game's achievements
  unlock <product_id> <achievement_id> [ts]   unlock (ts = RFC 3339, default now)
  lock <product_id> <achievement_id>          re-lock";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env().expect("Failed to load configuration");
    let app = App::new(config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["list"] | [] => list_games(&app).await?,
        ["achievements", product_id] => {
            let session = app.login().await?;
            let achievements = app
                .game_achievements(&session, product_id.parse()?)
                .await?;
            for a in achievements {
                let state = a.date_unlocked.as_deref().unwrap_or("locked");
                println!("{:40} {:10} {}", a.achievement_id, state, a.name);
            }
        }
        ["unlock", product_id, achievement_id, rest @ ..] => {
            let unlocked_at = match rest {
                [] => Utc::now(),
                [ts] => DateTime::parse_from_rfc3339(ts)?.with_timezone(&Utc),
                _ => return usage(),
            };
            let session = app.login().await?;
            app.set_achievement(&session, product_id.parse()?, achievement_id, Some(unlocked_at))
                .await?;
            println!("unlocked {achievement_id}");
        }
        ["lock", product_id, achievement_id] => {
            let session = app.login().await?;
            app.set_achievement(&session, product_id.parse()?, achievement_id, None)
                .await?;
            println!("locked {achievement_id}");
        }
        _ => return usage(),
    }

    Ok(())
}

async fn list_games(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let session = app.login().await?;
    let ids = app.owned_games(&session).await?;
    tracing::info!(count = ids.len(), "owned games");

    let summaries = app.game_summaries(&ids).await;
    for game in &summaries {
        println!("{:10} {}", game.id, game.title);
    }

    // The process exits before the debounce timer would fire.
    app.flush_catalog().await;
    Ok(())
}

fn usage() -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("{USAGE}");
    std::process::exit(2);
}

/// Initialize logging; silent by default apart from warnings, with a
/// crate-level debug directive available through RUST_LOG.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("galaxy_achievements=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
