use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use briscola_bot::player::{Player, RandomPlayer};
use briscola_bot::session::{GameSession, SessionError};
use briscola_core::game::state::GameState;
use briscola_core::model::player::Seat;
use briscola_core::model::score::HandOutcome;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{MatchConfig, PlayerConfig, PlayerKind, ResolvedOutputs};

/// Plays the configured number of hands and streams JSONL rows to disk.
pub struct MatchRunner {
    config: MatchConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub wins: [usize; 2],
    pub draws: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("expected exactly two players, found {found}")]
    SeatCount { found: usize },
    #[error("i/o failure while writing match outputs")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize a result row")]
    Serialize(#[from] serde_json::Error),
    #[error("game session aborted")]
    Session(#[from] SessionError),
}

#[derive(Debug, Serialize)]
struct GameRow<'a> {
    game: usize,
    seed: u64,
    players: [&'a str; 2],
    scores: [u16; 2],
    turns: u8,
    winner: Option<Seat>,
}

impl MatchRunner {
    pub fn new(config: MatchConfig, outputs: ResolvedOutputs) -> Self {
        Self { config, outputs }
    }

    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        if self.config.players.len() != 2 {
            return Err(RunnerError::SeatCount {
                found: self.config.players.len(),
            });
        }

        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));

        let names = [
            self.config.players[0].name.as_str(),
            self.config.players[1].name.as_str(),
        ];
        let mut wins = [0usize; 2];
        let mut draws = 0usize;
        let mut points_total = [0u64; 2];
        let mut rows_written = 0usize;

        for game in 0..self.config.games.count {
            let seed = rng.next_u64();
            let north = build_player(&self.config.players[0], &mut rng);
            let south = build_player(&self.config.players[1], &mut rng);

            let mut session = GameSession::new(GameState::with_seed(seed), north, south);
            let outcome = session.run_to_completion()?;

            let scores = *session.state().scores().standings();
            let turns = session.state().turns_played();
            let winner = match outcome {
                HandOutcome::Win(seat) => {
                    wins[seat.index()] += 1;
                    Some(seat)
                }
                HandOutcome::Draw => {
                    draws += 1;
                    None
                }
            };
            for seat in Seat::LOOP {
                points_total[seat.index()] += scores[seat.index()] as u64;
            }

            let row = GameRow {
                game,
                seed,
                players: names,
                scores,
                turns,
                winner,
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;

            event!(
                Level::INFO,
                game,
                seed,
                north = scores[0],
                south = scores[1],
                turns,
                "game complete"
            );
        }

        writer.flush()?;
        self.write_summary(&names, wins, draws, points_total)?;

        Ok(RunSummary {
            games_played: self.config.games.count,
            rows_written,
            wins,
            draws,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    fn write_summary(
        &self,
        names: &[&str; 2],
        wins: [usize; 2],
        draws: usize,
        points_total: [u64; 2],
    ) -> Result<(), RunnerError> {
        let games = self.config.games.count as f64;
        let mut text = String::new();
        text.push_str(&format!("# Match `{}`\n\n", self.config.run_id));
        text.push_str(&format!(
            "- games: {}\n- seed: {}\n- draws: {}\n\n",
            self.config.games.count,
            self.config
                .games
                .seed
                .map_or_else(|| "none".to_string(), |s| s.to_string()),
            draws
        ));
        text.push_str("| player | seat | wins | mean points |\n");
        text.push_str("|--------|------|------|-------------|\n");
        for seat in Seat::LOOP {
            let idx = seat.index();
            text.push_str(&format!(
                "| {} | {} | {} | {:.1} |\n",
                names[idx],
                seat,
                wins[idx],
                points_total[idx] as f64 / games
            ));
        }
        fs::write(&self.outputs.summary_md, text)?;
        Ok(())
    }
}

fn build_player(config: &PlayerConfig, rng: &mut StdRng) -> Box<dyn Player> {
    match config.kind {
        PlayerKind::Random => {
            let seed = config.seed.unwrap_or_else(|| rng.next_u64());
            Box::new(RandomPlayer::with_seed(seed))
        }
    }
}

fn ensure_parent(parent: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = parent {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}
