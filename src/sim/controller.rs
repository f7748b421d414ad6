//! Agents that drive an episode
//!
//! A [`Controller`] turns the current view into the next key state.
//! [`Game::play`] runs one episode to the end and reports the result.

use serde::{Deserialize, Serialize};

use super::perception::TileWindow;
use super::state::{EndCause, PlayerState};
use super::tick::{Game, TickInput};
use super::tile::Tile;
use crate::error::SimError;

/// Decides the key state for the next tick
pub trait Controller {
    /// `view` is `None` when the game was built without perception.
    fn decide(&mut self, view: Option<&TileWindow>, player: &PlayerState) -> TickInput;
}

impl<F> Controller for F
where
    F: FnMut(Option<&TileWindow>, &PlayerState) -> TickInput,
{
    fn decide(&mut self, view: Option<&TileWindow>, player: &PlayerState) -> TickInput {
        self(view, player)
    }
}

/// Holds the same keys every tick
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldKeys(pub TickInput);

impl Controller for HoldKeys {
    fn decide(&mut self, _view: Option<&TileWindow>, _player: &PlayerState) -> TickInput {
        self.0
    }
}

/// Plays back a recorded input sequence, then idles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Replay {
    inputs: Vec<TickInput>,
    #[serde(skip)]
    cursor: usize,
}

impl Replay {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, cursor: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len() - self.cursor
    }
}

impl Controller for Replay {
    fn decide(&mut self, _view: Option<&TileWindow>, _player: &PlayerState) -> TickInput {
        let input = self.inputs.get(self.cursor).copied().unwrap_or_default();
        self.cursor = (self.cursor + 1).min(self.inputs.len());
        input
    }
}

/// Scripted runner: holds right and jumps at walls, gaps and spikes ahead
#[derive(Debug, Clone, Copy, Default)]
pub struct Sprinter;

impl Controller for Sprinter {
    fn decide(&mut self, view: Option<&TileWindow>, _player: &PlayerState) -> TickInput {
        let mut input = TickInput {
            right: true,
            ..TickInput::IDLE
        };
        let Some(view) = view else {
            return input;
        };

        let (r, c) = view.center();
        let blocked = (1..=2).any(|dc| view.get(r, c + dc).is_some_and(|t| t.is_solid()));
        let unsafe_ground = (1..=2).any(|dc| {
            view.get(r + 1, c + dc)
                .is_some_and(|t| !t.is_solid() || t == Tile::SpikeTop)
        });
        input.jump = blocked || unsafe_ground;
        input
    }
}

/// Summary of a finished episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub fitness: f64,
    pub cause: EndCause,
    pub ticks: u64,
    pub elapsed_time: f64,
    pub press_count: u64,
}

impl Game {
    /// Report for a finished episode; `None` while it is still running
    pub fn report(&self) -> Option<EpisodeReport> {
        let cause = self.cause()?;
        let player = self.player();
        Some(EpisodeReport {
            fitness: player.fitness,
            cause,
            ticks: self.ticks(),
            elapsed_time: player.elapsed_time,
            press_count: player.press_count,
        })
    }

    /// Drive the episode to its end with `controller`
    pub fn play(&mut self, controller: &mut impl Controller) -> Result<EpisodeReport, SimError> {
        loop {
            if let Some(report) = self.report() {
                return Ok(report);
            }
            let view = if self.perception_enabled() {
                Some(self.extract_window()?)
            } else {
                None
            };
            let input = controller.decide(view.as_ref(), self.player());
            self.update(&input);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::level::Level;
    use crate::sim::perception::WindowSize;

    fn flat_game(window: Option<WindowSize>) -> Game {
        let level = Level::parse(&["..........", ".S........", "##########"]).unwrap();
        let config = SimConfig {
            max_time: 1.0,
            ..SimConfig::default()
        };
        Game::from_level(level, window, config).unwrap()
    }

    #[test]
    fn test_play_idle_times_out() {
        let mut game = flat_game(None);
        let report = game.play(&mut HoldKeys::default()).unwrap();
        assert_eq!(report.cause, EndCause::Timeout);
        assert_eq!(report.fitness, 0.0);
        assert_eq!(report.ticks, game.ticks());
        assert!(report.elapsed_time > 1.0);
    }

    #[test]
    fn test_play_matches_manual_updates() {
        let inputs: Vec<TickInput> = (0..40)
            .map(|i| TickInput {
                right: i % 3 != 0,
                jump: i % 11 == 0,
                ..TickInput::IDLE
            })
            .collect();

        let mut played = flat_game(None);
        let report = played.play(&mut Replay::new(inputs.clone())).unwrap();

        let mut manual = flat_game(None);
        for input in inputs.iter().chain(std::iter::repeat(&TickInput::IDLE)) {
            if manual.is_over() {
                break;
            }
            manual.update(input);
        }
        assert_eq!(manual.report(), Some(report));
    }

    #[test]
    fn test_closure_controller_sees_window() {
        let mut game = flat_game(Some(WindowSize::new(5, 5).unwrap()));
        let mut seen = 0;
        let report = game
            .play(&mut |view: Option<&TileWindow>, _: &PlayerState| {
                let view = view.expect("perception enabled");
                assert_eq!(view.cells.len(), 25);
                seen += 1;
                TickInput::IDLE
            })
            .unwrap();
        assert_eq!(seen as u64, report.ticks);
    }

    #[test]
    fn test_replay_idles_when_exhausted() {
        let mut replay = Replay::new(vec![TickInput::from([false, true, false, false])]);
        let player = flat_game(None).player().clone();
        assert!(replay.decide(None, &player).right);
        assert_eq!(replay.remaining(), 0);
        assert_eq!(replay.decide(None, &player), TickInput::IDLE);
    }

    #[test]
    fn test_sprinter_jumps_at_walls() {
        let level = Level::parse(&["......", ".S.B..", "######"]).unwrap();
        let game = Game::from_level(level, Some(WindowSize::new(5, 5).unwrap()), SimConfig::default())
            .unwrap();
        let view = game.extract_window().unwrap();
        let input = Sprinter.decide(Some(&view), game.player());
        assert!(input.right);
        assert!(input.jump);
    }

    #[test]
    fn test_sprinter_beats_generated_level_start() {
        let mut game = Game::new(4, 1569986158, Some(WindowSize::new(11, 11).unwrap())).unwrap();
        let report = game.play(&mut Sprinter).unwrap();
        assert!(report.ticks > 10);
        assert_eq!(report, game.report().unwrap());
    }
}
