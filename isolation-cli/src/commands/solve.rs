use std::{fs::File, path::PathBuf, time::Instant};

use color_eyre::eyre::{bail, Result, WrapErr};
use isolation_game_types::{wire_representation::Game, Board};
use isolation_minimax::{time_left_until, AlphaBetaSearch, MinimaxSearch, SearchStrategy, TimeGuard};

use crate::contestants::ContestantSpec;

use super::SearchArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// JSON fixture describing the position to search
    #[clap(short, long, value_parser)]
    fixture: PathBuf,

    /// The agent to search with, `mm:<eval>` or `ab:<eval>`
    #[clap(short, long, value_parser, default_value = "ab:improved")]
    agent: ContestantSpec,

    #[clap(flatten)]
    search: SearchArgs,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let file = File::open(&self.fixture)
            .wrap_err_with(|| format!("Could not open {}", self.fixture.display()))?;
        let game: Game = serde_json::from_reader(file)
            .wrap_err_with(|| format!("{} is not a valid game", self.fixture.display()))?;
        let board = Board::try_from(game).wrap_err("The fixture is not a legal position")?;

        let ContestantSpec::Agent(strategy, eval) = self.agent else {
            bail!("{} does not search, pick an `mm:` or `ab:` agent", self.agent);
        };

        println!("{board}");

        let options = self.search.agent_options();
        let time_left = time_left_until(Instant::now() + self.search.time_limit());
        let time_guard = TimeGuard::new(&time_left, options.timeout);

        let started = Instant::now();
        let (chosen, report) = match strategy {
            SearchStrategy::Minimax => {
                let search = MinimaxSearch::new(&eval, &time_guard);
                match search.minimax_report(&board, options.search_depth) {
                    Ok(report) => (report.best_move, Some(report)),
                    Err(e) => bail!("Depth {} did not finish: {e}", options.search_depth),
                }
            }
            SearchStrategy::AlphaBeta => {
                let search = AlphaBetaSearch::new(&eval, &time_guard);
                search.deepened_alphabeta(&board, options.max_depth)
            }
        };
        let elapsed = started.elapsed();

        match report {
            Some(report) => println!("{report}"),
            None => println!("Not even depth 1 finished"),
        }
        println!("{} chose {chosen} in {elapsed:?}", self.agent);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use isolation_minimax::EvaluationStrategy;

    use super::*;

    fn solve(fixture: &str, agent: ContestantSpec) -> Solve {
        Solve {
            fixture: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("../isolation-game-types/fixtures")
                .join(fixture),
            agent,
            search: SearchArgs {
                time_limit: 5_000,
                threshold: 10.0,
                depth: 2,
                max_depth: Some(3),
            },
        }
    }

    #[test]
    fn test_solves_with_either_search() {
        for strategy in [SearchStrategy::Minimax, SearchStrategy::AlphaBeta] {
            let agent = ContestantSpec::Agent(strategy, EvaluationStrategy::Improved);
            assert!(solve("mid_game.json", agent).run().is_ok());
        }
    }

    #[test]
    fn test_rejects_contestants_that_do_not_search() {
        assert!(solve("mid_game.json", ContestantSpec::Random).run().is_err());
    }

    #[test]
    fn test_missing_fixture() {
        let agent = ContestantSpec::Agent(SearchStrategy::AlphaBeta, EvaluationStrategy::Improved);
        assert!(solve("missing.json", agent).run().is_err());
    }
}
