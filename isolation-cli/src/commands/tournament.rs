use std::time::Duration;

use color_eyre::eyre::Result;
use isolation_game_types::{Board, Player};
use isolation_minimax::AgentOptions;
use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::{
    contestants::ContestantSpec,
    referee::{play_match, random_opening},
};

use super::{BoardArgs, SearchArgs};

const DEFAULT_AGENTS: [&str; 4] = [
    "ab:improved",
    "ab:centrality",
    "ab:mobility-ratio",
    "ab:relative-centrality",
];

const DEFAULT_ROSTER: [&str; 7] = [
    "random",
    "mm:open-move",
    "mm:center",
    "mm:improved",
    "ab:open-move",
    "ab:center",
    "ab:improved",
];

#[derive(clap::Args, Debug)]
pub(crate) struct Tournament {
    /// Agents to rank
    #[clap(short, long, value_parser, num_args = 1.., default_values = DEFAULT_AGENTS)]
    agents: Vec<ContestantSpec>,

    /// Opponents every agent plays against
    #[clap(long, value_parser, num_args = 1.., default_values = DEFAULT_ROSTER)]
    roster: Vec<ContestantSpec>,

    /// Openings per pairing. Every opening is played twice, once from each seat
    #[clap(short, long, value_parser, default_value_t = 5)]
    rounds: usize,

    /// Seed for the openings and random contestants
    #[clap(long, value_parser)]
    seed: Option<u64>,

    #[clap(flatten)]
    board: BoardArgs,

    #[clap(flatten)]
    search: SearchArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Record {
    pub(crate) opponent: ContestantSpec,
    pub(crate) wins: usize,
    pub(crate) losses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Standing {
    pub(crate) agent: ContestantSpec,
    pub(crate) records: Vec<Record>,
}

impl Standing {
    pub(crate) fn win_rate(&self) -> f64 {
        let (wins, played) = self
            .records
            .iter()
            .fold((0, 0), |(wins, played), r| (wins + r.wins, played + r.wins + r.losses));

        if played == 0 {
            return 0.0;
        }

        100.0 * wins as f64 / played as f64
    }
}

pub(crate) struct Schedule<'a> {
    pub(crate) board: &'a Board,
    pub(crate) rounds: usize,
    pub(crate) options: AgentOptions,
    pub(crate) time_limit: Duration,
}

impl<'a> Schedule<'a> {
    pub(crate) fn run(
        &self,
        agents: &[ContestantSpec],
        roster: &[ContestantSpec],
        rng: &mut StdRng,
    ) -> Vec<Standing> {
        agents
            .iter()
            .map(|&agent| Standing {
                agent,
                records: roster
                    .iter()
                    .map(|&opponent| self.pairing(agent, opponent, rng))
                    .collect(),
            })
            .collect()
    }

    fn pairing(
        &self,
        agent: ContestantSpec,
        opponent: ContestantSpec,
        rng: &mut StdRng,
    ) -> Record {
        let mut agent_player = agent.build(self.options, rng.gen());
        let mut opponent_player = opponent.build(self.options, rng.gen());

        let mut record = Record {
            opponent,
            wins: 0,
            losses: 0,
        };

        for round in 0..self.rounds {
            let opening = random_opening(self.board, rng);

            let as_first = play_match(
                opening.clone(),
                agent_player.as_mut(),
                opponent_player.as_mut(),
                self.time_limit,
            );
            let as_second = play_match(
                opening,
                opponent_player.as_mut(),
                agent_player.as_mut(),
                self.time_limit,
            );

            for (result, seat) in [(as_first, Player::First), (as_second, Player::Second)] {
                if result.winner == seat {
                    record.wins += 1;
                } else {
                    record.losses += 1;
                }
            }

            info!(
                %agent,
                %opponent,
                round,
                wins = record.wins,
                losses = record.losses,
                "Round done"
            );
        }

        record
    }
}

impl Tournament {
    pub(crate) fn run(self) -> Result<()> {
        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        let board = self.board.board();

        println!(
            "Playing {} rounds per pairing on a {}x{} board (seed {seed})",
            self.rounds, self.board.width, self.board.height
        );

        let schedule = Schedule {
            board: &board,
            rounds: self.rounds,
            options: self.search.agent_options(),
            time_limit: self.search.time_limit(),
        };
        let standings = schedule.run(&self.agents, &self.roster, &mut rng);

        print!("{}", standings_table(&standings));

        Ok(())
    }
}

fn standings_table(standings: &[Standing]) -> String {
    const COLUMN: usize = 24;

    let mut table = format!(
        "{:<COLUMN$}{}\n",
        "Opponent",
        standings
            .iter()
            .map(|s| format!("{:>COLUMN$}", s.agent.to_string()))
            .join("")
    );

    let opponents = standings
        .first()
        .map(|s| s.records.iter().map(|r| r.opponent).collect_vec())
        .unwrap_or_default();

    for (idx, opponent) in opponents.iter().enumerate() {
        table.push_str(&format!(
            "{:<COLUMN$}{}\n",
            opponent.to_string(),
            standings
                .iter()
                .map(|s| {
                    let r = s.records[idx];
                    format!("{:>COLUMN$}", format!("{} - {}", r.wins, r.losses))
                })
                .join("")
        ));
    }

    table.push_str(&format!(
        "{:<COLUMN$}{}\n",
        "Win Rate",
        standings
            .iter()
            .map(|s| format!("{:>COLUMN$}", format!("{:.1}%", s.win_rate())))
            .join("")
    ));

    table
}
