//! Developer CLI
//!
//! Commands: odds, census, search

use clap::Parser;
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use robolimit::B_BLIND;
use robolimit::Chips;
use robolimit::S_BLIND;
use robolimit::betting::action::Action;
use robolimit::betting::seat::Seat;
use robolimit::betting::seating::Seating;
use robolimit::cards::card::Card;
use robolimit::cards::context::CardContext;
use robolimit::evaluation::census::Census;
use robolimit::players::choice::Choice;
use robolimit::search::set::SearchTreeSet;
use robolimit::search::settings::Budget;
use robolimit::search::settings::Settings;
use robolimit::simulation::simulator::Simulator;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Command {
    #[command(about = "Estimate win odds of a hand against random opponents")]
    Odds {
        #[arg(long, required = true)]
        hole: String,
        #[arg(long, default_value = "")]
        board: String,
        #[arg(long, default_value_t = 1)]
        opponents: usize,
        #[arg(long, default_value_t = 2000)]
        trials: usize,
        #[arg(long, default_value_t = 1)]
        workers: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    #[command(about = "Tally hand categories over random 7-card hands")]
    Census {
        #[arg(long, default_value_t = 100_000)]
        hands: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    #[command(about = "Grow the search tree for one spot and grade its actions")]
    Search {
        #[arg(long, default_value = "V0,H")]
        seating: String,
        #[arg(long, required = true)]
        hole: String,
        #[arg(long, default_value = "")]
        board: String,
        /// comma separated seat:action pairs, e.g. V0:call,H:bet
        #[arg(long, default_value = "")]
        history: String,
        #[arg(long, default_value_t = 50)]
        millis: u64,
        #[arg(long, default_value_t = 4096)]
        nodes: usize,
        /// rollout trials for a new tree set [default: 100]
        #[arg(long)]
        trials: Option<usize>,
        /// board completions per post-flop step [default: 3]
        #[arg(long)]
        branching: Option<usize>,
        /// chips in the pot [default: both blinds]
        #[arg(long)]
        pot: Option<Chips>,
        /// chips hero has committed this phase [default: hero's blind]
        #[arg(long)]
        bid: Option<Chips>,
        #[arg(long)]
        load: Option<String>,
        #[arg(long)]
        save: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

fn history(s: &str) -> anyhow::Result<Vec<(Seat, Action)>> {
    s.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|step| {
            let (seat, action) = step
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("expected seat:action, got {}", step))?;
            Ok((Seat::try_from(seat)?, Action::try_from(action)?))
        })
        .collect()
}

fn colorize(action: Action) -> colored::ColoredString {
    match action {
        Action::Fold => action.to_string().red(),
        Action::Call => action.to_string().yellow(),
        Action::Bet => action.to_string().green(),
    }
}

fn main() -> anyhow::Result<()> {
    robolimit::log();
    match Command::parse() {
        Command::Odds {
            hole,
            board,
            opponents,
            trials,
            workers,
            seed,
        } => {
            let ref mut rng = rng(seed);
            let simulator = Simulator::new(&Card::parse(&hole)?, &Card::parse(&board)?, opponents)?;
            let odds = match workers {
                0 | 1 => simulator.simulate(trials, rng)?,
                n => simulator.simulate_parallel(trials, n, rng)?,
            };
            println!("{} {} vs {} : {}", hole.bold(), board, opponents, odds);
        }
        Command::Census { hands, seed } => {
            let ref mut rng = rng(seed);
            println!("{}", Census::sample(hands, rng));
        }
        Command::Search {
            seating,
            hole,
            board,
            history: actions,
            millis,
            nodes,
            trials,
            branching,
            pot,
            bid,
            load,
            save,
            seed,
        } => {
            let ref mut rng = rng(seed);
            let mut forest = match load {
                Some(ref path) => {
                    let forest = SearchTreeSet::load(path)?;
                    if trials.is_some() || branching.is_some() {
                        log::warn!("{} keeps its own settings, ignoring --trials/--branching", path);
                    }
                    log::info!("searching with persisted {:?}", forest.settings());
                    forest
                }
                None => SearchTreeSet::new(Settings {
                    trials: trials.unwrap_or(robolimit::ROLLOUT_TRIALS),
                    branching: branching.unwrap_or(robolimit::CARD_BRANCHING),
                    ..Settings::default()
                })?,
            };
            let seating = Seating::try_from(seating.as_str())?;
            let pot = pot.unwrap_or(S_BLIND + B_BLIND);
            let bid = bid.unwrap_or(seating.blind(&Seat::Hero));
            let ref hand = CardContext::new(&Card::parse(&hole)?, &Card::parse(&board)?)?;
            let budget = Budget {
                time: Duration::from_millis(millis),
                nodes,
            };
            let tree = forest.tree(&seating)?;
            let ix = tree.query(hand, &history(&actions)?, rng)?;
            log::info!("located {}", tree.node(ix));
            if !tree.node(ix).terminal() {
                log::info!("{}", tree.build(hand, ix, budget, rng)?);
            }
            let grades = tree.grades(ix, hand);
            for (action, grade) in grades.iter() {
                match grade {
                    Some(p) => println!("{:<6}{:>7.1}%", colorize(*action), 100. * p),
                    None => println!("{:<6}{:>8}", colorize(*action), "-"),
                }
            }
            let equity = tree.node(ix).ratio(hand);
            if let Some(p) = equity {
                let ev = Choice::expectation(p, pot, bid);
                println!("{:<6}{:>7.1}%  ev {:+.1}", "equity", 100. * p, ev);
            }
            match Choice::settle(&grades, equity, pot, bid) {
                Some(action) => println!("{} {}", "choose".bold(), colorize(action)),
                None => println!("{}", "hand is over".dimmed()),
            }
            println!("{} nodes", tree.len());
            if let Some(path) = save {
                forest.save(path)?;
            }
        }
    }
    Ok(())
}
