//! go-cgt command line.
//!
//! ## Usage
//!
//! - `go-cgt tree --file board.csv --depth 3` - Print a game tree
//! - `go-cgt eval --file board.csv` - Print the game value of a board
//! - `go-cgt values --file board.csv --depth 3` - Print the value of every explored position

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use go_cgt::board::{Board, Player, Point, Shape};
use go_cgt::constants::DEFAULT_DEPTH;
use go_cgt::evaluator::Evaluator;
use go_cgt::identity::IdentityScheme;
use go_cgt::position::Position;
use go_cgt::report::write_value_listing;
use go_cgt::rules::RuleSet;
use go_cgt::tree::{Expansion, TreeBuilder, TreeMode};

/// Game trees and combinatorial game values for Go-like boards
#[derive(Parser)]
#[command(name = "go-cgt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a depth-bounded game tree and print one line per node
    Tree {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        rules: RuleArgs,
        /// Maximum number of plies to expand
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: usize,
        /// Give options to the player to move only, or to both players at every node
        #[arg(long, value_enum, default_value_t = ModeArg::Alternating)]
        mode: ModeArg,
        /// What distinguishes two positions
        #[arg(long, value_enum, default_value_t = IdentityArg::Full)]
        identity: IdentityArg,
        /// Print each node's board under its line
        #[arg(long)]
        boards: bool,
    },
    /// Compute the game value of a board
    Eval {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        rules: RuleArgs,
        /// What distinguishes two positions in the memo
        #[arg(long, value_enum, default_value_t = IdentityArg::Board)]
        identity: IdentityArg,
    },
    /// Print the game value of every position explored to a depth
    Values {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        rules: RuleArgs,
        /// Maximum number of plies to explore
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: usize,
        /// What distinguishes two positions
        #[arg(long, value_enum, default_value_t = IdentityArg::Board)]
        identity: IdentityArg,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Board file, one row per line, cells -2..=2 ("-" for stdin)
    #[arg(short, long)]
    file: PathBuf,
    /// Player to move at the root
    #[arg(long, value_enum, default_value_t = TurnArg::Black)]
    turn: TurnArg,
    /// Accept non-square boards
    #[arg(long)]
    rectangular: bool,
}

#[derive(Args)]
struct RuleArgs {
    /// Rule preset
    #[arg(long, value_enum, default_value_t = PresetArg::Go)]
    rules: PresetArg,
    /// Override: remove groups without liberties
    #[arg(long)]
    capture: Option<bool>,
    /// Override: reject suicide
    #[arg(long)]
    suicide_check: Option<bool>,
    /// Override: reserved points playable only by their owner
    #[arg(long)]
    reserved_points: Option<bool>,
    /// Override: reject moves that repeat an earlier board
    #[arg(long)]
    repetition_check: Option<bool>,
}

impl RuleArgs {
    fn rule_set(&self) -> RuleSet {
        let base = match self.rules {
            PresetArg::Go => RuleSet::GO,
            PresetArg::Placement => RuleSet::PLACEMENT,
            PresetArg::Bare => RuleSet::BARE,
        };
        RuleSet {
            capture: self.capture.unwrap_or(base.capture),
            suicide_check: self.suicide_check.unwrap_or(base.suicide_check),
            reserved_points: self.reserved_points.unwrap_or(base.reserved_points),
            repetition_check: self.repetition_check.unwrap_or(base.repetition_check),
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum TurnArg {
    Black,
    White,
}

#[derive(Copy, Clone, ValueEnum)]
enum PresetArg {
    /// Capture, suicide, reserved points and repetition all enforced
    Go,
    /// Placement on vacant or own reserved points only
    Placement,
    /// Placement on any point without a stone
    Bare,
}

#[derive(Copy, Clone, ValueEnum)]
enum ModeArg {
    Alternating,
    Both,
}

#[derive(Copy, Clone, ValueEnum)]
enum IdentityArg {
    Board,
    BoardTurn,
    Full,
}

impl From<TurnArg> for Player {
    fn from(arg: TurnArg) -> Self {
        match arg {
            TurnArg::Black => Player::Black,
            TurnArg::White => Player::White,
        }
    }
}

impl From<ModeArg> for TreeMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Alternating => TreeMode::Alternating,
            ModeArg::Both => TreeMode::BothPlayers,
        }
    }
}

impl From<IdentityArg> for IdentityScheme {
    fn from(arg: IdentityArg) -> Self {
        match arg {
            IdentityArg::Board => IdentityScheme::Board,
            IdentityArg::BoardTurn => IdentityScheme::BoardTurn,
            IdentityArg::Full => IdentityScheme::Full,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Tree {
            input,
            rules,
            depth,
            mode,
            identity,
            boards,
        } => {
            let root = load_root(&input)?;
            let rules = rules.rule_set();
            info!("building tree to depth {depth} under {rules:?}");
            let tree = TreeBuilder::new(rules, mode.into())
                .with_identity(identity.into())
                .build(&root, depth);

            let mut stdout = io::stdout().lock();
            for (record, node) in tree.records().zip(tree.nodes()) {
                let parent = record
                    .parent
                    .map_or_else(|| "-".to_string(), |k| k.to_string());
                let mover = record.mover.map_or_else(|| "-".to_string(), |p| p.to_string());
                writeln!(
                    stdout,
                    "{} parent={} move={} by={} turn={} {}",
                    record.key,
                    parent,
                    format_point(record.last_move),
                    mover,
                    record.turn,
                    expansion_label(&node.expansion)
                )?;
                if boards {
                    writeln!(stdout, "{}", record.board)?;
                }
            }
            info!("{} nodes", tree.len());
        }
        Commands::Eval {
            input,
            rules,
            identity,
        } => {
            let root = load_root(&input)?;
            let mut evaluator = Evaluator::new(rules.rule_set()).with_identity(identity.into());
            let value = evaluator.evaluate(&root);
            println!("Game value = {value}");
            let stats = evaluator.stats();
            info!(
                "{} positions evaluated, {} cache hits, {} cycles",
                stats.computed, stats.cache_hits, stats.cycles
            );
        }
        Commands::Values {
            input,
            rules,
            depth,
            identity,
        } => {
            let root = load_root(&input)?;
            let mut evaluator = Evaluator::new(rules.rule_set()).with_identity(identity.into());
            let mut stdout = io::stdout().lock();
            write_value_listing(&mut stdout, &root, depth, &mut evaluator)?;
            info!("{} positions memoised", evaluator.cache_len());
        }
    }
    Ok(())
}

/// Read the board file and wrap it as the root position.
fn load_root(input: &InputArgs) -> Result<Arc<Position>> {
    let text = if input.file.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read board from stdin")?;
        text
    } else {
        fs::read_to_string(&input.file)
            .with_context(|| format!("failed to read board file {}", input.file.display()))?
    };
    let shape = if input.rectangular {
        Shape::Rectangular
    } else {
        Shape::Square
    };
    let board = Board::parse(&text, shape)
        .with_context(|| format!("invalid board in {}", input.file.display()))?;
    info!("loaded {}x{} board", board.rows(), board.cols());
    Ok(Position::root(board, input.turn.into()))
}

fn format_point(pt: Option<Point>) -> String {
    match pt {
        Some((r, c)) => format!("{r},{c}"),
        None => "-".to_string(),
    }
}

fn expansion_label(expansion: &Expansion) -> String {
    match expansion {
        Expansion::Expanded(children) => format!("expanded({})", children.len()),
        Expansion::Terminal => "terminal".to_string(),
        Expansion::Frontier => "frontier".to_string(),
        Expansion::Revisited => "revisited".to_string(),
    }
}
