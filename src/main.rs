mod cli;

use std::process::ExitCode;

use catgram::error_handling::render;
use catgram::generator::{generate, generate_with_override, GenerateError};
use catgram::geometry::Line;
use catgram::grammar::{classify_all, terminal_symbol, Grammar};
use catgram::parser::{format_strokes, parse_file};
use catgram::recognizer::Recognizer;
use catgram::shape::{DegenerateGeometry, ShapeNode};
use clap::Parser;
use cli::{Cli, Command};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Degenerate(#[from] DegenerateGeometry),
    #[error("{0}")]
    Strokes(String),
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn recognizer_for(grammar: &Grammar, workers: Option<usize>) -> Recognizer<'_> {
    match workers {
        Some(workers) => Recognizer::new(grammar).with_workers(workers),
        None => Recognizer::new(grammar),
    }
}

fn print_figure(figure: &ShapeNode, screen: bool) {
    println!("; {} ({}) - ({})", figure.symbol, figure.start, figure.end);
    if screen {
        print!("{}", format_strokes(&figure.screen_lines()));
    } else {
        print!("{}", format_strokes(&figure.lines));
    }
}

fn run(command: Command) -> Result<ExitCode, CliError> {
    let grammar = Grammar::cat();

    match command {
        Command::Generate { seed, amount, start, fit, screen } => {
            let mut rng = rng_from(seed);
            let start = start.unwrap_or_else(|| grammar.start_symbol().to_string());

            for _ in 0..amount.unwrap_or(1) {
                let mut figure = generate_with_override(&grammar, &start, &mut rng)?;
                if let Some((width, height)) = fit {
                    figure.fit_to(width, height)?;
                }
                print_figure(&figure, screen);
            }
        }
        Command::Classify { x1, y1, x2, y2 } => {
            println!("{}", terminal_symbol(&Line::from_coords(x1, y1, x2, y2)));
        }
        Command::Recognize { file, workers } => {
            let strokes = parse_file(&file).map_err(|errors| CliError::Strokes(render(&errors)))?;
            let result = recognizer_for(&grammar, workers).recognize(classify_all(strokes));

            println!("{}", result);
            if !result.accepted {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Roundtrip { seed, amount, workers } => {
            let mut rng = rng_from(seed);
            let recognizer = recognizer_for(&grammar, workers);
            let mut rejected = 0;

            for _ in 0..amount.unwrap_or(1) {
                let figure = generate(&grammar, &mut rng)?;
                let result = recognizer.recognize(classify_all(figure.lines));
                println!("{}", result);
                if !result.accepted {
                    rejected += 1;
                }
            }

            if rejected > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
