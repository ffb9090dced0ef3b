use rayon::prelude::*;
use std::process;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use thousands::Separable;

use topochess::config::{SearchConfig, DEFAULT_LAYOUT};
use topochess::util::save_position;
use topochess::{Board, SearchSession, SearchStats, SeenPositions};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match SearchConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };
    let layout = match Board::from_rows(DEFAULT_LAYOUT) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    println!("Using {} cores, edges {}", config.cores, config.edges);
    let overall_stopwatch = Instant::now();

    let seen = SeenPositions::new();
    let totals = Arc::new(Mutex::new(SearchStats::default()));
    let delay = Duration::from_millis(config.delay_ms);

    (0..config.cores).into_par_iter().for_each(|core| {
        let totals = Arc::clone(&totals);
        let session = match config.worker_seed(core) {
            Some(seed) => SearchSession::seeded(layout.clone(), config.edges, seed),
            None => SearchSession::new(layout.clone(), config.edges),
        };
        let mut session = session
            .with_seen(seen.clone())
            .with_report_every(config.report_every);
        println!("Core {core}: session {}", session.id());

        let stopwatch = Instant::now();
        for found in 1..=config.positions {
            let Some(board) = session.new_position() else {
                println!("Core {core}: no new positions left");
                break;
            };
            println!("Core {core}: position {found}\n{board}");
            match save_position(&board, &config.edges, session.id()) {
                Ok(Some(path)) => log::debug!("saved {}", path.display()),
                Ok(None) => log::debug!("no documents folder, position not saved"),
                Err(e) => log::warn!("could not save position: {e}"),
            }
            thread::sleep(delay);
        }

        let stats = session.stats();
        println!(
            "Core {core}: {} candidates, {} accepted in {} seconds",
            stats.examined.separate_with_commas(),
            stats.accepted.separate_with_commas(),
            stopwatch.elapsed().as_secs()
        );
        *totals.lock().unwrap() += stats;
    });

    if seen.is_empty() {
        println!("No symmetric arrangement of the layout was found");
    } else {
        println!("{} distinct symmetric arrangements examined", seen.len().separate_with_commas());
    }

    let totals = *totals.lock().unwrap();
    let elapsed_time_seconds = overall_stopwatch.elapsed().as_secs().max(1);
    println!(
        "Total {} candidates in {elapsed_time_seconds} seconds, {} per second, {} symmetric, {} fresh, {} accepted",
        totals.examined.separate_with_commas(),
        (totals.examined / elapsed_time_seconds).separate_with_commas(),
        totals.symmetric.separate_with_commas(),
        totals.fresh.separate_with_commas(),
        totals.accepted.separate_with_commas()
    );
}
