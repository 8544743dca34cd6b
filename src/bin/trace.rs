// umtty-trace: record a Universal Machine run and step through it in a TUI

use std::fs;
use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use umtty::loader::load_program_file;
use umtty::snapshot::{Trace, TraceLimits, TraceOutcome};
use umtty::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("umtty-trace");
        eprintln!("Error: No program file provided");
        eprintln!();
        eprintln!("Usage: {} <program.um> [input-file]", program_name);
        eprintln!();
        eprintln!("The input file, if given, is fed to the program's input instruction;");
        eprintln!("without one the program sees end of input immediately.");
        std::process::exit(1);
    }

    eprintln!("Loading {}...", args[1]);
    let program = match load_program_file(&args[1]) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Load error: {}", e);
            std::process::exit(1);
        }
    };
    eprintln!("Loaded {} words.", program.len());

    let input = match args.get(2) {
        Some(path) => match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error: Cannot read input file '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => Vec::new(),
    };

    // Run execution to build history
    eprintln!("Executing program...");
    let limits = TraceLimits::default();
    let mut trace = Trace::record(program, input, limits);

    match trace.outcome() {
        TraceOutcome::Halted => {
            eprintln!("Execution completed successfully.");
        }
        TraceOutcome::Faulted(e) => {
            eprintln!("Runtime error: {}", e);
            eprintln!("Entering TUI with partial execution history...");
        }
        TraceOutcome::StepLimitReached => {
            eprintln!(
                "Warning: stopped after {} instructions; history is partial",
                limits.max_steps
            );
        }
        TraceOutcome::SnapshotLimitReached(e) => {
            eprintln!("Warning: {}; history is partial", e);
        }
    }
    eprintln!(
        "Total snapshots: {} ({} KiB)",
        trace.total_snapshots(),
        trace.memory_usage() / 1024
    );

    // Rewind to the beginning for TUI
    if let Err(e) = trace.rewind_to_start() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(trace);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}
