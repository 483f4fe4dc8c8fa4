// Exchanger: step through a value exchange with full memory visualization

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use exchanger::interpreter::constants::DEFAULT_SNAPSHOT_LIMIT;
use exchanger::interpreter::engine::Interpreter;
use exchanger::parser::parse::Parser;
use exchanger::trace::write_trace;
use exchanger::ui::App;
use exchanger::EXAMPLE_SOURCE;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("exchanger");

    let mut trace = false;
    let mut input_file: Option<&str> = None;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--trace" => trace = true,
            "-h" | "--help" => {
                print_usage(program_name);
                return Ok(());
            }
            file if input_file.is_none() => input_file = Some(file),
            extra => {
                eprintln!("Error: Unexpected argument '{}'", extra);
                print_usage(program_name);
                std::process::exit(1);
            }
        }
    }

    let (source, source_name) = match input_file {
        Some(file) => {
            if !Path::new(file).exists() {
                eprintln!("Error: File '{}' not found", file);
                print_usage(program_name);
                std::process::exit(1);
            }
            (fs::read_to_string(file)?, file.to_string())
        }
        None => (EXAMPLE_SOURCE.to_string(), "bundled example".to_string()),
    };

    eprintln!("Parsing {}...", source_name);
    let program = match Parser::new(&source).and_then(|mut parser| parser.parse_program()) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Parser error: {}", e);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Parsed successfully. Found {} top-level items.",
        program.nodes.len()
    );

    let mut interpreter = Interpreter::new(program, DEFAULT_SNAPSHOT_LIMIT);

    eprintln!("Executing program...");
    let run_error = match interpreter.run() {
        Ok(()) => {
            eprintln!("Execution completed successfully.");
            eprintln!("Total snapshots: {}", interpreter.total_snapshots());
            None
        }
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            eprintln!("Keeping partial execution history...");
            Some(e)
        }
    };

    if trace {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_trace(&interpreter, &mut out)?;
        if let Some(e) = &run_error {
            writeln!(out, "error: {}", e)?;
        }
        return Ok(());
    }

    // Rewind to the beginning for TUI
    if let Err(e) = interpreter.rewind_to_start() {
        eprintln!("Warning: Failed to rewind to start: {}", e);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(interpreter, source, run_error);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [file.c] [--trace]", program_name);
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {}                    # Step through the bundled swap example",
        program_name
    );
    eprintln!(
        "  {} demos/locals.c     # Run your own program",
        program_name
    );
    eprintln!(
        "  {} --trace            # Print every step instead of opening the viewer",
        program_name
    );
}
