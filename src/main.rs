// umtty: run a Universal Machine program against the terminal

use umtty::console::StdConsole;
use umtty::loader::load_program_file;
use umtty::machine::engine::Machine;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("umtty");
        eprintln!("Error: expected exactly one program file");
        eprintln!();
        eprintln!("Usage: {} <program.um>", program_name);
        std::process::exit(1);
    }

    let program = match load_program_file(&args[1]) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut machine = Machine::new(program, StdConsole::new());
    if let Err(e) = machine.run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
