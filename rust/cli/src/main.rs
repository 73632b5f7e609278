use std::io;
use std::process::exit;

fn main() {
    env_logger::init();
    let code = gambit_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    exit(code);
}
