#![forbid(unsafe_code)]

fn main() {
    tintbridge_cli::init_tracing();
    if let Err(error) = tintbridge_cli::run_from_env() {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
