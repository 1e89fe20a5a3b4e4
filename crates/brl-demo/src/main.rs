#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = brl_demo::run_from_env() {
        eprintln!("brl-demo: {error}");
        std::process::exit(error.exit_code());
    }
}
