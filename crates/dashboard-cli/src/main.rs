//! `dashboard` binary.

fn main() {
    std::process::exit(dashboard_cli::run());
}
