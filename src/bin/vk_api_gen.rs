use vk_api_gen::cli::run_cli;
use vk_api_gen::logging::init_logging;

fn main() {
    if let Err(err) = init_logging() {
        eprintln!("Warning: {err:#}");
    }
    if let Err(err) = run_cli() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
