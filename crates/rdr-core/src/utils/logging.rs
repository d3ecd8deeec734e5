pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        println!("Verbose: {}", msg);
    }
}

/// Log level for the CLI logger: debug output only in verbose mode
pub fn log_level(verbose: bool) -> log::Level {
    if verbose {
        log::Level::Debug
    } else {
        log::Level::Warn
    }
}
