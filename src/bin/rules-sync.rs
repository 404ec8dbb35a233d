use rules_cli::logger;
use rules_sync::{run, Options, HELP};
use rules_terminal as term;

fn main() {
    if let Err(err) = logger::init("rules_") {
        term::warning(&format!("logging is disabled: {}", err));
    }
    logger::set_level(log::Level::Info);

    term::run_command::<Options, _>(HELP, "Sync", run);
}
