#![allow(clippy::collapsible_if)]

pub mod format;
pub mod io;
pub mod spinner;

use std::ffi::OsString;
use std::process;

use console::style;
use rules_common::args::{Args, Error, Help};
use rules_common::config::Config;

pub use io::*;
pub use spinner::{spinner, Spinner};

/// Context passed to all commands.
pub trait Context {
    /// Return the active configuration, or an error if it could not be loaded.
    fn config(&self) -> Result<Config, anyhow::Error>;
}

impl Context for Config {
    fn config(&self) -> Result<Config, anyhow::Error> {
        Ok(self.clone())
    }
}

impl<F> Context for F
where
    F: Fn() -> Result<Config, anyhow::Error>,
{
    fn config(&self) -> Result<Config, anyhow::Error> {
        self()
    }
}

/// A command that can be run.
pub trait Command<A: Args, C: Context> {
    /// Run the command, given arguments and a context.
    fn run(self, args: A, context: C) -> anyhow::Result<()>;
}

impl<F, A: Args, C: Context> Command<A, C> for F
where
    F: FnOnce(A, C) -> anyhow::Result<()>,
{
    fn run(self, args: A, context: C) -> anyhow::Result<()> {
        self(args, context)
    }
}

pub fn run_command<A, C>(help: Help, action: &str, cmd: C) -> !
where
    A: Args,
    C: Command<A, fn() -> anyhow::Result<Config>>,
{
    let args = std::env::args_os().skip(1).collect();

    run_command_args(help, action, cmd, args)
}

pub fn run_command_args<A, C>(help: Help, action: &str, cmd: C, args: Vec<OsString>) -> !
where
    A: Args,
    C: Command<A, fn() -> anyhow::Result<Config>>,
{
    use crate::io as term;

    let options = match A::from_args(args) {
        Ok((opts, unparsed)) => {
            if let Err(err) = rules_common::args::finish(unparsed) {
                term::failure(help.name, &err);
                process::exit(1);
            }
            opts
        }
        Err(err) => {
            if let Some(Error::Help) = err.downcast_ref::<Error>() {
                term::help(help.name, help.version, help.description, help.usage);
                process::exit(0);
            }
            term::failure(help.name, &err);

            if let Some(Error::WithHint { hint, .. }) = err.downcast_ref::<Error>() {
                eprintln!("{}", style(hint).yellow());
            }

            process::exit(1);
        }
    };

    let load: fn() -> anyhow::Result<Config> = Config::load;

    match cmd.run(options, load) {
        Ok(()) => process::exit(0),
        Err(err) => {
            term::fail(&format!("{} failed", action), &err);
            process::exit(1);
        }
    }
}
