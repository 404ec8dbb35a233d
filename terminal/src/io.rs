use std::fmt;

use console::style;

use rules_common::args::Error;

pub const TAB: &str = "   ";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => ({
        println!("{}", format_args!($($arg)*));
    })
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => ({
        $crate::io::success_args(format_args!($($arg)*));
    })
}

#[macro_export]
macro_rules! tip {
    ($($arg:tt)*) => ({
        $crate::io::tip_args(format_args!($($arg)*));
    })
}

pub fn success_args(args: fmt::Arguments) {
    println!("{} {}", style("✓").green().bold(), args);
}

pub fn tip_args(args: fmt::Arguments) {
    println!(
        "{} {}",
        style("=>").blue(),
        style(format!("{}", args)).dim()
    );
}

pub use info;
pub use success;
pub use tip;

pub fn help(name: &str, version: &str, description: &str, usage: &str) {
    println!("{} {}\n{}\n{}", name, version, description, usage);
}

pub fn eprintln(prefix: impl fmt::Display, msg: impl fmt::Display) {
    eprintln!("{} {}", prefix, msg);
}

pub fn indented(msg: impl fmt::Display) {
    println!("{}{}", TAB, msg);
}

pub fn warning(warning: &str) {
    eprintln!(
        "{} {} {}",
        style("**").yellow(),
        style("Warning:").yellow().bold(),
        style(warning).yellow()
    );
}

/// Report an argument or setup error for the named command.
pub fn failure(name: &str, error: &anyhow::Error) {
    eprintln!(
        "{} {} {} {}",
        style("✗").red(),
        style("Error:").red(),
        style(format!("{}:", name)).red(),
        style(error).red()
    );
}

pub fn fail(header: &str, error: &anyhow::Error) {
    let err = error.to_string();
    let err = err.trim_end();
    let separator = if err.len() > 160 || err.contains('\n') {
        "\n"
    } else {
        " "
    };

    eprintln!(
        "{} {}{}{}",
        style("✗").red(),
        style(format!("Error: {}:", header)).red().bold(),
        separator,
        style(err).red(),
    );

    let cause = error.root_cause();
    if cause.to_string() != error.to_string() {
        eprintln!("{} {}", style("✗").red().dim(), style(cause).red().dim());
    }

    if let Some(Error::WithHint { hint, .. }) = error.downcast_ref::<Error>() {
        eprintln!("{} {}", style("=>").yellow(), style(hint).yellow());
    }
}
