pub use console::style;

pub fn yellow<D: std::fmt::Display>(msg: D) -> String {
    style(msg).yellow().to_string()
}

pub fn highlight<D: std::fmt::Display>(input: D) -> String {
    style(input).green().bright().to_string()
}

pub fn badge_secondary<D: std::fmt::Display>(input: D) -> String {
    style(format!(" {} ", input)).blue().reverse().to_string()
}
