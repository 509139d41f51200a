use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pagemark")]
#[command(about = "Extract the main content of an HTML page as Markdown")]
#[command(version)]
pub struct Cli {
    /// HTML file to read (stdin when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Drop LaTeX delimiters, for destinations that cannot render math
    #[arg(short, long)]
    pub compact: bool,

    /// Page location, used to absolutize links and select site profiles
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Answer a trigger message (JSON) and print the JSON response
    #[arg(short, long, value_name = "JSON")]
    pub message: Option<String>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["pagemark", "page.html", "--compact", "--url", "https://example.com/", "-vv"]);
        assert_eq!(cli.file, Some(PathBuf::from("page.html")));
        assert!(cli.compact);
        assert_eq!(cli.url.as_deref(), Some("https://example.com/"));
        assert_eq!(cli.message, None);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_stdin_and_message() {
        let cli = Cli::parse_from(["pagemark", "-m", r#"{"action":"extractContent"}"#]);
        assert_eq!(cli.file, None);
        assert!(!cli.compact);
        assert_eq!(cli.message.as_deref(), Some(r#"{"action":"extractContent"}"#));
    }
}
