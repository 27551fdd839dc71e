use std::str::FromStr;

use discovery_core::FeedbackKind;

pub const HELP: &str = "\
commands:
  like | dislike | maybe     send feedback for the shown project
  star                       star the shown project
  starred                    list starred projects
  unstar <url>               remove a starred project
  prefs                      show preferences
  tag add <tag>              add a filter tag
  tag rm <tag>               remove a filter tag
  stars <min> <max>          set the star range
  server <url>               set the backend url
  show                       show the current project
  help                       this text
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Feedback(FeedbackKind),
    Star,
    Starred,
    Unstar(String),
    Prefs,
    TagAdd(String),
    TagRemove(String),
    Stars { min: u64, max: u64 },
    Server(String),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            "" | "show" => Ok(Command::Show),
            "star" => Ok(Command::Star),
            "starred" => Ok(Command::Starred),
            "unstar" => non_empty(rest, "unstar <url>").map(Command::Unstar),
            "prefs" => Ok(Command::Prefs),
            "tag" => parse_tag(rest),
            "stars" => parse_stars(rest),
            "server" => non_empty(rest, "server <url>").map(Command::Server),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => other
                .parse::<FeedbackKind>()
                .map(Command::Feedback)
                .map_err(|_| format!("unknown command {other:?}; try `help`")),
        }
    }
}

fn non_empty(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_tag(rest: &str) -> Result<Command, String> {
    match rest.split_once(char::is_whitespace) {
        Some(("add", tag)) => non_empty(tag.trim(), "tag add <tag>").map(Command::TagAdd),
        Some(("rm", tag)) => non_empty(tag.trim(), "tag rm <tag>").map(Command::TagRemove),
        _ => Err("usage: tag add <tag> | tag rm <tag>".to_string()),
    }
}

fn parse_stars(rest: &str) -> Result<Command, String> {
    let usage = || "usage: stars <min> <max>".to_string();
    let mut parts = rest.split_whitespace();
    let (Some(min), Some(max), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(usage());
    };
    let min = min.parse().map_err(|_| usage())?;
    let max = max.parse().map_err(|_| usage())?;
    Ok(Command::Stars { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, String> {
        line.parse()
    }

    #[test]
    fn feedback_words_parse_case_insensitively() {
        assert_eq!(parse("like"), Ok(Command::Feedback(FeedbackKind::Like)));
        assert_eq!(parse(" Dislike "), Ok(Command::Feedback(FeedbackKind::Dislike)));
        assert_eq!(parse("MAYBE"), Ok(Command::Feedback(FeedbackKind::Maybe)));
    }

    #[test]
    fn tag_commands_keep_the_raw_tag() {
        assert_eq!(
            parse("tag add Machine Learning"),
            Ok(Command::TagAdd("Machine Learning".to_string()))
        );
        assert_eq!(parse("tag rm rust"), Ok(Command::TagRemove("rust".to_string())));
        assert!(parse("tag add").is_err());
        assert!(parse("tag drop rust").is_err());
    }

    #[test]
    fn stars_needs_two_numbers() {
        assert_eq!(parse("stars 100 50"), Ok(Command::Stars { min: 100, max: 50 }));
        assert!(parse("stars 100").is_err());
        assert!(parse("stars 1 2 3").is_err());
        assert!(parse("stars -1 2").is_err());
    }

    #[test]
    fn blank_line_shows_and_unknown_words_fail() {
        assert_eq!(parse("   "), Ok(Command::Show));
        assert!(parse("superlike").unwrap_err().contains("unknown command"));
        assert_eq!(
            parse("unstar https://github.com/x/y"),
            Ok(Command::Unstar("https://github.com/x/y".to_string()))
        );
    }
}
