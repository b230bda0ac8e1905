//! Line-oriented terminal front end.
//!
//! Plain lines are treated as the new value of the search box; lines starting
//! with `:` are commands.

use std::fmt::Write;

use crate::app::{AppStateInner, ClickTarget, Key, UiEvent};
use crate::models::RecommendMethod;
use crate::view::Percent;

pub const HELP: &str = "\
type to search, then:
  :pick N        select suggestion N
  :go            press Enter (request recommendations)
  :key K         press K in the search box (enter or one character)
  :focus         focus the search box
  :click         click outside the search box
  :method NAME   content | embedding
  :count N       5 | 10 | 15 | 20
  :show          print the current state
  :html          print the rendered page
  :quit          exit";

/// One parsed terminal line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Show,
    Html,
    Help,
    Quit,
}

/// Maps a line to a command; the error string is meant for the user
pub fn parse_command(line: &str) -> Result<Command, String> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Event(UiEvent::Input(line.to_string())));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name, arg) {
        ("pick", Some(n)) => n
            .parse::<usize>()
            .map(|n| Command::Event(UiEvent::Click(ClickTarget::SuggestionItem(n))))
            .map_err(|_| format!("not a suggestion number: {}", n)),
        ("go", None) => Ok(Command::Event(UiEvent::KeyPress(Key::Enter))),
        ("key", Some(k)) => parse_key(k)
            .map(|key| Command::Event(UiEvent::KeyPress(key)))
            .ok_or_else(|| format!("not a key: {}", k)),
        ("focus", None) => Ok(Command::Event(UiEvent::Focus)),
        ("click", None) => Ok(Command::Event(UiEvent::Click(ClickTarget::Elsewhere))),
        ("method", Some(m)) => RecommendMethod::parse(m)
            .map(|m| Command::Event(UiEvent::MethodChanged(m)))
            .ok_or_else(|| format!("unknown method: {}", m)),
        ("count", Some(n)) => n
            .parse::<u32>()
            .map(|n| Command::Event(UiEvent::CountChanged(n)))
            .map_err(|_| format!("not a count: {}", n)),
        ("show", None) => Ok(Command::Show),
        ("html", None) => Ok(Command::Html),
        ("help", None) => Ok(Command::Help),
        ("quit", None) | ("q", None) => Ok(Command::Quit),
        _ => Err(format!("unknown command: {}", line.trim())),
    }
}

fn parse_key(name: &str) -> Option<Key> {
    if name.eq_ignore_ascii_case("enter") {
        return Some(Key::Enter);
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(Key::Other(c)),
        _ => None,
    }
}

/// Plain-text rendering of the state for the terminal
pub fn describe(state: &AppStateInner) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "catalog: {} titles ({} movies, {} tv shows)",
        state.stats.total_titles, state.stats.movies, state.stats.tv_shows
    );
    let _ = writeln!(
        out,
        "search: {:?}  selected: {}  method: {}{}  count: {}",
        state.input,
        state.selected_title().unwrap_or("-"),
        state.method,
        if state.embedding_enabled { "" } else { " (embedding unavailable)" },
        state.count
    );

    if state.dropdown_open {
        for (i, item) in state.suggestions.iter().enumerate() {
            let _ = writeln!(
                out,
                "  [{}] {} ({}, {})",
                i,
                item.title,
                item.kind.label(),
                item.release_year
            );
        }
    }

    if state.loading {
        let _ = writeln!(out, "loading...");
    }
    if state.error.visible {
        let _ = writeln!(out, "error: {}", state.error.message);
    }

    if let (true, Some(data)) = (state.results.visible, &state.results.data) {
        let _ = writeln!(
            out,
            "you selected: {} ({}, {})",
            data.source.title,
            data.source.kind.label(),
            data.source.release_year
        );
        let _ = writeln!(out, "{} recommendations found", data.recommendations.len());
        for rec in &data.recommendations {
            let _ = writeln!(
                out,
                "  {:>4}  {} ({})",
                Percent::from_similarity(rec.similarity).to_string(),
                rec.title.title,
                rec.title.release_year
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_input() {
        assert_eq!(
            parse_command("the office"),
            Ok(Command::Event(UiEvent::Input("the office".to_string())))
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(
            parse_command(":pick 2"),
            Ok(Command::Event(UiEvent::Click(ClickTarget::SuggestionItem(2))))
        );
        assert_eq!(
            parse_command(":method embedding"),
            Ok(Command::Event(UiEvent::MethodChanged(RecommendMethod::Embedding)))
        );
        assert_eq!(parse_command(":go"), Ok(Command::Event(UiEvent::KeyPress(Key::Enter))));
        assert_eq!(parse_command(":quit"), Ok(Command::Quit));
        assert_eq!(
            parse_command(":key Enter"),
            Ok(Command::Event(UiEvent::KeyPress(Key::Enter)))
        );
        assert_eq!(
            parse_command(":key x"),
            Ok(Command::Event(UiEvent::KeyPress(Key::Other('x'))))
        );
    }

    #[test]
    fn test_bad_commands_are_reported() {
        assert!(parse_command(":pick two").is_err());
        assert!(parse_command(":method cosine").is_err());
        assert!(parse_command(":dance").is_err());
        assert!(parse_command(":key tab").is_err());
    }

    #[test]
    fn test_describe_lists_open_suggestions() {
        let mut state = AppStateInner::new(10);
        state.apply_input("heat", 2);
        let ticket = state.begin_search("heat").unwrap();
        state.finish_search(
            ticket,
            vec![crate::models::SearchResultItem {
                title: "Heat".to_string(),
                kind: crate::models::TitleType::Movie,
                release_year: 1995,
            }],
        );

        let text = describe(&state);
        assert!(text.contains("[0] Heat (Movie, 1995)"));
        assert!(text.contains("selected: -"));
    }
}
