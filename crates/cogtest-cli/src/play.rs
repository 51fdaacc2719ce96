//! Interactive naming test on a line-oriented terminal.

use std::io::{BufRead, Write};

use anyhow::Result;

use cogtest_core::{
    recommended_config, Difficulty, NamingSession, ProgressRecord, SessionResult, Submission,
    TestConfiguration, TestMode,
};

use crate::config::SessionConfig;

/// Typed instead of an answer to fetch a different picture.
pub const RELOAD_COMMAND: &str = "?";

/// Start from the recommendation for `progress`, then apply the config file,
/// then explicit flags.
pub fn build_config(
    progress: &ProgressRecord,
    file: &SessionConfig,
    mode: Option<TestMode>,
    count: Option<usize>,
    difficulty: Option<Difficulty>,
) -> Result<TestConfiguration> {
    let mut config = recommended_config(progress);
    if let Some(m) = mode.or(file.mode()?) {
        config.mode = m;
    }
    if let Some(c) = count.or(file.count) {
        config.count = c;
    }
    if let Some(d) = difficulty.or(file.difficulty()?) {
        config.difficulty = d;
    }
    Ok(config)
}

/// Ask for every remaining item. Returns `false` if input ended first.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut NamingSession<'_>,
    reload: impl Fn(&mut NamingSession<'_>) -> Option<String>,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let total = session.len();
    while let Some(item) = session.current_item() {
        if let Some(image) = session.current_image() {
            writeln!(
                out,
                "[{}/{total}] {} ({})",
                session.position() + 1,
                image.reference,
                image.source
            )?;
        }
        write!(out, "Name this animal: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(false);
        }
        let answer = line.trim();

        if answer == RELOAD_COMMAND {
            if let Some(reference) = reload(session) {
                writeln!(out, "New image: {reference}")?;
            }
            continue;
        }

        match session.submit(answer) {
            Submission::Blank => {
                writeln!(out, "Type a name, or {RELOAD_COMMAND} for a different image.")?
            }
            Submission::Graded { correct: true } => writeln!(out, "Correct!")?,
            Submission::Graded { correct: false } => {
                writeln!(out, "Not quite, it was {}.", item.name)?
            }
            Submission::Finished => break,
        }
    }
    Ok(true)
}

pub fn print_result<W: Write>(result: &SessionResult<'_>, out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Score:    {}/{} ({:.0}%)",
        result.raw_score(),
        result.max_score(),
        result.accuracy() * 100.0
    )?;
    writeln!(out, "Weighted: {}", result.weighted_score())?;
    for entry in &result.entries {
        let mark = if entry.correct { "ok" } else { "--" };
        writeln!(
            out,
            "  {mark} {:<20} {:<7} {}",
            entry.item.name, entry.item.tier, entry.answer
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use cogtest_core::resolver::{ImageReference, ImageSource, Resolution};
    use cogtest_core::{Catalog, Tier};

    fn session() -> NamingSession<'static> {
        let catalog = Catalog::builtin();
        let items = ["lion", "camel", "rhinoceros"]
            .iter()
            .map(|id| {
                let item = catalog.find(id).unwrap();
                let image = Resolution {
                    reference: ImageReference::Remote(format!("https://img/{id}")),
                    source: ImageSource::Placeholder,
                };
                (item, image)
            })
            .collect();
        NamingSession::new(
            TestConfiguration::new(TestMode::Fixed, 3, Tier::Medium.into()),
            items,
        )
    }

    fn no_reload(_: &mut NamingSession<'_>) -> Option<String> {
        None
    }

    #[test]
    fn test_build_config_uses_recommendation() {
        let progress = ProgressRecord::default();
        let config = build_config(&progress, &SessionConfig::default(), None, None, None).unwrap();
        assert_eq!(config.mode, TestMode::Fixed);
        assert_eq!(config.count, 3);
    }

    #[test]
    fn test_build_config_flags_beat_file() {
        let progress = ProgressRecord {
            tests_completed: 2,
            ..ProgressRecord::default()
        };
        let file = SessionConfig {
            mode: Some("random".into()),
            count: Some(4),
            difficulty: Some("easy".into()),
        };
        let config = build_config(&progress, &file, Some(TestMode::Adaptive), None, None).unwrap();
        assert_eq!(config.mode, TestMode::Adaptive);
        assert_eq!(config.count, 4);
        assert_eq!(config.difficulty, Difficulty::Tier(Tier::Easy));
    }

    #[test]
    fn test_run_session_to_completion() {
        let mut s = session();
        let mut input = Cursor::new("Lion\n\ncamel\nzebra\n");
        let mut out = Vec::new();
        let done = run_session(&mut s, no_reload, &mut input, &mut out).unwrap();
        assert!(done);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[1/3] https://img/lion (placeholder)"));
        assert!(text.contains("Type a name"));
        assert!(text.contains("Not quite, it was Rhinoceros."));

        let result = s.finish();
        assert_eq!(result.correct_ids(), vec!["lion", "camel"]);
    }

    #[test]
    fn test_run_session_reload() {
        let mut s = session();
        let mut input = Cursor::new("?\nlion\n");
        let mut out = Vec::new();
        let done = run_session(
            &mut s,
            |_| Some("https://img/lion-2".to_string()),
            &mut input,
            &mut out,
        )
        .unwrap();
        assert!(!done);
        assert_eq!(s.position(), 1);
        assert!(String::from_utf8(out).unwrap().contains("New image: https://img/lion-2"));
    }

    #[test]
    fn test_print_result() {
        let mut s = session();
        s.submit("lion");
        s.submit("horse");
        s.submit("rhino");
        let mut out = Vec::new();
        print_result(&s.finish(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Score:    2/3 (67%)"));
        assert!(text.contains("Weighted: 67"));
    }
}
