use crate::render::render_table;
use crate::script::{Command, parse_line};
use infection_core::game::{Tracker, TrackerReport};
use infection_core::odds::OddsSampler;
use std::io::{self, BufRead, Write};
use tracing::{Level, event};

/// Counts of what happened while running a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub applied: usize,
    pub refused: usize,
    pub invalid: usize,
}

/// Drives a [`Tracker`] from script commands, printing results to `out`.
pub struct Session {
    tracker: Tracker,
    sampler: OddsSampler,
}

impl Session {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker,
            sampler: OddsSampler::new(),
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn into_tracker(self) -> Tracker {
        self.tracker
    }

    /// Runs every line of `input`. Refused intents and malformed lines are
    /// reported and skipped.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> io::Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            match parse_line(number, &line) {
                Ok(Some(command)) => {
                    if self.execute(command, out)? {
                        summary.applied += 1;
                    } else {
                        summary.refused += 1;
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    summary.invalid += 1;
                    writeln!(out, "error: {err}")?;
                }
            }
        }

        event!(
            target: "infection_cli::session",
            Level::INFO,
            applied = summary.applied,
            refused = summary.refused,
            invalid = summary.invalid,
            rounds = self.tracker.state().round_count(),
        );
        Ok(summary)
    }

    /// Executes one command. Returns `false` when the tracker refused it.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<bool> {
        match command {
            Command::Apply(intent) => {
                let label = intent.label();
                match self.tracker.apply(intent) {
                    Ok(next) => {
                        let opened =
                            next.state().round_count() > self.tracker.state().round_count();
                        self.tracker = next;
                        if opened {
                            writeln!(
                                out,
                                "epidemic recorded; round R{} opened",
                                self.tracker.state().round_count()
                            )?;
                        }
                        Ok(true)
                    }
                    Err(err) => {
                        event!(
                            target: "infection_cli::session",
                            Level::DEBUG,
                            intent = label,
                            error = %err,
                        );
                        writeln!(out, "refused: {err}")?;
                        Ok(false)
                    }
                }
            }
            Command::Show => {
                write!(out, "{}", render_table(&self.tracker.report()))?;
                Ok(true)
            }
            Command::Json => {
                let json = TrackerReport::to_json(&self.tracker).map_err(io::Error::other)?;
                writeln!(out, "{json}")?;
                Ok(true)
            }
            Command::Sample { seed } => {
                if let Some(seed) = seed {
                    self.sampler = OddsSampler::with_seed(seed);
                }
                let odds = self.tracker.probabilities();
                match self.sampler.sample(&odds) {
                    Some(city) => writeln!(out, "next draw: {city}")?,
                    None => writeln!(out, "next draw: none expected")?,
                }
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, SessionSummary};
    use infection_core::game::Tracker;

    fn run(script: &str) -> (Session, SessionSummary, String) {
        let mut session = Session::new(Tracker::standard());
        let mut out = Vec::new();
        let summary = session.run(script.as_bytes(), &mut out).expect("script runs");
        (session, summary, String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn script_drives_epidemic_flow() {
        let (session, summary, out) = run("draw Atlanta\nepidemic\nselect Denver\n");
        assert_eq!(
            summary,
            SessionSummary {
                applied: 3,
                refused: 0,
                invalid: 0
            }
        );
        assert!(out.contains("round R2 opened"));
        assert_eq!(session.tracker().state().round_count(), 2);
    }

    #[test]
    fn refused_intents_do_not_stop_the_script() {
        let (session, summary, out) =
            run("undraw Atlanta\nepidemic\ndraw Cairo\ncancel\ndraw Cairo\n");
        assert_eq!(summary.refused, 2);
        assert_eq!(summary.applied, 3);
        assert!(out.contains("refused: Atlanta"));
        assert!(out.contains("refused: an epidemic is waiting"));
        assert_eq!(session.tracker().state().observed(0, "Cairo"), Some(1));
    }

    #[test]
    fn malformed_lines_are_counted() {
        let (_, summary, out) = run("shuffle\n# comment\n\nround x Atlanta +1\n");
        assert_eq!(summary.invalid, 2);
        assert!(out.contains("error: line 1: unknown command 'shuffle'"));
        assert!(out.contains("error: line 4: invalid number 'x'"));
    }

    #[test]
    fn round_numbers_match_table_columns() {
        let (session, summary, out) = run("round 1 Atlanta +1\nround 2 Atlanta +1\n");
        assert_eq!(summary.applied, 1);
        assert_eq!(session.tracker().state().observed(0, "Atlanta"), Some(1));
        assert!(out.contains("refused: round R2 does not exist (1 rounds recorded)"));
    }

    #[test]
    fn seeded_sample_names_a_possible_city() {
        let (_, _, out) = run("epidemic\nselect Denver\nsample 9\n");
        assert!(out.contains("next draw: Denver"));
    }

    #[test]
    fn show_and_json_render_current_state() {
        let (_, _, out) = run("show\njson\n");
        assert!(out.contains("mode: tracking"));
        assert!(out.contains("\"deck_total\": 39"));
    }
}
