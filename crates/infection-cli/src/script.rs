use infection_core::game::Intent;
use thiserror::Error;

const ROUND_USAGE: &str = "round <number> <city> <+n|-n|n>";
const DECK_USAGE: &str = "deck <city> <+n|-n|n>";

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(Intent),
    Show,
    Json,
    Sample { seed: Option<u64> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: usage: {usage}")]
    MissingArgument { line: usize, usage: &'static str },
    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },
    #[error("line {line}: unterminated quote")]
    UnterminatedQuote { line: usize },
}

enum Amount {
    Delta(i64),
    Set(u32),
}

/// Parses a single line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Command>, ScriptError> {
    let text = strip_comment(text);
    let tokens = tokenize(line, text)?;
    let Some((head, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "draw" => Command::Apply(Intent::RecordDraw {
            city: city(line, args, "draw <city>")?,
        }),
        "undraw" => Command::Apply(Intent::RetractDraw {
            city: city(line, args, "undraw <city>")?,
        }),
        "add" => Command::Apply(Intent::AddCity {
            name: city(line, args, "add <city>")?,
        }),
        "select" => Command::Apply(Intent::SelectEpidemicCity {
            city: Some(city(line, args, "select <city>")?),
        }),
        "deck" => {
            let (amount, rest) = trailing_amount(line, args, DECK_USAGE)?;
            let city = city(line, rest, DECK_USAGE)?;
            Command::Apply(match amount {
                Amount::Delta(delta) => Intent::AdjustDeckCount { city, delta },
                Amount::Set(count) => Intent::SetDeckCount { city, count },
            })
        }
        "round" => {
            let (index, rest) = args.split_first().ok_or(ScriptError::MissingArgument {
                line,
                usage: ROUND_USAGE,
            })?;
            // Rounds are numbered from 1, matching the R1.. table columns.
            let round = index
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .ok_or_else(|| ScriptError::InvalidNumber {
                    line,
                    value: index.clone(),
                })?;
            let (amount, rest) = trailing_amount(line, rest, ROUND_USAGE)?;
            let city = city(line, rest, ROUND_USAGE)?;
            Command::Apply(match amount {
                Amount::Delta(delta) => Intent::AdjustRoundCount { round, city, delta },
                Amount::Set(count) => Intent::SetRoundCount { round, city, count },
            })
        }
        "epidemic" => Command::Apply(Intent::DeclareEpidemic),
        "cancel" => Command::Apply(Intent::CancelEpidemicSelection),
        "undo" | "restore" => Command::Apply(Intent::UndoLastEpidemic),
        "show" => Command::Show,
        "json" => Command::Json,
        "sample" => {
            let seed = args
                .first()
                .map(|value| {
                    value.parse::<u64>().map_err(|_| ScriptError::InvalidNumber {
                        line,
                        value: value.clone(),
                    })
                })
                .transpose()?;
            Command::Sample { seed }
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    Ok(Some(command))
}

fn strip_comment(text: &str) -> &str {
    let mut quoted = false;
    for (index, ch) in text.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            '#' if !quoted => return &text[..index],
            _ => {}
        }
    }
    text
}

fn tokenize(line: usize, text: &str) -> Result<Vec<String>, ScriptError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for ch in text.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    tokens.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }

    if quoted {
        return Err(ScriptError::UnterminatedQuote { line });
    }
    if pending {
        tokens.push(current);
    }
    Ok(tokens)
}

/// City names may span several unquoted words.
fn city(line: usize, args: &[String], usage: &'static str) -> Result<String, ScriptError> {
    if args.is_empty() {
        return Err(ScriptError::MissingArgument { line, usage });
    }
    Ok(args.join(" "))
}

fn trailing_amount<'a>(
    line: usize,
    args: &'a [String],
    usage: &'static str,
) -> Result<(Amount, &'a [String]), ScriptError> {
    let (last, rest) = args
        .split_last()
        .ok_or(ScriptError::MissingArgument { line, usage })?;
    let invalid = || ScriptError::InvalidNumber {
        line,
        value: last.clone(),
    };
    let amount = if let Some(digits) = last.strip_prefix('+') {
        Amount::Delta(digits.parse::<i64>().map_err(|_| invalid())?)
    } else if last.starts_with('-') {
        Amount::Delta(last.parse::<i64>().map_err(|_| invalid())?)
    } else {
        Amount::Set(last.parse::<u32>().map_err(|_| invalid())?)
    };
    Ok((amount, rest))
}
