//! Operator script: the sequence of control actions to replay

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// One operator action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One encoder detent clockwise
    Up,
    /// One encoder detent counter-clockwise
    Down,
    /// Encoder push button
    Press,
    /// Flip the fine-step switch
    Switch,
    /// Let the controller run
    Wait(Duration),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown script word `{0}` (expected up, down, press, switch or wait:<ms>)")]
    UnknownWord(String),

    #[error("bad wait duration `{0}`")]
    BadWait(String),
}

impl FromStr for Step {
    type Err = ScriptError;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        let word = word.trim().to_ascii_lowercase();
        if let Some(ms) = word.strip_prefix("wait:") {
            return ms
                .parse::<u64>()
                .map(|ms| Step::Wait(Duration::from_millis(ms)))
                .map_err(|_| ScriptError::BadWait(ms.to_string()));
        }

        match word.as_str() {
            "up" | "+" => Ok(Step::Up),
            "down" | "-" => Ok(Step::Down),
            "press" | "p" => Ok(Step::Press),
            "switch" | "s" => Ok(Step::Switch),
            _ => Err(ScriptError::UnknownWord(word)),
        }
    }
}

/// Parse every word, expanding `<word>*<n>` into `n` copies
pub fn parse(words: &[String]) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for word in words {
        let (action, count) = match word.split_once('*') {
            Some((action, count)) => {
                let count = count
                    .parse::<usize>()
                    .map_err(|_| ScriptError::UnknownWord(word.clone()))?;
                (action, count)
            }
            None => (word.as_str(), 1),
        };
        let step = action.parse::<Step>()?;
        steps.extend(std::iter::repeat(step).take(count));
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn parses_words() {
        let steps = parse(&words(&["press", "UP", "down", "switch", "wait:250"])).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Press,
                Step::Up,
                Step::Down,
                Step::Switch,
                Step::Wait(Duration::from_millis(250)),
            ]
        );
    }

    #[test]
    fn expands_repeats() {
        let steps = parse(&words(&["up*3"])).unwrap();
        assert_eq!(steps, vec![Step::Up; 3]);
    }

    #[test]
    fn rejects_unknown_words() {
        assert_eq!(
            parse(&words(&["jump"])),
            Err(ScriptError::UnknownWord("jump".into()))
        );
        assert_eq!(
            parse(&words(&["wait:soon"])),
            Err(ScriptError::BadWait("soon".into()))
        );
    }
}
