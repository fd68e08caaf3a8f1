use anyhow::Result;
use clap::ValueEnum;
use std::io::{BufRead, Write};

use crate::data::Preferences;

/// Preference axis a question fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    SleepTemperature,
    Season,
    Allergies,
    Budget,
    Size,
}

impl PreferenceKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceKey::SleepTemperature => "sleepTemperature",
            PreferenceKey::Season => "season",
            PreferenceKey::Allergies => "allergies",
            PreferenceKey::Budget => "budget",
            PreferenceKey::Size => "size",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "sleepTemperature" => Some(PreferenceKey::SleepTemperature),
            "season" => Some(PreferenceKey::Season),
            "allergies" => Some(PreferenceKey::Allergies),
            "budget" => Some(PreferenceKey::Budget),
            "size" => Some(PreferenceKey::Size),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [QuestionOption],
    pub preference_key: PreferenceKey,
}

const fn option(
    value: &'static str,
    label: &'static str,
    description: Option<&'static str>,
) -> QuestionOption {
    QuestionOption {
        value,
        label,
        description,
    }
}

pub const QUESTIONS: &[Question] = &[
    Question {
        id: "temperature",
        text: "Hvordan sover du typisk?",
        options: &[
            option("cold", "Jeg fryser let", Some("Jeg har brug for ekstra varme om natten")),
            option("normal", "Hverken eller", Some("Jeg sover som de fleste")),
            option("warm", "Jeg bliver let varm", Some("Jeg sveder ofte om natten")),
        ],
        preference_key: PreferenceKey::SleepTemperature,
    },
    Question {
        id: "season",
        text: "Hvornår skal dynen bruges?",
        options: &[
            option("summer", "Om sommeren", None),
            option("winter", "Om vinteren", None),
            option("all-season", "Hele året", Some("Én dyne til alle årstider")),
        ],
        preference_key: PreferenceKey::Season,
    },
    Question {
        id: "allergies",
        text: "Har du allergi eller astma?",
        options: &[
            option("yes", "Ja", Some("Dynen skal være allergivenlig")),
            option("no", "Nej", None),
        ],
        preference_key: PreferenceKey::Allergies,
    },
    Question {
        id: "budget",
        text: "Hvad er dit budget?",
        options: &[
            option("low", "Op til 2.000 kr.", None),
            option("medium", "2.000 - 3.500 kr.", None),
            option("high", "Over 3.500 kr.", None),
        ],
        preference_key: PreferenceKey::Budget,
    },
    Question {
        id: "size",
        text: "Hvilken størrelse har du brug for?",
        options: &[
            option("single", "Enkelt (135 cm)", None),
            option("double", "Dobbelt (200 cm eller bredere)", None),
        ],
        preference_key: PreferenceKey::Size,
    },
];

fn parse_choice<T: ValueEnum>(key: PreferenceKey, value: &str) -> Result<T> {
    T::from_str(value, false)
        .map_err(|_| anyhow::anyhow!("Invalid value for {}: {}", key.as_str(), value))
}

impl Preferences {
    /// Build a record from sparse `(key, value)` answers. Unrecognized keys are ignored.
    pub fn from_answers<I, K, V>(answers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut prefs = Preferences::default();
        for (key, value) in answers {
            match PreferenceKey::parse(key.as_ref()) {
                Some(parsed) => prefs.set(parsed, value.as_ref())?,
                None => {
                    tracing::debug!(key = %key.as_ref(), "Ignoring unrecognized preference")
                }
            }
        }
        Ok(prefs)
    }

    pub fn set(&mut self, key: PreferenceKey, value: &str) -> Result<()> {
        match key {
            PreferenceKey::SleepTemperature => {
                self.sleep_temperature = Some(parse_choice(key, value)?)
            }
            PreferenceKey::Season => self.season = Some(parse_choice(key, value)?),
            PreferenceKey::Allergies => {
                self.allergies = Some(match value {
                    "yes" => true,
                    "no" => false,
                    _ => anyhow::bail!(
                        "Invalid value for allergies: {} (expected yes or no)",
                        value
                    ),
                })
            }
            PreferenceKey::Budget => self.budget = Some(parse_choice(key, value)?),
            PreferenceKey::Size => self.size = Some(parse_choice(key, value)?),
        }
        Ok(())
    }

    /// Current answer for `key` in the same form [`Preferences::set`] accepts.
    pub fn answer(&self, key: PreferenceKey) -> Option<String> {
        fn name<T: ValueEnum>(value: T) -> Option<String> {
            value.to_possible_value().map(|v| v.get_name().to_string())
        }

        match key {
            PreferenceKey::SleepTemperature => self.sleep_temperature.and_then(name),
            PreferenceKey::Season => self.season.and_then(name),
            PreferenceKey::Allergies => self
                .allergies
                .map(|allergies| (if allergies { "yes" } else { "no" }).to_string()),
            PreferenceKey::Budget => self.budget.and_then(name),
            PreferenceKey::Size => self.size.and_then(name),
        }
    }
}

/// Resolve an answer typed at the prompt: an option number or its value.
fn resolve_answer(question: &Question, input: &str) -> Option<&'static str> {
    if let Ok(index) = input.parse::<usize>() {
        return question
            .options
            .get(index.checked_sub(1)?)
            .map(|option| option.value);
    }
    question
        .options
        .iter()
        .find(|option| option.value == input)
        .map(|option| option.value)
}

/// Walk through [`QUESTIONS`] on `input`, echoing prompts to `output`.
///
/// An empty answer moves on and keeps any earlier answer, `b` goes back one
/// step and end of input finishes with whatever has been answered so far.
pub fn run_interactive<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
) -> Result<Preferences> {
    let mut prefs = Preferences::default();
    let mut step = 0;

    while step < QUESTIONS.len() {
        let question = &QUESTIONS[step];

        writeln!(output, "[{}/{}] {}", step + 1, QUESTIONS.len(), question.text)?;
        for (idx, option) in question.options.iter().enumerate() {
            match option.description {
                Some(description) => {
                    writeln!(output, "  {}. {} - {}", idx + 1, option.label, description)?
                }
                None => writeln!(output, "  {}. {}", idx + 1, option.label)?,
            }
        }
        if let Some(current) = prefs.answer(question.preference_key) {
            let label = question
                .options
                .iter()
                .find(|option| option.value == current)
                .map_or(current.as_str(), |option| option.label);
            writeln!(output, "Nuværende svar: {}", label)?;
        }
        write!(output, "Svar (Enter springer over, b = tilbage): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let answer = line.trim();

        if answer.is_empty() {
            step += 1;
        } else if answer.eq_ignore_ascii_case("b") {
            step = step.saturating_sub(1);
        } else if let Some(value) = resolve_answer(question, answer) {
            prefs.set(question.preference_key, value)?;
            tracing::debug!(question = question.id, value, "Answered");
            step += 1;
        } else {
            writeln!(output, "Ugyldigt svar: {}", answer)?;
        }
        writeln!(output)?;
    }

    Ok(prefs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Budget, Season, SleepTemperature, Size};
    use std::io::Cursor;

    #[test]
    fn test_questions_cover_every_axis_once() {
        let keys: Vec<_> = QUESTIONS.iter().map(|q| q.preference_key).collect();
        assert_eq!(
            keys,
            vec![
                PreferenceKey::SleepTemperature,
                PreferenceKey::Season,
                PreferenceKey::Allergies,
                PreferenceKey::Budget,
                PreferenceKey::Size,
            ]
        );
    }

    #[test]
    fn test_every_option_value_is_accepted() {
        for question in QUESTIONS {
            for option in question.options {
                let mut prefs = Preferences::default();
                assert!(
                    prefs.set(question.preference_key, option.value).is_ok(),
                    "{} rejected {}",
                    question.id,
                    option.value
                );
                assert_ne!(prefs, Preferences::default());
                assert_eq!(
                    prefs.answer(question.preference_key).as_deref(),
                    Some(option.value)
                );
            }
        }
    }

    #[test]
    fn test_from_answers_maps_values() {
        let prefs = Preferences::from_answers([
            ("sleepTemperature", "warm"),
            ("season", "all-season"),
            ("allergies", "yes"),
            ("budget", "medium"),
            ("size", "double"),
        ])
        .unwrap();

        assert_eq!(prefs.sleep_temperature, Some(SleepTemperature::Warm));
        assert_eq!(prefs.season, Some(Season::AllSeason));
        assert_eq!(prefs.allergies, Some(true));
        assert_eq!(prefs.budget, Some(Budget::Medium));
        assert_eq!(prefs.size, Some(Size::Double));
    }

    #[test]
    fn test_from_answers_ignores_unknown_keys() {
        let prefs = Preferences::from_answers([("pillow", "soft"), ("allergies", "no")]).unwrap();

        assert_eq!(prefs.allergies, Some(false));
        assert_eq!(prefs.season, None);
    }

    #[test]
    fn test_from_answers_rejects_bad_value() {
        let err = Preferences::from_answers([("budget", "huge")]).unwrap_err();
        assert!(err.to_string().contains("budget"));

        let err = Preferences::from_answers([("allergies", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("allergies"));
    }

    #[test]
    fn test_interactive_numbers_skips_and_back() {
        // temperature: 1 (cold), season: skip, allergies: "b" back to season, then
        // winter, allergies: yes, budget: 3, then input ends before size.
        let input = Cursor::new("1\n\nb\nwinter\nyes\n3\n");
        let mut output = Vec::new();

        let prefs = run_interactive(input, &mut output).unwrap();

        assert_eq!(prefs.sleep_temperature, Some(SleepTemperature::Cold));
        assert_eq!(prefs.season, Some(Season::Winter));
        assert_eq!(prefs.allergies, Some(true));
        assert_eq!(prefs.budget, Some(Budget::High));
        assert_eq!(prefs.size, None);

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("[1/5] Hvordan sover du typisk?"));
        assert!(transcript.contains("[5/5]"));
    }

    #[test]
    fn test_interactive_reasks_on_invalid_answer() {
        let input = Cursor::new("9\nnormal\n\n\n\n\n");
        let mut output = Vec::new();

        let prefs = run_interactive(input, &mut output).unwrap();

        assert_eq!(prefs.sleep_temperature, Some(SleepTemperature::Normal));
        assert_eq!(prefs.season, None);
        assert!(String::from_utf8(output).unwrap().contains("Ugyldigt svar: 9"));
    }

    #[test]
    fn test_interactive_back_then_enter_keeps_answer() {
        // temperature: 1 (cold), then back, then Enter on the revisited question.
        let input = Cursor::new("1\nb\n\n\n\n\n\n");
        let mut output = Vec::new();

        let prefs = run_interactive(input, &mut output).unwrap();

        assert_eq!(prefs.sleep_temperature, Some(SleepTemperature::Cold));
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Nuværende svar: Jeg fryser let"));
    }

    #[test]
    fn test_interactive_back_allows_changing_answer() {
        let input = Cursor::new("1\nb\nwarm\nsummer\n");
        let mut output = Vec::new();

        let prefs = run_interactive(input, &mut output).unwrap();

        assert_eq!(prefs.sleep_temperature, Some(SleepTemperature::Warm));
        assert_eq!(prefs.season, Some(Season::Summer));
    }

    #[test]
    fn test_answer_reports_current_value() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.answer(PreferenceKey::Season), None);

        prefs.set(PreferenceKey::Season, "all-season").unwrap();
        prefs.set(PreferenceKey::Allergies, "no").unwrap();

        assert_eq!(prefs.answer(PreferenceKey::Season).as_deref(), Some("all-season"));
        assert_eq!(prefs.answer(PreferenceKey::Allergies).as_deref(), Some("no"));
    }
}
