use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

// Private-use code points, so literal "<prd>"-style markers in the input
// cannot be mistaken for boundaries.
const PRD: &str = "\u{E000}";
const STOP: &str = "\u{E001}";

const STARTERS: &str = r"(Mr|Mrs|Ms|Dr|Prof|Capt|Cpt|Lt|He\s|She\s|It\s|They\s|Their\s|Our\s|We\s|But\s|However\s|That\s|This\s|Wherever)";

lazy_static! {
    static ref PREFIXES: Regex = Regex::new(r"(Mr|St|Mrs|Ms|Dr)[.]").unwrap();
    static ref WEBSITES: Regex = Regex::new(r"[.](com|net|org|io|gov|edu|me)").unwrap();
    static ref DECIMALS: Regex = Regex::new(r"([0-9])[.]([0-9])").unwrap();
    static ref MULTIPLE_DOTS: Regex = Regex::new(r"\.{2,}").unwrap();
    static ref SPACED_INITIAL: Regex = Regex::new(r"\s([A-Za-z])[.] ").unwrap();
    static ref ACRONYM_BEFORE_STARTER: Regex =
        Regex::new(&format!(r"([A-Z][.][A-Z][.](?:[A-Z][.])?) {}", STARTERS)).unwrap();
    static ref THREE_LETTER_ACRONYM: Regex =
        Regex::new(r"([A-Za-z])[.]([A-Za-z])[.]([A-Za-z])[.]").unwrap();
    static ref TWO_LETTER_ACRONYM: Regex = Regex::new(r"([A-Za-z])[.]([A-Za-z])[.]").unwrap();
    static ref SUFFIX_BEFORE_STARTER: Regex =
        Regex::new(&format!(r" (Inc|Ltd|Jr|Sr|Co)[.] {}", STARTERS)).unwrap();
    static ref SUFFIXES: Regex = Regex::new(r" (Inc|Ltd|Jr|Sr|Co)[.]").unwrap();
    static ref LONE_INITIAL: Regex = Regex::new(r" ([A-Za-z])[.]").unwrap();
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub combined_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub distance_to_next: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub embedding: Option<Vec<f32>>,
}

impl Sentence {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            combined_text: None,
            distance_to_next: None,
            embedding: None,
        }
    }
}


pub fn text_to_sentences(text: &str) -> Vec<Sentence> {
    split_into_sentences(text)
        .into_iter()
        .enumerate()
        .map(|(index, sentence)| Sentence::new(index, sentence))
        .collect()
}

/// Splits `text` on `.`, `?` and `!` while keeping the periods of
/// honorifics, initials, acronyms, decimals, company suffixes and domain
/// names inside their sentence.
///
/// Returns trimmed, non-empty sentences in input order. Text without any
/// terminal punctuation comes back as a single sentence; blank text gives
/// an empty vector.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let mut text = format!(" {}  ", text).replace('\n', " ");

    text = PREFIXES.replace_all(&text, format!("${{1}}{PRD}")).into_owned();
    text = WEBSITES.replace_all(&text, format!("{PRD}${{1}}")).into_owned();
    text = DECIMALS.replace_all(&text, format!("${{1}}{PRD}${{2}}")).into_owned();
    text = MULTIPLE_DOTS
        .replace_all(&text, |caps: &Captures| {
            format!("{}{}", PRD.repeat(caps[0].len()), STOP)
        })
        .into_owned();
    if text.contains("Ph.D") {
        text = text.replace("Ph.D.", &format!("Ph{PRD}D{PRD}"));
    }
    text = SPACED_INITIAL.replace_all(&text, format!(" ${{1}}{PRD} ")).into_owned();
    text = ACRONYM_BEFORE_STARTER
        .replace_all(&text, format!("${{1}}{STOP} ${{2}}"))
        .into_owned();
    text = THREE_LETTER_ACRONYM
        .replace_all(&text, format!("${{1}}{PRD}${{2}}{PRD}${{3}}{PRD}"))
        .into_owned();
    text = TWO_LETTER_ACRONYM
        .replace_all(&text, format!("${{1}}{PRD}${{2}}{PRD}"))
        .into_owned();
    text = SUFFIX_BEFORE_STARTER
        .replace_all(&text, format!(" ${{1}}{STOP} ${{2}}"))
        .into_owned();
    text = SUFFIXES.replace_all(&text, format!(" ${{1}}{PRD}")).into_owned();
    text = LONE_INITIAL.replace_all(&text, format!(" ${{1}}{PRD}")).into_owned();

    // Terminal punctuation inside a closing quote is evaluated outside it.
    text = text
        .replace(".\u{201D}", "\u{201D}.")
        .replace(".\"", "\".")
        .replace("!\"", "\"!")
        .replace("?\"", "\"?");

    text = text
        .replace('.', &format!(".{STOP}"))
        .replace('?', &format!("?{STOP}"))
        .replace('!', &format!("!{STOP}"))
        .replace(PRD, ".");

    text.split(STOP)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_honorifics_and_acronyms() {
        let sentences = split_into_sentences(
            "Dr. Smith went to Washington. He met Mrs. Jones there. They discussed A.I. ethics extensively.",
        );
        assert_eq!(
            sentences,
            vec![
                "Dr. Smith went to Washington.",
                "He met Mrs. Jones there.",
                "They discussed A.I. ethics extensively.",
            ]
        );
    }

    #[test]
    fn test_websites_decimals_suffixes() {
        let sentences = split_into_sentences(
            "Mr. Smith bought cheapsite.com for 1.5 million dollars, i.e. he paid a lot for it. \
             Did he mind? Adam Jones Jr. thinks he didn't. In any case, this isn't true...",
        );
        assert_eq!(
            sentences,
            vec![
                "Mr. Smith bought cheapsite.com for 1.5 million dollars, i.e. he paid a lot for it.",
                "Did he mind?",
                "Adam Jones Jr. thinks he didn't.",
                "In any case, this isn't true...",
            ]
        );
    }

    #[test]
    fn test_ellipsis_is_boundary() {
        let sentences = split_into_sentences("Wait... what happened");
        assert_eq!(sentences, vec!["Wait...", "what happened"]);
    }

    #[test]
    fn test_phd() {
        let sentences = split_into_sentences("She earned a Ph.D. in physics. Then she left.");
        assert_eq!(sentences, vec!["She earned a Ph.D. in physics.", "Then she left."]);
    }

    #[test]
    fn test_acronym_before_starter_breaks() {
        let sentences = split_into_sentences("He moved to the U.S. He liked it.");
        assert_eq!(sentences, vec!["He moved to the U.S.", "He liked it."]);
    }

    #[test]
    fn test_suffix_before_starter_breaks() {
        // The suffix period is consumed by the boundary.
        let sentences = split_into_sentences("I work at Acme Inc. They pay well.");
        assert_eq!(sentences, vec!["I work at Acme Inc", "They pay well."]);
    }

    #[test]
    fn test_suffix_mid_sentence() {
        let sentences = split_into_sentences("Acme Co. makes anvils. Nobody knows why.");
        assert_eq!(sentences, vec!["Acme Co. makes anvils.", "Nobody knows why."]);
    }

    #[test]
    fn test_quote_punctuation() {
        let sentences = split_into_sentences("He said \"stop.\" Then he left!");
        assert_eq!(sentences, vec!["He said \"stop\".", "Then he left!"]);
    }

    #[test]
    fn test_question_and_exclamation() {
        let sentences = split_into_sentences("Is it done? Yes! Good.");
        assert_eq!(sentences, vec!["Is it done?", "Yes!", "Good."]);
    }

    #[test]
    fn test_newlines_normalized() {
        let sentences = split_into_sentences("First line\ncontinues here. Second\nsentence.");
        assert_eq!(sentences, vec!["First line continues here.", "Second sentence."]);
    }

    #[test]
    fn test_no_terminal_punctuation() {
        assert_eq!(split_into_sentences("  just some words  "), vec!["just some words"]);
    }

    #[test]
    fn test_blank_input() {
        assert!(split_into_sentences("").is_empty());
        assert!(split_into_sentences("   \n  ").is_empty());
    }

    #[test]
    fn test_literal_markers_are_text() {
        let sentences = split_into_sentences("Use <stop> and <prd> tags. Done.");
        assert_eq!(sentences, vec!["Use <stop> and <prd> tags.", "Done."]);
    }

    #[test]
    fn test_text_to_sentences_indexes() {
        let sentences = text_to_sentences("One. Two. Three.");
        let indexes: Vec<_> = sentences.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert!(sentences.iter().all(|s| s.combined_text.is_none()));
    }
}
