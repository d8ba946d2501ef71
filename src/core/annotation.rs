/// Directive extraction from free-form narrative text.
///
/// Narration (model-generated or fallback) may embed two literal markers:
/// a stat directive `[STATS: name:+N,name:-N,...]` and a level-up marker
/// `[LEVEL UP]`. Parsing is total and lenient: malformed stat tokens are
/// dropped one by one, never escalated.

use serde::{Deserialize, Serialize};

use crate::schema::stats::StatDelta;

const STATS_OPEN: &str = "[STATS:";
const LEVEL_UP_MARKER: &str = "[LEVEL UP]";

/// Structured fields extracted from a narration, plus the text with all
/// directive markers stripped. Choice lines stay in the cleaned text; they
/// are also collected separately in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeAnnotation {
    pub cleaned_text: String,
    pub stat_delta: StatDelta,
    pub leveled_up: bool,
    pub choices: Vec<String>,
}

/// Parse a narration. Total over any input string.
pub fn parse(text: &str) -> NarrativeAnnotation {
    let mut stat_delta = StatDelta::new();
    let mut cleaned = String::with_capacity(text.len());

    // Stat pairs come from the first directive only; every directive span
    // is stripped from the text regardless.
    let mut first_directive = true;
    let mut rest = text;
    while let Some(start) = rest.find(STATS_OPEN) {
        cleaned.push_str(&rest[..start]);
        let interior = &rest[start + STATS_OPEN.len()..];
        match interior.find(']') {
            Some(end) => {
                if first_directive {
                    parse_stat_pairs(&interior[..end], &mut stat_delta);
                    first_directive = false;
                }
                rest = &interior[end + 1..];
            }
            None => {
                // Unterminated directive: keep the tail as written.
                cleaned.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    cleaned.push_str(rest);

    let leveled_up = cleaned.contains(LEVEL_UP_MARKER);
    if leveled_up {
        cleaned = cleaned.replace(LEVEL_UP_MARKER, "");
    }

    let choices = collect_choices(&cleaned);

    NarrativeAnnotation {
        cleaned_text: cleaned,
        stat_delta,
        leveled_up,
        choices,
    }
}

/// Parse `name:value` tokens out of a directive interior.
///
/// One leading `+` or `-` on the value is stripped before integer parsing,
/// so `+5`, `5`, and `-5` all record magnitude 5. The sign is decorative;
/// written-negative deltas are not preserved as negative. Later duplicate
/// names overwrite earlier ones.
fn parse_stat_pairs(raw: &str, delta: &mut StatDelta) {
    for token in raw.split(',') {
        let Some((name, value)) = token.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            continue;
        }
        let magnitude = value
            .strip_prefix('+')
            .or_else(|| value.strip_prefix('-'))
            .unwrap_or(value);
        if let Ok(amount) = magnitude.parse::<u32>() {
            delta.insert(name.to_string(), amount);
        }
    }
}

/// A choice line is `<digits>.` at the start of the trimmed line; the
/// choice text is whatever follows, trimmed.
fn collect_choices(text: &str) -> Vec<String> {
    let mut choices = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 && trimmed[digits..].starts_with('.') {
            choices.push(trimmed[digits + 1..].trim().to_string());
        }
    }
    choices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_text_is_identity() {
        let annotation = parse("The corridor stretches into darkness.");
        assert_eq!(annotation.cleaned_text, "The corridor stretches into darkness.");
        assert!(annotation.stat_delta.is_empty());
        assert!(!annotation.leveled_up);
        assert!(annotation.choices.is_empty());
    }

    #[test]
    fn parse_empty_input() {
        let annotation = parse("");
        assert_eq!(annotation.cleaned_text, "");
        assert!(annotation.stat_delta.is_empty());
    }

    #[test]
    fn stats_directive_extracted_and_stripped() {
        let annotation = parse("You grow. [STATS: awareness:+2,control:+1] Onward.");
        assert_eq!(annotation.cleaned_text, "You grow.  Onward.");
        assert_eq!(annotation.stat_delta.get("awareness"), Some(&2));
        assert_eq!(annotation.stat_delta.get("control"), Some(&1));
    }

    #[test]
    fn negative_sign_is_stripped_not_preserved() {
        // Documented quirk: the sign character is decorative.
        let annotation = parse("[STATS: control:-5]");
        assert_eq!(annotation.stat_delta.get("control"), Some(&5));
    }

    #[test]
    fn unsigned_and_signed_values_equivalent() {
        let plus = parse("[STATS: dominance:+3]");
        let bare = parse("[STATS: dominance:3]");
        let minus = parse("[STATS: dominance:-3]");
        assert_eq!(plus.stat_delta.get("dominance"), Some(&3));
        assert_eq!(bare.stat_delta.get("dominance"), Some(&3));
        assert_eq!(minus.stat_delta.get("dominance"), Some(&3));
    }

    #[test]
    fn duplicate_stat_last_occurrence_wins() {
        let annotation = parse("[STATS: control:1,control:4]");
        assert_eq!(annotation.stat_delta.get("control"), Some(&4));
    }

    #[test]
    fn malformed_tokens_dropped_individually() {
        let annotation = parse("[STATS: control:2,broken,awareness:,:+3,vitality:abc,dominance:1]");
        assert_eq!(annotation.stat_delta.len(), 2);
        assert_eq!(annotation.stat_delta.get("control"), Some(&2));
        assert_eq!(annotation.stat_delta.get("dominance"), Some(&1));
    }

    #[test]
    fn stat_names_trimmed() {
        let annotation = parse("[STATS:  awareness : 2 ]");
        assert_eq!(annotation.stat_delta.get("awareness"), Some(&2));
    }

    #[test]
    fn all_directives_stripped_first_parsed() {
        let annotation = parse("A [STATS: control:1] B [STATS: control:9] C");
        assert_eq!(annotation.cleaned_text, "A  B  C");
        // Only the first directive feeds the delta.
        assert_eq!(annotation.stat_delta.get("control"), Some(&1));
    }

    #[test]
    fn unterminated_directive_left_in_place() {
        let annotation = parse("Text [STATS: control:5 and no close");
        assert_eq!(annotation.cleaned_text, "Text [STATS: control:5 and no close");
        assert!(annotation.stat_delta.is_empty());
    }

    #[test]
    fn level_up_marker_sets_flag_and_strips() {
        let annotation = parse("You ascend. [LEVEL UP] The world sharpens. [LEVEL UP]");
        assert!(annotation.leveled_up);
        assert_eq!(annotation.cleaned_text, "You ascend.  The world sharpens. ");
    }

    #[test]
    fn choices_collected_in_order() {
        let text = "The path splits:\n1. Take the left tunnel\n2. Climb the shaft\nSome prose.\n3. Turn back\n";
        let annotation = parse(text);
        assert_eq!(
            annotation.choices,
            vec![
                "Take the left tunnel".to_string(),
                "Climb the shaft".to_string(),
                "Turn back".to_string(),
            ]
        );
        // Choice lines stay in the cleaned text.
        assert!(annotation.cleaned_text.contains("1. Take the left tunnel"));
    }

    #[test]
    fn choice_lines_require_leading_digits_and_dot() {
        let text = "No. Not a choice.\n12. Multi-digit choice\n.5 not a choice\nx1. also not\n";
        let annotation = parse(text);
        assert_eq!(annotation.choices, vec!["Multi-digit choice".to_string()]);
    }

    #[test]
    fn indented_choice_lines_trimmed() {
        let annotation = parse("  2.   Meditate on the core  ");
        assert_eq!(annotation.choices, vec!["Meditate on the core".to_string()]);
    }

    #[test]
    fn combined_directives_and_choices() {
        let text = "You strike true. [STATS: dominance:+2] [LEVEL UP]\n\n1. Press the attack\n2. Withdraw\n";
        let annotation = parse(text);
        assert_eq!(annotation.stat_delta.get("dominance"), Some(&2));
        assert!(annotation.leveled_up);
        assert_eq!(annotation.choices.len(), 2);
        assert!(!annotation.cleaned_text.contains("[STATS:"));
        assert!(!annotation.cleaned_text.contains("[LEVEL UP]"));
    }
}
