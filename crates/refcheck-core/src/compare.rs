//! Field-level comparison of an asserted reference against a resolved record.
//!
//! Text fields match when their normalized forms are equal. Normalization
//! strips markup tags, lowercases, turns every non-alphanumeric character into
//! a word break and collapses whitespace, so `"Nanometre-scale  <i>thermometry</i>"`
//! and `"nanometre scale thermometry"` compare equal. There is no similarity
//! scoring: after normalization the comparison is exact.
//!
//! A field is only compared when both sides carry it.
//!
//! Container titles also accept the record's short title and word-wise
//! abbreviations (`Phys. Rev. Lett.` for `Physical Review Letters`), since
//! bibliographies usually cite journals by their abbreviated name.

use std::borrow::Cow;

use crate::reference::{Author, Reference, ResolvedRecord};
use crate::verdict::{Field, FieldMismatch, Verdict};

/// Compare `reference` against `record` and produce `Valid` or `Mismatch`.
#[must_use]
pub fn compare(reference: &Reference, record: &ResolvedRecord) -> Verdict {
    let mut fields = Vec::new();

    if let (Some(asserted), Some(resolved)) = (&reference.title, &record.title) {
        if !text_matches(asserted, resolved) {
            fields.push(mismatch(Field::Title, asserted, resolved));
        }
    }

    let asserted_authors: Vec<&str> = reference
        .authors
        .iter()
        .map(String::as_str)
        .filter(|name| !is_et_al(name))
        .collect();
    if !asserted_authors.is_empty()
        && !record.authors.is_empty()
        && !authors_match(&asserted_authors, &record.authors)
    {
        let resolved = record
            .authors
            .iter()
            .map(Author::display_name)
            .collect::<Vec<_>>()
            .join("; ");
        fields.push(mismatch(Field::Authors, &asserted_authors.join("; "), &resolved));
    }

    if let (Some(asserted), Some(resolved)) = (reference.year, record.year) {
        if asserted != resolved {
            fields.push(mismatch(
                Field::Year,
                &asserted.to_string(),
                &resolved.to_string(),
            ));
        }
    }

    if let (Some(asserted), Some(resolved)) = (&reference.container, &record.container) {
        if !container_matches(asserted, resolved, record.short_container.as_deref()) {
            fields.push(mismatch(Field::Container, asserted, resolved));
        }
    }

    if fields.is_empty() {
        Verdict::Valid
    } else {
        Verdict::Mismatch { fields }
    }
}

fn mismatch(field: Field, asserted: &str, resolved: &str) -> FieldMismatch {
    FieldMismatch {
        field,
        asserted: asserted.to_string(),
        resolved: resolved.to_string(),
    }
}

/// Case-insensitive, whitespace- and punctuation-normalized equality.
#[must_use]
pub fn text_matches(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Normalize free text for comparison.
#[must_use]
pub fn normalize(text: &str) -> String {
    let stripped = strip_markup(text);
    let lowered = stripped.to_lowercase();
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove `<tag>` / `</tag>` spans such as the JATS markup Crossref embeds in
/// titles. A `<` that is not followed by a letter or `/`, or never closed,
/// is kept as text.
fn strip_markup(text: &str) -> Cow<'_, str> {
    if !text.contains('<') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let starts_tag = after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/');
        match after.find('>') {
            Some(close) if starts_tag => {
                out.push(' ');
                rest = &after[close + 1..];
            }
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Words dropped from a full container title before matching an abbreviation.
const TITLE_STOPWORDS: &[&str] = &["a", "an", "and", "for", "in", "of", "on", "the"];

fn container_matches(asserted: &str, full: &str, short: Option<&str>) -> bool {
    text_matches(asserted, full)
        || short.is_some_and(|short| text_matches(asserted, short))
        || is_abbreviation_of(asserted, full)
}

/// Whether every word of `abbreviated` abbreviates the corresponding
/// significant word of `full`: `J. Am. Chem. Soc.` abbreviates
/// `Journal of the American Chemical Society`.
fn is_abbreviation_of(abbreviated: &str, full: &str) -> bool {
    let short = normalize(abbreviated);
    let long = normalize(full);
    let short_words: Vec<&str> = short.split(' ').filter(|w| !w.is_empty()).collect();
    let long_words: Vec<&str> = long
        .split(' ')
        .filter(|w| !w.is_empty() && !TITLE_STOPWORDS.contains(w))
        .collect();

    !short_words.is_empty()
        && short_words.len() == long_words.len()
        && short_words
            .iter()
            .zip(&long_words)
            .all(|(s, l)| abbreviates_word(s, l))
}

/// `natl` abbreviates `national`: same first letter, and the letters of the
/// abbreviation appear in order in the word.
fn abbreviates_word(short: &str, word: &str) -> bool {
    let mut short_chars = short.chars();
    let mut word_chars = word.chars();
    if short_chars.next() != word_chars.next() {
        return false;
    }
    short_chars.all(|c| word_chars.any(|w| w == c))
}

fn is_et_al(name: &str) -> bool {
    matches!(normalize(name).as_str(), "et al" | "others")
}

fn authors_match(asserted: &[&str], resolved: &[Author]) -> bool {
    asserted.len() <= resolved.len()
        && asserted
            .iter()
            .zip(resolved)
            .all(|(name, author)| family_matches(name, &author.family))
}

/// Compare the family name extracted from an asserted author string with a
/// resolved family name. Only the last word of each is compared so particles
/// (`van der`, `de la`) written on either side do not matter.
fn family_matches(asserted: &str, resolved_family: &str) -> bool {
    let asserted = normalize(&family_name(asserted));
    let resolved = normalize(resolved_family);
    match (asserted.rsplit(' ').next(), resolved.rsplit(' ').next()) {
        (Some(a), Some(r)) if !a.is_empty() => a == r,
        _ => false,
    }
}

/// Extract the family name from an author as written in a citation.
///
/// - `"Family, Given"` → `Family`
/// - `"Family GH"` (Vancouver initials) → `Family`
/// - `"Given Family"` → `Family`
/// - `"Family"` → `Family`
#[must_use]
pub fn family_name(name: &str) -> String {
    let name = name.trim();
    if let Some((family, _)) = name.split_once(',') {
        return family.trim().to_string();
    }

    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.as_slice() {
        [] => String::new(),
        [single] => (*single).to_string(),
        [head @ .., last] if is_initials(last) => head.join(" "),
        [.., last] => (*last).to_string(),
    }
}

fn is_initials(token: &str) -> bool {
    let letters: String = token.chars().filter(|c| *c != '.' && *c != '-').collect();
    !letters.is_empty()
        && letters.chars().count() <= 3
        && letters.chars().all(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::doi::Doi;

    fn record() -> ResolvedRecord {
        ResolvedRecord {
            doi: Doi::parse("10.1038/nature12373").unwrap(),
            title: Some("Nanometre-scale thermometry in a living cell".into()),
            authors: vec![
                Author::new(Some("G."), "Kucsko"),
                Author::new(Some("P. C."), "Maurer"),
                Author::new(Some("N. Y."), "Yao"),
            ],
            container: Some("Nature".into()),
            short_container: Some("Nature".into()),
            year: Some(2013),
            source: "crossref".into(),
        }
    }

    fn reference() -> Reference {
        Reference::parse("10.1038/nature12373").unwrap()
    }

    #[rstest]
    #[case("Hello   World", "hello world")]
    #[case("  Nanometre-scale thermometry\n in a living cell. ", "nanometre scale thermometry in a living cell")]
    #[case("Growth of <i>E. coli</i> on glucose", "growth of e coli on glucose")]
    #[case("<jats:title>Über Strömungen</jats:title>", "über strömungen")]
    #[case("x < 5 and y > 3", "x 5 and y 3")]
    #[case("a<br/>b", "a b")]
    #[case("", "")]
    fn normalizes_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case("Kucsko, G.", "Kucsko")]
    #[case("Kucsko G", "Kucsko")]
    #[case("van der Berg JH", "van der Berg")]
    #[case("Georg Kucsko", "Kucsko")]
    #[case("G. Kucsko", "Kucsko")]
    #[case("Kucsko", "Kucsko")]
    #[case("JOHN SMITH", "SMITH")]
    #[case("", "")]
    fn extracts_family_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(family_name(input), expected);
    }

    #[test]
    fn identical_metadata_is_valid() {
        let reference = reference()
            .with_title("Nanometre-scale thermometry in a living cell")
            .with_authors(["Kucsko, G.", "Maurer, P. C.", "Yao, N. Y."])
            .with_year(2013)
            .unwrap()
            .with_container("Nature");
        assert_eq!(compare(&reference, &record()), Verdict::Valid);
    }

    #[test]
    fn case_and_whitespace_differences_are_tolerated() {
        let reference = reference()
            .with_title("  NANOMETRE-SCALE   thermometry in a living cell.")
            .with_container("nature");
        assert_eq!(compare(&reference, &record()), Verdict::Valid);
    }

    #[test]
    fn bare_doi_is_valid_when_it_resolves() {
        assert_eq!(compare(&reference(), &record()), Verdict::Valid);
    }

    #[test]
    fn different_title_is_named() {
        let reference = reference().with_title("Quantum thermometry in dead cells");
        let verdict = compare(&reference, &record());
        assert_eq!(verdict.mismatched_fields(), vec![Field::Title]);
        let Verdict::Mismatch { fields } = verdict else {
            panic!("expected mismatch");
        };
        assert_eq!(fields[0].asserted, "Quantum thermometry in dead cells");
        assert_eq!(fields[0].resolved, "Nanometre-scale thermometry in a living cell");
    }

    #[test]
    fn every_differing_field_is_named() {
        let reference = reference()
            .with_title("Something else")
            .with_authors(["Smith, J."])
            .with_year(2012)
            .unwrap()
            .with_container("Science");
        let verdict = compare(&reference, &record());
        assert_eq!(
            verdict.mismatched_fields(),
            vec![Field::Title, Field::Authors, Field::Year, Field::Container]
        );
    }

    #[test]
    fn truncated_author_list_matches() {
        let reference = reference().with_authors(["Kucsko G", "Maurer PC", "et al."]);
        assert_eq!(compare(&reference, &record()), Verdict::Valid);
    }

    #[test]
    fn author_order_matters() {
        let reference = reference().with_authors(["Maurer", "Kucsko"]);
        assert_eq!(compare(&reference, &record()).mismatched_fields(), vec![Field::Authors]);
    }

    #[test]
    fn more_asserted_authors_than_resolved_is_a_mismatch() {
        let reference = reference().with_authors(["Kucsko", "Maurer", "Yao", "Lukin"]);
        let verdict = compare(&reference, &record());
        let Verdict::Mismatch { fields } = verdict else {
            panic!("expected mismatch");
        };
        assert_eq!(fields[0].field, Field::Authors);
        assert_eq!(fields[0].resolved, "G. Kucsko; P. C. Maurer; N. Y. Yao");
    }

    #[test]
    fn fields_missing_on_either_side_are_not_compared() {
        let mut sparse = record();
        sparse.title = None;
        sparse.year = None;
        sparse.authors.clear();
        let reference = reference()
            .with_title("anything")
            .with_authors(["Nobody"])
            .with_year(1999)
            .unwrap();
        assert_eq!(compare(&reference, &sparse), Verdict::Valid);
    }

    #[rstest]
    #[case("Phys. Rev. Lett.", "Physical Review Letters", true)]
    #[case("J. Am. Chem. Soc.", "Journal of the American Chemical Society", true)]
    #[case("Proc Natl Acad Sci USA", "Proceedings of the National Academy of Sciences USA", true)]
    #[case("Phys. Rev. Lett.", "Physical Review", false)]
    #[case("Phys. Rev. A", "Physical Review Letters", false)]
    #[case("Science", "Science Advances", false)]
    #[case("", "Nature", false)]
    fn recognizes_abbreviated_titles(#[case] short: &str, #[case] full: &str, #[case] expected: bool) {
        assert_eq!(is_abbreviation_of(short, full), expected);
    }

    #[test]
    fn abbreviated_journal_name_matches_full_container() {
        let mut prl = record();
        prl.container = Some("Physical Review Letters".into());
        prl.short_container = None;
        let reference = reference().with_container("Phys. Rev. Lett.");
        assert_eq!(compare(&reference, &prl), Verdict::Valid);
    }

    #[test]
    fn short_container_title_is_accepted() {
        let mut pnas = record();
        pnas.container = Some("Proceedings of the National Academy of Sciences".into());
        pnas.short_container = Some("PNAS".into());
        let reference = reference().with_container("pnas");
        assert_eq!(compare(&reference, &pnas), Verdict::Valid);

        let other = self::reference().with_container("Nature Physics");
        assert_eq!(compare(&other, &pnas).mismatched_fields(), vec![Field::Container]);
    }

    #[test]
    fn comparison_is_repeatable() {
        let reference = reference().with_title("Other title");
        let first = compare(&reference, &record());
        let second = compare(&reference, &record());
        assert_eq!(first, second);
    }
}
