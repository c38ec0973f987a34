use regex::Regex;
use std::sync::LazyLock;

static SPLIT_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)[|l]+(\d)").expect("valid split-digit pattern"));

static SPACED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2})\s+(\d{2})\s+(\d{4})").expect("valid spaced-date pattern")
});

/// Repairs digit runs that OCR broke apart, mostly in dates.
///
/// `1|2` and `1l2` become `12`; `02 05 1999` becomes `02-05-1999`.
pub fn clean_numeric_fields(text: &str) -> String {
    let joined = join_split_digits(text);
    SPACED_DATE.replace_all(&joined, "$1-$2-$3").into_owned()
}

// Matches cannot overlap, so "1|2|3" needs a second pass to become "123".
fn join_split_digits(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = SPLIT_DIGITS.replace_all(&current, "$1$2").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}
