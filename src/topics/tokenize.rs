// Tokenizer for TF-IDF clustering.
//
// Unicode-aware: letters and digits from any script survive, everything else
// becomes a separator. Text is normalized before splitting so that spelling
// variants compare equal:
//   - NFD decomposition with combining marks removed (Latin accents, Hebrew niqqud)
//   - Hebrew final letter forms folded to their base forms (ך→כ ם→מ ן→נ ף→פ ץ→צ)
//   - simple English plural folding ("rockets" → "rocket")
//
// Stop words are English plus Hebrew, both run through the same normalization.

use std::collections::HashSet;
use std::sync::LazyLock;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "said", "says", "say", "new", "one", "two", "may", "might", "must", "via", "amid", "per",
    "get", "got", "like", "since", "still", "yet", "us", "s", "t", "don", "according", "report",
    "reports", "today", "yesterday", "week", "year", "years", "time", "people", "news",
];

const HEBREW_STOP_WORDS: &[&str] = &[
    "של", "את", "על", "עם", "זה", "זו", "זאת", "הוא", "היא", "הם", "הן", "אני", "אנחנו", "אתה",
    "כי", "גם", "לא", "כל", "אבל", "או", "אם", "עוד", "רק", "מה", "מי", "יש", "אין", "היה",
    "היו", "אחרי", "לפני", "בין", "כמו", "אל", "כך", "שלא", "עד", "אשר", "לו", "לה", "להם",
    "אותו", "אותה", "מן", "הזה", "הזאת", "כבר", "יותר", "אך", "בו", "בה", "שם", "כאן", "היום",
];

static STOP_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    ENGLISH_STOP_WORDS
        .iter()
        .chain(HEBREW_STOP_WORDS.iter())
        .map(|w| normalize_text(w))
        .collect()
});

/// Fold a Hebrew final letter to its base form; other characters pass through.
fn fold_final_form(c: char) -> char {
    match c {
        'ך' => 'כ',
        'ם' => 'מ',
        'ן' => 'נ',
        'ף' => 'פ',
        'ץ' => 'צ',
        other => other,
    }
}

/// Lowercase, strip diacritics and fold Hebrew final forms.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(fold_final_form)
        .collect()
}

/// Strip a plain English plural "s". Only touches ASCII words longer than
/// three letters, and leaves "-ss", "-us" and "-is" endings alone.
fn fold_plural(token: &str) -> &str {
    let is_ascii_word = token.bytes().all(|b| b.is_ascii_lowercase());
    if is_ascii_word
        && token.len() > 3
        && token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        &token[..token.len() - 1]
    } else {
        token
    }
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Tokenize text into normalized terms for TF-IDF.
///
/// Tokens of one character and stop words are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = normalize_text(text)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() > 1 && !is_stop_word(t))
        .map(fold_plural)
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}
