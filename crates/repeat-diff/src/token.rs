//! Whitespace tokenizer
//!
//! Splits text on maximal whitespace runs and keeps every run as its own
//! token. The stream always starts and ends with a content token, which is
//! empty when the text starts or ends with whitespace, so token indices line
//! up with recipes captured by earlier versions of the tool.

/// Split `text` into alternating content and whitespace tokens.
///
/// Concatenating the result always yields `text` again. The empty string
/// produces a single empty content token.
///
/// ```
/// use repeat_diff::tokenize;
///
/// assert_eq!(tokenize("foo  bar\n"), vec!["foo", "  ", "bar", "\n", ""]);
/// assert_eq!(tokenize(""), vec![""]);
/// ```
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut content_start = 0;
    let mut run_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), run_start) {
            (true, None) => {
                tokens.push(&text[content_start..idx]);
                run_start = Some(idx);
            }
            (false, Some(start)) => {
                tokens.push(&text[start..idx]);
                run_start = None;
                content_start = idx;
            }
            _ => {}
        }
    }

    match run_start {
        Some(start) => {
            tokens.push(&text[start..]);
            tokens.push("");
        }
        None => tokens.push(&text[content_start..]),
    }

    tokens
}

/// Concatenate tokens back into text.
pub fn join<S: AsRef<str>>(tokens: &[S]) -> String {
    let capacity = tokens.iter().map(|t| t.as_ref().len()).sum();
    tokens
        .iter()
        .fold(String::with_capacity(capacity), |mut out, token| {
            out.push_str(token.as_ref());
            out
        })
}
