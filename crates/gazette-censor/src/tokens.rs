use crate::mask_word;

/// Banned tokens, compared case-insensitively against whole tokens.
const BANNED: [&str; 6] = [
    "редиска", "редиской", "редиске", "блин", "хрен", "нахрена",
];

/// At most one of these is stripped from the end of a token before the
/// comparison. Leading symbols (quotes, brackets) are not handled.
const TRAILING: [char; 5] = ['!', ',', '.', ':', ';'];

/// Mask banned words appearing as whole whitespace-delimited tokens.
///
/// Each token of the original text is compared case-insensitively after
/// stripping at most one trailing punctuation character; on a match, every
/// occurrence of the stripped spelling is masked in the working copy. The
/// stripped punctuation itself stays in place after the mask. A banned
/// word buried inside a larger token, or wrapped in leading quotes or
/// brackets, is not detected.
pub fn mask(text: &str) -> String {
    let mut out = text.to_owned();
    for token in text.split_whitespace() {
        let word = token.strip_suffix(TRAILING).unwrap_or(token);
        if word.is_empty() {
            continue;
        }
        if BANNED.contains(&word.to_lowercase().as_str()) {
            out = out.replace(word, &mask_word(word));
        }
    }
    out
}
