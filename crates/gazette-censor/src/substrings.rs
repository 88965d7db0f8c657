use crate::mask_word;

/// Banned literals, in scan order. Matching is case-sensitive, so the case
/// variants worth catching are enumerated explicitly.
const BANNED: [&str; 9] = [
    "Редиск", "редиск", "РЕДИСК",
    "Блин", "блин", "БЛИН",
    "Хрен", "хрен", "ХРЕН",
];

/// Mask every occurrence of a banned literal, anywhere in the text.
///
/// List entries are applied one after another over the working copy, so a
/// substitution made by an earlier entry is visible to later scans. A
/// banned literal buried inside a larger word is masked too; a case
/// variant missing from the list slips through.
pub fn mask(text: &str) -> String {
    let mut out = text.to_owned();
    for word in BANNED {
        out = out.replace(word, &mask_word(word));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_listed_case_variants() {
        assert_eq!(mask("Блин, редиск попался"), "Б***, р***** попался");
        assert_eq!(mask("БЛИН и хрен"), "Б*** и х***");
    }

    #[test]
    fn masks_inside_larger_words() {
        assert_eq!(mask("нахрена"), "нах***а");
        assert_eq!(mask("редиска"), "р*****а");
    }

    #[test]
    fn unlisted_case_variants_slip_through() {
        // Mixed case is not in the list and is not caught.
        assert_eq!(mask("БлИн"), "БлИн");
    }

    #[test]
    fn clean_text_is_untouched() {
        assert_eq!(mask("привет, мир"), "привет, мир");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn masks_every_occurrence() {
        assert_eq!(mask("блин блин блин"), "б*** б*** б***");
    }
}
