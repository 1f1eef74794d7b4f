// ァ (U+30A1) .. ヶ (U+30F6) and the iteration marks ヽヾ sit 0x60 above their hiragana.
const KANA_OFFSET: u32 = 0x60;

/// Converts katakana to hiragana, leaving everything else (`ー` included) untouched.
pub fn kata2hira(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'ァ'..='ヶ' | 'ヽ' | 'ヾ' => char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c),
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn katakana_becomes_hiragana() {
        assert_eq!(kata2hira("カタカナ"), "かたかな");
        assert_eq!(kata2hira("ヴァイオリン"), "ゔぁいおりん");
        assert_eq!(kata2hira("ヽヾ"), "ゝゞ");
    }

    #[test]
    fn long_vowel_mark_and_other_scripts_are_kept() {
        assert_eq!(kata2hira("コーヒー"), "こーひー");
        assert_eq!(kata2hira("漢字とABC、。"), "漢字とABC、。");
        assert_eq!(kata2hira(""), "");
    }
}
