mod dep;
mod kana;

use anyhow::{anyhow, Result};
use lindera::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};

pub use dep::{attach, Dependency};
pub use kana::kata2hira;

/// One analyzed token, flattened to the nine fields written to disk.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct TokenRecord {
    pub text: String,
    pub reading: String,
    pub lemma: String,
    pub pos: String,
    pub tag: String,
    pub inf: String,
    pub dep: String,
    pub dep_i: usize,
    pub dep_text: String,
}

pub trait Analyzer {
    /// Analyzes one sentence.
    fn analyze(&mut self, context: &str) -> Result<Vec<TokenRecord>>;
}

/// Analyzer backed by lindera and its embedded IPADIC dictionary.
pub struct LinderaAnalyzer {
    tokenizer: Tokenizer,
}

impl LinderaAnalyzer {
    pub fn new() -> Result<Self> {
        let tokenizer =
            Tokenizer::new().map_err(|e| anyhow!("failed to load the IPADIC tokenizer: {}", e))?;
        Ok(Self { tokenizer })
    }

    pub fn morphemes(&mut self, context: &str) -> Result<Vec<Morpheme>> {
        Ok(self
            .tokenizer
            .tokenize(context)
            .map_err(|e| anyhow!("failed to tokenize {:?}: {}", context, e))?
            .iter()
            .map(|token| Morpheme::from_detail(token.text, &token.detail))
            .collect())
    }
}

impl Analyzer for LinderaAnalyzer {
    fn analyze(&mut self, context: &str) -> Result<Vec<TokenRecord>> {
        Ok(shape(&self.morphemes(context)?))
    }
}

/// Builds the records of one sentence, dependency arcs included.
pub fn shape(morphemes: &[Morpheme]) -> Vec<TokenRecord> {
    attach(morphemes)
        .into_iter()
        .zip(morphemes)
        .map(|(dependency, morpheme)| TokenRecord {
            text: morpheme.text().to_owned(),
            reading: kata2hira(morpheme.reading()),
            lemma: morpheme.lemma().to_owned(),
            pos: morpheme.universal_pos().to_owned(),
            tag: morpheme.tag(),
            inf: morpheme.inflection(),
            dep: dependency.label.to_owned(),
            dep_i: dependency.head,
            dep_text: morphemes[dependency.head].text().to_owned(),
        })
        .collect()
}

// `Token.detail` layout for IPADIC:
// [pos, pos detail 1, pos detail 2, pos detail 3, conjugation type, conjugation form, base form, reading, pronunciation]
// Unknown words only carry ["UNK"].

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Morpheme {
    text: String,
    detail: Vec<String>,
}

impl Morpheme {
    pub fn from_detail(text: &str, detail: &[String]) -> Self {
        Self {
            text: text.to_owned(),
            detail: detail.to_vec(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn feature(&self, index: usize) -> Option<&str> {
        self.detail
            .get(index)
            .map(String::as_str)
            .filter(|f| !f.is_empty() && *f != "*")
    }

    pub fn category(&self) -> &str {
        self.feature(0).unwrap_or("UNK")
    }

    pub fn subcategory(&self) -> Option<&str> {
        self.feature(1)
    }

    pub fn lemma(&self) -> &str {
        self.feature(6).unwrap_or(&self.text)
    }

    /// Katakana reading; unknown words read as written.
    pub fn reading(&self) -> &str {
        self.feature(7).unwrap_or(&self.text)
    }

    /// The POS levels joined with `-`, e.g. `名詞-固有名詞-地域-国`.
    pub fn tag(&self) -> String {
        (0..4)
            .filter_map(|i| self.feature(i))
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn inflection(&self) -> String {
        match (self.feature(4), self.feature(5)) {
            (Some(kind), Some(form)) => format!("{},{}", kind, form),
            (Some(only), None) | (None, Some(only)) => only.to_owned(),
            (None, None) => String::new(),
        }
    }

    pub fn universal_pos(&self) -> &'static str {
        let details: Vec<&str> = self.detail.iter().map(String::as_str).collect();
        match details.as_slice() {
            ["名詞", "固有名詞", ..] => "PROPN",
            ["名詞", "代名詞", ..] => "PRON",
            ["名詞", "数", ..] => "NUM",
            // i.e. noun adjective, na-adj
            ["名詞", "形容動詞語幹", ..] => "ADJ",
            ["名詞", ..] => "NOUN",
            ["接頭詞", ..] => "NOUN",

            ["動詞", "非自立", ..] => "AUX",
            ["動詞", ..] => "VERB",
            ["形容詞", "非自立", ..] => "AUX",
            ["形容詞", ..] => "ADJ",
            ["助動詞", ..] => "AUX",

            ["副詞", ..] => "ADV",
            ["連体詞", ..] => "DET",
            ["接続詞", ..] => "CCONJ",
            ["感動詞", ..] | ["フィラー", ..] => "INTJ",

            // e.g. −て, −ば
            ["助詞", "接続助詞", ..] => "SCONJ",
            ["助詞", "並立助詞", ..] => "CCONJ",
            ["助詞", "終助詞", ..] => "PART",
            ["助詞", ..] => "ADP",

            ["記号", "句点", ..] | ["記号", "読点", ..] => "PUNCT",
            ["記号", "括弧開", ..] | ["記号", "括弧閉", ..] => "PUNCT",
            ["記号", "空白", ..] => "SPACE",
            ["記号", ..] => "SYM",

            _ => "X",
        }
    }
}
