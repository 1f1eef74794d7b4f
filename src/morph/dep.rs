use std::ops::Range;

use super::Morpheme;

/// A dependency arc: the relation label and the index of the head token.
/// The sentence root points at itself.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Dependency {
    pub label: &'static str,
    pub head: usize,
}

// Particles, auxiliaries, suffixes and symbols close a bunsetsu, they never open one.
fn is_function_word(m: &Morpheme) -> bool {
    matches!(
        (m.category(), m.subcategory()),
        ("助詞", _)
            | ("助動詞", _)
            | ("記号", _)
            | ("名詞", Some("接尾"))
            | ("動詞", Some("非自立" | "接尾"))
            | ("形容詞", Some("非自立" | "接尾"))
    )
}

fn bunsetsu(morphemes: &[Morpheme]) -> Vec<Range<usize>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut closed = false;
    for (i, m) in morphemes.iter().enumerate() {
        let function = is_function_word(m);
        if !function && closed {
            chunks.push(start..i);
            start = i;
            closed = false;
        }
        closed |= function;
    }
    if start < morphemes.len() {
        chunks.push(start..morphemes.len());
    }
    chunks
}

// last content word, or the last token of an all-function chunk
fn chunk_head(morphemes: &[Morpheme], chunk: &Range<usize>) -> usize {
    chunk
        .clone()
        .rev()
        .find(|&i| !is_function_word(&morphemes[i]))
        .unwrap_or(chunk.end - 1)
}

fn chunk_relation(morphemes: &[Morpheme], chunk: &Range<usize>, head: usize) -> &'static str {
    let particle = morphemes[head + 1..chunk.end]
        .iter()
        .rev()
        .find(|m| m.category() == "助詞");
    match particle.map(|m| (m.subcategory(), m.text())) {
        Some((_, "が")) | Some((Some("係助詞"), "は")) => "nsubj",
        Some((_, "を")) => "obj",
        Some((Some("連体化"), _)) => "nmod",
        Some((Some("接続助詞"), _)) => "advcl",
        Some((Some("格助詞" | "係助詞" | "副助詞"), _)) => "obl",
        Some(_) => "dep",
        None => match morphemes[head].category() {
            "副詞" => "advmod",
            "連体詞" => "det",
            "接続詞" => "cc",
            _ => "dep",
        },
    }
}

fn inner_relation(m: &Morpheme) -> &'static str {
    match (m.category(), m.subcategory()) {
        ("助詞", Some("接続助詞" | "終助詞")) => "mark",
        ("助詞", _) => "case",
        ("助動詞", _) => "aux",
        ("動詞" | "形容詞", Some("非自立" | "接尾")) => "aux",
        ("記号", _) => "punct",
        ("名詞" | "接頭詞", _) => "compound",
        _ => "dep",
    }
}

/// Head-final attachment over bunsetsu: tokens attach to the head of their
/// own bunsetsu, each bunsetsu head attaches to the next one, and the last
/// head is the root.
pub fn attach(morphemes: &[Morpheme]) -> Vec<Dependency> {
    let chunks = bunsetsu(morphemes);
    let heads: Vec<usize> = chunks.iter().map(|c| chunk_head(morphemes, c)).collect();

    let mut arcs = Vec::with_capacity(morphemes.len());
    for (n, chunk) in chunks.iter().enumerate() {
        let head = heads[n];
        for i in chunk.clone() {
            let dependency = if i != head {
                Dependency {
                    label: inner_relation(&morphemes[i]),
                    head,
                }
            } else if let Some(&next) = heads.get(n + 1) {
                Dependency {
                    label: chunk_relation(morphemes, chunk, head),
                    head: next,
                }
            } else {
                Dependency {
                    label: "ROOT",
                    head: i,
                }
            };
            arcs.push(dependency);
        }
    }
    arcs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(tokens: &[(&str, &str)]) -> Vec<Morpheme> {
        tokens
            .iter()
            .map(|(text, detail)| {
                let detail: Vec<String> = detail.split(',').map(String::from).collect();
                Morpheme::from_detail(text, &detail)
            })
            .collect()
    }

    #[test]
    fn empty_sentence_has_no_arcs() {
        assert!(attach(&[]).is_empty());
    }

    #[test]
    fn 仕方がない() {
        let s = sentence(&[
            ("仕方", "名詞,ナイ形容詞語幹,*,*,*,*,仕方,シカタ,シカタ"),
            ("が", "助詞,格助詞,一般,*,*,*,が,ガ,ガ"),
            ("ない", "形容詞,自立,*,*,形容詞・アウオ段,基本形,ない,ナイ,ナイ"),
            ("。", "記号,句点,*,*,*,*,。,。,。"),
        ]);
        assert_eq!(
            attach(&s),
            vec![
                Dependency { label: "nsubj", head: 2 },
                Dependency { label: "case", head: 0 },
                Dependency { label: "ROOT", head: 2 },
                Dependency { label: "punct", head: 2 },
            ]
        );
    }

    #[test]
    fn compound_nouns_share_a_bunsetsu() {
        let s = sentence(&[
            ("東京", "名詞,固有名詞,地域,一般,*,*,東京,トウキョウ,トーキョー"),
            ("駅", "名詞,接尾,地域,*,*,*,駅,エキ,エキ"),
            ("の", "助詞,連体化,*,*,*,*,の,ノ,ノ"),
            ("近く", "名詞,副詞可能,*,*,*,*,近く,チカク,チカク"),
            ("に", "助詞,格助詞,一般,*,*,*,に,ニ,ニ"),
            ("住む", "動詞,自立,*,*,五段・マ行,基本形,住む,スム,スム"),
        ]);
        let arcs = attach(&s);
        assert_eq!(arcs[0], Dependency { label: "nmod", head: 3 });
        assert_eq!(arcs[1], Dependency { label: "compound", head: 0 });
        assert_eq!(arcs[2], Dependency { label: "case", head: 0 });
        assert_eq!(arcs[3], Dependency { label: "obl", head: 5 });
        assert_eq!(arcs[5], Dependency { label: "ROOT", head: 5 });
    }

    #[test]
    fn leading_symbols_form_their_own_bunsetsu() {
        let s = sentence(&[
            ("「", "記号,括弧開,*,*,*,*,「,「,「"),
            ("はい", "感動詞,*,*,*,*,*,はい,ハイ,ハイ"),
        ]);
        assert_eq!(
            attach(&s),
            vec![Dependency { label: "dep", head: 1 }, Dependency { label: "ROOT", head: 1 }]
        );
    }

    #[test]
    fn exactly_one_root() {
        let s = sentence(&[
            ("今日", "名詞,副詞可能,*,*,*,*,今日,キョウ,キョー"),
            ("は", "助詞,係助詞,*,*,*,*,は,ハ,ワ"),
            ("雨", "名詞,一般,*,*,*,*,雨,アメ,アメ"),
            ("が", "助詞,格助詞,一般,*,*,*,が,ガ,ガ"),
            ("降っ", "動詞,自立,*,*,五段・ラ行,連用タ接続,降る,フッ,フッ"),
            ("て", "助詞,接続助詞,*,*,*,*,て,テ,テ"),
            ("いる", "動詞,非自立,*,*,一段,基本形,いる,イル,イル"),
        ]);
        let arcs = attach(&s);
        assert_eq!(arcs.iter().filter(|a| a.label == "ROOT").count(), 1);
        assert!(arcs.iter().all(|a| a.head < s.len()));
        assert_eq!(arcs[0], Dependency { label: "nsubj", head: 2 });
        assert_eq!(arcs[2], Dependency { label: "nsubj", head: 4 });
        assert_eq!(arcs[5], Dependency { label: "mark", head: 4 });
        assert_eq!(arcs[6], Dependency { label: "aux", head: 4 });
    }
}
