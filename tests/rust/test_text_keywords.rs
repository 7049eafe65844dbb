use super::*;

fn stem(word: &str) -> String {
    TitleTokenizer::new().stem(word)
}

fn titles(titles: &[&str]) -> Vec<Paper> {
    titles
        .iter()
        .enumerate()
        .map(|(i, t)| Paper::new(format!("P{i}"), 2000, *t))
        .collect()
}

// ── Candidates ───────────────────────────────────────────────────────────────

#[test]
fn test_candidates_drop_stop_words() {
    let ex = StopWordExtractor::english();
    let c = ex.candidates("The theory of gravity and the waves");
    assert_eq!(c, vec!["theory", "gravity", "waves"]);
}

#[test]
fn test_candidates_drop_numbers() {
    let ex = StopWordExtractor::english();
    let c = ex.candidates("Results from 2019 survey");
    assert_eq!(c, vec!["results", "survey"]);
}

#[test]
fn test_candidates_are_lowercased_and_unique() {
    let ex = StopWordExtractor::english();
    let c = ex.candidates("Gravity. gravity. GRAVITY");
    assert_eq!(c, vec!["gravity"]);
}

#[test]
fn test_custom_stop_words() {
    let ex = StopWordExtractor::with_stop_words(["Gravity"]);
    assert!(ex.is_stop_word("gravity"));
    assert_eq!(ex.candidates("gravity waves"), vec!["waves"]);
}

// ── Extraction ───────────────────────────────────────────────────────────────

#[test]
fn test_extract_counts_occurrences() {
    let ex = StopWordExtractor::english();
    let mut papers = titles(&["Gravity waves", "Gravity", "Waves of light"]);
    let table = KeywordExtractor::new(&ex, 0).extract(&mut papers);
    assert_eq!(table.get(&stem("gravity")).unwrap().count, 2);
    assert_eq!(table.get(&stem("waves")).unwrap().count, 2);
    assert_eq!(table.get(&stem("light")).unwrap().count, 1);
    assert!(!table.contains("of"));
}

#[test]
fn test_extract_min_instances_is_strict() {
    let ex = StopWordExtractor::english();
    let mut papers = titles(&["Gravity waves", "Gravity", "Light"]);
    let table = KeywordExtractor::new(&ex, 1).extract(&mut papers);
    assert!(table.contains(&stem("gravity")));
    assert!(!table.contains(&stem("waves")));
    assert!(!table.contains(&stem("light")));
    assert!(papers[2].keywords.is_empty());
}

#[test]
fn test_extract_merges_inflections() {
    let ex = StopWordExtractor::english();
    let mut papers = titles(&["Neural networks", "A network model"]);
    let table = KeywordExtractor::new(&ex, 0).extract(&mut papers);
    let k = table.get(&stem("network")).unwrap();
    assert_eq!(k.count, 2);
    assert_eq!(k.forms, vec!["networks", "network"]);
}

#[test]
fn test_example_is_first_spelling_seen() {
    let ex = StopWordExtractor::english();
    let mut papers = titles(&["Wave optics", "Waves of light", "wave tanks"]);
    let table = KeywordExtractor::new(&ex, 0).extract(&mut papers);
    let k = table.get(&stem("waves")).unwrap();
    assert_eq!(k.example(), Some("Wave"));
    assert_eq!(k.forms, vec!["Wave", "Waves", "wave"]);
}

#[test]
fn test_extract_tags_papers_in_title_order() {
    let ex = StopWordExtractor::english();
    let mut papers = titles(&["Waves and gravity waves"]);
    KeywordExtractor::new(&ex, 0).extract(&mut papers);
    assert_eq!(papers[0].keywords, vec![stem("waves"), stem("gravity")]);
}

#[test]
fn test_extract_table_in_first_appearance_order() {
    let ex = StopWordExtractor::english();
    let mut papers = titles(&["Light", "Gravity light"]);
    let table = KeywordExtractor::new(&ex, 0).extract(&mut papers);
    assert_eq!(
        table.stems().collect::<Vec<_>>(),
        vec![stem("light").as_str(), stem("gravity").as_str()]
    );
}

#[test]
fn test_extract_ignores_words_never_proposed() {
    struct Only(&'static str);
    impl CandidateExtractor for Only {
        fn candidates(&self, _corpus: &str) -> Vec<String> {
            vec![self.0.to_string()]
        }
    }
    let mut papers = titles(&["Gravity waves", "Gravity waves"]);
    let table = KeywordExtractor::new(&Only("waves"), 0).extract(&mut papers);
    assert_eq!(table.len(), 1);
    assert!(!table.contains(&stem("gravity")));
    assert_eq!(papers[0].keywords, vec![stem("waves")]);
}

#[test]
fn test_extract_empty_corpus() {
    let ex = StopWordExtractor::english();
    let mut papers: Vec<Paper> = Vec::new();
    let table = KeywordExtractor::new(&ex, 0).extract(&mut papers);
    assert!(table.is_empty());
}
