use super::*;
use crate::layout::graph::keyword_storylines;
use crate::text::{KeywordExtractor, StopWordExtractor};
use proptest::prelude::*;

fn stem(word: &str) -> String {
    TitleTokenizer::new().stem(word)
}

fn paper(id: &str, year: i32, refs: &[&str]) -> Paper {
    Paper::new(id, year, id).with_references(refs.iter().copied())
}

fn prepared(papers: Vec<Paper>) -> StoryMap {
    StoryMap::build(papers, LayoutParams::default(), &StopWordExtractor::english())
}

// ── Keyword offsets ──────────────────────────────────────────────────────────

#[test]
fn test_keyword_offsets_first_occurrence() {
    let ex = StopWordExtractor::english();
    let mut papers = vec![Paper::new("A", 2000, "Waves, more gravity waves")];
    let table = KeywordExtractor::new(&ex, 0).extract(&mut papers);
    compute_keyword_offsets(&mut papers, &table);
    assert_eq!(papers[0].keyword_offsets[&stem("waves")], 0);
    assert_eq!(papers[0].keyword_offsets[&stem("gravity")], 12);
}

#[test]
fn test_keyword_offsets_skip_unknown_keyword() {
    let mut papers = vec![Paper::new("A", 2000, "Gravity")];
    papers[0].keywords = vec!["graviti".to_string()];
    compute_keyword_offsets(&mut papers, &KeywordTable::new());
    assert!(papers[0].keyword_offsets.is_empty());
}

// ── Sequence order ───────────────────────────────────────────────────────────

#[test]
fn test_sequence_by_year() {
    let papers = vec![paper("C", 2001, &[]), paper("A", 1990, &[]), paper("B", 1995, &[])];
    let g = CitationGraph::build(&papers);
    assert_eq!(sequence_order(&papers, &g), vec![1, 2, 0]);
}

#[test]
fn test_sequence_cited_before_citing_within_year() {
    let papers = vec![paper("A", 1995, &["B"]), paper("B", 1995, &[]), paper("C", 1995, &[])];
    let g = CitationGraph::build(&papers);
    assert_eq!(sequence_order(&papers, &g), vec![1, 0, 2]);
}

#[test]
fn test_sequence_keeps_input_order_when_unrelated() {
    let papers = vec![paper("X", 1995, &[]), paper("Y", 1995, &[]), paper("Z", 1995, &[])];
    let g = CitationGraph::build(&papers);
    assert_eq!(sequence_order(&papers, &g), vec![0, 1, 2]);
}

#[test]
fn test_sequence_survives_citation_cycle() {
    let papers = vec![paper("A", 1995, &["B"]), paper("B", 1995, &["A"])];
    let g = CitationGraph::build(&papers);
    let order = sequence_order(&papers, &g);
    assert_eq!(order, vec![0, 1]);
}

proptest! {
    #[test]
    fn test_sequence_is_a_year_sorted_permutation(
        years in proptest::collection::vec(1990i32..1994, 1..15)
    ) {
        let papers: Vec<Paper> = years
            .iter()
            .enumerate()
            .map(|(i, &y)| Paper::new(format!("P{i}"), y, "t"))
            .collect();
        let g = CitationGraph::build(&papers);
        let order = sequence_order(&papers, &g);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..papers.len()).collect::<Vec<_>>());
        for pair in order.windows(2) {
            let (a, b) = (&papers[pair[0]], &papers[pair[1]]);
            prop_assert!(a.year <= b.year);
            // Without citations equal-year papers keep input order.
            if a.year == b.year {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }
}

// ── Geometry ─────────────────────────────────────────────────────────────────

#[test]
fn test_assign_geometry_widths() {
    let params = LayoutParams::default().with_char_width(10.0);
    let mut papers = vec![Paper::new("A", 1990, "Gravity").with_citation_count(42)];
    assign_geometry(&mut papers, &[0], &params);
    let l = &papers[0].layout;
    assert_eq!(l.year_len, 7);
    assert_eq!(l.citation_len, 5);
    assert_eq!(l.width, (7 + 7 + 5) as f64 * 10.0);
    assert_eq!(papers[0].index, 0);
}

#[test]
fn test_components_follow_sequence_within_year() {
    // P2 cites P3, so P3 comes first in 1995 although BFS meets P2 first.
    let map = prepared(vec![
        Paper::new("P1", 1990, "Gravity"),
        Paper::new("P2", 1995, "Gravity").with_references(["P1", "P3"]),
        Paper::new("P3", 1995, "Gravity").with_references(["P1"]),
    ]);
    assert_eq!(map.sequence, vec!["P1", "P3", "P2"]);
    assert_eq!(map.storylines[0].components, vec![vec!["P1", "P3", "P2"]]);
    let pids: Vec<&str> = map.lines[0].segments[0].iter().map(|p| p.pid.as_str()).collect();
    assert_eq!(pids, vec!["P1", "P3", "P2"]);
}

#[test]
fn test_order_components_by_year_then_index() {
    let mut papers = vec![paper("A", 1995, &[]), paper("B", 1990, &[]), paper("C", 1995, &[])];
    papers[0].index = 2;
    papers[1].index = 0;
    papers[2].index = 1;
    let index: HashMap<String, usize> =
        [("A".to_string(), 0), ("B".to_string(), 1), ("C".to_string(), 2)].into();
    let mut storylines = vec![Storyline {
        keyword: "k".to_string(),
        components: vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]],
    }];
    order_components(&mut storylines, &papers, &index);
    assert_eq!(storylines[0].components[0], vec!["B", "C", "A"]);
}

// ── Colors ───────────────────────────────────────────────────────────────────

#[test]
fn test_color_cycle_starts_at_offset_and_wraps() {
    let mut colors = ColorCycle::new(10);
    assert_eq!(colors.next_color(), PALETTE[10]);
    assert_eq!(colors.next_color(), PALETTE[0]);
}

// ── Edge skeleton ────────────────────────────────────────────────────────────

#[test]
fn test_build_lines_points_and_colors() {
    let map = prepared(vec![
        Paper::new("P2", 1995, "On gravity").with_references(["P1"]),
        Paper::new("P1", 1990, "Gravity"),
        Paper::new("P3", 1995, "Gravity again").with_references(["P1"]),
    ]);
    let g = stem("gravity");
    let line = map.lines.iter().find(|l| l.keyword == g).unwrap();
    assert_eq!(line.segments.len(), 1);
    let pids: Vec<&str> = line.segments[0].iter().map(|p| p.pid.as_str()).collect();
    assert_eq!(pids, vec!["P1", "P2", "P3"]);

    let w = map.params.char_width;
    // "On gravity": offset 3, year_len 7.
    assert_eq!(line.segments[0][1].x, (3 + 7 + 1) as f64 * w);
    assert_eq!(line.segments[0][0].x, (7 + 1) as f64 * w);

    assert_eq!(map.keywords.get(&g).unwrap().color.as_deref(), Some(PALETTE[4]));
    assert!(map.papers.iter().all(|p| p.has_edge));
}

#[test]
fn test_build_lines_min_stops_filters_components() {
    let params = LayoutParams {
        min_stops: 1,
        ..LayoutParams::default()
    };
    let map = StoryMap::build(
        vec![Paper::new("A", 1990, "Gravity"), Paper::new("B", 1991, "Gravity")],
        params,
        &StopWordExtractor::english(),
    );
    let line = &map.lines[0];
    assert!(line.segments.is_empty());
    assert!(map.keywords.get(&stem("gravity")).unwrap().color.is_none());
    assert!(map.papers.iter().all(|p| !p.has_edge));
}

#[test]
fn test_build_lines_one_color_per_keyword() {
    let map = prepared(vec![
        Paper::new("A", 1990, "Gravity"),
        Paper::new("B", 1991, "Gravity"),
        Paper::new("C", 1992, "Light"),
    ]);
    let g = map.lines.iter().find(|l| l.keyword == stem("gravity")).unwrap();
    assert_eq!(g.segments.len(), 2);
    let colors: Vec<_> = map.keywords.iter().filter_map(|(_, k)| k.color.clone()).collect();
    assert_eq!(colors, vec![PALETTE[4].to_string(), PALETTE[5].to_string()]);
}

#[test]
fn test_build_lines_directly() {
    let mut papers = vec![paper("A", 1990, &[]), paper("B", 1991, &["A"])];
    for p in papers.iter_mut() {
        p.keywords = vec!["k".to_string()];
        p.keyword_offsets.insert("k".to_string(), 2);
    }
    let params = LayoutParams::default();
    let g = CitationGraph::build(&papers);
    let mut table = KeywordTable::new();
    table.entry("k").count = 2;
    let storylines = keyword_storylines(&papers, &g, &table);
    assign_geometry(&mut papers, &[0, 1], &params);
    let index: HashMap<String, usize> = [("A".to_string(), 0), ("B".to_string(), 1)].into();
    let lines = build_lines(&mut papers, &index, &storylines, &mut table, &params);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].point_count(), 2);
    assert!(table.get("k").unwrap().color.is_some());
}

#[test]
fn test_prepare_sets_sequence() {
    let map = prepared(vec![paper("B", 1995, &[]), paper("A", 1990, &[])]);
    assert_eq!(map.sequence, vec!["A", "B"]);
    assert_eq!(map.paper("A").unwrap().index, 0);
    assert_eq!(map.paper("B").unwrap().index, 1);
}
