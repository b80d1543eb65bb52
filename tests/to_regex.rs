use kleene::{Dfa, Regex, compile_dfa, minimize, to_regex};

fn all_strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut out = vec![String::new()];
    let mut layer = vec![String::new()];
    for _ in 0..max_len {
        layer = layer
            .iter()
            .flat_map(|s| {
                alphabet.iter().map(move |c| {
                    let mut next = s.clone();
                    next.push(*c);
                    next
                })
            })
            .collect();
        out.extend(layer.iter().cloned());
    }
    out
}

#[track_caller]
fn assert_same_language(left: &Dfa, right: &Dfa, alphabet: &[char]) {
    for text in all_strings(alphabet, 5) {
        assert_eq!(left.accepts(&text), right.accepts(&text), "on {text:?}");
    }
}

#[track_caller]
fn assert_round_trip(pattern: &str) {
    let dfa = minimize(&compile_dfa(pattern).unwrap());
    let recovered = to_regex(&dfa).unwrap_or_else(|| panic!("{pattern} has a language"));
    let back = compile_dfa(&recovered)
        .unwrap_or_else(|e| panic!("recovered pattern {recovered:?} does not compile: {e}"));
    let mut alphabet: Vec<char> = dfa.alphabet().into_iter().collect();
    alphabet.push('z');
    assert_same_language(&dfa, &back, &alphabet);
}

#[test]
fn test_round_trip_to_regex() {
    for pattern in [
        "a",
        "abc",
        "a|b",
        "a(b|c)lol",
        "a…",
        "(a|b)…",
        "a(b|c)…d",
        "a?b",
        "a{3}",
        "(ab)…a?",
        "(a|b)…abb",
        "(<g>a|b)c",
    ] {
        assert_round_trip(pattern);
    }
}

#[test]
fn test_round_trip_escapes_metacharacters() {
    assert_round_trip("%|%%…%%(%");
    assert_round_trip("%%%a");
    assert_round_trip("%?%…");
}

#[test]
fn test_empty_string_language() {
    let dfa = compile_dfa("a{0}").unwrap();
    assert_eq!(to_regex(&dfa).as_deref(), Some("ε{0}"));
    let back = compile_dfa("ε{0}").unwrap();
    assert!(back.accepts(""));
    assert!(!back.accepts("ε"));
}

#[test]
fn test_empty_language() {
    let product = compile_dfa("a").unwrap().intersect(&compile_dfa("b").unwrap());
    assert_eq!(to_regex(&product), None);
}

#[test]
fn test_regex_to_regex_uses_minimized_dfa() {
    let re = Regex::new("a(b|c)lol").unwrap();
    let recovered = Regex::new(&re.to_regex().unwrap()).unwrap();
    assert_eq!(
        re.r#match("aclol").unwrap().map(|m| m.text),
        recovered.r#match("aclol").unwrap().map(|m| m.text)
    );
}

#[test]
fn test_complement_round_trip() {
    let alphabet = ['a', 'b'];
    let comp = compile_dfa("ab").unwrap().complement(alphabet);
    let recovered = to_regex(&minimize(&comp)).unwrap();
    assert_same_language(&comp, &compile_dfa(&recovered).unwrap(), &alphabet);
}

#[test]
fn test_counting_automaton() {
    // The minimized DFAs have 4 and 16 states.
    assert_round_trip("(a|b)…a(a|b)");
    let dfa = minimize(&compile_dfa("(a|b)…a(a|b){3}").unwrap());
    assert_eq!(dfa.state_count(), 16);
    let recovered = to_regex(&dfa).unwrap();
    assert!(recovered.contains('…'));
}
