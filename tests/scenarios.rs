use kleene::{Matcher, Regex, compile_dfa, compile_nfa, minimize};

#[track_caller]
fn assert_accepts(pattern: &str, accepted: &[&str], rejected: &[&str]) {
    let _ = env_logger::builder().is_test(true).try_init();

    let nfa = compile_nfa(pattern).expect("compile failed");
    let dfa = minimize(&compile_dfa(pattern).expect("compile failed"));
    for text in accepted {
        assert!(nfa.is_match(text), "NFA for '{pattern}' should accept {text:?}");
        assert!(dfa.accepts(text), "DFA for '{pattern}' should accept {text:?}");
    }
    for text in rejected {
        assert!(!nfa.is_match(text), "NFA for '{pattern}' should reject {text:?}");
        assert!(!dfa.accepts(text), "DFA for '{pattern}' should reject {text:?}");
    }
}

#[test]
fn test_star_inside_concat() {
    assert_accepts("a(b|c)…d", &["ad", "abcd", "abbd"], &["", "a", "d"]);
}

#[test]
fn test_exact_repeat() {
    assert_accepts("a{3}", &["aaa"], &["aa", "aaaa", ""]);
}

#[test]
fn test_optional_prefix() {
    assert_accepts("a?b", &["b", "ab"], &["a", "aab"]);
}

#[test]
fn test_back_reference_to_repeated_group() {
    let re = Regex::new("(<g>a|b){3}<g>").unwrap();
    let m = re.r#match("aaaa").unwrap().expect("should match");
    assert_eq!(m.group("g"), Some("a"));
    assert_eq!(re.r#match("aaab").unwrap(), None);

    let m = re.r#match("abbb").unwrap().expect("should match");
    assert_eq!(m.group("g"), Some("b"));
}

#[test]
fn test_complement_of_literal() {
    let comp = compile_dfa("abc").unwrap().complement('a'..='z');
    assert!(!comp.accepts("abc"));
    assert!(comp.accepts("ab"));
    assert!(comp.accepts("x"));
    assert!(comp.accepts(""));
}

#[test]
fn test_intersection_of_star_languages() {
    let product = compile_dfa("(a|b)…")
        .unwrap()
        .intersect(&compile_dfa("a…b…").unwrap());
    assert!(product.accepts("aaabbb"));
    assert!(product.accepts(""));
    assert!(!product.accepts("abab"));
}
