use kleene::{Dfa, Regex, compile_dfa, complement, intersect};

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

fn dfa(pattern: &str) -> Dfa {
    compile_dfa(pattern).expect("compile failed")
}

#[test]
fn test_complement() {
    let alphabet = 'a'..='z';
    let comp = complement(&dfa("abc"), alphabet);
    assert!(!comp.accepts("abc"));
    assert!(comp.accepts("ab"));
    assert!(comp.accepts("x"));
    assert!(comp.accepts(""));
    assert!(comp.accepts("abcd"));
}

#[test]
fn test_complement_outside_alphabet_rejects() {
    let comp = dfa("a").complement(['b']);
    assert!(comp.accepts("b"));
    assert!(!comp.accepts("c"));
}

#[test]
fn test_double_complement() {
    let alphabet = ['a', 'b', 'c'];
    for pattern in ["a(b|c)…", "a?b", "(ab){2}", "c…"] {
        let original = dfa(pattern);
        let twice = original.complement(alphabet).complement(alphabet);
        for text in all_strings(&alphabet, 5) {
            assert_eq!(
                original.accepts(&text),
                twice.accepts(&text),
                "pattern {pattern} on {text:?}"
            );
        }
    }
}

#[test]
fn test_intersection() {
    let product = dfa("a(b|c)…").intersect(&dfa("a(b)…"));
    assert!(product.accepts("abbb"));
    assert!(product.accepts("a"));
    assert!(!product.accepts("ac"));
}

#[test]
fn test_intersection_with_empty() {
    let product = intersect(&dfa("abc"), &dfa("xyz"));
    assert!(!product.accepts("abc"));
    assert!(!product.accepts("xyz"));

    let product = intersect(&dfa("aaa…"), &dfa("a?a?a?a?a?"));
    assert!(!product.accepts("a"));
    for n in 2..=5 {
        assert!(product.accepts(&"a".repeat(n)), "length {n}");
    }
    assert!(!product.accepts("aaaaaa"));
}

#[test]
fn test_intersection_is_conjunction() {
    let alphabet = ['a', 'b'];
    for (left, right) in [("(a|b)…", "a…b…"), ("a?b…", "(ab)…"), ("(a|b){3}", "a…ba…")] {
        let (l, r) = (dfa(left), dfa(right));
        let product = intersect(&l, &r);
        for text in all_strings(&alphabet, 5) {
            assert_eq!(
                product.accepts(&text),
                l.accepts(&text) && r.accepts(&text),
                "{left} & {right} on {text:?}"
            );
        }
    }
}

#[test]
fn test_regex_algebra_wrappers() {
    let re = Regex::new("abc").unwrap();
    let comp = re.complement('a'..='c');
    assert!(!comp.accepts("abc"));
    assert!(comp.accepts("cba"));

    let product = Regex::new("(a|b)…").unwrap().intersect(&Regex::new("a…b…").unwrap());
    assert!(product.accepts("aabb"));
    assert!(!product.accepts("ba"));
}
