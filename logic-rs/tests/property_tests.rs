use proptest::prelude::*;
use logic::pattern::contains_ci;
use logic::script::Session;

fn say_arg() -> impl Strategy<Value = String> {
    // Words without quotes or placeholder braces, possibly quoted as a whole.
    ("[A-Za-z0-9][A-Za-z0-9 ,.?]{0,12}[A-Za-z0-9]", any::<bool>())
        .prop_map(|(w, q)| if q { format!("\"{w}\"") } else { w })
}

proptest! {
    /// The interpreter never panics on arbitrary input.
    #[test]
    fn run_does_not_panic(s in "\\PC*") {
        let _ = Session::new().run(&s);
    }

    /// Arbitrary block keywords never corrupt the frame stack: once enough
    /// ENDs close every block, execution is back at top level.
    #[test]
    fn random_block_structure_recovers(lines in proptest::collection::vec(
        prop_oneof![
            Just("IF 1 == 2"), Just("IF 1 == 1"), Just("ELSE IF 1 == 1"),
            Just("ELSE IF 1 == 2"), Just("ELSE"), Just("END"), Just("SAY x"),
        ],
        0..40,
    )) {
        let src = format!("{}\n{}SAY tail", lines.join("\n"), "END\n".repeat(lines.len()));
        let out = Session::new().run(&src);
        prop_assert!(out.ends_with("tail"), "{out}");
        let leftovers = out
            .replace("[Error: ELSE IF without IF]", "")
            .replace("[Error: ELSE without IF]", "")
            .replace("tail", "")
            .replace('x', "");
        prop_assert!(leftovers.trim().is_empty(), "{out}");
    }

    /// Without IF/ELSE/END, output is the SAY arguments joined by spaces.
    #[test]
    fn say_only_concatenates(args in proptest::collection::vec(say_arg(), 0..8)) {
        let src: String = args.iter().map(|a| format!("SAY {a}\n")).collect();
        let want = args
            .iter()
            .map(|a| a.trim_matches('"'))
            .collect::<Vec<_>>()
            .join(" ");
        prop_assert_eq!(Session::new().run(&src), want.trim());
    }

    /// Same script, same store, same output.
    #[test]
    fn idempotent_without_mutation(a in -50i64..50, b in -50i64..50) {
        let mut session = Session::new();
        session.vars.set("a", a.to_string());
        let src = format!("IF a < {b}\nSAY less\nELSE IF a == {b}\nSAY same\nELSE\nSAY more\nEND");
        let first = session.run(&src);
        let second = session.run(&src);
        prop_assert_eq!(first, second);
    }

    /// ASCII case folding agrees with a lowercase-then-search reference.
    #[test]
    fn contains_ci_matches_reference(hay in "[a-zA-Z ]{0,30}", needle in "[a-zA-Z]{0,4}") {
        let want = hay.to_lowercase().contains(&needle.to_lowercase());
        prop_assert_eq!(contains_ci(&hay, &needle), want);
    }
}

/// `RANDOM` draws from `[0, 1)`: never below 0, always below 1.
#[test]
fn random_bounds_hold_over_many_trials() {
    let mut session = Session::new();
    for _ in 0..2000 {
        assert_eq!(session.run("IF RANDOM < 0\nSAY low\nEND"), "");
        assert_eq!(session.run("IF RANDOM < 1\nSAY ok\nEND"), "ok");
        assert_eq!(session.run("IF RANDOM >= 0\nSAY ok\nEND"), "ok");
    }
}

/// Both coin faces show up, so `RANDOM` is actually re-drawn.
#[test]
fn random_is_redrawn() {
    let mut session = Session::new();
    let outs: Vec<String> = (0..500)
        .map(|_| session.run("IF RANDOM < 0.5\nSAY heads\nELSE\nSAY tails\nEND"))
        .collect();
    assert!(outs.iter().any(|o| o == "heads"));
    assert!(outs.iter().any(|o| o == "tails"));
}
