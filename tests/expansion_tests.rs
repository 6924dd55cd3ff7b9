//! End-to-end expansion tests for `unfold_utterance_string`, covering
//! every element kind, nesting, and the deterministic output ordering.

use utterance_engine::{Bindings, Expander, StaticRegistry, UtteranceError, Value};

fn unfold(template: &str) -> Value {
    let env = Bindings::new();
    let registry = StaticRegistry::new();
    Expander::new(&env, &registry)
        .unfold_utterance_string(template)
        .unwrap()
}

fn unfold_with(template: &str, env: &Bindings, registry: &StaticRegistry) -> Value {
    Expander::new(env, registry)
        .unfold_utterance_string(template)
        .unwrap()
}

fn list(items: &[&str]) -> Value {
    Value::List(items.iter().map(|s| s.to_string()).collect())
}

mod identity {
    use super::*;

    #[test]
    fn simple_string_is_unchanged() {
        assert_eq!(unfold("simple string"), Value::from("simple string"));
    }

    #[test]
    fn single_slot_passes_through() {
        assert_eq!(
            unfold("simple string {SampleSlot} in it"),
            Value::from("simple string {SampleSlot} in it")
        );
    }

    #[test]
    fn two_slots_pass_through() {
        assert_eq!(
            unfold("simple string {SampleSlot} in it {SecondSlot} too"),
            Value::from("simple string {SampleSlot} in it {SecondSlot} too")
        );
    }

    #[test]
    fn stray_braces_are_literal_text() {
        assert_eq!(unfold("left { alone"), Value::from("left { alone"));
        assert_eq!(unfold("right } alone"), Value::from("right } alone"));
        assert_eq!(unfold("}"), Value::from("}"));
    }

    #[test]
    fn angle_bracket_text_is_unchanged() {
        assert_eq!(
            unfold("price is <@1> dollars"),
            Value::from("price is <@1> dollars")
        );
    }

    #[test]
    fn expansion_is_idempotent_on_expanded_output() {
        let expanded = unfold("a {x|{y|z}} b {Slot}").into_strings();
        for utterance in expanded {
            assert_eq!(unfold(&utterance), Value::Scalar(utterance.clone()));
        }
    }
}

mod alternative_lists {
    use super::*;

    #[test]
    fn three_alternatives_with_verbatim_whitespace() {
        assert_eq!(
            unfold("simple string with {my|option| list } in it"),
            list(&[
                "simple string with my in it",
                "simple string with option in it",
                "simple string with  list  in it",
            ])
        );
    }

    #[test]
    fn empty_segment_is_a_valid_alternative() {
        assert_eq!(unfold("a{x||y}b"), list(&["axb", "ab", "ayb"]));
    }

    #[test]
    fn nested_list_flattens_to_three() {
        assert_eq!(unfold("a {x|{y|z}} b"), list(&["a x b", "a y b", "a z b"]));
    }

    #[test]
    fn deep_nesting_flattens_completely() {
        assert_eq!(
            unfold("a {x|{y|{deep|er}}} b"),
            list(&["a x b", "a y b", "a deep b", "a er b"])
        );
    }

    #[test]
    fn angle_bracket_text_survives_fan_out() {
        assert_eq!(
            unfold("a <@1> b {x|y}"),
            list(&["a <@1> b x", "a <@1> b y"])
        );
    }

    #[test]
    fn two_lists_expand_in_discovery_order() {
        assert_eq!(
            unfold("{I said |You said }{tomato|potato}"),
            list(&[
                "I said tomato",
                "I said potato",
                "You said tomato",
                "You said potato",
            ])
        );
    }

    #[test]
    fn nested_list_with_slot_member() {
        let mut env = Bindings::new();
        env.bind("identifier2", "my identifier 2");
        let registry = StaticRegistry::new();

        assert_eq!(
            unfold_with(
                "simple string with {my|{OptionSlot}|{=identifier2}| list } in it",
                &env,
                &registry
            ),
            list(&[
                "simple string with my in it",
                "simple string with {OptionSlot} in it",
                "simple string with my identifier 2 in it",
                "simple string with  list  in it",
            ])
        );
    }

    #[test]
    fn nested_list_with_list_valued_expression_member() {
        let mut env = Bindings::new();
        env.bind(
            "identifier3",
            vec!["sublist item 1".to_string(), "sublist item 2".to_string()],
        );
        let registry = StaticRegistry::new();

        assert_eq!(
            unfold_with(
                "simple string with an option list that has {my|{OptionSlot}|{=identifier3}| list } in it",
                &env,
                &registry
            ),
            list(&[
                "simple string with an option list that has my in it",
                "simple string with an option list that has {OptionSlot} in it",
                "simple string with an option list that has sublist item 1 in it",
                "simple string with an option list that has sublist item 2 in it",
                "simple string with an option list that has  list  in it",
            ])
        );
    }
}

mod expressions {
    use super::*;

    #[test]
    fn scalar_binding_substitutes_inline() {
        let mut env = Bindings::new();
        env.bind("identifier1", "my identifier 1");
        let registry = StaticRegistry::new();

        assert_eq!(
            unfold_with("simple string with {=identifier1} in it", &env, &registry),
            Value::from("simple string with my identifier 1 in it")
        );
    }

    #[test]
    fn quoted_literal_needs_no_binding() {
        assert_eq!(
            unfold("simple string that has {='right'} in it"),
            Value::from("simple string that has right in it")
        );
    }

    #[test]
    fn list_binding_fans_out() {
        let mut env = Bindings::new();
        env.bind("fruits", vec!["apple".to_string(), "banana".to_string()]);
        let registry = StaticRegistry::new();

        assert_eq!(
            unfold_with("simple string with {=fruits} in it", &env, &registry),
            list(&[
                "simple string with apple in it",
                "simple string with banana in it",
            ])
        );
    }

    #[test]
    fn evaluator_errors_propagate() {
        let env = Bindings::new();
        let registry = StaticRegistry::new();
        let error = Expander::new(&env, &registry)
            .unfold_utterance_string("hello {=undefined_name}")
            .unwrap_err();

        let UtteranceError::Eval { code, source } = error else {
            panic!("expected an evaluation error");
        };
        assert_eq!(code, "undefined_name");
        assert!(source.to_string().contains("undefined binding"));
    }
}

mod custom_types {
    use super::*;

    #[test]
    fn members_fan_out_in_registry_order() {
        let env = Bindings::new();
        let mut registry = StaticRegistry::new();
        registry.define("fruit", ["apple", "golden delicious", "banana"]);

        assert_eq!(
            unfold_with("simple string containing {+fruit} in it", &env, &registry),
            list(&[
                "simple string containing apple in it",
                "simple string containing golden delicious in it",
                "simple string containing banana in it",
            ])
        );
    }

    #[test]
    fn type_name_is_trimmed_before_lookup() {
        let env = Bindings::new();
        let mut registry = StaticRegistry::new();
        registry.define("fruit", ["apple"]);

        assert_eq!(
            unfold_with("{+ fruit }", &env, &registry),
            list(&["apple"])
        );
    }

    #[test]
    fn members_are_mini_templates() {
        let env = Bindings::new();
        let mut registry = StaticRegistry::new();
        registry.define("day_part", ["morning", "{late|early} evening"]);

        assert_eq!(
            unfold_with("good {+day_part}", &env, &registry),
            list(&["good morning", "good late evening", "good early evening"])
        );
    }

    #[test]
    fn members_may_reference_other_types() {
        let env = Bindings::new();
        let mut registry = StaticRegistry::new();
        registry.define("outer", ["x {+inner}"]);
        registry.define("inner", ["a", "b"]);

        assert_eq!(
            unfold_with("{+outer}", &env, &registry),
            list(&["x a", "x b"])
        );
    }

    #[test]
    fn unknown_type_is_an_error() {
        let env = Bindings::new();
        let registry = StaticRegistry::new();
        let error = Expander::new(&env, &registry)
            .unfold_utterance_string("{+vegetable}")
            .unwrap_err();

        assert!(matches!(
            error,
            UtteranceError::UnknownCustomType { name } if name == "vegetable"
        ));
    }

    #[test]
    fn cyclic_type_definitions_fail_loudly() {
        let env = Bindings::new();
        let mut registry = StaticRegistry::new();
        registry.define("ouro", ["{+boros}"]);
        registry.define("boros", ["{+ouro}"]);

        let error = Expander::new(&env, &registry)
            .unfold_utterance_string("{+ouro}")
            .unwrap_err();
        assert!(matches!(error, UtteranceError::Internal { .. }));
    }
}
