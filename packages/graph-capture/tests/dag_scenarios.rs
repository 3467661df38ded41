//! End-to-end recording scenarios
//!
//! Each test records a small program through the handle layer and checks
//! the finalized graph.

mod common;

use common::{assert_sound, builder, explicit, node_ids};
use graph_capture::{
    AssignPolicy, CaptureConfig, CaptureError, GraphBuilder, Program,
};
use pretty_assertions::assert_eq;

fn identity_builder(name: &str) -> GraphBuilder {
    let config = CaptureConfig::default().with_assign_policy(AssignPolicy::MaterializeIdentity);
    GraphBuilder::new(Program::with_config(name, config).unwrap().into_shared())
}

#[test]
fn test_chain_of_three_with_internal_links() {
    let b = builder("chain");
    let input = b.placeholder("input").unwrap();
    let t1 = b.apply("add_one", &[&input]).unwrap();
    let t2 = b.apply("add_one", &[&t1]).unwrap();
    let output = b.define("output").unwrap();
    output.assign_from("add_one", &[&t2]).unwrap();

    let g = b.graph().unwrap();
    assert_eq!(g.node_count(), 3);
    assert!(g.is_placeholder("input"));
    assert!(g.consumes("add_one:0", "input"));
    assert!(g.produces("add_one:2", "output"));

    // Consecutive nodes share an internal identifier
    for pair in g.nodes().windows(2) {
        let link = &pair[0].outputs[0];
        assert!(link.is_internal(), "{} is not internal", link);
        assert!(pair[1].inputs.contains(link));
    }
    assert_sound(&g);
}

#[test]
fn test_named_intermediates_with_disjoint_output() {
    let b = builder("dead_code");
    let input = b.placeholder("input").unwrap();
    let c = b.define("c").unwrap();
    let bb = b.define("b").unwrap();
    let output = b.define("output").unwrap();

    c.assign(&input).unwrap();
    c.assign_from("add_one", &[&c]).unwrap();
    c.assign_from("add_one", &[&c]).unwrap();
    bb.assign(&c).unwrap();
    output.assign_from("add_one", &[&input]).unwrap();

    // Plain reassignment records nothing; both add_one steps on c stay
    // live through the final binding of c (and b)
    let g = b.graph().unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(node_ids(&g), vec!["add_one:0", "add_one:1", "add_one:2"]);
    assert!(g.produces("add_one:2", "output"));
    assert_sound(&g);
}

#[test]
fn test_named_intermediates_with_identity_policy() {
    let b = identity_builder("dead_code_identity");
    let input = b.placeholder("input").unwrap();
    let c = b.define("c").unwrap();
    let bb = b.define("b").unwrap();
    let output = b.define("output").unwrap();

    c.assign(&input).unwrap();
    c.assign_from("add_one", &[&c]).unwrap();
    c.assign_from("add_one", &[&c]).unwrap();
    bb.assign(&c).unwrap();
    output.assign_from("add_one", &[&input]).unwrap();

    let g = b.graph().unwrap();
    assert_eq!(g.node_count(), 5);
    assert!(g.consumes("identity:0", "input"));
    assert!(g.produces("identity:3", "b"));
    assert!(g.consumes("identity:3", "c"));
    assert_sound(&g);
}

#[test]
fn test_multi_output_split() {
    let b = builder("split");
    let input = b.placeholder("input").unwrap();
    let str_out = b.define("str_out").unwrap();
    let int_out = b.define("int_out").unwrap();
    let id = b
        .commit_multi("split", &[&input], &[&str_out, &int_out])
        .unwrap();

    let g = b.graph().unwrap();
    assert_eq!(g.node_count(), 1);
    assert!(g.consumes(id.as_str(), "input"));
    assert!(g.produces(id.as_str(), "str_out"));
    assert!(g.produces(id.as_str(), "int_out"));
    assert_eq!(g.inputs_of(id.as_str()).unwrap().len(), 1);
    assert_eq!(
        g.outputs_of(id.as_str()).unwrap(),
        &[explicit("str_out"), explicit("int_out")]
    );
}

#[test]
fn test_duplicate_name() {
    let b = builder("dup");
    b.define("a").unwrap();
    let err = b.define("a").unwrap_err();
    assert!(matches!(err, CaptureError::DuplicateName(ref name) if name == "a"));
    assert_eq!(err.to_string(), "Var name already exists: a");
}

#[test]
fn test_overwrite_wins() {
    let b = builder("overwrite");
    let input = b.placeholder("input").unwrap();
    let x = b.define("x").unwrap();
    let y = b.define("y").unwrap();

    x.assign_from("first", &[&input]).unwrap();
    x.assign_from("second", &[&input]).unwrap();
    y.assign_from("use", &[&x]).unwrap();

    let g = b.graph().unwrap();
    assert_eq!(node_ids(&g), vec!["second:1", "use:2"]);
    assert_eq!(g.producer_of_input("use:2", 0).unwrap().id, "second:1");
    assert_eq!(g.eliminated_count(), 1);
}

#[test]
fn test_concat_then_parse() {
    let b = builder("concat");
    let input_a = b.placeholder("input_a").unwrap();
    let input_b = b.placeholder("input_b").unwrap();
    let output = b.define("output").unwrap();
    let int_val = b.define("int_val").unwrap();

    output
        .assign_from("concat_op", &[&input_a, &input_b])
        .unwrap();
    int_val.assign_from("parse_int_op", &[&output]).unwrap();

    let g = b.graph().unwrap();
    assert_eq!(g.node_count(), 2);
    assert!(g.has_node("concat_op:0"));
    assert!(g.has_node("parse_int_op:1"));
    assert!(g.produces("concat_op:0", "output"));
    assert!(g.consumes("concat_op:0", "input_a"));
    assert!(g.consumes("concat_op:0", "input_b"));
    assert!(g.consumes("parse_int_op:1", "output"));
    assert!(g.produces("parse_int_op:1", "int_val"));
    assert!(g.has_edge("output", "int_val"));
    assert_eq!(
        g.describe("concat_op:0").unwrap(),
        "{input_a, input_b} -> {concat_op:0} -> {output}"
    );
}

#[test]
fn test_copy_after_operation_keeps_one_node() {
    let b = builder("copy");
    let a = b.placeholder("a").unwrap();
    let upper = b.define("upper").unwrap();
    let alias = b.define("alias").unwrap();

    upper.assign_from("upper_op", &[&a]).unwrap();
    alias.assign(&upper).unwrap();

    let g = b.graph().unwrap();
    assert_eq!(g.node_count(), 1);
    assert!(g.consumes("upper_op:0", "a"));
    assert!(g.produces("upper_op:0", "upper"));
}

#[test]
fn test_copy_of_anonymous_result_keeps_producer() {
    let b = builder("copy_anon");
    let input = b.placeholder("input").unwrap();
    let t = b.apply("op", &[&input]).unwrap();
    let named = b.define("named").unwrap();
    named.assign(&t).unwrap();

    let g = b.graph().unwrap();
    assert_eq!(node_ids(&g), vec!["op:0"]);
}

#[test]
fn test_copy_is_unaffected_by_later_reassignment_of_source() {
    let b = builder("copy_then_rebind");
    let input = b.placeholder("input").unwrap();
    let c = b.define("c").unwrap();
    let bb = b.define("b").unwrap();
    let out = b.define("out").unwrap();

    c.assign_from("add_one", &[&input]).unwrap();
    bb.assign(&c).unwrap();
    c.assign_from("double", &[&c]).unwrap();
    out.assign_from("neg", &[&bb]).unwrap();

    let g = b.graph().unwrap();
    assert_eq!(node_ids(&g), vec!["add_one:0", "double:1", "neg:2"]);
    assert_eq!(g.producer_of_input("neg:2", 0).unwrap().id, "add_one:0");
    assert_eq!(g.inputs_of("neg:2").unwrap(), &[explicit("c")]);
    assert_eq!(bb.value().unwrap(), explicit("b"));
    assert_sound(&g);
}

#[test]
fn test_copy_chain_through_placeholder() {
    let b = builder("copy_chain");
    let input = b.placeholder("input").unwrap();
    let first = b.define("first").unwrap();
    let second = b.define("second").unwrap();
    let out = b.define("out").unwrap();

    first.assign(&input).unwrap();
    second.assign(&first).unwrap();
    first.assign_from("op", &[&input]).unwrap();
    out.assign_from("use", &[&second]).unwrap();

    let g = b.graph().unwrap();
    assert!(g.consumes("use:1", "input"));
    assert!(g.producer_of_input("use:1", 0).is_none());
    assert_sound(&g);
}

#[test]
fn test_anonymous_copy_pins_named_value() {
    let b = builder("anon_copy");
    let input = b.placeholder("input").unwrap();
    let x = b.define("x").unwrap();
    let out = b.define("out").unwrap();
    let saved = b.define_anonymous();

    x.assign_from("first", &[&input]).unwrap();
    saved.assign(&x).unwrap();
    x.assign_from("second", &[&x]).unwrap();
    out.assign_from("combine", &[&x, &saved]).unwrap();

    let g = b.graph().unwrap();
    assert!(saved.value().unwrap().is_internal());
    assert_eq!(g.producer_of_input("combine:2", 0).unwrap().id, "second:1");
    assert_eq!(g.producer_of_input("combine:2", 1).unwrap().id, "first:0");
    assert_sound(&g);
}

#[test]
fn test_multi_output_partially_overwritten() {
    let b = builder("partial");
    let input = b.placeholder("input").unwrap();
    let str_output = b.define("str_output").unwrap();
    let int_output = b.define("int_output").unwrap();

    let split = b
        .commit_multi(
            "split_op",
            &[&input],
            &[&str_output, &int_output],
        )
        .unwrap();
    let convert = str_output
        .assign_from("int_to_str_op", &[&int_output])
        .unwrap();

    let g = b.graph().unwrap();
    assert_eq!(g.node_count(), 2);
    assert!(g.consumes(split.as_str(), "input"));
    assert!(g.produces(split.as_str(), "str_output"));
    assert!(g.produces(split.as_str(), "int_output"));
    assert!(g.consumes(convert.as_str(), "int_output"));
    assert!(g.produces(convert.as_str(), "str_output"));
    assert!(g.has_edge("int_output", "str_output"));
}

#[test]
fn test_mixed_arity_operations() {
    let b = builder("variadic");
    let vec = b.placeholder("vec").unwrap();
    let a = b.placeholder("a").unwrap();
    let bv = b.placeholder("b").unwrap();
    let c = b.placeholder("c").unwrap();
    let hello = b.placeholder("hello").unwrap();
    let flag = b.placeholder("bool").unwrap();
    let int1 = b.placeholder("int1").unwrap();
    let int2 = b.placeholder("int2").unwrap();
    let int3 = b.placeholder("int3").unwrap();

    let result1 = b.define("result1").unwrap();
    let result2 = b.define("result2").unwrap();
    let result3 = b.define("result3").unwrap();
    let result4 = b.define("result4").unwrap();

    result1.assign_from("vector_op", &[&vec]).unwrap();
    result2
        .assign_from("variadic_op", &[&a, &bv, &c])
        .unwrap();
    result3
        .assign_from(
            "mixed_op",
            &[&hello, &int1, &int2, &int3],
        )
        .unwrap();
    result4
        .assign_from("mixed_op2", &[&hello, &flag, &int1])
        .unwrap();

    let g = b.graph().unwrap();
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.inputs_of("mixed_op:2").unwrap().len(), 4);
    assert_eq!(g.placeholders().len(), 9);
}

#[test]
fn test_branch_selects_recorded_path() {
    for take_branch in [true, false] {
        let b = builder("branch");
        let input = b.placeholder("input").unwrap();
        let output = b.define("output").unwrap();
        if take_branch {
            output.assign_from("double_op", &[&input]).unwrap();
        } else {
            output.assign(&input).unwrap();
        }

        let g = b.graph().unwrap();
        assert_eq!(g.node_count(), usize::from(take_branch));
    }
}

#[test]
fn test_loop_then_copy_per_policy() {
    fn record(b: &GraphBuilder) -> usize {
        let input = b.placeholder("input").unwrap();
        let x = b.define("x").unwrap();
        let result = b.define("result").unwrap();
        x.assign(&input).unwrap();
        for _ in 0..3 {
            x.assign_from("add_one", &[&x]).unwrap();
        }
        result.assign(&x).unwrap();
        b.graph().unwrap().node_count()
    }

    // Copy: three add_one records. Identity: one identity per plain
    // assignment on top of them.
    assert_eq!(record(&builder("loop_copy")), 3);
    assert_eq!(record(&identity_builder("loop_identity")), 5);
}

#[test]
fn test_unused_placeholder_is_kept() {
    let b = builder("unused");
    b.placeholder("never_read").unwrap();
    let g = b.graph().unwrap();
    assert!(g.is_empty());
    assert!(g.is_placeholder("never_read"));
}

#[test]
fn test_graph_outlives_later_commits() {
    let b = builder("snapshot");
    let input = b.placeholder("input").unwrap();
    let out = b.define("out").unwrap();
    out.assign_from("op", &[&input]).unwrap();

    let before = b.graph().unwrap();
    out.assign_from("op", &[&out]).unwrap();
    let after = b.graph().unwrap();

    assert_eq!(before.node_count(), 1);
    assert_eq!(after.node_count(), 2);
    assert_ne!(before, after);
    assert_eq!(after, b.graph().unwrap());
}

#[test]
fn test_failed_commit_leaves_session_unchanged() {
    let b = builder("atomic");
    let input = b.placeholder("input").unwrap();
    let out = b.define("out").unwrap();
    let ghost = b.define("ghost").unwrap();

    let err = out.assign_from("op", &[&input, &ghost]).unwrap_err();
    assert!(matches!(err, CaptureError::UndefinedValue { .. }));
    assert!(!out.is_bound());
    assert_eq!(b.program().borrow().node_count(), 0);

    // The next commit still gets the first id
    assert_eq!(out.assign_from("op", &[&input]).unwrap(), "op:0");
}

#[test]
fn test_display_dump() {
    let b = builder("display");
    let input = b.placeholder("input").unwrap();
    let out = b.define("out").unwrap();
    out.assign_from("op", &[&input]).unwrap();

    let g = b.finalize().unwrap();
    assert_eq!(
        g.to_string(),
        "Graph Structure (node_count=1, placeholders={input}):\n  {input} -> {op:0} -> {out}\n"
    );
}
