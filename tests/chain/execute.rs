//! Forward walk: ordering, early completion and error propagation.

use command_chain::{Chain, ChainError, Command, Context, MapContext};

use crate::support::{log, Outcome, Step};

#[test]
fn all_delegating_commands_run_in_order() {
    let chain = Chain::builder()
        .command(Step::new("1", Outcome::Continue))
        .command(Step::new("2", Outcome::Continue))
        .command(Step::new("3", Outcome::Continue))
        .build();
    let mut ctx = MapContext::new();
    assert!(!chain.execute(&mut ctx).unwrap());
    assert_eq!(log(&ctx), "1/2/3");
}

#[test]
fn completing_command_stops_the_walk() {
    let chain = Chain::builder()
        .command(Step::new("1", Outcome::Continue))
        .command(Step::new("2", Outcome::Complete))
        .command(Step::new("3", Outcome::Continue))
        .build();
    let mut ctx = MapContext::new();
    assert!(chain.execute(&mut ctx).unwrap());
    assert_eq!(log(&ctx), "1/2");
}

#[test]
fn failing_command_stops_the_walk_and_propagates() {
    let chain = Chain::builder()
        .command(Step::new("1", Outcome::Continue))
        .command(Step::new("2", Outcome::Fail))
        .command(Step::new("3", Outcome::Continue))
        .build();
    let mut ctx = MapContext::new();
    let err = chain.execute(&mut ctx).unwrap_err();
    assert!(matches!(err, ChainError::Failed(ref m) if m == "2 failed"));
    assert_eq!(log(&ctx), "1/2");
}

#[test]
fn empty_chain_returns_false() {
    let mut ctx = MapContext::new();
    assert!(!Chain::default().execute(&mut ctx).unwrap());
    assert!(ctx.is_empty());
}

#[test]
fn nested_chain_completion_stops_outer() {
    let inner = Chain::builder()
        .command(Step::new("a", Outcome::Continue))
        .command(Step::new("b", Outcome::Complete))
        .build();
    let outer = Chain::builder()
        .command(Step::new("1", Outcome::Continue))
        .link(inner)
        .command(Step::new("2", Outcome::Continue))
        .build();
    let mut ctx = MapContext::new();
    assert!(outer.execute(&mut ctx).unwrap());
    assert_eq!(log(&ctx), "1/a/b");
}

#[test]
fn nested_chain_error_reaches_outer_caller() {
    let inner = Chain::builder().command(Step::new("a", Outcome::Fail)).build();
    let outer = Chain::builder()
        .link(inner)
        .command(Step::new("never", Outcome::Continue))
        .build();
    let mut ctx = MapContext::new();
    let err = outer.execute(&mut ctx).unwrap_err();
    assert_eq!(err.to_string(), "command failed: a failed");
    assert_eq!(log(&ctx), "a");
}
