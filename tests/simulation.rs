//! Simulation driver and interactive session behavior.

mod common;

use common::{stack_of, INSUFFICIENT};
use opcode_explorer::backend::{Simulation, SimulationError, SimulationOptions, StackValue};
use opcode_explorer::config::Config;
use opcode_explorer::repl::{ReplState, Session};

#[test]
fn test_walkthrough_with_undo() {
    let mut sim = Simulation::new(stack_of("2 3"));
    sim.step("OP_SWAP").unwrap();
    sim.step("OP_ADD").unwrap();
    sim.push(StackValue::from(5)).unwrap();
    assert_eq!(sim.step("OP_EQUAL").unwrap(), &stack_of("true"));

    for expected in ["5 5", "5", "3 2", "2 3"] {
        assert_eq!(sim.undo().unwrap(), &stack_of(expected));
    }
    assert_eq!(sim.undo(), Err(SimulationError::NothingToUndo));
}

#[test]
fn test_halt_respects_options() {
    let config = Config::parse_toml("[simulation]\nhalt_on_error = false").unwrap();
    let mut sim = Simulation::with_options(stack_of(""), config.simulation.clone());
    sim.step("OP_SWAP").unwrap();
    assert!(!sim.is_halted());
    assert!(sim.push(StackValue::from(1)).is_ok());

    let mut sim = Simulation::with_options(stack_of(""), SimulationOptions::default());
    sim.step("OP_SWAP").unwrap();
    assert_eq!(
        sim.push(StackValue::from(1)),
        Err(SimulationError::Halted(INSUFFICIENT.to_string()))
    );
}

#[test]
fn test_session_uses_configured_prompt_and_depth() {
    let config = Config::parse_toml(
        r#"
        [repl]
        prompt = "opx> "

        [simulation]
        max_undo_depth = 1
        "#,
    )
    .unwrap();
    let mut session = Session::new(&config, stack_of("1"));
    assert_eq!(session.prompt(), "opx> ");

    session.handle_line("OP_DUP OP_DUP");
    assert_eq!(session.simulation().history_len(), 1);
    assert_eq!(session.handle_line(":undo"), vec!["[1, 1]"]);
    assert_eq!(session.handle_line(":undo"), vec!["error: Nothing to undo"]);
}

#[test]
fn test_session_halts_and_resets() {
    let mut session = Session::new(&Config::default(), stack_of(""));
    let out = session.handle_line(r#""x" 1 OP_ADD"#);
    assert_eq!(out[0], r#"["Error: Non-numeric values"]"#);
    assert!(matches!(session.state(), ReplState::Halted { .. }));

    assert_eq!(session.handle_line(":reset"), vec!["[]"]);
    assert_eq!(session.state(), &ReplState::Ready);
}
