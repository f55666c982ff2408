use std::sync::Arc;

use super::*;
use crate::foundation::core::{Affine, Rgba};
use crate::path::bezier::BezierPath;
use crate::render::replay::replay;
use crate::render::trace::{TraceBackend, TraceEvent};

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

fn dot() -> Arc<BezierPath> {
    let mut p = BezierPath::new();
    p.oval(0.0, 0.0, 4.0, 4.0);
    Arc::new(p)
}

fn nested_log() -> InstructionLog {
    let mut log = InstructionLog::new();
    log.record(Instruction::Save);
    log.record(Instruction::Fill(Some(Rgba::new(1.0, 0.0, 0.0, 1.0))));
    log.record(Instruction::Transform(Affine::translate((3.0, 0.0))));
    log.record(Instruction::Save);
    log.record(Instruction::Transform(Affine::translate((0.0, 3.0))));
    log.record(Instruction::DrawPath(Some(dot())));
    log.record(Instruction::Restore);
    log.record(Instruction::DrawPath(None));
    log.record(Instruction::Restore);
    log.record(Instruction::DrawPath(None));
    log.begin_page(Instruction::NewPage {
        canvas: canvas(16, 16),
    });
    log.record(Instruction::DrawPath(Some(dot())));
    log
}

#[test]
fn redraw_matches_iterative_replay() {
    let log = nested_log();
    let mut iterative = TraceBackend::new();
    replay(&mut iterative, &log, canvas(32, 32)).unwrap();

    let mut view = ViewContext::new(TraceBackend::new(), &log, canvas(32, 32));
    view.redraw().unwrap();
    assert_eq!(view.backend().events(), iterative.events());
}

#[test]
fn redraws_are_identical() {
    let mut view = ViewContext::new(TraceBackend::new(), &nested_log(), canvas(32, 32));
    view.redraw().unwrap();
    let first = view.backend_mut().take_events();
    view.redraw().unwrap();
    let second = view.backend_mut().take_events();
    assert_eq!(first, second);
    assert_eq!(view.redraw_count(), 2);
    assert_eq!(view.backend().depth(), 0);
}

#[test]
fn snapshot_ignores_later_recording() {
    let mut log = nested_log();
    let mut view = ViewContext::new(TraceBackend::new(), &log, canvas(32, 32));
    log.record(Instruction::DrawPath(Some(dot())));
    assert_eq!(view.pages().len(), 2);
    view.redraw().unwrap();
    assert_eq!(view.into_backend().page_count(), 2);
}

#[test]
fn empty_log_redraws_one_blank_page() {
    let mut view = ViewContext::new(TraceBackend::new(), &InstructionLog::new(), canvas(8, 9));
    view.redraw().unwrap();
    assert_eq!(view.backend().events()[0], TraceEvent::BeginPage(canvas(8, 9)));
    assert_eq!(view.backend().page_count(), 1);
    assert_eq!(view.leading_canvas(), canvas(8, 9));
}

#[test]
fn restore_without_save_fails_redraw() {
    let mut log = InstructionLog::new();
    log.record(Instruction::Restore);
    let mut view = ViewContext::new(TraceBackend::new(), &log, canvas(8, 8));
    assert!(view.redraw().unwrap_err().is_usage());
}

#[test]
fn unbalanced_save_is_unwound_by_scope() {
    let mut log = InstructionLog::new();
    log.record(Instruction::Save);
    log.record(Instruction::Save);
    log.record(Instruction::Fill(None));
    let mut view = ViewContext::new(TraceBackend::new(), &log, canvas(8, 8));
    view.redraw().unwrap();
    let events = view.backend().events();
    let saves = events.iter().filter(|e| **e == TraceEvent::Save).count();
    let restores = events.iter().filter(|e| **e == TraceEvent::Restore).count();
    assert_eq!((saves, restores), (2, 2));
    assert_eq!(events.last(), Some(&TraceEvent::EndPage));
}

#[test]
fn save_open_across_new_page_fails_like_replay() {
    let mut log = InstructionLog::new();
    log.record(Instruction::Save);
    log.record(Instruction::DrawPath(Some(dot())));
    log.begin_page(Instruction::NewPage {
        canvas: canvas(10, 10),
    });
    log.record(Instruction::DrawPath(Some(dot())));

    let mut iterative = TraceBackend::new();
    let replayed = replay(&mut iterative, &log, canvas(10, 10)).unwrap_err();

    let mut view = ViewContext::new(TraceBackend::new(), &log, canvas(10, 10));
    let redrawn = view.redraw().unwrap_err();
    assert!(redrawn.is_usage());
    assert_eq!(redrawn.to_string(), replayed.to_string());
    assert_eq!(view.backend().depth(), 0);
    assert_eq!(view.redraw_count(), 0);
}
