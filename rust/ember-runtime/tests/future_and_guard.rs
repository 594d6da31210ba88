//! Deferred values across threads, and the fault guard around builtin calls.

use ember_runtime::config::RuntimeConfig;
use ember_runtime::guard::{run_guarded, FaultPolicy, Guard};
use ember_runtime::{deferred, registry, FutureHandle, Value};
use std::thread;
use std::time::Duration;

fn call(name: &str, args: &[Value]) -> Value {
    registry::call(name, args).unwrap_or_else(|| panic!("builtin {} not registered", name))
}

// ===========================================================================
// Futures
// ===========================================================================

#[test]
fn await_blocks_until_another_thread_delivers() {
    let (promise, future) = deferred();
    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        promise.deliver(Value::Int(99)).unwrap();
    });

    let fut = Value::Future(future.clone());
    assert_eq!(call("Await", &[fut.clone()]), Value::Int(99));
    assert!(future.is_resolved());
    assert_eq!(fut.inspect(), "<future resolved>");
    producer.join().unwrap();
}

#[test]
fn concurrent_awaiters_share_one_value() {
    let (promise, future) = deferred();
    let waiters: Vec<_> = (0..4)
        .map(|_| {
            let f = future.clone();
            thread::spawn(move || f.await_value())
        })
        .collect();

    promise.deliver(Value::from("shared")).unwrap();
    for w in waiters {
        assert_eq!(w.join().unwrap().as_str(), Some("shared"));
    }
}

#[test]
fn abandoned_promise_yields_error_value() {
    let (promise, future) = deferred();
    drop(promise);
    let out = call("Await", &[Value::Future(future)]);
    assert_eq!(
        out.error_message(),
        Some("Await: future was abandoned before a value was delivered")
    );
}

#[test]
fn delivering_to_a_dropped_future_hands_the_value_back() {
    let (promise, future) = deferred();
    drop(future);
    let err = promise.deliver(Value::Int(1)).unwrap_err();
    assert_eq!(err.0, Value::Int(1));
}

#[test]
fn ready_futures_do_not_block() {
    let future = FutureHandle::ready(Value::Bool(true));
    assert!(future.is_resolved());
    assert_eq!(call("Await", &[Value::Future(future)]), Value::Bool(true));
}

#[test]
fn spawn_is_registered_but_unavailable() {
    let target = registry::value("len").unwrap();
    assert!(call("Spawn", &[target]).is_error());
}

// ===========================================================================
// Guard
// ===========================================================================

#[test]
fn builtin_errors_are_not_faults() {
    let outcome = run_guarded(FaultPolicy::Catch, || {
        call("Divide", &[Value::Int(1), Value::Int(0)])
    });
    assert!(outcome.completed());
    assert!(outcome.value().map(Value::is_error).unwrap_or(false));
}

#[test]
fn host_panics_become_faults() {
    let outcome = run_guarded(FaultPolicy::LogAndContinue, || {
        let n = call("len", &[Value::from("abc")]);
        match n {
            Value::Int(3) => panic!("host callback failed after len"),
            other => other,
        }
    });
    assert!(!outcome.completed());
    assert_eq!(
        outcome.error().and_then(Value::error_message),
        Some("execution fault: host callback failed after len")
    );
}

#[test]
fn guard_from_config() {
    let cfg = RuntimeConfig::from_toml_str(
        "[runtime]\nfault_policy = \"catch\"\ncapture_backtrace = true\n",
    )
    .unwrap();
    let guard: Guard = cfg.guard();
    let outcome = guard.run(|| panic!("configured"));
    assert!(outcome.diagnostic().contains("configured"));
    assert!(outcome.diagnostic().contains("backtrace:"));
}

#[test]
fn guards_are_per_thread() {
    let handles: Vec<_> = (0..3)
        .map(|i| {
            thread::spawn(move || {
                run_guarded(FaultPolicy::Catch, move || {
                    if i == 1 {
                        panic!("thread {}", i);
                    }
                    Value::Int(i)
                })
            })
        })
        .collect();
    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(outcomes[0].completed());
    assert!(!outcomes[1].completed());
    assert_eq!(outcomes[2].value(), Some(&Value::Int(2)));
}
