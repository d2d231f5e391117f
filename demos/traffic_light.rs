//! Traffic Light State Machine
//!
//! A cyclic machine where each light stays on until its timer guard allows
//! the next one, plus a pedestrian button that can cut green short.
//!
//! Key concepts:
//! - Guards that capture shared flags
//! - Transition order as priority
//! - Lifecycle hooks and fault reporting
//!
//! Run with: RUST_LOG=debug cargo run --example traffic_light

use keelhaul::core::{State, StateError, Transition};
use keelhaul::{DriverConfig, FsmBuilder};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Light {
    Red,
    Green,
    Yellow,
}

struct Lamp {
    light: Light,
    next: Light,
    ticks: Arc<AtomicU32>,
    hold: u32,
    button: Arc<AtomicBool>,
}

impl State for Lamp {
    type Id = Light;

    fn id(&self) -> Light {
        self.light
    }

    fn enable(&self) -> Result<(), StateError> {
        self.ticks.store(0, Ordering::SeqCst);
        println!("  {:?} on", self.light);
        Ok(())
    }

    fn disable(&self) -> Result<(), StateError> {
        println!("  {:?} off", self.light);
        Ok(())
    }

    fn transitions(&self) -> Vec<Transition<Light>> {
        let mut transitions = Vec::new();
        if self.light == Light::Green {
            let button = Arc::clone(&self.button);
            transitions.push(
                Transition::to(Light::Yellow).when(move || button.swap(false, Ordering::SeqCst)),
            );
        }
        let ticks = Arc::clone(&self.ticks);
        let hold = self.hold;
        transitions
            .push(Transition::to(self.next).when(move || ticks.load(Ordering::SeqCst) >= hold));
        transitions
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let ticks = Arc::new(AtomicU32::new(0));
    let button = Arc::new(AtomicBool::new(false));
    let lamp = |light, next, hold| Lamp {
        light,
        next,
        ticks: Arc::clone(&ticks),
        hold,
        button: Arc::clone(&button),
    };

    let fsm = FsmBuilder::new()
        .state(lamp(Light::Red, Light::Green, 3))
        .state(lamp(Light::Green, Light::Yellow, 4))
        .state(lamp(Light::Yellow, Light::Red, 1))
        .initial(Light::Red)
        .config(DriverConfig::default().named("traffic-light"))
        .on_fault(|fault| eprintln!("fault: {fault}"))
        .build()
        .unwrap();

    fsm.boot().unwrap();

    for tick in 1..=16 {
        ticks.fetch_add(1, Ordering::SeqCst);
        if tick == 6 {
            println!("  (pedestrian presses the button)");
            button.store(true, Ordering::SeqCst);
        }
        if let Some(transition) = fsm.ready_transition() {
            fsm.perform_transition(&transition).unwrap();
        }
    }

    fsm.terminate().unwrap();

    let stats = fsm.stats();
    println!("\nTransitions: {}", stats.transitions);
    println!("Evaluations: {}", stats.evaluations);
    println!("Path: {:?}", fsm.history().path());

    println!("\n=== Example Complete ===");
}
