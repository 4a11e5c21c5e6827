//! Event buffering: FIFO delivery and the one-update deferral of events
//! fired from inside a dispatch pass.

use std::cell::RefCell;
use std::rc::Rc;

use spindle_engine::behaviour::{Behaviour, Outcome, Subscriptions};
use spindle_engine::event::Event;
use spindle_engine::world::{Context, World};

type Log = Rc<RefCell<Vec<String>>>;

/// Records the kind of every non-lifecycle event it receives.
struct KindLogger {
    subs: Subscriptions,
    log: Log,
}

impl KindLogger {
    fn new(log: &Log, kinds: &[&str]) -> Self {
        let mut subs = Subscriptions::new();
        for kind in kinds {
            subs.subscribe(*kind);
        }
        Self {
            subs,
            log: Rc::clone(log),
        }
    }
}

impl Behaviour for KindLogger {
    fn subscriptions(&self) -> &Subscriptions {
        &self.subs
    }

    fn handle_event(&mut self, _ctx: &mut Context<'_>, event: &mut Event) -> Outcome {
        match event.kind().as_str() {
            "CreatedEntity" | "DestroyedEntity" => {}
            other => self.log.borrow_mut().push(other.to_string()),
        }
        Outcome::Continue
    }
}

/// Answers every "Ping" with a "Pong" fired through the context.
struct Echo {
    subs: Subscriptions,
    pings: Rc<RefCell<usize>>,
    pongs: Rc<RefCell<usize>>,
}

impl Behaviour for Echo {
    fn subscriptions(&self) -> &Subscriptions {
        &self.subs
    }

    fn handle_event(&mut self, ctx: &mut Context<'_>, event: &mut Event) -> Outcome {
        match event.kind().as_str() {
            "Ping" => {
                *self.pings.borrow_mut() += 1;
                ctx.fire_event(Event::new("Pong"));
            }
            "Pong" => *self.pongs.borrow_mut() += 1,
            _ => {}
        }
        Outcome::Continue
    }
}

#[test]
fn events_are_delivered_in_submission_order() {
    let log: Log = Rc::default();
    let mut world = World::new();
    let e = world.create_entity();
    world.add_behaviour(e, KindLogger::new(&log, &["First", "Second", "Third"]));
    world.update();

    world.fire_event(Event::new("First"));
    world.fire_event(Event::new("Second"));
    world.fire_event(Event::new("Third"));
    world.update();

    assert_eq!(*log.borrow(), ["First", "Second", "Third"]);
}

#[test]
fn an_event_fired_during_dispatch_waits_for_the_next_update() {
    let pings = Rc::new(RefCell::new(0));
    let pongs = Rc::new(RefCell::new(0));
    let mut world = World::new();
    let e = world.create_entity();
    world.add_behaviour(
        e,
        Echo {
            subs: Subscriptions::new().with("Ping").with("Pong"),
            pings: Rc::clone(&pings),
            pongs: Rc::clone(&pongs),
        },
    );
    world.update();

    world.fire_event(Event::new("Ping"));
    world.update();
    assert_eq!(*pings.borrow(), 1);
    assert_eq!(*pongs.borrow(), 0);

    world.update();
    assert_eq!(*pings.borrow(), 1);
    assert_eq!(*pongs.borrow(), 1);
}

#[test]
fn tick_is_delivered_once_per_update() {
    let ticks = Rc::new(RefCell::new(0_usize));

    struct TickCounter {
        subs: Subscriptions,
        ticks: Rc<RefCell<usize>>,
    }

    impl Behaviour for TickCounter {
        fn subscriptions(&self) -> &Subscriptions {
            &self.subs
        }

        fn on_tick(&mut self, _ctx: &mut Context<'_>) {
            *self.ticks.borrow_mut() += 1;
        }
    }

    let mut world = World::new();
    let e = world.create_entity();
    world.add_behaviour(
        e,
        TickCounter {
            subs: Subscriptions::new().with("Tick"),
            ticks: Rc::clone(&ticks),
        },
    );
    world.update();
    world.update();
    world.update();

    // The first update promotes the entity; it sees the tick of all three.
    assert_eq!(*ticks.borrow(), 3);
}

#[test]
fn events_fired_before_an_update_are_drained_by_it() {
    let log: Log = Rc::default();
    let mut world = World::new();
    let e = world.create_entity();
    world.add_behaviour(e, KindLogger::new(&log, &["Once"]));
    world.update();

    world.fire_event(Event::new("Once"));
    assert_eq!(world.pending_events(), 1);
    world.update();
    assert_eq!(log.borrow().len(), 1);

    world.update();
    world.update();
    assert_eq!(log.borrow().len(), 1);
}
