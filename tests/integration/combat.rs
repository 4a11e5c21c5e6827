//! A small combat pipeline: an attack event fans out through a chain of
//! reactive behaviours, one update per hop, and lands as a health change.

use spindle_engine::behaviour::{Behaviour, Outcome, Subscriptions};
use spindle_engine::event::Event;
use spindle_engine::world::{Context, World};
use spindle_foundation::{EntityId, Value};

/// Hit points, stored as plain component data.
struct Health {
    hp: i64,
}

/// Turns a "MeleeAttack" on the owner into a "DealDamage" request carrying
/// the weapon's base damage and the victim.
struct MeleeStrike {
    subs: Subscriptions,
    base_damage: i64,
}

impl MeleeStrike {
    fn new(base_damage: i64) -> Self {
        Self {
            subs: Subscriptions::new().with("MeleeAttack"),
            base_damage,
        }
    }
}

impl Behaviour for MeleeStrike {
    fn category(&self) -> &str {
        "Damage"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn subscriptions(&self) -> &Subscriptions {
        &self.subs
    }

    fn handle_event(&mut self, ctx: &mut Context<'_>, event: &mut Event) -> Outcome {
        if event.kind().as_str() == "MeleeAttack" {
            if let Some(victim) = event.get_entity("victim") {
                ctx.fire_event(
                    Event::new("DealDamage")
                        .with_target(ctx.owner())
                        .with("amount", self.base_damage)
                        .with("victim", Value::EntityRef(victim)),
                );
            }
        }
        Outcome::Continue
    }
}

/// Adds a flat bonus to outgoing "DealDamage" requests and forwards the
/// final amount to the victim as "TakeDamage".
struct StrengthBonus {
    subs: Subscriptions,
    bonus: i64,
}

impl StrengthBonus {
    fn new(bonus: i64) -> Self {
        Self {
            subs: Subscriptions::new().with("DealDamage"),
            bonus,
        }
    }
}

impl Behaviour for StrengthBonus {
    fn category(&self) -> &str {
        "Damage"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn subscriptions(&self) -> &Subscriptions {
        &self.subs
    }

    fn handle_event(&mut self, ctx: &mut Context<'_>, event: &mut Event) -> Outcome {
        if event.kind().as_str() == "DealDamage" {
            if let (Some(amount), Some(victim)) =
                (event.get_int("amount"), event.get_entity("victim"))
            {
                ctx.fire_event(
                    Event::new("TakeDamage")
                        .with_target(victim)
                        .with("amount", amount + self.bonus),
                );
            }
        }
        Outcome::Continue
    }
}

/// Applies incoming "TakeDamage" to the owner's `Health` component.
struct TakesDamage {
    subs: Subscriptions,
}

impl TakesDamage {
    fn new() -> Self {
        Self {
            subs: Subscriptions::new().with("TakeDamage"),
        }
    }
}

impl Behaviour for TakesDamage {
    fn category(&self) -> &str {
        "Health"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn subscriptions(&self) -> &Subscriptions {
        &self.subs
    }

    fn handle_event(&mut self, ctx: &mut Context<'_>, event: &mut Event) -> Outcome {
        if event.kind().as_str() == "TakeDamage" {
            if let Some(amount) = event.get_int("amount") {
                let owner = ctx.owner();
                if let Some(health) = ctx.component_mut::<Health>(owner) {
                    health.hp -= amount;
                }
            }
        }
        Outcome::Continue
    }
}

fn hp(world: &World, entity: EntityId) -> i64 {
    world
        .component::<Health>(entity)
        .map(|h| h.hp)
        .unwrap_or_default()
}

#[test]
fn a_melee_attack_resolves_over_three_updates() {
    let mut world = World::new();
    world.set_category_order(vec!["Damage".into(), "Health".into()]);

    let attacker = world.create_entity();
    world.add_behaviour(attacker, MeleeStrike::new(5));
    world.add_behaviour(attacker, StrengthBonus::new(10));

    let victim = world.create_entity();
    world.add_component(victim, Health { hp: 100 });
    world.add_behaviour(victim, TakesDamage::new());

    world.update();

    world.fire_event(
        Event::new("MeleeAttack")
            .with_target(attacker)
            .with("victim", Value::EntityRef(victim)),
    );

    // Hop one: MeleeAttack reaches the attacker, who requests DealDamage.
    world.update();
    assert_eq!(hp(&world, victim), 100);

    // Hop two: the bonus is applied and TakeDamage heads for the victim.
    world.update();
    assert_eq!(hp(&world, victim), 100);

    // Hop three: the victim takes 5 + 10.
    world.update();
    assert_eq!(hp(&world, victim), 85);
}

#[test]
fn damage_requests_do_not_leak_to_bystanders() {
    let mut world = World::new();
    world.set_category_order(vec!["Damage".into(), "Health".into()]);

    let attacker = world.create_entity();
    world.add_behaviour(attacker, MeleeStrike::new(5));
    world.add_behaviour(attacker, StrengthBonus::new(10));

    let victim = world.create_entity();
    world.add_component(victim, Health { hp: 100 });
    world.add_behaviour(victim, TakesDamage::new());

    let bystander = world.create_entity();
    world.add_component(bystander, Health { hp: 100 });
    world.add_behaviour(bystander, TakesDamage::new());

    world.update();
    world.fire_event(
        Event::new("MeleeAttack")
            .with_target(attacker)
            .with("victim", Value::EntityRef(victim)),
    );
    for _ in 0..3 {
        world.update();
    }

    assert_eq!(hp(&world, victim), 85);
    assert_eq!(hp(&world, bystander), 100);
}

/// Absorbs incoming "TakeDamage" entirely and stops further handling.
struct Shield {
    subs: Subscriptions,
}

impl Behaviour for Shield {
    fn category(&self) -> &str {
        "Health"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn subscriptions(&self) -> &Subscriptions {
        &self.subs
    }

    fn handle_event(&mut self, _ctx: &mut Context<'_>, event: &mut Event) -> Outcome {
        if event.kind().as_str() == "TakeDamage" {
            return Outcome::Stop;
        }
        Outcome::Continue
    }
}

#[test]
fn a_shield_blocks_damage_by_stopping_dispatch() {
    let mut world = World::new();
    world.set_category_order(vec!["Damage".into(), "Health".into()]);

    let attacker = world.create_entity();
    world.add_behaviour(attacker, MeleeStrike::new(5));
    world.add_behaviour(attacker, StrengthBonus::new(10));

    let victim = world.create_entity();
    world.add_component(victim, Health { hp: 100 });
    world.add_behaviour(
        victim,
        Shield {
            subs: Subscriptions::new().with("TakeDamage"),
        },
    );
    world.add_behaviour(victim, TakesDamage::new());

    world.update();
    world.fire_event(
        Event::new("MeleeAttack")
            .with_target(attacker)
            .with("victim", Value::EntityRef(victim)),
    );
    for _ in 0..3 {
        world.update();
    }

    // The shield's lower priority puts it ahead of the health handler.
    assert_eq!(hp(&world, victim), 100);
}
