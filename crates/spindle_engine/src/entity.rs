//! Per-entity behaviour collections and dispatch.
//!
//! Each entity owns a set of behaviours grouped into category buckets.
//! Dispatch walks the buckets in the order given by the world's category
//! order list, then each bucket in ascending priority, invoking every
//! behaviour that listens to the event's type until one returns
//! [`Outcome::Stop`].

use std::any::Any;
use std::fmt;

use crate::behaviour::{Behaviour, Outcome};
use crate::event::Event;
use crate::world::Context;

/// One category's behaviours, in dispatch order.
struct CategoryBucket {
    /// Category name, as reported by the behaviours in the bucket.
    name: String,
    /// Behaviours sorted ascending by priority; ties keep attach order.
    behaviours: Vec<Box<dyn Behaviour>>,
}

/// The behaviours attached to a single entity, grouped by category.
///
/// Buckets are kept in first-seen order, which decides ties between
/// categories the world's order list does not mention.
#[derive(Default)]
pub struct BehaviourSet {
    categories: Vec<CategoryBucket>,
}

impl BehaviourSet {
    /// Creates an empty behaviour set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a behaviour under its declared category.
    ///
    /// The behaviour is inserted after any existing behaviour of equal or
    /// lower priority, so equal priorities dispatch in attach order.
    pub fn insert(&mut self, behaviour: Box<dyn Behaviour>) {
        let priority = behaviour.priority();
        let index = match self
            .categories
            .iter()
            .position(|bucket| bucket.name == behaviour.category())
        {
            Some(index) => index,
            None => {
                self.categories.push(CategoryBucket {
                    name: behaviour.category().to_string(),
                    behaviours: Vec::new(),
                });
                self.categories.len() - 1
            }
        };
        let bucket = &mut self.categories[index];
        let pos = bucket
            .behaviours
            .partition_point(|b| b.priority() <= priority);
        bucket.behaviours.insert(pos, behaviour);
    }

    /// Detaches the first behaviour of the given concrete type, scanning
    /// categories in dispatch-tie order. Returns whether one was removed.
    pub fn remove<T: Behaviour>(&mut self) -> bool {
        for bucket in &mut self.categories {
            if let Some(pos) = bucket
                .behaviours
                .iter()
                .position(|b| (&**b as &dyn Any).is::<T>())
            {
                bucket.behaviours.remove(pos);
                return true;
            }
        }
        false
    }

    /// Returns the first behaviour of the given concrete type, scanning
    /// all categories.
    #[must_use]
    pub fn get<T: Behaviour>(&self) -> Option<&T> {
        self.categories
            .iter()
            .flat_map(|bucket| bucket.behaviours.iter())
            .find_map(|b| (&**b as &dyn Any).downcast_ref::<T>())
    }

    /// Returns the first behaviour of the given concrete type, mutably.
    pub fn get_mut<T: Behaviour>(&mut self) -> Option<&mut T> {
        self.categories
            .iter_mut()
            .flat_map(|bucket| bucket.behaviours.iter_mut())
            .find_map(|b| (&mut **b as &mut dyn Any).downcast_mut::<T>())
    }

    /// Returns the total number of attached behaviours.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.iter().map(|b| b.behaviours.len()).sum()
    }

    /// Returns true if no behaviours are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|b| b.behaviours.is_empty())
    }

    /// Delivers one event to this entity's behaviours.
    ///
    /// Categories dispatch in the order given by `category_order`; a
    /// category absent from that list sorts before all listed categories,
    /// with ties between absent categories broken by first-attach order.
    /// Within a category, behaviours run in ascending priority. Only behaviours
    /// listening to the event's type are invoked; the first `Stop` halts
    /// delivery of this event to this entity.
    ///
    /// Target filtering is the caller's job: by the time an event reaches
    /// this method it is known to concern this entity.
    pub fn dispatch(
        &mut self,
        ctx: &mut Context<'_>,
        category_order: &[String],
        event: &mut Event,
    ) -> Outcome {
        let mut order: Vec<usize> = (0..self.categories.len()).collect();
        // Option<usize> ranks None before Some, so unlisted categories go first.
        order.sort_by_key(|&i| {
            let name = self.categories[i].name.as_str();
            (category_order.iter().position(|c| c == name), i)
        });

        for i in order {
            for behaviour in &mut self.categories[i].behaviours {
                if behaviour.is_listening(event.kind().as_str())
                    && behaviour.handle_event(ctx, event) == Outcome::Stop
                {
                    return Outcome::Stop;
                }
            }
        }
        Outcome::Continue
    }
}

impl fmt::Debug for BehaviourSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for bucket in &self.categories {
            map.entry(&bucket.name, &bucket.behaviours.len());
        }
        map.finish()
    }
}
