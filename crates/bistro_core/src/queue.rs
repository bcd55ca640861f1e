//! FIFO queue of pending dish orders.

use std::collections::VecDeque;

use tracing::debug;

use crate::dish::{DietaryRequest, Dish};

/// Pending dishes in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DishQueue {
    dishes: VecDeque<Dish>,
}

impl DishQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dish at the back. `None` is ignored.
    pub fn enqueue(&mut self, dish: impl Into<Option<Dish>>) {
        if let Some(dish) = dish.into() {
            debug!("Queueing {}", dish.name);
            self.dishes.push_back(dish);
        }
    }

    /// Adjust a dish in place, then append it at the back. `None` is ignored.
    pub fn enqueue_with<F>(&mut self, dish: impl Into<Option<Dish>>, transform: F)
    where
        F: FnOnce(&mut Dish),
    {
        if let Some(mut dish) = dish.into() {
            transform(&mut dish);
            self.enqueue(dish);
        }
    }

    /// Queue a dish after accommodating a dietary request.
    pub fn enqueue_for(&mut self, dish: impl Into<Option<Dish>>, request: &DietaryRequest) {
        self.enqueue_with(dish, |dish| dish.accommodate(request));
    }

    /// Put a dish that could not be prepared back at the end of the line.
    ///
    /// The dish keeps its ticket, so it is still the same order.
    pub fn requeue(&mut self, dish: Dish) {
        debug!("Requeueing {}", dish.name);
        self.dishes.push_back(dish);
    }

    /// Take the dish at the front.
    pub fn dequeue(&mut self) -> Option<Dish> {
        self.dishes.pop_front()
    }

    pub fn front(&self) -> Option<&Dish> {
        self.dishes.front()
    }

    /// Current contents, front first.
    pub fn snapshot(&self) -> &VecDeque<Dish> {
        &self.dishes
    }

    /// Dish names, front first.
    pub fn names(&self) -> Vec<String> {
        self.dishes.iter().map(|dish| dish.name.clone()).collect()
    }

    /// Overwrite the whole queue.
    pub fn replace_all(&mut self, dishes: impl IntoIterator<Item = Dish>) {
        self.dishes = dishes.into_iter().collect();
        debug!("Queue replaced, {} dishes pending", self.dishes.len());
    }

    /// Empty the queue, handing every dish back to the caller in order.
    pub fn drain_all(&mut self) -> Vec<Dish> {
        self.dishes.drain(..).collect()
    }

    /// Empty the queue, discarding every dish.
    pub fn clear(&mut self) {
        debug!("Discarding {} queued dishes", self.dishes.len());
        self.dishes.clear();
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Dish names, one per line.
    pub fn render(&self) -> String {
        self.dishes
            .iter()
            .map(|dish| format!("{}\n", dish.name))
            .collect()
    }
}

impl FromIterator<Dish> for DishQueue {
    fn from_iter<I: IntoIterator<Item = Dish>>(iter: I) -> Self {
        Self {
            dishes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::Ingredient;

    #[test]
    fn test_enqueue_preserves_arrival_order() {
        let mut queue = DishQueue::new();
        queue.enqueue(Dish::new("Soup", Vec::new()));
        queue.enqueue(Dish::new("Salad", Vec::new()));
        queue.enqueue(Dish::new("Soup", Vec::new()));

        assert_eq!(queue.names(), vec!["Soup", "Salad", "Soup"]);
        assert_eq!(queue.dequeue().unwrap().name, "Soup");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_enqueue_none_is_ignored() {
        let mut queue = DishQueue::new();
        queue.enqueue(None);
        queue.enqueue_with(None, |_| panic!("transform must not run"));
        queue.enqueue_for(None, &DietaryRequest::default());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_enqueue_with_transform() {
        let mut queue = DishQueue::new();
        queue.enqueue_with(Dish::new("Soup", Vec::new()), |dish| dish.price = 4.5);
        assert_eq!(queue.front().unwrap().price, 4.5);
    }

    #[test]
    fn test_enqueue_for_dietary_request() {
        let mut queue = DishQueue::new();
        let dish = Dish::new(
            "Club Sandwich",
            vec![
                Ingredient::requirement("Bread", 2, 0.4),
                Ingredient::requirement("Turkey", 1, 1.5),
                Ingredient::requirement("Lettuce", 1, 0.2),
            ],
        );
        queue.enqueue_for(
            dish,
            &DietaryRequest {
                vegetarian: true,
                gluten_free: true,
                ..Default::default()
            },
        );

        let queued = queue.front().unwrap();
        assert_eq!(queued.ingredients.len(), 1);
        assert_eq!(queued.ingredients[0].name, "Lettuce");
    }

    #[test]
    fn test_requeue_keeps_ticket() {
        let mut queue = DishQueue::new();
        queue.enqueue(Dish::new("Soup", Vec::new()));
        queue.enqueue(Dish::new("Steak", Vec::new()));

        let soup = queue.dequeue().unwrap();
        let ticket = soup.ticket;
        queue.requeue(soup);

        assert_eq!(queue.names(), vec!["Steak", "Soup"]);
        assert_eq!(queue.snapshot()[1].ticket, ticket);
    }

    #[test]
    fn test_replace_and_drain() {
        let mut queue = DishQueue::new();
        queue.enqueue(Dish::new("Soup", Vec::new()));

        let restored = vec![Dish::new("Pie", Vec::new()), Dish::new("Tart", Vec::new())];
        let tickets: Vec<_> = restored.iter().map(|d| d.ticket).collect();
        queue.replace_all(restored);
        assert_eq!(queue.names(), vec!["Pie", "Tart"]);

        let drained = queue.drain_all();
        assert!(queue.is_empty());
        assert_eq!(drained.iter().map(|d| d.ticket).collect::<Vec<_>>(), tickets);
    }

    #[test]
    fn test_render() {
        let queue: DishQueue = vec![Dish::new("Soup", Vec::new()), Dish::new("Pie", Vec::new())]
            .into_iter()
            .collect();
        assert_eq!(queue.render(), "Soup\nPie\n");
    }
}
