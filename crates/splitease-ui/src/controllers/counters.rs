//! Animated balance counters

use splitease_core::{parse_balance_text, CounterAnimation, Decimal};

use crate::dom::NodeId;
use crate::page::Page;
use crate::scheduler::Task;

impl Page {
    /// Animate every `.balance-amount` showing a positive figure up from zero
    pub(crate) fn start_counters(&mut self) {
        let now = self.scheduler.now();
        let duration = self.config.animation.counter_duration_ms;
        let frame = self.config.animation.frame_interval_ms;

        for node in self.doc.query_class("balance-amount") {
            let Some(target) = parse_balance_text(&self.doc.text_content(node)) else {
                continue;
            };
            self.counters
                .insert(node, CounterAnimation::new(Decimal::ZERO, target, duration, now));
            self.scheduler.schedule(frame, Task::CounterFrame(node));
        }
    }

    pub fn is_counter_running(&self, node: NodeId) -> bool {
        self.counters.contains_key(&node)
    }

    pub(crate) fn counter_frame(&mut self, node: NodeId) {
        let now = self.scheduler.now();
        let Some(counter) = self.counters.get(&node) else {
            return;
        };
        if !self.doc.is_connected(node) {
            self.counters.remove(&node);
            return;
        }

        let text = self.currency.format(counter.value_at(now));
        let finished = counter.is_finished(now);
        if let Some(element) = self.doc.get_mut(node) {
            element.set_text(&text);
        }

        if finished {
            self.counters.remove(&node);
        } else {
            self.scheduler
                .schedule(self.config.animation.frame_interval_ms, Task::CounterFrame(node));
        }
    }
}
