//=========================================================================
// Event Collector
//=========================================================================
//
// The window's event queue.
//
// Architecture:
//   Backend::pump_events ──┐
//   Window::post_event   ──┼──► Sender<Event> ──► Receiver<Event>
//   other threads        ──┘                          │
//                                           collect_frame() per frame
//
// collect_frame() takes only the events queued when it is called, so an
// event posted by a handler during the event phase is seen next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::event::Event;

//=== Constants ===========================================================

/// Queue length above which a frame logs a backlog warning.
const BACKLOG_WARNING: usize = 1024;

//=== EventQueue ==========================================================

/// Unbounded multi-producer event queue drained by the window loop.
#[derive(Debug)]
pub struct EventQueue {
    sender: Sender<Event>,
    receiver: Receiver<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Queues an event for the next event phase.
    pub fn post(&self, event: Event) {
        // Both ends live in self, so the channel cannot be disconnected.
        let _ = self.sender.send(event);
    }

    /// Sender usable from anywhere, including other threads.
    pub fn sender(&self) -> Sender<Event> {
        self.sender.clone()
    }

    /// Borrowed sender handed to the backend each frame.
    pub(crate) fn sink(&self) -> &Sender<Event> {
        &self.sender
    }

    /// Removes and returns the events queued right now, oldest first.
    pub fn collect_frame(&self) -> Vec<Event> {
        let queued = self.receiver.len();
        if queued > BACKLOG_WARNING {
            warn!(target: "window", "Event queue backlog: draining {} events this frame", queued);
        }

        self.receiver.try_iter().take(queued).collect()
    }

    /// Drops every queued event.
    pub fn clear(&self) {
        while self.receiver.try_recv().is_ok() {}
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn collect_handles_empty_queue() {
        let queue = EventQueue::new();
        assert!(queue.collect_frame().is_empty());
    }

    #[test]
    fn collect_preserves_order() {
        let queue = EventQueue::new();
        queue.post(Event::user(1));
        queue.post(Event::Quit);
        queue.post(Event::user(2));

        assert_eq!(queue.collect_frame(), vec![Event::user(1), Event::Quit, Event::user(2)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn events_posted_after_collection_wait_for_next_frame() {
        let queue = EventQueue::new();
        queue.post(Event::user(1));

        let frame = queue.collect_frame();
        queue.post(Event::user(2));

        assert_eq!(frame, vec![Event::user(1)]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn sender_works_across_threads() {
        let queue = EventQueue::new();
        let sender = queue.sender();

        thread::spawn(move || {
            sender.send(Event::user(9)).unwrap();
        })
        .join()
        .unwrap();

        assert_eq!(queue.collect_frame(), vec![Event::user(9)]);
    }

    #[test]
    fn clear_drops_everything() {
        let queue = EventQueue::new();
        queue.post(Event::Quit);
        queue.post(Event::ScreenUpdate);

        queue.clear();

        assert!(queue.is_empty());
    }
}
