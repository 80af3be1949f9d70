pub mod queue;
pub mod slot_arena;
pub mod stack;

pub use queue::LinkedQueue;
pub use slot_arena::{SlotArena, SlotId};
pub use stack::TreiberStack;

/// Creates an empty lock-free LIFO stack.
pub fn stack<T>() -> TreiberStack<T> {
    TreiberStack::new()
}

/// Creates an empty, unbounded FIFO queue.
pub fn fifo_queue<T>() -> LinkedQueue<T> {
    LinkedQueue::new()
}
