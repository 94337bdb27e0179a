use std::collections::VecDeque;

/// Outgoing messages, delivered in the order they were sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailBox<A> {
    outgoing: VecDeque<A>,
}

impl<A> MailBox<A> {
    pub fn empty() -> Self {
        let outgoing = VecDeque::new();

        MailBox { outgoing }
    }

    pub fn send(&mut self, msg: A) {
        self.outgoing.push_back(msg);
    }

    pub fn take_one(&mut self) -> Option<A> {
        self.outgoing.pop_front()
    }

    pub fn len(&self) -> usize {
        self.outgoing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }
}

impl<A> Default for MailBox<A> {
    fn default() -> Self {
        Self::empty()
    }
}
