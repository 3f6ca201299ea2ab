use std::collections::HashMap;

use super::ids::MessageId;
use super::message::Message;

/// The chat log of one tunnel.
///
/// Messages are keyed by id so the pending agent reply can be reconciled in
/// place, while `order` keeps insertion order for rendering.
#[derive(Debug, Default)]
pub struct Conversation {
    order: Vec<MessageId>,
    messages: HashMap<MessageId, Message>,
    /// Bumped on every mutation so views can tell that the log changed.
    revision: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Appends a message at the end of the log.
    ///
    /// A message whose id is already present replaces the stored record but
    /// keeps its original position.
    pub fn push(&mut self, message: Message) {
        if !self.messages.contains_key(&message.id) {
            self.order.push(message.id.clone());
        }
        self.messages.insert(message.id.clone(), message);
        self.revision += 1;
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.get(id)
    }

    /// Applies `update` to the message with `id`.
    ///
    /// Returns `false` and leaves the log untouched when the id is unknown,
    /// which happens when a reply lands after the log was reset.
    pub fn update<F>(&mut self, id: &MessageId, update: F) -> bool
    where
        F: FnOnce(&mut Message),
    {
        match self.messages.get_mut(id) {
            Some(message) => {
                update(message);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Iterates messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.order.iter().filter_map(|id| self.messages.get(id))
    }

    pub fn last(&self) -> Option<&Message> {
        self.order.last().and_then(|id| self.messages.get(id))
    }

    pub fn pending_count(&self) -> usize {
        self.iter().filter(|message| message.is_pending()).count()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.messages.clear();
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::message::{MessageStatus, Role};

    fn id(raw: &str) -> MessageId {
        MessageId::from(raw.to_string())
    }

    #[test]
    fn iterates_in_insertion_order() {
        let mut convo = Conversation::new();
        convo.push(Message::user(id("b"), "first"));
        convo.push(Message::pending_agent(id("a"), "..."));
        let roles: Vec<Role> = convo.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Agent]);
        assert_eq!(convo.last().map(|m| m.id.as_str()), Some("a"));
    }

    #[test]
    fn update_mutates_in_place() {
        let mut convo = Conversation::new();
        convo.push(Message::pending_agent(id("a"), "..."));
        let before = convo.revision();
        let found = convo.update(&id("a"), |m| m.status = Some(MessageStatus::Sent));
        assert!(found);
        assert!(convo.revision() > before);
        assert_eq!(convo.get(&id("a")).and_then(|m| m.status), Some(MessageStatus::Sent));
        assert_eq!(convo.len(), 1);
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let mut convo = Conversation::new();
        convo.push(Message::user(id("a"), "hola"));
        let before = convo.revision();
        assert!(!convo.update(&id("missing"), |m| m.text.clear()));
        assert_eq!(convo.revision(), before);
        assert_eq!(convo.get(&id("a")).map(|m| m.text.as_str()), Some("hola"));
    }

    #[test]
    fn clear_empties_the_log() {
        let mut convo = Conversation::new();
        convo.push(Message::user(id("a"), "hola"));
        convo.clear();
        assert!(convo.is_empty());
        assert_eq!(convo.iter().count(), 0);
    }
}
